//! Command implementations for the fastago CLI

pub mod length;
pub mod transform;
