//! fastago core
//!
//! Streaming FASTA decoding and the reducers that consume it.
//!
//! ```no_run
//! use fastago_core::{decode, DecoderOptions, LengthMode};
//!
//! let stream = decode(std::io::stdin(), &DecoderOptions::default())?;
//! LengthMode::Average.run(stream, &mut std::io::stdout())?;
//! # Ok::<(), fastago_core::Error>(())
//! ```

/// Case folding of rendered residues
pub mod case;

/// Producer thread and the record channel
pub mod decoder;

pub mod error;

/// FASTA records
pub mod record;

/// Consumers draining a decoder
pub mod reducer;

/// Residue storage
pub mod sequence;

pub use case::Case;
pub use decoder::{
    decode, CancelToken, DecoderOptions, Event, RecordStream, MAX_CHANNEL_CAPACITY,
};
pub use error::{Error, Result};
pub use record::{Record, HEADER_MARKER};
pub use reducer::{drain, Average, Each, LengthMode, Max, Min, Reducer, Rewrite};
pub use sequence::{Lines, Sequence};

/// Version information for the fastago core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
