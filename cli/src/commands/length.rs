//! Length command implementation - per-record lengths or a single aggregate

use anyhow::{Context, Result};
use fastago_core::{decode, LengthMode};
use std::path::PathBuf;

use crate::config::Config;
use crate::error::CliError;
use crate::streams::{open_input, open_output};

pub fn execute(
    config: &Config,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    mode: Option<String>,
) -> Result<()> {
    // an unknown mode fails before any input is touched
    let mode_name = mode.unwrap_or_else(|| config.stats.length_mode.clone());
    let mode = mode_name.parse::<LengthMode>().map_err(CliError::from)?;
    log::info!("Computing sequence lengths (mode: {})", mode);

    let reader = open_input(input.as_deref())?;
    let mut writer = open_output(output.as_deref())?;

    let stream = decode(reader, &config.decoder_options()).map_err(CliError::from)?;
    mode.run(stream, &mut writer)
        .map_err(CliError::from)
        .context("Failed to compute sequence lengths")?;

    log::info!("Length computation completed");
    Ok(())
}
