//! Configuration handling for the fastago CLI
//!
//! Supports loading configuration from fastago.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use fastago_core::{DecoderOptions, MAX_CHANNEL_CAPACITY};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CliError;

const DEFAULT_CONFIG_FILE: &str = "fastago.toml";
const MAX_READ_BUFFER_KB: usize = 64 * 1024;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub decoder: DecoderConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub stats: StatsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Records buffered between the decoder and the consumer (0 = rendezvous)
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Read buffer size in KiB
    #[serde(default = "default_read_buffer_kb")]
    pub read_buffer_kb: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Residues per line when re-emitting records (0 or negative = unwrapped)
    #[serde(default = "default_line_width")]
    pub line_width: isize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Default mode for `stats length`
    #[serde(default = "default_length_mode")]
    pub length_mode: String,
}

// Default value functions
fn default_channel_capacity() -> usize { DecoderOptions::default().channel_capacity }
fn default_read_buffer_kb() -> usize { DecoderOptions::default().read_buffer_size / 1024 }
fn default_line_width() -> isize { 60 }
fn default_length_mode() -> String { "each".to_string() }

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
            read_buffer_kb: default_read_buffer_kb(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            line_width: default_line_width(),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            length_mode: default_length_mode(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                // Try to find fastago.toml in current directory
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .map_err(CliError::from)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    fn validate(&self) -> Result<(), CliError> {
        if self.decoder.read_buffer_kb == 0 {
            return Err(CliError::config("decoder.read_buffer_kb must be at least 1"));
        }
        if self.decoder.read_buffer_kb > MAX_READ_BUFFER_KB {
            return Err(CliError::config(format!(
                "decoder.read_buffer_kb must be at most {}",
                MAX_READ_BUFFER_KB
            )));
        }
        if self.decoder.channel_capacity > MAX_CHANNEL_CAPACITY {
            return Err(CliError::config(format!(
                "decoder.channel_capacity must be at most {}",
                MAX_CHANNEL_CAPACITY
            )));
        }
        Ok(())
    }

    pub fn decoder_options(&self) -> DecoderOptions {
        DecoderOptions {
            channel_capacity: self.decoder.channel_capacity,
            read_buffer_size: self.decoder.read_buffer_kb * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output.line_width, 60);
        assert_eq!(config.stats.length_mode, "each");
        assert_eq!(config.decoder_options(), DecoderOptions::default());
    }

    #[test]
    fn test_config_roundtrip() -> Result<()> {
        let mut config = Config::default();
        config.output.line_width = 80;
        config.decoder.channel_capacity = 0;
        let temp_file = NamedTempFile::new()?;

        config.save_to_file(temp_file.path())?;
        let loaded_config = Config::load(Some(temp_file.path()))?;

        assert_eq!(loaded_config.output.line_width, 80);
        assert_eq!(loaded_config.decoder.channel_capacity, 0);
        assert_eq!(loaded_config.stats.length_mode, "each");

        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "[stats]\nlength_mode = \"max\"")?;

        let config = Config::load_from_file(temp_file.path())?;
        assert_eq!(config.stats.length_mode, "max");
        assert_eq!(config.output.line_width, 60);

        Ok(())
    }

    #[test]
    fn test_invalid_file_is_config_error() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "[output]\nline_width = \"wide\"")?;

        let err = Config::load_from_file(temp_file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::Config { .. })
        ));

        Ok(())
    }

    #[test]
    fn test_zero_read_buffer_rejected() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "[decoder]\nread_buffer_kb = 0")?;

        assert!(Config::load(Some(temp_file.path())).is_err());

        Ok(())
    }

    #[test]
    fn test_oversized_decoder_settings_rejected() -> Result<()> {
        for section in [
            "[decoder]\nchannel_capacity = 1000000000000",
            "[decoder]\nread_buffer_kb = 1000000000000",
        ] {
            let mut temp_file = NamedTempFile::new()?;
            writeln!(temp_file, "{}", section)?;

            let err = Config::load(Some(temp_file.path())).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<CliError>(),
                Some(CliError::Config { .. })
            ));
        }

        Ok(())
    }

    #[test]
    fn test_largest_channel_capacity_accepted() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "[decoder]\nchannel_capacity = {}", MAX_CHANNEL_CAPACITY)?;

        let config = Config::load(Some(temp_file.path()))?;
        assert!(config.decoder_options().validate().is_ok());

        Ok(())
    }

    #[test]
    fn test_toml_generation() -> Result<()> {
        let example = Config::default().to_toml()?;
        assert!(example.contains("[decoder]"));
        assert!(example.contains("[output]"));
        assert!(example.contains("[stats]"));
        Ok(())
    }
}
