//! Error handling for the fastago CLI

use fastago_core::Error as PipelineError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fastago CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("{0}")]
    Pipeline(#[from] PipelineError),
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("TOML parsing error: {}", err))
    }
}

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Ensure you have read permissions for the file\n\
                 • Omit --input (or pass '-') to read from standard input",
                path.display()
            ));
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your fastago.toml configuration file\n\
                 • Use 'fastago config' to print the effective configuration",
            );
        }

        CliError::Pipeline(PipelineError::UnknownMode { .. }) => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Pick one of the listed modes with -m/--mode\n\
                 • Check the [stats] section of your fastago.toml",
            );
        }

        CliError::Pipeline(PipelineError::MalformedRecord { .. }) => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Ensure the input is FASTA: every record starts with a '>' header line\n\
                 • Compressed input must use the .gz extension",
            );
        }

        CliError::Pipeline(PipelineError::NoRecords) => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • The input contains no FASTA records\n\
                 • Use '-m each' to list lengths without aggregating",
            );
        }

        _ => {}
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &anyhow::Error) -> ! {
    match error.downcast_ref::<CliError>() {
        Some(cli_error) => eprintln!("Error: {}", format_error_with_suggestions(cli_error)),
        None => eprintln!("Error: {:#}", error),
    }
    std::process::exit(1);
}
