//! Error types for decoding and reducing FASTA streams

use thiserror::Error;

/// Everything that can end a pipeline run early.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying stream failed while the decoder was reading it.
    #[error("Failed to read input: {0}")]
    Read(#[source] std::io::Error),

    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// An aggregate was requested over a stream with no records.
    #[error("No records found in input")]
    NoRecords,

    #[error("Unknown {kind} mode '{name}' (expected one of: {expected})")]
    UnknownMode {
        kind: &'static str,
        name: String,
        expected: String,
    },

    #[error("Decoding was cancelled")]
    Cancelled,

    /// The producer went away without sending its completion event.
    #[error("Decoder stopped without signalling completion")]
    Disconnected,

    /// The consumer failed to write its output.
    #[error("Failed to write output: {0}")]
    Write(#[source] std::io::Error),

    #[error("Failed to start decoder thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// [`DecoderOptions`](crate::DecoderOptions) outside the supported range.
    #[error("Invalid decoder options: {0}")]
    InvalidOptions(String),
}

impl Error {
    pub fn malformed<S: Into<String>>(line: usize, reason: S) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    /// True for failures that come from the input data rather than from the
    /// consumer or the runtime.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Read(_) | Self::MalformedRecord { .. })
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;
