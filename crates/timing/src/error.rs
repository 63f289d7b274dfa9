//! Error types for trace output.

use thiserror::Error;

/// Errors that can occur while writing a trace document.
///
/// Measurement itself never fails; only handing the collected records to a
/// sink can.
#[derive(Debug, Error)]
pub enum TimingError {
    /// The destination could not be created or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize the trace document
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for trace output operations.
pub type TimingResult<T> = Result<T, TimingError>;
