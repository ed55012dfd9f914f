use thiserror::Error;

/// Result type used throughout the library.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while producing a summary report.
///
/// Every variant aborts the whole invocation; there is no partial report
/// and no internal retry.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("source not found: {0}")]
    SourceNotFound(String),

    #[error("failed to parse input: {0}")]
    Parse(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("cannot compute summary: {0}")]
    Computation(String),

    #[error("object storage request failed: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
