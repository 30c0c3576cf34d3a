use thiserror::Error;

/// Result type for candidate ingestion
pub type Result<T> = std::result::Result<T, ChunkError>;

/// Errors raised while validating a raw search candidate
///
/// These are per-candidate failures: the caller drops the offending candidate
/// and continues, they never abort a whole request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChunkError {
    /// A required candidate field was absent
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The candidate carried an empty transcript text
    #[error("Empty transcript text")]
    EmptyText,
}
