use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, DistillError>;

/// Fatal pipeline failures surfaced to the caller
///
/// Per-candidate problems are recovered locally by dropping the candidate;
/// only structural misconfiguration reaches the caller, before any chunk is
/// processed. The caller's documented fallback on a fatal error is to hand
/// the generation step a raw top-k candidate slice instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DistillError {
    /// Invalid configuration (e.g. zero budget, ratio out of range)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
