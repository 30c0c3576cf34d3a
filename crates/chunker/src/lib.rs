//! # Transcript Chunker
//!
//! Candidate ingestion and transcript normalization for the context
//! distillation pipeline.
//!
//! ## Architecture
//!
//! ```text
//! Upstream similarity search
//!     │
//!     ├──> RawCandidate (loose record, serde-deserializable)
//!     │
//!     ├──> Validation → TranscriptChunk (immutable, required fields present)
//!     │
//!     └──> Cleaning (noise tags, URLs, whitespace) → downstream stages
//! ```
//!
//! ## Example
//!
//! ```rust
//! use transcript_chunker::{clean_transcript, RawCandidate};
//!
//! let candidate = RawCandidate::new("[Music] hello   world", 0.2, "vid-1")
//!     .title("Intro")
//!     .view_count(1200);
//!
//! let chunk = candidate.into_chunk().unwrap();
//! assert_eq!(clean_transcript(&chunk.text), "hello world");
//! ```

mod clean;
mod error;
mod types;

pub use clean::{clean_transcript, count_noise_markers};
pub use error::{ChunkError, Result};
pub use types::{estimate_tokens, RawCandidate, TranscriptChunk, CHARS_PER_TOKEN};
