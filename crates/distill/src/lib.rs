//! Post-processing for transcript similarity-search candidates.
//!
//! Turns an over-fetched, noisy candidate set into a compact, attributable
//! context for answer generation: quality filtering, metadata-aware
//! reranking, per-video aggregation and budget-constrained compression.
//! Every stage is a pure transformation over in-memory values; the only
//! fatal failure is structural misconfiguration.
//!
//! ```rust
//! use transcript_distill::{run, DistillConfig};
//!
//! let pack = run(Vec::new(), "rust ownership", &DistillConfig::default()).unwrap();
//! assert!(pack.text.is_empty());
//! assert!(pack.sources.is_empty());
//! ```

mod aggregate;
mod compress;
mod config;
mod error;
mod filter;
mod pipeline;
mod relevance;
mod rerank;

pub use aggregate::{aggregate, AggregatedDocument};
pub use compress::{compress, ContextPack, SourceAttribution};
pub use config::{DistillConfig, RerankWeights};
pub use error::{DistillError, Result};
pub use filter::filter_chunks;
pub use pipeline::{run, Distiller};
pub use relevance::{query_terms, relevance_score};
pub use rerank::{rerank, ScoredChunk};
