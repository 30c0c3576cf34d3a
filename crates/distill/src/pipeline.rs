use transcript_chunker::{RawCandidate, TranscriptChunk};

use crate::aggregate::aggregate;
use crate::compress::{compress, ContextPack};
use crate::config::DistillConfig;
use crate::error::{DistillError, Result};
use crate::filter::filter_chunks;
use crate::rerank::rerank;

/// The distillation pipeline: candidates in, budgeted context out
///
/// Stateless apart from its configuration; one instance can serve concurrent
/// independent requests without coordination.
#[derive(Debug, Clone)]
pub struct Distiller {
    config: DistillConfig,
}

impl Distiller {
    /// Create a distiller, validating the configuration eagerly
    ///
    /// Structural misconfiguration is the only fatal failure of this core and
    /// is surfaced here, before any candidate is processed.
    pub fn new(config: DistillConfig) -> Result<Self> {
        config.validate().map_err(DistillError::InvalidConfig)?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &DistillConfig {
        &self.config
    }

    /// Run the full pipeline for one request
    ///
    /// Malformed candidates are dropped individually; an empty candidate set
    /// yields an empty pack. Both are handled states, not errors.
    pub fn run(&self, candidates: Vec<RawCandidate>, query: &str) -> ContextPack {
        let supplied = candidates.len();
        let chunks: Vec<TranscriptChunk> = candidates
            .into_iter()
            .filter_map(|candidate| match candidate.into_chunk() {
                Ok(chunk) => Some(chunk),
                Err(err) => {
                    log::debug!("Dropping invalid candidate: {err}");
                    None
                }
            })
            .collect();
        log::debug!("Validated {}/{} candidates", chunks.len(), supplied);

        if chunks.is_empty() {
            return ContextPack::default();
        }

        let filtered = filter_chunks(chunks, &self.config);
        log::debug!("Quality filter kept {} chunks", filtered.len());

        let mut ranked = rerank(filtered, query, &self.config);
        ranked.truncate(self.config.rerank_top_n);
        log::debug!("Reranked slice holds {} chunks", ranked.len());

        let documents = aggregate(&ranked, self.config.max_chunks_per_video);
        log::debug!("Aggregated into {} documents", documents.len());

        compress(&documents, query, &self.config)
    }
}

/// One-shot entry point: validate the configuration and process one request
pub fn run(
    candidates: Vec<RawCandidate>,
    query: &str,
    config: &DistillConfig,
) -> Result<ContextPack> {
    let distiller = Distiller::new(config.clone())?;
    Ok(distiller.run(candidates, query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_configuration_is_rejected_before_processing() {
        let config = DistillConfig {
            token_budget: 0,
            ..Default::default()
        };
        let err = Distiller::new(config).unwrap_err();
        assert!(matches!(err, DistillError::InvalidConfig(_)));
    }

    #[test]
    fn empty_candidate_set_yields_empty_pack() {
        let pack = run(Vec::new(), "any query", &DistillConfig::default()).unwrap();
        assert_eq!(pack, ContextPack::default());
    }

    #[test]
    fn invalid_candidates_are_dropped_not_fatal() {
        let candidates = vec![
            RawCandidate::default(),
            RawCandidate::new(
                "a sufficiently long transcript fragment about compilers and parsing today",
                0.2,
                "v1",
            )
            .view_count(5_000),
        ];
        let pack = run(candidates, "compilers", &DistillConfig::default()).unwrap();
        assert_eq!(pack.sources.len(), 1);
        assert_eq!(pack.sources[0].video_id, "v1");
    }
}
