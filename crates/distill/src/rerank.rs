use std::cmp::Ordering;

use serde::Serialize;
use transcript_chunker::TranscriptChunk;

use crate::config::{DistillConfig, RerankWeights};
use crate::relevance::{query_terms, relevance_score};

/// A chunk with its query-dependent scores attached
///
/// Created by the reranker and never mutated afterwards; downstream stages
/// build their own values from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredChunk {
    pub chunk: TranscriptChunk,

    /// Lexical overlap with the query, in [0, 1]
    pub relevance_score: f32,

    /// Final ordering key combining distance, relevance and metadata signals
    pub rerank_score: f32,
}

/// Order chunks by combined relevance
///
/// Output has the same length as the input, sorted non-increasing by
/// `rerank_score`; ties break toward the higher view count, then the original
/// candidate order.
#[must_use]
pub fn rerank(chunks: Vec<TranscriptChunk>, query: &str, config: &DistillConfig) -> Vec<ScoredChunk> {
    let terms = query_terms(query);
    let technical_query = contains_any(query, &config.technical_keywords);

    let mut scored: Vec<ScoredChunk> = chunks
        .into_iter()
        .map(|chunk| {
            let relevance = relevance_score(&chunk.text, &terms);
            let score = rerank_score(&chunk, relevance, technical_query, config);
            ScoredChunk {
                chunk,
                relevance_score: relevance,
                rerank_score: score,
            }
        })
        .collect();

    // stable sort: equal (score, views) pairs keep candidate order
    scored.sort_by(|a, b| {
        b.rerank_score
            .partial_cmp(&a.rerank_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.chunk.view_count.cmp(&a.chunk.view_count))
    });
    scored
}

/// Additive rerank score; every coefficient is a named configuration field
fn rerank_score(
    chunk: &TranscriptChunk,
    relevance: f32,
    technical_query: bool,
    config: &DistillConfig,
) -> f32 {
    let weights = &config.weights;

    // distance inverted into a [0, 1] base term: closer = higher
    let mut score = (1.0 - chunk.similarity_score).clamp(0.0, 1.0);

    score += popularity_boost(chunk.view_count, weights);

    if contains_any(&chunk.author, &config.trusted_sources) {
        score += weights.trusted_source_boost;
    }

    if technical_query && is_entertainment(chunk, &config.entertainment_indicators) {
        score -= weights.topic_mismatch_penalty;
    }

    score + weights.relevance_weight * relevance
}

fn popularity_boost(views: u64, weights: &RerankWeights) -> f32 {
    if views >= weights.high_views_threshold {
        weights.high_views_boost
    } else if views >= weights.mid_views_threshold {
        weights.mid_views_boost
    } else {
        0.0
    }
}

fn is_entertainment(chunk: &TranscriptChunk, indicators: &[String]) -> bool {
    contains_any(&chunk.title, indicators) || contains_any(&chunk.author, indicators)
}

pub(crate) fn contains_any(haystack: &str, needles: &[String]) -> bool {
    if haystack.is_empty() {
        return false;
    }
    let lowered = haystack.to_lowercase();
    needles
        .iter()
        .any(|needle| !needle.is_empty() && lowered.contains(&needle.to_lowercase()))
}
