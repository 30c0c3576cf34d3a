use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::rerank::ScoredChunk;

/// All retained content from one source video, merged
///
/// Exists so that several high-ranked chunks from the same video spend one
/// source attribution instead of repeating it per chunk downstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedDocument {
    pub video_id: String,

    /// Retained chunk texts joined by blank lines, best-ranked first
    pub merged_text: String,

    /// Best rerank score among the video's chunks
    pub representative_score: f32,

    pub title: String,
    pub url: String,
    pub author: String,
    pub view_count: u64,

    /// Number of chunks merged into `merged_text`
    pub chunk_count: usize,
}

/// Merge a reranked slice into one document per distinct video
///
/// Groups preserve first-seen order, each keeps at most
/// `max_chunks_per_video` of its highest-scored chunks, and the result is
/// ordered by `representative_score` descending. Never yields more documents
/// than there are distinct video ids in the input.
#[must_use]
pub fn aggregate(scored: &[ScoredChunk], max_chunks_per_video: usize) -> Vec<AggregatedDocument> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&ScoredChunk>> = HashMap::new();
    for entry in scored {
        let members = groups.entry(entry.chunk.video_id.as_str()).or_default();
        if members.is_empty() {
            order.push(entry.chunk.video_id.as_str());
        }
        members.push(entry);
    }

    let mut documents: Vec<AggregatedDocument> = order
        .into_iter()
        .filter_map(|video_id| {
            let mut members = groups.remove(video_id)?;
            members.sort_by(|a, b| {
                b.rerank_score
                    .partial_cmp(&a.rerank_score)
                    .unwrap_or(Ordering::Equal)
            });
            members.truncate(max_chunks_per_video);
            let best = *members.first()?;

            let merged_text = members
                .iter()
                .map(|entry| entry.chunk.text.as_str())
                .collect::<Vec<_>>()
                .join("\n\n");

            Some(AggregatedDocument {
                video_id: best.chunk.video_id.clone(),
                merged_text,
                representative_score: best.rerank_score,
                title: best.chunk.title.clone(),
                url: best.chunk.url.clone(),
                author: best.chunk.author.clone(),
                view_count: best.chunk.view_count,
                chunk_count: members.len(),
            })
        })
        .collect();

    documents.sort_by(|a, b| {
        b.representative_score
            .partial_cmp(&a.representative_score)
            .unwrap_or(Ordering::Equal)
    });
    documents
}
