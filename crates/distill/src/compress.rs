use std::cmp::Ordering;

use serde::Serialize;
use transcript_chunker::{estimate_tokens, CHARS_PER_TOKEN};
use unicode_segmentation::UnicodeSegmentation;

use crate::aggregate::AggregatedDocument;
use crate::config::DistillConfig;
use crate::relevance::{query_terms, relevance_score};

const DOC_SEPARATOR: &str = "\n\n";
const SENTENCE_SEPARATOR: &str = " ";

/// Attribution entry for one contributing source video
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceAttribution {
    pub video_id: String,
    pub title: String,
    pub url: String,
}

/// The pipeline's sole output: budgeted context text plus attributions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContextPack {
    /// Compressed context, at most `token_budget` estimated tokens
    pub text: String,

    /// Videos that contributed at least one retained sentence, in rank order
    pub sources: Vec<SourceAttribution>,

    /// Estimated token count of `text`
    pub token_estimate: usize,
}

/// Fit aggregated documents into the token budget
///
/// Documents are consumed in rank order: whole documents are included while
/// they fit, an overflowing document is reduced to its most query-relevant
/// sentences, and processing stops once the budget is spent. Accounting is
/// byte-exact against `token_budget * CHARS_PER_TOKEN` (separators included),
/// so the reported `token_estimate` never exceeds the budget. An empty
/// document list yields an empty pack.
#[must_use]
pub fn compress(docs: &[AggregatedDocument], query: &str, config: &DistillConfig) -> ContextPack {
    let budget_bytes = config.token_budget.saturating_mul(CHARS_PER_TOKEN);
    let terms = query_terms(query);

    let mut text = String::new();
    let mut sources = Vec::new();

    for (position, doc) in docs.iter().enumerate() {
        let separator = if text.is_empty() { 0 } else { DOC_SEPARATOR.len() };
        let remaining = budget_bytes.saturating_sub(text.len() + separator);
        if remaining == 0 {
            break;
        }

        let contribution = if doc.merged_text.len() <= remaining {
            doc.merged_text.clone()
        } else {
            let pruned = prune_sentences(&doc.merged_text, &terms, remaining, config);
            if pruned.is_empty() && position == 0 {
                // The top document alone overflows the whole budget and no
                // sentence survived pruning; hard-truncate it instead of
                // returning an empty context.
                truncate_to_boundary(&doc.merged_text, remaining)
            } else {
                pruned
            }
        };

        if contribution.is_empty() {
            continue;
        }
        if !text.is_empty() {
            text.push_str(DOC_SEPARATOR);
        }
        text.push_str(&contribution);
        sources.push(SourceAttribution {
            video_id: doc.video_id.clone(),
            title: doc.title.clone(),
            url: doc.url.clone(),
        });
    }

    let token_estimate = estimate_tokens(&text);
    ContextPack {
        text,
        sources,
        token_estimate,
    }
}

/// Keep the most query-relevant sentences of an overflowing document
///
/// Sentences are ranked by term overlap (earlier sentence wins ties), kept
/// while they fit both the remaining byte budget and the configured target
/// compression ratio, then re-emitted in their original order.
fn prune_sentences(
    text: &str,
    terms: &[String],
    remaining_bytes: usize,
    config: &DistillConfig,
) -> String {
    let sentences: Vec<&str> = text.unicode_sentences().collect();
    let ratio_bytes = (text.len() as f32 * config.compression_target_ratio) as usize;
    let limit = remaining_bytes.min(ratio_bytes);

    let mut ranked: Vec<(usize, &str, f32)> = sentences
        .iter()
        .enumerate()
        .filter_map(|(index, sentence)| {
            let trimmed = sentence.trim();
            if trimmed.is_empty() {
                return None;
            }
            let score = relevance_score(trimmed, terms);
            (score >= config.min_sentence_relevance).then_some((index, trimmed, score))
        })
        .collect();
    ranked.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal));

    let mut kept: Vec<(usize, &str)> = Vec::new();
    let mut used = 0usize;
    for (index, sentence, _) in ranked {
        let cost = if kept.is_empty() {
            sentence.len()
        } else {
            sentence.len() + SENTENCE_SEPARATOR.len()
        };
        if used + cost > limit {
            continue;
        }
        used += cost;
        kept.push((index, sentence));
    }

    kept.sort_unstable_by_key(|(index, _)| *index);
    let mut out = String::with_capacity(used);
    for (position, (_, sentence)) in kept.iter().enumerate() {
        if position > 0 {
            out.push_str(SENTENCE_SEPARATOR);
        }
        out.push_str(sentence);
    }
    out
}

fn truncate_to_boundary(text: &str, max_bytes: usize) -> String {
    if text.len() <= max_bytes {
        return text.to_string();
    }
    let mut end = max_bytes;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].trim_end().to_string()
}
