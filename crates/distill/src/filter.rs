use std::collections::HashSet;

use transcript_chunker::{clean_transcript, count_noise_markers, TranscriptChunk};

use crate::config::DistillConfig;

/// Discard low-quality chunks and collapse near-duplicates
///
/// Output is a subset of the input in input order, with each survivor
/// carrying its cleaned text. Rejection rules are independent: distance above
/// the acceptance cutoff, view count below the floor, too many noise markers
/// in the raw text, or a cleaned text too short to be useful.
#[must_use]
pub fn filter_chunks(chunks: Vec<TranscriptChunk>, config: &DistillConfig) -> Vec<TranscriptChunk> {
    let mut survivors: Vec<TranscriptChunk> = Vec::with_capacity(chunks.len());

    for chunk in chunks {
        if chunk.similarity_score > config.max_similarity_distance {
            continue;
        }
        if chunk.view_count < config.min_view_count {
            continue;
        }
        if count_noise_markers(&chunk.text, &config.noise_markers) > config.max_noise_count {
            continue;
        }
        let cleaned = clean_transcript(&chunk.text);
        if cleaned.chars().count() < config.min_content_chars {
            continue;
        }
        let survivor = TranscriptChunk {
            text: cleaned,
            ..chunk
        };
        collapse_near_duplicate(&mut survivors, survivor, config.duplicate_overlap_threshold);
    }

    survivors
}

// A duplicate group occupies the position of its first member; the member
// with the lower similarity distance wins the slot.
fn collapse_near_duplicate(
    survivors: &mut Vec<TranscriptChunk>,
    candidate: TranscriptChunk,
    threshold: f32,
) {
    for kept in survivors.iter_mut() {
        if trigram_overlap(&kept.text, &candidate.text) >= threshold {
            if candidate.similarity_score < kept.similarity_score {
                *kept = candidate;
            }
            return;
        }
    }
    survivors.push(candidate);
}

/// Jaccard overlap between the word-trigram sets of two texts
///
/// Texts too short to form a trigram fall back to exact equality.
fn trigram_overlap(a: &str, b: &str) -> f32 {
    let a_lc = a.to_lowercase();
    let b_lc = b.to_lowercase();
    let a_words: Vec<&str> = a_lc.split_whitespace().collect();
    let b_words: Vec<&str> = b_lc.split_whitespace().collect();
    let a_set: HashSet<&[&str]> = a_words.windows(3).collect();
    let b_set: HashSet<&[&str]> = b_words.windows(3).collect();

    if a_set.is_empty() || b_set.is_empty() {
        return if a_lc == b_lc { 1.0 } else { 0.0 };
    }

    let shared = a_set.intersection(&b_set).count();
    let union = a_set.len() + b_set.len() - shared;
    shared as f32 / union as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use transcript_chunker::RawCandidate;

    fn chunk(text: &str, score: f32, video_id: &str, views: u64) -> TranscriptChunk {
        RawCandidate::new(text, score, video_id)
            .view_count(views)
            .into_chunk()
            .unwrap()
    }

    fn long_text(prefix: &str) -> String {
        format!("{prefix} this transcript talks at length about memory safety and ownership")
    }

    #[test]
    fn keeps_chunks_passing_every_rule() {
        let config = DistillConfig::default();
        let chunks = vec![chunk(&long_text("intro"), 0.3, "v1", 500)];
        assert_eq!(filter_chunks(chunks, &config).len(), 1);
    }

    #[test]
    fn drops_distant_matches() {
        let config = DistillConfig::default();
        let chunks = vec![
            chunk(&long_text("near"), 0.3, "v1", 500),
            chunk(&long_text("far"), 0.95, "v2", 500),
        ];
        let kept = filter_chunks(chunks, &config);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].video_id, "v1");
    }

    #[test]
    fn drops_low_view_counts() {
        let config = DistillConfig::default();
        let chunks = vec![chunk(&long_text("quiet"), 0.3, "v1", 99)];
        assert!(filter_chunks(chunks, &config).is_empty());
    }

    #[test]
    fn drops_noisy_transcripts() {
        let config = DistillConfig::default();
        let noisy = format!(
            "[Music] [Music] [Applause] inaudible {}",
            long_text("noisy")
        );
        let chunks = vec![chunk(&noisy, 0.3, "v1", 500)];
        assert!(filter_chunks(chunks, &config).is_empty());
    }

    #[test]
    fn drops_near_empty_cleaned_text() {
        let config = DistillConfig::default();
        let chunks = vec![chunk("[Music] short [Applause]", 0.3, "v1", 500)];
        assert!(filter_chunks(chunks, &config).is_empty());
    }

    #[test]
    fn output_is_a_stable_subset() {
        let config = DistillConfig::default();
        let chunks = vec![
            chunk(&long_text("alpha"), 0.2, "v1", 500),
            chunk(&long_text("omitted"), 0.9, "v2", 500),
            chunk("completely different content about baking sourdough bread at home today", 0.4, "v3", 500),
        ];
        let kept = filter_chunks(chunks.clone(), &config);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].video_id, "v1");
        assert_eq!(kept[1].video_id, "v3");
    }

    #[test]
    fn near_duplicates_collapse_keeping_better_distance() {
        let config = DistillConfig::default();
        let text = long_text("duplicated");
        let chunks = vec![
            chunk(&text, 0.5, "v1", 500),
            chunk(&text, 0.2, "v1", 500),
            chunk("completely different content about baking sourdough bread at home today", 0.4, "v2", 500),
        ];
        let kept = filter_chunks(chunks, &config);
        assert_eq!(kept.len(), 2);
        // the duplicate group keeps the first slot but the better distance
        assert_eq!(kept[0].similarity_score, 0.2);
        assert_eq!(kept[1].video_id, "v2");
    }

    #[test]
    fn trigram_overlap_behaviour() {
        let a = "the quick brown fox jumps over the lazy dog";
        assert_eq!(trigram_overlap(a, a), 1.0);
        assert_eq!(
            trigram_overlap(a, "an entirely unrelated sentence about databases and indexes"),
            0.0
        );
        // short texts fall back to exact comparison
        assert_eq!(trigram_overlap("tiny text", "tiny text"), 1.0);
        assert_eq!(trigram_overlap("tiny text", "other text"), 0.0);
    }
}
