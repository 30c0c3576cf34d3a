//! Property-level guarantees of the pipeline stages.

use std::collections::HashSet;

use proptest::prelude::*;
use transcript_chunker::{RawCandidate, TranscriptChunk};
use transcript_distill::{filter_chunks, rerank, run, DistillConfig};

const TOPICS: &[&str] = &[
    "ownership", "borrowing", "lifetimes", "traits", "closures", "iterators", "channels",
    "macros", "testing", "pinning",
];

fn synthesized_candidate(topic_a: usize, topic_b: usize, distance: f32, views: u64) -> RawCandidate {
    let a = TOPICS[topic_a % TOPICS.len()];
    let b = TOPICS[topic_b % TOPICS.len()];
    let text = format!(
        "This segment explains {a} in terms of {b}, walking through a worked example \
         and the compiler diagnostics you should expect to see along the way."
    );
    RawCandidate::new(text, distance, format!("video-{}", topic_a % 4))
        .title(format!("Talk about {a}"))
        .url(format!("https://youtu.be/video-{}", topic_a % 4))
        .view_count(views)
}

fn candidate_strategy() -> impl Strategy<Value = Vec<RawCandidate>> {
    proptest::collection::vec(
        (0usize..10, 0usize..10, 0.0f32..1.2, 0u64..50_000)
            .prop_map(|(a, b, distance, views)| synthesized_candidate(a, b, distance, views)),
        0..40,
    )
}

proptest! {
    #[test]
    fn pipeline_is_deterministic_and_respects_budget(candidates in candidate_strategy()) {
        let config = DistillConfig {
            token_budget: 120,
            ..Default::default()
        };

        let first = run(candidates.clone(), "ownership and borrowing", &config).unwrap();
        let second = run(candidates, "ownership and borrowing", &config).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert!(first.token_estimate <= config.token_budget);
    }

    #[test]
    fn sources_are_bounded_by_distinct_videos(candidates in candidate_strategy()) {
        let distinct: HashSet<String> = candidates
            .iter()
            .filter_map(|c| c.video_id.clone())
            .collect();

        let pack = run(candidates, "lifetimes", &DistillConfig::default()).unwrap();

        prop_assert!(pack.sources.len() <= distinct.len());
        for source in &pack.sources {
            prop_assert!(distinct.contains(&source.video_id));
        }
    }

    #[test]
    fn filter_output_is_a_subset(candidates in candidate_strategy()) {
        let chunks: Vec<TranscriptChunk> = candidates
            .into_iter()
            .filter_map(|c| c.into_chunk().ok())
            .collect();
        let input_len = chunks.len();
        let input_videos: HashSet<String> =
            chunks.iter().map(|c| c.video_id.clone()).collect();

        let kept = filter_chunks(chunks, &DistillConfig::default());

        prop_assert!(kept.len() <= input_len);
        for chunk in &kept {
            prop_assert!(input_videos.contains(&chunk.video_id));
        }
    }

    #[test]
    fn rerank_preserves_length_and_sorts(candidates in candidate_strategy()) {
        let chunks: Vec<TranscriptChunk> = candidates
            .into_iter()
            .filter_map(|c| c.into_chunk().ok())
            .collect();
        let input_len = chunks.len();

        let ranked = rerank(chunks, "traits and closures", &DistillConfig::default());

        prop_assert_eq!(ranked.len(), input_len);
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].rerank_score >= pair[1].rerank_score);
        }
    }
}
