use serde::{Deserialize, Serialize};

// Default keyword sets carried over from the production retrieval setup.
const DEFAULT_TRUSTED_SOURCES: &[&str] = &[
    "3Blue1Brown",
    "Khan Academy",
    "Crash Course",
    "MIT OpenCourseWare",
    "Stanford",
    "Harvard",
    "freeCodeCamp.org",
    "Coursera",
    "edX",
];

const DEFAULT_TECHNICAL_KEYWORDS: &[&str] = &[
    "code",
    "programming",
    "tutorial",
    "learn",
    "how to",
    "algorithm",
    "software",
    "development",
    "engineering",
];

const DEFAULT_ENTERTAINMENT_INDICATORS: &[&str] = &[
    "music",
    "song",
    "funny",
    "meme",
    "reaction",
    "comedy",
    "entertainment",
    "viral",
    "trending",
];

const DEFAULT_NOISE_MARKERS: &[&str] = &["[Music]", "[Applause]", "inaudible", "unclear"];

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

/// Configuration for the distillation pipeline
///
/// Immutable per-request input to the entry point; there is no process-wide
/// state, so concurrent requests can run with different configurations.
/// All fields have defaults, so partial records deserialize cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DistillConfig {
    /// Minimum view count a chunk's video must have
    pub min_view_count: u64,

    /// Maximum noise-marker occurrences tolerated in the raw text
    pub max_noise_count: usize,

    /// Minimum cleaned-text length in characters
    pub min_content_chars: usize,

    /// Maximum similarity distance accepted from the vector search.
    /// The upstream score is a distance (lower = more similar); candidates
    /// strictly above this threshold are dropped.
    pub max_similarity_distance: f32,

    /// Word-trigram overlap ratio at which two chunks collapse into one
    pub duplicate_overlap_threshold: f32,

    /// Reranked slice size handed to the aggregator
    pub rerank_top_n: usize,

    /// Maximum chunks merged per source video
    pub max_chunks_per_video: usize,

    /// Token budget for the final context
    pub token_budget: usize,

    /// Fraction of an overflowing document kept by sentence compression
    pub compression_target_ratio: f32,

    /// Relevance cut for sentence retention during compression
    /// (0.0 disables the cut; budget and ratio still apply)
    pub min_sentence_relevance: f32,

    /// Scoring coefficients for the reranker
    pub weights: RerankWeights,

    /// Channels whose content receives the source-trust boost
    pub trusted_sources: Vec<String>,

    /// Query keywords that mark a query as technical
    pub technical_keywords: Vec<String>,

    /// Title/author keywords that mark a chunk as entertainment
    pub entertainment_indicators: Vec<String>,

    /// Noise markers counted against `max_noise_count`
    pub noise_markers: Vec<String>,
}

impl Default for DistillConfig {
    fn default() -> Self {
        Self {
            min_view_count: 100,
            max_noise_count: 3,
            min_content_chars: 50,
            max_similarity_distance: 0.8,
            duplicate_overlap_threshold: 0.8,
            rerank_top_n: 10,
            max_chunks_per_video: 3,
            token_budget: 4000,
            compression_target_ratio: 0.6,
            min_sentence_relevance: 0.0,
            weights: RerankWeights::default(),
            trusted_sources: owned(DEFAULT_TRUSTED_SOURCES),
            technical_keywords: owned(DEFAULT_TECHNICAL_KEYWORDS),
            entertainment_indicators: owned(DEFAULT_ENTERTAINMENT_INDICATORS),
            noise_markers: owned(DEFAULT_NOISE_MARKERS),
        }
    }
}

impl DistillConfig {
    /// Lenient preset for debugging sparse corpora: accepts low-engagement
    /// videos, distant matches, short fragments and noisy transcripts
    pub fn relaxed() -> Self {
        Self {
            min_view_count: 10,
            max_similarity_distance: 1.0,
            min_content_chars: 20,
            max_noise_count: 10,
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.token_budget == 0 {
            return Err("token_budget must be > 0".to_string());
        }
        if self.max_chunks_per_video == 0 {
            return Err("max_chunks_per_video must be > 0".to_string());
        }
        if self.rerank_top_n == 0 {
            return Err("rerank_top_n must be > 0".to_string());
        }
        if !self.compression_target_ratio.is_finite()
            || self.compression_target_ratio <= 0.0
            || self.compression_target_ratio > 1.0
        {
            return Err(format!(
                "compression_target_ratio ({}) must be within (0, 1]",
                self.compression_target_ratio
            ));
        }
        if !self.min_sentence_relevance.is_finite()
            || !(0.0..=1.0).contains(&self.min_sentence_relevance)
        {
            return Err(format!(
                "min_sentence_relevance ({}) must be within [0, 1]",
                self.min_sentence_relevance
            ));
        }
        if !self.duplicate_overlap_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.duplicate_overlap_threshold)
        {
            return Err(format!(
                "duplicate_overlap_threshold ({}) must be within [0, 1]",
                self.duplicate_overlap_threshold
            ));
        }
        if !self.max_similarity_distance.is_finite() || self.max_similarity_distance < 0.0 {
            return Err(format!(
                "max_similarity_distance ({}) must be a non-negative number",
                self.max_similarity_distance
            ));
        }
        self.weights.validate()
    }
}

/// Named coefficients for the rerank score
///
/// Every term of the additive combination is configured here so each weight
/// can be tuned and tested independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RerankWeights {
    /// View count at which the larger popularity boost applies
    pub high_views_threshold: u64,

    /// Boost added at or above `high_views_threshold` views
    pub high_views_boost: f32,

    /// View count at which the smaller popularity boost applies
    pub mid_views_threshold: u64,

    /// Boost added at or above `mid_views_threshold` views
    pub mid_views_boost: f32,

    /// Boost added when the author matches a trusted source
    pub trusted_source_boost: f32,

    /// Penalty subtracted for entertainment chunks under technical queries
    pub topic_mismatch_penalty: f32,

    /// Weight applied to the lexical relevance score
    pub relevance_weight: f32,
}

impl Default for RerankWeights {
    fn default() -> Self {
        Self {
            high_views_threshold: 10_000,
            high_views_boost: 0.2,
            mid_views_threshold: 1_000,
            mid_views_boost: 0.1,
            trusted_source_boost: 0.3,
            topic_mismatch_penalty: 0.4,
            relevance_weight: 0.25,
        }
    }
}

impl RerankWeights {
    fn validate(&self) -> Result<(), String> {
        if self.mid_views_threshold > self.high_views_threshold {
            return Err(format!(
                "mid_views_threshold ({}) cannot exceed high_views_threshold ({})",
                self.mid_views_threshold, self.high_views_threshold
            ));
        }
        let coefficients = [
            ("high_views_boost", self.high_views_boost),
            ("mid_views_boost", self.mid_views_boost),
            ("trusted_source_boost", self.trusted_source_boost),
            ("topic_mismatch_penalty", self.topic_mismatch_penalty),
            ("relevance_weight", self.relevance_weight),
        ];
        for (name, value) in coefficients {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} ({value}) must be a non-negative number"));
            }
        }
        if self.mid_views_boost > self.high_views_boost {
            return Err(format!(
                "mid_views_boost ({}) cannot exceed high_views_boost ({}); the popularity \
                 boost must be non-decreasing in view count",
                self.mid_views_boost, self.high_views_boost
            ));
        }
        Ok(())
    }
}
