use serde::{Deserialize, Serialize};

use crate::error::{ChunkError, Result};

/// Rough characters-per-token ratio used for all budget accounting
pub const CHARS_PER_TOKEN: usize = 4;

/// Estimate generation-model tokens for a piece of text
///
/// Deterministic and monotonic in text length; exactness is not required
/// anywhere, only that the same text always yields the same estimate.
#[must_use]
pub const fn estimate_tokens(text: &str) -> usize {
    text.len() / CHARS_PER_TOKEN
}

/// A raw similarity-search candidate as supplied by the upstream retriever
///
/// Required fields stay optional at this layer so a malformed candidate can be
/// observed and dropped instead of aborting the whole request. Optional
/// metadata coerces to explicit defaults: empty strings, zero views, no
/// publish time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCandidate {
    pub text: Option<String>,

    /// Distance reported by the vector search; lower = more similar
    pub similarity_score: Option<f32>,

    pub video_id: Option<String>,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub view_count: u64,

    /// Unix epoch seconds, if the upstream source knew it
    #[serde(default)]
    pub publish_time: Option<i64>,
}

impl RawCandidate {
    /// Create a candidate with the three required fields set
    pub fn new(
        text: impl Into<String>,
        similarity_score: f32,
        video_id: impl Into<String>,
    ) -> Self {
        Self {
            text: Some(text.into()),
            similarity_score: Some(similarity_score),
            video_id: Some(video_id.into()),
            ..Default::default()
        }
    }

    /// Builder: set video title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder: set video URL
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Builder: set channel/author name
    #[must_use]
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Builder: set view count
    #[must_use]
    pub const fn view_count(mut self, views: u64) -> Self {
        self.view_count = views;
        self
    }

    /// Builder: set publish time (unix epoch seconds)
    #[must_use]
    pub const fn publish_time(mut self, epoch_secs: i64) -> Self {
        self.publish_time = Some(epoch_secs);
        self
    }

    /// Validate the candidate into an immutable chunk
    ///
    /// Fails when a required field is missing or the transcript text is
    /// blank; the caller is expected to drop such candidates.
    pub fn into_chunk(self) -> Result<TranscriptChunk> {
        let text = self.text.ok_or(ChunkError::MissingField("text"))?;
        if text.trim().is_empty() {
            return Err(ChunkError::EmptyText);
        }
        let similarity_score = self
            .similarity_score
            .ok_or(ChunkError::MissingField("similarity_score"))?;
        let video_id = self.video_id.ok_or(ChunkError::MissingField("video_id"))?;

        Ok(TranscriptChunk {
            text,
            similarity_score,
            video_id,
            title: self.title,
            url: self.url,
            author: self.author,
            view_count: self.view_count,
            publish_time: self.publish_time,
        })
    }
}

/// A validated transcript fragment with its video metadata
///
/// Immutable value: pipeline stages never mutate a chunk in place, they build
/// replacement values when the text changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptChunk {
    /// Fragment text (non-empty)
    pub text: String,

    /// Distance reported by the vector search; lower = more similar
    pub similarity_score: f32,

    /// Source video identifier
    pub video_id: String,

    /// Video title (empty if unknown)
    pub title: String,

    /// Video URL (empty if unknown)
    pub url: String,

    /// Channel/author name (empty if unknown)
    pub author: String,

    /// View count (0 if unknown)
    pub view_count: u64,

    /// Publish time in unix epoch seconds, if known
    pub publish_time: Option<i64>,
}

impl TranscriptChunk {
    /// Estimated token count of the fragment text
    #[must_use]
    pub fn estimated_tokens(&self) -> usize {
        estimate_tokens(&self.text)
    }
}
