use thiserror::Error;

/// Errors surfaced by the summarization pipeline.
///
/// Each variant maps to one failure class at the request boundary; fallback
/// tiers inside the resolver absorb only the errors that justify trying the
/// next tier, and the terminal error propagates unchanged.
#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("no transcript available for video {video_id}: {reason}")]
    NoTranscript { video_id: String, reason: String },

    #[error("fetch failed for {what}: {reason}")]
    FetchFailed { what: String, reason: String },

    #[error("caption payload could not be interpreted: {reason}")]
    ParseFailed { reason: String },

    #[error("summarization failed: {reason}")]
    SummarizationFailed { reason: String },
}

impl SummarizeError {
    pub fn no_transcript(video_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NoTranscript {
            video_id: video_id.into(),
            reason: reason.into(),
        }
    }

    pub fn fetch(what: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::FetchFailed {
            what: what.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<reqwest::Error> for SummarizeError {
    fn from(err: reqwest::Error) -> Self {
        let what = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "upstream request".to_string());
        Self::FetchFailed {
            what,
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SummarizeError>;
