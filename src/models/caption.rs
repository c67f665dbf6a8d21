use serde::{Deserialize, Serialize};

/// One timed caption line as returned by the platform transcript API.
///
/// Only `text` participates in transcript flattening; the timing fields are
/// carried through because the upstream payloads include them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionItem {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl CaptionItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start: None,
            duration: None,
        }
    }
}

/// A caption track listed by the platform for a video.
#[derive(Debug, Clone)]
pub struct TranscriptTrack {
    /// Language tag, e.g. "en" or "en-US"
    pub language: String,
    /// True for machine-generated ("automatic") tracks
    pub is_generated: bool,
    /// Location the track content can be fetched from
    pub url: String,
}
