use tracing::info;

use crate::error::Result;
use crate::llm::Summarizer;
use crate::normalize::{TRANSCRIPT_CHAR_CAP, truncate_transcript};
use crate::resolver::{CaptionSource, ResolverConfig, resolve};

/// Pipeline configuration, constructed once at startup and passed by
/// reference into every request.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub resolver: ResolverConfig,
    /// Transcript length cap applied before summarization
    pub max_transcript_chars: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            resolver: ResolverConfig::default(),
            max_transcript_chars: TRANSCRIPT_CHAR_CAP,
        }
    }
}

/// Run the full per-request flow: resolve transcript, normalize, summarize.
///
/// Strictly sequential, no retries; either a summary is produced or the first
/// unabsorbed error propagates. Nothing acquired here outlives the call.
pub async fn summarize_video(
    source: &dyn CaptionSource,
    summarizer: &dyn Summarizer,
    config: &PipelineConfig,
    video_id: &str,
) -> Result<String> {
    info!(%video_id, "fetching transcript");
    let raw = resolve(source, &config.resolver, video_id).await?;

    let normalized = truncate_transcript(&raw, config.max_transcript_chars);
    info!(
        %video_id,
        chars = normalized.chars().count(),
        truncated = normalized.len() != raw.len(),
        "sending transcript for summarization"
    );

    summarizer.summarize(&normalized).await
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::SummarizeError;
    use crate::models::{CaptionItem, TranscriptTrack, VideoMetadata};
    use crate::normalize::TRUNCATION_MARKER;

    struct FixedSource {
        items: Vec<CaptionItem>,
    }

    #[async_trait]
    impl CaptionSource for FixedSource {
        async fn fetch_default_transcript(&self, _video_id: &str) -> Result<Vec<CaptionItem>> {
            Ok(self.items.clone())
        }

        async fn list_caption_tracks(&self, video_id: &str) -> Result<Vec<TranscriptTrack>> {
            Err(SummarizeError::fetch(video_id, "not used in this test"))
        }

        async fn fetch_video_metadata(&self, video_id: &str) -> Result<VideoMetadata> {
            Err(SummarizeError::fetch(video_id, "not used in this test"))
        }

        async fn fetch_url(&self, url: &str) -> Result<String> {
            Err(SummarizeError::fetch(url, "not used in this test"))
        }
    }

    /// Records the transcript it was handed, returns a canned summary.
    #[derive(Default)]
    struct RecordingSummarizer {
        received: Mutex<Option<String>>,
        fail: bool,
    }

    #[async_trait]
    impl Summarizer for RecordingSummarizer {
        async fn summarize(&self, transcript: &str) -> Result<String> {
            if self.fail {
                return Err(SummarizeError::SummarizationFailed {
                    reason: "model unavailable".to_string(),
                });
            }
            *self.received.lock().unwrap() = Some(transcript.to_string());
            Ok("* summary".to_string())
        }
    }

    #[tokio::test]
    async fn test_end_to_end_passes_normalized_text_unchanged() {
        let source = FixedSource {
            items: vec![CaptionItem::new("Hello"), CaptionItem::new("world")],
        };
        let summarizer = RecordingSummarizer::default();

        let summary = summarize_video(&source, &summarizer, &PipelineConfig::default(), "abc123")
            .await
            .unwrap();

        assert_eq!(summary, "* summary");
        assert_eq!(
            summarizer.received.lock().unwrap().as_deref(),
            Some("Hello world")
        );
    }

    #[tokio::test]
    async fn test_long_transcript_is_truncated_before_summarization() {
        let source = FixedSource {
            items: vec![CaptionItem::new("abcdef")],
        };
        let summarizer = RecordingSummarizer::default();
        let config = PipelineConfig {
            max_transcript_chars: 3,
            ..Default::default()
        };

        summarize_video(&source, &summarizer, &config, "abc123")
            .await
            .unwrap();

        assert_eq!(
            summarizer.received.lock().unwrap().as_deref(),
            Some(format!("abc{TRUNCATION_MARKER}").as_str())
        );
    }

    #[tokio::test]
    async fn test_summarizer_failure_propagates() {
        let source = FixedSource {
            items: vec![CaptionItem::new("Hello")],
        };
        let summarizer = RecordingSummarizer {
            fail: true,
            ..Default::default()
        };

        let err = summarize_video(&source, &summarizer, &PipelineConfig::default(), "abc123")
            .await
            .unwrap_err();
        assert!(matches!(err, SummarizeError::SummarizationFailed { .. }));
    }
}
