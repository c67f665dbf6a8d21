use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CaptionItem, TranscriptTrack, VideoMetadata};

/// Upstream video platform capabilities the resolver depends on.
///
/// The fallback chain is written against this trait so each tier can be
/// exercised without the real platform behind it.
#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// Fetch the platform's default transcript for a video, no language
    /// requested. Returns the caption items in original order.
    async fn fetch_default_transcript(&self, video_id: &str) -> Result<Vec<CaptionItem>>;

    /// Enumerate the caption tracks available for a video.
    async fn list_caption_tracks(&self, video_id: &str) -> Result<Vec<TranscriptTrack>>;

    /// Fetch general video metadata carrying the subtitle / automatic-caption
    /// URL mappings keyed by language.
    async fn fetch_video_metadata(&self, video_id: &str) -> Result<VideoMetadata>;

    /// Fetch raw content at a caption source location.
    async fn fetch_url(&self, url: &str) -> Result<String>;
}
