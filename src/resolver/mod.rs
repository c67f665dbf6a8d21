pub mod payload;
pub mod source;
pub mod youtube;

pub use payload::{CaptionPayload, join_caption_items, parse_caption_payload};
pub use source::CaptionSource;
pub use youtube::YoutubeClient;

use tracing::{debug, warn};

use crate::error::{Result, SummarizeError};

/// Which acquisition tiers a deployment runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionStrategy {
    /// Direct transcript fetch, then the listed-track fallback
    TranscriptApi,
    /// Caption URLs taken from general video metadata only
    MetadataCaptions,
    /// Transcript-API tiers first, metadata captions as the last tier
    Full,
}

/// Resolver configuration, constructed once at startup.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Language tag required by the fallback tiers (tier 1 accepts the
    /// platform default regardless)
    pub language: String,
    pub strategy: AcquisitionStrategy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            strategy: AcquisitionStrategy::Full,
        }
    }
}

/// Resolve a video id to raw transcript text.
///
/// Tiers run in fixed priority order and stop at the first success. A tier
/// failure is absorbed only if a later tier remains; the terminal error
/// propagates to the caller. Empty text is never returned as success.
pub async fn resolve(
    source: &dyn CaptionSource,
    config: &ResolverConfig,
    video_id: &str,
) -> Result<String> {
    match config.strategy {
        AcquisitionStrategy::TranscriptApi => {
            resolve_via_transcript_api(source, config, video_id).await
        }
        AcquisitionStrategy::MetadataCaptions => {
            resolve_via_metadata(source, config, video_id).await
        }
        AcquisitionStrategy::Full => {
            match resolve_via_transcript_api(source, config, video_id).await {
                Ok(text) => Ok(text),
                Err(err) => {
                    warn!(%video_id, error = %err, "transcript API tiers failed, trying metadata captions");
                    resolve_via_metadata(source, config, video_id).await
                }
            }
        }
    }
}

/// Tier 1 + tier 2: direct transcript fetch, then the listed-track fallback.
async fn resolve_via_transcript_api(
    source: &dyn CaptionSource,
    config: &ResolverConfig,
    video_id: &str,
) -> Result<String> {
    match fetch_default(source, video_id).await {
        Ok(text) => return Ok(text),
        Err(err) => {
            debug!(%video_id, error = %err, "direct transcript fetch failed, trying listed tracks");
        }
    }

    fetch_listed_generated(source, config, video_id).await
}

/// Tier 1: the platform default transcript, whatever language it is in.
async fn fetch_default(source: &dyn CaptionSource, video_id: &str) -> Result<String> {
    let items = source.fetch_default_transcript(video_id).await?;
    debug!(%video_id, items = items.len(), "fetched default transcript");
    require_non_empty(video_id, join_caption_items(&items))
}

/// Tier 2: the auto-generated track in the configured language, if listed.
async fn fetch_listed_generated(
    source: &dyn CaptionSource,
    config: &ResolverConfig,
    video_id: &str,
) -> Result<String> {
    let tracks = source.list_caption_tracks(video_id).await?;
    let track = tracks
        .iter()
        .find(|t| t.is_generated && t.language == config.language)
        .ok_or_else(|| {
            SummarizeError::no_transcript(
                video_id,
                format!(
                    "no auto-generated '{}' track among {} listed",
                    config.language,
                    tracks.len()
                ),
            )
        })?;

    debug!(%video_id, language = %track.language, "fetching listed auto-generated track");
    let body = source.fetch_url(&track.url).await?;
    require_non_empty(video_id, parse_caption_payload(&body).into_text())
}

/// Tier 3: caption URLs from general video metadata. Manual subtitles are
/// preferred over automatic captions; the first candidate URL of the
/// configured language wins. No URL is fetched when the language is missing.
async fn resolve_via_metadata(
    source: &dyn CaptionSource,
    config: &ResolverConfig,
    video_id: &str,
) -> Result<String> {
    let metadata = source.fetch_video_metadata(video_id).await?;

    let candidates = if !metadata.subtitles.is_empty() {
        &metadata.subtitles
    } else {
        &metadata.automatic_captions
    };

    let locations = candidates.get(&config.language).ok_or_else(|| {
        let reason = if config.language == "en" {
            "no English subtitles found".to_string()
        } else {
            format!("no '{}' subtitles found", config.language)
        };
        SummarizeError::no_transcript(video_id, reason)
    })?;
    let location = locations.first().ok_or_else(|| {
        SummarizeError::no_transcript(video_id, "subtitle entry lists no source locations")
    })?;

    debug!(%video_id, url = %location.url, "fetching caption content from metadata");
    let body = source.fetch_url(&location.url).await?;
    require_non_empty(video_id, parse_caption_payload(&body).into_text())
}

fn require_non_empty(video_id: &str, text: String) -> Result<String> {
    if text.trim().is_empty() {
        return Err(SummarizeError::no_transcript(
            video_id,
            "acquired transcript was empty",
        ));
    }
    Ok(text)
}
