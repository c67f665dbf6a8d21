use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, SummarizeError};
use crate::models::{CaptionItem, TranscriptTrack, VideoMetadata};
use crate::resolver::payload::caption_items_from_segments;
use crate::resolver::source::CaptionSource;

const INNERTUBE_PLAYER_URL: &str = "https://www.youtube.com/youtubei/v1/player";
const INNERTUBE_CLIENT_NAME: &str = "ANDROID";
const INNERTUBE_CLIENT_VERSION: &str = "19.09.37";

/// Production `CaptionSource`.
///
/// Transcript-API operations go through the platform's innertube `player`
/// endpoint; general metadata comes from a `yt-dlp` JSON dump, which carries
/// the subtitle and automatic-caption URL maps.
pub struct YoutubeClient {
    http: Client,
    yt_dlp_path: String,
}

impl YoutubeClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
            yt_dlp_path: "yt-dlp".to_string(),
        }
    }

    pub fn with_yt_dlp_path(mut self, path: impl Into<String>) -> Self {
        self.yt_dlp_path = path.into();
        self
    }

    async fn player(&self, video_id: &str) -> Result<PlayerResponse> {
        let request = PlayerRequest {
            context: PlayerContext {
                client: PlayerClient {
                    client_name: INNERTUBE_CLIENT_NAME,
                    client_version: INNERTUBE_CLIENT_VERSION,
                    android_sdk_version: 30,
                },
            },
            video_id: video_id.to_string(),
        };

        let response = self
            .http
            .post(INNERTUBE_PLAYER_URL)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::fetch(
                "player endpoint",
                format!("HTTP {status}: {body}"),
            ));
        }

        response.json::<PlayerResponse>().await.map_err(|err| {
            SummarizeError::ParseFailed {
                reason: format!("player response: {err}"),
            }
        })
    }

    fn caption_tracks(player: PlayerResponse) -> Vec<RawCaptionTrack> {
        player
            .captions
            .and_then(|c| c.player_captions_tracklist_renderer)
            .map(|r| r.caption_tracks)
            .unwrap_or_default()
    }
}

impl Default for YoutubeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptionSource for YoutubeClient {
    async fn fetch_default_transcript(&self, video_id: &str) -> Result<Vec<CaptionItem>> {
        let tracks = Self::caption_tracks(self.player(video_id).await?);
        let track = tracks.first().ok_or_else(|| {
            SummarizeError::no_transcript(video_id, "transcripts disabled or none published")
        })?;

        debug!(%video_id, language = %track.language_code, "fetching default caption track");
        let body = self.fetch_url(&structured_url(&track.base_url)).await?;
        caption_items_from_segments(&body).ok_or_else(|| SummarizeError::ParseFailed {
            reason: "default track was not a structured-segment payload".to_string(),
        })
    }

    async fn list_caption_tracks(&self, video_id: &str) -> Result<Vec<TranscriptTrack>> {
        let tracks = Self::caption_tracks(self.player(video_id).await?);
        Ok(tracks
            .into_iter()
            .map(|t| TranscriptTrack {
                language: t.language_code,
                is_generated: t.kind.as_deref() == Some("asr"),
                url: structured_url(&t.base_url),
            })
            .collect())
    }

    async fn fetch_video_metadata(&self, video_id: &str) -> Result<VideoMetadata> {
        let url = format!("https://www.youtube.com/watch?v={video_id}");
        debug!(%video_id, "dumping video metadata via yt-dlp");

        let output = Command::new(&self.yt_dlp_path)
            .args(["--dump-json", "--no-playlist", &url])
            .output()
            .await
            .map_err(|err| SummarizeError::fetch("yt-dlp", err))?;

        if !output.status.success() {
            return Err(SummarizeError::fetch(
                "yt-dlp",
                String::from_utf8_lossy(&output.stderr),
            ));
        }

        serde_json::from_slice(&output.stdout).map_err(|err| SummarizeError::ParseFailed {
            reason: format!("yt-dlp metadata dump: {err}"),
        })
    }

    async fn fetch_url(&self, url: &str) -> Result<String> {
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(SummarizeError::fetch(url, format!("HTTP {}", response.status())));
        }
        Ok(response.text().await?)
    }
}

/// Ask the platform for the structured-segment rendition of a track.
fn structured_url(base_url: &str) -> String {
    format!("{base_url}&fmt=json3")
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlayerRequest {
    context: PlayerContext,
    video_id: String,
}

#[derive(Debug, Serialize)]
struct PlayerContext {
    client: PlayerClient,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlayerClient {
    client_name: &'static str,
    client_version: &'static str,
    android_sdk_version: u32,
}

#[derive(Debug, Deserialize)]
struct PlayerResponse {
    #[serde(default)]
    captions: Option<PlayerCaptions>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerCaptions {
    #[serde(default)]
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<RawCaptionTrack>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCaptionTrack {
    base_url: String,
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_player_caption_tracks() {
        let json = r#"{
            "captions": {
                "playerCaptionsTracklistRenderer": {
                    "captionTracks": [
                        {"baseUrl": "https://captions/en-manual", "languageCode": "en", "name": {"simpleText": "English"}},
                        {"baseUrl": "https://captions/en-auto", "languageCode": "en", "kind": "asr"}
                    ]
                }
            }
        }"#;

        let player: PlayerResponse = serde_json::from_str(json).unwrap();
        let tracks = YoutubeClient::caption_tracks(player);

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].kind, None);
        assert_eq!(tracks[1].kind.as_deref(), Some("asr"));
    }

    #[test]
    fn test_player_without_captions_yields_no_tracks() {
        let player: PlayerResponse =
            serde_json::from_str(r#"{"playabilityStatus": {"status": "OK"}}"#).unwrap();
        assert!(YoutubeClient::caption_tracks(player).is_empty());
    }

    #[test]
    fn test_structured_url_requests_json3() {
        assert_eq!(
            structured_url("https://captions/en?v=abc"),
            "https://captions/en?v=abc&fmt=json3"
        );
    }
}
