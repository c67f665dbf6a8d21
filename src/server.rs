use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use crate::error::SummarizeError;
use crate::llm::Summarizer;
use crate::pipeline::{PipelineConfig, summarize_video};
use crate::resolver::CaptionSource;

/// Server configuration.
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Shared application state passed to Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn CaptionSource>,
    pub summarizer: Arc<dyn Summarizer>,
    pub pipeline: Arc<PipelineConfig>,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub video_id: String,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Build the Axum router with all routes.
///
/// CORS is permissive: the expected caller is a browser extension on another
/// origin.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/summarize", post(summarize_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Bind and serve until the process exits.
pub async fn run(config: ServerConfig, state: AppState) -> anyhow::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    info!(addr = %listener.local_addr()?, "tubebrief server started");
    axum::serve(listener, router).await?;
    Ok(())
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn summarize_handler(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> Response {
    if request.video_id.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "video_id must not be empty");
    }

    let request_id = Uuid::new_v4();
    let span = info_span!("summarize", %request_id, video_id = %request.video_id);

    async move {
        match summarize_video(
            state.source.as_ref(),
            state.summarizer.as_ref(),
            state.pipeline.as_ref(),
            &request.video_id,
        )
        .await
        {
            Ok(summary) => Json(SummarizeResponse { summary }).into_response(),
            Err(err) => {
                error!(error = %err, "summarization request failed");
                error_response(status_for(&err), &err.to_string())
            }
        }
    }
    .instrument(span)
    .await
}

fn status_for(err: &SummarizeError) -> StatusCode {
    match err {
        SummarizeError::NoTranscript { .. } => StatusCode::NOT_FOUND,
        SummarizeError::FetchFailed { .. }
        | SummarizeError::ParseFailed { .. }
        | SummarizeError::SummarizationFailed { .. } => StatusCode::BAD_GATEWAY,
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::Result;
    use crate::models::{CaptionItem, TranscriptTrack, VideoMetadata};

    struct StubSource {
        available: bool,
    }

    #[async_trait]
    impl CaptionSource for StubSource {
        async fn fetch_default_transcript(&self, video_id: &str) -> Result<Vec<CaptionItem>> {
            if self.available {
                Ok(vec![CaptionItem::new("Hello"), CaptionItem::new("world")])
            } else {
                Err(SummarizeError::no_transcript(video_id, "transcripts disabled"))
            }
        }

        async fn list_caption_tracks(&self, _video_id: &str) -> Result<Vec<TranscriptTrack>> {
            Ok(vec![])
        }

        async fn fetch_video_metadata(&self, _video_id: &str) -> Result<VideoMetadata> {
            Ok(VideoMetadata::default())
        }

        async fn fetch_url(&self, url: &str) -> Result<String> {
            Err(SummarizeError::fetch(url, "no urls in this test"))
        }
    }

    struct EchoSummarizer;

    #[async_trait]
    impl Summarizer for EchoSummarizer {
        async fn summarize(&self, transcript: &str) -> Result<String> {
            Ok(format!("summary of: {transcript}"))
        }
    }

    async fn spawn_server(available: bool) -> String {
        let state = AppState {
            source: Arc::new(StubSource { available }),
            summarizer: Arc::new(EchoSummarizer),
            pipeline: Arc::new(PipelineConfig::default()),
        };
        let router = build_router(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_summarize_endpoint_round_trip() {
        let base = spawn_server(true).await;

        let response = reqwest::Client::new()
            .post(format!("{base}/summarize"))
            .json(&serde_json::json!({"video_id": "abc123"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["summary"], "summary of: Hello world");
    }

    #[tokio::test]
    async fn test_missing_transcript_maps_to_not_found() {
        let base = spawn_server(false).await;

        let response = reqwest::Client::new()
            .post(format!("{base}/summarize"))
            .json(&serde_json::json!({"video_id": "abc123"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 404);
        let body: serde_json::Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("no transcript"));
    }

    #[tokio::test]
    async fn test_empty_video_id_is_rejected() {
        let base = spawn_server(true).await;

        let response = reqwest::Client::new()
            .post(format!("{base}/summarize"))
            .json(&serde_json::json!({"video_id": "  "}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 400);
    }
}
