pub mod error;
pub mod llm;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod resolver;
pub mod server;

pub use error::{Result, SummarizeError};
pub use llm::{OpenAiClient, OpenAiConfig, SYSTEM_PROMPT, Summarizer};
pub use models::{CaptionItem, CaptionLocation, TranscriptTrack, VideoMetadata};
pub use normalize::{TRANSCRIPT_CHAR_CAP, TRUNCATION_MARKER, truncate_transcript};
pub use pipeline::{PipelineConfig, summarize_video};
pub use resolver::{
    AcquisitionStrategy, CaptionSource, ResolverConfig, YoutubeClient, resolve,
};
pub use server::{AppState, ServerConfig};
