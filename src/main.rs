use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use tubebrief::{
    AcquisitionStrategy, AppState, OpenAiClient, OpenAiConfig, PipelineConfig, ResolverConfig,
    ServerConfig, TRANSCRIPT_CHAR_CAP, YoutubeClient, server, summarize_video,
};

#[derive(Parser)]
#[command(name = "tubebrief")]
#[command(author, version, about = "YouTube transcript summarization service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP summarization endpoint
    Serve {
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0:8000")]
        bind: String,

        /// Preferred caption language for the fallback tiers
        #[arg(long, default_value = "en")]
        language: String,

        /// Acquire captions from video metadata only (skip the transcript API)
        #[arg(long)]
        metadata_only: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Summarize a single video and print the result
    Summarize {
        /// Opaque video identifier on the source platform
        video_id: String,

        /// Preferred caption language for the fallback tiers
        #[arg(long, default_value = "en")]
        language: String,

        /// Acquire captions from video metadata only (skip the transcript API)
        #[arg(long)]
        metadata_only: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            language,
            metadata_only,
            verbose,
        } => {
            setup_logging(verbose);
            serve(bind, language, metadata_only).await
        }
        Commands::Summarize {
            video_id,
            language,
            metadata_only,
            verbose,
        } => {
            setup_logging(verbose);
            summarize_once(video_id, language, metadata_only).await
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn pipeline_config(language: String, metadata_only: bool) -> PipelineConfig {
    PipelineConfig {
        resolver: ResolverConfig {
            language,
            strategy: if metadata_only {
                AcquisitionStrategy::MetadataCaptions
            } else {
                AcquisitionStrategy::Full
            },
        },
        max_transcript_chars: TRANSCRIPT_CHAR_CAP,
    }
}

async fn serve(bind: String, language: String, metadata_only: bool) -> Result<()> {
    let summarizer = OpenAiClient::new(OpenAiConfig::from_env()?);

    let state = AppState {
        source: Arc::new(YoutubeClient::new()),
        summarizer: Arc::new(summarizer),
        pipeline: Arc::new(pipeline_config(language, metadata_only)),
    };

    server::run(ServerConfig { bind }, state).await
}

async fn summarize_once(video_id: String, language: String, metadata_only: bool) -> Result<()> {
    let config = pipeline_config(language, metadata_only);
    let source = YoutubeClient::new();
    let summarizer = OpenAiClient::new(OpenAiConfig::from_env()?);

    info!(%video_id, "summarizing video");
    let summary = summarize_video(&source, &summarizer, &config, &video_id).await?;

    println!("{summary}");
    Ok(())
}
