pub mod client;
pub mod prompts;

pub use client::*;
pub use prompts::*;

use async_trait::async_trait;

use crate::error::Result;

/// Downstream text-generation capability the pipeline depends on.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize a normalized transcript, returning the summary text.
    async fn summarize(&self, transcript: &str) -> Result<String>;
}
