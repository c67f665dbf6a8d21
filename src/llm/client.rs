use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SummarizeError};
use crate::llm::Summarizer;
use crate::llm::prompts::SYSTEM_PROMPT;

/// Configuration for the OpenAI API client
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key (from OPENAI_API_KEY env var)
    pub api_key: String,
    /// Model to use (e.g., "gpt-4o")
    pub model: String,
    /// Chat-completions endpoint
    pub api_url: String,
}

impl OpenAiConfig {
    /// Create config from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY environment variable not set"))?;

        Ok(Self::new(api_key, "gpt-4o".to_string()))
    }

    /// Create with custom settings
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            api_url: "https://api.openai.com/v1/chat/completions".to_string(),
        }
    }
}

/// OpenAI chat-completions client
pub struct OpenAiClient {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Send a system + user message pair and return the first choice's text
    pub async fn send_message(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|err| SummarizeError::SummarizationFailed {
                reason: err.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::SummarizationFailed {
                reason: format!("HTTP {status}: {body}"),
            });
        }

        let response: ChatResponse =
            response
                .json()
                .await
                .map_err(|err| SummarizeError::SummarizationFailed {
                    reason: format!("malformed response: {err}"),
                })?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| SummarizeError::SummarizationFailed {
                reason: "no choices in response".to_string(),
            })
    }
}

#[async_trait]
impl Summarizer for OpenAiClient {
    async fn summarize(&self, transcript: &str) -> Result<String> {
        self.send_message(SYSTEM_PROMPT, transcript).await
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}
