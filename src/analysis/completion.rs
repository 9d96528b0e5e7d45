use anyhow::{anyhow, bail, Context, Result};
use axum::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;

pub(crate) const TEMPERATURE: f64 = 0.2;
pub(crate) const MAX_TOKENS: u32 = 10;

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends `prompt` as the only user message and returns the text of the first choice.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[derive(Serialize, Debug)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<CompletionMessage<'a>>,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Serialize, Debug)]
pub struct CompletionMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

impl<'a> CompletionRequest<'a> {
    pub fn new(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            messages: vec![CompletionMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct CompletionResponse {
    pub choices: Vec<CompletionChoice>,
}

#[derive(Deserialize, Debug)]
pub struct CompletionChoice {
    pub message: CompletionChoiceMessage,
}

#[derive(Deserialize, Debug)]
pub struct CompletionChoiceMessage {
    pub content: Option<String>,
}

impl CompletionResponse {
    pub fn into_content(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Completion response has no choices"))?
            .message
            .content
            .ok_or_else(|| anyhow!("First completion choice has no content"))
    }
}

/// Talks to an OpenAI compatible `/chat/completions` endpoint.
pub struct ChatCompletionClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
}

impl ChatCompletionClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            url: config.completion_url.clone(),
            api_key: config.groq_api_key.clone(),
            model: config.completion_model.clone(),
        })
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionClient {
    #[tracing::instrument(level = "info", skip_all, fields(model = %self.model))]
    async fn complete(&self, prompt: &str) -> Result<String> {
        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest::new(&self.model, prompt))
            .send()
            .await
            .context("Completion request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Completion API returned status {}", status);
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .context("Failed to decode completion response")?;
        let content = completion.into_content()?;
        debug!("Completion reply: {:?}", content);
        Ok(content)
    }
}

#[cfg(test)]
pub(crate) fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "meta-llama/llama-4-scout-17b-16e-instruct",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
}
