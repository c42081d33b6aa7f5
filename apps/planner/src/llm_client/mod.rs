/// LLM Client — the single point of entry for all text-generation calls.
///
/// No other module talks to the OpenAI API directly. Callers depend on the
/// [`TextCompletion`] trait so tests and other deployments can swap the backend.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::SystemChannel;

#[cfg(test)]
pub mod fake;

const TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A system instruction (optional) plus the user prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: Option<String>,
    pub user: String,
}

impl PromptPair {
    /// The single-string form used when the system channel is not available.
    pub fn inline(&self) -> String {
        match &self.system {
            Some(system) => format!("{}\n\n{}", system.trim_end(), self.user),
            None => self.user.clone(),
        }
    }
}

/// One prompt in, one text answer out.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn complete(&self, prompt: &PromptPair, model: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: ResponsesInput<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ResponsesInput<'a> {
    Text(String),
    Messages(Vec<InputMessage<'a>>),
}

#[derive(Debug, Serialize)]
struct InputMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    #[serde(default)]
    pub output: Vec<OutputItem>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct OutputItem {
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
pub struct ContentPart {
    #[serde(rename = "type")]
    pub part_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Joins every `output_text` part of every message item.
    pub fn output_text(&self) -> String {
        self.output
            .iter()
            .filter(|item| item.item_type == "message")
            .flat_map(|item| item.content.iter())
            .filter(|part| part.part_type == "output_text")
            .filter_map(|part| part.text.as_deref())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Client for the OpenAI Responses API. One request per call, no retries.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    system_channel: SystemChannel,
}

impl LlmClient {
    pub fn new(
        api_key: String,
        base_url: String,
        system_channel: SystemChannel,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(TIMEOUT_SECS))
                .build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            system_channel,
        })
    }

    fn request_body<'a>(&self, prompt: &'a PromptPair, model: &'a str) -> ResponsesRequest<'a> {
        let input = match (&prompt.system, self.system_channel) {
            (Some(system), SystemChannel::Separate) => ResponsesInput::Messages(vec![
                InputMessage {
                    role: "system",
                    content: system,
                },
                InputMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ]),
            _ => ResponsesInput::Text(prompt.inline()),
        };
        ResponsesRequest { model, input }
    }
}

#[async_trait]
impl TextCompletion for LlmClient {
    async fn complete(&self, prompt: &PromptPair, model: &str) -> Result<String, LlmError> {
        let request_body = self.request_body(prompt, model);

        let response = self
            .client
            .post(format!("{}/responses", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let llm_response: LlmResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &llm_response.usage {
            debug!(
                "LLM call succeeded: model={}, input_tokens={}, output_tokens={}",
                model, usage.input_tokens, usage.output_tokens
            );
        }

        let text = llm_response.output_text();
        if text.trim().is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text)
    }
}
