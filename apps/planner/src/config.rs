use std::str::FromStr;

use anyhow::{Context, Result};

use crate::errors::PlanError;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_PORT: u16 = 8501;

/// How a system instruction reaches the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SystemChannel {
    /// Sent as its own `system` role message.
    #[default]
    Separate,
    /// Concatenated ahead of the user prompt into one input string.
    Inline,
}

impl FromStr for SystemChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "separate" => Ok(Self::Separate),
            "inline" => Ok(Self::Inline),
            other => Err(format!(
                "unknown system channel '{other}' (expected 'separate' or 'inline')"
            )),
        }
    }
}

/// Everything the plan requester needs to reach the text-generation service.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub system_channel: SystemChannel,
}

impl LlmConfig {
    /// Returns the credential, or an actionable configuration error when it is missing.
    pub fn api_key(&self) -> Result<&str, PlanError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(PlanError::Configuration(format!(
                "{API_KEY_VAR} is not set. Set it before generating a plan, e.g. \
                `export {API_KEY_VAR}=\"sk-...\"` (PowerShell: `$env:{API_KEY_VAR}=\"sk-...\"`), \
                or put it in a .env file."
            ))),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub model: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let system_channel = match std::env::var("PLANNER_SYSTEM_CHANNEL") {
            Ok(raw) => raw
                .parse::<SystemChannel>()
                .map_err(anyhow::Error::msg)
                .context("PLANNER_SYSTEM_CHANNEL is invalid")?,
            Err(_) => SystemChannel::default(),
        };

        Ok(Config {
            llm: LlmConfig {
                api_key: std::env::var(API_KEY_VAR).ok(),
                base_url: std::env::var("OPENAI_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
                system_channel,
            },
            model: std::env::var("PLANNER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
