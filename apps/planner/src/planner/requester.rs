//! Plan Requester — one round trip to the text-generation backend.

use std::sync::Arc;

use tracing::info;

use crate::config::LlmConfig;
use crate::errors::PlanError;
use crate::llm_client::{LlmClient, PromptPair, TextCompletion};

#[derive(Clone)]
pub struct PlanRequester {
    backend: Arc<dyn TextCompletion>,
    model: String,
}

impl PlanRequester {
    /// Resolves the credential from `config` and connects the OpenAI backend.
    pub fn connect(config: &LlmConfig, model: impl Into<String>) -> Result<Self, PlanError> {
        Self::with_backend(config, model, |api_key| {
            LlmClient::new(
                api_key.to_string(),
                config.base_url.clone(),
                config.system_channel,
            )
            .map_err(PlanError::from)
        })
    }

    /// Resolves the credential first; `make_backend` only runs when one is present.
    pub fn with_backend<B, F>(
        config: &LlmConfig,
        model: impl Into<String>,
        make_backend: F,
    ) -> Result<Self, PlanError>
    where
        B: TextCompletion + 'static,
        F: FnOnce(&str) -> Result<B, PlanError>,
    {
        let api_key = config.api_key()?;
        let backend = make_backend(api_key)?;
        Ok(Self::from_backend(Arc::new(backend), model))
    }

    pub fn from_backend(backend: Arc<dyn TextCompletion>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends the prompt once and returns the trimmed response text.
    pub async fn request(&self, prompt: &PromptPair) -> Result<String, PlanError> {
        info!(
            "Requesting plan from model {} (prompt: {} chars, system instruction: {})",
            self.model,
            prompt.user.chars().count(),
            prompt.system.is_some()
        );
        let text = self.backend.complete(prompt, &self.model).await?;
        Ok(text.trim().to_string())
    }
}
