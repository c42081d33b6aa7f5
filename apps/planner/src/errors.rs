use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Error type shared by every stage of plan generation.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, PlanError>`.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid plan request: {0}")]
    InvalidRequest(String),

    #[error("Plan request failed: {0}")]
    Request(#[from] LlmError),

    /// The model answered, but not with a usable table. `raw_text` is the
    /// untouched candidate so the user can fix it by hand.
    #[error("Could not decode the model output as a training plan CSV: {reason}")]
    Decode { reason: String, raw_text: String },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl PlanError {
    pub fn decode(reason: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
            raw_text: raw_text.into(),
        }
    }
}

impl IntoResponse for PlanError {
    fn into_response(self) -> Response {
        let (status, code, message, raw_text) = match &self {
            PlanError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    msg.clone(),
                    None,
                )
            }
            PlanError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg.clone(), None)
            }
            PlanError::Request(e) => {
                tracing::error!("Plan request failed: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "REQUEST_FAILURE",
                    self.to_string(),
                    None,
                )
            }
            PlanError::Decode { raw_text, .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "DECODE_FAILURE",
                self.to_string(),
                Some(raw_text.clone()),
            ),
            PlanError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message,
        });
        if let Some(raw_text) = raw_text {
            error["raw_text"] = json!(raw_text);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
