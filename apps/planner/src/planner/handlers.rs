//! Axum route handlers for the plan form.

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::PlanError;
use crate::planner::models::{Level, PlanRequest, PlanTable};
use crate::planner::service::output_filename;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Fields of the plan form.
#[derive(Debug, Deserialize)]
pub struct PlanForm {
    pub level: Level,
    #[serde(default)]
    pub goal: String,
    pub days: u32,
    pub minutes: u32,
    #[serde(default)]
    pub frequency: Option<u32>,
    #[serde(default)]
    pub equipment: String,
}

impl TryFrom<PlanForm> for PlanRequest {
    type Error = PlanError;

    fn try_from(form: PlanForm) -> Result<Self, Self::Error> {
        PlanRequest::new(
            form.level,
            form.goal,
            form.days,
            form.minutes,
            form.frequency,
            form.equipment,
        )
    }
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub csv: String,
    pub rows: PlanTable,
    pub warnings: Vec<String>,
    pub filename: String,
}

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    pub level: Level,
    pub days: u32,
    pub rows: PlanTable,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
pub async fn handle_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// POST /api/v1/plans
///
/// Generates a plan. A decode failure answers 422 with the model's text in
/// `error.raw_text` so the form can show it.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(form): Json<PlanForm>,
) -> Result<Json<PlanResponse>, PlanError> {
    let request = PlanRequest::try_from(form)?;
    let plan = state.planner.generate(&request).await?;

    Ok(Json(PlanResponse {
        csv: plan.csv_text,
        rows: plan.table,
        warnings: plan.warnings,
        filename: output_filename(
            request.level(),
            request.total_days(),
            chrono::Local::now().date_naive(),
        ),
    }))
}

/// POST /api/v1/plans/download
///
/// Re-encodes a decoded table as BOM-prefixed UTF-8 CSV.
pub async fn handle_download(
    Json(request): Json<DownloadRequest>,
) -> Result<impl IntoResponse, PlanError> {
    if request.rows.is_empty() {
        return Err(PlanError::InvalidRequest(
            "rows cannot be empty".to_string(),
        ));
    }

    let bytes = request.rows.to_csv_bytes_with_bom()?;
    let filename = output_filename(
        request.level,
        request.days,
        chrono::Local::now().date_naive(),
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}
