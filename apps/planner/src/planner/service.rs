//! Plan Service — build → request → extract, for one front end.
//!
//! Flow: PromptBuilder::build → PlanRequester::request → extractor::extract →
//!       day-sequence check (warnings only).

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::PlanError;
use crate::planner::builder::PromptBuilder;
use crate::planner::extractor::{self, ExtractedPlan};
use crate::planner::models::{Level, PlanRequest, PlanTable};
use crate::planner::requester::PlanRequester;

/// A successfully decoded plan.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPlan {
    pub csv_text: String,
    pub table: PlanTable,
    /// Day column problems. Reported, never repaired.
    pub warnings: Vec<String>,
}

#[derive(Clone)]
pub struct PlanService {
    builder: PromptBuilder,
    requester: PlanRequester,
}

impl PlanService {
    pub fn new(builder: PromptBuilder, requester: PlanRequester) -> Self {
        Self { builder, requester }
    }

    pub fn model(&self) -> &str {
        self.requester.model()
    }

    pub async fn generate(&self, request: &PlanRequest) -> Result<GeneratedPlan, PlanError> {
        info!(
            "Generating {}-day plan for level {}",
            request.total_days(),
            request.level().slug()
        );

        let prompt = self.builder.build(request);
        let raw = self.requester.request(&prompt).await?;

        let ExtractedPlan { csv_text, table } = extractor::extract(&raw).map_err(|e| {
            warn!("Model output could not be decoded: {e}");
            e
        })?;

        let warnings: Vec<String> = table
            .day_issues(self.builder.numbering(), request.total_days())
            .iter()
            .map(ToString::to_string)
            .collect();
        for warning in &warnings {
            warn!("Plan day sequence: {warning}");
        }

        info!("Plan decoded: {} rows", table.len());
        Ok(GeneratedPlan {
            csv_text,
            table,
            warnings,
        })
    }
}

/// `plan_{level}_{days}d_{date}.csv`
pub fn output_filename(level: Level, total_days: u32, date: NaiveDate) -> String {
    format!(
        "plan_{}_{}d_{}.csv",
        level.slug(),
        total_days,
        date.format("%Y-%m-%d")
    )
}
