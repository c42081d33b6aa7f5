use anyhow::{bail, Result};

use super::connect_service;
use crate::config::Config;
use crate::errors::PlanError;
use crate::planner::builder::PromptBuilder;
use crate::planner::models::{Level, PlanRequest, PlanTable};
use crate::planner::prompts::QUICK_FOCUS;

const QUICK_DAYS: u32 = 7;
/// Placeholder only: `PromptBuilder::quick` does not state a session length.
const QUICK_MINUTES: u32 = 30;

/// The fixed beginner week: `D1..D7`, no system instruction.
pub fn quick_request() -> Result<PlanRequest, PlanError> {
    PlanRequest::new(Level::Beginner, QUICK_FOCUS, QUICK_DAYS, QUICK_MINUTES, None, "")
}

/// Prints a beginner 7-day plan to stdout.
pub async fn run(config: &Config, model: Option<String>) -> Result<()> {
    let service = connect_service(config, model, PromptBuilder::quick())?;

    match service.generate(&quick_request()?).await {
        Ok(plan) => {
            println!("{}", plan.csv_text);
            println!();
            print!("{}", summarize(&plan.table));
            Ok(())
        }
        Err(PlanError::Decode { reason, raw_text }) => {
            println!("{raw_text}");
            bail!("⚠️  the output above is not a valid plan CSV: {reason}")
        }
        Err(e) => Err(e.into()),
    }
}

/// One line per day: `D1 热身 (30 min, 低): 慢跑 / 拉伸`
fn summarize(table: &PlanTable) -> String {
    table
        .rows
        .iter()
        .map(|row| {
            format!(
                "{} {} ({} min, {}): {}\n",
                row.day,
                row.theme,
                row.duration_min,
                row.intensity,
                row.drill_items().collect::<Vec<_>>().join(" / ")
            )
        })
        .collect()
}
