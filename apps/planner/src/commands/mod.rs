pub mod generate;
pub mod quick;
pub mod serve;

use crate::config::Config;
use crate::planner::builder::PromptBuilder;
use crate::planner::requester::PlanRequester;
use crate::planner::service::PlanService;

/// Connects a plan service; fails on a missing credential before anything else happens.
fn connect_service(
    config: &Config,
    model: Option<String>,
    builder: PromptBuilder,
) -> Result<PlanService, crate::errors::PlanError> {
    let model = model.unwrap_or_else(|| config.model.clone());
    let requester = PlanRequester::connect(&config.llm, model)?;
    Ok(PlanService::new(builder, requester))
}
