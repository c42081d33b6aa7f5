use std::sync::Arc;

use crate::planner::service::PlanService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Form-style plan service: `01..NN` days, single prompt.
    pub planner: Arc<PlanService>,
}
