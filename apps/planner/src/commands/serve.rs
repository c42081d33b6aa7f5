use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use super::connect_service;
use crate::config::Config;
use crate::planner::builder::PromptBuilder;
use crate::routes::build_router;
use crate::state::AppState;

/// Serves the plan form and its JSON API.
pub async fn run(config: &Config, port: Option<u16>, model: Option<String>) -> Result<()> {
    let planner = connect_service(config, model, PromptBuilder::form())?;
    info!("LLM client initialized (model: {})", planner.model());

    let state = AppState {
        planner: Arc::new(planner),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", port.unwrap_or(config.port)).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
