use axum::{extract::State, Json};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub database: bool,
    pub stacks: usize,
}

/// GET /health
///
/// Reports "degraded" instead of failing when the job store cannot be reached;
/// the chat endpoint still answers in that state.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthReport> {
    let database = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => true,
        Err(e) => {
            warn!("Health check could not reach the job store: {e}");
            false
        }
    };

    Json(HealthReport {
        status: if database { "ok" } else { "degraded" },
        service: "mentor-api",
        version: env!("CARGO_PKG_VERSION"),
        database,
        stacks: state.router.catalog().stacks().len(),
    })
}
