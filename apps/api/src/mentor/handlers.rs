//! Axum route handlers for the chat API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::{debug, error, info_span, Instrument};
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::mentor::responses::{MESSAGE_TOO_LONG, UNAVAILABLE};
use crate::mentor::stacks::TechStack;
use crate::models::chat::ConversationTurn;
use crate::models::job::JobListing;
use crate::state::AppState;

/// Longest message the chat endpoint will route.
pub const MAX_MESSAGE_CHARS: usize = 2000;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
}

#[derive(Debug, Deserialize)]
pub struct JobsQuery {
    pub stack: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/chat
///
/// Always answers 200 with an assistant turn. Messages over `MAX_MESSAGE_CHARS`
/// get `MESSAGE_TOO_LONG` without being routed. The router runs on its own task
/// so that a panic inside it becomes the `UNAVAILABLE` reply.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ConversationTurn> {
    if request.message.chars().count() > MAX_MESSAGE_CHARS {
        debug!("Rejecting message longer than {MAX_MESSAGE_CHARS} chars");
        return Json(ConversationTurn::assistant(MESSAGE_TOO_LONG));
    }

    let span = info_span!("chat", request_id = %Uuid::new_v4());
    let router = state.router.clone();

    let task = tokio::spawn(
        async move { router.respond(&request.message, &request.history).await }.instrument(span),
    );

    let turn = match task.await {
        Ok(turn) => turn,
        Err(e) => {
            error!("Chat task failed: {e}");
            ConversationTurn::assistant(UNAVAILABLE)
        }
    };
    Json(turn)
}

/// GET /api/v1/stacks
pub async fn handle_list_stacks(State(state): State<AppState>) -> Json<Vec<TechStack>> {
    Json(state.router.catalog().stacks().to_vec())
}

/// GET /api/v1/jobs?stack=Backend
///
/// Lists every listing when `stack` is omitted.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobsQuery>,
) -> Result<Json<Vec<JobListing>>, AppError> {
    let jobs = match params.stack.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(name) => {
            let stack = state
                .router
                .catalog()
                .get(name)
                .ok_or_else(|| AppError::NotFound(format!("Stack '{name}' not found")))?;
            db::search_jobs(&state.db, &stack.skills).await?
        }
        None => db::list_jobs(&state.db).await?,
    };
    Ok(Json(jobs))
}
