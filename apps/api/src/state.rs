use std::sync::Arc;

use sqlx::SqlitePool;

use crate::mentor::router::MessageRouter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Built once at startup with its configuration, inference client and store handle.
    pub router: Arc<MessageRouter>,
}
