pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::mentor::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/chat", post(handlers::handle_chat))
        .route("/api/v1/stacks", get(handlers::handle_list_stacks))
        .route("/api/v1/jobs", get(handlers::handle_list_jobs))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::db::{init_schema, memory_pool, seed_if_empty};
    use crate::llm_client::{GenerationParams, LlmError, TextGenerator};
    use crate::mentor::responses::{MESSAGE_TOO_LONG, REPHRASE_PROMPT, UNAVAILABLE};
    use crate::mentor::router::{MessageRouter, RouterOptions};
    use crate::mentor::stacks::StackCatalog;

    struct FixedGenerator;

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str, _params: GenerationParams) -> Result<String, LlmError> {
            Ok("OUTROS".to_string())
        }
    }

    struct PanickingGenerator;

    #[async_trait]
    impl TextGenerator for PanickingGenerator {
        async fn generate(&self, _prompt: &str, _params: GenerationParams) -> Result<String, LlmError> {
            panic!("generator crashed")
        }
    }

    async fn app() -> Router {
        app_with(Arc::new(FixedGenerator)).await
    }

    async fn app_with(generator: Arc<dyn TextGenerator>) -> Router {
        let db = memory_pool().await;
        init_schema(&db).await.unwrap();
        seed_if_empty(&db).await.unwrap();
        let router = MessageRouter::new(
            generator,
            db.clone(),
            StackCatalog::builtin(),
            RouterOptions::default(),
        );
        build_router(AppState {
            db,
            router: Arc::new(router),
        })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn chat_request(body: Value) -> Request<Body> {
        Request::post("/api/v1/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app().await, Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "mentor-api");
        assert_eq!(body["database"], true);
        assert_eq!(body["stacks"], 4);
    }

    #[tokio::test]
    async fn test_health_reports_degraded_store() {
        let db = memory_pool().await;
        let router = MessageRouter::new(
            Arc::new(FixedGenerator),
            db.clone(),
            StackCatalog::builtin(),
            RouterOptions::default(),
        );
        db.close().await;
        let app = build_router(AppState {
            db,
            router: Arc::new(router),
        });

        let (status, body) = send(app, Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["database"], false);
    }

    #[tokio::test]
    async fn test_chat_returns_assistant_turn() {
        let request = chat_request(json!({
            "message": "Como criar um currículo para Backend?",
            "history": [{"role": "user", "content": "oi"}, {"role": "assistant", "content": "Olá!"}]
        }));
        let (status, body) = send(app().await, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["role"], "assistant");
        assert!(body["content"].as_str().unwrap().contains("Python"));
    }

    #[tokio::test]
    async fn test_chat_history_is_optional() {
        let (status, body) = send(app().await, chat_request(json!({"message": "a"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"], REPHRASE_PROMPT);
    }

    #[tokio::test]
    async fn test_chat_oversized_message_gets_assistant_turn() {
        let message = "a".repeat(handlers::MAX_MESSAGE_CHARS + 1);
        let (status, body) = send(app().await, chat_request(json!({ "message": message }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["role"], "assistant");
        assert_eq!(body["content"], MESSAGE_TOO_LONG);
    }

    #[tokio::test]
    async fn test_chat_router_panic_is_unavailable() {
        // No keyword matches, so the panicking generator is reached.
        let request = chat_request(json!({ "message": "Olá, tudo bem?" }));
        let (status, body) = send(app_with(Arc::new(PanickingGenerator)).await, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["role"], "assistant");
        assert_eq!(body["content"], UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_list_stacks() {
        let (status, body) =
            send(app().await, Request::get("/api/v1/stacks").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Fullstack", "Frontend", "Backend", "Data"]);
    }

    #[tokio::test]
    async fn test_list_jobs_all_and_by_stack() {
        let (_, all) = send(app().await, Request::get("/api/v1/jobs").body(Body::empty()).unwrap()).await;
        assert_eq!(all.as_array().unwrap().len(), 3);

        let (status, frontend) = send(
            app().await,
            Request::get("/api/v1/jobs?stack=frontend").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let frontend = frontend.as_array().unwrap();
        assert_eq!(frontend.len(), 1);
        assert_eq!(frontend[0]["company"], "Tech Solutions");
    }

    #[tokio::test]
    async fn test_list_jobs_unknown_stack_is_404() {
        let (status, body) = send(
            app().await,
            Request::get("/api/v1/jobs?stack=Mobile").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
