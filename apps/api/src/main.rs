mod config;
mod db;
mod errors;
mod llm_client;
mod mentor;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, init_schema, seed_if_empty};
use crate::llm_client::{CachedGenerator, InferenceClient};
use crate::mentor::router::{MessageRouter, RouterOptions};
use crate::mentor::stacks::StackCatalog;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing or malformed HF_TOKEN)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career Mentor API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite and seed the listings table
    let db = create_pool(&config.database_url).await?;
    init_schema(&db).await?;
    seed_if_empty(&db).await?;

    // Initialize inference client behind the prompt cache
    let client = InferenceClient::new(
        &config.inference_base_url,
        &config.inference_model,
        config.hf_token.clone(),
        config.inference_timeout,
    )
    .context("Failed to build inference HTTP client")?;
    info!(
        "Inference client initialized (model: {}, timeout: {}s)",
        client.model(),
        config.inference_timeout.as_secs()
    );
    let capacity = NonZeroUsize::new(config.prompt_cache_capacity)
        .context("PROMPT_CACHE_CAPACITY must be greater than zero")?;
    let generator = Arc::new(CachedGenerator::new(Arc::new(client), capacity));

    let router = MessageRouter::new(
        generator,
        db.clone(),
        StackCatalog::builtin(),
        RouterOptions {
            salary_detail: config.salary_detail,
            generative_replies: config.generative_replies,
        },
    );
    info!(
        "Message router ready (salary detail: {:?}, generative replies: {})",
        config.salary_detail, config.generative_replies
    );

    let state = AppState {
        db,
        router: Arc::new(router),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the chat widget origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
