mod analysis;
mod config;
mod db;
mod errors;
mod filtering;
mod llm_client;
mod models;
mod personality;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::classifier::{GeminiClassifier, PostClassifier};
use crate::config::Config;
use crate::db::create_pool;
use crate::filtering::engine::FilterEngine;
use crate::filtering::rules::RuleTable;
use crate::filtering::taxonomy::Taxonomy;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    let crate_target = env!("CARGO_PKG_NAME").replace('-', "_");
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", crate_target, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mosaic API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and verify the schema
    let db = create_pool(&config.database_url).await?;
    db::init_schema(&db).await?;

    // Initialize the LLM client and classification source
    let llm = LlmClient::new(config.gemini_api_key.clone());
    info!(
        "LLM client initialized (generation: {}, embeddings: {})",
        llm_client::GENERATION_MODEL,
        llm_client::EMBEDDING_MODEL
    );

    let taxonomy = Arc::new(Taxonomy::builtin());
    let classifier: Arc<dyn PostClassifier> =
        Arc::new(GeminiClassifier::new(llm, taxonomy.clone()));

    // Build the decision engine around the static rule table
    let engine = Arc::new(FilterEngine::new(RuleTable::builtin()));
    info!("Filter engine initialized ({} rules)", engine.rules().len());

    // Build app state
    let state = AppState {
        db,
        classifier,
        engine,
        taxonomy,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
