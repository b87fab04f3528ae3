mod bank;
mod config;
mod errors;
mod intake;
mod interview;
mod models;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::bank::QuestionBank;
use crate::config::Config;
use crate::interview::evaluator::{AnswerEvaluator, HeuristicEvaluator, RemoteEvaluator};
use crate::interview::InterviewEngine;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::SessionStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PrepDeck API v{}", env!("CARGO_PKG_VERSION"));

    // Static per-stage question reference data
    let bank = Arc::new(QuestionBank::default());

    // Answer evaluator: deterministic heuristic by default, remote grading
    // service when GRADER_URL is configured.
    let evaluator: Arc<dyn AnswerEvaluator> = match &config.grader_url {
        Some(url) => Arc::new(RemoteEvaluator::new(
            url.clone(),
            config.grader_timeout_secs,
        )?),
        None => Arc::new(HeuristicEvaluator::new(&config)),
    };

    let engine = Arc::new(InterviewEngine::new(
        bank,
        evaluator,
        config.max_answer_chars,
    ));
    info!("Interview engine initialized (evaluator: {})", engine.backend());

    let state = AppState {
        store: SessionStore::new(),
        engine,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
