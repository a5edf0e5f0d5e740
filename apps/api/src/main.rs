mod candidates;
mod config;
mod errors;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::candidates::service::CandidateService;
use crate::candidates::store::{CandidateRepository, InMemoryRepository, JsonFileRepository};
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillMatch API v{}", env!("CARGO_PKG_VERSION"));

    let repo = build_repository(&config);

    let candidates = CandidateService::new(
        repo,
        config.simulated_latency,
        config.max_profile_strength,
    );
    info!(
        "Candidate service ready (latency {:?}, contact delay {:?}, max strength {})",
        config.simulated_latency, config.contact_delay, config.max_profile_strength
    );

    let state = AppState {
        candidates,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Picks the candidate store: in-process for `:memory:`, otherwise a JSON file.
fn build_repository(config: &Config) -> Arc<dyn CandidateRepository> {
    if config.uses_in_memory_storage() {
        info!("Using in-memory candidate store");
        return Arc::new(InMemoryRepository::new());
    }
    let repo = JsonFileRepository::new(&config.storage_path);
    info!("Using JSON candidate store at {}", repo.path().display());
    Arc::new(repo)
}
