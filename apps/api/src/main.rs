mod analysis;
mod config;
mod errors;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::analyzer::ResumeAnalyzer;
use crate::analysis::catalog::RoleCatalog;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
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

    info!("Starting Resume Analyzer API v{}", env!("CARGO_PKG_VERSION"));

    // Load the role catalog once; it is never mutated afterwards
    let catalog = match &config.role_catalog_path {
        Some(path) => RoleCatalog::from_path(path)
            .with_context(|| format!("Failed to load role catalog from {}", path.display()))?,
        None => RoleCatalog::builtin().context("Built-in role catalog is invalid")?,
    };

    // Train the classifier before serving; the model is frozen from here on
    let analyzer = ResumeAnalyzer::build(catalog, config.classifier_backend)
        .context("Failed to train career classifier")?;
    info!(
        "Role catalog v{} loaded: {} roles, {} vocabulary skills (backend: {})",
        analyzer.catalog().version(),
        analyzer.catalog().len(),
        analyzer.vocabulary().len(),
        analyzer.backend()
    );

    let cors = build_cors(&config.allowed_origins)?;

    let state = AppState {
        config: config.clone(),
        analyzer: Arc::new(analyzer),
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Explicit origin allow-list with credentials. Methods and headers are mirrored from the
/// preflight request because wildcards are not allowed together with credentials.
fn build_cors(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}
