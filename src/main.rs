// src/main.rs
//! Grant Scanner — Binary Entrypoint
//! Boots the Axum HTTP server: configuration, metrics, sources, routes.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use grant_scanner::api::{self, AppState};
use grant_scanner::config::ScannerConfig;
use grant_scanner::fetch::PageFetcher;
use grant_scanner::metrics::Metrics;
use grant_scanner::pipeline::Scanner;
use grant_scanner::sources;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("grant_scanner=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op where the environment is already set.
    let _ = dotenvy::dotenv();
    init_tracing();

    // Configuration errors are fatal here: a scanner booted without a
    // cutoff or keywords would silently serve an empty or unfiltered table.
    let config = ScannerConfig::load_default()?;
    tracing::info!(
        cutoff = %config.cutoff,
        cache_ttl_secs = config.cache_ttl_secs,
        keywords = config.keywords.len(),
        "configuration loaded"
    );

    let metrics = Metrics::init(config.cache_ttl_secs);

    let fetcher = Arc::new(PageFetcher::new());
    let scanner = Arc::new(Scanner::new(sources::default_sources(&fetcher), config));

    let app = api::router(AppState { scanner }).merge(metrics.router());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "grant scanner listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
