use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod admin;
mod config;
mod dashboard;
mod db;
mod error;
mod source;
mod stats;

use admin::ConnectionTester;
use config::Config;
use dashboard::AppState;
use db::Database;
use source::{FileSource, MatchSource, MockSource};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let db = Database::open(&config.database_path)?;
    info!("Database opened: {}", config.database_path);

    let source: Arc<dyn MatchSource> = match &config.matches_file {
        Some(path) => Arc::new(FileSource::load(path)?),
        None => Arc::new(MockSource::new(config.match_count, config.seed)),
    };
    info!("Serving matches from {}", source.name());

    let tester = ConnectionTester::new(Duration::from_secs(config.connection_timeout_secs))?;

    let app = dashboard::router(AppState { db, source, tester });
    let addr: SocketAddr = config.dashboard_addr.parse()?;
    info!("Dashboard listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
