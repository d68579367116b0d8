//! Cursus access server
//!
//! Serves the session and access endpoints over in-memory stores seeded
//! from an organization snapshot.

use anyhow::Result;
use clap::Parser;
use cursus_core::CursusConfig;
use cursus_effects::{MemoryStores, OrganizationSnapshot};
use cursus_web::{router, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cursus-server")]
#[command(about = "Cursus course-planning access server", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = CursusConfig::load(cli.config.as_deref())?;

    let stores = match &config.snapshot_path {
        Some(path) => OrganizationSnapshot::load(path)?.into_stores()?,
        None => {
            tracing::warn!("no organization snapshot configured, every check will deny");
            MemoryStores::default()
        }
    };

    let state = AppState::from_config(
        &config.session,
        Arc::new(stores.graph),
        Arc::new(stores.positions),
        Arc::new(stores.authenticator),
    )?;

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(
        address = %config.server.bind_address,
        secure_cookie = config.session.cookie_secure,
        "cursus-server listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("cursus-server stopped");
    Ok(())
}

/// Wait for Ctrl+C
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(error) => {
            tracing::warn!(error = %error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}
