//! `kv-server` entry point: parses CLI flags, starts one shard cluster
//! per value shape, serves the HTTP surface, and on SIGINT saves every
//! shard's snapshot before exiting. Grounded in
//! `original_source/api/main.go`.

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

use kv_server::config::Config;
use kv_server::state::AppState;
use kv_server::{openapi, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::parse();
    info!(port = config.port, shards = config.shard_count(), "starting kv-server");

    let state = Arc::new(AppState::start(&config).await?);
    let app = openapi::mount(routes::build_router(state.clone()));

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // `app` was moved into the call above and is dropped with it, so by
    // this point `state` should be the sole remaining owner.
    match Arc::try_unwrap(state) {
        Ok(state) => {
            info!("saving shard snapshots before exit");
            state.shutdown().await?;
        }
        Err(_) => {
            warn!("state still has outstanding references, skipping snapshot save");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("received SIGINT, shutting down"),
        Err(error) => error!(%error, "failed to listen for SIGINT"),
    }
}
