use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use parking_lot::Mutex;

use csprng_common::auth::AuthKey;
use csprng_mixer::pool::EntropyPool;
use csprng_mixer::routes::{self, AppState};

/// Entropy-pool mixer service.
#[derive(Parser, Debug)]
struct Config {
    /// Address to bind the HTTP server to.
    #[arg(long, env = "MIXER_BIND_ADDR", default_value = "0.0.0.0:5000")]
    bind_addr: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = csprng_common::logging::init("mixer");
    let config = Config::parse();

    let auth = AuthKey::from_env().map_err(|msg| {
        tracing::error!(error = %msg, "configuration error");
        anyhow::anyhow!(msg)
    })?;

    let state = Arc::new(AppState {
        pool: Mutex::new(EntropyPool::new()),
        auth,
    });

    let app = routes::router(state);

    tracing::info!(addr = %config.bind_addr, "mixer starting up");
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .context("failed to bind mixer listener")?;
    axum::serve(listener, app)
        .await
        .context("mixer server error")?;
    Ok(())
}
