use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use csprng_common::auth::AuthKey;
use csprng_generator::generator::Generator;
use csprng_generator::mixer_client::MixerClient;
use csprng_generator::routes::{self, AppState};

/// Seeded keystream / application-RNG service.
#[derive(Parser, Debug)]
struct Config {
    /// Address to bind the HTTP server to.
    #[arg(long, env = "GENERATOR_BIND_ADDR", default_value = "0.0.0.0:5001")]
    bind_addr: SocketAddr,

    /// Base URL of the mixer to pull seeds from.
    #[arg(long, env = "MIXER_URL", default_value = "http://127.0.0.1:5000")]
    mixer_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = csprng_common::logging::init("generator");
    let config = Config::parse();

    let auth = AuthKey::from_env().map_err(|msg| {
        tracing::error!(error = %msg, "configuration error");
        anyhow::anyhow!(msg)
    })?;

    let mixer = MixerClient::new(config.mixer_url.clone(), auth.clone());
    let generator = Arc::new(Generator::new(mixer));

    let background = generator.clone();
    tokio::spawn(async move {
        background.initialize().await;
    });

    let state = Arc::new(AppState { generator, auth });
    let app = routes::router(state);

    tracing::info!(addr = %config.bind_addr, mixer_url = %config.mixer_url, "generator starting up");
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .context("failed to bind generator listener")?;
    axum::serve(listener, app)
        .await
        .context("generator server error")?;
    Ok(())
}
