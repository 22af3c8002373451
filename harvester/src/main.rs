use std::sync::Arc;

use clap::Parser;

use csprng_common::auth::AuthKey;
use csprng_harvester::mixer_client::MixerClient;
use csprng_harvester::sources;
use csprng_harvester::supervisor;

/// Entropy-harvesting supervisor: runs one task per configured source.
#[derive(Parser, Debug)]
struct Config {
    /// Comma-separated list of source names to run.
    #[arg(long, env = "HARVESTER_SOURCES")]
    harvester_sources: String,

    /// Base URL of the mixer to submit digests to.
    #[arg(long, env = "MIXER_URL", default_value = "http://127.0.0.1:5000")]
    mixer_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = csprng_common::logging::init("harvester");
    let config = Config::parse();

    let auth = AuthKey::from_env().map_err(|msg| {
        tracing::error!(error = %msg, "configuration error");
        anyhow::anyhow!(msg)
    })?;

    let mixer = Arc::new(MixerClient::new(config.mixer_url.clone(), auth));

    let names: Vec<&str> = config
        .harvester_sources
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    anyhow::ensure!(!names.is_empty(), "HARVESTER_SOURCES resolved to no names");

    let mut handles = Vec::new();
    for name in names {
        match sources::build(name) {
            Some(source) => {
                tracing::info!(source = name, "starting source");
                let mixer = mixer.clone();
                handles.push(tokio::spawn(supervisor::run(source, mixer)));
            }
            None => {
                tracing::warn!(event = "unknown_source", source = name, "skipping unknown source");
            }
        }
    }

    anyhow::ensure!(
        !handles.is_empty(),
        "no configured source name resolved to a known source"
    );

    tracing::info!(mixer_url = %config.mixer_url, n_sources = handles.len(), "harvester starting up");
    futures::future::join_all(handles).await;
    Ok(())
}
