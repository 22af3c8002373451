//! Per-source sampling loop (`spec.md` §4.3).

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use csprng_common::crypto::h256;

use crate::mixer_client::MixerClient;
use crate::sources::HarvestSource;

/// Nanosecond clock reading, decimal-encoded, appended to the raw sample
/// so identical source output still produces a distinct digest.
fn timestamp_digits() -> Vec<u8> {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before the Unix epoch")
        .as_nanos();
    nanos.to_string().into_bytes()
}

/// Run one source forever: sample, hash, forward, sleep. Never returns
/// (intended to be the body of a dedicated `tokio::spawn` task).
pub async fn run(source: Box<dyn HarvestSource>, mixer: Arc<MixerClient>) {
    let name = source.name();
    loop {
        match source.sample().await {
            Some(raw) => {
                let timestamp = timestamp_digits();
                let digest = h256(&[raw.as_slice(), timestamp.as_slice()]);
                if mixer.post_digest(&digest).await {
                    tracing::info!(event = "digest_submitted", source = name, "digest forwarded");
                } else {
                    tracing::warn!(event = "digest_submit_failed", source = name, "mixer rejected or unreachable");
                }
            }
            None => {
                tracing::debug!(event = "sample_empty", source = name, "source produced no sample this round");
            }
        }
        tokio::time::sleep(source.period()).await;
    }
}
