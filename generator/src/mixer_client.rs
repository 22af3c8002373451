//! Seed acquisition from the mixer (`spec.md` §4.2.2).
//!
//! Mirrors `examples/original_source/services/generator_server.py`'s
//! `fetch_new_seed_with_retry`: a bounded retry loop with a fixed pause,
//! no backoff. Retrying is the caller's responsibility — `reqwest` itself
//! is given no retry middleware (`SPEC_FULL.md` §6.1).

use std::time::Duration;

use csprng_common::auth::AuthKey;
use csprng_common::{ENTROPY_POOL_SIZE, FETCH_RETRIES, FETCH_RETRY_DELAY};

const SEED_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

pub struct MixerClient {
    http: reqwest::Client,
    base_url: String,
    auth: AuthKey,
}

impl MixerClient {
    pub fn new(base_url: String, auth: AuthKey) -> Self {
        let http = reqwest::Client::builder()
            .timeout(SEED_FETCH_TIMEOUT)
            .build()
            .expect("failed to build mixer HTTP client");
        Self {
            http,
            base_url,
            auth,
        }
    }

    /// Authenticated GET against the mixer's seed endpoint, retried up to
    /// `FETCH_RETRIES` times with a `FETCH_RETRY_DELAY` pause. Returns
    /// `None` once the retry budget is exhausted.
    pub async fn fetch_seed(&self) -> Option<[u8; ENTROPY_POOL_SIZE]> {
        let url = format!("{}/api/v1/seed", self.base_url);
        let sig = self.auth.sign(b"");

        for attempt in 1..=FETCH_RETRIES {
            let result = self
                .http
                .get(&url)
                .header(csprng_common::AUTH_HEADER, &sig)
                .send()
                .await;

            match result {
                Ok(resp) if resp.status().is_success() => match resp.bytes().await {
                    Ok(bytes) if bytes.len() == ENTROPY_POOL_SIZE => {
                        let mut seed = [0u8; ENTROPY_POOL_SIZE];
                        seed.copy_from_slice(&bytes);
                        return Some(seed);
                    }
                    Ok(bytes) => {
                        tracing::warn!(
                            attempt,
                            len = bytes.len(),
                            "mixer returned a seed of unexpected length"
                        );
                    }
                    Err(err) => {
                        tracing::warn!(attempt, error = %err, "failed to read seed body");
                    }
                },
                Ok(resp) => {
                    tracing::warn!(attempt, status = %resp.status(), "mixer seed request failed");
                }
                Err(err) => {
                    tracing::warn!(attempt, error = %err, "mixer seed request errored");
                }
            }

            if attempt < FETCH_RETRIES {
                tokio::time::sleep(FETCH_RETRY_DELAY).await;
            }
        }

        tracing::error!("exhausted seed fetch retry budget");
        None
    }
}
