//! The generator's process-wide keystream singleton (`spec.md` §4.2,
//! §5). Owns the single `tokio::sync::Mutex<Option<KeystreamState>>` that
//! every RNG endpoint shares; `tokio::sync::Mutex` (not `parking_lot`, as
//! the mixer uses for its pool) is deliberate here because the rekey path
//! holds this lock across an awaited network call to the mixer
//! (`spec.md` §5: "the rekey path calls the mixer under the keystream
//! lock; this is intentional").

use async_trait::async_trait;
use tokio::sync::Mutex;

use csprng_common::ApiError;

use crate::keystream::KeystreamState;
use crate::mixer_client::MixerClient;
use crate::sampling::ByteSource;

pub struct Generator {
    state: Mutex<Option<KeystreamState>>,
    mixer: MixerClient,
    rekey_threshold: u64,
}

impl Generator {
    pub fn new(mixer: MixerClient) -> Self {
        Self::with_rekey_threshold(mixer, csprng_common::REKEY_THRESHOLD)
    }

    pub fn with_rekey_threshold(mixer: MixerClient, rekey_threshold: u64) -> Self {
        Self {
            state: Mutex::new(None),
            mixer,
            rekey_threshold,
        }
    }

    pub fn ready(&self) -> bool {
        self.state
            .try_lock()
            .map(|g| g.is_some())
            .unwrap_or(true)
    }

    /// Background initializer (`spec.md` §4.2.2 `initialize()`): retries
    /// until a seed is obtained, then installs it. Runs concurrently with
    /// the server accepting connections; requests arriving first see
    /// `not_ready`.
    pub async fn initialize(&self) {
        loop {
            if let Some(seed) = self.mixer.fetch_seed().await {
                let mut guard = self.state.lock().await;
                *guard = Some(KeystreamState::from_seed_with_threshold(
                    seed,
                    self.rekey_threshold,
                ));
                tracing::info!(event = "generator_initialized", "initial seed installed");
                return;
            }
            tracing::warn!("initial seed fetch exhausted retries, staying uninitialized");
        }
    }

    /// Rekey from a known seed, bypassing the mixer. Used by fixed-seed
    /// determinism tests (property 9) and available to an operator tool
    /// that wants to inject a seed out of band.
    pub async fn install_seed(&self, seed: [u8; 64]) {
        let mut guard = self.state.lock().await;
        *guard = Some(KeystreamState::from_seed_with_threshold(
            seed,
            self.rekey_threshold,
        ));
    }

    /// `generate(n)` (`spec.md` §4.2.1): rekey first if the threshold has
    /// been crossed, then advance the cipher by `n` bytes. The entire call
    /// runs under one lock acquisition, so concurrent callers are
    /// serialized (property 10).
    pub async fn generate(&self, n: usize) -> Result<Vec<u8>, ApiError> {
        let mut guard = self.state.lock().await;
        let state = guard
            .as_mut()
            .ok_or_else(|| ApiError::NotReady("generator has no seed yet".to_string()))?;

        if state.needs_rekey() {
            match self.mixer.fetch_seed().await {
                Some(seed) => {
                    tracing::info!(event = "rekey", "keystream rekeyed after threshold");
                    *state = KeystreamState::from_seed_with_threshold(seed, self.rekey_threshold);
                }
                None => {
                    return Err(ApiError::Upstream(
                        "rekey failed: mixer seed fetch exhausted retries".to_string(),
                    ));
                }
            }
        }

        Ok(state.advance(n))
    }
}

#[async_trait]
impl ByteSource for &Generator {
    async fn next_bytes(&mut self, n: usize) -> Result<Vec<u8>, ApiError> {
        Generator::generate(self, n).await
    }
}
