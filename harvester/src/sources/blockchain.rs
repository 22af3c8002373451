//! Latest Bitcoin block hash, mirroring `harvester_blockchain.py`
//! (`SPEC_FULL.md` §4.3.1).

use std::time::Duration;

use async_trait::async_trait;

use super::HarvestSource;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const ENDPOINT: &str = "https://blockchain.info/q/latesthash";

pub struct BlockchainSource {
    period: Duration,
    http: reqwest::Client,
}

impl Default for BlockchainSource {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(60),
            http: reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
                .expect("failed to build blockchain HTTP client"),
        }
    }
}

#[async_trait]
impl HarvestSource for BlockchainSource {
    fn name(&self) -> &'static str {
        "blockchain"
    }

    fn period(&self) -> Duration {
        self.period
    }

    async fn sample(&self) -> Option<Vec<u8>> {
        match self.http.get(ENDPOINT).send().await {
            Ok(resp) => match resp.bytes().await {
                Ok(body) if !body.is_empty() => Some(body.to_vec()),
                Ok(_) => None,
                Err(err) => {
                    tracing::warn!(event = "blockchain_sample_failed", error = %err, "body read failed");
                    None
                }
            },
            Err(err) => {
                tracing::warn!(event = "blockchain_sample_failed", error = %err, "request failed");
                None
            }
        }
    }
}
