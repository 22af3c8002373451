//! FX rate snapshot, mirroring `harvester/sources/currency.py`
//! (`SPEC_FULL.md` §4.3.1).

use std::time::Duration;

use async_trait::async_trait;

use super::HarvestSource;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const ENDPOINT: &str = "https://api.frankfurter.app/latest?from=USD";

pub struct CurrencySource {
    period: Duration,
    http: reqwest::Client,
}

impl Default for CurrencySource {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(300),
            http: reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
                .expect("failed to build currency HTTP client"),
        }
    }
}

#[async_trait]
impl HarvestSource for CurrencySource {
    fn name(&self) -> &'static str {
        "currency"
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
                    tracing::warn!(event = "currency_sample_failed", error = %err, "body read failed");
                    None
                }
            },
            Err(err) => {
                tracing::warn!(event = "currency_sample_failed", error = %err, "request failed");
                None
            }
        }
    }
}
