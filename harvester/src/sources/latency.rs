//! TCP-connect round-trip timing against a fixed set of public resolvers.
//!
//! Replaces the original's ICMP `ping3` dependency (raw sockets, out of
//! scope per `spec.md` §1) with a signal needing no elevated privilege,
//! per `SPEC_FULL.md` §4.3.1.

use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::HarvestSource;

const RESOLVERS: &[(&str, u16)] = &[
    ("1.1.1.1", 53),
    ("8.8.8.8", 53),
    ("9.9.9.9", 53),
];

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

pub struct LatencySource {
    period: Duration,
}

impl Default for LatencySource {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(30),
        }
    }
}

#[async_trait]
impl HarvestSource for LatencySource {
    fn name(&self) -> &'static str {
        "latency"
    }

    fn period(&self) -> Duration {
        self.period
    }

    async fn sample(&self) -> Option<Vec<u8>> {
        for (host, port) in RESOLVERS {
            let addr = format!("{host}:{port}");
            let start = Instant::now();
            let connected = tokio::time::timeout(
                CONNECT_TIMEOUT,
                tokio::net::TcpStream::connect(&addr),
            )
            .await;
            if let Ok(Ok(_stream)) = connected {
                let nanos = start.elapsed().as_nanos();
                return Some(nanos.to_string().into_bytes());
            }
        }
        tracing::warn!(event = "latency_sample_failed", "no resolver reachable");
        None
    }
}
