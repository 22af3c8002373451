//! Harvester capability contract and static source registry
//! (`spec.md` §4.3, §9 "Abstract source polymorphism").
//!
//! `spec.md` explicitly recommends replacing dynamic module loading by
//! name with a static registry; `SPEC_FULL.md` §4.3.1 names the five
//! concrete sources this registry resolves.

pub mod blockchain;
pub mod currency;
pub mod latency;
pub mod radio;
pub mod weather;

use std::time::Duration;

use async_trait::async_trait;

/// A harvester source: a name, a sampling period, and a `sample()`
/// operation producing a non-empty byte string or `None` (`spec.md` §4.3).
#[async_trait]
pub trait HarvestSource: Send + Sync {
    fn name(&self) -> &'static str;
    fn period(&self) -> Duration;
    async fn sample(&self) -> Option<Vec<u8>>;
}

/// Resolve a configured source name to a constructor. `None` for unknown
/// names — callers log and skip rather than failing the whole process.
pub fn build(name: &str) -> Option<Box<dyn HarvestSource>> {
    match name {
        "latency" => Some(Box::new(latency::LatencySource::default())),
        "currency" => Some(Box::new(currency::CurrencySource::default())),
        "weather" => Some(Box::new(weather::WeatherSource::default())),
        "blockchain" => Some(Box::new(blockchain::BlockchainSource::default())),
        "radio" => Some(Box::new(radio::RadioSource)),
        _ => None,
    }
}
