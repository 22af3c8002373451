//! Audio noise capture. Out of scope per `spec.md` §1 ("audio stacks"):
//! registered so the capability contract and configuration surface exist,
//! but `sample()` never produces output and no platform audio dependency
//! is pulled in (`SPEC_FULL.md` §4.3.1).

use std::time::Duration;

use async_trait::async_trait;

use super::HarvestSource;

pub struct RadioSource;

#[async_trait]
impl HarvestSource for RadioSource {
    fn name(&self) -> &'static str {
        "radio"
    }

    fn period(&self) -> Duration {
        Duration::from_secs(60)
    }

    async fn sample(&self) -> Option<Vec<u8>> {
        tracing::warn!(
            event = "radio_source_unimplemented",
            "radio source has no audio capture backend; skipping sample"
        );
        None
    }
}
