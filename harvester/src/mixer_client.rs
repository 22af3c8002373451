//! Digest submission to the mixer (`spec.md` §4.3 step 4-5).
//!
//! Unlike the generator's seed fetch, this has no retry: "on transport
//! error, log and continue (no retry; the next period's sample
//! supersedes)".

use std::time::Duration;

use csprng_common::auth::AuthKey;

const ABSORB_TIMEOUT: Duration = Duration::from_secs(5);

pub struct MixerClient {
    http: reqwest::Client,
    base_url: String,
    auth: AuthKey,
}

impl MixerClient {
    pub fn new(base_url: String, auth: AuthKey) -> Self {
        let http = reqwest::Client::builder()
            .timeout(ABSORB_TIMEOUT)
            .build()
            .expect("failed to build mixer HTTP client");
        Self {
            http,
            base_url,
            auth,
        }
    }

    /// POST `digest` to the mixer's absorb endpoint. Returns `true` on a
    /// 2xx response; logs and returns `false` on any transport error or
    /// non-2xx status, with no retry.
    pub async fn post_digest(&self, digest: &[u8; 32]) -> bool {
        let url = format!("{}/api/v1/entropy", self.base_url);
        let sig = self.auth.sign(digest);

        match self
            .http
            .post(&url)
            .header(csprng_common::AUTH_HEADER, sig)
            .body(digest.to_vec())
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                tracing::warn!(status = %resp.status(), "mixer rejected digest");
                false
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to reach mixer");
                false
            }
        }
    }
}
