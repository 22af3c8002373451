//! HMAC-SHA256 request authentication.
//!
//! Every authenticated endpoint carries `X-RNG-Auth`: the hex-encoded
//! HMAC-SHA256 of the exact request body (the empty byte string for GET),
//! keyed by the process-wide `API_AUTH_KEY`. Verification is constant-time
//! (`hmac::Mac::verify_slice`). Mirrors
//! `examples/original_source/services/common/auth.py` byte for byte.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::ApiError;

type HmacSha256 = Hmac<Sha256>;

/// The process-wide authentication secret. Loaded once at startup from
/// `API_AUTH_KEY`; absence is a fatal configuration error (the binary
/// refuses to start, per `spec.md` §7). Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AuthKey(Vec<u8>);

impl AuthKey {
    pub fn from_env() -> Result<Self, String> {
        let raw = std::env::var("API_AUTH_KEY")
            .map_err(|_| "API_AUTH_KEY environment variable is not set".to_string())?;
        if raw.is_empty() {
            return Err("API_AUTH_KEY must not be empty".to_string());
        }
        Ok(Self(raw.into_bytes()))
    }

    /// Build a key directly from bytes, bypassing the environment. Used by
    /// tests and by any future non-env secret source (e.g. a secrets
    /// manager) that already holds the raw key material.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.0).expect("HMAC accepts keys of any length")
    }

    /// Hex-encoded HMAC-SHA256 of `data`.
    pub fn sign(&self, data: &[u8]) -> String {
        let mut mac = self.mac();
        mac.update(data);
        hex::encode(mac.finalize().into_bytes())
    }

    /// Verify a hex-encoded HMAC header against `data`, constant-time.
    pub fn verify(&self, header_hex: &str, data: &[u8]) -> bool {
        let Ok(received) = hex::decode(header_hex) else {
            return false;
        };
        let mut mac = self.mac();
        mac.update(data);
        mac.verify_slice(&received).is_ok()
    }
}

/// Validate an incoming request against the header value (if any) and the
/// exact request body. Returns the error classes `spec.md` §6 specifies:
/// missing header → `MissingAuth` (401), mismatch → `InvalidAuth` (403).
pub fn require_auth(key: &AuthKey, header: Option<&str>, body: &[u8]) -> Result<(), ApiError> {
    let header = header.ok_or(ApiError::MissingAuth)?;
    if key.verify(header, body) {
        Ok(())
    } else {
        Err(ApiError::InvalidAuth)
    }
}
