//! Shared building blocks for the mixer, generator and harvester binaries.
//!
//! Everything that must be bit-identical across the three processes lives
//! here: the HMAC authentication scheme, the hash/cipher primitives the
//! wire protocol is defined in terms of, the error taxonomy each HTTP API
//! maps to status codes, and the tracing/audit-log setup.

pub mod auth;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod logging;
pub mod wire;

pub use constants::*;
pub use error::{ApiError, ApiResult};
