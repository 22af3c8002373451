//! Wire-contract constants. Changing any of these changes the protocol
//! between the three services — see `spec.md` §9.

/// Minimum number of absorbed digests before the mixer will mint seeds.
pub const MIN_SOURCES: u32 = 3;

/// Size in bytes of the mixer's entropy pool / the seed it emits.
pub const ENTROPY_POOL_SIZE: usize = 64;

/// Size in bytes of a harvester digest.
pub const DIGEST_SIZE: usize = 32;

/// Cumulative keystream bytes after which the generator must rekey.
pub const REKEY_THRESHOLD: u64 = 100 * 1024 * 1024;

/// Retry budget for `fetch_seed`.
pub const FETCH_RETRIES: u32 = 10;

/// Pause between `fetch_seed` attempts.
pub const FETCH_RETRY_DELAY: std::time::Duration = std::time::Duration::from_secs(1);

/// Chunk size for the raw entropy stream endpoint.
pub const STREAM_CHUNK: usize = 1024;

/// Domain separation string for the seed the mixer hands to the generator.
pub const DOMAIN_SEED: &[u8] = b"CSPRNG-SEED-V1";

/// Domain separation string for the mixer's next internal pool state.
pub const DOMAIN_POOL: &[u8] = b"CSPRNG-POOL-V1";

/// Header carrying the hex-encoded HMAC-SHA256 of the request body.
pub const AUTH_HEADER: &str = "X-RNG-Auth";
