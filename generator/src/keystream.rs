//! The generator's seeded keystream state (`spec.md` §3, §4.2.1).
//!
//! Pure and synchronous: no network I/O, no locking. `Generator`
//! (`generator.rs`) owns one of these behind an async mutex and handles the
//! rekey network call around it.

use ctr::cipher::StreamCipher;
use zeroize::Zeroize;

use csprng_common::crypto::{derive_key_nonce, new_keystream, Keystream};
use csprng_common::REKEY_THRESHOLD;

/// Holds the raw 64-byte seed for the lifetime of the epoch it derived the
/// cipher from and wipes it on drop, following the teacher's
/// `ZeroizeOnDrop` secret-state convention.
pub struct KeystreamState {
    // Never read after construction; held only so it is wiped on drop.
    #[allow(dead_code)]
    seed: zeroize::Zeroizing<[u8; 64]>,
    cipher: Keystream,
    bytes_emitted: u64,
    rekey_threshold: u64,
}

impl KeystreamState {
    pub fn from_seed(seed: [u8; 64]) -> Self {
        Self::from_seed_with_threshold(seed, REKEY_THRESHOLD)
    }

    /// Same as `from_seed` but with an overridable rekey threshold, so
    /// Scenario E (`spec.md` §8) can be exercised without waiting for 100
    /// MiB of keystream.
    pub fn from_seed_with_threshold(seed: [u8; 64], rekey_threshold: u64) -> Self {
        let (mut key, nonce) = derive_key_nonce(&seed);
        let cipher = new_keystream(&key, &nonce);
        key.zeroize();
        Self {
            seed: zeroize::Zeroizing::new(seed),
            cipher,
            bytes_emitted: 0,
            rekey_threshold,
        }
    }

    pub fn needs_rekey(&self) -> bool {
        self.bytes_emitted >= self.rekey_threshold
    }

    pub fn bytes_emitted(&self) -> u64 {
        self.bytes_emitted
    }

    /// Advance the cipher by `n` bytes (encrypting `n` zero bytes) and
    /// return them. Does not check the rekey threshold — callers must do
    /// that first (`spec.md` §4.2.1).
    pub fn advance(&mut self, n: usize) -> Vec<u8> {
        let mut buf = vec![0u8; n];
        self.cipher.apply_keystream(&mut buf);
        self.bytes_emitted += n as u64;
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_is_prefix_consistent_across_calls() {
        let mut a = KeystreamState::from_seed([3u8; 64]);
        let mut combined = a.advance(10);
        combined.extend(a.advance(20));

        let mut b = KeystreamState::from_seed([3u8; 64]);
        let whole = b.advance(30);

        assert_eq!(combined, whole);
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = KeystreamState::from_seed([1u8; 64]);
        let mut b = KeystreamState::from_seed([2u8; 64]);
        assert_ne!(a.advance(32), b.advance(32));
    }

    #[test]
    fn rekey_threshold_is_observed() {
        let mut state = KeystreamState::from_seed([0u8; 64]);
        assert!(!state.needs_rekey());
        state.advance(0);
        assert_eq!(state.bytes_emitted(), 0);
    }
}
