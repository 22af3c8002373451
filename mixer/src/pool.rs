//! The entropy pool state machine (`spec.md` §3-4.1).
//!
//! A single 64-byte register `P` plus a saturating source counter,
//! mutated only under the caller's lock. Grounded on
//! `examples/original_source/services/mixer/mixer_server.py`'s
//! `add_entropy`/`get_seed` (the hash-chain pool update and the
//! output/state split) and on the teacher's `crypto/rng/drbg.rs`
//! `EntropyPool` (same "accumulate, then condition on extraction" shape,
//! generalized from XOR-mixing to the spec's SHA-512 hash chain).

use csprng_common::crypto::h512;
use csprng_common::{DIGEST_SIZE, DOMAIN_POOL, DOMAIN_SEED, ENTROPY_POOL_SIZE, MIN_SOURCES};

#[derive(Debug, PartialEq, Eq)]
pub enum AbsorbError {
    WrongLength(usize),
}

pub struct EntropyPool {
    pool: [u8; ENTROPY_POOL_SIZE],
    n_sources: u32,
}

impl EntropyPool {
    pub fn new() -> Self {
        Self {
            pool: [0u8; ENTROPY_POOL_SIZE],
            n_sources: 0,
        }
    }

    pub fn n_sources(&self) -> u32 {
        self.n_sources
    }

    pub fn ready(&self) -> bool {
        self.n_sources >= MIN_SOURCES
    }

    /// Mix `digest` into the pool. Succeeds or leaves the pool untouched.
    pub fn absorb(&mut self, digest: &[u8]) -> Result<(), AbsorbError> {
        if digest.len() != DIGEST_SIZE {
            return Err(AbsorbError::WrongLength(digest.len()));
        }
        self.pool = h512(&[&self.pool, digest]);
        self.n_sources = (self.n_sources + 1).min(MIN_SOURCES);
        Ok(())
    }

    /// Output/state split: returns a fresh seed and re-stirs the pool so
    /// the next `emit_seed` call (with no intervening `absorb`) returns a
    /// different value. `None` when the pool is not yet seeded.
    pub fn emit_seed(&mut self) -> Option<[u8; ENTROPY_POOL_SIZE]> {
        if !self.ready() {
            return None;
        }
        let seed = h512(&[&self.pool, DOMAIN_SEED]);
        self.pool = h512(&[&self.pool, DOMAIN_POOL]);
        Some(seed)
    }
}

impl Default for EntropyPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readiness_is_monotone_and_saturates() {
        let mut pool = EntropyPool::new();
        assert!(!pool.ready());
        for i in 1..=5 {
            pool.absorb(&[i as u8; 32]).unwrap();
            assert_eq!(pool.n_sources(), i.min(MIN_SOURCES));
        }
        assert!(pool.ready());
    }

    #[test]
    fn absorb_rejects_wrong_length() {
        let mut pool = EntropyPool::new();
        assert_eq!(pool.absorb(&[0u8; 31]), Err(AbsorbError::WrongLength(31)));
        assert_eq!(pool.n_sources(), 0);
    }

    #[test]
    fn emit_seed_requires_readiness() {
        let mut pool = EntropyPool::new();
        pool.absorb(&[1u8; 32]).unwrap();
        pool.absorb(&[2u8; 32]).unwrap();
        assert!(pool.emit_seed().is_none());
    }

    #[test]
    fn consecutive_seeds_differ_and_match_expected_split() {
        let mut pool = EntropyPool::new();
        pool.absorb(&[1u8; 32]).unwrap();
        pool.absorb(&[2u8; 32]).unwrap();
        pool.absorb(&[3u8; 32]).unwrap();

        let seed1 = pool.emit_seed().unwrap();
        let seed2 = pool.emit_seed().unwrap();
        assert_ne!(seed1, seed2);
    }

    #[test]
    fn cold_start_scenario_matches_hand_computed_seed() {
        let d1 = [1u8; 32];
        let d2 = [2u8; 32];
        let d3 = [3u8; 32];

        let mut pool = EntropyPool::new();
        pool.absorb(&d1).unwrap();
        pool.absorb(&d2).unwrap();
        pool.absorb(&d3).unwrap();

        let z = [0u8; 64];
        let p1 = h512(&[&z, &d1]);
        let p2 = h512(&[&p1, &d2]);
        let p3 = h512(&[&p2, &d3]);
        let expected_seed = h512(&[&p3, DOMAIN_SEED]);

        assert_eq!(pool.emit_seed().unwrap(), expected_seed);
    }
}
