//! Hash and cipher primitives the wire protocol is defined in terms of.
//!
//! The mixer's pool update and seed split use SHA-512 ("H512" in
//! `spec.md`); the generator's key derivation uses SHA-256 ("H256") and
//! SHA-512; the keystream itself is AES-256 in counter mode. All three
//! mirror `examples/original_source/services/{mixer,generator}_server.py`'s
//! use of `hashlib.sha256`/`sha512` and `cryptography.hazmat`'s AES-CTR.

use aes::Aes256;
use ctr::cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;
use sha2::{Digest, Sha256, Sha512};

/// AES-256-CTR, the concrete counter-mode block cipher backing the
/// generator's keystream (`spec.md` §3, `cipher_state`).
pub type Keystream = Ctr128BE<Aes256>;

/// SHA-256 of the concatenation of all arguments, in order.
pub fn h256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// SHA-512 of the concatenation of all arguments, in order.
pub fn h512(parts: &[&[u8]]) -> [u8; 64] {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Derive `(key, nonce)` for the AES-256-CTR keystream from a 64-byte seed:
/// `key = H256(seed)`, `nonce = H512(seed)[32:48]` (`spec.md` §3).
pub fn derive_key_nonce(seed: &[u8; 64]) -> ([u8; 32], [u8; 16]) {
    let key = h256(&[seed]);
    let wide = h512(&[seed]);
    let mut nonce = [0u8; 16];
    nonce.copy_from_slice(&wide[32..48]);
    (key, nonce)
}

/// Build a fresh keystream cipher instance for `(key, nonce)`.
pub fn new_keystream(key: &[u8; 32], nonce: &[u8; 16]) -> Keystream {
    Keystream::new(key.into(), nonce.into())
}
