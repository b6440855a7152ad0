//! Credential minting and constant-time verification (C3).
//!
//! The registration key is a process-wide shared secret; the instance token
//! is a per-instance credential minted at registration. Both comparisons use
//! a constant-time equality check so response timing does not leak how many
//! leading bytes of a guess were correct.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Mints ids and tokens and verifies credentials against them.
///
/// Holds the process-wide registration key; constructed once at startup and
/// shared (read-only) by the [`crate::registry::RegistryCore`].
pub struct Credentials {
    registration_key: String,
}

impl Credentials {
    pub fn new(registration_key: String) -> Self {
        Self { registration_key }
    }

    /// A fresh 128-bit random identifier, rendered in canonical textual form.
    pub fn mint_id() -> Uuid {
        Uuid::new_v4()
    }

    /// A cryptographically random token with at least 128 bits of entropy.
    ///
    /// Uses 32 bytes (256 bits) rather than the spec's 128-bit floor —
    /// generous headroom costs nothing here.
    pub fn mint_token() -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Verify a presented registration key against the configured secret.
    pub fn verify_registration_key(&self, presented: &str) -> bool {
        constant_time_eq(&self.registration_key, presented)
    }

    /// Verify a presented instance token against the token bound to a record.
    pub fn validate_token(bound: &str, presented: &str) -> bool {
        constant_time_eq(bound, presented)
    }
}

/// Constant-time string equality.
///
/// Comparing two strings of differing length in plain time already reveals
/// nothing useful (lengths of secrets aren't themselves secret here), but we
/// still avoid a length-dependent early exit on the byte comparison itself by
/// comparing fixed-length SHA-256 digests instead of the raw strings.
fn constant_time_eq(a: &str, b: &str) -> bool {
    let da = Sha256::digest(a.as_bytes());
    let db = Sha256::digest(b.as_bytes());
    let mut diff = 0u8;
    for (x, y) in da.iter().zip(db.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
