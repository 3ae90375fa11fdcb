//! Key derivation using PBKDF2-HMAC-SHA256
//!
//! Derives a single-use AES-256 key from the master material and a
//! per-operation salt. The iteration count and key length are part of the
//! envelope contract: changing either makes every previously generated
//! envelope undecryptable.

use std::fmt;

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::config::MasterMaterial;
use crate::error::{SealError, SealResult};

/// PBKDF2 iteration count
pub const PBKDF2_ITERATIONS: u32 = 10_000;

/// Derived key length in bytes (AES-256)
pub const KEY_LEN: usize = 32;

/// Per-operation salt length in bytes (128 bits)
pub const SALT_LEN: usize = 16;

/// A derived encryption key, zeroed on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKey").field("key", &"[REDACTED]").finish()
    }
}

/// Derive an encryption key from the master material and an operation salt
///
/// The PBKDF2 password is pepper ‖ secret key ‖ environment salt.
pub fn derive_key(master: &MasterMaterial, operation_salt: &[u8]) -> SealResult<DerivedKey> {
    master.validate()?;

    if operation_salt.len() < SALT_LEN {
        return Err(SealError::MalformedEnvelope(format!(
            "Salt must be at least {} bytes, got {}",
            SALT_LEN,
            operation_salt.len()
        )));
    }

    let password = master_password(master);
    let mut key = DerivedKey { key: [0u8; KEY_LEN] };
    pbkdf2_hmac::<Sha256>(&password, operation_salt, PBKDF2_ITERATIONS, &mut key.key);

    Ok(key)
}

fn master_password(master: &MasterMaterial) -> Zeroizing<Vec<u8>> {
    let parts = [master.pepper(), master.secret_key(), master.env_salt()];
    let mut password = Zeroizing::new(Vec::with_capacity(parts.iter().map(|p| p.len()).sum()));
    for part in parts {
        password.extend_from_slice(part.as_bytes());
    }
    password
}
