//! Master material generation
//!
//! Produces fresh random strings suitable for the pepper, secret key and
//! environment salt.

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::error::{SealError, SealResult};

use super::secure_memory::SecretString;

/// Default number of random bytes per generated secret
pub const DEFAULT_SECRET_BYTES: usize = 64;

/// Minimum number of random bytes per generated secret
pub const MIN_SECRET_BYTES: usize = 16;

/// Text encoding for generated secrets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecretEncoding {
    #[default]
    Hex,
    Base64,
}

impl fmt::Display for SecretEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex => write!(f, "hex"),
            Self::Base64 => write!(f, "base64"),
        }
    }
}

impl FromStr for SecretEncoding {
    type Err = SealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hex" => Ok(Self::Hex),
            "base64" | "b64" => Ok(Self::Base64),
            other => Err(SealError::Config(format!("Unknown encoding: {}", other))),
        }
    }
}

/// Generate `len` random bytes from the OS and encode them as text
pub fn generate_secret(len: usize, encoding: SecretEncoding) -> SealResult<SecretString> {
    if len < MIN_SECRET_BYTES {
        return Err(SealError::Config(format!(
            "Generated secrets need at least {} bytes, got {}",
            MIN_SECRET_BYTES, len
        )));
    }

    let mut bytes = Zeroizing::new(vec![0u8; len]);
    OsRng.fill_bytes(&mut bytes);

    let encoded = match encoding {
        SecretEncoding::Hex => hex::encode(&*bytes),
        SecretEncoding::Base64 => STANDARD.encode(&*bytes),
    };
    Ok(SecretString::new(encoded))
}
