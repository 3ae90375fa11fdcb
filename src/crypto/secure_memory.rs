//! Secure memory handling for sensitive data
//!
//! Provides types that securely zero memory on drop to prevent
//! sensitive data from lingering in memory. Zeroing goes through the
//! `zeroize` crate, whose volatile writes the optimizer may not remove.
//!
//! This is best-effort: copies made by the OS (swap, core dumps) or by
//! code outside this crate are out of reach.

use std::fmt;
use std::ops::Deref;

use zeroize::{Zeroize, Zeroizing};

/// Overwrite a buffer holding sensitive material with zeros
pub fn scrub<Z: Zeroize + ?Sized>(buffer: &mut Z) {
    buffer.zeroize();
}

/// A string type that zeros its contents on drop
///
/// Use this for plaintext secrets and master material.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString {
    inner: Zeroizing<String>,
}

impl SecretString {
    /// Create a new SecretString, taking ownership of the buffer
    pub fn new(s: impl Into<String>) -> Self {
        Self {
            inner: Zeroizing::new(s.into()),
        }
    }

    /// Take ownership of a byte buffer that is valid UTF-8.
    ///
    /// On failure the bytes are scrubbed before `None` is returned.
    pub fn from_utf8(bytes: Vec<u8>) -> Option<Self> {
        match String::from_utf8(bytes) {
            Ok(s) => Some(Self::new(s)),
            Err(e) => {
                let mut bytes = e.into_bytes();
                scrub(&mut bytes);
                None
            }
        }
    }

    /// Get the string contents
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// Get the length in bytes
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Check if empty after trimming whitespace
    pub fn is_blank(&self) -> bool {
        self.inner.trim().is_empty()
    }
}

impl Deref for SecretString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl AsRef<str> for SecretString {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// Don't print the contents in Debug output
impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretString")
            .field("len", &self.inner.len())
            .finish()
    }
}

// Don't print the contents in Display output
impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED {} bytes]", self.inner.len())
    }
}
