//! Envelope codec
//!
//! The wire form is `<salt-hex>:<iv-hex>:<ciphertext-hex>`: three lowercase
//! hex fields in fixed order. Hex never contains the separator, so splitting
//! is unambiguous. [`parse`] checks shape only; [`EnvelopeParts::check_lengths`]
//! adds the salt and IV sizes. Contents are checked by decryption.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::{SealError, SealResult};

use super::encryption::IV_LEN;
use super::key_derivation::SALT_LEN;

/// Field separator
pub const SEPARATOR: char = ':';

/// The three decoded fields of an envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeParts {
    pub salt: Zeroizing<Vec<u8>>,
    pub iv: Zeroizing<Vec<u8>>,
    pub ciphertext: Vec<u8>,
}

impl EnvelopeParts {
    /// Reject an IV that is not one block or a salt shorter than the minimum
    pub fn check_lengths(&self) -> SealResult<()> {
        if self.iv.len() != IV_LEN {
            return Err(SealError::MalformedEnvelope(format!(
                "IV must be {} bytes, got {}",
                IV_LEN,
                self.iv.len()
            )));
        }
        if self.salt.len() < SALT_LEN {
            return Err(SealError::MalformedEnvelope(format!(
                "Salt must be at least {} bytes, got {}",
                SALT_LEN,
                self.salt.len()
            )));
        }
        Ok(())
    }
}

/// Format the three fields as an envelope string
pub fn format(salt: &[u8], iv: &[u8], ciphertext: &[u8]) -> String {
    let mut out = String::with_capacity(2 * (salt.len() + iv.len() + ciphertext.len()) + 2);
    out.push_str(&hex::encode(salt));
    out.push(SEPARATOR);
    out.push_str(&hex::encode(iv));
    out.push(SEPARATOR);
    out.push_str(&hex::encode(ciphertext));
    out
}

/// Split an envelope string into its decoded fields
pub fn parse(envelope: &str) -> SealResult<EnvelopeParts> {
    let fields: Vec<&str> = envelope.trim().split(SEPARATOR).collect();
    let [salt, iv, ciphertext] = fields.as_slice() else {
        return Err(SealError::MalformedEnvelope(format!(
            "expected 3 fields separated by '{}', found {}",
            SEPARATOR,
            fields.len()
        )));
    };

    Ok(EnvelopeParts {
        salt: Zeroizing::new(decode_field("salt", salt)?),
        iv: Zeroizing::new(decode_field("iv", iv)?),
        ciphertext: decode_field("ciphertext", ciphertext)?,
    })
}

fn decode_field(label: &str, field: &str) -> SealResult<Vec<u8>> {
    if field.is_empty() {
        return Err(SealError::MalformedEnvelope(format!("{} field is empty", label)));
    }
    hex::decode(field)
        .map_err(|e| SealError::MalformedEnvelope(format!("{} field is not valid hex: {}", label, e)))
}

/// A serialized envelope whose shape has been checked
///
/// Holds only public data (salt, IV, ciphertext), so it is freely
/// cloneable and printable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Envelope(String);

impl Envelope {
    /// Build from raw fields
    pub fn from_parts(salt: &[u8], iv: &[u8], ciphertext: &[u8]) -> Self {
        Self(format(salt, iv, ciphertext))
    }

    /// Get the wire form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the fields
    pub fn parts(&self) -> SealResult<EnvelopeParts> {
        parse(&self.0)
    }

    /// Length of the ciphertext field in bytes
    pub fn ciphertext_len(&self) -> usize {
        self.0
            .rsplit(SEPARATOR)
            .next()
            .map(|field| field.len() / 2)
            .unwrap_or(0)
    }
}

impl FromStr for Envelope {
    type Err = SealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = parse(s)?;
        Ok(Self::from_parts(&parts.salt, &parts.iv, &parts.ciphertext))
    }
}

impl TryFrom<String> for Envelope {
    type Error = SealError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Envelope> for String {
    fn from(envelope: Envelope) -> Self {
        envelope.0
    }
}

impl AsRef<str> for Envelope {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
