//! Cryptographic core for sealed-keys
//!
//! Provides AES-256-CBC envelope encryption with PBKDF2-HMAC-SHA256 key
//! derivation and an HMAC-SHA256 integrity tag, plus the zero-on-drop
//! buffers that hold secrets while they are in use.

pub mod encryption;
pub mod envelope;
pub mod key_derivation;
pub mod keygen;
pub mod secure_memory;

pub use encryption::{decrypt, decrypt_envelope, encrypt};
pub use envelope::{Envelope, EnvelopeParts};
pub use key_derivation::{derive_key, DerivedKey, KEY_LEN, PBKDF2_ITERATIONS, SALT_LEN};
pub use keygen::{generate_secret, SecretEncoding};
pub use secure_memory::{scrub, SecretString};
