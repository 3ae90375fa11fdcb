//! sealed-keys - build-time protection for API credentials shipped in client bundles
//!
//! Secrets such as a source-control token or messaging-service identifiers
//! are encrypted at build time into `salt:iv:ciphertext` envelopes and
//! embedded in a generated lookup module. At runtime the lookup module
//! decrypts on demand and reports an unavailable secret as `None`.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Master material, generator settings and env file parsing
//! - `crypto`: Key derivation, envelope codec, encryption and secure memory
//! - `error`: Custom error types
//! - `generate`: The env-file-to-lookup-module pipeline
//! - `lookup`: Decrypt-on-demand accessors over generated tables
//! - `storage`: Atomic file output
//!
//! # Example
//!
//! ```rust,ignore
//! use sealed_keys::{crypto, MasterMaterial};
//!
//! let master = MasterMaterial::from_env()?;
//! let envelope = crypto::encrypt("ghp_exampletoken123", &master)?;
//! let secret = crypto::decrypt(envelope.as_str(), &master)?;
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod generate;
pub mod logging;
pub mod lookup;
pub mod storage;

pub use config::MasterMaterial;
pub use crypto::{Envelope, SecretString};
pub use error::{SealError, SealResult};
