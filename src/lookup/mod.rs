//! Lookup facade over generated envelope tables
//!
//! Generated modules map logical names to envelopes. Accessors decrypt on
//! demand and degrade to `None` for unknown names, malformed envelopes and
//! decryption failures, so one bad entry cannot take the application down.
//! Callers must treat `None` as "feature disabled".

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::MasterMaterial;
use crate::crypto::{decrypt, Envelope, SecretString};
use crate::error::SealResult;
use crate::storage::file_io::{read_json_required, write_json_atomic};

/// Look a name up in a static table, as emitted into generated Rust modules
pub fn lookup_static(
    table: &[(&str, &str)],
    name: &str,
    master: &MasterMaterial,
) -> Option<SecretString> {
    let (_, envelope) = table.iter().find(|(key, _)| *key == name)?;
    open(name, envelope, master)
}

fn open(name: &str, envelope: &str, master: &MasterMaterial) -> Option<SecretString> {
    match decrypt(envelope, master) {
        Ok(secret) => Some(secret),
        Err(e) => {
            debug!(secret = name, error = %e, "secret unavailable");
            None
        }
    }
}

/// Name → envelope table, as written by the JSON generator output
///
/// Entries are kept as raw strings so that a single corrupted entry does
/// not prevent the rest of the table from loading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyTable {
    /// When the table was generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,

    /// Envelopes by name
    #[serde(default)]
    pub keys: BTreeMap<String, String>,
}

impl KeyTable {
    /// Create an empty table stamped with the current time
    pub fn new() -> Self {
        Self {
            generated_at: Some(Utc::now()),
            keys: BTreeMap::new(),
        }
    }

    /// Build a table from static pairs
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            generated_at: None,
            keys: pairs
                .into_iter()
                .map(|(name, envelope)| (name.to_string(), envelope.to_string()))
                .collect(),
        }
    }

    /// Load a table from a JSON file
    pub fn load(path: &Path) -> SealResult<Self> {
        read_json_required(path)
    }

    /// Save the table to a JSON file atomically
    pub fn save(&self, path: &Path) -> SealResult<()> {
        write_json_atomic(path, self)
    }

    /// Add or replace an entry
    pub fn insert(&mut self, name: impl Into<String>, envelope: &Envelope) {
        self.keys.insert(name.into(), envelope.to_string());
    }

    /// Raw envelope stored under `name`
    pub fn envelope(&self, name: &str) -> Option<&str> {
        self.keys.get(name).map(String::as_str)
    }

    /// Decrypt the secret stored under `name`.
    ///
    /// Returns `None` for an unknown name or an entry that cannot be
    /// decrypted; never fails.
    pub fn get_key(&self, name: &str, master: &MasterMaterial) -> Option<SecretString> {
        let envelope = self.envelope(name)?;
        open(name, envelope, master)
    }

    /// Entry names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
