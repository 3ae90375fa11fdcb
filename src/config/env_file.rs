//! Env file parsing
//!
//! Reads dotenv files such as `.env.production` with `dotenvy`, so quoting,
//! `export` prefixes, comments and `${VAR}` substitution behave the way the
//! rest of the dotenv ecosystem does. Values are held in zeroizing buffers
//! and the raw file contents are scrubbed once parsed.

use std::collections::BTreeMap;
use std::path::Path;

use crate::crypto::{scrub, SecretString};
use crate::error::{SealError, SealResult};

/// Parsed variables from an env file
#[derive(Debug, Default)]
pub struct EnvFile {
    vars: BTreeMap<String, SecretString>,
}

impl EnvFile {
    /// Read and parse an env file
    pub fn load(path: &Path) -> SealResult<Self> {
        let mut contents = std::fs::read_to_string(path).map_err(|e| {
            SealError::Io(format!("Failed to read env file {}: {}", path.display(), e))
        })?;
        let parsed = Self::parse(&contents).map_err(|e| match e {
            SealError::Config(msg) => {
                SealError::Config(format!("{} in {}", msg, path.display()))
            }
            other => other,
        });
        scrub(&mut contents);
        parsed
    }

    /// Parse env file contents
    ///
    /// Later definitions of the same name win.
    pub fn parse(contents: &str) -> SealResult<Self> {
        let mut vars = BTreeMap::new();

        for item in dotenvy::from_read_iter(contents.as_bytes()) {
            let (key, value) = item.map_err(|e| match e {
                dotenvy::Error::LineParse(_, index) => SealError::Config(format!(
                    "Invalid env file syntax at byte {}",
                    index
                )),
                other => SealError::Config(format!("Invalid env file: {}", other)),
            })?;
            vars.insert(key, SecretString::from(value));
        }

        Ok(Self { vars })
    }

    /// Look up a variable, treating blank values as absent
    pub fn get(&self, key: &str) -> Option<&SecretString> {
        self.vars.get(key).filter(|v| !v.is_blank())
    }

    /// Number of variables defined
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Check if no variables were defined
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Variable names, sorted
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }
}
