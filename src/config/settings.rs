//! Generator settings for sealed-keys
//!
//! Which secrets to read from the env file, what to publish them as, where
//! the master material lives, and what kind of lookup module to emit.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::master::{DEFAULT_PEPPER_VAR, DEFAULT_SALT_VAR, DEFAULT_SECRET_KEY_VAR};
use crate::error::SealError;
use crate::storage::file_io::write_json_atomic;

/// Default settings file name, looked up in the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "sealed-keys.json";

/// Kind of lookup module written by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Rust source with a const table and a `get_key` accessor
    #[default]
    Rust,
    /// JSON document loadable by `lookup::KeyTable`
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rust => write!(f, "rust"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = SealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rust" | "rs" => Ok(Self::Rust),
            "json" => Ok(Self::Json),
            other => Err(SealError::Config(format!("Unknown output format: {}", other))),
        }
    }
}

/// A secret to protect: read from `source` in the env file, published as `name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretSpec {
    /// Name in the generated lookup table
    pub name: String,
    /// Variable name in the env file
    pub source: String,
}

impl SecretSpec {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// Environment variable names for the master material
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterVars {
    #[serde(default = "default_pepper_var")]
    pub pepper_var: String,
    #[serde(default = "default_secret_key_var")]
    pub secret_key_var: String,
    #[serde(default = "default_salt_var")]
    pub salt_var: String,
}

fn default_pepper_var() -> String {
    DEFAULT_PEPPER_VAR.to_string()
}

fn default_secret_key_var() -> String {
    DEFAULT_SECRET_KEY_VAR.to_string()
}

fn default_salt_var() -> String {
    DEFAULT_SALT_VAR.to_string()
}

impl Default for MasterVars {
    fn default() -> Self {
        Self {
            pepper_var: default_pepper_var(),
            secret_key_var: default_secret_key_var(),
            salt_var: default_salt_var(),
        }
    }
}

impl MasterVars {
    /// The three variable names, pepper first
    pub fn names(&self) -> [&str; 3] {
        [&self.pepper_var, &self.secret_key_var, &self.salt_var]
    }
}

/// Settings for the generation pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Secrets to encrypt, in output order
    #[serde(default = "default_secrets")]
    pub secrets: Vec<SecretSpec>,

    /// Where the master material is read from
    #[serde(default)]
    pub master: MasterVars,

    /// Kind of lookup module to write
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_schema_version() -> u32 {
    1
}

fn default_secrets() -> Vec<SecretSpec> {
    vec![
        SecretSpec::new("GITHUB_TOKEN", "VITE_GITHUB_TOKEN"),
        SecretSpec::new("EMAILJS_SERVICE_ID", "VITE_APP_EMAILJS_SERVICE_ID"),
        SecretSpec::new("EMAILJS_TEMPLATE_ID", "VITE_APP_EMAILJS_TEMPLATE_ID"),
        SecretSpec::new("EMAILJS_PUBLIC_KEY", "VITE_APP_EMAILJS_PUBLIC_KEY"),
    ]
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            secrets: default_secrets(),
            master: MasterVars::default(),
            output_format: OutputFormat::default(),
        }
    }
}

impl GeneratorSettings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_default(path: &Path) -> Result<Self, SealError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            SealError::Io(format!("Failed to read settings file {}: {}", path.display(), e))
        })?;

        let settings: GeneratorSettings = serde_json::from_str(&contents).map_err(|e| {
            SealError::Config(format!(
                "Failed to parse settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, path: &Path) -> Result<(), SealError> {
        self.validate()?;
        write_json_atomic(path, self)
    }

    /// Check names are present and unique
    pub fn validate(&self) -> Result<(), SealError> {
        if self.secrets.is_empty() {
            return Err(SealError::Config("No secrets configured".into()));
        }

        let mut names = HashSet::new();
        for spec in &self.secrets {
            if spec.name.trim().is_empty() || spec.source.trim().is_empty() {
                return Err(SealError::Config(
                    "Secret entries need a non-empty name and source".into(),
                ));
            }
            if !is_identifier(&spec.name) {
                return Err(SealError::Config(format!(
                    "Secret name '{}' must contain only letters, digits and '_'",
                    spec.name
                )));
            }
            if !names.insert(spec.name.as_str()) {
                return Err(SealError::Config(format!(
                    "Duplicate secret name: {}",
                    spec.name
                )));
            }
        }

        for var in self.master.names() {
            if var.trim().is_empty() {
                return Err(SealError::Config(
                    "Master material variable names must not be empty".into(),
                ));
            }
        }

        Ok(())
    }
}

/// Names end up inside generated source, so keep them to identifier characters
fn is_identifier(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
