//! Generation pipeline
//!
//! Reads the named secrets from an env file, encrypts each one, and writes
//! the lookup module. The run is all-or-nothing: every secret is encrypted
//! before anything is written, and the output is replaced atomically, so a
//! failure leaves no partial file behind.

pub mod render;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::{EnvFile, GeneratorSettings, MasterMaterial, MasterVars, OutputFormat};
use crate::crypto::{encrypt, SecretString};
use crate::error::{SealError, SealResult};
use crate::storage::file_io::write_text_atomic;

pub use render::{render, SealedSecret};

/// Summary of a successful generation run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Where the lookup module was written
    pub output: PathBuf,
    /// Format of the lookup module
    pub format: OutputFormat,
    /// Names written, in output order
    pub names: Vec<String>,
    /// Timestamp stamped into the output
    pub generated_at: DateTime<Utc>,
}

/// Run the full pipeline: env file in, lookup module out
pub fn run(
    settings: &GeneratorSettings,
    env_file: &Path,
    output: &Path,
    format: OutputFormat,
) -> SealResult<GenerationReport> {
    settings.validate()?;

    info!(env_file = %env_file.display(), "reading secrets");
    let env = EnvFile::load(env_file)?;
    debug!(variables = env.len(), "env file parsed");

    let master = resolve_master(&settings.master, &env)?;
    let sealed = seal_secrets(settings, &env, &master)?;

    let generated_at = Utc::now();
    let contents = render(format, &sealed, generated_at)?;
    write_text_atomic(output, &contents)?;

    info!(
        output = %output.display(),
        %format,
        count = sealed.len(),
        "lookup module written"
    );

    Ok(GenerationReport {
        output: output.to_path_buf(),
        format,
        names: sealed.into_iter().map(|s| s.name).collect(),
        generated_at,
    })
}

/// Resolve master material: the process environment first, then the env file
pub fn resolve_master(vars: &MasterVars, env: &EnvFile) -> SealResult<MasterMaterial> {
    MasterMaterial::from_lookup(vars, |name| {
        std::env::var(name)
            .ok()
            .map(SecretString::from)
            .filter(|v| !v.is_blank())
            .or_else(|| env.get(name).cloned())
    })
}

/// Encrypt every configured secret.
///
/// All missing sources are reported together; an encryption failure names
/// the secret it happened on.
pub fn seal_secrets(
    settings: &GeneratorSettings,
    env: &EnvFile,
    master: &MasterMaterial,
) -> SealResult<Vec<SealedSecret>> {
    let mut missing = Vec::new();
    let mut present = Vec::with_capacity(settings.secrets.len());
    for spec in &settings.secrets {
        match env.get(&spec.source) {
            Some(plaintext) => present.push((spec, plaintext)),
            None => missing.push(spec.source.as_str()),
        }
    }

    if !missing.is_empty() {
        return Err(SealError::Config(format!(
            "Missing required environment variables: {}",
            missing.join(", ")
        )));
    }

    let mut sealed = Vec::with_capacity(present.len());
    for (spec, plaintext) in present {
        let envelope = encrypt(plaintext, master).map_err(|e| e.for_secret(&spec.name))?;
        info!(secret = %spec.name, "encrypted");

        sealed.push(SealedSecret {
            name: spec.name.clone(),
            envelope,
        });
    }

    Ok(sealed)
}
