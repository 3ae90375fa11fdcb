//! Keygen and init-config CLI commands

use std::path::Path;

use crate::config::GeneratorSettings;
use crate::crypto::{generate_secret, SecretEncoding};
use crate::error::{SealError, SealResult};

/// Handle `sealed-keys keygen`
///
/// Prints one `NAME=value` line per master material variable, ready to be
/// pasted into an env file.
pub fn handle_keygen_command(
    settings: &GeneratorSettings,
    bytes: usize,
    encoding: SecretEncoding,
) -> SealResult<()> {
    for var in settings.master.names() {
        let secret = generate_secret(bytes, encoding)?;
        println!("{}={}", var, secret.expose());
    }
    Ok(())
}

/// Handle `sealed-keys init-config`
pub fn handle_init_config_command(path: &Path, force: bool) -> SealResult<()> {
    if path.exists() && !force {
        return Err(SealError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    GeneratorSettings::default().save(path)?;
    println!("Wrote default settings to {}", path.display());
    Ok(())
}
