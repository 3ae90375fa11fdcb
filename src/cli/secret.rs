//! Encrypt and decrypt CLI commands
//!
//! Both read the master material from the process environment using the
//! variable names from the settings file.

use std::io::BufRead;

use zeroize::Zeroizing;

use crate::config::{GeneratorSettings, MasterMaterial};
use crate::crypto::{decrypt, encrypt, SecretString};
use crate::error::{SealError, SealResult};

/// Initial capacity of the stdin buffer for `encrypt -`
const STDIN_SECRET_CAPACITY: usize = 4096;

/// Handle `sealed-keys encrypt`
///
/// With no argument the secret is prompted for with hidden input; `-` reads
/// one line from stdin.
pub fn handle_encrypt_command(
    settings: &GeneratorSettings,
    plaintext: Option<String>,
) -> SealResult<()> {
    let master = MasterMaterial::from_env_with(&settings.master)?;

    let plaintext = match plaintext {
        Some(p) if p == "-" => read_stdin_line()?,
        Some(p) => SecretString::from(p),
        None => prompt_secret("Secret to encrypt: ")?,
    };

    let envelope = encrypt(&plaintext, &master)?;
    println!("{}", envelope);
    Ok(())
}

/// Handle `sealed-keys decrypt`
pub fn handle_decrypt_command(settings: &GeneratorSettings, envelope: &str) -> SealResult<()> {
    let master = MasterMaterial::from_env_with(&settings.master)?;
    let secret = decrypt(envelope, &master)?;
    println!("{}", secret.expose());
    Ok(())
}

/// Prompt for a secret (hidden input)
fn prompt_secret(prompt: &str) -> SealResult<SecretString> {
    rpassword::prompt_password(prompt)
        .map(SecretString::from)
        .map_err(|e| SealError::Io(format!("Failed to read secret: {}", e)))
}

fn read_stdin_line() -> SealResult<SecretString> {
    let mut line = read_secret_line(std::io::stdin().lock())
        .map_err(|e| SealError::Io(format!("Failed to read secret from stdin: {}", e)))?;
    Ok(SecretString::from(std::mem::take(&mut *line)))
}

/// Read one line without its terminator into a zeroizing buffer.
///
/// A line longer than `STDIN_SECRET_CAPACITY` reallocates and may leave an
/// unzeroed copy of its prefix behind.
fn read_secret_line(mut reader: impl BufRead) -> std::io::Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::with_capacity(STDIN_SECRET_CAPACITY));
    reader.read_line(&mut line)?;

    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(line)
}
