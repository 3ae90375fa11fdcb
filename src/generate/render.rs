//! Rendering of generated lookup modules
//!
//! Only names and envelopes reach the output; plaintext never does.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::OutputFormat;
use crate::crypto::Envelope;
use crate::error::SealResult;
use crate::lookup::KeyTable;

/// One encrypted entry of the generated table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedSecret {
    pub name: String,
    pub envelope: Envelope,
}

/// Render the lookup module in the requested format
pub fn render(
    format: OutputFormat,
    entries: &[SealedSecret],
    generated_at: DateTime<Utc>,
) -> SealResult<String> {
    match format {
        OutputFormat::Rust => Ok(render_rust(entries, generated_at)),
        OutputFormat::Json => render_json(entries, generated_at),
    }
}

/// Rust source exposing `ENCRYPTED_KEYS` and `get_key`
pub fn render_rust(entries: &[SealedSecret], generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "// @generated by sealed-keys {} at {}. Do not edit.\n",
        env!("CARGO_PKG_VERSION"),
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    out.push_str("//\n");
    out.push_str("// Envelopes are `salt:iv:ciphertext` hex. They only open with the master\n");
    out.push_str("// material that was in effect when this file was generated.\n\n");
    out.push_str("use sealed_keys::lookup::lookup_static;\n");
    out.push_str("use sealed_keys::{MasterMaterial, SecretString};\n\n");

    out.push_str("pub const ENCRYPTED_KEYS: &[(&str, &str)] = &[\n");
    for entry in entries {
        out.push_str(&format!(
            "    ({:?}, {:?}),\n",
            entry.name,
            entry.envelope.as_str()
        ));
    }
    out.push_str("];\n\n");

    out.push_str("/// Decrypt the secret called `name`.\n");
    out.push_str("///\n");
    out.push_str("/// Returns `None` when the name is unknown or the entry cannot be decrypted.\n");
    out.push_str("pub fn get_key(name: &str, master: &MasterMaterial) -> Option<SecretString> {\n");
    out.push_str("    lookup_static(ENCRYPTED_KEYS, name, master)\n");
    out.push_str("}\n");
    out
}

/// JSON document loadable by [`KeyTable::load`]
pub fn render_json(entries: &[SealedSecret], generated_at: DateTime<Utc>) -> SealResult<String> {
    let mut table = KeyTable {
        generated_at: Some(generated_at),
        ..KeyTable::default()
    };
    for entry in entries {
        table.insert(entry.name.clone(), &entry.envelope);
    }

    let mut json = serde_json::to_string_pretty(&table)?;
    json.push('\n');
    Ok(json)
}
