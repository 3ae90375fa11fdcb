//! Lookup and inspect CLI commands
//!
//! Work on JSON lookup tables produced by `generate --format json`.

use std::path::Path;

use crate::config::{GeneratorSettings, MasterMaterial};
use crate::crypto::envelope;
use crate::error::{SealError, SealResult};
use crate::lookup::KeyTable;

/// Status of one table entry in `inspect` output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Envelope has a valid shape; decryption not attempted
    WellFormed,
    /// Envelope does not parse
    Malformed,
    /// Decrypts with the current master material
    Ok,
    /// Does not decrypt with the current master material
    Unavailable,
}

impl EntryStatus {
    fn label(self) -> &'static str {
        match self {
            Self::WellFormed => "well-formed",
            Self::Malformed => "MALFORMED",
            Self::Ok => "ok",
            Self::Unavailable => "UNAVAILABLE",
        }
    }
}

/// One row of `inspect` output
#[derive(Debug, Clone)]
pub struct EntrySummary {
    pub name: String,
    pub ciphertext_bytes: Option<usize>,
    pub status: EntryStatus,
}

/// Handle `sealed-keys lookup`
pub fn handle_lookup_command(
    settings: &GeneratorSettings,
    table_path: &Path,
    name: &str,
) -> SealResult<()> {
    let table = KeyTable::load(table_path)?;
    let master = MasterMaterial::from_env_with(&settings.master)?;

    match table.get_key(name, &master) {
        Some(secret) => {
            println!("{}", secret.expose());
            Ok(())
        }
        None => Err(SealError::Unavailable(name.to_string())),
    }
}

/// Handle `sealed-keys inspect`
pub fn handle_inspect_command(
    settings: &GeneratorSettings,
    table_path: &Path,
    verify: bool,
) -> SealResult<()> {
    let table = KeyTable::load(table_path)?;
    let master = if verify {
        Some(MasterMaterial::from_env_with(&settings.master)?)
    } else {
        None
    };

    let summaries = summarize(&table, master.as_ref());

    println!("Lookup table: {}", table_path.display());
    if let Some(generated_at) = table.generated_at {
        println!("Generated:    {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    println!();
    print!("{}", format_summaries(&summaries));

    let failed = summaries
        .iter()
        .filter(|s| matches!(s.status, EntryStatus::Malformed | EntryStatus::Unavailable))
        .count();
    if failed > 0 {
        println!();
        println!("{} of {} entries cannot be used.", failed, summaries.len());
    }

    Ok(())
}

/// Summarize every entry, decrypting when master material is supplied
pub fn summarize(table: &KeyTable, master: Option<&MasterMaterial>) -> Vec<EntrySummary> {
    table
        .names()
        .map(|name| {
            let raw = table.envelope(name).unwrap_or_default();
            let parts = envelope::parse(raw)
                .and_then(|parts| parts.check_lengths().map(|_| parts))
                .ok();
            let status = match (&parts, master) {
                (None, _) => EntryStatus::Malformed,
                (Some(_), None) => EntryStatus::WellFormed,
                (Some(_), Some(master)) => {
                    if table.get_key(name, master).is_some() {
                        EntryStatus::Ok
                    } else {
                        EntryStatus::Unavailable
                    }
                }
            };

            EntrySummary {
                name: name.to_string(),
                ciphertext_bytes: parts.map(|p| p.ciphertext.len()),
                status,
            }
        })
        .collect()
}

/// Format entry summaries as an aligned table
pub fn format_summaries(summaries: &[EntrySummary]) -> String {
    if summaries.is_empty() {
        return "No entries found.\n".to_string();
    }

    let name_width = summaries
        .iter()
        .map(|s| s.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>10}  {}\n",
        "Name",
        "Ciphertext",
        "Status",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->10}  {:-<11}\n",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for summary in summaries {
        let bytes = summary
            .ciphertext_bytes
            .map(|b| format!("{} B", b))
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "{:<name_width$}  {:>10}  {}\n",
            summary.name,
            bytes,
            summary.status.label(),
            name_width = name_width,
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{encrypt, Envelope};

    fn master() -> MasterMaterial {
        MasterMaterial::new("pepper1", "secret2", "envsalt3").unwrap()
    }

    fn table() -> KeyTable {
        let mut table = KeyTable::default();
        table.insert("GITHUB_TOKEN", &encrypt("ghp_exampletoken123", &master()).unwrap());
        table.keys.insert("BROKEN".into(), "a:b".into());
        table
    }

    #[test]
    fn test_summarize_without_master() {
        let summaries = summarize(&table(), None);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name, "BROKEN");
        assert_eq!(summaries[0].status, EntryStatus::Malformed);
        assert_eq!(summaries[0].ciphertext_bytes, None);
        assert_eq!(summaries[1].status, EntryStatus::WellFormed);
        assert_eq!(summaries[1].ciphertext_bytes, Some(64));
    }

    #[test]
    fn test_summarize_flags_bad_lengths() {
        let mut table = KeyTable::default();
        table.insert(
            "SHORT_IV",
            &Envelope::from_parts(&[1; 16], &[2; 15], &[3; 64]),
        );
        table.insert(
            "SHORT_SALT",
            &Envelope::from_parts(&[1; 8], &[2; 16], &[3; 64]),
        );

        for summary in summarize(&table, None) {
            assert_eq!(summary.status, EntryStatus::Malformed, "{}", summary.name);
            assert_eq!(summary.ciphertext_bytes, None);
        }
    }

    #[test]
    fn test_summarize_with_master() {
        let summaries = summarize(&table(), Some(&master()));
        assert_eq!(summaries[1].status, EntryStatus::Ok);

        let wrong = MasterMaterial::new("pepper1", "secret2", "WRONGSALT").unwrap();
        let summaries = summarize(&table(), Some(&wrong));
        assert_eq!(summaries[1].status, EntryStatus::Unavailable);
    }

    #[test]
    fn test_format_summaries() {
        let output = format_summaries(&summarize(&table(), None));
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Name"));
        assert!(lines[2].contains("MALFORMED"));
        assert!(lines[3].contains("GITHUB_TOKEN"));
        assert!(lines[3].contains("64 B"));
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(format_summaries(&[]), "No entries found.\n");
    }
}
