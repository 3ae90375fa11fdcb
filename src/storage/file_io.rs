//! File I/O utilities with atomic writes
//!
//! Output files are either completely written or not touched at all: data
//! goes to a temp file in the target directory, is synced, then renamed over
//! the destination. The temp file is removed on any failure.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::SealError;

/// Read JSON from a file, returning an error if file doesn't exist
pub fn read_json_required<T, P>(path: P) -> Result<T, SealError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(SealError::Io(format!("File not found: {}", path.display())));
    }

    let file = File::open(path)
        .map_err(|e| SealError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| SealError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), SealError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let mut contents = serde_json::to_string_pretty(data)
        .map_err(|e| SealError::Json(format!("Failed to serialize data: {}", e)))?;
    contents.push('\n');
    write_text_atomic(path, &contents)
}

/// Write text to a file atomically (write to temp, then rename)
pub fn write_text_atomic<P: AsRef<Path>>(path: P, contents: &str) -> Result<(), SealError> {
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            SealError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = temp_path_for(path);

    if let Err(e) = write_and_sync(&temp_path, contents) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        SealError::Io(format!("Failed to rename temp file to {}: {}", path.display(), e))
    })?;

    Ok(())
}

fn write_and_sync(temp_path: &Path, contents: &str) -> Result<(), SealError> {
    let file = File::create(temp_path)
        .map_err(|e| SealError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents.as_bytes())
        .map_err(|e| SealError::Io(format!("Failed to write data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| SealError::Io(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| SealError::Io(format!("Failed to sync data: {}", e)))?;

    Ok(())
}

/// Temp file path used while writing `path`
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
