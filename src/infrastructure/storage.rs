use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::domain::country::StructuredCountryRecord;
use crate::domain::error::{AppError, Result};

/// Write records as pretty JSON (4-space indent). Non-ASCII text is kept
/// as UTF-8, never `\u` escaped.
pub fn save_json(records: &[StructuredCountryRecord], path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;

    let file = fs::File::create(path).map_err(|e| {
        AppError::IoError(format!("Failed to create {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    records.serialize(&mut serializer)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!(path = %path.display(), count = records.len(), "Saved JSON");
    Ok(())
}

/// Read records previously written by [`save_json`]
pub fn load_json(path: &Path) -> Result<Vec<StructuredCountryRecord>> {
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let records: Vec<StructuredCountryRecord> = serde_json::from_str(&content).map_err(|e| {
        AppError::IoError(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    tracing::info!(path = %path.display(), count = records.len(), "Loaded JSON");
    Ok(records)
}

pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
