// ============================================================
// RECORD NORMALIZER
// ============================================================
// Raw country payloads -> structured records, one failure per record

use serde_json::Value;

use crate::domain::country::{RawCountryRecord, StructuredCountryRecord, NOT_AVAILABLE};
use crate::domain::error::{AppError, Result};

/// Result of normalizing a batch
#[derive(Debug, Default)]
pub struct NormalizedBatch {
    /// Retained records, in input order
    pub records: Vec<StructuredCountryRecord>,

    /// One `RecordError` per skipped input
    pub errors: Vec<AppError>,
}

impl NormalizedBatch {
    pub fn skipped(&self) -> usize {
        self.errors.len()
    }
}

/// Normalize every raw record. A malformed record is logged, reported in
/// `errors` and skipped; it never aborts the batch.
pub fn normalize_countries(raw_records: &[RawCountryRecord]) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();

    for (index, raw) in raw_records.iter().enumerate() {
        match normalize_country(raw) {
            Ok(record) => batch.records.push(record),
            Err(err) => {
                tracing::warn!(index, error = %err, "Skipping country record");
                batch.errors.push(err);
            }
        }
    }

    tracing::debug!(
        retained = batch.records.len(),
        skipped = batch.skipped(),
        "Normalized country batch"
    );
    batch
}

/// Normalize a single raw record
pub fn normalize_country(raw: &RawCountryRecord) -> Result<StructuredCountryRecord> {
    let name = raw
        .get("name")
        .and_then(|n| n.get("common"))
        .and_then(Value::as_str)
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::RecordError("Missing required field name.common".to_string()))?;

    let population = population_field(raw, name)?;
    let area = area_field(raw, name)?;
    let region = text_field(raw, "region", name)?;
    let subregion = text_field(raw, "subregion", name)?;
    let languages = languages_field(raw, name)?;
    let currencies = currencies_field(raw, name)?;

    Ok(StructuredCountryRecord::new(
        name.to_string(),
        population,
        area,
        region,
        subregion,
        languages,
        currencies,
    ))
}

/// Absent and `null` both mean "not provided"
fn present<'a>(raw: &'a Value, key: &str) -> Option<&'a Value> {
    raw.get(key).filter(|v| !v.is_null())
}

fn population_field(raw: &Value, name: &str) -> Result<u64> {
    let Some(value) = present(raw, "population") else {
        return Ok(0);
    };

    if let Some(count) = value.as_u64() {
        return Ok(count);
    }

    // Some payloads carry whole numbers as floats
    match value.as_f64() {
        Some(count) if count >= 0.0 && count.fract() == 0.0 && count <= u64::MAX as f64 => {
            Ok(count as u64)
        }
        _ => Err(AppError::RecordError(format!(
            "{}: population must be a non-negative integer, got {}",
            name, value
        ))),
    }
}

fn area_field(raw: &Value, name: &str) -> Result<f64> {
    let Some(value) = present(raw, "area") else {
        return Ok(0.0);
    };

    // Negative areas are kept as given; their density comes out as 0
    match value.as_f64() {
        Some(area) if area.is_finite() => Ok(area),
        _ => Err(AppError::RecordError(format!(
            "{}: area must be a number, got {}",
            name, value
        ))),
    }
}

fn text_field(raw: &Value, key: &str, name: &str) -> Result<String> {
    match present(raw, key) {
        None => Ok(NOT_AVAILABLE.to_string()),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(AppError::RecordError(format!(
            "{}: {} must be text, got {}",
            name, key, other
        ))),
    }
}

/// Display names (map values, not codes) joined with ", "
fn languages_field(raw: &Value, name: &str) -> Result<String> {
    let Some(value) = present(raw, "languages") else {
        return Ok(NOT_AVAILABLE.to_string());
    };

    let languages = value.as_object().ok_or_else(|| {
        AppError::RecordError(format!("{}: languages must be a mapping", name))
    })?;

    let names = languages
        .values()
        .map(|language| {
            language.as_str().ok_or_else(|| {
                AppError::RecordError(format!("{}: language name must be text", name))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(join_or_default(names))
}

/// `CODE (display name)` pairs joined with ", "
fn currencies_field(raw: &Value, name: &str) -> Result<String> {
    let Some(value) = present(raw, "currencies") else {
        return Ok(NOT_AVAILABLE.to_string());
    };

    let currencies = value.as_object().ok_or_else(|| {
        AppError::RecordError(format!("{}: currencies must be a mapping", name))
    })?;

    let pairs = currencies
        .iter()
        .map(|(code, info)| {
            info.get("name")
                .and_then(Value::as_str)
                .map(|display| format!("{} ({})", code, display))
                .ok_or_else(|| {
                    AppError::RecordError(format!(
                        "{}: currency {} has no display name",
                        name, code
                    ))
                })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(join_or_default(pairs))
}

fn join_or_default<S: AsRef<str>>(parts: Vec<S>) -> String {
    if parts.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        parts
            .iter()
            .map(|p| p.as_ref())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
