// ============================================================
// STATISTICS TYPES
// ============================================================
// Descriptive summary of one numeric column and the mode tie policy

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::country::NumericField;
use super::error::AppError;

/// Descriptive statistics of one numeric field over one record snapshot.
/// Immutable once produced; recompute to refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub field: NumericField,
    /// Number of values that passed the `> 0` data-quality filter
    pub sample_size: usize,
    /// Arithmetic mean, rounded to 2 decimals
    pub mean: f64,
    /// Middle value of the sorted sample, unrounded
    pub median: f64,
    pub mode: f64,
    /// Sample variance (n - 1), rounded to 2 decimals
    pub variance: f64,
    /// Square root of the unrounded sample variance, rounded to 2 decimals
    pub stdev: f64,
}

impl StatisticsSummary {
    /// Console-friendly rendering
    pub fn to_lines(&self) -> Vec<String> {
        vec![
            format!("Field: {}", self.field.label()),
            format!("Values: {}", self.sample_size),
            format!("Mean: {}", self.mean),
            format!("Median: {}", self.median),
            format!("Mode: {}", self.mode),
            format!("Variance: {}", self.variance),
            format!("Standard deviation: {}", self.stdev),
        ]
    }
}

/// How the mode is chosen when no single value is the most frequent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeTieBreak {
    /// A unique most frequent value is required; anything else is an error
    #[default]
    Strict,
    /// First value, in input order, that reaches the highest count
    FirstSeen,
    /// Smallest of the values sharing the highest count
    Smallest,
}

impl FromStr for ModeTieBreak {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(ModeTieBreak::Strict),
            "first_seen" | "first-seen" => Ok(ModeTieBreak::FirstSeen),
            "smallest" => Ok(ModeTieBreak::Smallest),
            other => Err(AppError::ConfigError(format!(
                "Unknown mode tie-break '{}'. Use strict, first_seen or smallest",
                other
            ))),
        }
    }
}
