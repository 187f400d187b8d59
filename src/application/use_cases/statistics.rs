// ============================================================
// STATISTICS ENGINE
// ============================================================
// Descriptive statistics over one numeric column, all-or-nothing

use std::collections::HashMap;

use crate::domain::country::{NumericField, StructuredCountryRecord};
use crate::domain::error::{AppError, Result};
use crate::domain::statistics::{ModeTieBreak, StatisticsSummary};
use crate::shared::numeric::{round2, value_key};

/// Computes [`StatisticsSummary`] values
pub struct StatisticsEngine {
    tie_break: ModeTieBreak,
}

impl StatisticsEngine {
    pub fn new(tie_break: ModeTieBreak) -> Self {
        Self { tie_break }
    }

    /// Analyze the column named `field_name`. The name must resolve to a
    /// numeric column; text columns are rejected as a `StatisticsError`.
    pub fn analyze(
        &self,
        records: &[StructuredCountryRecord],
        field_name: &str,
    ) -> Result<StatisticsSummary> {
        let field = field_name.parse::<NumericField>()?;
        self.analyze_field(records, field)
    }

    /// Analyze a numeric column. Only values strictly greater than zero are
    /// considered; zero means "no data" for this pipeline.
    pub fn analyze_field(
        &self,
        records: &[StructuredCountryRecord],
        field: NumericField,
    ) -> Result<StatisticsSummary> {
        let values = extract_values(records, field);
        if values.is_empty() {
            return Err(AppError::StatisticsError(format!(
                "No valid data for field '{}'",
                field
            )));
        }

        let mean = mean(&values);
        let median = median(&values);
        let mode = self.mode(&values)?;
        let variance = sample_variance(&values, mean)?;

        Ok(StatisticsSummary {
            field,
            sample_size: values.len(),
            mean: round2(mean),
            median,
            mode,
            variance: round2(variance),
            stdev: round2(variance.sqrt()),
        })
    }

    fn mode(&self, values: &[f64]) -> Result<f64> {
        // key -> (count, first position)
        let mut counts: HashMap<u64, (usize, usize)> = HashMap::new();
        for (position, value) in values.iter().enumerate() {
            counts
                .entry(value_key(*value))
                .and_modify(|(count, _)| *count += 1)
                .or_insert((1, position));
        }

        let highest = counts.values().map(|(count, _)| *count).max().unwrap_or(0);
        let mut tied: Vec<(usize, f64)> = counts
            .values()
            .filter(|(count, _)| *count == highest)
            .map(|(_, position)| (*position, values[*position]))
            .collect();
        tied.sort_by_key(|(position, _)| *position);

        match (self.tie_break, tied.as_slice()) {
            (_, []) => Err(AppError::StatisticsError("Mode of empty data".to_string())),
            (_, [(_, only)]) => Ok(*only),
            (ModeTieBreak::Strict, _) => Err(AppError::StatisticsError(format!(
                "No unique mode: {} values share the highest frequency ({})",
                tied.len(),
                highest
            ))),
            (ModeTieBreak::FirstSeen, [(_, first), ..]) => Ok(*first),
            (ModeTieBreak::Smallest, _) => Ok(tied
                .iter()
                .map(|(_, value)| *value)
                .fold(f64::INFINITY, f64::min)),
        }
    }
}

impl Default for StatisticsEngine {
    fn default() -> Self {
        Self::new(ModeTieBreak::default())
    }
}

/// Values of `field` that are finite and strictly positive, in record order
pub fn extract_values(records: &[StructuredCountryRecord], field: NumericField) -> Vec<f64> {
    records
        .iter()
        .map(|record| record.value_of(field))
        .filter(|value| value.is_finite() && *value > 0.0)
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn sample_variance(values: &[f64], mean: f64) -> Result<f64> {
    if values.len() < 2 {
        return Err(AppError::StatisticsError(
            "Variance requires at least two data points".to_string(),
        ));
    }

    let squared = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    Ok(squared / (values.len() - 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populations(values: &[u64]) -> Vec<StructuredCountryRecord> {
        values
            .iter()
            .enumerate()
            .map(|(i, p)| StructuredCountryRecord::with_counts(&format!("C{}", i), *p, 10.0))
            .collect()
    }

    #[test]
    fn test_basic_summary() {
        let records = populations(&[10, 20, 20, 30]);
        let summary = StatisticsEngine::default()
            .analyze(&records, "population")
            .unwrap();

        assert_eq!(summary.field, NumericField::Population);
        assert_eq!(summary.sample_size, 4);
        assert_eq!(summary.mean, 20.0);
        assert_eq!(summary.median, 20.0);
        assert_eq!(summary.mode, 20.0);
        assert_eq!(summary.variance, 66.67);
        assert_eq!(summary.stdev, 8.16);
    }

    #[test]
    fn test_three_distinct_values_strict_mode_fails() {
        let records = populations(&[10, 20, 30]);
        let err = StatisticsEngine::new(ModeTieBreak::Strict)
            .analyze(&records, "Población")
            .unwrap_err();

        assert!(matches!(err, AppError::StatisticsError(msg) if msg.contains("No unique mode")));
    }

    #[test]
    fn test_three_distinct_values_first_seen() {
        let records = populations(&[10, 20, 30]);
        let summary = StatisticsEngine::new(ModeTieBreak::FirstSeen)
            .analyze(&records, "Población")
            .unwrap();

        assert_eq!(summary.mean, 20.0);
        assert_eq!(summary.median, 20.0);
        assert_eq!(summary.mode, 10.0);
        assert_eq!(summary.variance, 100.0);
        assert_eq!(summary.stdev, 10.0);
    }

    #[test]
    fn test_smallest_tie_break() {
        let records = populations(&[30, 30, 10, 10, 50]);
        let summary = StatisticsEngine::new(ModeTieBreak::Smallest)
            .analyze(&records, "population")
            .unwrap();
        assert_eq!(summary.mode, 10.0);

        let summary = StatisticsEngine::new(ModeTieBreak::FirstSeen)
            .analyze(&records, "population")
            .unwrap();
        assert_eq!(summary.mode, 30.0);
    }

    #[test]
    fn test_even_length_median_averages_middle_pair() {
        let records = populations(&[1, 1, 3, 8]);
        let summary = StatisticsEngine::default()
            .analyze(&records, "population")
            .unwrap();
        assert_eq!(summary.median, 2.0);
    }

    #[test]
    fn test_zero_values_are_excluded() {
        let records = populations(&[0, 0, 0, 5, 5, 11]);
        let summary = StatisticsEngine::default()
            .analyze(&records, "population")
            .unwrap();

        assert_eq!(summary.sample_size, 3);
        assert_eq!(summary.mean, 7.0);
        assert_eq!(summary.mode, 5.0);
    }

    #[test]
    fn test_empty_input_reports_no_data() {
        let err = StatisticsEngine::default().analyze(&[], "population").unwrap_err();
        assert!(matches!(err, AppError::StatisticsError(msg) if msg.contains("No valid data")));

        let err = StatisticsEngine::default()
            .analyze(&populations(&[0, 0]), "population")
            .unwrap_err();
        assert!(matches!(err, AppError::StatisticsError(_)));
    }

    #[test]
    fn test_single_value_voids_summary() {
        let err = StatisticsEngine::default()
            .analyze(&populations(&[42]), "population")
            .unwrap_err();
        assert!(matches!(err, AppError::StatisticsError(msg) if msg.contains("two data points")));
    }

    #[test]
    fn test_text_field_is_reported() {
        let err = StatisticsEngine::default()
            .analyze(&populations(&[1, 2]), "name")
            .unwrap_err();
        assert!(matches!(err, AppError::StatisticsError(_)));
    }

    #[test]
    fn test_density_field() {
        let records = vec![
            StructuredCountryRecord::with_counts("A", 100, 10.0),
            StructuredCountryRecord::with_counts("B", 100, 10.0),
            StructuredCountryRecord::with_counts("C", 300, 10.0),
            StructuredCountryRecord::with_counts("D", 300, 0.0),
        ];
        let summary = StatisticsEngine::default()
            .analyze_field(&records, NumericField::Density)
            .unwrap();

        assert_eq!(summary.sample_size, 3);
        assert_eq!(summary.mode, 10.0);
        assert_eq!(summary.median, 10.0);
    }
}
