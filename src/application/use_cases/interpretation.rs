// ============================================================
// INTERPRETATION ENGINE
// ============================================================
// Turns a statistics summary into a short qualitative narrative

use crate::domain::country::{NumericField, StructuredCountryRecord};
use crate::domain::statistics::StatisticsSummary;

pub const NO_STATISTICS_MESSAGE: &str = "No statistics available to interpret.";

/// Share of the larger central value that mean and median may differ by
/// before the distribution is called asymmetric.
const SKEW_THRESHOLD_RATIO: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skew {
    /// Mean well above the median
    High,
    /// Mean well below the median
    Low,
    Symmetric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispersion {
    High,
    Moderate,
    Low,
}

impl Dispersion {
    fn phrase(&self) -> &'static str {
        match self {
            Dispersion::High => "high dispersion",
            Dispersion::Moderate => "moderate dispersion",
            Dispersion::Low => "low dispersion",
        }
    }
}

/// `|mean - median| > 0.2 * max(mean, median)` marks asymmetry; its
/// direction follows the sign of `mean - median`.
pub fn classify_skew(mean: f64, median: f64) -> Skew {
    let diff = (mean - median).abs();
    let threshold = SKEW_THRESHOLD_RATIO * mean.max(median);

    if diff > threshold {
        if mean > median {
            Skew::High
        } else {
            Skew::Low
        }
    } else {
        Skew::Symmetric
    }
}

/// Coefficient of variation; infinite when the mean is zero
pub fn coefficient_of_variation(stdev: f64, mean: f64) -> f64 {
    if mean != 0.0 {
        stdev / mean
    } else {
        f64::INFINITY
    }
}

pub fn classify_dispersion(cv: f64) -> Dispersion {
    if cv > 1.0 {
        Dispersion::High
    } else if cv > 0.5 {
        Dispersion::Moderate
    } else {
        Dispersion::Low
    }
}

/// First record holding the largest and the smallest value of `field`.
/// Ties keep the earliest record.
pub fn find_extremes(
    records: &[StructuredCountryRecord],
    field: NumericField,
) -> Option<(&StructuredCountryRecord, &StructuredCountryRecord)> {
    let first = records.first()?;

    Some(records.iter().skip(1).fold((first, first), |(max, min), record| {
        let value = record.value_of(field);
        let max = if value > max.value_of(field) { record } else { max };
        let min = if value < min.value_of(field) { record } else { min };
        (max, min)
    }))
}

/// Build the narrative for `summary`.
///
/// The extremes section is added only when `records` is given and
/// `field_name` names the population column.
pub fn interpret(
    summary: Option<&StatisticsSummary>,
    records: Option<&[StructuredCountryRecord]>,
    field_name: &str,
) -> String {
    let Some(summary) = summary else {
        return NO_STATISTICS_MESSAGE.to_string();
    };

    let mut lines = Vec::new();
    lines.push(format!(
        "## Statistics Interpretation: {} ##",
        summary.field.label()
    ));

    let (mean, median) = (summary.mean, summary.median);
    match classify_skew(mean, median) {
        skew @ (Skew::High | Skew::Low) => {
            let tendency = if skew == Skew::High {
                "high asymmetry"
            } else {
                "low asymmetry"
            };
            lines.push(format!(
                "- The **mean** ({}) and the **median** ({}) show {}, indicating that extreme values are pulling the average. \
                 This usually happens when a few countries dominate the global total.",
                mean, median, tendency
            ));
        }
        Skew::Symmetric => {
            lines.push(format!(
                "- The **mean** ({}) and the **median** ({}) are similar, suggesting the distribution is roughly symmetric. \
                 Countries have comparable sizes in this field.",
                mean, median
            ));
        }
    }

    lines.push(format!(
        "- The most frequent value (**mode**) is {}, which may represent a group of countries with similar characteristics.",
        summary.mode
    ));

    let dispersion = classify_dispersion(coefficient_of_variation(summary.stdev, mean));
    lines.push(format!(
        "- The **variance** ({}) and the **standard deviation** ({}) indicate {} among the values. \
         This reflects whether countries are homogeneous (low dispersion) or very diverse (high dispersion).",
        summary.variance,
        summary.stdev,
        dispersion.phrase()
    ));

    let is_population = field_name.parse::<NumericField>().ok() == Some(NumericField::Population);
    if let (true, Some(records)) = (is_population, records) {
        if let Some((max, min)) = find_extremes(records, NumericField::Population) {
            let label = NumericField::Population.label();
            lines.push("\n## Geographic/Demographic Context ##".to_string());
            lines.push(format!(
                "- The country with the highest {} is **{}** ({}).",
                label,
                max.name(),
                max.population()
            ));
            lines.push(format!(
                "- The country with the lowest {} is **{}** ({}).",
                label,
                min.name(),
                min.population()
            ));
        }
    }

    lines.join("\n")
}
