// ============================================================
// CHART SPEC
// ============================================================
// What to draw; the renderer decides how

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
}

impl FromStr for ChartKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bar" | "bars" | "barras" => Ok(ChartKind::Bar),
            "line" | "lines" | "lineas" => Ok(ChartKind::Line),
            other => Err(AppError::ChartError(format!(
                "Invalid chart kind '{}'. Use 'bar' or 'line'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartKind::Bar => write!(f, "bar"),
            ChartKind::Line => write!(f, "line"),
        }
    }
}

/// Labels and kind of a chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: &str, x_label: &str, y_label: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
        }
    }

    /// Lowercased title with spaces replaced by underscores, plus `.png`
    pub fn file_name(&self) -> String {
        format!("{}.png", self.title.to_lowercase().replace(' ', "_"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_from_title() {
        let spec = ChartSpec::new(ChartKind::Bar, "Top 10 Countries by Población", "Country", "Population");
        assert_eq!(spec.file_name(), "top_10_countries_by_población.png");
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("bar".parse::<ChartKind>().unwrap(), ChartKind::Bar);
        assert_eq!("LINE".parse::<ChartKind>().unwrap(), ChartKind::Line);
        assert_eq!("barras".parse::<ChartKind>().unwrap(), ChartKind::Bar);
    }

    #[test]
    fn test_invalid_kind_is_chart_error() {
        let err = "pie".parse::<ChartKind>().unwrap_err();
        assert!(matches!(err, AppError::ChartError(_)));
    }
}
