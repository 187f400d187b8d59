// ============================================================
// COUNTRY RECORDS
// ============================================================
// Canonical per-country entity and the numeric columns it exposes

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::AppError;
use crate::shared::numeric::round2;

/// Country payload exactly as received from the remote source.
/// Fields are looked up defensively; nothing about its shape is guaranteed.
pub type RawCountryRecord = serde_json::Value;

/// Placeholder for absent text fields
pub const NOT_AVAILABLE: &str = "N/A";

/// Population per km², rounded to 2 decimals. Non-positive area yields 0.
pub fn calculate_density(population: f64, area: f64) -> f64 {
    if area > 0.0 {
        round2(population / area)
    } else {
        0.0
    }
}

/// Normalized country row.
///
/// `density` is always derived from `population` and `area_km2` through
/// [`calculate_density`]; there is no setter for it, and deserialized rows
/// recompute it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredCountryRecord")]
pub struct StructuredCountryRecord {
    name: String,
    population: u64,
    area_km2: f64,
    density: f64,
    region: String,
    subregion: String,
    languages: String,
    currencies: String,
}

impl StructuredCountryRecord {
    pub fn new(
        name: String,
        population: u64,
        area_km2: f64,
        region: String,
        subregion: String,
        languages: String,
        currencies: String,
    ) -> Self {
        let density = calculate_density(population as f64, area_km2);
        Self {
            name,
            population,
            area_km2,
            density,
            region,
            subregion,
            languages,
            currencies,
        }
    }

    /// Record with only the identifying and numeric columns set
    pub fn with_counts(name: &str, population: u64, area_km2: f64) -> Self {
        Self::new(
            name.to_string(),
            population,
            area_km2,
            NOT_AVAILABLE.to_string(),
            NOT_AVAILABLE.to_string(),
            NOT_AVAILABLE.to_string(),
            NOT_AVAILABLE.to_string(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn population(&self) -> u64 {
        self.population
    }

    pub fn area_km2(&self) -> f64 {
        self.area_km2
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn subregion(&self) -> &str {
        &self.subregion
    }

    pub fn languages(&self) -> &str {
        &self.languages
    }

    pub fn currencies(&self) -> &str {
        &self.currencies
    }

    /// Value of a numeric column
    pub fn value_of(&self, field: NumericField) -> f64 {
        match field {
            NumericField::Population => self.population as f64,
            NumericField::AreaKm2 => self.area_km2,
            NumericField::Density => self.density,
        }
    }

    /// Column values as display strings, in table column order
    pub fn cells(&self) -> [String; 8] {
        [
            self.name.clone(),
            self.population.to_string(),
            self.area_km2.to_string(),
            self.density.to_string(),
            self.region.clone(),
            self.subregion.clone(),
            self.languages.clone(),
            self.currencies.clone(),
        ]
    }
}

/// Table header labels, in the same order as [`StructuredCountryRecord::cells`]
pub const COLUMN_LABELS: [&str; 8] = [
    "Name",
    "Population",
    "Area (km²)",
    "Density (hab/km²)",
    "Region",
    "Subregion",
    "Languages",
    "Currencies",
];

#[derive(Deserialize)]
struct StoredCountryRecord {
    name: String,
    #[serde(default)]
    population: u64,
    #[serde(default)]
    area_km2: f64,
    #[serde(default = "not_available")]
    region: String,
    #[serde(default = "not_available")]
    subregion: String,
    #[serde(default = "not_available")]
    languages: String,
    #[serde(default = "not_available")]
    currencies: String,
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

impl From<StoredCountryRecord> for StructuredCountryRecord {
    fn from(stored: StoredCountryRecord) -> Self {
        Self::new(
            stored.name,
            stored.population,
            stored.area_km2,
            stored.region,
            stored.subregion,
            stored.languages,
            stored.currencies,
        )
    }
}

/// Numeric columns that statistics, ranking and charts can run on.
/// Deserializes through [`FromStr`], so every accepted alias works in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum NumericField {
    Population,
    AreaKm2,
    Density,
}

impl NumericField {
    /// Canonical field key
    pub fn key(&self) -> &'static str {
        match self {
            NumericField::Population => "population",
            NumericField::AreaKm2 => "area_km2",
            NumericField::Density => "density",
        }
    }

    /// Human-readable column label
    pub fn label(&self) -> &'static str {
        match self {
            NumericField::Population => "Population",
            NumericField::AreaKm2 => "Area (km²)",
            NumericField::Density => "Density (hab/km²)",
        }
    }
}

impl FromStr for NumericField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lowered = trimmed.to_lowercase();
        match lowered.as_str() {
            "population" | "población" => Ok(NumericField::Population),
            "area_km2" | "area" | "area (km²)" | "área (km²)" => Ok(NumericField::AreaKm2),
            "density" | "density (hab/km²)" | "densidad (hab/km²)" => Ok(NumericField::Density),
            "name" | "nombre" | "region" | "región" | "subregion" | "subregión" | "languages"
            | "idiomas" | "currencies" | "monedas" => Err(AppError::StatisticsError(format!(
                "Field '{}' does not hold numeric values",
                trimmed
            ))),
            _ => Err(AppError::StatisticsError(format!(
                "Unknown field '{}'",
                trimmed
            ))),
        }
    }
}

impl TryFrom<String> for NumericField {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for NumericField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_rounds_to_two_decimals() {
        assert_eq!(calculate_density(50_882_891.0, 1_141_748.0), 44.57);
        assert_eq!(calculate_density(10.0, 3.0), 3.33);
    }

    #[test]
    fn test_density_rounding_half_even_on_exact_value() {
        assert_eq!(calculate_density(1.0, 8.0), 0.12);
        assert_eq!(calculate_density(5.0, 8.0), 0.62);
        assert_eq!(calculate_density(3.0, 40.0), 0.07);
        assert_eq!(calculate_density(7.0, 8.0), 0.88);
    }

    #[test]
    fn test_density_zero_area() {
        assert_eq!(calculate_density(1000.0, 0.0), 0.0);
        assert_eq!(calculate_density(1000.0, -5.0), 0.0);
    }

    #[test]
    fn test_record_density_is_derived() {
        let record = StructuredCountryRecord::with_counts("Colombia", 200, 8.0);
        assert_eq!(record.density(), 25.0);
        assert_eq!(record.value_of(NumericField::Density), 25.0);
    }

    #[test]
    fn test_deserialize_recomputes_density() {
        let json = r#"{"name":"Testland","population":100,"area_km2":3.0,"density":999.0}"#;
        let record: StructuredCountryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.density(), 33.33);
        assert_eq!(record.region(), NOT_AVAILABLE);
    }

    #[test]
    fn test_parse_numeric_field() {
        assert_eq!("population".parse::<NumericField>().unwrap(), NumericField::Population);
        assert_eq!("Población".parse::<NumericField>().unwrap(), NumericField::Population);
        assert_eq!("Área (km²)".parse::<NumericField>().unwrap(), NumericField::AreaKm2);
        assert_eq!(" density ".parse::<NumericField>().unwrap(), NumericField::Density);
    }

    #[test]
    fn test_deserialize_field_aliases() {
        let field: NumericField = serde_json::from_str("\"Población\"").unwrap();
        assert_eq!(field, NumericField::Population);
        let field: NumericField = serde_json::from_str("\"area_km2\"").unwrap();
        assert_eq!(field, NumericField::AreaKm2);
        assert!(serde_json::from_str::<NumericField>("\"region\"").is_err());
    }

    #[test]
    fn test_parse_text_field_is_rejected() {
        let err = "region".parse::<NumericField>().unwrap_err();
        assert!(matches!(err, AppError::StatisticsError(msg) if msg.contains("numeric")));
        assert!("altitude".parse::<NumericField>().is_err());
    }
}
