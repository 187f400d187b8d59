// ============================================================
// APPLICATION CONFIGURATION
// ============================================================
// Source endpoint, output locations and analysis defaults

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

use super::country::NumericField;
use super::statistics::ModeTieBreak;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Endpoint returning every country (default: REST Countries v3.1)
    pub source_url: String,

    /// Field list sent as the `fields` query parameter. Accepts a list or
    /// a comma-separated string.
    #[serde(deserialize_with = "list_or_csv")]
    pub request_fields: Vec<String>,

    /// Request timeout in seconds (default: 10)
    pub timeout_secs: u64,

    /// Directory receiving JSON, table and chart files
    pub output_dir: PathBuf,

    pub json_file: String,

    pub table_file: String,

    /// Field analyzed when none is given on the command line
    pub default_field: NumericField,

    pub mode_tie_break: ModeTieBreak,

    pub chart_width: u32,

    pub chart_height: u32,

    /// Rows shown in the console preview before export (default: 5)
    pub preview_rows: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_url: "https://restcountries.com/v3.1/all".to_string(),
            request_fields: [
                "name",
                "population",
                "area",
                "region",
                "subregion",
                "languages",
                "currencies",
            ]
            .iter()
            .map(|f| f.to_string())
            .collect(),
            timeout_secs: 10,
            output_dir: PathBuf::from("output"),
            json_file: "countries.json".to_string(),
            table_file: "countries.xlsx".to_string(),
            default_field: NumericField::Population,
            mode_tie_break: ModeTieBreak::Strict,
            chart_width: 1200,
            chart_height: 600,
            preview_rows: 5,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrCsv {
    List(Vec<String>),
    Csv(String),
}

fn list_or_csv<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match ListOrCsv::deserialize(deserializer)? {
        ListOrCsv::List(items) => items,
        ListOrCsv::Csv(text) => text.split(',').map(str::to_string).collect(),
    };

    Ok(items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}

impl AppConfig {
    pub fn json_path(&self) -> PathBuf {
        self.output_dir.join(&self.json_file)
    }

    pub fn table_path(&self) -> PathBuf {
        self.output_dir.join(&self.table_file)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.source_url.trim().is_empty() {
            return Err("source_url must not be empty".to_string());
        }
        if url::Url::parse(&self.source_url).is_err() {
            return Err(format!("source_url '{}' is not a valid URL", self.source_url));
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be > 0".to_string());
        }
        if self.json_file.trim().is_empty() || self.table_file.trim().is_empty() {
            return Err("json_file and table_file must not be empty".to_string());
        }
        if self.chart_width < 200 || self.chart_height < 200 {
            return Err("chart_width and chart_height must be >= 200".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.json_path(), PathBuf::from("output/countries.json"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = AppConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_request_fields_from_comma_string() {
        let config: AppConfig =
            serde_json::from_str(r#"{"request_fields": "name, area,,population"}"#).unwrap();
        assert_eq!(config.request_fields, vec!["name", "area", "population"]);

        let config: AppConfig = serde_json::from_str(r#"{"request_fields": ["name"]}"#).unwrap();
        assert_eq!(config.request_fields, vec!["name"]);
    }

    #[test]
    fn test_bad_url_rejected() {
        let config = AppConfig {
            source_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().contains("not a valid URL"));
    }
}
