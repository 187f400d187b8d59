use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppError {
    Internal(String),
    ConfigError(String),
    NetworkError(String),
    RecordError(String),
    PatternError(String),
    StatisticsError(String),
    IoError(String),
    ChartError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            AppError::RecordError(msg) => write!(f, "Record error: {}", msg),
            AppError::PatternError(msg) => write!(f, "Pattern error: {}", msg),
            AppError::StatisticsError(msg) => write!(f, "Statistics error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
            AppError::ChartError(msg) => write!(f, "Chart error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::IoError(format!("JSON serialization failed: {}", err))
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::IoError(format!("Table export failed: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
