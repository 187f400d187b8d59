use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;

use crate::domain::app_config::AppConfig;
use crate::domain::error::{AppError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "country-stats.toml";
pub const ENV_PREFIX: &str = "COUNTRY_STATS_";

/// Resolves [`AppConfig`] from defaults, a TOML file and the environment,
/// in increasing priority.
pub struct ConfigService {
    path: Option<PathBuf>,
}

impl ConfigService {
    /// `path` overrides the default `country-stats.toml`; an explicit path
    /// must exist, the default one is optional.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Result<AppConfig> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "Failed to read .env file");
            }
        }

        let figment = self.figment()?;
        let config: AppConfig = figment
            .extract()
            .map_err(|e| AppError::ConfigError(format!("Failed to load configuration: {}", e)))?;

        config
            .validate()
            .map_err(|e| AppError::ConfigError(format!("Invalid configuration: {}", e)))?;

        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }

    fn figment(&self) -> Result<Figment> {
        let file = match &self.path {
            Some(path) => {
                ensure_exists(path)?;
                path.clone()
            }
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        Ok(Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX)))
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(AppError::ConfigError(format!(
            "Config file not found: {}",
            path.display()
        )))
    }
}
