//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::constants::settings::{DEFAULT_CONFIG_DIR, DEFAULT_LOG_LEVEL, ENV_PREFIX, ENV_SEPARATOR};
use crate::domain::{ScoringConfig, ServiceCatalog};
use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Relaxed validation, warnings only
    #[default]
    Development,
    /// Stricter validation
    Staging,
    /// All validations enforced
    Production,
}

impl RuntimeEnvironment {
    /// Catalog validation errors (not just critical findings) abort startup
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Where the service catalog comes from
    #[serde(default)]
    pub catalog: CatalogSettings,

    /// Temperature / action tiers and the disqualification cutoff
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable ones
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Service catalog source
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogSettings {
    /// YAML file overriding the built-in catalog
    #[serde(default)]
    pub path: Option<String>,
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.observability.log_level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!(
                    "expected one of {}, got '{}'",
                    LOG_LEVELS.join(", "),
                    self.observability.log_level
                ),
            });
        }

        if let Some(path) = &self.catalog.path {
            if path.trim().is_empty() {
                return Err(ConfigError::MissingField("catalog.path".to_string()));
            }
        }

        self.scoring.validate()
    }

    /// The configured catalog file, or the built-in catalog when none is set
    pub fn load_catalog(&self) -> Result<Arc<ServiceCatalog>, ConfigError> {
        match &self.catalog.path {
            Some(path) => Ok(Arc::new(ServiceCatalog::load(path)?)),
            None => Ok(ServiceCatalog::builtin()),
        }
    }
}

/// Load settings from `config/` and the environment
///
/// Sources, lowest priority first: `config/default.*`, `config/{env}.*`,
/// then `VISA_CRM__SECTION__KEY` environment variables.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from(Path::new(DEFAULT_CONFIG_DIR), env)
}

/// Same as [`load_settings`] with an explicit config directory
pub fn load_settings_from(config_dir: &Path, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    let default_file = config_dir.join("default");
    builder = builder.add_source(File::with_name(&default_file.to_string_lossy()).required(false));

    if let Some(env_name) = env {
        let env_file = config_dir.join(env_name);
        builder = builder.add_source(File::with_name(&env_file.to_string_lossy()).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}
