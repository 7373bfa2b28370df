//! Configuration management for the qualification desk
//!
//! Supports loading configuration from:
//! - YAML files under `config/` (`default`, then per-environment)
//! - Environment variables (`VISA_CRM__` prefix, `__` separator)
//!
//! # Domain Configuration
//!
//! The service catalog lives in `config/domains/visa/catalog.yaml` and is
//! embedded into the binary; `catalog.path` points at a replacement file.

pub mod constants;
pub mod domain;
pub mod settings;

pub use constants::DISQUALIFY_SCORE_THRESHOLD;
pub use domain::{
    ActionThresholds, Alert, AlertSeverity, AnswerOption, CatalogValidator, EffectClass, Question,
    QuestionKind, ScoringConfig, ServiceCatalog, ServiceDefinition, Step, SubField, SubFieldGroup,
    TemperatureThresholds, ValidationCategory, ValidationError, ValidationResult,
    ValidationSeverity,
};
pub use settings::{
    load_settings, load_settings_from, CatalogSettings, ObservabilityConfig, RuntimeEnvironment,
    Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
