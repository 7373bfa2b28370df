//! Qualification domain configuration
//!
//! - `catalog`: the service rule table (`config/domains/visa/catalog.yaml`)
//! - `scoring`: temperature and action tiers
//! - `validator`: startup checks for the rule table

pub mod catalog;
pub mod scoring;
pub mod validator;

pub use catalog::{
    Alert, AlertSeverity, AnswerOption, EffectClass, Question, QuestionKind, ServiceCatalog,
    ServiceDefinition, Step, SubField, SubFieldGroup,
};
pub use scoring::{ActionThresholds, ScoringConfig, TemperatureThresholds};
pub use validator::{
    CatalogValidator, ValidationCategory, ValidationError, ValidationResult, ValidationSeverity,
};
