//! Catalog Validator
//!
//! Checks a service catalog at startup so broken rule tables are caught
//! before an operator runs into them mid-call. Performs:
//! - Coverage check (every service key has a definition)
//! - Duplicate detection (step ids, question ids, option values)
//! - Reference checks (alert keys and sub-field triggers name real options)
//! - Shape checks (options vs free-text questions)
//! - Range checks (option scores stay within `MAX_OPTION_SCORE_ABS`)

use std::collections::HashSet;

use visa_crm_core::ServiceKey;

use super::catalog::{EffectClass, Question, ServiceCatalog, ServiceDefinition};
use crate::constants::scoring::MAX_OPTION_SCORE_ABS;
use crate::constants::DISQUALIFY_SCORE_THRESHOLD;

/// Validation finding with context
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub category: ValidationCategory,
    /// Service (or catalog section) the finding belongs to
    pub source: String,
    /// Specific step/question/option
    pub field: Option<String>,
    pub message: String,
    pub severity: ValidationSeverity,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let field_str = self.field.as_deref().unwrap_or("(root)");
        write!(
            f,
            "[{:?}] {}/{}: {}",
            self.severity, self.source, field_str, self.message
        )
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationCategory {
    /// Missing required configuration
    MissingRequired,
    /// Alert or sub-field trigger naming an unknown option
    InvalidReference,
    /// Option score outside the accepted range
    ValueOutOfRange,
    /// Duplicate id or value
    Duplicate,
    /// Question shape does not match its type
    SchemaMismatch,
    /// Legal but probably unintended
    Suspicious,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Warning,
    Error,
    /// Breaks scoring or answer storage
    Critical,
}

#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(
        &mut self,
        category: ValidationCategory,
        severity: ValidationSeverity,
        source: &str,
        field: Option<&str>,
        message: String,
    ) {
        self.errors.push(ValidationError {
            category,
            source: source.to_string(),
            field: field.map(str::to_string),
            message,
            severity,
        });
    }

    pub fn add_critical(
        &mut self,
        category: ValidationCategory,
        source: &str,
        field: &str,
        message: String,
    ) {
        self.push(category, ValidationSeverity::Critical, source, Some(field), message);
    }

    pub fn add_reference_error(&mut self, source: &str, field: &str, message: String) {
        self.push(
            ValidationCategory::InvalidReference,
            ValidationSeverity::Error,
            source,
            Some(field),
            message,
        );
    }

    pub fn add_warning(
        &mut self,
        category: ValidationCategory,
        source: &str,
        field: Option<&str>,
        message: String,
    ) {
        self.push(category, ValidationSeverity::Warning, source, field, message);
    }

    /// Passed when nothing critical was found
    pub fn is_ok(&self) -> bool {
        !self
            .errors
            .iter()
            .any(|e| e.severity == ValidationSeverity::Critical)
    }

    pub fn critical_errors(&self) -> Vec<&ValidationError> {
        self.errors
            .iter()
            .filter(|e| e.severity == ValidationSeverity::Critical)
            .collect()
    }

    pub fn warnings(&self) -> Vec<&ValidationError> {
        self.errors
            .iter()
            .filter(|e| e.severity == ValidationSeverity::Warning)
            .collect()
    }

    pub fn summary(&self) -> String {
        let critical = self.critical_errors().len();
        let warnings = self.warnings().len();
        let errors = self.errors.len() - critical - warnings;
        format!(
            "catalog validation: {} critical, {} errors, {} warnings",
            critical, errors, warnings
        )
    }
}

/// Validates a [`ServiceCatalog`]
pub struct CatalogValidator {
    /// Cutoff used to flag `disqualify` options that can never disqualify
    disqualify_at_or_below: i32,
}

impl Default for CatalogValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogValidator {
    pub fn new() -> Self {
        Self {
            disqualify_at_or_below: DISQUALIFY_SCORE_THRESHOLD,
        }
    }

    pub fn with_cutoff(mut self, cutoff: i32) -> Self {
        self.disqualify_at_or_below = cutoff;
        self
    }

    pub fn validate(&self, catalog: &ServiceCatalog) -> ValidationResult {
        let mut result = ValidationResult::new();

        for key in ServiceKey::ALL {
            if catalog.service(key).is_none() {
                result.add_warning(
                    ValidationCategory::MissingRequired,
                    key.as_str(),
                    None,
                    "no definition in catalog; the service cannot be qualified".to_string(),
                );
            }
        }

        for service in catalog.services() {
            self.validate_service(service, &mut result);
        }

        tracing::debug!(
            services = catalog.len(),
            findings = result.errors.len(),
            ok = result.is_ok(),
            "Validated service catalog"
        );
        result
    }

    fn validate_service(&self, service: &ServiceDefinition, result: &mut ValidationResult) {
        let source = service.key.as_str();

        if service.steps.is_empty() {
            result.add_warning(
                ValidationCategory::MissingRequired,
                source,
                None,
                "service has no steps".to_string(),
            );
        }

        let mut step_ids = HashSet::new();
        for step in &service.steps {
            if !step_ids.insert(step.id.as_str()) {
                result.add_critical(
                    ValidationCategory::Duplicate,
                    source,
                    &step.id,
                    "duplicate step id".to_string(),
                );
            }
        }

        // Question ids and sub-field ids share the answer maps
        let mut field_ids = HashSet::new();
        for question in service.questions() {
            if !field_ids.insert(question.id.as_str()) {
                result.add_critical(
                    ValidationCategory::Duplicate,
                    source,
                    &question.id,
                    "duplicate question id".to_string(),
                );
            }
            if let Some(group) = &question.sub_fields {
                for field in &group.fields {
                    if !field_ids.insert(field.id.as_str()) {
                        result.add_critical(
                            ValidationCategory::Duplicate,
                            source,
                            &field.id,
                            "sub-field id collides with another field".to_string(),
                        );
                    }
                }
            }
            self.validate_question(source, question, result);
        }
    }

    fn validate_question(&self, source: &str, question: &Question, result: &mut ValidationResult) {
        let qid = question.id.as_str();

        if question.is_options() && question.options.is_empty() {
            result.add_critical(
                ValidationCategory::SchemaMismatch,
                source,
                qid,
                "options question has no options".to_string(),
            );
        }
        if question.is_free_text() && !question.options.is_empty() {
            result.add_warning(
                ValidationCategory::SchemaMismatch,
                source,
                Some(qid),
                "free-text question declares options; they are ignored".to_string(),
            );
        }

        let mut values = HashSet::new();
        for option in &question.options {
            if !values.insert(option.value.as_str()) {
                result.add_critical(
                    ValidationCategory::Duplicate,
                    source,
                    qid,
                    format!("duplicate option value '{}'", option.value),
                );
            }
            if option.score.checked_abs().map_or(true, |s| s > MAX_OPTION_SCORE_ABS) {
                result.add_critical(
                    ValidationCategory::ValueOutOfRange,
                    source,
                    qid,
                    format!(
                        "option '{}' score {} is outside -{max}..={max}",
                        option.value,
                        option.score,
                        max = MAX_OPTION_SCORE_ABS
                    ),
                );
            }
            let weak_disqualifier = option.effect == EffectClass::Disqualify
                && !option.is_disqualifying(self.disqualify_at_or_below);
            if weak_disqualifier {
                result.add_warning(
                    ValidationCategory::Suspicious,
                    source,
                    Some(qid),
                    format!(
                        "option '{}' is tagged disqualify but its score {} is above \
                         the cutoff {}; it only lowers the score",
                        option.value, option.score, self.disqualify_at_or_below
                    ),
                );
            }
        }

        for key in question.alerts.keys() {
            if question.option(key).is_none() {
                result.add_reference_error(
                    source,
                    qid,
                    format!("alert references unknown option '{}'", key),
                );
            }
        }

        if let Some(group) = &question.sub_fields {
            for value in &group.show_on_values {
                if question.option(value).is_none() {
                    result.add_reference_error(
                        source,
                        qid,
                        format!("sub-field trigger references unknown option '{}'", value),
                    );
                }
            }
        }
    }
}
