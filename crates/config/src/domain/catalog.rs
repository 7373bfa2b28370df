//! Service Catalog
//!
//! The declarative rule table the qualification engine interprets:
//! services -> ordered steps -> ordered questions -> weighted options, plus
//! per-option alerts and conditional sub-fields.
//!
//! The built-in catalog is embedded from `config/domains/visa/catalog.yaml`
//! and parsed once per process. It is never mutated after loading.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use visa_crm_core::ServiceKey;

use crate::ConfigError;

const BUILTIN_CATALOG_YAML: &str = include_str!("../../../../config/domains/visa/catalog.yaml");

static BUILTIN_CATALOG: Lazy<Arc<ServiceCatalog>> = Lazy::new(|| {
    match ServiceCatalog::from_yaml_str(BUILTIN_CATALOG_YAML) {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            tracing::error!(
                error = %e,
                "Built-in service catalog failed to parse; using empty catalog"
            );
            Arc::new(ServiceCatalog::default())
        }
    }
});

/// Scoring effect attached to an answer option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EffectClass {
    #[default]
    None,
    /// Highlighted as a strong positive signal; scoring is unaffected
    Boost,
    /// Disqualifies the lead when the option's score is at or below the cutoff
    Disqualify,
}

/// A selectable answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    pub value: String,
    pub score: i32,
    #[serde(default)]
    pub effect: EffectClass,
}

impl AnswerOption {
    pub fn is_disqualifying(&self, cutoff: i32) -> bool {
        self.effect == EffectClass::Disqualify && self.score <= cutoff
    }
}

/// Alert severity / colour category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Red,
    Green,
    Yellow,
    Blue,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
        }
    }
}

/// Informational message shown when a specific option is selected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub text: String,
}

/// Extra free-text field revealed by certain answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubField {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub placeholder: Option<String>,
}

/// Sub-fields together with the answer values that reveal them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubFieldGroup {
    pub show_on_values: Vec<String>,
    pub fields: Vec<SubField>,
}

impl SubFieldGroup {
    pub fn is_triggered_by(&self, value: &str) -> bool {
        self.show_on_values.iter().any(|v| v == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Single choice from a fixed option list
    Options,
    /// Free text answer
    FreeText,
}

/// A single question of a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    /// Short label used on screen and in the summary
    pub text: String,
    /// What the operator reads aloud
    #[serde(default)]
    pub script: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    /// Whether a manual operator note may be attached
    #[serde(default)]
    pub has_note: bool,
    /// Advisory only; advancing is never blocked on it
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
    #[serde(default)]
    pub alerts: BTreeMap<String, Alert>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub sub_fields: Option<SubFieldGroup>,
}

impl Question {
    pub fn is_options(&self) -> bool {
        self.kind == QuestionKind::Options
    }

    pub fn is_free_text(&self) -> bool {
        self.kind == QuestionKind::FreeText
    }

    /// Look up an option by its value
    pub fn option(&self, value: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.value == value)
    }

    pub fn alert_for(&self, value: &str) -> Option<&Alert> {
        self.alerts.get(value)
    }

    /// Sub-fields revealed by `value`, empty when none are
    pub fn sub_fields_for(&self, value: &str) -> &[SubField] {
        match &self.sub_fields {
            Some(group) if group.is_triggered_by(value) => &group.fields,
            _ => &[],
        }
    }
}

/// One wizard step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub title: String,
    #[serde(default)]
    pub hint: String,
    pub questions: Vec<Question>,
}

/// Everything the engine needs to qualify a lead for one service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    pub key: ServiceKey,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    pub steps: Vec<Step>,
}

impl ServiceDefinition {
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// All questions in catalog order (step order, then question order)
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.steps.iter().flat_map(|s| s.questions.iter())
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions().find(|q| q.id == id)
    }

    /// Whether `id` names a sub-field of any question in this service
    pub fn has_sub_field(&self, id: &str) -> bool {
        self.questions()
            .filter_map(|q| q.sub_fields.as_ref())
            .any(|g| g.fields.iter().any(|f| f.id == id))
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    services: Vec<ServiceDefinition>,
}

/// Read-only lookup table of service definitions keyed by service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceCatalog {
    services: BTreeMap<ServiceKey, ServiceDefinition>,
}

impl ServiceCatalog {
    /// The catalog embedded in the binary, shared process-wide
    pub fn builtin() -> Arc<ServiceCatalog> {
        Arc::clone(&BUILTIN_CATALOG)
    }

    /// Load a catalog from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileNotFound(format!("{}: {}", path.display(), e)))?;
        let catalog = Self::from_yaml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            services = catalog.len(),
            "Loaded service catalog"
        );
        Ok(catalog)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("service catalog: {}", e)))?;
        Self::from_services(file.services)
    }

    /// Build a catalog from definitions; each service key may appear once
    pub fn from_services(
        definitions: impl IntoIterator<Item = ServiceDefinition>,
    ) -> Result<Self, ConfigError> {
        let mut services = BTreeMap::new();
        for definition in definitions {
            let key = definition.key;
            if services.insert(key, definition).is_some() {
                return Err(ConfigError::InvalidValue {
                    field: "services".to_string(),
                    message: format!("service '{}' is defined more than once", key),
                });
            }
        }
        Ok(Self { services })
    }

    pub fn service(&self, key: ServiceKey) -> Option<&ServiceDefinition> {
        self.services.get(&key)
    }

    /// Definitions in service-key order
    pub fn services(&self) -> impl Iterator<Item = &ServiceDefinition> {
        self.services.values()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_has_every_service() {
        let catalog = ServiceCatalog::builtin();
        for key in ServiceKey::ALL {
            let service = catalog.service(key).unwrap();
            assert_eq!(service.step_count(), 5, "{} should have 5 steps", key);
        }
    }

    #[test]
    fn test_shared_lists_resolve_through_anchors() {
        let catalog = ServiceCatalog::builtin();
        let schengen = catalog.service(ServiceKey::Schengen).unwrap();
        let spain = catalog.service(ServiceKey::Spain).unwrap();

        let a = schengen.question("ikamet_sch").unwrap();
        let b = spain.question("ikamet_isp").unwrap();
        assert_eq!(a.options, b.options);
        assert_eq!(a.option("istanbul").unwrap().score, 5);

        let ulke = schengen.question("ulke").unwrap();
        assert_eq!(ulke.option("cok_ulke").unwrap().effect, EffectClass::Boost);
    }

    #[test]
    fn test_decision_timing_boosts_early_buyers() {
        let catalog = ServiceCatalog::builtin();
        for (key, qid) in [
            (ServiceKey::Schengen, "ne_zaman_sch"),
            (ServiceKey::Uk, "ne_zaman_ing"),
            (ServiceKey::Us, "ne_zaman_abd"),
        ] {
            let question = catalog.service(key).unwrap().question(qid).unwrap();
            assert_eq!(question.option("hemen").unwrap().effect, EffectClass::Boost);
            assert_eq!(question.option("ay").unwrap().effect, EffectClass::Boost);
            assert_eq!(question.option("2ay").unwrap().effect, EffectClass::None);
            assert_eq!(question.option("hemen").unwrap().score, 12);
        }
    }

    #[test]
    fn test_question_lookup_and_sub_fields() {
        let catalog = ServiceCatalog::builtin();
        let schengen = catalog.service(ServiceKey::Schengen).unwrap();
        let red = schengen.question("red_gecmisi").unwrap();

        assert_eq!(red.sub_fields_for("schengen_red").len(), 2);
        assert!(red.sub_fields_for("yok").is_empty());
        assert!(schengen.has_sub_field("red_ulke"));
        assert!(!schengen.has_sub_field("ulke"));
    }

    #[test]
    fn test_disqualifying_option_needs_cutoff() {
        let catalog = ServiceCatalog::builtin();
        let spain = catalog.service(ServiceKey::Spain).unwrap();
        let amac = spain.question("oturum_amac").unwrap();
        assert!(amac.option("is_aramak").unwrap().is_disqualifying(-10));

        let red = spain.question("red_isp").unwrap().option("red").unwrap();
        assert_eq!(red.effect, EffectClass::Disqualify);
        assert!(!red.is_disqualifying(-10));
    }

    #[test]
    fn test_free_text_question_parses() {
        let catalog = ServiceCatalog::builtin();
        let us = catalog.service(ServiceKey::Us).unwrap();
        let note = us.question("not_abd").unwrap();
        assert!(note.is_free_text());
        assert!(note.options.is_empty());
        assert!(note.placeholder.is_some());
    }

    #[test]
    fn test_duplicate_service_rejected() {
        let yaml = r#"
services:
  - key: uk
    name: "UK Visa"
    steps: []
  - key: uk
    name: "UK Visa again"
    steps: []
"#;
        let err = ServiceCatalog::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(
            &path,
            r#"
services:
  - key: us
    name: "US Visa"
    icon: "🇺🇸"
    steps:
      - id: only
        title: "Only step"
        questions:
          - id: q
            text: "Q"
            type: options
            options:
              - { label: "A", value: "a", score: 3 }
"#,
        )
        .unwrap();

        let catalog = ServiceCatalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.service(ServiceKey::Schengen).is_none());
        let q = catalog.service(ServiceKey::Us).unwrap().question("q").unwrap();
        assert_eq!(q.option("a").unwrap().effect, EffectClass::None);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ServiceCatalog::load("/nonexistent/catalog.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
