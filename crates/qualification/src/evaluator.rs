//! Score & disqualification evaluation
//!
//! Both values are derived from the answer map on every call and never
//! stored. Traversal follows catalog order (steps, then questions), so the
//! first disqualifying answer in that order is the one reported.

use serde::{Deserialize, Serialize};

use visa_crm_config::{ServiceDefinition, DISQUALIFY_SCORE_THRESHOLD};
use visa_crm_core::AnswerMap;

/// The answer that disqualified a lead
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disqualification {
    pub question_id: String,
    pub option_value: String,
}

impl Disqualification {
    /// `"{question_id}:{option_value}"`
    pub fn reason(&self) -> String {
        format!("{}:{}", self.question_id, self.option_value)
    }

    /// Explanation the operator can read to the customer
    pub fn message(&self) -> &'static str {
        disqualification_message(&self.option_value)
    }
}

/// Result of evaluating an answer set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: i32,
    pub disqualification: Option<Disqualification>,
}

impl Evaluation {
    pub fn is_disqualified(&self) -> bool {
        self.disqualification.is_some()
    }

    pub fn reason(&self) -> Option<String> {
        self.disqualification.as_ref().map(Disqualification::reason)
    }
}

/// Evaluate answers with the standard disqualification cutoff
pub fn evaluate(service: &ServiceDefinition, answers: &AnswerMap) -> Evaluation {
    evaluate_with_cutoff(service, answers, DISQUALIFY_SCORE_THRESHOLD)
}

/// Evaluate answers; a `disqualify` option only counts at or below `cutoff`
///
/// Unanswered questions, free-text questions and answer values that are not
/// options of their question all contribute nothing.
pub fn evaluate_with_cutoff(
    service: &ServiceDefinition,
    answers: &AnswerMap,
    cutoff: i32,
) -> Evaluation {
    let mut evaluation = Evaluation::default();

    for question in service.questions().filter(|q| q.is_options()) {
        let Some(value) = answers.get(&question.id) else {
            continue;
        };
        let Some(option) = question.option(value) else {
            continue;
        };

        evaluation.score = evaluation.score.saturating_add(option.score);

        if evaluation.disqualification.is_none() && option.is_disqualifying(cutoff) {
            evaluation.disqualification = Some(Disqualification {
                question_id: question.id.clone(),
                option_value: option.value.clone(),
            });
        }
    }

    evaluation
}

/// Human-readable reason keyed on the disqualifying option value
pub fn disqualification_message(option_value: &str) -> &'static str {
    match option_value {
        "issiz" => "Unemployed customer: financial sufficiency cannot be shown.",
        "is_aramak" => "A residence permit cannot be obtained to look for work in Europe.",
        "sabika_var" => {
            "Criminal record present: a Spanish residence permit cannot be applied for."
        }
        "dusuk" => "Income requirement not met: roughly 2,400 EUR per month is required.",
        "ogrenci" => "A student profile is not eligible for this service.",
        _ => "This customer profile does not meet the current application criteria.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visa_crm_config::ServiceCatalog;
    use visa_crm_core::ServiceKey;

    fn answers(pairs: &[(&str, &str)]) -> AnswerMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_schengen_score_sums_selected_options() {
        let catalog = ServiceCatalog::builtin();
        let schengen = catalog.service(ServiceKey::Schengen).unwrap();

        let result = evaluate(schengen, &answers(&[("amac", "is"), ("kac_kisi", "3-5")]));
        assert_eq!(result.score, 18);
        assert!(!result.is_disqualified());
        assert_eq!(result.reason(), None);
    }

    #[test]
    fn test_weak_disqualifier_only_lowers_score() {
        let catalog = ServiceCatalog::builtin();
        let schengen = catalog.service(ServiceKey::Schengen).unwrap();

        // "red" is tagged disqualify with score -5
        let result = evaluate(schengen, &answers(&[("onceki_vize", "red")]));
        assert_eq!(result.score, -5);
        assert!(!result.is_disqualified());
    }

    #[test]
    fn test_strong_disqualifier_sets_reason() {
        let catalog = ServiceCatalog::builtin();
        let spain = catalog.service(ServiceKey::Spain).unwrap();

        let result = evaluate(spain, &answers(&[("oturum_amac", "is_aramak")]));
        assert_eq!(result.score, -10);
        assert_eq!(result.reason().as_deref(), Some("oturum_amac:is_aramak"));
    }

    #[test]
    fn test_first_disqualifier_in_catalog_order_wins() {
        let catalog = ServiceCatalog::builtin();
        let spain = catalog.service(ServiceKey::Spain).unwrap();

        // sabika (step 4) is inserted first in the map but meslek_isp (step 3) comes first
        let result = evaluate(
            spain,
            &answers(&[("sabika", "sabika_var"), ("meslek_isp", "issiz")]),
        );
        let disq = result.disqualification.unwrap();
        assert_eq!(disq.question_id, "meslek_isp");
        assert_eq!(result.score, -110);
        assert_eq!(disq.message(), disqualification_message("issiz"));
    }

    #[test]
    fn test_unknown_values_contribute_nothing() {
        let catalog = ServiceCatalog::builtin();
        let uk = catalog.service(ServiceKey::Uk).unwrap();

        let result = evaluate(
            uk,
            &answers(&[("ing_amac", "mars"), ("nope", "x"), ("not_ing", "hello")]),
        );
        assert_eq!(result, Evaluation::default());
    }

    #[test]
    fn test_cutoff_is_tunable() {
        let catalog = ServiceCatalog::builtin();
        let schengen = catalog.service(ServiceKey::Schengen).unwrap();
        let result = evaluate_with_cutoff(schengen, &answers(&[("onceki_vize", "red")]), -5);
        assert!(result.is_disqualified());
    }

    #[test]
    fn test_huge_scores_saturate() {
        let catalog = ServiceCatalog::from_yaml_str(
            r#"
services:
  - key: us
    name: "US Visa"
    steps:
      - id: a
        title: "A"
        questions:
          - id: q1
            text: "Q1"
            type: options
            options: [{ label: "Big", value: "big", score: 2000000000 }]
          - id: q2
            text: "Q2"
            type: options
            options:
              - { label: "Big", value: "big", score: 2000000000 }
              - { label: "Low", value: "low", score: -2000000000, effect: disqualify }
"#,
        )
        .unwrap();
        let us = catalog.service(ServiceKey::Us).unwrap();

        let result = evaluate(us, &answers(&[("q1", "big"), ("q2", "big")]));
        assert_eq!(result.score, i32::MAX);

        let result = evaluate(us, &answers(&[("q1", "big"), ("q2", "low")]));
        assert_eq!(result.score, 0);
        assert_eq!(result.reason().as_deref(), Some("q2:low"));
    }

    #[test]
    fn test_message_fallback() {
        assert!(disqualification_message("red").contains("does not meet"));
    }
}
