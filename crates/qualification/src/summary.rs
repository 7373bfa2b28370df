//! Qualification summary text
//!
//! One builder serves both the on-screen preview and the clipboard export,
//! so the two always produce the same bytes for the same input.

use chrono::NaiveDateTime;

use visa_crm_config::ServiceDefinition;
use visa_crm_core::{AnswerMap, ContactIdentity};

use crate::alerts::visible_sub_fields;

/// Everything the summary is built from
#[derive(Debug, Clone, Copy)]
pub struct SummaryInput<'a> {
    pub service: &'a ServiceDefinition,
    pub contact: &'a ContactIdentity,
    pub answers: &'a AnswerMap,
    pub text_answers: &'a AnswerMap,
    pub notes: &'a AnswerMap,
    pub score: i32,
    pub temperature_label: &'a str,
    /// Wall-clock time printed on the date line
    pub generated_at: NaiveDateTime,
}

/// Render the summary
///
/// Header lines first, then one entry per answered question in catalog
/// order. Unanswered questions, blank free text and answers that are not
/// options of their question produce no output.
pub fn build_summary(input: &SummaryInput<'_>) -> String {
    let mut text = format!("=== LEAD SUMMARY - {} ===\n", input.service.name);
    text.push_str(&format!(
        "Date: {}\n",
        input.generated_at.format("%d.%m.%Y %H:%M:%S")
    ));
    text.push_str(&format!(
        "Lead score: {} - {}\n",
        input.score, input.temperature_label
    ));

    let contact = input.contact;
    text.push_str(&format!(
        "Customer: {} | {}",
        contact.full_name(),
        contact.phone.trim()
    ));
    let email = contact.email.trim();
    if !email.is_empty() {
        text.push_str(&format!(" | {}", email));
    }
    text.push_str("\n\n");

    for question in input.service.questions() {
        if question.is_free_text() {
            if let Some(answer) = input.text_answers.get(&question.id) {
                if !answer.trim().is_empty() {
                    text.push_str(&format!("[{}]\n{}\n\n", question.text, answer));
                }
            }
            continue;
        }

        let Some(option) = input
            .answers
            .get(&question.id)
            .and_then(|value| question.option(value))
        else {
            continue;
        };
        text.push_str(&format!("{}: {}\n", question.text, option.label));

        if let Some(note) = input.notes.get(&question.id) {
            if !note.trim().is_empty() {
                text.push_str(&format!("  → Note: {}\n", note));
            }
        }

        for field in visible_sub_fields(question, input.answers) {
            if let Some(value) = input.text_answers.get(&field.id) {
                if !value.trim().is_empty() {
                    text.push_str(&format!("  {}: {}\n", field.label, value));
                }
            }
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use visa_crm_config::ServiceCatalog;
    use visa_crm_core::ServiceKey;

    fn map(pairs: &[(&str, &str)]) -> AnswerMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 7)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap()
    }

    #[test]
    fn test_summary_layout() {
        let catalog = ServiceCatalog::builtin();
        let schengen = catalog.service(ServiceKey::Schengen).unwrap();
        let mut contact = ContactIdentity::new("Ayşe", "05321234567");
        contact.last_name = "Yılmaz".into();
        contact.email = "ayse@example.com".into();

        let answers = map(&[
            ("kac_kisi", "3-5"),
            ("amac", "is"),
            ("red_gecmisi", "schengen_red"),
        ]);
        let text_answers = map(&[
            ("red_ulke", "Germany"),
            ("red_kac_ay", "  "),
            ("not_sch", "Prefers morning calls"),
        ]);
        let notes = map(&[("amac", "Trade delegation"), ("kac_kisi", "")]);

        let text = build_summary(&SummaryInput {
            service: schengen,
            contact: &contact,
            answers: &answers,
            text_answers: &text_answers,
            notes: &notes,
            score: 15,
            temperature_label: "Cold lead",
            generated_at: at(),
        });

        let expected = [
            "=== LEAD SUMMARY - Schengen Visa ===\n",
            "Date: 07.03.2026 14:05:09\n",
            "Lead score: 15 - Cold lead\n",
            "Customer: Ayşe Yılmaz | 05321234567 | ayse@example.com\n",
            "\n",
            "Purpose of travel: Business\n",
            "  → Note: Trade delegation\n",
            "Number of travellers: 3-5 people\n",
            "Refusal history: Schengen refusal\n",
            "  Which country refused?: Germany\n",
            "[Additional notes]\n",
            "Prefers morning calls\n",
            "\n",
        ]
        .concat();
        assert_eq!(text, expected);
    }

    #[test]
    fn test_summary_skips_unknown_and_blank() {
        let catalog = ServiceCatalog::builtin();
        let uk = catalog.service(ServiceKey::Uk).unwrap();
        let contact = ContactIdentity::new("Mert", "0555");
        let answers = map(&[("ing_amac", "space_tourism")]);
        let notes = map(&[("ing_amac", "should not appear")]);
        let text_answers = map(&[("not_ing", "   ")]);

        let text = build_summary(&SummaryInput {
            service: uk,
            contact: &contact,
            answers: &answers,
            text_answers: &text_answers,
            notes: &notes,
            score: 0,
            temperature_label: "Not started",
            generated_at: at(),
        });

        assert!(text.ends_with("Customer: Mert | 0555\n\n"));
        assert!(!text.contains("should not appear"));
    }

    #[test]
    fn test_summary_is_deterministic() {
        let catalog = ServiceCatalog::builtin();
        let us = catalog.service(ServiceKey::Us).unwrap();
        let contact = ContactIdentity::new("Deniz", "0544");
        let answers = map(&[("abd_amac", "fuar"), ("abd_vize", "var_yeni")]);
        let empty = AnswerMap::new();
        let input = SummaryInput {
            service: us,
            contact: &contact,
            answers: &answers,
            text_answers: &empty,
            notes: &empty,
            score: 21,
            temperature_label: "Cold lead",
            generated_at: at(),
        };

        assert_eq!(build_summary(&input), build_summary(&input));
    }
}
