//! Saved qualification replay
//!
//! A saved qualification is the raw input of one call (service, contact and
//! answers). Replaying it through a fresh session re-derives everything else.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use visa_crm_config::{ScoringConfig, ServiceCatalog};
use visa_crm_core::{AnswerMap, ContactIdentity, ServiceKey};
use visa_crm_qualification::{QualificationSession, TransferConfirmation};

/// Input captured during one call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedQualification {
    pub service: ServiceKey,
    #[serde(default)]
    pub contact: ContactIdentity,
    #[serde(default)]
    pub answers: AnswerMap,
    #[serde(default)]
    pub text_answers: AnswerMap,
    #[serde(default)]
    pub notes: AnswerMap,
    #[serde(default)]
    pub sales_consultant: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl SavedQualification {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
    }

    /// Feed the saved input into a new session and walk it as far as it goes
    ///
    /// Entries the catalog does not know are skipped with a warning.
    pub fn replay(
        &self,
        catalog: Arc<ServiceCatalog>,
        scoring: ScoringConfig,
    ) -> QualificationSession {
        let mut session = QualificationSession::new(catalog, self.service).with_scoring(scoring);
        session.set_contact(self.contact.clone());

        for (question_id, value) in &self.answers {
            if !session.select_option(question_id, value) {
                tracing::warn!(
                    question_id = %question_id,
                    value = %value,
                    "Skipping unknown answer"
                );
            }
        }
        for (field_id, text) in &self.text_answers {
            if !session.set_free_text(field_id, text.as_str()) {
                tracing::warn!(field_id = %field_id, "Skipping unknown free-text field");
            }
        }
        for (question_id, note) in &self.notes {
            if !session.set_note(question_id, note.as_str()) {
                tracing::warn!(
                    question_id = %question_id,
                    "Skipping note on a question without notes"
                );
            }
        }

        while session.advance() {}
        session
    }

    pub fn confirmation(&self, session: &QualificationSession) -> TransferConfirmation {
        TransferConfirmation {
            sales_consultant: self.sales_consultant.clone(),
            source: self.source.clone(),
            ..TransferConfirmation::from_session(session)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visa_crm_qualification::WizardPosition;

    fn saved(json: &str) -> SavedQualification {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_replay_reaches_result() {
        let input = saved(
            r#"{
                "service": "schengen",
                "contact": { "first_name": "Ayşe", "phone": "0532" },
                "answers": { "amac": "is", "kac_kisi": "3-5" },
                "notes": { "amac": "Trade fair" }
            }"#,
        );
        let session = input.replay(ServiceCatalog::builtin(), ScoringConfig::default());
        assert_eq!(session.position(), WizardPosition::Result);
        assert_eq!(session.score(), 18);
        assert_eq!(session.notes().len(), 1);
    }

    #[test]
    fn test_replay_stops_at_disqualifying_step() {
        let input = saved(
            r#"{
                "service": "spain",
                "contact": { "first_name": "Ali", "phone": "0555" },
                "answers": { "oturum_amac": "is_aramak", "bogus": "x" }
            }"#,
        );
        let session = input.replay(ServiceCatalog::builtin(), ScoringConfig::default());
        assert_eq!(session.position(), WizardPosition::Step(0));
        assert!(session.is_disqualified());
        assert_eq!(session.answers().len(), 1);
    }

    #[test]
    fn test_replay_without_contact_stays_at_intake() {
        let input = saved(r#"{ "service": "uk", "answers": { "ing_amac": "is" } }"#);
        let session = input.replay(ServiceCatalog::builtin(), ScoringConfig::default());
        assert_eq!(session.position(), WizardPosition::Intake);
        assert!(!input.confirmation(&session).is_confirmable());
    }
}
