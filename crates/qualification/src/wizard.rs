//! Qualification wizard session
//!
//! Owns the state of one qualification call: who is on the line, which
//! service is being qualified, where the operator is in the flow and what
//! has been answered. Score, disqualification, temperature, progress and
//! summary are always derived from that state, never stored.
//!
//! Flow: `Intake -> Step(0) -> ... -> Step(N-1) -> Result`.
//! Forward moves are refused while the answers disqualify the lead.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

use visa_crm_config::{ScoringConfig, ServiceCatalog, ServiceDefinition, Step};
use visa_crm_core::{AnswerMap, ContactIdentity, ServiceKey};

use crate::action::{recommend_action_with, RecommendedAction};
use crate::alerts::{active_alerts, ActiveAlert};
use crate::evaluator::{evaluate_with_cutoff, Evaluation};
use crate::summary::{build_summary, SummaryInput};
use crate::temperature::{classify_with, TemperatureInfo};

/// Where the operator is in the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WizardPosition {
    /// Contact identity capture
    #[default]
    Intake,
    /// Step index into the active service
    Step(usize),
    /// Result / summary screen
    Result,
}

impl WizardPosition {
    fn for_index(index: usize, step_count: usize) -> Self {
        if index >= step_count {
            Self::Result
        } else {
            Self::Step(index)
        }
    }
}

/// State of one qualification call
pub struct QualificationSession {
    catalog: Arc<ServiceCatalog>,
    scoring: ScoringConfig,
    service: ServiceKey,
    contact: ContactIdentity,
    position: WizardPosition,
    answers: AnswerMap,
    text_answers: AnswerMap,
    notes: AnswerMap,
    /// UI-only: questions whose note editor is open
    open_notes: BTreeSet<String>,
}

impl QualificationSession {
    pub fn new(catalog: Arc<ServiceCatalog>, service: ServiceKey) -> Self {
        Self {
            catalog,
            scoring: ScoringConfig::default(),
            service,
            contact: ContactIdentity::default(),
            position: WizardPosition::Intake,
            answers: AnswerMap::new(),
            text_answers: AnswerMap::new(),
            notes: AnswerMap::new(),
            open_notes: BTreeSet::new(),
        }
    }

    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    // ---- accessors ----

    pub fn service(&self) -> ServiceKey {
        self.service
    }

    /// Definition of the active service; `None` if the catalog lacks it
    pub fn service_definition(&self) -> Option<&ServiceDefinition> {
        self.catalog.service(self.service)
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    pub fn contact(&self) -> &ContactIdentity {
        &self.contact
    }

    pub fn contact_mut(&mut self) -> &mut ContactIdentity {
        &mut self.contact
    }

    pub fn set_contact(&mut self, contact: ContactIdentity) {
        self.contact = contact;
    }

    pub fn position(&self) -> WizardPosition {
        self.position
    }

    /// Number of steps of the active service (0 when it is not configured)
    pub fn step_count(&self) -> usize {
        self.service_definition().map_or(0, |s| s.step_count())
    }

    pub fn current_step(&self) -> Option<&Step> {
        match self.position {
            WizardPosition::Step(i) => self.service_definition()?.steps.get(i),
            _ => None,
        }
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn text_answers(&self) -> &AnswerMap {
        &self.text_answers
    }

    pub fn notes(&self) -> &AnswerMap {
        &self.notes
    }

    pub fn is_note_open(&self, question_id: &str) -> bool {
        self.open_notes.contains(question_id)
    }

    // ---- derived state ----

    pub fn evaluation(&self) -> Evaluation {
        match self.service_definition() {
            Some(service) => {
                evaluate_with_cutoff(service, &self.answers, self.scoring.disqualify_at_or_below)
            }
            None => Evaluation::default(),
        }
    }

    pub fn score(&self) -> i32 {
        self.evaluation().score
    }

    pub fn is_disqualified(&self) -> bool {
        self.evaluation().is_disqualified()
    }

    pub fn temperature(&self) -> TemperatureInfo {
        let evaluation = self.evaluation();
        classify_with(
            &self.scoring.temperature,
            evaluation.score,
            evaluation.is_disqualified(),
        )
    }

    pub fn recommended_action(&self) -> RecommendedAction {
        let evaluation = self.evaluation();
        recommend_action_with(
            &self.scoring.action,
            evaluation.score,
            evaluation.is_disqualified(),
        )
    }

    /// Explanation for the current disqualification, if any
    pub fn disqualification_message(&self) -> Option<&'static str> {
        self.evaluation().disqualification.map(|d| d.message())
    }

    /// Alerts triggered by the current answers, in catalog order
    pub fn alerts(&self) -> Vec<ActiveAlert<'_>> {
        match self.service_definition() {
            Some(service) => active_alerts(service, &self.answers),
            None => Vec::new(),
        }
    }

    /// 0 at intake, 100 on the result screen, rounded step share otherwise
    pub fn progress_percent(&self) -> u32 {
        let total = self.step_count();
        match self.position {
            WizardPosition::Intake => 0,
            WizardPosition::Result => 100,
            WizardPosition::Step(_) if total == 0 => 100,
            WizardPosition::Step(i) => ((200 * (i + 1) + total) / (2 * total)) as u32,
        }
    }

    /// `"k / N"` companion to [`progress_percent`](Self::progress_percent)
    pub fn progress_text(&self) -> String {
        let total = self.step_count();
        let done = match self.position {
            WizardPosition::Intake => 0,
            WizardPosition::Step(i) => i + 1,
            WizardPosition::Result => total,
        };
        format!("{} / {}", done, total)
    }

    /// Summary text; `None` when the active service is not configured
    pub fn summary(&self, generated_at: NaiveDateTime) -> Option<String> {
        let service = self.service_definition()?;
        let evaluation = self.evaluation();
        let temperature = classify_with(
            &self.scoring.temperature,
            evaluation.score,
            evaluation.is_disqualified(),
        );
        Some(build_summary(&SummaryInput {
            service,
            contact: &self.contact,
            answers: &self.answers,
            text_answers: &self.text_answers,
            notes: &self.notes,
            score: evaluation.score,
            temperature_label: temperature.label,
            generated_at,
        }))
    }

    // ---- transitions ----

    /// Whether [`advance`](Self::advance) would move
    pub fn can_advance(&self) -> bool {
        match self.position {
            WizardPosition::Intake => self.contact.is_complete(),
            WizardPosition::Step(_) => !self.is_disqualified(),
            WizardPosition::Result => false,
        }
    }

    /// Move forward one screen; returns false when the move is refused
    pub fn advance(&mut self) -> bool {
        let from = self.position;
        let next = match from {
            WizardPosition::Intake => {
                if !self.contact.is_complete() {
                    tracing::debug!(
                        service = %self.service,
                        "Advance refused: name and phone required"
                    );
                    return false;
                }
                WizardPosition::for_index(0, self.step_count())
            }
            WizardPosition::Step(i) => {
                if let Some(d) = self.evaluation().disqualification {
                    tracing::debug!(
                        service = %self.service,
                        reason = %d.reason(),
                        "Advance refused: lead is disqualified"
                    );
                    return false;
                }
                WizardPosition::for_index(i + 1, self.step_count())
            }
            WizardPosition::Result => return false,
        };

        self.position = next;
        tracing::debug!(service = %self.service, ?from, to = ?next, "Wizard advanced");
        true
    }

    /// Move back one screen; returns false at intake
    pub fn back(&mut self) -> bool {
        let from = self.position;
        let prev = match from {
            WizardPosition::Intake => return false,
            WizardPosition::Step(0) => WizardPosition::Intake,
            WizardPosition::Step(i) => WizardPosition::Step(i - 1),
            WizardPosition::Result => match self.step_count() {
                0 => WizardPosition::Intake,
                n => WizardPosition::Step(n - 1),
            },
        };

        self.position = prev;
        tracing::debug!(service = %self.service, ?from, to = ?prev, "Wizard moved back");
        true
    }

    /// Jump back to intake to correct the contact, keeping all answers
    pub fn edit_contact(&mut self) {
        self.position = WizardPosition::Intake;
    }

    /// Clear everything, including the contact identity
    pub fn reset(&mut self) {
        self.contact = ContactIdentity::default();
        self.clear_collected();
        tracing::debug!(service = %self.service, "Qualification reset");
    }

    /// Start over on another service, keeping the contact identity
    pub fn switch_service(&mut self, service: ServiceKey) {
        let from = self.service;
        self.service = service;
        self.clear_collected();
        if self.service_definition().is_none() {
            tracing::warn!(service = %service, "Switched to a service missing from the catalog");
        }
        tracing::debug!(from = %from, to = %service, "Service switched");
    }

    fn clear_collected(&mut self) {
        self.position = WizardPosition::Intake;
        self.answers.clear();
        self.text_answers.clear();
        self.notes.clear();
        self.open_notes.clear();
    }

    /// Remove the answer that disqualifies the lead
    ///
    /// Returns the id of the cleared question. Other answers are untouched.
    pub fn clear_disqualification(&mut self) -> Option<String> {
        let disqualification = self.evaluation().disqualification?;
        self.answers.remove(&disqualification.question_id);
        tracing::info!(
            service = %self.service,
            reason = %disqualification.reason(),
            "Disqualifying answer cleared"
        );
        Some(disqualification.question_id)
    }

    // ---- answer editing ----

    /// Select an option; ignored unless `value` is an option of the question
    pub fn select_option(&mut self, question_id: &str, value: &str) -> bool {
        let valid = self
            .service_definition()
            .and_then(|s| s.question(question_id))
            .filter(|q| q.is_options())
            .is_some_and(|q| q.option(value).is_some());
        if !valid {
            tracing::debug!(question_id, value, "Ignoring unknown option");
            return false;
        }
        self.answers.insert(question_id.to_string(), value.to_string());
        true
    }

    /// Set a free-text question or a sub-field of the active service
    pub fn set_free_text(&mut self, field_id: &str, text: impl Into<String>) -> bool {
        let valid = self.service_definition().is_some_and(|s| {
            s.question(field_id).is_some_and(|q| q.is_free_text()) || s.has_sub_field(field_id)
        });
        if !valid {
            tracing::debug!(field_id, "Ignoring unknown free-text field");
            return false;
        }
        self.text_answers.insert(field_id.to_string(), text.into());
        true
    }

    /// Attach a manual note; ignored for questions that take no notes
    pub fn set_note(&mut self, question_id: &str, note: impl Into<String>) -> bool {
        if !self.accepts_note(question_id) {
            return false;
        }
        self.notes.insert(question_id.to_string(), note.into());
        true
    }

    /// Flip the note editor flag; returns the new state
    pub fn toggle_note(&mut self, question_id: &str) -> bool {
        if !self.accepts_note(question_id) {
            return false;
        }
        if self.open_notes.remove(question_id) {
            false
        } else {
            self.open_notes.insert(question_id.to_string());
            true
        }
    }

    fn accepts_note(&self, question_id: &str) -> bool {
        self.service_definition()
            .and_then(|s| s.question(question_id))
            .is_some_and(|q| q.has_note)
    }

    /// Remove one answer (option or free text); returns whether one existed
    pub fn clear_answer(&mut self, field_id: &str) -> bool {
        let had_option = self.answers.remove(field_id).is_some();
        let had_text = self.text_answers.remove(field_id).is_some();
        had_option || had_text
    }
}
