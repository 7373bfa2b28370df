//! Handoff of a finished qualification
//!
//! Two independent steps:
//! 1. `save_to_lead_pool`: snapshot the session into a lead record
//! 2. `transfer_to_crm`: convert a lead-pool entry into a CRM customer

use chrono::NaiveDateTime;
use uuid::Uuid;

use visa_crm_config::constants::handoff::{CRM_NOTE_MAX_CHARS, CRM_SOURCE};
use visa_crm_config::ScoringConfig;
use visa_crm_core::{
    ContactIdentity, Customer, LeadRecord, LeadStatus, LeadUpdate, NewCustomer, NewLead,
    PipelineStage,
};
use visa_crm_persistence::{CustomerStore, LeadStore, PersistenceError};

use crate::wizard::QualificationSession;

/// Contact details confirmed by the operator before saving
///
/// Pre-filled from the session; any field may be overridden.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferConfirmation {
    pub contact: ContactIdentity,
    pub sales_consultant: Option<String>,
    /// Lead channel, e.g. "Meta Ads"
    pub source: Option<String>,
}

impl TransferConfirmation {
    pub fn from_session(session: &QualificationSession) -> Self {
        Self {
            contact: session.contact().clone(),
            ..Default::default()
        }
    }

    /// Name and phone are both present
    pub fn is_confirmable(&self) -> bool {
        self.contact.is_complete()
    }
}

/// Snapshot the session as a new lead; `None` when not confirmable
pub fn build_lead(
    session: &QualificationSession,
    confirmation: &TransferConfirmation,
    generated_at: NaiveDateTime,
) -> Option<NewLead> {
    if !confirmation.is_confirmable() {
        return None;
    }
    let service = session.service_definition()?;
    let evaluation = session.evaluation();
    let temperature = session.temperature();

    Some(NewLead {
        contact: confirmation.contact.trimmed(),
        service: service.key,
        service_name: service.name.clone(),
        service_icon: service.icon.clone(),
        score: evaluation.score,
        temperature: temperature.label.to_string(),
        is_disqualified: evaluation.is_disqualified(),
        answers: session.answers().clone(),
        notes: session.notes().clone(),
        text_answers: session.text_answers().clone(),
        summary_text: session.summary(generated_at)?,
        status: LeadStatus::New,
        crm_transferred: false,
        sales_consultant: non_blank(confirmation.sales_consultant.as_deref()),
        source: non_blank(confirmation.source.as_deref()),
    })
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Save the finished qualification into the lead pool
///
/// Returns `None` without touching the store when name or phone is missing.
pub fn save_to_lead_pool(
    session: &QualificationSession,
    confirmation: &TransferConfirmation,
    leads: &dyn LeadStore,
    generated_at: NaiveDateTime,
) -> Option<LeadRecord> {
    let Some(lead) = build_lead(session, confirmation, generated_at) else {
        tracing::debug!(service = %session.service(), "Lead not saved: confirmation incomplete");
        return None;
    };

    let record = leads.create(lead);
    tracing::info!(
        lead_id = %record.id,
        service = %record.service,
        score = record.score,
        disqualified = record.is_disqualified,
        "Lead saved to pool"
    );
    Some(record)
}

/// CRM stage for a transferred lead
pub fn crm_stage_for(lead: &LeadRecord, pending_min_score: i32) -> PipelineStage {
    if !lead.is_disqualified && lead.score >= pending_min_score {
        PipelineStage::Pending
    } else {
        PipelineStage::NewLead
    }
}

/// First `max_chars` characters of `text`
pub fn truncate_note(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Customer fields for a lead-pool entry
pub fn customer_from_lead(lead: &LeadRecord, scoring: &ScoringConfig) -> NewCustomer {
    NewCustomer {
        first_name: lead.contact.first_name.clone(),
        last_name: lead.contact.last_name.clone(),
        phone: lead.contact.phone.clone(),
        email: lead.contact.email.clone(),
        city: lead.contact.city.clone(),
        visa_type: lead.service_name.clone(),
        stage: crm_stage_for(lead, scoring.crm_pending_min_score),
        note: truncate_note(&lead.summary_text, CRM_NOTE_MAX_CHARS),
        log: Vec::new(),
        source: Some(CRM_SOURCE.to_string()),
    }
}

/// Convert a lead-pool entry into a CRM customer with the default tiers
pub fn transfer_to_crm(
    lead_id: Uuid,
    leads: &dyn LeadStore,
    customers: &dyn CustomerStore,
) -> Result<Customer, PersistenceError> {
    transfer_to_crm_with(&ScoringConfig::default(), lead_id, leads, customers)
}

/// Convert a lead-pool entry into a CRM customer
///
/// The lead stays in the pool, marked transferred. A lead that was already
/// transferred returns its existing customer instead of creating another.
pub fn transfer_to_crm_with(
    scoring: &ScoringConfig,
    lead_id: Uuid,
    leads: &dyn LeadStore,
    customers: &dyn CustomerStore,
) -> Result<Customer, PersistenceError> {
    let lead = leads
        .get(lead_id)
        .ok_or(PersistenceError::LeadNotFound(lead_id))?;

    if let Some(existing) = lead.crm_customer_id.and_then(|id| customers.get(id)) {
        tracing::debug!(lead_id = %lead_id, customer_id = %existing.id, "Lead already transferred");
        return Ok(existing);
    }

    let customer = customers.create(customer_from_lead(&lead, scoring));
    leads.update(lead_id, LeadUpdate::transferred(customer.id))?;

    tracing::info!(
        lead_id = %lead_id,
        customer_id = %customer.id,
        stage = %customer.stage,
        "Lead transferred to CRM"
    );
    Ok(customer)
}
