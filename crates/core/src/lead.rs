//! Qualified lead records held in the lead pool

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::contact::ContactIdentity;
use crate::service::ServiceKey;

/// Question id (or sub-field id) to value
pub type AnswerMap = BTreeMap<String, String>;

/// Lifecycle of a lead-pool entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Transferred,
    Cancelled,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Transferred => "transferred",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Lead fields supplied by the caller; the store assigns id and creation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLead {
    #[serde(flatten)]
    pub contact: ContactIdentity,
    pub service: ServiceKey,
    pub service_name: String,
    pub service_icon: String,
    pub score: i32,
    pub temperature: String,
    pub is_disqualified: bool,
    pub answers: AnswerMap,
    pub notes: AnswerMap,
    pub text_answers: AnswerMap,
    pub summary_text: String,
    pub status: LeadStatus,
    pub crm_transferred: bool,
    #[serde(default)]
    pub sales_consultant: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl NewLead {
    pub fn into_record(self, id: Uuid, created_at: DateTime<Utc>) -> LeadRecord {
        LeadRecord {
            id,
            contact: self.contact,
            service: self.service,
            service_name: self.service_name,
            service_icon: self.service_icon,
            score: self.score,
            temperature: self.temperature,
            is_disqualified: self.is_disqualified,
            answers: self.answers,
            notes: self.notes,
            text_answers: self.text_answers,
            summary_text: self.summary_text,
            created_at,
            status: self.status,
            crm_transferred: self.crm_transferred,
            crm_customer_id: None,
            sales_consultant: self.sales_consultant,
            source: self.source,
        }
    }
}

/// Snapshot of a finished qualification
///
/// Created once at handoff; afterwards only the transfer bookkeeping fields
/// change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub contact: ContactIdentity,
    pub service: ServiceKey,
    pub service_name: String,
    pub service_icon: String,
    pub score: i32,
    pub temperature: String,
    pub is_disqualified: bool,
    pub answers: AnswerMap,
    pub notes: AnswerMap,
    pub text_answers: AnswerMap,
    pub summary_text: String,
    pub created_at: DateTime<Utc>,
    pub status: LeadStatus,
    pub crm_transferred: bool,
    #[serde(default)]
    pub crm_customer_id: Option<Uuid>,
    #[serde(default)]
    pub sales_consultant: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl LeadRecord {
    /// Apply a partial update in place
    pub fn apply(&mut self, update: LeadUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(transferred) = update.crm_transferred {
            self.crm_transferred = transferred;
        }
        if let Some(customer_id) = update.crm_customer_id {
            self.crm_customer_id = Some(customer_id);
        }
        if let Some(consultant) = update.sales_consultant {
            self.sales_consultant = Some(consultant);
        }
    }
}

/// Partial update for a lead record; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadUpdate {
    pub status: Option<LeadStatus>,
    pub crm_transferred: Option<bool>,
    pub crm_customer_id: Option<Uuid>,
    pub sales_consultant: Option<String>,
}

impl LeadUpdate {
    /// Bookkeeping applied after a lead was converted into a CRM customer
    pub fn transferred(customer_id: Uuid) -> Self {
        Self {
            status: Some(LeadStatus::Transferred),
            crm_transferred: Some(true),
            crm_customer_id: Some(customer_id),
            sales_consultant: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewLead {
        NewLead {
            contact: ContactIdentity::new("Mehmet", "05551112233"),
            service: ServiceKey::Uk,
            service_name: "UK Visa".into(),
            service_icon: "🇬🇧".into(),
            score: 52,
            temperature: "Hot lead".into(),
            is_disqualified: false,
            answers: AnswerMap::from([("ing_amac".to_string(), "is".to_string())]),
            notes: AnswerMap::new(),
            text_answers: AnswerMap::new(),
            summary_text: "summary".into(),
            status: LeadStatus::New,
            crm_transferred: false,
            sales_consultant: None,
            source: Some("Meta Ads".into()),
        }
    }

    #[test]
    fn test_apply_transfer_update() {
        let mut record = sample().into_record(Uuid::new_v4(), Utc::now());
        let customer_id = Uuid::new_v4();
        record.apply(LeadUpdate::transferred(customer_id));

        assert_eq!(record.status, LeadStatus::Transferred);
        assert!(record.crm_transferred);
        assert_eq!(record.crm_customer_id, Some(customer_id));
        // untouched
        assert_eq!(record.score, 52);
        assert_eq!(record.source.as_deref(), Some("Meta Ads"));
    }

    #[test]
    fn test_record_serializes_flat_contact() {
        let record = sample().into_record(Uuid::new_v4(), Utc::now());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["first_name"], "Mehmet");
        assert_eq!(value["status"], "new");
        assert_eq!(value["service"], "uk");
    }
}
