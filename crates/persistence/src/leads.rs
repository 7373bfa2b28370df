//! Lead pool storage
//!
//! Finished qualifications land here. Records are never deleted by the
//! qualification flow; a CRM transfer only flips their bookkeeping fields.

use chrono::Utc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use visa_crm_core::{LeadRecord, LeadUpdate, NewLead, ServiceKey};

use crate::PersistenceError;

/// Score at or above which a qualified lead counts as hot in the lead list
pub const HOT_LEAD_MIN_SCORE: i32 = 45;
/// Score at or above which a qualified lead counts as warm in the lead list
pub const WARM_LEAD_MIN_SCORE: i32 = 25;

/// Lead store trait
pub trait LeadStore: Send + Sync {
    /// Persist a new lead, assigning its id and creation time
    fn create(&self, lead: NewLead) -> LeadRecord;

    fn update(&self, id: Uuid, update: LeadUpdate) -> Result<LeadRecord, PersistenceError>;

    fn get(&self, id: Uuid) -> Option<LeadRecord>;

    /// All leads, newest first
    fn list(&self) -> Vec<LeadRecord>;
}

/// In-memory lead store
#[derive(Default)]
pub struct InMemoryLeadStore {
    leads: RwLock<HashMap<Uuid, LeadRecord>>,
}

impl InMemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.leads.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.read().is_empty()
    }
}

impl LeadStore for InMemoryLeadStore {
    fn create(&self, lead: NewLead) -> LeadRecord {
        let record = lead.into_record(Uuid::new_v4(), Utc::now());
        self.leads.write().insert(record.id, record.clone());
        tracing::debug!(
            lead_id = %record.id,
            service = %record.service,
            score = record.score,
            "Lead stored"
        );
        record
    }

    fn update(&self, id: Uuid, update: LeadUpdate) -> Result<LeadRecord, PersistenceError> {
        let mut leads = self.leads.write();
        let record = leads.get_mut(&id).ok_or(PersistenceError::LeadNotFound(id))?;
        record.apply(update);
        tracing::debug!(lead_id = %id, status = record.status.as_str(), "Lead updated");
        Ok(record.clone())
    }

    fn get(&self, id: Uuid) -> Option<LeadRecord> {
        self.leads.read().get(&id).cloned()
    }

    fn list(&self) -> Vec<LeadRecord> {
        let mut leads: Vec<LeadRecord> = self.leads.read().values().cloned().collect();
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        leads
    }
}

/// Lead list tier filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadTier {
    /// Qualified, score >= 45
    Hot,
    /// Qualified, 25 <= score < 45
    Warm,
    /// Qualified, score < 25
    Cold,
    Disqualified,
    /// Already converted into a CRM customer
    Transferred,
}

impl LeadTier {
    pub fn matches(&self, lead: &LeadRecord) -> bool {
        let qualified = !lead.is_disqualified;
        match self {
            Self::Hot => qualified && lead.score >= HOT_LEAD_MIN_SCORE,
            Self::Warm => {
                qualified && lead.score >= WARM_LEAD_MIN_SCORE && lead.score < HOT_LEAD_MIN_SCORE
            }
            Self::Cold => qualified && lead.score < WARM_LEAD_MIN_SCORE,
            Self::Disqualified => lead.is_disqualified,
            Self::Transferred => lead.crm_transferred,
        }
    }
}

/// Lead list filter; empty criteria match everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadFilter {
    pub service: Option<ServiceKey>,
    pub tier: Option<LeadTier>,
}

impl LeadFilter {
    pub fn matches(&self, lead: &LeadRecord) -> bool {
        if let Some(service) = self.service {
            if lead.service != service {
                return false;
            }
        }
        self.tier.map_or(true, |tier| tier.matches(lead))
    }

    pub fn apply<'a>(&self, leads: &'a [LeadRecord]) -> Vec<&'a LeadRecord> {
        leads.iter().filter(|l| self.matches(l)).collect()
    }
}

/// Lead pool counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadStats {
    pub total: usize,
    pub hot: usize,
    pub warm: usize,
    pub disqualified: usize,
    pub transferred: usize,
}

impl LeadStats {
    pub fn from_leads(leads: &[LeadRecord]) -> Self {
        let count = |tier: LeadTier| leads.iter().filter(|l| tier.matches(l)).count();
        Self {
            total: leads.len(),
            hot: count(LeadTier::Hot),
            warm: count(LeadTier::Warm),
            disqualified: count(LeadTier::Disqualified),
            transferred: count(LeadTier::Transferred),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visa_crm_core::{AnswerMap, ContactIdentity, LeadStatus};

    fn new_lead(service: ServiceKey, score: i32, disqualified: bool) -> NewLead {
        NewLead {
            contact: ContactIdentity::new("Can", "05551234567"),
            service,
            service_name: service.as_str().to_string(),
            service_icon: String::new(),
            score,
            temperature: String::new(),
            is_disqualified: disqualified,
            answers: AnswerMap::new(),
            notes: AnswerMap::new(),
            text_answers: AnswerMap::new(),
            summary_text: String::new(),
            status: LeadStatus::New,
            crm_transferred: false,
            sales_consultant: None,
            source: None,
        }
    }

    #[test]
    fn test_create_assigns_id_and_update_applies() {
        let store = InMemoryLeadStore::new();
        let record = store.create(new_lead(ServiceKey::Schengen, 40, false));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(record.id).unwrap().score, 40);

        let customer_id = Uuid::new_v4();
        let updated = store
            .update(record.id, LeadUpdate::transferred(customer_id))
            .unwrap();
        assert_eq!(updated.status, LeadStatus::Transferred);
        assert!(store.get(record.id).unwrap().crm_transferred);
    }

    #[test]
    fn test_update_unknown_lead() {
        let store = InMemoryLeadStore::new();
        let err = store.update(Uuid::new_v4(), LeadUpdate::default()).unwrap_err();
        assert!(matches!(err, PersistenceError::LeadNotFound(_)));
    }

    #[test]
    fn test_tier_boundaries() {
        let store = InMemoryLeadStore::new();
        let hot = store.create(new_lead(ServiceKey::Uk, 45, false));
        let warm = store.create(new_lead(ServiceKey::Uk, 25, false));
        let warm_top = store.create(new_lead(ServiceKey::Uk, 44, false));
        let cold = store.create(new_lead(ServiceKey::Uk, 24, false));
        // A disqualified lead belongs to no score tier
        let disq = store.create(new_lead(ServiceKey::Spain, 60, true));

        assert!(LeadTier::Hot.matches(&hot));
        assert!(LeadTier::Warm.matches(&warm));
        assert!(LeadTier::Warm.matches(&warm_top));
        assert!(LeadTier::Cold.matches(&cold));
        assert!(!LeadTier::Hot.matches(&disq));
        assert!(LeadTier::Disqualified.matches(&disq));
    }

    #[test]
    fn test_filter_and_stats() {
        let store = InMemoryLeadStore::new();
        store.create(new_lead(ServiceKey::Uk, 50, false));
        store.create(new_lead(ServiceKey::Us, 30, false));
        store.create(new_lead(ServiceKey::Spain, -90, true));
        let moved = store.create(new_lead(ServiceKey::Uk, 10, false));
        store
            .update(moved.id, LeadUpdate::transferred(Uuid::new_v4()))
            .unwrap();

        let leads = store.list();
        let uk = LeadFilter {
            service: Some(ServiceKey::Uk),
            tier: None,
        };
        assert_eq!(uk.apply(&leads).len(), 2);

        let uk_hot = LeadFilter {
            service: Some(ServiceKey::Uk),
            tier: Some(LeadTier::Hot),
        };
        assert_eq!(uk_hot.apply(&leads).len(), 1);
        assert_eq!(LeadFilter::default().apply(&leads).len(), 4);

        let stats = LeadStats::from_leads(&leads);
        assert_eq!(
            stats,
            LeadStats {
                total: 4,
                hot: 1,
                warm: 1,
                disqualified: 1,
                transferred: 1,
            }
        );
    }
}
