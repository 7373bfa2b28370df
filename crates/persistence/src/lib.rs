//! Storage for the qualification desk
//!
//! Provides:
//! - The lead pool (finished qualifications)
//! - CRM customers created from transferred leads
//! - A best-effort spreadsheet mirror for new customers

pub mod customers;
pub mod error;
pub mod leads;
pub mod mirror;

pub use customers::{CustomerStore, InMemoryCustomerStore};
pub use error::PersistenceError;
pub use leads::{InMemoryLeadStore, LeadFilter, LeadStats, LeadStore, LeadTier};
pub use mirror::{CustomerMirror, LoggingMirror};

use std::sync::Arc;

/// Initialize the in-memory persistence layer
///
/// New customers are mirrored through `mirror` when one is given.
pub fn init(mirror: Option<Arc<dyn CustomerMirror>>) -> PersistenceLayer {
    let customers = match mirror {
        Some(mirror) => InMemoryCustomerStore::new().with_mirror(mirror),
        None => InMemoryCustomerStore::new(),
    };
    PersistenceLayer {
        leads: Arc::new(InMemoryLeadStore::new()),
        customers: Arc::new(customers),
    }
}

/// Combined persistence layer
#[derive(Clone)]
pub struct PersistenceLayer {
    pub leads: Arc<dyn LeadStore>,
    pub customers: Arc<dyn CustomerStore>,
}
