//! CRM customer storage

use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use visa_crm_core::{Customer, NewCustomer, SheetRow};

use crate::mirror::CustomerMirror;

/// Customer store trait
pub trait CustomerStore: Send + Sync {
    /// Persist a new customer, assigning its id and timestamps
    fn create(&self, customer: NewCustomer) -> Customer;

    fn get(&self, id: Uuid) -> Option<Customer>;

    /// All customers, newest first
    fn list(&self) -> Vec<Customer>;
}

/// In-memory customer store with an optional spreadsheet mirror
#[derive(Default)]
pub struct InMemoryCustomerStore {
    customers: RwLock<HashMap<Uuid, Customer>>,
    mirror: Option<Arc<dyn CustomerMirror>>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mirror(mut self, mirror: Arc<dyn CustomerMirror>) -> Self {
        self.mirror = Some(mirror);
        self
    }

    pub fn len(&self) -> usize {
        self.customers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.read().is_empty()
    }
}

impl CustomerStore for InMemoryCustomerStore {
    fn create(&self, customer: NewCustomer) -> Customer {
        let customer = customer.into_customer(Uuid::new_v4(), Utc::now());
        self.customers.write().insert(customer.id, customer.clone());
        tracing::debug!(
            customer_id = %customer.id,
            stage = %customer.stage,
            "Customer stored"
        );

        if let Some(mirror) = &self.mirror {
            if let Err(e) = mirror.mirror(&SheetRow::from(&customer)) {
                tracing::warn!(customer_id = %customer.id, error = %e, "Sheet mirror failed");
            }
        }

        customer
    }

    fn get(&self, id: Uuid) -> Option<Customer> {
        self.customers.read().get(&id).cloned()
    }

    fn list(&self) -> Vec<Customer> {
        let mut customers: Vec<Customer> = self.customers.read().values().cloned().collect();
        customers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        customers
    }
}
