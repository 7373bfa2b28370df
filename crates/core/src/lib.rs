//! Core types for the visa CRM qualification desk
//!
//! This crate provides the records shared by every other crate:
//! - Service keys for the offered visa/residency services
//! - Contact identity captured during intake
//! - Lead-pool records produced by a finished qualification
//! - CRM customers and pipeline stages

pub mod contact;
pub mod customer;
pub mod lead;
pub mod service;

pub use contact::ContactIdentity;
pub use customer::{ActivityLogEntry, Customer, NewCustomer, PipelineStage, SheetRow};
pub use lead::{AnswerMap, LeadRecord, LeadStatus, LeadUpdate, NewLead};
pub use service::ServiceKey;
