//! Persistence error types

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Lead not found: {0}")]
    LeadNotFound(Uuid),

    #[error("Mirror delivery failed: {0}")]
    Mirror(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
