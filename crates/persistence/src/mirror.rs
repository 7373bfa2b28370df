//! Spreadsheet mirror for newly created customers
//!
//! Mirroring is best effort: the customer store calls the mirror after the
//! customer is committed and only logs a failure.

use visa_crm_core::SheetRow;

use crate::PersistenceError;

/// Receives a flattened copy of every new customer
pub trait CustomerMirror: Send + Sync {
    fn mirror(&self, row: &SheetRow) -> Result<(), PersistenceError>;
}

/// Mirror that writes the row payload to the log instead of a remote sheet
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingMirror;

impl CustomerMirror for LoggingMirror {
    fn mirror(&self, row: &SheetRow) -> Result<(), PersistenceError> {
        let payload = serde_json::to_string(row)?;
        tracing::info!(customer_id = %row.id, payload = %payload, "Sheet mirror: row queued");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_mirror_accepts_row() {
        let row = SheetRow {
            id: "1".into(),
            name: "Ali Veli".into(),
            phone: "0555".into(),
            email: String::new(),
            visa_type: "US Visa".into(),
            city: String::new(),
            stage: "New Lead".into(),
            source: "Lead Qualification".into(),
            note: String::new(),
            created_at: "2026-01-05".into(),
        };
        assert!(LoggingMirror.mirror(&row).is_ok());
    }
}
