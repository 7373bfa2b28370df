//! CRM customer records and the sales pipeline stages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pipeline stage of a CRM customer
///
/// Qualification-desk stages come first, then the visa-team stages, then the
/// legacy values older records still carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PipelineStage {
    #[default]
    #[serde(rename = "New Lead")]
    NewLead,
    #[serde(rename = "Reached")]
    Reached,
    #[serde(rename = "Unreachable")]
    Unreachable,
    #[serde(rename = "Unqualified Lead")]
    Unqualified,
    #[serde(rename = "Awaiting Customer Reply")]
    AwaitingCustomer,
    #[serde(rename = "Handed to Visa Team")]
    HandedOver,
    #[serde(rename = "Documents Requested")]
    DocumentsRequested,
    #[serde(rename = "Applications Submitted")]
    ApplicationsSubmitted,
    #[serde(rename = "Appointment Booked")]
    AppointmentBooked,
    #[serde(rename = "Payment Received")]
    PaymentReceived,
    #[serde(rename = "Visa Granted")]
    VisaGranted,
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "Negative")]
    Negative,
}

impl PipelineStage {
    pub const QUALIFICATION: [PipelineStage; 6] = [
        PipelineStage::NewLead,
        PipelineStage::Reached,
        PipelineStage::Unreachable,
        PipelineStage::Unqualified,
        PipelineStage::AwaitingCustomer,
        PipelineStage::HandedOver,
    ];

    pub const VISA_TEAM: [PipelineStage; 5] = [
        PipelineStage::DocumentsRequested,
        PipelineStage::ApplicationsSubmitted,
        PipelineStage::AppointmentBooked,
        PipelineStage::PaymentReceived,
        PipelineStage::VisaGranted,
    ];

    pub const LEGACY: [PipelineStage; 3] = [
        PipelineStage::Pending,
        PipelineStage::Completed,
        PipelineStage::Negative,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            PipelineStage::NewLead => "New Lead",
            PipelineStage::Reached => "Reached",
            PipelineStage::Unreachable => "Unreachable",
            PipelineStage::Unqualified => "Unqualified Lead",
            PipelineStage::AwaitingCustomer => "Awaiting Customer Reply",
            PipelineStage::HandedOver => "Handed to Visa Team",
            PipelineStage::DocumentsRequested => "Documents Requested",
            PipelineStage::ApplicationsSubmitted => "Applications Submitted",
            PipelineStage::AppointmentBooked => "Appointment Booked",
            PipelineStage::PaymentReceived => "Payment Received",
            PipelineStage::VisaGranted => "Visa Granted",
            PipelineStage::Pending => "Pending",
            PipelineStage::Completed => "Completed",
            PipelineStage::Negative => "Negative",
        }
    }

    pub fn is_legacy(&self) -> bool {
        Self::LEGACY.contains(self)
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One line of a customer's activity log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub timestamp: DateTime<Utc>,
    pub text: String,
}

/// Customer fields supplied by the caller; the store assigns id and timestamps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub city: String,
    pub visa_type: String,
    pub stage: PipelineStage,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub log: Vec<ActivityLogEntry>,
    #[serde(default)]
    pub source: Option<String>,
}

impl NewCustomer {
    pub fn into_customer(self, id: Uuid, now: DateTime<Utc>) -> Customer {
        Customer {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            email: self.email,
            city: self.city,
            visa_type: self.visa_type,
            stage: self.stage,
            note: self.note,
            log: self.log,
            source: self.source,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A tracked CRM customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub visa_type: String,
    pub stage: PipelineStage,
    pub note: String,
    pub log: Vec<ActivityLogEntry>,
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}

/// Flattened customer row mirrored to the external spreadsheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRow {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub visa_type: String,
    pub city: String,
    pub stage: String,
    pub source: String,
    pub note: String,
    pub created_at: String,
}

impl From<&Customer> for SheetRow {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.to_string(),
            name: customer.full_name(),
            phone: customer.phone.clone(),
            email: customer.email.clone(),
            visa_type: customer.visa_type.clone(),
            city: customer.city.clone(),
            stage: customer.stage.display_name().to_string(),
            source: customer.source.clone().unwrap_or_default(),
            note: customer.note.clone(),
            created_at: customer.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_serializes_as_display_name() {
        let json = serde_json::to_string(&PipelineStage::NewLead).unwrap();
        assert_eq!(json, "\"New Lead\"");
        let stage: PipelineStage = serde_json::from_str("\"Pending\"").unwrap();
        assert_eq!(stage, PipelineStage::Pending);
        assert!(stage.is_legacy());
    }

    #[test]
    fn test_sheet_row_from_customer() {
        let customer = NewCustomer {
            first_name: "Zeynep".into(),
            last_name: "Kaya".into(),
            phone: "05009998877".into(),
            email: String::new(),
            city: "Eskişehir".into(),
            visa_type: "Schengen Visa".into(),
            stage: PipelineStage::Pending,
            note: "n".into(),
            log: Vec::new(),
            source: None,
        }
        .into_customer(Uuid::new_v4(), Utc::now());

        let row = SheetRow::from(&customer);
        assert_eq!(row.name, "Zeynep Kaya");
        assert_eq!(row.stage, "Pending");
        assert_eq!(row.source, "");
        assert_eq!(row.created_at.len(), 10);
    }
}
