//! Contact identity captured at the start of a qualification call

use serde::{Deserialize, Serialize};

/// Who the operator is talking to
///
/// Captured once on the intake screen. It survives service switches and is
/// only cleared by a full reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactIdentity {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub city: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl ContactIdentity {
    pub fn new(first_name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            phone: phone.into(),
            ..Default::default()
        }
    }

    /// Name and phone are both present (after trimming)
    pub fn is_complete(&self) -> bool {
        !self.first_name.trim().is_empty() && !self.phone.trim().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_empty()
            && self.last_name.is_empty()
            && self.city.is_empty()
            && self.phone.is_empty()
            && self.email.is_empty()
    }

    /// "First Last", or just the first name when no last name was given
    pub fn full_name(&self) -> String {
        let first = self.first_name.trim();
        let last = self.last_name.trim();
        if last.is_empty() {
            first.to_string()
        } else {
            format!("{} {}", first, last)
        }
    }

    /// Copy with surrounding whitespace removed from every field
    pub fn trimmed(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            city: self.city.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
        }
    }
}
