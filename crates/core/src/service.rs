//! Service keys offered by the agency

use serde::{Deserialize, Serialize};
use std::fmt;

/// Visa / residency service a lead can be qualified for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKey {
    /// Schengen short-stay visa
    #[default]
    Schengen,
    /// Spain residence permit
    Spain,
    /// United Kingdom visitor/student visa
    Uk,
    /// United States B1/B2/F1 visa
    Us,
}

impl ServiceKey {
    /// All services in menu order
    pub const ALL: [ServiceKey; 4] = [
        ServiceKey::Schengen,
        ServiceKey::Spain,
        ServiceKey::Uk,
        ServiceKey::Us,
    ];

    /// Stable identifier used in config files and persisted records
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKey::Schengen => "schengen",
            ServiceKey::Spain => "spain",
            ServiceKey::Uk => "uk",
            ServiceKey::Us => "us",
        }
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
