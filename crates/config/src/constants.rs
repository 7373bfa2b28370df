//! Centralized constants for the qualification desk
//!
//! Single source of truth for score tiers and handoff limits. The settings
//! defaults are built from these values.

/// A `disqualify`-tagged option only disqualifies a lead when its score is at
/// or below this value. Weaker negative options merely lower the score.
pub const DISQUALIFY_SCORE_THRESHOLD: i32 = -10;

/// Score tiers
pub mod scoring {
    /// Temperature tiers (inclusive lower bounds)
    pub const VERY_HOT_MIN: i32 = 70;
    pub const HOT_MIN: i32 = 45;
    pub const WARM_MIN: i32 = 25;
    pub const COLD_MIN: i32 = 10;

    /// Recommended-action tiers (inclusive lower bounds)
    pub const ACTION_IMMEDIATE_MIN: i32 = 60;
    pub const ACTION_FOLLOW_UP_MIN: i32 = 35;

    /// Transferred leads at or above this score enter the CRM as "Pending"
    pub const CRM_PENDING_MIN_SCORE: i32 = 45;

    /// Largest option score magnitude a catalog may declare
    pub const MAX_OPTION_SCORE_ABS: i32 = 1_000;
}

/// CRM handoff
pub mod handoff {
    /// The customer note holds at most this many characters of the summary
    pub const CRM_NOTE_MAX_CHARS: usize = 500;

    /// `source` written on customers created from the lead pool
    pub const CRM_SOURCE: &str = "Lead Qualification";
}

/// Settings loading
pub mod settings {
    /// Environment variable prefix (`VISA_CRM__OBSERVABILITY__LOG_LEVEL=debug`)
    pub const ENV_PREFIX: &str = "VISA_CRM";
    pub const ENV_SEPARATOR: &str = "__";
    pub const DEFAULT_CONFIG_DIR: &str = "config";
    pub const DEFAULT_LOG_LEVEL: &str = "info";
}
