//! Lead Scoring Configuration
//!
//! Score tiers used to label a lead's temperature and to pick the recommended
//! next action. The two tables are deliberately separate and tuned
//! independently.

use serde::{Deserialize, Serialize};

use crate::constants::{scoring, DISQUALIFY_SCORE_THRESHOLD};
use crate::ConfigError;

/// Lower bounds (inclusive) of the temperature tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureThresholds {
    #[serde(default = "default_very_hot")]
    pub very_hot: i32,
    #[serde(default = "default_hot")]
    pub hot: i32,
    #[serde(default = "default_warm")]
    pub warm: i32,
    #[serde(default = "default_cold")]
    pub cold: i32,
}

fn default_very_hot() -> i32 {
    scoring::VERY_HOT_MIN
}
fn default_hot() -> i32 {
    scoring::HOT_MIN
}
fn default_warm() -> i32 {
    scoring::WARM_MIN
}
fn default_cold() -> i32 {
    scoring::COLD_MIN
}

impl Default for TemperatureThresholds {
    fn default() -> Self {
        Self {
            very_hot: default_very_hot(),
            hot: default_hot(),
            warm: default_warm(),
            cold: default_cold(),
        }
    }
}

/// Lower bounds (inclusive) of the recommended-action tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionThresholds {
    /// Hand the lead to sales right away
    #[serde(default = "default_immediate")]
    pub immediate: i32,
    /// Brief sales and schedule a follow-up
    #[serde(default = "default_follow_up")]
    pub follow_up: i32,
}

fn default_immediate() -> i32 {
    scoring::ACTION_IMMEDIATE_MIN
}
fn default_follow_up() -> i32 {
    scoring::ACTION_FOLLOW_UP_MIN
}

impl Default for ActionThresholds {
    fn default() -> Self {
        Self {
            immediate: default_immediate(),
            follow_up: default_follow_up(),
        }
    }
}

/// Scoring configuration (`scoring:` section of the settings)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub temperature: TemperatureThresholds,
    #[serde(default)]
    pub action: ActionThresholds,
    /// A `disqualify` option disqualifies only at or below this score
    #[serde(default = "default_disqualify_at_or_below")]
    pub disqualify_at_or_below: i32,
    /// Minimum score for a transferred lead to enter the CRM as "Pending"
    #[serde(default = "default_crm_pending_min_score")]
    pub crm_pending_min_score: i32,
}

fn default_disqualify_at_or_below() -> i32 {
    DISQUALIFY_SCORE_THRESHOLD
}
fn default_crm_pending_min_score() -> i32 {
    scoring::CRM_PENDING_MIN_SCORE
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            temperature: TemperatureThresholds::default(),
            action: ActionThresholds::default(),
            disqualify_at_or_below: default_disqualify_at_or_below(),
            crm_pending_min_score: default_crm_pending_min_score(),
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.temperature;
        if !(t.very_hot > t.hot && t.hot > t.warm && t.warm > t.cold) {
            return Err(ConfigError::InvalidValue {
                field: "scoring.temperature".to_string(),
                message: format!(
                    "tiers must be strictly descending (very_hot={}, hot={}, warm={}, cold={})",
                    t.very_hot, t.hot, t.warm, t.cold
                ),
            });
        }

        if self.action.immediate <= self.action.follow_up {
            return Err(ConfigError::InvalidValue {
                field: "scoring.action".to_string(),
                message: format!(
                    "immediate ({}) must be greater than follow_up ({})",
                    self.action.immediate, self.action.follow_up
                ),
            });
        }

        if self.disqualify_at_or_below >= 0 {
            return Err(ConfigError::InvalidValue {
                field: "scoring.disqualify_at_or_below".to_string(),
                message: "must be negative".to_string(),
            });
        }

        Ok(())
    }
}
