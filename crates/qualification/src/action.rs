//! Recommended next action for the operator
//!
//! Uses its own tier table, independent of the temperature tiers.

use serde::{Deserialize, Serialize};

use visa_crm_config::ActionThresholds;

use crate::temperature::ColorTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Disqualified: close the record
    CloseOut,
    /// Hand over to sales right now
    ImmediateHandoff,
    /// Brief sales and schedule a follow-up
    BriefAndSchedule,
    /// Cold follow-up
    ColdFollowUp,
}

/// Title, colour and ordered next steps shown on the result screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendedAction {
    pub kind: ActionKind,
    pub title: &'static str,
    pub color: ColorTag,
    pub can_transfer: bool,
    pub steps: Vec<&'static str>,
}

impl RecommendedAction {
    fn new(kind: ActionKind) -> Self {
        let (title, color, steps) = match kind {
            ActionKind::CloseOut => (
                "Close the record",
                ColorTag::Red,
                vec![
                    "Explain the situation to the customer politely",
                    "Mark the customer as \"Negative\" in the CRM",
                    "Write the disqualification reason into the notes",
                    "Do not hand over to the sales team",
                ],
            ),
            ActionKind::ImmediateHandoff => (
                "Hand over to sales NOW",
                ColorTag::Green,
                vec![
                    "Call the sales team this minute or transfer live",
                    "Keep the price quote ready (offer the campaign price)",
                    "Book a same-day appointment if needed",
                    "The Guaranteed Visa package can be offered",
                    "Mark as \"Pending / Hot\" in the CRM",
                ],
            ),
            ActionKind::BriefAndSchedule => (
                "Forward to sales and schedule a follow-up",
                ColorTag::Amber,
                vec![
                    "Hand over to sales with a detailed brief",
                    "Make a follow-up call within 24 hours",
                    "Give price information and let them think it over",
                    "Mark as \"Pending\" in the CRM",
                    "Send the information document by email",
                ],
            ),
            ActionKind::ColdFollowUp => (
                "Cold follow-up",
                ColorTag::Red,
                vec![
                    "Schedule a follow-up call in one week",
                    "Send general information by email",
                    "Leave as \"New Lead\" in the CRM",
                    "Call again once they reach the decision stage",
                ],
            ),
        };

        Self {
            kind,
            title,
            color,
            can_transfer: kind != ActionKind::CloseOut,
            steps,
        }
    }
}

/// Recommend with the default tiers
pub fn recommend_action(score: i32, disqualified: bool) -> RecommendedAction {
    recommend_action_with(&ActionThresholds::default(), score, disqualified)
}

pub fn recommend_action_with(
    thresholds: &ActionThresholds,
    score: i32,
    disqualified: bool,
) -> RecommendedAction {
    let kind = if disqualified {
        ActionKind::CloseOut
    } else if score >= thresholds.immediate {
        ActionKind::ImmediateHandoff
    } else if score >= thresholds.follow_up {
        ActionKind::BriefAndSchedule
    } else {
        ActionKind::ColdFollowUp
    };
    RecommendedAction::new(kind)
}
