//! Lead qualification engine
//!
//! Interprets the service catalog to qualify a lead over a guided call:
//! - `evaluator`: score and disqualification from the answers
//! - `temperature` / `action`: score tiers and the recommended next step
//! - `alerts`: alerts and sub-fields revealed by the answers
//! - `wizard`: the per-call session state machine
//! - `summary`: the handoff text block
//! - `transfer`: lead pool snapshot and CRM conversion
//! - `export`: clipboard copy of the summary

pub mod action;
pub mod alerts;
pub mod evaluator;
pub mod export;
pub mod summary;
pub mod temperature;
pub mod transfer;
pub mod wizard;

pub use action::{recommend_action, recommend_action_with, ActionKind, RecommendedAction};
pub use alerts::{active_alerts, step_alerts, visible_sub_fields, ActiveAlert};
pub use evaluator::{
    disqualification_message, evaluate, evaluate_with_cutoff, Disqualification, Evaluation,
};
pub use export::{copy_summary, Clipboard, ExportError};
pub use summary::{build_summary, SummaryInput};
pub use temperature::{classify, classify_with, ColorTag, Temperature, TemperatureInfo};
pub use transfer::{
    build_lead, crm_stage_for, customer_from_lead, save_to_lead_pool, transfer_to_crm,
    transfer_to_crm_with, truncate_note, TransferConfirmation,
};
pub use wizard::{QualificationSession, WizardPosition};
