//! Combat rules and observability
//!
//! Implements the rule-level pieces shared by the engine and its adapters:
//! - Pure damage math and action-die gating
//! - Tuning constants
//! - The engine's event stream
//! - Combat logging

pub mod constants;
pub mod events;
pub mod log;
pub mod rules;

pub use events::CombatEvent;
pub use log::{CombatLog, CombatLogEventType};
pub use rules::{AttackKind, DieOutcome};
