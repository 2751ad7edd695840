//! GridDuel - Turn-Based Tactical Grid Combat
//!
//! A two-player combat engine played on a fixed grid arena: players pick a
//! hero archetype, then alternate turns moving, attacking behind a per-turn
//! action-die gate, defending, dodging, or firing a cooldown-limited
//! special, until one hero falls.
//!
//! This library exposes the rule engine and its headless replay harness;
//! rendering and input belong to external presentation adapters.

pub mod arena;
pub mod catalog;
pub mod cli;
pub mod combat;
pub mod engine;
pub mod headless;

// Re-export commonly used types
pub use arena::{Board, Bonus, BonusKind, Position};
pub use catalog::{HeroCatalog, HeroClass, HeroStats};
pub use combat::{AttackKind, CombatEvent, CombatLog, CombatLogEventType, DieOutcome};
pub use engine::{
    Applied, Combatant, GameRng, Intent, MatchConfig, MatchState, PendingAction, PlayerSlot,
    RulesError, TurnPhase,
};
pub use headless::{HeadlessMatchConfig, MatchReport};
