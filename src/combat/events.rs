//! Combat events
//!
//! Every engine action returns the events it produced; the headless runner
//! forwards them as Bevy events so log recording and any listening adapter
//! see the same stream.

use bevy::prelude::*;

use crate::arena::{BonusKind, Position};
use crate::engine::combatant::PlayerSlot;

use super::rules::{AttackKind, DieOutcome};

/// One observable thing that happened inside the engine
#[derive(Event, Debug, Clone, PartialEq)]
pub enum CombatEvent {
    /// A fresh match (or restart) began with this player to act first
    MatchStarted { starting: PlayerSlot },
    /// A player's turn began (upkeep applied, die not yet visible)
    TurnStarted { slot: PlayerSlot, turn: u32 },
    /// The turn's action die resolved
    DieRolled {
        slot: PlayerSlot,
        value: u8,
        outcome: DieOutcome,
    },
    /// A combatant relocated
    Moved {
        slot: PlayerSlot,
        from: Position,
        to: Position,
    },
    /// A combatant landed on a bonus cell and consumed it
    BonusPicked {
        slot: PlayerSlot,
        kind: BonusKind,
        pos: Position,
    },
    /// An attack was committed and awaits target confirmation
    AttackCommitted { slot: PlayerSlot, kind: AttackKind },
    /// A special ability was committed and awaits target confirmation
    SpecialCommitted { slot: PlayerSlot },
    /// Damage was dealt
    Damage {
        source: PlayerSlot,
        target: PlayerSlot,
        /// Name of the attack or ability that caused the damage
        ability: String,
        /// Damage after mitigation, before the health clamp
        amount: i32,
        /// Damage actually subtracted from health
        final_amount: i32,
        /// Whether the action die made this a critical
        critical: bool,
    },
    /// Health was restored
    Healing {
        target: PlayerSlot,
        ability: String,
        /// Health actually restored (overhealing is not counted)
        amount: i32,
    },
    /// A combatant entered the defensive stance
    DefendRaised { slot: PlayerSlot },
    /// A combatant readied a dodge
    DodgeRaised { slot: PlayerSlot },
    /// A readied dodge was put to the test by an incoming attack
    DodgeResolved {
        slot: PlayerSlot,
        roll: u8,
        success: bool,
    },
    /// A special ability resolved successfully
    SpecialUsed { slot: PlayerSlot, name: String },
    /// A combatant's health reached zero
    Death { slot: PlayerSlot },
    /// The match is over
    MatchEnded { winner: PlayerSlot },
}
