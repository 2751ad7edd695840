//! Turn sequencing
//!
//! The cycle for each turn is `AwaitingRoll → ActionGated → turn end`,
//! re-entered for the next player until the match-over check fires.
//! Rolling the die is an explicit operation (the adapter's die button);
//! turn-entry upkeep happens inside it, so cooldown ticking and stance
//! clearing can never be skipped.

use serde::Serialize;

use crate::combat::events::CombatEvent;
use crate::combat::rules::DieOutcome;

use super::combatant::PlayerSlot;
use super::error::RulesError;
use super::{Applied, EventBuf, MatchState};

/// Where the turn cycle currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TurnPhase {
    /// A turn has begun but its action die has not been rolled
    AwaitingRoll,
    /// The die is rolled; the current player may act
    ActionGated,
    /// Terminal: a winner has been declared
    MatchOver,
}

/// Whose turn it is and what the die shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TurnState {
    /// The acting player
    pub current: PlayerSlot,
    /// Completed turns this match (monotonic)
    pub turn_count: u32,
    /// This turn's action-die result; None until rolled, cleared at turn end
    pub die: Option<u8>,
}

impl TurnState {
    /// Turn state for the first turn of a match
    pub fn opening(starting: PlayerSlot) -> Self {
        Self {
            current: starting,
            turn_count: 0,
            die: None,
        }
    }
}

impl MatchState {
    /// Enter the current player's turn: tick their special cooldown down
    /// (floored at 0), clear their defend/dodge stances, then roll the
    /// action die that gates this turn's attack kinds.
    pub fn roll_action_die(&mut self) -> Result<Applied, RulesError> {
        match self.phase {
            TurnPhase::MatchOver => Err(RulesError::IllegalAction("the match is over".to_string())),
            TurnPhase::ActionGated => Err(RulesError::IllegalAction(
                "the action die was already rolled this turn".to_string(),
            )),
            TurnPhase::AwaitingRoll => {
                let slot = self.turn.current;
                let mut events = EventBuf::new();

                {
                    let combatant = &mut self.combatants[slot.index()];
                    if combatant.special_cooldown > 0 {
                        combatant.special_cooldown -= 1;
                    }
                    combatant.is_defending = false;
                    combatant.is_dodging = false;
                }
                events.push(CombatEvent::TurnStarted {
                    slot,
                    turn: self.turn.turn_count,
                });

                let value = self.rng.roll_d6();
                self.turn.die = Some(value);
                self.phase = TurnPhase::ActionGated;
                events.push(CombatEvent::DieRolled {
                    slot,
                    value,
                    outcome: DieOutcome::from_roll(value),
                });

                Ok(Applied::with(events))
            }
        }
    }

    /// Close out the acting player's turn and hand over to the opponent.
    /// Clears the die and any pending action; the next turn starts at
    /// `AwaitingRoll`.
    pub(crate) fn end_turn(&mut self) {
        debug_assert!(
            self.phase != TurnPhase::MatchOver,
            "end_turn: the match is already over"
        );

        self.pending = None;
        self.turn.die = None;
        self.turn.turn_count += 1;
        self.turn.current = self.turn.current.other();
        self.phase = TurnPhase::AwaitingRoll;
    }
}
