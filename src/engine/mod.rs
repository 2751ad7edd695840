//! The combat engine
//!
//! `MatchState` owns all authoritative state for one match (board,
//! combatants, turn state, pending action, the injected RNG) and applies
//! every rule transition atomically: an intent is either fully applied or
//! rejected with a reason and no mutation. The engine is single-actor and
//! strictly turn-sequential; presentation adapters read snapshots and
//! submit intents.

use bevy::prelude::*;
use serde::Serialize;
use smallvec::SmallVec;

use crate::arena::{Board, Position};
use crate::catalog::HeroCatalog;
use crate::combat::events::CombatEvent;
use crate::combat::rules::AttackKind;

pub mod combatant;
pub mod config;
pub mod error;
pub mod rng;

mod actions;
mod turn;

pub use combatant::{Combatant, PlayerSlot};
pub use config::MatchConfig;
pub use error::RulesError;
pub use rng::GameRng;
pub use turn::{TurnPhase, TurnState};

/// Events produced by one applied intent. Four covers every action except
/// multi-hit specials, which spill.
pub type EventBuf = SmallVec<[CombatEvent; 4]>;

/// A successfully applied intent, carrying the events it produced
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub events: EventBuf,
}

impl Applied {
    pub(crate) fn with(events: EventBuf) -> Self {
        Self { events }
    }
}

/// A player intent submitted through the engine's action surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Move to a cell (always ends the turn on success)
    Move(Position),
    /// Commit to an attack of the given kind, awaiting target confirmation
    Attack(AttackKind),
    /// Commit to the special ability, awaiting target confirmation
    Special,
    /// Enter the defensive stance (ends the turn)
    Defend,
    /// Ready a dodge, evasive archetypes only (ends the turn)
    Dodge,
    /// Click a cell: resolves the pending action if it names the enemy's
    /// cell, otherwise falls through to a default movement attempt
    ConfirmTarget(Position),
    /// Discard the match and set up a fresh one from the same config
    Restart,
}

/// An attack or special the acting player has committed to but not yet
/// confirmed against the enemy's cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PendingAction {
    Attack(AttackKind),
    Special,
}

/// Authoritative state for one match
#[derive(Resource)]
pub struct MatchState {
    config: MatchConfig,
    catalog: HeroCatalog,
    board: Board,
    combatants: Vec<Combatant>,
    turn: TurnState,
    phase: TurnPhase,
    pending: Option<PendingAction>,
    winner: Option<PlayerSlot>,
    rng: GameRng,
}

impl MatchState {
    /// Set up a fresh match. Draw order: starting-player roll (unless the
    /// config pins it), then obstacle placement, then bonus placement.
    pub fn new(
        config: MatchConfig,
        catalog: HeroCatalog,
        mut rng: GameRng,
    ) -> Result<Self, RulesError> {
        config.validate()?;

        let starting = Self::draw_starting_slot(&config, &mut rng);
        let board = Board::generate(
            config.arena_size,
            config.obstacle_density,
            config.bonus_density,
            &mut rng,
        );
        let combatants = Self::spawn_roster(&config, &catalog, &board);

        Ok(Self {
            config,
            catalog,
            board,
            combatants,
            turn: TurnState::opening(starting),
            phase: TurnPhase::AwaitingRoll,
            pending: None,
            winner: None,
            rng,
        })
    }

    fn draw_starting_slot(config: &MatchConfig, rng: &mut GameRng) -> PlayerSlot {
        match config.starting_slot {
            Some(slot) => slot,
            // 1-3 on a d6 gives Player 1 the opening turn
            None => {
                if rng.roll_d6() <= 3 {
                    PlayerSlot::One
                } else {
                    PlayerSlot::Two
                }
            }
        }
    }

    fn spawn_roster(config: &MatchConfig, catalog: &HeroCatalog, board: &Board) -> Vec<Combatant> {
        let corners = board.corner_spawns();
        vec![
            Combatant::new(
                PlayerSlot::One,
                config.hero1,
                catalog.stats(config.hero1),
                config.player1_name.clone(),
                corners[0],
            ),
            Combatant::new(
                PlayerSlot::Two,
                config.hero2,
                catalog.stats(config.hero2),
                config.player2_name.clone(),
                corners[1],
            ),
        ]
    }

    /// Submit one intent on behalf of a player. Only the current player's
    /// intents are accepted (`Restart` excepted, which is always legal).
    pub fn submit(&mut self, slot: PlayerSlot, intent: Intent) -> Result<Applied, RulesError> {
        if matches!(intent, Intent::Restart) {
            return self.restart();
        }
        if self.phase == TurnPhase::MatchOver {
            return Err(RulesError::IllegalAction("the match is over".to_string()));
        }
        if slot != self.turn.current {
            return Err(RulesError::IllegalAction(format!(
                "it is not {}'s turn",
                self.combatants[slot.index()].name
            )));
        }
        if self.phase == TurnPhase::AwaitingRoll {
            return Err(RulesError::IllegalAction(
                "the action die has not been rolled yet".to_string(),
            ));
        }

        match intent {
            Intent::Move(pos) => self.handle_move(pos),
            Intent::Attack(kind) => self.handle_attack(kind),
            Intent::Special => self.handle_special(),
            Intent::Defend => self.handle_defend(),
            Intent::Dodge => self.handle_dodge(),
            Intent::ConfirmTarget(pos) => self.handle_confirm(pos),
            Intent::Restart => self.restart(),
        }
    }

    /// Tear down and rebuild the match from the stored config. Brand-new
    /// board and roster; only the RNG stream continues.
    fn restart(&mut self) -> Result<Applied, RulesError> {
        let starting = Self::draw_starting_slot(&self.config, &mut self.rng);
        self.board = Board::generate(
            self.config.arena_size,
            self.config.obstacle_density,
            self.config.bonus_density,
            &mut self.rng,
        );
        self.combatants = Self::spawn_roster(&self.config, &self.catalog, &self.board);
        self.turn = TurnState::opening(starting);
        self.phase = TurnPhase::AwaitingRoll;
        self.pending = None;
        self.winner = None;

        let mut events = EventBuf::new();
        events.push(CombatEvent::MatchStarted { starting });
        Ok(Applied::with(events))
    }

    // ------------------------------------------------------------------
    // Read-only surface for presentation adapters
    // ------------------------------------------------------------------

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    pub fn combatant(&self, slot: PlayerSlot) -> &Combatant {
        &self.combatants[slot.index()]
    }

    /// Combatants still standing (defeated records stay in `combatants`)
    pub fn alive_combatants(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter().filter(|c| c.is_alive())
    }

    pub fn current_slot(&self) -> PlayerSlot {
        self.turn.current
    }

    pub fn turn_count(&self) -> u32 {
        self.turn.turn_count
    }

    /// The turn's action-die value, once rolled
    pub fn die(&self) -> Option<u8> {
        self.turn.die
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn pending(&self) -> Option<PendingAction> {
        self.pending
    }

    pub fn winner(&self) -> Option<PlayerSlot> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.phase == TurnPhase::MatchOver
    }

    pub fn rng_seed(&self) -> Option<u64> {
        self.rng.seed
    }

    /// Serializable snapshot of everything an adapter may display
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            turn_count: self.turn.turn_count,
            current_player: self.turn.current.index(),
            die: self.turn.die,
            phase: self.phase,
            pending: self.pending,
            winner: self.winner.map(PlayerSlot::index),
            combatants: self.combatants.clone(),
            board: self.board.clone(),
        }
    }
}

/// Read-only view of a match for presentation adapters and reports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSnapshot {
    pub turn_count: u32,
    pub current_player: usize,
    pub die: Option<u8>,
    pub phase: TurnPhase,
    pub pending: Option<PendingAction>,
    pub winner: Option<usize>,
    pub combatants: Vec<Combatant>,
    pub board: Board,
}
