//! Headless match execution
//!
//! Replays scripted matches without any graphical output, suitable for
//! automated testing and deterministic regression runs.

use std::collections::VecDeque;
use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use serde::Serialize;

use crate::catalog::{load_hero_definitions, HeroCatalog};
use crate::combat::events::CombatEvent;
use crate::combat::log::{CombatLog, CombatLogEventType, CombatantMetadata, MatchMetadata};
use crate::engine::{GameRng, Intent, MatchState, TurnPhase};

use super::config::HeadlessMatchConfig;

/// Why a replay stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchEndReason {
    /// A combatant won the match
    Victory,
    /// The intent script ran out before the match ended
    ScriptExhausted,
    /// The configured turn cap was reached
    TurnLimit,
}

/// Result of a completed headless replay.
///
/// This struct provides programmatic access to match results for testing
/// and analysis.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    /// The winning player (1 or 2), or None if the replay was cut off
    pub winner: Option<u8>,
    /// Completed turns when the replay stopped
    pub turns: u32,
    /// What stopped the replay
    pub ended_by: MatchEndReason,
    /// Random seed used (if deterministic mode)
    pub random_seed: Option<u64>,
    /// Combatant statistics from the match
    pub combatants: Vec<CombatantMetadata>,
    /// The combat log messages, in order
    pub log: Vec<String>,
}

/// Resource tracking headless replay state
#[derive(Resource)]
struct HeadlessState {
    /// Remaining scripted intents, consumed front to back
    script: VecDeque<Intent>,
    /// Turn cap before declaring the replay cut off
    max_turns: u32,
    /// Custom output path for the match log
    output_path: Option<String>,
    /// Set once the replay has stopped for any reason
    ended: Option<MatchEndReason>,
    /// Whether the report has been built and saved
    match_complete: bool,
    /// Match report (populated when the replay completes)
    report: Option<MatchReport>,
}

/// Plugin for headless match execution
pub struct HeadlessPlugin {
    pub config: HeadlessMatchConfig,
}

impl Plugin for HeadlessPlugin {
    fn build(&self, app: &mut App) {
        let match_config = self
            .config
            .to_match_config()
            .expect("Invalid match configuration");
        let script = self
            .config
            .parsed_script()
            .expect("Invalid match configuration");

        let catalog = load_hero_definitions().unwrap_or_else(|e| {
            tracing::warn!("{e}; using built-in hero stats");
            HeroCatalog::builtin()
        });

        let rng = match self.config.random_seed {
            Some(seed) => {
                tracing::info!("Using deterministic RNG with seed: {}", seed);
                GameRng::from_seed(seed)
            }
            None => {
                tracing::info!("Using non-deterministic RNG (no seed provided)");
                GameRng::from_entropy()
            }
        };

        let match_state =
            MatchState::new(match_config, catalog, rng).expect("Invalid match configuration");

        app.insert_resource(match_state)
            .insert_resource(HeadlessState {
                script: script.into(),
                max_turns: self.config.max_turns,
                output_path: self.config.output_path.clone(),
                ended: None,
                match_complete: false,
                report: None,
            })
            .init_resource::<CombatLog>()
            .add_event::<CombatEvent>()
            .add_systems(Startup, headless_setup)
            .add_systems(
                Update,
                (headless_step, record_combat_log, headless_check_end).chain(),
            )
            .add_systems(PostUpdate, headless_exit_on_complete);
    }
}

/// Setup system for the headless replay
fn headless_setup(
    match_state: Res<MatchState>,
    mut combat_log: ResMut<CombatLog>,
    mut events: EventWriter<CombatEvent>,
) {
    combat_log.clear();
    combat_log.log(
        CombatLogEventType::MatchEvent,
        "Match started (headless replay)".to_string(),
    );
    events.send(CombatEvent::MatchStarted {
        starting: match_state.current_slot(),
    });

    let roster = match_state.combatants();
    tracing::info!(
        "Headless match setup complete: {} ({}) vs {} ({})",
        roster[0].name,
        roster[0].class.name(),
        roster[1].name,
        roster[1].class.name()
    );
}

/// Advance the replay by one engine operation.
///
/// Rolling the die and submitting an intent happen on separate ticks so
/// the recorded log keeps the same ordering a live adapter would produce.
fn headless_step(
    mut match_state: ResMut<MatchState>,
    mut headless: ResMut<HeadlessState>,
    mut combat_log: ResMut<CombatLog>,
    mut events: EventWriter<CombatEvent>,
) {
    if headless.match_complete || headless.ended.is_some() || match_state.is_over() {
        return;
    }

    // Turn entry: the runner plays the die button
    if match_state.phase() == TurnPhase::AwaitingRoll {
        match match_state.roll_action_die() {
            Ok(applied) => {
                for event in applied.events {
                    events.send(event);
                }
            }
            Err(err) => tracing::error!("die roll rejected: {err}"),
        }
        return;
    }

    let Some(intent) = headless.script.pop_front() else {
        headless.ended = Some(MatchEndReason::ScriptExhausted);
        return;
    };

    let slot = match_state.current_slot();
    match match_state.submit(slot, intent) {
        Ok(applied) => {
            for event in applied.events {
                events.send(event);
            }
        }
        Err(err) => {
            tracing::debug!("intent rejected: {err}");
            combat_log.log(CombatLogEventType::Rejected, err.to_string());
        }
    }
}

/// Record engine events to the combat log
fn record_combat_log(
    mut combat_log: ResMut<CombatLog>,
    mut events: EventReader<CombatEvent>,
    match_state: Res<MatchState>,
) {
    for event in events.read() {
        combat_log.record_event(event, match_state.combatants());
    }
}

/// Detect the end of the replay and build the report
fn headless_check_end(
    match_state: Res<MatchState>,
    combat_log: Res<CombatLog>,
    mut headless: ResMut<HeadlessState>,
) {
    if headless.match_complete {
        return;
    }

    let reason = if match_state.is_over() {
        Some(MatchEndReason::Victory)
    } else if match_state.turn_count() >= headless.max_turns {
        Some(MatchEndReason::TurnLimit)
    } else {
        headless.ended
    };

    let Some(reason) = reason else {
        return;
    };

    match reason {
        MatchEndReason::Victory => {
            tracing::info!("Match ended! Player {} wins!", winner_number(&match_state))
        }
        MatchEndReason::ScriptExhausted => {
            tracing::info!("Replay script exhausted after {} turns", match_state.turn_count())
        }
        MatchEndReason::TurnLimit => {
            tracing::info!("Turn cap reached at {} turns", match_state.turn_count())
        }
    }

    let report = build_match_report(&match_state, &combat_log, reason);
    save_match_log(&match_state, &combat_log, headless.output_path.as_deref());
    headless.ended = Some(reason);
    headless.report = Some(report);
    headless.match_complete = true;
}

fn winner_number(match_state: &MatchState) -> u8 {
    match_state
        .winner()
        .map(|slot| slot.index() as u8 + 1)
        .unwrap_or(0)
}

/// Build the MatchReport from current match state
fn build_match_report(
    match_state: &MatchState,
    combat_log: &CombatLog,
    ended_by: MatchEndReason,
) -> MatchReport {
    MatchReport {
        winner: match_state.winner().map(|slot| slot.index() as u8 + 1),
        turns: match_state.turn_count(),
        ended_by,
        random_seed: match_state.rng_seed(),
        combatants: match_state
            .combatants()
            .iter()
            .map(CombatantMetadata::from_combatant)
            .collect(),
        log: combat_log
            .entries
            .iter()
            .map(|entry| entry.message.clone())
            .collect(),
    }
}

/// Save the combat log and match metadata to a file
fn save_match_log(match_state: &MatchState, combat_log: &CombatLog, output_path: Option<&str>) {
    let metadata = MatchMetadata {
        arena_size: match_state.board().size(),
        winner: match_state.winner().map(|slot| slot.index()),
        turns: match_state.turn_count(),
        random_seed: match_state.rng_seed(),
        combatants: match_state
            .combatants()
            .iter()
            .map(CombatantMetadata::from_combatant)
            .collect(),
    };

    match combat_log.save_to_file(&metadata, output_path) {
        Ok(filename) => {
            println!("Match complete. Log saved to: {}", filename);
        }
        Err(e) => {
            eprintln!("Failed to save combat log: {}", e);
        }
    }
}

/// Exit the app when the replay is complete
fn headless_exit_on_complete(headless: Res<HeadlessState>, mut exit: EventWriter<AppExit>) {
    if headless.match_complete {
        exit.send(AppExit::Success);
    }
}

/// Build the Bevy app for a scripted replay.
/// Minimal plugins only: no window, no rendering.
pub fn build_headless_app(config: HeadlessMatchConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::ZERO)))
        .add_plugins(HeadlessPlugin { config });
    app
}

/// Run a scripted match to completion and return its report
pub fn run_scripted_match(config: HeadlessMatchConfig) -> Result<MatchReport, String> {
    config.validate()?;

    let mut app = build_headless_app(config);
    app.run();

    app.world_mut()
        .resource_mut::<HeadlessState>()
        .report
        .take()
        .ok_or_else(|| "headless match ended without a report".to_string())
}

/// Run a headless match with the given configuration (CLI entry point)
pub fn run_headless_match(config: HeadlessMatchConfig) -> Result<(), String> {
    println!("Starting headless match replay...");
    println!("  Player 1: {}", config.player1);
    println!("  Player 2: {}", config.player2);
    println!("  Arena: {0}x{0}", config.arena_size);
    println!("  Scripted intents: {}", config.script.len());

    let report = run_scripted_match(config)?;

    match report.winner {
        Some(player) => println!("Match ended! Player {} wins!", player),
        None => println!("Replay stopped without a winner ({:?})", report.ended_by),
    }

    Ok(())
}
