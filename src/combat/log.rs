//! Combat logging
//!
//! Records all combat events for display and post-match analysis.

use std::collections::HashMap;

use bevy::prelude::*;
use serde::Serialize;

use crate::engine::combatant::Combatant;

use super::events::CombatEvent;

/// A single entry in the combat log
#[derive(Debug, Clone, Serialize)]
pub struct CombatLogEntry {
    /// Turn the event happened on (completed-turn counter at event time)
    pub turn: u32,
    /// The type of event
    pub event_type: CombatLogEventType,
    /// Human-readable description of the event
    pub message: String,
}

/// Types of combat log events for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CombatLogEventType {
    /// Damage dealt
    Damage,
    /// Healing done
    Healing,
    /// A combatant moved
    Movement,
    /// A bonus pickup was consumed
    Bonus,
    /// Action die or evasion roll resolved
    DieRoll,
    /// Defend or dodge stance raised or tested
    Stance,
    /// Attack/special committed or a special resolved
    Ability,
    /// Combatant defeated
    Death,
    /// An intent was rejected by the rules
    Rejected,
    /// Match event (start, end, turn changes)
    MatchEvent,
}

/// A structured record of one damage event, kept alongside the
/// human-readable entry for aggregation queries
#[derive(Debug, Clone, Serialize)]
pub struct DamageRecord {
    pub source: String,
    pub target: String,
    pub ability: String,
    pub amount: i32,
    pub critical: bool,
}

/// The combat log resource storing all events
#[derive(Resource, Default)]
pub struct CombatLog {
    /// All log entries in chronological order
    pub entries: Vec<CombatLogEntry>,
    /// Completed-turn counter used to stamp new entries
    pub current_turn: u32,
    damage_records: Vec<DamageRecord>,
}

impl CombatLog {
    /// Clear the log for a new match
    pub fn clear(&mut self) {
        self.entries.clear();
        self.damage_records.clear();
        self.current_turn = 0;
    }

    /// Add a new entry to the log
    pub fn log(&mut self, event_type: CombatLogEventType, message: String) {
        self.entries.push(CombatLogEntry {
            turn: self.current_turn,
            event_type,
            message,
        });
    }

    /// Add a damage entry plus its structured record
    pub fn log_damage(
        &mut self,
        source: String,
        target: String,
        ability: String,
        amount: i32,
        critical: bool,
        message: String,
    ) {
        self.damage_records.push(DamageRecord {
            source,
            target,
            ability,
            amount,
            critical,
        });
        self.log(CombatLogEventType::Damage, message);
    }

    /// Record one engine event as a formatted log entry
    pub fn record_event(&mut self, event: &CombatEvent, roster: &[Combatant]) {
        let name = |slot: crate::engine::combatant::PlayerSlot| roster[slot.index()].name.clone();

        match event {
            CombatEvent::MatchStarted { starting } => {
                self.log(
                    CombatLogEventType::MatchEvent,
                    format!("Match started! {} goes first", name(*starting)),
                );
            }
            CombatEvent::TurnStarted { slot, turn } => {
                self.current_turn = *turn;
                let combatant = &roster[slot.index()];
                self.log(
                    CombatLogEventType::MatchEvent,
                    format!("{}'s turn ({})", combatant.name, combatant.class.name()),
                );
            }
            CombatEvent::DieRolled { slot, value, outcome } => {
                self.log(
                    CombatLogEventType::DieRoll,
                    format!(
                        "{} rolls the action die: {} ({})",
                        name(*slot),
                        value,
                        outcome.name()
                    ),
                );
            }
            CombatEvent::Moved { slot, to, .. } => {
                self.log(
                    CombatLogEventType::Movement,
                    format!("{} moves to {}", name(*slot), to),
                );
            }
            CombatEvent::BonusPicked { slot, kind, .. } => {
                self.log(
                    CombatLogEventType::Bonus,
                    format!("{} picks up a {} bonus", name(*slot), kind.name()),
                );
            }
            CombatEvent::AttackCommitted { slot, kind } => {
                self.log(
                    CombatLogEventType::Ability,
                    format!("{} readies a {}", name(*slot), kind.name()),
                );
            }
            CombatEvent::SpecialCommitted { slot } => {
                let combatant = &roster[slot.index()];
                self.log(
                    CombatLogEventType::Ability,
                    format!("{} readies {}", combatant.name, combatant.class.special_name()),
                );
            }
            CombatEvent::Damage {
                source,
                target,
                ability,
                final_amount,
                critical,
                ..
            } => {
                let target_combatant = &roster[target.index()];
                let crit = if *critical { " (Critical)" } else { "" };
                let message = format!(
                    "{}'s {} hits {} for {} damage{} ({}/{} HP left)",
                    name(*source),
                    ability,
                    target_combatant.name,
                    final_amount,
                    crit,
                    target_combatant.health,
                    target_combatant.max_health
                );
                self.log_damage(
                    name(*source),
                    target_combatant.name.clone(),
                    ability.clone(),
                    *final_amount,
                    *critical,
                    message,
                );
            }
            CombatEvent::Healing { target, ability, amount } => {
                self.log(
                    CombatLogEventType::Healing,
                    format!("{} restores {} HP to {}", ability, amount, name(*target)),
                );
            }
            CombatEvent::DefendRaised { slot } => {
                self.log(
                    CombatLogEventType::Stance,
                    format!("{} braces to defend: the next hit is halved", name(*slot)),
                );
            }
            CombatEvent::DodgeRaised { slot } => {
                self.log(
                    CombatLogEventType::Stance,
                    format!("{} prepares to dodge the next attack", name(*slot)),
                );
            }
            CombatEvent::DodgeResolved { slot, roll, success } => {
                let message = if *success {
                    format!("{} rolls {} and dodges the attack!", name(*slot), roll)
                } else {
                    format!("{} rolls {}: the dodge fails", name(*slot), roll)
                };
                self.log(CombatLogEventType::Stance, message);
            }
            CombatEvent::SpecialUsed { slot, name: ability } => {
                self.log(
                    CombatLogEventType::Ability,
                    format!("{} uses {}!", name(*slot), ability),
                );
            }
            CombatEvent::Death { slot } => {
                self.log(
                    CombatLogEventType::Death,
                    format!("{} has been defeated", name(*slot)),
                );
            }
            CombatEvent::MatchEnded { winner } => {
                self.log(
                    CombatLogEventType::MatchEvent,
                    format!("{} wins the match!", name(*winner)),
                );
            }
        }
    }

    /// Get entries filtered by event type
    pub fn filter_by_type(&self, event_type: CombatLogEventType) -> Vec<&CombatLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Get only HP-changing events (damage and healing)
    pub fn hp_changes_only(&self) -> Vec<&CombatLogEntry> {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    e.event_type,
                    CombatLogEventType::Damage | CombatLogEventType::Healing
                )
            })
            .collect()
    }

    /// Get the last N entries
    pub fn recent(&self, count: usize) -> Vec<&CombatLogEntry> {
        self.entries.iter().rev().take(count).rev().collect()
    }

    /// Total damage a source dealt, broken down by attack/ability name
    pub fn damage_by_ability(&self, source: &str) -> HashMap<String, i32> {
        let mut totals = HashMap::new();
        for record in self.damage_records.iter().filter(|r| r.source == source) {
            *totals.entry(record.ability.clone()).or_insert(0) += record.amount;
        }
        totals
    }

    /// Total damage a source dealt across all attacks and abilities
    pub fn total_damage_dealt(&self, source: &str) -> i32 {
        self.damage_records
            .iter()
            .filter(|r| r.source == source)
            .map(|r| r.amount)
            .sum()
    }

    /// Save the log and match metadata as JSON.
    /// Returns the path written to.
    pub fn save_to_file(
        &self,
        metadata: &MatchMetadata,
        output_path: Option<&str>,
    ) -> Result<String, String> {
        #[derive(Serialize)]
        struct SavedLog<'a> {
            metadata: &'a MatchMetadata,
            entries: &'a [CombatLogEntry],
        }

        let path = output_path.unwrap_or("gridduel_match.json").to_string();
        let saved = SavedLog {
            metadata,
            entries: &self.entries,
        };

        let json = serde_json::to_string_pretty(&saved)
            .map_err(|e| format!("Failed to serialize match log: {}", e))?;
        std::fs::write(&path, json).map_err(|e| format!("Failed to write {}: {}", path, e))?;

        Ok(path)
    }
}

/// Summary of a finished (or cut-off) match, saved alongside the log
#[derive(Debug, Clone, Serialize)]
pub struct MatchMetadata {
    pub arena_size: usize,
    /// Winning slot index (0 or 1), None if the replay was cut off
    pub winner: Option<usize>,
    pub turns: u32,
    pub random_seed: Option<u64>,
    pub combatants: Vec<CombatantMetadata>,
}

/// Per-combatant stats snapshot saved with the match metadata
#[derive(Debug, Clone, Serialize)]
pub struct CombatantMetadata {
    pub name: String,
    pub class_name: String,
    pub max_health: i32,
    pub final_health: i32,
    pub survived: bool,
    pub damage_dealt: i32,
    pub damage_taken: i32,
    pub healing_received: i32,
}

impl CombatantMetadata {
    /// Snapshot one combatant's end-of-match stats
    pub fn from_combatant(combatant: &Combatant) -> Self {
        Self {
            name: combatant.name.clone(),
            class_name: combatant.class.name().to_string(),
            max_health: combatant.max_health,
            final_health: combatant.health,
            survived: combatant.is_alive(),
            damage_dealt: combatant.damage_dealt,
            damage_taken: combatant.damage_taken,
            healing_received: combatant.healing_received,
        }
    }
}
