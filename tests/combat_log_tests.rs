//! Unit tests for combat log query and aggregation methods
//!
//! These tests verify that the CombatLog correctly:
//! - Aggregates damage by attack/ability
//! - Filters entries by event type
//! - Formats engine events into readable messages

use regex::Regex;

use gridduel::arena::Position;
use gridduel::catalog::HeroClass;
use gridduel::combat::events::CombatEvent;
use gridduel::combat::log::{CombatLog, CombatLogEventType};
use gridduel::engine::{Combatant, PlayerSlot};

fn create_test_log() -> CombatLog {
    CombatLog::default()
}

fn test_roster() -> Vec<Combatant> {
    vec![
        Combatant::new(
            PlayerSlot::One,
            HeroClass::Knight,
            &HeroClass::Knight.builtin_stats(),
            "Player 1".to_string(),
            Position::new(0, 0),
        ),
        Combatant::new(
            PlayerSlot::Two,
            HeroClass::Wizard,
            &HeroClass::Wizard.builtin_stats(),
            "Player 2".to_string(),
            Position::new(0, 6),
        ),
    ]
}

// =============================================================================
// Damage Aggregation Tests
// =============================================================================

#[test]
fn test_damage_by_ability_empty_log() {
    let log = create_test_log();
    let damage = log.damage_by_ability("Player 1");
    assert!(damage.is_empty(), "Empty log should return empty damage map");
}

#[test]
fn test_damage_by_ability_single_source() {
    let mut log = create_test_log();

    log.log_damage(
        "Player 1".to_string(),
        "Player 2".to_string(),
        "Heavy Attack".to_string(),
        45,
        false,
        "Test message".to_string(),
    );
    log.log_damage(
        "Player 1".to_string(),
        "Player 2".to_string(),
        "Heavy Attack".to_string(),
        45,
        false,
        "Test message".to_string(),
    );
    log.log_damage(
        "Player 1".to_string(),
        "Player 2".to_string(),
        "Fast Attack".to_string(),
        24,
        false,
        "Test message".to_string(),
    );

    let damage = log.damage_by_ability("Player 1");

    assert_eq!(damage.len(), 2, "Should have 2 different attack kinds");
    assert_eq!(damage.get("Heavy Attack"), Some(&90));
    assert_eq!(damage.get("Fast Attack"), Some(&24));
}

#[test]
fn test_total_damage_dealt_per_source() {
    let mut log = create_test_log();

    log.log_damage(
        "Player 1".to_string(),
        "Player 2".to_string(),
        "Fast Attack".to_string(),
        24,
        false,
        "Test".to_string(),
    );
    log.log_damage(
        "Player 2".to_string(),
        "Player 1".to_string(),
        "Arcane Storm".to_string(),
        45,
        false,
        "Test".to_string(),
    );

    assert_eq!(log.total_damage_dealt("Player 1"), 24);
    assert_eq!(log.total_damage_dealt("Player 2"), 45);
    assert_eq!(log.total_damage_dealt("Player 3"), 0);
}

// =============================================================================
// Filtering & Ordering Tests
// =============================================================================

#[test]
fn test_filter_by_type_and_hp_changes() {
    let mut log = create_test_log();
    log.log(CombatLogEventType::MatchEvent, "Match started".to_string());
    log.log(CombatLogEventType::Movement, "Player 1 moves".to_string());
    log.log_damage(
        "Player 1".to_string(),
        "Player 2".to_string(),
        "Fast Attack".to_string(),
        24,
        false,
        "hit".to_string(),
    );
    log.log(CombatLogEventType::Healing, "heal".to_string());

    assert_eq!(log.filter_by_type(CombatLogEventType::Movement).len(), 1);
    assert_eq!(log.filter_by_type(CombatLogEventType::Damage).len(), 1);
    assert_eq!(log.hp_changes_only().len(), 2);
}

#[test]
fn test_recent_returns_last_entries_in_order() {
    let mut log = create_test_log();
    for i in 0..10 {
        log.log(CombatLogEventType::MatchEvent, format!("event {}", i));
    }

    let recent = log.recent(3);
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].message, "event 7");
    assert_eq!(recent[2].message, "event 9");
}

#[test]
fn test_entries_stamped_with_current_turn() {
    let mut log = create_test_log();
    log.log(CombatLogEventType::MatchEvent, "turn zero".to_string());
    log.current_turn = 4;
    log.log(CombatLogEventType::MatchEvent, "turn four".to_string());

    assert_eq!(log.entries[0].turn, 0);
    assert_eq!(log.entries[1].turn, 4);
}

// =============================================================================
// Event Formatting Tests
// =============================================================================

#[test]
fn test_damage_event_message_format() {
    let mut log = create_test_log();
    let roster = test_roster();

    log.record_event(
        &CombatEvent::Damage {
            source: PlayerSlot::One,
            target: PlayerSlot::Two,
            ability: "Heavy Attack".to_string(),
            amount: 90,
            final_amount: 80,
            critical: true,
        },
        &roster,
    );

    let pattern =
        Regex::new(r"^Player 1's Heavy Attack hits Player 2 for 80 damage \(Critical\)").unwrap();
    assert!(
        pattern.is_match(&log.entries[0].message),
        "unexpected message: {}",
        log.entries[0].message
    );
    assert_eq!(log.total_damage_dealt("Player 1"), 80);
}

#[test]
fn test_die_roll_event_records_outcome_band() {
    let mut log = create_test_log();
    let roster = test_roster();

    log.record_event(
        &CombatEvent::DieRolled {
            slot: PlayerSlot::Two,
            value: 6,
            outcome: gridduel::combat::rules::DieOutcome::Critical,
        },
        &roster,
    );

    assert_eq!(log.entries[0].event_type, CombatLogEventType::DieRoll);
    assert!(log.entries[0].message.contains("6 (critical)"));
}

#[test]
fn test_turn_started_event_advances_turn_stamp() {
    let mut log = create_test_log();
    let roster = test_roster();

    log.record_event(
        &CombatEvent::TurnStarted {
            slot: PlayerSlot::One,
            turn: 3,
        },
        &roster,
    );
    log.record_event(
        &CombatEvent::DefendRaised {
            slot: PlayerSlot::One,
        },
        &roster,
    );

    assert_eq!(log.current_turn, 3);
    assert_eq!(log.entries[1].turn, 3);
    assert_eq!(log.entries[1].event_type, CombatLogEventType::Stance);
}

#[test]
fn test_clear_resets_everything() {
    let mut log = create_test_log();
    log.current_turn = 9;
    log.log_damage(
        "Player 1".to_string(),
        "Player 2".to_string(),
        "Fast Attack".to_string(),
        24,
        false,
        "hit".to_string(),
    );

    log.clear();

    assert!(log.entries.is_empty());
    assert_eq!(log.current_turn, 0);
    assert!(log.damage_by_ability("Player 1").is_empty());
}
