//! Pure combat rules
//!
//! Free functions for the damage math and action-die gating, kept outside
//! `MatchState` so they can be unit tested without building a board.

use serde::{Deserialize, Serialize};

use super::constants::{
    CRITICAL_DAMAGE_FACTOR, DEFENSE_DAMAGE_FACTOR, DIE_FAILURE_MAX, DIE_SUCCESS_MAX,
    FAST_ATTACK_MULTIPLIER, HEAVY_ATTACK_MULTIPLIER, NORMAL_ATTACK_MULTIPLIER,
};

/// Kinds of basic attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    /// Low damage, enabled by a plain success on the action die
    Fast,
    /// Baseline damage; never offered by the die, kept as the fallback
    /// multiplier for rules-level callers
    Normal,
    /// High damage, enabled only by a critical on the action die
    Heavy,
}

impl AttackKind {
    /// Damage multiplier applied to the attacker's working attack damage
    pub fn multiplier(&self) -> f64 {
        match self {
            AttackKind::Fast => FAST_ATTACK_MULTIPLIER,
            AttackKind::Normal => NORMAL_ATTACK_MULTIPLIER,
            AttackKind::Heavy => HEAVY_ATTACK_MULTIPLIER,
        }
    }

    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            AttackKind::Fast => "Fast Attack",
            AttackKind::Normal => "Attack",
            AttackKind::Heavy => "Heavy Attack",
        }
    }

    /// Parse an attack kind as it appears in scripted-match files
    pub fn parse(name: &str) -> Result<AttackKind, String> {
        match name {
            "fast" => Ok(AttackKind::Fast),
            "normal" => Ok(AttackKind::Normal),
            "heavy" => Ok(AttackKind::Heavy),
            _ => Err(format!(
                "Unknown attack kind: '{}'. Valid kinds: fast, normal, heavy",
                name
            )),
        }
    }
}

/// Outcome band of an action-die roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DieOutcome {
    /// 1-2: no attack kind enabled this turn
    Failure,
    /// 3-5: fast attack enabled
    Success,
    /// 6: heavy attack enabled, all attack damage doubled
    Critical,
}

impl DieOutcome {
    pub fn from_roll(roll: u8) -> Self {
        if roll <= DIE_FAILURE_MAX {
            DieOutcome::Failure
        } else if roll <= DIE_SUCCESS_MAX {
            DieOutcome::Success
        } else {
            DieOutcome::Critical
        }
    }

    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            DieOutcome::Failure => "failure",
            DieOutcome::Success => "success",
            DieOutcome::Critical => "critical",
        }
    }
}

/// Which attack kind, if any, the turn's die roll enables
pub fn offerable_attack(roll: u8) -> Option<AttackKind> {
    match DieOutcome::from_roll(roll) {
        DieOutcome::Failure => None,
        DieOutcome::Success => Some(AttackKind::Fast),
        DieOutcome::Critical => Some(AttackKind::Heavy),
    }
}

/// Compute the damage of a basic attack before mitigation.
///
/// `floor(attack × multiplier)`, doubled when the turn's action die came
/// up critical. Floats are f64 so the floor lands where the flooring of
/// exact decimal multipliers expects it (e.g. `floor(25 × 1.8) = 45`).
pub fn attack_damage(attack: i32, kind: AttackKind, critical: bool) -> i32 {
    debug_assert!(attack >= 0, "attack_damage: attack cannot be negative, got {}", attack);

    let base = (attack as f64 * kind.multiplier()).floor() as i32;
    if critical {
        base * CRITICAL_DAMAGE_FACTOR
    } else {
        base
    }
}

/// Damage that gets through an active defense stance (floored half)
pub fn mitigate_defense(damage: i32) -> i32 {
    debug_assert!(damage >= 0, "mitigate_defense: damage cannot be negative, got {}", damage);

    (damage as f64 * DEFENSE_DAMAGE_FACTOR).floor() as i32
}

/// Damage of a special-ability hit: `floor(attack × factor)`
pub fn special_damage(attack: i32, factor: f64) -> i32 {
    debug_assert!(attack >= 0, "special_damage: attack cannot be negative, got {}", attack);

    (attack as f64 * factor).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn die_bands() {
        assert_eq!(DieOutcome::from_roll(1), DieOutcome::Failure);
        assert_eq!(DieOutcome::from_roll(2), DieOutcome::Failure);
        assert_eq!(DieOutcome::from_roll(3), DieOutcome::Success);
        assert_eq!(DieOutcome::from_roll(5), DieOutcome::Success);
        assert_eq!(DieOutcome::from_roll(6), DieOutcome::Critical);
    }

    #[test]
    fn die_gates_attack_kinds() {
        assert_eq!(offerable_attack(1), None);
        assert_eq!(offerable_attack(4), Some(AttackKind::Fast));
        assert_eq!(offerable_attack(6), Some(AttackKind::Heavy));
    }

    #[test]
    fn attack_damage_floors_then_doubles() {
        // fast: floor(30 * 0.8) = 24
        assert_eq!(attack_damage(30, AttackKind::Fast, false), 24);
        // heavy crit: floor(30 * 1.5) * 2 = 90
        assert_eq!(attack_damage(30, AttackKind::Heavy, true), 90);
        // the f64 path keeps exact decimal floors exact
        assert_eq!(special_damage(25, 1.8), 45);
        assert_eq!(special_damage(20, 0.8), 16);
    }

    #[test]
    fn defense_halves_with_floor() {
        assert_eq!(mitigate_defense(45), 22);
        assert_eq!(mitigate_defense(24), 12);
        assert_eq!(mitigate_defense(0), 0);
    }
}
