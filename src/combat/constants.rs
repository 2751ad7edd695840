//! Combat Constants
//!
//! Centralized location for magic numbers used throughout the combat rules.
//! This makes it easier to tune balance and ensures consistency.

// ============================================================================
// Action Die
// ============================================================================

/// Number of faces on the action die
pub const DIE_SIDES: u8 = 6;

/// Highest roll counted as a failure (no attack kind enabled this turn)
pub const DIE_FAILURE_MAX: u8 = 2;

/// Highest roll counted as a plain success (fast attack enabled).
/// Anything above is a critical: heavy attack enabled and damage doubled.
pub const DIE_SUCCESS_MAX: u8 = 5;

/// Minimum evasion roll that fully negates an incoming attack
pub const DODGE_SUCCESS_THRESHOLD: u8 = 4;

// ============================================================================
// Attack Multipliers
// ============================================================================

/// Fast attack damage multiplier (low damage, only needs a plain success)
pub const FAST_ATTACK_MULTIPLIER: f64 = 0.8;

/// Normal attack damage multiplier (the fallback kind)
pub const NORMAL_ATTACK_MULTIPLIER: f64 = 1.0;

/// Heavy attack damage multiplier (high damage, needs a critical roll)
pub const HEAVY_ATTACK_MULTIPLIER: f64 = 1.5;

/// Damage factor applied on top of the multiplier when the action die
/// rolled a critical
pub const CRITICAL_DAMAGE_FACTOR: i32 = 2;

/// Fraction of damage that gets through an active defense stance
pub const DEFENSE_DAMAGE_FACTOR: f64 = 0.5;

// ============================================================================
// Special Abilities
// ============================================================================

/// Knight's War Cry: attack damage becomes this multiple of base damage
pub const KNIGHT_SPECIAL_DAMAGE_FACTOR: f64 = 1.5;

/// Knight's War Cry: health restored alongside the damage buff
pub const KNIGHT_SPECIAL_HEAL: i32 = 20;

/// Ninja's Double Strike: per-hit damage multiplier (applied twice)
pub const NINJA_SPECIAL_DAMAGE_FACTOR: f64 = 0.8;

/// Wizard's Arcane Storm: single-hit damage multiplier
pub const WIZARD_SPECIAL_DAMAGE_FACTOR: f64 = 1.8;

// ============================================================================
// Bonuses
// ============================================================================

/// Health restored by a health bonus (clamped to max health)
pub const HEALTH_BONUS_AMOUNT: i32 = 20;

/// Permanent damage added by a damage bonus
pub const DAMAGE_BONUS_AMOUNT: i32 = 5;

/// Permanent attack range added by a range bonus (Wizard only)
pub const RANGE_BONUS_AMOUNT: u32 = 1;

// ============================================================================
// Arena
// ============================================================================

/// Default board edge length
pub const DEFAULT_ARENA_SIZE: usize = 7;

/// Fraction of cells turned into obstacles on a fresh board
pub const DEFAULT_OBSTACLE_DENSITY: f32 = 0.10;

/// Fraction of cells seeded with a bonus pickup on a fresh board
pub const DEFAULT_BONUS_DENSITY: f32 = 0.05;

/// Smallest board that can host four distinct spawn corners
pub const MIN_ARENA_SIZE: usize = 2;
