//! Combatant state for one active player.

use serde::{Deserialize, Serialize};

use crate::arena::Position;
use crate::catalog::{HeroClass, HeroStats};

/// Which of the two players a combatant (or an intent) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    /// Index into the roster (0 or 1)
    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    /// The opposing slot
    pub fn other(self) -> PlayerSlot {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }

    pub fn from_index(index: usize) -> Option<PlayerSlot> {
        match index {
            0 => Some(PlayerSlot::One),
            1 => Some(PlayerSlot::Two),
            _ => None,
        }
    }

    /// Default display name for this slot
    pub fn default_name(self) -> &'static str {
        match self {
            PlayerSlot::One => "Player 1",
            PlayerSlot::Two => "Player 2",
        }
    }
}

/// One player's hero for the duration of a match.
///
/// Created at match start, never removed: a defeated combatant stays in
/// the roster with zero health and is only excluded from alive queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub slot: PlayerSlot,
    pub class: HeroClass,
    pub name: String,
    pub pos: Position,

    /// Current health, always within [0, max_health]
    pub health: i32,
    pub max_health: i32,

    /// Archetype damage, permanently raised by damage bonuses
    pub base_damage: i32,
    /// Working damage fed into attack multipliers; raised together with
    /// `base_damage` by bonuses and overwritten by the Knight's War Cry
    pub attack_damage: i32,
    /// Attack reach, permanently raised by range bonuses (Wizard only)
    pub attack_range: u32,
    pub move_range: u32,
    /// Marks evasive archetypes; the evasion roll itself is a d6 threshold
    pub dodge_chance: f32,

    /// Turns until the special ability is available again
    pub special_cooldown: u8,
    /// Set by the defend action, cleared by the next incoming attack or
    /// at the start of the owner's next turn
    pub is_defending: bool,
    /// Set by the dodge action, same lifetime as `is_defending`
    pub is_dodging: bool,

    /// Damage this combatant dealt over the match (post-clamp)
    pub damage_dealt: i32,
    /// Damage this combatant received over the match (post-clamp)
    pub damage_taken: i32,
    /// Health this combatant recovered over the match (overheal excluded)
    pub healing_received: i32,
}

impl Combatant {
    /// Spawn a fresh combatant from its archetype's catalog stats
    pub fn new(
        slot: PlayerSlot,
        class: HeroClass,
        stats: &HeroStats,
        name: String,
        pos: Position,
    ) -> Self {
        Self {
            slot,
            class,
            name,
            pos,
            health: stats.max_health,
            max_health: stats.max_health,
            base_damage: stats.base_damage,
            attack_damage: stats.base_damage,
            attack_range: stats.attack_range,
            move_range: stats.move_range,
            dodge_chance: stats.dodge_chance,
            special_cooldown: 0,
            is_defending: false,
            is_dodging: false,
            damage_dealt: 0,
            damage_taken: 0,
            healing_received: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Whether this archetype may ready a dodge
    pub fn can_dodge(&self) -> bool {
        self.dodge_chance > 0.0
    }
}
