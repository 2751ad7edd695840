//! Match configuration consumed once at match start.

use crate::catalog::HeroClass;
use crate::combat::constants::{
    DEFAULT_ARENA_SIZE, DEFAULT_BONUS_DENSITY, DEFAULT_OBSTACLE_DENSITY, MIN_ARENA_SIZE,
};

use super::combatant::PlayerSlot;
use super::error::RulesError;

/// Everything the engine needs to set up one match
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Player 1's hero pick
    pub hero1: HeroClass,
    /// Player 2's hero pick
    pub hero2: HeroClass,
    pub player1_name: String,
    pub player2_name: String,
    /// Board edge length
    pub arena_size: usize,
    /// Fraction of cells turned into obstacles
    pub obstacle_density: f32,
    /// Fraction of cells seeded with bonuses
    pub bonus_density: f32,
    /// Pinned starting player; None lets the engine roll for it
    /// (1-3 on a d6 means Player 1 starts)
    pub starting_slot: Option<PlayerSlot>,
}

impl MatchConfig {
    /// Config with default board parameters for the given hero picks
    pub fn new(hero1: HeroClass, hero2: HeroClass) -> Self {
        Self {
            hero1,
            hero2,
            player1_name: PlayerSlot::One.default_name().to_string(),
            player2_name: PlayerSlot::Two.default_name().to_string(),
            arena_size: DEFAULT_ARENA_SIZE,
            obstacle_density: DEFAULT_OBSTACLE_DENSITY,
            bonus_density: DEFAULT_BONUS_DENSITY,
            starting_slot: None,
        }
    }

    /// Config from raw archetype ids, as submitted by an adapter's hero
    /// pick screen. An unknown id is fatal to starting the match.
    pub fn from_ids(hero1: &str, hero2: &str) -> Result<Self, RulesError> {
        let hero1 = HeroClass::parse(hero1).map_err(RulesError::InvalidSelection)?;
        let hero2 = HeroClass::parse(hero2).map_err(RulesError::InvalidSelection)?;
        Ok(Self::new(hero1, hero2))
    }

    /// Check the configuration can produce a playable board
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.arena_size < MIN_ARENA_SIZE {
            return Err(RulesError::Configuration(format!(
                "arena size {} cannot host four distinct spawn corners (minimum {})",
                self.arena_size, MIN_ARENA_SIZE
            )));
        }
        for (label, density) in [
            ("obstacle_density", self.obstacle_density),
            ("bonus_density", self.bonus_density),
        ] {
            if !(0.0..=1.0).contains(&density) {
                return Err(RulesError::Configuration(format!(
                    "{} must be within [0, 1], got {}",
                    label, density
                )));
            }
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new(HeroClass::Knight, HeroClass::Wizard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(MatchConfig::default().validate().is_ok());
    }

    #[test]
    fn degenerate_sizes_are_rejected() {
        let mut config = MatchConfig::default();
        config.arena_size = 1;
        assert!(matches!(
            config.validate(),
            Err(RulesError::Configuration(_))
        ));
    }

    #[test]
    fn densities_must_be_fractions() {
        let mut config = MatchConfig::default();
        config.bonus_density = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_hero_ids_are_invalid_selections() {
        assert!(matches!(
            MatchConfig::from_ids("Knight", "Druid"),
            Err(RulesError::InvalidSelection(_))
        ));
        assert!(MatchConfig::from_ids("Ninja", "Wizard").is_ok());
    }
}
