//! Hero archetype catalog
//!
//! Static stat tables for the three playable archetypes, plus an optional
//! RON-backed override file so balance can be tuned without recompiling.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Available hero archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeroClass {
    Knight,
    Ninja,
    Wizard,
}

impl HeroClass {
    /// Get all available hero archetypes
    pub fn all() -> &'static [HeroClass] {
        &[HeroClass::Knight, HeroClass::Ninja, HeroClass::Wizard]
    }

    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            HeroClass::Knight => "Knight",
            HeroClass::Ninja => "Ninja",
            HeroClass::Wizard => "Wizard",
        }
    }

    /// Get a short description
    pub fn description(&self) -> &'static str {
        match self {
            HeroClass::Knight => "Durable melee tank",
            HeroClass::Ninja => "Evasive skirmisher",
            HeroClass::Wizard => "Long-range caster",
        }
    }

    /// Get the name of the archetype's special ability
    pub fn special_name(&self) -> &'static str {
        match self {
            HeroClass::Knight => "War Cry",
            HeroClass::Ninja => "Double Strike",
            HeroClass::Wizard => "Arcane Storm",
        }
    }

    /// Parse an archetype name as it appears in configuration files
    pub fn parse(name: &str) -> Result<HeroClass, String> {
        match name {
            "Knight" => Ok(HeroClass::Knight),
            "Ninja" => Ok(HeroClass::Ninja),
            "Wizard" => Ok(HeroClass::Wizard),
            _ => Err(format!(
                "Unknown hero class: '{}'. Valid classes: Knight, Ninja, Wizard",
                name
            )),
        }
    }
}

/// Base stats for one hero archetype.
///
/// These are the values copied onto a freshly spawned combatant; the
/// combatant's working copies may then drift (bonus pickups, specials)
/// while the catalog entry stays immutable for the whole match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeroStats {
    /// Maximum (and starting) health
    pub max_health: i32,
    /// Damage before attack-kind multipliers
    pub base_damage: i32,
    /// Maximum Manhattan distance covered by one move
    pub move_range: u32,
    /// Maximum Manhattan distance of a valid attack target
    pub attack_range: u32,
    /// Turns the special ability stays unavailable after a successful use
    pub special_cooldown: u8,
    /// Marks evasive archetypes (0.0 = cannot dodge). The dodge resolution
    /// itself is a fixed d6 threshold roll, not a percentage check.
    #[serde(default)]
    pub dodge_chance: f32,
}

impl HeroClass {
    /// Built-in stats for this archetype
    pub fn builtin_stats(&self) -> HeroStats {
        match self {
            HeroClass::Knight => HeroStats {
                max_health: 120,
                base_damage: 30,
                move_range: 1,
                attack_range: 1,
                special_cooldown: 3,
                dodge_chance: 0.0,
            },
            HeroClass::Ninja => HeroStats {
                max_health: 90,
                base_damage: 20,
                move_range: 2,
                attack_range: 1,
                special_cooldown: 3,
                dodge_chance: 0.5,
            },
            HeroClass::Wizard => HeroStats {
                max_health: 80,
                base_damage: 25,
                move_range: 1,
                attack_range: 3,
                special_cooldown: 3,
                dodge_chance: 0.0,
            },
        }
    }
}

/// On-disk layout of `assets/config/heroes.ron`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroRosterConfig {
    pub heroes: HashMap<HeroClass, HeroStats>,
}

/// The stat table handed to the engine at match start
#[derive(Debug, Clone)]
pub struct HeroCatalog {
    stats: HashMap<HeroClass, HeroStats>,
}

impl HeroCatalog {
    /// Catalog with the built-in stat table
    pub fn builtin() -> Self {
        Self {
            stats: HeroClass::all()
                .iter()
                .map(|class| (*class, class.builtin_stats()))
                .collect(),
        }
    }

    /// Catalog from a parsed roster config
    pub fn from_config(config: HeroRosterConfig) -> Self {
        Self {
            stats: config.heroes,
        }
    }

    /// Get the stats for an archetype, panicking if not defined.
    /// Use this when the catalog has been validated (always true for
    /// `builtin` and for catalogs returned by `load_hero_definitions`).
    pub fn stats(&self, class: HeroClass) -> &HeroStats {
        self.stats
            .get(&class)
            .unwrap_or_else(|| panic!("Hero class {:?} not found in catalog", class))
    }

    /// Check that every archetype has a stat entry
    pub fn validate(&self) -> Result<(), Vec<HeroClass>> {
        let missing: Vec<HeroClass> = HeroClass::all()
            .iter()
            .copied()
            .filter(|class| !self.stats.contains_key(class))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }
}

impl Default for HeroCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Load hero definitions from assets/config/heroes.ron
pub fn load_hero_definitions() -> Result<HeroCatalog, String> {
    load_hero_definitions_from(Path::new("assets/config/heroes.ron"))
}

/// Load hero definitions from an explicit path
pub fn load_hero_definitions_from(path: &Path) -> Result<HeroCatalog, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let config: HeroRosterConfig = ron::from_str(&contents)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;

    let catalog = HeroCatalog::from_config(config);

    catalog
        .validate()
        .map_err(|missing| format!("Missing hero definitions: {:?}", missing))?;

    tracing::info!("Loaded hero definitions from {}", path.display());

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_complete() {
        assert!(HeroCatalog::builtin().validate().is_ok());
    }

    #[test]
    fn only_the_ninja_is_evasive() {
        for class in HeroClass::all() {
            let evasive = class.builtin_stats().dodge_chance > 0.0;
            assert_eq!(evasive, *class == HeroClass::Ninja);
        }
    }

    #[test]
    fn class_names_round_trip_through_parse() {
        for class in HeroClass::all() {
            assert_eq!(HeroClass::parse(class.name()), Ok(*class));
        }
        assert!(HeroClass::parse("Paladin").is_err());
    }

    #[test]
    fn shipped_roster_matches_builtin_stats() {
        let catalog = load_hero_definitions().expect("assets/config/heroes.ron must load");
        for class in HeroClass::all() {
            assert_eq!(catalog.stats(*class), &class.builtin_stats());
        }
    }
}
