//! JSON configuration parsing for headless mode
//!
//! Parses scripted-match JSON files and converts them to the engine's
//! MatchConfig format plus an intent script.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::arena::Position;
use crate::catalog::HeroClass;
use crate::combat::constants::{
    DEFAULT_ARENA_SIZE, DEFAULT_BONUS_DENSITY, DEFAULT_OBSTACLE_DENSITY, MIN_ARENA_SIZE,
};
use crate::combat::rules::AttackKind;
use crate::engine::{Intent, MatchConfig, PlayerSlot};

/// Scripted match configuration loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessMatchConfig {
    /// Player 1's hero class name
    pub player1: String,
    /// Player 2's hero class name
    pub player2: String,
    /// Player 1's display name (default: "Player 1")
    #[serde(default)]
    pub player1_name: Option<String>,
    /// Player 2's display name (default: "Player 2")
    #[serde(default)]
    pub player2_name: Option<String>,
    /// Board edge length (default: 7)
    #[serde(default = "default_arena_size")]
    pub arena_size: usize,
    /// Fraction of cells turned into obstacles (default: 0.10)
    #[serde(default = "default_obstacle_density")]
    pub obstacle_density: f32,
    /// Fraction of cells seeded with bonuses (default: 0.05)
    #[serde(default = "default_bonus_density")]
    pub bonus_density: f32,
    /// Random seed for deterministic match reproduction.
    /// If provided, the match will use a seeded RNG for reproducible results
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Pinned starting player (1 or 2); None lets the engine roll for it
    #[serde(default)]
    pub starting_player: Option<u8>,
    /// Turn cap before the replay is cut off (default: 200)
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
    /// The intents to replay, fed to whichever player holds the turn
    #[serde(default)]
    pub script: Vec<ScriptedIntent>,
    /// Custom output path for the match report (optional)
    #[serde(default)]
    pub output_path: Option<String>,
}

fn default_arena_size() -> usize {
    DEFAULT_ARENA_SIZE
}

fn default_obstacle_density() -> f32 {
    DEFAULT_OBSTACLE_DENSITY
}

fn default_bonus_density() -> f32 {
    DEFAULT_BONUS_DENSITY
}

fn default_max_turns() -> u32 {
    200
}

/// One scripted intent, as written in the JSON script array
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptedIntent {
    /// Move to a cell
    Move { row: usize, col: usize },
    /// Commit to an attack ("fast", "normal", or "heavy")
    Attack { kind: String },
    /// Commit to the special ability
    Special,
    /// Enter the defensive stance
    Defend,
    /// Ready a dodge
    Dodge,
    /// Click a cell (resolves a pending action or attempts a move)
    Confirm { row: usize, col: usize },
    /// Discard the match and start over
    Restart,
}

impl ScriptedIntent {
    /// Convert to the engine's intent type
    pub fn to_intent(&self) -> Result<Intent, String> {
        Ok(match self {
            ScriptedIntent::Move { row, col } => Intent::Move(Position::new(*row, *col)),
            ScriptedIntent::Attack { kind } => Intent::Attack(AttackKind::parse(kind)?),
            ScriptedIntent::Special => Intent::Special,
            ScriptedIntent::Defend => Intent::Defend,
            ScriptedIntent::Dodge => Intent::Dodge,
            ScriptedIntent::Confirm { row, col } => Intent::ConfirmTarget(Position::new(*row, *col)),
            ScriptedIntent::Restart => Intent::Restart,
        })
    }
}

impl HeadlessMatchConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: HeadlessMatchConfig = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse JSON: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        HeroClass::parse(&self.player1)?;
        HeroClass::parse(&self.player2)?;

        if self.arena_size < MIN_ARENA_SIZE {
            return Err(format!(
                "arena_size {} is too small (minimum {})",
                self.arena_size, MIN_ARENA_SIZE
            ));
        }

        for (label, density) in [
            ("obstacle_density", self.obstacle_density),
            ("bonus_density", self.bonus_density),
        ] {
            if !(0.0..=1.0).contains(&density) {
                return Err(format!("{} must be within [0, 1], got {}", label, density));
            }
        }

        if let Some(slot) = self.starting_player {
            if slot != 1 && slot != 2 {
                return Err(format!("starting_player must be 1 or 2, got {}", slot));
            }
        }

        if self.max_turns == 0 {
            return Err("max_turns must be positive".to_string());
        }

        for intent in &self.script {
            intent.to_intent()?;
        }

        Ok(())
    }

    /// Convert to the engine's MatchConfig format
    pub fn to_match_config(&self) -> Result<MatchConfig, String> {
        let starting_slot = match self.starting_player {
            Some(1) => Some(PlayerSlot::One),
            Some(2) => Some(PlayerSlot::Two),
            Some(other) => return Err(format!("starting_player must be 1 or 2, got {}", other)),
            None => None,
        };

        let mut config =
            MatchConfig::from_ids(&self.player1, &self.player2).map_err(|e| e.to_string())?;
        if let Some(name) = &self.player1_name {
            config.player1_name = name.clone();
        }
        if let Some(name) = &self.player2_name {
            config.player2_name = name.clone();
        }
        config.arena_size = self.arena_size;
        config.obstacle_density = self.obstacle_density;
        config.bonus_density = self.bonus_density;
        config.starting_slot = starting_slot;

        Ok(config)
    }

    /// The parsed intent script
    pub fn parsed_script(&self) -> Result<Vec<Intent>, String> {
        self.script.iter().map(|s| s.to_intent()).collect()
    }
}
