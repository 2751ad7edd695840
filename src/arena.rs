//! Arena board and layout generation
//!
//! A match is played on a fixed size×size grid. The four corner cells are
//! reserved as spawn points for the whole session; obstacles and bonus
//! pickups are drawn without replacement from the remaining cells.

use serde::{Deserialize, Serialize};

use crate::combat::constants::{DEFAULT_BONUS_DENSITY, DEFAULT_OBSTACLE_DENSITY};
use crate::engine::rng::GameRng;

/// A cell coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another cell (the metric used by every
    /// range check in the game)
    pub fn manhattan(&self, other: Position) -> u32 {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as u32
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Kinds of bonus pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    /// +20 health, clamped to max health
    Health,
    /// +5 base and attack damage, permanent
    Damage,
    /// +1 attack range, permanent, Wizard only
    Range,
}

impl BonusKind {
    /// All kinds, in the draw order used by bonus placement
    pub fn all() -> &'static [BonusKind] {
        &[BonusKind::Health, BonusKind::Damage, BonusKind::Range]
    }

    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            BonusKind::Health => "Health",
            BonusKind::Damage => "Damage",
            BonusKind::Range => "Range",
        }
    }
}

/// A bonus pickup sitting on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    pub pos: Position,
    pub kind: BonusKind,
}

/// The logical grid for one match.
///
/// Obstacles block movement and occupancy but never ranged attacks.
/// Bonuses never block movement; landing on one consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    obstacles: Vec<Position>,
    bonuses: Vec<Bonus>,
}

impl Board {
    /// An empty board with no obstacles or bonuses
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            obstacles: Vec::new(),
            bonuses: Vec::new(),
        }
    }

    /// Generate a board: `floor(size² × obstacle_density)` obstacles first,
    /// then `floor(size² × bonus_density)` bonuses, all drawn uniformly
    /// without replacement from the cells that are neither a corner nor
    /// already occupied. Runs short (with a warning) if candidates run out.
    pub fn generate(
        size: usize,
        obstacle_density: f32,
        bonus_density: f32,
        rng: &mut GameRng,
    ) -> Self {
        let mut board = Self::empty(size);

        let cell_count = (size * size) as f32;
        let obstacle_count = (cell_count * obstacle_density).floor() as usize;
        let bonus_count = (cell_count * bonus_density).floor() as usize;

        let mut pool = board.available_cells();
        let mut placed = 0;
        while placed < obstacle_count && !pool.is_empty() {
            let pos = pool.remove(rng.pick_index(pool.len()));
            board.obstacles.push(pos);
            placed += 1;
        }
        if placed < obstacle_count {
            tracing::warn!("board ran out of cells: placed {placed} of {obstacle_count} obstacles");
        }

        let mut pool = board.available_cells();
        let mut placed = 0;
        while placed < bonus_count && !pool.is_empty() {
            let pos = pool.remove(rng.pick_index(pool.len()));
            let kind = BonusKind::all()[rng.pick_index(BonusKind::all().len())];
            board.bonuses.push(Bonus { pos, kind });
            placed += 1;
        }
        if placed < bonus_count {
            tracing::warn!("board ran out of cells: placed {placed} of {bonus_count} bonuses");
        }

        board
    }

    /// Generate with the default densities
    pub fn generate_default(size: usize, rng: &mut GameRng) -> Self {
        Self::generate(size, DEFAULT_OBSTACLE_DENSITY, DEFAULT_BONUS_DENSITY, rng)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// The four reserved spawn cells, clockwise from the origin
    pub fn corner_spawns(&self) -> [Position; 4] {
        let last = self.size - 1;
        [
            Position::new(0, 0),
            Position::new(0, last),
            Position::new(last, 0),
            Position::new(last, last),
        ]
    }

    pub fn is_corner(&self, pos: Position) -> bool {
        self.corner_spawns().contains(&pos)
    }

    pub fn obstacle_at(&self, pos: Position) -> bool {
        self.obstacles.contains(&pos)
    }

    pub fn bonus_at(&self, pos: Position) -> Option<&Bonus> {
        self.bonuses.iter().find(|b| b.pos == pos)
    }

    /// Remove and return the bonus at `pos`, if any
    pub fn take_bonus(&mut self, pos: Position) -> Option<BonusKind> {
        let idx = self.bonuses.iter().position(|b| b.pos == pos)?;
        Some(self.bonuses.remove(idx).kind)
    }

    pub fn obstacles(&self) -> &[Position] {
        &self.obstacles
    }

    pub fn bonuses(&self) -> &[Bonus] {
        &self.bonuses
    }

    /// Place an obstacle on a specific cell. Used by custom layouts; the
    /// cell must be free and off the reserved corners.
    pub fn insert_obstacle(&mut self, pos: Position) -> Result<(), String> {
        self.check_free(pos)?;
        self.obstacles.push(pos);
        Ok(())
    }

    /// Place a bonus on a specific cell, same rules as `insert_obstacle`
    pub fn insert_bonus(&mut self, pos: Position, kind: BonusKind) -> Result<(), String> {
        self.check_free(pos)?;
        self.bonuses.push(Bonus { pos, kind });
        Ok(())
    }

    fn check_free(&self, pos: Position) -> Result<(), String> {
        if !self.in_bounds(pos) {
            return Err(format!("{} is out of bounds", pos));
        }
        if self.is_corner(pos) {
            return Err(format!("{} is a reserved spawn corner", pos));
        }
        if self.obstacle_at(pos) || self.bonus_at(pos).is_some() {
            return Err(format!("{} is already occupied", pos));
        }
        Ok(())
    }

    /// Cells that are neither a corner nor occupied by an obstacle or
    /// bonus, in row-major order
    fn available_cells(&self) -> Vec<Position> {
        let mut cells = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                let pos = Position::new(row, col);
                if !self.is_corner(pos) && !self.obstacle_at(pos) && self.bonus_at(pos).is_none() {
                    cells.push(pos);
                }
            }
        }
        cells
    }
}
