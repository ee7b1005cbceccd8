//! Game state and the read-only snapshot handed to renderers
//!
//! `GameState` is the single owned aggregate the tick mutates. It carries
//! its own seeded RNG so two games built from the same seed replay the same
//! trap rolls given the same inputs.

use glam::{IVec2, Vec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::placement::{pick_safe_zone, roll_traps};
use crate::consts::TRAPS_AMOUNT;
use crate::settings::Settings;
use crate::sprite_radius;

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Board geometry
    pub grid: Grid,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Cell the player has selected (always on the board)
    pub player_cell: IVec2,
    /// Sub-pixel sprite position; only drives rendering and collisions
    pub sprite_pos: Vec2,
    /// Set by a lethal trap, cleared only by reset
    pub is_dead: bool,
    /// Trap cells (duplicates allowed)
    pub traps: [IVec2; TRAPS_AMOUNT],
    /// Shared size of every trap, grows from zero to the cell size
    pub trap_size: Vec2,
    /// Scoring cell, never a trap when picked
    pub safe_zone: IVec2,
    /// Score
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game on the given board
    ///
    /// # Panics
    ///
    /// If the board has no room for a safe zone next to every trap
    /// (`TRAPS_AMOUNT >= cells²`). `Settings::validate` rejects such boards.
    pub fn new(grid: Grid, seed: u64) -> Self {
        assert!(
            (TRAPS_AMOUNT as u64) < u64::from(grid.cells).pow(2),
            "{0}x{0} grid cannot hold {1} traps and a safe zone",
            grid.cells,
            TRAPS_AMOUNT
        );
        let mut state = Self {
            grid,
            seed,
            player_cell: IVec2::ZERO,
            sprite_pos: grid.cell_center(IVec2::ZERO),
            is_dead: false,
            traps: [IVec2::ZERO; TRAPS_AMOUNT],
            trap_size: Vec2::ZERO,
            safe_zone: IVec2::ZERO,
            score: 0,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reroll_traps();

        log::info!(
            "New game: {0}x{0} grid, {1} traps, seed {2}",
            grid.cells,
            TRAPS_AMOUNT,
            seed
        );
        state
    }

    /// Create a new game from validated settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.grid(), settings.seed)
    }

    /// Full cell size traps grow toward
    #[inline]
    pub fn cell_size(&self) -> Vec2 {
        self.grid.cell_size
    }

    /// Radius of the player sprite circle
    #[inline]
    pub fn sprite_radius(&self) -> f32 {
        sprite_radius(self.grid.cell_size)
    }

    /// Roll new trap cells, then move the safe zone off them
    pub fn reroll_traps(&mut self) {
        roll_traps(&self.grid, &mut self.traps, &mut self.rng);
        self.safe_zone = pick_safe_zone(&self.grid, &self.traps, &mut self.rng);
    }

    /// Check if a cell currently holds a trap
    pub fn is_trap(&self, cell: IVec2) -> bool {
        self.traps.contains(&cell)
    }

    /// Read-only copy for renderers and exporters
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cells: self.grid.cells,
            cell_size: self.grid.cell_size,
            sprite_radius: self.sprite_radius(),
            player_cell: self.player_cell,
            sprite_pos: self.sprite_pos,
            is_dead: self.is_dead,
            traps: self.traps.to_vec(),
            trap_size: self.trap_size,
            safe_zone: self.safe_zone,
            score: self.score,
            time_ticks: self.time_ticks,
        }
    }
}

/// Serializable view of a `GameState`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub cells: u32,
    pub cell_size: Vec2,
    pub sprite_radius: f32,
    pub player_cell: IVec2,
    pub sprite_pos: Vec2,
    pub is_dead: bool,
    pub traps: Vec<IVec2>,
    pub trap_size: Vec2,
    pub safe_zone: IVec2,
    pub score: u64,
    pub time_ticks: u64,
}

impl Snapshot {
    /// Encode as JSON for foreign consumers
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Board geometry this snapshot was taken on
    pub fn grid(&self) -> Grid {
        Grid {
            cells: self.cells,
            cell_size: self.cell_size,
        }
    }
}
