//! AI Game - dodge the traps, chase the safe zone
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, collisions, game state, tick)
//! - `renderer`: Backend-agnostic draw list built from a snapshot
//! - `platform`: Input sampling (edge-triggered buttons)
//! - `agent`: Step/reward environment for training and demo policies
//! - `settings`: Startup configuration

pub mod agent;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default viewport dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Grid dimension (cells per side)
    pub const CELLS_LIMIT: u32 = 5;
    /// Number of traps on the board (fixed-size array)
    pub const TRAPS_AMOUNT: usize = 10;

    /// Seed used when none is configured
    pub const DEFAULT_SEED: u64 = 42;
    /// Nominal frame rate; simulation timing is per tick, not per second
    pub const TARGET_FPS: u32 = 60;

    /// Fraction of the remaining distance the sprite covers each tick
    pub const SPRITE_LERP: f32 = 0.1;
    /// Sprite snaps no closer than this to its target (pixels)
    pub const SPRITE_EPSILON: f32 = 1.0;

    /// Fraction of the remaining size gap traps grow each tick
    pub const TRAP_GROWTH_LERP: f32 = 0.025;
    /// Size gap below which traps are considered fully grown and re-roll
    pub const TRAP_RESET_GAP: f32 = 0.1;
    /// Size gap below which traps are lethal
    pub const TRAP_DANGER_GAP: f32 = 50.0;

    /// Points per tick spent touching the safe zone
    pub const SAFE_ZONE_REWARD: u64 = 100;

    /// Mouse pointer treated as a circle of this radius when picking cells
    pub const POINTER_RADIUS: f32 = 0.0;

    // Placement rejection sampling only terminates with a free cell left
    const _: () = assert!(TRAPS_AMOUNT < (CELLS_LIMIT * CELLS_LIMIT) as usize);
}

/// Sprite radius for a given cell size (cell width minus cell height)
///
/// With the default 160x120 cells this gives a 40px sprite. Square cells
/// collapse the sprite to a point, which still collides.
#[inline]
pub fn sprite_radius(cell_size: Vec2) -> f32 {
    (cell_size.x - cell_size.y).abs()
}

/// Move `current` toward `target` by `fraction` of the remaining distance
#[inline]
pub fn approach(current: Vec2, target: Vec2, fraction: f32) -> Vec2 {
    current.lerp(target, fraction)
}
