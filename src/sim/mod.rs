//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, timing in ticks only
//! - Seeded RNG owned by the game state
//! - Stable iteration order (row-major cells, trap index order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod placement;
pub mod state;
pub mod tick;

pub use collision::{Rect, circle_rect_collision};
pub use grid::Grid;
pub use placement::{pick_safe_zone, random_cell, roll_traps};
pub use state::{GameState, Snapshot};
pub use tick::{TickInput, tick};
