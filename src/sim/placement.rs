//! Trap and safe-zone placement
//!
//! Traps are drawn independently and may land on top of each other. The
//! safe zone is rejection-sampled until it misses every trap, which only
//! terminates while `TRAPS_AMOUNT < cells²`. That bound is checked once,
//! at configuration time, rather than capped here.

use glam::IVec2;
use rand::Rng;

use super::grid::Grid;
use crate::consts::TRAPS_AMOUNT;

/// Uniformly random cell on the board
#[inline]
pub fn random_cell<R: Rng>(grid: &Grid, rng: &mut R) -> IVec2 {
    let n = grid.cells as i32;
    IVec2::new(rng.random_range(0..n), rng.random_range(0..n))
}

/// Re-roll every trap coordinate in place
pub fn roll_traps<R: Rng>(grid: &Grid, traps: &mut [IVec2; TRAPS_AMOUNT], rng: &mut R) {
    for trap in traps.iter_mut() {
        *trap = random_cell(grid, rng);
    }
}

/// Pick a cell that does not coincide with any trap
pub fn pick_safe_zone<R: Rng>(grid: &Grid, traps: &[IVec2], rng: &mut R) -> IVec2 {
    loop {
        let cell = random_cell(grid, rng);
        if !traps.contains(&cell) {
            return cell;
        }
    }
}
