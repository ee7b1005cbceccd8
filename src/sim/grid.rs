//! Grid geometry for the playfield
//!
//! The viewport is tiled into `cells × cells` rectangles addressed by
//! `(col, row)`. Cell size is the viewport divided by the cell count per
//! axis, so cells are only square when the viewport is.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::collision::{Rect, circle_rect_collision};
use crate::consts::POINTER_RADIUS;

/// Square tiling of the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// Cells per side
    pub cells: u32,
    /// Pixel size of one cell
    pub cell_size: Vec2,
}

impl Grid {
    pub fn new(viewport: Vec2, cells: u32) -> Self {
        Self {
            cells,
            cell_size: viewport / cells as f32,
        }
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> u32 {
        self.cells * self.cells
    }

    /// Check if a cell coordinate is on the board
    #[inline]
    pub fn contains(&self, cell: IVec2) -> bool {
        let n = self.cells as i32;
        cell.x >= 0 && cell.y >= 0 && cell.x < n && cell.y < n
    }

    /// Pixel rectangle covered by a cell
    pub fn cell_rect(&self, cell: IVec2) -> Rect {
        Rect::new(cell.as_vec2() * self.cell_size, self.cell_size)
    }

    /// Pixel centre of a cell
    #[inline]
    pub fn cell_center(&self, cell: IVec2) -> Vec2 {
        (cell.as_vec2() + Vec2::splat(0.5)) * self.cell_size
    }

    /// Rectangle of the given size centred inside a cell (traps grow from the middle)
    pub fn centered_rect(&self, cell: IVec2, size: Vec2) -> Rect {
        Rect::new(self.cell_center(cell) - size / 2.0, size)
    }

    /// Iterate cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = IVec2> + use<> {
        let n = self.cells as i32;
        (0..n).flat_map(move |row| (0..n).map(move |col| IVec2::new(col, row)))
    }

    /// First cell (row-major) whose rectangle contains the point
    pub fn cell_at(&self, point: Vec2) -> Option<IVec2> {
        self.iter_cells()
            .find(|&cell| circle_rect_collision(point, POINTER_RADIUS, &self.cell_rect(cell)))
    }
}
