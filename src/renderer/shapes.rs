//! Shape generation for a single frame

use glam::Vec2;

use crate::sim::{Rect, Snapshot};

/// RGBA color, channels in 0.0..=1.0
pub type Color = [f32; 4];

pub const BACKGROUND: Color = [1.0, 0.43, 0.76, 1.0];
pub const GRID_LINES: Color = [0.0, 0.0, 0.0, 1.0];
pub const HOVER: Color = [1.0, 1.0, 1.0, 0.3];
pub const SAFE_ZONE: Color = [0.0, 0.89, 0.19, 1.0];
pub const TRAP: Color = [0.9, 0.16, 0.22, 1.0];
pub const PLAYER: Color = [0.0, 0.47, 0.95, 1.0];
pub const PLAYER_DEAD: Color = [0.51, 0.51, 0.51, 1.0];
pub const TEXT: Color = [0.0, 0.0, 0.0, 1.0];

/// Font size for HUD text (pixels)
pub const FONT_SIZE: f32 = 20.0;

/// A drawable primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Fill the whole viewport
    Clear { color: Color },
    /// Filled rectangle
    Rect { rect: Rect, color: Color },
    /// Rectangle outline
    RectLines { rect: Rect, thickness: f32, color: Color },
    /// Filled circle
    Circle { center: Vec2, radius: f32, color: Color },
    /// Text anchored at its top-left corner
    Text { text: String, pos: Vec2, size: f32, color: Color },
}

/// Everything to draw for one frame, back to front
pub fn frame_shapes(snapshot: &Snapshot, mouse: Vec2) -> Vec<Shape> {
    let grid = snapshot.grid();
    let mut shapes = Vec::with_capacity(grid.cell_count() as usize + snapshot.traps.len() + 7);
    shapes.push(Shape::Clear { color: BACKGROUND });

    for cell in grid.iter_cells() {
        shapes.push(Shape::RectLines {
            rect: grid.cell_rect(cell),
            thickness: 1.0,
            color: GRID_LINES,
        });
    }

    if let Some(cell) = grid.cell_at(mouse) {
        shapes.push(Shape::Rect {
            rect: grid.cell_rect(cell),
            color: HOVER,
        });
    }

    shapes.push(Shape::Rect {
        rect: grid.cell_rect(snapshot.safe_zone),
        color: SAFE_ZONE,
    });

    // Zero-sized traps right after a re-roll are not worth a draw call
    if snapshot.trap_size.x > 0.0 && snapshot.trap_size.y > 0.0 {
        for &trap in &snapshot.traps {
            shapes.push(Shape::Rect {
                rect: grid.centered_rect(trap, snapshot.trap_size),
                color: TRAP,
            });
        }
    }

    shapes.push(Shape::Circle {
        center: snapshot.sprite_pos,
        radius: snapshot.sprite_radius,
        color: if snapshot.is_dead { PLAYER_DEAD } else { PLAYER },
    });

    shapes.push(Shape::Text {
        text: format!("Score: {}", snapshot.score),
        pos: Vec2::new(10.0, 10.0),
        size: FONT_SIZE,
        color: TEXT,
    });

    if snapshot.is_dead {
        let viewport = grid.cell_size * grid.cells as f32;
        shapes.push(Shape::Text {
            text: "You died! Press R to restart".to_string(),
            pos: Vec2::new(viewport.x / 2.0 - 150.0, viewport.y / 2.0 - FONT_SIZE),
            size: FONT_SIZE * 1.5,
            color: TEXT,
        });
    }

    shapes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::GameState;

    fn snapshot() -> Snapshot {
        GameState::from_settings(&Settings::default()).snapshot()
    }

    fn count_traps(shapes: &[Shape]) -> usize {
        shapes
            .iter()
            .filter(|s| matches!(s, Shape::Rect { color, .. } if *color == TRAP))
            .count()
    }

    #[test]
    fn test_fresh_game_has_no_visible_traps() {
        let shapes = frame_shapes(&snapshot(), Vec2::new(-1.0, -1.0));
        // Clear, 25 outlines, safe zone, player, score
        assert_eq!(shapes.len(), 29);
        assert_eq!(shapes[0], Shape::Clear { color: BACKGROUND });
        assert_eq!(count_traps(&shapes), 0);
    }

    #[test]
    fn test_grown_traps_drawn_centered() {
        let mut snap = snapshot();
        snap.trap_size = Vec2::new(80.0, 60.0);
        let shapes = frame_shapes(&snap, Vec2::new(-1.0, -1.0));
        assert_eq!(count_traps(&shapes), snap.traps.len());

        let grid = snap.grid();
        let first = shapes
            .iter()
            .find_map(|s| match s {
                Shape::Rect { rect, color } if *color == TRAP => Some(*rect),
                _ => None,
            })
            .unwrap();
        assert_eq!(first.center(), grid.cell_center(snap.traps[0]));
        assert_eq!(first.size, Vec2::new(80.0, 60.0));
    }

    #[test]
    fn test_hover_highlight() {
        let shapes = frame_shapes(&snapshot(), Vec2::new(400.0, 420.0));
        assert!(shapes.iter().any(|s| matches!(
            s,
            Shape::Rect { rect, color } if *color == HOVER && rect.pos == Vec2::new(320.0, 360.0)
        )));
    }

    #[test]
    fn test_dead_player_banner() {
        let mut snap = snapshot();
        snap.is_dead = true;
        snap.score = 300;
        let shapes = frame_shapes(&snap, Vec2::ZERO);

        assert!(shapes.iter().any(|s| matches!(
            s,
            Shape::Circle { color, .. } if *color == PLAYER_DEAD
        )));
        assert!(shapes.iter().any(|s| matches!(
            s,
            Shape::Text { text, .. } if text == "Score: 300"
        )));
        assert!(matches!(shapes.last(), Some(Shape::Text { text, .. }) if text.starts_with("You died")));
    }
}
