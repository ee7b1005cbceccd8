//! Fixed-step simulation tick
//!
//! One call advances the game by one frame. Timing is expressed as lerp
//! fractions per tick, so behaviour depends on tick count, not wall clock.

use glam::{IVec2, Vec2};

use super::collision::circle_rect_collision;
use super::state::GameState;
use crate::approach;
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Mouse position in viewport pixels
    pub mouse: Vec2,
    /// Select the cell under the mouse (edge-triggered)
    pub select: bool,
    /// Restart the game (edge-triggered)
    pub reset: bool,
}

impl TickInput {
    /// Input that only moves the pointer
    pub fn hover(mouse: Vec2) -> Self {
        Self {
            mouse,
            ..Default::default()
        }
    }

    /// Click at a pixel position
    pub fn click(mouse: Vec2) -> Self {
        Self {
            mouse,
            select: true,
            reset: false,
        }
    }

    /// Reset with the pointer wherever it is
    pub fn reset() -> Self {
        Self {
            reset: true,
            ..Default::default()
        }
    }
}

/// Advance the game state by one tick
///
/// Ordering matters: death uses the trap size from before this tick's
/// growth, and scoring runs before a trap cycle can move the safe zone.
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    update_sprite(state);
    update_safe_zone(state);
    update_traps(state);

    if input.select {
        select_cell(state, input.mouse);
    }

    if input.reset {
        reset(state);
    }
}

/// Glide the sprite toward the centre of the selected cell
fn update_sprite(state: &mut GameState) {
    let target = state.grid.cell_center(state.player_cell);
    if state.sprite_pos.distance(target) > SPRITE_EPSILON {
        state.sprite_pos = approach(state.sprite_pos, target, SPRITE_LERP);
    }
}

/// Award points for every tick the sprite overlaps the safe zone
fn update_safe_zone(state: &mut GameState) {
    if state.is_dead {
        return;
    }

    let zone = state.grid.cell_rect(state.safe_zone);
    if circle_rect_collision(state.sprite_pos, state.sprite_radius(), &zone) {
        state.score += SAFE_ZONE_REWARD;
        log::trace!("Safe zone {} touched, score {}", state.safe_zone, state.score);
    }
}

/// Grow traps, kill on contact once they are big enough, re-roll when full
fn update_traps(state: &mut GameState) {
    let full = state.cell_size();
    let gap = state.trap_size.distance(full);

    if gap < TRAP_RESET_GAP {
        state.trap_size = Vec2::ZERO;
        state.reroll_traps();
        log::debug!(
            "Traps re-rolled at tick {}, safe zone now {}",
            state.time_ticks,
            state.safe_zone
        );
        return;
    }

    if !state.is_dead && gap < TRAP_DANGER_GAP {
        let radius = state.sprite_radius();
        let hit = state.traps.iter().copied().find(|&trap| {
            let rect = state.grid.centered_rect(trap, state.trap_size);
            circle_rect_collision(state.sprite_pos, radius, &rect)
        });
        if let Some(trap) = hit {
            state.is_dead = true;
            log::debug!("Player died on trap {} with score {}", trap, state.score);
        }
    }

    state.trap_size = approach(state.trap_size, full, TRAP_GROWTH_LERP);
}

/// Select the first cell (row-major) under the mouse, if any
fn select_cell(state: &mut GameState, mouse: Vec2) {
    if let Some(cell) = state.grid.cell_at(mouse) {
        state.player_cell = cell;
        log::debug!("Selected cell {}", cell);
    }
}

/// Reinitialise everything; overrides whatever happened earlier this tick
fn reset(state: &mut GameState) {
    state.is_dead = false;
    state.player_cell = IVec2::ZERO;
    state.sprite_pos = Vec2::ZERO;
    state.trap_size = Vec2::ZERO;
    state.score = 0;
    state.reroll_traps();
    log::debug!("Game reset at tick {}", state.time_ticks);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Grid;

    fn new_state(seed: u64) -> GameState {
        GameState::new(Grid::new(Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT), CELLS_LIMIT), seed)
    }

    /// Put every trap on one cell far from where the test plays
    fn park_traps(state: &mut GameState, cell: IVec2) {
        state.traps = [cell; TRAPS_AMOUNT];
    }

    #[test]
    fn test_sprite_glides_toward_selection() {
        let mut state = new_state(1);
        park_traps(&mut state, IVec2::new(4, 4));
        state.safe_zone = IVec2::new(0, 4);

        tick(&mut state, &TickInput::click(Vec2::new(400.0, 60.0)));
        assert_eq!(state.player_cell, IVec2::new(2, 0));
        // Selection lands after interpolation, so the sprite has not moved yet
        assert_eq!(state.sprite_pos, Vec2::new(80.0, 60.0));

        tick(&mut state, &TickInput::default());
        assert!((state.sprite_pos.x - 112.0).abs() < 1e-3);
        assert_eq!(state.sprite_pos.y, 60.0);
    }

    #[test]
    fn test_sprite_stops_within_epsilon() {
        let mut state = new_state(1);
        state.sprite_pos = Vec2::new(80.5, 60.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.sprite_pos, Vec2::new(80.5, 60.0));
    }

    #[test]
    fn test_traps_grow_then_reset() {
        let mut state = new_state(3);
        park_traps(&mut state, IVec2::new(4, 4));

        tick(&mut state, &TickInput::default());
        let first = state.trap_size;
        assert!((first.x - 4.0).abs() < 1e-4);
        assert!((first.y - 3.0).abs() < 1e-4);

        let mut ticks = 1;
        while state.trap_size != Vec2::ZERO {
            tick(&mut state, &TickInput::default());
            ticks += 1;
            assert!(ticks < 1000, "trap cycle never completed");
        }
        // Roughly ln(2000) / -ln(0.975) ticks of growth
        assert!((290..=320).contains(&ticks), "cycle took {ticks} ticks");
        assert!(!state.is_trap(state.safe_zone));
    }

    #[test]
    fn test_small_traps_are_harmless() {
        let mut state = new_state(4);
        park_traps(&mut state, IVec2::ZERO);
        state.trap_size = Vec2::new(80.0, 60.0);
        tick(&mut state, &TickInput::default());
        assert!(!state.is_dead);
    }

    #[test]
    fn test_grown_trap_kills() {
        let mut state = new_state(4);
        park_traps(&mut state, IVec2::ZERO);
        state.trap_size = Vec2::new(140.0, 105.0);
        tick(&mut state, &TickInput::default());
        assert!(state.is_dead);
    }

    #[test]
    fn test_death_check_uses_size_before_growth() {
        let mut state = new_state(4);
        park_traps(&mut state, IVec2::ZERO);
        // Just outside the danger gap; this tick's growth crosses it
        let toward_cell = state.cell_size().normalize();
        state.trap_size = state.cell_size() - toward_cell * 50.5;

        tick(&mut state, &TickInput::default());
        assert!(!state.is_dead);
        assert!((state.trap_size - state.cell_size()).length() < TRAP_DANGER_GAP);

        tick(&mut state, &TickInput::default());
        assert!(state.is_dead);
    }

    #[test]
    fn test_score_lands_before_trap_cycle() {
        let mut state = new_state(9);
        park_traps(&mut state, IVec2::new(4, 4));
        state.safe_zone = IVec2::ZERO;
        state.trap_size = state.cell_size() - Vec2::new(0.04, 0.03);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, SAFE_ZONE_REWARD);
        assert_eq!(state.trap_size, Vec2::ZERO);
        assert!(!state.is_dead);
    }

    #[test]
    fn test_dead_player_does_not_score() {
        let mut state = new_state(4);
        park_traps(&mut state, IVec2::new(4, 4));
        state.safe_zone = IVec2::ZERO;
        state.is_dead = true;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_click_outside_board_is_ignored() {
        let mut state = new_state(2);
        state.player_cell = IVec2::new(1, 1);
        tick(&mut state, &TickInput::click(Vec2::new(-10.0, 900.0)));
        assert_eq!(state.player_cell, IVec2::new(1, 1));
    }

    #[test]
    fn test_hover_does_not_select() {
        let mut state = new_state(2);
        tick(&mut state, &TickInput::hover(Vec2::new(400.0, 420.0)));
        assert_eq!(state.player_cell, IVec2::ZERO);
    }

    #[test]
    fn test_reset_overrides_same_tick() {
        let mut state = new_state(6);
        park_traps(&mut state, IVec2::new(4, 4));
        state.safe_zone = IVec2::ZERO;
        state.score = 500;

        let input = TickInput {
            mouse: Vec2::new(400.0, 420.0),
            select: true,
            reset: true,
        };
        tick(&mut state, &input);

        assert_eq!(state.score, 0);
        assert_eq!(state.player_cell, IVec2::ZERO);
        assert_eq!(state.sprite_pos, Vec2::ZERO);
        assert_eq!(state.trap_size, Vec2::ZERO);
        assert!(!state.is_dead);
        assert!(!state.is_trap(state.safe_zone));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = new_state(99999);
        let mut state2 = new_state(99999);

        let inputs = [
            TickInput::click(Vec2::new(250.0, 200.0)),
            TickInput::default(),
            TickInput::click(Vec2::new(700.0, 500.0)),
            TickInput::reset(),
        ];

        for _ in 0..200 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.snapshot(), state2.snapshot());
    }
}
