//! Edge-triggered input sampling
//!
//! The simulation wants "this action started on this tick", while backends
//! usually report whether a button is currently held. `EdgeTrigger` bridges
//! the two.

use glam::Vec2;

use crate::sim::TickInput;

/// Detects the rising edge of a held-down signal
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeTrigger {
    was_down: bool,
}

impl EdgeTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current held state; true only on the first frame it is down
    pub fn update(&mut self, down: bool) -> bool {
        let pressed = down && !self.was_down;
        self.was_down = down;
        pressed
    }

    /// Forget any held state (e.g. after focus loss)
    pub fn clear(&mut self) {
        self.was_down = false;
    }
}

/// Device state as polled once per frame
#[derive(Debug, Clone, Copy, Default)]
pub struct RawInput {
    /// Mouse position in viewport pixels
    pub mouse: Vec2,
    /// Select button (left mouse) currently held
    pub select_down: bool,
    /// Reset key currently held
    pub reset_down: bool,
}

/// Converts raw frames into tick input
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    select: EdgeTrigger,
    reset: EdgeTrigger,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample one frame
    pub fn sample(&mut self, raw: RawInput) -> TickInput {
        TickInput {
            mouse: raw.mouse,
            select: self.select.update(raw.select_down),
            reset: self.reset.update(raw.reset_down),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_trigger_fires_once_per_press() {
        let mut trigger = EdgeTrigger::new();
        assert!(!trigger.update(false));
        assert!(trigger.update(true));
        assert!(!trigger.update(true));
        assert!(!trigger.update(true));
        assert!(!trigger.update(false));
        assert!(trigger.update(true));
    }

    #[test]
    fn test_edge_trigger_clear() {
        let mut trigger = EdgeTrigger::new();
        assert!(trigger.update(true));
        trigger.clear();
        assert!(trigger.update(true));
    }

    #[test]
    fn test_sampler_held_click_selects_once() {
        let mut sampler = InputSampler::new();
        let held = RawInput {
            mouse: Vec2::new(10.0, 20.0),
            select_down: true,
            reset_down: false,
        };

        let first = sampler.sample(held);
        assert!(first.select);
        assert!(!first.reset);
        assert_eq!(first.mouse, Vec2::new(10.0, 20.0));

        assert!(!sampler.sample(held).select);
    }

    #[test]
    fn test_sampler_buttons_are_independent() {
        let mut sampler = InputSampler::new();
        let both = RawInput {
            mouse: Vec2::ZERO,
            select_down: true,
            reset_down: true,
        };
        let input = sampler.sample(both);
        assert!(input.select && input.reset);

        let reset_only = RawInput {
            reset_down: false,
            ..both
        };
        let input = sampler.sample(reset_only);
        assert!(!input.select && !input.reset);
    }
}
