//! Step/reward environment for automated players
//!
//! Wraps the simulation the way a training loop drives it: the agent picks
//! a direction, the environment turns it into a click on the neighbouring
//! cell, ticks once, and reports a reward plus a compact observation.
//! `training` evolves tabular policies on top of it.

pub mod training;

pub use training::{PolicyTable, TrainingConfig, TrainingReport, crossover, next_generation, train, train_agent};

use std::fmt;

use glam::{IVec2, Vec2};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{GameState, TickInput, tick};

/// Reward for a tick that ends dead
pub const DEATH_REWARD: i32 = -10;
/// Reward for a tick that scored
pub const SCORE_REWARD: i32 = 1;

/// Move one cell in a direction, or stay put
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    None,
}

impl Direction {
    pub const ALL: [Direction; 5] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::None,
    ];

    /// Cell offset (rows grow downward)
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
            Direction::None => IVec2::ZERO,
        }
    }

    /// Single-letter code used in state keys
    pub fn code(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
            Direction::None => 'N',
        }
    }

    fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
            Direction::None => 4,
        }
    }
}

/// One agent decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub direction: Direction,
    /// Whether to actually click; `false` just lets a tick pass
    pub click: bool,
}

impl Action {
    pub fn new(direction: Direction, click: bool) -> Self {
        Self { direction, click }
    }

    /// Let the tick pass without selecting anything
    pub fn wait() -> Self {
        Self::new(Direction::None, false)
    }
}

/// Coarse direction from the player to the safe zone
///
/// Codes are screen-space (rows grow downward), so `XRD` means right and
/// below. Keys built from them are not interchangeable with tables that
/// used a different diagonal convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    Here,
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Heading {
    /// Heading from one cell toward another
    pub fn between(from: IVec2, to: IVec2) -> Self {
        let d = (to - from).signum();
        match (d.x, d.y) {
            (0, 0) => Heading::Here,
            (0, -1) => Heading::Up,
            (0, _) => Heading::Down,
            (-1, 0) => Heading::Left,
            (_, 0) => Heading::Right,
            (-1, -1) => Heading::UpLeft,
            (_, -1) => Heading::UpRight,
            (-1, _) => Heading::DownLeft,
            _ => Heading::DownRight,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Heading::Here => "N",
            Heading::Up => "U",
            Heading::Down => "D",
            Heading::Left => "L",
            Heading::Right => "R",
            Heading::UpLeft => "XLU",
            Heading::UpRight => "XRU",
            Heading::DownLeft => "XLD",
            Heading::DownRight => "XRD",
        }
    }

    /// Directions that make progress toward the target
    pub fn toward(self) -> &'static [Direction] {
        match self {
            Heading::Here => &[],
            Heading::Up => &[Direction::Up],
            Heading::Down => &[Direction::Down],
            Heading::Left => &[Direction::Left],
            Heading::Right => &[Direction::Right],
            Heading::UpLeft => &[Direction::Up, Direction::Left],
            Heading::UpRight => &[Direction::Up, Direction::Right],
            Heading::DownLeft => &[Direction::Down, Direction::Left],
            Heading::DownRight => &[Direction::Down, Direction::Right],
        }
    }
}

/// What an agent sees after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Observation {
    /// Trap in the cell reached by each direction, indexed like `Direction::ALL`
    traps: [bool; 5],
    /// Cell reached by each direction is off the board
    walls: [bool; 5],
    /// Where the safe zone lies
    pub heading: Heading,
}

impl Observation {
    /// Observe the state around the player's selected cell
    pub fn from_state(state: &GameState) -> Self {
        let mut traps = [false; 5];
        let mut walls = [false; 5];
        for direction in Direction::ALL {
            let cell = state.player_cell + direction.offset();
            let on_board = state.grid.contains(cell);
            // Off-board cells can't be selected, so they are never dangerous
            traps[direction.index()] = on_board && state.is_trap(cell);
            walls[direction.index()] = !on_board;
        }
        Self {
            traps,
            walls,
            heading: Heading::between(state.player_cell, state.safe_zone),
        }
    }

    /// Whether moving in a direction lands on a trap
    pub fn trap(&self, direction: Direction) -> bool {
        self.traps[direction.index()]
    }

    /// Whether moving in a direction reaches a trap-free cell on the board
    pub fn is_open(&self, direction: Direction) -> bool {
        !self.traps[direction.index()] && !self.walls[direction.index()]
    }

    /// Compact state key for tabular policies, e.g. `"UT DF LF RF NF WXRD"`
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for direction in Direction::ALL {
            let flag = if self.trap(direction) { 'T' } else { 'F' };
            write!(f, "{}{} ", direction.code(), flag)?;
        }
        write!(f, "W{}", self.heading.code())
    }
}

/// Result of a single environment step
#[derive(Debug, Clone)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: i32,
    /// Player is dead; only `reset` continues the episode
    pub done: bool,
}

/// Summary of a finished episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeSummary {
    pub ticks: u64,
    pub score: u64,
    pub total_reward: i64,
    pub died: bool,
}

/// Training/demo environment around one game
#[derive(Debug, Clone)]
pub struct Environment {
    state: GameState,
}

impl Environment {
    pub fn new(settings: &Settings) -> Self {
        Self {
            state: GameState::from_settings(settings),
        }
    }

    /// Wrap an existing game
    pub fn from_state(state: GameState) -> Self {
        Self { state }
    }

    /// Read-only access to the game
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn observe(&self) -> Observation {
        Observation::from_state(&self.state)
    }

    /// Restart the game and return the first observation
    pub fn reset(&mut self) -> Observation {
        tick(&mut self.state, &TickInput::reset());
        self.observe()
    }

    /// Uniformly random direction, always clicking
    pub fn sample<R: Rng>(rng: &mut R) -> Action {
        let direction = Direction::ALL
            .choose(rng)
            .copied()
            .unwrap_or(Direction::None);
        Action::new(direction, true)
    }

    /// Pixel the agent "clicks" for an action
    fn aim(&self, direction: Direction) -> Vec2 {
        let target = self.state.player_cell + direction.offset();
        // Off-board targets land outside the viewport and select nothing
        self.state.grid.cell_center(target)
    }

    /// Apply an action and advance one tick
    pub fn step(&mut self, action: Action) -> StepResult {
        let previous_score = self.state.score;
        let input = TickInput {
            mouse: self.aim(action.direction),
            select: action.click,
            reset: false,
        };
        tick(&mut self.state, &input);

        let reward = if self.state.is_dead {
            DEATH_REWARD
        } else if self.state.score > previous_score {
            SCORE_REWARD
        } else {
            0
        };

        StepResult {
            observation: self.observe(),
            reward,
            done: self.state.is_dead,
        }
    }

    /// Play until death or `max_ticks`, asking the policy every `decision_interval` ticks
    pub fn run_episode<P>(&mut self, mut policy: P, max_ticks: u64, decision_interval: u64) -> EpisodeSummary
    where
        P: FnMut(&Observation) -> Action,
    {
        let mut observation = self.reset();
        let interval = decision_interval.max(1);
        let mut total_reward = 0i64;
        let mut ticks = 0;

        while ticks < max_ticks {
            let action = if ticks % interval == 0 {
                policy(&observation)
            } else {
                Action::wait()
            };
            let result = self.step(action);
            total_reward += i64::from(result.reward);
            observation = result.observation;
            ticks += 1;
            if result.done {
                break;
            }
        }

        let summary = EpisodeSummary {
            ticks,
            score: self.state.score,
            total_reward,
            died: self.state.is_dead,
        };
        log::debug!("Episode finished: {:?}", summary);
        summary
    }
}

/// Built-in policy: head for the safe zone, never step onto a known trap
pub fn greedy_action(observation: &Observation) -> Action {
    let toward = observation
        .heading
        .toward()
        .iter()
        .copied()
        .find(|&d| observation.is_open(d));

    if let Some(direction) = toward {
        return Action::new(direction, true);
    }
    if !observation.trap(Direction::None) {
        return Action::wait();
    }

    // Standing on a trap with no safe way forward: take any free neighbour
    let escape = Direction::ALL
        .iter()
        .copied()
        .find(|&d| d != Direction::None && observation.is_open(d));
    match escape {
        Some(direction) => Action::new(direction, true),
        None => Action::wait(),
    }
}
