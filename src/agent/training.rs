//! Genetic training of tabular policies
//!
//! A policy is a table from observation key to the best move seen for it.
//! Each agent plays epsilon-greedy episodes, recording any move that beat
//! the table's reward for that key. A generation keeps the fittest agents
//! and breeds neighbours pairwise; children inherit each key from one
//! parent, taking the second parent's move at the mutation rate.
//!
//! Agents in a generation train in parallel. Every agent gets its own game
//! and RNG seeds drawn up front, so results only depend on the run seed.

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{Action, Direction, Environment, Observation};
use crate::settings::Settings;

/// Best direction known for a key and the reward it earned
pub type Move = (Direction, i32);

/// What an unseen key maps to
pub const DEFAULT_MOVE: Move = (Direction::None, 0);

/// Learned moves keyed by `Observation::key`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyTable {
    moves: HashMap<String, Move>,
}

impl PolicyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Learned move for a key, if any
    pub fn get(&self, key: &str) -> Option<Move> {
        self.moves.get(key).copied()
    }

    /// Learned move for a key, falling back to `DEFAULT_MOVE`
    pub fn best(&self, key: &str) -> Move {
        self.get(key).unwrap_or(DEFAULT_MOVE)
    }

    pub fn insert(&mut self, key: impl Into<String>, mv: Move) {
        self.moves.insert(key.into(), mv);
    }

    /// Keep `direction` for `key` if it beat the best reward so far
    ///
    /// Returns whether the table changed.
    pub fn record(&mut self, key: &str, direction: Direction, reward: i32) -> bool {
        if reward > self.best(key).1 {
            self.moves.insert(key.to_string(), (direction, reward));
            true
        } else {
            false
        }
    }

    /// Play the learned move for an observation
    pub fn action(&self, observation: &Observation) -> Action {
        Action::new(self.best(&observation.key()).0, true)
    }

    /// Keys in a stable order
    fn sorted_keys(&self) -> Vec<&String> {
        let mut keys: Vec<_> = self.moves.keys().collect();
        keys.sort();
        keys
    }

    /// Encode as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Knobs for a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Agents per generation
    pub agents: usize,
    pub generations: u32,
    /// Episodes each agent plays per generation
    pub episodes: u32,
    /// Tick cap per episode
    pub max_ticks: u64,
    /// Ticks between decisions; the rest just wait
    pub decision_interval: u64,
    /// Starting exploration rate
    pub epsilon: f64,
    /// Multiplied into epsilon after every decision
    pub eps_decay: f64,
    pub eps_min: f64,
    /// Share of each generation kept as parents
    pub elitism: f64,
    /// Chance a child takes the second parent's move for a shared key
    pub mutation_rate: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            agents: 30,
            generations: 5,
            episodes: 100,
            max_ticks: 3600,
            decision_interval: 4,
            epsilon: 0.8,
            eps_decay: 0.995,
            eps_min: 0.01,
            elitism: 0.1,
            mutation_rate: 0.2,
        }
    }
}

/// Outcome of `train`
#[derive(Debug, Clone)]
pub struct TrainingReport {
    /// Fittest single agent seen in any generation
    pub best: PolicyTable,
    pub best_fitness: f64,
    /// Mean fitness per generation
    pub averages: Vec<f64>,
}

/// Train one agent; returns the updated table and its mean reward per episode
pub fn train_agent<R: Rng>(
    settings: &Settings,
    mut table: PolicyTable,
    config: &TrainingConfig,
    rng: &mut R,
) -> (PolicyTable, f64) {
    let mut env = Environment::new(settings);
    let interval = config.decision_interval.max(1);
    let mut epsilon = config.epsilon;
    let mut total_reward = 0i64;

    for _ in 0..config.episodes {
        let mut observation = env.reset();
        let mut ticks = 0;

        while ticks < config.max_ticks {
            let result = if ticks % interval == 0 {
                let key = observation.key();
                let action = if rng.random::<f64>() < epsilon {
                    Environment::sample(rng)
                } else {
                    Action::new(table.best(&key).0, true)
                };
                let result = env.step(action);
                table.record(&key, action.direction, result.reward);
                epsilon = (epsilon * config.eps_decay).max(config.eps_min);
                result
            } else {
                env.step(Action::wait())
            };

            total_reward += i64::from(result.reward);
            observation = result.observation;
            ticks += 1;
            if result.done {
                break;
            }
        }
    }

    let fitness = if config.episodes == 0 {
        0.0
    } else {
        total_reward as f64 / f64::from(config.episodes)
    };
    log::debug!("Agent trained: fitness {:.2}, {} moves", fitness, table.len());
    (table, fitness)
}

/// Breed a child; keys held by one parent are copied from it
pub fn crossover<R: Rng>(mom: &PolicyTable, dad: &PolicyTable, mutation_rate: f64, rng: &mut R) -> PolicyTable {
    let mut keys = mom.sorted_keys();
    keys.extend(dad.sorted_keys());
    keys.sort();
    keys.dedup();

    let mut child = PolicyTable::new();
    for key in keys {
        let mv = match (mom.get(key), dad.get(key)) {
            (Some(m), Some(d)) => {
                if rng.random::<f64>() < mutation_rate {
                    d
                } else {
                    m
                }
            }
            (Some(m), None) => m,
            (None, Some(d)) => d,
            (None, None) => continue,
        };
        child.insert(key.clone(), mv);
    }
    child
}

/// Select parents by fitness and fill the next population
///
/// Each neighbouring pair of elites contributes both parents and one child;
/// the list is then repeated to reach `config.agents`.
pub fn next_generation<R: Rng>(
    mut results: Vec<(PolicyTable, f64)>,
    config: &TrainingConfig,
    rng: &mut R,
) -> Vec<PolicyTable> {
    results.sort_by(|a, b| b.1.total_cmp(&a.1));
    let keep = ((config.elitism * results.len() as f64) as usize)
        .max(1)
        .min(results.len());
    let elites: Vec<PolicyTable> = results.into_iter().take(keep).map(|(table, _)| table).collect();

    let mut children = Vec::with_capacity(elites.len() * 3);
    if elites.len() == 1 {
        children.push(elites[0].clone());
    }
    for pair in elites.windows(2) {
        let (mom, dad) = (&pair[0], &pair[1]);
        let child = crossover(mom, dad, config.mutation_rate, rng);
        children.extend([mom.clone(), dad.clone(), child]);
    }

    children.iter().cycle().take(config.agents).cloned().collect()
}

/// Run a full seeded training session
pub fn train(settings: &Settings, config: &TrainingConfig, seed: u64) -> TrainingReport {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut population = vec![PolicyTable::new(); config.agents];
    let mut report = TrainingReport {
        best: PolicyTable::new(),
        best_fitness: f64::NEG_INFINITY,
        averages: Vec::with_capacity(config.generations as usize),
    };

    for generation in 1..=config.generations {
        if population.is_empty() {
            break;
        }

        let jobs: Vec<(PolicyTable, u64, u64)> = population
            .into_iter()
            .map(|table| (table, rng.random(), rng.random()))
            .collect();

        let results: Vec<(PolicyTable, f64)> = jobs
            .into_par_iter()
            .map(|(table, game_seed, agent_seed)| {
                let settings = Settings {
                    seed: game_seed,
                    ..settings.clone()
                };
                let mut agent_rng = Pcg32::seed_from_u64(agent_seed);
                train_agent(&settings, table, config, &mut agent_rng)
            })
            .collect();

        let average = results.iter().map(|(_, f)| f).sum::<f64>() / results.len() as f64;
        report.averages.push(average);

        if let Some((table, fitness)) = results.iter().max_by(|a, b| a.1.total_cmp(&b.1)) {
            if *fitness > report.best_fitness {
                report.best = table.clone();
                report.best_fitness = *fitness;
            }
        }

        log::info!(
            "Generation {}: {} agents, average fitness {:.2}, best so far {:.2}",
            generation,
            results.len(),
            average,
            report.best_fitness
        );

        population = next_generation(results, config, &mut rng);
    }

    report
}
