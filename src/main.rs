//! AI Game entry point
//!
//! Runs a headless demo: a short seeded training session evolves a policy
//! table, then the learned policy and the built-in greedy agent each play a
//! handful of episodes and the results are logged. Set `RUST_LOG=debug` to
//! watch every selection, trap cycle and death.

use aigame::Settings;
use aigame::agent::{Environment, TrainingConfig, greedy_action, train};
use glam::Vec2;

/// Episodes to play
const EPISODES: u32 = 5;
/// Tick cap per episode (one minute at the nominal frame rate)
const MAX_EPISODE_SECONDS: u64 = 60;
/// The agent decides every this many ticks so the sprite can settle
const DECISION_INTERVAL: u64 = 20;
/// Training run size; kept small so the demo finishes in seconds
const TRAINING: TrainingConfig = TrainingConfig {
    agents: 8,
    generations: 3,
    episodes: 10,
    max_ticks: 1800,
    decision_interval: 4,
    epsilon: 0.8,
    eps_decay: 0.995,
    eps_min: 0.01,
    elitism: 0.25,
    mutation_rate: 0.2,
};

fn main() {
    env_logger::init();
    log::info!("AI Game (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let max_ticks = MAX_EPISODE_SECONDS * u64::from(settings.target_fps);

    let report = train(&settings, &TRAINING, settings.seed);
    log::info!(
        "Training done: best fitness {:.2}, {} learned moves",
        report.best_fitness,
        report.best.len()
    );

    let mut env = Environment::new(&settings);
    let mut best = 0;
    for episode in 1..=EPISODES {
        let summary = env.run_episode(|obs| report.best.action(obs), max_ticks, TRAINING.decision_interval);
        best = best.max(summary.score);
        log::info!(
            "Trained episode {}: score {} after {} ticks ({})",
            episode,
            summary.score,
            summary.ticks,
            if summary.died { "died" } else { "survived" }
        );
    }

    for episode in 1..=EPISODES {
        let summary = env.run_episode(greedy_action, max_ticks, DECISION_INTERVAL);
        best = best.max(summary.score);
        log::info!(
            "Greedy episode {}: score {} after {} ticks ({})",
            episode,
            summary.score,
            summary.ticks,
            if summary.died { "died" } else { "survived" }
        );
    }

    // Final frame as a renderer would receive it
    let snapshot = env.state().snapshot();
    match snapshot.to_json() {
        Ok(json) => log::debug!("Final snapshot: {}", json),
        Err(e) => log::warn!("Snapshot export failed: {}", e),
    }
    let shapes = aigame::renderer::frame_shapes(&snapshot, Vec2::ZERO);
    log::debug!("Final frame: {} shapes", shapes.len());

    log::info!("Best score over {} episodes: {}", EPISODES * 2, best);
}
