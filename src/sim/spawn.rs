//! Hostile spawning policy
//!
//! A timer inserts one normal hostile per spawn delay. Independently, once
//! per tick, a score at or above the threshold trades the score for a single
//! elite hostile. The score is reset rather than the run ended; the elite is
//! an easter egg, not a win condition.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::pool::EntityPool;
use super::state::{GameEvent, Hostile};
use crate::config::GameConfig;
use crate::consts::micros;

/// Scheduler phase; mirrors the game-over flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulerState {
    Running,
    Paused,
}

/// Timer-driven spawn policy with score escalation
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    state: SchedulerState,
    elapsed_us: u64,
    rng: Pcg32,
}

impl SpawnScheduler {
    pub fn new(seed: u64) -> Self {
        Self {
            state: SchedulerState::Running,
            elapsed_us: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Time accumulated toward the next spawn
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_us as f64 / 1000.0
    }

    pub fn pause(&mut self) {
        self.state = SchedulerState::Paused;
    }

    /// Resume with a fresh spawn timer
    pub fn resume(&mut self) {
        self.state = SchedulerState::Running;
        self.elapsed_us = 0;
    }

    /// Run one tick of the policy
    pub fn step(
        &mut self,
        dt_ms: f64,
        config: &GameConfig,
        pool: &mut EntityPool,
        score: &mut u32,
        events: &mut Vec<GameEvent>,
    ) {
        if self.state == SchedulerState::Paused {
            return;
        }

        self.elapsed_us += micros(dt_ms);
        if self.elapsed_us >= micros(config.spawn_delay_ms) {
            self.elapsed_us = 0;
            let x = self.spawn_x(config);
            let id = pool.next_entity_id();
            pool.hostiles.insert(Hostile::normal(id, x, config));
            log::debug!("Spawned hostile {} at x={:.1}", id, x);
            events.push(GameEvent::Spawned { hostile: id, x });
        }

        if *score >= config.score_threshold {
            let x = self.spawn_x(config);
            let id = pool.next_entity_id();
            pool.hostiles.insert(Hostile::elite(id, x, config));
            log::info!("Score {} reached threshold, elite {} incoming", *score, id);
            *score = 0;
            events.push(GameEvent::EliteSpawned { hostile: id, x });
        }
    }

    /// Uniform x across the valid spawn width
    fn spawn_x(&mut self, config: &GameConfig) -> f32 {
        self.rng.random_range(0.0..=config.hostile_max_x())
    }
}
