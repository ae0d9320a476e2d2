//! Game state and core simulation types
//!
//! One [`GameState`] is one play session. Everything the tick mutates lives
//! here, so nothing is shared through globals.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::pool::{Entity, EntityPool};
use super::spawn::SpawnScheduler;
use crate::config::{ConfigError, GameConfig};
use crate::consts::micros;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended; only a restart does anything
    GameOver,
}

/// Hostile variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HostileKind {
    #[default]
    Normal,
    /// High-health, slow escalation spawn
    Elite,
}

/// Notable things that happened during a tick (for audio/visual cues)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Fired { projectile: u32 },
    Spawned { hostile: u32, x: f32 },
    EliteSpawned { hostile: u32, x: f32 },
    Hit { hostile: u32, projectile: u32 },
    Defeated { hostile: u32, kind: HostileKind },
    GameOver { score: u32 },
    Restarted,
}

/// The player's ship. `pos` is the top-left corner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: f32,
}

impl Player {
    /// Player centred horizontally on its fixed row
    pub fn spawn(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.player_start_x(), config.player_y()),
            size: config.player_size,
        }
    }

    /// Move horizontally, clamped to the field
    pub fn shift(&mut self, dx: f32, config: &GameConfig) {
        self.pos.x = (self.pos.x + dx).clamp(0.0, config.player_max_x());
    }

    /// Where a fired projectile appears (top centre)
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size / 2.0, self.pos.y)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_corner(self.pos, Vec2::splat(self.size))
    }
}

/// A player-fired projectile. `pos` is the centre.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2, speed: f32, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::new(0.0, -speed),
            radius,
        }
    }
}

impl Entity for Projectile {
    fn id(&self) -> u32 {
        self.id
    }

    fn advance(&mut self) {
        self.pos += self.vel;
    }

    fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.radius))
    }
}

/// An enemy chicken. `pos` is the top-left corner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    pub id: u32,
    pub kind: HostileKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub health: i32,
}

impl Hostile {
    pub fn normal(id: u32, x: f32, config: &GameConfig) -> Self {
        Self {
            id,
            kind: HostileKind::Normal,
            pos: Vec2::new(x, 0.0),
            vel: Vec2::new(0.0, config.hostile_speed),
            size: config.hostile_size,
            health: 1,
        }
    }

    pub fn elite(id: u32, x: f32, config: &GameConfig) -> Self {
        Self {
            id,
            kind: HostileKind::Elite,
            pos: Vec2::new(x, config.elite_spawn_y),
            vel: Vec2::new(0.0, config.elite_speed),
            size: config.hostile_size,
            health: config.elite_health,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

impl Entity for Hostile {
    fn id(&self) -> u32 {
        self.id
    }

    fn advance(&mut self) {
        self.pos += self.vel;
    }

    fn bounds(&self) -> Aabb {
        Aabb::from_corner(self.pos, Vec2::splat(self.size))
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub phase: GamePhase,
    pub player: Player,
    pub pool: EntityPool,
    pub score: u32,
    pub spawner: SpawnScheduler,
    /// Simulation clock in microseconds, advanced only while running
    pub time_us: u64,
    /// Clock time of the last accepted shot
    pub last_fire_us: Option<u64>,
}

impl GameState {
    /// Create a new session; fails if the config is invalid
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        Ok(Self {
            phase: GamePhase::Running,
            player: Player::spawn(&config),
            pool: EntityPool::default(),
            score: 0,
            spawner: SpawnScheduler::new(seed),
            time_us: 0,
            last_fire_us: None,
            config,
        })
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Simulation clock in milliseconds
    #[inline]
    pub fn time_ms(&self) -> f64 {
        self.time_us as f64 / 1000.0
    }

    /// Whether the fire cooldown has elapsed
    pub fn can_fire(&self) -> bool {
        match self.last_fire_us {
            None => true,
            Some(last) => {
                self.time_us.saturating_sub(last) >= micros(self.config.fire_cooldown_ms)
            }
        }
    }

    /// Reset player, score and pools and resume spawning
    ///
    /// The spawn RNG keeps its stream so successive rounds differ.
    pub fn restart(&mut self) {
        self.phase = GamePhase::Running;
        self.player = Player::spawn(&self.config);
        self.pool.clear();
        self.score = 0;
        self.time_us = 0;
        self.last_fire_us = None;
        self.spawner.resume();
    }

    /// End the run and stop spawning
    pub fn end(&mut self) {
        self.phase = GamePhase::GameOver;
        self.spawner.pause();
    }
}
