//! Gameplay configuration
//!
//! Every tunable constant of the simulation lives in [`GameConfig`]. Hosts
//! may load overrides from JSON; any field left out keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration errors, reported once at startup
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A speed, size, delay or dimension that must be positive is not
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    /// A coordinate that may have any sign is NaN or infinite
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    /// An entity is wider than the field it has to move in
    #[error("{entity} of width {size} does not fit in a field {field_width} wide")]
    FieldTooSmall {
        entity: &'static str,
        size: f32,
        field_width: f32,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Side-scroller tuning. Distances are in field pixels, speeds in pixels per
/// tick, durations in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Player ===
    pub player_size: f32,
    pub player_speed: f32,
    /// Gap between the player's bottom edge and the field bottom
    pub player_margin: f32,
    pub fire_cooldown_ms: f64,

    // === Projectiles ===
    pub projectile_radius: f32,
    pub projectile_speed: f32,

    // === Hostiles ===
    pub hostile_size: f32,
    pub hostile_speed: f32,
    pub spawn_delay_ms: f64,

    // === Escalation ===
    /// Score at which an elite spawns and the counter resets
    pub score_threshold: u32,
    pub score_per_defeat: u32,
    pub elite_health: i32,
    pub elite_speed: f32,
    /// Spawn y of the elite (negative = above the field)
    pub elite_spawn_y: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 600.0,

            player_size: 50.0,
            player_speed: 5.0,
            player_margin: 10.0,
            fire_cooldown_ms: 500.0,

            projectile_radius: 10.0,
            projectile_speed: 10.0,

            hostile_size: 40.0,
            hostile_speed: 2.0,
            spawn_delay_ms: 2000.0,

            score_threshold: 100,
            score_per_defeat: 1,
            elite_health: 100,
            elite_speed: 0.5,
            elite_spawn_y: -100.0,
        }
    }
}

impl GameConfig {
    /// Check every invariant the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive: [(&'static str, f64); 14] = [
            ("field_width", self.field_width as f64),
            ("field_height", self.field_height as f64),
            ("player_size", self.player_size as f64),
            ("player_speed", self.player_speed as f64),
            ("fire_cooldown_ms", self.fire_cooldown_ms),
            ("projectile_radius", self.projectile_radius as f64),
            ("projectile_speed", self.projectile_speed as f64),
            ("hostile_size", self.hostile_size as f64),
            ("hostile_speed", self.hostile_speed as f64),
            ("spawn_delay_ms", self.spawn_delay_ms),
            ("score_threshold", self.score_threshold as f64),
            ("score_per_defeat", self.score_per_defeat as f64),
            ("elite_health", self.elite_health as f64),
            ("elite_speed", self.elite_speed as f64),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if !self.player_margin.is_finite() || self.player_margin < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "player_margin",
                value: self.player_margin as f64,
            });
        }
        if !self.elite_spawn_y.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "elite_spawn_y",
                value: self.elite_spawn_y as f64,
            });
        }

        for (entity, size) in [("player", self.player_size), ("hostile", self.hostile_size)] {
            if size > self.field_width {
                return Err(ConfigError::FieldTooSmall {
                    entity,
                    size,
                    field_width: self.field_width,
                });
            }
        }
        Ok(())
    }

    /// Consume the config, returning it only if it validates
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    /// Load a JSON config file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Rightmost legal player x
    #[inline]
    pub fn player_max_x(&self) -> f32 {
        self.field_width - self.player_size
    }

    /// Rightmost legal hostile spawn x
    #[inline]
    pub fn hostile_max_x(&self) -> f32 {
        self.field_width - self.hostile_size
    }

    /// Fixed player row
    #[inline]
    pub fn player_y(&self) -> f32 {
        self.field_height - self.player_size - self.player_margin
    }

    /// Player start x (horizontally centred)
    #[inline]
    pub fn player_start_x(&self) -> f32 {
        self.player_max_x() / 2.0
    }
}
