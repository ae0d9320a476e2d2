//! First-person shooting gallery
//!
//! The 3D variant of the game: the player stands still and aims a bow with
//! mouse look, chickens wander around a square meadow, and one arrow may be
//! in flight at a time. Hits are tested by centre distance once per tick,
//! in the same pass that moves the arrow.

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::render::{Color, Renderer};

/// Bow tip relative to the eye, in camera space
const BOW_OFFSET: Vec3 = Vec3::new(0.3, -0.2, -1.0);

/// Gallery tuning. Distances in world units, speeds in units per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Camera position (first-person eye height)
    pub eye: Vec3,
    /// Radians of look per pixel of mouse movement
    pub look_sensitivity: f32,
    pub arrow_speed: f32,
    /// Centre distance below which an arrow hits a chicken
    pub hit_distance: f32,
    /// Arrows farther than this from the origin are lost
    pub max_arrow_distance: f32,
    pub spawn_delay_ms: f64,
    /// Chickens spawn in [-extent, extent) on x and z
    pub spawn_half_extent: f32,
    pub chicken_height: f32,
    pub chicken_radius: f32,
    /// Largest random-walk step per axis per tick
    pub wander_step: f32,
    pub points_per_hit: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 1.6, 5.0),
            look_sensitivity: 0.002,
            arrow_speed: 0.5,
            hit_distance: 0.5,
            max_arrow_distance: 50.0,
            spawn_delay_ms: 2000.0,
            spawn_half_extent: 10.0,
            chicken_height: 0.3,
            chicken_radius: 0.3,
            wander_step: 0.01,
            points_per_hit: 10,
        }
    }
}

impl GalleryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive: [(&'static str, f64); 8] = [
            ("look_sensitivity", self.look_sensitivity as f64),
            ("arrow_speed", self.arrow_speed as f64),
            ("hit_distance", self.hit_distance as f64),
            ("max_arrow_distance", self.max_arrow_distance as f64),
            ("spawn_delay_ms", self.spawn_delay_ms),
            ("spawn_half_extent", self.spawn_half_extent as f64),
            ("chicken_radius", self.chicken_radius as f64),
            ("points_per_hit", self.points_per_hit as f64),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if !self.wander_step.is_finite() || self.wander_step < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "wander_step",
                value: self.wander_step as f64,
            });
        }
        Ok(())
    }
}

/// Mouse-look camera. Yaw about world Y, then pitch about local X.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub yaw: f32,
    pub pitch: f32,
}

impl Camera {
    /// Apply a mouse movement; pitch stops at straight up/down
    pub fn look(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.yaw -= dx * sensitivity;
        self.pitch = (self.pitch - dy * sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// Unit view direction (-Z at rest)
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Yaw/pitch that look along `dir`
    pub fn facing(dir: Vec3) -> Self {
        let dir = dir.normalize_or_zero();
        Self {
            yaw: (-dir.x).atan2(-dir.z),
            pitch: dir.y.clamp(-1.0, 1.0).asin(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arrow {
    pub pos: Vec3,
    pub vel: Vec3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chicken {
    pub id: u32,
    pub pos: Vec3,
}

/// Input for one gallery tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GalleryInput {
    /// Mouse movement since last tick (pixels)
    pub look_dx: f32,
    pub look_dy: f32,
    pub fire: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GalleryEvent {
    ArrowFired,
    ChickenSpawned { chicken: u32 },
    ChickenHit { chicken: u32, score: u32 },
    ArrowLost,
}

/// Complete gallery session
#[derive(Debug, Clone)]
pub struct GalleryState {
    pub config: GalleryConfig,
    pub camera: Camera,
    /// The single arrow allowed in flight
    pub arrow: Option<Arrow>,
    pub chickens: Vec<Chicken>,
    pub score: u32,
    spawn_elapsed_ms: f64,
    rng: Pcg32,
    next_id: u32,
}

impl GalleryState {
    pub fn new(config: GalleryConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            camera: Camera::default(),
            arrow: None,
            chickens: Vec::new(),
            score: 0,
            spawn_elapsed_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        })
    }

    #[inline]
    pub fn projectile_in_flight(&self) -> bool {
        self.arrow.is_some()
    }

    /// Where a new arrow appears
    pub fn bow_tip(&self) -> Vec3 {
        self.config.eye + self.camera.rotation() * BOW_OFFSET
    }

    pub fn spawn_chicken(&mut self) -> u32 {
        let extent = self.config.spawn_half_extent;
        let x = self.rng.random_range(-extent..extent);
        let z = self.rng.random_range(-extent..extent);
        let id = self.next_id;
        self.next_id += 1;
        self.chickens.push(Chicken {
            id,
            pos: Vec3::new(x, self.config.chicken_height, z),
        });
        id
    }

    /// Look deltas that turn the camera from where it is toward `target`
    pub fn aim_input(&self, target: Vec3) -> GalleryInput {
        let want = Camera::facing(target - self.config.eye);
        let sensitivity = self.config.look_sensitivity;
        GalleryInput {
            look_dx: (self.camera.yaw - want.yaw) / sensitivity,
            look_dy: (self.camera.pitch - want.pitch) / sensitivity,
            fire: false,
        }
    }
}

/// Advance the gallery by one tick
pub fn gallery_tick(
    state: &mut GalleryState,
    input: &GalleryInput,
    dt_ms: f64,
) -> Vec<GalleryEvent> {
    let mut events = Vec::new();
    let config = state.config.clone();

    state
        .camera
        .look(input.look_dx, input.look_dy, config.look_sensitivity);

    if input.fire && !state.projectile_in_flight() {
        state.arrow = Some(Arrow {
            pos: state.bow_tip(),
            vel: state.camera.forward() * config.arrow_speed,
        });
        events.push(GalleryEvent::ArrowFired);
    }

    // Wander
    if config.wander_step > 0.0 {
        let step = config.wander_step;
        for chicken in &mut state.chickens {
            chicken.pos.x += state.rng.random_range(-step..step);
            chicken.pos.z += state.rng.random_range(-step..step);
        }
    }

    // Arrow flight and hits
    if let Some(arrow) = state.arrow.as_mut() {
        arrow.pos += arrow.vel;
        let arrow_pos = arrow.pos;

        let hit = state
            .chickens
            .iter()
            .position(|c| c.pos.distance(arrow_pos) < config.hit_distance);
        if let Some(index) = hit {
            let chicken = state.chickens.remove(index);
            state.arrow = None;
            state.score = state.score.saturating_add(config.points_per_hit);
            log::debug!("Chicken {} hit, score {}", chicken.id, state.score);
            events.push(GalleryEvent::ChickenHit {
                chicken: chicken.id,
                score: state.score,
            });
        } else if arrow_pos.length() > config.max_arrow_distance {
            state.arrow = None;
            events.push(GalleryEvent::ArrowLost);
        }
    }

    state.spawn_elapsed_ms += dt_ms;
    if state.spawn_elapsed_ms >= config.spawn_delay_ms {
        state.spawn_elapsed_ms = 0.0;
        let chicken = state.spawn_chicken();
        events.push(GalleryEvent::ChickenSpawned { chicken });
    }

    events
}

/// Top-down map of the meadow, `pixels_per_unit` scaled around `center`
pub fn draw_overhead<R: Renderer + ?Sized>(
    state: &GalleryState,
    renderer: &mut R,
    center: Vec2,
    pixels_per_unit: f32,
) {
    let to_screen = |p: Vec3| center + Vec2::new(p.x, p.z) * pixels_per_unit;

    renderer.clear();
    let marker = Vec2::splat(0.5 * pixels_per_unit);
    renderer.draw_rect(to_screen(state.config.eye) - marker / 2.0, marker, Color::PLAYER);
    for chicken in &state.chickens {
        renderer.draw_circle(
            to_screen(chicken.pos),
            state.config.chicken_radius * pixels_per_unit,
            Color::CHICKEN,
        );
    }
    if let Some(arrow) = &state.arrow {
        renderer.draw_circle(to_screen(arrow.pos), 0.1 * pixels_per_unit, Color::BANANA);
    }
    renderer.present();
}
