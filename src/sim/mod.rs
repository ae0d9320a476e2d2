//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-tick velocities only
//! - Seeded RNG only
//! - Stable iteration order (pool insertion order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod pool;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::{Aabb, CollisionEvent, resolve_collisions};
pub use pool::{Entity, EntityPool, Pool};
pub use spawn::{SchedulerState, SpawnScheduler};
pub use state::{GameEvent, GamePhase, GameState, Hostile, HostileKind, Player, Projectile};
pub use tick::{TickInput, tick};
