//! Collision detection and resolution
//!
//! Resolution is mark-and-sweep: [`resolve_collisions`] only reads the
//! pools and returns events. The tick applies them and culls afterwards, so
//! no collection is mutated while it is being iterated.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pool::Entity;
use super::state::{Hostile, Player, Projectile};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from its top-left corner and size
    pub fn from_corner(corner: Vec2, size: Vec2) -> Self {
        Self {
            min: corner,
            max: corner + size,
        }
    }

    /// Box from its centre and half extents
    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap; boxes that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Result of one frame of collision checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionEvent {
    /// Projectile struck hostile: one damage, projectile consumed
    Hit { hostile: u32, projectile: u32 },
    /// Hostile's health reached zero from this frame's hits
    Defeated { hostile: u32 },
    /// Hostile touched the player
    PlayerCollision { hostile: u32 },
    /// Terminal; nothing follows it
    GameOver,
}

/// Compute this frame's collision events
///
/// Each projectile hits at most one hostile: the first live one in pool
/// order. Health is tracked locally so a hostile defeated earlier in the
/// frame absorbs no more hits and cannot hurt the player.
///
/// Only the first live hostile overlapping the player, in pool order, is
/// reported as `PlayerCollision`. `GameOver` follows it and ends the list.
pub fn resolve_collisions(
    player: &Player,
    projectiles: &[Projectile],
    hostiles: &[Hostile],
) -> Vec<CollisionEvent> {
    let mut events = Vec::new();
    let mut health: Vec<i32> = hostiles.iter().map(|h| h.health).collect();

    for projectile in projectiles {
        let bounds = projectile.bounds();
        let target = hostiles
            .iter()
            .enumerate()
            .find(|(i, h)| health[*i] > 0 && bounds.overlaps(&h.bounds()));

        if let Some((i, hostile)) = target {
            events.push(CollisionEvent::Hit {
                hostile: hostile.id,
                projectile: projectile.id,
            });
            health[i] -= 1;
            if health[i] <= 0 {
                events.push(CollisionEvent::Defeated { hostile: hostile.id });
            }
        }
    }

    let player_bounds = player.bounds();
    let crash = hostiles
        .iter()
        .enumerate()
        .find(|(i, h)| health[*i] > 0 && player_bounds.overlaps(&h.bounds()));
    if let Some((_, hostile)) = crash {
        events.push(CollisionEvent::PlayerCollision { hostile: hostile.id });
        events.push(CollisionEvent::GameOver);
    }

    events
}
