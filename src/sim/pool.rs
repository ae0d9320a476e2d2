//! Entity storage
//!
//! The pool is the sole owner of every projectile and hostile. Nothing else
//! holds an entity; events refer to them by id.

use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::state::{Hostile, Projectile};

/// Something the pool can move and cull
pub trait Entity {
    fn id(&self) -> u32;
    /// Move by the fixed per-tick velocity
    fn advance(&mut self);
    fn bounds(&self) -> Aabb;
}

/// Insertion-ordered collection of one entity type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool<T> {
    items: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> Pool<T> {
    pub fn insert(&mut self, entity: T) {
        self.items.push(entity);
    }

    pub fn advance(&mut self) {
        for entity in &mut self.items {
            entity.advance();
        }
    }

    /// Remove every entity matching `pred` in one pass; returns how many went
    pub fn remove_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(|e| !pred(e));
        before - self.items.len()
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.items.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut T> {
        self.items.iter_mut().find(|e| e.id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Projectiles and hostiles for one session, plus the id allocator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityPool {
    pub projectiles: Pool<Projectile>,
    pub hostiles: Pool<Hostile>,
    next_id: u32,
}

impl Default for EntityPool {
    fn default() -> Self {
        Self {
            projectiles: Pool::default(),
            hostiles: Pool::default(),
            next_id: 1,
        }
    }
}

impl EntityPool {
    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Advance every live entity by one tick
    pub fn advance(&mut self) {
        self.projectiles.advance();
        self.hostiles.advance();
    }

    /// Drop all entities. Ids keep counting so old events never alias.
    pub fn clear(&mut self) {
        self.projectiles.clear();
        self.hostiles.clear();
    }

    pub fn len(&self) -> usize {
        self.projectiles.len() + self.hostiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
