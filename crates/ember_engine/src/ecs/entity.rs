//! Entity identifiers and the registry that tracks which ones are alive

use std::collections::BTreeSet;
use std::fmt;

/// Entity identifier
///
/// Carries no data of its own. Ids come from a monotonic counter and are never
/// handed out twice, so a stale `Entity` can never alias a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    id: u32,
}

impl Entity {
    /// Create a new entity with the given ID
    pub(super) const fn new(id: u32) -> Self {
        Self { id }
    }

    /// Get the entity ID
    pub const fn id(&self) -> u32 {
        self.id
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.id)
    }
}

/// Issues entity ids and tracks liveness
#[derive(Debug, Default)]
pub struct EntityRegistry {
    next_id: u32,
    alive: BTreeSet<Entity>,
}

impl EntityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh id and mark it alive
    ///
    /// # Panics
    /// Panics if the `u32` id space is exhausted.
    pub fn create(&mut self) -> Entity {
        let entity = Entity::new(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .unwrap_or_else(|| panic!("entity id space exhausted after {} entities", u32::MAX));
        self.alive.insert(entity);
        entity
    }

    /// Mark an entity dead. Returns `false` if it was not alive.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        self.alive.remove(&entity)
    }

    /// Whether the entity is currently alive
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.alive.contains(&entity)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.alive.len()
    }

    /// Whether no entity is alive
    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Live entities in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.alive.iter().copied()
    }
}
