//! ECS World implementation

use super::component::{Component, ComponentType, ComponentValue};
use super::entity::EntityRegistry;
use super::storage::ComponentStores;
use super::{EcsError, Entity};

/// ECS World containing all entities and components
///
/// The World exclusively owns entity liveness and every component value.
/// Queries return snapshots, so destroying entities while iterating over a
/// query result is safe.
#[derive(Debug, Default)]
pub struct World {
    entities: EntityRegistry,
    stores: ComponentStores,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.entities.create();
        log::trace!("Created {entity}");
        entity
    }

    /// Destroy an entity and all of its components.
    ///
    /// Returns `false` when the entity was not alive.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if !self.entities.is_alive(entity) {
            return false;
        }
        let removed = self.stores.remove_entity(entity);
        self.entities.destroy(entity);
        log::trace!("Destroyed {entity} ({removed} components)");
        true
    }

    /// Whether the entity is currently alive
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Snapshot of every live entity in ascending id order
    pub fn entities(&self) -> Vec<Entity> {
        self.entities.iter().collect()
    }

    /// Attach a component, replacing any existing component of the same type.
    ///
    /// # Errors
    /// Returns [`EcsError::UnknownEntity`] if the entity is not alive; nothing
    /// is stored in that case.
    pub fn add_component<C: Component>(&mut self, entity: Entity, component: C) -> Result<Option<C>, EcsError> {
        let previous = self.insert_value(entity, component.into_value())?;
        Ok(previous.and_then(C::from_value))
    }

    /// Untyped [`World::add_component`]
    ///
    /// # Errors
    /// Returns [`EcsError::UnknownEntity`] if the entity is not alive.
    pub fn insert_value(&mut self, entity: Entity, value: ComponentValue) -> Result<Option<ComponentValue>, EcsError> {
        if !self.entities.is_alive(entity) {
            return Err(EcsError::UnknownEntity(entity));
        }
        let store = self.stores.store_mut(value.component_type());
        Ok(store.insert(entity, value))
    }

    /// Get a component from an entity
    pub fn get_component<C: Component>(&self, entity: Entity) -> Option<&C> {
        self.stores
            .store(C::TYPE)
            .get(entity)
            .and_then(C::from_value_ref)
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<C: Component>(&mut self, entity: Entity) -> Option<&mut C> {
        self.stores
            .store_mut(C::TYPE)
            .get_mut(entity)
            .and_then(C::from_value_mut)
    }

    /// Untyped component lookup
    pub fn get_value(&self, entity: Entity, component_type: ComponentType) -> Option<&ComponentValue> {
        self.stores.store(component_type).get(entity)
    }

    /// Detach a component, returning it if it was present
    pub fn remove_component<C: Component>(&mut self, entity: Entity) -> Option<C> {
        self.stores
            .store_mut(C::TYPE)
            .remove(entity)
            .and_then(C::from_value)
    }

    /// Untyped [`World::remove_component`]. Returns whether anything was removed.
    pub fn remove_component_of(&mut self, entity: Entity, component_type: ComponentType) -> bool {
        self.stores.store_mut(component_type).remove(entity).is_some()
    }

    /// Whether `entity` has a component of type `C`
    pub fn has_component<C: Component>(&self, entity: Entity) -> bool {
        self.has_component_of(entity, C::TYPE)
    }

    /// Whether `entity` has a component of the given type
    pub fn has_component_of(&self, entity: Entity, component_type: ComponentType) -> bool {
        self.stores.store(component_type).contains(entity)
    }

    /// Number of entities carrying a component type
    pub fn component_count(&self, component_type: ComponentType) -> usize {
        self.stores.store(component_type).len()
    }

    /// Live entities that have every listed component type, sorted by id.
    ///
    /// An empty list matches every live entity.
    pub fn entities_with(&self, component_types: &[ComponentType]) -> Vec<Entity> {
        self.entities
            .iter()
            .filter(|&entity| {
                component_types
                    .iter()
                    .all(|&ty| self.stores.store(ty).contains(entity))
            })
            .collect()
    }

    /// Destroy every entity
    pub fn clear(&mut self) {
        for entity in self.entities() {
            self.entities.destroy(entity);
        }
        self.stores.clear();
    }
}
