//! Per-type component storage
//!
//! One [`ComponentStore`] exists for every [`ComponentType`]. A store only holds
//! values of its own tag; the World guarantees this on insertion.

use std::collections::HashMap;

use super::component::{ComponentType, ComponentValue};
use super::Entity;

/// Table of `Entity -> ComponentValue` for a single component type
#[derive(Debug)]
pub struct ComponentStore {
    component_type: ComponentType,
    values: HashMap<Entity, ComponentValue>,
}

impl ComponentStore {
    /// Create an empty store for one component type
    pub fn new(component_type: ComponentType) -> Self {
        Self {
            component_type,
            values: HashMap::new(),
        }
    }

    /// Tag of the values held by this store
    pub const fn component_type(&self) -> ComponentType {
        self.component_type
    }

    /// Insert or overwrite, returning the previous value
    pub fn insert(&mut self, entity: Entity, value: ComponentValue) -> Option<ComponentValue> {
        debug_assert_eq!(value.component_type(), self.component_type);
        self.values.insert(entity, value)
    }

    /// Component of `entity`
    pub fn get(&self, entity: Entity) -> Option<&ComponentValue> {
        self.values.get(&entity)
    }

    /// Mutable component of `entity`
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut ComponentValue> {
        self.values.get_mut(&entity)
    }

    /// Detach and return the component of `entity`
    pub fn remove(&mut self, entity: Entity) -> Option<ComponentValue> {
        self.values.remove(&entity)
    }

    /// Whether `entity` has a component in this store
    pub fn contains(&self, entity: Entity) -> bool {
        self.values.contains_key(&entity)
    }

    /// Number of stored components
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Drop every component
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// One store per component type, indexed by [`ComponentType::index`]
#[derive(Debug)]
pub struct ComponentStores {
    stores: Vec<ComponentStore>,
}

impl Default for ComponentStores {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentStores {
    /// Create one empty store for every component type
    pub fn new() -> Self {
        Self {
            stores: ComponentType::ALL.iter().map(|&ty| ComponentStore::new(ty)).collect(),
        }
    }

    /// Store for a component type
    pub fn store(&self, component_type: ComponentType) -> &ComponentStore {
        &self.stores[component_type.index()]
    }

    /// Mutable store for a component type
    pub fn store_mut(&mut self, component_type: ComponentType) -> &mut ComponentStore {
        &mut self.stores[component_type.index()]
    }

    /// Remove every component of an entity. Returns how many were removed.
    pub fn remove_entity(&mut self, entity: Entity) -> usize {
        self.stores
            .iter_mut()
            .filter_map(|store| store.remove(entity))
            .count()
    }

    /// Empty every store
    pub fn clear(&mut self) {
        for store in &mut self.stores {
            store.clear();
        }
    }
}
