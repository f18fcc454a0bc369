//! Name → component type lookup used at the scene boundary

use std::collections::HashMap;

use super::component::{ComponentType, ComponentValue, Payload};
use super::EcsError;

/// Maps scene-document component names to component types
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    names: HashMap<String, ComponentType>,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every engine component under its canonical name
    pub fn with_engine_components() -> Self {
        let mut registry = Self::new();
        for &ty in ComponentType::ALL {
            registry.register(ty.name(), ty);
        }
        registry
    }

    /// Register a name (canonical or alias). Re-registering a name rebinds it.
    pub fn register(&mut self, name: impl Into<String>, component_type: ComponentType) {
        let name = name.into();
        if let Some(previous) = self.names.insert(name.clone(), component_type) {
            if previous != component_type {
                log::warn!("Component name '{name}' rebound from {previous} to {component_type}");
            }
        }
    }

    /// Look up a component type by name
    ///
    /// # Errors
    /// [`EcsError::UnregisteredComponentType`] when the name is unknown.
    pub fn resolve(&self, name: &str) -> Result<ComponentType, EcsError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| EcsError::UnregisteredComponentType(name.to_string()))
    }

    /// Resolve a name and deserialize a payload into the matching component
    ///
    /// # Errors
    /// Unknown name or a payload that does not fit the component's schema.
    pub fn instantiate(&self, name: &str, payload: Payload) -> Result<ComponentValue, EcsError> {
        let component_type = self.resolve(name)?;
        component_type
            .deserialize(payload)
            .map_err(|source| EcsError::ComponentDeserialization {
                component: name.to_string(),
                source,
            })
    }

    /// Whether `name` resolves to a component type
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Number of registered names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no names are registered
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
