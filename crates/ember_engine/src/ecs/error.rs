//! ECS error types

use thiserror::Error;

use super::Entity;

/// Errors raised by the World and the component registry
#[derive(Debug, Error)]
pub enum EcsError {
    /// The entity was never created or has been destroyed
    #[error("{0} is not alive")]
    UnknownEntity(Entity),

    /// No component type is registered under this name
    #[error("unregistered component type '{0}'")]
    UnregisteredComponentType(String),

    /// A payload did not match the component's schema
    #[error("failed to deserialize {component}: {source}")]
    ComponentDeserialization {
        /// Registered name of the component
        component: String,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },
}
