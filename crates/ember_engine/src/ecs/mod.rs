//! Entity-Component-System implementation
//!
//! Entities are plain ids, components are plain data stored per type, and
//! systems are ordered behaviour run once per frame by the [`Scheduler`].

pub mod entity;
pub mod component;
pub mod components;
pub mod storage;
pub mod world;
pub mod registry;
pub mod system;
pub mod scheduler;
pub mod systems;
mod error;

#[cfg(test)]
mod tests;

pub use entity::Entity;
pub use component::{Component, ComponentType, ComponentValue, Payload};
pub use error::EcsError;
pub use world::World;
pub use registry::ComponentRegistry;
pub use system::{Priority, System, SystemContext, SystemError};
pub use scheduler::Scheduler;
