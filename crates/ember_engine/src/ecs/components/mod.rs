//! ECS Components module
//!
//! Plain data structs, one per member of the closed component set declared in
//! [`crate::ecs::component`]. All of them deserialize from scene payloads.

pub mod transform;
pub mod renderable;
pub mod movement;
pub mod collision;
pub mod health;
pub mod audio;
pub mod ui;
pub mod tags;

pub use transform::TransformComponent;
pub use renderable::{MeshComponent, SpriteComponent};
pub use movement::{ControllableComponent, MovementStatsComponent};
pub use collision::ColliderComponent;
pub use health::HealthComponent;
pub use audio::{Fade, MusicComponent, SoundEffectComponent};
pub use ui::{ButtonState, UiButtonComponent, UiImageComponent, UiTransformComponent};
pub use tags::{EnemyComponent, PlayerComponent};
