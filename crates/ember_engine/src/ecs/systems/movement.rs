//! Applies movement intent to transforms

use crate::ecs::component::ComponentType;
use crate::ecs::components::{ControllableComponent, MovementStatsComponent, TransformComponent};
use crate::ecs::system::{Priority, System, SystemContext, SystemError};

/// Moves controllable entities by `direction * speed * delta_time`.
///
/// The pre-move position is snapshotted first so collision response can undo
/// the step.
#[derive(Debug, Default)]
pub struct MovementSystem;

impl MovementSystem {
    /// Movement system
    pub fn new() -> Self {
        Self
    }
}

impl System for MovementSystem {
    fn name(&self) -> &str {
        "MovementSystem"
    }

    fn priority(&self) -> i32 {
        Priority::PHYSICS
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, delta_time: f32) -> Result<(), SystemError> {
        let movers = ctx.world.entities_with(&[
            ComponentType::Controllable,
            ComponentType::Transform,
            ComponentType::MovementStats,
        ]);

        for entity in movers {
            let (Some(direction), Some(speed)) = (
                ctx.world.get_component::<ControllableComponent>(entity).map(ControllableComponent::direction),
                ctx.world.get_component::<MovementStatsComponent>(entity).map(|stats| stats.speed),
            ) else {
                continue;
            };
            let Some(transform) = ctx.world.get_component_mut::<TransformComponent>(entity) else {
                continue;
            };

            transform.update_previous_position();
            let step = direction * (speed * delta_time);
            transform.position.x += step.x;
            transform.position.y += step.y;
        }
        Ok(())
    }
}
