//! Game-specific systems

use std::collections::HashMap;

use ember_engine::prelude::*;

/// Swings enemies left and right around their spawn point
#[derive(Debug, Default)]
pub struct EnemyPatrolSystem {
    origins: HashMap<Entity, f32>,
}

impl EnemyPatrolSystem {
    pub fn new() -> Self {
        Self::default()
    }
}

impl System for EnemyPatrolSystem {
    fn name(&self) -> &str {
        "EnemyPatrolSystem"
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _delta_time: f32) -> Result<(), SystemError> {
        #[allow(clippy::cast_possible_truncation)]
        let phase = ctx.total_time.sin() as f32;

        let enemies = ctx.world.entities_with(&[ComponentType::Enemy, ComponentType::Transform]);
        self.origins.retain(|entity, _| enemies.contains(entity));

        for entity in enemies {
            let Some(distance) = ctx.world.get_component::<EnemyComponent>(entity).map(|e| e.patrol_distance) else {
                continue;
            };
            let Some(transform) = ctx.world.get_component_mut::<TransformComponent>(entity) else {
                continue;
            };
            let origin = *self.origins.entry(entity).or_insert(transform.position.x);
            transform.position.x = origin + phase * distance;
        }
        Ok(())
    }
}
