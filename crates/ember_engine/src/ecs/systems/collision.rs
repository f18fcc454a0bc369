//! Solid-object collision response

use crate::ecs::component::ComponentType;
use crate::ecs::components::{ColliderComponent, TransformComponent};
use crate::ecs::system::{Priority, System, SystemContext, SystemError};
use crate::ecs::Entity;

/// Undoes the frame's movement of a mobile collider that ends up inside a
/// solid one.
///
/// Which collider kinds are mobile and which are solid is configured per game,
/// e.g. `"player"` against `"wall"`.
#[derive(Debug, Clone)]
pub struct CollisionSystem {
    mobile_kind: String,
    solid_kind: String,
}

impl CollisionSystem {
    /// Keep colliders of `mobile_kind` out of colliders of `solid_kind`
    pub fn new(mobile_kind: impl Into<String>, solid_kind: impl Into<String>) -> Self {
        Self {
            mobile_kind: mobile_kind.into(),
            solid_kind: solid_kind.into(),
        }
    }

    fn overlapping(ctx: &SystemContext<'_>, a: Entity, b: Entity) -> bool {
        let world = &*ctx.world;
        match (
            world.get_component::<TransformComponent>(a),
            world.get_component::<ColliderComponent>(a),
            world.get_component::<TransformComponent>(b),
            world.get_component::<ColliderComponent>(b),
        ) {
            (Some(ta), Some(ca), Some(tb), Some(cb)) => ca.overlaps(&ta.position, cb, &tb.position),
            _ => false,
        }
    }

    fn kind_of<'w>(ctx: &'w SystemContext<'_>, entity: Entity) -> Option<&'w str> {
        ctx.world
            .get_component::<ColliderComponent>(entity)
            .map(|collider| collider.kind.as_str())
    }
}

impl System for CollisionSystem {
    fn name(&self) -> &str {
        "CollisionSystem"
    }

    fn priority(&self) -> i32 {
        Priority::PHYSICS + 10
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _delta_time: f32) -> Result<(), SystemError> {
        let colliders = ctx
            .world
            .entities_with(&[ComponentType::Transform, ComponentType::Collider]);
        let mut blocked = Vec::new();

        for (i, &a) in colliders.iter().enumerate() {
            for &b in &colliders[i + 1..] {
                if !Self::overlapping(ctx, a, b) {
                    continue;
                }
                let (Some(kind_a), Some(kind_b)) = (Self::kind_of(ctx, a), Self::kind_of(ctx, b)) else {
                    continue;
                };
                if kind_a == self.mobile_kind && kind_b == self.solid_kind {
                    blocked.push(a);
                } else if kind_b == self.mobile_kind && kind_a == self.solid_kind {
                    blocked.push(b);
                }
            }
        }

        for entity in blocked {
            if let Some(transform) = ctx.world.get_component_mut::<TransformComponent>(entity) {
                log::trace!("{entity} blocked by a {} collider", self.solid_kind);
                transform.revert_position();
            }
        }
        Ok(())
    }
}
