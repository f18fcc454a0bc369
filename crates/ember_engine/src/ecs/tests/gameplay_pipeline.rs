//! Integration tests for a scene-loaded level run through the gameplay systems
//!
//! Input → movement → collision, the way a level runs frame by frame.

use crate::ecs::components::{ControllableComponent, TransformComponent};
use crate::ecs::systems::{CollisionSystem, MovementSystem, PlayerInputSystem};
use crate::ecs::{ComponentType, Entity, Priority, System, SystemContext, SystemError};
use crate::engine::EngineServices;
use crate::foundation::time::FixedTimer;
use crate::input::{self, GameAction, InputFrame, ScriptedInput};
use crate::scene::SceneFormat;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    const CORRIDOR: &str = r#"{
        "name": "corridor",
        "entities": [
            {
                "name": "Player",
                "components": {
                    "TransformComponent": { "position": [0.0, 0.0, 0.0] },
                    "ControllableComponent": { "player_id": 0 },
                    "MovementStatsComponent": { "speed": 2.0 },
                    "ColliderComponent": { "kind": "player", "width": 1.0, "height": 1.0 },
                    "PlayerComponent": {}
                }
            },
            {
                "name": "Wall",
                "components": {
                    "TransformComponent": { "position": [2.0, 0.0, 0.0] },
                    "ColliderComponent": { "kind": "wall", "width": 1.0, "height": 1.0 }
                }
            }
        ]
    }"#;

    fn corridor(frames: usize, action: GameAction) -> (EngineServices, Entity) {
        let mut script = ScriptedInput::new();
        for _ in 0..frames {
            script.push_frame(InputFrame::new().with_action(0, action));
        }
        let mut services = EngineServices::new(Box::new(FixedTimer::new(0.2)), input::shared(script));

        let report = services
            .scenes
            .load_str(CORRIDOR, SceneFormat::Json, &mut services.world)
            .expect("corridor parses");
        assert!(report.is_complete());

        services.systems.register(Box::new(CollisionSystem::new("player", "wall")));
        services.systems.register(Box::new(MovementSystem::new()));
        services.systems.register(Box::new(PlayerInputSystem::new(services.input_handle())));

        let player = report.entity("Player").expect("player spawned");
        (services, player)
    }

    fn step(services: &mut EngineServices) {
        services.time.update();
        services.input.borrow_mut().update();
        let delta_time = services.time.delta_time();
        services.run_systems(delta_time).expect("systems run");
    }

    fn player_x(services: &EngineServices, player: Entity) -> f32 {
        services
            .world
            .get_component::<TransformComponent>(player)
            .map_or(f32::NAN, |t| t.position.x)
    }

    #[test]
    fn test_systems_run_in_priority_order() {
        let (mut services, _) = corridor(0, GameAction::MoveRight);
        assert_eq!(
            services.systems.system_names(),
            vec!["PlayerInputSystem", "MovementSystem", "CollisionSystem"]
        );
    }

    #[test]
    fn test_player_walks_until_wall() {
        let (mut services, player) = corridor(5, GameAction::MoveRight);

        step(&mut services);
        assert_relative_eq!(player_x(&services, player), 0.4, epsilon = 1e-5);
        step(&mut services);
        assert_relative_eq!(player_x(&services, player), 0.8, epsilon = 1e-5);

        // The third step would overlap the wall and is undone
        for _ in 0..3 {
            step(&mut services);
            assert_relative_eq!(player_x(&services, player), 0.8, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_idle_input_stops_player() {
        let (mut services, player) = corridor(1, GameAction::MoveUp);

        step(&mut services);
        let after_move = services
            .world
            .get_component::<TransformComponent>(player)
            .map(|t| t.position)
            .expect("player has a transform");
        assert_relative_eq!(after_move.y, 0.4, epsilon = 1e-5);

        step(&mut services);
        let intent = services
            .world
            .get_component::<ControllableComponent>(player)
            .copied()
            .expect("player is controllable");
        assert!(!intent.wants_to_move_up);
        assert_eq!(
            services.world.get_component::<TransformComponent>(player).map(|t| t.position),
            Some(after_move)
        );
    }

    #[test]
    fn test_destroyed_entities_leave_every_query() {
        let (mut services, player) = corridor(2, GameAction::MoveRight);
        step(&mut services);

        assert!(services.world.destroy_entity(player));
        assert!(services
            .world
            .entities_with(&[ComponentType::Transform])
            .iter()
            .all(|&e| e != player));
        assert!(!services.world.has_component_of(player, ComponentType::Player));

        // Systems keep running without the player
        step(&mut services);
        assert_eq!(services.world.entity_count(), 1);
    }

    /// Destroys every placed entity, removing the last one early while the
    /// first is still being visited
    struct Sweeper {
        visited: Rc<RefCell<Vec<Entity>>>,
    }

    impl System for Sweeper {
        fn name(&self) -> &str {
            "Sweeper"
        }

        fn priority(&self) -> i32 {
            Priority::LOGIC
        }

        fn update(&mut self, ctx: &mut SystemContext<'_>, _delta_time: f32) -> Result<(), SystemError> {
            let placed = ctx.world.entities_with(&[ComponentType::Transform]);
            let last = placed.last().copied();
            for entity in placed {
                if !ctx.world.is_alive(entity) {
                    continue;
                }
                self.visited.borrow_mut().push(entity);
                if let Some(last) = last {
                    ctx.world.destroy_entity(last);
                }
                ctx.world.destroy_entity(entity);
            }
            Ok(())
        }
    }

    #[test]
    fn test_system_destroys_entities_from_its_own_query() {
        let (mut services, player) = corridor(3, GameAction::MoveRight);
        let visited = Rc::new(RefCell::new(Vec::new()));
        services.systems.register(Box::new(Sweeper {
            visited: Rc::clone(&visited),
        }));

        // Collision runs after the sweep in the same pass
        step(&mut services);

        assert_eq!(*visited.borrow(), vec![player]);
        assert_eq!(services.world.entity_count(), 0);
        assert!(services.world.entities_with(&[ComponentType::Transform]).is_empty());
        assert_eq!(services.world.component_count(ComponentType::Collider), 0);
        assert!(!services.world.has_component_of(player, ComponentType::Transform));

        step(&mut services);
        assert_eq!(*visited.borrow(), vec![player]);
    }
}
