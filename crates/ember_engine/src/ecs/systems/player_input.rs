//! Maps input actions onto controllable entities

use crate::ecs::component::ComponentType;
use crate::ecs::components::ControllableComponent;
use crate::ecs::system::{Priority, System, SystemContext, SystemError};
use crate::input::{GameAction, SharedInput};

/// Copies each player's held movement actions into their
/// [`ControllableComponent`] every frame
pub struct PlayerInputSystem {
    input: SharedInput,
}

impl PlayerInputSystem {
    /// Player input system reading `input`
    pub fn new(input: SharedInput) -> Self {
        Self { input }
    }
}

impl System for PlayerInputSystem {
    fn name(&self) -> &str {
        "PlayerInputSystem"
    }

    fn priority(&self) -> i32 {
        Priority::INPUT
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _delta_time: f32) -> Result<(), SystemError> {
        let input = self
            .input
            .try_borrow()
            .map_err(|_| SystemError::failed(self.name(), "input service is borrowed elsewhere"))?;

        for entity in ctx.world.entities_with(&[ComponentType::Controllable]) {
            let Some(control) = ctx.world.get_component_mut::<ControllableComponent>(entity) else {
                continue;
            };
            let player = control.player_id;
            control.wants_to_move_up = input.is_action_active(player, GameAction::MoveUp);
            control.wants_to_move_down = input.is_action_active(player, GameAction::MoveDown);
            control.wants_to_move_left = input.is_action_active(player, GameAction::MoveLeft);
            control.wants_to_move_right = input.is_action_active(player, GameAction::MoveRight);
        }
        Ok(())
    }
}
