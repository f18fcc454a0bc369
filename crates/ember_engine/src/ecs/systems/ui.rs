//! UI layout and button interaction
//!
//! Layout runs for every [`UiTransformComponent`], then buttons are hit-tested
//! against the pointer. Pointer coordinates share the layout's space: pixels
//! with the origin at the viewport's lower-left corner.

use crate::ecs::component::ComponentType;
use crate::ecs::components::{ButtonState, UiButtonComponent, UiTransformComponent};
use crate::ecs::system::{Priority, System, SystemContext, SystemError};
use crate::events::UiButtonClicked;
use crate::foundation::math::Vec2;
use crate::input::SharedInput;

/// Lays out UI elements and turns pointer releases into [`UiButtonClicked`]
pub struct UiSystem {
    input: SharedInput,
    viewport: Vec2,
}

impl UiSystem {
    /// UI system laying out against a viewport of the given pixel size
    pub fn new(input: SharedInput, viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            input,
            viewport: Vec2::new(viewport_width, viewport_height),
        }
    }

    /// Update the viewport after a resize
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }
}

impl System for UiSystem {
    fn name(&self) -> &str {
        "UiSystem"
    }

    fn priority(&self) -> i32 {
        Priority::UI_LOGIC
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _delta_time: f32) -> Result<(), SystemError> {
        for entity in ctx.world.entities_with(&[ComponentType::UiTransform]) {
            if let Some(transform) = ctx.world.get_component_mut::<UiTransformComponent>(entity) {
                transform.layout(self.viewport);
            }
        }

        let pointer = self
            .input
            .try_borrow()
            .map_err(|_| SystemError::failed("UiSystem", "input service is borrowed elsewhere"))?
            .pointer();

        let mut clicked = Vec::new();
        for entity in ctx
            .world
            .entities_with(&[ComponentType::UiTransform, ComponentType::UiButton])
        {
            let hovered = ctx
                .world
                .get_component::<UiTransformComponent>(entity)
                .is_some_and(|transform| transform.contains(pointer.x, pointer.y));
            let Some(button) = ctx.world.get_component_mut::<UiButtonComponent>(entity) else {
                continue;
            };

            button.state = match (hovered, pointer.primary_down) {
                (false, _) => ButtonState::Normal,
                (true, true) => ButtonState::Pressed,
                (true, false) => {
                    if button.state == ButtonState::Pressed {
                        clicked.push(UiButtonClicked {
                            action: button.action.clone(),
                            entity,
                        });
                    }
                    ButtonState::Hovered
                }
            };
        }

        for event in clicked {
            log::debug!("Button {} clicked: {}", event.entity, event.action);
            ctx.events.publish(&event);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::World;
    use crate::events::EventBus;
    use crate::input::{shared, InputFrame, ScriptedInput};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_hover_press_release_click() {
        let input = shared(
            ScriptedInput::new()
                .then(InputFrame::new().with_pointer(400.0, 300.0, false))
                .then(InputFrame::new().with_pointer(400.0, 300.0, true))
                .then(InputFrame::new().with_pointer(400.0, 300.0, false))
                .then(InputFrame::new().with_pointer(0.0, 0.0, false)),
        );

        let mut world = World::new();
        let button = world.create_entity();
        world.add_component(button, UiTransformComponent::default()).expect("alive");
        world.add_component(button, UiButtonComponent::new("TEST_ACTION")).expect("alive");

        let mut events = EventBus::new();
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&clicks);
        events.subscribe(move |event: &UiButtonClicked| {
            sink.borrow_mut().push(event.action.clone());
            Ok(())
        });

        let mut system = UiSystem::new(Rc::clone(&input), 800.0, 600.0);
        let mut states = Vec::new();
        for _ in 0..4 {
            input.borrow_mut().update();
            let mut ctx = SystemContext {
                world: &mut world,
                events: &mut events,
                total_time: 0.0,
            };
            system.update(&mut ctx, 0.016).expect("update");
            states.push(world.get_component::<UiButtonComponent>(button).map(|b| b.state));
        }

        assert_eq!(
            states,
            vec![
                Some(ButtonState::Hovered),
                Some(ButtonState::Pressed),
                Some(ButtonState::Hovered),
                Some(ButtonState::Normal),
            ]
        );
        assert_eq!(*clicks.borrow(), vec!["TEST_ACTION".to_string()]);
    }

    #[test]
    fn test_release_outside_does_not_click() {
        let input = shared(
            ScriptedInput::new()
                .then(InputFrame::new().with_pointer(400.0, 300.0, true))
                .then(InputFrame::new().with_pointer(10.0, 10.0, false)),
        );

        let mut world = World::new();
        let button = world.create_entity();
        world.add_component(button, UiTransformComponent::default()).expect("alive");
        world.add_component(button, UiButtonComponent::new("NOPE")).expect("alive");

        let mut events = EventBus::new();
        let heard = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&heard);
        events.subscribe(move |_: &UiButtonClicked| {
            *counter.borrow_mut() += 1;
            Ok(())
        });

        let mut system = UiSystem::new(Rc::clone(&input), 800.0, 600.0);
        for _ in 0..2 {
            input.borrow_mut().update();
            let mut ctx = SystemContext {
                world: &mut world,
                events: &mut events,
                total_time: 0.0,
            };
            system.update(&mut ctx, 0.016).expect("update");
        }
        assert_eq!(*heard.borrow(), 0);
        assert_eq!(
            world.get_component::<UiButtonComponent>(button).map(|b| b.state),
            Some(ButtonState::Normal)
        );
    }
}
