//! Events published by engine systems

use super::Event;
use crate::ecs::Entity;

/// A UI button was released while hovered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiButtonClicked {
    /// The button's configured action string
    pub action: String,
    /// Entity carrying the button
    pub entity: Entity,
}

impl Event for UiButtonClicked {}

/// Request to move to a named game state.
///
/// The engine does not interpret `target`; games map it to a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChangeRequested {
    /// Name of the requested state
    pub target: String,
}

impl StateChangeRequested {
    /// Request a change to `target`
    pub fn new(target: impl Into<String>) -> Self {
        Self { target: target.into() }
    }
}

impl Event for StateChangeRequested {}
