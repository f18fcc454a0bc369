//! Input boundary
//!
//! The engine never polls devices itself. Platform layers implement
//! [`InputService`]; systems read it through a [`SharedInput`] handle.
//! [`ScriptedInput`] replays a prepared sequence of frames for tests and
//! headless runs.

mod scripted;

pub use scripted::{InputFrame, ScriptedInput};

use std::cell::RefCell;
use std::rc::Rc;

/// Logical actions games bind devices to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move towards +y
    MoveUp,
    /// Move towards -y
    MoveDown,
    /// Move towards -x
    MoveLeft,
    /// Move towards +x
    MoveRight,
    /// Accept the focused choice
    Confirm,
    /// Back out of the current screen
    Cancel,
}

/// Pointer position in screen pixels and primary button state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Horizontal position
    pub x: f32,
    /// Vertical position, growing upwards
    pub y: f32,
    /// Primary button currently held
    pub primary_down: bool,
}

impl PointerState {
    /// Pointer at `(x, y)`
    pub const fn new(x: f32, y: f32, primary_down: bool) -> Self {
        Self { x, y, primary_down }
    }
}

/// Source of per-frame input state
pub trait InputService {
    /// Advance to the next frame's input; called once per frame by the engine
    fn update(&mut self) {}

    /// Whether `action` is held by the given player this frame
    fn is_action_active(&self, player_id: u8, action: GameAction) -> bool;

    /// Pointer state this frame
    fn pointer(&self) -> PointerState {
        PointerState::default()
    }
}

/// Input service shared between the engine and the systems that read it
pub type SharedInput = Rc<RefCell<dyn InputService>>;

/// Wrap an input service into a [`SharedInput`] handle
pub fn shared<I: InputService + 'static>(input: I) -> SharedInput {
    Rc::new(RefCell::new(input))
}
