//! Prerecorded input

use std::collections::{HashSet, VecDeque};

use super::{GameAction, InputService, PointerState};

/// Input state for one frame
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    actions: HashSet<(u8, GameAction)>,
    pointer: PointerState,
}

impl InputFrame {
    /// Frame with no actions and the pointer at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold an action for a player during this frame
    pub fn with_action(mut self, player_id: u8, action: GameAction) -> Self {
        self.actions.insert((player_id, action));
        self
    }

    /// Place the pointer for this frame
    pub fn with_pointer(mut self, x: f32, y: f32, primary_down: bool) -> Self {
        self.pointer = PointerState::new(x, y, primary_down);
        self
    }
}

/// Replays queued frames, one per [`InputService::update`].
///
/// Once the queue runs dry the input goes idle: no actions, pointer released
/// at its last position.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    pending: VecDeque<InputFrame>,
    current: InputFrame,
}

impl ScriptedInput {
    /// Script with no frames
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a frame after the ones already queued
    pub fn push_frame(&mut self, frame: InputFrame) {
        self.pending.push_back(frame);
    }

    /// Builder form of [`ScriptedInput::push_frame`]
    pub fn then(mut self, frame: InputFrame) -> Self {
        self.push_frame(frame);
        self
    }

    /// Queue `count` idle frames
    pub fn wait(mut self, count: usize) -> Self {
        for _ in 0..count {
            let idle = InputFrame::new().with_pointer(self.last_pointer().x, self.last_pointer().y, false);
            self.pending.push_back(idle);
        }
        self
    }

    /// Queue a press-and-release click at a screen position (two frames)
    pub fn click(self, x: f32, y: f32) -> Self {
        self.then(InputFrame::new().with_pointer(x, y, true))
            .then(InputFrame::new().with_pointer(x, y, false))
    }

    /// Frames still queued
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    fn last_pointer(&self) -> PointerState {
        self.pending.back().map_or(self.current.pointer, |frame| frame.pointer)
    }
}

impl InputService for ScriptedInput {
    fn update(&mut self) {
        self.current = match self.pending.pop_front() {
            Some(frame) => frame,
            None => InputFrame::new().with_pointer(self.current.pointer.x, self.current.pointer.y, false),
        };
    }

    fn is_action_active(&self, player_id: u8, action: GameAction) -> bool {
        self.current.actions.contains(&(player_id, action))
    }

    fn pointer(&self) -> PointerState {
        self.current.pointer
    }
}
