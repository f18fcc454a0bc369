//! Movement components
//!
//! [`ControllableComponent`] carries the player's intent for the current frame
//! (written by the input system); [`MovementStatsComponent`] says how fast the
//! entity may act on it.

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec2;

/// Movement tuning values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementStatsComponent {
    /// Units per second
    pub speed: f32,
}

impl MovementStatsComponent {
    /// Create stats with the given speed
    pub const fn new(speed: f32) -> Self {
        Self { speed }
    }
}

/// Player movement intent for the current frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct ControllableComponent {
    /// Which player drives this entity (0 = player one)
    pub player_id: u8,

    /// Move towards +Y
    #[serde(skip)]
    pub wants_to_move_up: bool,

    /// Move towards -Y
    #[serde(skip)]
    pub wants_to_move_down: bool,

    /// Move towards -X
    #[serde(skip)]
    pub wants_to_move_left: bool,

    /// Move towards +X
    #[serde(skip)]
    pub wants_to_move_right: bool,
}

impl ControllableComponent {
    /// Controllable entity for the given player
    pub fn for_player(player_id: u8) -> Self {
        Self {
            player_id,
            ..Default::default()
        }
    }

    /// Unit-length direction from the current intent, zero when idle.
    ///
    /// Diagonals are normalized so they are not faster than straight moves.
    pub fn direction(&self) -> Vec2 {
        let mut direction = Vec2::zeros();
        if self.wants_to_move_up {
            direction.y += 1.0;
        }
        if self.wants_to_move_down {
            direction.y -= 1.0;
        }
        if self.wants_to_move_left {
            direction.x -= 1.0;
        }
        if self.wants_to_move_right {
            direction.x += 1.0;
        }
        if direction.norm_squared() > 0.0 {
            direction.normalize_mut();
        }
        direction
    }

    /// Drop all intent
    pub fn clear_intent(&mut self) {
        self.wants_to_move_up = false;
        self.wants_to_move_down = false;
        self.wants_to_move_left = false;
        self.wants_to_move_right = false;
    }
}
