//! Transform component for the ECS system
//!
//! Pure data: where an entity is, how it is oriented and how large it is.
//! The previous position is runtime-only and lets collision response undo a
//! frame's movement.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{model_matrix, Mat4, Vec3};

/// ECS Transform component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformComponent {
    /// World space position
    pub position: Vec3,

    /// Euler rotation in radians (roll, pitch, yaw)
    pub rotation: Vec3,

    /// Scale factors
    pub scale: Vec3,

    /// Position at the start of the current frame
    #[serde(skip)]
    pub previous_position: Vec3,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            previous_position: Vec3::zeros(),
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            previous_position: position,
            ..Default::default()
        }
    }

    /// Snapshot the current position; call before moving the entity this frame
    pub fn update_previous_position(&mut self) {
        self.previous_position = self.position;
    }

    /// Undo this frame's movement
    pub fn revert_position(&mut self) {
        self.position = self.previous_position;
    }

    /// Model-to-world matrix
    pub fn matrix(&self) -> Mat4 {
        model_matrix(&self.position, &self.rotation, &self.scale)
    }
}
