//! Collision component
//!
//! Axis-aligned box relative to the entity's transform. The collider kind is a
//! free-form game-defined label ("player", "wall", ...).

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;

/// Axis-aligned collision box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColliderComponent {
    /// Game-defined collider category
    pub kind: String,
    /// Box width
    pub width: f32,
    /// Box height
    pub height: f32,
    /// Horizontal offset from the transform position
    #[serde(default)]
    pub offset_x: f32,
    /// Vertical offset from the transform position
    #[serde(default)]
    pub offset_y: f32,
}

impl ColliderComponent {
    /// Centered collider
    pub fn new(kind: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            kind: kind.into(),
            width,
            height,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// World-space bounds `[min_x, min_y, max_x, max_y]` at `position`
    pub fn bounds_at(&self, position: &Vec3) -> [f32; 4] {
        let min_x = position.x + self.offset_x - self.width * 0.5;
        let min_y = position.y + self.offset_y - self.height * 0.5;
        [min_x, min_y, min_x + self.width, min_y + self.height]
    }

    /// Whether two colliders at the given positions overlap
    pub fn overlaps(&self, position: &Vec3, other: &Self, other_position: &Vec3) -> bool {
        let a = self.bounds_at(position);
        let b = other.bounds_at(other_position);
        a[0] < b[2] && a[2] > b[0] && a[1] < b[3] && a[3] > b[1]
    }
}
