//! Renderable components
//!
//! Both hold string handles into the asset catalog; the renderer that resolves
//! them lives outside the engine core.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{white, Vec4};

/// Associates an entity with a mesh resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshComponent {
    /// Handle registered in the asset catalog
    pub mesh_handle: String,
}

impl MeshComponent {
    /// Create a mesh component for the given handle
    pub fn new(mesh_handle: impl Into<String>) -> Self {
        Self {
            mesh_handle: mesh_handle.into(),
        }
    }
}

/// Visual appearance of a 2D sprite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteComponent {
    /// Handle of the texture to draw
    pub texture_handle: String,

    /// RGBA tint, white when omitted
    #[serde(default = "white")]
    pub color: Vec4,
}

impl SpriteComponent {
    /// Untinted sprite
    pub fn new(texture_handle: impl Into<String>) -> Self {
        Self {
            texture_handle: texture_handle.into(),
            color: white(),
        }
    }

    /// Tinted sprite
    pub fn with_color(texture_handle: impl Into<String>, color: Vec4) -> Self {
        Self {
            texture_handle: texture_handle.into(),
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sprite_color_defaults_to_white() {
        let sprite: SpriteComponent =
            serde_json::from_value(json!({ "texture_handle": "player" })).expect("valid payload");
        assert_eq!(sprite.color, white());
    }

    #[test]
    fn test_sprite_requires_texture() {
        let result: Result<SpriteComponent, _> = serde_json::from_value(json!({ "color": [1, 0, 0, 1] }));
        assert!(result.is_err());
    }
}
