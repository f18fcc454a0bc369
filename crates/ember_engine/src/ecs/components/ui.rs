//! Screen-space UI components
//!
//! Layout is anchor/pivot based: the element's pivot point is placed on the
//! anchor point of the viewport, then nudged by `offset`. The UI system writes
//! the resulting rectangle into `screen_bounds` every frame.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{white, Vec2, Vec3, Vec4};

fn centered() -> Vec2 {
    Vec2::new(0.5, 0.5)
}

fn default_size() -> Vec2 {
    Vec2::new(100.0, 30.0)
}

fn hovered_tint() -> Vec4 {
    Vec4::new(0.9, 0.9, 0.9, 1.0)
}

fn pressed_tint() -> Vec4 {
    Vec4::new(0.7, 0.7, 0.7, 1.0)
}

/// Layout rectangle of a UI element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiTransformComponent {
    /// Point on the viewport the element attaches to, `(0,0)..=(1,1)`
    #[serde(default = "centered")]
    pub anchor: Vec2,

    /// Point on the element placed at the anchor, `(0,0)..=(1,1)`
    #[serde(default = "centered")]
    pub pivot: Vec2,

    /// Size in pixels, or a fraction of the viewport when `relative_size` is set
    #[serde(default = "default_size")]
    pub size: Vec2,

    /// Pixel offset applied after anchoring; `z` is draw depth
    #[serde(default)]
    pub offset: Vec3,

    /// Interpret `size` as a fraction of the viewport
    #[serde(default)]
    pub relative_size: bool,

    /// Computed `[min_x, min_y, max_x, max_y]`
    #[serde(skip)]
    pub screen_bounds: [f32; 4],
}

impl Default for UiTransformComponent {
    fn default() -> Self {
        Self {
            anchor: centered(),
            pivot: centered(),
            size: default_size(),
            offset: Vec3::zeros(),
            relative_size: false,
            screen_bounds: [0.0; 4],
        }
    }
}

impl UiTransformComponent {
    /// Recompute `screen_bounds` for a viewport of the given size
    pub fn layout(&mut self, viewport: Vec2) {
        let size = if self.relative_size {
            viewport.component_mul(&self.size)
        } else {
            self.size
        };
        let anchor = viewport.component_mul(&self.anchor);
        let pivot = size.component_mul(&self.pivot);

        let min_x = anchor.x - pivot.x + self.offset.x;
        let min_y = anchor.y - pivot.y + self.offset.y;
        self.screen_bounds = [min_x, min_y, min_x + size.x, min_y + size.y];
    }

    /// Whether a point lies inside the last computed bounds (edges inclusive)
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let [min_x, min_y, max_x, max_y] = self.screen_bounds;
        x >= min_x && x <= max_x && y >= min_y && y <= max_y
    }
}

/// Non-interactive image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiImageComponent {
    /// Texture to draw
    pub texture_handle: String,

    /// RGBA tint
    #[serde(default = "white")]
    pub color: Vec4,
}

impl UiImageComponent {
    /// Untinted image
    pub fn new(texture_handle: impl Into<String>) -> Self {
        Self {
            texture_handle: texture_handle.into(),
            color: white(),
        }
    }
}

/// Interaction state of a button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonState {
    /// Idle
    #[default]
    Normal,
    /// Cursor over the button
    Hovered,
    /// Primary button held over the button
    Pressed,
}

/// Clickable button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiButtonComponent {
    /// Action string published in `UiButtonClicked` when clicked
    pub action: String,

    /// Tint while idle
    #[serde(default = "white")]
    pub normal_color: Vec4,

    /// Tint while hovered
    #[serde(default = "hovered_tint")]
    pub hovered_color: Vec4,

    /// Tint while pressed
    #[serde(default = "pressed_tint")]
    pub pressed_color: Vec4,

    /// Managed by the UI system
    #[serde(skip)]
    pub state: ButtonState,
}

impl UiButtonComponent {
    /// Button publishing `action` with default tints
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            normal_color: white(),
            hovered_color: hovered_tint(),
            pressed_color: pressed_tint(),
            state: ButtonState::Normal,
        }
    }

    /// Tint for the current state
    pub const fn current_color(&self) -> &Vec4 {
        match self.state {
            ButtonState::Normal => &self.normal_color,
            ButtonState::Hovered => &self.hovered_color,
            ButtonState::Pressed => &self.pressed_color,
        }
    }
}
