//! Engine-provided systems
//!
//! Games register these from their states' `on_enter` alongside their own
//! systems.

pub mod player_input;
pub mod movement;
pub mod collision;
pub mod ui;

pub use player_input::PlayerInputSystem;
pub use movement::MovementSystem;
pub use collision::CollisionSystem;
pub use ui::UiSystem;
