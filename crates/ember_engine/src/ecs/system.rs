//! System trait and execution context

use thiserror::Error;

use crate::ecs::World;
use crate::events::EventBus;

/// Well-known system priorities. Lower values run first.
pub struct Priority;

impl Priority {
    /// Input polling and intent mapping
    pub const INPUT: i32 = 100;
    /// Gameplay logic
    pub const LOGIC: i32 = 200;
    /// Movement and collision
    pub const PHYSICS: i32 = 300;
    /// UI layout and interaction
    pub const UI_LOGIC: i32 = 900;
    /// World rendering
    pub const RENDER: i32 = 1000;
    /// UI rendering on top of the world
    pub const UI_RENDER: i32 = 1100;
}

/// Error raised by a system update; aborts the current frame's pass
#[derive(Debug, Error)]
pub enum SystemError {
    /// The named system could not complete its update
    #[error("system '{system}' failed: {reason}")]
    Failed {
        /// Name of the failing system
        system: String,
        /// What went wrong
        reason: String,
    },
}

impl SystemError {
    /// Shorthand for [`SystemError::Failed`]
    pub fn failed(system: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Failed {
            system: system.into(),
            reason: reason.into(),
        }
    }
}

/// Borrowed engine state handed to every system for one update
pub struct SystemContext<'a> {
    /// Entities and components
    pub world: &'a mut World,
    /// Bus for events raised during the update
    pub events: &'a mut EventBus,
    /// Seconds since the engine started
    pub total_time: f64,
}

/// Unit of per-frame behaviour
///
/// Systems must not keep entity handles across frames; query the World again
/// on every update.
pub trait System {
    /// Name used in logs and errors
    fn name(&self) -> &str;

    /// Execution priority, see [`Priority`]
    fn priority(&self) -> i32 {
        Priority::LOGIC
    }

    /// Run one frame of this system
    ///
    /// # Errors
    /// Any error stops the remaining systems of this frame.
    fn update(&mut self, ctx: &mut SystemContext<'_>, delta_time: f32) -> Result<(), SystemError>;
}
