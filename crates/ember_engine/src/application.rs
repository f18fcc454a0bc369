//! Game trait and lifecycle management

use thiserror::Error;

use crate::ecs::ComponentRegistry;
use crate::engine::EngineServices;
use crate::scene::SceneError;
use crate::state::{GameState, StateError, TransitionQueue};

/// Game lifecycle trait
///
/// Implement this trait to run a game on the [`Engine`](crate::Engine).
pub trait Game {
    /// State type kept on the state stack, typically an enum of the game's
    /// states or `Box<dyn GameState>`
    type State: GameState;

    /// Register component name aliases used by the game's scene files.
    ///
    /// Engine components are already registered under their canonical names.
    fn register_components(&mut self, _registry: &mut ComponentRegistry) {}

    /// Called once before the first state is entered
    ///
    /// # Errors
    /// Aborts the run before any state is entered.
    fn init(&mut self, _services: &mut EngineServices) -> Result<(), AppError> {
        Ok(())
    }

    /// The state pushed when the loop starts. `transitions` is the queue the
    /// engine applies between frames; states keep a clone to change the stack.
    ///
    /// # Errors
    /// Aborts the run before any state is entered.
    fn initial_state(
        &mut self,
        services: &mut EngineServices,
        transitions: &TransitionQueue<Self::State>,
    ) -> Result<Self::State, AppError>;

    /// Called once after every state has been exited
    fn shutdown(&mut self, _services: &mut EngineServices) {}
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Scene loading failed
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// A state hook failed during startup
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}
