//! # Ember Engine
//!
//! A small data-driven game engine runtime for real-time games.
//!
//! ## Features
//!
//! - **ECS Architecture**: Entities, a closed set of typed components and prioritized systems
//! - **Game States**: A stack of menu/gameplay/pause states with queued transitions
//! - **Event Bus**: Typed, synchronous publish/subscribe between systems and states
//! - **Declarative Scenes**: JSON or RON scene documents instantiated by component name
//! - **Headless Friendly**: Scripted input and fixed time steps for tests and servers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ember_engine::prelude::*;
//!
//! struct Idle;
//!
//! impl GameState for Idle {
//!     fn name(&self) -> &str {
//!         "idle"
//!     }
//! }
//!
//! struct MyGame;
//!
//! impl Game for MyGame {
//!     type State = Box<dyn GameState>;
//!
//!     fn initial_state(
//!         &mut self,
//!         _services: &mut EngineServices,
//!         _transitions: &TransitionQueue<Self::State>,
//!     ) -> Result<Self::State, AppError> {
//!         Ok(Box::new(Idle))
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default();
//!     let policy = config.loop_policy();
//!     Engine::new(config).run(&mut MyGame, policy)?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod foundation;
pub mod ecs;
pub mod events;
pub mod state;
pub mod scene;
pub mod assets;
pub mod input;
pub mod config;

mod application;
mod engine;

pub use application::{AppError, Game};
pub use config::EngineConfig;
pub use engine::{Engine, EngineError, EngineServices, RunSummary};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        AppError, Engine, EngineConfig, EngineError, EngineServices, Game, RunSummary,
        config::Config,
        core::LoopPolicy,
        ecs::{
            components::*, Component, ComponentRegistry, ComponentType, Entity, Priority, System,
            SystemContext, SystemError, World,
        },
        events::{Event, EventBus, EventError, StateChangeRequested, UiButtonClicked},
        foundation::math::{Vec2, Vec3},
        input::{GameAction, InputFrame, InputService, ScriptedInput, SharedInput},
        scene::{SceneFormat, SceneLoader},
        state::{GameState, GameStateManager, StateError, TransitionQueue},
    };
}
