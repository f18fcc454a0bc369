//! Stack-based game state machine
//!
//! Only the top state receives `on_update`. States below it are suspended:
//! they are neither updated nor exited until they become the top again or the
//! stack is cleared.
//!
//! States usually do not switch the stack directly. They queue a
//! [`StateTransition`] on the shared [`TransitionQueue`] (often from an event
//! listener) and the engine applies the queue between frames.

mod transition;

pub use transition::{StateTransition, TransitionQueue};

use thiserror::Error;

use crate::ecs::{EcsError, SystemError};
use crate::engine::EngineServices;
use crate::scene::SceneError;

/// Errors raised by state lifecycle hooks
#[derive(Debug, Error)]
pub enum StateError {
    /// Loading the state's scene failed
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    /// A system failed while the state ran it
    #[error("system error: {0}")]
    System(#[from] SystemError),

    /// A World operation was rejected
    #[error("ECS error: {0}")]
    Ecs(#[from] EcsError),

    /// Game-defined failure
    #[error("{0}")]
    Custom(String),
}

/// One mode of the game (menu, gameplay, pause, ...)
///
/// Typical states register their systems and listeners in `on_enter` and tear
/// them down in `on_exit`.
pub trait GameState {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Called when the state is pushed onto the stack
    ///
    /// # Errors
    /// A failing `on_enter` leaves the state off the stack.
    fn on_enter(&mut self, _services: &mut EngineServices) -> Result<(), StateError> {
        Ok(())
    }

    /// Called once per frame while this state is on top
    ///
    /// # Errors
    /// Errors are propagated out of the frame.
    fn on_update(&mut self, _services: &mut EngineServices, _delta_time: f32) -> Result<(), StateError> {
        Ok(())
    }

    /// Called after the state has been removed from the stack
    ///
    /// # Errors
    /// Errors are propagated; the state is already off the stack.
    fn on_exit(&mut self, _services: &mut EngineServices) -> Result<(), StateError> {
        Ok(())
    }
}

impl<T: GameState + ?Sized> GameState for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_enter(&mut self, services: &mut EngineServices) -> Result<(), StateError> {
        (**self).on_enter(services)
    }

    fn on_update(&mut self, services: &mut EngineServices, delta_time: f32) -> Result<(), StateError> {
        (**self).on_update(services, delta_time)
    }

    fn on_exit(&mut self, services: &mut EngineServices) -> Result<(), StateError> {
        (**self).on_exit(services)
    }
}

/// Stack of game states
///
/// `S` is either a game-defined enum of states or `Box<dyn GameState>`.
pub struct GameStateManager<S: GameState> {
    stack: Vec<S>,
    transitions: TransitionQueue<S>,
}

impl<S: GameState> Default for GameStateManager<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GameState> GameStateManager<S> {
    /// Create an empty manager with its own transition queue
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            transitions: TransitionQueue::new(),
        }
    }

    /// Handle for queueing transitions from states and event listeners
    pub fn transitions(&self) -> TransitionQueue<S> {
        self.transitions.clone()
    }

    /// Enter `state` and make it the top of the stack
    ///
    /// # Errors
    /// Propagates `on_enter` failures; the state is then dropped.
    pub fn push_state(&mut self, mut state: S, services: &mut EngineServices) -> Result<(), StateError> {
        log::info!("Entering state '{}'", state.name());
        state.on_enter(services)?;
        self.stack.push(state);
        Ok(())
    }

    /// Remove the top state and exit it. Does nothing on an empty stack.
    ///
    /// # Errors
    /// Propagates `on_exit` failures.
    pub fn pop_state(&mut self, services: &mut EngineServices) -> Result<Option<S>, StateError> {
        let Some(mut state) = self.stack.pop() else {
            return Ok(None);
        };
        log::info!("Exiting state '{}'", state.name());
        state.on_exit(services)?;
        Ok(Some(state))
    }

    /// Exit the current top (if any), then enter `state`
    ///
    /// # Errors
    /// Propagates `on_exit` or `on_enter` failures.
    pub fn change_state(&mut self, state: S, services: &mut EngineServices) -> Result<(), StateError> {
        self.pop_state(services)?;
        self.push_state(state, services)
    }

    /// Pop and exit every state, top first
    ///
    /// # Errors
    /// Stops at the first `on_exit` failure.
    pub fn clear(&mut self, services: &mut EngineServices) -> Result<(), StateError> {
        while self.pop_state(services)?.is_some() {}
        Ok(())
    }

    /// Update the top state only
    ///
    /// # Errors
    /// Propagates `on_update` failures.
    pub fn update(&mut self, services: &mut EngineServices, delta_time: f32) -> Result<(), StateError> {
        match self.stack.last_mut() {
            Some(state) => state.on_update(services, delta_time),
            None => Ok(()),
        }
    }

    /// Apply queued transitions in the order they were requested.
    ///
    /// Transitions requested while applying (for example from an `on_enter`)
    /// are applied in the same call.
    ///
    /// # Errors
    /// Stops at the first failing transition; later requests stay queued.
    pub fn apply_pending(&mut self, services: &mut EngineServices) -> Result<usize, StateError> {
        let mut applied = 0;
        while let Some(transition) = self.transitions.take_next() {
            log::debug!("Applying transition {transition:?}");
            match transition {
                StateTransition::Push(state) => self.push_state(state, services)?,
                StateTransition::Pop => {
                    self.pop_state(services)?;
                }
                StateTransition::Change(state) => self.change_state(state, services)?,
                StateTransition::Clear => self.clear(services)?,
            }
            applied += 1;
        }
        Ok(applied)
    }

    /// The top state
    pub fn active(&self) -> Option<&S> {
        self.stack.last()
    }

    /// Mutable top of the stack
    pub fn active_mut(&mut self) -> Option<&mut S> {
        self.stack.last_mut()
    }

    /// Number of stacked states
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Whether the stack is empty
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Journal = Rc<RefCell<Vec<String>>>;

    struct Recorded {
        name: &'static str,
        journal: Journal,
        fail_enter: bool,
    }

    impl Recorded {
        fn boxed(name: &'static str, journal: &Journal) -> Box<dyn GameState> {
            Box::new(Self {
                name,
                journal: Rc::clone(journal),
                fail_enter: false,
            })
        }

        fn note(&self, hook: &str) {
            self.journal.borrow_mut().push(format!("{}.{hook}", self.name));
        }
    }

    impl GameState for Recorded {
        fn name(&self) -> &str {
            self.name
        }

        fn on_enter(&mut self, _services: &mut EngineServices) -> Result<(), StateError> {
            self.note("enter");
            if self.fail_enter {
                return Err(StateError::Custom("refused".to_string()));
            }
            Ok(())
        }

        fn on_update(&mut self, _services: &mut EngineServices, _delta_time: f32) -> Result<(), StateError> {
            self.note("update");
            Ok(())
        }

        fn on_exit(&mut self, _services: &mut EngineServices) -> Result<(), StateError> {
            self.note("exit");
            Ok(())
        }
    }

    fn drain(journal: &Journal) -> Vec<String> {
        journal.borrow_mut().drain(..).collect()
    }

    #[test]
    fn test_only_top_state_updates() {
        let journal = Journal::default();
        let mut services = EngineServices::headless();
        let mut states: GameStateManager<Box<dyn GameState>> = GameStateManager::new();

        states.push_state(Recorded::boxed("s1", &journal), &mut services).expect("enter");
        states.push_state(Recorded::boxed("s2", &journal), &mut services).expect("enter");
        states.update(&mut services, 0.1).expect("update");
        assert_eq!(drain(&journal), vec!["s1.enter", "s2.enter", "s2.update"]);

        let popped = states.pop_state(&mut services).expect("exit");
        assert_eq!(popped.as_ref().map(|s| s.name()), Some("s2"));
        states.update(&mut services, 0.1).expect("update");
        assert_eq!(drain(&journal), vec!["s2.exit", "s1.update"]);
    }

    #[test]
    fn test_change_state_exits_before_enter() {
        let journal = Journal::default();
        let mut services = EngineServices::headless();
        let mut states: GameStateManager<Box<dyn GameState>> = GameStateManager::new();

        states.push_state(Recorded::boxed("s1", &journal), &mut services).expect("enter");
        states.change_state(Recorded::boxed("s2", &journal), &mut services).expect("change");

        assert_eq!(drain(&journal), vec!["s1.enter", "s1.exit", "s2.enter"]);
        assert_eq!(states.len(), 1);
        assert_eq!(states.active().map(|s| s.name()), Some("s2"));
    }

    #[test]
    fn test_empty_stack_is_inert() {
        let mut services = EngineServices::headless();
        let mut states: GameStateManager<Box<dyn GameState>> = GameStateManager::new();

        assert!(states.is_empty());
        states.update(&mut services, 0.1).expect("no-op");
        assert!(states.pop_state(&mut services).expect("no-op").is_none());
    }

    #[test]
    fn test_failed_enter_leaves_state_off_stack() {
        let journal = Journal::default();
        let mut services = EngineServices::headless();
        let mut states: GameStateManager<Box<dyn GameState>> = GameStateManager::new();

        let stubborn = Box::new(Recorded {
            name: "stubborn",
            journal: Rc::clone(&journal),
            fail_enter: true,
        });
        assert!(states.push_state(stubborn, &mut services).is_err());
        assert!(states.is_empty());
    }

    #[test]
    fn test_apply_pending_in_request_order() {
        let journal = Journal::default();
        let mut services = EngineServices::headless();
        let mut states: GameStateManager<Box<dyn GameState>> = GameStateManager::new();
        let queue = states.transitions();

        queue.push(Recorded::boxed("menu", &journal));
        queue.push(Recorded::boxed("pause", &journal));
        queue.pop();
        queue.change(Recorded::boxed("play", &journal));
        assert_eq!(queue.len(), 4);

        assert_eq!(states.apply_pending(&mut services).expect("apply"), 4);
        assert!(queue.is_empty());
        assert_eq!(
            drain(&journal),
            vec!["menu.enter", "pause.enter", "pause.exit", "menu.exit", "play.enter"]
        );

        queue.clear_stack();
        states.apply_pending(&mut services).expect("apply");
        assert!(states.is_empty());
        assert_eq!(drain(&journal), vec!["play.exit"]);
    }
}
