//! Deferred state transitions

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// A requested change to the state stack
pub enum StateTransition<S> {
    /// Enter a state on top of the current one
    Push(S),
    /// Exit the top state
    Pop,
    /// Exit the top state, then enter a new one
    Change(S),
    /// Exit every state
    Clear,
}

impl<S> fmt::Debug for StateTransition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Push(_) => "Push",
            Self::Pop => "Pop",
            Self::Change(_) => "Change",
            Self::Clear => "Clear",
        })
    }
}

/// FIFO of pending transitions
///
/// Cloning yields another handle to the same queue, so listeners and states
/// can request transitions without access to the manager.
pub struct TransitionQueue<S> {
    pending: Rc<RefCell<VecDeque<StateTransition<S>>>>,
}

impl<S> Clone for TransitionQueue<S> {
    fn clone(&self) -> Self {
        Self {
            pending: Rc::clone(&self.pending),
        }
    }
}

impl<S> Default for TransitionQueue<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for TransitionQueue<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionQueue")
            .field("pending", &self.len())
            .finish()
    }
}

impl<S> TransitionQueue<S> {
    /// Queue with no pending transitions
    pub fn new() -> Self {
        Self {
            pending: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Queue an arbitrary transition
    pub fn request(&self, transition: StateTransition<S>) {
        self.pending.borrow_mut().push_back(transition);
    }

    /// Queue a push of `state`
    pub fn push(&self, state: S) {
        self.request(StateTransition::Push(state));
    }

    /// Queue a pop of the active state
    pub fn pop(&self) {
        self.request(StateTransition::Pop);
    }

    /// Queue a replacement of the active state
    pub fn change(&self, state: S) {
        self.request(StateTransition::Change(state));
    }

    /// Queue exiting every state; the engine stops once the stack is empty
    pub fn clear_stack(&self) {
        self.request(StateTransition::Clear);
    }

    /// Take the oldest pending transition
    pub(crate) fn take_next(&self) -> Option<StateTransition<S>> {
        self.pending.borrow_mut().pop_front()
    }

    /// Number of pending transitions
    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }
}
