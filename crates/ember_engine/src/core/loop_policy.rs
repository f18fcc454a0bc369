//! Main loop continuation policies
//!
//! A [`LoopPolicy`] is asked once per frame, before the frame runs, whether
//! the loop should continue. The frame index starts at zero.

use std::fmt;
use std::time::{Duration, Instant};

type Predicate = Box<dyn FnMut(u64) -> bool>;

/// Per-frame continuation predicate for [`Engine::run`](crate::Engine::run)
pub struct LoopPolicy {
    label: String,
    predicate: Predicate,
}

impl fmt::Debug for LoopPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LoopPolicy").field(&self.label).finish()
    }
}

impl LoopPolicy {
    /// Custom policy from a closure over the frame index
    pub fn from_fn(label: impl Into<String>, predicate: impl FnMut(u64) -> bool + 'static) -> Self {
        Self {
            label: label.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Run exactly `max_frames` frames
    pub fn frames(max_frames: u64) -> Self {
        Self::from_fn(format!("frames({max_frames})"), move |frame| frame < max_frames)
    }

    /// Run no frames at all; useful to exercise startup and shutdown only
    pub fn skip() -> Self {
        Self::from_fn("skip", |_| false)
    }

    /// Run until `limit` has elapsed, measured from the first check
    pub fn timed(limit: Duration) -> Self {
        let mut started: Option<Instant> = None;
        Self::from_fn(format!("timed({limit:?})"), move |_| {
            let start = *started.get_or_insert_with(Instant::now);
            start.elapsed() < limit
        })
    }

    /// Never stop on its own; the loop ends when the state stack empties or a
    /// quit is requested
    pub fn forever() -> Self {
        Self::from_fn("forever", |_| true)
    }

    /// Continue while every policy continues. An empty list always continues.
    ///
    /// Every policy is consulted each frame, so stateful policies such as
    /// [`LoopPolicy::timed`] start their clocks together.
    pub fn all(policies: Vec<Self>) -> Self {
        let label = Self::join("all", &policies);
        let mut policies = policies;
        Self::from_fn(label, move |frame| {
            policies
                .iter_mut()
                .fold(true, |keep, policy| policy.continue_running(frame) && keep)
        })
    }

    /// Continue while any policy continues. An empty list never continues.
    pub fn any(policies: Vec<Self>) -> Self {
        let label = Self::join("any", &policies);
        let mut policies = policies;
        Self::from_fn(label, move |frame| {
            policies
                .iter_mut()
                .fold(false, |keep, policy| policy.continue_running(frame) || keep)
        })
    }

    /// Whether frame `frame` should run
    pub fn continue_running(&mut self, frame: u64) -> bool {
        (self.predicate)(frame)
    }

    /// Short description for logs
    pub fn label(&self) -> &str {
        &self.label
    }

    fn join(kind: &str, policies: &[Self]) -> String {
        let inner: Vec<&str> = policies.iter().map(Self::label).collect();
        format!("{kind}({})", inner.join(", "))
    }
}
