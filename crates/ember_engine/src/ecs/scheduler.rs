//! Priority-ordered system scheduling
//!
//! Systems run one after another on the calling thread in ascending priority.
//! Equal priorities keep registration order. Sorting is deferred until the next
//! update so registering many systems in a row stays cheap.

use super::system::{System, SystemContext, SystemError};

/// Ordered list of systems run once per frame
#[derive(Default)]
pub struct Scheduler {
    systems: Vec<Box<dyn System>>,
    sorted: bool,
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("systems", &self.systems.iter().map(|s| s.name()).collect::<Vec<_>>())
            .field("sorted", &self.sorted)
            .finish()
    }
}

impl Scheduler {
    /// Scheduler with no systems
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a system; it runs from the next update on
    pub fn register(&mut self, system: Box<dyn System>) {
        log::debug!("Registered system '{}' (priority {})", system.name(), system.priority());
        self.systems.push(system);
        self.sorted = false;
    }

    /// Run every system once.
    ///
    /// # Errors
    /// The first failing system aborts the pass; systems after it do not run.
    pub fn update_all(&mut self, ctx: &mut SystemContext<'_>, delta_time: f32) -> Result<(), SystemError> {
        self.sort();
        for system in &mut self.systems {
            if let Err(err) = system.update(ctx, delta_time) {
                log::error!("System '{}' aborted the frame: {err}", system.name());
                return Err(err);
            }
        }
        Ok(())
    }

    /// Remove every system
    pub fn clear(&mut self) {
        if !self.systems.is_empty() {
            log::debug!("Clearing {} systems", self.systems.len());
        }
        self.systems.clear();
        self.sorted = true;
    }

    /// Number of registered systems
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Whether no systems are registered
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// System names in execution order
    pub fn system_names(&mut self) -> Vec<String> {
        self.sort();
        self.systems.iter().map(|s| s.name().to_string()).collect()
    }

    fn sort(&mut self) {
        if !self.sorted {
            // `sort_by_key` is stable, so ties keep registration order
            self.systems.sort_by_key(|s| s.priority());
            self.sorted = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::World;
    use crate::events::EventBus;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Tracer {
        name: String,
        priority: i32,
        fail: bool,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Tracer {
        fn boxed(name: &str, priority: i32, log: &Rc<RefCell<Vec<String>>>) -> Box<dyn System> {
            Box::new(Self {
                name: name.to_string(),
                priority,
                fail: false,
                log: Rc::clone(log),
            })
        }
    }

    impl System for Tracer {
        fn name(&self) -> &str {
            &self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn update(&mut self, _ctx: &mut SystemContext<'_>, _delta_time: f32) -> Result<(), SystemError> {
            self.log.borrow_mut().push(self.name.clone());
            if self.fail {
                return Err(SystemError::failed(&self.name, "scheduled failure"));
            }
            Ok(())
        }
    }

    fn run(scheduler: &mut Scheduler) -> Result<(), SystemError> {
        let mut world = World::new();
        let mut events = EventBus::new();
        let mut ctx = SystemContext {
            world: &mut world,
            events: &mut events,
            total_time: 0.0,
        };
        scheduler.update_all(&mut ctx, 0.016)
    }

    #[test]
    fn test_runs_in_priority_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = Scheduler::new();
        scheduler.register(Tracer::boxed("render", 1000, &log));
        scheduler.register(Tracer::boxed("input", 100, &log));
        scheduler.register(Tracer::boxed("logic", 200, &log));

        run(&mut scheduler).expect("no failures");
        assert_eq!(*log.borrow(), vec!["input", "logic", "render"]);
    }

    #[test]
    fn test_ties_keep_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = Scheduler::new();
        scheduler.register(Tracer::boxed("b", 200, &log));
        scheduler.register(Tracer::boxed("a", 200, &log));
        scheduler.register(Tracer::boxed("first", 100, &log));

        assert_eq!(scheduler.system_names(), vec!["first", "b", "a"]);
    }

    #[test]
    fn test_failure_aborts_pass() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = Scheduler::new();
        scheduler.register(Tracer::boxed("before", 100, &log));
        scheduler.register(Box::new(Tracer {
            name: "broken".to_string(),
            priority: 200,
            fail: true,
            log: Rc::clone(&log),
        }));
        scheduler.register(Tracer::boxed("after", 300, &log));

        let err = run(&mut scheduler).expect_err("broken system fails");
        assert!(matches!(err, SystemError::Failed { ref system, .. } if system == "broken"));
        assert_eq!(*log.borrow(), vec!["before", "broken"]);
    }

    #[test]
    fn test_clear() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = Scheduler::new();
        scheduler.register(Tracer::boxed("only", 100, &log));
        scheduler.clear();

        assert!(scheduler.is_empty());
        run(&mut scheduler).expect("empty pass");
        assert!(log.borrow().is_empty());
    }
}
