//! Core engine implementation

use thiserror::Error;

use crate::application::{AppError, Game};
use crate::config::{ConfigError, EngineConfig};
use crate::core::LoopPolicy;
use crate::ecs::{Scheduler, SystemContext, SystemError, World};
use crate::events::EventBus;
use crate::foundation::time::{FixedTimer, TimeSource, Timer};
use crate::input::{self, ScriptedInput, SharedInput};
use crate::scene::SceneLoader;
use crate::state::{GameStateManager, StateError};

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// The game failed to initialize
    #[error("Initialization failed: {0}")]
    Initialization(#[from] AppError),

    /// A state hook or transition failed
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// A system aborted the frame
    #[error("System error: {0}")]
    System(#[from] SystemError),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Every engine subsystem, passed by reference to states and the game
pub struct EngineServices {
    /// Entities and components
    pub world: World,
    /// Systems run each frame
    pub systems: Scheduler,
    /// Synchronous event channel
    pub events: EventBus,
    /// Scene parsing, component registry and asset catalog
    pub scenes: SceneLoader,
    /// Frame clock
    pub time: Box<dyn TimeSource>,
    /// Input boundary
    pub input: SharedInput,
    quit_requested: bool,
}

impl std::fmt::Debug for EngineServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineServices")
            .field("entities", &self.world.entity_count())
            .field("systems", &self.systems.len())
            .field("events", &self.events)
            .field("frame", &self.time.frame_count())
            .field("quit_requested", &self.quit_requested)
            .finish()
    }
}

impl EngineServices {
    /// Assemble services from explicit parts
    pub fn new(time: Box<dyn TimeSource>, input: SharedInput) -> Self {
        Self {
            world: World::new(),
            systems: Scheduler::new(),
            events: EventBus::new(),
            scenes: SceneLoader::new(),
            time,
            input,
            quit_requested: false,
        }
    }

    /// Services with a 60 Hz fixed clock and idle scripted input
    pub fn headless() -> Self {
        Self::new(Box::new(FixedTimer::new(1.0 / 60.0)), input::shared(ScriptedInput::new()))
    }

    /// Services matching an engine configuration
    pub fn from_config(config: &EngineConfig, input: SharedInput) -> Self {
        let time: Box<dyn TimeSource> = match config.fixed_timestep {
            Some(step) => Box::new(FixedTimer::new(step)),
            None => Box::new(Timer::new()),
        };
        Self::new(time, input)
    }

    /// Handle to the input service, for systems that read it
    pub fn input_handle(&self) -> SharedInput {
        SharedInput::clone(&self.input)
    }

    /// Run one scheduler pass over the World
    ///
    /// # Errors
    /// The first failing system's error.
    pub fn run_systems(&mut self, delta_time: f32) -> Result<(), SystemError> {
        let mut ctx = SystemContext {
            world: &mut self.world,
            events: &mut self.events,
            total_time: self.time.total_time(),
        };
        self.systems.update_all(&mut ctx, delta_time)
    }

    /// Ask the engine to stop after the current frame
    pub fn request_quit(&mut self) {
        log::info!("Quit requested");
        self.quit_requested = true;
    }

    /// Whether [`EngineServices::request_quit`] was called during this run
    pub const fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

/// Totals of one [`Engine::run`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Frames executed
    pub frames: u64,
    /// Simulated seconds at shutdown
    pub total_time: f64,
}

/// Main engine struct
///
/// Owns the [`EngineServices`] and drives the frame loop:
/// time → input → active state → systems → pending state transitions.
pub struct Engine {
    services: EngineServices,
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with idle scripted input
    pub fn new(config: EngineConfig) -> Self {
        Self::with_input(config, input::shared(ScriptedInput::new()))
    }

    /// Create an engine reading the given input service
    pub fn with_input(config: EngineConfig, input: SharedInput) -> Self {
        log::info!("Initializing engine for '{}'", config.app_name);
        Self {
            services: EngineServices::from_config(&config, input),
            config,
        }
    }

    /// Settings the engine was built with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shared engine subsystems
    pub fn services(&self) -> &EngineServices {
        &self.services
    }

    /// Mutable access to the engine subsystems
    pub fn services_mut(&mut self) -> &mut EngineServices {
        &mut self.services
    }

    /// Run `game` until the policy stops, the state stack empties or a quit is
    /// requested. Remaining states are exited and [`Game::shutdown`] runs on
    /// the way out, also after a startup or frame error.
    ///
    /// # Errors
    /// Game initialization, state and system failures. A failing frame stops
    /// the loop.
    pub fn run<G: Game>(&mut self, game: &mut G, mut policy: LoopPolicy) -> Result<RunSummary, EngineError> {
        self.services.quit_requested = false;
        let mut states: GameStateManager<G::State> = GameStateManager::new();
        let mut frames = 0;

        let outcome = match self.start(game, &mut states) {
            Ok(()) => self.main_loop(&mut states, &mut policy, &mut frames),
            Err(err) => {
                log::error!("Startup failed: {err}");
                Err(err)
            }
        };

        let shutdown = states.clear(&mut self.services);
        game.shutdown(&mut self.services);
        outcome?;
        shutdown?;

        let summary = RunSummary {
            frames,
            total_time: self.services.time.total_time(),
        };
        log::info!("Main loop finished after {} frames", summary.frames);
        Ok(summary)
    }

    fn start<G: Game>(&mut self, game: &mut G, states: &mut GameStateManager<G::State>) -> Result<(), EngineError> {
        game.register_components(self.services.scenes.registry_mut());
        game.init(&mut self.services)?;
        let initial = game.initial_state(&mut self.services, &states.transitions())?;
        states.push_state(initial, &mut self.services)?;
        Ok(())
    }

    fn main_loop<S: crate::state::GameState>(
        &mut self,
        states: &mut GameStateManager<S>,
        policy: &mut LoopPolicy,
        frames: &mut u64,
    ) -> Result<(), EngineError> {
        log::info!("Starting main loop ({})", policy.label());
        loop {
            if states.is_empty() {
                log::info!("State stack is empty, stopping");
                return Ok(());
            }
            if self.services.quit_requested() {
                return Ok(());
            }
            if !policy.continue_running(*frames) {
                return Ok(());
            }
            if let Err(err) = self.frame(states) {
                log::error!("Frame {frames} failed: {err}");
                return Err(err);
            }
            *frames += 1;
        }
    }

    fn frame<S: crate::state::GameState>(&mut self, states: &mut GameStateManager<S>) -> Result<(), EngineError> {
        self.services.time.update();
        if let Ok(mut input) = self.services.input.try_borrow_mut() {
            input.update();
        } else {
            log::warn!("Input service busy, reusing last frame's input");
        }

        let delta_time = self.services.time.delta_time();
        states.update(&mut self.services, delta_time)?;
        self.services.run_systems(delta_time)?;
        states.apply_pending(&mut self.services)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{Priority, System};
    use crate::state::{GameState, TransitionQueue};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Journal = Rc<RefCell<Vec<String>>>;

    struct Ticker {
        journal: Journal,
        fail_on: Option<u64>,
        ticks: u64,
    }

    impl System for Ticker {
        fn name(&self) -> &str {
            "Ticker"
        }

        fn priority(&self) -> i32 {
            Priority::LOGIC
        }

        fn update(&mut self, _ctx: &mut SystemContext<'_>, _delta_time: f32) -> Result<(), SystemError> {
            if self.fail_on == Some(self.ticks) {
                return Err(SystemError::failed("Ticker", "scheduled failure"));
            }
            self.ticks += 1;
            self.journal.borrow_mut().push(format!("tick{}", self.ticks));
            Ok(())
        }
    }

    struct Only {
        journal: Journal,
        fail_on: Option<u64>,
        leave_after: Option<u64>,
        quit_after: Option<u64>,
        transitions: TransitionQueue<Box<dyn GameState>>,
        updates: u64,
    }

    impl GameState for Only {
        fn name(&self) -> &str {
            "only"
        }

        fn on_enter(&mut self, services: &mut EngineServices) -> Result<(), StateError> {
            self.journal.borrow_mut().push("enter".to_string());
            services.systems.register(Box::new(Ticker {
                journal: Rc::clone(&self.journal),
                fail_on: self.fail_on,
                ticks: 0,
            }));
            Ok(())
        }

        fn on_update(&mut self, services: &mut EngineServices, _delta_time: f32) -> Result<(), StateError> {
            self.updates += 1;
            if self.leave_after == Some(self.updates) {
                self.transitions.pop();
            }
            if self.quit_after == Some(self.updates) {
                services.request_quit();
            }
            Ok(())
        }

        fn on_exit(&mut self, services: &mut EngineServices) -> Result<(), StateError> {
            self.journal.borrow_mut().push("exit".to_string());
            services.systems.clear();
            Ok(())
        }
    }

    struct TestGame {
        journal: Journal,
        fail_on: Option<u64>,
        leave_after: Option<u64>,
        quit_after: Option<u64>,
        fail_init: bool,
        shut_down: bool,
    }

    impl TestGame {
        fn new() -> Self {
            Self {
                journal: Journal::default(),
                fail_on: None,
                leave_after: None,
                quit_after: None,
                fail_init: false,
                shut_down: false,
            }
        }
    }

    impl Game for TestGame {
        type State = Box<dyn GameState>;

        fn init(&mut self, _services: &mut EngineServices) -> Result<(), AppError> {
            if self.fail_init {
                return Err(AppError::Custom("no save data".to_string()));
            }
            Ok(())
        }

        fn initial_state(
            &mut self,
            _services: &mut EngineServices,
            transitions: &TransitionQueue<Self::State>,
        ) -> Result<Self::State, AppError> {
            Ok(Box::new(Only {
                journal: Rc::clone(&self.journal),
                fail_on: self.fail_on,
                leave_after: self.leave_after,
                quit_after: self.quit_after,
                transitions: transitions.clone(),
                updates: 0,
            }))
        }

        fn shutdown(&mut self, _services: &mut EngineServices) {
            self.shut_down = true;
        }
    }

    fn fixed_engine() -> Engine {
        Engine::new(EngineConfig {
            fixed_timestep: Some(0.5),
            ..EngineConfig::default()
        })
    }

    #[test]
    fn test_runs_exactly_the_policy_frames() {
        let mut game = TestGame::new();
        let summary = fixed_engine().run(&mut game, LoopPolicy::frames(3)).expect("run");

        assert_eq!(summary.frames, 3);
        assert!((summary.total_time - 1.5).abs() < 1e-9);
        assert_eq!(*game.journal.borrow(), vec!["enter", "tick1", "tick2", "tick3", "exit"]);
        assert!(game.shut_down);
    }

    #[test]
    fn test_skip_policy_only_enters_and_exits() {
        let mut game = TestGame::new();
        let summary = fixed_engine().run(&mut game, LoopPolicy::skip()).expect("run");
        assert_eq!(summary.frames, 0);
        assert_eq!(*game.journal.borrow(), vec!["enter", "exit"]);
    }

    #[test]
    fn test_empty_stack_stops_loop() {
        let mut game = TestGame::new();
        game.leave_after = Some(2);
        let summary = fixed_engine().run(&mut game, LoopPolicy::forever()).expect("run");

        assert_eq!(summary.frames, 2);
        assert_eq!(*game.journal.borrow(), vec!["enter", "tick1", "tick2", "exit"]);
    }

    #[test]
    fn test_system_failure_stops_run() {
        let mut game = TestGame::new();
        game.fail_on = Some(1);
        let result = fixed_engine().run(&mut game, LoopPolicy::frames(10));

        assert!(matches!(result, Err(EngineError::System(_))));
        assert_eq!(*game.journal.borrow(), vec!["enter", "tick1", "exit"]);
        assert!(game.shut_down);
    }

    #[test]
    fn test_init_failure_still_shuts_down() {
        let mut game = TestGame::new();
        game.fail_init = true;
        let result = fixed_engine().run(&mut game, LoopPolicy::frames(3));

        assert!(matches!(result, Err(EngineError::Initialization(AppError::Custom(_)))));
        assert!(game.journal.borrow().is_empty());
        assert!(game.shut_down);
    }

    #[test]
    fn test_quit_request_ends_only_current_run() {
        let mut engine = fixed_engine();
        let mut game = TestGame::new();
        game.quit_after = Some(2);
        let first = engine.run(&mut game, LoopPolicy::frames(10)).expect("first run");
        assert_eq!(first.frames, 2);
        assert!(engine.services().quit_requested());

        let mut again = TestGame::new();
        let second = engine.run(&mut again, LoopPolicy::frames(3)).expect("second run");
        assert_eq!(second.frames, 3);
        assert!(!engine.services().quit_requested());
    }
}
