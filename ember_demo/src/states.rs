//! Demo game states: main menu → playing → game over

use std::cell::RefCell;
use std::rc::Rc;

use ember_engine::ecs::systems::{CollisionSystem, MovementSystem, PlayerInputSystem, UiSystem};
use ember_engine::events::{HandlerGroup, ListenerId};
use ember_engine::prelude::*;
use ember_engine::scene::LoadReport;

const MENU_SCENE: &str = include_str!("../scenes/main_menu.json");
const LEVEL_SCENE: &str = include_str!("../scenes/level_1.ron");

/// Menu viewport in pixels
pub const VIEWPORT: (f32, f32) = (800.0, 600.0);

pub const START_ACTION: &str = "START_NEW_GAME";
pub const QUIT_ACTION: &str = "QUIT";
pub const GAME_OVER: &str = "GameOver";

pub type Transitions = TransitionQueue<DemoState>;

fn log_report(report: &LoadReport) {
    log::info!(
        "Loaded scene '{}': {} entities, {} components",
        report.scene,
        report.entities.len(),
        report.components_added
    );
    for skipped in &report.skipped {
        log::warn!("Skipped {} on '{}': {}", skipped.component, skipped.entity_name, skipped.error);
    }
}

fn tear_down(services: &mut EngineServices) {
    services.systems.clear();
    services.world.clear();
    services.scenes.catalog_mut().clear();
}

/// Every state the demo can be in
pub enum DemoState {
    MainMenu(MainMenu),
    Playing(Playing),
    GameOver(GameOver),
}

impl GameState for DemoState {
    fn name(&self) -> &str {
        match self {
            Self::MainMenu(state) => state.name(),
            Self::Playing(state) => state.name(),
            Self::GameOver(state) => state.name(),
        }
    }

    fn on_enter(&mut self, services: &mut EngineServices) -> Result<(), StateError> {
        match self {
            Self::MainMenu(state) => state.on_enter(services),
            Self::Playing(state) => state.on_enter(services),
            Self::GameOver(state) => state.on_enter(services),
        }
    }

    fn on_update(&mut self, services: &mut EngineServices, delta_time: f32) -> Result<(), StateError> {
        match self {
            Self::MainMenu(state) => state.on_update(services, delta_time),
            Self::Playing(state) => state.on_update(services, delta_time),
            Self::GameOver(state) => state.on_update(services, delta_time),
        }
    }

    fn on_exit(&mut self, services: &mut EngineServices) -> Result<(), StateError> {
        match self {
            Self::MainMenu(state) => state.on_exit(services),
            Self::Playing(state) => state.on_exit(services),
            Self::GameOver(state) => state.on_exit(services),
        }
    }
}

/// Title screen with start and quit buttons
pub struct MainMenu {
    transitions: Transitions,
    round_length: f32,
    listener: Option<ListenerId>,
}

impl MainMenu {
    pub fn new(transitions: Transitions, round_length: f32) -> Self {
        Self {
            transitions,
            round_length,
            listener: None,
        }
    }
}

impl GameState for MainMenu {
    fn name(&self) -> &str {
        "MainMenu"
    }

    fn on_enter(&mut self, services: &mut EngineServices) -> Result<(), StateError> {
        let report = services.scenes.load_str(MENU_SCENE, SceneFormat::Json, &mut services.world)?;
        log_report(&report);

        let (width, height) = VIEWPORT;
        services
            .systems
            .register(Box::new(UiSystem::new(services.input_handle(), width, height)));

        let transitions = self.transitions.clone();
        let round_length = self.round_length;
        self.listener = Some(services.events.subscribe(move |clicked: &UiButtonClicked| {
            match clicked.action.as_str() {
                START_ACTION => {
                    let playing = Playing::new(transitions.clone(), round_length);
                    transitions.change(DemoState::Playing(playing));
                    Ok(())
                }
                QUIT_ACTION => {
                    transitions.clear_stack();
                    Ok(())
                }
                other => Err(EventError::listener(format!("no menu action named '{other}'"))),
            }
        }));
        Ok(())
    }

    fn on_exit(&mut self, services: &mut EngineServices) -> Result<(), StateError> {
        if let Some(id) = self.listener.take() {
            services.events.unsubscribe::<UiButtonClicked>(id);
        }
        tear_down(services);
        Ok(())
    }
}

/// Reacts to state-change requests while a round is running
struct Referee {
    transitions: Transitions,
    survived: f32,
}

impl Referee {
    fn on_state_change(&mut self, request: &StateChangeRequested) -> Result<(), EventError> {
        if request.target != GAME_OVER {
            return Err(EventError::listener(format!("unknown state '{}'", request.target)));
        }
        let game_over = GameOver::new(self.transitions.clone(), self.survived);
        self.transitions.change(DemoState::GameOver(game_over));
        Ok(())
    }
}

/// One timed round in the first level
pub struct Playing {
    round_length: f32,
    elapsed: f32,
    finished: bool,
    player: Option<Entity>,
    referee: Rc<RefCell<Referee>>,
    handlers: Option<HandlerGroup>,
}

impl Playing {
    pub fn new(transitions: Transitions, round_length: f32) -> Self {
        Self {
            round_length,
            elapsed: 0.0,
            finished: false,
            player: None,
            referee: Rc::new(RefCell::new(Referee {
                transitions,
                survived: 0.0,
            })),
            handlers: None,
        }
    }
}

impl GameState for Playing {
    fn name(&self) -> &str {
        "Playing"
    }

    fn on_enter(&mut self, services: &mut EngineServices) -> Result<(), StateError> {
        let report = services.scenes.load_str(LEVEL_SCENE, SceneFormat::Ron, &mut services.world)?;
        log_report(&report);
        self.player = report.entity("Player");

        let input = services.input_handle();
        services.systems.register(Box::new(PlayerInputSystem::new(input)));
        services.systems.register(Box::new(MovementSystem::new()));
        services.systems.register(Box::new(CollisionSystem::new("player", "wall")));
        services.systems.register(Box::new(crate::systems::EnemyPatrolSystem::new()));

        self.handlers = Some(ember_engine::event_handlers!(&mut services.events, self.referee, {
            StateChangeRequested => on_state_change,
        }));
        Ok(())
    }

    fn on_update(&mut self, services: &mut EngineServices, delta_time: f32) -> Result<(), StateError> {
        if self.finished {
            return Ok(());
        }
        self.elapsed += delta_time;
        if self.elapsed >= self.round_length {
            self.finished = true;
            self.referee.borrow_mut().survived = self.elapsed;
            let report = services.events.publish(&StateChangeRequested::new(GAME_OVER));
            if !report.was_heard() {
                return Err(StateError::Custom("nobody handled the end of the round".to_string()));
            }
        }
        Ok(())
    }

    fn on_exit(&mut self, services: &mut EngineServices) -> Result<(), StateError> {
        if let Some(position) = self
            .player
            .and_then(|player| services.world.get_component::<TransformComponent>(player))
            .map(|transform| transform.position)
        {
            log::info!("Round over, player ended at ({:.2}, {:.2})", position.x, position.y);
        }
        if let Some(group) = self.handlers.take() {
            services.events.unregister_group(group);
        }
        tear_down(services);
        Ok(())
    }
}

/// Shows the result briefly, then ends the run
pub struct GameOver {
    transitions: Transitions,
    survived: f32,
    shown_for: f32,
}

impl GameOver {
    /// Seconds the result stays up
    const DISPLAY_TIME: f32 = 1.0;

    pub fn new(transitions: Transitions, survived: f32) -> Self {
        Self {
            transitions,
            survived,
            shown_for: 0.0,
        }
    }
}

impl GameState for GameOver {
    fn name(&self) -> &str {
        "GameOver"
    }

    fn on_enter(&mut self, _services: &mut EngineServices) -> Result<(), StateError> {
        log::info!("Game over, survived {:.1}s", self.survived);
        Ok(())
    }

    fn on_update(&mut self, _services: &mut EngineServices, delta_time: f32) -> Result<(), StateError> {
        let was_showing = self.shown_for < Self::DISPLAY_TIME;
        self.shown_for += delta_time;
        if was_showing && self.shown_for >= Self::DISPLAY_TIME {
            self.transitions.pop();
        }
        Ok(())
    }
}
