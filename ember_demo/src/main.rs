//! Headless two-state demo
//!
//! Clicks "start" on the main menu, walks the player into a wall for one timed
//! round, shows the result and exits. Engine settings come from
//! `ember_demo.toml` when present.

mod states;
mod systems;

use ember_engine::foundation::logging;
use ember_engine::prelude::*;
use thiserror::Error;

use states::{DemoState, MainMenu, VIEWPORT};

const CONFIG_PATH: &str = "ember_demo.toml";

/// Hard stop in case the script never leaves the menu
const FRAME_LIMIT: u64 = 10_000;

/// Seconds per round
const ROUND_LENGTH: f32 = 3.0;

#[derive(Debug, Error)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] ember_engine::config::ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

struct DemoGame;

impl Game for DemoGame {
    type State = DemoState;

    fn register_components(&mut self, registry: &mut ComponentRegistry) {
        registry.register("Patrol", ComponentType::Enemy);
    }

    fn initial_state(
        &mut self,
        _services: &mut EngineServices,
        transitions: &TransitionQueue<DemoState>,
    ) -> Result<DemoState, AppError> {
        Ok(DemoState::MainMenu(MainMenu::new(transitions.clone(), ROUND_LENGTH)))
    }

    fn shutdown(&mut self, services: &mut EngineServices) {
        log::info!("Demo finished after {} frames", services.time.frame_count());
    }
}

/// Press "start", then hold right and up for a while
fn input_script() -> ScriptedInput {
    let (width, height) = VIEWPORT;
    let mut script = ScriptedInput::new().wait(30).click(width * 0.5, height * 0.5);
    for _ in 0..90 {
        script.push_frame(InputFrame::new().with_action(0, GameAction::MoveRight));
    }
    for _ in 0..60 {
        script.push_frame(
            InputFrame::new()
                .with_action(0, GameAction::MoveUp)
                .with_action(0, GameAction::MoveRight),
        );
    }
    script
}

fn run() -> Result<RunSummary, DemoError> {
    let mut config = EngineConfig::load_or_default(CONFIG_PATH)?;
    logging::init_with_level(&config.log_level);
    if config.fixed_timestep.is_none() {
        config.fixed_timestep = Some(1.0 / 60.0);
    }

    let policy = LoopPolicy::all(vec![config.loop_policy(), LoopPolicy::frames(FRAME_LIMIT)]);
    let input = ember_engine::input::shared(input_script());
    let mut engine = Engine::with_input(config, input);
    Ok(engine.run(&mut DemoGame, policy)?)
}

fn main() {
    match run() {
        Ok(summary) => log::info!(
            "Ran {} frames ({:.2}s simulated)",
            summary.frames,
            summary.total_time
        ),
        Err(err) => {
            log::error!("Demo failed: {err}");
            eprintln!("ember_demo: {err}");
            std::process::exit(1);
        }
    }
}
