//! Asteroids 3D - headless runner
//!
//! Plays one scripted session against the simulation core and logs what
//! happened. Usage: `asteroids3d [seed] [tuning.json]`, log level via `RUST_LOG`.

use std::{env, fs, io, process};

use asteroids3d::assets::{AssetError, CatalogLoader, MeshSet};
use asteroids3d::platform::{Clock, FixedClock, Key, MouseButton, ScriptedInput};
use asteroids3d::renderer::{HeadlessRenderer, render_frame};
use asteroids3d::sim::{GameEvent, GamePhase, GameState, TickInput, Viewport, tick};
use asteroids3d::ui::{NEW_GAME_ANCHOR, QUIT_ANCHOR};
use asteroids3d::{Tuning, TuningError};
use glam::Vec2;
use thiserror::Error;

const DEFAULT_SEED: u64 = 0x5EED_A57E;
/// One minute of play at the fixed timestep
const MAX_TICKS: u64 = 60 * 60;
/// Thrust toggles every this many ticks
const THRUST_PERIOD: u64 = 90;

#[derive(Error, Debug)]
enum RunError {
    #[error("Invalid seed `{0}`")]
    BadSeed(String),
    #[error("Cannot read {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error(transparent)]
    Tuning(#[from] TuningError),
    #[error(transparent)]
    Asset(#[from] AssetError),
}

struct Game {
    state: GameState,
    input: ScriptedInput,
    clock: FixedClock,
    renderer: HeadlessRenderer,
    meshes: MeshSet,
    quit: bool,
}

impl Game {
    fn new(seed: u64, tuning: Tuning) -> Result<Self, RunError> {
        let meshes = MeshSet::load(&mut CatalogLoader::with_game_assets())?;
        Ok(Self {
            state: GameState::new(seed, tuning, Viewport::default()),
            input: ScriptedInput::new(),
            clock: FixedClock::default(),
            renderer: HeadlessRenderer::default(),
            meshes,
            quit: false,
        })
    }

    /// Pick this frame's inputs: start from the menu, then circle and shoot
    fn autopilot(&mut self) {
        match self.state.phase {
            GamePhase::Paused => self.click(NEW_GAME_ANCHOR),
            GamePhase::GameOver => self.click(QUIT_ANCHOR),
            GamePhase::Playing => {
                self.input.press(Key::Left);
                self.input.press(Key::Space);
                if (self.state.time_ticks / THRUST_PERIOD) % 2 == 0 {
                    self.input.press(Key::Up);
                } else {
                    self.input.release(Key::Up);
                }
            }
        }
    }

    /// Click just inside a button's top edge
    fn click(&mut self, anchor: Vec2) {
        self.input.click(MouseButton::Left, anchor + Vec2::new(0.0, 5.0));
    }

    fn update(&mut self) {
        self.autopilot();
        let cmd = TickInput::from_source(&self.input);
        let dt = self.clock.delta();
        tick(&mut self.state, &cmd, dt);
        self.input.end_frame();

        render_frame(&self.state, &self.meshes, &mut self.renderer);
        self.log_events();
    }

    fn log_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::QuitRequested => self.quit = true,
                GameEvent::PlayerKilled { lives_left } => log::info!("Ship destroyed, {} lives left", lives_left),
                GameEvent::AsteroidDestroyed { fragments, .. } => {
                    log::debug!("Asteroid destroyed ({} fragments)", fragments)
                }
                other => log::trace!("{:?}", other),
            }
        }
    }
}

fn parse_args() -> Result<(u64, Tuning), RunError> {
    let args: Vec<String> = env::args().skip(1).collect();

    let seed = match args.first() {
        Some(raw) => raw.parse().map_err(|_| RunError::BadSeed(raw.clone()))?,
        None => DEFAULT_SEED,
    };

    let tuning = match args.get(1) {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|source| RunError::Io {
                path: path.clone(),
                source,
            })?;
            Tuning::from_json(&json)?
        }
        None => Tuning::default(),
    };

    Ok((seed, tuning))
}

fn run() -> Result<(), RunError> {
    let (seed, tuning) = parse_args()?;
    log::info!("Game initialized with seed: {}", seed);

    let mut game = Game::new(seed, tuning)?;
    let mut frames = 0u64;
    while !game.quit && game.state.time_ticks < MAX_TICKS {
        game.update();
        frames += 1;
    }

    log::info!(
        "Session ended after {} frames ({} simulated ticks): score {}, lives {}, {} frames drawn",
        frames,
        game.state.time_ticks,
        game.state.score,
        game.state.lives,
        game.renderer.frames
    );
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Asteroids 3D (headless) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        process::exit(1);
    }
}
