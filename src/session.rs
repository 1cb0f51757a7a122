use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::grid::{BoundaryPolicy, Cell, Direction};
use crate::rules::{Collision, Rules, RunState, StepOutcome};
use crate::score::ScoreStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Direction(Direction),
    TogglePause,
    Restart,
    Quit,
}

/// Sound triggers for the presentation layer. Each occurrence is queued
/// exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AudioCue {
    FoodConsumed,
    GameOver,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderState {
    /// Head first.
    pub snake: Vec<Cell>,
    pub food: Option<Cell>,
    /// Sorted row-major.
    pub obstacles: Vec<Cell>,
    pub score: u32,
    pub level: u32,
    pub high_score: u32,
    pub length: usize,
    pub move_interval_ms: u64,
    pub boundary_policy: BoundaryPolicy,
    pub phase: Phase,
}

/// Drives one game: routes input, paces steps, ends and restarts runs and
/// keeps the high score in sync with the store.
pub struct GameSession<S: ScoreStore> {
    config: GameConfig,
    rules: Rules,
    run: RunState,
    phase: Phase,
    store: S,
    high_score: u32,
    cues: Vec<AudioCue>,
    rng: StdRng,
    collision: Option<Collision>,
    quit_requested: bool,
}

impl<S: ScoreStore> GameSession<S> {
    /// Fails if `config` does not pass [`GameConfig::validate`].
    pub fn new(config: GameConfig, store: S) -> Result<Self, ConfigError> {
        Self::with_rng(config, store, StdRng::from_entropy())
    }

    /// Same as [`GameSession::new`] with a reproducible random source.
    pub fn with_seed(config: GameConfig, store: S, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, store, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut store: S, mut rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let high_score = store.load().unwrap_or_else(|e| {
            warn!(error = %e, "high score unavailable, starting from 0");
            0
        });
        let rules = Rules::new(&config);
        let run = rules.new_run(&mut rng);

        Ok(Self {
            config,
            rules,
            run,
            phase: Phase::NotStarted,
            store,
            high_score,
            cues: Vec::new(),
            rng,
            collision: None,
            quit_requested: false,
        })
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Direction(direction) => match self.phase {
                Phase::NotStarted => {
                    if self.run.snake.set_direction(direction) {
                        info!(?direction, "run started");
                        self.phase = Phase::Running;
                    }
                }
                Phase::Running => {
                    self.run.snake.set_direction(direction);
                }
                Phase::Paused | Phase::GameOver => {}
            },
            InputEvent::TogglePause => {
                self.phase = match self.phase {
                    Phase::Running => Phase::Paused,
                    Phase::Paused => Phase::Running,
                    other => other,
                };
            }
            InputEvent::Restart => {
                if self.phase == Phase::GameOver {
                    self.restart();
                }
            }
            InputEvent::Quit => self.quit_requested = true,
        }
    }

    /// Feeds `elapsed` frame time to the move timer; performs at most one
    /// step. Does nothing unless the run is in progress.
    pub fn tick(&mut self, elapsed: Duration) {
        if self.phase != Phase::Running || !self.run.scheduler.tick(elapsed) {
            return;
        }

        match self.rules.step(&mut self.run, &mut self.rng) {
            StepOutcome::Idle | StepOutcome::Moved => {}
            StepOutcome::Ate { .. } => self.cues.push(AudioCue::FoodConsumed),
            StepOutcome::Collided(collision) => self.finish(collision),
        }
    }

    pub fn snapshot(&self) -> RenderState {
        let mut obstacles: Vec<Cell> = self.run.board.obstacles().iter().copied().collect();
        obstacles.sort_by_key(|cell| (cell.y, cell.x));

        RenderState {
            snake: self.run.snake.segments().collect(),
            food: self.run.board.food(),
            obstacles,
            score: self.run.score,
            level: self.run.level.level(),
            high_score: self.high_score,
            length: self.run.snake.len(),
            move_interval_ms: self.run.scheduler.interval().as_millis() as u64,
            boundary_policy: self.config.boundary_policy,
            phase: self.phase,
        }
    }

    /// Cues raised since the last call.
    pub fn take_cues(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.cues)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.run.score
    }

    pub fn level(&self) -> u32 {
        self.run.level.level()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Why the last run ended, while in [`Phase::GameOver`].
    pub fn collision(&self) -> Option<Collision> {
        self.collision
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn run_mut(&mut self) -> &mut RunState {
        &mut self.run
    }

    fn finish(&mut self, collision: Collision) {
        self.phase = Phase::GameOver;
        self.collision = Some(collision);
        self.cues.push(AudioCue::GameOver);
        info!(
            score = self.run.score,
            level = self.run.level.level(),
            ?collision,
            "game over"
        );

        if self.run.score > self.high_score {
            self.high_score = self.run.score;
            match self.store.save(self.high_score) {
                Ok(()) => info!(high_score = self.high_score, "new high score"),
                Err(e) => warn!(error = %e, "could not persist high score"),
            }
        }
    }

    fn restart(&mut self) {
        self.run = self.rules.new_run(&mut self.rng);
        self.phase = Phase::NotStarted;
        self.collision = None;
        self.cues.clear();
    }
}
