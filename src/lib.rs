//! Arcade snake simulation: grid, maze, movement pacing, collision and
//! level rules, and a session controller that a front end drives with
//! input events and frame ticks.

pub mod board;
pub mod config;
pub mod error;
pub mod grid;
pub mod level;
pub mod maze;
pub mod rules;
pub mod scheduler;
pub mod score;
pub mod session;
pub mod snake;
pub mod tones;

pub use config::GameConfig;
pub use error::{ConfigError, ScoreError};
pub use grid::{BoundaryPolicy, Cell, Direction, Grid};
pub use rules::Collision;
pub use score::{FileScoreStore, MemoryScoreStore, ScoreStore};
pub use session::{AudioCue, GameSession, InputEvent, Phase, RenderState};
