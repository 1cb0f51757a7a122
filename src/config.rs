use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::{BoundaryPolicy, Grid};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub columns: i32,
    pub rows: i32,
    /// Pixel size of one cell.
    pub cell_size: i32,
    /// Pixel margin around the play area.
    pub border: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    pub base_delay_ms: u64,
    pub min_delay_ms: u64,
    /// Subtracted from the move delay per food eaten.
    pub delay_step_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub grid: GridConfig,
    pub boundary_policy: BoundaryPolicy,
    pub obstacles_enabled: bool,
    pub level_progression_enabled: bool,
    pub timing: TimingConfig,
    pub food_reward: u32,
    /// Foods per level.
    pub level_target: u32,
    pub obstacle_probability: f64,
    pub high_score_path: PathBuf,
}

impl GameConfig {
    /// Wrap-around world with maze obstacles and levels.
    pub fn arcade() -> Self {
        Self {
            grid: GridConfig {
                columns: 39,
                rows: 29,
                cell_size: 20,
                border: 60,
            },
            boundary_policy: BoundaryPolicy::WrapAround,
            obstacles_enabled: true,
            level_progression_enabled: true,
            timing: TimingConfig {
                base_delay_ms: 140,
                min_delay_ms: 70,
                delay_step_ms: 3,
            },
            food_reward: 10,
            level_target: 5,
            obstacle_probability: 0.25,
            high_score_path: PathBuf::from("highscore.txt"),
        }
    }

    /// Walled world, no obstacles, faster acceleration.
    pub fn classic() -> Self {
        Self {
            boundary_policy: BoundaryPolicy::Bounded,
            obstacles_enabled: false,
            level_progression_enabled: false,
            timing: TimingConfig {
                base_delay_ms: 140,
                min_delay_ms: 60,
                delay_step_ms: 6,
            },
            ..Self::arcade()
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.columns < 3 || self.grid.rows < 3 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 3x3, got {}x{}",
                self.grid.columns, self.grid.rows
            )));
        }
        if self.grid.cell_size <= 0 || self.grid.border < 0 {
            return Err(ConfigError::Invalid(
                "cell size must be positive and border non-negative".to_string(),
            ));
        }
        if self.level_target == 0 {
            return Err(ConfigError::Invalid("level target must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.obstacle_probability) {
            return Err(ConfigError::Invalid(format!(
                "obstacle probability {} is outside 0..=1",
                self.obstacle_probability
            )));
        }
        if self.timing.min_delay_ms > self.timing.base_delay_ms {
            return Err(ConfigError::Invalid(
                "minimum move delay exceeds the base delay".to_string(),
            ));
        }
        Ok(())
    }

    pub fn build_grid(&self) -> Grid {
        Grid::new(
            self.grid.columns,
            self.grid.rows,
            self.grid.cell_size,
            self.boundary_policy,
        )
    }

    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.timing.base_delay_ms)
    }

    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.timing.min_delay_ms)
    }

    pub fn delay_step(&self) -> Duration {
        Duration::from_millis(self.timing.delay_step_ms)
    }

    /// Window size in pixels: the play area plus its border on each side.
    pub fn window_size(&self) -> (f32, f32) {
        let g = &self.grid;
        (
            (g.columns * g.cell_size + 2 * g.border) as f32,
            (g.rows * g.cell_size + 2 * g.border) as f32,
        )
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::arcade()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        GameConfig::arcade().validate().unwrap();
        GameConfig::classic().validate().unwrap();
    }

    #[test]
    fn test_arcade_window_matches_layout() {
        assert_eq!(GameConfig::arcade().window_size(), (900.0, 700.0));
    }

    #[test]
    fn test_classic_differs_in_policy_and_features() {
        let classic = GameConfig::classic();
        assert_eq!(classic.boundary_policy, BoundaryPolicy::Bounded);
        assert!(!classic.obstacles_enabled);
        assert!(!classic.level_progression_enabled);
        assert_eq!(classic.grid, GameConfig::arcade().grid);
    }

    #[test]
    fn test_json_round_trip_through_serde() {
        let json = serde_json::to_string(&GameConfig::classic()).unwrap();
        assert!(json.contains("\"Bounded\""));
        let parsed: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, GameConfig::classic());
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = GameConfig::arcade();
        config.level_target = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = GameConfig::arcade();
        config.obstacle_probability = 1.5;
        assert!(config.validate().is_err());

        let mut config = GameConfig::arcade();
        config.timing.min_delay_ms = 500;
        assert!(config.validate().is_err());

        let mut config = GameConfig::arcade();
        config.grid.columns = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = GameConfig::load(Path::new("/definitely/not/here/snake.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
