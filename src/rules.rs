use rand::Rng;
use tracing::{debug, info};

use crate::board::Board;
use crate::config::GameConfig;
use crate::grid::Grid;
use crate::level::LevelState;
use crate::maze::MazeGenerator;
use crate::scheduler::MoveScheduler;
use crate::snake::{Snake, Step};

/// What ended the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfBite,
    Obstacle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The snake has no heading yet.
    Idle,
    Moved,
    Ate { leveled_up: bool },
    Collided(Collision),
}

/// Mutable state of a single run.
#[derive(Debug, Clone)]
pub struct RunState {
    pub snake: Snake,
    pub board: Board,
    pub level: LevelState,
    pub score: u32,
    pub scheduler: MoveScheduler,
}

/// Collision, food and level rules for one game variant.
#[derive(Debug, Clone)]
pub struct Rules {
    grid: Grid,
    food_reward: u32,
    level_target: u32,
    level_progression: bool,
    maze: Option<MazeGenerator>,
    scheduler: MoveScheduler,
}

impl Rules {
    pub fn new(config: &GameConfig) -> Self {
        let grid = config.build_grid();
        let maze = config
            .obstacles_enabled
            .then(|| MazeGenerator::new(grid, config.obstacle_probability));
        Self {
            grid,
            food_reward: config.food_reward,
            level_target: config.level_target,
            level_progression: config.level_progression_enabled,
            maze,
            scheduler: MoveScheduler::new(
                config.base_delay(),
                config.min_delay(),
                config.delay_step(),
            ),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// A fresh run: one-segment snake in the middle, level 1 obstacles, food.
    pub fn new_run<R: Rng + ?Sized>(&self, rng: &mut R) -> RunState {
        let snake = Snake::new(self.grid.center());
        let mut board = Board::new(self.grid, snake.segments());
        if let Some(maze) = &self.maze {
            board.set_obstacles(maze.generate(1, rng), snake.segments());
        }
        board.place_food(rng);

        let mut scheduler = self.scheduler.clone();
        scheduler.reset();

        RunState {
            snake,
            board,
            level: LevelState::new(self.level_target, self.level_progression),
            score: 0,
            scheduler,
        }
    }

    /// Advances the snake one cell and applies, in order: wall and self
    /// collision, obstacle collision, food, level-up.
    pub fn step<R: Rng + ?Sized>(&self, run: &mut RunState, rng: &mut R) -> StepOutcome {
        // Growth takes effect on the step that reaches the food.
        let next = run.snake.peek(&self.grid);
        if next.is_some() && next == run.board.food() {
            run.snake.grow();
        }

        let head = match run.snake.step(&self.grid) {
            Step::Idle => return StepOutcome::Idle,
            Step::OutOfBounds => return StepOutcome::Collided(Collision::Wall),
            Step::Bitten { .. } => return StepOutcome::Collided(Collision::SelfBite),
            Step::Moved { head, vacated } => {
                if let Some(tail) = vacated {
                    run.board.release(tail);
                }
                run.board.occupy(head);
                head
            }
        };

        if run.board.is_obstacle(head) {
            return StepOutcome::Collided(Collision::Obstacle);
        }

        if run.board.food() != Some(head) {
            return StepOutcome::Moved;
        }

        run.score += self.food_reward;
        run.scheduler.accelerate();
        let leveled_up = run.level.record_food();
        debug!(
            score = run.score,
            length = run.snake.len(),
            interval_ms = run.scheduler.interval().as_millis() as u64,
            "food eaten"
        );

        if leveled_up {
            info!(level = run.level.level(), "level up");
            if let Some(maze) = &self.maze {
                let obstacles = maze.generate(run.level.level(), rng);
                run.board.set_obstacles(obstacles, run.snake.segments());
            }
        }

        // After any maze change, so the new food avoids the new obstacles.
        run.board.place_food(rng);

        StepOutcome::Ate { leveled_up }
    }
}
