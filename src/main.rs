use std::path::PathBuf;

use arcade_snake::tones;
use arcade_snake::{
    AudioCue, BoundaryPolicy, Cell, Direction, FileScoreStore, GameConfig, GameSession,
    InputEvent, Phase, RenderState,
};
use clap::{Parser, ValueEnum};
use ggez::audio::{self, SoundSource};
use ggez::event::{self, EventHandler};
use ggez::input::keyboard::{KeyCode, KeyInput};
use ggez::mint::Point2;
use ggez::{graphics, Context, GameError, GameResult};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// Colors
const WINDOW_BG: graphics::Color = graphics::Color::new(0.06, 0.08, 0.11, 1.0);
const GAME_BG: graphics::Color = graphics::Color::new(0.07, 0.086, 0.11, 1.0);
const GRID_COLOR: graphics::Color = graphics::Color::new(0.16, 0.19, 0.23, 1.0);
const SNAKE_HEAD: graphics::Color = graphics::Color::new(0.35, 0.78, 0.47, 1.0);
const SNAKE_BODY: graphics::Color = graphics::Color::new(0.24, 0.63, 0.35, 1.0);
const FOOD_RED: graphics::Color = graphics::Color::new(0.78, 0.24, 0.24, 1.0);
const OBSTACLE_COLOR: graphics::Color = graphics::Color::new(0.47, 0.47, 0.47, 1.0);
const SHADOW: graphics::Color = graphics::Color::new(0.0, 0.0, 0.0, 0.3);
const HUD_BG: graphics::Color = graphics::Color::new(0.0, 0.0, 0.0, 0.63);
const OVERLAY: graphics::Color = graphics::Color::new(0.0, 0.0, 0.0, 0.7);
const TEXT: graphics::Color = graphics::Color::new(0.94, 0.94, 0.94, 1.0);
const GOLD: graphics::Color = graphics::Color::new(1.0, 0.84, 0.0, 1.0);

#[derive(Parser, Debug)]
#[command(name = "arcade_snake", about = "Arcade snake with maze levels")]
struct Args {
    /// Game variant to play.
    #[arg(long, value_enum, default_value_t = Variant::Arcade)]
    variant: Variant,

    /// JSON config file; overrides the variant preset.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where the best score is kept.
    #[arg(long)]
    high_score_file: Option<PathBuf>,

    /// Seed for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Variant {
    /// Wrap-around world with maze levels.
    Arcade,
    /// Walled world, no obstacles.
    Classic,
}

struct Game {
    session: GameSession<FileScoreStore>,
    eat_sound: Option<audio::Source>,
    game_over_sound: Option<audio::Source>,
    record_date: Option<String>,
    border: f32,
    cell: f32,
    pulse: f32,
}

impl Game {
    fn new(ctx: &mut Context, session: GameSession<FileScoreStore>) -> Self {
        let config = session.config();
        let border = config.grid.border as f32;
        let cell = config.grid.cell_size as f32;
        let mut game = Game {
            eat_sound: load_tone(ctx, &tones::eat_tone()),
            game_over_sound: load_tone(ctx, &tones::game_over_tone()),
            session,
            record_date: None,
            border,
            cell,
            pulse: 0.0,
        };
        game.refresh_record_date();
        game
    }

    fn refresh_record_date(&mut self) {
        self.record_date = self
            .session
            .store()
            .recorded_at()
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string());
    }

    fn play(ctx: &mut Context, sound: &mut Option<audio::Source>) -> GameResult {
        if let Some(source) = sound {
            source.play_detached(ctx)?;
        }
        Ok(())
    }

    fn cell_rect(&self, cell: Cell) -> graphics::Rect {
        let (x, y) = self.session.run().board.grid().to_pixels(cell);
        graphics::Rect::new(self.border + x, self.border + y, self.cell, self.cell)
    }

    fn draw_board(&self, ctx: &mut Context, canvas: &mut graphics::Canvas) -> GameResult {
        let grid = *self.session.run().board.grid();
        let width = (grid.columns() * grid.cell_size()) as f32;
        let height = (grid.rows() * grid.cell_size()) as f32;

        let area = graphics::Rect::new(self.border, self.border, width, height);
        canvas.draw(
            &graphics::Mesh::new_rounded_rectangle(
                ctx,
                graphics::DrawMode::fill(),
                area,
                18.0,
                GAME_BG,
            )?,
            graphics::DrawParam::default(),
        );

        for column in 0..=grid.columns() {
            let x = self.border + column as f32 * self.cell;
            let line = graphics::Mesh::new_line(
                ctx,
                &[
                    Point2 { x, y: self.border },
                    Point2 {
                        x,
                        y: self.border + height,
                    },
                ],
                1.0,
                GRID_COLOR,
            )?;
            canvas.draw(&line, graphics::DrawParam::default());
        }
        for row in 0..=grid.rows() {
            let y = self.border + row as f32 * self.cell;
            let line = graphics::Mesh::new_line(
                ctx,
                &[
                    Point2 { x: self.border, y },
                    Point2 {
                        x: self.border + width,
                        y,
                    },
                ],
                1.0,
                GRID_COLOR,
            )?;
            canvas.draw(&line, graphics::DrawParam::default());
        }
        Ok(())
    }

    fn draw_block(
        &self,
        ctx: &mut Context,
        canvas: &mut graphics::Canvas,
        cell: Cell,
        color: graphics::Color,
        radius: f32,
    ) -> GameResult {
        let rect = self.cell_rect(cell);
        let mut shadow = rect;
        shadow.translate([2.0, 3.0]);
        canvas.draw(
            &graphics::Mesh::new_rounded_rectangle(ctx, graphics::DrawMode::fill(), shadow, radius, SHADOW)?,
            graphics::DrawParam::default(),
        );
        canvas.draw(
            &graphics::Mesh::new_rounded_rectangle(ctx, graphics::DrawMode::fill(), rect, radius, color)?,
            graphics::DrawParam::default(),
        );
        Ok(())
    }

    fn draw_entities(
        &self,
        ctx: &mut Context,
        canvas: &mut graphics::Canvas,
        snap: &RenderState,
    ) -> GameResult {
        for &obstacle in &snap.obstacles {
            self.draw_block(ctx, canvas, obstacle, OBSTACLE_COLOR, 5.0)?;
        }

        if let Some(food) = snap.food {
            let rect = self.cell_rect(food);
            let center = Point2 {
                x: rect.x + self.cell / 2.0,
                y: rect.y + self.cell / 2.0,
            };
            let glow = 3.0 + 2.0 * (self.pulse * 6.0).sin();
            let halo = graphics::Color::new(FOOD_RED.r, FOOD_RED.g, FOOD_RED.b, 0.35);
            canvas.draw(
                &graphics::Mesh::new_circle(
                    ctx,
                    graphics::DrawMode::fill(),
                    center,
                    self.cell / 2.0 + glow,
                    0.5,
                    halo,
                )?,
                graphics::DrawParam::default(),
            );
            canvas.draw(
                &graphics::Mesh::new_circle(
                    ctx,
                    graphics::DrawMode::fill(),
                    center,
                    self.cell / 2.0,
                    0.5,
                    FOOD_RED,
                )?,
                graphics::DrawParam::default(),
            );
        }

        // Tail first so the head is drawn on top.
        for (i, &segment) in snap.snake.iter().enumerate().rev() {
            let color = if i == 0 { SNAKE_HEAD } else { SNAKE_BODY };
            self.draw_block(ctx, canvas, segment, color, 6.0)?;
        }
        Ok(())
    }

    fn draw_text(canvas: &mut graphics::Canvas, text: &str, scale: f32, color: graphics::Color, x: f32, y: f32) {
        let mut text = graphics::Text::new(text);
        text.set_scale(scale);
        canvas.draw(
            &text,
            graphics::DrawParam::default()
                .dest(Point2 { x, y })
                .color(color),
        );
    }

    fn draw_hud(&self, ctx: &mut Context, canvas: &mut graphics::Canvas, snap: &RenderState) -> GameResult {
        let panel = graphics::Rect::new(self.border + 12.0, self.border + 12.0, 260.0, 80.0);
        canvas.draw(
            &graphics::Mesh::new_rounded_rectangle(ctx, graphics::DrawMode::fill(), panel, 6.0, HUD_BG)?,
            graphics::DrawParam::default(),
        );

        let x = panel.x + 12.0;
        Self::draw_text(canvas, &format!("Score : {}", snap.score), 22.0, GOLD, x, panel.y + 6.0);
        let second = match snap.boundary_policy {
            BoundaryPolicy::WrapAround => format!("Level : {}", snap.level),
            BoundaryPolicy::Bounded => format!("Length: {}", snap.length),
        };
        Self::draw_text(canvas, &second, 14.0, TEXT, x, panel.y + 32.0);
        let high = match &self.record_date {
            Some(date) => format!("High  : {} ({})", snap.high_score, date),
            None => format!("High  : {}", snap.high_score),
        };
        Self::draw_text(canvas, &high, 14.0, TEXT, x, panel.y + 52.0);
        Ok(())
    }

    fn draw_overlay(&self, ctx: &mut Context, canvas: &mut graphics::Canvas, snap: &RenderState) -> GameResult {
        let (width, height) = self.session.config().window_size();
        let (cx, cy) = (width / 2.0, height / 2.0);

        match snap.phase {
            Phase::NotStarted => {
                let title = match snap.boundary_policy {
                    BoundaryPolicy::WrapAround => "ARCADE SNAKE - LEVELS",
                    BoundaryPolicy::Bounded => "SNAKE",
                };
                Self::draw_text(canvas, title, 44.0, TEXT, cx - 260.0, cy - 40.0);
                Self::draw_text(canvas, "Arrow Keys to Start", 22.0, TEXT, cx - 120.0, cy + 20.0);
            }
            Phase::Paused => {
                Self::draw_text(canvas, "PAUSED", 30.0, TEXT, cx - 50.0, cy);
            }
            Phase::GameOver => {
                let screen = graphics::Rect::new(0.0, 0.0, width, height);
                canvas.draw(
                    &graphics::Mesh::new_rectangle(ctx, graphics::DrawMode::fill(), screen, OVERLAY)?,
                    graphics::DrawParam::default(),
                );
                Self::draw_text(canvas, "GAME OVER", 30.0, FOOD_RED, cx - 90.0, cy - 20.0);
                Self::draw_text(canvas, "Press R to Restart", 22.0, TEXT, cx - 110.0, cy + 30.0);
            }
            Phase::Running => {}
        }
        Ok(())
    }
}

fn load_tone(ctx: &mut Context, wav: &[u8]) -> Option<audio::Source> {
    let data = audio::SoundData::from_bytes(wav);
    match audio::Source::from_data(ctx, data) {
        Ok(source) => Some(source),
        Err(e) => {
            warn!(error = %e, "sound unavailable");
            None
        }
    }
}

fn key_to_input(keycode: KeyCode) -> Option<InputEvent> {
    let event = match keycode {
        KeyCode::Up => InputEvent::Direction(Direction::Up),
        KeyCode::Down => InputEvent::Direction(Direction::Down),
        KeyCode::Left => InputEvent::Direction(Direction::Left),
        KeyCode::Right => InputEvent::Direction(Direction::Right),
        KeyCode::P => InputEvent::TogglePause,
        KeyCode::R => InputEvent::Restart,
        KeyCode::Escape | KeyCode::Q => InputEvent::Quit,
        _ => return None,
    };
    Some(event)
}

impl EventHandler for Game {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        let dt = ctx.time.delta();
        self.pulse = (self.pulse + dt.as_secs_f32()) % (2.0 * std::f32::consts::PI);
        self.session.tick(dt);

        for cue in self.session.take_cues() {
            match cue {
                AudioCue::FoodConsumed => Self::play(ctx, &mut self.eat_sound)?,
                AudioCue::GameOver => {
                    Self::play(ctx, &mut self.game_over_sound)?;
                    self.refresh_record_date();
                }
            }
        }

        if self.session.quit_requested() {
            ctx.request_quit();
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        let mut canvas = graphics::Canvas::from_frame(ctx, WINDOW_BG);
        let snap = self.session.snapshot();

        self.draw_board(ctx, &mut canvas)?;
        self.draw_entities(ctx, &mut canvas, &snap)?;
        self.draw_hud(ctx, &mut canvas, &snap)?;
        self.draw_overlay(ctx, &mut canvas, &snap)?;

        canvas.finish(ctx)?;
        Ok(())
    }

    fn key_down_event(&mut self, _ctx: &mut Context, input: KeyInput, _repeat: bool) -> GameResult {
        if let Some(event) = input.keycode.and_then(key_to_input) {
            self.session.handle_input(event);
        }
        Ok(())
    }
}

fn main() -> GameResult {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path).map_err(|e| GameError::CustomError(e.to_string()))?,
        None => match args.variant {
            Variant::Arcade => GameConfig::arcade(),
            Variant::Classic => GameConfig::classic(),
        },
    };
    if let Some(path) = args.high_score_file {
        config.high_score_path = path;
    }
    info!(variant = ?args.variant, policy = ?config.boundary_policy, "starting");

    let store = FileScoreStore::new(config.high_score_path.clone());
    let (width, height) = config.window_size();
    let session = match args.seed {
        Some(seed) => GameSession::with_seed(config, store, seed),
        None => GameSession::new(config, store),
    }
    .map_err(|e| GameError::CustomError(e.to_string()))?;

    let window_setup = ggez::conf::WindowSetup::default()
        .title("Snake - Arcade Levels")
        .vsync(true);
    let window_mode = ggez::conf::WindowMode::default()
        .dimensions(width, height)
        .resizable(false);

    let (mut ctx, event_loop) = ggez::ContextBuilder::new("arcade_snake", "arcade_snake")
        .window_setup(window_setup)
        .window_mode(window_mode)
        .build()?;

    let game = Game::new(&mut ctx, session);
    event::run(ctx, event_loop, game)
}
