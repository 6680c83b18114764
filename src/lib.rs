//! Brick Breaker - A single-screen brick breaking arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, power-ups, spawning)
//! - `game`: Top-level state machine (splash, play, pause, game over, score entry)
//! - `renderer`: Frame composition against a drawing collaborator
//! - `audio`: Sound effect and music requests
//! - `highscores`: Per-difficulty score ledger
//! - `input`: Key events
//! - `settings`: Runtime configuration

pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::StorageError;
pub use game::{Game, GamePhase};
pub use highscores::{HighScores, ScoreFile, ScoreLedger, ScoreRecord};
pub use settings::Settings;

use std::time::Duration;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Fixed simulation rate (one tick per rendered frame)
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Duration of one tick
    pub const SIM_DT: Duration = Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND as u64);

    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 860.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_BASE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Gap between the paddle and the bottom of the field
    pub const PADDLE_BOTTOM_MARGIN: f32 = 10.0;
    pub const PADDLE_SPEED: f32 = 10.0;
    pub const PADDLE_MAX_SPEED: f32 = 20.0;
    pub const PADDLE_ACCELERATION: f32 = 1.0;
    /// Width change per difficulty step away from normal
    pub const PADDLE_WIDTH_PER_DIFFICULTY: f32 = 20.0;
    pub const PADDLE_EXPAND_FACTOR: f32 = 1.25;
    pub const PADDLE_SHOTS: u32 = 5;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Paddle bounces never exceed this multiple of the ball speed horizontally
    pub const BALL_MAX_DX_FACTOR: f32 = 1.5;

    /// Brick grid
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 30.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_ROWS: usize = 7;
    pub const BRICK_COLUMNS: usize = 10;
    pub const BRICK_FLASH_INTERVAL: Duration = Duration::from_millis(500);

    /// Power-ups
    pub const POWER_UP_SIZE: f32 = 15.0;
    pub const POWER_UP_SPEED: f32 = 5.0;
    pub const EXPAND_CHANCE: f64 = 0.05;
    pub const EXTRA_BALL_CHANCE: f64 = 0.10;
    pub const ADDITIONAL_BRICKS_CHANCE: f64 = 0.10;
    pub const REMOVE_BALLS_CHANCE: f64 = 0.10;
    pub const SHOOTING_CHANCE: f64 = 0.05;
    pub const BONUS_BRICK_COUNT: usize = 5;
    pub const ALTERNATE_BRICK_COUNT: usize = 3;

    /// Attempts the spawner makes before giving up on placement
    pub const SPAWN_ATTEMPTS: u32 = 1000;

    /// High score table length
    pub const MAX_HIGH_SCORES: usize = 10;
}

/// Format an elapsed play time as `"<minutes> min <seconds> sec"` (truncated)
pub fn format_time(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{} min {} sec", secs / 60, secs % 60)
}
