//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed tick rate only
//! - Seeded RNG owned by the session
//! - No rendering, audio or platform dependencies

pub mod geometry;
pub mod palette;
pub mod spawn;
pub mod state;
pub mod tick;

pub use geometry::{Axis, Rect};
pub use palette::{BRICK_PALETTE, Color, level_color};
pub use state::{
    Ball, Brick, Difficulty, Direction, GameEvent, Paddle, PowerUp, PowerUpKind, Session,
};
pub use tick::{TickInput, apply_power_up, fire_shot, keep_highest_ball, tick};
