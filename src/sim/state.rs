//! Session state and entity types
//!
//! Everything the simulation mutates during a tick lives in [`Session`].

use std::time::Duration;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Axis, Rect};
use super::palette::{Color, level_color};
use super::spawn;
use crate::consts::*;

/// Difficulty tier, fixed for a whole session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Numeric tier (1-3), as chosen on the splash screen and stored with scores
    pub fn tier(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn from_tier(tier: u8) -> Option<Self> {
        match tier {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Normal),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Ball speed in units per tick
    pub fn ball_speed(self) -> f32 {
        match self {
            Difficulty::Easy => 3.0,
            Difficulty::Normal => 5.0,
            Difficulty::Hard => 7.0,
        }
    }

    /// Paddle width: wider on easy, narrower on hard
    pub fn paddle_width(self) -> f32 {
        PADDLE_BASE_WIDTH - (self.tier() as f32 - 2.0) * PADDLE_WIDTH_PER_DIFFICULTY
    }
}

/// Horizontal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    /// Width restored by power-down and level transitions
    pub base_width: f32,
    pub base_speed: f32,
    pub current_speed: f32,
    pub shooting_active: bool,
    pub shots_remaining: u32,
}

impl Paddle {
    pub fn new(width: f32) -> Self {
        Self {
            rect: Rect::new(
                ((FIELD_WIDTH - width) / 2.0).floor(),
                FIELD_HEIGHT - PADDLE_HEIGHT - PADDLE_BOTTOM_MARGIN,
                width,
                PADDLE_HEIGHT,
            ),
            base_width: width,
            base_speed: PADDLE_SPEED,
            current_speed: PADDLE_SPEED,
            shooting_active: false,
            shots_remaining: 0,
        }
    }

    /// Shift by the current speed, never leaving the field
    pub fn move_by(&mut self, direction: Direction) {
        match direction {
            Direction::Left if self.rect.left() > 0.0 => self.rect.pos.x -= self.current_speed,
            Direction::Right if self.rect.right() < FIELD_WIDTH => {
                self.rect.pos.x += self.current_speed
            }
            _ => return,
        }
        self.rect.clamp_x(0.0, FIELD_WIDTH);
    }

    pub fn accelerate(&mut self) {
        if self.current_speed < PADDLE_MAX_SPEED {
            self.current_speed = (self.current_speed + PADDLE_ACCELERATION).min(PADDLE_MAX_SPEED);
        }
    }

    pub fn reset_speed(&mut self) {
        self.current_speed = self.base_speed;
    }

    /// Grow the paddle, keeping its left edge in place
    pub fn expand(&mut self) {
        self.rect.size.x = (self.rect.size.x * PADDLE_EXPAND_FACTOR).floor();
    }

    pub fn reset_size(&mut self) {
        self.rect.size.x = self.base_width;
    }

    pub fn reset_size_for_difficulty(&mut self, difficulty: Difficulty) {
        self.base_width = difficulty.paddle_width();
        self.reset_size();
    }

    pub fn enable_shooting(&mut self) {
        self.shooting_active = true;
        self.shots_remaining = PADDLE_SHOTS;
    }

    /// Consume one shot. Returns false when shooting is not available.
    pub fn take_shot(&mut self) -> bool {
        if !self.shooting_active || self.shots_remaining == 0 {
            return false;
        }
        self.shots_remaining -= 1;
        if self.shots_remaining == 0 {
            self.shooting_active = false;
        }
        true
    }

    /// Top-left corner for a ball resting on the paddle center
    pub fn launch_point(&self) -> Vec2 {
        Vec2::new(
            self.rect.center_x() - BALL_RADIUS,
            self.rect.top() - BALL_RADIUS * 2.0,
        )
    }
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    pub vel: Vec2,
    /// Speed for this session's difficulty; wall and brick bounces keep it
    pub speed: f32,
    /// Resting on the paddle, waiting for launch
    pub attached: bool,
}

impl Ball {
    pub fn new(speed: f32, pos: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            rect: Rect {
                pos,
                size: Vec2::splat(BALL_RADIUS * 2.0),
            },
            vel: Vec2::new(random_sign(rng) * speed, -speed),
            speed,
            attached: true,
        }
    }

    /// Re-attach above the paddle with a fresh random horizontal direction
    pub fn reset(&mut self, paddle: &Paddle, rng: &mut impl Rng) {
        self.rect.pos = paddle.launch_point();
        self.vel = Vec2::new(random_sign(rng) * self.speed, -self.speed);
        self.attached = true;
    }

    /// Snap an attached ball to its resting spot on the paddle
    pub fn follow(&mut self, paddle: &Paddle) {
        if self.attached {
            self.rect.pos = paddle.launch_point();
        }
    }

    pub fn advance(&mut self) {
        if !self.attached {
            self.rect.pos += self.vel;
        }
    }

    pub fn bounce(&mut self, axis: Axis) {
        match axis {
            Axis::X => self.vel.x = -self.vel.x,
            Axis::Y => self.vel.y = -self.vel.y,
        }
    }

    /// Steer by where the ball struck the paddle: the center sends it straight
    /// up, the edges send it out at up to `speed` sideways.
    pub fn bounce_off_paddle(&mut self, paddle: &Paddle) {
        let hit = (self.rect.center_x() - paddle.rect.left()) / paddle.rect.width();
        self.vel.x = (hit - 0.5) * 2.0 * self.speed;
        self.vel.y = -self.vel.y.abs();

        let max_dx = self.speed * BALL_MAX_DX_FACTOR;
        self.vel.x = self.vel.x.clamp(-max_dx, max_dx);
    }
}

fn random_sign(rng: &mut impl Rng) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Widen the paddle
    Expand,
    /// Launch another ball from the paddle
    ExtraBall,
    /// Drop flashing bonus bricks into the lower field
    AdditionalBricks,
    /// Keep only the highest ball, or add bricks when a single ball is left
    RemoveBalls,
    /// Let the paddle fire balls on demand
    Shooting,
}

impl PowerUpKind {
    pub fn color(self) -> Color {
        match self {
            PowerUpKind::Expand => Color::Blue,
            PowerUpKind::ExtraBall => Color::Orange,
            PowerUpKind::AdditionalBricks => Color::White,
            PowerUpKind::RemoveBalls => Color::Purple,
            PowerUpKind::Shooting => Color::Black,
        }
    }
}

/// A power-up, carried by a brick until the brick breaks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub rect: Rect,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            kind,
            rect: Rect {
                pos,
                size: Vec2::splat(POWER_UP_SIZE),
            },
        }
    }

    pub fn fall(&mut self) {
        self.rect.pos.y += POWER_UP_SPEED;
    }
}

/// A brick entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub color: Color,
    pub requires_two_hits: bool,
    pub hit_once: bool,
    /// Time since the last color toggle, for flashing bonus bricks
    pub flash: Option<Duration>,
    pub power_up: Option<PowerUp>,
}

impl Brick {
    pub fn new(pos: Vec2, color: Color, requires_two_hits: bool) -> Self {
        Self {
            rect: Rect {
                pos,
                size: Vec2::new(BRICK_WIDTH, BRICK_HEIGHT),
            },
            color,
            requires_two_hits,
            hit_once: false,
            flash: None,
            power_up: None,
        }
    }

    /// Attach a power-up, centered on the brick's top edge
    pub fn with_power_up(mut self, kind: Option<PowerUpKind>) -> Self {
        self.power_up = kind.map(|kind| {
            let x = self.rect.left() + (BRICK_WIDTH / 2.0).floor() - (POWER_UP_SIZE / 2.0).floor();
            PowerUp::new(kind, Vec2::new(x, self.rect.top()))
        });
        self
    }

    pub fn flashing(mut self) -> Self {
        self.flash = Some(Duration::ZERO);
        self
    }

    pub fn is_flashing(&self) -> bool {
        self.flash.is_some()
    }

    /// Register a hit. Returns true when the brick is destroyed.
    pub fn hit(&mut self) -> bool {
        if self.requires_two_hits && !self.hit_once {
            self.hit_once = true;
            self.color = self.color.cracked();
            return false;
        }
        true
    }

    /// Advance the flash timer; purely cosmetic
    pub fn animate(&mut self, dt: Duration) {
        if let Some(elapsed) = self.flash.as_mut() {
            *elapsed += dt;
            if *elapsed > BRICK_FLASH_INTERVAL {
                *elapsed = Duration::ZERO;
                self.color = self.color.flash_partner();
            }
        }
    }
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A ball struck a brick (destroyed or cracked)
    BrickHit,
    /// A ball bounced off the paddle
    PaddleHit,
    /// A destroyed brick released its power-up
    PowerUpReleased(PowerUpKind),
    /// The paddle caught a power-up and its effect was applied
    PowerUpCaught(PowerUpKind),
    /// The last ball left the field
    AllBallsLost,
    /// Every brick is gone
    LevelCleared,
}

/// One play-through at a fixed difficulty
#[derive(Debug, Clone)]
pub struct Session {
    pub difficulty: Difficulty,
    /// Levels cleared so far
    pub level: u32,
    pub score: u32,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub bricks: Vec<Brick>,
    /// Released power-ups falling toward the paddle
    pub power_ups: Vec<PowerUp>,
    pub seed: u64,
    pub rng: Pcg32,
}

impl Session {
    /// Start a new session: one attached ball and a fresh grid for level 0
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let paddle = Paddle::new(difficulty.paddle_width());
        let mut ball = Ball::new(difficulty.ball_speed(), Vec2::ZERO, &mut rng);
        ball.reset(&paddle, &mut rng);
        let bricks = spawn::brick_grid(level_color(0), &mut rng);

        Self {
            difficulty,
            level: 0,
            score: 0,
            paddle,
            balls: vec![ball],
            bricks,
            power_ups: Vec::new(),
            seed,
            rng,
        }
    }

    /// Grid color of the current level
    pub fn level_color(&self) -> Color {
        level_color(self.level)
    }

    /// A free ball leaving the paddle center, as fired by shots and extra-ball pickups
    pub fn ball_from_paddle(&mut self) -> Ball {
        let mut ball = Ball::new(
            self.difficulty.ball_speed(),
            self.paddle.launch_point(),
            &mut self.rng,
        );
        ball.bounce_off_paddle(&self.paddle);
        ball.attached = false;
        ball
    }

    /// Set up the next level after the current one is cleared.
    /// The new ball is launched straight away.
    pub fn start_next_level(&mut self) {
        self.paddle.reset_size();
        let mut ball = Ball::new(self.difficulty.ball_speed(), Vec2::ZERO, &mut self.rng);
        ball.reset(&self.paddle, &mut self.rng);
        ball.attached = false;
        self.balls = vec![ball];
        self.bricks = spawn::brick_grid(self.level_color(), &mut self.rng);
        self.power_ups.clear();
    }

    pub fn launch_balls(&mut self) {
        for ball in &mut self.balls {
            ball.attached = false;
        }
    }

    /// Advance cosmetic timers (flashing bricks)
    pub fn animate(&mut self, dt: Duration) {
        for brick in &mut self.bricks {
            brick.animate(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_difficulty_tables() {
        assert_eq!(Difficulty::Easy.paddle_width(), 120.0);
        assert_eq!(Difficulty::Normal.paddle_width(), 100.0);
        assert_eq!(Difficulty::Hard.paddle_width(), 80.0);
        assert_eq!(Difficulty::Hard.ball_speed(), 7.0);
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_tier(d.tier()), Some(d));
        }
        assert_eq!(Difficulty::from_tier(4), None);
    }

    #[test]
    fn test_paddle_clamps_to_field() {
        let mut paddle = Paddle::new(100.0);
        for _ in 0..200 {
            paddle.accelerate();
            paddle.move_by(Direction::Left);
        }
        assert_eq!(paddle.rect.left(), 0.0);

        for _ in 0..200 {
            paddle.move_by(Direction::Right);
        }
        assert_eq!(paddle.rect.right(), FIELD_WIDTH);
    }

    #[test]
    fn test_paddle_speed_ramps_and_resets() {
        let mut paddle = Paddle::new(100.0);
        assert_eq!(paddle.current_speed, PADDLE_SPEED);
        for _ in 0..50 {
            paddle.accelerate();
        }
        assert_eq!(paddle.current_speed, PADDLE_MAX_SPEED);
        paddle.reset_speed();
        assert_eq!(paddle.current_speed, PADDLE_SPEED);
    }

    #[test]
    fn test_paddle_expand_and_reset() {
        let mut paddle = Paddle::new(100.0);
        let left = paddle.rect.left();
        paddle.expand();
        assert_eq!(paddle.rect.width(), 125.0);
        paddle.expand();
        assert_eq!(paddle.rect.width(), 156.0);
        assert_eq!(paddle.rect.left(), left);
        paddle.reset_size();
        assert_eq!(paddle.rect.width(), 100.0);

        paddle.expand();
        paddle.reset_size_for_difficulty(Difficulty::Hard);
        assert_eq!(paddle.base_width, 80.0);
        assert_eq!(paddle.rect.width(), 80.0);
    }

    #[test]
    fn test_paddle_shots_run_out() {
        let mut paddle = Paddle::new(100.0);
        assert!(!paddle.take_shot());
        paddle.enable_shooting();
        for _ in 0..PADDLE_SHOTS {
            assert!(paddle.take_shot());
        }
        assert!(!paddle.shooting_active);
        assert!(!paddle.take_shot());
    }

    #[test]
    fn test_ball_reset_attaches_above_paddle() {
        let paddle = Paddle::new(100.0);
        let mut rng = rng();
        let mut ball = Ball::new(5.0, Vec2::new(300.0, 300.0), &mut rng);
        ball.attached = false;
        ball.reset(&paddle, &mut rng);

        assert!(ball.attached);
        assert_eq!(ball.rect.center_x(), paddle.rect.center_x());
        assert_eq!(ball.rect.bottom(), paddle.rect.top());
        assert_eq!(ball.vel.x.abs(), 5.0);
        assert_eq!(ball.vel.y, -5.0);
    }

    #[test]
    fn test_attached_ball_does_not_advance() {
        let mut rng = rng();
        let mut ball = Ball::new(5.0, Vec2::new(100.0, 100.0), &mut rng);
        ball.advance();
        assert_eq!(ball.rect.pos, Vec2::new(100.0, 100.0));

        ball.attached = false;
        ball.advance();
        assert_eq!(ball.rect.pos, Vec2::new(100.0, 100.0) + ball.vel);
    }

    #[test]
    fn test_bounce_flips_one_component() {
        let mut rng = rng();
        let mut ball = Ball::new(5.0, Vec2::ZERO, &mut rng);
        let before = ball.vel;
        ball.bounce(Axis::X);
        assert_eq!(ball.vel, Vec2::new(-before.x, before.y));
        ball.bounce(Axis::Y);
        assert_eq!(ball.vel, Vec2::new(-before.x, -before.y));
        assert_eq!(ball.vel.length(), before.length());
    }

    #[test]
    fn test_bounce_off_paddle_center_and_edges() {
        let paddle = Paddle::new(100.0);
        let mut rng = rng();
        let mut ball = Ball::new(5.0, Vec2::ZERO, &mut rng);

        ball.rect.pos.x = paddle.rect.center_x() - BALL_RADIUS;
        ball.vel.y = 5.0;
        ball.bounce_off_paddle(&paddle);
        assert_eq!(ball.vel.x, 0.0);
        assert_eq!(ball.vel.y, -5.0);

        ball.rect.pos.x = paddle.rect.left() - BALL_RADIUS;
        ball.bounce_off_paddle(&paddle);
        assert_eq!(ball.vel.x, -5.0);

        ball.rect.pos.x = paddle.rect.right() - BALL_RADIUS;
        ball.bounce_off_paddle(&paddle);
        assert_eq!(ball.vel.x, 5.0);
        assert!(ball.vel.y < 0.0);
    }

    #[test]
    fn test_bounce_off_paddle_caps_dx() {
        let paddle = Paddle::new(100.0);
        let mut rng = rng();
        let mut ball = Ball::new(4.0, Vec2::ZERO, &mut rng);
        // Center well beyond the right tip
        ball.rect.pos.x = paddle.rect.right() + 60.0;
        ball.bounce_off_paddle(&paddle);
        assert_eq!(ball.vel.x, 6.0);
    }

    #[test]
    fn test_two_hit_brick() {
        let mut brick = Brick::new(Vec2::ZERO, Color::Green, true);
        assert!(!brick.hit());
        assert!(brick.hit_once);
        assert_eq!(brick.color, Color::DarkGreen);
        assert!(brick.hit());
    }

    #[test]
    fn test_one_hit_brick() {
        let mut brick = Brick::new(Vec2::ZERO, Color::Green, false);
        assert!(brick.hit());
        assert_eq!(brick.color, Color::Green);
    }

    #[test]
    fn test_power_up_centered_on_brick() {
        let brick = Brick::new(Vec2::new(10.0, 50.0), Color::Cyan, false)
            .with_power_up(Some(PowerUpKind::Shooting));
        let power_up = brick.power_up.expect("power-up attached");
        assert_eq!(power_up.rect.pos, Vec2::new(10.0 + 37.0 - 7.0, 50.0));
    }

    #[test]
    fn test_flashing_brick_toggles_every_interval() {
        let mut brick = Brick::new(Vec2::ZERO, Color::White, true).flashing();
        brick.animate(Duration::from_millis(400));
        assert_eq!(brick.color, Color::White);
        brick.animate(Duration::from_millis(200));
        assert_eq!(brick.color, Color::Red);
        brick.animate(Duration::from_millis(501));
        assert_eq!(brick.color, Color::White);

        let mut plain = Brick::new(Vec2::ZERO, Color::White, true);
        plain.animate(Duration::from_secs(5));
        assert_eq!(plain.color, Color::White);
    }

    #[test]
    fn test_new_session() {
        let session = Session::new(Difficulty::Normal, 42);
        assert_eq!(session.score, 0);
        assert_eq!(session.level, 0);
        assert_eq!(session.balls.len(), 1);
        assert!(session.balls[0].attached);
        assert_eq!(session.bricks.len(), BRICK_ROWS * BRICK_COLUMNS);
        assert_eq!(session.paddle.rect.width(), 100.0);
        assert!(session.power_ups.is_empty());
    }

    #[test]
    fn test_start_next_level() {
        let mut session = Session::new(Difficulty::Easy, 1);
        session.level = 1;
        session.paddle.expand();
        let mut rng = rng();
        session.balls.push(Ball::new(3.0, Vec2::ZERO, &mut rng));
        session.bricks.clear();
        session.power_ups.push(PowerUp::new(PowerUpKind::Expand, Vec2::ZERO));

        session.start_next_level();
        assert_eq!(session.balls.len(), 1);
        assert!(!session.balls[0].attached);
        assert_eq!(session.paddle.rect.width(), 120.0);
        assert!(session.power_ups.is_empty());
        assert_eq!(session.bricks.len(), BRICK_ROWS * BRICK_COLUMNS);
        assert!(session.bricks.iter().all(|b| b.color == Color::Yellow));
    }
}
