//! Fixed-rate simulation tick
//!
//! Advances a [`Session`] by one step: paddle, balls, bricks, power-ups.

use super::geometry::Axis;
use super::spawn;
use super::state::{Ball, Direction, GameEvent, PowerUpKind, Session};
use crate::consts::*;

/// Input held during a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left direction key held
    pub left: bool,
    /// Right direction key held
    pub right: bool,
    /// Demo mode - steer the paddle automatically
    pub autopilot: bool,
}

/// Advance the session by one tick, returning what happened
pub fn tick(state: &mut Session, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    let mut input = input.clone();
    if input.autopilot {
        let (left, right) = autopilot_steer(state);
        input.left = left;
        input.right = right;
        if state.paddle.shooting_active {
            fire_shot(state);
        }
    }

    // Paddle, ramping speed while a direction is held
    if input.left {
        state.paddle.accelerate();
        state.paddle.move_by(Direction::Left);
    }
    if input.right {
        state.paddle.accelerate();
        state.paddle.move_by(Direction::Right);
    }

    let Session {
        paddle,
        balls,
        bricks,
        power_ups,
        score,
        ..
    } = state;

    for ball in balls.iter_mut() {
        if ball.attached {
            ball.follow(paddle);
        } else {
            ball.advance();
        }

        // Walls (the bottom is open)
        if ball.rect.left() <= 0.0 {
            ball.rect.pos.x = 0.0;
            ball.bounce(Axis::X);
        }
        if ball.rect.right() >= FIELD_WIDTH {
            ball.rect.pos.x = FIELD_WIDTH - ball.rect.width();
            ball.bounce(Axis::X);
        }
        if ball.rect.top() <= 0.0 {
            ball.rect.pos.y = 0.0;
            ball.bounce(Axis::Y);
        }

        if !ball.attached && ball.rect.intersects(&paddle.rect) {
            ball.bounce_off_paddle(paddle);
            events.push(GameEvent::PaddleHit);
        }

        // Every brick the ball overlaps this tick takes a hit
        bricks.retain_mut(|brick| {
            if !ball.rect.intersects(&brick.rect) {
                return true;
            }
            ball.bounce(Axis::Y);
            *score += 1;
            events.push(GameEvent::BrickHit);

            if !brick.hit() {
                return true;
            }
            if let Some(power_up) = brick.power_up.take() {
                events.push(GameEvent::PowerUpReleased(power_up.kind));
                power_ups.push(power_up);
            }
            false
        });
    }

    // Falling power-ups
    let mut caught = Vec::new();
    for mut power_up in std::mem::take(&mut state.power_ups) {
        power_up.fall();
        if power_up.rect.intersects(&state.paddle.rect) {
            caught.push(power_up.kind);
        } else if power_up.rect.top() < FIELD_HEIGHT {
            state.power_ups.push(power_up);
        }
    }
    for kind in caught {
        apply_power_up(state, kind);
        events.push(GameEvent::PowerUpCaught(kind));
    }

    state.balls.retain(|ball| ball.rect.top() < FIELD_HEIGHT);

    if state.balls.is_empty() {
        events.push(GameEvent::AllBallsLost);
    } else if state.bricks.is_empty() {
        events.push(GameEvent::LevelCleared);
    }

    events
}

/// Apply the effect of a caught power-up
pub fn apply_power_up(state: &mut Session, kind: PowerUpKind) {
    log::debug!("Power-up caught: {:?}", kind);
    match kind {
        PowerUpKind::Expand => state.paddle.expand(),
        PowerUpKind::ExtraBall => {
            let ball = state.ball_from_paddle();
            state.balls.push(ball);
        }
        PowerUpKind::AdditionalBricks => {
            let bonus = spawn::bonus_bricks(BONUS_BRICK_COUNT, &state.bricks, &mut state.rng);
            state.bricks.extend(bonus);
        }
        PowerUpKind::RemoveBalls => {
            if state.balls.len() > 1 {
                keep_highest_ball(&mut state.balls);
            } else {
                let color = state.level_color();
                let extra = spawn::additional_bricks(
                    ALTERNATE_BRICK_COUNT,
                    &state.bricks,
                    color,
                    &mut state.rng,
                );
                state.bricks.extend(extra);
            }
            state.paddle.reset_size_for_difficulty(state.difficulty);
        }
        PowerUpKind::Shooting => state.paddle.enable_shooting(),
    }
}

/// Keep only the ball closest to the top of the field (the first one on ties)
pub fn keep_highest_ball(balls: &mut Vec<Ball>) {
    let highest = balls
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.rect.top().total_cmp(&b.rect.top()))
        .map(|(idx, _)| idx);

    if let Some(idx) = highest {
        let ball = balls.swap_remove(idx);
        balls.clear();
        balls.push(ball);
    }
}

/// Fire a ball from the paddle if shots remain. Returns true when fired.
pub fn fire_shot(state: &mut Session) -> bool {
    if !state.paddle.take_shot() {
        return false;
    }
    let ball = state.ball_from_paddle();
    state.balls.push(ball);
    true
}

/// Pick held directions for demo play: chase the lowest falling ball, or the
/// nearest power-up when nothing is coming down.
fn autopilot_steer(state: &Session) -> (bool, bool) {
    let paddle = &state.paddle.rect;

    let falling_ball = state
        .balls
        .iter()
        .filter(|b| !b.attached && b.vel.y > 0.0)
        .max_by(|a, b| a.rect.bottom().total_cmp(&b.rect.bottom()));
    let nearest_pickup = state
        .power_ups
        .iter()
        .max_by(|a, b| a.rect.bottom().total_cmp(&b.rect.bottom()));

    let target = if let Some(ball) = falling_ball {
        // Aim off-center so the rebound is never perfectly vertical
        let side = if state.score % 2 == 0 { 0.3 } else { -0.3 };
        ball.rect.center_x() - side * paddle.width()
    } else if let Some(power_up) = nearest_pickup {
        power_up.rect.center_x()
    } else {
        return (false, false);
    };

    let dead_zone = state.paddle.current_speed;
    let offset = target - paddle.center_x();
    (offset < -dead_zone, offset > dead_zone)
}
