//! Brick layout and random placement
//!
//! The main grid is deterministic apart from per-brick coin flips. Bonus and
//! additional bricks are scattered in the lower field without overlapping
//! anything already there.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::palette::{BONUS_BRICK_COLOR, BRICK_PALETTE, Color};
use super::state::{Brick, PowerUpKind};
use crate::consts::*;

/// Roll for a power-up.
///
/// Each kind gets its own independent roll, checked in a fixed order, and the
/// first success wins. Later kinds therefore land less often than their
/// nominal chance (shooting only rolls once the other four have failed).
pub fn roll_power_up(rng: &mut impl Rng) -> Option<PowerUpKind> {
    const ROLLS: [(PowerUpKind, f64); 5] = [
        (PowerUpKind::Expand, EXPAND_CHANCE),
        (PowerUpKind::ExtraBall, EXTRA_BALL_CHANCE),
        (PowerUpKind::AdditionalBricks, ADDITIONAL_BRICKS_CHANCE),
        (PowerUpKind::RemoveBalls, REMOVE_BALLS_CHANCE),
        (PowerUpKind::Shooting, SHOOTING_CHANCE),
    ];

    ROLLS
        .iter()
        .find(|(_, chance)| rng.random::<f64>() < *chance)
        .map(|(kind, _)| *kind)
}

/// Full brick grid for a level in a single color
pub fn brick_grid(color: Color, rng: &mut impl Rng) -> Vec<Brick> {
    let mut bricks = Vec::with_capacity(BRICK_ROWS * BRICK_COLUMNS);
    for row in 0..BRICK_ROWS {
        for col in 0..BRICK_COLUMNS {
            let x = col as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_PADDING;
            let y = row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_PADDING;
            let requires_two_hits = rng.random_bool(0.5);
            let brick = Brick::new(Vec2::new(x, y), color, requires_two_hits)
                .with_power_up(roll_power_up(rng));
            bricks.push(brick);
        }
    }
    bricks
}

/// Top of the region below the main grid where extra bricks may appear
pub fn lower_field_top() -> f32 {
    BRICK_ROWS as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_PADDING
}

/// Scatter up to `count` bricks in the lower field.
///
/// Candidates that overlap an existing brick or one accepted earlier in this
/// call are rejected. Gives up after [`SPAWN_ATTEMPTS`] candidates, so a
/// crowded field yields fewer bricks than asked for.
pub fn place_non_overlapping<R: Rng>(
    count: usize,
    existing: &[Brick],
    rng: &mut R,
    mut make: impl FnMut(Vec2, &mut R) -> Brick,
) -> Vec<Brick> {
    let min_y = lower_field_top() as i32;
    let max_y = (FIELD_HEIGHT - BRICK_HEIGHT) as i32;
    let max_x = (FIELD_WIDTH - BRICK_WIDTH) as i32;

    let mut placed: Vec<Brick> = Vec::with_capacity(count);
    let mut attempts = 0;
    while placed.len() < count && attempts < SPAWN_ATTEMPTS {
        attempts += 1;
        let x = rng.random_range(0..=max_x) as f32;
        let y = rng.random_range(min_y..=max_y) as f32;
        let candidate = make(Vec2::new(x, y), &mut *rng);

        let overlaps = existing
            .iter()
            .chain(placed.iter())
            .any(|brick| candidate.rect.intersects(&brick.rect));
        if !overlaps {
            placed.push(candidate);
        }
    }

    if placed.len() < count {
        log::debug!(
            "Placed {} of {} bricks after {} attempts",
            placed.len(),
            count,
            attempts
        );
    }
    placed
}

/// Flashing two-hit bonus bricks
pub fn bonus_bricks(count: usize, existing: &[Brick], rng: &mut impl Rng) -> Vec<Brick> {
    place_non_overlapping(count, existing, rng, |pos, rng| {
        Brick::new(pos, BONUS_BRICK_COLOR, true)
            .flashing()
            .with_power_up(roll_power_up(rng))
    })
}

/// One-hit bricks in a palette color other than the current level's
pub fn additional_bricks(
    count: usize,
    existing: &[Brick],
    level_color: Color,
    rng: &mut impl Rng,
) -> Vec<Brick> {
    let others: Vec<Color> = BRICK_PALETTE
        .iter()
        .copied()
        .filter(|c| *c != level_color)
        .collect();
    let color = others.choose(rng).copied().unwrap_or(level_color);

    place_non_overlapping(count, existing, rng, |pos, rng| {
        Brick::new(pos, color, false).with_power_up(roll_power_up(rng))
    })
}
