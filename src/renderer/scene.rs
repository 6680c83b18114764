//! Frame composition
//!
//! Turns the current [`Game`] into canvas primitives, one screen per phase.

use std::time::Duration;

use glam::Vec2;

use super::Canvas;
use crate::consts::*;
use crate::format_time;
use crate::game::{Game, GamePhase};
use crate::sim::{Ball, Brick, Color, Paddle, PowerUp, Rect, Session};

/// Banner text size
pub const TITLE_SIZE: f32 = 74.0;
/// Prompt and table text size
pub const TEXT_SIZE: f32 = 36.0;

/// Width of the white caps on each end of the paddle
const PADDLE_TIP_WIDTH: f32 = 5.0;
const TEXT_FLASH_INTERVAL: Duration = Duration::from_millis(500);
/// Vertical gap between high score rows
const SCORE_ROW_HEIGHT: f32 = 25.0;

/// Pick between two colors, switching every [`TEXT_FLASH_INTERVAL`]
fn flash(clock: Duration, colors: [Color; 2]) -> Color {
    let step = clock.as_millis() / TEXT_FLASH_INTERVAL.as_millis();
    colors[(step % 2) as usize]
}

fn center_x() -> f32 {
    FIELD_WIDTH / 2.0
}

/// Anchor `lines` text rows below the middle of the field
fn below_middle(lines: f32) -> Vec2 {
    Vec2::new(center_x(), FIELD_HEIGHT / 2.0 + lines * TEXT_SIZE)
}

/// Draw one frame
pub fn draw(game: &Game, canvas: &mut impl Canvas) {
    canvas.fill_rect(Rect::new(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT), Color::Black);

    match game.phase() {
        GamePhase::ChoosingDifficulty | GamePhase::WaitingToStart => splash(game, canvas),
        GamePhase::Playing | GamePhase::Paused | GamePhase::LevelComplete => {
            if let Some(session) = game.session() {
                field(session, canvas);
            }
            match game.phase() {
                GamePhase::Paused => canvas.text(
                    "- PAUSED -",
                    Vec2::new(center_x(), FIELD_HEIGHT / 2.0),
                    TITLE_SIZE,
                    Color::Blue,
                ),
                GamePhase::LevelComplete => level_complete(game, canvas),
                _ => {}
            }
        }
        GamePhase::GameOver => game_over(game, canvas),
        GamePhase::ScoreEntry => {
            canvas.text(
                &format!("Enter your initials: {}", game.initials()),
                Vec2::new(center_x(), FIELD_HEIGHT / 2.0),
                TEXT_SIZE,
                Color::White,
            );
        }
    }
}

fn splash(game: &Game, canvas: &mut impl Canvas) {
    let prompt_color = flash(game.clock(), [Color::White, Color::Red]);
    let prompt_at = Vec2::new(center_x(), FIELD_HEIGHT - 475.0);

    if game.phase() == GamePhase::ChoosingDifficulty {
        canvas.text("Choose Difficulty: 1 - 3", prompt_at, TEXT_SIZE, prompt_color);
        return;
    }

    canvas.text("Press Enter to Start", prompt_at, TEXT_SIZE, prompt_color);

    let table_color = flash(game.clock(), [Color::Red, Color::White]);
    canvas.text(
        "- High Scores -",
        Vec2::new(center_x(), FIELD_HEIGHT - 425.0),
        TEXT_SIZE,
        table_color,
    );
    for (i, entry) in game.high_scores().iter().enumerate() {
        let line = format!(
            "{}. {} - {} - {}",
            i + 1,
            entry.initials,
            entry.score,
            entry.total_time
        );
        let y = FIELD_HEIGHT - 400.0 + i as f32 * SCORE_ROW_HEIGHT;
        canvas.text(&line, Vec2::new(center_x(), y), TEXT_SIZE, table_color);
    }
}

/// Paddle, balls, bricks and falling power-ups
fn field(session: &Session, canvas: &mut impl Canvas) {
    paddle(&session.paddle, session.score, canvas);
    for b in &session.balls {
        ball(b, canvas);
    }
    for b in &session.bricks {
        brick(b, canvas);
    }
    for p in &session.power_ups {
        power_up(p, canvas);
    }
}

fn paddle(paddle: &Paddle, score: u32, canvas: &mut impl Canvas) {
    let rect = paddle.rect;
    canvas.fill_rect(rect, Color::Blue);
    canvas.text(&score.to_string(), rect.center(), TEXT_SIZE, Color::White);

    let tip = |x: f32| Rect::new(x, rect.top(), PADDLE_TIP_WIDTH, rect.height());
    canvas.fill_rect(tip(rect.left()), Color::White);
    canvas.fill_rect(tip(rect.right() - PADDLE_TIP_WIDTH), Color::White);
}

fn ball(ball: &Ball, canvas: &mut impl Canvas) {
    canvas.fill_circle(ball.rect.center(), BALL_RADIUS, Color::Red);
}

fn brick(brick: &Brick, canvas: &mut impl Canvas) {
    canvas.fill_rect(brick.rect, brick.color);
}

fn power_up(power_up: &PowerUp, canvas: &mut impl Canvas) {
    canvas.fill_rect(power_up.rect, power_up.kind.color());
}

fn level_complete(game: &Game, canvas: &mut impl Canvas) {
    let level = game.session().map_or(0, |s| s.level);
    canvas.text(
        &format!("Level {level} Complete!"),
        Vec2::new(center_x(), FIELD_HEIGHT / 2.0),
        TITLE_SIZE,
        Color::White,
    );
    canvas.text(
        "Press Enter to Start Next Level",
        below_middle(1.0),
        TEXT_SIZE,
        Color::White,
    );
    canvas.text(
        &format!("Total Time: {}", format_time(game.elapsed())),
        below_middle(2.0),
        TEXT_SIZE,
        Color::White,
    );
}

fn game_over(game: &Game, canvas: &mut impl Canvas) {
    let score = game.session().map_or(0, |s| s.score);
    canvas.text(
        "Game Over",
        Vec2::new(center_x(), FIELD_HEIGHT / 2.0),
        TITLE_SIZE,
        Color::Red,
    );
    canvas.text(
        &format!("Score: {score}"),
        below_middle(1.0),
        TEXT_SIZE,
        Color::White,
    );
    canvas.text(
        &format!("Time: {}", format_time(game.elapsed())),
        below_middle(2.0),
        TEXT_SIZE,
        Color::White,
    );
    canvas.text("Save score? (Y/N)", below_middle(3.0), TEXT_SIZE, Color::White);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::LogAudio;
    use crate::highscores::{HighScores, ScoreRecord};
    use crate::input::{Key, KeyEvent};
    use crate::renderer::{DrawCommand, DrawList};
    use crate::sim::{Difficulty, PowerUpKind};

    fn game_with_scores(scores: HighScores) -> Game {
        Game::new(3, Box::new(LogAudio::default()), Box::new(scores))
    }

    fn press(game: &mut Game, key: Key) {
        game.handle_key(KeyEvent::Down(key));
    }

    fn frame(game: &Game) -> DrawList {
        let mut list = DrawList::new();
        draw(game, &mut list);
        list
    }

    fn text_color(list: &DrawList, wanted: &str) -> Color {
        match list.find_text(wanted) {
            Some(DrawCommand::Text { color, .. }) => *color,
            other => panic!("expected text {wanted:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_splash_prompt_flashes() {
        let mut game = game_with_scores(HighScores::new());
        let list = frame(&game);
        assert_eq!(text_color(&list, "Choose Difficulty: 1 - 3"), Color::White);

        game.update(Duration::from_millis(500));
        let list = frame(&game);
        assert_eq!(text_color(&list, "Choose Difficulty: 1 - 3"), Color::Red);

        game.update(Duration::from_millis(500));
        let list = frame(&game);
        assert_eq!(text_color(&list, "Choose Difficulty: 1 - 3"), Color::White);
    }

    #[test]
    fn test_high_score_table() {
        let mut scores = HighScores::new();
        scores.push(ScoreRecord::new("AB", 5, Duration::from_secs(70), Difficulty::Normal));
        scores.push(ScoreRecord::new("CD", 9, Duration::from_secs(3), Difficulty::Normal));
        scores.push(ScoreRecord::new("EF", 99, Duration::from_secs(3), Difficulty::Easy));
        let mut game = game_with_scores(scores);
        press(&mut game, Key::Char('2'));

        let list = frame(&game);
        let texts: Vec<_> = list.texts().collect();
        assert_eq!(
            texts,
            [
                "Press Enter to Start",
                "- High Scores -",
                "1. CD - 9 - 0 min 3 sec",
                "2. AB - 5 - 1 min 10 sec",
            ]
        );
    }

    #[test]
    fn test_playing_field() {
        let mut game = game_with_scores(HighScores::new());
        press(&mut game, Key::Char('2'));
        press(&mut game, Key::Enter);
        {
            let session = game.session_mut().unwrap();
            session.score = 42;
            session
                .power_ups
                .push(PowerUp::new(PowerUpKind::Shooting, Vec2::new(120.0, 400.0)));
        }

        let list = frame(&game);
        let session = game.session().unwrap();
        let paddle = session.paddle.rect;
        let cmds = list.commands();

        // Background, paddle body, score, two tips
        assert_eq!(
            cmds[1],
            DrawCommand::Rect {
                rect: paddle,
                color: Color::Blue
            }
        );
        assert_eq!(
            cmds[2],
            DrawCommand::Text {
                content: "42".to_string(),
                anchor: paddle.center(),
                size: TEXT_SIZE,
                color: Color::White
            }
        );
        assert_eq!(
            cmds[3],
            DrawCommand::Rect {
                rect: Rect::new(paddle.left(), paddle.top(), 5.0, paddle.height()),
                color: Color::White
            }
        );
        assert_eq!(
            cmds[4],
            DrawCommand::Rect {
                rect: Rect::new(paddle.right() - 5.0, paddle.top(), 5.0, paddle.height()),
                color: Color::White
            }
        );

        assert_eq!(list.circle_count(), 1);
        let brick_rects = cmds
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { color, .. } if *color == session.level_color()))
            .count();
        assert_eq!(brick_rects, session.bricks.len());
        assert_eq!(
            cmds.last(),
            Some(&DrawCommand::Rect {
                rect: session.power_ups[0].rect,
                color: Color::Black
            })
        );
    }

    #[test]
    fn test_pause_banner() {
        let mut game = game_with_scores(HighScores::new());
        press(&mut game, Key::Char('1'));
        press(&mut game, Key::Enter);
        assert!(frame(&game).find_text("- PAUSED -").is_none());

        press(&mut game, Key::Char('p'));
        let list = frame(&game);
        assert_eq!(text_color(&list, "- PAUSED -"), Color::Blue);
        assert_eq!(list.circle_count(), 1);
    }

    #[test]
    fn test_level_complete_banner() {
        let mut game = game_with_scores(HighScores::new());
        press(&mut game, Key::Char('2'));
        press(&mut game, Key::Enter);
        game.session_mut().unwrap().bricks.clear();
        game.update(SIM_DT);
        assert_eq!(game.phase(), GamePhase::LevelComplete);

        let list = frame(&game);
        assert!(list.find_text("Level 1 Complete!").is_some());
        assert!(list.find_text("Press Enter to Start Next Level").is_some());
        assert!(list.find_text("Total Time: 0 min 0 sec").is_some());
    }

    #[test]
    fn test_game_over_and_initials() {
        let mut game = game_with_scores(HighScores::new());
        press(&mut game, Key::Char('3'));
        press(&mut game, Key::Enter);
        {
            let session = game.session_mut().unwrap();
            session.score = 8;
            session.balls[0].rect.pos.y = FIELD_HEIGHT;
            session.balls[0].vel = Vec2::new(0.0, 5.0);
        }
        game.update(SIM_DT);
        assert_eq!(game.phase(), GamePhase::GameOver);

        let list = frame(&game);
        let texts: Vec<_> = list.texts().collect();
        assert_eq!(
            texts,
            ["Game Over", "Score: 8", "Time: 0 min 0 sec", "Save score? (Y/N)"]
        );
        assert_eq!(text_color(&list, "Game Over"), Color::Red);

        press(&mut game, Key::Char('y'));
        press(&mut game, Key::Char('J'));
        press(&mut game, Key::Char('D'));
        let list = frame(&game);
        assert_eq!(list.texts().collect::<Vec<_>>(), ["Enter your initials: JD"]);
    }
}
