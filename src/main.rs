//! Brick Breaker entry point
//!
//! Runs a headless demo: the autopilot plays one normal-difficulty session
//! at the fixed tick rate while every frame is composed into a draw list.

#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

#[cfg(not(target_arch = "wasm32"))]
use brick_breaker::{
    Game, GamePhase, ScoreFile, Settings,
    audio::LogAudio,
    consts::*,
    format_time,
    input::{InputQueue, Key, KeyEvent},
    renderer::{DrawList, scene},
    settings::SETTINGS_FILE,
};

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Brick Breaker (headless demo) starting...");

    let settings = Settings::load(Path::new(SETTINGS_FILE));
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Seed: {}", seed);

    let mut game = Game::new(
        seed,
        Box::new(LogAudio::from_settings(&settings)),
        Box::new(ScoreFile::new(&settings.scores_path)),
    );
    game.set_autopilot(true);

    let mut input = InputQueue::new();
    input.push(KeyEvent::Down(Key::Char('2')));
    input.push(KeyEvent::Down(Key::Enter));

    let mut canvas = DrawList::new();
    let mut frames = 0;
    while frames < settings.demo_ticks {
        for event in input.drain() {
            game.handle_key(event);
        }

        game.update(SIM_DT);
        canvas.clear();
        scene::draw(&game, &mut canvas);
        frames += 1;

        if frames % TICKS_PER_SECOND == 0 {
            log::debug!("Frame {}: {} draw commands", frames, canvas.len());
        }

        match game.phase() {
            GamePhase::LevelComplete => input.push(KeyEvent::Down(Key::Enter)),
            GamePhase::GameOver => break,
            _ => {}
        }
    }

    match game.session() {
        Some(session) => log::info!(
            "Demo finished after {} frames in {:?}: score {}, levels cleared {}, play time {}",
            frames,
            game.phase(),
            session.score,
            session.level,
            format_time(game.elapsed())
        ),
        None => log::info!("Demo finished after {} frames", frames),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Headless demo is native only
}
