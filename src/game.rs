//! Top-level game flow
//!
//! [`Game`] owns the current [`Session`] and moves between the splash screen,
//! play, pause, level transitions, the save prompt and initials entry. Front
//! ends feed it key events and call [`Game::update`] once per frame.

use std::time::Duration;

use crate::audio::{AudioSink, MusicTrack, SoundEffect};
use crate::highscores::{ScoreLedger, ScoreRecord};
use crate::input::{Key, KeyEvent};
use crate::sim::{Difficulty, GameEvent, Session, TickInput, fire_shot, tick};

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Splash screen, waiting for a difficulty digit
    ChoosingDifficulty,
    /// Difficulty chosen, high scores shown, ball on the paddle
    WaitingToStart,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Every brick destroyed, waiting to start the next level
    LevelComplete,
    /// Last ball lost, asking whether to save the score
    GameOver,
    /// Typing initials for the saved score
    ScoreEntry,
}

/// Play time for a session, accumulated only while playing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayTimer {
    banked: Duration,
    lap: Duration,
    running: bool,
}

impl PlayTimer {
    /// Begin a new lap
    pub fn start(&mut self) {
        self.lap = Duration::ZERO;
        self.running = true;
    }

    /// End the current lap and add it to the total
    pub fn stop(&mut self) {
        self.banked += self.lap;
        self.lap = Duration::ZERO;
        self.running = false;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn advance(&mut self, dt: Duration) {
        if self.running {
            self.lap += dt;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Banked time plus the lap in progress
    pub fn total(&self) -> Duration {
        self.banked + self.lap
    }
}

/// The whole game: phase, session, timer and collaborators
pub struct Game {
    phase: GamePhase,
    session: Option<Session>,
    timer: PlayTimer,
    held_left: bool,
    held_right: bool,
    autopilot: bool,
    /// Top-10 table for the chosen difficulty
    high_scores: Vec<ScoreRecord>,
    initials: String,
    /// Wall-clock time since the game was created, drives flashing text
    clock: Duration,
    next_seed: u64,
    audio: Box<dyn AudioSink>,
    ledger: Box<dyn ScoreLedger>,
}

impl Game {
    /// Create a game on the splash screen. Sessions are seeded from `seed`,
    /// incrementing for each new one.
    pub fn new(seed: u64, mut audio: Box<dyn AudioSink>, ledger: Box<dyn ScoreLedger>) -> Self {
        audio.play_music(MusicTrack::Splash, true);
        Self {
            phase: GamePhase::ChoosingDifficulty,
            session: None,
            timer: PlayTimer::default(),
            held_left: false,
            held_right: false,
            autopilot: false,
            high_scores: Vec::new(),
            initials: String::new(),
            clock: Duration::ZERO,
            next_seed: seed,
            audio,
            ledger,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.session.as_ref().map(|s| s.difficulty)
    }

    /// Total play time of the current session
    pub fn elapsed(&self) -> Duration {
        self.timer.total()
    }

    pub fn timer(&self) -> &PlayTimer {
        &self.timer
    }

    pub fn high_scores(&self) -> &[ScoreRecord] {
        &self.high_scores
    }

    pub fn initials(&self) -> &str {
        &self.initials
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
        log::info!("Autopilot: {}", enabled);
    }

    /// React to a key press or release
    pub fn handle_key(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Down(key) => self.key_down(key),
            KeyEvent::Up(key) => self.key_up(key),
        }
    }

    fn key_down(&mut self, key: Key) {
        if self.phase == GamePhase::ScoreEntry {
            self.edit_initials(key);
            return;
        }

        match key {
            Key::Left => self.held_left = true,
            Key::Right => self.held_right = true,
            _ => {}
        }

        match self.phase {
            GamePhase::ChoosingDifficulty => {
                if let Some(difficulty) = key.difficulty_tier().and_then(Difficulty::from_tier) {
                    self.start_session(difficulty);
                }
            }
            GamePhase::WaitingToStart if key == Key::Enter => self.begin_play(),
            GamePhase::Playing if key.is_letter('p') => {
                self.timer.pause();
                self.set_phase(GamePhase::Paused);
            }
            GamePhase::Playing if key == Key::Space => {
                if let Some(session) = self.session.as_mut() {
                    if fire_shot(session) {
                        log::debug!("Shot fired, {} left", session.paddle.shots_remaining);
                    }
                }
            }
            GamePhase::Paused if key.is_letter('p') => {
                self.timer.resume();
                self.set_phase(GamePhase::Playing);
            }
            GamePhase::LevelComplete if key == Key::Enter => self.next_level(),
            GamePhase::GameOver if key.is_letter('y') => {
                self.initials.clear();
                self.set_phase(GamePhase::ScoreEntry);
            }
            GamePhase::GameOver if key.is_letter('n') => self.return_to_splash(),
            _ => {}
        }
    }

    fn key_up(&mut self, key: Key) {
        let released = match key {
            Key::Left => &mut self.held_left,
            Key::Right => &mut self.held_right,
            _ => return,
        };
        *released = false;
        if let Some(session) = self.session.as_mut() {
            session.paddle.reset_speed();
        }
    }

    fn edit_initials(&mut self, key: Key) {
        match key {
            Key::Char(c) => self.initials.push(c),
            Key::Backspace => {
                self.initials.pop();
            }
            Key::Enter => self.save_score(),
            _ => {}
        }
    }

    fn start_session(&mut self, difficulty: Difficulty) {
        let seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_add(1);
        log::info!("New session: {:?} (seed {})", difficulty, seed);

        self.session = Some(Session::new(difficulty, seed));
        self.high_scores = self.ledger.top_ten(difficulty);
        self.timer = PlayTimer::default();
        self.set_phase(GamePhase::WaitingToStart);
    }

    fn begin_play(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.launch_balls();
        }
        self.held_left = false;
        self.held_right = false;
        self.audio.stop_music();
        self.timer.start();
        self.set_phase(GamePhase::Playing);
    }

    fn next_level(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.start_next_level();
        }
        self.timer.start();
        self.set_phase(GamePhase::Playing);
    }

    fn save_score(&mut self) {
        if let Some(session) = &self.session {
            let result = self.ledger.append(
                &self.initials,
                session.score,
                self.timer.total(),
                session.difficulty,
            );
            match result {
                Ok(()) => log::info!("Saved score {} for {:?}", session.score, self.initials),
                Err(e) => log::error!("Failed to save score: {e}"),
            }
        }
        self.return_to_splash();
    }

    fn return_to_splash(&mut self) {
        self.session = None;
        self.high_scores.clear();
        self.initials.clear();
        self.held_left = false;
        self.held_right = false;
        self.audio.play_music(MusicTrack::Splash, true);
        self.set_phase(GamePhase::ChoosingDifficulty);
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase: {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Advance one frame. Runs a simulation tick only while playing and
    /// returns what happened during it.
    pub fn update(&mut self, dt: Duration) -> Vec<GameEvent> {
        self.clock += dt;

        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        session.animate(dt);

        if self.phase != GamePhase::Playing {
            return Vec::new();
        }

        self.timer.advance(dt);
        let input = TickInput {
            left: self.held_left,
            right: self.held_right,
            autopilot: self.autopilot,
        };
        let events = tick(session, &input);

        let mut next_phase = None;
        for event in &events {
            match *event {
                GameEvent::BrickHit => self.audio.play_effect(SoundEffect::BrickHit),
                GameEvent::PaddleHit => self.audio.play_effect(SoundEffect::PaddleHit),
                GameEvent::PowerUpReleased(_) => self.audio.play_effect(SoundEffect::Bonus),
                GameEvent::PowerUpCaught(kind) => log::debug!("Applied {:?}", kind),
                GameEvent::AllBallsLost => {
                    self.timer.stop();
                    self.audio.play_music(MusicTrack::GameOver, false);
                    log::info!(
                        "Game over: score {} after {} levels",
                        session.score,
                        session.level
                    );
                    next_phase = Some(GamePhase::GameOver);
                }
                GameEvent::LevelCleared => {
                    self.timer.stop();
                    session.level += 1;
                    log::info!("Level {} complete, score {}", session.level, session.score);
                    next_phase = Some(GamePhase::LevelComplete);
                }
            }
        }

        if let Some(phase) = next_phase {
            self.set_phase(phase);
        }
        events
    }
}
