//! Audio requests
//!
//! The game only asks for sounds; a sink decides what playing them means.
//! [`LogAudio`] logs each request, which is all the headless build needs.

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits a brick
    BrickHit,
    /// Ball hits the paddle
    PaddleHit,
    /// A brick released a power-up
    Bonus,
}

/// Music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    /// Splash screen loop
    Splash,
    /// Played once when the last ball is lost
    GameOver,
}

/// Receiver for audio requests
pub trait AudioSink {
    fn play_effect(&mut self, effect: SoundEffect);

    /// Start a track, replacing whatever is playing
    fn play_music(&mut self, track: MusicTrack, looping: bool);

    fn stop_music(&mut self);
}

/// Audio sink that logs requests instead of producing sound
#[derive(Debug, Clone)]
pub struct LogAudio {
    sfx_volume: f32,
    music_volume: f32,
    current: Option<MusicTrack>,
}

impl Default for LogAudio {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl LogAudio {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
            current: None,
        }
    }

    /// Track currently playing, if any
    pub fn current_track(&self) -> Option<MusicTrack> {
        self.current
    }
}

impl AudioSink for LogAudio {
    fn play_effect(&mut self, effect: SoundEffect) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        log::debug!("sfx {:?} at volume {:.2}", effect, self.sfx_volume);
    }

    fn play_music(&mut self, track: MusicTrack, looping: bool) {
        self.current = Some(track);
        if self.music_volume <= 0.0 {
            return;
        }
        log::debug!(
            "music {:?} (looping: {}) at volume {:.2}",
            track,
            looping,
            self.music_volume
        );
    }

    fn stop_music(&mut self) {
        if let Some(track) = self.current.take() {
            log::debug!("music {:?} stopped", track);
        }
    }
}
