//! Audio components
//!
//! Data only. Playback is performed by an external audio back-end that reads
//! these components; fade bookkeeping is advanced with [`MusicComponent::advance_fade`].

use serde::{Deserialize, Serialize};

const fn default_volume() -> f32 {
    1.0
}

const fn default_true() -> bool {
    true
}

const fn default_fade_duration() -> f32 {
    2.0
}

/// Direction of an in-progress fade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fade {
    /// Volume is steady
    #[default]
    None,
    /// Ramping up towards the base volume
    In,
    /// Ramping down towards silence
    Out,
}

/// Background music track
///
/// Scene payloads carry the settings only; a loaded track starts at its base
/// volume with no fade in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MusicPayload")]
pub struct MusicComponent {
    /// Handle of the audio buffer
    pub music_handle: String,

    /// Target volume, `0.0..=1.0`
    pub base_volume: f32,

    /// Restart when the track ends
    pub looping: bool,

    /// Start playing as soon as the component is attached
    pub auto_play: bool,

    /// Fade length in seconds
    pub fade_duration: f32,

    /// Effective volume including fades
    #[serde(skip)]
    pub current_volume: f32,

    /// In-progress fade
    #[serde(skip)]
    pub fade: Fade,

    /// Seconds into the current fade
    #[serde(skip)]
    pub fade_timer: f32,
}

#[derive(Deserialize)]
struct MusicPayload {
    music_handle: String,
    #[serde(default = "default_volume")]
    base_volume: f32,
    #[serde(default = "default_true")]
    looping: bool,
    #[serde(default = "default_true")]
    auto_play: bool,
    #[serde(default = "default_fade_duration")]
    fade_duration: f32,
}

impl From<MusicPayload> for MusicComponent {
    fn from(payload: MusicPayload) -> Self {
        Self {
            music_handle: payload.music_handle,
            base_volume: payload.base_volume,
            looping: payload.looping,
            auto_play: payload.auto_play,
            fade_duration: payload.fade_duration,
            current_volume: payload.base_volume,
            fade: Fade::None,
            fade_timer: 0.0,
        }
    }
}

impl MusicComponent {
    /// Looping, auto-playing track at full volume
    pub fn new(music_handle: impl Into<String>) -> Self {
        Self {
            music_handle: music_handle.into(),
            base_volume: 1.0,
            looping: true,
            auto_play: true,
            fade_duration: default_fade_duration(),
            current_volume: 1.0,
            fade: Fade::None,
            fade_timer: 0.0,
        }
    }

    /// Begin fading in from silence
    pub fn start_fade_in(&mut self) {
        self.fade = Fade::In;
        self.fade_timer = 0.0;
        self.current_volume = 0.0;
    }

    /// Begin fading out from the current volume
    pub fn start_fade_out(&mut self) {
        self.fade = Fade::Out;
        self.fade_timer = 0.0;
    }

    /// Cancel any fade and snap to the base volume
    pub fn stop_fade(&mut self) {
        self.fade = Fade::None;
        self.fade_timer = 0.0;
        self.current_volume = self.base_volume;
    }

    /// Advance the fade by `delta_time` seconds and update `current_volume`.
    ///
    /// Returns `true` when a fade completed during this call.
    pub fn advance_fade(&mut self, delta_time: f32) -> bool {
        if self.fade == Fade::None {
            return false;
        }
        self.fade_timer += delta_time;
        let progress = if self.fade_duration > 0.0 {
            (self.fade_timer / self.fade_duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.current_volume = match self.fade {
            Fade::In => self.base_volume * progress,
            Fade::Out => self.base_volume * (1.0 - progress),
            Fade::None => self.current_volume,
        };
        if progress >= 1.0 {
            self.fade = Fade::None;
            self.fade_timer = 0.0;
            true
        } else {
            false
        }
    }
}

/// One-shot sound effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundEffectComponent {
    /// Handle of the audio buffer
    pub sound_handle: String,

    /// Game-defined category used for per-category volume
    #[serde(default)]
    pub category: String,

    /// Playback volume, `0.0..=1.0`
    #[serde(default = "default_volume")]
    pub volume: f32,

    /// Pitch multiplier
    #[serde(default = "default_volume")]
    pub pitch: f32,

    /// Play as soon as the component is attached
    #[serde(default = "default_true")]
    pub auto_play: bool,

    /// Detach the component once played
    #[serde(default = "default_true")]
    pub remove_after_play: bool,

    /// Set by the audio back-end once playback was requested
    #[serde(skip)]
    pub triggered: bool,
}

impl SoundEffectComponent {
    /// Sound effect with default volume and pitch
    pub fn new(sound_handle: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            sound_handle: sound_handle.into(),
            category: category.into(),
            volume: 1.0,
            pitch: 1.0,
            auto_play: true,
            remove_after_play: true,
            triggered: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fade_in_reaches_base_volume() {
        let mut music = MusicComponent::new("theme");
        music.base_volume = 0.8;
        music.fade_duration = 1.0;
        music.start_fade_in();

        assert!(!music.advance_fade(0.5));
        assert_relative_eq!(music.current_volume, 0.4);
        assert!(music.advance_fade(0.5));
        assert_relative_eq!(music.current_volume, 0.8);
        assert_eq!(music.fade, Fade::None);
    }

    #[test]
    fn test_fade_out_reaches_silence() {
        let mut music = MusicComponent::new("theme");
        music.fade_duration = 0.0;
        music.start_fade_out();
        assert!(music.advance_fade(0.016));
        assert_relative_eq!(music.current_volume, 0.0);
    }

    #[test]
    fn test_loaded_track_starts_at_base_volume() {
        let music: MusicComponent =
            serde_json::from_value(serde_json::json!({"music_handle": "menu_theme", "base_volume": 0.6}))
                .expect("music payload");

        assert_eq!(music.fade, Fade::None);
        assert_relative_eq!(music.current_volume, 0.6);
        assert!(music.looping);
        assert_relative_eq!(music.fade_duration, 2.0);
    }
}
