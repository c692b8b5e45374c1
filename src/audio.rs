//! Audio capability
//!
//! Widgets only name the sound they want played; mixing, decoding and volume
//! curves belong to whatever [`AudioSink`] the platform provides.

use std::path::{Path, PathBuf};

/// A sound effect identified by its asset path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SoundCue(PathBuf);

impl SoundCue {
    /// Resolves a sound asset, returning `None` (with a warning) when the file
    /// is missing so the owner can simply go without the effect.
    pub fn resolve(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        if path.exists() {
            Some(SoundCue(path.to_path_buf()))
        } else {
            tracing::warn!("Sound asset {:?} not found, effect disabled", path);
            None
        }
    }

    /// Wraps a path without checking it exists
    pub fn unchecked(path: impl Into<PathBuf>) -> Self {
        SoundCue(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

pub trait AudioSink {
    /// Plays a one-shot effect at `volume` percent (0-100)
    fn play_sound(&mut self, cue: &SoundCue, volume: u8);

    /// Starts or stops background music at `volume` percent (0-100)
    fn set_music(&mut self, enabled: bool, volume: u8);
}

/// Sink used when no mixer is available; requests are only traced
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play_sound(&mut self, cue: &SoundCue, volume: u8) {
        tracing::trace!("play {:?} at {}%", cue.path(), volume);
    }

    fn set_music(&mut self, enabled: bool, volume: u8) {
        tracing::debug!("music enabled={} volume={}%", enabled, volume);
    }
}
