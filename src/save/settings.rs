//! Persistent user preferences
//!
//! Settings live in a small pretty-printed JSON file. Every setter writes the
//! file immediately so a crash never loses a change. A file that cannot be read or
//! parsed is moved aside (with a timestamp suffix) and replaced by defaults;
//! if even that fails the store keeps working in memory for the session.

use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Current settings file version
pub const CURRENT_SETTINGS_VERSION: u32 = 1;

/// Directory (under the platform config dir) and file name of the settings
pub const SETTINGS_DIR: &str = "fantasy_falls";
pub const SETTINGS_FILE: &str = "settings.json";

pub const MAX_VOLUME: u8 = 100;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported settings version: {0}")]
    InvalidVersion(u32),
}

/// The persisted preference record
///
/// Missing keys take their default, so older files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub version: u32,
    #[serde(deserialize_with = "volume_from_file")]
    pub music_volume: u8,
    #[serde(deserialize_with = "volume_from_file")]
    pub sfx_volume: u8,
    pub music_enabled: bool,
    pub fullscreen: bool,
    pub fps_display: bool,
}

/// Reads any integer volume and clamps it into 0-100
fn volume_from_file<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(0, MAX_VOLUME as i64) as u8)
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: CURRENT_SETTINGS_VERSION,
            music_volume: MAX_VOLUME,
            sfx_volume: MAX_VOLUME,
            music_enabled: true,
            fullscreen: false,
            fps_display: false,
        }
    }
}

impl Settings {
    fn clamped(mut self) -> Self {
        self.music_volume = self.music_volume.min(MAX_VOLUME);
        self.sfx_volume = self.sfx_volume.min(MAX_VOLUME);
        self
    }
}

pub struct SettingsStore {
    /// `None` once persistence has been given up (in-memory only)
    path: Option<PathBuf>,
    settings: Settings,
}

impl SettingsStore {
    /// Platform default location, e.g. `~/.config/fantasy_falls/settings.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    /// Opens (or creates) the settings file at `path`
    ///
    /// Never fails: unreadable or corrupt files fall back to defaults.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();

        let settings = match Self::load(&path) {
            Ok(Some(settings)) => {
                tracing::info!("Loaded settings from {}", path.display());
                return SettingsStore {
                    path: Some(path),
                    settings,
                };
            }
            Ok(None) => {
                tracing::info!("No settings file at {}, creating defaults", path.display());
                Settings::default()
            }
            Err(e) => {
                tracing::warn!("Settings file {} is invalid ({}), resetting", path.display(), e);
                Self::quarantine(&path);
                Settings::default()
            }
        };

        let mut store = SettingsStore {
            path: Some(path),
            settings,
        };
        if let Err(e) = store.save() {
            tracing::error!("Cannot write settings, changes will not persist: {}", e);
            store.path = None;
        }
        store
    }

    /// Opens the platform default location, or memory if there is none
    pub fn open_default() -> Self {
        match Self::default_path() {
            Some(path) => Self::open(path),
            None => {
                tracing::warn!("No config directory available, settings will not persist");
                Self::in_memory()
            }
        }
    }

    /// A store that never touches the disk
    pub fn in_memory() -> Self {
        SettingsStore {
            path: None,
            settings: Settings::default(),
        }
    }

    /// Reads settings from `path`; `Ok(None)` if the file does not exist
    pub fn load(path: &Path) -> Result<Option<Settings>, SettingsError> {
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;

        if settings.version > CURRENT_SETTINGS_VERSION {
            return Err(SettingsError::InvalidVersion(settings.version));
        }

        Ok(Some(settings.clamped()))
    }

    /// Writes the current settings (no-op for in-memory stores)
    pub fn save(&self) -> Result<(), SettingsError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.settings)?;
        fs::write(path, json)?;
        tracing::debug!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Moves a bad file out of the way so it can be inspected later
    fn quarantine(path: &Path) {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let mut aside = path.as_os_str().to_owned();
        aside.push(format!(".corrupt-{}", timestamp));
        let aside = PathBuf::from(aside);

        match fs::rename(path, &aside) {
            Ok(()) => tracing::warn!("Kept invalid settings as {}", aside.display()),
            Err(e) => tracing::warn!("Could not move invalid settings aside: {}", e),
        }
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            tracing::warn!("Failed to save settings: {}", e);
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_persistent(&self) -> bool {
        self.path.is_some()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn music_volume(&self) -> u8 {
        self.settings.music_volume
    }

    pub fn sfx_volume(&self) -> u8 {
        self.settings.sfx_volume
    }

    pub fn music_enabled(&self) -> bool {
        self.settings.music_enabled
    }

    pub fn fullscreen(&self) -> bool {
        self.settings.fullscreen
    }

    pub fn fps_display(&self) -> bool {
        self.settings.fps_display
    }

    /// Sets music volume (clamped to 0-100)
    pub fn set_music_volume(&mut self, volume: u8) {
        self.settings.music_volume = volume.min(MAX_VOLUME);
        self.persist();
    }

    /// Sets sound-effect volume (clamped to 0-100)
    pub fn set_sfx_volume(&mut self, volume: u8) {
        self.settings.sfx_volume = volume.min(MAX_VOLUME);
        self.persist();
    }

    pub fn set_music_enabled(&mut self, enabled: bool) {
        self.settings.music_enabled = enabled;
        self.persist();
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.settings.fullscreen = fullscreen;
        self.persist();
    }

    pub fn set_fps_display(&mut self, visible: bool) {
        self.settings.fps_display = visible;
        self.persist();
    }

    /// Flips music on/off, returning the new state
    pub fn toggle_music(&mut self) -> bool {
        self.set_music_enabled(!self.settings.music_enabled);
        self.settings.music_enabled
    }

    /// Flips fullscreen, returning the new state
    pub fn toggle_fullscreen(&mut self) -> bool {
        self.set_fullscreen(!self.settings.fullscreen);
        self.settings.fullscreen
    }

    /// Flips the FPS counter, returning the new state
    pub fn toggle_fps_display(&mut self) -> bool {
        self.set_fps_display(!self.settings.fps_display);
        self.settings.fps_display
    }
}
