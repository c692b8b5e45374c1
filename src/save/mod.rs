//! Persistence for Fantasy Falls
//!
//! Only user preferences are persisted by the menu front-end:
//! - JSON-based settings file (human-readable, hand-editable)
//! - Written on every change
//! - Corrupt files are kept aside and replaced with defaults
//!
//! # Example Usage
//!
//! ```ignore
//! let mut settings = SettingsStore::open_default();
//! settings.set_music_volume(60);
//! let fullscreen = settings.toggle_fullscreen();
//! ```

pub mod settings;

pub use settings::{Settings, SettingsError, SettingsStore};
