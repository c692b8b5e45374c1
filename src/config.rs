//! Compile-time configuration and asset locations

use std::path::{Path, PathBuf};

use crate::audio::SoundCue;
use crate::ui::types::Color;

// Window constants
pub const SCREEN_WIDTH: u32 = 1280;
pub const SCREEN_HEIGHT: u32 = 720;
pub const GAME_TITLE: &str = "Fantasy Falls";
pub const TARGET_FPS: u32 = 60;

// Colors
pub const BACKGROUND_COLOR: Color = Color::rgb(40, 44, 52);
pub const TEXT_COLOR: Color = Color::rgb(220, 220, 220);
pub const HOVER_TEXT_COLOR: Color = Color::rgb(255, 255, 0);
pub const DANGER_TEXT_COLOR: Color = Color::rgb(255, 100, 100);
pub const FPS_COLOR: Color = Color::rgb(255, 255, 0);

/// Shown at the bottom of every menu screen
pub const HELP_TEXT: &str = "Press TAB to navigate, ENTER to select, Q to quit, F11 for fullscreen";

/// Where the game's assets live on disk
///
/// Every path is relative to one root directory (`assets/` by default).
#[derive(Debug, Clone)]
pub struct AssetPaths {
    root: PathBuf,
}

impl AssetPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        AssetPaths { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn click_sound(&self) -> PathBuf {
        self.root.join("audio").join("click.wav")
    }

    pub fn hover_sound(&self) -> PathBuf {
        self.root.join("audio").join("hover.wav")
    }

    pub fn focus_sound(&self) -> PathBuf {
        self.root.join("audio").join("focus.wav")
    }

    pub fn background_image(&self) -> PathBuf {
        self.root.join("images").join("MainMenuBackground.png")
    }

    /// Path of a named image under `images/`
    pub fn image(&self, name: &str) -> PathBuf {
        self.root.join("images").join(name)
    }
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self::new("assets")
    }
}

/// UI sound effects, resolved once at startup
///
/// Missing files are logged and left as `None`; widgets then simply stay
/// silent.
#[derive(Debug, Clone, Default)]
pub struct UiSounds {
    pub click: Option<SoundCue>,
    pub hover: Option<SoundCue>,
    pub focus: Option<SoundCue>,
}

impl UiSounds {
    pub fn resolve(assets: &AssetPaths) -> Self {
        UiSounds {
            click: SoundCue::resolve(assets.click_sound()),
            hover: SoundCue::resolve(assets.hover_sound()),
            focus: SoundCue::resolve(assets.focus_sound()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_paths_are_rooted() {
        let assets = AssetPaths::new("/data/ff");
        assert_eq!(assets.click_sound(), PathBuf::from("/data/ff/audio/click.wav"));
        assert_eq!(
            assets.background_image(),
            PathBuf::from("/data/ff/images/MainMenuBackground.png")
        );
        assert_eq!(assets.image("gear.png"), PathBuf::from("/data/ff/images/gear.png"));
    }

    #[test]
    fn test_missing_sounds_resolve_to_none() {
        let sounds = UiSounds::resolve(&AssetPaths::new("no/such/assets"));
        assert!(sounds.click.is_none());
        assert!(sounds.hover.is_none());
        assert!(sounds.focus.is_none());
    }
}
