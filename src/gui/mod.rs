//! Screen-Space Menu System
//!
//! Everything that turns widgets into whole screens:
//!
//! - [`menu`] - the [`MenuState`] trait, [`MenuManager`] and the shared
//!   [`MenuContext`]
//! - [`panel`] - the framed overlay used by the pause screen
//! - [`screens`] - main, settings, test and pause screens
//! - [`host`] - the frame loop that intercepts common input and runs the
//!   manager on top of a [`Platform`]
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use fantasy_falls_menu::config::AssetPaths;
//! use fantasy_falls_menu::gui::{MenuContext, MenuHost};
//! use fantasy_falls_menu::save::SettingsStore;
//!
//! let ctx = MenuContext::new(SettingsStore::open_default(), AssetPaths::default(), (1280, 720));
//! let mut host = MenuHost::new(ctx);
//! // host.run(&mut platform)?;
//! # let _ = &mut host;
//! ```

pub mod host;
pub mod menu;
pub mod panel;
pub mod screens;

pub use host::{MenuHost, Platform};
pub use menu::{MenuAction, MenuContext, MenuError, MenuManager, MenuState, StateId};
pub use panel::{Panel, PanelStyle};
