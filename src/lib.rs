//! Fantasy Falls menu front-end
//!
//! Widgets, focus handling, menu screens and persisted settings, written
//! against small platform capabilities ([`render::Painter`],
//! [`audio::AudioSink`], [`gui::Platform`]) so the whole menu flow runs and
//! tests without a window. The SDL2 backend lives behind the `sdl` feature.

pub mod audio;
pub mod config;
pub mod gui;
pub mod input_system;
pub mod render;
pub mod save;
pub mod text;
pub mod ui;

#[cfg(feature = "sdl")]
pub mod platform;
