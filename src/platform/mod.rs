//! Platform backends
//!
//! The menu core only sees [`crate::gui::Platform`], [`crate::render::Painter`]
//! and [`crate::audio::AudioSink`]. This module holds the SDL2 implementation.

pub mod sdl;

pub use sdl::SdlPlatform;
