//! Screen-Space Widgets
//!
//! Interactive controls for menu screens: buttons and sliders, the registry
//! that owns them and routes keyboard focus, and radio-style selection
//! groups.
//!
//! # Architecture
//!
//! Widgets are **stateful** and **platform-neutral**:
//! - They react to [`crate::input_system::InputEvent`]s, never to SDL events
//! - They report what should happen as [`UiEffect`]s instead of calling back
//! - They draw through the [`crate::render::Painter`] capability
//!
//! # Example Usage
//!
//! ```ignore
//! let mut registry = WidgetRegistry::new();
//! registry.register(
//!     WidgetBuilder::button("quit", "Quit")
//!         .centered_on(screen, 200, 50, 0, 100)
//!         .on_click(Command::Quit)
//!         .build()?,
//! )?;
//!
//! let mut effects = Vec::new();
//! registry.dispatch(&event, &mut effects);
//! registry.draw(&mut painter)?;
//! ```

pub mod builder;
pub mod focus;
pub mod selection;
pub mod style;
pub mod types;
pub mod widget;

pub use builder::WidgetBuilder;
pub use focus::WidgetRegistry;
pub use selection::SelectionGroup;
pub use style::{BadgePosition, TextAlign, VisualState, WidgetStyle};
pub use types::{Color, Point, Rect};
pub use widget::{GroupId, Interaction, Shape, UiEffect, Widget, WidgetId};

use thiserror::Error;

/// Errors raised while building or registering widgets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    #[error("widget id must not be empty")]
    EmptyId,

    #[error("widget '{0}' has zero-sized bounds")]
    EmptyBounds(String),

    #[error("slider '{id}' has an empty range {min}..{max}")]
    InvalidRange { id: String, min: i32, max: i32 },

    #[error("slider '{0}' step must be positive")]
    InvalidStep(String),

    #[error("a widget with id '{0}' is already registered")]
    DuplicateWidget(String),

    #[error("no widget with id '{0}'")]
    UnknownWidget(String),

    #[error("no selection group #{0}")]
    UnknownGroup(usize),
}
