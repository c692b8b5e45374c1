//! Fluent construction of widgets
//!
//! ```ignore
//! let start = WidgetBuilder::button("start", "Start Game")
//!     .centered_on(screen, 200, 50, 0, -100)
//!     .tooltip("Begin a new adventure")
//!     .on_click(MainCommand::Start)
//!     .build()?;
//! ```
//!
//! Everything a builder accepts is validated in [`WidgetBuilder::build`];
//! a widget that exists is always well-formed.

use std::path::Path;

use super::UiError;
use super::style::{BadgePosition, WidgetStyle};
use super::types::{Color, Point, Rect};
use super::widget::{Badge, Shape, Slider, Widget, WidgetId, WidgetKind};
use crate::audio::SoundCue;
use crate::input_system::Key;

/// Size used when no bounds are given
pub const DEFAULT_WIDTH: u32 = 200;
pub const DEFAULT_HEIGHT: u32 = 50;

#[derive(Debug, Clone)]
enum BuilderKind<C> {
    Button,
    Slider {
        min: i32,
        max: i32,
        value: i32,
        step: i32,
        on_change: Option<fn(i32) -> C>,
    },
}

#[derive(Debug, Clone)]
pub struct WidgetBuilder<C> {
    id: String,
    label: String,
    bounds: Rect,
    shape: Shape,
    style: WidgetStyle,
    hover_label: Option<String>,
    icon: Option<String>,
    tooltip: Option<String>,
    badge: Option<Badge>,
    kind: BuilderKind<C>,
    disabled: bool,
    toggle_mode: bool,
    toggled: bool,
    shortcut: Option<Key>,
    on_click: Option<C>,
    click_sound: Option<SoundCue>,
    hover_sound: Option<SoundCue>,
    focus_sound: Option<SoundCue>,
}

impl<C: Clone> WidgetBuilder<C> {
    fn new(id: String, label: String, kind: BuilderKind<C>) -> Self {
        WidgetBuilder {
            id,
            label,
            bounds: Rect::new(0, 0, DEFAULT_WIDTH, DEFAULT_HEIGHT),
            shape: Shape::Rectangle,
            style: WidgetStyle::default(),
            hover_label: None,
            icon: None,
            tooltip: None,
            badge: None,
            kind,
            disabled: false,
            toggle_mode: false,
            toggled: false,
            shortcut: None,
            on_click: None,
            click_sound: None,
            hover_sound: None,
            focus_sound: None,
        }
    }

    pub fn button(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id.into(), label.into(), BuilderKind::Button)
    }

    /// A button whose id is derived from its label (`"Load Game"` gives
    /// `btn_loadgame`)
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        let slug: String = label
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::new(format!("btn_{}", slug), label, BuilderKind::Button)
    }

    /// A horizontal slider over `min..=max` with a step of 1
    pub fn slider(id: impl Into<String>, label: impl Into<String>, min: i32, max: i32, value: i32) -> Self {
        Self::new(
            id.into(),
            label.into(),
            BuilderKind::Slider {
                min,
                max,
                value,
                step: 1,
                on_change: None,
            },
        )
    }

    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Centers the widget on the screen, shifted by the given offsets
    pub fn centered_on(mut self, screen: (u32, u32), width: u32, height: u32, x_offset: i32, y_offset: i32) -> Self {
        let center = Point::new(screen.0 as i32 / 2 + x_offset, screen.1 as i32 / 2 + y_offset);
        self.bounds = Rect::from_center(center, width, height);
        self
    }

    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn style(mut self, style: WidgetStyle) -> Self {
        self.style = style;
        self
    }

    /// Overrides the fill colors for idle and hovered states
    pub fn colors(mut self, normal: Color, hover: Color) -> Self {
        self.style.normal = normal;
        self.style.hover = hover;
        self
    }

    pub fn text_color(mut self, text: Color) -> Self {
        self.style.text = text;
        self
    }

    /// Draws only the label (and a focus outline when focused)
    pub fn text_only(mut self) -> Self {
        self.style.background_visible = false;
        self
    }

    pub fn hover_label(mut self, label: impl Into<String>) -> Self {
        self.hover_label = Some(label.into());
        self
    }

    /// Attaches an icon image; a missing file is logged and ignored
    pub fn icon(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.exists() {
            self.icon = Some(path.to_string_lossy().into_owned());
        } else {
            tracing::warn!("Icon {:?} not found for widget '{}'", path, self.id);
        }
        self
    }

    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn badge(mut self, text: impl Into<String>, position: BadgePosition) -> Self {
        self.badge = Some(Badge {
            text: text.into(),
            position,
        });
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Makes the widget a toggle, starting in `toggled`
    pub fn toggle(mut self, toggled: bool) -> Self {
        self.toggle_mode = true;
        self.toggled = toggled;
        self
    }

    pub fn shortcut(mut self, key: Key) -> Self {
        self.shortcut = Some(key);
        self
    }

    pub fn on_click(mut self, command: C) -> Self {
        self.on_click = Some(command);
        self
    }

    /// Click and hover effects (already resolved by the caller)
    pub fn sounds(mut self, click: Option<SoundCue>, hover: Option<SoundCue>) -> Self {
        self.click_sound = click;
        self.hover_sound = hover;
        self
    }

    pub fn focus_sound(mut self, sound: Option<SoundCue>) -> Self {
        self.focus_sound = sound;
        self
    }

    /// Slider step; ignored for buttons
    pub fn step(mut self, new_step: i32) -> Self {
        if let BuilderKind::Slider { step, .. } = &mut self.kind {
            *step = new_step;
        }
        self
    }

    /// Command built from the new value whenever a slider changes
    pub fn on_change(mut self, command: fn(i32) -> C) -> Self {
        if let BuilderKind::Slider { on_change, .. } = &mut self.kind {
            *on_change = Some(command);
        }
        self
    }

    pub fn build(self) -> Result<Widget<C>, UiError> {
        if self.id.is_empty() {
            return Err(UiError::EmptyId);
        }
        if self.bounds.is_empty() {
            return Err(UiError::EmptyBounds(self.id));
        }

        let kind = match self.kind {
            BuilderKind::Button => WidgetKind::Button,
            BuilderKind::Slider {
                min,
                max,
                value,
                step,
                on_change,
            } => {
                if min >= max {
                    return Err(UiError::InvalidRange { id: self.id, min, max });
                }
                if step <= 0 {
                    return Err(UiError::InvalidStep(self.id));
                }
                WidgetKind::Slider(Slider {
                    min,
                    max,
                    value: value.clamp(min, max),
                    step,
                    dragging: false,
                    on_change,
                })
            }
        };

        Ok(Widget {
            id: WidgetId::new(self.id),
            bounds: self.bounds,
            shape: self.shape,
            style: self.style,
            label: self.label,
            hover_label: self.hover_label,
            icon: self.icon,
            tooltip: self.tooltip,
            badge: self.badge,
            kind,
            disabled: self.disabled,
            toggle_mode: self.toggle_mode,
            toggled: self.toggle_mode && self.toggled,
            shortcut: self.shortcut,
            on_click: self.on_click,
            click_sound: self.click_sound,
            hover_sound: self.hover_sound,
            focus_sound: self.focus_sound,
            group: None,
            hovered: false,
            pressed: false,
            focused: false,
            tooltip_fade: 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Builder = WidgetBuilder<()>;

    #[test]
    fn test_defaults() {
        let widget = Builder::button("ok", "OK").build().unwrap();
        assert_eq!(widget.id(), &"ok");
        assert_eq!(widget.bounds(), Rect::new(0, 0, 200, 50));
        assert!(!widget.is_disabled());
        assert!(!widget.toggle_mode());
    }

    #[test]
    fn test_id_from_label() {
        let widget = Builder::from_label("Load Game!").build().unwrap();
        assert_eq!(widget.id(), &"btn_loadgame");
        assert_eq!(widget.label(), "Load Game!");
    }

    #[test]
    fn test_centered_on_screen() {
        let widget = Builder::button("start", "Start")
            .centered_on((1280, 720), 200, 50, 0, -100)
            .build()
            .unwrap();
        assert_eq!(widget.bounds(), Rect::new(540, 235, 200, 50));
    }

    #[test]
    fn test_rejects_empty_id_and_bounds() {
        assert_eq!(Builder::button("", "x").build().unwrap_err(), UiError::EmptyId);
        assert_eq!(
            Builder::button("b", "x").bounds(Rect::new(0, 0, 0, 10)).build().unwrap_err(),
            UiError::EmptyBounds("b".to_string())
        );
    }

    #[test]
    fn test_rejects_bad_slider() {
        assert_eq!(
            Builder::slider("s", "S", 10, 10, 10).build().unwrap_err(),
            UiError::InvalidRange {
                id: "s".to_string(),
                min: 10,
                max: 10
            }
        );
        assert_eq!(
            Builder::slider("s", "S", 0, 10, 5).step(0).build().unwrap_err(),
            UiError::InvalidStep("s".to_string())
        );
    }

    #[test]
    fn test_slider_value_clamped_on_build() {
        let widget = Builder::slider("s", "S", 0, 100, 250).build().unwrap();
        assert_eq!(widget.slider_value(), Some(100));
    }

    #[test]
    fn test_missing_icon_is_dropped() {
        let widget = Builder::button("i", "Icon").icon("no/such/icon.png").build();
        assert!(widget.is_ok());
    }

    #[test]
    fn test_toggled_requires_toggle_mode() {
        let widget = Builder::button("t", "T").toggle(true).build().unwrap();
        assert!(widget.is_toggled());
        assert!(widget.toggle_mode());
    }
}
