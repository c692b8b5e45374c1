//! Interactive widgets (buttons and sliders)
//!
//! A [`Widget`] owns its own interaction state and reacts to
//! [`InputEvent`]s. It never calls back into its owner: everything it wants
//! to happen (play a sound, run its click command, claim a selection in its
//! group) is pushed as a [`UiEffect`] for the owner to apply after dispatch.
//!
//! # Interaction model
//!
//! ```text
//! Idle --pointer enters--> Hovered --button down--> Pressed
//!  ^                          |                        |
//!  +----pointer leaves--------+     button up inside: commit, back to Hovered
//!                                   button up outside: cancel, no command
//! ```
//!
//! `Focused` is an orthogonal flag and `Disabled` gates everything: a
//! disabled widget ignores every event and reports it unhandled.

use std::fmt;

use super::style::{BadgePosition, ResolvedColors, TextAlign, VisualState, WidgetStyle};
use super::types::{Color, Point, Rect};
use crate::audio::SoundCue;
use crate::input_system::{InputEvent, Key, MouseButton};
use crate::render::Painter;
use crate::text::{line_height, text_width};

/// Seconds for a tooltip to fade fully in
pub const TOOLTIP_FADE_SECONDS: f32 = 0.25;

/// Stable identity of a widget within one screen
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WidgetId(String);

impl WidgetId {
    pub fn new(id: impl Into<String>) -> Self {
        WidgetId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(id: &str) -> Self {
        WidgetId(id.to_string())
    }
}

impl PartialEq<str> for WidgetId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for WidgetId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Handle of a selection group inside a widget registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub(crate) usize);

/// Side effects requested by a widget while handling an event
#[derive(Debug, Clone, PartialEq)]
pub enum UiEffect<C> {
    /// The widget's click (or slider change) command
    Command(C),
    /// A sound effect to play
    Sound(SoundCue),
    /// The widget asks its selection group to select it
    SelectInGroup { group: GroupId, widget: WidgetId },
}

/// Hit-test shape of a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    #[default]
    Rectangle,
    /// Circle centered in the bounds; `None` uses half the shorter side
    Circle { radius: Option<u32> },
}

/// Pointer interaction phase, ignoring focus and toggle flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Idle,
    Hovered,
    Pressed,
    Disabled,
}

/// Small notification bubble drawn on a corner of the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub position: BadgePosition,
}

/// Slider-specific state
#[derive(Debug, Clone)]
pub struct Slider<C> {
    pub(super) min: i32,
    pub(super) max: i32,
    pub(super) value: i32,
    pub(super) step: i32,
    pub(super) dragging: bool,
    pub(super) on_change: Option<fn(i32) -> C>,
}

impl<C> Slider<C> {
    /// Full width of the range; `i64` so `i32::MIN..i32::MAX` fits
    fn range(&self) -> i64 {
        self.max as i64 - self.min as i64
    }

    /// Value under the pointer x-coordinate, snapped to `step` and clamped
    fn value_at(&self, x: i32, track: Rect) -> i32 {
        let width = track.width.max(1) as f64;
        let relative = (x as i64 - track.x as i64).clamp(0, track.width as i64) as f64;
        let raw = self.min as f64 + relative / width * self.range() as f64;
        let step = self.step as f64;
        let snapped = ((raw / step).round() * step).clamp(self.min as f64, self.max as f64);
        snapped.round() as i32
    }

    /// Fraction of the range covered by the current value
    fn fraction(&self) -> f32 {
        let range = self.range();
        if range > 0 {
            ((self.value as i64 - self.min as i64) as f64 / range as f64) as f32
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone)]
pub enum WidgetKind<C> {
    Button,
    Slider(Slider<C>),
}

/// A rectangular interactive control
///
/// Built with [`super::builder::WidgetBuilder`]; `C` is the owning screen's
/// command type.
#[derive(Debug, Clone)]
pub struct Widget<C> {
    pub(super) id: WidgetId,
    pub(super) bounds: Rect,
    pub(super) shape: Shape,
    pub(super) style: WidgetStyle,
    pub(super) label: String,
    pub(super) hover_label: Option<String>,
    pub(super) icon: Option<String>,
    pub(super) tooltip: Option<String>,
    pub(super) badge: Option<Badge>,
    pub(super) kind: WidgetKind<C>,
    pub(super) disabled: bool,
    pub(super) toggle_mode: bool,
    pub(super) toggled: bool,
    pub(super) shortcut: Option<Key>,
    pub(super) on_click: Option<C>,
    pub(super) click_sound: Option<SoundCue>,
    pub(super) hover_sound: Option<SoundCue>,
    pub(super) focus_sound: Option<SoundCue>,
    pub(super) group: Option<GroupId>,

    // Interaction state
    pub(super) hovered: bool,
    pub(super) pressed: bool,
    pub(super) focused: bool,
    pub(super) tooltip_fade: f32,
}

impl<C: Clone> Widget<C> {
    pub fn id(&self) -> &WidgetId {
        &self.id
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn style(&self) -> &WidgetStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut WidgetStyle {
        &mut self.style
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Label currently shown (the hover alternative while hovered)
    pub fn current_label(&self) -> &str {
        match (&self.hover_label, self.hovered) {
            (Some(alt), true) => alt,
            _ => &self.label,
        }
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    pub fn badge(&self) -> Option<&Badge> {
        self.badge.as_ref()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_toggled(&self) -> bool {
        self.toggled
    }

    pub fn toggle_mode(&self) -> bool {
        self.toggle_mode
    }

    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    pub fn shortcut(&self) -> Option<Key> {
        self.shortcut
    }

    pub fn focus_sound(&self) -> Option<&SoundCue> {
        self.focus_sound.as_ref()
    }

    pub fn is_slider(&self) -> bool {
        matches!(self.kind, WidgetKind::Slider(_))
    }

    /// Current slider value (`None` for buttons)
    pub fn slider_value(&self) -> Option<i32> {
        match &self.kind {
            WidgetKind::Slider(slider) => Some(slider.value),
            WidgetKind::Button => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(&self.kind, WidgetKind::Slider(slider) if slider.dragging)
    }

    pub fn interaction(&self) -> Interaction {
        if self.disabled {
            Interaction::Disabled
        } else if self.pressed {
            Interaction::Pressed
        } else if self.hovered {
            Interaction::Hovered
        } else {
            Interaction::Idle
        }
    }

    /// State used to pick draw colors
    pub fn visual_state(&self) -> VisualState {
        VisualState::from_flags(self.disabled, self.toggled, self.focused, self.hovered)
    }

    /// Shape-aware containment test
    pub fn hit_test(&self, point: Point) -> bool {
        match self.shape {
            Shape::Rectangle => self.bounds.contains_point(point),
            Shape::Circle { radius } => {
                let radius = radius.unwrap_or(self.bounds.width.min(self.bounds.height) / 2) as i64;
                let center = self.bounds.center();
                let dx = (point.x - center.x) as i64;
                let dy = (point.y - center.y) as i64;
                dx * dx + dy * dy <= radius * radius
            }
        }
    }

    /// Processes one input event
    ///
    /// Returns `true` if the event changed this widget's state or fired its
    /// command. Disabled widgets always return `false`.
    pub fn handle_event(&mut self, event: &InputEvent, effects: &mut Vec<UiEffect<C>>) -> bool {
        if self.disabled {
            return false;
        }

        let mut handled = false;
        if let Some(pointer) = event.pointer() {
            handled |= self.update_hover(pointer, effects);
        }

        match *event {
            InputEvent::MouseDown {
                button: MouseButton::Left,
                x,
                ..
            } => {
                if self.hovered {
                    self.pressed = true;
                    handled = true;
                    if let WidgetKind::Slider(slider) = &mut self.kind {
                        slider.dragging = true;
                        if let Some(sound) = &self.click_sound {
                            effects.push(UiEffect::Sound(sound.clone()));
                        }
                        self.drag_to(x, effects);
                    }
                }
            }
            InputEvent::MouseUp {
                button: MouseButton::Left,
                ..
            } => {
                if let WidgetKind::Slider(slider) = &mut self.kind {
                    if slider.dragging {
                        slider.dragging = false;
                        handled = true;
                    }
                } else if self.pressed && self.hovered {
                    self.commit(effects);
                    handled = true;
                }
                self.pressed = false;
            }
            InputEvent::MouseMotion { x, .. } => {
                if self.is_dragging() {
                    self.drag_to(x, effects);
                    handled = true;
                }
            }
            InputEvent::KeyDown { key, .. } => {
                if self.shortcut == Some(key) {
                    self.commit(effects);
                    handled = true;
                } else if self.focused && key.is_activate() {
                    self.commit(effects);
                    handled = true;
                } else if self.focused && self.is_slider() {
                    let step = match &self.kind {
                        WidgetKind::Slider(slider) => slider.step,
                        WidgetKind::Button => 0,
                    };
                    match key {
                        Key::Left => {
                            self.adjust_value(-step, effects);
                            handled = true;
                        }
                        Key::Right => {
                            self.adjust_value(step, effects);
                            handled = true;
                        }
                        _ => {}
                    }
                }
            }
            _ => {}
        }

        handled
    }

    fn update_hover(&mut self, pointer: Point, effects: &mut Vec<UiEffect<C>>) -> bool {
        let inside = self.hit_test(pointer);
        if inside && !self.hovered {
            self.hovered = true;
            self.tooltip_fade = 0.0;
            if let Some(sound) = &self.hover_sound {
                effects.push(UiEffect::Sound(sound.clone()));
            }
            return true;
        }
        if !inside && self.hovered {
            self.hovered = false;
            self.tooltip_fade = 0.0;
        }
        false
    }

    /// The shared commit path for clicks, activation keys and shortcuts
    fn commit(&mut self, effects: &mut Vec<UiEffect<C>>) {
        if let Some(sound) = &self.click_sound {
            effects.push(UiEffect::Sound(sound.clone()));
        }
        if self.toggle_mode {
            match self.group {
                Some(group) => effects.push(UiEffect::SelectInGroup {
                    group,
                    widget: self.id.clone(),
                }),
                None => self.toggled = !self.toggled,
            }
        }
        if let Some(command) = &self.on_click {
            effects.push(UiEffect::Command(command.clone()));
        }
    }

    fn drag_to(&mut self, x: i32, effects: &mut Vec<UiEffect<C>>) {
        let target = match &self.kind {
            WidgetKind::Slider(slider) => slider.value_at(x, self.bounds),
            WidgetKind::Button => return,
        };
        self.apply_value(target, effects);
    }

    fn adjust_value(&mut self, amount: i32, effects: &mut Vec<UiEffect<C>>) {
        if let WidgetKind::Slider(slider) = &self.kind {
            let target = slider.value.saturating_add(amount).clamp(slider.min, slider.max);
            self.apply_value(target, effects);
        }
    }

    fn apply_value(&mut self, target: i32, effects: &mut Vec<UiEffect<C>>) -> bool {
        if let WidgetKind::Slider(slider) = &mut self.kind {
            let target = target.clamp(slider.min, slider.max);
            if target != slider.value {
                slider.value = target;
                if let Some(on_change) = slider.on_change {
                    effects.push(UiEffect::Command(on_change(target)));
                }
                return true;
            }
        }
        false
    }

    /// Sets a slider's value programmatically, emitting its change command
    pub fn set_value(&mut self, value: i32, effects: &mut Vec<UiEffect<C>>) -> bool {
        self.apply_value(value, effects)
    }

    /// Grants or revokes keyboard focus
    ///
    /// Disabled widgets refuse focus. Returns whether the flag changed.
    pub fn set_focus(&mut self, focused: bool) -> bool {
        if focused && self.disabled {
            return false;
        }
        let changed = self.focused != focused;
        self.focused = focused;
        changed
    }

    /// Enables or disables the widget, dropping any live interaction
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.focused = false;
            self.reset_interaction();
        }
    }

    /// Abandons hover, press and drag (back to `Idle`)
    pub fn reset_interaction(&mut self) {
        self.hovered = false;
        self.pressed = false;
        self.tooltip_fade = 0.0;
        if let WidgetKind::Slider(slider) = &mut self.kind {
            slider.dragging = false;
        }
    }

    /// Sets the toggle flag; ignored unless the widget is in toggle mode
    ///
    /// Group members are also ignored: their selection belongs to the
    /// group (`WidgetRegistry::select_in_group`).
    pub fn set_toggled(&mut self, toggled: bool) {
        if self.group.is_some() {
            tracing::debug!("Ignoring set_toggled on grouped widget '{}'", self.id);
            return;
        }
        if self.toggle_mode {
            self.toggled = toggled;
        }
    }

    /// Toggle flag write used by the owning selection group
    pub(super) fn set_group_toggled(&mut self, toggled: bool) {
        self.toggled = toggled;
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn set_hover_label(&mut self, label: Option<String>) {
        self.hover_label = label;
    }

    pub fn set_tooltip(&mut self, tooltip: Option<String>) {
        self.tooltip = tooltip;
    }

    /// Sets or clears the badge text, keeping its corner
    pub fn set_badge(&mut self, text: Option<String>) {
        self.badge = text.map(|text| Badge {
            text,
            position: self.badge.as_ref().map(|b| b.position).unwrap_or_default(),
        });
    }

    pub(super) fn join_group(&mut self, group: GroupId) {
        self.group = Some(group);
        self.toggle_mode = true;
    }

    /// Advances time-based effects (tooltip fade)
    pub fn update(&mut self, dt: f32) {
        if self.hovered && self.tooltip.is_some() {
            self.tooltip_fade = (self.tooltip_fade + dt / TOOLTIP_FADE_SECONDS).min(1.0);
        }
    }

    pub fn tooltip_fade(&self) -> f32 {
        self.tooltip_fade
    }

    /// Draws the widget; never mutates state
    pub fn draw(&self, painter: &mut dyn Painter) -> Result<(), String> {
        let colors = self.style.resolve(self.visual_state());

        match &self.kind {
            WidgetKind::Button => self.draw_button(painter, colors)?,
            WidgetKind::Slider(slider) => self.draw_slider(painter, colors, slider)?,
        }

        if let Some(badge) = &self.badge {
            self.draw_badge(painter, badge)?;
        }

        if self.hovered && !self.disabled {
            if let Some(tooltip) = &self.tooltip {
                self.draw_tooltip(painter, tooltip)?;
            }
        }

        Ok(())
    }

    fn draw_button(&self, painter: &mut dyn Painter, colors: ResolvedColors) -> Result<(), String> {
        if self.style.background_visible {
            match self.shape {
                Shape::Rectangle => {
                    painter.fill_rect(self.bounds, colors.fill)?;
                    for i in 0..self.style.border_width {
                        painter.draw_rect(self.bounds.inset(i), colors.border)?;
                    }
                }
                Shape::Circle { radius } => {
                    let radius = radius.unwrap_or(self.bounds.width.min(self.bounds.height) / 2);
                    let center = self.bounds.center();
                    if self.style.border_width > 0 {
                        painter.fill_circle(center, radius, colors.border)?;
                    }
                    painter.fill_circle(
                        center,
                        radius.saturating_sub(self.style.border_width),
                        colors.fill,
                    )?;
                }
            }
        } else if self.focused {
            // Text-only buttons still need a visible focus cue
            painter.draw_rect(self.bounds, colors.border)?;
        }

        self.draw_label(painter, colors.text)
    }

    fn draw_label(&self, painter: &mut dyn Painter, color: Color) -> Result<(), String> {
        let text = self.current_label();
        let scale = self.style.text_scale;
        let lines: Vec<&str> = text.lines().collect();
        let spacing = 2;
        let total_height = lines.len() as i32 * (line_height(scale) as i32 + spacing) - spacing;
        let mut y = self.bounds.center().y - total_height / 2;

        let icon_size = line_height(scale) + 4;
        let mut text_left = None;

        for line in &lines {
            let width = text_width(line, scale) as i32;
            let x = match self.style.text_align {
                TextAlign::Left => self.bounds.left() + 10,
                TextAlign::Right => self.bounds.right() - 10 - width,
                TextAlign::Center => self.bounds.center().x - width / 2,
            };
            text_left = Some(text_left.map_or(x, |left: i32| left.min(x)));
            painter.draw_text(line, x, y, color, scale)?;
            y += line_height(scale) as i32 + spacing;
        }

        if let Some(icon) = &self.icon {
            let icon_x = match text_left {
                Some(left) => left - icon_size as i32 - 6,
                None => self.bounds.center().x - icon_size as i32 / 2,
            };
            let icon_y = self.bounds.center().y - icon_size as i32 / 2;
            painter.draw_icon(icon, Rect::new(icon_x, icon_y, icon_size, icon_size))?;
        }

        Ok(())
    }

    fn draw_slider(
        &self,
        painter: &mut dyn Painter,
        colors: ResolvedColors,
        slider: &Slider<C>,
    ) -> Result<(), String> {
        painter.fill_rect(self.bounds, colors.fill)?;
        if self.focused {
            painter.draw_rect(self.bounds, colors.border)?;
        }

        let handle_x = self.bounds.x + (slider.fraction() * self.bounds.width as f32) as i32;
        let handle_radius = self.bounds.height.saturating_sub(4) / 2;
        let handle_color = if self.disabled {
            Color::rgb(150, 150, 150)
        } else {
            Color::rgb(200, 200, 200)
        };
        painter.fill_circle(
            Point::new(handle_x, self.bounds.center().y),
            handle_radius.max(2),
            handle_color,
        )?;

        let scale = self.style.text_scale.max(1);
        if !self.label.is_empty() {
            painter.draw_text(
                &self.label,
                self.bounds.x,
                self.bounds.y - line_height(scale) as i32 - 5,
                colors.text,
                scale,
            )?;
        }
        painter.draw_text(
            &slider.value.to_string(),
            self.bounds.x,
            self.bounds.bottom() + 5,
            colors.text,
            scale,
        )
    }

    fn draw_badge(&self, painter: &mut dyn Painter, badge: &Badge) -> Result<(), String> {
        let padding = 4;
        let width = (text_width(&badge.text, 1) + padding * 2).max(line_height(1) + padding);
        let height = line_height(1) + padding;

        let corner = match badge.position {
            BadgePosition::TopLeft => Point::new(self.bounds.left(), self.bounds.top()),
            BadgePosition::TopRight => Point::new(self.bounds.right(), self.bounds.top()),
            BadgePosition::BottomLeft => Point::new(self.bounds.left(), self.bounds.bottom()),
            BadgePosition::BottomRight => Point::new(self.bounds.right(), self.bounds.bottom()),
        };
        let rect = Rect::from_center(corner, width, height);

        painter.fill_rect(rect, self.style.badge)?;
        painter.draw_text(
            &badge.text,
            rect.x + padding as i32,
            rect.y + (padding / 2) as i32,
            Color::WHITE,
            1,
        )
    }

    fn draw_tooltip(&self, painter: &mut dyn Painter, tooltip: &str) -> Result<(), String> {
        let padding = 5;
        let width = text_width(tooltip, 1) + padding * 2;
        let height = line_height(1) + padding * 2;
        let rect = Rect::new(
            self.bounds.center().x - (width / 2) as i32,
            self.bounds.top() - height as i32 - 5,
            width,
            height,
        );

        let background = self.style.tooltip_background;
        let text = self.style.tooltip_text;
        painter.fill_rect(rect, background.with_alpha(0).lerp(background, self.tooltip_fade))?;
        painter.draw_text(
            tooltip,
            rect.x + padding as i32,
            rect.y + padding as i32,
            text.with_alpha(0).lerp(text, self.tooltip_fade),
            1,
        )
    }
}
