//! Widget styling
//!
//! A widget's look is data, not a subclass: one [`WidgetStyle`] holds the
//! colors for every interaction state and [`WidgetStyle::resolve`] picks the
//! set to draw with.

use super::types::Color;

/// Visual state used to pick draw colors
///
/// Interaction flags are not mutually exclusive (a toggled widget can also be
/// hovered and focused), so the widget collapses them with a fixed priority:
/// `Disabled > Toggled > Focused > Hovered > Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualState {
    Normal,
    Hovered,
    Focused,
    Toggled,
    Disabled,
}

impl VisualState {
    /// Collapses interaction flags into one state by priority
    pub fn from_flags(disabled: bool, toggled: bool, focused: bool, hovered: bool) -> Self {
        if disabled {
            VisualState::Disabled
        } else if toggled {
            VisualState::Toggled
        } else if focused {
            VisualState::Focused
        } else if hovered {
            VisualState::Hovered
        } else {
            VisualState::Normal
        }
    }
}

/// Horizontal placement of a widget's label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Corner a badge is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgePosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Colors chosen for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColors {
    pub fill: Color,
    pub border: Color,
    pub text: Color,
}

/// Configuration for widget appearance
#[derive(Debug, Clone)]
pub struct WidgetStyle {
    /// Fill color when idle
    pub normal: Color,

    /// Fill color under the pointer
    pub hover: Color,

    /// Fill color while holding keyboard focus
    pub focused: Color,

    /// Fill color of a toggled-on widget
    pub toggled: Color,

    /// Fill color when disabled (derived from `normal` when unset)
    pub disabled: Option<Color>,

    /// Label color
    pub text: Color,

    /// Label color under the pointer (falls back to `text`)
    pub hover_text: Option<Color>,

    /// Outline color
    pub border: Color,

    /// Outline color while focused
    pub focus_border: Color,

    /// Outline thickness in pixels (0 = no outline)
    pub border_width: u32,

    /// Whether the fill is drawn at all (text-only buttons)
    pub background_visible: bool,

    /// Bitmap font scale for the label
    pub text_scale: u32,

    pub text_align: TextAlign,

    pub badge: Color,

    pub tooltip_background: Color,

    pub tooltip_text: Color,
}

impl Default for WidgetStyle {
    fn default() -> Self {
        WidgetStyle {
            normal: Color::rgb(120, 120, 120),
            hover: Color::rgb(160, 160, 160),
            focused: Color::rgb(200, 200, 255),
            toggled: Color::rgb(160, 160, 200),
            disabled: None,
            text: Color::rgb(255, 255, 255),
            hover_text: None,
            border: Color::rgb(50, 50, 50),
            focus_border: Color::rgb(100, 100, 255),
            border_width: 1,
            background_visible: true,
            text_scale: 2,
            text_align: TextAlign::Center,
            badge: Color::rgb(255, 0, 0),
            tooltip_background: Color::rgba(0, 0, 0, 200),
            tooltip_text: Color::rgb(255, 255, 255),
        }
    }
}

impl WidgetStyle {
    /// Picks fill, border and text colors for `state`
    pub fn resolve(&self, state: VisualState) -> ResolvedColors {
        match state {
            VisualState::Disabled => ResolvedColors {
                fill: self.disabled.unwrap_or_else(|| self.normal.darken(50)),
                border: self.border.darken(50),
                text: self.text.darken(100),
            },
            VisualState::Toggled => ResolvedColors {
                fill: self.toggled,
                border: self.border,
                text: self.text,
            },
            VisualState::Focused => ResolvedColors {
                fill: self.focused,
                border: self.focus_border,
                text: self.text,
            },
            VisualState::Hovered => ResolvedColors {
                fill: self.hover,
                border: self.border,
                text: self.hover_text.unwrap_or(self.text),
            },
            VisualState::Normal => ResolvedColors {
                fill: self.normal,
                border: self.border,
                text: self.text,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert_eq!(VisualState::from_flags(true, true, true, true), VisualState::Disabled);
        assert_eq!(VisualState::from_flags(false, true, true, true), VisualState::Toggled);
        assert_eq!(VisualState::from_flags(false, false, true, true), VisualState::Focused);
        assert_eq!(VisualState::from_flags(false, false, false, true), VisualState::Hovered);
        assert_eq!(VisualState::from_flags(false, false, false, false), VisualState::Normal);
    }

    #[test]
    fn test_disabled_colors_are_derived() {
        let style = WidgetStyle::default();
        let colors = style.resolve(VisualState::Disabled);
        assert_eq!(colors.fill, Color::rgb(70, 70, 70));
        assert_eq!(colors.border, Color::rgb(0, 0, 0));
        assert_eq!(colors.text, Color::rgb(155, 155, 155));
    }

    #[test]
    fn test_explicit_disabled_color_wins() {
        let style = WidgetStyle {
            disabled: Some(Color::rgb(1, 2, 3)),
            ..Default::default()
        };
        assert_eq!(style.resolve(VisualState::Disabled).fill, Color::rgb(1, 2, 3));
    }

    #[test]
    fn test_hover_text_falls_back() {
        let mut style = WidgetStyle::default();
        assert_eq!(style.resolve(VisualState::Hovered).text, style.text);
        style.hover_text = Some(Color::rgb(255, 255, 0));
        assert_eq!(style.resolve(VisualState::Hovered).text, Color::rgb(255, 255, 0));
    }
}
