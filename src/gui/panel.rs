//! Overlay Panel
//!
//! A dimmed full-screen overlay with a centered, double-bordered box and a
//! title. Screens place their own widgets inside [`Panel::bounds`].

use crate::render::Painter;
use crate::text::text_width;
use crate::ui::{Color, Rect};

/// Configuration for panel appearance
#[derive(Debug, Clone)]
pub struct PanelStyle {
    /// Panel box width in pixels
    pub width: u32,

    /// Panel box height in pixels
    pub height: u32,

    /// Background color
    pub background_color: Color,

    /// Border color
    pub border_color: Color,

    /// Border thickness (draws double border if > 1)
    pub border_thickness: u32,

    /// Overlay darkness (0-255, higher = darker)
    pub overlay_alpha: u8,

    /// Title text color
    pub title_color: Color,

    pub title_scale: u32,
}

impl Default for PanelStyle {
    fn default() -> Self {
        PanelStyle {
            width: 500,
            height: 360,
            background_color: Color::rgb(30, 30, 40),
            border_color: Color::rgb(100, 100, 120),
            border_thickness: 2,
            overlay_alpha: 180,
            title_color: Color::rgb(220, 220, 240),
            title_scale: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Panel {
    title: String,
    style: PanelStyle,
}

impl Panel {
    pub fn new(title: impl Into<String>) -> Self {
        Panel {
            title: title.into(),
            style: PanelStyle::default(),
        }
    }

    pub fn style(&self) -> &PanelStyle {
        &self.style
    }

    /// The panel box, centered on a screen of `screen` size
    pub fn bounds(&self, screen: (u32, u32)) -> Rect {
        let width = self.style.width.min(screen.0);
        let height = self.style.height.min(screen.1);
        Rect::new(
            ((screen.0 - width) / 2) as i32,
            ((screen.1 - height) / 2) as i32,
            width,
            height,
        )
    }

    /// Vertical offset from the screen center to the first content row
    pub fn content_offset(&self) -> i32 {
        -(self.style.height as i32) / 2 + 110
    }

    pub fn render(&self, painter: &mut dyn Painter) -> Result<(), String> {
        let (screen_width, screen_height) = painter.size();

        // 1. Semi-transparent overlay (darken screen)
        painter.fill_rect(
            Rect::new(0, 0, screen_width, screen_height),
            Color::rgba(0, 0, 0, self.style.overlay_alpha),
        )?;

        // 2. Panel background
        let bounds = self.bounds((screen_width, screen_height));
        painter.fill_rect(bounds, self.style.background_color)?;

        // 3. Double border
        painter.draw_rect(bounds, self.style.border_color)?;
        if self.style.border_thickness > 1 {
            painter.draw_rect(bounds.inset(2), self.style.border_color)?;
        }

        // 4. Title (centered)
        let title_width = text_width(&self.title, self.style.title_scale) as i32;
        painter.draw_text(
            &self.title,
            bounds.center().x - title_width / 2,
            bounds.y + 30,
            self.style.title_color,
            self.style.title_scale,
        )
    }
}
