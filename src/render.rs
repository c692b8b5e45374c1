//! Drawing capability
//!
//! The menu core never talks to a graphics API directly. Everything it draws
//! goes through a [`Painter`] supplied by the platform for the duration of
//! one frame. Only rectangle fill/outline and icon blits are required;
//! circles and text have default implementations built from filled
//! rectangles (text uses the bitmap font in [`crate::text`]).

use crate::text::{draw_simple_text, text_width};
use crate::ui::types::{Color, Point, Rect};

pub trait Painter {
    /// Fills a rectangle with `color` (alpha-blended if `color.a < 255`)
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), String>;

    /// Draws a one-pixel rectangle outline
    fn draw_rect(&mut self, rect: Rect, color: Color) -> Result<(), String>;

    /// Blits the icon registered under `icon` into `rect`
    ///
    /// Unknown icons are silently skipped by implementations.
    fn draw_icon(&mut self, icon: &str, rect: Rect) -> Result<(), String>;

    /// Logical size of the drawing surface
    fn size(&self) -> (u32, u32);

    /// Native size of a registered icon, if the backend knows it
    fn icon_size(&self, _icon: &str) -> Option<(u32, u32)> {
        None
    }

    /// Fills a circle using one horizontal span per row
    fn fill_circle(&mut self, center: Point, radius: u32, color: Color) -> Result<(), String> {
        let r = radius as i32;
        for dy in -r..=r {
            let half = (((r * r - dy * dy) as f32).sqrt()) as i32;
            self.fill_rect(
                Rect::new(center.x - half, center.y + dy, (half * 2 + 1) as u32, 1),
                color,
            )?;
        }
        Ok(())
    }

    /// Draws single-line text with the built-in bitmap font
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color, scale: u32) -> Result<(), String> {
        draw_simple_text(self, text, x, y, color, scale)
    }

    /// Width in pixels of `text` at `scale`
    fn text_width(&self, text: &str, scale: u32) -> u32 {
        text_width(text, scale)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    /// Painter that only implements the required methods, so the default
    /// text and circle paths are exercised.
    struct PixelCounter {
        fills: usize,
    }

    impl Painter for PixelCounter {
        fn fill_rect(&mut self, _rect: Rect, _color: Color) -> Result<(), String> {
            self.fills += 1;
            Ok(())
        }

        fn draw_rect(&mut self, _rect: Rect, _color: Color) -> Result<(), String> {
            Ok(())
        }

        fn draw_icon(&mut self, _icon: &str, _rect: Rect) -> Result<(), String> {
            Ok(())
        }

        fn size(&self) -> (u32, u32) {
            (640, 360)
        }
    }

    #[test]
    fn test_default_circle_emits_one_span_per_row() {
        let mut painter = PixelCounter { fills: 0 };
        painter.fill_circle(Point::new(10, 10), 4, Color::WHITE).unwrap();
        assert_eq!(painter.fills, 9);
    }

    #[test]
    fn test_default_text_uses_bitmap_font() {
        let mut painter = PixelCounter { fills: 0 };
        painter.draw_text("I", 0, 0, Color::WHITE, 1).unwrap();
        // 'I' has 5 + 1 + 1 + 1 + 1 + 1 + 5 lit pixels
        assert_eq!(painter.fills, 15);
    }

    #[test]
    fn test_recording_painter_collects_text() {
        let mut painter = RecordingPainter::new(640, 360);
        painter.draw_text("HELLO", 0, 0, Color::WHITE, 2).unwrap();
        painter.fill_rect(Rect::new(0, 0, 1, 1), Color::BLACK).unwrap();
        assert_eq!(painter.texts(), vec!["HELLO"]);
        assert_eq!(painter.fills().len(), 1);
    }
}
