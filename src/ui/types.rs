//! Geometry and color primitives shared by the menu core.
//!
//! These mirror the shape of `sdl2::rect::Rect` and `sdl2::pixels::Color`
//! so the platform layer can convert them one-to-one, but carry no native
//! dependency.

/// A point in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// Axis-aligned rectangle in screen pixels
///
/// Containment follows the usual half-open convention: the left and top
/// edges are inside, the right and bottom edges are outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Rect { x, y, width, height }
    }

    /// Creates a rectangle of the given size centered on `center`
    pub fn from_center(center: Point, width: u32, height: u32) -> Self {
        Rect::new(
            center.x - (width / 2) as i32,
            center.y - (height / 2) as i32,
            width,
            height,
        )
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.x + (self.width / 2) as i32,
            self.y + (self.height / 2) as i32,
        )
    }

    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Shrinks the rectangle by `amount` on every side (never below zero size)
    pub fn inset(&self, amount: u32) -> Rect {
        Rect::new(
            self.x + amount as i32,
            self.y + amount as i32,
            self.width.saturating_sub(amount * 2),
            self.height.saturating_sub(amount * 2),
        )
    }
}

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Color { a, ..self }
    }

    /// Darkens every channel by `amount`, saturating at zero. Alpha is kept.
    pub fn darken(self, amount: u8) -> Self {
        Color {
            r: self.r.saturating_sub(amount),
            g: self.g.saturating_sub(amount),
            b: self.b.saturating_sub(amount),
            a: self.a,
        }
    }

    /// Linear interpolation between two colors, `t` clamped to `[0, 1]`
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |from: u8, to: u8| -> u8 {
            (from as f32 + (to as f32 - from as f32) * t).round() as u8
        };
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_point_half_open() {
        let rect = Rect::new(100, 100, 200, 50);
        assert!(rect.contains_point(Point::new(100, 100)));
        assert!(rect.contains_point(Point::new(299, 149)));
        assert!(!rect.contains_point(Point::new(300, 120)));
        assert!(!rect.contains_point(Point::new(150, 150)));
        assert!(!rect.contains_point(Point::new(99, 120)));
    }

    #[test]
    fn test_rect_from_center() {
        let rect = Rect::from_center(Point::new(640, 360), 250, 50);
        assert_eq!(rect.x, 515);
        assert_eq!(rect.y, 335);
        assert_eq!(rect.center(), Point::new(640, 360));
    }

    #[test]
    fn test_rect_inset_never_underflows() {
        let rect = Rect::new(0, 0, 4, 4).inset(5);
        assert!(rect.is_empty());
    }

    #[test]
    fn test_color_lerp_endpoints_and_midpoint() {
        let a = Color::rgb(0, 100, 200);
        let b = Color::rgb(200, 100, 0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Color::rgb(100, 100, 100));
        // Out-of-range factors clamp
        assert_eq!(a.lerp(b, 4.0), b);
    }

    #[test]
    fn test_color_darken_saturates() {
        let c = Color::rgb(30, 120, 255).darken(50);
        assert_eq!(c, Color::rgb(0, 70, 205));
    }
}
