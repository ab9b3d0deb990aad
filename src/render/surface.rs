// surface.rs - Drawing primitives the renderer needs
//
// Only the handful of shapes the background uses. Backends: command
// buffer, canvas.

use glam::Vec2;

use crate::space::Rect;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// CSS color string, e.g. `rgba(255,150,180,0.5)`
    pub fn css(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

pub const fn stop(offset: f32, color: Rgba) -> ColorStop {
    ColorStop { offset, color }
}

/// Linear gradient running from `from` to `to`.
#[derive(Debug, Clone, Copy)]
pub struct Gradient<'a> {
    pub from: Vec2,
    pub to: Vec2,
    pub stops: &'a [ColorStop],
}

/// A 2D target the renderer paints on, back to front.
pub trait Surface {
    type Error;

    fn clear(&mut self, w: f32, h: f32) -> Result<(), Self::Error>;

    fn fill_rect_gradient(&mut self, rect: Rect, gradient: &Gradient<'_>) -> Result<(), Self::Error>;

    /// Closed polygon through `points`, added onto what is already painted
    /// (canvas "lighter").
    fn fill_glow_polygon(&mut self, points: &[Vec2], gradient: &Gradient<'_>) -> Result<(), Self::Error>;

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) -> Result<(), Self::Error>;

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) -> Result<(), Self::Error>;

    /// Straight line along the gradient's axis, colored by it.
    fn stroke_gradient_line(&mut self, gradient: &Gradient<'_>, width: f32) -> Result<(), Self::Error>;

    fn stroke_quadratic(
        &mut self,
        from: Vec2,
        ctrl: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
    ) -> Result<(), Self::Error>;

    /// Ellipse `size * 0.6` by `size`, tilted a further eighth turn.
    fn fill_petal(&mut self, center: Vec2, rotation: f32, size: f32, color: Rgba) -> Result<(), Self::Error>;

    /// Two-lobed heart spanning about `2 * size`.
    fn fill_heart(&mut self, center: Vec2, rotation: f32, size: f32, color: Rgba) -> Result<(), Self::Error>;
}
