// encoder.rs - Encode a frame as a flat command buffer
//
// The page reads the buffer as a Float32Array over wasm memory and
// replays it on its canvas. Layout, one command after another:
//
//   0 CLEAR          w h
//   1 RECT_GRADIENT  x y w h                 | gradient
//   2 GLOW_POLYGON   n (x y)*n               | gradient
//   3 CIRCLE         x y r                   | color
//   4 LINE           x0 y0 x1 y1 width       | color
//   5 GRADIENT_LINE  width                   | gradient
//   6 QUAD           x0 y0 cx cy x1 y1 width | color
//   7 PETAL          x y rotation size       | color
//   8 HEART          x y rotation size       | color
//
//   color    = r g b a         (channels 0-255, alpha 0-1)
//   gradient = x0 y0 x1 y1 n (offset r g b a)*n

use std::convert::Infallible;

use glam::Vec2;

use super::{Gradient, Rgba, Surface};
use crate::space::Rect;

pub const OP_CLEAR: f32 = 0.0;
pub const OP_RECT_GRADIENT: f32 = 1.0;
pub const OP_GLOW_POLYGON: f32 = 2.0;
pub const OP_CIRCLE: f32 = 3.0;
pub const OP_LINE: f32 = 4.0;
pub const OP_GRADIENT_LINE: f32 = 5.0;
pub const OP_QUAD: f32 = 6.0;
pub const OP_PETAL: f32 = 7.0;
pub const OP_HEART: f32 = 8.0;

#[derive(Debug, Default)]
pub struct Encoder {
    out: Vec<f32>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the previous frame, keeping the allocation.
    pub fn reset(&mut self) {
        self.out.clear();
    }

    pub fn ptr(&self) -> *const f32 {
        self.out.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.out
    }

    #[inline]
    fn point(&mut self, p: Vec2) {
        self.out.extend_from_slice(&[p.x, p.y]);
    }

    #[inline]
    fn color(&mut self, c: Rgba) {
        self.out.extend_from_slice(&[c.r as f32, c.g as f32, c.b as f32, c.a]);
    }

    fn gradient(&mut self, g: &Gradient<'_>) {
        self.point(g.from);
        self.point(g.to);
        self.out.push(g.stops.len() as f32);
        for s in g.stops {
            self.out.push(s.offset);
            self.color(s.color);
        }
    }
}

impl Surface for Encoder {
    type Error = Infallible;

    fn clear(&mut self, w: f32, h: f32) -> Result<(), Infallible> {
        self.out.extend_from_slice(&[OP_CLEAR, w, h]);
        Ok(())
    }

    fn fill_rect_gradient(&mut self, rect: Rect, gradient: &Gradient<'_>) -> Result<(), Infallible> {
        self.out.extend_from_slice(&[OP_RECT_GRADIENT, rect.x, rect.y, rect.w, rect.h]);
        self.gradient(gradient);
        Ok(())
    }

    fn fill_glow_polygon(&mut self, points: &[Vec2], gradient: &Gradient<'_>) -> Result<(), Infallible> {
        self.out.extend_from_slice(&[OP_GLOW_POLYGON, points.len() as f32]);
        for &p in points {
            self.point(p);
        }
        self.gradient(gradient);
        Ok(())
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) -> Result<(), Infallible> {
        self.out.extend_from_slice(&[OP_CIRCLE, center.x, center.y, radius]);
        self.color(color);
        Ok(())
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) -> Result<(), Infallible> {
        self.out.extend_from_slice(&[OP_LINE, from.x, from.y, to.x, to.y, width]);
        self.color(color);
        Ok(())
    }

    fn stroke_gradient_line(&mut self, gradient: &Gradient<'_>, width: f32) -> Result<(), Infallible> {
        self.out.extend_from_slice(&[OP_GRADIENT_LINE, width]);
        self.gradient(gradient);
        Ok(())
    }

    fn stroke_quadratic(
        &mut self,
        from: Vec2,
        ctrl: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
    ) -> Result<(), Infallible> {
        self.out.extend_from_slice(&[OP_QUAD, from.x, from.y, ctrl.x, ctrl.y, to.x, to.y, width]);
        self.color(color);
        Ok(())
    }

    fn fill_petal(&mut self, center: Vec2, rotation: f32, size: f32, color: Rgba) -> Result<(), Infallible> {
        self.out.extend_from_slice(&[OP_PETAL, center.x, center.y, rotation, size]);
        self.color(color);
        Ok(())
    }

    fn fill_heart(&mut self, center: Vec2, rotation: f32, size: f32, color: Rgba) -> Result<(), Infallible> {
        self.out.extend_from_slice(&[OP_HEART, center.x, center.y, rotation, size]);
        self.color(color);
        Ok(())
    }
}
