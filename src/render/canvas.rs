// canvas.rs - Paint straight onto the page's 2D context

use std::f64::consts::{FRAC_PI_4, TAU};

use glam::Vec2;
use wasm_bindgen::JsValue;
use web_sys::{CanvasGradient, CanvasRenderingContext2d};

use super::{Gradient, Rgba, Surface};
use crate::space::Rect;

pub struct Canvas<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> Canvas<'a> {
    /// Scales drawing by `dpr` so the engine works in CSS pixels.
    pub fn new(ctx: &'a CanvasRenderingContext2d, dpr: f32) -> Result<Self, JsValue> {
        let dpr = dpr as f64;
        ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
        Ok(Self { ctx })
    }

    fn linear(&self, g: &Gradient<'_>) -> Result<CanvasGradient, JsValue> {
        let lg = self.ctx.create_linear_gradient(g.from.x as f64, g.from.y as f64, g.to.x as f64, g.to.y as f64);
        for s in g.stops {
            lg.add_color_stop(s.offset, &s.color.css())?;
        }
        Ok(lg)
    }

    /// Translate and rotate into a shape's local frame; caller restores.
    fn local(&self, center: Vec2, rotation: f32) -> Result<(), JsValue> {
        self.ctx.save();
        self.ctx.translate(center.x as f64, center.y as f64)?;
        self.ctx.rotate(rotation as f64)
    }
}

impl Surface for Canvas<'_> {
    type Error = JsValue;

    fn clear(&mut self, w: f32, h: f32) -> Result<(), JsValue> {
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
        Ok(())
    }

    fn fill_rect_gradient(&mut self, rect: Rect, gradient: &Gradient<'_>) -> Result<(), JsValue> {
        let g = self.linear(gradient)?;
        self.ctx.set_fill_style(&g);
        self.ctx.fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
        Ok(())
    }

    fn fill_glow_polygon(&mut self, points: &[Vec2], gradient: &Gradient<'_>) -> Result<(), JsValue> {
        let Some((first, rest)) = points.split_first() else { return Ok(()) };
        self.ctx.set_global_composite_operation("lighter")?;
        let g = self.linear(gradient)?;
        self.ctx.set_fill_style(&g);
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.ctx.fill();
        self.ctx.set_global_composite_operation("source-over")
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.set_fill_style(&color.css().into());
        self.ctx.arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)?;
        self.ctx.fill();
        Ok(())
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) -> Result<(), JsValue> {
        self.ctx.set_stroke_style(&color.css().into());
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
        Ok(())
    }

    fn stroke_gradient_line(&mut self, gradient: &Gradient<'_>, width: f32) -> Result<(), JsValue> {
        let g = self.linear(gradient)?;
        self.ctx.set_stroke_style(&g);
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(gradient.from.x as f64, gradient.from.y as f64);
        self.ctx.line_to(gradient.to.x as f64, gradient.to.y as f64);
        self.ctx.stroke();
        Ok(())
    }

    fn stroke_quadratic(
        &mut self,
        from: Vec2,
        ctrl: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
    ) -> Result<(), JsValue> {
        self.ctx.set_stroke_style(&color.css().into());
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.quadratic_curve_to(ctrl.x as f64, ctrl.y as f64, to.x as f64, to.y as f64);
        self.ctx.stroke();
        Ok(())
    }

    fn fill_petal(&mut self, center: Vec2, rotation: f32, size: f32, color: Rgba) -> Result<(), JsValue> {
        let s = size as f64;
        self.local(center, rotation)?;
        self.ctx.begin_path();
        self.ctx.ellipse(0.0, 0.0, s * 0.6, s, FRAC_PI_4, 0.0, TAU)?;
        self.ctx.set_fill_style(&color.css().into());
        self.ctx.fill();
        self.ctx.restore();
        Ok(())
    }

    fn fill_heart(&mut self, center: Vec2, rotation: f32, size: f32, color: Rgba) -> Result<(), JsValue> {
        let s = size as f64;
        self.local(center, rotation)?;
        self.ctx.begin_path();
        self.ctx.move_to(0.0, -s * 0.18);
        self.ctx.bezier_curve_to(-s, -s * 0.9, -s * 0.9, s * 0.4, 0.0, s);
        self.ctx.bezier_curve_to(s * 0.9, s * 0.4, s, -s * 0.9, 0.0, -s * 0.18);
        self.ctx.set_fill_style(&color.css().into());
        self.ctx.fill();
        self.ctx.restore();
        Ok(())
    }
}
