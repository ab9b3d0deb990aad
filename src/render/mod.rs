// render/ - Paint a simulated frame
//
// Draw order, back to front:
//   background gradient, aurora bands, stars, nearest-star links,
//   nearest marker, traces, comets, petals/hearts, letter hearts.
//
// The renderer only reads the world; any surface works (canvas on the
// page, command buffer for JS, recorder in tests).

#[cfg(target_arch = "wasm32")]
mod canvas;
pub mod encoder;
mod surface;

#[cfg(target_arch = "wasm32")]
pub use canvas::Canvas;
pub use encoder::Encoder;
pub use surface::{ColorStop, Gradient, Rgba, Surface, stop};

use glam::Vec2;

use crate::sim::{Comet, LetterHeart, Particle, Star, Trace, World};
use crate::space::Rect;

// Palette
const SKY: [ColorStop; 3] = [
    stop(0.0, Rgba::opaque(0x0b, 0x08, 0x20)),
    stop(0.42, Rgba::opaque(0x24, 0x10, 0x31)),
    stop(1.0, Rgba::opaque(0x10, 0x03, 0x13)),
];

const AURORA: [[ColorStop; 3]; 3] = [
    [
        stop(0.0, Rgba::new(220, 160, 255, 0.06)),
        stop(0.5, Rgba::new(255, 190, 230, 0.09)),
        stop(1.0, Rgba::new(200, 220, 255, 0.04)),
    ],
    [
        stop(0.0, Rgba::new(200, 160, 255, 0.03)),
        stop(0.5, Rgba::new(220, 170, 255, 0.05)),
        stop(1.0, Rgba::new(190, 210, 255, 0.02)),
    ],
    [
        stop(0.0, Rgba::new(210, 180, 255, 0.02)),
        stop(0.5, Rgba::new(210, 200, 255, 0.03)),
        stop(1.0, Rgba::new(180, 200, 240, 0.01)),
    ],
];

const COMET_TAIL: [ColorStop; 2] = [
    stop(0.0, Rgba::new(255, 255, 255, 0.95)),
    stop(1.0, Rgba::new(255, 200, 240, 0.0)),
];

const STAR: Rgba = Rgba::opaque(255, 255, 255);
const LINK: Rgba = Rgba::opaque(220, 200, 255);
const MARKER: Rgba = Rgba::new(255, 240, 255, 0.9);
const TRACE: Rgba = Rgba::opaque(255, 220, 240);
const COMET_HEAD: Rgba = Rgba::new(255, 255, 255, 0.95);
const HEART: Rgba = Rgba::opaque(255, 150, 185);
const PETAL: Rgba = Rgba::opaque(255, 150, 180);
const LETTER_HEART: Rgba = Rgba::opaque(255, 100, 150);

// Aurora geometry
const AURORA_STEP: f32 = 30.0;
const AURORA_OVERHANG: f32 = 150.0;

const LINK_WIDTH: f32 = 0.9;

#[inline]
fn wave(now: f64, rate: f64, offset: f64) -> f32 {
    (now * rate + offset).sin() as f32
}

/// Star opacity at time `now`: brighter for larger stars, pulsing by phase.
pub fn twinkle_alpha(star: &Star, now: f64) -> f32 {
    let tw = 0.45 + 0.55 * (0.5 + 0.5 * wave(now, 0.002, star.phase as f64));
    0.25 + 0.7 * tw * (star.r / 2.0)
}

/// Link opacity for two stars `d2` apart (squared), fading out at `r2`.
pub fn link_alpha(d2: f32, r2: f32) -> f32 {
    0.28 * (1.0 - d2 / r2)
}

#[derive(Debug, Default)]
pub struct Renderer {
    band: Vec<Vec2>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render<S: Surface>(&mut self, world: &World, surface: &mut S) -> Result<(), S::Error> {
        let vp = world.viewport();
        let now = world.now();
        let (w, h) = (vp.width, vp.height);

        surface.clear(w, h)?;
        surface.fill_rect_gradient(
            Rect::new(0.0, 0.0, w, h),
            &Gradient { from: Vec2::ZERO, to: Vec2::new(0.0, h), stops: &SKY },
        )?;
        self.draw_aurora(surface, w, h, now)?;

        for s in world.stars() {
            surface.fill_circle(s.pos, s.r, STAR.with_alpha(twinkle_alpha(s, now)))?;
        }
        draw_links(surface, world.stars(), world.nearest(), world.connect_radius())?;

        let ttl = world.trace_ttl();
        for t in world.traces() {
            draw_trace(surface, t, ttl)?;
        }
        for c in world.comets() {
            draw_comet(surface, c)?;
        }
        for p in world.particles() {
            draw_particle(surface, p, now)?;
        }
        for lh in world.letter_hearts() {
            draw_letter_heart(surface, lh, now)?;
        }
        Ok(())
    }

    /// Three soft wavy bands, added on top of the sky.
    fn draw_aurora<S: Surface>(&mut self, surface: &mut S, w: f32, h: f32, now: f64) -> Result<(), S::Error> {
        for (b, stops) in AURORA.iter().enumerate() {
            let bf = b as f32;
            let band_y = h * (0.18 + bf * 0.18);
            let amp = 40.0 + bf * 20.0 + wave(now, 0.00025, b as f64) * 18.0;

            self.band.clear();
            self.band.push(Vec2::new(-AURORA_OVERHANG, band_y));
            let mut x = -AURORA_OVERHANG;
            while x <= w + AURORA_OVERHANG {
                let swell = 0.55 + 0.45 * (x * 0.001 + bf).sin();
                let y = band_y + wave(now, 0.0003, (x * 0.004 + bf) as f64) * amp * swell;
                self.band.push(Vec2::new(x, y));
                x += AURORA_STEP;
            }
            self.band.push(Vec2::new(w + 200.0, h + 120.0));
            self.band.push(Vec2::new(-200.0, h + 120.0));

            let gradient = Gradient {
                from: Vec2::new(0.0, band_y - amp * 1.6),
                to: Vec2::new(0.0, band_y + amp * 1.6),
                stops,
            };
            surface.fill_glow_polygon(&self.band, &gradient)?;
        }
        Ok(())
    }
}

/// Lines from the nearest star to its neighbours, then its marker.
fn draw_links<S: Surface>(
    surface: &mut S,
    stars: &[Star],
    nearest: Option<usize>,
    radius: f32,
) -> Result<(), S::Error> {
    let Some(s) = nearest.and_then(|n| stars.get(n)) else { return Ok(()) };
    let r2 = radius * radius;

    for (j, t) in stars.iter().enumerate() {
        if Some(j) == nearest { continue; }
        let d2 = s.pos.distance_squared(t.pos);
        if d2 <= r2 {
            surface.stroke_line(s.pos, t.pos, LINK_WIDTH, LINK.with_alpha(link_alpha(d2, r2)))?;
        }
    }
    surface.fill_circle(s.pos, s.r * 1.8 + 0.7, MARKER)
}

fn draw_trace<S: Surface>(surface: &mut S, t: &Trace, ttl: f32) -> Result<(), S::Error> {
    let fade = 1.0 - t.progress(ttl);
    let age = t.age as f64;
    let bulge = Vec2::new(wave(age, 0.008, 0.0) * 18.0, (age * 0.006).cos() as f32 * 12.0);
    let ctrl = (t.from + t.to) * 0.5 + bulge;
    surface.stroke_quadratic(t.from, ctrl, t.to, 2.0 * fade, TRACE.with_alpha(0.9 * fade))
}

fn draw_comet<S: Surface>(surface: &mut S, c: &Comet) -> Result<(), S::Error> {
    let fade = 1.0 - c.progress();
    let trail = 40.0 + fade * 120.0;
    let tail = Gradient { from: c.pos, to: c.pos - c.vel * trail, stops: &COMET_TAIL };
    surface.stroke_gradient_line(&tail, 2.0 + fade * 3.0)?;
    surface.fill_circle(c.pos, 2.2 + fade * 2.6, COMET_HEAD)
}

fn draw_particle<S: Surface>(surface: &mut S, p: &Particle, now: f64) -> Result<(), S::Error> {
    let id = p.id as f64;
    let rot = p.rot + wave(now, 0.001, id) * 0.04;
    if p.is_heart {
        let a = 0.12 + (0.45 * wave(now, 0.004, id).abs()).min(0.7);
        surface.fill_heart(p.pos, rot, p.size, HEART.with_alpha(a))
    } else {
        let a = 0.15 + 0.35 * wave(now, 0.002, id).abs();
        surface.fill_petal(p.pos, rot, p.size, PETAL.with_alpha(a))
    }
}

fn draw_letter_heart<S: Surface>(surface: &mut S, h: &LetterHeart, now: f64) -> Result<(), S::Error> {
    let id = h.id as f64;
    let rot = h.rot + wave(now, 0.001, id) * 0.1;
    let a = h.alpha * (0.6 + 0.4 * wave(now, 0.003, id).abs());
    surface.fill_heart(h.pos, rot, h.size, LETTER_HEART.with_alpha(a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Viewport};
    use crate::space::NoModal;
    use std::convert::Infallible;

    /// Counts primitives by kind and keeps line alphas.
    #[derive(Default)]
    struct Recorder {
        clears: usize,
        rects: usize,
        polygons: Vec<usize>,
        circles: Vec<(Vec2, f32, Rgba)>,
        lines: Vec<Rgba>,
        gradient_lines: usize,
        quads: Vec<(f32, Rgba)>,
        petals: usize,
        hearts: Vec<Rgba>,
    }

    impl Surface for Recorder {
        type Error = Infallible;

        fn clear(&mut self, _w: f32, _h: f32) -> Result<(), Infallible> {
            self.clears += 1;
            Ok(())
        }
        fn fill_rect_gradient(&mut self, _r: Rect, _g: &Gradient<'_>) -> Result<(), Infallible> {
            self.rects += 1;
            Ok(())
        }
        fn fill_glow_polygon(&mut self, pts: &[Vec2], _g: &Gradient<'_>) -> Result<(), Infallible> {
            self.polygons.push(pts.len());
            Ok(())
        }
        fn fill_circle(&mut self, c: Vec2, r: f32, color: Rgba) -> Result<(), Infallible> {
            self.circles.push((c, r, color));
            Ok(())
        }
        fn stroke_line(&mut self, _a: Vec2, _b: Vec2, _w: f32, color: Rgba) -> Result<(), Infallible> {
            self.lines.push(color);
            Ok(())
        }
        fn stroke_gradient_line(&mut self, _g: &Gradient<'_>, _w: f32) -> Result<(), Infallible> {
            self.gradient_lines += 1;
            Ok(())
        }
        fn stroke_quadratic(&mut self, _a: Vec2, _c: Vec2, _b: Vec2, w: f32, color: Rgba) -> Result<(), Infallible> {
            self.quads.push((w, color));
            Ok(())
        }
        fn fill_petal(&mut self, _c: Vec2, _r: f32, _s: f32, _color: Rgba) -> Result<(), Infallible> {
            self.petals += 1;
            Ok(())
        }
        fn fill_heart(&mut self, _c: Vec2, _r: f32, _s: f32, color: Rgba) -> Result<(), Infallible> {
            self.hearts.push(color);
            Ok(())
        }
    }

    fn star(x: f32, y: f32) -> Star {
        Star { pos: Vec2::new(x, y), r: 1.0, angle: 0.0, speed: 0.0, phase: 0.0 }
    }

    fn world() -> World {
        let cfg = Config { seed: Some(5), comet_rate_per_sec: 0.0, ..Config::default() };
        World::new(Viewport::new(1000.0, 800.0, 1.0), cfg).unwrap()
    }

    #[test]
    fn alpha_helpers() {
        let s = Star { r: 2.0, ..star(0.0, 0.0) };
        // sin(0) = 0 -> tw = 0.725
        assert!((twinkle_alpha(&s, 0.0) - (0.25 + 0.7 * 0.725)).abs() < 1e-6);
        assert_eq!(link_alpha(0.0, 100.0), 0.28);
        assert_eq!(link_alpha(100.0, 100.0), 0.0);
    }

    #[test]
    fn paints_every_population() {
        let mut w = world();
        w.step(16.0, &NoModal);
        w.pointer_down(500.0, 400.0);

        let mut rec = Recorder::default();
        Renderer::new().render(&w, &mut rec).unwrap();

        assert_eq!(rec.clears, 1);
        assert_eq!(rec.rects, 1);
        assert_eq!(rec.polygons.len(), 3);
        // 1000 + 300 overhang sampled every 30 px, plus start and two closing corners
        assert_eq!(rec.polygons[0], 44 + 3);

        let hearts = w.particles().iter().filter(|p| p.is_heart).count();
        assert_eq!(rec.hearts.len(), hearts);
        assert_eq!(rec.petals, w.particles().len() - hearts);
        assert_eq!(rec.gradient_lines, 1);
    }

    #[test]
    fn links_only_within_radius() {
        let mut w = world();
        // radius 96
        w.set_stars([star(100.0, 100.0), star(150.0, 100.0), star(100.0, 190.0), star(400.0, 400.0)]);
        w.pointer_move(101.0, 101.0);
        w.step(16.0, &NoModal);
        assert_eq!(w.nearest(), Some(0));

        let mut rec = Recorder::default();
        Renderer::new().render(&w, &mut rec).unwrap();

        assert_eq!(rec.lines.len(), 2);
        assert!(rec.lines[0].a > rec.lines[1].a, "closer neighbour is brighter");
        // 4 stars, 1 marker, 0 comets
        assert_eq!(rec.circles.len(), 5);
        let marker = rec.circles[4];
        assert_eq!(marker.0, Vec2::new(100.0, 100.0));
        assert!((marker.1 - 2.5).abs() < 1e-6);
    }

    #[test]
    fn traces_fade_with_age() {
        let mut w = world();
        w.set_stars([star(100.0, 100.0), star(150.0, 100.0)]);
        w.pointer_move(100.0, 100.0);
        w.step(16.0, &NoModal);
        w.pointer_move(150.0, 100.0);
        w.step(16.0, &NoModal);

        let mut rec = Recorder::default();
        let mut r = Renderer::new();
        r.render(&w, &mut rec).unwrap();
        let fresh = rec.quads[0];
        assert!((fresh.0 - 2.0).abs() < 1e-6);

        for _ in 0..20 {
            w.step(16.0, &NoModal);
        }
        let mut rec = Recorder::default();
        r.render(&w, &mut rec).unwrap();
        let older = rec.quads[0];
        assert!(older.0 < fresh.0);
        assert!(older.1.a < fresh.1.a);
    }
}
