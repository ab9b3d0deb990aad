// star.rs - Background starfield
//
// Stars drift along a slowly bending heading and wrap at the viewport
// edges. The population is only replaced on reseed.

use glam::Vec2;
use rand::Rng;

use crate::space::{angle, range};

/// How far past an edge a star may travel before it wraps.
pub const WRAP_MARGIN: f32 = 10.0;

// Drift tuning
const DRIFT_SCALE: f32 = 0.06;
const BEND_RATE: f64 = 0.00012;
const BEND_AMOUNT: f32 = 0.0005;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub r: f32,
    pub angle: f32,
    pub speed: f32,
    pub phase: f32,
}

impl Star {
    pub fn new_at<R: Rng + ?Sized>(pos: Vec2, rng: &mut R) -> Self {
        Self {
            pos,
            r: range(rng, 0.4, 2.0),
            angle: angle(rng),
            speed: range(rng, 0.3, 0.9) * 0.02,
            phase: angle(rng),
        }
    }
}

#[derive(Debug, Default)]
pub struct Stars {
    items: Vec<Star>,
}

impl Stars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replace the population with `count` stars scattered over the viewport.
    pub fn seed<R: Rng + ?Sized>(&mut self, count: usize, w: f32, h: f32, rng: &mut R) {
        self.items.clear();
        self.items.reserve(count);
        for _ in 0..count {
            let pos = Vec2::new(range(rng, 0.0, w), range(rng, 0.0, h));
            self.items.push(Star::new_at(pos, rng));
        }
    }

    pub fn truncate(&mut self, n: usize) {
        self.items.truncate(n);
    }

    pub fn push(&mut self, star: Star) {
        self.items.push(star);
    }

    #[inline] pub fn len(&self) -> usize { self.items.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.items.is_empty() }
    #[inline] pub fn get(&self, i: usize) -> Option<&Star> { self.items.get(i) }
    #[inline] pub fn as_slice(&self) -> &[Star] { &self.items }

    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.items.iter().map(|s| s.pos)
    }

    /// Drift every star and wrap at the edges.
    pub fn update(&mut self, dt_ms: f32, now: f64, frames: f32, w: f32, h: f32) {
        let step = dt_ms * DRIFT_SCALE;
        for (i, s) in self.items.iter_mut().enumerate() {
            s.pos += Vec2::new(s.angle.cos(), s.angle.sin()) * s.speed * step;
            s.angle += (now * BEND_RATE + i as f64).sin() as f32 * BEND_AMOUNT * frames;
            s.pos.x = wrap(s.pos.x, w);
            s.pos.y = wrap(s.pos.y, h);
        }
    }
}

/// Wrap past either edge to just beyond the opposite one.
#[inline]
fn wrap(v: f32, extent: f32) -> f32 {
    if v < -WRAP_MARGIN {
        extent + WRAP_MARGIN
    } else if v > extent + WRAP_MARGIN {
        -WRAP_MARGIN
    } else {
        v
    }
}
