// letter.rs - Hearts orbiting the open letter modal
//
// Hearts are placed just outside the modal's edges and held in a loose
// ring around it: pulled back when they stray, nudged out when they get
// too close to the middle.

use glam::Vec2;
use rand::Rng;

use crate::config::DragMode;
use crate::space::{Rect, angle, range};

// Spawn band outside each edge
const EDGE_GAP: f32 = 20.0;
const EDGE_DEPTH: f32 = 40.0;

// Orbit shaping
const ORBIT_FACTOR: f32 = 0.6;
const FAR_FACTOR: f32 = 1.2;
const NEAR_FACTOR: f32 = 0.5;
const PULL: f32 = 0.001;
const PUSH: f32 = 0.0005;

// Drift
const DRIFT_X: f32 = 0.0006;
const DRIFT_Y: f32 = 0.0004;

const DRAG_X: f32 = 0.996;
const DRAG_Y: f32 = 0.997;

/// Hearts beyond this distance from the modal are respawned.
const ESCAPE_MARGIN: f32 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterHeart {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub rot: f32,
    pub rot_speed: f32,
    pub id: f32,
    /// Base opacity before flicker
    pub alpha: f32,
}

impl LetterHeart {
    pub fn new_at<R: Rng + ?Sized>(pos: Vec2, id: f32, rng: &mut R) -> Self {
        Self {
            pos,
            vel: launch(rng),
            size: range(rng, 6.0, 16.0),
            rot: angle(rng),
            rot_speed: range(rng, -0.0075, 0.0075),
            id,
            alpha: range(rng, 0.3, 0.8),
        }
    }
}

fn launch<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::new(range(rng, -0.15, 0.15), -range(rng, 0.2, 0.6))
}

/// A point just outside a random edge of `rect`.
pub fn edge_spawn<R: Rng + ?Sized>(rect: &Rect, rng: &mut R) -> Vec2 {
    let out = EDGE_GAP + range(rng, 0.0, EDGE_DEPTH);
    match rng.random_range(0..4u8) {
        0 => Vec2::new(rect.left() + range(rng, 0.0, rect.w), rect.top() - out),
        1 => Vec2::new(rect.right() + out, rect.top() + range(rng, 0.0, rect.h)),
        2 => Vec2::new(rect.left() + range(rng, 0.0, rect.w), rect.bottom() + out),
        _ => Vec2::new(rect.left() - out, rect.top() + range(rng, 0.0, rect.h)),
    }
}

#[derive(Debug, Default)]
pub struct LetterHearts {
    items: Vec<LetterHeart>,
}

impl LetterHearts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn seed<R: Rng + ?Sized>(&mut self, count: usize, rect: &Rect, rng: &mut R) {
        self.items.clear();
        for i in 0..count {
            let pos = edge_spawn(rect, rng);
            self.items.push(LetterHeart::new_at(pos, i as f32, rng));
        }
    }

    #[inline] pub fn len(&self) -> usize { self.items.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.items.is_empty() }
    #[inline] pub fn as_slice(&self) -> &[LetterHeart] { &self.items }

    pub fn update<R: Rng + ?Sized>(
        &mut self,
        rect: &Rect,
        now: f64,
        frames: f32,
        drag: DragMode,
        rng: &mut R,
    ) {
        let f = frames;
        let center = rect.center();
        let target = rect.w.max(rect.h) * ORBIT_FACTOR;
        let bounds = rect.expand(ESCAPE_MARGIN);
        let drag = Vec2::new(drag.factor(DRAG_X, f), drag.factor(DRAG_Y, f));

        for h in self.items.iter_mut() {
            let id = h.id as f64;
            h.vel.x += (((id + now * 0.0003) * 0.5).sin() as f32) * DRIFT_X * f;
            h.vel.y += (((id + now * 0.0002) * 0.5).cos() as f32) * DRIFT_Y * f;

            let d = h.pos - center;
            let dist = d.length();
            if dist > 0.0 {
                let dir = d / dist;
                if dist > target * FAR_FACTOR {
                    h.vel -= dir * PULL * f;
                } else if dist < target * NEAR_FACTOR {
                    h.vel += dir * PUSH * f;
                }
            }

            h.vel *= drag;
            h.pos += h.vel * f;
            h.rot += h.rot_speed * f;

            if !bounds.contains(h.pos) {
                h.pos = edge_spawn(rect, rng);
                h.vel = launch(rng);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn modal() -> Rect {
        Rect::new(200.0, 100.0, 400.0, 300.0)
    }

    fn outside_edge_band(p: Vec2, r: &Rect) -> bool {
        let band = r.expand(EDGE_GAP + EDGE_DEPTH);
        let inner = r.expand(EDGE_GAP - 0.001);
        band.contains(p) && !inner.contains(p)
    }

    #[test]
    fn seeds_around_edges() {
        let mut rng = SmallRng::seed_from_u64(31);
        let mut hearts = LetterHearts::new();
        hearts.seed(30, &modal(), &mut rng);
        assert_eq!(hearts.len(), 30);
        for h in hearts.as_slice() {
            assert!(outside_edge_band(h.pos, &modal()), "{:?}", h.pos);
            assert!((6.0..16.0).contains(&h.size));
            assert!((0.3..0.8).contains(&h.alpha));
            assert!(h.vel.y < 0.0);
        }
    }

    #[test]
    fn escaped_heart_respawns_at_edge() {
        let mut rng = SmallRng::seed_from_u64(32);
        let mut hearts = LetterHearts::new();
        hearts.seed(1, &modal(), &mut rng);
        hearts.items[0].pos = Vec2::new(2000.0, 2000.0);
        hearts.update(&modal(), 0.0, 1.0, DragMode::PerFrame, &mut rng);
        assert!(outside_edge_band(hearts.as_slice()[0].pos, &modal()));
    }

    #[test]
    fn heart_at_center_does_not_go_nan() {
        let mut rng = SmallRng::seed_from_u64(33);
        let mut hearts = LetterHearts::new();
        hearts.seed(1, &modal(), &mut rng);
        hearts.items[0].pos = modal().center();
        hearts.update(&modal(), 16.0, 1.0, DragMode::PerFrame, &mut rng);
        assert!(hearts.as_slice()[0].pos.is_finite());
    }

    #[test]
    fn crowding_heart_is_pushed_out() {
        let mut rng = SmallRng::seed_from_u64(35);
        let mut hearts = LetterHearts::new();
        hearts.seed(1, &modal(), &mut rng);
        // 50 px from center, inside half the 240 px target
        hearts.items[0].pos = modal().center() + Vec2::new(50.0, 0.0);
        hearts.items[0].vel = Vec2::ZERO;
        hearts.update(&modal(), 0.0, 1.0, DragMode::PerFrame, &mut rng);
        let h = hearts.as_slice()[0];
        assert!(h.vel.x > 0.0);
        assert!((h.vel.x - PUSH * DRAG_X).abs() < 1e-7);
    }

    #[test]
    fn time_scaled_drag_damps_hearts_harder() {
        let mut rng = SmallRng::seed_from_u64(36);
        let mut hearts = LetterHearts::new();
        hearts.seed(1, &modal(), &mut rng);
        // between 0.5x and 1.2x the target: no containment force
        hearts.items[0].pos = modal().center() + Vec2::new(200.0, 0.0);
        hearts.items[0].vel = Vec2::new(0.3, 0.0);
        let mut scaled = LetterHearts { items: hearts.items.clone() };

        hearts.update(&modal(), 0.0, 6.0, DragMode::PerFrame, &mut rng);
        scaled.update(&modal(), 0.0, 6.0, DragMode::TimeScaled, &mut rng);
        assert!((hearts.as_slice()[0].vel.x - 0.3 * DRAG_X).abs() < 1e-6);
        assert!((scaled.as_slice()[0].vel.x - 0.3 * DRAG_X.powi(6)).abs() < 1e-6);
    }

    #[test]
    fn straying_heart_is_pulled_back() {
        let mut rng = SmallRng::seed_from_u64(34);
        let mut hearts = LetterHearts::new();
        hearts.seed(1, &modal(), &mut rng);
        // target radius 240; 1.2x = 288, still inside the escape box
        hearts.items[0].pos = modal().center() + Vec2::new(340.0, 0.0);
        hearts.items[0].vel = Vec2::ZERO;
        hearts.update(&modal(), 0.0, 1.0, DragMode::PerFrame, &mut rng);
        assert!(hearts.as_slice()[0].vel.x < 0.0);
    }
}
