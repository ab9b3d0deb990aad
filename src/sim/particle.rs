// particle.rs - Falling petals and hearts
//
// Particles drift down under a light gravity, get pushed around by the
// pointer's motion and are recycled in place when they leave the screen.

use glam::Vec2;
use rand::Rng;

use crate::config::DragMode;
use crate::space::{angle, chance, range};

const HEART_CHANCE: f32 = 0.28;
const RISE_CHANCE: f32 = 0.3;

// Wind response
const WIND_X: f32 = 0.008;
const WIND_Y: f32 = 0.006;
const PULL_X: f32 = 0.9 / 10_000.0;
const PULL_Y: f32 = 0.35 / 12_000.0;
const NOISE: f32 = 0.0004;
const NOISE_RATE: f64 = 0.0002;

const GRAVITY: f32 = 0.01;
const DRAG_X: f32 = 0.994;
const DRAG_Y: f32 = 0.998;

// Recycle bounds
const EXIT_BOTTOM: f32 = 30.0;
const EXIT_SIDE: f32 = 60.0;

// Burst kick
const BURST_SPREAD: f32 = 20.0;
const BURST_KICK_X: f32 = 2.0;
const BURST_LIFT: f32 = 3.0;
const BURST_LIFT_MIN: f32 = 1.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub rot: f32,
    pub rot_speed: f32,
    pub is_heart: bool,
    /// Phase offset for wobble and flicker
    pub id: f32,
}

impl Particle {
    pub fn new_at<R: Rng + ?Sized>(pos: Vec2, id: f32, rng: &mut R) -> Self {
        let is_heart = chance(rng, HEART_CHANCE);
        Self {
            pos,
            vel: Vec2::new(range(rng, -0.3, 0.3), range(rng, 0.1, 0.5)),
            size: range(rng, 6.0, 20.0),
            rot: angle(rng),
            rot_speed: range(rng, -0.01, 0.01),
            is_heart,
            id,
        }
    }

    /// Particle thrown up and out from a press point.
    pub fn burst_at<R: Rng + ?Sized>(center: Vec2, id: f32, rng: &mut R) -> Self {
        let jitter = Vec2::new(
            range(rng, -BURST_SPREAD, BURST_SPREAD),
            range(rng, -BURST_SPREAD, BURST_SPREAD),
        );
        let mut p = Self::new_at(center + jitter, id, rng);
        p.vel.x += range(rng, -BURST_KICK_X, BURST_KICK_X);
        p.vel.y -= range(rng, 0.0, BURST_LIFT) + BURST_LIFT_MIN;
        p
    }

    /// Put back on screen: some hearts float up from below, everything
    /// else falls in from above.
    fn recycle<R: Rng + ?Sized>(&mut self, w: f32, h: f32, rng: &mut R) {
        if self.is_heart && chance(rng, RISE_CHANCE) {
            self.pos = Vec2::new(range(rng, 0.0, w), h + range(rng, 10.0, 60.0));
            self.vel = Vec2::new(range(rng, -0.2, 0.2), -range(rng, 0.1, 0.4));
        } else {
            self.pos = Vec2::new(range(rng, 0.0, w), -range(rng, 20.0, 140.0));
            self.vel = Vec2::new(range(rng, -0.3, 0.3), range(rng, 0.1, 0.5));
        }
    }

    /// Off the sides, or below the bottom while still falling. Rising hearts
    /// start below the bottom edge and are left alone until they turn back.
    fn has_exited(&self, w: f32, h: f32) -> bool {
        self.pos.x < -EXIT_SIDE
            || self.pos.x > w + EXIT_SIDE
            || (self.pos.y > h + EXIT_BOTTOM && self.vel.y >= 0.0)
    }
}

/// Pointer motion as seen by the particles for one step.
#[derive(Debug, Clone, Copy)]
pub struct Wind {
    pub at: Option<Vec2>,
    /// Pointer delta between the last two move events
    pub vel: Vec2,
    pub radius: f32,
}

/// Per-step inputs shared by every particle.
#[derive(Debug, Clone, Copy)]
pub struct ParticleStep {
    pub now: f64,
    pub frames: f32,
    pub w: f32,
    pub h: f32,
    pub drag: DragMode,
}

#[derive(Debug, Default)]
pub struct Particles {
    items: Vec<Particle>,
    target: usize,
}

impl Particles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replace the population with `count` particles over the viewport.
    /// `count` also becomes the nominal target the burst cap derives from.
    pub fn seed<R: Rng + ?Sized>(&mut self, count: usize, w: f32, h: f32, rng: &mut R) {
        self.target = count;
        self.items.clear();
        self.items.reserve(count);
        for i in 0..count {
            let pos = Vec2::new(range(rng, 0.0, w), range(rng, 0.0, h));
            self.items.push(Particle::new_at(pos, i as f32, rng));
        }
    }

    /// Add `count` burst particles at `center`, then drop the oldest ones
    /// beyond the cap.
    pub fn burst<R: Rng + ?Sized>(&mut self, center: Vec2, count: usize, rng: &mut R) {
        for _ in 0..count {
            let id = self.items.len() as f32 + range(rng, 0.0, 1000.0);
            self.items.push(Particle::burst_at(center, id, rng));
        }
        let cap = self.cap();
        if self.items.len() > cap {
            let excess = self.items.len() - cap;
            self.items.drain(..excess);
        }
    }

    pub fn truncate(&mut self, n: usize) {
        self.items.truncate(n);
    }

    pub fn push(&mut self, p: Particle) {
        self.items.push(p);
    }

    #[inline] pub fn target(&self) -> usize { self.target }
    #[inline] pub fn cap(&self) -> usize { self.target * 3 }
    #[inline] pub fn len(&self) -> usize { self.items.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.items.is_empty() }
    #[inline] pub fn as_slice(&self) -> &[Particle] { &self.items }

    pub fn update<R: Rng + ?Sized>(&mut self, wind: &Wind, step: &ParticleStep, rng: &mut R) {
        let f = step.frames;
        let r2 = wind.radius * wind.radius;
        let drag = Vec2::new(step.drag.factor(DRAG_X, f), step.drag.factor(DRAG_Y, f));

        for (i, p) in self.items.iter_mut().enumerate() {
            let pushed = match wind.at {
                Some(at) => {
                    let d = at - p.pos;
                    let d2 = d.length_squared();
                    if d2 < r2 {
                        let k = 1.0 - d2.sqrt() / wind.radius;
                        p.vel.x += (wind.vel.x * WIND_X + d.x * PULL_X) * k * f;
                        p.vel.y += (wind.vel.y * WIND_Y + d.y * PULL_Y) * k * f;
                        true
                    } else {
                        false
                    }
                }
                None => false,
            };
            if !pushed {
                p.vel.x += ((p.id as f64 + step.now * NOISE_RATE + i as f64).sin() as f32) * NOISE * f;
            }

            p.vel.y += GRAVITY * (0.4 + p.size / 40.0) * f;
            p.vel *= drag;
            p.pos += p.vel * f;
            p.rot += p.rot_speed * f;

            if p.has_exited(step.w, step.h) {
                p.recycle(step.w, step.h, rng);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn calm() -> Wind {
        Wind { at: None, vel: Vec2::ZERO, radius: 200.0 }
    }

    fn step(w: f32, h: f32) -> ParticleStep {
        ParticleStep { now: 0.0, frames: 1.0, w, h, drag: DragMode::PerFrame }
    }

    #[test]
    fn factory_ranges() {
        let mut rng = SmallRng::seed_from_u64(11);
        for i in 0..500 {
            let p = Particle::new_at(Vec2::ZERO, i as f32, &mut rng);
            assert!((6.0..20.0).contains(&p.size));
            assert!((0.1..0.5).contains(&p.vel.y));
            assert!((-0.3..0.3).contains(&p.vel.x));
            assert!((-0.01..0.01).contains(&p.rot_speed));
        }
    }

    #[test]
    fn burst_kicks_upward() {
        let mut rng = SmallRng::seed_from_u64(12);
        for _ in 0..200 {
            let p = Particle::burst_at(Vec2::new(100.0, 100.0), 0.0, &mut rng);
            // base vy < 0.5, lift >= 1.4
            assert!(p.vel.y < -0.9);
            assert!((p.pos - Vec2::new(100.0, 100.0)).abs().max_element() <= 20.0);
        }
    }

    #[test]
    fn burst_respects_cap() {
        let mut rng = SmallRng::seed_from_u64(13);
        let mut ps = Particles::new();
        ps.seed(4, 100.0, 100.0, &mut rng);
        for _ in 0..10 {
            ps.burst(Vec2::new(50.0, 50.0), 10, &mut rng);
            assert!(ps.len() <= 12);
        }
        assert_eq!(ps.len(), 12);
    }

    #[test]
    fn falling_particle_recycles_above_top() {
        let mut rng = SmallRng::seed_from_u64(14);
        let mut ps = Particles::new();
        let mut p = Particle::new_at(Vec2::new(50.0, 131.0), 0.0, &mut rng);
        p.is_heart = false;
        p.vel = Vec2::new(0.0, 1.0);
        ps.push(p);
        ps.update(&calm(), &step(100.0, 100.0), &mut rng);

        let p = ps.as_slice()[0];
        assert!((-140.0..=-20.0).contains(&p.pos.y));
        assert!((0.0..100.0).contains(&p.pos.x));
        assert!((0.1..0.5).contains(&p.vel.y));
    }

    #[test]
    fn recycled_hearts_enter_from_either_end() {
        let mut rng = SmallRng::seed_from_u64(15);
        let (w, h) = (300.0, 200.0);
        let mut rose = 0;
        for _ in 0..400 {
            let mut p = Particle::new_at(Vec2::ZERO, 0.0, &mut rng);
            p.is_heart = true;
            p.recycle(w, h, &mut rng);
            if p.vel.y < 0.0 {
                rose += 1;
                assert!((h + 10.0..h + 60.0).contains(&p.pos.y));
                assert!((-0.4..=-0.1).contains(&p.vel.y));
                assert!((-0.2..0.2).contains(&p.vel.x));
            } else {
                assert!((-140.0..=-20.0).contains(&p.pos.y));
            }
        }
        assert!(rose > 60 && rose < 200, "rose {rose}");
    }

    #[test]
    fn rising_heart_below_screen_is_kept() {
        let mut rng = SmallRng::seed_from_u64(16);
        let mut ps = Particles::new();
        let mut p = Particle::new_at(Vec2::new(50.0, 150.0), 0.0, &mut rng);
        p.is_heart = true;
        p.vel = Vec2::new(0.0, -0.4);
        ps.push(p);
        ps.update(&calm(), &step(100.0, 100.0), &mut rng);
        assert!(ps.as_slice()[0].pos.y < 150.0);
        assert!(ps.as_slice()[0].pos.y > 140.0);
    }

    #[test]
    fn time_scaled_drag_compounds_over_long_frames() {
        let mut rng = SmallRng::seed_from_u64(18);
        let mut p = Particle::new_at(Vec2::new(500.0, 500.0), 0.0, &mut rng);
        p.vel = Vec2::new(0.2, 0.0);

        let run = |drag: DragMode, rng: &mut SmallRng| {
            let mut ps = Particles::new();
            ps.push(p);
            let step = ParticleStep { now: 0.0, frames: 6.0, w: 1000.0, h: 1000.0, drag };
            ps.update(&calm(), &step, rng);
            ps.as_slice()[0]
        };
        let per_frame = run(DragMode::PerFrame, &mut rng);
        let scaled = run(DragMode::TimeScaled, &mut rng);

        // id 0, index 0 and now 0 zero the noise term
        assert!((per_frame.vel.x - 0.2 * DRAG_X).abs() < 1e-6);
        assert!((scaled.vel.x - 0.2 * DRAG_X.powi(6)).abs() < 1e-6);
        assert!(scaled.vel.x < per_frame.vel.x);
    }

    #[test]
    fn wind_pushes_nearby_particles_only() {
        let mut rng = SmallRng::seed_from_u64(17);
        let mut ps = Particles::new();
        let mut near = Particle::new_at(Vec2::new(100.0, 100.0), 0.0, &mut rng);
        near.vel = Vec2::ZERO;
        let mut far = near;
        far.pos = Vec2::new(900.0, 100.0);
        ps.push(near);
        ps.push(far);

        let wind = Wind { at: Some(Vec2::new(110.0, 100.0)), vel: Vec2::new(40.0, 0.0), radius: 200.0 };
        ps.update(&wind, &step(1000.0, 1000.0), &mut rng);

        let (near, far) = (ps.as_slice()[0], ps.as_slice()[1]);
        assert!(near.vel.x > 0.2);
        assert!(far.vel.x.abs() < 0.01);
    }
}
