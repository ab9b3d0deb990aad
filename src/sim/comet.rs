// comet.rs - Shooting stars
//
// Spawned on pointer press or at random near the top-left of the sky.
// Each comet flies in a straight line until its lifespan runs out.

use glam::Vec2;
use rand::Rng;

use crate::space::range;

const SPEED_SCALE: f32 = 0.05;

// Auto-spawn region, as fractions of the viewport
const SKY_W: f32 = 0.3;
const SKY_H: f32 = 0.18;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub born: f64,
    pub life: f32,
    pub age: f32,
}

impl Comet {
    pub fn new_at<R: Rng + ?Sized>(pos: Vec2, born: f64, life: f32, rng: &mut R) -> Self {
        Self {
            pos,
            vel: Vec2::new(range(rng, 6.0, 10.0), range(rng, 2.0, 3.5)),
            born,
            life,
            age: 0.0,
        }
    }

    /// Normalized age in `[0, 1)` for live comets.
    #[inline]
    pub fn progress(&self) -> f32 {
        self.age / self.life
    }
}

#[derive(Debug, Default)]
pub struct Comets {
    items: Vec<Comet>,
}

impl Comets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn spawn_at<R: Rng + ?Sized>(&mut self, pos: Vec2, now: f64, life: f32, rng: &mut R) {
        self.items.push(Comet::new_at(pos, now, life, rng));
    }

    /// Spawn somewhere in the upper-left patch of sky.
    pub fn spawn_auto<R: Rng + ?Sized>(&mut self, w: f32, h: f32, now: f64, life: f32, rng: &mut R) {
        let pos = Vec2::new(range(rng, 0.0, w * SKY_W), range(rng, 0.0, h * SKY_H));
        self.spawn_at(pos, now, life, rng);
        tracing::trace!(x = pos.x, y = pos.y, "comet");
    }

    #[inline] pub fn len(&self) -> usize { self.items.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.items.is_empty() }
    #[inline] pub fn as_slice(&self) -> &[Comet] { &self.items }

    /// Drop expired comets, move the rest.
    pub fn update(&mut self, dt_ms: f32, now: f64) {
        let step = dt_ms * SPEED_SCALE;
        let mut write = 0;

        for read in 0..self.items.len() {
            let mut c = self.items[read];
            c.age = (now - c.born) as f32;
            if c.age >= c.life { continue; }

            c.pos += c.vel * step;
            self.items[write] = c;
            write += 1;
        }

        self.items.truncate(write);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn factory_ranges() {
        let mut rng = SmallRng::seed_from_u64(21);
        for _ in 0..200 {
            let c = Comet::new_at(Vec2::ZERO, 0.0, 1200.0, &mut rng);
            assert!((6.0..10.0).contains(&c.vel.x));
            assert!((2.0..3.5).contains(&c.vel.y));
            assert!(c.life > 0.0);
        }
    }

    #[test]
    fn lifespan_law() {
        let mut rng = SmallRng::seed_from_u64(22);
        let mut comets = Comets::new();
        comets.spawn_at(Vec2::ZERO, 500.0, 1200.0, &mut rng);

        comets.update(16.0, 1699.0);
        assert_eq!(comets.len(), 1);
        comets.update(16.0, 1700.0);
        assert!(comets.is_empty());
    }

    #[test]
    fn moves_with_elapsed_time() {
        let mut rng = SmallRng::seed_from_u64(23);
        let mut comets = Comets::new();
        comets.spawn_at(Vec2::ZERO, 0.0, 1200.0, &mut rng);
        let v = comets.as_slice()[0].vel;

        comets.update(20.0, 20.0);
        let c = comets.as_slice()[0];
        assert!((c.pos - v).length() < 1e-4);
        assert!((c.progress() - 20.0 / 1200.0).abs() < 1e-6);
    }

    #[test]
    fn auto_spawn_region() {
        let mut rng = SmallRng::seed_from_u64(24);
        let mut comets = Comets::new();
        for _ in 0..100 {
            comets.spawn_auto(1000.0, 800.0, 0.0, 1200.0, &mut rng);
        }
        assert!(comets.as_slice().iter().all(|c| c.pos.x <= 300.0 && c.pos.y <= 144.01));
    }
}
