// math.rs - Scalar helpers shared by factories and the step
//
// Random draws go through `range` so an empty or inverted interval
// collapses to its lower bound instead of panicking.

use glam::Vec2;
use rand::Rng;

/// Nominal frame length the motion constants were tuned against (60 Hz).
pub const FRAME_MS: f32 = 1000.0 / 60.0;

/// Uniform draw in `[a, b)`. Returns `a` when the interval is empty.
#[inline]
pub fn range<R: Rng + ?Sized>(rng: &mut R, a: f32, b: f32) -> f32 {
    if !(b > a) { return a; }
    a + rng.random::<f32>() * (b - a)
}

/// Uniform angle in `[0, TAU)`.
#[inline]
pub fn angle<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    range(rng, 0.0, std::f32::consts::TAU)
}

/// Bernoulli trial with probability `p`.
#[inline]
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f32) -> bool {
    rng.random::<f32>() < p
}

#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.max(lo).min(hi)
}

/// Squared Euclidean distance
#[inline(always)]
pub fn dist2(a: Vec2, b: Vec2) -> f32 {
    a.distance_squared(b)
}

/// Elapsed milliseconds as a fraction of a 60 Hz frame.
#[inline]
pub fn frame_fraction(dt_ms: f32) -> f32 {
    dt_ms / FRAME_MS
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn range_stays_in_interval() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = range(&mut rng, 0.4, 2.0);
            assert!((0.4..2.0).contains(&v));
        }
    }

    #[test]
    fn empty_range_collapses_to_lower_bound() {
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(range(&mut rng, 5.0, 5.0), 5.0);
        assert_eq!(range(&mut rng, 5.0, 1.0), 5.0);
        assert_eq!(range(&mut rng, 0.0, f32::NAN), 0.0);
    }

    #[test]
    fn clamp_and_dist2() {
        assert_eq!(clamp(3.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-3.0, 0.0, 1.0), 0.0);
        assert_eq!(dist2(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)), 25.0);
    }

    #[test]
    fn one_nominal_frame_is_unit_fraction() {
        assert!((frame_fraction(FRAME_MS) - 1.0).abs() < 1e-6);
    }
}
