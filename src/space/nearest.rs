// nearest.rs - Nearest-star lookup
//
// Linear scan; populations stay under a few hundred stars so an index
// would cost more than it saves.

use glam::Vec2;

use super::dist2;

/// Index of the point closest to `at`, or `None` when the pointer is absent,
/// `points` is empty, or the closest one is farther than `radius`.
/// Ties keep the first index encountered.
pub fn nearest_within<I>(at: Option<Vec2>, points: I, radius: f32) -> Option<usize>
where
    I: IntoIterator<Item = Vec2>,
{
    let at = at?;
    if !at.is_finite() { return None; }

    let mut best: Option<(usize, f32)> = None;
    for (i, p) in points.into_iter().enumerate() {
        let d = dist2(at, p);
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((i, d)),
        }
    }

    let (i, d) = best?;
    if d > radius * radius { return None; }
    Some(i)
}
