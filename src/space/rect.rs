// rect.rs - Screen rectangles and the modal geometry capability

use glam::Vec2;

/// Axis-aligned rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w: w.max(0.0), h: h.max(0.0) }
    }

    #[inline] pub fn left(&self) -> f32 { self.x }
    #[inline] pub fn top(&self) -> f32 { self.y }
    #[inline] pub fn right(&self) -> f32 { self.x + self.w }
    #[inline] pub fn bottom(&self) -> f32 { self.y + self.h }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Grow by `m` on every side.
    pub fn expand(&self, m: f32) -> Rect {
        Rect::new(self.x - m, self.y - m, self.w + m * 2.0, self.h + m * 2.0)
    }

    /// Inclusive containment.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }
}

/// Supplies the on-screen rectangle of the open modal, if any.
///
/// The letter-heart update asks once per frame; the page decides how the
/// rectangle is measured.
pub trait ModalBounds {
    fn modal_rect(&self) -> Option<Rect>;
}

impl ModalBounds for Rect {
    fn modal_rect(&self) -> Option<Rect> { Some(*self) }
}

impl ModalBounds for Option<Rect> {
    fn modal_rect(&self) -> Option<Rect> { *self }
}

/// No modal on screen.
pub struct NoModal;

impl ModalBounds for NoModal {
    fn modal_rect(&self) -> Option<Rect> { None }
}
