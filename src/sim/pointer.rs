// pointer.rs - Pointer state fed by the page's input events

use glam::Vec2;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pub pos: Option<Vec2>,
    pub prev: Option<Vec2>,
    /// Delta between the last two move events, not time-normalized
    pub vel: Vec2,
    pub down: bool,
    /// Nearest star at the last step that found one
    pub last_nearest: Option<usize>,
}

impl Pointer {
    pub fn at(pos: Vec2) -> Self {
        Self { pos: Some(pos), ..Self::default() }
    }

    pub fn move_to(&mut self, p: Vec2) {
        let prev = self.pos.unwrap_or(p);
        self.prev = Some(prev);
        self.pos = Some(p);
        self.vel = p - prev;
    }

    pub fn press(&mut self, p: Vec2) {
        self.down = true;
        if self.pos.is_none() {
            self.pos = Some(p);
        }
    }

    pub fn release(&mut self) {
        self.down = false;
    }

    /// Pointer left the page: no nearest star, no wind.
    pub fn leave(&mut self) {
        self.pos = None;
        self.prev = None;
        self.vel = Vec2::ZERO;
        self.down = false;
    }
}
