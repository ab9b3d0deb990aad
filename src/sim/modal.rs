// modal.rs - Letter modal bookkeeping
//
// Tracks whether the modal is open, when it has settled, and whether the
// letter section is scrolled into view.

#[derive(Debug, Clone, Copy, Default)]
pub struct ModalState {
    open: bool,
    section_visible: bool,
    settled_at: Option<f64>,
}

impl ModalState {
    /// Returns false if it was already open.
    pub fn open(&mut self, settled_at: f64) -> bool {
        if self.open { return false; }
        self.open = true;
        self.settled_at = Some(settled_at);
        true
    }

    /// Returns false if it was already closed.
    pub fn close(&mut self) -> bool {
        let was_open = self.open;
        self.open = false;
        self.settled_at = None;
        was_open
    }

    pub fn set_section_visible(&mut self, visible: bool) {
        self.section_visible = visible;
    }

    #[inline] pub fn is_open(&self) -> bool { self.open }
    #[inline] pub fn section_visible(&self) -> bool { self.section_visible }

    /// Open, settled and with the letter section in view.
    pub fn ready(&self, now: f64) -> bool {
        self.open && self.section_visible && self.settled_at.is_some_and(|t| now >= t)
    }
}
