// clock.rs - Simulation time
//
// Time only moves when the step advances it, so aging is deterministic
// and tests never sleep.

#[derive(Debug, Clone, Copy, Default)]
pub struct SimClock {
    now: f64,
    last_stamp: Option<f64>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds of simulated time so far.
    #[inline]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Raw gap between this host timestamp and the previous one.
    /// The first stamp yields zero.
    pub fn delta_to(&mut self, stamp: f64) -> f32 {
        let dt = match self.last_stamp {
            Some(prev) => (stamp - prev) as f32,
            None => 0.0,
        };
        self.last_stamp = Some(stamp);
        dt
    }

    pub fn advance(&mut self, dt_ms: f32) -> f64 {
        self.now += dt_ms as f64;
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::SimClock;

    #[test]
    fn first_stamp_has_no_delta() {
        let mut c = SimClock::new();
        assert_eq!(c.delta_to(1234.0), 0.0);
        assert_eq!(c.delta_to(1250.0), 16.0);
    }

    #[test]
    fn advance_accumulates() {
        let mut c = SimClock::new();
        c.advance(16.0);
        assert_eq!(c.advance(4.0), 20.0);
        assert_eq!(c.now(), 20.0);
    }
}
