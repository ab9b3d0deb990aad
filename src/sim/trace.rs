// trace.rs - Short-lived curves between consecutive nearest stars

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trace {
    pub from: Vec2,
    pub to: Vec2,
    /// Simulation time of creation (ms)
    pub born: f64,
    /// Age as of the last update (ms)
    pub age: f32,
}

impl Trace {
    pub fn new(from: Vec2, to: Vec2, born: f64) -> Self {
        Self { from, to, born, age: 0.0 }
    }

    /// Normalized age in `[0, 1)` for live traces.
    #[inline]
    pub fn progress(&self, ttl: f32) -> f32 {
        self.age / ttl
    }
}

#[derive(Debug)]
pub struct Traces {
    items: Vec<Trace>,
    ttl: f32,
}

impl Traces {
    pub fn new(ttl_ms: f32) -> Self {
        Self { items: Vec::new(), ttl: ttl_ms }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn push(&mut self, trace: Trace) {
        self.items.push(trace);
    }

    #[inline] pub fn ttl(&self) -> f32 { self.ttl }
    #[inline] pub fn len(&self) -> usize { self.items.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.items.is_empty() }
    #[inline] pub fn as_slice(&self) -> &[Trace] { &self.items }

    /// Refresh ages and drop traces at or past their TTL.
    pub fn update(&mut self, now: f64) {
        let mut write = 0;

        for read in 0..self.items.len() {
            let mut t = self.items[read];
            t.age = (now - t.born) as f32;
            if t.age >= self.ttl { continue; }

            self.items[write] = t;
            write += 1;
        }

        self.items.truncate(write);
    }
}
