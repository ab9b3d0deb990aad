// sim/ - Background simulation
//
// One `World` owns every population plus the pointer and the clock.
// Each entity type lives in its own module; `World::step` runs them in
// a fixed order so the renderer always sees a consistent frame.

mod clock;
mod comet;
mod letter;
mod modal;
mod particle;
mod pointer;
mod star;
mod trace;

pub use clock::SimClock;
pub use comet::{Comet, Comets};
pub use letter::{LetterHeart, LetterHearts, edge_spawn};
pub use modal::ModalState;
pub use particle::{Particle, ParticleStep, Particles, Wind};
pub use pointer::Pointer;
pub use star::{Star, Stars, WRAP_MARGIN};
pub use trace::{Trace, Traces};

use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info};

use crate::config::{Config, REDUCED_PARTICLES, REDUCED_STARS, Viewport};
use crate::error::ConfigError;
use crate::space::{ModalBounds, chance, frame_fraction, nearest_within};

/// Seed used when neither the config nor the host supplies one.
pub const DEFAULT_SEED: u64 = 0x5EED_57A2_D057;

/// Background simulation state
pub struct World {
    config: Config,
    viewport: Viewport,
    connect_radius: f32,
    clock: SimClock,

    // Entities
    stars: Stars,
    particles: Particles,
    traces: Traces,
    comets: Comets,
    hearts: LetterHearts,

    // Inputs
    pointer: Pointer,
    modal: ModalState,

    /// Nearest star found by the last step
    nearest: Option<usize>,
    reduced_motion: bool,

    rng: SmallRng,
}

impl World {
    pub fn new(viewport: Viewport, config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let seed = config.seed.unwrap_or(DEFAULT_SEED);
        let mut world = Self {
            viewport,
            connect_radius: viewport.connect_radius(),
            clock: SimClock::new(),
            stars: Stars::new(),
            particles: Particles::new(),
            traces: Traces::new(config.trace_ttl_ms),
            comets: Comets::new(),
            hearts: LetterHearts::new(),
            pointer: Pointer::at(Vec2::new(viewport.width * 0.5, viewport.height * 0.5)),
            modal: ModalState::default(),
            nearest: None,
            reduced_motion: false,
            rng: SmallRng::seed_from_u64(seed),
            config,
        };

        world.seed_populations();
        if world.config.reduced_motion {
            world.apply_reduced_motion();
        }
        Ok(world)
    }

    fn seed_populations(&mut self) {
        let (w, h) = (self.viewport.width, self.viewport.height);
        let stars = self.config.star_count.unwrap_or_else(|| self.viewport.star_target());
        let particles = self.config.particle_count.unwrap_or_else(|| self.viewport.particle_target());

        self.connect_radius = self.viewport.connect_radius();
        self.stars.seed(stars, w, h, &mut self.rng);
        self.particles.seed(particles, w, h, &mut self.rng);
        self.nearest = None;
        self.pointer.last_nearest = None;

        debug!(stars, particles, w, h, radius = self.connect_radius, "seeded");
    }

    // ------------------------------------------------------------------
    // Frame
    // ------------------------------------------------------------------

    /// Step using a host timestamp (ms), e.g. from `requestAnimationFrame`.
    pub fn tick<B: ModalBounds + ?Sized>(&mut self, stamp_ms: f64, bounds: &B) {
        let dt = self.clock.delta_to(stamp_ms);
        self.step(dt, bounds);
    }

    /// Advance every population by `dt_ms`.
    pub fn step<B: ModalBounds + ?Sized>(&mut self, dt_ms: f32, bounds: &B) {
        let dt = self.sanitize_dt(dt_ms);
        let now = self.clock.advance(dt);
        let frames = frame_fraction(dt);
        let (w, h) = (self.viewport.width, self.viewport.height);

        self.stars.update(dt, now, frames, w, h);
        self.link_nearest(now);
        self.traces.update(now);

        self.comets.update(dt, now);
        if chance(&mut self.rng, self.config.comet_rate_per_sec * dt / 1000.0) {
            self.comets.spawn_auto(w, h, now, self.config.comet_life_ms, &mut self.rng);
        }

        let wind = Wind { at: self.pointer.pos, vel: self.pointer.vel, radius: self.config.wind_radius };
        let step = ParticleStep { now, frames, w, h, drag: self.config.drag_mode };
        self.particles.update(&wind, &step, &mut self.rng);

        self.update_letter_hearts(now, frames, bounds);
    }

    /// Non-finite and negative gaps become zero; long gaps are cut short.
    fn sanitize_dt(&self, dt_ms: f32) -> f32 {
        if !dt_ms.is_finite() { return 0.0; }
        dt_ms.clamp(0.0, self.config.max_frame_ms)
    }

    /// Find the star under the pointer and leave a trace when it changes.
    fn link_nearest(&mut self, now: f64) {
        self.nearest = nearest_within(self.pointer.pos, self.stars.positions(), self.connect_radius);
        let Some(n) = self.nearest else { return };

        if let Some(p) = self.pointer.last_nearest.filter(|&p| p != n) {
            if let (Some(a), Some(b)) = (self.stars.get(p), self.stars.get(n)) {
                self.traces.push(Trace::new(a.pos, b.pos, now));
            }
        }
        self.pointer.last_nearest = Some(n);
    }

    fn update_letter_hearts<B: ModalBounds + ?Sized>(&mut self, now: f64, frames: f32, bounds: &B) {
        let rect = bounds.modal_rect();

        if self.modal.is_open() {
            if self.hearts.is_empty() && self.modal.ready(now) {
                if let Some(rect) = rect.as_ref() {
                    self.hearts.seed(self.config.letter_heart_count, rect, &mut self.rng);
                    debug!(count = self.hearts.len(), "letter hearts seeded");
                }
            }
        } else if !self.hearts.is_empty() {
            self.hearts.clear();
        }

        if self.hearts.is_empty() { return; }
        let Some(rect) = rect else { return };
        self.hearts.update(&rect, now, frames, self.config.drag_mode, &mut self.rng);
    }

    // ------------------------------------------------------------------
    // Pointer
    // ------------------------------------------------------------------

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.pointer.move_to(Vec2::new(x, y));
    }

    /// Press: one comet and a small burst of particles at the press point.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        let at = Vec2::new(x, y);
        self.pointer.press(at);
        self.comets.spawn_at(at, self.clock.now(), self.config.comet_life_ms, &mut self.rng);
        self.particles.burst(at, self.config.burst_count, &mut self.rng);
    }

    pub fn pointer_up(&mut self) {
        self.pointer.release();
    }

    pub fn pointer_leave(&mut self) {
        self.pointer.leave();
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// New viewport: reseed stars and particles, and the letter hearts if
    /// any are showing.
    pub fn resize<B: ModalBounds + ?Sized>(&mut self, viewport: Viewport, bounds: &B) {
        self.viewport = viewport;
        self.seed_populations();

        if !self.hearts.is_empty() {
            match bounds.modal_rect() {
                Some(rect) => self.hearts.seed(self.config.letter_heart_count, &rect, &mut self.rng),
                None => self.hearts.clear(),
            }
        }

        if self.reduced_motion {
            self.cap_for_reduced_motion();
        }
    }

    /// Drop traces and comets and shrink the populations. The loop keeps running.
    pub fn apply_reduced_motion(&mut self) {
        self.reduced_motion = true;
        self.cap_for_reduced_motion();
        info!(stars = self.stars.len(), particles = self.particles.len(), "reduced motion");
    }

    fn cap_for_reduced_motion(&mut self) {
        self.traces.clear();
        self.comets.clear();
        self.stars.truncate(REDUCED_STARS);
        self.particles.truncate(REDUCED_PARTICLES);
    }

    /// Hearts appear once the modal has settled and the letter section is in view.
    pub fn open_modal(&mut self) {
        let settled_at = self.clock.now() + self.config.modal_settle_ms as f64;
        if self.modal.open(settled_at) {
            info!(settled_at, "letter modal opened");
        }
    }

    pub fn close_modal(&mut self) {
        if self.modal.close() {
            info!("letter modal closed");
        }
        self.hearts.clear();
    }

    pub fn set_section_visible(&mut self, visible: bool) {
        self.modal.set_section_visible(visible);
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[inline] pub fn config(&self) -> &Config { &self.config }
    #[inline] pub fn viewport(&self) -> Viewport { self.viewport }
    #[inline] pub fn connect_radius(&self) -> f32 { self.connect_radius }
    #[inline] pub fn now(&self) -> f64 { self.clock.now() }
    #[inline] pub fn nearest(&self) -> Option<usize> { self.nearest }
    #[inline] pub fn pointer(&self) -> &Pointer { &self.pointer }
    #[inline] pub fn modal(&self) -> &ModalState { &self.modal }
    #[inline] pub fn reduced_motion(&self) -> bool { self.reduced_motion }
    #[inline] pub fn particle_cap(&self) -> usize { self.particles.cap() }
    #[inline] pub fn trace_ttl(&self) -> f32 { self.traces.ttl() }

    #[inline] pub fn stars(&self) -> &[Star] { self.stars.as_slice() }
    #[inline] pub fn particles(&self) -> &[Particle] { self.particles.as_slice() }
    #[inline] pub fn traces(&self) -> &[Trace] { self.traces.as_slice() }
    #[inline] pub fn comets(&self) -> &[Comet] { self.comets.as_slice() }
    #[inline] pub fn letter_hearts(&self) -> &[LetterHeart] { self.hearts.as_slice() }

    /// Replace the star field, e.g. to stage a known layout.
    pub fn set_stars(&mut self, stars: impl IntoIterator<Item = Star>) {
        self.stars.clear();
        for s in stars {
            self.stars.push(s);
        }
        self.nearest = None;
        self.pointer.last_nearest = None;
    }
}
