use wasm_bindgen::prelude::*;

// ============================================================================
// STARDUST - Animated night-sky background for the greeting page
// ============================================================================
//
// The page owns the canvas, the DOM and the event listeners. Every frame it
// calls `tick(now)` and then either `draw(ctx)` or `encode()` + replays the
// command buffer. Pointer, resize and modal events are forwarded as they
// arrive.

pub mod config;
pub mod error;
pub mod render;
pub mod sim;
pub mod space;

pub use config::{Config, DragMode, Viewport};
pub use error::ConfigError;
pub use render::{Encoder, Renderer, Surface};
pub use sim::World;
pub use space::{ModalBounds, NoModal, Rect};

#[wasm_bindgen]
pub struct Stardust {
    world: World,
    renderer: Renderer,
    encoder: Encoder,
    /// Last modal rectangle reported by the page
    modal_rect: Option<Rect>,
}

#[wasm_bindgen]
impl Stardust {
    #[wasm_bindgen(constructor)]
    pub fn new(w: f32, h: f32, dpr: f32) -> Result<Stardust, JsValue> {
        Self::build(Viewport::new(w, h, dpr), Config::default())
    }

    /// Construct with a JSON config; missing fields take their defaults.
    pub fn with_config(w: f32, h: f32, dpr: f32, config_json: &str) -> Result<Stardust, JsValue> {
        let config = Config::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::build(Viewport::new(w, h, dpr), config)
    }

    fn build(viewport: Viewport, mut config: Config) -> Result<Stardust, JsValue> {
        if config.seed.is_none() {
            config.seed = Some(host_seed());
        }
        let world = World::new(viewport, config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            world,
            renderer: Renderer::new(),
            encoder: Encoder::new(),
            modal_rect: None,
        })
    }

    /// Advance to the host timestamp (ms) of this animation frame.
    pub fn tick(&mut self, now: f64) {
        self.world.tick(now, &self.modal_rect);
    }

    pub fn resize(&mut self, w: f32, h: f32, dpr: f32) {
        self.world.resize(Viewport::new(w, h, dpr), &self.modal_rect);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) { self.world.pointer_move(x, y); }
    pub fn pointer_down(&mut self, x: f32, y: f32) { self.world.pointer_down(x, y); }
    pub fn pointer_up(&mut self) { self.world.pointer_up(); }
    pub fn pointer_leave(&mut self) { self.world.pointer_leave(); }

    pub fn open_modal(&mut self) { self.world.open_modal(); }
    pub fn close_modal(&mut self) { self.world.close_modal(); }
    pub fn set_section_visible(&mut self, visible: bool) { self.world.set_section_visible(visible); }

    /// Bounding box of the modal content, in CSS pixels.
    pub fn set_modal_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.modal_rect = Some(Rect::new(x, y, w, h));
    }

    pub fn clear_modal_rect(&mut self) {
        self.modal_rect = None;
    }

    /// `prefers-reduced-motion` matched.
    pub fn reduce_motion(&mut self) {
        self.world.apply_reduced_motion();
    }

    /// Render the current frame into the command buffer.
    pub fn encode(&mut self) {
        self.encoder.reset();
        match self.renderer.render(&self.world, &mut self.encoder) {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    /// Paint the current frame onto a 2D context.
    #[cfg(target_arch = "wasm32")]
    pub fn draw(&mut self, ctx: &web_sys::CanvasRenderingContext2d) -> Result<(), JsValue> {
        let mut canvas = render::Canvas::new(ctx, self.world.viewport().dpr)?;
        self.renderer.render(&self.world, &mut canvas)
    }

    // Accessors for JS
    pub fn output_ptr(&self) -> *const f32 { self.encoder.ptr() }
    pub fn output_len(&self) -> usize { self.encoder.len() }
    pub fn star_count(&self) -> usize { self.world.stars().len() }
    pub fn particle_count(&self) -> usize { self.world.particles().len() }
    pub fn trace_count(&self) -> usize { self.world.traces().len() }
    pub fn comet_count(&self) -> usize { self.world.comets().len() }
    pub fn letter_heart_count(&self) -> usize { self.world.letter_hearts().len() }
}

impl Stardust {
    pub fn world(&self) -> &World { &self.world }

    pub fn commands(&self) -> &[f32] { self.encoder.as_slice() }
}

#[cfg(target_arch = "wasm32")]
fn host_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn host_seed() -> u64 {
    sim::DEFAULT_SEED
}
