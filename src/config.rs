// config.rs - Engine configuration and viewport-derived population targets

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How velocity damping reacts to the frame length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragMode {
    /// Multiply by the damping constant once per step, whatever the frame length.
    #[default]
    PerFrame,
    /// Raise the constant to the frame fraction so damping per second is
    /// the same at any refresh rate.
    TimeScaled,
}

impl DragMode {
    /// Damping factor to apply for a step covering `frames` nominal frames.
    #[inline]
    pub fn factor(self, base: f32, frames: f32) -> f32 {
        match self {
            DragMode::PerFrame => base,
            DragMode::TimeScaled => base.powf(frames),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixed RNG seed; random per page load when absent.
    pub seed: Option<u64>,
    /// Overrides the viewport-derived star count.
    pub star_count: Option<usize>,
    /// Overrides the viewport-derived particle count.
    pub particle_count: Option<usize>,
    pub reduced_motion: bool,
    pub drag_mode: DragMode,
    pub trace_ttl_ms: f32,
    pub comet_life_ms: f32,
    pub comet_rate_per_sec: f32,
    pub burst_count: usize,
    pub letter_heart_count: usize,
    pub modal_settle_ms: f32,
    pub wind_radius: f32,
    /// Longest step the simulation will take; longer gaps (background tabs) are cut.
    pub max_frame_ms: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            star_count: None,
            particle_count: None,
            reduced_motion: false,
            drag_mode: DragMode::PerFrame,
            trace_ttl_ms: 700.0,
            comet_life_ms: 1200.0,
            comet_rate_per_sec: 0.015,
            burst_count: 10,
            letter_heart_count: 30,
            modal_settle_ms: 600.0,
            wind_radius: 200.0,
            max_frame_ms: 100.0,
        }
    }
}

impl Config {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("trace_ttl_ms", self.trace_ttl_ms)?;
        positive("comet_life_ms", self.comet_life_ms)?;
        positive("wind_radius", self.wind_radius)?;
        positive("max_frame_ms", self.max_frame_ms)?;
        non_negative("comet_rate_per_sec", self.comet_rate_per_sec)?;
        non_negative("modal_settle_ms", self.modal_settle_ms)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() { Ok(()) } else { Err(ConfigError::NonPositive { field, value }) }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() { Ok(()) } else { Err(ConfigError::Negative { field, value }) }
}

/// Star and particle caps under reduced motion.
pub const REDUCED_STARS: usize = 80;
pub const REDUCED_PARTICLES: usize = 40;

/// Viewport in CSS pixels plus device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub dpr: f32,
}

impl Viewport {
    /// Non-finite or negative sizes become zero; dpr is at least 1.
    pub fn new(width: f32, height: f32, dpr: f32) -> Self {
        let sane = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let dpr = if dpr.is_finite() { dpr.max(1.0) } else { 1.0 };
        Self { width: sane(width), height: sane(height), dpr }
    }

    /// One star per 38 000 px², between 90 and 400.
    pub fn star_target(&self) -> usize {
        let n = (self.width * self.height / 38_000.0).floor() as usize;
        n.clamp(90, 400)
    }

    /// Narrow screens get a third of the petals.
    pub fn particle_target(&self) -> usize {
        if self.width < 700.0 { 60 } else { 180 }
    }

    /// 12% of the short side, at most 180 px.
    pub fn connect_radius(&self) -> f32 {
        (self.width.min(self.height) * 0.12).round().min(180.0)
    }
}
