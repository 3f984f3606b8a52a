//! FluidCore - the decorative fluid background
//!
//! Owns the velocity/dye fields, the pointer state and the output pixel
//! buffers. The heavy lifting lives elsewhere:
//! - numeric passes in `systems::fluid`
//! - per-frame orchestration in `step/`
//! - rasterization and upscaling in `render/`
//! - injections and pointer handling in `commands/`
//!
//! A frame is `step` followed by `render`; the host (or `animation::AnimationLoop`)
//! drives it.

use rand::rngs::SmallRng;

use crate::core::{FluidFields, GridDims, DYE_CHANNELS};
use crate::domain::{ConfigError, FluidConfig};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/step.rs"]
mod step;
#[path = "render/render.rs"]
mod render;
#[path = "render/upscale.rs"]
mod upscale;
#[path = "commands/commands.rs"]
mod commands;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use commands::PointerState;
pub use facade::{BufferLayout, FluidAnimation, FluidField};
pub use perf_stats::PerfStats;

use perf_timer::PerfTimer;
use upscale::UpscaleLut;

/// Output buffers and the cached upscale lookup tables.
pub(crate) struct RenderBuffers {
    /// RGBA at grid resolution.
    pub(crate) pixels: Vec<u8>,
    /// RGBA at display resolution.
    pub(crate) display: Vec<u8>,
    pub(crate) columns: UpscaleLut,
    pub(crate) rows: UpscaleLut,
}

/// The fluid simulator
pub struct FluidCore {
    config: FluidConfig,
    fields: FluidFields,
    display_width: u32,
    display_height: u32,
    render: RenderBuffers,
    pointer: PointerState,
    rng: SmallRng,

    // State
    frame: u64,
    injections: u32,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl FluidCore {
    /// Create a simulator for a `width × height` pixel viewport.
    pub fn new(width: u32, height: u32, config: FluidConfig, seed: u64) -> Self {
        init::create_fluid_core(width, height, config, seed)
    }

    pub fn with_default_config(width: u32, height: u32) -> Self {
        Self::new(width, height, FluidConfig::default(), init::DEFAULT_SEED)
    }

    pub fn config(&self) -> &FluidConfig { &self.config }

    /// Replace the configuration. A changed `sim_scale` rebuilds the grid.
    pub fn set_config(&mut self, config: FluidConfig) -> Result<(), ConfigError> {
        settings::set_config(self, config)
    }

    pub fn set_config_json(&mut self, json: &str) -> Result<(), ConfigError> {
        let config = FluidConfig::from_json(json)?;
        self.set_config(config)
    }

    pub fn grid_dims(&self) -> GridDims { self.fields.dims() }

    pub fn grid_width(&self) -> u32 { self.fields.dims().width() as u32 }

    pub fn grid_height(&self) -> u32 { self.fields.dims().height() as u32 }

    pub fn display_width(&self) -> u32 { self.display_width }

    pub fn display_height(&self) -> u32 { self.display_height }

    /// Number of completed steps since creation or the last resize.
    pub fn frame(&self) -> u64 { self.frame }

    pub fn fields(&self) -> &FluidFields { &self.fields }

    pub fn pointer(&self) -> PointerState { self.pointer }

    pub fn velocity(&self, x: u32, y: u32) -> (f32, f32) {
        self.fields.velocity(x as usize, y as usize)
    }

    pub fn dye(&self, x: u32, y: u32) -> [f32; DYE_CHANNELS] {
        self.fields.dye(x as usize, y as usize)
    }

    pub fn total_dye(&self) -> f64 { self.fields.total_dye() }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last step/render perf snapshot (zeros when perf disabled)
    pub fn perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === COMMANDS ===

    /// Reallocate the grid for a new viewport; all field state is dropped.
    pub fn resize(&mut self, width: u32, height: u32) {
        commands::resize(self, width, height);
    }

    /// Add a force splat (and matching dye) centered at display pixel `(px, py)`.
    pub fn inject_force(&mut self, px: f32, py: f32, fx: f32, fy: f32) {
        commands::inject_force(self, px, py, fx, fy);
    }

    /// Record the latest pointer position (display pixels). Last value wins.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        commands::pointer_move(self, x, y);
    }

    /// Turn the pointer delta since the previous frame into a force splat.
    pub fn apply_pointer_force(&mut self) -> bool {
        commands::apply_pointer_force(self)
    }

    /// Random splash anywhere on the display.
    pub fn ambient_impulse(&mut self) {
        commands::ambient_impulse(self);
    }

    /// Fixed-speed splash in the central band of the display.
    pub fn seed_impulse(&mut self) {
        commands::seed_impulse(self);
    }

    /// Zero every field without reallocating.
    pub fn clear(&mut self) {
        commands::clear(self);
    }

    // === FRAME ===

    /// Advance one frame using the configured timestep.
    pub fn step(&mut self) {
        let dt = self.config.dt;
        step::step(self, dt);
    }

    /// Advance one frame with an explicit timestep.
    pub fn step_by(&mut self, dt: f32) {
        step::step(self, dt);
    }

    /// Rasterize the dye field and upscale it to the display buffer.
    pub fn render(&mut self) -> &[u8] {
        render::render(self);
        &self.render.display
    }

    /// Grid-resolution RGBA from the last `render`.
    pub fn pixels(&self) -> &[u8] { &self.render.pixels }

    /// Display-resolution RGBA from the last `render`.
    pub fn display_pixels(&self) -> &[u8] { &self.render.display }

    /// Get pointer to the grid-resolution pixel buffer (for JS ImageData views)
    pub fn pixels_ptr(&self) -> *const u8 { self.render.pixels.as_ptr() }

    pub fn pixels_len(&self) -> usize { self.render.pixels.len() }

    /// Get pointer to the display-resolution pixel buffer
    pub fn display_ptr(&self) -> *const u8 { self.render.display.as_ptr() }

    pub fn display_len(&self) -> usize { self.render.display.len() }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
