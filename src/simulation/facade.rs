use wasm_bindgen::prelude::*;

use crate::animation::AnimationLoop;
use crate::domain::FluidConfig;

use super::perf_stats::PerfStats;
use super::FluidCore;

fn host_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        super::init::DEFAULT_SEED
    }
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Byte offsets of the pixel buffers in WASM memory. Invalidated by `resize`.
#[wasm_bindgen]
pub struct BufferLayout {
    pixels_ptr: u32,
    pixels_len_bytes: u32,
    grid_width: u32,
    grid_height: u32,
    display_ptr: u32,
    display_len_bytes: u32,
    display_width: u32,
    display_height: u32,
}

impl BufferLayout {
    fn of(core: &FluidCore) -> Self {
        BufferLayout {
            pixels_ptr: core.pixels_ptr() as u32,
            pixels_len_bytes: core.pixels_len() as u32,
            grid_width: core.grid_width(),
            grid_height: core.grid_height(),
            display_ptr: core.display_ptr() as u32,
            display_len_bytes: core.display_len() as u32,
            display_width: core.display_width(),
            display_height: core.display_height(),
        }
    }
}

#[wasm_bindgen]
impl BufferLayout {
    #[wasm_bindgen(getter)]
    pub fn pixels_ptr(&self) -> u32 { self.pixels_ptr }
    #[wasm_bindgen(getter)]
    pub fn pixels_len_bytes(&self) -> u32 { self.pixels_len_bytes }
    #[wasm_bindgen(getter)]
    pub fn grid_width(&self) -> u32 { self.grid_width }
    #[wasm_bindgen(getter)]
    pub fn grid_height(&self) -> u32 { self.grid_height }

    #[wasm_bindgen(getter)]
    pub fn display_ptr(&self) -> u32 { self.display_ptr }
    #[wasm_bindgen(getter)]
    pub fn display_len_bytes(&self) -> u32 { self.display_len_bytes }
    #[wasm_bindgen(getter)]
    pub fn display_width(&self) -> u32 { self.display_width }
    #[wasm_bindgen(getter)]
    pub fn display_height(&self) -> u32 { self.display_height }
}

#[wasm_bindgen]
pub struct FluidField {
    core: FluidCore,
}

#[wasm_bindgen]
impl FluidField {
    /// Create a simulator for a canvas of the given pixel size
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            core: FluidCore::new(width, height, FluidConfig::default(), host_seed()),
        }
    }

    #[wasm_bindgen(js_name = withConfigJson)]
    pub fn with_config_json(width: u32, height: u32, json: &str) -> Result<FluidField, JsValue> {
        let config = FluidConfig::from_json(json).map_err(to_js)?;
        Ok(Self {
            core: FluidCore::new(width, height, config, host_seed()),
        })
    }

    pub fn set_config_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.core.set_config_json(json).map_err(to_js)
    }

    pub fn config_json(&self) -> String {
        self.core.config().to_json()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.display_width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.display_height() }

    #[wasm_bindgen(getter)]
    pub fn grid_width(&self) -> u32 { self.core.grid_width() }

    #[wasm_bindgen(getter)]
    pub fn grid_height(&self) -> u32 { self.core.grid_height() }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step/render perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.perf_stats()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.core.resize(width, height);
    }

    pub fn inject_force(&mut self, x: f32, y: f32, fx: f32, fy: f32) {
        self.core.inject_force(x, y, fx, fy);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.core.pointer_move(x, y);
    }

    pub fn apply_pointer_force(&mut self) -> bool {
        self.core.apply_pointer_force()
    }

    pub fn ambient_impulse(&mut self) {
        self.core.ambient_impulse();
    }

    pub fn seed_impulse(&mut self) {
        self.core.seed_impulse();
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    pub fn step(&mut self) {
        self.core.step();
    }

    pub fn step_by(&mut self, dt: f32) {
        self.core.step_by(dt);
    }

    /// Refresh both pixel buffers. Read them through `display_ptr` / `pixels_ptr`.
    pub fn render(&mut self) {
        self.core.render();
    }

    pub fn total_dye(&self) -> f64 {
        self.core.total_dye()
    }

    /// Velocity at a grid cell as `[vx, vy]`
    pub fn velocity_at(&self, x: u32, y: u32) -> Vec<f32> {
        let (vx, vy) = self.core.velocity(x, y);
        vec![vx, vy]
    }

    /// Dye at a grid cell as `[r, g, b, a]`
    pub fn dye_at(&self, x: u32, y: u32) -> Vec<f32> {
        self.core.dye(x, y).to_vec()
    }

    /// Get pointer to the grid-resolution RGBA buffer
    pub fn pixels_ptr(&self) -> *const u8 {
        self.core.pixels_ptr()
    }

    pub fn pixels_len(&self) -> usize {
        self.core.pixels_len()
    }

    /// Get pointer to the display-resolution RGBA buffer
    pub fn display_ptr(&self) -> *const u8 {
        self.core.display_ptr()
    }

    pub fn display_len(&self) -> usize {
        self.core.display_len()
    }

    pub fn buffer_layout(&self) -> BufferLayout {
        BufferLayout::of(&self.core)
    }
}

impl FluidField {
    pub fn core(&self) -> &FluidCore { &self.core }

    pub fn core_mut(&mut self) -> &mut FluidCore { &mut self.core }
}

/// Self-driving background: call `frame(performance.now())` from
/// `requestAnimationFrame` and `stop()` on teardown.
#[wasm_bindgen]
pub struct FluidAnimation {
    inner: AnimationLoop,
}

#[wasm_bindgen]
impl FluidAnimation {
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            inner: AnimationLoop::new(FluidCore::new(
                width,
                height,
                FluidConfig::default(),
                host_seed(),
            )),
        }
    }

    #[wasm_bindgen(js_name = withConfigJson)]
    pub fn with_config_json(width: u32, height: u32, json: &str) -> Result<FluidAnimation, JsValue> {
        let field = FluidField::with_config_json(width, height, json)?;
        Ok(Self {
            inner: AnimationLoop::new(field.core),
        })
    }

    pub fn start(&mut self, now_ms: f64) {
        self.inner.start(now_ms);
    }

    /// Returns `false` once stopped; the host should stop requesting frames.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        self.inner.frame(now_ms)
    }

    pub fn stop(&mut self) {
        self.inner.stop();
    }

    #[wasm_bindgen(getter)]
    pub fn is_running(&self) -> bool { self.inner.is_running() }

    #[wasm_bindgen(getter)]
    pub fn frames_rendered(&self) -> u64 { self.inner.frames_rendered() }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.inner.core().display_width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.inner.core().display_height() }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.inner.pointer_move(x, y);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.inner.resize(width, height);
    }

    pub fn display_ptr(&self) -> *const u8 {
        self.inner.core().display_ptr()
    }

    pub fn display_len(&self) -> usize {
        self.inner.core().display_len()
    }

    pub fn buffer_layout(&self) -> BufferLayout {
        BufferLayout::of(self.inner.core())
    }
}

impl FluidAnimation {
    pub fn animation(&self) -> &AnimationLoop { &self.inner }
}
