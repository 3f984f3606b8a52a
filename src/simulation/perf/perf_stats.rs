use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) diffuse_ms: f64,
    pub(super) project_ms: f64,
    pub(super) advect_ms: f64,
    pub(super) dye_ms: f64,
    pub(super) decay_ms: f64,
    pub(super) render_ms: f64,
    pub(super) upscale_ms: f64,
    pub(super) grid_cells: u32,
    pub(super) display_pixels: u32,
    pub(super) memory_bytes: u32,
    pub(super) injections: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn diffuse_ms(&self) -> f64 { self.diffuse_ms }
    #[wasm_bindgen(getter)]
    pub fn project_ms(&self) -> f64 { self.project_ms }
    #[wasm_bindgen(getter)]
    pub fn advect_ms(&self) -> f64 { self.advect_ms }
    #[wasm_bindgen(getter)]
    pub fn dye_ms(&self) -> f64 { self.dye_ms }
    #[wasm_bindgen(getter)]
    pub fn decay_ms(&self) -> f64 { self.decay_ms }
    #[wasm_bindgen(getter)]
    pub fn render_ms(&self) -> f64 { self.render_ms }
    #[wasm_bindgen(getter)]
    pub fn upscale_ms(&self) -> f64 { self.upscale_ms }
    #[wasm_bindgen(getter)]
    pub fn grid_cells(&self) -> u32 { self.grid_cells }
    #[wasm_bindgen(getter)]
    pub fn display_pixels(&self) -> u32 { self.display_pixels }
    #[wasm_bindgen(getter)]
    pub fn memory_bytes(&self) -> u32 { self.memory_bytes }
    /// Injections applied between the previous step and this one.
    #[wasm_bindgen(getter)]
    pub fn injections(&self) -> u32 { self.injections }
}
