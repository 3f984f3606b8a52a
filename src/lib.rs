//! Fluidfield Engine - decorative stable-fluids background in WASM
//!
//! A coarse velocity grid pushes a four-channel dye field around; the dye
//! is tone-mapped with a glow curve and stretched to the canvas.
//!
//! Architecture:
//! - core/        - grid dimensions, field storage, safety macros
//! - domain/      - configuration and its errors
//! - systems/     - numeric passes (diffuse, project, advect, splat, decay)
//! - simulation/  - FluidCore orchestration and the JS facade
//! - animation/   - frame loop with seed/ambient timers

// Utils with safety macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;
pub mod animation;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&"Fluidfield WASM engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Default configuration as JSON, for hosts that want to tweak a copy.
#[wasm_bindgen]
pub fn default_config_json() -> String {
    domain::FluidConfig::default().to_json()
}

// Re-export main types
pub use animation::{AnimationLoop, LoopState};
pub use crate::core::{FluidFields, GridDims};
pub use domain::{ConfigError, FluidConfig};
pub use simulation::{BufferLayout, FluidAnimation, FluidCore, FluidField, PerfStats, PointerState};
