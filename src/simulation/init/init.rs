use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::core::{FluidFields, GridDims};
use crate::domain::FluidConfig;

use super::commands::PointerState;
use super::perf_stats::PerfStats;
use super::upscale::UpscaleLut;
use super::{FluidCore, RenderBuffers};

pub(super) const DEFAULT_SEED: u64 = 12345;

pub(super) fn create_fluid_core(width: u32, height: u32, config: FluidConfig, seed: u64) -> FluidCore {
    let dims = GridDims::for_viewport(width, height, config.sim_scale);
    tracing::debug!(
        width,
        height,
        grid_w = dims.width(),
        grid_h = dims.height(),
        "fluid core created"
    );

    FluidCore {
        fields: FluidFields::new(dims),
        display_width: width,
        display_height: height,
        render: create_render_buffers(dims, width, height),
        pointer: PointerState::default(),
        rng: SmallRng::seed_from_u64(seed),
        config,
        frame: 0,
        injections: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}

pub(super) fn create_render_buffers(dims: GridDims, width: u32, height: u32) -> RenderBuffers {
    RenderBuffers {
        pixels: vec![0u8; dims.cells() * 4],
        display: vec![0u8; (width as usize) * (height as usize) * 4],
        columns: UpscaleLut::new(dims.width(), width as usize),
        rows: UpscaleLut::new(dims.height(), height as usize),
    }
}
