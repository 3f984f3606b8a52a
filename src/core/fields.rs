//! Field storage (SoA)
//!
//! Velocity components and the interleaved RGBA dye live in flat `Vec<f32>`
//! buffers. Every buffer that a pass writes has a snapshot partner
//! (`vx0`, `vy0`, `dye0`) so reads never observe the pass's own writes
//! unless the pass is Gauss-Seidel by definition.

use super::grid::GridDims;

/// Number of dye channels per cell (RGBA).
pub const DYE_CHANNELS: usize = 4;

pub struct FluidFields {
    pub(crate) dims: GridDims,
    pub(crate) vx: Vec<f32>,
    pub(crate) vy: Vec<f32>,
    pub(crate) vx0: Vec<f32>,
    pub(crate) vy0: Vec<f32>,
    pub(crate) pressure: Vec<f32>,
    pub(crate) divergence: Vec<f32>,
    pub(crate) dye: Vec<f32>,
    pub(crate) dye0: Vec<f32>,
}

impl FluidFields {
    pub fn new(dims: GridDims) -> Self {
        let size = dims.cells();
        Self {
            dims,
            vx: vec![0.0; size],
            vy: vec![0.0; size],
            vx0: vec![0.0; size],
            vy0: vec![0.0; size],
            pressure: vec![0.0; size],
            divergence: vec![0.0; size],
            dye: vec![0.0; size * DYE_CHANNELS],
            dye0: vec![0.0; size * DYE_CHANNELS],
        }
    }

    #[inline]
    pub fn dims(&self) -> GridDims { self.dims }

    /// Zero every buffer without reallocating.
    pub fn clear(&mut self) {
        for buf in [
            &mut self.vx,
            &mut self.vy,
            &mut self.vx0,
            &mut self.vy0,
            &mut self.pressure,
            &mut self.divergence,
            &mut self.dye,
            &mut self.dye0,
        ] {
            buf.fill(0.0);
        }
    }

    /// Copy the live velocity into the snapshot buffers.
    pub(crate) fn snapshot_velocity(&mut self) {
        self.vx0.copy_from_slice(&self.vx);
        self.vy0.copy_from_slice(&self.vy);
    }

    pub(crate) fn snapshot_dye(&mut self) {
        self.dye0.copy_from_slice(&self.dye);
    }

    pub fn velocity(&self, x: usize, y: usize) -> (f32, f32) {
        if x < self.dims.width() && y < self.dims.height() {
            let i = self.dims.index(x, y);
            (self.vx[i], self.vy[i])
        } else {
            (0.0, 0.0)
        }
    }

    pub fn dye(&self, x: usize, y: usize) -> [f32; DYE_CHANNELS] {
        if x < self.dims.width() && y < self.dims.height() {
            let base = self.dims.index(x, y) * DYE_CHANNELS;
            [
                self.dye[base],
                self.dye[base + 1],
                self.dye[base + 2],
                self.dye[base + 3],
            ]
        } else {
            [0.0; DYE_CHANNELS]
        }
    }

    pub fn velocity_field(&self) -> (&[f32], &[f32]) {
        (&self.vx, &self.vy)
    }

    pub fn dye_field(&self) -> &[f32] {
        &self.dye
    }

    /// Sum of every dye channel over every cell.
    pub fn total_dye(&self) -> f64 {
        self.dye.iter().map(|&v| f64::from(v)).sum()
    }

    /// True when every velocity and dye value is exactly zero.
    pub fn is_quiescent(&self) -> bool {
        self.vx.iter().chain(&self.vy).chain(&self.dye).all(|&v| v == 0.0)
    }

    /// Bytes held by the field buffers (for perf reporting).
    pub fn memory_bytes(&self) -> usize {
        let floats = self.vx.len()
            + self.vy.len()
            + self.vx0.len()
            + self.vy0.len()
            + self.pressure.len()
            + self.divergence.len()
            + self.dye.len()
            + self.dye0.len();
        floats * std::mem::size_of::<f32>()
    }
}
