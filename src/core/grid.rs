//! Simulation lattice dimensions and indexing
//!
//! The solver runs on a coarse grid derived from the display size divided
//! by the downsampling factor. Cells are stored row-major.

/// Dimensions of the simulation grid in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDims {
    width: usize,
    height: usize,
}

impl GridDims {
    /// Grid of `width × height` cells, each dimension at least 1.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Grid covering a `display_w × display_h` pixel viewport at `scale`
    /// pixels per cell: `ceil(display / scale)` on each axis.
    pub fn for_viewport(display_w: u32, display_h: u32, scale: u32) -> Self {
        let scale = scale.max(1);
        Self::new(
            display_w.div_ceil(scale) as usize,
            display_h.div_ceil(scale) as usize,
        )
    }

    #[inline]
    pub fn width(&self) -> usize { self.width }

    #[inline]
    pub fn height(&self) -> usize { self.height }

    #[inline]
    pub fn cells(&self) -> usize { self.width * self.height }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "index: out of bounds ({}, {}) for {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        y * self.width + x
    }

    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// True when the grid has at least one interior cell. Smaller grids are
    /// inert: every solver pass iterates `1..dim-1`, which is empty.
    #[inline]
    pub fn has_interior(&self) -> bool {
        self.width >= 3 && self.height >= 3
    }
}
