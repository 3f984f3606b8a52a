//! Core storage: grid dimensions, field buffers and access helpers

#[macro_use]
pub mod utils {
    #[macro_use]
    pub mod safety;
}

pub mod grid;
pub mod fields;

pub use fields::{FluidFields, DYE_CHANNELS};
pub use grid::GridDims;
