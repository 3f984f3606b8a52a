//! Stable-fluids kernels
//!
//! Flat-slice passes used by the simulation step:
//! - `diffuse` / `diffuse_dye` - implicit viscosity and dye spread
//! - `project` - pressure correction toward a divergence-free velocity
//! - `advect` / `advect_dye` - semi-Lagrangian transport
//! - `inject` - force + dye splats
//! - `decay` - dye budget, fade and velocity damping
//!
//! Every kernel only touches interior cells (`1..dim-1`); grids smaller
//! than 3 cells on an axis pass through untouched.

mod advect;
mod decay;
mod diffuse;
mod inject;
mod project;

pub use advect::{advect, advect_dye};
pub use decay::{cap_dye_totals, damp_velocity, dye_totals, fade_dye};
pub use diffuse::{diffuse, diffuse_dye};
pub use inject::splat;
pub use project::{mean_divergence, project};
