pub mod config;
pub mod error;

pub use config::{
    AmbientConfig, CursorGlow, FluidConfig, GlowCurve, InjectionConfig, MAX_SOLVER_PASSES,
    MAX_SPLAT_RADIUS,
};
pub use error::ConfigError;
