//! Tuning parameters for the fluid background
//!
//! None of these values are physically derived; they are the look-and-feel
//! knobs of the effect. Every section deserializes with defaults so a host
//! can override a single value with e.g. `{"dye_fade": 0.99}`.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Largest accepted splat radius, in cells.
pub const MAX_SPLAT_RADIUS: u32 = 256;
/// Largest accepted pass count for any of the relaxation loops.
pub const MAX_SOLVER_PASSES: u32 = 64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidConfig {
    /// Display pixels per simulation cell.
    pub sim_scale: u32,
    /// Nominal timestep per frame (seconds).
    pub dt: f32,
    pub viscosity: f32,
    pub dye_diffusion: f32,
    /// Multiplicative dye decay per step, in `(0, 1]`.
    pub dye_fade: f32,
    /// Multiplicative velocity decay per step, in `(0, 1]`.
    pub velocity_damping: f32,
    /// Gauss-Seidel passes for velocity diffusion.
    pub diffuse_iterations: u32,
    /// Relaxation passes for the pressure solve.
    pub pressure_iterations: u32,
    /// Jacobi passes for dye diffusion.
    pub dye_diffuse_passes: u32,
    pub injection: InjectionConfig,
    pub glow: GlowCurve,
    pub ambient: AmbientConfig,
    pub cursor_glow: CursorGlow,
}

impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            sim_scale: 4,
            dt: 0.016,
            viscosity: 0.0001,
            dye_diffusion: 0.00005,
            dye_fade: 0.995,
            velocity_damping: 0.998,
            diffuse_iterations: 4,
            pressure_iterations: 4,
            dye_diffuse_passes: 1,
            injection: InjectionConfig::default(),
            glow: GlowCurve::default(),
            ambient: AmbientConfig::default(),
            cursor_glow: CursorGlow::default(),
        }
    }
}

/// Force/dye splat parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectionConfig {
    /// Splat radius in cells.
    pub radius: u32,
    /// Velocity added per unit of force at the splat center.
    pub force_scale: f32,
    /// Dye intensity per unit of force magnitude (`k`), capped at 1.
    pub dye_gain: f32,
    /// Per-channel dye weight (RGBA). Green dominant.
    pub tint: [f32; 4],
    /// Minimum pointer delta (pixels, per axis) that injects force.
    pub pointer_threshold: f32,
}

impl Default for InjectionConfig {
    fn default() -> Self {
        Self {
            radius: 12,
            force_scale: 0.15,
            dye_gain: 0.005,
            tint: [0.35, 1.0, 0.2, 0.9],
            pointer_threshold: 0.5,
        }
    }
}

/// Dye to display color mapping: `glow = max(r,g,b)^exponent`, then
/// `channel = value * scale * glow + bias * glow`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlowCurve {
    pub exponent: f32,
    /// RGB scale.
    pub scale: [f32; 3],
    /// RGB bias, also multiplied by the glow.
    pub bias: [f32; 3],
}

impl Default for GlowCurve {
    fn default() -> Self {
        Self {
            exponent: 0.7,
            scale: [200.0, 255.0, 180.0],
            bias: [20.0, 0.0, 15.0],
        }
    }
}

/// Ambient and start-up splashes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
    /// Period of the ambient impulse timer.
    pub interval_ms: f64,
    pub speed_min: f32,
    pub speed_max: f32,
    /// Number of seed splashes fired after start.
    pub seed_count: u32,
    pub seed_spacing_ms: f64,
    pub seed_speed: f32,
    /// Seeds land in `[margin, 1 - margin]` of each display axis.
    pub seed_margin: f32,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            interval_ms: 2000.0,
            speed_min: 30.0,
            speed_max: 90.0,
            seed_count: 6,
            seed_spacing_ms: 300.0,
            seed_speed: 80.0,
            seed_margin: 0.2,
        }
    }
}

/// Soft radial highlight drawn under the pointer. `radius == 0` disables it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorGlow {
    /// Radius in display pixels.
    pub radius: f32,
    pub color: [u8; 3],
    /// Opacity at the center, fading linearly to 0 at the radius.
    pub alpha: f32,
}

impl Default for CursorGlow {
    fn default() -> Self {
        Self {
            radius: 200.0,
            color: [182, 255, 46],
            alpha: 0.03,
        }
    }
}

impl FluidConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FluidConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sim_scale == 0 {
            return Err(ConfigError::invalid("sim_scale", "must be at least 1"));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::invalid("dt", "must be finite and positive"));
        }
        check_non_negative("viscosity", self.viscosity)?;
        check_non_negative("dye_diffusion", self.dye_diffusion)?;
        check_unit_open_closed("dye_fade", self.dye_fade)?;
        check_unit_open_closed("velocity_damping", self.velocity_damping)?;
        check_unit_open_closed("glow.exponent", self.glow.exponent)?;

        check_passes("diffuse_iterations", self.diffuse_iterations)?;
        check_passes("pressure_iterations", self.pressure_iterations)?;
        check_passes("dye_diffuse_passes", self.dye_diffuse_passes)?;

        if !(1..=MAX_SPLAT_RADIUS).contains(&self.injection.radius) {
            return Err(ConfigError::invalid(
                "injection.radius",
                format!("must be in [1, {MAX_SPLAT_RADIUS}], got {}", self.injection.radius),
            ));
        }
        check_non_negative("injection.force_scale", self.injection.force_scale)?;
        check_non_negative("injection.dye_gain", self.injection.dye_gain)?;
        check_non_negative("injection.pointer_threshold", self.injection.pointer_threshold)?;
        if self
            .injection
            .tint
            .iter()
            .any(|c| !c.is_finite() || !(0.0..=1.0).contains(c))
        {
            return Err(ConfigError::invalid("injection.tint", "channels must be in [0, 1]"));
        }

        let ambient = &self.ambient;
        if !ambient.interval_ms.is_finite() || ambient.interval_ms <= 0.0 {
            return Err(ConfigError::invalid("ambient.interval_ms", "must be positive"));
        }
        check_non_negative("ambient.speed_min", ambient.speed_min)?;
        if !ambient.speed_max.is_finite() || ambient.speed_min > ambient.speed_max {
            return Err(ConfigError::invalid(
                "ambient.speed_max",
                format!("must be >= speed_min ({})", ambient.speed_min),
            ));
        }
        if !ambient.seed_spacing_ms.is_finite() || ambient.seed_spacing_ms < 0.0 {
            return Err(ConfigError::invalid("ambient.seed_spacing_ms", "must be non-negative"));
        }
        if !(0.0..0.5).contains(&ambient.seed_margin) {
            return Err(ConfigError::invalid("ambient.seed_margin", "must be in [0, 0.5)"));
        }

        check_non_negative("cursor_glow.radius", self.cursor_glow.radius)?;
        if !(0.0..=1.0).contains(&self.cursor_glow.alpha) {
            return Err(ConfigError::invalid("cursor_glow.alpha", "must be in [0, 1]"));
        }
        Ok(())
    }
}

fn check_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be finite and >= 0, got {value}")))
    }
}

fn check_passes(field: &'static str, value: u32) -> Result<(), ConfigError> {
    if value <= MAX_SOLVER_PASSES {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be at most {MAX_SOLVER_PASSES}, got {value}")))
    }
}

fn check_unit_open_closed(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be in (0, 1], got {value}")))
    }
}
