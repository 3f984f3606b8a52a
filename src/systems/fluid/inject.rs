use crate::core::{FluidFields, DYE_CHANNELS};
use crate::domain::{InjectionConfig, MAX_SPLAT_RADIUS};

/// Adds a force splat with matching dye at a grid-space center.
///
/// Offsets `(i, j)` with `i² + j² ≤ r²` around `(cx, cy)` are mapped to
/// cells `floor(cx + i), floor(cy + j)`; each receives velocity
/// `force · falloff · force_scale` and dye `min(1, |force|·k) · falloff`
/// weighted by the tint, saturating at 1. Cells off the grid are skipped.
///
/// Returns the number of cells touched.
pub fn splat(fields: &mut FluidFields, cx: f32, cy: f32, fx: f32, fy: f32, cfg: &InjectionConfig) -> u32 {
    let radius = cfg.radius.min(MAX_SPLAT_RADIUS) as i64;
    if radius == 0 {
        return 0;
    }
    let r2 = (radius * radius) as f32;
    let dims = fields.dims;

    let speed = (fx * fx + fy * fy).sqrt();
    let strength = (speed * cfg.dye_gain).min(1.0);

    let mut touched = 0u32;
    for j in -radius..=radius {
        for i in -radius..=radius {
            let d2 = (i * i + j * j) as f32;
            if d2 > r2 {
                continue;
            }
            let xi = (cx + i as f32).floor();
            let yj = (cy + j as f32).floor();
            if !xi.is_finite() || !yj.is_finite() || !dims.in_bounds(xi as i64, yj as i64) {
                continue;
            }
            let idx = dims.index(xi as usize, yj as usize);
            let falloff = 1.0 - d2 / r2;

            fields.vx[idx] += fx * falloff * cfg.force_scale;
            fields.vy[idx] += fy * falloff * cfg.force_scale;

            let intensity = strength * falloff;
            let base = idx * DYE_CHANNELS;
            for (ch, weight) in cfg.tint.iter().enumerate() {
                let slot = &mut fields.dye[base + ch];
                *slot = (*slot + intensity * weight).min(1.0);
            }
            touched += 1;
        }
    }
    touched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GridDims;

    #[test]
    fn center_gets_full_weight() {
        let mut fields = FluidFields::new(GridDims::new(20, 20));
        let cfg = InjectionConfig::default();
        splat(&mut fields, 10.0, 10.0, 100.0, 0.0, &cfg);

        let (vx, vy) = fields.velocity(10, 10);
        approx::assert_relative_eq!(vx, 100.0 * cfg.force_scale, epsilon = 1e-5);
        assert_eq!(vy, 0.0);

        // |f| * k = 0.5
        let dye = fields.dye(10, 10);
        approx::assert_relative_eq!(dye[1], 0.5, epsilon = 1e-6);
        approx::assert_relative_eq!(dye[0], 0.5 * 0.35, epsilon = 1e-6);
        assert!(dye[1] > dye[0] && dye[1] > dye[2]);
    }

    #[test]
    fn dye_saturates_instead_of_overwriting() {
        let mut fields = FluidFields::new(GridDims::new(8, 8));
        let cfg = InjectionConfig { radius: 2, ..InjectionConfig::default() };
        for _ in 0..10 {
            splat(&mut fields, 4.0, 4.0, 1000.0, 1000.0, &cfg);
        }
        assert!(fields.dye.iter().all(|&c| (0.0..=1.0).contains(&c)));
        assert_eq!(fields.dye(4, 4)[1], 1.0);
    }

    #[test]
    fn off_grid_center_is_silent() {
        let mut fields = FluidFields::new(GridDims::new(8, 8));
        let cfg = InjectionConfig { radius: 2, ..InjectionConfig::default() };
        let touched = splat(&mut fields, -50.0, 300.0, 10.0, 10.0, &cfg);
        assert_eq!(touched, 0);
        assert!(fields.is_quiescent());
    }

    #[test]
    fn partially_visible_splat_touches_only_grid_cells() {
        let mut fields = FluidFields::new(GridDims::new(8, 8));
        let cfg = InjectionConfig { radius: 2, ..InjectionConfig::default() };
        // Disc of radius 2 has 13 offsets; centered on a corner only 6 land.
        let touched = splat(&mut fields, 0.0, 0.0, 5.0, 5.0, &cfg);
        assert_eq!(touched, 6);
    }

    #[test]
    fn oversized_radius_is_clamped() {
        let mut fields = FluidFields::new(GridDims::new(8, 8));
        let cfg = InjectionConfig { radius: u32::MAX, ..InjectionConfig::default() };
        let touched = splat(&mut fields, 4.0, 4.0, 10.0, 0.0, &cfg);
        assert_eq!(touched, 64);
        assert!(fields.vx.iter().all(|v| v.is_finite() && *v > 0.0));
    }

    #[test]
    fn zero_radius_touches_nothing() {
        let mut fields = FluidFields::new(GridDims::new(8, 8));
        let cfg = InjectionConfig { radius: 0, ..InjectionConfig::default() };
        assert_eq!(splat(&mut fields, 4.0, 4.0, 10.0, 0.0, &cfg), 0);
        assert!(fields.is_quiescent());
    }
}
