use crate::core::DYE_CHANNELS;

/// Per-channel sums of an interleaved RGBA dye field.
pub fn dye_totals(dye: &[f32]) -> [f64; DYE_CHANNELS] {
    let mut totals = [0.0f64; DYE_CHANNELS];
    for cell in dye.chunks_exact(DYE_CHANNELS) {
        for (total, &c) in totals.iter_mut().zip(cell) {
            *total += f64::from(c);
        }
    }
    totals
}

/// Rescale each channel whose total exceeds `limit` back down to it.
///
/// Semi-Lagrangian advection and the fixed-boundary dye pass are not
/// conservative; converging flow can gather more dye than was there.
/// Scaling never raises a value, so the `[0, 1]` range is kept.
pub fn cap_dye_totals(dye: &mut [f32], limit: &[f64; DYE_CHANNELS]) {
    let totals = dye_totals(dye);
    let mut scale = [1.0f32; DYE_CHANNELS];
    let mut capped = false;
    for ch in 0..DYE_CHANNELS {
        if totals[ch] > limit[ch] {
            scale[ch] = (limit[ch].max(0.0) / totals[ch]) as f32;
            capped = true;
        }
    }
    if !capped {
        return;
    }
    for cell in dye.chunks_exact_mut(DYE_CHANNELS) {
        for (c, s) in cell.iter_mut().zip(scale) {
            *c *= s;
        }
    }
}

/// Multiply every dye channel by `fade` and keep it in `[0, 1]`.
#[inline]
pub fn fade_dye(dye: &mut [f32], fade: f32) {
    for c in dye.iter_mut() {
        *c = (*c * fade).clamp(0.0, 1.0);
    }
}

/// Multiplicative velocity damping.
#[inline]
pub fn damp_velocity(vx: &mut [f32], vy: &mut [f32], damping: f32) {
    for v in vx.iter_mut().chain(vy.iter_mut()) {
        *v *= damping;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_shrinks_and_clamps() {
        let mut dye = vec![1.0, 0.5, 0.0, 1.0 + 1e-6];
        fade_dye(&mut dye, 0.995);
        approx::assert_relative_eq!(dye[0], 0.995);
        approx::assert_relative_eq!(dye[1], 0.4975);
        assert_eq!(dye[2], 0.0);
        assert!(dye[3] <= 1.0);
    }

    #[test]
    fn totals_are_per_channel() {
        let dye = vec![0.1, 0.2, 0.0, 1.0, 0.3, 0.2, 0.5, 1.0];
        let totals = dye_totals(&dye);
        approx::assert_relative_eq!(totals[0], 0.4, epsilon = 1e-6);
        approx::assert_relative_eq!(totals[1], 0.4, epsilon = 1e-6);
        approx::assert_relative_eq!(totals[2], 0.5, epsilon = 1e-6);
        approx::assert_relative_eq!(totals[3], 2.0, epsilon = 1e-6);
    }

    #[test]
    fn cap_only_touches_channels_over_budget() {
        let mut dye = vec![0.5, 0.5, 0.2, 1.0, 0.5, 0.5, 0.2, 1.0];
        cap_dye_totals(&mut dye, &[0.5, 2.0, 1.0, 2.0]);

        approx::assert_relative_eq!(dye[0], 0.25, epsilon = 1e-6);
        approx::assert_relative_eq!(dye[4], 0.25, epsilon = 1e-6);
        assert_eq!(dye[1], 0.5);
        assert_eq!(dye[2], 0.2);
        assert_eq!(dye[3], 1.0);
    }

    #[test]
    fn cap_to_zero_empties_the_channel() {
        let mut dye = vec![0.0, 0.7, 0.0, 0.0];
        cap_dye_totals(&mut dye, &[0.0; DYE_CHANNELS]);
        assert_eq!(dye[1], 0.0);
    }

    #[test]
    fn damping_applies_to_both_components() {
        let mut vx = vec![2.0, -4.0];
        let mut vy = vec![1.0, 0.0];
        damp_velocity(&mut vx, &mut vy, 0.5);
        assert_eq!(vx, vec![1.0, -2.0]);
        assert_eq!(vy, vec![0.5, 0.0]);
    }
}
