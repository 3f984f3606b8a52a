#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::DYE_CHANNELS;
use crate::domain::{CursorGlow, GlowCurve};

use super::upscale::upscale_bilinear;
use super::{FluidCore, PerfTimer};

/// Map one RGBA dye cell to display bytes.
///
/// Brightness follows `max(r,g,b)^exponent`, which lifts faint dye so trails
/// stay visible long after they have mostly faded.
#[inline]
pub(crate) fn glow_rgba(dye: &[f32], curve: &GlowCurve) -> [u8; 4] {
    let (r, g, b, a) = (dye[0], dye[1], dye[2], dye[3]);
    let intensity = r.max(g).max(b).max(0.0);
    let glow = intensity.powf(curve.exponent);

    let channel = |value: f32, k: usize| -> u8 {
        (value * curve.scale[k] * glow + curve.bias[k] * glow).floor().min(255.0) as u8
    };
    [
        channel(r, 0),
        channel(g, 1),
        channel(b, 2),
        (a * 255.0).floor().min(255.0) as u8,
    ]
}

/// Dye field -> grid-resolution RGBA.
pub(crate) fn rasterize(dye: &[f32], curve: &GlowCurve, pixels: &mut [u8]) {
    #[cfg(feature = "parallel")]
    pixels
        .par_chunks_exact_mut(4)
        .zip(dye.par_chunks_exact(DYE_CHANNELS))
        .for_each(|(px, cell)| px.copy_from_slice(&glow_rgba(cell, curve)));
    #[cfg(not(feature = "parallel"))]
    pixels
        .chunks_exact_mut(4)
        .zip(dye.chunks_exact(DYE_CHANNELS))
        .for_each(|(px, cell)| px.copy_from_slice(&glow_rgba(cell, curve)));
}

/// Source-over a soft radial highlight centered at `(x, y)`.
pub(crate) fn composite_cursor_glow(
    display: &mut [u8],
    width: u32,
    height: u32,
    x: f32,
    y: f32,
    glow: &CursorGlow,
) {
    let r = glow.radius;
    if !x.is_finite() || !y.is_finite() {
        return;
    }
    if r <= 0.0 || glow.alpha <= 0.0 || width == 0 || height == 0 {
        return;
    }
    let x0 = (x - r).floor().max(0.0) as u32;
    let y0 = (y - r).floor().max(0.0) as u32;
    let x1 = ((x + r).ceil().max(0.0) as u32).min(width - 1);
    let y1 = ((y + r).ceil().max(0.0) as u32).min(height - 1);
    let color = glow.color.map(f32::from);

    for py in y0..=y1 {
        for px in x0..=x1 {
            let dx = px as f32 + 0.5 - x;
            let dy = py as f32 + 0.5 - y;
            let d = (dx * dx + dy * dy).sqrt();
            if d >= r {
                continue;
            }
            let sa = glow.alpha * (1.0 - d / r);
            let o = ((py as usize) * (width as usize) + px as usize) * 4;
            let dst = &mut display[o..o + 4];

            let da = f32::from(dst[3]) / 255.0;
            let oa = sa + da * (1.0 - sa);
            if oa <= 0.0 {
                continue;
            }
            for ch in 0..3 {
                let c = (color[ch] * sa + f32::from(dst[ch]) * da * (1.0 - sa)) / oa;
                dst[ch] = (c + 0.5).min(255.0) as u8;
            }
            dst[3] = (oa * 255.0 + 0.5).min(255.0) as u8;
        }
    }
}

pub(super) fn render(core: &mut FluidCore) {
    let perf_on = core.perf_enabled;
    let FluidCore {
        config,
        fields,
        render: buffers,
        perf_stats: stats,
        pointer,
        display_width,
        display_height,
        ..
    } = core;

    let t0 = perf_on.then(PerfTimer::start);
    rasterize(&fields.dye, &config.glow, &mut buffers.pixels);
    if let Some(t) = t0 {
        stats.render_ms = t.elapsed_ms();
    }

    let t1 = perf_on.then(PerfTimer::start);
    upscale_bilinear(
        &buffers.pixels,
        fields.dims().width(),
        &buffers.columns,
        &buffers.rows,
        &mut buffers.display,
    );
    composite_cursor_glow(
        &mut buffers.display,
        *display_width,
        *display_height,
        pointer.x,
        pointer.y,
        &config.cursor_glow,
    );
    if let Some(t) = t1 {
        stats.upscale_ms = t.elapsed_ms();
        stats.display_pixels = display_width.saturating_mul(*display_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dye_is_transparent_black() {
        assert_eq!(glow_rgba(&[0.0; 4], &GlowCurve::default()), [0, 0, 0, 0]);
    }

    #[test]
    fn glow_matches_curve() {
        let curve = GlowCurve::default();
        let cell = [0.2, 0.8, 0.1, 0.5];
        let glow = 0.8f32.powf(0.7);
        let expected = [
            (0.2 * 200.0 * glow + 20.0 * glow).floor() as u8,
            (0.8 * 255.0 * glow).floor() as u8,
            (0.1 * 180.0 * glow + 15.0 * glow).floor() as u8,
            127,
        ];
        assert_eq!(glow_rgba(&cell, &curve), expected);
    }

    #[test]
    fn saturated_dye_caps_at_255() {
        let px = glow_rgba(&[1.0, 1.0, 1.0, 1.0], &GlowCurve::default());
        assert_eq!(px, [220, 255, 195, 255]);
    }

    #[test]
    fn cursor_glow_is_brightest_at_center_and_bounded() {
        let (w, h) = (64u32, 64u32);
        let mut display = vec![0u8; (w * h * 4) as usize];
        let glow = CursorGlow { radius: 10.0, color: [182, 255, 46], alpha: 1.0 };
        composite_cursor_glow(&mut display, w, h, 32.0, 32.0, &glow);

        let alpha_at = |x: usize, y: usize| display[(y * w as usize + x) * 4 + 3];
        assert!(alpha_at(31, 31) > alpha_at(36, 31));
        assert_eq!(alpha_at(50, 32), 0);
        assert_eq!(alpha_at(0, 0), 0);
        // Color is the glow color wherever it is the only layer.
        let o = (31 * w as usize + 31) * 4;
        assert_eq!(&display[o..o + 3], &[182, 255, 46]);
    }

    #[test]
    fn cursor_glow_off_screen_does_nothing() {
        let mut display = vec![7u8; 16 * 16 * 4];
        let glow = CursorGlow { radius: 5.0, ..CursorGlow::default() };
        composite_cursor_glow(&mut display, 16, 16, -100.0, 400.0, &glow);
        assert!(display.iter().all(|&b| b == 7));
    }

    #[test]
    fn cursor_glow_ignores_non_finite_pointer() {
        let mut display = vec![7u8; 16 * 16 * 4];
        let glow = CursorGlow { radius: 5.0, alpha: 1.0, ..CursorGlow::default() };
        composite_cursor_glow(&mut display, 16, 16, f32::NAN, 3.0, &glow);
        composite_cursor_glow(&mut display, 16, 16, 3.0, f32::INFINITY, &glow);
        assert!(display.iter().all(|&b| b == 7));
    }
}
