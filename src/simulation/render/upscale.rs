//! Bilinear upscale from the grid-resolution image to the display
//!
//! The source image is stretched over the whole display, the same mapping
//! a canvas `drawImage(src, 0, 0, cw, ch)` with smoothing uses: destination
//! pixel centers map to `(d + 0.5) * src / dst - 0.5` in source space.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Source taps for one destination column or row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Tap {
    pub(crate) i0: u32,
    pub(crate) i1: u32,
    pub(crate) frac: f32,
}

/// Precomputed taps for one axis; rebuilt only on resize.
pub(crate) struct UpscaleLut {
    taps: Vec<Tap>,
}

impl UpscaleLut {
    pub(crate) fn new(src_len: usize, dst_len: usize) -> Self {
        let src_len = src_len.max(1);
        let ratio = src_len as f32 / dst_len.max(1) as f32;
        let last = (src_len - 1) as f32;

        let taps = (0..dst_len)
            .map(|d| {
                let s = ((d as f32 + 0.5) * ratio - 0.5).clamp(0.0, last);
                let i0 = s.floor() as u32;
                let i1 = (i0 + 1).min(src_len as u32 - 1);
                Tap {
                    i0,
                    i1,
                    frac: s - i0 as f32,
                }
            })
            .collect();
        Self { taps }
    }

    #[inline]
    pub(crate) fn taps(&self) -> &[Tap] { &self.taps }

    #[inline]
    pub(crate) fn len(&self) -> usize { self.taps.len() }
}

#[inline(always)]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn upscale_row(src: &[u8], src_w: usize, row_tap: Tap, columns: &UpscaleLut, out: &mut [u8]) {
    let top = row_tap.i0 as usize * src_w;
    let bottom = row_tap.i1 as usize * src_w;
    for (px, col) in out.chunks_exact_mut(4).zip(columns.taps()) {
        let (c0, c1) = (col.i0 as usize, col.i1 as usize);
        for ch in 0..4 {
            let tl = f32::from(src[(top + c0) * 4 + ch]);
            let tr = f32::from(src[(top + c1) * 4 + ch]);
            let bl = f32::from(src[(bottom + c0) * 4 + ch]);
            let br = f32::from(src[(bottom + c1) * 4 + ch]);
            let v = lerp(lerp(tl, tr, col.frac), lerp(bl, br, col.frac), row_tap.frac);
            px[ch] = (v + 0.5) as u8;
        }
    }
}

/// Stretch `src` (`src_w` pixels wide, RGBA) into `dst` using the axis taps.
pub(crate) fn upscale_bilinear(
    src: &[u8],
    src_w: usize,
    columns: &UpscaleLut,
    rows: &UpscaleLut,
    dst: &mut [u8],
) {
    let row_bytes = columns.len() * 4;
    if row_bytes == 0 || dst.is_empty() {
        return;
    }

    #[cfg(feature = "parallel")]
    dst.par_chunks_mut(row_bytes)
        .zip(rows.taps().par_iter())
        .for_each(|(out, &tap)| upscale_row(src, src_w, tap, columns, out));
    #[cfg(not(feature = "parallel"))]
    dst.chunks_mut(row_bytes)
        .zip(rows.taps())
        .for_each(|(out, &tap)| upscale_row(src, src_w, tap, columns, out));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taps_stay_in_source_range() {
        let lut = UpscaleLut::new(40, 161);
        assert_eq!(lut.len(), 161);
        for tap in lut.taps() {
            assert!(tap.i0 <= tap.i1 && tap.i1 < 40);
            assert!((0.0..1.0).contains(&tap.frac));
        }
        assert_eq!(lut.taps()[0].i0, 0);
        assert_eq!(lut.taps()[160].i1, 39);
    }

    #[test]
    fn uniform_image_stays_uniform() {
        let (sw, sh, dw, dh) = (3, 2, 12, 8);
        let src: Vec<u8> = [10u8, 200, 30, 128].repeat(sw * sh);
        let mut dst = vec![0u8; dw * dh * 4];
        upscale_bilinear(&src, sw, &UpscaleLut::new(sw, dw), &UpscaleLut::new(sh, dh), &mut dst);
        for px in dst.chunks_exact(4) {
            assert_eq!(px, &[10, 200, 30, 128]);
        }
    }

    #[test]
    fn horizontal_ramp_is_monotone() {
        let (sw, sh, dw, dh) = (2, 1, 8, 1);
        let src = vec![0u8, 0, 0, 0, 255, 255, 255, 255];
        let mut dst = vec![0u8; dw * dh * 4];
        upscale_bilinear(&src, sw, &UpscaleLut::new(sw, dw), &UpscaleLut::new(sh, dh), &mut dst);
        let reds: Vec<u8> = dst.chunks_exact(4).map(|p| p[0]).collect();
        assert_eq!(reds[0], 0);
        assert_eq!(reds[dw - 1], 255);
        assert!(reds.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn empty_destination_is_a_no_op() {
        let src = vec![1u8; 4];
        let mut dst: Vec<u8> = Vec::new();
        upscale_bilinear(&src, 1, &UpscaleLut::new(1, 0), &UpscaleLut::new(1, 0), &mut dst);
        assert!(dst.is_empty());
    }
}
