//! Semi-Lagrangian advection
//!
//! Each interior cell traces back along the velocity by `dt` and takes the
//! bilinear sample of the source buffer there. Sample coordinates are
//! clamped to `[0.5, dim - 1.5]` so the 2x2 stencil is always in bounds,
//! whatever the velocity magnitude. Rows are independent, so with the
//! `parallel` feature they are processed by rayon.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::DYE_CHANNELS;

/// Bilinear stencil for one backtraced sample.
#[derive(Clone, Copy, Debug)]
struct Stencil {
    i0: usize,
    j0: usize,
    s0: f32,
    s1: f32,
    t0: f32,
    t1: f32,
}

#[inline(always)]
fn backtrace(i: usize, j: usize, u: f32, v: f32, dt: f32, width: usize, height: usize) -> Stencil {
    let w = width as f32;
    let h = height as f32;
    // `f32::max` drops NaN, so a NaN velocity samples the clamp floor.
    let x = (i as f32 - dt * w * u).max(0.5).min(w - 1.5);
    let y = (j as f32 - dt * h * v).max(0.5).min(h - 1.5);

    let i0 = x.floor() as usize;
    let j0 = y.floor() as usize;
    let s1 = x - i0 as f32;
    let t1 = y - j0 as f32;
    Stencil {
        i0,
        j0,
        s0: 1.0 - s1,
        s1,
        t0: 1.0 - t1,
        t1,
    }
}

fn advect_row(
    j: usize,
    row: &mut [f32],
    d0: &[f32],
    u: &[f32],
    v: &[f32],
    dt: f32,
    width: usize,
    height: usize,
) {
    for i in 1..width - 1 {
        let idx = j * width + i;
        let st = backtrace(i, j, u[idx], v[idx], dt, width, height);
        let a = st.j0 * width + st.i0;
        let b = a + width;
        row[i] = st.s0 * (st.t0 * *fast!(d0, [a]) + st.t1 * *fast!(d0, [b]))
            + st.s1 * (st.t0 * *fast!(d0, [a + 1]) + st.t1 * *fast!(d0, [b + 1]));
    }
}

fn advect_dye_row(
    j: usize,
    row: &mut [f32],
    d0: &[f32],
    u: &[f32],
    v: &[f32],
    dt: f32,
    width: usize,
    height: usize,
) {
    for i in 1..width - 1 {
        let idx = j * width + i;
        let st = backtrace(i, j, u[idx], v[idx], dt, width, height);
        let a = (st.j0 * width + st.i0) * DYE_CHANNELS;
        let b = a + width * DYE_CHANNELS;
        for ch in 0..DYE_CHANNELS {
            row[i * DYE_CHANNELS + ch] = st.s0
                * (st.t0 * *fast!(d0, [a + ch]) + st.t1 * *fast!(d0, [b + ch]))
                + st.s1
                    * (st.t0 * *fast!(d0, [a + DYE_CHANNELS + ch])
                        + st.t1 * *fast!(d0, [b + DYE_CHANNELS + ch]));
        }
    }
}

/// Advect scalar `d0` along `(u, v)` into `d`. `d` and `d0` must be distinct.
pub fn advect(
    d: &mut [f32],
    d0: &[f32],
    u: &[f32],
    v: &[f32],
    dt: f32,
    width: usize,
    height: usize,
) {
    if width < 3 || height < 3 {
        return;
    }
    let interior = |(j, row): (usize, &mut [f32])| {
        if j > 0 && j < height - 1 {
            advect_row(j, row, d0, u, v, dt, width, height);
        }
    };

    #[cfg(feature = "parallel")]
    d.par_chunks_mut(width).enumerate().for_each(interior);
    #[cfg(not(feature = "parallel"))]
    d.chunks_mut(width).enumerate().for_each(interior);
}

/// Advect interleaved RGBA dye `d0` along `(u, v)` into `d`.
pub fn advect_dye(
    d: &mut [f32],
    d0: &[f32],
    u: &[f32],
    v: &[f32],
    dt: f32,
    width: usize,
    height: usize,
) {
    if width < 3 || height < 3 {
        return;
    }
    let interior = |(j, row): (usize, &mut [f32])| {
        if j > 0 && j < height - 1 {
            advect_dye_row(j, row, d0, u, v, dt, width, height);
        }
    };

    #[cfg(feature = "parallel")]
    d.par_chunks_mut(width * DYE_CHANNELS).enumerate().for_each(interior);
    #[cfg(not(feature = "parallel"))]
    d.chunks_mut(width * DYE_CHANNELS).enumerate().for_each(interior);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_velocity_is_identity_on_interior() {
        let (w, h) = (6, 5);
        let d0: Vec<f32> = (0..w * h).map(|i| i as f32 * 0.1).collect();
        let mut d = vec![0.0; w * h];
        let zero = vec![0.0; w * h];
        advect(&mut d, &d0, &zero, &zero, 0.016, w, h);
        for j in 1..h - 1 {
            for i in 1..w - 1 {
                assert_eq!(d[j * w + i], d0[j * w + i]);
            }
        }
        // Boundary rows are not written.
        assert_eq!(d[0], 0.0);
        assert_eq!(d[(h - 1) * w + 2], 0.0);
    }

    #[test]
    fn uniform_flow_shifts_by_one_cell() {
        let (w, h) = (10, 5);
        let d0: Vec<f32> = (0..w * h).map(|i| (i % w) as f32).collect();
        let mut d = vec![0.0; w * h];
        // dt * W * u == 1 cell to the right.
        let dt = 0.1;
        let u = vec![1.0 / (dt * w as f32); w * h];
        let v = vec![0.0; w * h];
        advect(&mut d, &d0, &u, &v, dt, w, h);
        for i in 2..w - 1 {
            approx::assert_relative_eq!(d[2 * w + i], (i - 1) as f32, epsilon = 1e-4);
        }
    }

    #[test]
    fn huge_velocity_clamps_inside_the_grid() {
        let (w, h) = (8, 8);
        let d0 = vec![0.25f32; w * h * DYE_CHANNELS];
        let mut d = vec![0.0; w * h * DYE_CHANNELS];
        let u = vec![1.0e30; w * h];
        let v = vec![-1.0e30; w * h];
        advect_dye(&mut d, &d0, &u, &v, 0.016, w, h);
        for j in 1..h - 1 {
            for i in 1..w - 1 {
                for ch in 0..DYE_CHANNELS {
                    let value = d[(j * w + i) * DYE_CHANNELS + ch];
                    approx::assert_relative_eq!(value, 0.25, epsilon = 1e-6);
                }
            }
        }
    }

    #[test]
    fn nan_velocity_does_not_panic() {
        let (w, h) = (5, 5);
        let d0 = vec![1.0f32; w * h];
        let mut d = vec![0.0; w * h];
        let u = vec![f32::NAN; w * h];
        let v = vec![0.0; w * h];
        advect(&mut d, &d0, &u, &v, 0.016, w, h);
        assert!(d.iter().all(|x| x.is_finite()));
    }
}
