use crate::core::DYE_CHANNELS;

/// Implicit diffusion of a scalar field by Gauss-Seidel relaxation.
///
/// Solves `x - a·∇²x = x0` with `a = dt·diff·W·H`. `x` holds the initial
/// guess on entry and is updated in place, so later cells in a sweep see
/// the already-relaxed neighbours. Boundary cells are never written.
pub fn diffuse(
    x: &mut [f32],
    x0: &[f32],
    diff: f32,
    dt: f32,
    iterations: u32,
    width: usize,
    height: usize,
) {
    if width < 3 || height < 3 {
        return;
    }
    let a = dt * diff * (width * height) as f32;
    let c = 1.0 + 4.0 * a;

    for _ in 0..iterations {
        for j in 1..height - 1 {
            for i in 1..width - 1 {
                let idx = j * width + i;
                let neighbours = *fast!(x, [idx - 1])
                    + *fast!(x, [idx + 1])
                    + *fast!(x, [idx - width])
                    + *fast!(x, [idx + width]);
                fast!(x, [idx] = (*fast!(x0, [idx]) + a * neighbours) / c);
            }
        }
    }
}

/// One Jacobi pass over interleaved RGBA dye.
///
/// Unlike [`diffuse`], every neighbour is read from `d0`, which makes the
/// pass cheap and order independent. Values stay inside the convex hull of
/// the inputs, so `[0, 1]` dye stays in `[0, 1]`.
pub fn diffuse_dye(d: &mut [f32], d0: &[f32], diff: f32, dt: f32, width: usize, height: usize) {
    if width < 3 || height < 3 {
        return;
    }
    let a = dt * diff * (width * height) as f32;
    let c = 1.0 + 4.0 * a;

    for j in 1..height - 1 {
        for i in 1..width - 1 {
            let idx = j * width + i;
            for ch in 0..DYE_CHANNELS {
                let o = idx * DYE_CHANNELS + ch;
                let neighbours = *fast!(d0, [(idx - 1) * DYE_CHANNELS + ch])
                    + *fast!(d0, [(idx + 1) * DYE_CHANNELS + ch])
                    + *fast!(d0, [(idx - width) * DYE_CHANNELS + ch])
                    + *fast!(d0, [(idx + width) * DYE_CHANNELS + ch]);
                fast!(d, [o] = (*fast!(d0, [o]) + a * neighbours) / c);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spreads_a_spike_to_neighbours_only_inside() {
        let (w, h) = (5, 5);
        let mut x0 = vec![0.0f32; w * h];
        x0[2 * w + 2] = 1.0;
        let mut x = x0.clone();

        diffuse(&mut x, &x0, 1.0, 0.1, 4, w, h);

        assert!(x[2 * w + 2] < 1.0);
        assert!(x[2 * w + 3] > 0.0);
        assert!(x[w + 2] > 0.0);
        // Edge cells untouched.
        for i in 0..w {
            assert_eq!(x[i], 0.0);
            assert_eq!(x[(h - 1) * w + i], 0.0);
        }
    }

    #[test]
    fn uniform_field_is_a_fixed_point() {
        let (w, h) = (6, 4);
        let x0 = vec![0.5f32; w * h];
        let mut x = x0.clone();
        diffuse(&mut x, &x0, 0.01, 0.016, 4, w, h);
        for v in x {
            approx::assert_relative_eq!(v, 0.5, epsilon = 1e-6);
        }
    }

    #[test]
    fn tiny_grids_are_left_alone() {
        let x0 = vec![1.0f32; 4];
        let mut x = vec![0.0f32; 4];
        diffuse(&mut x, &x0, 1.0, 1.0, 4, 2, 2);
        assert_eq!(x, vec![0.0; 4]);
    }

    #[test]
    fn dye_pass_reads_only_snapshot() {
        let (w, h) = (4, 3);
        let mut d0 = vec![0.0f32; w * h * DYE_CHANNELS];
        // Green in cell (1,1).
        d0[(w + 1) * DYE_CHANNELS + 1] = 1.0;
        let mut d = d0.clone();
        diffuse_dye(&mut d, &d0, 1.0, 0.1, w, h);

        let a = 0.1 * (w * h) as f32;
        let c = 1.0 + 4.0 * a;
        approx::assert_relative_eq!(d[(w + 1) * DYE_CHANNELS + 1], 1.0 / c, epsilon = 1e-6);
        // (2,1) sees the spike from the snapshot, not the relaxed value.
        approx::assert_relative_eq!(d[(w + 2) * DYE_CHANNELS + 1], a / c, epsilon = 1e-6);
        // Other channels stay empty.
        assert_eq!(d[(w + 2) * DYE_CHANNELS], 0.0);
    }
}
