/// Pressure projection: removes the divergent part of `(u, v)`.
///
/// Builds the divergence, relaxes the Poisson equation for pressure for
/// `iterations` Gauss-Seidel passes starting from zero, then subtracts the
/// pressure gradient. With few passes the result is only approximately
/// divergence free, which is enough to keep the flow swirling instead of
/// piling up.
pub fn project(
    u: &mut [f32],
    v: &mut [f32],
    p: &mut [f32],
    div: &mut [f32],
    iterations: u32,
    width: usize,
    height: usize,
) {
    if width < 3 || height < 3 {
        return;
    }
    let w = width as f32;
    let h = height as f32;
    p.fill(0.0);

    for j in 1..height - 1 {
        for i in 1..width - 1 {
            let idx = j * width + i;
            let d = *fast!(u, [idx + 1]) - *fast!(u, [idx - 1]) + *fast!(v, [idx + width])
                - *fast!(v, [idx - width]);
            fast!(div, [idx] = -0.5 * d / w);
        }
    }

    for _ in 0..iterations {
        for j in 1..height - 1 {
            for i in 1..width - 1 {
                let idx = j * width + i;
                let sum = *fast!(p, [idx - 1])
                    + *fast!(p, [idx + 1])
                    + *fast!(p, [idx - width])
                    + *fast!(p, [idx + width]);
                fast!(p, [idx] = (*fast!(div, [idx]) + sum) / 4.0);
            }
        }
    }

    for j in 1..height - 1 {
        for i in 1..width - 1 {
            let idx = j * width + i;
            let gx = *fast!(p, [idx + 1]) - *fast!(p, [idx - 1]);
            let gy = *fast!(p, [idx + width]) - *fast!(p, [idx - width]);
            fast!(u, [idx] -= 0.5 * w * gx);
            fast!(v, [idx] -= 0.5 * h * gy);
        }
    }
}

/// Mean absolute central-difference divergence over interior cells.
pub fn mean_divergence(u: &[f32], v: &[f32], width: usize, height: usize) -> f32 {
    if width < 3 || height < 3 {
        return 0.0;
    }
    let mut total = 0.0f64;
    for j in 1..height - 1 {
        for i in 1..width - 1 {
            let idx = j * width + i;
            let d = u[idx + 1] - u[idx - 1] + v[idx + width] - v[idx - width];
            total += f64::from(d.abs());
        }
    }
    (total / ((width - 2) * (height - 2)) as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radial_outflow(w: usize, h: usize) -> (Vec<f32>, Vec<f32>) {
        let (cx, cy) = (w as f32 / 2.0, h as f32 / 2.0);
        let mut u = vec![0.0; w * h];
        let mut v = vec![0.0; w * h];
        for j in 1..h - 1 {
            for i in 1..w - 1 {
                let idx = j * w + i;
                u[idx] = (i as f32 - cx) * 0.01;
                v[idx] = (j as f32 - cy) * 0.01;
            }
        }
        (u, v)
    }

    #[test]
    fn reduces_divergence_of_a_source() {
        let (w, h) = (24, 24);
        let (mut u, mut v) = radial_outflow(w, h);
        let before = mean_divergence(&u, &v, w, h);
        let mut p = vec![0.0; w * h];
        let mut div = vec![0.0; w * h];

        project(&mut u, &mut v, &mut p, &mut div, 20, w, h);

        let after = mean_divergence(&u, &v, w, h);
        assert!(after < before, "divergence {after} should drop below {before}");
    }

    #[test]
    fn zero_field_stays_zero() {
        let (w, h) = (8, 6);
        let mut u = vec![0.0; w * h];
        let mut v = vec![0.0; w * h];
        let mut p = vec![1.0; w * h];
        let mut div = vec![0.0; w * h];
        project(&mut u, &mut v, &mut p, &mut div, 4, w, h);
        assert!(u.iter().chain(&v).all(|&x| x == 0.0));
        assert!(p.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn stale_boundary_pressure_is_discarded() {
        let (w, h) = (6, 6);
        let (mut u, mut v) = radial_outflow(w, h);
        let (mut u2, mut v2) = (u.clone(), v.clone());
        let mut div = vec![0.0; w * h];

        let mut fresh = vec![0.0; w * h];
        project(&mut u, &mut v, &mut fresh, &mut div, 4, w, h);

        let mut stale = vec![0.0; w * h];
        for i in 0..w {
            stale[i] = 5.0;
            stale[(h - 1) * w + i] = -5.0;
        }
        project(&mut u2, &mut v2, &mut stale, &mut div, 4, w, h);

        assert_eq!(u, u2);
        assert_eq!(v, v2);
    }

    #[test]
    fn degenerate_grid_is_a_no_op() {
        let mut u = vec![1.0; 2];
        let mut v = vec![1.0; 2];
        let mut p = vec![0.0; 2];
        let mut div = vec![0.0; 2];
        project(&mut u, &mut v, &mut p, &mut div, 4, 2, 1);
        assert_eq!(u, vec![1.0; 2]);
    }
}
