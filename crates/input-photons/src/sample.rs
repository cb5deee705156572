//! Sampling helpers shared by the generators.
//!
//! Every random helper takes the caller's rng; draw order is part of the
//! reproducibility contract (same seed, same bits).

use nalgebra::Vector3;
use rand::Rng;
use std::f64::consts::PI;

/// `n` directions on the unit sphere: `cosθ` uniform in [-1,1), `φ` uniform in [0,2π).
pub fn sample_trig<R: Rng>(n: usize, rng: &mut R) -> Vec<Vector3<f64>> {
    (0..n)
        .map(|_| {
            let cos_theta: f64 = rng.gen_range(-1.0..1.0);
            let phi = rng.gen_range(0.0..2.0 * PI);
            let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
            Vector3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
        })
        .collect()
}

/// `n` uniform values in `[a, b)`.
pub fn sample_linear<R: Rng>(n: usize, a: f64, b: f64, rng: &mut R) -> Vec<f64> {
    (0..n).map(|_| a + (b - a) * rng.gen::<f64>()).collect()
}

/// `n` evenly spaced values from `a` to `b`, both ends included.
pub fn sample_linspace(n: usize, a: f64, b: f64) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![a],
        _ => {
            let step = (b - a) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { b } else { a + step * i as f64 })
                .collect()
        }
    }
}

/// `n` points uniform in area over the unit disc (z = 0).
pub fn sample_disc<R: Rng>(n: usize, rng: &mut R) -> Vec<Vector3<f64>> {
    (0..n)
        .map(|_| {
            let r = rng.gen::<f64>().sqrt();
            let phi = rng.gen_range(0.0..2.0 * PI);
            Vector3::new(r * phi.cos(), r * phi.sin(), 0.0)
        })
        .collect()
}

/// `nx * ny` lattice points spanning `[-sx,sx] x [-sy,sy]` at z = 0, y outer.
pub fn xy_grid(nx: usize, ny: usize, sx: f64, sy: f64) -> Vec<Vector3<f64>> {
    let xs = sample_linspace(nx, -sx, sx);
    let ys = sample_linspace(ny, -sy, sy);
    ys.iter()
        .flat_map(|&y| xs.iter().map(move |&x| Vector3::new(x, y, 0.0)))
        .collect()
}

/// Rotate `d`, expressed in the frame whose z axis is `u`, into the global frame.
///
/// `u` must be unit length. Vectors perpendicular to +Z map to vectors
/// perpendicular to `u`.
pub fn rotate_uz(d: Vector3<f64>, u: Vector3<f64>) -> Vector3<f64> {
    let up = u.x * u.x + u.y * u.y;
    if up > 0.0 {
        let up = up.sqrt();
        Vector3::new(
            (u.x * u.z * d.x - u.y * d.y) / up + u.x * d.z,
            (u.y * u.z * d.x + u.x * d.y) / up + u.y * d.z,
            -up * d.x + u.z * d.z,
        )
    } else if u.z < 0.0 {
        Vector3::new(-d.x, d.y, -d.z)
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn trig_samples_are_unit() {
        let mut rng = StdRng::seed_from_u64(3);
        for v in sample_trig(500, &mut rng) {
            assert!((v.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn trig_cosines_span_both_hemispheres() {
        let mut rng = StdRng::seed_from_u64(11);
        let z: Vec<f64> = sample_trig(2000, &mut rng).iter().map(|v| v.z).collect();
        assert!(z.iter().all(|c| (-1.0..1.0).contains(c)));
        assert!(z.iter().any(|&c| c < -0.9));
        assert!(z.iter().any(|&c| c > 0.9));
    }

    #[test]
    fn linspace_endpoints() {
        assert_eq!(sample_linspace(5, -1.0, 1.0), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(sample_linspace(1, 3.0, 4.0), vec![3.0]);
        assert!(sample_linspace(0, 3.0, 4.0).is_empty());
    }

    #[test]
    fn linear_and_disc_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        assert!(sample_linear(200, -49.0, 49.0, &mut rng)
            .iter()
            .all(|&v| (-49.0..49.0).contains(&v)));
        assert!(sample_disc(200, &mut rng)
            .iter()
            .all(|p| p.norm() <= 1.0 && p.z == 0.0));
    }

    #[test]
    fn grid_layout() {
        let g = xy_grid(3, 2, 1.0, 2.0);
        assert_eq!(g.len(), 6);
        assert_eq!(g[0], Vector3::new(-1.0, -2.0, 0.0));
        assert_eq!(g[1], Vector3::new(0.0, -2.0, 0.0));
        assert_eq!(g[5], Vector3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn rotate_uz_keeps_transverse() {
        let u = Vector3::new(1.0, 0.0, -1.0).normalize();
        for i in 0..=16 {
            let phi = 2.0 * PI * i as f64 / 16.0;
            let d0 = Vector3::new(phi.cos(), phi.sin(), 0.0);
            let d1 = rotate_uz(d0, u);
            assert!(d1.dot(&u).abs() < 1e-12);
            assert!((d1.norm() - 1.0).abs() < 1e-12);
        }
        // +Z maps onto u itself
        assert!((rotate_uz(Vector3::z(), u) - u).norm() < 1e-12);
        // degenerate frames
        let d = Vector3::new(0.3, 0.4, 0.5);
        assert_eq!(rotate_uz(d, Vector3::z()), d);
        assert_eq!(rotate_uz(d, -Vector3::z()), Vector3::new(-0.3, 0.4, -0.5));
    }
}
