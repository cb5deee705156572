//! Axis-aligned lines of parallel rays (polarization `+Y`).
//!
//! The count is signed: a positive count samples positions uniformly at
//! random within the interval, a negative count lays out `|n|` evenly
//! spaced positions including both ends.

use super::GenCtx;
use crate::photon::{Photon, PhotonArray, TIME, Y};
use crate::sample::{sample_linear, sample_linspace};
use nalgebra::Vector3;
use rand::Rng;

/// Position sampling along the line, decoded from a signed count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineSampling {
    Random(usize),
    Even(usize),
}

impl LineSampling {
    pub fn from_signed(n: i64) -> Self {
        let count = n.unsigned_abs() as usize;
        if n < 0 {
            LineSampling::Even(count)
        } else {
            LineSampling::Random(count)
        }
    }

    pub fn count(self) -> usize {
        match self {
            LineSampling::Random(n) | LineSampling::Even(n) => n,
        }
    }

    fn positions<R: Rng>(self, lo: f64, hi: f64, rng: &mut R) -> Vec<f64> {
        match self {
            LineSampling::Random(n) => sample_linear(n, lo, hi, rng),
            LineSampling::Even(n) => sample_linspace(n, lo, hi),
        }
    }
}

/// Rays along `mom` starting on the x interval `x_range` at `(y0, z0)`.
pub fn line_xz<R: Rng>(
    ctx: &mut GenCtx<R>,
    sampling: LineSampling,
    mom: Vector3<f64>,
    x_range: (f64, f64),
    y0: f64,
    z0: f64,
) -> PhotonArray {
    let photons = sampling
        .positions(x_range.0, x_range.1, &mut ctx.rng)
        .into_iter()
        .map(|x| Photon::new(Vector3::new(x, y0, z0), TIME, mom, Y))
        .collect();
    ctx.array(photons)
}

/// Rays along `mom` starting on the z interval `z_range` at `(x0, y0)`.
pub fn line_zx<R: Rng>(
    ctx: &mut GenCtx<R>,
    sampling: LineSampling,
    mom: Vector3<f64>,
    x0: f64,
    y0: f64,
    z_range: (f64, f64),
) -> PhotonArray {
    let photons = sampling
        .positions(z_range.0, z_range.1, &mut ctx.rng)
        .into_iter()
        .map(|z| Photon::new(Vector3::new(x0, y0, z), TIME, mom, Y))
        .collect();
    ctx.array(photons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{find_violation, EPS};
    use crate::generate::Seed;
    use crate::photon::{Precision, X, Z};

    #[test]
    fn sign_selects_sampling() {
        assert_eq!(LineSampling::from_signed(5), LineSampling::Random(5));
        assert_eq!(LineSampling::from_signed(-5), LineSampling::Even(5));
        assert_eq!(LineSampling::from_signed(-5).count(), 5);
    }

    #[test]
    fn even_rain_spans_interval() {
        let mut ctx = GenCtx::new(Seed::Fixed(0), Precision::F4);
        let a = line_xz(&mut ctx, LineSampling::Even(5), -Z, (-250.0, 250.0), 0.0, 1000.0);
        let xs: Vec<f64> = a.photons().iter().map(|p| p.pos.x).collect();
        assert_eq!(xs, vec![-250.0, -125.0, 0.0, 125.0, 250.0]);
        assert!(a.photons().iter().all(|p| p.pos.z == 1000.0 && p.mom == -Z));
        assert_eq!(find_violation(&a, EPS), None);
    }

    #[test]
    fn random_positions_stay_inside_and_replay() {
        let draw = |seed| {
            let mut ctx = GenCtx::new(Seed::Fixed(seed), Precision::F8);
            line_xz(&mut ctx, LineSampling::Random(100), Z, (-49.0, 49.0), 0.0, -99.0)
        };
        let a = draw(3);
        assert!(a.photons().iter().all(|p| (-49.0..49.0).contains(&p.pos.x)));
        assert_eq!(a, draw(3));
        assert_ne!(a, draw(4));
    }

    #[test]
    fn side_line_along_z() {
        let mut ctx = GenCtx::new(Seed::Fixed(0), Precision::F8);
        let a = line_zx(&mut ctx, LineSampling::Even(3), -X, 1000.0, 0.0, (0.0, 300.0));
        let zs: Vec<f64> = a.photons().iter().map(|p| p.pos.z).collect();
        assert_eq!(zs, vec![0.0, 150.0, 300.0]);
        assert!(a.photons().iter().all(|p| p.pos.x == 1000.0 && p.mom == -X && p.pol == Y));
        assert_eq!(find_violation(&a, EPS), None);
    }
}
