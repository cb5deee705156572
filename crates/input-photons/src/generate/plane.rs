//! Planar layouts: XZ circle, discs and XY grid.

use super::{staggered_time, GenCtx};
use crate::photon::{Photon, PhotonArray, POSITION, TIME, X, Y, Z};
use crate::sample::{rotate_uz, sample_disc, sample_linspace, sample_trig, xy_grid};
use nalgebra::Vector3;
use rand::Rng;
use std::f64::consts::PI;

/// `n` rays on a circle of radius `|radius|` in the XZ plane.
///
/// Angles are `2π * linspace(frac.0, frac.1, n)`, so a full circle repeats
/// the start angle at the end. Directions are radial: outward for a positive
/// radius, inward for a negative one. `pol` is `Y` rotated into the frame of
/// each direction, which keeps it perpendicular to the XZ plane.
pub fn xz_circle<R>(ctx: &GenCtx<R>, n: usize, radius: f64, frac: (f64, f64)) -> PhotonArray {
    let inwards = radius < 0.0;
    let photons = sample_linspace(n, frac.0, frac.1)
        .into_iter()
        .map(|f| {
            let phi = 2.0 * PI * f;
            let radial = Vector3::new(phi.cos(), 0.0, phi.sin());
            let mom = if inwards { -radial } else { radial };
            Photon::new(POSITION + radial * radius.abs(), TIME, mom, rotate_uz(Y, mom))
        })
        .collect();
    ctx.array(photons)
}

/// `n` upward rays scattered over a disc of radius 100 in the XY plane.
///
/// Offsets are the x/y components of random sphere directions, which piles
/// points toward the rim; use [`uniform_disc`] for uniform area density.
pub fn random_disc<R: Rng>(ctx: &mut GenCtx<R>, n: usize) -> PhotonArray {
    let photons = sample_trig(n, &mut ctx.rng)
        .into_iter()
        .enumerate()
        .map(|(i, s)| {
            let offset = Vector3::new(s.x * 100.0, s.y * 100.0, 0.0);
            Photon::new(POSITION + offset, staggered_time(i), Z, X)
        })
        .collect();
    ctx.array(photons)
}

/// `n` downward rays uniform in area over a disc of `radius` in the XY plane.
pub fn uniform_disc<R: Rng>(ctx: &mut GenCtx<R>, n: usize, radius: f64) -> PhotonArray {
    let photons = sample_disc(n, &mut ctx.rng)
        .into_iter()
        .map(|d| Photon::new(POSITION + d * radius, TIME, -Z, X))
        .collect();
    ctx.array(photons)
}

/// Downward rays on a `s x s` lattice (`s = ⌊√n⌋`) spanning
/// `[-extent, extent]` in x and y at height `z`.
pub fn grid_xy<R>(ctx: &GenCtx<R>, n: usize, extent: f64, z: f64) -> PhotonArray {
    let s = isqrt(n);
    let photons = xy_grid(s, s, extent, extent)
        .into_iter()
        .map(|p| Photon::new(POSITION + Vector3::new(p.x, p.y, z), TIME, -Z, X))
        .collect();
    ctx.array(photons)
}

fn isqrt(n: usize) -> usize {
    let mut s = (n as f64).sqrt() as usize;
    while s * s > n {
        s -= 1;
    }
    while (s + 1) * (s + 1) <= n {
        s += 1;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{find_violation, EPS};
    use crate::generate::Seed;
    use crate::photon::Precision;

    fn ctx() -> GenCtx {
        GenCtx::new(Seed::Fixed(0), Precision::F8)
    }

    #[test]
    fn circle_outward_and_inward() {
        let out = xz_circle(&ctx(), 361, 10.0, (0.0, 1.0));
        assert_eq!(out.len(), 361);
        assert_eq!(find_violation(&out, EPS), None);
        for p in out.photons() {
            assert!((p.pos.norm() - 10.0).abs() < 1e-9);
            assert_eq!(p.pos.y, 0.0);
            assert!((p.pos.normalize() - p.mom).norm() < 1e-12);
            assert!((p.pol.y.abs() - 1.0).abs() < 1e-12);
        }
        let first = out.photons()[0].pos;
        let last = out.photons()[360].pos;
        assert!((first - last).norm() < 1e-9);

        let inw = xz_circle(&ctx(), 100, -500.0, (0.0, 0.5));
        assert_eq!(find_violation(&inw, EPS), None);
        for p in inw.photons() {
            assert!((p.pos.norm() - 500.0).abs() < 1e-9);
            assert!((p.pos.normalize() + p.mom).norm() < 1e-12);
            // semicircle stays on the z >= 0 side
            assert!(p.pos.z > -1e-9);
        }
    }

    #[test]
    fn discs() {
        let mut c = ctx();
        let rd = random_disc(&mut c, 100);
        assert_eq!(find_violation(&rd, EPS), None);
        assert!(rd.photons().iter().all(|p| p.pos.xy().norm() <= 100.0 + 1e-9 && p.pos.z == 0.0));
        assert!(rd.photons().iter().all(|p| p.mom == Z && p.pol == X));

        let ud = uniform_disc(&mut c, 1000, 500.0);
        assert_eq!(find_violation(&ud, EPS), None);
        assert!(ud.photons().iter().all(|p| p.pos.norm() <= 500.0 + 1e-9 && p.mom == -Z));
    }

    #[test]
    fn grid_truncates_to_square() {
        let g = grid_xy(&ctx(), 10_000, 700.0, 230.0);
        assert_eq!(g.len(), 10_000);
        let g = grid_xy(&ctx(), 40_001, 1000.0, 1000.0);
        assert_eq!(g.len(), 200 * 200);
        assert_eq!(find_violation(&g, EPS), None);
        assert!(g.photons().iter().all(|p| p.pos.z == 1000.0));
        assert_eq!(g.photons()[0].pos.x, -1000.0);
        assert_eq!(g.photons()[g.len() - 1].pos.y, 1000.0);
    }

    #[test]
    fn isqrt_exact() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
        assert_eq!(isqrt(40_000), 200);
    }
}
