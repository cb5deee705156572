//! Cube-corner and axis photon sets (seed independent).

use super::{staggered_time, GenCtx};
use crate::photon::{Photon, PhotonArray, POSITION, X, Y, Z};
use nalgebra::Vector3;

/// Eight normalized `(±1, ±1, ±1)` directions.
///
/// Index bits pick the signs: bit 0 -> x, bit 1 -> y, bit 2 -> z, with a
/// clear bit meaning `-1`. Index 0 is `(-1,-1,-1)/√3`, index 7 `(1,1,1)/√3`.
pub fn cube_corner_dirs() -> [Vector3<f64>; 8] {
    let sign = |i: usize, bit: usize| if i & bit != 0 { 1.0 } else { -1.0 };
    std::array::from_fn(|i| Vector3::new(sign(i, 1), sign(i, 2), sign(i, 4)).normalize())
}

/// Outward rays from the corners: start at `POSITION + dir` so rays are
/// distinguishable, `pol = normalize(dir × Y)`.
pub fn cube_corners<R>(ctx: &GenCtx<R>) -> PhotonArray {
    let photons = cube_corner_dirs()
        .iter()
        .enumerate()
        .map(|(i, &dir)| {
            Photon::new(POSITION + dir, staggered_time(i), dir, dir.cross(&Y).normalize())
        })
        .collect();
    ctx.array(photons)
}

/// Rays starting at `radius * corner` and heading back to the origin.
pub fn inwards_cube_corners<R>(ctx: &GenCtx<R>, radius: f64) -> PhotonArray {
    tracing::debug!(radius, "inwards cube corners");
    let photons = cube_corner_dirs()
        .iter()
        .enumerate()
        .map(|(i, &corner)| {
            let mom = -corner;
            Photon::new(corner * radius, staggered_time(i), mom, mom.cross(&Y).normalize())
        })
        .collect();
    ctx.array(photons)
}

/// Six rays from the origin along `+X +Y +Z -X -Y -Z`; each polarization is
/// the next direction in that cycle.
pub fn axes<R>(ctx: &GenCtx<R>) -> PhotonArray {
    let dirs = [X, Y, Z, -X, -Y, -Z];
    let photons = (0..dirs.len())
        .map(|i| Photon::new(POSITION, staggered_time(i), dirs[i], dirs[(i + 1) % dirs.len()]))
        .collect();
    ctx.array(photons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{find_violation, EPS};
    use crate::generate::Seed;
    use crate::photon::Precision;

    #[test]
    fn corner_directions_cover_all_sign_combinations() {
        let dirs = cube_corner_dirs();
        let s = 1.0 / 3.0_f64.sqrt();
        assert!((dirs[0] - Vector3::new(-s, -s, -s)).norm() < 1e-15);
        assert!((dirs[7] - Vector3::new(s, s, s)).norm() < 1e-15);
        for sx in [-1.0, 1.0] {
            for sy in [-1.0, 1.0] {
                for sz in [-1.0, 1.0] {
                    let want = Vector3::new(sx, sy, sz) * s;
                    assert_eq!(dirs.iter().filter(|d| (*d - want).norm() < 1e-12).count(), 1);
                }
            }
        }
    }

    #[test]
    fn cube_corners_is_seed_independent() {
        for precision in [Precision::F4, Precision::F8] {
            let a = cube_corners(&GenCtx::new(Seed::Fixed(1), precision));
            let b = cube_corners(&GenCtx::new(Seed::Fixed(99), precision));
            assert_eq!(a, b);
            assert_eq!(a.len(), 8);
            assert_eq!(find_violation(&a, EPS), None);
        }
    }

    #[test]
    fn cube_corners_layout() {
        let a = cube_corners(&GenCtx::new(Seed::Fixed(0), Precision::F8));
        for (i, p) in a.photons().iter().enumerate() {
            assert_eq!(p.pos, POSITION + p.mom);
            assert!((p.time - 0.1 * (1.0 + i as f64)).abs() < 1e-12);
            assert_eq!(p.weight.to_bits(), 0);
            assert_eq!(p.wavelength, 440.0);
        }
    }

    #[test]
    fn inwards_corners_converge() {
        let a = inwards_cube_corners(&GenCtx::new(Seed::Unseeded, Precision::F8), 17699.0);
        assert_eq!(find_violation(&a, EPS), None);
        for p in a.photons() {
            assert!((p.pos.norm() - 17699.0).abs() < 1e-9);
            // heading straight at the origin
            assert!((p.pos.normalize() + p.mom).norm() < 1e-12);
        }
    }

    #[test]
    fn axes_cycle() {
        let a = axes(&GenCtx::new(Seed::Fixed(0), Precision::F4));
        assert_eq!(a.len(), 6);
        assert_eq!(find_violation(&a, EPS), None);
        assert_eq!(a.photons()[0].pol, Y);
        assert_eq!(a.photons()[5].mom, -Z);
        assert_eq!(a.photons()[5].pol, X);
    }
}
