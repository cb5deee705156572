//! Transverse replication of photon sets into parallel beams.
//!
//! Each base record is copied onto a lattice in the plane transverse to its
//! direction. The lattice axes are `oth = pol × mom` and `pol`, with a unit
//! step, and indices are centered: copy `j` of `r` sits at `j - r/2`
//! (integer division). The copy's start position is the lattice point
//! itself, relative to the origin; every other field is kept.

use crate::photon::{Photon, PhotonArray};
use nalgebra::Vector3;

fn centered(j: usize, r: usize) -> f64 {
    j as f64 - (r / 2) as f64
}

fn with_pos(p: &Photon, pos: Vector3<f64>) -> Photon {
    Photon { pos, ..*p }
}

/// `r` copies of each record along `pol × mom`; `len * r` records, base
/// order preserved. `r == 0` returns the base unchanged.
pub fn parallelize_1d(base: &PhotonArray, r: usize) -> PhotonArray {
    if r == 0 {
        return base.clone();
    }
    let mut out = Vec::with_capacity(base.len() * r);
    for p in base.photons() {
        let oth = p.pol.cross(&p.mom);
        for j in 0..r {
            out.push(with_pos(p, oth * centered(j, r)));
        }
    }
    PhotonArray::new(out, base.precision())
}

/// `rj * rk` copies of each record on the `(pol × mom, pol)` lattice.
/// `dims` other than exactly two entries returns the base unchanged.
pub fn parallelize_2d(base: &PhotonArray, dims: &[usize]) -> PhotonArray {
    let &[rj, rk] = dims else {
        return base.clone();
    };
    let mut out = Vec::with_capacity(base.len() * rj * rk);
    for p in base.photons() {
        let oth = p.pol.cross(&p.mom);
        for j in 0..rj {
            for k in 0..rk {
                out.push(with_pos(p, oth * centered(j, rj) + p.pol * centered(k, rk)));
            }
        }
    }
    PhotonArray::new(out, base.precision())
}
