//! Transverse invariant: unit `mom`, unit `pol`, `mom · pol ≈ 0`.
//!
//! The dot product is computed twice: an elementwise component sum per
//! record and a batched inner product over `3 x N` matrices. Both must agree
//! on the verdict. A violation means a broken generator, so the asserting
//! entry point panics instead of returning an error.

use crate::photon::PhotonArray;
use nalgebra::DMatrix;

/// Tolerance applied after every generation.
pub const EPS: f64 = 1e-6;

/// First failing record and what failed.
#[derive(Clone, Debug, PartialEq)]
pub enum Violation {
    NotTransverse { index: usize, dot: f64 },
    MomNotUnit { index: usize, norm: f64 },
    PolNotUnit { index: usize, norm: f64 },
}

/// Per-record `mom · pol` as a component sum.
fn dots_elementwise(a: &PhotonArray) -> Vec<f64> {
    a.photons()
        .iter()
        .map(|p| p.mom.x * p.pol.x + p.mom.y * p.pol.y + p.mom.z * p.pol.z)
        .collect()
}

/// Per-record `mom · pol` as the diagonal of a batched inner product.
fn dots_batched(a: &PhotonArray) -> Vec<f64> {
    let n = a.len();
    let mom = DMatrix::from_fn(3, n, |r, c| a.photons()[c].mom[r]);
    let pol = DMatrix::from_fn(3, n, |r, c| a.photons()[c].pol[r]);
    // elementwise product, then each column summed over its three rows
    mom.component_mul(&pol).row_sum().iter().copied().collect()
}

/// First violation of the invariant at tolerance `eps`, if any.
pub fn find_violation(a: &PhotonArray, eps: f64) -> Option<Violation> {
    let d1 = dots_elementwise(a);
    let d2 = dots_batched(a);
    for (index, p) in a.photons().iter().enumerate() {
        let dot = if d1[index].abs() >= d2[index].abs() {
            d1[index]
        } else {
            d2[index]
        };
        if !(dot.abs() < eps) {
            return Some(Violation::NotTransverse { index, dot });
        }
        let norm = p.mom.norm();
        if !((norm - 1.0).abs() < eps) {
            return Some(Violation::MomNotUnit { index, norm });
        }
        let norm = p.pol.norm();
        if !((norm - 1.0).abs() < eps) {
            return Some(Violation::PolNotUnit { index, norm });
        }
    }
    None
}

/// Panic if any record breaks the invariant at [`EPS`].
#[track_caller]
pub fn assert_transverse(a: &PhotonArray) {
    if let Some(v) = find_violation(a, EPS) {
        panic!("photon invariant violated: {v:?}");
    }
}
