//! Random spherical directions.

use super::{staggered_time, GenCtx};
use crate::photon::{Photon, PhotonArray, POSITION, Y};
use crate::sample::sample_trig;
use rand::Rng;

/// `n` rays in random directions, each starting one unit out along its own
/// direction (a virtual unit sphere) and travelling radially outward.
pub fn random_spherical<R: Rng>(ctx: &mut GenCtx<R>, n: usize) -> PhotonArray {
    let photons = sample_trig(n, &mut ctx.rng)
        .into_iter()
        .enumerate()
        .map(|(i, dir)| {
            Photon::new(POSITION + dir, staggered_time(i), dir, dir.cross(&Y).normalize())
        })
        .collect();
    ctx.array(photons)
}
