//! Geometric photon generators.
//!
//! Purpose
//! - Each generator is a pure function of its parameters plus a [`GenCtx`]
//!   carrying the output precision and the rng handle.
//! - Outputs satisfy the transverse invariant (unit `mom`, unit `pol`,
//!   `mom·pol = 0`); the dispatcher re-checks before anything is persisted.
//!
//! Families
//! - `corners`: cube corners (outward, inward) and the six axes.
//! - `sphere`: random spherical directions.
//! - `plane`: circle in XZ, discs, XY grid.
//! - `line`: axis-aligned lines of parallel rays.

mod corners;
mod line;
mod plane;
mod sphere;

pub use corners::{axes, cube_corner_dirs, cube_corners, inwards_cube_corners};
pub use line::{line_xz, line_zx, LineSampling};
pub use plane::{grid_xy, random_disc, uniform_disc, xz_circle};
pub use sphere::random_spherical;

use crate::photon::{Photon, PhotonArray, Precision};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::str::FromStr;

/// Seed selector: a fixed seed reproduces output bit for bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seed {
    Fixed(u64),
    /// Seed from OS entropy; output is not reproducible.
    Unseeded,
}

impl Seed {
    /// Sentinel used on the command line and in metadata.
    pub const UNSEEDED: i64 = -1;

    /// Map the signed form: non-negative is a seed, `-1` means unseeded.
    pub fn from_i64(v: i64) -> Option<Self> {
        match v {
            Self::UNSEEDED => Some(Seed::Unseeded),
            v if v >= 0 => Some(Seed::Fixed(v as u64)),
            _ => None,
        }
    }

    /// Signed form written to metadata.
    pub fn as_i64(self) -> i64 {
        match self {
            Seed::Fixed(s) => s as i64,
            Seed::Unseeded => Self::UNSEEDED,
        }
    }

    pub fn rng(self) -> StdRng {
        match self {
            Seed::Fixed(s) => StdRng::seed_from_u64(s),
            Seed::Unseeded => StdRng::from_entropy(),
        }
    }
}

impl Default for Seed {
    fn default() -> Self {
        Seed::Fixed(0)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}

impl FromStr for Seed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v: i64 = s.parse().map_err(|e| format!("seed {s:?}: {e}"))?;
        Seed::from_i64(v).ok_or_else(|| format!("seed must be >= 0 or -1, got {v}"))
    }
}

/// Generation context: output precision plus the rng all random draws use.
pub struct GenCtx<R = StdRng> {
    pub precision: Precision,
    pub rng: R,
}

impl GenCtx<StdRng> {
    pub fn new(seed: Seed, precision: Precision) -> Self {
        Self {
            precision,
            rng: seed.rng(),
        }
    }
}

impl<R> GenCtx<R> {
    pub fn with_rng(rng: R, precision: Precision) -> Self {
        Self { precision, rng }
    }

    /// Wrap photons at the context precision.
    #[inline]
    pub(crate) fn array(&self, photons: Vec<Photon>) -> PhotonArray {
        PhotonArray::new(photons, self.precision)
    }
}

/// Emission time rising with index: `TIME * (1 + i)`.
#[inline]
pub(crate) fn staggered_time(i: usize) -> f64 {
    crate::photon::TIME * (1.0 + i as f64)
}
