//! Photon records, arrays and the persisted floating width.
//!
//! Layout
//! - A record is four 4-vectors, mirroring the downstream `sphoton` quad:
//!   `[pos, time] [mom, weight] [pol, wavelength] [reserved]`.
//! - The weight slot is always `0.0`. Consumers reinterpret that slot as an
//!   integer index, so its bit pattern must stay all-zero.
//!
//! Precision
//! - Generators compute in f64; `PhotonArray::new` rounds every value to the
//!   active width so memory and disk agree bit for bit.

use nalgebra::{Matrix4, Vector3};
use std::fmt;
use std::str::FromStr;

/// Canonical axes.
pub const X: Vector3<f64> = Vector3::new(1.0, 0.0, 0.0);
pub const Y: Vector3<f64> = Vector3::new(0.0, 1.0, 0.0);
pub const Z: Vector3<f64> = Vector3::new(0.0, 0.0, 1.0);

/// Default start position.
pub const POSITION: Vector3<f64> = Vector3::new(0.0, 0.0, 0.0);
/// Base emission time (ns).
pub const TIME: f64 = 0.1;
/// Wavelength (nm).
pub const WAVELENGTH: f64 = 440.0;
/// Reserved weight slot; zero so the int32 view is zero as well.
pub const WEIGHT: f64 = 0.0;

/// One synthetic photon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Photon {
    pub pos: Vector3<f64>,
    pub time: f64,
    pub mom: Vector3<f64>,
    pub weight: f64,
    pub pol: Vector3<f64>,
    pub wavelength: f64,
}

impl Photon {
    /// Photon with the default weight and wavelength.
    #[inline]
    pub fn new(pos: Vector3<f64>, time: f64, mom: Vector3<f64>, pol: Vector3<f64>) -> Self {
        Self {
            pos,
            time,
            mom,
            weight: WEIGHT,
            pol,
            wavelength: WAVELENGTH,
        }
    }

    /// Row-major 4x4 block as persisted: 16 values, row 3 zeroed.
    pub fn to_rows(&self) -> [f64; 16] {
        [
            self.pos.x,
            self.pos.y,
            self.pos.z,
            self.time,
            self.mom.x,
            self.mom.y,
            self.mom.z,
            self.weight,
            self.pol.x,
            self.pol.y,
            self.pol.z,
            self.wavelength,
            0.0,
            0.0,
            0.0,
            0.0,
        ]
    }

    /// Inverse of [`Photon::to_rows`]; row 3 is ignored.
    pub fn from_rows(v: &[f64; 16]) -> Self {
        Self {
            pos: Vector3::new(v[0], v[1], v[2]),
            time: v[3],
            mom: Vector3::new(v[4], v[5], v[6]),
            weight: v[7],
            pol: Vector3::new(v[8], v[9], v[10]),
            wavelength: v[11],
        }
    }

    /// The record as a 4x4 matrix (rows are the four quads).
    pub fn as_matrix(&self) -> Matrix4<f64> {
        Matrix4::from_row_slice(&self.to_rows())
    }

    fn rounded(&self, precision: Precision) -> Self {
        let r = |v: f64| precision.round(v);
        Self {
            pos: self.pos.map(r),
            time: r(self.time),
            mom: self.mom.map(r),
            weight: r(self.weight),
            pol: self.pol.map(r),
            wavelength: r(self.wavelength),
        }
    }
}

/// Floating width of the persisted array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Precision {
    #[default]
    F4,
    F8,
}

impl Precision {
    /// Tag embedded in cache file names (`_f4` / `_f8`).
    pub fn tag(self) -> &'static str {
        match self {
            Precision::F4 => "f4",
            Precision::F8 => "f8",
        }
    }

    /// NPY dtype descriptor.
    pub fn descr(self) -> &'static str {
        match self {
            Precision::F4 => "<f4",
            Precision::F8 => "<f8",
        }
    }

    pub fn from_descr(descr: &str) -> Option<Self> {
        match descr {
            "<f4" => Some(Precision::F4),
            "<f8" => Some(Precision::F8),
            _ => None,
        }
    }

    /// Bytes per value.
    pub fn width(self) -> usize {
        match self {
            Precision::F4 => 4,
            Precision::F8 => 8,
        }
    }

    /// Round an f64 to this width (identity for `F8`).
    #[inline]
    pub fn round(self, v: f64) -> f64 {
        match self {
            Precision::F4 => v as f32 as f64,
            Precision::F8 => v,
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Precision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "f4" | "float32" | "np.float32" => Ok(Precision::F4),
            "f8" | "float64" | "np.float64" => Ok(Precision::F8),
            other => Err(format!("unknown precision {other:?} (expected f4 or f8)")),
        }
    }
}

/// Ordered photon records sharing one recipe and one width.
///
/// Invariant: every stored value is representable in `precision`.
#[derive(Clone, Debug, PartialEq)]
pub struct PhotonArray {
    precision: Precision,
    photons: Vec<Photon>,
}

impl PhotonArray {
    /// Wrap `photons`, rounding every value to `precision`.
    pub fn new(photons: Vec<Photon>, precision: Precision) -> Self {
        let photons = match precision {
            Precision::F8 => photons,
            Precision::F4 => photons.iter().map(|p| p.rounded(precision)).collect(),
        };
        Self { precision, photons }
    }

    #[inline]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    #[inline]
    pub fn photons(&self) -> &[Photon] {
        &self.photons
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.photons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.photons.is_empty()
    }

    pub fn into_photons(self) -> Vec<Photon> {
        self.photons
    }

    /// Shape of the persisted array.
    pub fn shape(&self) -> [usize; 3] {
        [self.photons.len(), 4, 4]
    }

    /// All values in C order, `len * 16` entries.
    pub fn flat(&self) -> Vec<f64> {
        self.photons.iter().flat_map(|p| p.to_rows()).collect()
    }
}
