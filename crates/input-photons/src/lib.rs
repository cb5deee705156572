//! Synthetic input photons for optical simulation fixtures.
//!
//! A symbolic name such as `RainXZ_Z230_X1000_1M` selects a recipe and its
//! parameters. The crate decodes the name, runs the geometric generator,
//! checks the transverse invariant, and caches array + metadata on disk.
//!
//! Flow
//! - `grammar` decodes names; `recipe` maps names onto generators.
//! - `generate` holds the generators; `replicate` fans records out into
//!   parallel beams; `check` validates every output.
//! - `cache` persists arrays (`npy`) and metadata (`meta`) by name and
//!   precision.

pub mod cache;
pub mod check;
pub mod error;
pub mod generate;
pub mod grammar;
pub mod meta;
pub mod npy;
pub mod photon;
pub mod recipe;
pub mod replicate;
pub mod sample;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cache::{Cache, Origin};
pub use error::{CacheError, Error, GrammarError, Result};
pub use generate::{GenCtx, Seed};
pub use meta::Meta;
pub use photon::{Photon, PhotonArray, Precision};
pub use recipe::{generate, Recipe, DEFAULT_NAMES, RECIPES};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cache::{default_base, Cache, Origin};
    pub use crate::generate::{GenCtx, Seed};
    pub use crate::grammar::{parse_tail, TailParams};
    pub use crate::photon::{Photon, PhotonArray, Precision};
    pub use crate::recipe::{generate, Recipe};
    pub use crate::replicate::{parallelize_1d, parallelize_2d};
    pub use crate::{load_or_generate, Meta};
}

/// Array for `name` from `cache`, generating and storing it on a miss.
///
/// The cache precision decides the generated width. A hit never runs the
/// generator, so `seed` only matters on a miss.
pub fn load_or_generate(
    cache: &Cache,
    name: &str,
    seed: Seed,
) -> Result<(PhotonArray, Meta, Origin)> {
    cache.get_or_generate(name, || generate(name, seed, cache.precision()))
}
