//! Name → recipe dispatch.
//!
//! Model
//! - [`RECIPES`] is an ordered table of `(tag, match rule, decoder)`. The
//!   first entry whose rule matches the name decodes it into a typed
//!   [`Recipe`]; later entries are never consulted.
//! - Specific entries precede generic ones that share a prefix: the exact
//!   `CubeCorners` name sits before the `CubeCorners<dims>` prefix entry.
//! - Decoders apply the per-recipe defaults for absent axis parameters.
//!
//! Flow of [`generate`]: seed the rng → resolve → run → check invariant →
//! assemble [`Meta`].

use crate::check;
use crate::error::{Error, GrammarError, Result};
use crate::generate::{self as gen, GenCtx, LineSampling, Seed};
use crate::grammar::{parse_dims, parse_plain_int, parse_radius, parse_tail};
use crate::meta::Meta;
use crate::photon::{PhotonArray, Precision, X, Z};
use crate::replicate::{parallelize_1d, parallelize_2d};
use nalgebra::Vector3;
use rand::Rng;
use serde_json::Value;

/// How a table entry matches a name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    /// The name equals the tag.
    Exact,
    /// The name starts with the tag; the rest is decoded.
    Prefix,
}

/// One row of the dispatch table.
pub struct RecipeEntry {
    pub tag: &'static str,
    pub rule: Rule,
    decode: fn(&str) -> std::result::Result<Recipe, GrammarError>,
}

impl RecipeEntry {
    pub fn matches(&self, name: &str) -> bool {
        match self.rule {
            Rule::Exact => name == self.tag,
            Rule::Prefix => name.starts_with(self.tag),
        }
    }
}

/// Dispatch table in priority order.
pub static RECIPES: [RecipeEntry; 14] = [
    RecipeEntry { tag: "CubeCorners", rule: Rule::Exact, decode: decode_corners },
    RecipeEntry { tag: "InwardsCubeCorners", rule: Rule::Prefix, decode: decode_inwards },
    RecipeEntry { tag: "CubeCorners", rule: Rule::Prefix, decode: decode_parallel },
    RecipeEntry { tag: "RandomSpherical", rule: Rule::Prefix, decode: decode_spherical },
    RecipeEntry { tag: "Axes", rule: Rule::Exact, decode: decode_axes },
    RecipeEntry { tag: "UpXZ", rule: Rule::Prefix, decode: decode_up },
    RecipeEntry { tag: "DownXZ", rule: Rule::Prefix, decode: decode_down },
    RecipeEntry { tag: "SemiCircleXZ", rule: Rule::Prefix, decode: decode_semicircle },
    RecipeEntry { tag: "CircleXZ", rule: Rule::Prefix, decode: decode_circle },
    RecipeEntry { tag: "RainXZ", rule: Rule::Prefix, decode: decode_rain },
    RecipeEntry { tag: "SideZX", rule: Rule::Prefix, decode: decode_side },
    RecipeEntry { tag: "UniformDisc", rule: Rule::Prefix, decode: decode_uniform_disc },
    RecipeEntry { tag: "GridXY", rule: Rule::Prefix, decode: decode_grid },
    RecipeEntry { tag: "RandomDisc", rule: Rule::Prefix, decode: decode_random_disc },
];

/// Names generated when none are given.
pub const DEFAULT_NAMES: &[&str] = &[
    "CubeCorners",
    "CubeCorners10x10",
    "CubeCorners100",
    "CubeCorners100x100",
    "RandomSpherical10",
    "RandomSpherical100",
    "RandomSpherical1M",
    "InwardsCubeCorners17699",
    "InwardsCubeCorners1",
    "RandomDisc10",
    "RandomDisc100",
    "UpXZ1000",
    "DownXZ1000",
    "RainXZ100",
    "RainXZ1000",
    "RainXZ100k",
    "RainXZ10k",
    "RainXZ_Z230_100",
    "RainXZ_Z230_1000",
    "RainXZ_Z230_100k",
    "RainXZ_Z230_10k",
    "RainXZ_Z230_1M",
    "RainXZ_Z195_100",
    "RainXZ_Z195_1000",
    "RainXZ_Z195_100k",
    "RainXZ_Z195_10k",
    "RainXZ_Z230_X700_100",
    "RainXZ_Z230_X700_1000",
    "RainXZ_Z230_X700_10k",
    "RainXZ_Z230_X25_100k",
    "UniformDisc_R500_10k",
    "GridXY_X700_Z230_10k",
    "GridXY_X1000_Z1000_40k",
    "CircleXZ_R500_100k",
    "CircleXZ_R10_361",
    "SemiCircleXZ_R-500_100k",
    "SideZX_X300_100k",
];

/// A decoded recipe with its parameters resolved.
#[derive(Clone, Debug, PartialEq)]
pub enum Recipe {
    CubeCorners,
    InwardsCubeCorners { radius: f64 },
    /// Outward corners replicated: one entry → 1D, otherwise 2D.
    ParallelCorners { dims: Vec<usize> },
    RandomSpherical { n: usize },
    Axes,
    LineXZ { sampling: LineSampling, mom: Vector3<f64>, half_width: f64, z0: f64 },
    LineZX { sampling: LineSampling, mom: Vector3<f64>, x0: f64, z_max: f64 },
    CircleXZ { n: usize, radius: f64, frac: (f64, f64) },
    UniformDisc { n: usize, radius: f64 },
    GridXY { n: usize, extent: f64, z: f64 },
    RandomDisc { n: usize },
}

fn count(name: &str, n: i64) -> std::result::Result<usize, GrammarError> {
    usize::try_from(n).map_err(|_| GrammarError::BadCount {
        name: name.to_string(),
        token: n.to_string(),
    })
}

fn or(v: Option<i64>, default: f64) -> f64 {
    v.map_or(default, |v| v as f64)
}

fn decode_corners(_: &str) -> std::result::Result<Recipe, GrammarError> {
    Ok(Recipe::CubeCorners)
}

fn decode_axes(_: &str) -> std::result::Result<Recipe, GrammarError> {
    Ok(Recipe::Axes)
}

fn decode_inwards(name: &str) -> std::result::Result<Recipe, GrammarError> {
    Ok(Recipe::InwardsCubeCorners { radius: parse_radius(name, "InwardsCubeCorners")? })
}

fn decode_parallel(name: &str) -> std::result::Result<Recipe, GrammarError> {
    Ok(Recipe::ParallelCorners { dims: parse_dims(name, "CubeCorners")? })
}

fn decode_spherical(name: &str) -> std::result::Result<Recipe, GrammarError> {
    let d = parse_tail(name, "RandomSpherical")?;
    Ok(Recipe::RandomSpherical { n: count(name, d.n)? })
}

fn decode_up(name: &str) -> std::result::Result<Recipe, GrammarError> {
    let n = parse_plain_int(name, "UpXZ")?;
    Ok(Recipe::LineXZ {
        sampling: LineSampling::from_signed(n),
        mom: Z,
        half_width: 49.0,
        z0: -99.0,
    })
}

fn decode_down(name: &str) -> std::result::Result<Recipe, GrammarError> {
    let n = parse_plain_int(name, "DownXZ")?;
    Ok(Recipe::LineXZ {
        sampling: LineSampling::from_signed(n),
        mom: -Z,
        half_width: 200.0,
        z0: 999.0,
    })
}

fn decode_circle_with(
    name: &str,
    prefix: &str,
    frac: (f64, f64),
) -> std::result::Result<Recipe, GrammarError> {
    let d = parse_tail(name, prefix)?;
    Ok(Recipe::CircleXZ { n: count(name, d.n)?, radius: or(d.r, 100.0), frac })
}

fn decode_semicircle(name: &str) -> std::result::Result<Recipe, GrammarError> {
    decode_circle_with(name, "SemiCircleXZ", (0.0, 0.5))
}

fn decode_circle(name: &str) -> std::result::Result<Recipe, GrammarError> {
    decode_circle_with(name, "CircleXZ", (0.0, 1.0))
}

/// Rain and side lines flip the count sign: plain names get even spacing,
/// a negative count in the name asks for random positions.
fn decode_rain(name: &str) -> std::result::Result<Recipe, GrammarError> {
    let d = parse_tail(name, "RainXZ")?;
    Ok(Recipe::LineXZ {
        sampling: LineSampling::from_signed(d.n.saturating_neg()),
        mom: -Z,
        half_width: or(d.x, 250.0),
        z0: or(d.z, 1000.0),
    })
}

fn decode_side(name: &str) -> std::result::Result<Recipe, GrammarError> {
    let d = parse_tail(name, "SideZX")?;
    Ok(Recipe::LineZX {
        sampling: LineSampling::from_signed(d.n.saturating_neg()),
        mom: -X,
        x0: or(d.x, 1000.0),
        z_max: or(d.z, 250.0),
    })
}

fn decode_uniform_disc(name: &str) -> std::result::Result<Recipe, GrammarError> {
    let d = parse_tail(name, "UniformDisc")?;
    Ok(Recipe::UniformDisc { n: count(name, d.n)?, radius: or(d.r, 100.0) })
}

fn decode_grid(name: &str) -> std::result::Result<Recipe, GrammarError> {
    let d = parse_tail(name, "GridXY")?;
    Ok(Recipe::GridXY { n: count(name, d.n)?, extent: or(d.x, 100.0), z: or(d.z, 1000.0) })
}

fn decode_random_disc(name: &str) -> std::result::Result<Recipe, GrammarError> {
    let n = parse_plain_int(name, "RandomDisc")?;
    Ok(Recipe::RandomDisc { n: count(name, n)? })
}

impl Recipe {
    /// First table entry matching `name`, decoded.
    pub fn resolve(name: &str) -> Result<Self> {
        let Some(entry) = RECIPES.iter().find(|e| e.matches(name)) else {
            tracing::error!(name, "no generate method for name");
            return Err(Error::UnknownRecipe(name.to_string()));
        };
        let recipe = (entry.decode)(name)?;
        tracing::debug!(name, tag = entry.tag, ?recipe, "resolved");
        Ok(recipe)
    }

    /// Run the recipe. Returns the array and recipe-specific metadata keys.
    pub fn generate<R: Rng>(
        &self,
        ctx: &mut GenCtx<R>,
    ) -> (PhotonArray, Vec<(&'static str, Value)>) {
        let mut extra = Vec::new();
        let array = match self {
            Recipe::CubeCorners => gen::cube_corners(ctx),
            Recipe::InwardsCubeCorners { radius } => gen::inwards_cube_corners(ctx, *radius),
            Recipe::ParallelCorners { dims } => {
                let base = gen::cube_corners(ctx);
                if let [r] = dims.as_slice() {
                    extra.push(("Parallelize1D_r", Value::from(*r)));
                    parallelize_1d(&base, *r)
                } else {
                    extra.push(("Parallelize2D_rr", Value::from(dims.clone())));
                    parallelize_2d(&base, dims)
                }
            }
            Recipe::RandomSpherical { n } => gen::random_spherical(ctx, *n),
            Recipe::Axes => gen::axes(ctx),
            Recipe::LineXZ { sampling, mom, half_width, z0 } => {
                gen::line_xz(ctx, *sampling, *mom, (-half_width, *half_width), 0.0, *z0)
            }
            Recipe::LineZX { sampling, mom, x0, z_max } => {
                gen::line_zx(ctx, *sampling, *mom, *x0, 0.0, (0.0, *z_max))
            }
            Recipe::CircleXZ { n, radius, frac } => gen::xz_circle(ctx, *n, *radius, *frac),
            Recipe::UniformDisc { n, radius } => gen::uniform_disc(ctx, *n, *radius),
            Recipe::GridXY { n, extent, z } => gen::grid_xy(ctx, *n, *extent, *z),
            Recipe::RandomDisc { n } => gen::random_disc(ctx, *n),
        };
        (array, extra)
    }
}

/// Generate the array for `name` from scratch and assemble its metadata.
///
/// Panics if the generated array breaks the transverse invariant.
pub fn generate(name: &str, seed: Seed, precision: Precision) -> Result<(PhotonArray, Meta)> {
    if let Seed::Fixed(s) = seed {
        tracing::info!(seed = s, "seeding");
    }
    tracing::info!(name, %precision, "generate");
    let recipe = Recipe::resolve(name)?;
    let mut ctx = GenCtx::new(seed, precision);
    let (array, extra) = recipe.generate(&mut ctx);
    check::assert_transverse(&array);

    let mut meta = Meta::new(seed, name);
    for (key, value) in extra {
        meta.insert(key, value);
    }
    meta.num = array.len();
    Ok((array, meta))
}
