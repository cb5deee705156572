use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use input_photons::cache::{default_base, BASE_ENV};
use input_photons::prelude::*;
use input_photons::{DEFAULT_NAMES, RECIPES};
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "input-photons")]
#[command(about = "Generate and cache synthetic input photon arrays")]
struct Cmd {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value_t = Level::INFO)]
    level: Level,

    #[command(subcommand)]
    action: Action,
}

#[derive(Args)]
struct CacheArgs {
    /// Floating width of the arrays (f4 or f8)
    #[arg(long, env = "INPUT_PHOTONS_DTYPE", default_value_t = Precision::F4)]
    precision: Precision,

    /// Cache directory [default: $HOME/.opticks/InputPhotons]
    #[arg(long, env = BASE_ENV)]
    base: Option<PathBuf>,
}

impl CacheArgs {
    fn cache(&self) -> Cache {
        let base = self.base.clone().unwrap_or_else(default_base);
        Cache::new(base, self.precision)
    }
}

#[derive(Subcommand)]
enum Action {
    /// Load (or generate and save) the named arrays and print them
    Generate {
        /// Recipe names; the default catalogue when empty
        names: Vec<String>,
        /// Seed for generation, or -1 for non-reproducible output
        #[arg(long, default_value_t = Seed::Fixed(0), allow_hyphen_values = true)]
        seed: Seed,
        #[command(flatten)]
        cache: CacheArgs,
    },
    /// Print the recipe table in match order and the default names
    List,
    /// Print the array and metadata paths for a name
    Paths {
        name: String,
        #[command(flatten)]
        cache: CacheArgs,
    },
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(cmd.level)
        .init();
    match cmd.action {
        Action::Generate { names, seed, cache } => generate_all(&cache.cache(), &names, seed),
        Action::List => {
            print!("{}", list());
            Ok(())
        }
        Action::Paths { name, cache } => {
            let (npy, json) = cache.cache().paths(&name);
            println!("{}\n{}", npy.display(), json.display());
            Ok(())
        }
    }
}

fn generate_all(cache: &Cache, names: &[String], seed: Seed) -> Result<()> {
    let names: Vec<&str> = if names.is_empty() {
        DEFAULT_NAMES.to_vec()
    } else {
        names.iter().map(String::as_str).collect()
    };
    let mut generated = 0usize;
    for name in &names {
        let (array, meta, origin) = load_or_generate(cache, name, seed)
            .with_context(|| format!("input photons {name:?}"))?;
        if origin == Origin::Generated {
            generated += 1;
        }
        print!("{}", describe(&array, &meta)?);
    }
    tracing::info!(
        names = names.len(),
        generated,
        base = %cache.base().display(),
        "done"
    );
    Ok(())
}

/// Metadata line, dtype line, then one 16-value row per record. Long arrays
/// show the first and last three rows around an ellipsis.
fn describe(array: &PhotonArray, meta: &Meta) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{}", serde_json::to_string(meta)?)?;
    writeln!(out, ".p {}", array.precision().descr())?;
    let photons = array.photons();
    let row = |p: &Photon| {
        let cells: Vec<String> = p.to_rows().iter().map(|v| format!("{v:9.3}")).collect();
        format!("[{}]", cells.join(" "))
    };
    if photons.len() > 6 {
        for p in &photons[..3] {
            writeln!(out, "{}", row(p))?;
        }
        writeln!(out, " ...")?;
        for p in &photons[photons.len() - 3..] {
            writeln!(out, "{}", row(p))?;
        }
    } else {
        for p in photons {
            writeln!(out, "{}", row(p))?;
        }
    }
    Ok(out)
}

fn list() -> String {
    let mut out = String::from("recipes (first match wins):\n");
    for (i, entry) in RECIPES.iter().enumerate() {
        let _ = writeln!(out, "{:>3} {:<20} {:?}", i + 1, entry.tag, entry.rule);
    }
    out.push_str("default names:\n");
    for name in DEFAULT_NAMES {
        let _ = writeln!(out, "    {name}");
    }
    out
}
