//! On-disk cache keyed by name and precision.
//!
//! Layout: `<base>/<name>_<f4|f8>.npy` plus `<base>/<name>_<f4|f8>.json`.
//! Hits are decided by existence of both files only. Nothing fingerprints
//! the recipe, so a changed generator keeps serving the old arrays until the
//! files are removed by hand. There is no locking; two processes filling the
//! same entry race on the write.

use crate::error::CacheError;
use crate::meta::Meta;
use crate::npy;
use crate::photon::{PhotonArray, Precision};
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Environment override for the base directory.
pub const BASE_ENV: &str = "INPUT_PHOTONS_BASE";

/// Default base: `$INPUT_PHOTONS_BASE`, else `$HOME/.opticks/InputPhotons`,
/// else `.opticks/InputPhotons` relative to the working directory.
pub fn default_base() -> PathBuf {
    if let Some(base) = std::env::var_os(BASE_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(base);
    }
    let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_default();
    home.join(".opticks").join("InputPhotons")
}

/// Where an array came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Hit,
    Generated,
}

/// Array + metadata store rooted at one directory, for one precision.
#[derive(Clone, Debug)]
pub struct Cache {
    base: PathBuf,
    precision: Precision,
}

impl Cache {
    pub fn new(base: impl Into<PathBuf>, precision: Precision) -> Self {
        Self {
            base: base.into(),
            precision,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// `(array, metadata)` file paths for `name`.
    pub fn paths(&self, name: &str) -> (PathBuf, PathBuf) {
        let stem = format!("{name}_{}", self.precision.tag());
        (
            self.base.join(format!("{stem}.npy")),
            self.base.join(format!("{stem}.json")),
        )
    }

    /// Both files of `name`, or `None` when either is missing.
    pub fn load(&self, name: &str) -> Result<Option<(PhotonArray, Meta)>, CacheError> {
        let (npy_path, json_path) = self.paths(name);
        if !(npy_path.exists() && json_path.exists()) {
            return Ok(None);
        }
        tracing::info!(name, npy = %npy_path.display(), json = %json_path.display(), "load");
        let file = fs::File::open(&npy_path).map_err(|e| io_err(&npy_path, e))?;
        let array = npy::read(BufReader::new(file)).map_err(|reason| CacheError::Format {
            path: npy_path.display().to_string(),
            reason,
        })?;
        let text = fs::read(&json_path).map_err(|e| io_err(&json_path, e))?;
        let meta = serde_json::from_slice(&text).map_err(|source| CacheError::Json {
            path: json_path.display().to_string(),
            source,
        })?;
        Ok(Some((array, meta)))
    }

    /// Write both files, creating the base directory if needed.
    pub fn store(&self, array: &PhotonArray, meta: &Meta) -> Result<(), CacheError> {
        if !self.base.is_dir() {
            tracing::info!(base = %self.base.display(), "creating folder");
            fs::create_dir_all(&self.base).map_err(|e| io_err(&self.base, e))?;
        }
        let (npy_path, json_path) = self.paths(&meta.name);
        tracing::info!(
            name = %meta.name,
            npy = %npy_path.display(),
            json = %json_path.display(),
            "save"
        );

        let file = fs::File::create(&npy_path).map_err(|e| io_err(&npy_path, e))?;
        let mut w = BufWriter::new(file);
        npy::write(&mut w, array)
            .and_then(|_| w.flush())
            .map_err(|e| io_err(&npy_path, e))?;

        let text = serde_json::to_vec(meta).map_err(|source| CacheError::Json {
            path: json_path.display().to_string(),
            source,
        })?;
        fs::write(&json_path, text).map_err(|e| io_err(&json_path, e))
    }

    /// Cached entry for `name`, or the output of `generate` after storing it.
    ///
    /// `generate` runs only on a miss.
    pub fn get_or_generate<E, F>(
        &self,
        name: &str,
        generate: F,
    ) -> Result<(PhotonArray, Meta, Origin), E>
    where
        F: FnOnce() -> Result<(PhotonArray, Meta), E>,
        E: From<CacheError>,
    {
        if let Some((array, meta)) = self.load(name)? {
            return Ok((array, meta, Origin::Hit));
        }
        let (array, meta) = generate()?;
        self.store(&array, &meta)?;
        Ok((array, meta, Origin::Generated))
    }
}

fn io_err(path: &Path, source: std::io::Error) -> CacheError {
    CacheError::Io {
        path: path.display().to_string(),
        source,
    }
}
