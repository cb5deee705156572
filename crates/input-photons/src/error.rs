//! Error types shared across the crate.

use thiserror::Error;

/// Name decoding failures. Fatal for the name being processed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GrammarError {
    #[error("name {name:?} does not start with prefix {prefix:?}")]
    PrefixMismatch { name: String, prefix: String },

    #[error("unparsable count token {token:?} in {name:?}")]
    BadCount { name: String, token: String },

    #[error("unparsable axis token {token:?} in {name:?}")]
    BadAxis { name: String, token: String },

    #[error("unparsable radius {tail:?} in {name:?}")]
    BadRadius { name: String, tail: String },

    #[error("unparsable repeat dimensions {tail:?} in {name:?}")]
    BadDims { name: String, tail: String },
}

/// Cache read/write failures, propagated raw.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error on {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid array file {path}: {reason}")]
    Format { path: String, reason: String },
}

/// Top-level error for generating or loading a named array.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error("no recipe matches name {0:?}")]
    UnknownRecipe(String),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

pub type Result<T> = std::result::Result<T, Error>;
