//! Name grammar: `<Prefix><Token>(_<Token>)*`.
//!
//! - The last token is the count: `<int>`, `<int>k` (x1e3) or `<int>M` (x1e6).
//! - Earlier tokens are `<Axis><int>` with `Axis` one of `X Y Z R`; values
//!   may be negative (`R-500` selects an inward circle).
//! - Earlier tokens starting with any other character are ignored.
//!   Unclear whether that leniency is intended; keep it until confirmed.
//!
//! The other helpers decode recipe tails that do not follow the token form:
//! a bare integer (`UpXZ1000`), a float radius (`InwardsCubeCorners17699`)
//! and repeat dimensions (`CubeCorners10x10`).

use crate::error::GrammarError;

/// Axis letters recognized in non-count tokens.
pub const AXES: [char; 4] = ['X', 'Y', 'Z', 'R'];

/// Decoded name tail. Unset axes stay `None`; no zero defaults here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TailParams {
    pub n: i64,
    pub x: Option<i64>,
    pub y: Option<i64>,
    pub z: Option<i64>,
    pub r: Option<i64>,
}

impl TailParams {
    /// Value stored under an axis letter.
    pub fn axis(&self, letter: char) -> Option<i64> {
        match letter {
            'X' => self.x,
            'Y' => self.y,
            'Z' => self.z,
            'R' => self.r,
            _ => None,
        }
    }

    fn slot(&mut self, letter: char) -> Option<&mut Option<i64>> {
        match letter {
            'X' => Some(&mut self.x),
            'Y' => Some(&mut self.y),
            'Z' => Some(&mut self.z),
            'R' => Some(&mut self.r),
            _ => None,
        }
    }
}

fn strip<'a>(name: &'a str, prefix: &str) -> Result<&'a str, GrammarError> {
    name.strip_prefix(prefix)
        .ok_or_else(|| GrammarError::PrefixMismatch {
            name: name.to_string(),
            prefix: prefix.to_string(),
        })
}

/// Count token: plain integer, or digits with a `k`/`M` multiplier suffix.
pub fn parse_count(token: &str) -> Option<i64> {
    let (digits, scale) = if let Some(d) = token.strip_suffix('k') {
        (d, 1_000)
    } else if let Some(d) = token.strip_suffix('M') {
        (d, 1_000_000)
    } else {
        (token, 1)
    };
    digits.parse::<i64>().ok()?.checked_mul(scale)
}

/// Decode the tail of `name` after `prefix` into a [`TailParams`].
pub fn parse_tail(name: &str, prefix: &str) -> Result<TailParams, GrammarError> {
    let tail = strip(name, prefix)?;
    let tokens: Vec<&str> = if tail.contains('_') {
        tail.split('_').filter(|t| !t.is_empty()).collect()
    } else {
        vec![tail]
    };
    let (count, rest) = match tokens.split_last() {
        Some(split) => split,
        // tail of only separators, e.g. "RainXZ__"
        None => {
            return Err(GrammarError::BadCount {
                name: name.to_string(),
                token: tail.to_string(),
            })
        }
    };

    let mut out = TailParams {
        n: parse_count(count).ok_or_else(|| GrammarError::BadCount {
            name: name.to_string(),
            token: count.to_string(),
        })?,
        ..TailParams::default()
    };
    for token in rest {
        let mut chars = token.chars();
        let Some(letter) = chars.next() else { continue };
        let Some(slot) = out.slot(letter) else {
            tracing::debug!(name, token, "ignoring unrecognized token");
            continue;
        };
        let value = chars
            .as_str()
            .parse::<i64>()
            .map_err(|_| GrammarError::BadAxis {
                name: name.to_string(),
                token: token.to_string(),
            })?;
        *slot = Some(value);
    }
    Ok(out)
}

/// Tail that is a bare signed integer (`UpXZ1000`, `RandomDisc-10`).
pub fn parse_plain_int(name: &str, prefix: &str) -> Result<i64, GrammarError> {
    let tail = strip(name, prefix)?;
    tail.parse::<i64>().map_err(|_| GrammarError::BadCount {
        name: name.to_string(),
        token: tail.to_string(),
    })
}

/// Tail that is a float radius (`InwardsCubeCorners17699`).
pub fn parse_radius(name: &str, prefix: &str) -> Result<f64, GrammarError> {
    let tail = strip(name, prefix)?;
    tail.parse::<f64>()
        .ok()
        .filter(|r| r.is_finite())
        .ok_or_else(|| GrammarError::BadRadius {
            name: name.to_string(),
            tail: tail.to_string(),
        })
}

/// Repeat dimensions: `10` -> `[10]`, `10x20` -> `[10, 20]`.
pub fn parse_dims(name: &str, prefix: &str) -> Result<Vec<usize>, GrammarError> {
    let tail = strip(name, prefix)?;
    tail.split('x')
        .map(|d| d.parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| GrammarError::BadDims {
            name: name.to_string(),
            tail: tail.to_string(),
        })
}
