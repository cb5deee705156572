//! Minimal NPY codec for `(N, 4, 4)` photon arrays.
//!
//! Writes format version 1.0, little-endian, C order. Reads version 1.x and
//! 2.x headers but only the two photon dtypes and a `(N, 4, 4)` shape.

use crate::photon::{Photon, PhotonArray, Precision};
use std::io::{Read, Write};

const MAGIC: &[u8] = b"\x93NUMPY";
/// Header (magic + version + len + dict + newline) is padded to this.
const ALIGN: usize = 64;

/// Serialize `a` in NPY v1.0.
pub fn write<W: Write>(mut w: W, a: &PhotonArray) -> std::io::Result<()> {
    let precision = a.precision();
    let dict = format!(
        "{{'descr': '{}', 'fortran_order': False, 'shape': ({}, 4, 4), }}",
        precision.descr(),
        a.len()
    );
    // magic(6) + version(2) + header_len(2)
    let prefix = MAGIC.len() + 2 + 2;
    let pad = ALIGN - (prefix + dict.len() + 1) % ALIGN;
    let mut header = dict.into_bytes();
    header.extend(std::iter::repeat(b' ').take(pad % ALIGN));
    header.push(b'\n');

    w.write_all(MAGIC)?;
    w.write_all(&[1, 0])?;
    w.write_all(&(header.len() as u16).to_le_bytes())?;
    w.write_all(&header)?;

    let mut body = Vec::with_capacity(a.len() * 16 * precision.width());
    for v in a.flat() {
        match precision {
            Precision::F4 => body.extend_from_slice(&(v as f32).to_le_bytes()),
            Precision::F8 => body.extend_from_slice(&v.to_le_bytes()),
        }
    }
    w.write_all(&body)
}

/// Parse an NPY stream. `Err` carries a human-readable reason.
pub fn read<R: Read>(mut r: R) -> Result<PhotonArray, String> {
    let mut bytes = Vec::new();
    r.read_to_end(&mut bytes).map_err(|e| e.to_string())?;
    if bytes.len() < 10 || &bytes[..6] != MAGIC {
        return Err("missing NPY magic".into());
    }
    let (header_len, start) = match bytes[6] {
        1 => (u16::from_le_bytes([bytes[8], bytes[9]]) as usize, 10),
        2 | 3 => {
            if bytes.len() < 12 {
                return Err("truncated header".into());
            }
            let len = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
            (len as usize, 12)
        }
        v => return Err(format!("unsupported NPY version {v}")),
    };
    let body_start = start + header_len;
    let header = bytes
        .get(start..body_start)
        .and_then(|h| std::str::from_utf8(h).ok())
        .ok_or("truncated or non-UTF8 header")?;

    let descr = dict_value(header, "descr").ok_or("header lacks descr")?;
    let descr = descr.trim_matches(|c: char| c == '\'' || c == '"');
    let precision =
        Precision::from_descr(descr).ok_or_else(|| format!("unsupported dtype {descr}"))?;
    if dict_value(header, "fortran_order") != Some("False") {
        return Err("only C-order arrays are supported".into());
    }
    let shape = parse_shape(header).ok_or("unparsable shape")?;
    let n = match shape.as_slice() {
        &[n, 4, 4] => n,
        other => return Err(format!("expected shape (N, 4, 4), got {other:?}")),
    };

    let width = precision.width();
    let needed = n.checked_mul(16 * width).ok_or("shape overflows")?;
    let body = &bytes[body_start..];
    if body.len() != needed {
        return Err(format!("body holds {} bytes, shape needs {needed}", body.len()));
    }
    let values: Vec<f64> = body
        .chunks_exact(width)
        .map(|c| match precision {
            Precision::F4 => f32::from_le_bytes([c[0], c[1], c[2], c[3]]) as f64,
            Precision::F8 => f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]),
        })
        .collect();
    let photons = values
        .chunks_exact(16)
        .map(|c| {
            let mut rows = [0.0; 16];
            rows.copy_from_slice(c);
            Photon::from_rows(&rows)
        })
        .collect();
    Ok(PhotonArray::new(photons, precision))
}

/// Raw text of `'key': value` in the header dict, up to the next `,` or `}`
/// outside parentheses.
fn dict_value<'a>(header: &'a str, key: &str) -> Option<&'a str> {
    let at = header.find(&format!("'{key}'"))?;
    let rest = header[at + key.len() + 2..].trim_start().strip_prefix(':')?.trim_start();
    let mut depth = 0usize;
    for (i, c) in rest.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' | '}' if depth == 0 => return Some(rest[..i].trim()),
            _ => {}
        }
    }
    None
}

fn parse_shape(header: &str) -> Option<Vec<usize>> {
    let raw = dict_value(header, "shape")?;
    let inner = raw.strip_prefix('(')?.strip_suffix(')')?;
    inner
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().ok())
        .collect()
}
