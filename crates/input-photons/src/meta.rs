//! Provenance sidecar written next to every generated array.

use crate::generate::Seed;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Fixed provenance tag recorded as `creator`.
pub const CREATOR: &str = "input-photons";

/// Revision of this build, from `GIT_COMMIT` at compile time.
pub const CODE_REV: &str = match option_env!("GIT_COMMIT") {
    Some(rev) => rev,
    None => "unknown",
};

/// Metadata of one generated array. Read back verbatim on cache hits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Seed used; `-1` when unseeded.
    pub seed: i64,
    pub name: String,
    pub creator: String,
    /// Number of records.
    pub num: usize,
    #[serde(default = "unknown")]
    pub code_rev: String,
    /// Recipe-specific keys, e.g. `Parallelize1D_r`.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn unknown() -> String {
    "unknown".to_string()
}

impl Meta {
    pub fn new(seed: Seed, name: &str) -> Self {
        Self {
            seed: seed.as_i64(),
            name: name.to_string(),
            creator: CREATOR.to_string(),
            num: 0,
            code_rev: CODE_REV.to_string(),
            extra: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.extra.insert(key.to_string(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_flat_keys() {
        let mut m = Meta::new(Seed::Fixed(3), "CubeCorners10x10");
        m.num = 800;
        m.code_rev = "abc".into();
        m.insert("Parallelize2D_rr", vec![10, 10]);
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(
            v,
            json!({
                "seed": 3,
                "name": "CubeCorners10x10",
                "creator": "input-photons",
                "num": 800,
                "code_rev": "abc",
                "Parallelize2D_rr": [10, 10]
            })
        );
        let back: Meta = serde_json::from_value(v).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn code_rev_is_fixed_at_build_time() {
        let a = Meta::new(Seed::Fixed(0), "CubeCorners");
        let b = Meta::new(Seed::Fixed(0), "CubeCorners");
        assert_eq!(a.code_rev, CODE_REV);
        assert_eq!(a, b);
    }

    #[test]
    fn reads_sidecars_without_code_rev() {
        let v = json!({"seed": -1, "name": "RandomSpherical10", "creator": "x", "num": 10});
        let m: Meta = serde_json::from_value(v).unwrap();
        assert_eq!(m.seed, -1);
        assert_eq!(m.code_rev, "unknown");
        assert!(m.extra.is_empty());
    }
}
