//! Named fixture files for floatcurve tests, listed in `fixtures/manifest.json`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

static FIXTURES_DIR: Lazy<PathBuf> =
    Lazy::new(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures"));

/// Manifest tables map a fixture name to a path under `fixtures/`.
#[derive(Debug, Deserialize)]
struct Manifest {
    curves: BTreeMap<String, String>,
    #[serde(default)]
    configs: BTreeMap<String, String>,
}

#[derive(Clone, Copy, Debug)]
enum Kind {
    Curve,
    Config,
}

impl Kind {
    fn table(self) -> &'static BTreeMap<String, String> {
        match self {
            Kind::Curve => &MANIFEST.curves,
            Kind::Config => &MANIFEST.configs,
        }
    }

    fn names(self) -> Vec<String> {
        self.table().keys().cloned().collect()
    }

    fn locate(self, name: &str) -> Result<PathBuf> {
        let rel = self
            .table()
            .get(name)
            .ok_or_else(|| anyhow!("no {:?} fixture named '{name}'", self))?;
        Ok(FIXTURES_DIR.join(rel))
    }

    fn read(self, name: &str) -> Result<String> {
        let path = self.locate(name)?;
        fs::read_to_string(&path)
            .with_context(|| {
                format!("reading {:?} fixture '{name}' from {}", self, path.display())
            })
    }
}

/// Key-line curve bodies (`key = t v in out` per line).
pub mod curves {
    use super::*;

    /// Fixture names in sorted order.
    pub fn keys() -> Vec<String> {
        Kind::Curve.names()
    }

    pub fn text(name: &str) -> Result<String> {
        Kind::Curve.read(name)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Kind::Curve.locate(name)
    }
}

/// JSON document configurations.
pub mod configs {
    use super::*;

    pub fn keys() -> Vec<String> {
        Kind::Config.names()
    }

    pub fn json(name: &str) -> Result<String> {
        Kind::Config.read(name)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let text = Kind::Config.read(name)?;
        serde_json::from_str(&text).with_context(|| format!("decoding config fixture '{name}'"))
    }
}
