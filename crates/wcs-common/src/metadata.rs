//! Namespaced key/value metadata attached to the service and its layers.
//!
//! Keys are stored with their service prefix (`wcs_title`, `ows_srs`, ...).
//! Lookups take a namespace string where each letter selects one prefix,
//! tried in the order given: `O` ows, `M` wms, `F` wfs, `C` wcs, `G` gml,
//! `S` sos. `lookup("COM", "title")` therefore tries `wcs_title`, then
//! `ows_title`, then `wms_title`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered metadata mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, String>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully prefixed key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Raw lookup of a fully prefixed key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Look a key up across the prefixes selected by `namespaces`.
    pub fn lookup(&self, namespaces: &str, name: &str) -> Option<&str> {
        namespaces
            .chars()
            .filter_map(namespace_prefix)
            .find_map(|prefix| self.get(&format!("{}_{}", prefix, name)))
    }

    /// Like [`Metadata::lookup`], falling back to `default` when absent.
    pub fn lookup_or<'a>(&'a self, namespaces: &str, name: &str, default: &'a str) -> &'a str {
        self.lookup(namespaces, name).unwrap_or(default)
    }
}

fn namespace_prefix(letter: char) -> Option<&'static str> {
    match letter {
        'O' => Some("ows"),
        'M' => Some("wms"),
        'F' => Some("wfs"),
        'C' => Some("wcs"),
        'G' => Some("gml"),
        'S' => Some("sos"),
        _ => None,
    }
}
