//! Gesture scripts for the slide-tuning test suites.
//!
//! `fixtures/manifest.json` maps a script name to a file under `fixtures/`,
//! either as a bare relative path or as `{ path, description }`. Scripts are
//! read from disk on every call so edits show up without a rebuild; only the
//! manifest is embedded. The step schema belongs to the consuming tests.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    gestures: BTreeMap<String, GestureEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GestureEntry {
    Path(String),
    Detailed {
        path: String,
        #[serde(default)]
        description: Option<String>,
    },
}

impl GestureEntry {
    fn named(name: &str) -> Result<&'static GestureEntry> {
        MANIFEST.gestures.get(name).with_context(|| {
            let known: Vec<&str> = MANIFEST.gestures.keys().map(String::as_str).collect();
            format!("no gesture script named '{name}' (known: {})", known.join(", "))
        })
    }

    fn file(&self) -> PathBuf {
        let rel = match self {
            GestureEntry::Path(path) | GestureEntry::Detailed { path, .. } => path,
        };
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(rel)
    }

    fn description(&self) -> Option<&str> {
        match self {
            GestureEntry::Path(_) => None,
            GestureEntry::Detailed { description, .. } => description.as_deref(),
        }
    }
}

pub mod gestures {
    use super::*;

    /// Script names in sorted order.
    pub fn keys() -> Vec<String> {
        MANIFEST.gestures.keys().cloned().collect()
    }

    /// Read and deserialize the script `name`.
    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let file = path(name)?;
        let text = fs::read_to_string(&file)
            .with_context(|| format!("gesture '{name}': cannot read {}", file.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("gesture '{name}': {} is not valid", file.display()))
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Ok(GestureEntry::named(name)?.file())
    }

    /// Free-form note attached to the manifest entry, if any.
    pub fn description(name: &str) -> Result<Option<&'static str>> {
        Ok(GestureEntry::named(name)?.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_manifest_entry_resolves_to_json() {
        let keys = gestures::keys();
        assert!(!keys.is_empty());
        for name in keys {
            assert!(gestures::path(&name).unwrap().is_file(), "{name} is missing");
            let value: serde_json::Value = gestures::load(&name).unwrap();
            assert!(value.get("steps").is_some(), "{name} has no steps");
        }
    }

    #[test]
    fn descriptions_come_from_detailed_entries_only() {
        let described = gestures::description("context-menu-cancel").unwrap();
        assert!(described.is_some_and(|text| text.contains("context menu")));
        assert_eq!(gestures::description("drag-and-commit").unwrap(), None);
    }

    #[test]
    fn unknown_name_lists_known_scripts() {
        let err = gestures::load::<serde_json::Value>("no-such-gesture").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("no-such-gesture"));
        assert!(message.contains("drag-and-commit"));
    }
}
