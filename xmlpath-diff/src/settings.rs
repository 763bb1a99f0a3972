//! Formatting settings that shape path assignment.
//!
//! Both sides of a comparison are expected to be built with the same
//! settings. Nothing here reconciles trees built with different settings.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Settings recognized by the tree builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildSettings {
    /// Tag names whose first occurrence never receives a `[1]` suffix.
    ///
    /// Matched case-insensitively.
    pub elements_array: Vec<String>,
    /// Attribute whose positive-integer value replaces the computed sibling index.
    pub index_attribute: Option<String>,
    /// Omit the `[1]` suffix on childless elements that occur once.
    pub leaf_omit: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        BuildSettings {
            elements_array: Vec::new(),
            index_attribute: None,
            leaf_omit: true,
        }
    }
}

impl BuildSettings {
    /// Returns true if `tag` is listed in `elements_array`.
    pub fn is_array_element(&self, tag: &str) -> bool {
        let lowered = tag.to_lowercase();
        self.elements_array
            .iter()
            .any(|entry| entry.to_lowercase() == lowered)
    }

    /// Reads settings from a JSON file. Missing keys take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Writes settings to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
