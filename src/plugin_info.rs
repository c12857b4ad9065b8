use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Package-level metadata for a single-file plugin, read from a JSON
/// document (conventionally `plugin.info`).
///
/// Every field is required. A document missing one fails to load with a
/// diagnostic naming the field, instead of a placeholder leaking into the
/// rendered plugin header. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginInfo {
    pub author: String,
    #[serde(rename = "core-version")]
    pub core_version: String,
    pub description: String,
    pub list: String,
    #[serde(rename = "plugin-type")]
    pub plugin_type: String,
    pub title: String,
    pub version: String,
}

impl PluginInfo {
    /// Load plugin metadata from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .context(format!("Failed to read plugin info: {}", path.display()))?;
        let info = serde_json::from_str(&contents)
            .context(format!("Invalid plugin info in {}", path.display()))?;
        Ok(info)
    }
}
