//! Configuration loader.
//!
//! Pure data loading: whatever the file says is taken as a fact. Missing keys come
//! back as empty values and nothing is validated here.

use std::path::Path;

use anyhow::Context;
use cc_core::CanvasConfig;

/// Read `config_path` and map it into a [`CanvasConfig`].
///
/// Fails when the file cannot be read, is not TOML, or carries a malformed
/// autopaste rule list.
pub fn load_config(config_path: impl AsRef<Path>) -> anyhow::Result<CanvasConfig> {
    let config_path = config_path.as_ref();
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    CanvasConfig::from_toml(&toml_value)
}
