//! Canvas configuration DTO.
//!
//! Data only: no validation and no defaults beyond "missing means empty". A
//! missing key is a valid fact, not an error; deciding what an empty value
//! means is the caller's job.

use std::path::PathBuf;

use anyhow::Context;

use crate::autopaste::AutopasteRuleSet;

#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Directory holding the canvas's backing files (no existence check).
    pub canvas_root: PathBuf,

    /// Longest edge of generated image thumbnails, in pixels.
    pub thumbnail_max_edge: u32,

    pub autopaste_enabled: bool,

    pub show_delete_confirmation: bool,

    /// Rules seeded into the autopaste engine, in evaluation order.
    pub autopaste_rules: AutopasteRuleSet,
}

impl CanvasConfig {
    /// Map a parsed TOML document onto the DTO.
    ///
    /// Only a malformed rule list is an error; every other missing or mistyped
    /// key reads as empty.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let autopaste = toml_value.get("autopaste");

        let autopaste_rules = match autopaste.and_then(|a| a.get("rules")) {
            Some(rules) => rules
                .clone()
                .try_into::<AutopasteRuleSet>()
                .context("invalid [[autopaste.rules]] entry")?,
            None => AutopasteRuleSet::default(),
        };

        Ok(Self {
            canvas_root: PathBuf::from(
                toml_value
                    .get("storage")
                    .and_then(|s| s.get("canvas_root"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            thumbnail_max_edge: toml_value
                .get("image")
                .and_then(|i| i.get("thumbnail_max_edge"))
                .and_then(|v| v.as_integer())
                .unwrap_or(0) as u32,
            autopaste_enabled: autopaste
                .and_then(|a| a.get("enabled"))
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            show_delete_confirmation: toml_value
                .get("general")
                .and_then(|g| g.get("show_delete_confirmation"))
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            autopaste_rules,
        })
    }

    pub fn empty() -> Self {
        Self {
            canvas_root: PathBuf::new(),
            thumbnail_max_edge: 0,
            autopaste_enabled: false,
            show_delete_confirmation: false,
            autopaste_rules: AutopasteRuleSet::default(),
        }
    }

    /// Configuration for a fresh install rooted at `data_dir`.
    ///
    /// `data_dir` is computed by the caller.
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            canvas_root: data_dir.join("canvas"),
            thumbnail_max_edge: 256,
            autopaste_enabled: false,
            show_delete_confirmation: true,
            autopaste_rules: AutopasteRuleSet::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autopaste::RuleConfig;
    use toml::Value;

    #[test]
    fn test_from_toml_reads_every_section() {
        let toml_str = r#"
            [general]
            show_delete_confirmation = true

            [storage]
            canvas_root = "/data/canvas"

            [image]
            thumbnail_max_edge = 320

            [autopaste]
            enabled = true

            [[autopaste.rules]]
            kind = "type_filter"
            selected_index = 3
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = CanvasConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.canvas_root, PathBuf::from("/data/canvas"));
        assert_eq!(config.thumbnail_max_edge, 320);
        assert!(config.autopaste_enabled);
        assert!(config.show_delete_confirmation);
        assert_eq!(
            config.autopaste_rules.configs(),
            &[RuleConfig::TypeFilter { selected_index: 3 }]
        );
    }

    #[test]
    fn test_from_toml_missing_keys_are_empty() {
        let toml_value: Value = toml::from_str("").unwrap();

        let config = CanvasConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config, CanvasConfig::empty());
    }

    #[test]
    fn test_from_toml_rejects_unknown_rule_kind() {
        let toml_str = r#"
            [[autopaste.rules]]
            kind = "regex"
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        assert!(CanvasConfig::from_toml(&toml_value).is_err());
    }

    #[test]
    fn test_with_system_defaults_roots_canvas_in_data_dir() {
        let config = CanvasConfig::with_system_defaults(PathBuf::from("/tmp/test"));

        assert_eq!(config.canvas_root, PathBuf::from("/tmp/test/canvas"));
        assert!(config.show_delete_confirmation);
        assert!(config.autopaste_rules.is_empty());
    }
}
