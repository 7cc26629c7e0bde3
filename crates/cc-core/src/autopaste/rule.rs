use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::TypeFilterRule;
use crate::payload::ClipboardPayload;

/// One predicate in the autopaste rule list.
///
/// Rules may do asynchronous work. An `Err` is treated by the engine as "does not pass".
#[async_trait]
pub trait AutopasteRule: Send + Sync {
    /// Human readable name, reported when the rule rejects a payload.
    fn name(&self) -> &str;

    async fn passes_rule(&self, payload: &ClipboardPayload) -> anyhow::Result<bool>;
}

/// Persisted configuration of one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleConfig {
    TypeFilter {
        /// 0 Image, 1 Text, 2 File, 3 Url.
        selected_index: u32,
    },
}

impl RuleConfig {
    pub fn build(&self) -> Arc<dyn AutopasteRule> {
        match self {
            RuleConfig::TypeFilter { selected_index } => {
                Arc::new(TypeFilterRule::from_index(*selected_index))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_config_toml_shape() {
        let config: RuleConfig = toml::from_str("kind = \"type_filter\"\nselected_index = 3\n").unwrap();
        assert_eq!(config, RuleConfig::TypeFilter { selected_index: 3 });
        assert_eq!(config.build().name(), "Type filter");
    }
}
