use std::sync::Arc;

use tracing::{debug, warn};

use super::{AutopasteRule, AutopasteRuleSet};
use crate::payload::ClipboardPayload;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutopasteDecision {
    Admit,
    /// `rule` at position `index` did not pass; later rules were not evaluated.
    Reject { rule: String, index: usize },
}

impl AutopasteDecision {
    pub fn is_admit(&self) -> bool {
        matches!(self, AutopasteDecision::Admit)
    }
}

/// Evaluate `rules` in order with AND semantics, stopping at the first rule that does not pass.
///
/// A rule that errors does not pass.
pub async fn evaluate(
    payload: &ClipboardPayload,
    rules: &[Arc<dyn AutopasteRule>],
) -> AutopasteDecision {
    for (index, rule) in rules.iter().enumerate() {
        let passes = match rule.passes_rule(payload).await {
            Ok(passes) => passes,
            Err(e) => {
                warn!(rule = rule.name(), index, error = %e, "Autopaste rule failed, treating as not passing");
                false
            }
        };

        if !passes {
            debug!(rule = rule.name(), index, "Autopaste rule rejected payload");
            return AutopasteDecision::Reject {
                rule: rule.name().to_string(),
                index,
            };
        }
    }

    AutopasteDecision::Admit
}

/// A built, ready-to-evaluate rule list.
#[derive(Clone, Default)]
pub struct AutopasteEngine {
    rules: Vec<Arc<dyn AutopasteRule>>,
}

impl AutopasteEngine {
    pub fn new(rules: Vec<Arc<dyn AutopasteRule>>) -> Self {
        Self { rules }
    }

    pub fn from_rule_set(rule_set: &AutopasteRuleSet) -> Self {
        Self::new(rule_set.build())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub async fn evaluate(&self, payload: &ClipboardPayload) -> AutopasteDecision {
        evaluate(payload, &self.rules).await
    }
}

impl std::fmt::Debug for AutopasteEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|rule| rule.name()))
            .finish()
    }
}
