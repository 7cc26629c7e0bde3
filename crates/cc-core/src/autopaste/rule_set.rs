use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{AutopasteRule, RuleConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rule index {index} out of range for {len} rules")]
pub struct RuleIndexError {
    pub index: usize,
    pub len: usize,
}

/// User-ordered list of rule configurations. Order is evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AutopasteRuleSet {
    rules: Vec<RuleConfig>,
}

impl AutopasteRuleSet {
    pub fn new(rules: Vec<RuleConfig>) -> Self {
        Self { rules }
    }

    pub fn add(&mut self, rule: RuleConfig) {
        self.rules.push(rule);
    }

    pub fn remove(&mut self, index: usize) -> Result<RuleConfig, RuleIndexError> {
        self.check(index)?;
        Ok(self.rules.remove(index))
    }

    /// Move the rule at `from` so it ends up at position `to`.
    pub fn move_rule(&mut self, from: usize, to: usize) -> Result<(), RuleIndexError> {
        self.check(from)?;
        self.check(to)?;
        let rule = self.rules.remove(from);
        self.rules.insert(to, rule);
        Ok(())
    }

    pub fn configs(&self) -> &[RuleConfig] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn build(&self) -> Vec<Arc<dyn AutopasteRule>> {
        self.rules.iter().map(RuleConfig::build).collect()
    }

    fn check(&self, index: usize) -> Result<(), RuleIndexError> {
        if index < self.rules.len() {
            Ok(())
        } else {
            Err(RuleIndexError {
                index,
                len: self.rules.len(),
            })
        }
    }
}
