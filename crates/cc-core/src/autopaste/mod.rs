//! Autopaste rules: decide whether a clipboard change is pasted automatically.

mod engine;
mod rule;
mod rule_set;
mod type_filter;

pub use engine::{evaluate, AutopasteDecision, AutopasteEngine};
pub use rule::{AutopasteRule, RuleConfig};
pub use rule_set::{AutopasteRuleSet, RuleIndexError};
pub use type_filter::{TypeFilter, TypeFilterRule};
