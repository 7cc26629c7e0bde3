use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{AutopasteRule, RuleConfig};
use crate::payload::{is_valid_url, ClipboardPayload, FormatTag};

/// Category a type filter keeps out of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeFilter {
    Image,
    Text,
    File,
    /// Text that parses as an absolute URL.
    Url,
}

impl TypeFilter {
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(TypeFilter::Image),
            1 => Some(TypeFilter::Text),
            2 => Some(TypeFilter::File),
            3 => Some(TypeFilter::Url),
            _ => None,
        }
    }

    pub fn index(&self) -> u32 {
        match self {
            TypeFilter::Image => 0,
            TypeFilter::Text => 1,
            TypeFilter::File => 2,
            TypeFilter::Url => 3,
        }
    }
}

/// Rejects payloads that consist only of the filtered category.
///
/// A text-only payload is `Url` when its text is a valid URL and `Text` otherwise.
/// An unknown selection rejects everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeFilterRule {
    selected_index: u32,
}

impl TypeFilterRule {
    pub fn new(filter: TypeFilter) -> Self {
        Self {
            selected_index: filter.index(),
        }
    }

    pub fn from_index(selected_index: u32) -> Self {
        Self { selected_index }
    }

    pub fn filter(&self) -> Option<TypeFilter> {
        TypeFilter::from_index(self.selected_index)
    }

    pub fn config(&self) -> RuleConfig {
        RuleConfig::TypeFilter {
            selected_index: self.selected_index,
        }
    }
}

/// `Some(is_url)` for a text-only payload whose text could be read.
fn text_only_is_url(payload: &ClipboardPayload) -> Option<bool> {
    if !payload.contains_only(&FormatTag::Text) {
        return None;
    }
    payload.text().map(is_valid_url)
}

#[async_trait]
impl AutopasteRule for TypeFilterRule {
    fn name(&self) -> &str {
        "Type filter"
    }

    async fn passes_rule(&self, payload: &ClipboardPayload) -> anyhow::Result<bool> {
        let passes = match self.filter() {
            Some(TypeFilter::Image) => !payload.contains_only(&FormatTag::Bitmap),
            Some(TypeFilter::Text) => text_only_is_url(payload) != Some(false),
            Some(TypeFilter::File) => !payload.contains_only(&FormatTag::StorageItems),
            Some(TypeFilter::Url) => text_only_is_url(payload) != Some(true),
            None => false,
        };
        Ok(passes)
    }
}
