use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification result selecting which paste model handles a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentTypeTag {
    Image,
    Text,
    Media,
    Markdown,
    FileSet,
    Fallback,
}

impl ContentTypeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentTypeTag::Image => "image",
            ContentTypeTag::Text => "text",
            ContentTypeTag::Media => "media",
            ContentTypeTag::Markdown => "markdown",
            ContentTypeTag::FileSet => "file_set",
            ContentTypeTag::Fallback => "fallback",
        }
    }
}

impl fmt::Display for ContentTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
