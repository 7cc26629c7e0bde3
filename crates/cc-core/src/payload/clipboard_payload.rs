use std::collections::BTreeSet;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::ports::FileHandle;

/// Format declared by the clipboard source for one representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatTag {
    Bitmap,
    Text,
    StorageItems,
    Media,
    /// A format the canvas has no representation for (e.g. `text/html`).
    Other(String),
}

/// Arbitrary binary media attached to a payload, with the MIME type the source declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBlob {
    pub mime: String,
    pub bytes: Bytes,
}

/// All representations attached to one paste/drop event.
///
/// Built once through [`ClipboardPayloadBuilder`]; there are no mutators afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardPayload {
    formats: BTreeSet<FormatTag>,
    bitmap: Option<Bytes>,
    text: Option<String>,
    files: Vec<FileHandle>,
    media: Option<MediaBlob>,
}

impl ClipboardPayload {
    pub fn builder() -> ClipboardPayloadBuilder {
        ClipboardPayloadBuilder::default()
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self::builder().text(text).build()
    }

    pub fn from_bitmap(bytes: impl Into<Bytes>) -> Self {
        Self::builder().bitmap(bytes).build()
    }

    pub fn from_files(files: impl IntoIterator<Item = FileHandle>) -> Self {
        Self::builder().files(files).build()
    }

    pub fn formats(&self) -> &BTreeSet<FormatTag> {
        &self.formats
    }

    pub fn contains(&self, tag: &FormatTag) -> bool {
        self.formats.contains(tag)
    }

    /// True when `tag` is the only declared format.
    pub fn contains_only(&self, tag: &FormatTag) -> bool {
        self.formats.len() == 1 && self.formats.contains(tag)
    }

    pub fn bitmap(&self) -> Option<&Bytes> {
        self.bitmap.as_ref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn files(&self) -> &[FileHandle] {
        &self.files
    }

    pub fn media(&self) -> Option<&MediaBlob> {
        self.media.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct ClipboardPayloadBuilder {
    inner: ClipboardPayload,
}

impl ClipboardPayloadBuilder {
    pub fn bitmap(mut self, bytes: impl Into<Bytes>) -> Self {
        self.inner.bitmap = Some(bytes.into());
        self.inner.formats.insert(FormatTag::Bitmap);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.inner.text = Some(text.into());
        self.inner.formats.insert(FormatTag::Text);
        self
    }

    pub fn files(mut self, files: impl IntoIterator<Item = FileHandle>) -> Self {
        self.inner.files.extend(files);
        if !self.inner.files.is_empty() {
            self.inner.formats.insert(FormatTag::StorageItems);
        }
        self
    }

    pub fn media(mut self, mime: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        self.inner.media = Some(MediaBlob {
            mime: mime.into(),
            bytes: bytes.into(),
        });
        self.inner.formats.insert(FormatTag::Media);
        self
    }

    /// Declares a format without attaching a representation for it.
    pub fn declare(mut self, tag: FormatTag) -> Self {
        self.inner.formats.insert(tag);
        self
    }

    pub fn build(self) -> ClipboardPayload {
        self.inner
    }
}
