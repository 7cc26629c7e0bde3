use super::{is_valid_url, ClipboardPayload, ContentTypeTag};
use crate::ports::FileHandle;

pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "bmp", "gif", "tiff", "ico", "svg", "webp",
];

pub const TEXT_EXTENSIONS: &[&str] = &["txt"];

pub const MEDIA_EXTENSIONS: &[&str] = &[
    "mp4", "webm", "mkv", "avi", "mov", "wmv", "mp3", "wav", "flac", "ogg", "m4a", "aac",
];

pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Classifies a payload. Total: anything unrecognized is [`ContentTypeTag::Fallback`].
///
/// Precedence, first match wins:
/// 1. bitmap representation
/// 2. plain text that is not a URL
/// 3. file references sharing one recognized extension kind
/// 4. several file references of mixed or unknown kinds ([`ContentTypeTag::FileSet`])
pub fn classify(payload: &ClipboardPayload) -> ContentTypeTag {
    if payload.bitmap().is_some() {
        return ContentTypeTag::Image;
    }

    if let Some(text) = payload.text() {
        if !is_valid_url(text) {
            return ContentTypeTag::Text;
        }
    }

    classify_files(payload.files())
}

pub fn classify_files(files: &[FileHandle]) -> ContentTypeTag {
    let Some((first, rest)) = files.split_first() else {
        return ContentTypeTag::Fallback;
    };

    match file_kind(first) {
        Some(kind) if rest.iter().all(|f| file_kind(f) == Some(kind)) => kind,
        _ if !rest.is_empty() => ContentTypeTag::FileSet,
        _ => ContentTypeTag::Fallback,
    }
}

/// Content type implied by a file's extension, if it is one the canvas recognizes.
pub fn file_kind(file: &FileHandle) -> Option<ContentTypeTag> {
    let extension = file.extension()?;
    let matches = |set: &[&str]| set.contains(&extension.as_str());

    if matches(IMAGE_EXTENSIONS) {
        Some(ContentTypeTag::Image)
    } else if matches(TEXT_EXTENSIONS) {
        Some(ContentTypeTag::Text)
    } else if matches(MEDIA_EXTENSIONS) {
        Some(ContentTypeTag::Media)
    } else if matches(MARKDOWN_EXTENSIONS) {
        Some(ContentTypeTag::Markdown)
    } else {
        None
    }
}
