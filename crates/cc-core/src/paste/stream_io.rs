//! Stream helpers shared by the content variants. I/O errors map to `IoDenied`.

use tokio::io::{AsyncReadExt, AsyncWriteExt};

use super::{FailureKind, PasteError, PasteResult};
use crate::ports::{BoxedFileStream, BoxedReadStream, FileHandle, StorageReceiverPort};

pub(crate) async fn read_all(source: &mut BoxedReadStream) -> PasteResult<Vec<u8>> {
    let mut buffer = Vec::new();
    source
        .read_to_end(&mut buffer)
        .await
        .map_err(|e| PasteError::failure_with_cause(FailureKind::IoDenied, "read source", e))?;
    Ok(buffer)
}

pub(crate) async fn write_all(target: &mut BoxedFileStream, bytes: &[u8]) -> PasteResult<()> {
    target
        .write_all(bytes)
        .await
        .map_err(|e| PasteError::failure_with_cause(FailureKind::IoDenied, "write target", e))?;
    target
        .flush()
        .await
        .map_err(|e| PasteError::failure_with_cause(FailureKind::IoDenied, "flush target", e))
}

/// Read a dropped file reference through the storage receiver.
pub(crate) async fn read_reference(
    receiver: &dyn StorageReceiverPort,
    handle: &FileHandle,
) -> PasteResult<Vec<u8>> {
    let mut source = receiver.open_for_read(handle).await.map_err(|e| {
        PasteError::failure_with_cause(
            FailureKind::IoDenied,
            format!("open {}", handle.path().display()),
            e,
        )
    })?;
    read_all(&mut source).await
}

pub(crate) fn decode_utf8(bytes: Vec<u8>) -> PasteResult<String> {
    String::from_utf8(bytes).map_err(|e| {
        PasteError::failure_with_cause(FailureKind::DecodeUnsupported, "text is not valid UTF-8", e)
    })
}
