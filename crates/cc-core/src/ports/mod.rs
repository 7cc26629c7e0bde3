//! Port interfaces for external collaborators
//!
//! Ports define the contract between the canvas logic and the infrastructure that
//! backs it. The core never reaches for a global service: every collaborator is
//! passed in explicitly, usually as an `Arc<dyn ...Port>`.
//!
//! | Port | Consumed by |
//! |------|-------------|
//! | [`StorageReceiverPort`] | paste models |
//! | [`ImageCodecPort`] | the image paste model |
//! | [`SettingsPort`] | app-layer orchestration only |
//! | [`DialogPort`] | app-layer orchestration only |
//! | [`FileDeleterPort`] | app-layer orchestration only |
//! | [`LayoutStorePort`] | app-layer orchestration only |

mod dialog;
mod file_deleter;
mod image_codec;
mod layout_store;
mod settings;
mod storage_receiver;

#[cfg(test)]
pub(crate) mod testing;

pub use dialog::{DeleteConfirmation, DialogPort};
pub use file_deleter::FileDeleterPort;
pub use image_codec::{Bitmap, CodecError, EncodeOptions, EncodedImage, ImageCodecPort};
#[cfg(test)]
pub(crate) use image_codec::MockImageCodec;
pub use layout_store::{LayoutStorePort, SavedPlacement};
pub use settings::{CanvasSettings, SettingsPort};
pub use storage_receiver::{
    BoxedFileStream, BoxedReadStream, FileHandle, FileStream, StorageReceiverPort,
};
