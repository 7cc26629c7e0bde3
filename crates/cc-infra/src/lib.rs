//! # cc-infra
//!
//! Adapters that back the `cc-core` ports with the local filesystem and the
//! `image` crate.

pub mod codec;
pub mod dialog;
pub mod fs;
pub mod settings;

pub use codec::ImageCrateCodec;
pub use dialog::PresetDialog;
pub use fs::{FsFileDeleter, FsStorageReceiver, JsonLayoutStore};
pub use settings::FileSettingsRepository;
