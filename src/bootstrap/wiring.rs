//! Wires the filesystem adapters into a canvas session and its use cases.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cc_app::{
    CanvasSession, DeleteCanvasItem, HandleCanvasDrop, PasteIntoCanvas, ProcessAutopaste,
    ReloadCanvasItem,
};
use cc_core::autopaste::AutopasteEngine;
use cc_core::canvas::Point;
use cc_core::paste::Outcome;
use cc_core::ports::{CanvasSettings, DialogPort, FileHandle};
use cc_core::{CanvasConfig, ItemId};
use cc_infra::{
    FileSettingsRepository, FsFileDeleter, FsStorageReceiver, ImageCrateCodec, JsonLayoutStore,
};
use tracing::{info, warn};

const SETTINGS_DIR: &str = ".clipcanvas";
const SETTINGS_FILE: &str = "settings.json";
const LAYOUT_FILE: &str = "arrangement.json";
const TRASH_DIR: &str = ".trash";

/// Spacing between restored items that have no saved placement.
const RESTORE_CASCADE: f64 = 24.0;

pub type WiringResult<T> = Result<T, WiringError>;

#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Canvas storage initialization failed: {0}")]
    StorageInit(String),

    #[error("Settings repository initialization failed: {0}")]
    SettingsInit(String),
}

/// A wired canvas: the session plus every use case that operates on it.
pub struct CanvasApp {
    pub session: Arc<CanvasSession>,
    pub settings: Arc<FileSettingsRepository>,
    pub paste: PasteIntoCanvas,
    pub drop: HandleCanvasDrop,
    pub autopaste: ProcessAutopaste,
    pub delete: DeleteCanvasItem,
    pub reload: ReloadCanvasItem,
    canvas_root: PathBuf,
}

impl CanvasApp {
    pub fn canvas_root(&self) -> &Path {
        &self.canvas_root
    }

    /// Put every backing file already in the canvas root back on the canvas.
    ///
    /// Files are visited in name order. Hidden entries and directories are skipped;
    /// a file that fails to reload is logged and left where it is. Items then take
    /// their saved position and stacking; files missing from the saved layout are
    /// cascaded on top.
    pub async fn restore_from_disk(&self) -> anyhow::Result<Vec<ItemId>> {
        let files = backing_files(&self.canvas_root).await?;

        let mut restored = Vec::with_capacity(files.len());
        for (i, path) in files.into_iter().enumerate() {
            let offset = RESTORE_CASCADE * i as f64;
            match self
                .reload
                .execute(FileHandle::new(&path), Point::new(offset, offset))
                .await
            {
                Outcome::Success(item) => restored.push(item),
                Outcome::Cancel => {}
                Outcome::Failure(failure) => {
                    warn!(file = %path.display(), error = %failure, "Skipping unreadable canvas file");
                }
            }
        }

        self.session.restore_layout().await?;

        info!(count = restored.len(), "Restored canvas from disk");
        Ok(restored)
    }
}

async fn backing_files(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    use anyhow::Context;

    let mut entries = tokio::fs::read_dir(root)
        .await
        .with_context(|| format!("read canvas root failed: {}", root.display()))?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if hidden || !entry.file_type().await?.is_file() {
            continue;
        }
        files.push(entry.path());
    }
    files.sort();
    Ok(files)
}

/// Build a [`CanvasApp`] from configuration.
///
/// Creates the canvas root if needed and seeds the settings file from `config`
/// the first time. An existing settings file wins over the configuration.
pub async fn wire_canvas(
    config: &CanvasConfig,
    dialog: Arc<dyn DialogPort>,
) -> WiringResult<CanvasApp> {
    let root = config.canvas_root.clone();
    if root.as_os_str().is_empty() {
        return Err(WiringError::StorageInit(
            "storage.canvas_root is not configured".to_string(),
        ));
    }
    tokio::fs::create_dir_all(&root).await.map_err(|e| {
        WiringError::StorageInit(format!(
            "Failed to create canvas root {}: {}",
            root.display(),
            e
        ))
    })?;

    let settings_path = root.join(SETTINGS_DIR).join(SETTINGS_FILE);
    let settings = Arc::new(FileSettingsRepository::new(&settings_path));
    if !tokio::fs::try_exists(&settings_path).await.unwrap_or(false) {
        let initial = CanvasSettings {
            show_delete_confirmation: config.show_delete_confirmation,
            autopaste_enabled: config.autopaste_enabled,
        };
        settings
            .save(&initial)
            .await
            .map_err(|e| WiringError::SettingsInit(format!("{e:#}")))?;
    }

    let receiver = Arc::new(FsStorageReceiver::new(&root));
    let codec = Arc::new(ImageCrateCodec::new(config.thumbnail_max_edge));
    let layout_store = Arc::new(JsonLayoutStore::new(
        root.join(SETTINGS_DIR).join(LAYOUT_FILE),
    ));
    let session = Arc::new(CanvasSession::with_layout_store(layout_store));

    let paste = PasteIntoCanvas::from_ports(session.clone(), receiver.clone(), codec.clone());
    let drop = HandleCanvasDrop::from_ports(session.clone(), paste.clone());
    let autopaste = ProcessAutopaste::from_ports(
        settings.clone(),
        AutopasteEngine::from_rule_set(&config.autopaste_rules),
        paste.clone(),
    );
    let delete = DeleteCanvasItem::from_ports(
        session.clone(),
        settings.clone(),
        dialog,
        Arc::new(FsFileDeleter::new(root.join(TRASH_DIR))),
    );
    let reload = ReloadCanvasItem::from_ports(session.clone(), receiver, codec);

    info!(
        canvas_root = %root.display(),
        rules = config.autopaste_rules.len(),
        "Canvas wired"
    );

    Ok(CanvasApp {
        session,
        settings,
        paste,
        drop,
        autopaste,
        delete,
        reload,
        canvas_root: root,
    })
}
