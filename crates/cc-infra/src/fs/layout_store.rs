use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use cc_core::ports::{LayoutStorePort, SavedPlacement};
use tokio::fs;
use tracing::debug;

/// Canvas layout stored as a JSON array next to the settings.
pub struct JsonLayoutStore {
    path: PathBuf,
}

impl JsonLayoutStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl LayoutStorePort for JsonLayoutStore {
    async fn load(&self) -> Result<Vec<SavedPlacement>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read layout failed: {}", self.path.display()))
            }
        };

        serde_json::from_str(&content)
            .with_context(|| format!("parse layout failed: {}", self.path.display()))
    }

    async fn save(&self, layout: &[SavedPlacement]) -> Result<()> {
        let json = serde_json::to_string_pretty(layout).context("serialize layout failed")?;

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create layout dir failed: {}", dir.display()))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .await
            .with_context(|| format!("write temp layout failed: {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("replace layout failed: {}", self.path.display()))?;

        debug!(items = layout.len(), "Saved canvas layout");
        Ok(())
    }
}
