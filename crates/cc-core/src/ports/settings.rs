use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Flags the orchestration layer consults. The core itself never reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub show_delete_confirmation: bool,
    pub autopaste_enabled: bool,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            show_delete_confirmation: true,
            autopaste_enabled: false,
        }
    }
}

#[async_trait]
pub trait SettingsPort: Send + Sync {
    async fn load(&self) -> anyhow::Result<CanvasSettings>;
}
