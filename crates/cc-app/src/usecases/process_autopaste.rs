use std::sync::Arc;

use cc_core::autopaste::{AutopasteDecision, AutopasteEngine};
use cc_core::canvas::Point;
use cc_core::paste::Outcome;
use cc_core::ports::SettingsPort;
use cc_core::{ClipboardPayload, ItemId};
use tracing::{debug, info};

use super::PasteIntoCanvas;

#[derive(Debug)]
pub enum AutopasteResult {
    /// Autopaste is switched off in settings; nothing was evaluated.
    Disabled,
    Rejected { rule: String, index: usize },
    Pasted(Outcome<ItemId>),
}

/// Paste a clipboard change automatically when every configured rule admits it.
pub struct ProcessAutopaste {
    settings: Arc<dyn SettingsPort>,
    engine: AutopasteEngine,
    paste: PasteIntoCanvas,
}

impl ProcessAutopaste {
    pub fn from_ports(
        settings: Arc<dyn SettingsPort>,
        engine: AutopasteEngine,
        paste: PasteIntoCanvas,
    ) -> Self {
        Self {
            settings,
            engine,
            paste,
        }
    }

    #[tracing::instrument(
        name = "usecase.process_autopaste.execute",
        skip(self, payload, position),
        fields(rules = self.engine.len())
    )]
    pub async fn execute(
        &self,
        payload: &ClipboardPayload,
        position: Point,
    ) -> anyhow::Result<AutopasteResult> {
        let settings = self.settings.load().await?;
        if !settings.autopaste_enabled {
            debug!("Autopaste disabled, ignoring clipboard change");
            return Ok(AutopasteResult::Disabled);
        }

        match self.engine.evaluate(payload).await {
            AutopasteDecision::Admit => {
                Ok(AutopasteResult::Pasted(self.paste.execute(payload, position).await))
            }
            AutopasteDecision::Reject { rule, index } => {
                info!(rule = %rule, index, "Autopaste rejected clipboard change");
                Ok(AutopasteResult::Rejected { rule, index })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use cc_core::autopaste::{AutopasteRuleSet, RuleConfig};
    use cc_core::ports::CanvasSettings;
    use cc_infra::{FsStorageReceiver, ImageCrateCodec};
    use tempfile::TempDir;

    use super::*;
    use crate::session::CanvasSession;

    struct FixedSettings(CanvasSettings);

    #[async_trait]
    impl SettingsPort for FixedSettings {
        async fn load(&self) -> anyhow::Result<CanvasSettings> {
            Ok(self.0.clone())
        }
    }

    fn usecase(
        dir: &TempDir,
        enabled: bool,
        rules: Vec<RuleConfig>,
    ) -> (ProcessAutopaste, Arc<CanvasSession>) {
        let session = Arc::new(CanvasSession::new());
        let paste = PasteIntoCanvas::from_ports(
            session.clone(),
            Arc::new(FsStorageReceiver::new(dir.path())),
            Arc::new(ImageCrateCodec::new(64)),
        );
        let settings = Arc::new(FixedSettings(CanvasSettings {
            autopaste_enabled: enabled,
            ..CanvasSettings::default()
        }));
        let engine = AutopasteEngine::from_rule_set(&AutopasteRuleSet::new(rules));
        (ProcessAutopaste::from_ports(settings, engine, paste), session)
    }

    #[tokio::test]
    async fn test_disabled_autopaste_does_nothing() {
        let dir = TempDir::new().unwrap();
        let (usecase, session) = usecase(&dir, false, vec![]);

        let result = usecase
            .execute(&ClipboardPayload::from_text("hello"), Point::ORIGIN)
            .await
            .unwrap();

        assert!(matches!(result, AutopasteResult::Disabled));
        assert!(session.is_empty().await);
    }

    #[tokio::test]
    async fn test_rejected_payload_is_not_pasted() {
        let dir = TempDir::new().unwrap();
        // Type filter 3: no URLs.
        let (usecase, session) = usecase(
            &dir,
            true,
            vec![RuleConfig::TypeFilter { selected_index: 3 }],
        );

        let result = usecase
            .execute(
                &ClipboardPayload::from_text("https://example.com"),
                Point::ORIGIN,
            )
            .await
            .unwrap();

        assert!(matches!(
            result,
            AutopasteResult::Rejected { index: 0, .. }
        ));
        assert!(session.is_empty().await);
    }

    #[tokio::test]
    async fn test_admitted_payload_is_pasted() {
        let dir = TempDir::new().unwrap();
        // Type filter 1: no plain text. A URL is not plain text.
        let (usecase, session) = usecase(
            &dir,
            true,
            vec![RuleConfig::TypeFilter { selected_index: 1 }],
        );

        let result = usecase
            .execute(
                &ClipboardPayload::from_text("https://example.com"),
                Point::ORIGIN,
            )
            .await
            .unwrap();

        assert!(matches!(result, AutopasteResult::Pasted(Outcome::Success(_))));
        assert_eq!(session.len().await, 1);
    }
}
