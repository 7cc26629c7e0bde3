//! End-to-end canvas flows over the filesystem adapters.

use std::io::Cursor;
use std::sync::{Arc, Once};

use cc_app::{
    AutopasteResult, CanvasDropResult, CanvasSession, DeleteCanvasItem, HandleCanvasDrop,
    PasteIntoCanvas, ProcessAutopaste, ReloadCanvasItem,
};
use cc_core::autopaste::{AutopasteEngine, AutopasteRuleSet, RuleConfig};
use cc_core::canvas::Point;
use cc_core::paste::{Outcome, PasteState, RenderedContent};
use cc_core::ports::{CanvasSettings, DeleteConfirmation, FileHandle};
use cc_core::{ClipboardPayload, ItemId};
use cc_infra::{
    FileSettingsRepository, FsFileDeleter, FsStorageReceiver, ImageCrateCodec, PresetDialog,
};
use tempfile::TempDir;

static TRACE_INIT: Once = Once::new();

fn init_tracing() {
    TRACE_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 40, 40, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

struct Canvas {
    dir: TempDir,
    session: Arc<CanvasSession>,
    paste: PasteIntoCanvas,
}

impl Canvas {
    fn new() -> Self {
        init_tracing();
        let dir = TempDir::new().unwrap();
        let session = Arc::new(CanvasSession::new());
        let paste = PasteIntoCanvas::from_ports(
            session.clone(),
            Arc::new(FsStorageReceiver::new(dir.path().join("canvas"))),
            Arc::new(ImageCrateCodec::new(32)),
        );
        Self {
            dir,
            session,
            paste,
        }
    }

    fn settings(&self) -> FileSettingsRepository {
        FileSettingsRepository::new(self.dir.path().join("settings.json"))
    }

    async fn paste(&self, payload: ClipboardPayload, position: Point) -> ItemId {
        match self.paste.execute(&payload, position).await {
            Outcome::Success(item) => item,
            other => panic!("paste failed: {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_paste_rearrange_reload_and_delete() {
    let canvas = Canvas::new();

    let note = canvas
        .paste(ClipboardPayload::from_text("shopping list"), Point::ORIGIN)
        .await;
    let picture = canvas
        .paste(
            ClipboardPayload::from_bitmap(png_bytes(64, 48)),
            Point::new(50.0, 50.0),
        )
        .await;

    match canvas.session.render(&picture).await.unwrap().unwrap() {
        RenderedContent::Image {
            width,
            height,
            thumbnail,
            ..
        } => {
            assert_eq!((width, height), (64, 48));
            assert!(thumbnail.is_some());
        }
        other => panic!("expected an image, got {other:?}"),
    }

    // Drag the note by its corner and drop it on top of the picture.
    let drop = HandleCanvasDrop::from_ports(canvas.session.clone(), canvas.paste.clone());
    canvas
        .session
        .begin_drag(note.clone(), Point::new(4.0, 4.0))
        .await
        .unwrap();
    let result = drop
        .execute(
            Point::new(54.0, 54.0),
            Some(&note),
            ClipboardPayload::default(),
        )
        .await;
    assert!(matches!(result, CanvasDropResult::Rearranged { z: 1, .. }));
    let snapshot = canvas.session.snapshot().await;
    let order: Vec<_> = snapshot.iter().map(|r| r.item.clone()).collect();
    assert_eq!(order, vec![picture.clone(), note.clone()]);

    // The note's backing file brings it back on a fresh canvas.
    let note_file = canvas.session.backing_file(&note).await.unwrap();
    let fresh = Arc::new(CanvasSession::new());
    let reload = ReloadCanvasItem::from_ports(
        fresh.clone(),
        Arc::new(FsStorageReceiver::new(canvas.dir.path().join("canvas"))),
        Arc::new(ImageCrateCodec::new(32)),
    );
    let Outcome::Success(reloaded) = reload.execute(note_file.clone(), Point::ORIGIN).await else {
        panic!("reload failed");
    };
    assert_eq!(fresh.model_state(&reloaded).await, Some(PasteState::Persisted));
    assert_eq!(
        fresh.render(&reloaded).await.unwrap().unwrap(),
        RenderedContent::Text("shopping list".into())
    );

    // Delete without confirmation: the file goes to the trash.
    let settings = canvas.settings();
    settings
        .save(&CanvasSettings {
            show_delete_confirmation: false,
            autopaste_enabled: false,
        })
        .await
        .unwrap();
    let trash = canvas.dir.path().join("trash");
    let delete = DeleteCanvasItem::from_ports(
        canvas.session.clone(),
        Arc::new(settings),
        Arc::new(PresetDialog::cancelling()),
        Arc::new(FsFileDeleter::new(&trash)),
    );
    assert!(delete.execute(&note).await.is_success());
    assert!(!note_file.path().exists());
    assert!(trash.join(note_file.file_name().unwrap()).exists());
    assert_eq!(canvas.session.len().await, 1);
    assert_eq!(canvas.session.placement(&picture).await.unwrap().z, 0);
}

#[tokio::test]
async fn test_cancelled_confirmation_keeps_item() {
    let canvas = Canvas::new();
    let item = canvas
        .paste(ClipboardPayload::from_text("keep me"), Point::ORIGIN)
        .await;
    let file = canvas.session.backing_file(&item).await.unwrap();

    // No settings file: confirmation defaults to on.
    let delete = DeleteCanvasItem::from_ports(
        canvas.session.clone(),
        Arc::new(canvas.settings()),
        Arc::new(PresetDialog::cancelling()),
        Arc::new(FsFileDeleter::new(canvas.dir.path().join("trash"))),
    );

    assert!(delete.execute(&item).await.is_cancel());
    assert!(file.path().exists());
    assert_eq!(canvas.session.len().await, 1);
}

#[tokio::test]
async fn test_confirmed_permanent_delete_removes_file() {
    let canvas = Canvas::new();
    let item = canvas
        .paste(ClipboardPayload::from_text("gone soon"), Point::ORIGIN)
        .await;
    let file = canvas.session.backing_file(&item).await.unwrap();
    let trash = canvas.dir.path().join("trash");

    let delete = DeleteCanvasItem::from_ports(
        canvas.session.clone(),
        Arc::new(canvas.settings()),
        Arc::new(PresetDialog::new(DeleteConfirmation::Primary {
            delete_permanently: true,
        })),
        Arc::new(FsFileDeleter::new(&trash)),
    );

    assert!(delete.execute(&item).await.is_success());
    assert!(!file.path().exists());
    assert!(!trash.exists());
    assert!(canvas.session.is_empty().await);
}

#[tokio::test]
async fn test_external_file_drop_lands_on_top() {
    let canvas = Canvas::new();
    canvas
        .paste(ClipboardPayload::from_text("first"), Point::ORIGIN)
        .await;
    let dropped = canvas.dir.path().join("readme.md");
    std::fs::write(&dropped, "# Readme").unwrap();

    let drop = HandleCanvasDrop::from_ports(canvas.session.clone(), canvas.paste.clone());
    let result = drop
        .execute(
            Point::new(12.0, 30.0),
            None,
            ClipboardPayload::from_files([FileHandle::new(&dropped)]),
        )
        .await;

    let CanvasDropResult::Pasted(Outcome::Success(item)) = result else {
        panic!("file drop should paste");
    };
    let placement = canvas.session.placement(&item).await.unwrap();
    assert_eq!(placement.position, Point::new(12.0, 30.0));
    assert_eq!(placement.z, 1);
    assert_eq!(
        canvas.session.render(&item).await.unwrap().unwrap(),
        RenderedContent::Markdown("# Readme".into())
    );
}

#[tokio::test]
async fn test_autopaste_follows_saved_settings_and_rules() {
    let canvas = Canvas::new();
    let settings = canvas.settings();
    settings
        .save(&CanvasSettings {
            show_delete_confirmation: true,
            autopaste_enabled: true,
        })
        .await
        .unwrap();
    let mut rules = AutopasteRuleSet::default();
    // Reject images.
    rules.add(RuleConfig::TypeFilter { selected_index: 0 });
    let autopaste = ProcessAutopaste::from_ports(
        Arc::new(settings),
        AutopasteEngine::from_rule_set(&rules),
        canvas.paste.clone(),
    );

    let image = autopaste
        .execute(
            &ClipboardPayload::from_bitmap(png_bytes(8, 8)),
            Point::ORIGIN,
        )
        .await
        .unwrap();
    assert!(matches!(image, AutopasteResult::Rejected { index: 0, .. }));

    let text = autopaste
        .execute(&ClipboardPayload::from_text("note to self"), Point::ORIGIN)
        .await
        .unwrap();
    assert!(matches!(text, AutopasteResult::Pasted(Outcome::Success(_))));
    assert_eq!(canvas.session.len().await, 1);
}
