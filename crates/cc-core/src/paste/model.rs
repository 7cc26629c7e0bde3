use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{FailureKind, PasteContent, PasteError, PasteResult, PasteState, RenderedContent};
use crate::payload::{ClipboardPayload, ContentTypeTag};
use crate::ports::{FileHandle, StorageReceiverPort};

/// One pasted item's lifecycle, shared by every content type.
///
/// The staged representation lives in the [`PasteContent`]; the backing file is
/// `file`. They agree whenever the state is `Persisted`, and `file` is `None`
/// before the first successful save.
pub struct PasteModel {
    content: Box<dyn PasteContent>,
    receiver: Arc<dyn StorageReceiverPort>,
    state: PasteState,
    file: Option<FileHandle>,
}

impl PasteModel {
    pub fn new(content: Box<dyn PasteContent>, receiver: Arc<dyn StorageReceiverPort>) -> Self {
        Self {
            content,
            receiver,
            state: PasteState::Empty,
            file: None,
        }
    }

    pub fn state(&self) -> PasteState {
        self.state
    }

    pub fn content_type(&self) -> ContentTypeTag {
        self.content.content_type()
    }

    /// Backing file, once the item has been saved or reloaded.
    pub fn file(&self) -> Option<&FileHandle> {
        self.file.as_ref()
    }

    pub fn is_disposed(&self) -> bool {
        self.state == PasteState::Disposed
    }

    /// Whether the staged representation is still held.
    pub fn has_staged_data(&self) -> bool {
        self.content.is_staged()
    }

    /// `Empty → Ingesting → Staged` for data that arrived via paste or drop.
    pub async fn set_data_from_payload(&mut self, payload: &ClipboardPayload) -> PasteResult<()> {
        self.begin_ingest("set data from payload")?;

        let result = self
            .content
            .ingest_payload(payload, self.receiver.as_ref())
            .await;

        self.finish_ingest(result, PasteState::Staged)
    }

    /// `Empty → Ingesting → Persisted` for an item reloaded from its backing file.
    ///
    /// The file becomes the storage target; staged data and file agree from the start.
    pub async fn set_data_from_file(&mut self, handle: FileHandle) -> PasteResult<()> {
        self.begin_ingest("set data from file")?;

        let mut source = match self.receiver.open_for_read(&handle).await {
            Ok(source) => source,
            Err(e) => {
                let err = PasteError::failure_with_cause(
                    FailureKind::IoDenied,
                    format!("open {}", handle.path().display()),
                    e,
                );
                return self.finish_ingest(Err(err), PasteState::Persisted);
            }
        };

        let result = self.content.ingest_file(&handle, &mut source).await;
        if result.is_ok() {
            self.file = Some(handle);
        }

        self.finish_ingest(result, PasteState::Persisted)
    }

    /// `Staged → Persisting → Persisted`. Saving a persisted model is a no-op.
    ///
    /// A destination file is allocated before anything is written, so a failed
    /// allocation never touches an existing file. Any failure returns the model to
    /// `Staged` and removes the file allocated for the attempt; the staged data
    /// stays available for another attempt.
    pub async fn try_save(&mut self) -> PasteResult<FileHandle> {
        match self.state {
            PasteState::Staged => {}
            PasteState::Persisted => {
                if let Some(file) = &self.file {
                    return Ok(file.clone());
                }
                debug_assert!(false, "persisted paste model without a backing file");
                return Err(PasteError::invalid_transition("save", self.state));
            }
            state => {
                warn!(state = %state, "save requested from a state that cannot save");
                return Err(PasteError::invalid_transition("save", state));
            }
        }

        self.state = PasteState::Persisting;
        let extension = self.content.extension();

        let handle = match self.receiver.allocate_empty_file(&extension).await {
            Ok(handle) => handle,
            Err(e) => {
                warn!(extension = %extension, error = %e, "failed to allocate backing file");
                self.state = PasteState::Staged;
                return Err(PasteError::failure_with_cause(
                    FailureKind::AllocationFailed,
                    format!("allocate .{extension} file"),
                    e,
                ));
            }
        };

        let mut target = match self.receiver.open_for_read_write(&handle).await {
            Ok(target) => target,
            Err(e) => {
                warn!(file = %handle.path().display(), error = %e, "failed to open backing file");
                self.discard_allocation(&handle).await;
                self.state = PasteState::Staged;
                return Err(PasteError::failure_with_cause(
                    FailureKind::IoDenied,
                    format!("open {}", handle.path().display()),
                    e,
                ));
            }
        };

        match self.content.persist(&mut target).await {
            Ok(()) => {
                drop(target);
                info!(
                    content_type = %self.content.content_type(),
                    file = %handle.path().display(),
                    "Persisted paste model"
                );
                self.file = Some(handle.clone());
                self.state = PasteState::Persisted;
                Ok(handle)
            }
            Err(e) => {
                drop(target);
                if !e.is_cancelled() {
                    warn!(file = %handle.path().display(), error = %e, "failed to persist paste model");
                }
                self.discard_allocation(&handle).await;
                self.state = PasteState::Staged;
                Err(e)
            }
        }
    }

    pub async fn render(&self) -> PasteResult<RenderedContent> {
        if !self.state.has_content() {
            return Err(PasteError::invalid_transition("render", self.state));
        }
        self.content.render().await
    }

    /// Release the staged representation. Idempotent.
    pub fn dispose(&mut self) {
        if self.state == PasteState::Disposed {
            return;
        }
        self.content.release();
        debug!(previous = %self.state, "Disposed paste model");
        self.state = PasteState::Disposed;
    }

    async fn discard_allocation(&self, handle: &FileHandle) {
        if let Err(e) = self.receiver.discard(handle).await {
            warn!(file = %handle.path().display(), error = %e, "failed to discard unused backing file");
        }
    }

    fn begin_ingest(&mut self, operation: &'static str) -> PasteResult<()> {
        if self.state != PasteState::Empty {
            warn!(state = %self.state, operation, "paste model already has data");
            return Err(PasteError::invalid_transition(operation, self.state));
        }
        self.state = PasteState::Ingesting;
        Ok(())
    }

    fn finish_ingest(&mut self, result: PasteResult<()>, target: PasteState) -> PasteResult<()> {
        match &result {
            Ok(()) => self.state = target,
            Err(PasteError::Cancelled) => {
                self.content.release();
                self.state = PasteState::Empty;
            }
            Err(PasteError::Failed(failure)) => {
                warn!(
                    content_type = %self.content.content_type(),
                    kind = %failure.kind(),
                    error = %failure,
                    "ingestion failed"
                );
                self.content.release();
                self.state = PasteState::Failed(failure.kind());
            }
        }
        result
    }
}

impl std::fmt::Debug for PasteModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasteModel")
            .field("content_type", &self.content.content_type())
            .field("state", &self.state)
            .field("file", &self.file)
            .finish()
    }
}
