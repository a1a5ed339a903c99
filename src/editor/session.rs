//! Editing session: the single owner of a document and its undo log.

use super::{ops, BlockPatch, EditorOptions, History};
use crate::adapter::{ExportAdapter, ExportArtifact, ExportTarget, SaveRequest};
use crate::error::Result;
use crate::model::{BlockContent, BlockId, BlockKind, Document, Page};
use crate::paginate::paginate;
use std::fmt;

/// Notification sent to subscribers after the session state changes.
#[derive(Debug, Clone, Copy)]
pub enum EditorEvent<'a> {
    /// The document changed (mutation, undo or redo).
    DocumentChanged(&'a Document),
    /// The selected block changed.
    SelectionChanged(Option<&'a BlockId>),
}

type Listener = Box<dyn FnMut(&EditorEvent<'_>)>;

/// State container for one editing session.
///
/// Mutations go through the pure functions in [`ops`]; each successful one
/// replaces the document and records exactly one history snapshot. No-ops
/// (missing ids, boundary moves) leave both untouched.
pub struct Editor {
    document: Document,
    history: History<Document>,
    selected: Option<BlockId>,
    listeners: Vec<Listener>,
}

impl Editor {
    /// Start a session on a synthesized default document.
    pub fn new(options: EditorOptions) -> Self {
        let document = Document::new(options.default_title.clone());
        Self::with_document(document, options)
    }

    /// Start a session on an externally supplied document.
    pub fn with_document(document: Document, options: EditorOptions) -> Self {
        let mut history = History::with_capacity(options.history_capacity);
        history.record(document.clone());
        Self {
            document,
            history,
            selected: None,
            listeners: Vec::new(),
        }
    }

    /// The current document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The undo log.
    pub fn history(&self) -> &History<Document> {
        &self.history
    }

    /// Owned copy of the current document for adapters.
    pub fn snapshot(&self) -> Document {
        self.document.clone()
    }

    /// Project the current document into pages.
    pub fn pages(&self) -> Vec<Page> {
        paginate(&self.document.blocks)
    }

    /// Register a change listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&EditorEvent<'_>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Insert an empty block of `kind` after `after` (or at the end).
    pub fn insert_block(&mut self, kind: BlockKind, after: Option<&BlockId>) -> BlockId {
        if kind.is_data_backed() {
            log::debug!("inserting {} without precomputed data", kind);
        }
        self.insert_content(BlockContent::empty(kind), after)
    }

    /// Insert a block with a precomputed payload (charts, tables).
    pub fn insert_content(&mut self, content: BlockContent, after: Option<&BlockId>) -> BlockId {
        let (next, id) = ops::insert_block(&self.document, content, after);
        self.commit(next);
        id
    }

    /// Insert a page marker plus title heading as one undo step.
    pub fn insert_new_page(&mut self, title: Option<&str>, after: Option<&BlockId>) -> BlockId {
        let (next, id) = ops::insert_new_page(&self.document, title, after);
        self.commit(next);
        id
    }

    /// Patch a block's payload. Returns false if the block does not exist.
    pub fn update_block(&mut self, id: &BlockId, patch: &BlockPatch) -> bool {
        let next = ops::update_block(&self.document, id, patch);
        self.apply(next)
    }

    /// Remove a block. Returns false if the block does not exist.
    pub fn delete_block(&mut self, id: &BlockId) -> bool {
        let next = ops::delete_block(&self.document, id);
        self.apply(next)
    }

    /// Move a block one position up. Returns false at the top or if missing.
    pub fn move_block_up(&mut self, id: &BlockId) -> bool {
        let next = ops::move_block_up(&self.document, id);
        self.apply(next)
    }

    /// Move a block one position down. Returns false at the bottom or if missing.
    pub fn move_block_down(&mut self, id: &BlockId) -> bool {
        let next = ops::move_block_down(&self.document, id);
        self.apply(next)
    }

    /// Duplicate a block right after itself. Returns the copy's id.
    pub fn duplicate_block(&mut self, id: &BlockId) -> Option<BlockId> {
        let (next, copy_id) = ops::duplicate_block(&self.document, id)?;
        self.commit(next);
        Some(copy_id)
    }

    /// Restore the previous snapshot. No-op at the start of the log.
    pub fn undo(&mut self) -> &Document {
        if let Some(previous) = self.history.undo() {
            self.document = previous.clone();
            self.after_restore();
        }
        &self.document
    }

    /// Re-apply the next snapshot. No-op at the end of the log.
    pub fn redo(&mut self) -> &Document {
        if let Some(next) = self.history.redo() {
            self.document = next.clone();
            self.after_restore();
        }
        &self.document
    }

    /// Check if there is anything to undo.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if there is anything to redo.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Select a block. Returns false (selection unchanged) if it does not exist.
    pub fn select(&mut self, id: &BlockId) -> bool {
        if !self.document.contains(id) {
            return false;
        }
        self.set_selection(Some(id.clone()));
        true
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.set_selection(None);
    }

    /// The selected block id.
    pub fn selected(&self) -> Option<&BlockId> {
        self.selected.as_ref()
    }

    /// Build a persistence request over a snapshot of the current document.
    pub fn save_request(
        &self,
        user_id: impl Into<String>,
        organization_id: impl Into<String>,
    ) -> SaveRequest {
        SaveRequest::new(self.snapshot(), user_id, organization_id)
    }

    /// Export the paginated document through `adapter`.
    ///
    /// The selection is cleared before rendering and restored afterwards,
    /// whether or not the adapter succeeds.
    pub fn export_with(
        &mut self,
        adapter: &dyn ExportAdapter,
        target: &ExportTarget,
    ) -> Result<ExportArtifact> {
        let selection = self.selected.clone();
        if selection.is_some() {
            self.set_selection(None);
        }

        let pages = self.pages();
        let result = adapter.render(&pages, target);
        if let Err(ref e) = result {
            log::warn!("export via {} failed: {}", adapter.name(), e);
        }

        if let Some(id) = selection {
            if self.document.contains(&id) {
                self.set_selection(Some(id));
            }
        }
        result
    }

    fn apply(&mut self, next: Option<Document>) -> bool {
        match next {
            Some(doc) => {
                self.commit(doc);
                true
            }
            None => false,
        }
    }

    fn commit(&mut self, next: Document) {
        self.document = next;
        self.history.record(self.document.clone());
        self.drop_stale_selection();
        self.emit_document();
    }

    fn after_restore(&mut self) {
        self.drop_stale_selection();
        self.emit_document();
    }

    fn drop_stale_selection(&mut self) {
        let stale = matches!(&self.selected, Some(id) if !self.document.contains(id));
        if stale {
            self.set_selection(None);
        }
    }

    fn set_selection(&mut self, selection: Option<BlockId>) {
        self.selected = selection;
        let event = EditorEvent::SelectionChanged(self.selected.as_ref());
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    fn emit_document(&mut self) {
        let event = EditorEvent::DocumentChanged(&self.document);
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorOptions::default())
    }
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("document", &self.document.id)
            .field("blocks", &self.document.block_count())
            .field("history_len", &self.history.len())
            .field("cursor", &self.history.cursor())
            .field("selected", &self.selected)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
