//! Background save/export jobs.
//!
//! Each job runs on its own thread over an owned snapshot and reports back
//! through a bounded channel. Cancelling a job marks it; the worker checks
//! the mark before touching the adapter, and a result that arrives after
//! cancellation is discarded by [`PendingJob::wait`].
//!
//! `Error::Cancelled` therefore means the caller gets no result. It does not
//! mean nothing was written: a save that had already reached the adapter
//! when `cancel()` was called still completes on the backend.

use super::{export_document, ExportAdapter, ExportArtifact, ExportTarget};
use super::{PersistenceAdapter, SaveReceipt, SaveRequest};
use crate::error::{Error, Result};
use crate::model::Document;
use crossbeam_channel::{bounded, Receiver, TryRecvError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark as cancelled.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Check if cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Handle to a job running in the background.
#[derive(Debug)]
pub struct PendingJob<T> {
    receiver: Receiver<Result<T>>,
    token: CancelToken,
}

impl<T> PendingJob<T> {
    /// Request cancellation. The worker may still finish; its result is dropped.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Block until the job finishes.
    pub fn wait(self) -> Result<T> {
        let result = self
            .receiver
            .recv()
            .map_err(|_| Error::Other("background job terminated without a result".into()))?;
        if self.token.is_cancelled() {
            return Err(Error::Cancelled);
        }
        result
    }

    /// Poll for a result without blocking.
    pub fn try_result(&self) -> Option<Result<T>> {
        if self.token.is_cancelled() {
            return Some(Err(Error::Cancelled));
        }
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(Error::Other(
                "background job terminated without a result".into(),
            ))),
        }
    }
}

fn spawn<T, F>(name: &str, work: F) -> Result<PendingJob<T>>
where
    T: Send + 'static,
    F: FnOnce(&CancelToken) -> Result<T> + Send + 'static,
{
    let (sender, receiver) = bounded(1);
    let token = CancelToken::new();
    let worker_token = token.clone();

    thread::Builder::new()
        .name(name.to_string())
        .spawn(move || {
            let result = if worker_token.is_cancelled() {
                Err(Error::Cancelled)
            } else {
                work(&worker_token)
            };
            // Receiver may already be gone
            let _ = sender.send(result);
        })?;

    Ok(PendingJob { receiver, token })
}

/// Save a request on a background thread.
///
/// Cancelling before the worker reaches the adapter skips the save entirely.
pub fn spawn_save(
    adapter: Arc<dyn PersistenceAdapter>,
    request: SaveRequest,
) -> Result<PendingJob<SaveReceipt>> {
    spawn("reportdoc-save", move |token| {
        save_unless_cancelled(adapter.as_ref(), &request, token)
    })
}

fn save_unless_cancelled(
    adapter: &dyn PersistenceAdapter,
    request: &SaveRequest,
    token: &CancelToken,
) -> Result<SaveReceipt> {
    if token.is_cancelled() {
        log::debug!("save of {} cancelled before reaching {}", request.content.id, adapter.name());
        return Err(Error::Cancelled);
    }
    let receipt = adapter.save(request);
    match &receipt {
        Ok(r) => log::info!("{} saved document {}", adapter.name(), r.id),
        Err(e) => log::warn!("{} save failed: {}", adapter.name(), e),
    }
    receipt
}

/// Export a document snapshot on a background thread.
pub fn spawn_export(
    adapter: Arc<dyn ExportAdapter>,
    document: Document,
    target: ExportTarget,
) -> Result<PendingJob<ExportArtifact>> {
    spawn("reportdoc-export", move |token| {
        let artifact = export_document(adapter.as_ref(), &document, &target)?;
        if token.is_cancelled() {
            log::debug!("export of {} cancelled", target.file_name);
            return Err(Error::Cancelled);
        }
        Ok(artifact)
    })
}
