//! Integration tests for persistence/export adapters and renderers.

use std::sync::{Arc, Mutex};

use reportdoc::adapter::{cache_key, spawn_export, spawn_save};
use reportdoc::error::Result;
use reportdoc::render::{to_markdown, to_text};
use reportdoc::{
    export_document, BlockKind, BlockPatch, Editor, Error, ExportAdapter, ExportArtifact,
    ExportTarget, JsonFilePersistence, MarkdownExporter, Page, PageGeometry, PersistenceAdapter,
    RenderOptions, SaveReceipt, SaveRequest,
};

/// Export adapter recording the page numbers it was handed.
#[derive(Default)]
struct RecordingExporter {
    seen: Mutex<Vec<Vec<u32>>>,
}

impl ExportAdapter for RecordingExporter {
    fn name(&self) -> &str {
        "recording"
    }

    fn render(&self, pages: &[Page], target: &ExportTarget) -> Result<ExportArtifact> {
        let numbers: Vec<u32> = pages.iter().map(|p| p.number).collect();
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(numbers);
        }
        Ok(ExportArtifact {
            file_name: target.file_name.clone(),
            mime_type: "application/octet-stream",
            data: Vec::new(),
            page_count: pages.len(),
        })
    }
}

/// Persistence adapter capturing requests in memory.
#[derive(Default)]
struct MemoryPersistence {
    saved: Mutex<Vec<SaveRequest>>,
}

impl PersistenceAdapter for MemoryPersistence {
    fn name(&self) -> &str {
        "memory"
    }

    fn save(&self, request: &SaveRequest) -> Result<SaveReceipt> {
        let mut saved = self
            .saved
            .lock()
            .map_err(|_| Error::Adapter("poisoned".into()))?;
        saved.push(request.clone());
        Ok(SaveReceipt::new(request.content.id.clone()))
    }
}

fn three_page_editor() -> Editor {
    let mut editor = Editor::default();
    editor.insert_new_page(Some("Second"), None);
    editor.insert_block(BlockKind::Paragraph, None);
    editor.insert_new_page(Some("Third"), None);
    editor
}

#[test]
fn test_export_receives_all_pages_in_order() {
    let editor = three_page_editor();
    let exporter = RecordingExporter::default();

    let artifact = export_document(&exporter, editor.document(), &ExportTarget::new("r.pdf")).unwrap();
    assert_eq!(artifact.page_count, 3);
    assert_eq!(*exporter.seen.lock().unwrap(), vec![vec![1, 2, 3]]);
}

#[test]
fn test_markdown_exporter_sections_in_page_order() {
    let editor = three_page_editor();
    let artifact = export_document(
        &MarkdownExporter::new(),
        editor.document(),
        &ExportTarget::new("r.md").with_geometry(PageGeometry::a4()),
    )
    .unwrap();

    let text = String::from_utf8(artifact.data).unwrap();
    let second = text.find("# Second").unwrap();
    let third = text.find("# Third").unwrap();
    assert!(second < third);
    assert!(text.starts_with("<!-- page 1 -->"));
}

#[test]
fn test_save_request_is_a_snapshot() {
    let mut editor = Editor::default();
    let adapter = Arc::new(MemoryPersistence::default());
    let request = editor.save_request("user-1", "org-1");
    let heading = editor.document().blocks[0].id.clone();

    let job = spawn_save(adapter.clone(), request).unwrap();
    editor.update_block(&heading, &BlockPatch::new().with_content("Edited later"));
    job.wait().unwrap();

    let saved = adapter.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].user_id, "user-1");
    assert_eq!(saved[0].organization_id, "org-1");
    assert_ne!(saved[0].content.blocks[0].content.text(), Some("Edited later"));
}

#[test]
fn test_json_file_persistence_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let adapter = Arc::new(JsonFilePersistence::new(dir.path()));
    let editor = three_page_editor();
    let doc = editor.snapshot();

    let receipt = spawn_save(adapter.clone(), editor.save_request("u", "o"))
        .unwrap()
        .wait()
        .unwrap();

    assert_eq!(receipt.id, doc.id);
    let file = dir.path().join(format!("{}.json", cache_key(&doc.id)));
    assert!(file.exists());
    assert_eq!(adapter.load(&doc.id).unwrap(), doc);
}

#[test]
fn test_cancelled_export_reports_cancelled() {
    let job = spawn_export(
        Arc::new(RecordingExporter::default()),
        three_page_editor().snapshot(),
        ExportTarget::new("r.pdf"),
    )
    .unwrap();
    job.cancel();

    let err = job.wait().unwrap_err();
    assert!(matches!(err, Error::Cancelled));
    assert!(err.is_recoverable());
}

#[test]
fn test_text_render_separates_pages() {
    let mut editor = Editor::default();
    let heading = editor.document().blocks[0].id.clone();
    editor.update_block(&heading, &BlockPatch::new().with_content("Hello, world!"));
    editor.insert_new_page(Some("Next"), None);

    let text = to_text(editor.document()).unwrap();
    let sections: Vec<&str> = text.split('\u{000C}').collect();
    assert_eq!(sections.len(), 2);
    assert!(sections[0].contains("Hello, world!"));
    assert!(sections[1].contains("Next"));
}

#[test]
fn test_markdown_without_chart_data() {
    let mut editor = Editor::default();
    editor.insert_block(BlockKind::Chart, None);

    let md = to_markdown(
        editor.document(),
        &RenderOptions::new().with_page_markers(false).with_chart_data(false),
    )
    .unwrap();
    assert!(md.contains("**Chart** (bar chart)"));
    assert!(!md.contains("| Response |"));
}
