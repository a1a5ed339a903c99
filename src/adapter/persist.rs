//! Persistence boundary.

use crate::error::{Error, Result};
use crate::model::Document;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Payload handed to a persistence backend.
///
/// Owns a copy of the document, so later edits cannot reach an in-flight save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRequest {
    /// Document id (None for a first save)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Author
    pub user_id: String,

    /// Owning organization
    pub organization_id: String,

    /// Document title
    pub title: String,

    /// Snapshot of the document
    pub content: Document,
}

impl SaveRequest {
    /// Build a request over a document snapshot.
    pub fn new(
        content: Document,
        user_id: impl Into<String>,
        organization_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(content.id.clone()),
            user_id: user_id.into(),
            organization_id: organization_id.into(),
            title: content.title.clone(),
            content,
        }
    }
}

/// What a backend returns after a save; at least an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveReceipt {
    /// Stored document id
    pub id: String,

    /// Any other fields returned by the backend
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SaveReceipt {
    /// Create a receipt with only an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            extra: Map::new(),
        }
    }
}

/// Trait for document persistence backends.
///
/// Failures are reported as [`Error::Adapter`] (or `Io`) and are recoverable;
/// retry policy belongs to the caller.
pub trait PersistenceAdapter: Send + Sync {
    /// Get the name of this adapter.
    fn name(&self) -> &str;

    /// Store the request's document.
    fn save(&self, request: &SaveRequest) -> Result<SaveReceipt>;
}

/// Key of the local cache entry for a document id.
pub fn cache_key(id: &str) -> String {
    format!("report_document_{}", id)
}

/// Persistence into a directory of `report_document_<id>.json` files.
///
/// Serves as the local keyed cache when a remote backend is unreachable.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    dir: PathBuf,
}

impl JsonFilePersistence {
    /// Create an adapter writing into `dir` (created on first save).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the adapter writes to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for a document id.
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", cache_key(id)))
    }

    /// Load a previously saved document.
    pub fn load(&self, id: &str) -> Result<Document> {
        let text = fs::read_to_string(self.path_for(id))?;
        let request: SaveRequest = serde_json::from_str(&text)?;
        request.content.validate()?;
        Ok(request.content)
    }
}

impl PersistenceAdapter for JsonFilePersistence {
    fn name(&self) -> &str {
        "json-file"
    }

    fn save(&self, request: &SaveRequest) -> Result<SaveReceipt> {
        let id = request
            .id
            .clone()
            .unwrap_or_else(|| request.content.id.clone());
        if id.is_empty() {
            return Err(Error::Adapter("document id is empty".into()));
        }

        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(&id);
        let json = serde_json::to_string_pretty(request)?;
        fs::write(&path, json)?;
        log::debug!("saved document {} to {}", id, path.display());

        let mut receipt = SaveReceipt::new(id);
        receipt
            .extra
            .insert("path".into(), Value::String(path.display().to_string()));
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key() {
        assert_eq!(cache_key("42"), "report_document_42");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = JsonFilePersistence::new(dir.path().join("cache"));
        let doc = Document::new("Saved");
        let request = SaveRequest::new(doc.clone(), "u1", "o1");

        let receipt = adapter.save(&request).unwrap();
        assert_eq!(receipt.id, doc.id);
        assert!(adapter.path_for(&doc.id).exists());
        assert_eq!(adapter.load(&doc.id).unwrap(), doc);
    }

    #[test]
    fn test_request_json_shape() {
        let request = SaveRequest::new(Document::new("T"), "u1", "o1");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["user_id"], "u1");
        assert_eq!(json["organization_id"], "o1");
        assert_eq!(json["content"]["title"], "T");
    }
}
