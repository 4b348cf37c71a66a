//! Document-store collaborator.
//!
//! The client persists exactly one kind of record, `users/{identity.id}`, through the
//! [`DocumentStore`] trait. Writes are shallow merges: top-level fields in the partial
//! document overwrite stored fields, everything else is kept. There is no conflict
//! resolution; the last write wins.
//!
//! Two implementations ship with the crate:
//! - [`FileDocumentStore`]: one JSON file per document under a root directory
//! - [`MemoryDocumentStore`]: an in-process map, used by tests and ephemeral sessions
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//!   users/
//!     <identity id>.json
//! ```

use crate::validation::validate_path_component;
use crate::{StoreError, StoreResult};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// A stored record: a JSON object.
pub type Document = Map<String, Value>;

/// Options for [`DocumentStore::write_document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteOptions {
    /// Merge into an existing document instead of replacing it.
    pub merge: bool,
}

impl WriteOptions {
    pub const MERGE: WriteOptions = WriteOptions { merge: true };
    pub const REPLACE: WriteOptions = WriteOptions { merge: false };
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads a document. `Ok(None)` means the document does not exist.
    async fn read_document(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Writes (or merges) a partial document.
    async fn write_document(
        &self,
        collection: &str,
        id: &str,
        partial: Document,
        options: WriteOptions,
    ) -> StoreResult<()>;
}

/// Shallow merge: top-level keys of `partial` overwrite those of `existing`.
pub fn shallow_merge(mut existing: Document, partial: Document) -> Document {
    existing.extend(partial);
    existing
}

// ============================================================================
// FILE STORE
// ============================================================================

/// Stores each document as a pretty-printed JSON file.
#[derive(Clone, Debug)]
pub struct FileDocumentStore {
    root: PathBuf,
}

impl FileDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, collection: &str, id: &str) -> StoreResult<PathBuf> {
        validate_path_component("collection", collection)?;
        validate_path_component("document id", id)?;
        Ok(self.root.join(collection).join(format!("{id}.json")))
    }

    async fn read_path(path: &Path) -> StoreResult<Option<Document>> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        match serde_json::from_str::<Value>(&contents)? {
            Value::Object(doc) => Ok(Some(doc)),
            _ => Err(StoreError::NotAnObject {
                path: path.to_path_buf(),
            }),
        }
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn read_document(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let path = self.document_path(collection, id)?;
        Self::read_path(&path).await
    }

    async fn write_document(
        &self,
        collection: &str,
        id: &str,
        partial: Document,
        options: WriteOptions,
    ) -> StoreResult<()> {
        let path = self.document_path(collection, id)?;

        let document = if options.merge {
            match Self::read_path(&path).await? {
                Some(existing) => shallow_merge(existing, partial),
                None => partial,
            }
        } else {
            partial
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let raw = serde_json::to_string_pretty(&Value::Object(document))?;

        // Write to a sibling temp file and rename so readers never see a torn document.
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, raw)
            .await
            .map_err(|source| StoreError::Write {
                path: tmp_path.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|source| StoreError::Write {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("wrote document {}", path.display());
        Ok(())
    }
}

// ============================================================================
// MEMORY STORE
// ============================================================================

/// In-process document store.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: Mutex<HashMap<(String, String), Document>>,
    writes: AtomicUsize,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a document without counting it as a write.
    pub async fn insert(&self, collection: &str, id: &str, document: Document) {
        self.documents
            .lock()
            .await
            .insert((collection.to_owned(), id.to_owned()), document);
    }

    /// Number of `write_document` calls served so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn read_document(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let documents = self.documents.lock().await;
        Ok(documents
            .get(&(collection.to_owned(), id.to_owned()))
            .cloned())
    }

    async fn write_document(
        &self,
        collection: &str,
        id: &str,
        partial: Document,
        options: WriteOptions,
    ) -> StoreResult<()> {
        let mut documents = self.documents.lock().await;
        let key = (collection.to_owned(), id.to_owned());

        let document = match (options.merge, documents.remove(&key)) {
            (true, Some(existing)) => shallow_merge(existing, partial),
            _ => partial,
        };
        documents.insert(key, document);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
