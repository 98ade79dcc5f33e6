use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::duplicates::{find_duplicate_values, DuplicateGroups};
use crate::search::{search_in_values, SearchResult};
use crate::{Document, KvError, Result};

/// Reads `path` and parses it as a flat string-valued JSON object.
pub fn load_document(path: &Path) -> Result<Document> {
    let content = fs::read(path).map_err(|source| KvError::Read {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_slice(&content).map_err(|source| KvError::Parse {
        path: path.to_owned(),
        source,
    })
}

/// Writes `document` to `path` as two-space-indented JSON.
///
/// The file is truncated and rewritten in place, so a failure part way
/// through can leave it incomplete.
pub fn save_document(path: &Path, document: &Document) -> Result<()> {
    let content = serde_json::to_string_pretty(document).map_err(KvError::Serialize)?;
    fs::write(path, content).map_err(|source| KvError::Write {
        path: path.to_owned(),
        source,
    })
}

/// Checks that `path` names an existing file with a `.json` extension.
pub fn validate_json_path(path: &Path) -> Result<()> {
    if let Err(source) = fs::metadata(path) {
        return Err(if source.kind() == io::ErrorKind::NotFound {
            KvError::NotFound(path.to_owned())
        } else {
            KvError::Read {
                path: path.to_owned(),
                source,
            }
        });
    }
    if path.extension() != Some("json".as_ref()) {
        return Err(KvError::WrongExtension(path.to_owned()));
    }
    Ok(())
}

/// The document being edited together with the file it belongs to.
///
/// A store is either unloaded (no path, empty document) or loaded. Every
/// successful [`add`](Store::add) or [`remove`](Store::remove) is written
/// straight back to the file. If that write fails the in-memory change is
/// kept and the error is returned, leaving memory and disk out of step
/// until the next successful save or reload.
#[derive(Debug, Default)]
pub struct Store {
    path: Option<PathBuf>,
    document: Document,
}

impl Store {
    /// Creates an unloaded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the document at `path`, replacing the current state.
    ///
    /// On failure the previous path and document are left as they were.
    pub fn load(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let document = load_document(&path)?;
        info!("Loaded {} entries from {}", document.len(), path.display());
        self.path = Some(path);
        self.document = document;
        Ok(())
    }

    /// Writes the current document back to the file it came from.
    pub fn save(&self) -> Result<()> {
        let path = self.path.as_deref().ok_or(KvError::NotLoaded)?;
        save_document(path, &self.document)?;
        info!(
            "Saved {} entries to {}",
            self.document.len(),
            path.display()
        );
        Ok(())
    }

    /// Returns to the unloaded state. The file on disk is not touched.
    pub fn clear(&mut self) {
        if let Some(path) = self.path.take() {
            info!("Cleared {}", path.display());
        }
        self.document = Document::new();
    }

    /// Whether a file is loaded.
    pub fn is_loaded(&self) -> bool {
        self.path.is_some()
    }

    /// The loaded file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The document being edited.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Inserts a new key and saves.
    ///
    /// Rejects an empty key and a key that is already present without
    /// touching the document.
    pub fn add(&mut self, key: String, value: String) -> Result<()> {
        self.ensure_loaded()?;
        self.check_new_key(&key)?;
        self.document.insert(key, value);
        self.persist()
    }

    /// Removes a key and saves, returning the value it held.
    ///
    /// Rejects an empty key and a key that is absent without touching the
    /// document.
    pub fn remove(&mut self, key: &str) -> Result<String> {
        self.ensure_loaded()?;
        self.check_existing_key(key)?;
        let value = self
            .document
            .remove(key)
            .ok_or_else(|| KvError::KeyNotFound(key.to_owned()))?;
        self.persist()?;
        Ok(value)
    }

    /// Searches the values of the loaded document.
    pub fn search(&self, query: &str) -> Result<SearchResult> {
        self.ensure_loaded()?;
        Ok(search_in_values(&self.document, query))
    }

    /// Finds values shared by several keys in the loaded document.
    pub fn duplicates(&self) -> Result<DuplicateGroups> {
        self.ensure_loaded()?;
        Ok(find_duplicate_values(&self.document))
    }

    /// Fails with [`KvError::NotLoaded`] unless a file is loaded.
    pub fn ensure_loaded(&self) -> Result<()> {
        if self.is_loaded() {
            Ok(())
        } else {
            Err(KvError::NotLoaded)
        }
    }

    /// Validates a key about to be added.
    pub fn check_new_key(&self, key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(KvError::EmptyKey);
        }
        if let Some(value) = self.document.get(key) {
            return Err(KvError::KeyExists {
                key: key.to_owned(),
                value: value.to_owned(),
            });
        }
        Ok(())
    }

    /// Validates a key about to be removed.
    pub fn check_existing_key(&self, key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(KvError::EmptyKey);
        }
        if !self.document.contains_key(key) {
            return Err(KvError::KeyNotFound(key.to_owned()));
        }
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        self.save().inspect_err(|e| {
            warn!("In-memory document no longer matches disk: {}", e);
        })
    }
}
