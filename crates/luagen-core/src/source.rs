//! Access to native source text.
//!
//! The engine never touches the filesystem directly; everything goes through a
//! [`SourceProvider`]. [`FsSource`] is used by the CLI, [`MemorySource`] by tests
//! and embedders that already hold the text.

use crate::error::{LuagenError, LuagenResult};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub trait SourceProvider {
    /// Returns the full text of `path`.
    fn read(&self, path: &Path) -> LuagenResult<Arc<str>>;

    /// Whether `path` can be read at all.
    fn exists(&self, path: &Path) -> bool;
}

/// Reads files from disk, keeping each file's text for the rest of the run.
///
/// Inputs are immutable for the duration of a generation, so the header scanned
/// for type location is not read again when its declarations are extracted.
#[derive(Debug, Default)]
pub struct FsSource {
    cache: RefCell<HashMap<PathBuf, Arc<str>>>,
}

impl FsSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SourceProvider for FsSource {
    fn read(&self, path: &Path) -> LuagenResult<Arc<str>> {
        if let Some(text) = self.cache.borrow().get(path) {
            return Ok(Arc::clone(text));
        }

        tracing::trace!(path = %path.display(), "Reading source file");
        let text: Arc<str> = std::fs::read_to_string(path)
            .map_err(|e| LuagenError::io(path, e))?
            .into();
        self.cache
            .borrow_mut()
            .insert(path.to_path_buf(), Arc::clone(&text));
        Ok(text)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// In-memory file set keyed by path.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    files: HashMap<PathBuf, Arc<str>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, replacing any previous content at the same path.
    pub fn with_file(mut self, path: impl Into<PathBuf>, text: &str) -> Self {
        self.insert(path, text);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, text: &str) {
        self.files.insert(path.into(), Arc::from(text));
    }
}

impl SourceProvider for MemorySource {
    fn read(&self, path: &Path) -> LuagenResult<Arc<str>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| LuagenError::not_found(path))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}
