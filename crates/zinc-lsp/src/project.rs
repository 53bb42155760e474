//! Project management for the Zinc language server.
//!
//! A [`Project`] owns every open [`SourceFile`] and indexes them twice: by
//! canonical filesystem path and by client URI. The two indexes always
//! agree; every public operation maintains both or neither.

use log::debug;
use rustc_hash::FxHashMap;
use thiserror::Error;
use url::Url;
use zinc_source::types::FileID;

use crate::document::{DocumentError, SourceFile, TextChange};

/// Errors surfaced by project operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProjectError {
    /// No file is open under the given path or URI
    #[error("file not found")]
    FileNotFound,
    /// A document-level edit or query failed
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// The set of open source files, indexed by path and by URI.
#[derive(Debug, Default)]
pub struct Project {
    /// Open files keyed by canonical filesystem path
    files: FxHashMap<String, SourceFile>,
    /// URI index; values are keys into `files`
    uri_index: FxHashMap<Url, String>,
    /// Next file identifier to hand out
    next_file_id: u32,
}

impl Project {
    /// Creates an empty project.
    #[must_use]
    pub fn new() -> Self {
        Self {
            files: FxHashMap::default(),
            uri_index: FxHashMap::default(),
            // Start from 1, reserve 0 for dummy spans.
            next_file_id: 1,
        }
    }

    /// Opens a file, replacing any previously open file at the same path.
    ///
    /// The replaced file's storage (and its URI index entry) is released
    /// before the new file is parsed and inserted into both indexes.
    pub fn add_or_update_file(
        &mut self,
        path: &str,
        uri: &Url,
        content: &str,
        version: i32,
    ) -> &SourceFile {
        if let Some(old) = self.files.remove(path) {
            let _ = self.uri_index.remove(old.uri());
        }

        let file_id = FileID::new(self.next_file_id);
        self.next_file_id += 1;

        let file = SourceFile::new(path, uri.clone(), content, version, file_id);
        debug!("opened {path} as {file_id} (v{version})");

        let _ = self.uri_index.insert(uri.clone(), path.to_string());
        self.files.entry(path.to_string()).or_insert(file)
    }

    /// Looks up an open file by path.
    pub fn get_file_by_path(&self, path: &str) -> Result<&SourceFile, ProjectError> {
        self.files.get(path).ok_or(ProjectError::FileNotFound)
    }

    /// Looks up an open file by URI.
    pub fn get_file_by_uri(&self, uri: &Url) -> Result<&SourceFile, ProjectError> {
        let path = self.uri_index.get(uri).ok_or(ProjectError::FileNotFound)?;
        self.files.get(path).ok_or(ProjectError::FileNotFound)
    }

    /// Replaces a file's entire content, as a single full-document edit.
    pub fn update_file_content(
        &mut self,
        uri: &Url,
        content: &str,
        version: i32,
    ) -> Result<(), ProjectError> {
        let file = self.get_file_by_uri_mut(uri)?;
        file.apply_text_changes(&[TextChange::full(content)], version)?;

        Ok(())
    }

    /// Forwards a batch of incremental changes to the file's edit method.
    pub fn apply_incremental_changes(
        &mut self,
        uri: &Url,
        changes: &[TextChange],
        version: i32,
    ) -> Result<(), ProjectError> {
        let file = self.get_file_by_uri_mut(uri)?;
        file.apply_text_changes(changes, version)?;

        Ok(())
    }

    /// Closes a file by path, releasing its storage.
    pub fn remove_file_by_path(&mut self, path: &str) -> Result<(), ProjectError> {
        let file = self.files.remove(path).ok_or(ProjectError::FileNotFound)?;
        let _ = self.uri_index.remove(file.uri());
        debug!("closed {path}");

        Ok(())
    }

    /// Closes a file by URI, releasing its storage.
    pub fn remove_file_by_uri(&mut self, uri: &Url) -> Result<(), ProjectError> {
        let path = self.uri_index.remove(uri).ok_or(ProjectError::FileNotFound)?;
        let _ = self.files.remove(&path);
        debug!("closed {path}");

        Ok(())
    }

    /// Returns the number of open files.
    #[must_use]
    pub fn file_count(&self) -> usize { self.files.len() }

    /// Iterates over all open files, in no particular order.
    pub fn files(&self) -> impl Iterator<Item = &SourceFile> { self.files.values() }

    /// Looks up a mutable file by URI.
    fn get_file_by_uri_mut(&mut self, uri: &Url) -> Result<&mut SourceFile, ProjectError> {
        let path = self.uri_index.get(uri).ok_or(ProjectError::FileNotFound)?.clone();
        self.files.get_mut(&path).ok_or(ProjectError::FileNotFound)
    }
}
