//! The ordered file list and its narrow mutation API.
//!
//! [`FileStore`] is the client's view of the files uploaded to the merge
//! service. Its order is exactly the order in which pages will be
//! concatenated server-side, so every mutation goes through a small, index
//! checked API instead of ad-hoc access to the underlying vector.
//!
//! The store is not the source of truth: after any order-changing round-trip
//! the server's acknowledged list is adopted wholesale via
//! [`FileStore::replace_all`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Server-identified reference to an uploaded PDF.
///
/// `path` is an opaque identifier assigned by the service and is unique
/// within a [`FileStore`]. `pages` is advisory, display-only, and populated
/// from the upload response when the service provides it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Original file name, as reported by the service.
    pub name: String,
    /// Server-assigned opaque identifier.
    pub path: String,
    /// Page count, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
}

impl FileDescriptor {
    /// Create a descriptor with an unknown page count.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            pages: None,
        }
    }
}

/// Aggregate statistics over the file list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreStats {
    /// Number of files in the list.
    pub total_files: usize,
    /// Sum of the known page counts.
    pub known_pages: u32,
    /// Number of files whose page count is still unknown.
    pub unknown_pages: usize,
}

/// Ordered collection of uploaded files.
///
/// Insertion order is the page-merge order. Invariant: no two entries share
/// a `path`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileStore {
    files: Vec<FileDescriptor>,
}

impl FileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files in the list.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// The current list, in merge order.
    ///
    /// Callers must treat the slice as immutable for the duration of a
    /// render pass; all mutation goes through the methods below.
    pub fn files(&self) -> &[FileDescriptor] {
        &self.files
    }

    /// Check whether a descriptor with this server path is present.
    pub fn contains_path(&self, path: &str) -> bool {
        self.files.iter().any(|f| f.path == path)
    }

    /// Append a descriptor at the end of the list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicatePath`] if a descriptor with the same server
    /// path is already present.
    pub fn append(&mut self, descriptor: FileDescriptor) -> Result<()> {
        if self.contains_path(&descriptor.path) {
            return Err(Error::DuplicatePath {
                path: descriptor.path,
            });
        }
        self.files.push(descriptor);
        Ok(())
    }

    /// Remove and return the descriptor at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index` is not within `[0, len)`.
    pub fn remove_at(&mut self, index: usize) -> Result<FileDescriptor> {
        self.check_index(index)?;
        Ok(self.files.remove(index))
    }

    /// Exchange the descriptors at positions `i` and `j`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if either index is not within
    /// `[0, len)`.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        self.check_index(i)?;
        self.check_index(j)?;
        self.files.swap(i, j);
        Ok(())
    }

    /// Replace the whole list with a server-acknowledged one.
    ///
    /// This is the only operation allowed to change list identity wholesale;
    /// it absorbs the authoritative list the service returns after an upload
    /// or reorder round-trip.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicatePath`] if the new list violates the
    /// unique-path invariant. The store is left unchanged in that case.
    pub fn replace_all(&mut self, new_list: Vec<FileDescriptor>) -> Result<()> {
        let mut seen = std::collections::HashSet::with_capacity(new_list.len());
        for descriptor in &new_list {
            if !seen.insert(descriptor.path.as_str()) {
                return Err(Error::DuplicatePath {
                    path: descriptor.path.clone(),
                });
            }
        }
        self.files = new_list;
        Ok(())
    }

    /// Compute file and page totals for display.
    ///
    /// Page counts are advisory; files whose count is unknown are tallied
    /// separately rather than guessed at.
    pub fn stats(&self) -> StoreStats {
        let mut stats = StoreStats {
            total_files: self.files.len(),
            ..StoreStats::default()
        };
        for file in &self.files {
            match file.pages {
                Some(pages) => stats.known_pages += pages,
                None => stats.unknown_pages += 1,
            }
        }
        stats
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.files.len() {
            Ok(())
        } else {
            Err(Error::OutOfRange {
                index,
                len: self.files.len(),
            })
        }
    }
}
