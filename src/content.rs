//! Read-only accessor over the content root directory.
//!
//! Requested paths are joined to a fixed root and canonicalized; anything
//! that escapes the root, or does not exist as a regular file, resolves to
//! `NotFound`. There is no caching and no directory listing, and symlinks
//! are constrained only by canonical-path containment.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Content-type classification for a resolved file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Eligible for variant banner rendering
    Html,
    /// Served as-is
    Other,
}

/// A successfully resolved file under the content root.
#[derive(Debug, Clone)]
pub struct ServedFile {
    pub path: PathBuf,
    pub kind: ContentKind,
}

impl ServedFile {
    pub fn is_html(&self) -> bool {
        self.kind == ContentKind::Html
    }
}

/// Stateless resolver for files under a fixed root directory.
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    /// Creates a store rooted at `root`.
    ///
    /// The root is canonicalized once here so containment checks compare
    /// canonical paths; a missing or unreadable root is a startup error.
    pub fn new<P: AsRef<Path>>(root: P) -> io::Result<Self> {
        let root = root.as_ref().canonicalize()?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a URL-decoded relative path to a file under the root.
    ///
    /// Fails with `NotFound` when the canonical path escapes the root or is
    /// not a regular file.
    pub fn resolve(&self, requested: &str) -> Result<ServedFile, AppError> {
        let candidate = self.root.join(requested);
        let canonical = candidate
            .canonicalize()
            .map_err(|_| AppError::NotFound(requested.to_string()))?;

        if !canonical.starts_with(&self.root) || !canonical.is_file() {
            return Err(AppError::NotFound(requested.to_string()));
        }

        let kind = match canonical.extension().and_then(OsStr::to_str) {
            Some(ext) if ext.eq_ignore_ascii_case("html") => ContentKind::Html,
            _ => ContentKind::Other,
        };

        Ok(ServedFile {
            path: canonical,
            kind,
        })
    }
}
