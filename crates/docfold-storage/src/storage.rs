//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for abstracting content scanning and
//! retrieval, along with [`StorageError`] for unified error handling across
//! backends.
//!
//! # Route Convention
//!
//! All path parameters in Storage methods are **content routes**, not file
//! paths:
//! - `"/"` - root (home page)
//! - `"/intro"` - standalone page
//! - `"/guide/setup"` - nested page
//!
//! Routes carry a leading slash and no trailing slash (the root route is the
//! single slash). Storage implementations handle the mapping from routes to
//! their internal storage format.

use std::path::{Path, PathBuf};

/// Content document returned by a storage scan.
///
/// The title is already resolved by the backend using the precedence
/// frontmatter `title` > first H1 heading > filename.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// Content route (e.g., "/", "/intro", "/guide/setup").
    pub route: String,
    /// Resolved document title.
    pub title: String,
    /// Description from frontmatter, if any.
    pub description: Option<String>,
}

/// Semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid route or path (e.g., traversal outside the source root).
    InvalidPath,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    kind: StorageErrorKind,
    path: Option<PathBuf>,
    backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Semantic error category.
    #[must_use]
    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }

    /// Path context, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Backend identifier, if any.
    #[must_use]
    pub fn backend(&self) -> Option<&'static str> {
        self.backend
    }

    /// Create a not found error with path context.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Storage abstraction for content scanning and retrieval.
///
/// Provides a unified interface for accessing documents regardless of
/// backend. Implementations handle backend-specific details like title
/// extraction and route resolution.
pub trait Storage: Send + Sync {
    /// Scan and return all documents, sorted by route.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if scanning fails (e.g., permission denied,
    /// malformed frontmatter).
    fn scan(&self) -> Result<Vec<Document>, StorageError>;

    /// Read the raw content for a route.
    ///
    /// Returns the content as stored, frontmatter included. Use
    /// [`split_frontmatter`](crate::split_frontmatter) to separate it.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the document doesn't exist or can't be read.
    fn read(&self, route: &str) -> Result<String, StorageError>;

    /// Check if a document exists at the given route.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, route: &str) -> bool;

    /// Get modification time as seconds since Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the document doesn't exist or mtime can't
    /// be retrieved.
    fn mtime(&self, route: &str) -> Result<f64, StorageError>;
}
