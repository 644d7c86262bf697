//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::storage::{Document, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores documents and content in memory. Use the builder methods
/// to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use docfold_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_page("/intro", "Introducción", "# Introducción\n\nTexto.");
///
/// let docs = storage.scan().unwrap();
/// let content = storage.read("/intro").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    documents: RwLock<Vec<Document>>,
    contents: RwLock<HashMap<String, String>>,
    mtimes: RwLock<HashMap<String, f64>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with the given route and title, without content.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_document(self, route: impl Into<String>, title: impl Into<String>) -> Self {
        self.documents.write().unwrap().push(Document {
            route: route.into(),
            title: title.into(),
            description: None,
        });
        self
    }

    /// Add content for a route.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_content(self, route: impl Into<String>, content: impl Into<String>) -> Self {
        self.contents
            .write()
            .unwrap()
            .insert(route.into(), content.into());
        self
    }

    /// Add a document with both title and content.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(
        self,
        route: impl Into<String> + Clone,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.with_document(route.clone(), title).with_content(route, content)
    }

    /// Set a description on the most recently added document.
    ///
    /// # Panics
    ///
    /// Panics if no document was added yet or the internal lock is poisoned.
    #[must_use]
    pub fn with_description(self, description: impl Into<String>) -> Self {
        self.documents
            .write()
            .unwrap()
            .last_mut()
            .expect("with_description requires a prior document")
            .description = Some(description.into());
        self
    }

    /// Set modification time for a route.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_mtime(self, route: impl Into<String>, mtime: f64) -> Self {
        self.mtimes.write().unwrap().insert(route.into(), mtime);
        self
    }
}

impl Storage for MockStorage {
    fn scan(&self) -> Result<Vec<Document>, StorageError> {
        let mut docs = self.documents.read().unwrap().clone();
        docs.sort_by(|a, b| a.route.cmp(&b.route));
        Ok(docs)
    }

    fn read(&self, route: &str) -> Result<String, StorageError> {
        self.contents
            .read()
            .unwrap()
            .get(route)
            .cloned()
            .ok_or_else(|| {
                StorageError::new(StorageErrorKind::NotFound)
                    .with_path(route)
                    .with_backend(BACKEND)
            })
    }

    fn exists(&self, route: &str) -> bool {
        self.contents.read().unwrap().contains_key(route)
    }

    fn mtime(&self, route: &str) -> Result<f64, StorageError> {
        self.mtimes
            .read()
            .unwrap()
            .get(route)
            .copied()
            .ok_or_else(|| {
                StorageError::new(StorageErrorKind::NotFound)
                    .with_path(route)
                    .with_backend(BACKEND)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_mock_storage_is_send_sync() {
        assert_send_sync::<MockStorage>();
    }

    #[test]
    fn test_new_empty() {
        let storage = MockStorage::new();

        assert!(storage.scan().unwrap().is_empty());
    }

    #[test]
    fn test_with_page() {
        let storage = MockStorage::new().with_page("/intro", "Introducción", "# Introducción\n");

        let docs = storage.scan().unwrap();
        let content = storage.read("/intro").unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].route, "/intro");
        assert_eq!(docs[0].title, "Introducción");
        assert_eq!(content, "# Introducción\n");
    }

    #[test]
    fn test_with_description() {
        let storage = MockStorage::new()
            .with_document("/intro", "Introducción")
            .with_description("Bienvenida");

        let docs = storage.scan().unwrap();

        assert_eq!(docs[0].description.as_deref(), Some("Bienvenida"));
    }

    #[test]
    fn test_scan_sorted_by_route() {
        let storage = MockStorage::new()
            .with_document("/zeta", "Zeta")
            .with_document("/", "Inicio")
            .with_document("/intro", "Introducción");

        let routes: Vec<_> = storage
            .scan()
            .unwrap()
            .into_iter()
            .map(|d| d.route)
            .collect();

        assert_eq!(routes, vec!["/", "/intro", "/zeta"]);
    }

    #[test]
    fn test_read_missing() {
        let storage = MockStorage::new();

        let err = storage.read("/missing").unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::NotFound);
        assert_eq!(err.backend(), Some("Mock"));
    }

    #[test]
    fn test_exists() {
        let storage = MockStorage::new().with_content("/intro", "content");

        assert!(storage.exists("/intro"));
        assert!(!storage.exists("/missing"));
    }

    #[test]
    fn test_with_mtime() {
        let storage = MockStorage::new().with_mtime("/intro", 1_234_567_890.0);

        let mtime = storage.mtime("/intro").unwrap();

        assert!((mtime - 1_234_567_890.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mtime_missing() {
        let storage = MockStorage::new();

        assert_eq!(
            storage.mtime("/missing").unwrap_err().kind(),
            StorageErrorKind::NotFound
        );
    }
}
