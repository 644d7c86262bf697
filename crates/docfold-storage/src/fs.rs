//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading markdown content from the local
//! filesystem with mtime-based caching for title extraction.

use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use regex::Regex;

use crate::frontmatter::split_frontmatter;
use crate::storage::{Document, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Cached file summary for incremental title extraction.
#[derive(Clone, Debug)]
struct CachedFile {
    /// File modification time.
    mtime: SystemTime,
    /// Resolved title.
    title: String,
    /// Frontmatter description.
    description: Option<String>,
}

/// Filesystem storage implementation.
///
/// Scans a source directory recursively for markdown files. Titles are
/// resolved with the precedence frontmatter > first H1 > filename, using
/// mtime caching to avoid re-reading unchanged files on rescans.
///
/// # Route Mapping
///
/// - `index.md` maps to its directory's route (`/` at the root)
/// - `name.md` maps to `/…/name`
/// - Hidden entries (leading dot) and non-markdown files are ignored
pub struct FsStorage {
    /// Root directory for content storage.
    source_dir: PathBuf,
    /// Regex for extracting the first H1 heading.
    h1_regex: Regex,
    /// Mtime cache for incremental title extraction.
    scan_cache: Mutex<HashMap<PathBuf, CachedFile>>,
}

impl FsStorage {
    /// Create a new filesystem storage.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Root directory containing markdown files
    ///
    /// # Panics
    ///
    /// Panics if the internal regex for H1 heading extraction fails to
    /// compile. This should never happen as the regex is a compile-time
    /// constant.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self {
            source_dir,
            h1_regex: Regex::new(r"(?m)^#\s+(.+)$").unwrap(),
            scan_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve a route to candidate source files.
    ///
    /// Routes resolve to `<rel>.md` first, then `<rel>/index.md`; the root
    /// route resolves to `index.md` only.
    ///
    /// Rejects routes without a leading slash and routes containing parent
    /// directory components (`..`) to prevent escaping the source root.
    fn candidates(&self, route: &str) -> Result<Vec<PathBuf>, StorageError> {
        let Some(rel) = route.strip_prefix('/') else {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(route)
                .with_backend(BACKEND));
        };

        let rel_path = Path::new(rel);
        let has_parent_dir = rel_path
            .components()
            .any(|c| matches!(c, Component::ParentDir));
        if has_parent_dir {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(route)
                .with_backend(BACKEND));
        }

        if rel.is_empty() {
            return Ok(vec![self.source_dir.join("index.md")]);
        }

        Ok(vec![
            self.source_dir.join(format!("{rel}.md")),
            self.source_dir.join(rel).join("index.md"),
        ])
    }

    /// Resolve a route to its existing source file.
    fn source_path(&self, route: &str) -> Result<PathBuf, StorageError> {
        let candidates = self.candidates(route)?;
        candidates
            .iter()
            .find(|p| p.is_file())
            .cloned()
            .ok_or_else(|| StorageError::not_found(route).with_backend(BACKEND))
    }

    /// Compute the route for a markdown file under the source root.
    fn route_for(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.source_dir).unwrap_or(path);
        let mut parts: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();

        if let Some(last) = parts.last_mut() {
            if *last == "index.md" {
                parts.pop();
            } else if let Some(stem) = last.strip_suffix(".md") {
                *last = stem.to_owned();
            }
        }

        if parts.is_empty() {
            "/".to_owned()
        } else {
            format!("/{}", parts.join("/"))
        }
    }

    /// Recursively collect markdown documents under `dir`.
    fn walk(&self, dir: &Path, docs: &mut Vec<Document>) -> Result<(), StorageError> {
        let entries = fs::read_dir(dir)
            .map_err(|e| StorageError::io(e, Some(dir.to_path_buf())).with_backend(BACKEND))?;

        for entry in entries {
            let entry = entry
                .map_err(|e| StorageError::io(e, Some(dir.to_path_buf())).with_backend(BACKEND))?;
            let name = entry.file_name();
            if name.to_string_lossy().starts_with('.') {
                continue;
            }

            let path = entry.path();
            if path.is_dir() {
                self.walk(&path, docs)?;
            } else if path.extension().is_some_and(|ext| ext == "md") {
                let route = self.route_for(&path);
                let (title, description) = self.file_summary(&path, &route)?;
                docs.push(Document {
                    route,
                    title,
                    description,
                });
            }
        }

        Ok(())
    }

    /// Resolve title and description for a file, using the mtime cache.
    fn file_summary(
        &self,
        path: &Path,
        route: &str,
    ) -> Result<(String, Option<String>), StorageError> {
        let metadata = fs::metadata(path)
            .map_err(|e| StorageError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))?;
        let mtime = metadata
            .modified()
            .map_err(|e| StorageError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))?;

        if let Some(cached) = self.scan_cache.lock().unwrap().get(path) {
            if cached.mtime == mtime {
                return Ok((cached.title.clone(), cached.description.clone()));
            }
        }

        let content = fs::read_to_string(path)
            .map_err(|e| StorageError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))?;
        let (frontmatter, body) = split_frontmatter(&content).map_err(|e| {
            StorageError::new(StorageErrorKind::Other)
                .with_path(path)
                .with_backend(BACKEND)
                .with_source(e)
        })?;

        let frontmatter = frontmatter.unwrap_or_default();
        let title = frontmatter
            .title
            .or_else(|| self.extract_h1(body))
            .unwrap_or_else(|| fallback_title(route));
        let description = frontmatter.description;

        self.scan_cache.lock().unwrap().insert(
            path.to_path_buf(),
            CachedFile {
                mtime,
                title: title.clone(),
                description: description.clone(),
            },
        );

        Ok((title, description))
    }

    /// Extract the first H1 heading text.
    fn extract_h1(&self, body: &str) -> Option<String> {
        self.h1_regex
            .captures(body)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_owned())
    }
}

/// Derive a display title from the last route segment.
///
/// `/cuando-usar-pinia` becomes `Cuando usar pinia`; the root route
/// falls back to `Home`.
fn fallback_title(route: &str) -> String {
    let segment = route.rsplit('/').next().unwrap_or_default();
    if segment.is_empty() {
        return "Home".to_owned();
    }

    let spaced = segment.replace('-', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}

impl Storage for FsStorage {
    fn scan(&self) -> Result<Vec<Document>, StorageError> {
        let mut docs = Vec::new();
        self.walk(&self.source_dir, &mut docs)?;
        docs.sort_by(|a, b| a.route.cmp(&b.route));
        tracing::debug!(count = docs.len(), "Scanned source directory");
        Ok(docs)
    }

    fn read(&self, route: &str) -> Result<String, StorageError> {
        let path = self.source_path(route)?;
        fs::read_to_string(&path).map_err(|e| StorageError::io(e, Some(path)).with_backend(BACKEND))
    }

    fn exists(&self, route: &str) -> bool {
        self.source_path(route).is_ok()
    }

    fn mtime(&self, route: &str) -> Result<f64, StorageError> {
        let path = self.source_path(route)?;
        let metadata = fs::metadata(&path)
            .map_err(|e| StorageError::io(e, Some(path.clone())).with_backend(BACKEND))?;
        let modified = metadata
            .modified()
            .map_err(|e| StorageError::io(e, Some(path.clone())).with_backend(BACKEND))?;
        let duration = modified.duration_since(UNIX_EPOCH).map_err(|e| {
            StorageError::new(StorageErrorKind::Other)
                .with_path(path)
                .with_backend(BACKEND)
                .with_source(e)
        })?;
        Ok(duration.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn storage_with(files: &[(&str, &str)]) -> (TempDir, FsStorage) {
        let dir = tempfile::tempdir().unwrap();
        for (rel, content) in files {
            let path = dir.path().join(rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
        let storage = FsStorage::new(dir.path().to_path_buf());
        (dir, storage)
    }

    #[test]
    fn test_scan_routes_and_titles() {
        let (_dir, storage) = storage_with(&[
            ("index.md", "# Inicio\n\nBienvenido."),
            ("intro.md", "# Introducción\n\nTexto."),
            (
                "todo-con-pinia/definiendo-la-tienda.md",
                "# Definiendo la Tienda\n",
            ),
        ]);

        let docs = storage.scan().unwrap();
        let routes: Vec<_> = docs.iter().map(|d| d.route.as_str()).collect();

        assert_eq!(
            routes,
            vec!["/", "/intro", "/todo-con-pinia/definiendo-la-tienda"]
        );
        assert_eq!(docs[0].title, "Inicio");
        assert_eq!(docs[1].title, "Introducción");
    }

    #[test]
    fn test_scan_nested_index() {
        let (_dir, storage) = storage_with(&[("guia/index.md", "# Guía\n")]);

        let docs = storage.scan().unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].route, "/guia");
        assert_eq!(docs[0].title, "Guía");
    }

    #[test]
    fn test_scan_frontmatter_title_wins() {
        let (_dir, storage) =
            storage_with(&[("intro.md", "---\ntitle: Meta Title\n---\n# H1 Title\n")]);

        let docs = storage.scan().unwrap();

        assert_eq!(docs[0].title, "Meta Title");
    }

    #[test]
    fn test_scan_filename_fallback_title() {
        let (_dir, storage) = storage_with(&[("cuando-usar-pinia.md", "Sin encabezado.\n")]);

        let docs = storage.scan().unwrap();

        assert_eq!(docs[0].title, "Cuando usar pinia");
    }

    #[test]
    fn test_scan_ignores_hidden_and_non_markdown() {
        let (_dir, storage) = storage_with(&[
            ("intro.md", "# Introducción\n"),
            (".draft.md", "# Draft\n"),
            ("logo.png", "not markdown"),
        ]);

        let docs = storage.scan().unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].route, "/intro");
    }

    #[test]
    fn test_scan_twice_identical() {
        let (_dir, storage) = storage_with(&[
            ("index.md", "# Inicio\n"),
            ("intro.md", "# Introducción\n"),
        ]);

        let first = storage.scan().unwrap();
        let second = storage.scan().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_read_page_and_index_variants() {
        let (_dir, storage) = storage_with(&[
            ("intro.md", "# Introducción\n"),
            ("guia/index.md", "# Guía\n"),
        ]);

        assert_eq!(storage.read("/intro").unwrap(), "# Introducción\n");
        assert_eq!(storage.read("/guia").unwrap(), "# Guía\n");
    }

    #[test]
    fn test_read_missing() {
        let (_dir, storage) = storage_with(&[]);

        let err = storage.read("/nonexistent").unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::NotFound);
        assert_eq!(err.backend(), Some(BACKEND));
    }

    #[test]
    fn test_parent_dir_rejected() {
        let (_dir, storage) = storage_with(&[]);

        let err = storage.read("/../etc/passwd").unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_route_without_leading_slash_rejected() {
        let (_dir, storage) = storage_with(&[("intro.md", "# Introducción\n")]);

        let err = storage.read("intro").unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_exists() {
        let (_dir, storage) = storage_with(&[("intro.md", "# Introducción\n")]);

        assert!(storage.exists("/intro"));
        assert!(!storage.exists("/nonexistent"));
    }

    #[test]
    fn test_mtime() {
        let (_dir, storage) = storage_with(&[("intro.md", "# Introducción\n")]);

        let mtime = storage.mtime("/intro").unwrap();

        assert!(mtime > 0.0);
    }

    #[test]
    fn test_malformed_frontmatter_fails_scan() {
        let (_dir, storage) = storage_with(&[("intro.md", "---\ntitle: [unclosed\n---\n")]);

        let err = storage.scan().unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::Other);
    }
}
