//! Build-time page registry.
//!
//! [`PageRegistry`] maps content routes to rendered [`PageEntry`] values.
//! Built once from a [`Storage`] backend, immutable afterwards; lookups are
//! O(1) through a route index. Entries are kept sorted by route so that
//! rebuilding from identical content yields an identical registry.

use std::collections::HashMap;

use docfold_config::SiteConfig;
use docfold_renderer::{MarkdownRenderer, TocEntry};
use docfold_storage::{Storage, StorageError, split_frontmatter};

/// One resolved, renderable content unit.
///
/// Immutable once built; created at build time, never mutated, replaced
/// wholesale on rebuild.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageEntry {
    /// Content route (unique key), e.g. `/` or `/intro`.
    pub route: String,
    /// Resolved page title.
    pub title: String,
    /// Page description from frontmatter, if any.
    pub description: Option<String>,
    /// Rendered HTML body.
    pub html: String,
    /// Heading outline (H2/H3).
    pub toc: Vec<TocEntry>,
}

/// Error from registry construction or lookup.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Two source files map to the same route (e.g. `a.md` and `a/index.md`).
    #[error("Duplicate route {route}: two source files map to the same page")]
    DuplicateRoute {
        /// The conflicting route.
        route: String,
    },
    /// Requested route has no matching entry.
    #[error("Page not found: {0}")]
    PageNotFound(String),
    /// Frontmatter block failed to parse.
    #[error("Invalid frontmatter for {route}: {source}")]
    Frontmatter {
        /// Route of the offending document.
        route: String,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
    /// Storage backend failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Normalize a route to its canonical form.
///
/// Ensures a leading slash, strips any trailing slash, and maps the empty
/// string to `/`. `intro`, `/intro` and `/intro/` all normalize to `/intro`.
#[must_use]
pub fn normalize_route(route: &str) -> String {
    let trimmed = route.trim();
    let mut normalized = if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    };
    while normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

/// Build-time lookup table from route to rendered content.
///
/// Read-only after construction; safe for unlimited concurrent readers.
#[derive(Debug)]
pub struct PageRegistry {
    entries: Vec<PageEntry>,
    route_index: HashMap<String, usize>,
}

impl PageRegistry {
    /// Build the registry from a storage backend.
    ///
    /// Scans all documents, renders each markdown body, and indexes the
    /// entries by route. Fail-fast: any unreadable document, malformed
    /// frontmatter or duplicate route aborts the build.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] on storage failure, frontmatter parse
    /// failure, or duplicate routes.
    pub fn build(storage: &dyn Storage, config: &SiteConfig) -> Result<Self, RegistryError> {
        let renderer = MarkdownRenderer::new()
            .with_title_extraction()
            .with_base_path(config.base.clone());

        let documents = storage.scan()?;
        let mut entries: Vec<PageEntry> = Vec::with_capacity(documents.len());
        let mut route_index = HashMap::with_capacity(documents.len());

        for document in documents {
            let route = normalize_route(&document.route);
            let raw = storage.read(&route)?;
            let (_, body) = split_frontmatter(&raw).map_err(|e| RegistryError::Frontmatter {
                route: route.clone(),
                source: e,
            })?;

            let result = renderer.render_markdown(body);
            for warning in &result.warnings {
                tracing::warn!(route = %route, warning = %warning, "Render warning");
            }

            if route_index.insert(route.clone(), entries.len()).is_some() {
                return Err(RegistryError::DuplicateRoute { route });
            }
            entries.push(PageEntry {
                route,
                title: document.title,
                description: document.description,
                html: result.html,
                toc: result.toc,
            });
        }

        // Scan order is backend-defined; sort so rebuilds are byte-identical.
        entries.sort_by(|a, b| a.route.cmp(&b.route));
        let route_index = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.route.clone(), i))
            .collect();

        tracing::info!(pages = entries.len(), "Built page registry");
        Ok(Self {
            entries,
            route_index,
        })
    }

    /// Get a page by route, or `None` if absent.
    ///
    /// The route is normalized before lookup.
    #[must_use]
    pub fn get(&self, route: &str) -> Option<&PageEntry> {
        self.route_index
            .get(&normalize_route(route))
            .map(|&i| &self.entries[i])
    }

    /// Get a page by route, failing with Not-Found.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::PageNotFound`] if no entry matches.
    pub fn resolve(&self, route: &str) -> Result<&PageEntry, RegistryError> {
        self.get(route)
            .ok_or_else(|| RegistryError::PageNotFound(normalize_route(route)))
    }

    /// True if a route resolves to an entry.
    #[must_use]
    pub fn contains(&self, route: &str) -> bool {
        self.route_index.contains_key(&normalize_route(route))
    }

    /// All entries, sorted by route.
    #[must_use]
    pub fn entries(&self) -> &[PageEntry] {
        &self.entries
    }

    /// All routes, sorted.
    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.route.as_str())
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the registry holds no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
