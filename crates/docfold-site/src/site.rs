//! Site facade.
//!
//! [`Site`] ties configuration, page registry and navigation together.
//! Construction is fail-fast: registry build errors and unresolved
//! navigation links abort the load. Once constructed the site is immutable
//! and safe for unlimited concurrent readers.

use std::path::Path;

use docfold_config::{ConfigError, SiteConfig};
use docfold_storage::Storage;

use crate::builder::{self, BuildError, BuildStats};
use crate::html;
use crate::nav::{NavError, Navigation};
use crate::registry::{PageEntry, PageRegistry, RegistryError};

/// Error from site loading or rendering.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Configuration failure.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Registry build or lookup failure (including Not-Found).
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// Navigation validation failure.
    #[error(transparent)]
    Navigation(#[from] NavError),
}

/// A fully loaded documentation site.
///
/// Holds the immutable configuration, the page registry and the resolved
/// navigation tree. All accessors are read-only.
#[derive(Debug)]
pub struct Site {
    config: SiteConfig,
    registry: PageRegistry,
    navigation: Navigation,
}

impl Site {
    /// Load a site: build the registry and resolve navigation.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError`] if configuration validation fails, any source
    /// document fails to render, or a navigation link does not resolve.
    pub fn load(storage: &dyn Storage, config: SiteConfig) -> Result<Self, SiteError> {
        config.validate()?;
        let registry = PageRegistry::build(storage, &config)?;
        let navigation = Navigation::resolve(&config, &registry)?;

        tracing::info!(
            pages = registry.len(),
            title = %config.title,
            base = %config.base,
            "Site loaded"
        );

        Ok(Self {
            config,
            registry,
            navigation,
        })
    }

    /// Look up the page for a route.
    ///
    /// # Errors
    ///
    /// Returns a Not-Found error for unknown routes.
    pub fn render(&self, route: &str) -> Result<&PageEntry, SiteError> {
        Ok(self.registry.resolve(route)?)
    }

    /// Assemble the complete HTML document for a route.
    ///
    /// # Errors
    ///
    /// Returns a Not-Found error for unknown routes.
    pub fn page_html(&self, route: &str) -> Result<String, SiteError> {
        let entry = self.registry.resolve(route)?;
        Ok(html::page_html(&self.config, &self.navigation, entry))
    }

    /// Write the whole site as static HTML under `out_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] on I/O failure.
    pub fn build(&self, out_dir: &Path) -> Result<BuildStats, BuildError> {
        builder::build(self, out_dir)
    }

    /// The resolved navigation tree.
    #[must_use]
    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    /// The page registry.
    #[must_use]
    pub fn registry(&self) -> &PageRegistry {
        &self.registry
    }

    /// The site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }
}
