//! Configuration management for docfold.
//!
//! Parses `docfold.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! The configuration carries the site identity (`title`, `description`,
//! `base`) and the navigation tree (`theme.nav`, `theme.sidebar`).
//! Everything is validated eagerly at load time; link resolution against
//! the page registry happens later in `docfold-site`.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docfold.toml";

/// Site configuration.
///
/// The aggregate root owning site identity and navigation layout.
/// Immutable after loading; constructed once and passed by reference
/// to the registry builder and the navigation validator.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title, shown in the nav bar and page `<title>`.
    pub title: String,
    /// Site description for page metadata.
    pub description: String,
    /// Base path prefix all output routes live under.
    ///
    /// Must start and end with `/` (default `/`).
    pub base: String,
    /// Theme configuration: top nav and sidebar.
    #[serde(alias = "themeConfig")]
    pub theme: ThemeConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            base: "/".to_owned(),
            theme: ThemeConfig::default(),
            config_path: None,
        }
    }
}

/// Theme configuration: navigation structures handed to the renderer.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Top navigation bar entries, in display order.
    pub nav: Vec<NavItem>,
    /// Sidebar sections, in display order.
    pub sidebar: Vec<SidebarSection>,
}

/// A single navigation entry: display label plus link target.
///
/// Ordering is significant; display order equals config order.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NavItem {
    /// Display label.
    pub text: String,
    /// Link target: an internal route (`/intro`) or an external URL.
    pub link: String,
}

impl NavItem {
    /// True if the link points outside the site (has a URI scheme).
    ///
    /// External links are exempt from registry validation.
    #[must_use]
    pub fn is_external(&self) -> bool {
        link_is_external(&self.link)
    }
}

/// True if a link has a URI scheme (e.g. `https:`, `mailto:`).
#[must_use]
pub fn link_is_external(link: &str) -> bool {
    let Some((scheme, _)) = link.split_once(':') else {
        return false;
    };
    !scheme.is_empty()
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
}

/// A sidebar section: titled, ordered group of navigation items.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SidebarSection {
    /// Section heading label.
    pub text: String,
    /// Optional link for the heading itself; must resolve if present.
    pub path: Option<String>,
    /// Whether the section can be collapsed in the UI.
    pub collapsible: bool,
    /// Initial collapsed state.
    pub collapsed: bool,
    /// Section entries, in display order.
    pub items: Vec<NavItem>,
}

impl Default for SidebarSection {
    fn default() -> Self {
        Self {
            text: String::new(),
            path: None,
            collapsible: false,
            collapsed: false,
            items: Vec::new(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl SiteConfig {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docfold.toml` in the current directory
    /// and parents, falling back to the default config.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist, or if
    /// parsing or validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read, parsed, or validated.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Search for a config file in the current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Normalize fields before validation.
    ///
    /// An empty base becomes `/`; a missing trailing slash is appended so
    /// `"/docs"` and `"/docs/"` configure the same prefix.
    fn normalize(&mut self) {
        if self.base.is_empty() {
            self.base = "/".to_owned();
        }
        if !self.base.ends_with('/') {
            self.base.push('/');
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` describing the first offending
    /// field. Link resolution against the registry is not checked here;
    /// that belongs to navigation validation in `docfold-site`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "base must start with '/': {:?}",
                self.base
            )));
        }
        for (i, item) in self.theme.nav.iter().enumerate() {
            require_non_empty(&item.text, &format!("theme.nav[{i}].text"))?;
            require_non_empty(&item.link, &format!("theme.nav[{i}].link"))?;
        }
        for (i, section) in self.theme.sidebar.iter().enumerate() {
            require_non_empty(&section.text, &format!("theme.sidebar[{i}].text"))?;
            for (j, item) in section.items.iter().enumerate() {
                require_non_empty(&item.text, &format!("theme.sidebar[{i}].items[{j}].text"))?;
                require_non_empty(&item.link, &format!("theme.sidebar[{i}].items[{j}].link"))?;
            }
        }
        Ok(())
    }
}
