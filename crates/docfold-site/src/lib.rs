//! Page registry, navigation and static build for docfold.
//!
//! This crate provides:
//! - [`PageRegistry`]: build-time mapping from content routes to rendered pages
//! - [`Navigation`]: validated top-nav and sidebar structures
//! - [`Site`]: the facade tying configuration, registry and navigation
//!   together, with static HTML output
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::{Path, PathBuf};
//! use docfold_config::SiteConfig;
//! use docfold_site::Site;
//! use docfold_storage::FsStorage;
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! let config = SiteConfig::load(Some(Path::new("docfold.toml")))?;
//! let site = Site::load(&storage, config)?;
//!
//! // View-time lookup
//! let page = site.render("/intro")?;
//! println!("{}", page.title);
//!
//! // Static output
//! let stats = site.build(Path::new("dist"))?;
//! println!("{} pages", stats.pages);
//! # Ok(())
//! # }
//! ```

pub(crate) mod builder;
pub(crate) mod html;
pub(crate) mod nav;
pub(crate) mod registry;
pub(crate) mod site;

pub use builder::{BuildError, BuildStats};
pub use nav::{NavError, NavLink, Navigation, SidebarGroup};
pub use registry::{PageEntry, PageRegistry, RegistryError, normalize_route};
pub use site::{Site, SiteError};
