//! Navigation tree resolution and validation.
//!
//! [`Navigation::resolve`] turns the declarative theme configuration into a
//! resolved tree for a rendering surface, after validating that every
//! internal link references an existing registry route. Validation is
//! all-or-nothing and reports every unresolved link at once, so a broken
//! config can be fixed in a single pass.

use docfold_config::{SiteConfig, link_is_external};

use crate::registry::{PageRegistry, normalize_route};

/// A resolved navigation link with its final href.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    /// Display label.
    pub text: String,
    /// Final href: internal routes are prefixed with the base path,
    /// external URLs pass through unchanged.
    pub href: String,
    /// True for external URLs.
    pub external: bool,
}

/// A resolved sidebar section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarGroup {
    /// Section heading label.
    pub text: String,
    /// Optional href for the heading itself.
    pub href: Option<String>,
    /// Whether the section can be collapsed in the UI.
    pub collapsible: bool,
    /// Initial collapsed state.
    pub collapsed: bool,
    /// Section entries, in configuration order.
    pub items: Vec<NavLink>,
}

/// Resolved navigation: ordered top nav plus ordered sidebar sections.
///
/// Ordering equals configuration insertion order throughout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Navigation {
    /// Top navigation bar entries.
    pub nav: Vec<NavLink>,
    /// Sidebar sections.
    pub sidebar: Vec<SidebarGroup>,
}

/// Navigation configuration error.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// One or more links do not resolve to a registry route.
    #[error("Unresolved navigation links: {}", .0.join(", "))]
    UnresolvedLinks(Vec<String>),
}

impl Navigation {
    /// Validate the theme configuration against the registry and build the
    /// resolved tree.
    ///
    /// Every internal `nav` link, sidebar item link and sidebar section
    /// `path` must resolve to an existing registry route. External links
    /// (with a URI scheme) are exempt.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::UnresolvedLinks`] carrying all unresolved links
    /// in configuration order (first occurrence, deduplicated).
    pub fn resolve(config: &SiteConfig, registry: &PageRegistry) -> Result<Self, NavError> {
        let mut unresolved: Vec<String> = Vec::new();
        let mut check = |link: &str| {
            if link_is_external(link) {
                return;
            }
            let route = normalize_route(link);
            if !registry.contains(&route) && !unresolved.contains(&route) {
                unresolved.push(route);
            }
        };

        for item in &config.theme.nav {
            check(&item.link);
        }
        for section in &config.theme.sidebar {
            if let Some(path) = &section.path {
                check(path);
            }
            for item in &section.items {
                check(&item.link);
            }
        }

        if !unresolved.is_empty() {
            return Err(NavError::UnresolvedLinks(unresolved));
        }

        let nav = config.theme.nav.iter().map(|i| resolve_link(config, i)).collect();
        let sidebar = config
            .theme
            .sidebar
            .iter()
            .map(|section| SidebarGroup {
                text: section.text.clone(),
                href: section.path.as_deref().map(|p| href_for(&config.base, p)),
                collapsible: section.collapsible,
                collapsed: section.collapsed,
                items: section.items.iter().map(|i| resolve_link(config, i)).collect(),
            })
            .collect();

        Ok(Self { nav, sidebar })
    }
}

fn resolve_link(config: &SiteConfig, item: &docfold_config::NavItem) -> NavLink {
    NavLink {
        text: item.text.clone(),
        href: href_for(&config.base, &item.link),
        external: item.is_external(),
    }
}

/// Final href for a link: base-prefixed for internal routes.
fn href_for(base: &str, link: &str) -> String {
    if link_is_external(link) {
        return link.to_owned();
    }
    let route = normalize_route(link);
    if route == "/" {
        base.to_owned()
    } else {
        format!("{}{route}", base.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use docfold_config::SiteConfig;
    use docfold_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::registry::PageRegistry;

    const CONFIG: &str = r#"
title = "Patrones Probados"
base = "/proven-pinia-patterns/"

[[theme.nav]]
text = "Inicio"
link = "/"

[[theme.nav]]
text = "Comenzar"
link = "/intro"

[[theme.nav]]
text = "CaribesTIC"
link = "https://caribestic.github.io/"

[[theme.sidebar]]
text = "Comenzar"
path = "/"
collapsible = true

[[theme.sidebar.items]]
text = "Introducción"
link = "/intro"

[[theme.sidebar.items]]
text = "Cuándo usar Pinia"
link = "/cuando-usar-pinia"
"#;

    fn registry_with(routes: &[&str]) -> PageRegistry {
        let mut storage = MockStorage::new();
        for route in routes {
            storage = storage.with_page(*route, "Title", "Body");
        }
        PageRegistry::build(&storage, &SiteConfig::default()).unwrap()
    }

    #[test]
    fn test_resolve_closure_holds() {
        let config = SiteConfig::from_toml_str(CONFIG).unwrap();
        let registry = registry_with(&["/", "/intro", "/cuando-usar-pinia"]);

        let navigation = Navigation::resolve(&config, &registry).unwrap();

        assert_eq!(navigation.nav.len(), 3);
        assert_eq!(navigation.sidebar.len(), 1);
    }

    #[test]
    fn test_single_missing_link_listed_exactly() {
        let config = SiteConfig::from_toml_str(
            r#"
[[theme.sidebar]]
text = "Comenzar"

[[theme.sidebar.items]]
text = "Introducción"
link = "/intro"
"#,
        )
        .unwrap();
        let registry = registry_with(&[]);

        let err = Navigation::resolve(&config, &registry).unwrap_err();

        let NavError::UnresolvedLinks(links) = err;
        assert_eq!(links, vec!["/intro"]);
    }

    #[test]
    fn test_validation_succeeds_when_route_present() {
        let config = SiteConfig::from_toml_str(
            r#"
[[theme.sidebar]]
text = "Comenzar"

[[theme.sidebar.items]]
text = "Introducción"
link = "/intro"
"#,
        )
        .unwrap();
        let registry = registry_with(&["/intro"]);

        assert!(Navigation::resolve(&config, &registry).is_ok());
    }

    #[test]
    fn test_all_missing_links_reported_in_order() {
        let config = SiteConfig::from_toml_str(CONFIG).unwrap();
        let registry = registry_with(&["/intro"]);

        let err = Navigation::resolve(&config, &registry).unwrap_err();

        let NavError::UnresolvedLinks(links) = err;
        assert_eq!(links, vec!["/", "/cuando-usar-pinia"]);
    }

    #[test]
    fn test_duplicate_missing_link_reported_once() {
        let config = SiteConfig::from_toml_str(CONFIG).unwrap();
        let registry = registry_with(&["/", "/cuando-usar-pinia"]);

        let NavError::UnresolvedLinks(links) =
            Navigation::resolve(&config, &registry).unwrap_err();

        // `/intro` appears in both nav and sidebar; listed once.
        assert_eq!(links, vec!["/intro"]);
    }

    #[test]
    fn test_external_links_exempt() {
        let config = SiteConfig::from_toml_str(
            r#"
[[theme.nav]]
text = "CaribesTIC"
link = "https://caribestic.github.io/"
"#,
        )
        .unwrap();
        let registry = registry_with(&[]);

        let navigation = Navigation::resolve(&config, &registry).unwrap();

        assert!(navigation.nav[0].external);
        assert_eq!(navigation.nav[0].href, "https://caribestic.github.io/");
    }

    #[test]
    fn test_sidebar_order_matches_config() {
        let config = SiteConfig::from_toml_str(CONFIG).unwrap();
        let registry = registry_with(&["/", "/intro", "/cuando-usar-pinia"]);

        let navigation = Navigation::resolve(&config, &registry).unwrap();

        let section = &navigation.sidebar[0];
        assert_eq!(section.text, "Comenzar");
        assert!(section.collapsible);
        assert!(!section.collapsed);
        let labels: Vec<_> = section.items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(labels, vec!["Introducción", "Cuándo usar Pinia"]);
    }

    #[test]
    fn test_hrefs_base_prefixed() {
        let config = SiteConfig::from_toml_str(CONFIG).unwrap();
        let registry = registry_with(&["/", "/intro", "/cuando-usar-pinia"]);

        let navigation = Navigation::resolve(&config, &registry).unwrap();

        assert_eq!(navigation.nav[0].href, "/proven-pinia-patterns/");
        assert_eq!(navigation.nav[1].href, "/proven-pinia-patterns/intro");
        assert_eq!(
            navigation.sidebar[0].href.as_deref(),
            Some("/proven-pinia-patterns/")
        );
    }

    #[test]
    fn test_error_message_enumerates_links() {
        let config = SiteConfig::from_toml_str(CONFIG).unwrap();
        let registry = registry_with(&[]);

        let err = Navigation::resolve(&config, &registry).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Unresolved navigation links: /, /intro, /cuando-usar-pinia"
        );
    }
}
