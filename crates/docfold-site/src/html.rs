//! Page chrome assembly.
//!
//! Wraps a rendered page body in a complete HTML document: head metadata,
//! top nav bar, sidebar and an embedded page-data JSON payload.

use docfold_config::SiteConfig;
use docfold_renderer::escape_html;
use serde_json::json;

use crate::nav::{NavLink, Navigation, SidebarGroup};
use crate::registry::PageEntry;

/// Assemble the complete HTML document for a page.
pub(crate) fn page_html(
    config: &SiteConfig,
    navigation: &Navigation,
    entry: &PageEntry,
) -> String {
    let title = if config.title.is_empty() {
        entry.title.clone()
    } else {
        format!("{} | {}", entry.title, config.title)
    };
    let description = entry
        .description
        .as_deref()
        .unwrap_or(config.description.as_str());

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <meta name=\"description\" content=\"{description}\">\n\
         <script type=\"application/json\" id=\"page-data\">{page_data}</script>\n\
         </head>\n\
         <body>\n\
         {header}\
         {sidebar}\
         <main class=\"page\">\n<div class=\"content\">\n{body}</div>\n</main>\n\
         </body>\n\
         </html>\n",
        title = escape_html(&title),
        description = escape_html(description),
        page_data = page_data_json(entry),
        header = header_html(config, navigation),
        sidebar = sidebar_html(navigation),
        body = entry.html,
    )
}

/// Per-page JSON payload, mirroring the page metadata a theme consumes.
///
/// Angle brackets are escaped as `\u003c`/`\u003e` so a `</script>` inside
/// a title or description cannot terminate the embedding script element.
pub(crate) fn page_data_json(entry: &PageEntry) -> String {
    json!({
        "title": entry.title,
        "description": entry.description.as_deref().unwrap_or(""),
        "headers": entry.toc,
        "relativePath": relative_path(&entry.route),
    })
    .to_string()
    .replace('<', "\\u003c")
    .replace('>', "\\u003e")
}

/// Source-relative markdown path for a route (`/intro` -> `intro.md`).
fn relative_path(route: &str) -> String {
    if route == "/" {
        "index.md".to_owned()
    } else {
        format!("{}.md", &route[1..])
    }
}

/// Top nav bar markup.
fn header_html(config: &SiteConfig, navigation: &Navigation) -> String {
    let mut out = String::from("<header class=\"nav-bar\">\n");
    out.push_str(&format!(
        "<a class=\"site-title\" href=\"{}\">{}</a>\n",
        escape_html(&config.base),
        escape_html(&config.title),
    ));
    out.push_str("<nav class=\"top-nav\">\n");
    for link in &navigation.nav {
        out.push_str(&nav_link_html(link));
    }
    out.push_str("</nav>\n</header>\n");
    out
}

fn nav_link_html(link: &NavLink) -> String {
    if link.external {
        format!(
            "<a href=\"{}\" rel=\"noreferrer\" target=\"_blank\">{}</a>\n",
            escape_html(&link.href),
            escape_html(&link.text),
        )
    } else {
        format!(
            "<a href=\"{}\">{}</a>\n",
            escape_html(&link.href),
            escape_html(&link.text),
        )
    }
}

/// Sidebar markup: one section element per group, items in config order.
fn sidebar_html(navigation: &Navigation) -> String {
    if navigation.sidebar.is_empty() {
        return String::new();
    }

    let mut out = String::from("<aside class=\"sidebar\">\n");
    for group in &navigation.sidebar {
        out.push_str(&sidebar_group_html(group));
    }
    out.push_str("</aside>\n");
    out
}

fn sidebar_group_html(group: &SidebarGroup) -> String {
    let mut classes = String::from("sidebar-group");
    if group.collapsible {
        classes.push_str(" collapsible");
    }
    if group.collapsed {
        classes.push_str(" collapsed");
    }

    let heading = match &group.href {
        Some(href) => format!(
            "<a href=\"{}\">{}</a>",
            escape_html(href),
            escape_html(&group.text)
        ),
        None => escape_html(&group.text),
    };

    let mut out = format!(
        "<section class=\"{classes}\">\n<p class=\"sidebar-group-title\">{heading}</p>\n<ul>\n"
    );
    for item in &group.items {
        out.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            escape_html(&item.href),
            escape_html(&item.text),
        ));
    }
    out.push_str("</ul>\n</section>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> PageEntry {
        PageEntry {
            route: "/intro".to_owned(),
            title: "Introducción".to_owned(),
            description: Some("Bienvenida".to_owned()),
            html: "<h1 id=\"introduccion\">Introducción</h1>\n".to_owned(),
            toc: Vec::new(),
        }
    }

    fn navigation() -> Navigation {
        Navigation {
            nav: vec![
                NavLink {
                    text: "Inicio".to_owned(),
                    href: "/proven-pinia-patterns/".to_owned(),
                    external: false,
                },
                NavLink {
                    text: "CaribesTIC".to_owned(),
                    href: "https://caribestic.github.io/".to_owned(),
                    external: true,
                },
            ],
            sidebar: vec![SidebarGroup {
                text: "Comenzar".to_owned(),
                href: None,
                collapsible: true,
                collapsed: false,
                items: vec![NavLink {
                    text: "Introducción".to_owned(),
                    href: "/proven-pinia-patterns/intro".to_owned(),
                    external: false,
                }],
            }],
        }
    }

    fn config() -> SiteConfig {
        SiteConfig {
            title: "Patrones Probados".to_owned(),
            description: "de Pinia".to_owned(),
            base: "/proven-pinia-patterns/".to_owned(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_page_html_structure() {
        let html = page_html(&config(), &navigation(), &entry());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Introducción | Patrones Probados</title>"));
        assert!(html.contains("<meta name=\"description\" content=\"Bienvenida\">"));
        assert!(html.contains("<h1 id=\"introduccion\">Introducción</h1>"));
    }

    #[test]
    fn test_nav_bar_links() {
        let html = page_html(&config(), &navigation(), &entry());

        assert!(html.contains("<a href=\"/proven-pinia-patterns/\">Inicio</a>"));
        assert!(html.contains(
            "<a href=\"https://caribestic.github.io/\" rel=\"noreferrer\" target=\"_blank\">CaribesTIC</a>"
        ));
    }

    #[test]
    fn test_sidebar_markup() {
        let html = page_html(&config(), &navigation(), &entry());

        assert!(html.contains("<section class=\"sidebar-group collapsible\">"));
        assert!(html.contains("<p class=\"sidebar-group-title\">Comenzar</p>"));
        assert!(html.contains("<li><a href=\"/proven-pinia-patterns/intro\">Introducción</a></li>"));
    }

    #[test]
    fn test_empty_sidebar_omitted() {
        let navigation = Navigation::default();
        let html = page_html(&config(), &navigation, &entry());

        assert!(!html.contains("<aside"));
    }

    #[test]
    fn test_page_data_json() {
        let data = page_data_json(&entry());

        assert!(data.contains("\"title\":\"Introducción\""));
        assert!(data.contains("\"relativePath\":\"intro.md\""));
    }

    #[test]
    fn test_relative_path_root() {
        assert_eq!(relative_path("/"), "index.md");
        assert_eq!(relative_path("/a/b"), "a/b.md");
    }

    #[test]
    fn test_page_data_escapes_angle_brackets() {
        let mut entry = entry();
        entry.title = "Hola </script><script>alert(1)</script>".to_owned();

        let data = page_data_json(&entry);

        assert!(!data.contains('<'));
        let value: serde_json::Value = serde_json::from_str(&data).unwrap();
        assert_eq!(value["title"], "Hola </script><script>alert(1)</script>");
    }

    #[test]
    fn test_page_data_survives_script_title_in_document() {
        let mut entry = entry();
        entry.title = "Hola </script><script>alert(1)</script>".to_owned();

        let html = page_html(&config(), &navigation(), &entry);

        let marker = "id=\"page-data\">";
        let start = html.find(marker).unwrap() + marker.len();
        let end = start + html[start..].find("</script>").unwrap();
        let value: serde_json::Value = serde_json::from_str(&html[start..end]).unwrap();
        assert_eq!(value["title"], "Hola </script><script>alert(1)</script>");
    }
}
