//! Markdown renderer producing HTML page bodies.

use std::collections::HashSet;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use serde::Serialize;

use crate::container;
use crate::slug::slugify;

/// Table-of-contents entry collected during rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading level (2 or 3).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor slug (without the `#`).
    pub anchor: String,
}

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Title extracted from the first H1 heading (if enabled).
    pub title: Option<String>,
    /// Table of contents entries (H2 and H3 headings).
    pub toc: Vec<TocEntry>,
    /// Warnings generated during conversion (e.g., unclosed containers).
    pub warnings: Vec<String>,
}

/// Markdown-to-HTML renderer.
///
/// Handles heading anchor generation, optional title extraction from the
/// first H1, TOC collection, custom `:::` containers, and rewriting of
/// root-relative links under the site base path.
///
/// Stateless across calls; one renderer can render any number of documents.
#[derive(Clone, Debug, Default)]
pub struct MarkdownRenderer {
    base_path: Option<String>,
    extract_title: bool,
    gfm: bool,
}

impl MarkdownRenderer {
    /// Create a new renderer with GFM enabled by default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_path: None,
            extract_title: false,
            gfm: true,
        }
    }

    /// Enable title extraction from the first H1 heading.
    ///
    /// The H1 is extracted as the title and still rendered.
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.extract_title = true;
        self
    }

    /// Set the base path prefix for rewriting root-relative links.
    ///
    /// A link `/intro` becomes `<base>/intro`.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports
    /// tables, strikethrough and task lists.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render markdown text to HTML.
    #[must_use]
    pub fn render_markdown(&self, markdown: &str) -> RenderResult {
        let (preprocessed, warnings) = container::preprocess(markdown);
        let events: Vec<Event<'_>> = Parser::new_ext(&preprocessed, self.parser_options()).collect();

        let mut out_events: Vec<Event<'_>> = Vec::with_capacity(events.len());
        let mut toc = Vec::new();
        let mut title = None;
        let mut seen_slugs: HashSet<String> = HashSet::new();

        for (i, event) in events.iter().enumerate() {
            match event {
                Event::Start(Tag::Heading {
                    level,
                    classes,
                    attrs,
                    ..
                }) => {
                    let text = heading_text(&events[i + 1..]);
                    let anchor = unique_slug(slugify(&text), &mut seen_slugs);
                    let num = heading_level_num(*level);

                    if num == 1 && self.extract_title && title.is_none() {
                        title = Some(text.clone());
                    }
                    if num == 2 || num == 3 {
                        toc.push(TocEntry {
                            level: num,
                            title: text,
                            anchor: anchor.clone(),
                        });
                    }

                    out_events.push(Event::Start(Tag::Heading {
                        level: *level,
                        id: Some(anchor.into()),
                        classes: classes.clone(),
                        attrs: attrs.clone(),
                    }));
                }
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title: link_title,
                    id,
                }) => {
                    let dest = self.rewrite_dest(dest_url);
                    out_events.push(Event::Start(Tag::Link {
                        link_type: *link_type,
                        dest_url: dest.into(),
                        title: link_title.clone(),
                        id: id.clone(),
                    }));
                }
                Event::Start(Tag::Image {
                    link_type,
                    dest_url,
                    title: image_title,
                    id,
                }) => {
                    let dest = self.rewrite_dest(dest_url);
                    out_events.push(Event::Start(Tag::Image {
                        link_type: *link_type,
                        dest_url: dest.into(),
                        title: image_title.clone(),
                        id: id.clone(),
                    }));
                }
                other => out_events.push(other.clone()),
            }
        }

        let mut html = String::with_capacity(preprocessed.len() * 2);
        pulldown_cmark::html::push_html(&mut html, out_events.into_iter());

        RenderResult {
            html,
            title,
            toc,
            warnings,
        }
    }

    /// Prefix root-relative destinations with the base path.
    fn rewrite_dest(&self, dest: &str) -> String {
        match &self.base_path {
            Some(base) if dest.starts_with('/') => {
                format!("{}{dest}", base.trim_end_matches('/'))
            }
            _ => dest.to_owned(),
        }
    }
}

/// Collect the plain text of a heading from the events following its start tag.
fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::End(TagEnd::Heading(_)) => break,
            _ => {}
        }
    }
    text
}

/// Numeric heading level.
fn heading_level_num(level: pulldown_cmark::HeadingLevel) -> u8 {
    use pulldown_cmark::HeadingLevel::{H1, H2, H3, H4, H5, H6};
    match level {
        H1 => 1,
        H2 => 2,
        H3 => 3,
        H4 => 4,
        H5 => 5,
        H6 => 6,
    }
}

/// Deduplicate anchor slugs by appending a counter to repeats.
///
/// The counter skips names already taken, so a literal `setup-1` heading
/// never collides with the deduplicated second `setup`.
fn unique_slug(slug: String, seen: &mut HashSet<String>) -> String {
    let base = if slug.is_empty() {
        "section".to_owned()
    } else {
        slug
    };
    if seen.insert(base.clone()) {
        return base;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{base}-{n}");
        if seen.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}
