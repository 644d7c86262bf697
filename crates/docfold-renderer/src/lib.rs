//! Markdown rendering for docfold.
//!
//! This crate provides:
//! - [`MarkdownRenderer`]: markdown-to-HTML conversion with heading anchors,
//!   title extraction, TOC collection and base-path link rewriting
//! - `:::`-fenced custom containers (`tip`, `warning`, `danger`, `info`,
//!   `details`)
//! - [`escape_html`] and [`slugify`] helpers
//!
//! # Quick Start
//!
//! ```
//! use docfold_renderer::MarkdownRenderer;
//!
//! let renderer = MarkdownRenderer::new()
//!     .with_title_extraction()
//!     .with_base_path("/proven-pinia-patterns/");
//!
//! let result = renderer.render_markdown("# Introducción\n\nBienvenido.");
//! assert_eq!(result.title.as_deref(), Some("Introducción"));
//! assert!(result.html.contains("<p>Bienvenido.</p>"));
//! ```

mod container;
mod html;
mod renderer;
mod slug;

pub use html::escape_html;
pub use renderer::{MarkdownRenderer, RenderResult, TocEntry};
pub use slug::slugify;
