//! Static output writer.
//!
//! Writes every registry entry as a complete HTML document under an output
//! directory. The root route lands at `index.html`, any other route at
//! `<route>.html`, matching the layout a static host serves the base path
//! prefix from.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::html;
use crate::site::Site;

/// Build error.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// I/O failure writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build statistics.
#[derive(Clone, Debug, Default)]
pub struct BuildStats {
    /// Number of pages written.
    pub pages: usize,
    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Write the whole site under `out_dir`.
///
/// All-or-nothing: the first I/O failure aborts the build.
pub(crate) fn build(site: &Site, out_dir: &Path) -> Result<BuildStats, BuildError> {
    let start = Instant::now();
    fs::create_dir_all(out_dir)?;

    for entry in site.registry().entries() {
        let path = out_dir.join(output_path(&entry.route));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let document = html::page_html(site.config(), site.navigation(), entry);
        fs::write(&path, document)?;
        tracing::debug!(route = %entry.route, path = %path.display(), "Wrote page");
    }

    let stats = BuildStats {
        pages: site.registry().len(),
        duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
    };
    tracing::info!(
        pages = stats.pages,
        duration_ms = stats.duration_ms,
        "Site build complete"
    );
    Ok(stats)
}

/// Output file for a route: `/` -> `index.html`, `/a/b` -> `a/b.html`.
fn output_path(route: &str) -> PathBuf {
    if route == "/" {
        PathBuf::from("index.html")
    } else {
        PathBuf::from(format!("{}.html", &route[1..]))
    }
}
