//! Rendering a whole tree, in memory or to disk.

use std::fs;
use std::io::Write;
use std::path::Path;

use hugodoc_model::DocumentTree;
use hugodoc_renderer::{PageAssembler, PageWarning, RenderStyle, RenderedPage};
use rayon::prelude::*;
use tempfile::NamedTempFile;

use crate::error::SiteError;
use crate::location::DokkaLocations;
use crate::package_list::{PACKAGE_LIST_FILE, package_list};
use crate::pages::{PlannedPage, plan_pages};

/// Extension of every page file.
pub const LINK_EXTENSION: &str = "md";

/// Output options that are independent of the page style.
#[derive(Clone, Debug)]
pub struct SiteOptions {
    /// Section pages are `_index.md` instead of `index.md`.
    pub section_index: bool,
    /// Write the `package-list` index.
    pub package_list: bool,
    /// Format name recorded in the `package-list` index.
    pub format: String,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            section_index: false,
            package_list: true,
            format: "hugo".to_owned(),
        }
    }
}

/// A rendered page and where it goes.
#[derive(Clone, Debug)]
pub struct RenderedFile {
    /// Path relative to the output directory.
    pub path: String,
    pub page: RenderedPage,
}

/// Summary of a site written to disk.
#[derive(Debug, Default)]
pub struct SiteReport {
    /// Number of page files written.
    pub pages: usize,
    /// Warnings keyed by page path, in page order.
    pub warnings: Vec<(String, PageWarning)>,
}

/// Renders every page of a documentation tree.
///
/// Pages are independent: each one is assembled by its own writer, on the
/// rayon thread pool.
pub struct SiteRenderer<'a> {
    style: &'a RenderStyle,
    options: SiteOptions,
}

impl<'a> SiteRenderer<'a> {
    #[must_use]
    pub fn new(style: &'a RenderStyle, options: SiteOptions) -> Self {
        Self { style, options }
    }

    /// Render all pages in memory, in document order.
    pub fn render(&self, tree: &DocumentTree) -> Result<Vec<RenderedFile>, SiteError> {
        self.render_with(tree, |planned, page| {
            Ok(RenderedFile {
                path: planned.path.clone(),
                page,
            })
        })
    }

    /// Render all pages and write them under `out_dir`.
    ///
    /// Each file is replaced atomically. Existing files that no longer
    /// correspond to a page are left in place.
    pub fn write(&self, tree: &DocumentTree, out_dir: &Path) -> Result<SiteReport, SiteError> {
        let written = self.render_with(tree, |planned, page| {
            write_atomic(&out_dir.join(&planned.path), page.text.as_bytes())?;
            tracing::debug!(page = %planned.path, "Page written");
            Ok((planned.path.clone(), page.warnings))
        })?;

        if self.options.package_list {
            let index = package_list(tree, &self.options.format, LINK_EXTENSION);
            write_atomic(&out_dir.join(PACKAGE_LIST_FILE), index.as_bytes())?;
        }

        let pages = written.len();
        let warnings: Vec<(String, PageWarning)> = written
            .into_iter()
            .flat_map(|(path, warnings)| {
                warnings
                    .into_iter()
                    .map(move |warning| (path.clone(), warning))
            })
            .collect();

        tracing::info!(
            pages,
            warnings = warnings.len(),
            dir = %out_dir.display(),
            "Site rendered"
        );

        Ok(SiteReport { pages, warnings })
    }

    fn render_with<T, F>(&self, tree: &DocumentTree, sink: F) -> Result<Vec<T>, SiteError>
    where
        T: Send,
        F: Fn(&PlannedPage, RenderedPage) -> Result<T, SiteError> + Sync,
    {
        let locations = DokkaLocations::new(tree, self.options.section_index);
        let pages = plan_pages(tree, &locations);
        let assembler = PageAssembler::new(self.style, &locations);

        pages
            .par_iter()
            .map(|planned| {
                let page =
                    assembler
                        .assemble_page(&planned.group)
                        .map_err(|source| SiteError::Render {
                            page: planned.path.clone(),
                            source,
                        })?;
                sink(planned, page)
            })
            .collect()
    }
}

/// Read and parse a JSON documentation tree.
pub fn load_tree(path: &Path) -> Result<DocumentTree, SiteError> {
    let json = fs::read_to_string(path).map_err(|e| SiteError::io(path, e))?;
    let tree = DocumentTree::from_json(&json)?;
    tracing::debug!(path = %path.display(), module = %tree.module().name, "Tree loaded");
    Ok(tree)
}

/// Write through a temporary file in the destination directory, then
/// rename over `path`.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), SiteError> {
    let dir = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(dir).map_err(|e| SiteError::io(dir, e))?;

    let mut file = NamedTempFile::new_in(dir).map_err(|e| SiteError::io(dir, e))?;
    file.write_all(contents)
        .map_err(|e| SiteError::io(file.path(), e))?;
    file.persist(path)
        .map_err(|e| SiteError::io(path, e.error))?;
    Ok(())
}
