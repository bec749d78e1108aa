//! Site-level errors.

use std::path::PathBuf;

use hugodoc_model::ModelError;
use hugodoc_renderer::RenderError;

/// Error from loading a tree or producing the site.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Reading the tree or writing a page failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A page could not be rendered.
    #[error("Failed to render {page}: {source}")]
    Render {
        /// Page path relative to the output directory.
        page: String,
        #[source]
        source: RenderError,
    },
    /// The input tree is invalid.
    #[error("Invalid documentation tree: {0}")]
    Model(#[from] ModelError),
}

impl SiteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
