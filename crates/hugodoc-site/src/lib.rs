//! Site output for hugodoc.
//!
//! The renderer turns one group of nodes into one page. This crate supplies
//! everything around it:
//!
//! - [`DokkaLocations`]: the page path of every node, and symbol resolution
//! - [`plan_pages`]: which nodes share a page
//! - [`SiteRenderer`]: parallel rendering and atomic writes
//! - [`package_list`]: the `package-list` index
//!
//! # Example
//!
//! ```
//! use hugodoc_model::DocumentTree;
//! use hugodoc_renderer::RenderStyle;
//! use hugodoc_site::{SiteOptions, SiteRenderer};
//!
//! let tree = DocumentTree::from_json(
//!     r#"{ "kind": "module", "name": "core", "members": [
//!         { "kind": "package", "name": "com.example", "members": [
//!             { "kind": "class", "name": "Widget", "doc": "A widget." }
//!         ]}
//!     ]}"#,
//! )?;
//! let style = RenderStyle::hugo();
//! let files = SiteRenderer::new(&style, SiteOptions::default()).render(&tree)?;
//!
//! let paths: Vec<&str> = files.iter().map(|file| file.path.as_str()).collect();
//! assert_eq!(
//!     paths,
//!     ["core/index.md", "core/com.example/index.md", "core/com.example/-widget/index.md"]
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod location;
mod package_list;
mod pages;
mod site;

pub use error::SiteError;
pub use location::{DokkaLocations, ROOT_PACKAGE_DIR, escape_identifier};
pub use package_list::{PACKAGE_LIST_FILE, package_list};
pub use pages::{PlannedPage, plan_pages};
pub use site::{
    LINK_EXTENSION, RenderedFile, SiteOptions, SiteRenderer, SiteReport, load_tree,
};
