//! Hugo page renderer for documentation trees.
//!
//! Turns a [`NodeGroup`](hugodoc_model::NodeGroup) into a complete page:
//! front matter followed by markdown tuned for the site engine's markdown
//! processor.
//!
//! # Architecture
//!
//! - [`LinkResolver`]: classifies link targets as external URLs or internal
//!   references and asks a [`LocationService`] where internal pages live.
//! - [`page_title`]: derives a page title from a node's ancestry path.
//! - [`PageWriter`]: a single render session holding the output buffer and
//!   the [`RenderContext`] (inside a code block, inside a table cell) that
//!   changes how links, lists and text are written.
//! - [`PageAssembler`]: ties the above together for one page.
//!
//! Output variants are values of [`RenderStyle`]; [`Preset`] names the
//! shipped ones.
//!
//! # Example
//!
//! ```
//! use hugodoc_model::{DocumentTree, NodeGroup, PathEntry};
//! use hugodoc_renderer::{LocationService, PageAssembler, RenderStyle};
//!
//! struct Flat;
//!
//! impl LocationService for Flat {
//!     fn location(&self, entry: &PathEntry) -> Option<String> {
//!         Some(format!("{}.md", entry.qualified_name))
//!     }
//!
//!     fn resolve(&self, reference: &str) -> Option<String> {
//!         Some(format!("{reference}.md"))
//!     }
//! }
//!
//! let tree = DocumentTree::from_json(
//!     r#"{"kind": "module", "name": "core", "members": [
//!         {"kind": "package", "name": "com.example", "doc": "Example package."}
//!     ]}"#,
//! )
//! .unwrap();
//! let package = tree.find("com.example").unwrap().clone();
//!
//! let style = RenderStyle::hugo();
//! let page = PageAssembler::new(&style, &Flat)
//!     .assemble_page(&NodeGroup::single(package))
//!     .unwrap();
//! assert!(page.text.contains("linktitle = \"com.example\""));
//! assert!(page.text.contains("Example package."));
//! ```

mod block;
mod context;
mod error;
mod front_matter;
mod link;
mod page;
mod style;
#[cfg(test)]
mod testing;
mod title;
mod util;
mod writer;

pub use context::RenderContext;
pub use error::{PageWarning, RenderError};
pub use front_matter::{FrontMatter, FrontMatterValue};
pub use link::{LinkResolver, LocationService, RenderableLink, is_external};
pub use page::{PageAssembler, RenderedPage};
pub use style::{
    FrontMatterFormat, MenuSpec, Preset, RenderStyle, Shortcodes, TableStrategy, UnknownPreset,
};
pub use title::{ROOT_PACKAGE_TITLE, display_package_name, node_title, page_title, title_candidates};
pub use writer::{PageWriter, RenderResult};
