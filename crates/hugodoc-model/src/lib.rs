//! Documentation tree types for hugodoc.
//!
//! The renderer never builds documentation nodes itself: an external tool
//! (a doc extractor) produces a JSON tree, which [`DocumentTree`] turns into
//! immutable [`DocumentationNode`]s with their ancestry paths computed.
//!
//! # Example
//!
//! ```
//! use hugodoc_model::{DocumentTree, NodeKind};
//!
//! let json = r#"{
//!     "kind": "module",
//!     "name": "core",
//!     "members": [
//!         { "kind": "package", "name": "com.example.api", "members": [
//!             { "kind": "class", "name": "Widget", "doc": "A widget." }
//!         ]}
//!     ]
//! }"#;
//!
//! let tree = DocumentTree::from_json(json).unwrap();
//! let widget = tree.find("com.example.api.Widget").unwrap();
//! assert_eq!(widget.kind, NodeKind::Class);
//! assert_eq!(widget.path.len(), 3);
//! ```

mod content;
mod doc_comment;
mod node;
mod tree;

pub use content::{Block, DocTag, Inline, TagKind, plain_text};
pub use doc_comment::{DocComment, parse_doc_comment, parse_markdown};
pub use node::{DocumentationNode, NodeGroup, NodeKind, PathEntry};
pub use tree::{DocumentTree, ModelError, RawNode, RawSignature};
