//! Building the immutable documentation tree from its JSON form.

use std::sync::Arc;

use serde::Deserialize;

use crate::content::{Block, DocTag, Inline};
use crate::doc_comment::parse_doc_comment;
use crate::node::{DocumentationNode, NodeKind, PathEntry};

/// Error returned when a document tree cannot be built.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Input is not valid JSON for the tree schema.
    #[error("Invalid document tree: {0}")]
    Json(#[from] serde_json::Error),
    /// The root of the tree must be a module.
    #[error("Document tree root must be a module, found {kind:?}")]
    RootNotModule { kind: NodeKind },
    /// A module or package appears somewhere it cannot be nested.
    #[error("{kind:?} `{name}` cannot be nested inside `{parent}`")]
    Misplaced {
        kind: NodeKind,
        name: String,
        parent: String,
    },
}

/// Signature as it appears in the input: plain text or structured inlines.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawSignature {
    Plain(String),
    Rich(Vec<Inline>),
}

impl RawSignature {
    fn into_inlines(self) -> Vec<Inline> {
        match self {
            RawSignature::Plain(text) if text.is_empty() => Vec::new(),
            RawSignature::Plain(text) => vec![Inline::Text(text)],
            RawSignature::Rich(inlines) => inlines,
        }
    }
}

/// Node as produced by the doc extractor.
///
/// `doc` carries a raw KDoc comment; when present it is parsed and its
/// description and tags are appended after any structured `content`/`tags`.
#[derive(Clone, Debug, Deserialize)]
pub struct RawNode {
    pub kind: NodeKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub qualified_name: Option<String>,
    #[serde(default)]
    pub signature: Option<RawSignature>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub content: Vec<Block>,
    #[serde(default)]
    pub tags: Vec<DocTag>,
    #[serde(default)]
    pub members: Vec<RawNode>,
}

/// Immutable documentation tree rooted at a module.
#[derive(Clone, Debug)]
pub struct DocumentTree {
    module: Arc<DocumentationNode>,
}

impl DocumentTree {
    /// Parse a tree from JSON.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let raw: RawNode = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Build a tree from its raw form, computing paths and qualified names.
    pub fn from_raw(raw: RawNode) -> Result<Self, ModelError> {
        if raw.kind != NodeKind::Module {
            return Err(ModelError::RootNotModule { kind: raw.kind });
        }
        let module = build_node(raw, &[], None)?;
        Ok(Self { module })
    }

    /// Root module node.
    #[must_use]
    pub fn module(&self) -> &Arc<DocumentationNode> {
        &self.module
    }

    /// All nodes, module first, in document order.
    pub fn nodes(&self) -> impl Iterator<Item = &Arc<DocumentationNode>> {
        std::iter::once(&self.module).chain(self.module.descendants())
    }

    /// Find a node by qualified name.
    #[must_use]
    pub fn find(&self, qualified_name: &str) -> Option<&Arc<DocumentationNode>> {
        self.nodes().find(|n| n.qualified_name == qualified_name)
    }
}

fn build_node(
    raw: RawNode,
    parent_path: &[PathEntry],
    parent: Option<(NodeKind, &str)>,
) -> Result<Arc<DocumentationNode>, ModelError> {
    if let Some((parent_kind, parent_name)) = parent {
        let misplaced = match raw.kind {
            NodeKind::Module => true,
            NodeKind::Package => parent_kind != NodeKind::Module,
            _ => false,
        };
        if misplaced {
            return Err(ModelError::Misplaced {
                kind: raw.kind,
                name: raw.name,
                parent: parent_name.to_owned(),
            });
        }
    }

    let qualified_name = raw
        .qualified_name
        .unwrap_or_else(|| derive_qualified_name(raw.kind, &raw.name, parent));

    let mut path = parent_path.to_vec();
    path.push(
        PathEntry::new(raw.kind, raw.name.clone()).with_qualified_name(qualified_name.clone()),
    );

    let mut content = raw.content;
    let mut tags = raw.tags;
    if let Some(doc) = raw.doc.as_deref() {
        let comment = parse_doc_comment(doc);
        content.extend(comment.description);
        tags.extend(comment.tags);
    }

    let members = raw
        .members
        .into_iter()
        .map(|member| build_node(member, &path, Some((raw.kind, qualified_name.as_str()))))
        .collect::<Result<Vec<_>, _>>()?;

    let node = DocumentationNode::new(raw.kind, raw.name, qualified_name, path)
        .with_signature(raw.signature.map(RawSignature::into_inlines).unwrap_or_default())
        .with_content(content)
        .with_tags(tags)
        .with_members(members);
    Ok(Arc::new(node))
}

/// Packages and modules are named by their own (already dotted) name;
/// everything else is qualified by its parent, except directly under a
/// module.
fn derive_qualified_name(kind: NodeKind, name: &str, parent: Option<(NodeKind, &str)>) -> String {
    match (kind, parent) {
        (NodeKind::Module | NodeKind::Package, _) | (_, None | Some((NodeKind::Module, _))) => {
            name.to_owned()
        }
        (_, Some((_, prefix))) if prefix.is_empty() => name.to_owned(),
        (_, Some((_, prefix))) if name.is_empty() => prefix.to_owned(),
        (_, Some((_, prefix))) => format!("{prefix}.{name}"),
    }
}
