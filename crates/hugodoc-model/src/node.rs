//! Documentation nodes and page groups.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::content::{Block, DocTag, Inline, TagKind};

/// Kind of a documented entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Module,
    Package,
    Class,
    Interface,
    Object,
    Enum,
    Annotation,
    EnumEntry,
    Constructor,
    Function,
    Property,
    TypeAlias,
    Other,
}

impl NodeKind {
    /// Class, interface, object, enum or annotation declaration.
    #[must_use]
    pub fn is_class_like(self) -> bool {
        matches!(
            self,
            NodeKind::Class
                | NodeKind::Interface
                | NodeKind::Object
                | NodeKind::Enum
                | NodeKind::Annotation
        )
    }

    /// Function or property.
    #[must_use]
    pub fn is_callable_or_property(self) -> bool {
        matches!(self, NodeKind::Function | NodeKind::Property)
    }
}

/// One step of a node's ancestry path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathEntry {
    pub kind: NodeKind,
    pub name: String,
    /// Qualified name of the ancestor; same as `name` unless set.
    #[serde(default)]
    pub qualified_name: String,
}

impl PathEntry {
    #[must_use]
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind,
            qualified_name: name.clone(),
            name,
        }
    }

    #[must_use]
    pub fn with_qualified_name(mut self, qualified_name: impl Into<String>) -> Self {
        self.qualified_name = qualified_name.into();
        self
    }
}

/// A documented entity.
///
/// `path` runs from the owning module to the node itself, inclusive, so it
/// is never empty for nodes built by [`DocumentTree`](crate::DocumentTree).
/// Hand-built nodes with an empty path are malformed and rejected by the
/// renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentationNode {
    pub kind: NodeKind,
    /// Simple name; empty for anonymous entities and the root package.
    pub name: String,
    /// Dotted qualified name.
    pub qualified_name: String,
    pub path: Vec<PathEntry>,
    /// Declaration signature, rendered in code context.
    pub signature: Vec<Inline>,
    /// Description blocks.
    pub content: Vec<Block>,
    /// Block tags (`@param`, `@return`, ...).
    pub tags: Vec<DocTag>,
    pub members: Vec<Arc<DocumentationNode>>,
}

impl DocumentationNode {
    /// Create a node with no documentation or members.
    #[must_use]
    pub fn new(
        kind: NodeKind,
        name: impl Into<String>,
        qualified_name: impl Into<String>,
        path: Vec<PathEntry>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            qualified_name: qualified_name.into(),
            path,
            signature: Vec::new(),
            content: Vec::new(),
            tags: Vec::new(),
            members: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_signature(mut self, signature: Vec<Inline>) -> Self {
        self.signature = signature;
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: Vec<Block>) -> Self {
        self.content = content;
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<DocTag>) -> Self {
        self.tags = tags;
        self
    }

    #[must_use]
    pub fn with_members(mut self, members: Vec<Arc<DocumentationNode>>) -> Self {
        self.members = members;
        self
    }

    /// Name of the owning module, if the path is well formed.
    #[must_use]
    pub fn module_name(&self) -> Option<&str> {
        self.path.first().map(|entry| entry.name.as_str())
    }

    /// First description block, used as the summary in member tables.
    #[must_use]
    pub fn summary(&self) -> Option<&Block> {
        self.content.first()
    }

    /// Hidden from the generated site by a `@suppress` tag.
    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        self.tags.iter().any(|tag| tag.kind == TagKind::Suppress)
    }

    /// Members in document order, recursively (excluding `self`).
    pub fn descendants(&self) -> Vec<&Arc<DocumentationNode>> {
        let mut out = Vec::new();
        let mut stack: Vec<&Arc<DocumentationNode>> = self.members.iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.members.iter().rev());
        }
        out
    }
}

/// Non-empty set of nodes rendered onto a single page (e.g. all overloads
/// of a function).
#[derive(Clone, Debug)]
pub struct NodeGroup {
    nodes: Vec<Arc<DocumentationNode>>,
}

impl NodeGroup {
    /// Create a group. Returns `None` for an empty set.
    #[must_use]
    pub fn new(nodes: Vec<Arc<DocumentationNode>>) -> Option<Self> {
        if nodes.is_empty() {
            None
        } else {
            Some(Self { nodes })
        }
    }

    /// Group holding exactly one node.
    #[must_use]
    pub fn single(node: Arc<DocumentationNode>) -> Self {
        Self { nodes: vec![node] }
    }

    /// Nodes in document order.
    #[must_use]
    pub fn nodes(&self) -> &[Arc<DocumentationNode>] {
        &self.nodes
    }

    /// First node of the group.
    #[must_use]
    pub fn first(&self) -> &Arc<DocumentationNode> {
        &self.nodes[0]
    }

    /// The package node, when the group is exactly one package.
    #[must_use]
    pub fn single_package(&self) -> Option<&Arc<DocumentationNode>> {
        match self.nodes.as_slice() {
            [node] if node.kind == NodeKind::Package => Some(node),
            _ => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; groups cannot be empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}
