//! Test fixtures shared by the renderer's unit tests.

use std::collections::HashMap;
use std::sync::Arc;

use hugodoc_model::{DocumentationNode, NodeKind, PathEntry};

use crate::link::LocationService;

/// Location service backed by a qualified-name map.
pub(crate) struct MapLocations {
    paths: HashMap<String, String>,
}

impl MapLocations {
    pub(crate) fn new<const N: usize>(entries: [(&str, &str); N]) -> Self {
        Self {
            paths: entries
                .into_iter()
                .map(|(name, path)| (name.to_owned(), path.to_owned()))
                .collect(),
        }
    }

    pub(crate) fn empty() -> Self {
        Self::new([])
    }
}

impl LocationService for MapLocations {
    fn location(&self, entry: &PathEntry) -> Option<String> {
        self.paths.get(&entry.qualified_name).cloned()
    }

    fn resolve(&self, reference: &str) -> Option<String> {
        self.paths.get(reference).cloned()
    }
}

/// Node whose path is built from `(kind, name)` steps; the last step is the
/// node itself. Qualified names are the dotted join of the non-module steps.
pub(crate) fn node_at(steps: &[(NodeKind, &str)]) -> DocumentationNode {
    let mut path = Vec::new();
    let mut qualified = String::new();
    for &(kind, name) in steps {
        if kind != NodeKind::Module {
            if !qualified.is_empty() && !name.is_empty() {
                qualified.push('.');
            }
            qualified.push_str(name);
        }
        let entry_name = if kind == NodeKind::Module { name } else { &qualified };
        path.push(PathEntry::new(kind, name).with_qualified_name(entry_name));
    }
    let (kind, name) = steps.last().copied().unwrap_or((NodeKind::Other, ""));
    let qualified_name = if kind == NodeKind::Module { name.to_owned() } else { qualified };
    DocumentationNode::new(kind, name, qualified_name, path)
}

pub(crate) fn arc_at(steps: &[(NodeKind, &str)]) -> Arc<DocumentationNode> {
    Arc::new(node_at(steps))
}
