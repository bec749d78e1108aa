//! Grouping of tree nodes into pages.

use std::collections::HashMap;
use std::sync::Arc;

use hugodoc_model::{DocumentTree, DocumentationNode, NodeGroup, NodeKind};
use hugodoc_renderer::LocationService;

/// A page to render: its output path and the nodes it documents.
#[derive(Clone, Debug)]
pub struct PlannedPage {
    /// Path relative to the output directory.
    pub path: String,
    pub group: NodeGroup,
}

/// Every page of the site in document order.
///
/// Nodes that the location service maps to the same path share a page;
/// this is how overloads end up together. Suppressed subtrees and nodes
/// without a location are skipped.
pub fn plan_pages(tree: &DocumentTree, locations: &dyn LocationService) -> Vec<PlannedPage> {
    let mut order: Vec<String> = Vec::new();
    let mut nodes: HashMap<String, Vec<Arc<DocumentationNode>>> = HashMap::new();
    collect(tree.module(), locations, &mut order, &mut nodes);

    order
        .into_iter()
        .filter_map(|path| {
            let group = NodeGroup::new(nodes.remove(&path)?)?;
            Some(PlannedPage { path, group })
        })
        .collect()
}

fn owns_page(node: &DocumentationNode) -> bool {
    match node.kind {
        NodeKind::Module | NodeKind::Package => true,
        _ => !node.name.is_empty(),
    }
}

fn collect(
    node: &Arc<DocumentationNode>,
    locations: &dyn LocationService,
    order: &mut Vec<String>,
    nodes: &mut HashMap<String, Vec<Arc<DocumentationNode>>>,
) {
    if node.is_suppressed() {
        return;
    }

    if owns_page(node) {
        match node.path.last().and_then(|entry| locations.location(entry)) {
            Some(path) => {
                let group = nodes.entry(path).or_insert_with_key(|path| {
                    order.push(path.clone());
                    Vec::new()
                });
                group.push(Arc::clone(node));
            }
            None => tracing::debug!(node = %node.qualified_name, "Node has no page location"),
        }
    }

    for member in &node.members {
        collect(member, locations, order, nodes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::DokkaLocations;
    use pretty_assertions::assert_eq;

    const TREE: &str = r#"{
        "kind": "module",
        "name": "core",
        "members": [
            { "kind": "package", "name": "com.example", "members": [
                { "kind": "class", "name": "Widget", "members": [
                    { "kind": "function", "name": "resize", "signature": "fun resize(w: Int)" },
                    { "kind": "property", "name": "size" },
                    { "kind": "function", "name": "resize", "signature": "fun resize(w: Int, h: Int)" },
                    { "kind": "object", "name": "", "members": [
                        { "kind": "function", "name": "create" }
                    ]}
                ]},
                { "kind": "class", "name": "Hidden", "doc": "@suppress", "members": [
                    { "kind": "function", "name": "reveal" }
                ]}
            ]}
        ]
    }"#;

    fn plan() -> Vec<PlannedPage> {
        let tree = DocumentTree::from_json(TREE).unwrap();
        let locations = DokkaLocations::new(&tree, false);
        plan_pages(&tree, &locations)
    }

    #[test]
    fn test_pages_in_document_order() {
        let paths: Vec<String> = plan().into_iter().map(|page| page.path).collect();
        assert_eq!(
            paths,
            [
                "core/index.md",
                "core/com.example/index.md",
                "core/com.example/-widget/index.md",
                "core/com.example/-widget/resize.md",
                "core/com.example/-widget/size.md",
                "core/com.example/-widget/create.md",
            ]
        );
    }

    #[test]
    fn test_overloads_share_a_page() {
        let pages = plan();
        let resize = pages
            .iter()
            .find(|page| page.path.ends_with("resize.md"))
            .unwrap();
        assert_eq!(resize.group.len(), 2);
        assert!(resize.group.nodes().iter().all(|node| node.name == "resize"));
    }

    #[test]
    fn test_suppressed_subtree_has_no_pages() {
        assert!(
            plan()
                .iter()
                .all(|page| !page.path.contains("hidden") && !page.path.contains("reveal"))
        );
    }
}
