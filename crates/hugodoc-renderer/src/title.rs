//! Page titles derived from a node's position in the tree.

use std::collections::BTreeSet;

use hugodoc_model::{DocumentationNode, NodeGroup, NodeKind};

use crate::error::RenderError;

/// Title of the root package, whose qualified name is empty.
pub const ROOT_PACKAGE_TITLE: &str = "root package";

/// Title of a single node.
///
/// Modules use their name and packages their qualified name. Anything else
/// is titled by the path from its outermost class-like ancestor (or, for
/// top-level members, from the first function or property) to itself.
pub fn node_title(node: &DocumentationNode) -> Result<String, RenderError> {
    let Some(module) = node.module_name() else {
        return Err(RenderError::MalformedNode {
            qualified_name: node.qualified_name.clone(),
        });
    };

    if node.path.len() == 1 {
        return Ok(module.to_owned());
    }
    if node.kind == NodeKind::Package {
        return Ok(display_package_name(&node.qualified_name).to_owned());
    }

    let start = node
        .path
        .iter()
        .position(|entry| entry.kind.is_class_like())
        .or_else(|| {
            node.path
                .iter()
                .position(|entry| entry.kind.is_callable_or_property())
        })
        .unwrap_or(node.path.len());

    let title = node.path[start..]
        .iter()
        .map(|entry| entry.name.as_str())
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(".");

    if title.is_empty() {
        Ok(node.qualified_name.clone())
    } else {
        Ok(title)
    }
}

/// Distinct titles of every node in a group, sorted.
pub fn title_candidates(group: &NodeGroup) -> Result<BTreeSet<String>, RenderError> {
    group.nodes().iter().map(|node| node_title(node)).collect()
}

/// The single title shared by every node of a group.
///
/// Returns `Ok(None)` when the nodes disagree.
pub fn page_title(group: &NodeGroup) -> Result<Option<String>, RenderError> {
    let mut titles = title_candidates(group)?;
    if titles.len() == 1 {
        Ok(titles.pop_first())
    } else {
        Ok(None)
    }
}

/// Name shown for a package; the root package has no name of its own.
#[must_use]
pub fn display_package_name(qualified_name: &str) -> &str {
    if qualified_name.is_empty() {
        ROOT_PACKAGE_TITLE
    } else {
        qualified_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{arc_at, node_at};
    use hugodoc_model::NodeKind::{Class, Function, Module, Object, Package, Property, TypeAlias};

    #[test]
    fn test_module_title_is_module_name() {
        let node = node_at(&[(Module, "core")]);
        assert_eq!(node_title(&node).unwrap(), "core");
        let group = NodeGroup::single(arc_at(&[(Module, "core")]));
        assert_eq!(page_title(&group).unwrap().as_deref(), Some("core"));
    }

    #[test]
    fn test_package_title_is_qualified_name() {
        let node = node_at(&[(Module, "core"), (Package, "com.example.api")]);
        assert_eq!(node_title(&node).unwrap(), "com.example.api");
    }

    #[test]
    fn test_root_package_title() {
        let node = node_at(&[(Module, "core"), (Package, "")]);
        assert_eq!(node.qualified_name, "");
        assert_eq!(node_title(&node).unwrap(), "root package");
    }

    #[test]
    fn test_nested_member_title_starts_at_class() {
        let node = node_at(&[
            (Module, "core"),
            (Class, "OuterClass"),
            (Class, "InnerClass"),
            (Function, "member"),
        ]);
        assert_eq!(node_title(&node).unwrap(), "OuterClass.InnerClass.member");
    }

    #[test]
    fn test_member_under_package_skips_package() {
        let node = node_at(&[
            (Module, "core"),
            (Package, "com.example.api"),
            (Class, "Widget"),
            (Class, "Builder"),
            (Function, "build"),
        ]);
        assert_eq!(node_title(&node).unwrap(), "Widget.Builder.build");
    }

    #[test]
    fn test_top_level_member_title() {
        let function = node_at(&[(Module, "core"), (Package, "com.example"), (Function, "run")]);
        assert_eq!(node_title(&function).unwrap(), "run");

        let property = node_at(&[(Module, "core"), (Package, ""), (Property, "version")]);
        assert_eq!(node_title(&property).unwrap(), "version");
    }

    #[test]
    fn test_empty_names_are_skipped() {
        let node = node_at(&[
            (Module, "core"),
            (Package, "p"),
            (Class, "Outer"),
            (Object, ""),
            (Function, "create"),
        ]);
        assert_eq!(node_title(&node).unwrap(), "Outer.create");
    }

    #[test]
    fn test_falls_back_to_qualified_name() {
        let node = node_at(&[(Module, "core"), (Package, "p"), (TypeAlias, "Handler")]);
        assert_eq!(node_title(&node).unwrap(), "p.Handler");
    }

    #[test]
    fn test_empty_path_is_malformed() {
        let node = DocumentationNode::new(Function, "f", "p.f", Vec::new());
        let err = node_title(&node).unwrap_err();
        assert!(matches!(err, RenderError::MalformedNode { qualified_name } if qualified_name == "p.f"));
    }

    #[test]
    fn test_overloads_share_a_title() {
        let steps = [(Module, "core"), (Package, "p"), (Class, "A"), (Function, "f")];
        let group = NodeGroup::new(vec![arc_at(&steps), arc_at(&steps)]).unwrap();
        assert_eq!(page_title(&group).unwrap().as_deref(), Some("A.f"));
    }

    #[test]
    fn test_different_titles_are_ambiguous() {
        let group = NodeGroup::new(vec![
            arc_at(&[(Module, "core"), (Package, "p"), (Class, "A"), (Function, "f")]),
            arc_at(&[(Module, "core"), (Package, "p"), (Class, "B"), (Function, "f")]),
        ])
        .unwrap();
        assert_eq!(page_title(&group).unwrap(), None);
        let candidates: Vec<String> = title_candidates(&group).unwrap().into_iter().collect();
        assert_eq!(candidates, ["A.f", "B.f"]);
    }

    #[test]
    fn test_malformed_node_fails_the_group() {
        let group = NodeGroup::new(vec![
            arc_at(&[(Module, "core"), (Package, "p")]),
            std::sync::Arc::new(DocumentationNode::new(Class, "X", "X", Vec::new())),
        ])
        .unwrap();
        assert!(page_title(&group).is_err());
    }
}
