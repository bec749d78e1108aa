//! The `package-list` index read by other documentation builds to link
//! into this site.

use std::collections::BTreeSet;

use hugodoc_model::{DocumentTree, NodeKind};

/// File name of the index, written at the output root.
pub const PACKAGE_LIST_FILE: &str = "package-list";

const PARAM_PREFIX: &str = "$dokka.";

/// Index text: format parameters, a blank line, then one sorted package
/// name per line. The root package and suppressed packages are left out.
#[must_use]
pub fn package_list(tree: &DocumentTree, format: &str, link_extension: &str) -> String {
    let packages: BTreeSet<&str> = tree
        .module()
        .members
        .iter()
        .filter(|node| node.kind == NodeKind::Package && !node.is_suppressed())
        .map(|node| node.qualified_name.as_str())
        .filter(|name| !name.is_empty())
        .collect();

    let mut out = String::new();
    for (key, value) in [("format", format), ("linkExtension", link_extension)] {
        out.push_str(PARAM_PREFIX);
        out.push_str(key);
        out.push(':');
        out.push_str(value);
        out.push('\n');
    }
    out.push('\n');
    for package in packages {
        out.push_str(package);
        out.push('\n');
    }
    out
}
