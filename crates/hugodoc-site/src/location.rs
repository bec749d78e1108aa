//! Page paths for tree nodes, following Dokka's file layout.
//!
//! ```text
//! core/index.md                               module
//! core/com.example.api/index.md               package
//! core/--root--/index.md                      root package
//! core/com.example.api/-widget/index.md       class-like
//! core/com.example.api/-widget/resize.md      member group
//! ```

use std::collections::HashMap;

use hugodoc_model::{DocumentTree, DocumentationNode, NodeKind, PathEntry};
use hugodoc_renderer::LocationService;

/// Directory name of the root package.
pub const ROOT_PACKAGE_DIR: &str = "--root--";

/// File-name form of an identifier.
///
/// Uppercase letters become `-` followed by the lowercase letter so that
/// case-insensitive file systems keep `Foo` and `foo` apart.
#[must_use]
pub fn escape_identifier(name: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    if name.is_empty() {
        return ROOT_PACKAGE_DIR.to_owned();
    }

    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        match c {
            'A'..='Z' => {
                out.push('-');
                out.push(c.to_ascii_lowercase());
            }
            'a'..='z' | '0'..='9' | '_' | '.' | '-' => out.push(c),
            '<' | '>' => out.push('-'),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    out.push('%');
                    out.push(char::from(HEX[usize::from(byte >> 4)]));
                    out.push(char::from(HEX[usize::from(byte & 0x0f)]));
                }
            }
        }
    }

    if out == "index" {
        "--index--".to_owned()
    } else {
        out
    }
}

/// Which namespace a qualified name lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Module,
    Package,
    Type,
    Member,
}

impl Slot {
    fn of(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Module => Self::Module,
            NodeKind::Package => Self::Package,
            kind if kind.is_class_like() => Self::Type,
            _ => Self::Member,
        }
    }
}

/// Location service for the Dokka directory layout.
///
/// Paths are computed once from the tree and are relative to the output
/// root, without a leading slash.
#[derive(Debug, Default)]
pub struct DokkaLocations {
    modules: HashMap<String, String>,
    packages: HashMap<String, String>,
    types: HashMap<String, String>,
    members: HashMap<String, String>,
    /// Last name segment to `(qualified name, path)` for types and members.
    by_simple_name: HashMap<String, Vec<(String, String)>>,
    index_file: &'static str,
}

impl DokkaLocations {
    /// Assign a path to every page-owning node of `tree`.
    ///
    /// With `section_index`, section pages (module, package, class-like) are
    /// `_index.md` instead of `index.md`.
    #[must_use]
    pub fn new(tree: &DocumentTree, section_index: bool) -> Self {
        let mut locations = Self {
            index_file: if section_index { "_index.md" } else { "index.md" },
            ..Self::default()
        };
        locations.visit(tree.module(), "");
        locations
    }

    /// Number of distinct page paths.
    #[must_use]
    pub fn page_count(&self) -> usize {
        let mut paths: Vec<&String> = self
            .modules
            .values()
            .chain(self.packages.values())
            .chain(self.types.values())
            .chain(self.members.values())
            .collect();
        paths.sort_unstable();
        paths.dedup();
        paths.len()
    }

    fn visit(&mut self, node: &DocumentationNode, dir: &str) {
        if node.is_suppressed() {
            return;
        }

        let child_dir = match Slot::of(node.kind) {
            Slot::Module => {
                let dir = escape_identifier(&node.name);
                let page = self.section_page(&dir);
                self.insert(Slot::Module, &node.qualified_name, page);
                dir
            }
            Slot::Package => {
                let dir = join(dir, &escape_identifier(&node.qualified_name));
                let page = self.section_page(&dir);
                self.insert(Slot::Package, &node.qualified_name, page);
                dir
            }
            Slot::Type if node.name.is_empty() => dir.to_owned(),
            Slot::Type => {
                let dir = join(dir, &escape_identifier(&node.name));
                let page = self.section_page(&dir);
                self.insert(Slot::Type, &node.qualified_name, page);
                dir
            }
            Slot::Member => {
                if !node.name.is_empty() {
                    let page = join(dir, &format!("{}.md", escape_identifier(&node.name)));
                    self.insert(Slot::Member, &node.qualified_name, page);
                }
                dir.to_owned()
            }
        };

        for member in &node.members {
            self.visit(member, &child_dir);
        }
    }

    fn section_page(&self, dir: &str) -> String {
        join(dir, self.index_file)
    }

    fn insert(&mut self, slot: Slot, qualified_name: &str, path: String) {
        let map = match slot {
            Slot::Module => &mut self.modules,
            Slot::Package => &mut self.packages,
            Slot::Type => &mut self.types,
            Slot::Member => &mut self.members,
        };
        if map.contains_key(qualified_name) {
            return;
        }
        map.insert(qualified_name.to_owned(), path.clone());

        if matches!(slot, Slot::Type | Slot::Member) {
            let simple = simple_name(qualified_name).to_owned();
            self.by_simple_name
                .entry(simple)
                .or_default()
                .push((qualified_name.to_owned(), path));
        }
    }

    fn lookup(&self, slot: Slot, qualified_name: &str) -> Option<&String> {
        match slot {
            Slot::Module => self.modules.get(qualified_name),
            Slot::Package => self.packages.get(qualified_name),
            Slot::Type => self.types.get(qualified_name),
            Slot::Member => self.members.get(qualified_name),
        }
    }

    /// Unique type or member whose qualified name ends with `reference`.
    fn resolve_suffix(&self, reference: &str) -> Option<String> {
        let candidates = self.by_simple_name.get(simple_name(reference))?;
        let mut found: Option<&String> = None;
        for (qualified_name, path) in candidates {
            let matches = qualified_name == reference
                || qualified_name
                    .strip_suffix(reference)
                    .is_some_and(|prefix| prefix.ends_with('.'));
            if !matches {
                continue;
            }
            match found {
                Some(existing) if existing != path => return None,
                _ => found = Some(path),
            }
        }
        found.cloned()
    }
}

impl LocationService for DokkaLocations {
    fn location(&self, entry: &PathEntry) -> Option<String> {
        self.lookup(Slot::of(entry.kind), &entry.qualified_name).cloned()
    }

    fn resolve(&self, reference: &str) -> Option<String> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }
        [Slot::Type, Slot::Member, Slot::Package]
            .into_iter()
            .find_map(|slot| self.lookup(slot, reference).cloned())
            .or_else(|| self.resolve_suffix(reference))
    }
}

fn simple_name(qualified_name: &str) -> &str {
    qualified_name.rsplit('.').next().unwrap_or(qualified_name)
}

fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_owned()
    } else {
        format!("{dir}/{name}")
    }
}
