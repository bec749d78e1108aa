//! Render errors and non-fatal page warnings.

use std::fmt;

/// Error returned when a page cannot be rendered.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Nodes of one page disagree on the title (strict mode only).
    #[error("Ambiguous page title, candidates: {}", candidates.join(", "))]
    AmbiguousTitle { candidates: Vec<String> },
    /// A node without an ancestry path cannot be placed or titled.
    #[error("Node `{qualified_name}` has an empty path")]
    MalformedNode { qualified_name: String },
    /// Output context was not restored after a scoped construct.
    #[error(
        "Render context not restored (in_code_block: {in_code_block}, in_table_cell: {in_table_cell})"
    )]
    ContextLeak {
        in_code_block: bool,
        in_table_cell: bool,
    },
    /// Front matter could not be serialized.
    #[error("Failed to write front matter: {0}")]
    FrontMatter(String),
}

impl From<toml::ser::Error> for RenderError {
    fn from(e: toml::ser::Error) -> Self {
        Self::FrontMatter(e.to_string())
    }
}

impl From<serde_yaml::Error> for RenderError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::FrontMatter(e.to_string())
    }
}

/// Problem found while rendering that does not stop the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageWarning {
    /// Nodes of the page produce different titles; a placeholder was used.
    AmbiguousTitle { candidates: Vec<String> },
    /// A symbolic link target could not be found in the tree.
    UnresolvedLink { reference: String },
}

impl fmt::Display for PageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmbiguousTitle { candidates } => {
                write!(f, "ambiguous title ({})", candidates.join(", "))
            }
            Self::UnresolvedLink { reference } => write!(f, "unresolved link `{reference}`"),
        }
    }
}
