//! Structured doc-comment content.
//!
//! Content is a small block/inline tree, close to what a markdown parser
//! produces, with links kept symbolic so the renderer can decide how to
//! format them for the destination site.

use serde::{Deserialize, Serialize};

/// Block-level content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Paragraph of inline content.
    Paragraph { content: Vec<Inline> },
    /// Section heading (1-6).
    Heading { level: u8, content: Vec<Inline> },
    /// Code sample. `language` is `None` when the sample is untagged.
    CodeBlock {
        #[serde(default)]
        language: Option<String>,
        code: String,
    },
    /// Ordered or unordered list. Each item is a sequence of blocks.
    List {
        #[serde(default)]
        ordered: bool,
        #[serde(default)]
        start: Option<u64>,
        items: Vec<Vec<Block>>,
    },
    /// Table with a header row. Each cell is a sequence of blocks.
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<Vec<Block>>>,
    },
    /// Quoted blocks.
    BlockQuote { content: Vec<Block> },
    /// Horizontal rule.
    Rule,
}

impl Block {
    /// Paragraph from plain text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Block::Paragraph {
            content: vec![Inline::Text(text.into())],
        }
    }
}

/// Inline content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    Code(String),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    /// Link to an external URL or a symbolic reference into the tree.
    Link { target: String, label: Vec<Inline> },
    SoftBreak,
    HardBreak,
}

impl Inline {
    /// Link whose label is plain text.
    #[must_use]
    pub fn link(target: impl Into<String>, label: impl Into<String>) -> Self {
        Inline::Link {
            target: target.into(),
            label: vec![Inline::Text(label.into())],
        }
    }
}

/// KDoc block tag kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    Param,
    Property,
    Return,
    Throws,
    See,
    Since,
    Author,
    Sample,
    Suppress,
    Other(String),
}

impl TagKind {
    /// Map a tag name (without `@`) to its kind.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "param" => TagKind::Param,
            "property" => TagKind::Property,
            "return" => TagKind::Return,
            "throws" | "exception" => TagKind::Throws,
            "see" => TagKind::See,
            "since" => TagKind::Since,
            "author" => TagKind::Author,
            "sample" => TagKind::Sample,
            "suppress" => TagKind::Suppress,
            other => TagKind::Other(other.to_owned()),
        }
    }

    /// Whether the first word after the tag names a subject (parameter,
    /// exception type, referenced symbol).
    #[must_use]
    pub fn has_subject(&self) -> bool {
        matches!(
            self,
            TagKind::Param | TagKind::Property | TagKind::Throws | TagKind::See | TagKind::Sample
        )
    }
}

/// A block tag of a doc comment (`@param name text`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocTag {
    pub kind: TagKind,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub content: Vec<Block>,
}

/// Flatten inline content to plain text.
#[must_use]
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    collect_text(inlines, &mut out);
    out
}

fn collect_text(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(text) | Inline::Code(text) => out.push_str(text),
            Inline::Emphasis(children)
            | Inline::Strong(children)
            | Inline::Strikethrough(children)
            | Inline::Link {
                label: children, ..
            } => collect_text(children, out),
            Inline::SoftBreak | Inline::HardBreak => out.push(' '),
        }
    }
}
