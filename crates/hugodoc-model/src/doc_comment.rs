//! KDoc comment parsing.
//!
//! A doc comment is markdown followed by block tags (`@param x ...`). The
//! markdown is parsed with pulldown-cmark and folded into [`Block`]s. Shortcut
//! references without a definition (`[Widget]`) are KDoc symbol links and
//! become [`Inline::Link`]s with a symbolic target.

use std::borrow::Cow;
use std::sync::LazyLock;

use pulldown_cmark::{
    BrokenLink, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd,
};
use regex::Regex;

use crate::content::{Block, DocTag, Inline, TagKind};

static TAG_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*@([A-Za-z]+)(?:\s+(.*))?$").unwrap());

/// Parsed doc comment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocComment {
    pub description: Vec<Block>,
    pub tags: Vec<DocTag>,
}

/// Parse a KDoc comment into description blocks and block tags.
///
/// Accepts either the bare comment text or the comment with its `/** */`
/// markers and leading `*` gutter.
#[must_use]
pub fn parse_doc_comment(text: &str) -> DocComment {
    let text = strip_comment_markers(text);

    let mut description = String::new();
    let mut sections: Vec<(TagKind, String)> = Vec::new();
    let mut in_fence = false;

    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
        }
        if !in_fence && let Some(caps) = TAG_LINE.captures(line) {
            let rest = caps.get(2).map_or("", |m| m.as_str());
            sections.push((TagKind::from_name(&caps[1]), format!("{rest}\n")));
            continue;
        }
        let body = match sections.last_mut() {
            Some((_, body)) => body,
            None => &mut description,
        };
        body.push_str(line);
        body.push('\n');
    }

    let tags = sections
        .into_iter()
        .map(|(kind, body)| {
            let (subject, rest) = if kind.has_subject() {
                split_subject(&body)
            } else {
                (None, body.as_str())
            };
            DocTag {
                kind,
                subject,
                content: parse_markdown(rest),
            }
        })
        .collect();

    DocComment {
        description: parse_markdown(&description),
        tags,
    }
}

/// Split the first word off a tag body. `[Widget]` subjects lose their brackets.
fn split_subject(body: &str) -> (Option<String>, &str) {
    let body = body.trim_start();
    let end = body.find(char::is_whitespace).unwrap_or(body.len());
    let (word, rest) = body.split_at(end);
    if word.is_empty() {
        return (None, rest);
    }
    let word = word
        .strip_prefix('[')
        .and_then(|w| w.strip_suffix(']'))
        .unwrap_or(word);
    (Some(word.to_owned()), rest)
}

fn strip_comment_markers(text: &str) -> Cow<'_, str> {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("/**") else {
        return Cow::Borrowed(text);
    };
    let inner = inner.strip_suffix("*/").unwrap_or(inner);

    let mut out = String::with_capacity(inner.len());
    for line in inner.lines() {
        let line = line.trim_start();
        let line = line.strip_prefix('*').unwrap_or(line);
        let line = line.strip_prefix(' ').unwrap_or(line);
        out.push_str(line);
        out.push('\n');
    }
    Cow::Owned(out)
}

/// Parse markdown into blocks.
#[must_use]
pub fn parse_markdown(text: &str) -> Vec<Block> {
    let callback = |link: BrokenLink<'_>| {
        Some((CowStr::from(link.reference.into_string()), CowStr::Borrowed("")))
    };
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_with_broken_link_callback(text, options, Some(callback));

    let mut builder = TreeBuilder::new();
    for event in parser {
        builder.process_event(event);
    }
    builder.finish()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Root,
    Quote,
    Item,
    Cell,
}

#[derive(Clone, PartialEq, Eq)]
enum InlineKind {
    Paragraph { implicit: bool },
    Heading(u8),
    Emphasis,
    Strong,
    Strikethrough,
    Link(String),
    /// Image, kept as its alt text.
    Image,
}

enum Frame {
    Blocks {
        kind: BlockKind,
        blocks: Vec<Block>,
    },
    Inlines {
        kind: InlineKind,
        inlines: Vec<Inline>,
    },
    Code {
        language: Option<String>,
        code: String,
    },
    List {
        ordered: bool,
        start: Option<u64>,
        items: Vec<Vec<Block>>,
    },
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<Vec<Block>>>,
        row: Vec<Vec<Block>>,
    },
}

/// Folds the flat pulldown-cmark event stream into nested blocks.
///
/// Inline events arriving directly in a block container (tight list items,
/// table cells) open an implicit paragraph that is closed by the next block
/// event.
struct TreeBuilder {
    stack: Vec<Frame>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Frame::Blocks {
                kind: BlockKind::Root,
                blocks: Vec::new(),
            }],
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.close_implicit_paragraph();
        while self.stack.len() > 1 {
            self.close_top();
        }
        match self.stack.pop() {
            Some(Frame::Blocks { blocks, .. }) => blocks,
            _ => Vec::new(),
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) | Event::InlineMath(code) | Event::DisplayMath(code) => {
                self.push_inline(Inline::Code(code.into_string()));
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                self.push_inline(Inline::Text(html.into_string()));
            }
            Event::SoftBreak => self.push_inline(Inline::SoftBreak),
            Event::HardBreak => self.push_inline(Inline::HardBreak),
            Event::Rule => self.push_block(Block::Rule),
            Event::TaskListMarker(checked) => {
                self.push_inline(Inline::Text(if checked { "[x] " } else { "[ ] " }.to_owned()));
            }
            Event::FootnoteReference(_) => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.open_inlines(InlineKind::Paragraph { implicit: false }),
            Tag::Heading { level, .. } => {
                self.open_inlines(InlineKind::Heading(heading_level_to_num(level)));
            }
            Tag::BlockQuote(_) => self.open_blocks(BlockKind::Quote),
            Tag::CodeBlock(kind) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .filter(|lang| !lang.is_empty())
                        .map(str::to_owned),
                    CodeBlockKind::Indented => None,
                };
                self.close_implicit_paragraph();
                self.stack.push(Frame::Code {
                    language,
                    code: String::new(),
                });
            }
            Tag::List(start) => {
                self.close_implicit_paragraph();
                self.stack.push(Frame::List {
                    ordered: start.is_some(),
                    start,
                    items: Vec::new(),
                });
            }
            Tag::Item => self.open_blocks(BlockKind::Item),
            Tag::Table(_) => {
                self.close_implicit_paragraph();
                self.stack.push(Frame::Table {
                    columns: Vec::new(),
                    rows: Vec::new(),
                    row: Vec::new(),
                });
            }
            Tag::TableHead | Tag::TableRow => {
                if let Some(Frame::Table { row, .. }) = self.stack.last_mut() {
                    row.clear();
                }
            }
            Tag::TableCell => self.open_blocks(BlockKind::Cell),
            Tag::Emphasis => self.open_inlines(InlineKind::Emphasis),
            Tag::Strong => self.open_inlines(InlineKind::Strong),
            Tag::Strikethrough => self.open_inlines(InlineKind::Strikethrough),
            Tag::Link { dest_url, .. } => {
                self.open_inlines(InlineKind::Link(dest_url.into_string()));
            }
            Tag::Image { .. } => self.open_inlines(InlineKind::Image),
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::CodeBlock
            | TagEnd::List(_)
            | TagEnd::Table
            | TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::Link
            | TagEnd::Image => self.close_top(),
            TagEnd::BlockQuote(_) | TagEnd::Item | TagEnd::TableCell => {
                self.close_implicit_paragraph();
                self.close_top();
            }
            TagEnd::TableHead => {
                if let Some(Frame::Table { columns, row, .. }) = self.stack.last_mut() {
                    *columns = row.drain(..).map(|cell| cell_text(&cell)).collect();
                }
            }
            TagEnd::TableRow => {
                if let Some(Frame::Table { rows, row, .. }) = self.stack.last_mut() {
                    rows.push(std::mem::take(row));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(Frame::Code { code, .. }) = self.stack.last_mut() {
            code.push_str(text);
        } else {
            self.push_inline(Inline::Text(text.to_owned()));
        }
    }

    fn open_blocks(&mut self, kind: BlockKind) {
        self.close_implicit_paragraph();
        self.stack.push(Frame::Blocks {
            kind,
            blocks: Vec::new(),
        });
    }

    fn open_inlines(&mut self, kind: InlineKind) {
        if matches!(kind, InlineKind::Paragraph { .. } | InlineKind::Heading(_)) {
            self.close_implicit_paragraph();
        } else {
            self.ensure_inline_context();
        }
        self.stack.push(Frame::Inlines {
            kind,
            inlines: Vec::new(),
        });
    }

    fn ensure_inline_context(&mut self) {
        if matches!(self.stack.last(), Some(Frame::Blocks { .. })) {
            self.stack.push(Frame::Inlines {
                kind: InlineKind::Paragraph { implicit: true },
                inlines: Vec::new(),
            });
        }
    }

    fn close_implicit_paragraph(&mut self) {
        if matches!(
            self.stack.last(),
            Some(Frame::Inlines {
                kind: InlineKind::Paragraph { implicit: true },
                ..
            })
        ) {
            self.close_top();
        }
    }

    fn push_block(&mut self, block: Block) {
        self.close_implicit_paragraph();
        if let Some(Frame::Blocks { blocks, .. }) = self.stack.last_mut() {
            blocks.push(block);
        }
    }

    fn push_inline(&mut self, inline: Inline) {
        self.ensure_inline_context();
        if let Some(Frame::Inlines { inlines, .. }) = self.stack.last_mut() {
            if let (Some(Inline::Text(last)), Inline::Text(text)) = (inlines.last_mut(), &inline) {
                last.push_str(text);
                return;
            }
            inlines.push(inline);
        }
    }

    /// Pop the innermost frame and attach what it built to its parent.
    fn close_top(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        let Some(frame) = self.stack.pop() else {
            return;
        };
        match frame {
            Frame::Blocks { kind, blocks } => match kind {
                BlockKind::Root => self.stack.push(Frame::Blocks { kind, blocks }),
                BlockKind::Quote => self.push_block(Block::BlockQuote { content: blocks }),
                BlockKind::Item => {
                    if let Some(Frame::List { items, .. }) = self.stack.last_mut() {
                        items.push(blocks);
                    }
                }
                BlockKind::Cell => {
                    if let Some(Frame::Table { row, .. }) = self.stack.last_mut() {
                        row.push(blocks);
                    }
                }
            },
            Frame::Inlines { kind, inlines } => match kind {
                InlineKind::Paragraph { .. } => {
                    if !inlines.is_empty() {
                        self.push_block(Block::Paragraph { content: inlines });
                    }
                }
                InlineKind::Heading(level) => self.push_block(Block::Heading {
                    level,
                    content: inlines,
                }),
                InlineKind::Emphasis => self.push_inline(Inline::Emphasis(inlines)),
                InlineKind::Strong => self.push_inline(Inline::Strong(inlines)),
                InlineKind::Strikethrough => self.push_inline(Inline::Strikethrough(inlines)),
                InlineKind::Link(target) => self.push_inline(Inline::Link {
                    target,
                    label: inlines,
                }),
                InlineKind::Image => {
                    for inline in inlines {
                        self.push_inline(inline);
                    }
                }
            },
            Frame::Code { language, code } => self.push_block(Block::CodeBlock { language, code }),
            Frame::List {
                ordered,
                start,
                items,
            } => self.push_block(Block::List {
                ordered,
                start,
                items,
            }),
            Frame::Table { columns, rows, .. } => self.push_block(Block::Table { columns, rows }),
        }
    }
}

fn cell_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .filter_map(|block| match block {
            Block::Paragraph { content } => Some(crate::content::plain_text(content)),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_owned())
    }

    #[test]
    fn test_paragraphs_and_inline_formatting() {
        let blocks = parse_markdown("Hello *big* **bold** `code`\n\nSecond ~~old~~");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph {
                    content: vec![
                        text("Hello "),
                        Inline::Emphasis(vec![text("big")]),
                        text(" "),
                        Inline::Strong(vec![text("bold")]),
                        text(" "),
                        Inline::Code("code".to_owned()),
                    ]
                },
                Block::Paragraph {
                    content: vec![text("Second "), Inline::Strikethrough(vec![text("old")])]
                },
            ]
        );
    }

    #[test]
    fn test_symbol_links_stay_symbolic() {
        let blocks = parse_markdown("See [Widget] and [the builder][com.example.Widget.Builder].");
        assert_eq!(
            blocks,
            vec![Block::Paragraph {
                content: vec![
                    text("See "),
                    Inline::link("Widget", "Widget"),
                    text(" and "),
                    Inline::link("com.example.Widget.Builder", "the builder"),
                    text("."),
                ]
            }]
        );
    }

    #[test]
    fn test_external_link() {
        let blocks = parse_markdown("[docs](https://example.com/docs)");
        assert_eq!(
            blocks,
            vec![Block::Paragraph {
                content: vec![Inline::link("https://example.com/docs", "docs")]
            }]
        );
    }

    #[test]
    fn test_images_keep_alt_text() {
        let blocks = parse_markdown("See ![flow diagram](img/flow.png) below.");
        assert_eq!(
            blocks,
            vec![Block::Paragraph {
                content: vec![Inline::Text("See flow diagram below.".to_owned())]
            }]
        );
    }

    #[test]
    fn test_linked_image_becomes_link_label() {
        let blocks = parse_markdown("[![build](badge.svg)](https://ci.example.com)");
        assert_eq!(
            blocks,
            vec![Block::Paragraph {
                content: vec![Inline::link("https://ci.example.com", "build")]
            }]
        );
    }

    #[test]
    fn test_tight_list_items_get_paragraphs() {
        let blocks = parse_markdown("- one\n- two\n  1. nested");
        assert_eq!(
            blocks,
            vec![Block::List {
                ordered: false,
                start: None,
                items: vec![
                    vec![Block::text("one")],
                    vec![
                        Block::text("two"),
                        Block::List {
                            ordered: true,
                            start: Some(1),
                            items: vec![vec![Block::text("nested")]],
                        },
                    ],
                ],
            }]
        );
    }

    #[test]
    fn test_table() {
        let blocks = parse_markdown("| Name | Value |\n|---|---|\n| a | `1` |\n| b | 2 |");
        assert_eq!(
            blocks,
            vec![Block::Table {
                columns: vec!["Name".to_owned(), "Value".to_owned()],
                rows: vec![
                    vec![
                        vec![Block::text("a")],
                        vec![Block::Paragraph {
                            content: vec![Inline::Code("1".to_owned())]
                        }],
                    ],
                    vec![vec![Block::text("b")], vec![Block::text("2")]],
                ],
            }]
        );
    }

    #[test]
    fn test_code_block_language() {
        let blocks = parse_markdown("```kotlin\nval x = 1\n```\n\n```\nplain\n```");
        assert_eq!(
            blocks,
            vec![
                Block::CodeBlock {
                    language: Some("kotlin".to_owned()),
                    code: "val x = 1\n".to_owned(),
                },
                Block::CodeBlock {
                    language: None,
                    code: "plain\n".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_heading_and_quote() {
        let blocks = parse_markdown("## Usage\n\n> quoted");
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 2,
                    content: vec![text("Usage")]
                },
                Block::BlockQuote {
                    content: vec![Block::text("quoted")]
                },
            ]
        );
    }

    #[test]
    fn test_doc_comment_tags() {
        let comment = parse_doc_comment(
            "Builds the widget.\n\n@param name the widget name\n  spanning lines\n@return the [Widget]\n@throws IllegalStateException if built twice\n@see [Widget.Builder]\n@since 1.2",
        );
        assert_eq!(comment.description, vec![Block::text("Builds the widget.")]);

        let kinds: Vec<&TagKind> = comment.tags.iter().map(|t| &t.kind).collect();
        assert_eq!(
            kinds,
            [
                &TagKind::Param,
                &TagKind::Return,
                &TagKind::Throws,
                &TagKind::See,
                &TagKind::Since
            ]
        );
        assert_eq!(comment.tags[0].subject.as_deref(), Some("name"));
        assert_eq!(
            comment.tags[0].content,
            vec![Block::Paragraph {
                content: vec![text("the widget name"), Inline::SoftBreak, text("spanning lines")]
            }]
        );
        assert_eq!(comment.tags[1].subject, None);
        assert_eq!(comment.tags[2].subject.as_deref(), Some("IllegalStateException"));
        assert_eq!(comment.tags[3].subject.as_deref(), Some("Widget.Builder"));
        assert!(comment.tags[3].content.is_empty());
    }

    #[test]
    fn test_tags_inside_fences_are_code() {
        let comment = parse_doc_comment("Example:\n```\n@Test\nfun f() {}\n```");
        assert!(comment.tags.is_empty());
        assert_eq!(
            comment.description[1],
            Block::CodeBlock {
                language: None,
                code: "@Test\nfun f() {}\n".to_owned(),
            }
        );
    }

    #[test]
    fn test_comment_markers_are_stripped() {
        let comment = parse_doc_comment("/**\n * Does a thing.\n *\n * @since 2.0\n */");
        assert_eq!(comment.description, vec![Block::text("Does a thing.")]);
        assert_eq!(comment.tags.len(), 1);
        assert_eq!(comment.tags[0].kind, TagKind::Since);
        assert_eq!(comment.tags[0].content, vec![Block::text("2.0")]);
    }
}
