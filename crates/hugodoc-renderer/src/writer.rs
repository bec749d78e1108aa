//! Page writer: one render session and its inline markup.
//!
//! A [`PageWriter`] owns the output buffer and [`RenderContext`] of a single
//! page. Nested constructs take their body as a closure; the writer switches
//! context around the closure and restores it afterwards, even when the body
//! returns an error.

use hugodoc_model::Inline;

use crate::context::RenderContext;
use crate::error::{PageWarning, RenderError};
use crate::link::{LinkResolver, RenderableLink};
use crate::style::{RenderStyle, TableStrategy};
use crate::util::{ensure_blank_line, escape_markup, longest_backtick_run};

/// Result of a nested render body.
pub type RenderResult = Result<(), RenderError>;

#[derive(Clone, Copy, Debug)]
pub(crate) struct ListState {
    pub(crate) ordered: bool,
    pub(crate) next: u64,
}

/// Output buffer and context for one page.
pub struct PageWriter<'a> {
    pub(crate) out: String,
    ctx: RenderContext,
    style: &'a RenderStyle,
    links: LinkResolver<'a>,
    location: Option<String>,
    /// Offset where the innermost block container (page, list item, cell,
    /// quote) began.
    pub(crate) container_start: usize,
    pub(crate) lists: Vec<ListState>,
    /// Fence of the innermost open code span.
    span_fence: String,
    warnings: Vec<PageWarning>,
}

impl<'a> PageWriter<'a> {
    #[must_use]
    pub fn new(style: &'a RenderStyle, links: LinkResolver<'a>) -> Self {
        Self {
            out: String::new(),
            ctx: RenderContext::default(),
            style,
            links,
            location: None,
            container_start: 0,
            lists: Vec::new(),
            span_fence: "`".to_owned(),
            warnings: Vec::new(),
        }
    }

    /// Location of the page being written, used for relative links.
    #[must_use]
    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }

    #[must_use]
    pub fn context(&self) -> RenderContext {
        self.ctx
    }

    #[must_use]
    pub fn style(&self) -> &'a RenderStyle {
        self.style
    }

    #[must_use]
    pub fn links(&self) -> LinkResolver<'a> {
        self.links
    }

    /// Text written so far.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.out
    }

    /// Complete the page, returning its text and the warnings collected.
    ///
    /// Fails if a construct left the context changed.
    pub fn finish(mut self) -> Result<(String, Vec<PageWarning>), RenderError> {
        self.ctx.ensure_restored()?;
        let end = self.out.trim_end().len();
        self.out.truncate(end);
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        Ok((self.out, self.warnings))
    }

    /// Run `body` with `ctx` active, then restore the previous context.
    pub(crate) fn scoped<R>(
        &mut self,
        ctx: RenderContext,
        body: impl FnOnce(&mut Self) -> Result<R, RenderError>,
    ) -> Result<R, RenderError> {
        let saved = std::mem::replace(&mut self.ctx, ctx);
        let result = body(self);
        self.ctx = saved;
        result
    }

    /// Run `body` as a new block container starting at the current offset.
    pub(crate) fn container<R>(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<R, RenderError>,
    ) -> Result<R, RenderError> {
        let saved = std::mem::replace(&mut self.container_start, self.out.len());
        let result = body(self);
        self.container_start = saved;
        result
    }

    /// Whether the innermost container already has visible content.
    pub(crate) fn container_has_content(&self) -> bool {
        self.out
            .get(self.container_start..)
            .is_some_and(|written| !written.trim().is_empty())
    }

    /// Separate a new block from earlier content of the same container.
    pub(crate) fn begin_block(&mut self) {
        if self.container_has_content() {
            ensure_blank_line(&mut self.out);
        }
    }

    /// Inside a cell of a pipe table, where everything must stay on one line.
    pub(crate) fn in_plain_cell(&self) -> bool {
        self.ctx.in_table_cell() && self.style.table == TableStrategy::Plain
    }

    pub(crate) fn raw(&mut self, markup: &str) {
        self.out.push_str(markup);
    }

    pub(crate) fn warn(&mut self, warning: PageWarning) {
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    fn push_cell_safe(&mut self, text: &str) {
        if self.in_plain_cell() {
            self.out.push_str(&text.replace('|', "\\|"));
        } else {
            self.out.push_str(text);
        }
    }

    /// Write text, escaped for the current context.
    ///
    /// Code context is written raw; prose is HTML-escaped.
    pub fn text(&mut self, text: &str) {
        if self.ctx.in_code_block() {
            self.push_cell_safe(text);
        } else {
            self.push_cell_safe(&escape_markup(text));
        }
    }

    /// Inline code literal.
    pub fn code(&mut self, code: &str) {
        if self.ctx.in_code_block() {
            self.text(code);
            return;
        }
        let longest = longest_backtick_run(code);
        let fence = "`".repeat(longest + 1);
        let pad = if longest > 0 { " " } else { "" };
        self.out.push_str(&fence);
        self.out.push_str(pad);
        self.push_cell_safe(code);
        self.out.push_str(pad);
        self.out.push_str(&fence);
    }

    /// Code span whose body may contain links (signatures).
    ///
    /// `longest_run` is the longest run of backticks in the body text; the
    /// span is fenced with one more. Nothing is written when the body is
    /// empty.
    pub fn code_span(
        &mut self,
        longest_run: usize,
        body: impl FnOnce(&mut Self) -> RenderResult,
    ) -> RenderResult {
        if self.ctx.in_code_block() {
            return body(self);
        }
        let fence = "`".repeat(longest_run + 1);
        let pad = if longest_run > 0 { " " } else { "" };
        let start = self.out.len();
        self.out.push_str(&fence);
        self.out.push_str(pad);
        let opened = self.out.len();

        let outer = std::mem::replace(&mut self.span_fence, fence);
        let result = self.scoped(self.ctx.code_block(), body);
        let fence = std::mem::replace(&mut self.span_fence, outer);

        if self.out.len() == opened {
            self.out.truncate(start);
        } else {
            self.out.push_str(pad);
            self.out.push_str(&fence);
        }
        result
    }

    /// Signature inlines as a code span with live links.
    pub fn signature(&mut self, inlines: &[Inline]) -> RenderResult {
        self.code_span(inline_backtick_run(inlines), |w| w.inlines(inlines))
    }

    fn delimited(
        &mut self,
        marker: &str,
        body: impl FnOnce(&mut Self) -> RenderResult,
    ) -> RenderResult {
        if self.ctx.in_code_block() {
            return body(self);
        }
        self.out.push_str(marker);
        let result = body(self);
        self.out.push_str(marker);
        result
    }

    pub fn emphasis(&mut self, body: impl FnOnce(&mut Self) -> RenderResult) -> RenderResult {
        self.delimited("*", body)
    }

    pub fn strong(&mut self, body: impl FnOnce(&mut Self) -> RenderResult) -> RenderResult {
        self.delimited("**", body)
    }

    pub fn strikethrough(&mut self, body: impl FnOnce(&mut Self) -> RenderResult) -> RenderResult {
        self.delimited("~~", body)
    }

    /// Link to a raw target: a URL or a symbolic reference into the tree.
    pub fn link(
        &mut self,
        target: &str,
        label: impl FnOnce(&mut Self) -> RenderResult,
    ) -> RenderResult {
        let link = self.links.resolve(target);
        if !link.is_resolved() {
            self.warn(PageWarning::UnresolvedLink {
                reference: target.to_owned(),
            });
        }
        self.write_link(&link, label)
    }

    /// Write an already classified link.
    ///
    /// In code context the link is wrapped in code delimiters and padded
    /// with spaces so that it closes the surrounding code span and reopens
    /// it afterwards: `` `[`label`](destination)` ``. The delimiters use the
    /// fence of the open span.
    pub fn write_link(
        &mut self,
        link: &RenderableLink,
        label: impl FnOnce(&mut Self) -> RenderResult,
    ) -> RenderResult {
        let destination = link.destination(self.style, self.location.as_deref());
        let (open, middle, close) = if self.ctx.in_code_block() {
            let fence = &self.span_fence;
            let pad = if fence.len() > 1 { " " } else { "" };
            (
                format!(" {fence}[{fence}{pad}"),
                format!("{pad}{fence}]("),
                format!("){fence} "),
            )
        } else {
            ("[".to_owned(), "](".to_owned(), ")".to_owned())
        };
        self.out.push_str(&open);
        let result = label(self);
        self.out.push_str(&middle);
        self.out.push_str(&destination);
        self.out.push_str(&close);
        result
    }

    pub fn soft_break(&mut self) {
        self.out.push('\n');
    }

    pub fn hard_break(&mut self) {
        if self.ctx.in_code_block() {
            self.out.push('\n');
        } else if self.ctx.in_table_cell() {
            self.out.push_str("<br>");
        } else {
            self.out.push_str("\\\n");
        }
    }

    pub fn inline(&mut self, inline: &Inline) -> RenderResult {
        match inline {
            Inline::Text(text) => self.text(text),
            Inline::Code(code) => self.code(code),
            Inline::Emphasis(children) => self.emphasis(|w| w.inlines(children))?,
            Inline::Strong(children) => self.strong(|w| w.inlines(children))?,
            Inline::Strikethrough(children) => self.strikethrough(|w| w.inlines(children))?,
            Inline::Link { target, label } => self.link(target, |w| w.inlines(label))?,
            Inline::SoftBreak => self.soft_break(),
            Inline::HardBreak => self.hard_break(),
        }
        Ok(())
    }

    pub fn inlines(&mut self, inlines: &[Inline]) -> RenderResult {
        for inline in inlines {
            self.inline(inline)?;
        }
        Ok(())
    }
}

/// Longest run of backticks in the text leaves of `inlines`.
fn inline_backtick_run(inlines: &[Inline]) -> usize {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text(text) | Inline::Code(text) => longest_backtick_run(text),
            Inline::Emphasis(children)
            | Inline::Strong(children)
            | Inline::Strikethrough(children) => inline_backtick_run(children),
            Inline::Link { label, .. } => inline_backtick_run(label),
            Inline::SoftBreak | Inline::HardBreak => 0,
        })
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MapLocations;
    use pretty_assertions::assert_eq;

    fn locations() -> MapLocations {
        MapLocations::new([("com.example.Widget", "core/com.example/-widget/index.md")])
    }

    fn write(
        style: &RenderStyle,
        body: impl FnOnce(&mut PageWriter<'_>) -> RenderResult,
    ) -> (String, Vec<PageWarning>) {
        let locations = locations();
        let mut writer = PageWriter::new(style, LinkResolver::new(&locations));
        body(&mut writer).unwrap();
        writer.finish().unwrap()
    }

    fn text_of(
        style: &RenderStyle,
        body: impl FnOnce(&mut PageWriter<'_>) -> RenderResult,
    ) -> String {
        write(style, body).0
    }

    fn label(text: &'static str) -> impl FnOnce(&mut PageWriter<'_>) -> RenderResult {
        move |w| {
            w.text(text);
            Ok(())
        }
    }

    fn code_context_link(target: &str) -> String {
        let locations = locations();
        let style = RenderStyle::hugo();
        let mut writer = PageWriter::new(&style, LinkResolver::new(&locations));
        let ctx = writer.context().code_block();
        writer
            .scoped(ctx, |w| w.link(target, label("Widget")))
            .unwrap();
        writer.output().to_owned()
    }

    #[test]
    fn test_prose_text_is_escaped() {
        let out = text_of(&RenderStyle::hugo(), |w| {
            w.text("List<T> & co");
            Ok(())
        });
        assert_eq!(out, "List&lt;T&gt; &amp; co\n");
    }

    #[test]
    fn test_internal_link_uses_shortcode() {
        let out = text_of(&RenderStyle::hugo(), |w| w.link("com.example.Widget", label("Widget")));
        assert_eq!(
            out,
            "[Widget]({{< relref \"/core/com.example/-widget/index.md\" >}})\n"
        );
    }

    #[test]
    fn test_external_link_is_raw() {
        let out = text_of(&RenderStyle::hugo(), |w| w.link("https://example.com", label("site")));
        assert_eq!(out, "[site](https://example.com)\n");
    }

    #[test]
    fn test_code_context_link_is_padded_and_delimited() {
        for target in ["com.example.Widget", "https://example.com", "Missing"] {
            let out = code_context_link(target);
            assert!(out.starts_with(' ') && !out.starts_with("  "), "{out:?}");
            assert!(out.ends_with(' ') && !out.ends_with("  "), "{out:?}");
            assert!(out.contains("`Widget`"), "{out:?}");
            assert!(out.starts_with(" `[`Widget`]("), "{out:?}");
            assert!(out.ends_with(")` "), "{out:?}");
        }
    }

    #[test]
    fn test_code_context_link_form() {
        assert_eq!(
            code_context_link("https://example.com"),
            " `[`Widget`](https://example.com)` "
        );
    }

    #[test]
    fn test_signature_code_span_with_link() {
        let signature = vec![
            Inline::Text("fun build(): ".to_owned()),
            Inline::link("com.example.Widget", "Widget"),
        ];
        let out = text_of(&RenderStyle::hugo(), |w| w.signature(&signature));
        assert_eq!(
            out,
            "`fun build():  `[`Widget`]({{< relref \"/core/com.example/-widget/index.md\" >}})` `\n"
        );
    }

    #[test]
    fn test_signature_with_backtick_identifier() {
        let signature = vec![Inline::Text("fun `my test`(): Unit".to_owned())];
        let out = text_of(&RenderStyle::hugo(), |w| w.signature(&signature));
        assert_eq!(out, "`` fun `my test`(): Unit ``\n");
    }

    #[test]
    fn test_signature_link_reuses_span_fence() {
        let signature = vec![
            Inline::Text("fun `when`(): ".to_owned()),
            Inline::link("com.example.Widget", "Widget"),
        ];
        let out = text_of(&RenderStyle::hugo(), |w| w.signature(&signature));
        assert_eq!(
            out,
            "`` fun `when`():  ``[`` Widget ``]({{< relref \"/core/com.example/-widget/index.md\" >}})``  ``\n"
        );
    }

    #[test]
    fn test_empty_code_span_writes_nothing() {
        let out = text_of(&RenderStyle::hugo(), |w| w.code_span(0, |_| Ok(())));
        assert_eq!(out, "");
    }

    #[test]
    fn test_code_literal_with_backticks() {
        let out = text_of(&RenderStyle::hugo(), |w| {
            w.code("a`b");
            Ok(())
        });
        assert_eq!(out, "`` a`b ``\n");
    }

    #[test]
    fn test_unresolved_link_warns_once() {
        let (out, warnings) = write(&RenderStyle::hugo(), |w| {
            w.link("Missing", label("m"))?;
            w.link("Missing", label("m"))
        });
        assert!(out.contains(r#"{{< relref "Missing" >}}"#), "{out}");
        assert_eq!(
            warnings,
            vec![PageWarning::UnresolvedLink {
                reference: "Missing".to_owned()
            }]
        );
    }

    #[test]
    fn test_markdown_style_links_are_relative() {
        let locations = locations();
        let style = RenderStyle::markdown();
        let mut writer = PageWriter::new(&style, LinkResolver::new(&locations))
            .with_location(Some("core/com.example/index.md".to_owned()));
        writer.link("com.example.Widget", label("Widget")).unwrap();
        assert_eq!(writer.output(), "[Widget](-widget/index.md)");
    }

    #[test]
    fn test_context_restored_when_body_fails() {
        let locations = locations();
        let style = RenderStyle::hugo();
        let mut writer = PageWriter::new(&style, LinkResolver::new(&locations));
        let result = writer.code_span(0, |_| {
            Err(RenderError::MalformedNode {
                qualified_name: "x".to_owned(),
            })
        });
        assert!(result.is_err());
        assert_eq!(writer.context(), RenderContext::default());
        assert!(writer.finish().is_ok());
    }

    #[test]
    fn test_finish_detects_context_leak() {
        let locations = locations();
        let style = RenderStyle::hugo();
        let mut writer = PageWriter::new(&style, LinkResolver::new(&locations));
        writer.ctx = writer.ctx.table_cell();
        let err = writer.finish().unwrap_err();
        assert!(matches!(
            err,
            RenderError::ContextLeak {
                in_code_block: false,
                in_table_cell: true
            }
        ));
    }

    #[test]
    fn test_inline_formatting() {
        let inlines = vec![
            Inline::Emphasis(vec![Inline::Text("a".to_owned())]),
            Inline::Text(" ".to_owned()),
            Inline::Strong(vec![Inline::Text("b".to_owned())]),
            Inline::Text(" ".to_owned()),
            Inline::Strikethrough(vec![Inline::Text("c".to_owned())]),
            Inline::HardBreak,
            Inline::Code("d".to_owned()),
        ];
        let out = text_of(&RenderStyle::hugo(), |w| w.inlines(&inlines));
        assert_eq!(out, "*a* **b** ~~c~~\\\n`d`\n");
    }
}
