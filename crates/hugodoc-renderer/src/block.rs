//! Block-level markup: paragraphs, tables, lists and code blocks.

use hugodoc_model::Block;

use crate::style::TableStrategy;
use crate::util::{
    collapse_cell, ensure_blank_line, ensure_newline, escape_html, indent_continuation,
    longest_backtick_run, quote_lines,
};
use crate::writer::{ListState, PageWriter, RenderResult};

impl PageWriter<'_> {
    pub fn paragraph(&mut self, body: impl FnOnce(&mut Self) -> RenderResult) -> RenderResult {
        self.begin_block();
        body(self)
    }

    /// Heading; inside a table cell it degrades to strong text.
    pub fn heading(
        &mut self,
        level: u8,
        body: impl FnOnce(&mut Self) -> RenderResult,
    ) -> RenderResult {
        self.begin_block();
        if self.context().in_table_cell() {
            return self.strong(body);
        }
        self.raw(&"#".repeat(usize::from(level.clamp(1, 6))));
        self.raw(" ");
        body(self)
    }

    pub fn block_quote(&mut self, body: impl FnOnce(&mut Self) -> RenderResult) -> RenderResult {
        self.begin_block();
        if self.context().in_table_cell() {
            return self.container(body);
        }
        let start = self.out.len();
        let result = self.container(body);
        let inner = self.out.split_off(start.min(self.out.len()));
        self.raw(&quote_lines(&inner));
        result
    }

    pub fn rule(&mut self) {
        self.begin_block();
        self.raw("***");
    }

    /// Fenced code block. The body is written in code context.
    ///
    /// Without a language the style's default language is used. A pipe
    /// table cell cannot hold a fence, so there the block becomes a code span.
    pub fn code_block(
        &mut self,
        language: Option<&str>,
        body: impl FnOnce(&mut Self) -> RenderResult,
    ) -> RenderResult {
        if self.in_plain_cell() {
            self.begin_block();
            let start = self.out.len();
            let result = self.scoped(self.context().code_block(), body);
            let code = self.out.split_off(start);
            if !code.is_empty() {
                let longest = longest_backtick_run(&code);
                let fence = "`".repeat(longest + 1);
                let pad = if longest > 0 { " " } else { "" };
                self.raw(&format!("{fence}{pad}{code}{pad}{fence}"));
            }
            return result;
        }
        let style = self.style();
        let language = language
            .filter(|language| !language.is_empty())
            .unwrap_or(&style.default_language);

        self.begin_block();
        self.raw("```");
        self.raw(language);
        self.raw("\n");
        let result = self.scoped(self.context().code_block(), body);
        ensure_newline(&mut self.out);
        self.raw("```");
        result
    }

    /// Table with a header row; `rows` writes the rows with [`table_row`].
    ///
    /// [`table_row`]: Self::table_row
    pub fn table<S: AsRef<str>>(
        &mut self,
        columns: &[S],
        rows: impl FnOnce(&mut Self) -> RenderResult,
    ) -> RenderResult {
        self.begin_block();
        match self.style().table {
            TableStrategy::Plain => {
                let header = columns
                    .iter()
                    .map(AsRef::as_ref)
                    .collect::<Vec<_>>()
                    .join(" | ");
                self.raw(&format!("| {header} |\n"));
                self.raw(&format!("|{}\n", "---|".repeat(columns.len())));
                rows(self)
            }
            TableStrategy::Rich => {
                self.raw("<table>\n<thead>\n<tr>\n");
                for column in columns {
                    self.raw(&format!("<th>{}</th>\n", escape_html(column.as_ref())));
                }
                self.raw("</tr>\n</thead>\n<tbody>\n");
                let result = rows(self);
                ensure_newline(&mut self.out);
                self.raw("</tbody>\n</table>");
                result
            }
        }
    }

    pub fn table_row(&mut self, cells: impl FnOnce(&mut Self) -> RenderResult) -> RenderResult {
        ensure_newline(&mut self.out);
        match self.style().table {
            TableStrategy::Plain => {
                self.raw("|");
                let result = cells(self);
                self.raw("\n");
                result
            }
            TableStrategy::Rich => {
                self.raw("<tr>\n");
                let result = cells(self);
                ensure_newline(&mut self.out);
                self.raw("</tr>\n");
                result
            }
        }
    }

    /// Table cell. The body is written in table-cell context.
    ///
    /// Pipe table cells are folded onto one line; rich cells are wrapped in
    /// the markdown shortcode so the site engine renders their content.
    pub fn table_cell(&mut self, body: impl FnOnce(&mut Self) -> RenderResult) -> RenderResult {
        let ctx = self.context().table_cell();
        match self.style().table {
            TableStrategy::Plain => {
                self.raw(" ");
                let start = self.out.len();
                let result = self.scoped(ctx, |w| w.container(body));
                let cell = self.out.split_off(start.min(self.out.len()));
                self.raw(&collapse_cell(&cell));
                self.raw(" |");
                result
            }
            TableStrategy::Rich => {
                let shortcode = &self.style().shortcodes.markdown;
                self.raw(&format!("<td>{{{{% {shortcode} %}}}}\n"));
                let result = self.scoped(ctx, |w| w.container(body));
                ensure_newline(&mut self.out);
                self.raw(&format!("{{{{% /{shortcode} %}}}}</td>\n"));
                result
            }
        }
    }

    /// List; `items` writes the items with [`list_item`].
    ///
    /// Inside a table cell the list is written as HTML. Elsewhere it starts
    /// on a fresh line, or after exactly one blank line when the style
    /// forces it.
    ///
    /// [`list_item`]: Self::list_item
    pub fn list(
        &mut self,
        ordered: bool,
        start: Option<u64>,
        items: impl FnOnce(&mut Self) -> RenderResult,
    ) -> RenderResult {
        let next = start.unwrap_or(1);
        if self.context().in_table_cell() {
            self.begin_block();
            let tag = if ordered { "ol" } else { "ul" };
            if ordered && next != 1 {
                self.raw(&format!("<ol start=\"{next}\">"));
            } else {
                self.raw(&format!("<{tag}>"));
            }
            let result = self.nested_list(ordered, next, items);
            self.raw(&format!("</{tag}>"));
            return result;
        }

        if self.container_has_content() {
            if self.style().blank_line_before_lists {
                ensure_blank_line(&mut self.out);
            } else {
                ensure_newline(&mut self.out);
            }
        }
        self.nested_list(ordered, next, items)
    }

    fn nested_list(
        &mut self,
        ordered: bool,
        next: u64,
        items: impl FnOnce(&mut Self) -> RenderResult,
    ) -> RenderResult {
        self.lists.push(ListState { ordered, next });
        let result = items(self);
        self.lists.pop();
        result
    }

    /// List item; continuation lines of the body are indented under the marker.
    pub fn list_item(&mut self, body: impl FnOnce(&mut Self) -> RenderResult) -> RenderResult {
        if self.context().in_table_cell() {
            self.raw("<li>");
            let result = self.container(body);
            self.raw("</li>");
            return result;
        }

        let marker = match self.lists.last_mut() {
            Some(ListState {
                ordered: true,
                next,
            }) => {
                let marker = format!("{next}. ");
                *next += 1;
                marker
            }
            _ => "- ".to_owned(),
        };
        ensure_newline(&mut self.out);
        self.raw(&marker);
        let start = self.out.len();
        let result = self.container(body);
        let content = self.out.split_off(start.min(self.out.len()));
        self.raw(&indent_continuation(&content, marker.len()));
        result
    }

    pub fn block(&mut self, block: &Block) -> RenderResult {
        match block {
            Block::Paragraph { content } => self.paragraph(|w| w.inlines(content)),
            Block::Heading { level, content } => self.heading(*level, |w| w.inlines(content)),
            Block::CodeBlock { language, code } => self.code_block(language.as_deref(), |w| {
                w.text(code);
                Ok(())
            }),
            Block::List {
                ordered,
                start,
                items,
            } => self.list(*ordered, *start, |w| {
                for item in items {
                    w.list_item(|w| w.blocks(item))?;
                }
                Ok(())
            }),
            Block::Table { columns, rows } => self.table(columns, |w| {
                for row in rows {
                    w.table_row(|w| {
                        for cell in row {
                            w.table_cell(|w| w.blocks(cell))?;
                        }
                        Ok(())
                    })?;
                }
                Ok(())
            }),
            Block::BlockQuote { content } => self.block_quote(|w| w.blocks(content)),
            Block::Rule => {
                self.rule();
                Ok(())
            }
        }
    }

    pub fn blocks(&mut self, blocks: &[Block]) -> RenderResult {
        for block in blocks {
            self.block(block)?;
        }
        Ok(())
    }
}
