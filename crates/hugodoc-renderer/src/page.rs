//! Page assembly: front matter followed by the rendered node group.
//!
//! The body follows the Dokka markdown layout: breadcrumbs, a heading,
//! then for every node its signature, description and tag sections, and
//! finally one summary table per member category.

use std::collections::BTreeMap;
use std::sync::Arc;

use hugodoc_model::{DocTag, DocumentationNode, NodeGroup, NodeKind, PathEntry, TagKind};

use crate::error::{PageWarning, RenderError};
use crate::front_matter::FrontMatter;
use crate::link::{LinkResolver, LocationService};
use crate::style::RenderStyle;
use crate::title::{display_package_name, page_title, title_candidates};
use crate::writer::{PageWriter, RenderResult};

/// A fully rendered page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPage {
    /// Title written to the front matter (the placeholder when ambiguous).
    pub title: String,
    /// Complete page text, front matter included.
    pub text: String,
    pub warnings: Vec<PageWarning>,
}

/// Renders node groups into complete pages for one output style.
///
/// The assembler is read-only and can be shared between threads; every call
/// to [`assemble_page`](Self::assemble_page) uses its own writer.
#[derive(Clone, Copy)]
pub struct PageAssembler<'a> {
    style: &'a RenderStyle,
    locations: &'a dyn LocationService,
}

impl<'a> PageAssembler<'a> {
    #[must_use]
    pub fn new(style: &'a RenderStyle, locations: &'a dyn LocationService) -> Self {
        Self { style, locations }
    }

    #[must_use]
    pub fn style(&self) -> &'a RenderStyle {
        self.style
    }

    /// Render one page.
    ///
    /// An ambiguous title produces a warning and the style's placeholder
    /// title, or an error when the style is strict. A node with an empty
    /// path fails the page.
    pub fn assemble_page(&self, group: &NodeGroup) -> Result<RenderedPage, RenderError> {
        let mut warnings = Vec::new();
        let title = if let Some(title) = page_title(group)? {
            title
        } else {
            let candidates: Vec<String> = title_candidates(group)?.into_iter().collect();
            if self.style.strict_titles {
                return Err(RenderError::AmbiguousTitle { candidates });
            }
            tracing::warn!(
                page = %group.first().qualified_name,
                candidates = ?candidates,
                "Ambiguous page title"
            );
            warnings.push(PageWarning::AmbiguousTitle { candidates });
            self.style.untitled.clone()
        };

        let link_title = group.single_package().map(|_| title.as_str());
        let front_matter =
            FrontMatter::for_page(self.style, &title, link_title).render(self.style.front_matter)?;

        let links = LinkResolver::new(self.locations);
        let location = group
            .first()
            .path
            .last()
            .and_then(|entry| links.location(entry));
        let mut writer = PageWriter::new(self.style, links).with_location(location);
        write_body(&mut writer, group)?;
        let (body, body_warnings) = writer.finish()?;
        warnings.extend(body_warnings);

        let mut text = front_matter;
        text.push('\n');
        text.push_str(&body);
        Ok(RenderedPage {
            title,
            text,
            warnings,
        })
    }
}

fn write_body(w: &mut PageWriter<'_>, group: &NodeGroup) -> RenderResult {
    let first = group.first();
    if w.style().breadcrumbs {
        breadcrumbs(w, first)?;
    }
    w.heading(1, |w| {
        w.text(display_name(first));
        Ok(())
    })?;
    for node in group.nodes() {
        node_docs(w, node)?;
        member_sections(w, node)?;
    }
    Ok(())
}

fn display_name(node: &DocumentationNode) -> &str {
    match node.kind {
        NodeKind::Package => display_package_name(&node.qualified_name),
        _ if node.name.is_empty() => &node.qualified_name,
        _ => &node.name,
    }
}

fn entry_label(entry: &PathEntry) -> Option<&str> {
    match entry.kind {
        NodeKind::Package => Some(display_package_name(&entry.qualified_name)),
        _ if entry.name.is_empty() => None,
        _ => Some(&entry.name),
    }
}

/// `[core](..) / [com.example](..) / [Widget](..)`; none on module pages.
fn breadcrumbs(w: &mut PageWriter<'_>, node: &DocumentationNode) -> RenderResult {
    if node.path.len() < 2 {
        return Ok(());
    }
    w.paragraph(|w| {
        let mut first = true;
        for entry in &node.path {
            let Some(label) = entry_label(entry) else {
                continue;
            };
            if !first {
                w.raw(" / ");
            }
            first = false;
            let link = w.links().entry(entry);
            w.write_link(&link, |w| {
                w.text(label);
                Ok(())
            })?;
        }
        Ok(())
    })
}

fn node_docs(w: &mut PageWriter<'_>, node: &DocumentationNode) -> RenderResult {
    if !node.signature.is_empty() {
        w.paragraph(|w| w.signature(&node.signature))?;
    }
    w.blocks(&node.content)?;
    tag_sections(w, &node.tags)
}

fn section_title(w: &mut PageWriter<'_>, title: &str) -> RenderResult {
    w.paragraph(|w| {
        w.strong(|w| {
            w.text(title);
            Ok(())
        })
    })
}

fn tags_of<'t>(tags: &'t [DocTag], kind: &TagKind) -> Vec<&'t DocTag> {
    tags.iter().filter(|tag| tag.kind == *kind).collect()
}

fn tag_sections(w: &mut PageWriter<'_>, tags: &[DocTag]) -> RenderResult {
    subject_table(w, "Parameters", &tags_of(tags, &TagKind::Param))?;
    subject_table(w, "Properties", &tags_of(tags, &TagKind::Property))?;
    content_section(w, "Return", &tags_of(tags, &TagKind::Return))?;
    exceptions(w, &tags_of(tags, &TagKind::Throws))?;
    see_also(w, &tags_of(tags, &TagKind::See))?;
    content_section(w, "Since", &tags_of(tags, &TagKind::Since))?;
    content_section(w, "Authors", &tags_of(tags, &TagKind::Author))?;
    samples(w, &tags_of(tags, &TagKind::Sample))?;
    for tag in tags {
        if let TagKind::Other(name) = &tag.kind {
            content_section(w, &capitalize(name), &[tag])?;
        }
    }
    Ok(())
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `Name | Description` table for `@param` and `@property`.
fn subject_table(w: &mut PageWriter<'_>, title: &str, tags: &[&DocTag]) -> RenderResult {
    if tags.is_empty() {
        return Ok(());
    }
    section_title(w, title)?;
    w.table(&["Name", "Description"], |w| {
        for tag in tags {
            w.table_row(|w| {
                w.table_cell(|w| {
                    w.code(tag.subject.as_deref().unwrap_or_default());
                    Ok(())
                })?;
                w.table_cell(|w| w.blocks(&tag.content))
            })?;
        }
        Ok(())
    })
}

fn content_section(w: &mut PageWriter<'_>, title: &str, tags: &[&DocTag]) -> RenderResult {
    if tags.is_empty() {
        return Ok(());
    }
    section_title(w, title)?;
    for tag in tags {
        w.blocks(&tag.content)?;
    }
    Ok(())
}

fn exceptions(w: &mut PageWriter<'_>, tags: &[&DocTag]) -> RenderResult {
    if tags.is_empty() {
        return Ok(());
    }
    section_title(w, "Exceptions")?;
    w.table(&["Exception", "Description"], |w| {
        for tag in tags {
            w.table_row(|w| {
                w.table_cell(|w| match tag.subject.as_deref() {
                    Some(subject) => w.link(subject, |w| {
                        w.code(subject);
                        Ok(())
                    }),
                    None => Ok(()),
                })?;
                w.table_cell(|w| w.blocks(&tag.content))
            })?;
        }
        Ok(())
    })
}

fn see_also(w: &mut PageWriter<'_>, tags: &[&DocTag]) -> RenderResult {
    if tags.is_empty() {
        return Ok(());
    }
    section_title(w, "See Also")?;
    w.list(false, None, |w| {
        for tag in tags {
            w.list_item(|w| {
                if let Some(subject) = tag.subject.as_deref() {
                    w.paragraph(|w| {
                        w.link(subject, |w| {
                            w.text(subject);
                            Ok(())
                        })
                    })?;
                }
                w.blocks(&tag.content)
            })?;
        }
        Ok(())
    })
}

fn samples(w: &mut PageWriter<'_>, tags: &[&DocTag]) -> RenderResult {
    let subjects: Vec<&str> = tags.iter().filter_map(|tag| tag.subject.as_deref()).collect();
    if subjects.is_empty() {
        return Ok(());
    }
    section_title(w, "Samples")?;
    w.list(false, None, |w| {
        for subject in subjects {
            w.list_item(|w| {
                w.link(subject, |w| {
                    w.code(subject);
                    Ok(())
                })
            })?;
        }
        Ok(())
    })
}

/// Member summary categories, in page order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum MemberSection {
    Packages,
    Types,
    EnumValues,
    Constructors,
    Properties,
    Functions,
    TypeAliases,
    Other,
}

impl MemberSection {
    fn of(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Package => Self::Packages,
            NodeKind::Class
            | NodeKind::Interface
            | NodeKind::Object
            | NodeKind::Enum
            | NodeKind::Annotation => Self::Types,
            NodeKind::EnumEntry => Self::EnumValues,
            NodeKind::Constructor => Self::Constructors,
            NodeKind::Property => Self::Properties,
            NodeKind::Function => Self::Functions,
            NodeKind::TypeAlias => Self::TypeAliases,
            NodeKind::Module | NodeKind::Other => Self::Other,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Packages => "Packages",
            Self::Types => "Types",
            Self::EnumValues => "Enum Values",
            Self::Constructors => "Constructors",
            Self::Properties => "Properties",
            Self::Functions => "Functions",
            Self::TypeAliases => "Type Aliases",
            Self::Other => "Other Members",
        }
    }
}

type MemberRow<'n> = Vec<&'n Arc<DocumentationNode>>;

/// Group visible members by section; same-named members share a row.
fn member_rows(node: &DocumentationNode) -> BTreeMap<MemberSection, Vec<MemberRow<'_>>> {
    let mut sections: BTreeMap<MemberSection, Vec<MemberRow<'_>>> = BTreeMap::new();
    for member in node.members.iter().filter(|member| !member.is_suppressed()) {
        let rows = sections.entry(MemberSection::of(member.kind)).or_default();
        let existing = rows
            .iter_mut()
            .find(|row| !member.name.is_empty() && row[0].name == member.name);
        match existing {
            Some(row) => row.push(member),
            None => rows.push(vec![member]),
        }
    }
    sections
}

fn member_sections(w: &mut PageWriter<'_>, node: &DocumentationNode) -> RenderResult {
    for (section, rows) in member_rows(node) {
        w.heading(3, |w| {
            w.text(section.title());
            Ok(())
        })?;
        w.table(&["Name", "Summary"], |w| {
            for row in &rows {
                w.table_row(|w| {
                    w.table_cell(|w| member_link(w, row[0]))?;
                    w.table_cell(|w| member_summary(w, row))
                })?;
            }
            Ok(())
        })?;
    }
    Ok(())
}

fn member_link(w: &mut PageWriter<'_>, member: &DocumentationNode) -> RenderResult {
    let entry = member
        .path
        .last()
        .ok_or_else(|| RenderError::MalformedNode {
            qualified_name: member.qualified_name.clone(),
        })?;
    let link = w.links().entry(entry);
    w.write_link(&link, |w| {
        w.text(display_name(member));
        Ok(())
    })
}

fn member_summary(w: &mut PageWriter<'_>, row: &[&Arc<DocumentationNode>]) -> RenderResult {
    for member in row {
        if !member.signature.is_empty() {
            w.paragraph(|w| w.signature(&member.signature))?;
        }
        if let Some(summary) = member.summary() {
            w.block(summary)?;
        }
    }
    Ok(())
}
