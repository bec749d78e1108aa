//! Output style configuration.
//!
//! Every output variant is a [`RenderStyle`] value rather than a separate
//! renderer type. [`Preset`] names the variants shipped out of the box.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How tables are emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStrategy {
    /// Pipe tables; each cell is folded onto a single line.
    #[default]
    Plain,
    /// HTML table with every cell wrapped in the markdown shortcode.
    Rich,
}

/// Front matter serialization and delimiter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontMatterFormat {
    /// TOML between `+++` lines.
    #[default]
    Toml,
    /// YAML between `---` lines.
    Yaml,
}

impl FrontMatterFormat {
    /// Line that opens and closes the front matter block.
    #[must_use]
    pub fn delimiter(self) -> &'static str {
        match self {
            Self::Toml => "+++",
            Self::Yaml => "---",
        }
    }
}

/// Navigation menu entry written for package pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuSpec {
    /// Menu name (`[menu.<section>]`).
    pub section: String,
    pub parent: String,
    pub weight: u32,
}

impl Default for MenuSpec {
    fn default() -> Self {
        Self {
            section: "docs".to_owned(),
            parent: "Packages".to_owned(),
            weight: 1,
        }
    }
}

/// Shortcode names used by the destination site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shortcodes {
    /// Cross-reference shortcode for internal links.
    pub cross_ref: String,
    /// Shortcode that re-renders its body as markdown (rich table cells).
    pub markdown: String,
}

impl Default for Shortcodes {
    fn default() -> Self {
        Self {
            cross_ref: "relref".to_owned(),
            markdown: "md".to_owned(),
        }
    }
}

/// Complete description of an output variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderStyle {
    pub front_matter: FrontMatterFormat,
    /// `type` front matter value; omitted when `None`.
    pub page_type: Option<String>,
    pub toc: bool,
    /// Menu entry for single-package pages; no menu when `None`.
    pub menu: Option<MenuSpec>,
    pub table: TableStrategy,
    /// Force exactly one blank line before every list outside table cells.
    pub blank_line_before_lists: bool,
    /// Wrap internal link targets in the cross-reference shortcode.
    /// When off, internal links are relative paths between pages.
    pub link_rewriting: bool,
    pub shortcodes: Shortcodes,
    /// Prefix for internal link targets inside the shortcode.
    pub link_base: String,
    /// Fence language for code samples without one.
    pub default_language: String,
    /// Emit a breadcrumb line linking the ancestor pages.
    pub breadcrumbs: bool,
    /// Fail instead of warning when a page title is ambiguous.
    pub strict_titles: bool,
    /// Title used when the page title is ambiguous.
    pub untitled: String,
}

impl RenderStyle {
    /// The original Hugo format: TOML front matter, pipe tables, `relref` links.
    #[must_use]
    pub fn hugo() -> Self {
        Self {
            front_matter: FrontMatterFormat::Toml,
            page_type: Some("javadocs".to_owned()),
            toc: false,
            menu: Some(MenuSpec::default()),
            table: TableStrategy::Plain,
            blank_line_before_lists: false,
            link_rewriting: true,
            shortcodes: Shortcodes::default(),
            link_base: "/".to_owned(),
            default_language: "kotlin".to_owned(),
            breadcrumbs: true,
            strict_titles: false,
            untitled: String::new(),
        }
    }

    /// Hugo format with HTML tables and a blank line forced before lists.
    #[must_use]
    pub fn hugo_rich() -> Self {
        Self {
            table: TableStrategy::Rich,
            blank_line_before_lists: true,
            ..Self::hugo()
        }
    }

    /// Plain markdown with YAML front matter and relative links.
    #[must_use]
    pub fn markdown() -> Self {
        Self {
            front_matter: FrontMatterFormat::Yaml,
            page_type: None,
            menu: None,
            link_rewriting: false,
            link_base: String::new(),
            ..Self::hugo()
        }
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::hugo()
    }
}

/// Named output variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    #[default]
    Hugo,
    HugoRich,
    Markdown,
}

impl Preset {
    /// All presets, in display order.
    pub const ALL: [Preset; 3] = [Preset::Hugo, Preset::HugoRich, Preset::Markdown];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Hugo => "hugo",
            Self::HugoRich => "hugo-rich",
            Self::Markdown => "markdown",
        }
    }

    /// One-line description for listings.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Hugo => "TOML front matter, pipe tables, relref cross-links",
            Self::HugoRich => "Hugo with HTML tables and markdown-wrapped cells",
            Self::Markdown => "YAML front matter, pipe tables, relative links",
        }
    }

    #[must_use]
    pub fn style(self) -> RenderStyle {
        match self {
            Self::Hugo => RenderStyle::hugo(),
            Self::HugoRich => RenderStyle::hugo_rich(),
            Self::Markdown => RenderStyle::markdown(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unknown preset name.
#[derive(Debug, thiserror::Error)]
#[error("Unknown preset `{0}` (expected one of: hugo, hugo-rich, markdown)")]
pub struct UnknownPreset(pub String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| UnknownPreset(s.to_owned()))
    }
}
