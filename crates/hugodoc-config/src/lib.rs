//! Configuration management for hugodoc.
//!
//! Parses `hugodoc.toml` with serde and discovers it in the current
//! directory or any parent. CLI settings are applied during load via
//! [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `input.tree`
//! - `output.dir`
//! - `links.base_path`

mod expand;

use std::path::{Component, Path, PathBuf};

use hugodoc_renderer::{
    FrontMatterFormat, MenuSpec, Preset, RenderStyle, Shortcodes, TableStrategy,
};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// Only `Some` values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the document tree path.
    pub input: Option<PathBuf>,
    /// Override the output directory.
    pub output: Option<PathBuf>,
    /// Override the style preset.
    pub preset: Option<Preset>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "hugodoc.toml";

const DEFAULT_TREE: &str = "dokka.json";
const DEFAULT_OUTPUT_DIR: &str = "content/api";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input section (paths are relative strings from TOML).
    input: InputConfigRaw,
    /// Output section (paths are relative strings from TOML).
    output: OutputConfigRaw,
    /// Style preset and per-field overrides.
    pub style: StyleConfig,
    /// Navigation menu entry for package pages.
    pub menu: MenuConfig,
    /// Cross-reference settings.
    pub links: LinksConfig,

    /// Resolved input configuration (set after loading).
    #[serde(skip)]
    pub input_resolved: InputConfig,
    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct InputConfigRaw {
    tree: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
    section_index: Option<bool>,
    package_list: Option<bool>,
}

/// Resolved input configuration.
#[derive(Debug, Default)]
pub struct InputConfig {
    /// JSON document tree produced by the documentation extractor.
    pub tree: PathBuf,
}

/// Resolved output configuration.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// Directory the pages are written under.
    pub dir: PathBuf,
    /// Write `_index.md` instead of `index.md` for section pages.
    pub section_index: bool,
    /// Write the `package-list` index next to the pages.
    pub package_list: bool,
}

/// Style section: a preset plus optional overrides of its fields.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub preset: Preset,
    pub default_language: Option<String>,
    /// Front matter `type`; an empty string removes it.
    pub page_type: Option<String>,
    pub toc: Option<bool>,
    pub table: Option<TableStrategy>,
    pub front_matter: Option<FrontMatterFormat>,
    pub link_rewriting: Option<bool>,
    pub blank_line_before_lists: Option<bool>,
    pub breadcrumbs: Option<bool>,
    pub strict_titles: Option<bool>,
    /// Title placeholder for pages whose title is ambiguous.
    pub untitled: Option<String>,
}

/// Menu section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Force the menu on or off; `None` keeps the preset's choice.
    pub enabled: Option<bool>,
    pub section: String,
    pub parent: String,
    pub weight: u32,
}

impl Default for MenuConfig {
    fn default() -> Self {
        let spec = MenuSpec::default();
        Self {
            enabled: None,
            section: spec.section,
            parent: spec.parent,
            weight: spec.weight,
        }
    }
}

/// Links section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Cross-reference shortcode name.
    pub shortcode: String,
    /// Shortcode that renders its body as markdown.
    pub markdown_shortcode: String,
    /// Prefix for internal targets. When `None`, it is derived from the
    /// output directory's place below `content/`, else the preset's is kept.
    pub base_path: Option<String>,
}

impl Default for LinksConfig {
    fn default() -> Self {
        let shortcodes = Shortcodes::default();
        Self {
            shortcode: shortcodes.cross_ref,
            markdown_shortcode: shortcodes.markdown,
            base_path: None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`input.tree`").
        field: String,
        /// Error message (e.g., "${`TREE_PATH`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Shortcode names are spliced into `{{< name ... >}}`.
fn require_shortcode_name(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    if value.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "{field} cannot contain whitespace"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `hugodoc.toml` in the current directory and its parents, falling
    /// back to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// an environment variable is missing or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(input) = &settings.input {
            self.input_resolved.tree.clone_from(input);
        }
        if let Some(output) = &settings.output {
            self.output_resolved.dir.clone_from(output);
        }
        if let Some(preset) = settings.preset {
            self.style.preset = preset;
        }
    }

    /// Rendering style: the preset with every configured override applied.
    #[must_use]
    pub fn render_style(&self) -> RenderStyle {
        let mut style = self.style.preset.style();
        let overrides = &self.style;

        if let Some(language) = &overrides.default_language {
            style.default_language.clone_from(language);
        }
        if let Some(page_type) = &overrides.page_type {
            style.page_type = (!page_type.is_empty()).then(|| page_type.clone());
        }
        if let Some(toc) = overrides.toc {
            style.toc = toc;
        }
        if let Some(table) = overrides.table {
            style.table = table;
        }
        if let Some(front_matter) = overrides.front_matter {
            style.front_matter = front_matter;
        }
        if let Some(link_rewriting) = overrides.link_rewriting {
            style.link_rewriting = link_rewriting;
        }
        if let Some(blank_line) = overrides.blank_line_before_lists {
            style.blank_line_before_lists = blank_line;
        }
        if let Some(breadcrumbs) = overrides.breadcrumbs {
            style.breadcrumbs = breadcrumbs;
        }
        if let Some(strict) = overrides.strict_titles {
            style.strict_titles = strict;
        }
        if let Some(untitled) = &overrides.untitled {
            style.untitled.clone_from(untitled);
        }

        let menu_enabled = self.menu.enabled.unwrap_or(style.menu.is_some());
        style.menu = menu_enabled.then(|| MenuSpec {
            section: self.menu.section.clone(),
            parent: self.menu.parent.clone(),
            weight: self.menu.weight,
        });

        style.shortcodes = Shortcodes {
            cross_ref: self.links.shortcode.clone(),
            markdown: self.links.markdown_shortcode.clone(),
        };
        if let Some(base_path) = &self.links.base_path {
            style.link_base.clone_from(base_path);
        } else if style.link_rewriting
            && let Some(base) = content_base(&self.output_resolved.dir)
        {
            style.link_base = base;
        }

        style
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Default config with paths relative to `base`.
    fn default_with_base(base: &Path) -> Self {
        Self {
            input: InputConfigRaw::default(),
            output: OutputConfigRaw::default(),
            style: StyleConfig::default(),
            menu: MenuConfig::default(),
            links: LinksConfig::default(),
            input_resolved: InputConfig {
                tree: base.join(DEFAULT_TREE),
            },
            output_resolved: OutputConfig {
                dir: base.join(DEFAULT_OUTPUT_DIR),
                section_index: false,
                package_list: true,
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(language) = &self.style.default_language {
            require_non_empty(language, "style.default_language")?;
        }
        require_shortcode_name(&self.links.shortcode, "links.shortcode")?;
        require_shortcode_name(&self.links.markdown_shortcode, "links.markdown_shortcode")?;
        if self.menu.enabled != Some(false) {
            require_non_empty(&self.menu.section, "menu.section")?;
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_in_place(&mut self.input.tree, "input.tree")?;
        expand::expand_in_place(&mut self.output.dir, "output.dir")?;
        expand::expand_in_place(&mut self.links.base_path, "links.base_path")?;
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.input_resolved = InputConfig {
            tree: resolve(self.input.tree.as_deref(), DEFAULT_TREE),
        };
        self.output_resolved = OutputConfig {
            dir: resolve(self.output.dir.as_deref(), DEFAULT_OUTPUT_DIR),
            section_index: self.output.section_index.unwrap_or(false),
            package_list: self.output.package_list.unwrap_or(true),
        };
    }
}

/// Site path of `dir` below Hugo's `content` directory, as a link prefix.
///
/// `content/api` gives `/api/`. `None` when no `content` component exists
/// or the remainder is not a plain relative path.
fn content_base(dir: &Path) -> Option<String> {
    let components: Vec<Component<'_>> = dir.components().collect();
    let content = components
        .iter()
        .rposition(|component| component.as_os_str() == "content")?;

    let mut base = String::from("/");
    for component in &components[content + 1..] {
        let Component::Normal(name) = component else {
            return None;
        };
        base.push_str(&name.to_string_lossy());
        base.push('/');
    }
    Some(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// `style` as rendered into the default `content/api` directory.
    fn under_api(style: RenderStyle) -> RenderStyle {
        RenderStyle {
            link_base: "/api/".to_owned(),
            ..style
        }
    }

    fn parse(toml: &str) -> Config {
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        config
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.input_resolved.tree, PathBuf::from("/test/dokka.json"));
        assert_eq!(config.output_resolved.dir, PathBuf::from("/test/content/api"));
        assert!(!config.output_resolved.section_index);
        assert!(config.output_resolved.package_list);
        assert_eq!(config.style.preset, Preset::Hugo);
        assert_eq!(config.render_style(), under_api(RenderStyle::hugo()));
    }

    #[test]
    fn test_parse_empty_config_matches_defaults() {
        let config = parse("");
        assert_eq!(config.input_resolved.tree, PathBuf::from("/project/dokka.json"));
        assert_eq!(config.output_resolved.dir, PathBuf::from("/project/content/api"));
        assert_eq!(config.render_style(), under_api(RenderStyle::hugo()));
    }

    #[test]
    fn test_resolve_paths() {
        let config = parse(
            r#"
[input]
tree = "build/dokka/tree.json"

[output]
dir = "site/content/reference"
section_index = true
package_list = false
"#,
        );
        assert_eq!(
            config.input_resolved.tree,
            PathBuf::from("/project/build/dokka/tree.json")
        );
        assert_eq!(
            config.output_resolved.dir,
            PathBuf::from("/project/site/content/reference")
        );
        assert!(config.output_resolved.section_index);
        assert!(!config.output_resolved.package_list);
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let config = parse(
            r#"
[input]
tree = "/data/tree.json"
"#,
        );
        assert_eq!(config.input_resolved.tree, PathBuf::from("/data/tree.json"));
    }

    #[test]
    fn test_preset_selects_style() {
        let config = parse(
            r#"
[style]
preset = "markdown"
"#,
        );
        assert_eq!(config.render_style(), RenderStyle::markdown());

        let config = parse(
            r#"
[style]
preset = "hugo-rich"
"#,
        );
        assert_eq!(config.render_style(), under_api(RenderStyle::hugo_rich()));
    }

    #[test]
    fn test_unknown_preset_is_parse_error() {
        let result: Result<Config, _> = toml::from_str(
            r#"
[style]
preset = "asciidoc"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_style_overrides() {
        let config = parse(
            r#"
[style]
preset = "hugo"
default_language = "java"
page_type = ""
toc = true
table = "rich"
front_matter = "yaml"
blank_line_before_lists = true
breadcrumbs = false
strict_titles = true
untitled = "Untitled"
"#,
        );
        let style = config.render_style();
        assert_eq!(style.default_language, "java");
        assert_eq!(style.page_type, None);
        assert!(style.toc);
        assert_eq!(style.table, TableStrategy::Rich);
        assert_eq!(style.front_matter, FrontMatterFormat::Yaml);
        assert!(style.blank_line_before_lists);
        assert!(!style.breadcrumbs);
        assert!(style.strict_titles);
        assert_eq!(style.untitled, "Untitled");
        assert!(style.link_rewriting);
    }

    #[test]
    fn test_menu_settings() {
        let config = parse(
            r#"
[menu]
section = "api"
parent = "Reference"
weight = 7
"#,
        );
        assert_eq!(
            config.render_style().menu,
            Some(MenuSpec {
                section: "api".to_owned(),
                parent: "Reference".to_owned(),
                weight: 7,
            })
        );
    }

    #[test]
    fn test_menu_follows_preset_unless_forced() {
        let config = parse(
            r#"
[style]
preset = "markdown"
"#,
        );
        assert_eq!(config.render_style().menu, None);

        let config = parse(
            r#"
[style]
preset = "markdown"

[menu]
enabled = true
"#,
        );
        assert_eq!(config.render_style().menu, Some(MenuSpec::default()));

        let config = parse(
            r#"
[menu]
enabled = false
"#,
        );
        assert_eq!(config.render_style().menu, None);
    }

    #[test]
    fn test_links_settings() {
        let config = parse(
            r#"
[links]
shortcode = "ref"
markdown_shortcode = "markdownify"
base_path = "/api/"
"#,
        );
        let style = config.render_style();
        assert_eq!(style.shortcodes.cross_ref, "ref");
        assert_eq!(style.shortcodes.markdown, "markdownify");
        assert_eq!(style.link_base, "/api/");
    }

    #[test]
    fn test_default_link_base_follows_output_dir() {
        let config = Config::default_with_base(Path::new("/site"));
        assert_eq!(
            config.output_resolved.dir,
            PathBuf::from("/site").join(DEFAULT_OUTPUT_DIR)
        );
        assert_eq!(config.render_style().link_base, "/api/");
    }

    #[test]
    fn test_link_base_from_configured_output_dir() {
        let config = parse(
            r#"
[output]
dir = "site/content/reference/kotlin"
"#,
        );
        assert_eq!(config.render_style().link_base, "/reference/kotlin/");

        let config = parse(
            r#"
[output]
dir = "content"
"#,
        );
        assert_eq!(config.render_style().link_base, "/");
    }

    #[test]
    fn test_link_base_unused_without_rewriting() {
        let config = parse(
            r#"
[style]
preset = "markdown"
"#,
        );
        assert_eq!(config.render_style().link_base, "");
    }

    #[test]
    fn test_link_base_outside_content_keeps_preset() {
        let config = parse(
            r#"
[output]
dir = "public/api"
"#,
        );
        assert_eq!(config.render_style().link_base, "/");
    }

    #[test]
    fn test_link_base_follows_cli_output() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.apply_cli_settings(&CliSettings {
            output: Some(PathBuf::from("docs/content/v2/api")),
            ..CliSettings::default()
        });
        assert_eq!(config.render_style().link_base, "/v2/api/");
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            input: Some(PathBuf::from("/custom/tree.json")),
            output: None,
            preset: Some(Preset::Markdown),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.input_resolved.tree, PathBuf::from("/custom/tree.json"));
        assert_eq!(config.output_resolved.dir, PathBuf::from("/test/content/api")); // Unchanged
        assert_eq!(config.render_style(), RenderStyle::markdown());
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.input_resolved.tree, PathBuf::from("/test/dokka.json"));
        assert_eq!(config.style.preset, Preset::Hugo);
    }

    #[test]
    fn test_cli_preset_keeps_file_overrides() {
        let mut config = parse(
            r#"
[style]
default_language = "java"
"#,
        );
        config.apply_cli_settings(&CliSettings {
            preset: Some(Preset::HugoRich),
            ..Default::default()
        });
        let style = config.render_style();
        assert_eq!(style.table, TableStrategy::Rich);
        assert_eq!(style.default_language, "java");
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("HUGODOC_CFG_TREE", "out/tree.json");
            std::env::remove_var("HUGODOC_CFG_UNSET_DIR");
        }

        let mut config: Config = toml::from_str(
            r#"
[input]
tree = "${HUGODOC_CFG_TREE}"

[output]
dir = "${HUGODOC_CFG_UNSET_DIR:-public/api}"
"#,
        )
        .unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.input_resolved.tree, PathBuf::from("/project/out/tree.json"));
        assert_eq!(config.output_resolved.dir, PathBuf::from("/project/public/api"));

        unsafe {
            std::env::remove_var("HUGODOC_CFG_TREE");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("HUGODOC_CFG_MISSING_BASE");
        }

        let mut config: Config = toml::from_str(
            r#"
[links]
base_path = "${HUGODOC_CFG_MISSING_BASE}"
"#,
        )
        .unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("HUGODOC_CFG_MISSING_BASE"));
        assert!(err.to_string().contains("links.base_path"));
    }

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(msg.contains(s), "Expected error to contain '{s}', got: {msg}");
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_default_language() {
        let config = parse(
            r#"
[style]
default_language = ""
"#,
        );
        assert_validation_error(&config, &["style.default_language", "empty"]);
    }

    #[test]
    fn test_validate_shortcode_whitespace() {
        let config = parse(
            r#"
[links]
shortcode = "rel ref"
"#,
        );
        assert_validation_error(&config, &["links.shortcode", "whitespace"]);
    }

    #[test]
    fn test_validate_empty_markdown_shortcode() {
        let config = parse(
            r#"
[links]
markdown_shortcode = ""
"#,
        );
        assert_validation_error(&config, &["links.markdown_shortcode"]);
    }

    #[test]
    fn test_validate_empty_menu_section_only_when_enabled() {
        let config = parse(
            r#"
[menu]
section = ""
"#,
        );
        assert_validation_error(&config, &["menu.section"]);

        let config = parse(
            r#"
[menu]
enabled = false
section = ""
"#,
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[input]
tree = "tree.json"

[style]
preset = "hugo-rich"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.input_resolved.tree, dir.path().join("tree.json"));
        assert_eq!(config.output_resolved.dir, dir.path().join("content/api"));
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.render_style(), under_api(RenderStyle::hugo_rich()));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/hugodoc.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_file_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[links]\nshortcode = \"\"\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_discover_in_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("docs/api");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            Config::discover_from(&nested),
            Some(dir.path().join(CONFIG_FILENAME))
        );
    }
}
