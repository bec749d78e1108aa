//! `hugodoc render` command implementation.

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Args;
use hugodoc_config::{CliSettings, Config};
use hugodoc_renderer::Preset;
use hugodoc_site::{SiteOptions, SiteRenderer, load_tree};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// JSON documentation tree (overrides config).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory for the pages (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output style preset (overrides config).
    #[arg(short, long, env = "HUGODOC_PRESET")]
    preset: Option<Preset>,

    /// Path to configuration file (default: auto-discover hugodoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fail when any page has warnings.
    #[arg(long)]
    deny_warnings: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            input: self.input,
            output: self.output,
            preset: self.preset,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let input = &config.input_resolved.tree;
        let out_dir = &config.output_resolved.dir;
        output.info(&format!("Input: {}", input.display()));
        output.info(&format!("Output: {}", out_dir.display()));
        output.info(&format!("Preset: {}", config.style.preset));

        let tree = load_tree(input)?;
        let style = config.render_style();
        let options = SiteOptions {
            section_index: config.output_resolved.section_index,
            package_list: config.output_resolved.package_list,
            format: package_list_format(config.style.preset).to_owned(),
        };
        let report = SiteRenderer::new(&style, options).write(&tree, out_dir)?;

        for (page, warning) in &report.warnings {
            output.warning(&format!("{page}: {warning}"));
        }
        let pages_with_warnings = report
            .warnings
            .iter()
            .map(|(page, _)| page.as_str())
            .collect::<BTreeSet<_>>()
            .len();
        if self.deny_warnings && pages_with_warnings > 0 {
            return Err(CliError::Warnings {
                count: pages_with_warnings,
            });
        }

        output.success(&format!(
            "Rendered {} pages to {}",
            report.pages,
            out_dir.display()
        ));
        Ok(())
    }
}

/// Format name recorded in `package-list`.
fn package_list_format(preset: Preset) -> &'static str {
    match preset {
        Preset::Hugo | Preset::HugoRich => "hugo",
        Preset::Markdown => "markdown",
    }
}
