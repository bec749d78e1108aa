//! CLI error types.

use hugodoc_config::ConfigError;
use hugodoc_site::SiteError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("{count} page(s) had warnings and --deny-warnings is set")]
    Warnings { count: usize },
}
