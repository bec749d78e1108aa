//! Link classification and destination formatting.

use hugodoc_model::PathEntry;

use crate::style::RenderStyle;
use crate::util::relative_path;

/// Assigns page paths to tree entries and resolves symbolic references.
///
/// Implementations are shared by concurrent page renders and must be
/// read-only.
pub trait LocationService: Send + Sync {
    /// Path of the page that documents `entry`, relative to the site root.
    fn location(&self, entry: &PathEntry) -> Option<String>;

    /// Path of the page a symbolic reference (e.g. `com.example.Widget`)
    /// points at.
    fn resolve(&self, reference: &str) -> Option<String>;
}

/// A link target classified for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderableLink {
    /// Full URL, written as is.
    External(String),
    /// Page inside the site. `target` is the raw reference when the
    /// location service could not resolve it.
    Internal { target: String, resolved: bool },
}

/// Whether a reference carries a URL scheme.
#[must_use]
pub fn is_external(reference: &str) -> bool {
    reference.contains(":/")
}

impl RenderableLink {
    /// Text written between the parentheses of a markdown link.
    ///
    /// `from` is the location of the page being rendered; it is used for
    /// relative links when link rewriting is off.
    #[must_use]
    pub fn destination(&self, style: &RenderStyle, from: Option<&str>) -> String {
        match self {
            Self::External(url) => url.clone(),
            Self::Internal { target, resolved } if style.link_rewriting => {
                let base = if *resolved { style.link_base.as_str() } else { "" };
                format!(
                    "{{{{< {} \"{base}{target}\" >}}}}",
                    style.shortcodes.cross_ref
                )
            }
            Self::Internal {
                target,
                resolved: true,
            } => match from {
                Some(from) => relative_path(from, target),
                None => target.clone(),
            },
            Self::Internal {
                target,
                resolved: false,
            } => target.clone(),
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        match self {
            Self::External(_) => true,
            Self::Internal { resolved, .. } => *resolved,
        }
    }
}

/// Classifies references and looks internal ones up in the location service.
#[derive(Clone, Copy)]
pub struct LinkResolver<'a> {
    locations: &'a dyn LocationService,
}

impl<'a> LinkResolver<'a> {
    #[must_use]
    pub fn new(locations: &'a dyn LocationService) -> Self {
        Self { locations }
    }

    /// Classify a raw link target.
    #[must_use]
    pub fn resolve(&self, reference: &str) -> RenderableLink {
        if is_external(reference) {
            return RenderableLink::External(reference.to_owned());
        }
        match self.locations.resolve(reference) {
            Some(target) => RenderableLink::Internal {
                target,
                resolved: true,
            },
            None => {
                tracing::debug!(reference = %reference, "Unresolved symbol reference");
                RenderableLink::Internal {
                    target: reference.to_owned(),
                    resolved: false,
                }
            }
        }
    }

    /// Link to the page of a tree entry.
    #[must_use]
    pub fn entry(&self, entry: &PathEntry) -> RenderableLink {
        match self.locations.location(entry) {
            Some(target) => RenderableLink::Internal {
                target,
                resolved: true,
            },
            None => RenderableLink::Internal {
                target: entry.qualified_name.clone(),
                resolved: false,
            },
        }
    }

    /// Page path of a tree entry, if it has one.
    #[must_use]
    pub fn location(&self, entry: &PathEntry) -> Option<String> {
        self.locations.location(entry)
    }
}
