//! Front matter: the metadata header at the top of every page.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::RenderError;
use crate::style::{FrontMatterFormat, RenderStyle};

/// Front matter value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrontMatterValue {
    String(String),
    Bool(bool),
    Integer(i64),
    Table(FrontMatter),
}

impl From<&str> for FrontMatterValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for FrontMatterValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for FrontMatterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u32> for FrontMatterValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<FrontMatter> for FrontMatterValue {
    fn from(value: FrontMatter) -> Self {
        Self::Table(value)
    }
}

impl Serialize for FrontMatterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::Table(table) => table.serialize(serializer),
        }
    }
}

/// Ordered key/value header. Keys are written in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrontMatter {
    entries: Vec<(String, FrontMatterValue)>,
}

impl FrontMatter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, replacing any previous value for the key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FrontMatterValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FrontMatterValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FrontMatterValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Header for one page.
    ///
    /// `link_title` is set only for single-package pages; the menu entry is
    /// written only when it is set and the style has a menu.
    #[must_use]
    pub fn for_page(style: &RenderStyle, title: &str, link_title: Option<&str>) -> Self {
        let mut fm = Self::new()
            .with("title", title)
            .with("draft", false)
            .with("toc", style.toc);
        if let Some(page_type) = &style.page_type {
            fm.insert("type", page_type.as_str());
        }
        if let (Some(link_title), Some(menu)) = (link_title, &style.menu) {
            let entry = Self::new()
                .with("parent", menu.parent.as_str())
                .with("weight", menu.weight);
            fm.insert("linktitle", link_title);
            fm.insert("menu", Self::new().with(menu.section.as_str(), entry));
        }
        fm
    }

    /// Serialize with the opening and closing delimiter lines.
    pub fn render(&self, format: FrontMatterFormat) -> Result<String, RenderError> {
        let body = match format {
            FrontMatterFormat::Toml => toml::to_string(self)?,
            FrontMatterFormat::Yaml => serde_yaml::to_string(self)?,
        };
        let delimiter = format.delimiter();
        let mut out = String::with_capacity(body.len() + 8);
        out.push_str(delimiter);
        out.push('\n');
        out.push_str(&body);
        if !body.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(delimiter);
        out.push('\n');
        Ok(out)
    }
}

impl Serialize for FrontMatter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
