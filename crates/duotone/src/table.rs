//! The color group table and group resolution.
//!
//! A table maps names to either a single color or a color group:
//!
//! ```yaml
//! --C02a: "#f00"              # single color
//! --C02b: "#0f0"
//! --G01: ["#eee", "#111"]     # group: [light, dark]
//! --G02: [--C02a, --C02b]     # group whose sides alias single colors
//! ```
//!
//! # Resolution
//!
//! [`ColorTable::resolve`] turns a group name into the color for one theme.
//! Only groups are theme-resolvable; anything else falls back to the text the
//! caller passed in, so an unknown name never produces empty output.
//!
//! Aliases are expanded exactly one level: a group side that names a single
//! color yields that color, and nothing further. A side naming a name that is
//! itself an alias comes back as that alias name, untouched. There is no cycle
//! detection because there is no recursion.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// A single table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorEntry {
    /// A literal color token (`#f00`, `red`, `rgb(0 0 0)`), or the name of
    /// another entry.
    Color(String),
    /// `[light, dark]`. Each side is a color token or the name of another entry.
    Group(Vec<String>),
}

impl ColorEntry {
    pub fn is_group(&self) -> bool {
        matches!(self, ColorEntry::Group(_))
    }
}

impl From<&str> for ColorEntry {
    fn from(color: &str) -> Self {
        ColorEntry::Color(color.to_string())
    }
}

impl From<String> for ColorEntry {
    fn from(color: String) -> Self {
        ColorEntry::Color(color)
    }
}

impl<S: Into<String>> From<[S; 2]> for ColorEntry {
    fn from([light, dark]: [S; 2]) -> Self {
        ColorEntry::Group(vec![light.into(), dark.into()])
    }
}

/// Named colors and color groups.
///
/// # Example
///
/// ```rust
/// use duotone::{ColorTable, Theme};
///
/// let table = ColorTable::new()
///     .color("--C02a", "#f00")
///     .color("--C02b", "#0f0")
///     .group("--G01", "#eee", "#111")
///     .group("--G02", "--C02a", "--C02b");
///
/// assert_eq!(table.resolve(Theme::Dark, "--G01", "var(--G01)"), "#111");
/// assert_eq!(table.resolve(Theme::Light, "--G02", "var(--G02)"), "#f00");
/// assert_eq!(table.resolve(Theme::Light, "--GXX", "var(--GXX)"), "var(--GXX)");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorTable {
    entries: BTreeMap<String, ColorEntry>,
}

impl ColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single color, returning `self` for chaining.
    pub fn color(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries
            .insert(name.into(), ColorEntry::Color(value.into()));
        self
    }

    /// Adds a light/dark group, returning `self` for chaining.
    pub fn group(
        mut self,
        name: impl Into<String>,
        light: impl Into<String>,
        dark: impl Into<String>,
    ) -> Self {
        self.entries.insert(
            name.into(),
            ColorEntry::Group(vec![light.into(), dark.into()]),
        );
        self
    }

    /// Inserts or replaces an entry.
    pub fn insert(&mut self, name: impl Into<String>, entry: impl Into<ColorEntry>) {
        self.entries.insert(name.into(), entry.into());
    }

    pub fn get(&self, name: &str) -> Option<&ColorEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of all group entries, in sorted order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.is_group())
            .map(|(name, _)| name.as_str())
    }

    /// The raw side of `group` for `theme`, before alias expansion.
    ///
    /// `None` when `group` is unknown, is a single color, or has no (or an
    /// empty) entry for that side.
    pub fn side(&self, theme: Theme, group: &str) -> Option<&str> {
        match self.entries.get(group)? {
            ColorEntry::Group(sides) => sides
                .get(theme.index())
                .map(String::as_str)
                .filter(|side| !side.is_empty()),
            ColorEntry::Color(_) => None,
        }
    }

    /// Resolves `group` for `theme`, returning `fallback` when it cannot.
    pub fn resolve<'a>(&'a self, theme: Theme, group: &str, fallback: &'a str) -> &'a str {
        let Some(side) = self.side(theme, group) else {
            return fallback;
        };
        match self.entries.get(side) {
            Some(ColorEntry::Color(color)) => color,
            // Group-valued aliases have no single color to expand to.
            Some(ColorEntry::Group(_)) | None => side,
        }
    }
}

impl<K: Into<String>, V: Into<ColorEntry>> FromIterator<(K, V)> for ColorTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
