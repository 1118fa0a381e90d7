//! Theme-specific renderings of declaration values.

use std::borrow::Cow;

use crate::pattern::ReferencePattern;
use crate::table::ColorTable;
use crate::theme::Theme;

/// Substitutes every group reference in a value with its color for one theme.
///
/// Rendering is pure: it only reads the table and the compiled pattern. A
/// reference that cannot be resolved is left as the text that matched, so a
/// rendering is never shorter than it should be.
///
/// # Example
///
/// ```rust
/// use duotone::{ColorTable, ReferencePattern, Renderer, Theme};
///
/// let table = ColorTable::new().group("--G01", "#eee", "#111");
/// let pattern = ReferencePattern::constrained("var", table.group_names()).unwrap();
/// let renderer = Renderer::new(table, pattern);
///
/// assert_eq!(
///     renderer.render(Theme::Dark, "oklch(from var(--G01) l c h / .1)"),
///     "oklch(from #111 l c h / .1)"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Renderer {
    table: ColorTable,
    pattern: ReferencePattern,
    custom_properties: bool,
}

impl Renderer {
    pub fn new(table: ColorTable, pattern: ReferencePattern) -> Self {
        Self {
            table,
            pattern,
            custom_properties: false,
        }
    }

    /// Emit `var(--name)` for the selected group side instead of expanding it.
    pub fn with_custom_properties(mut self, enabled: bool) -> Self {
        self.custom_properties = enabled;
        self
    }

    pub fn has_reference(&self, value: &str) -> bool {
        self.pattern.has_reference(value)
    }

    /// Renders `value` for `theme`. Borrows the input when nothing matched.
    pub fn render<'v>(&self, theme: Theme, value: &'v str) -> Cow<'v, str> {
        self.pattern
            .replace_all(value, |group, matched| self.resolve(theme, group, matched))
    }

    /// Light and dark renderings, in that order.
    pub fn render_pair<'v>(&self, value: &'v str) -> (Cow<'v, str>, Cow<'v, str>) {
        (
            self.render(Theme::Light, value),
            self.render(Theme::Dark, value),
        )
    }

    fn resolve(&self, theme: Theme, group: &str, matched: &str) -> String {
        if self.custom_properties {
            return match self.table.side(theme, group) {
                Some(side) if side.starts_with("--") => format!("var({side})"),
                Some(side) => format!("var(--{side})"),
                None => matched.to_string(),
            };
        }
        self.table.resolve(theme, group, matched).to_string()
    }
}
