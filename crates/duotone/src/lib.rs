//! # Duotone - Light/Dark Color Groups for CSS
//!
//! `duotone` rewrites references to named color groups inside CSS declaration
//! values so a single style sheet can serve a light and a dark theme.
//!
//! A color group is a `[light, dark]` pair. Each side is a color or the name of
//! another entry in the table:
//!
//! ```yaml
//! --G01: ["#eee", "#111"]
//! --C02a: "#f00"
//! --C02b: "#0f0"
//! --G02: [--C02a, --C02b]
//! ```
//!
//! ## Strategies
//!
//! - [`Strategy::FlagGated`] (default): values that use relative colors or
//!   `color-mix()` get a generated custom property holding both renderings,
//!   each behind one of two boolean flags. With `inject-flags` the flag rules
//!   are prepended to every document that needed them.
//! - [`Strategy::DarkRule`]: the declaration keeps its light rendering and a
//!   copy with the dark rendering is placed under the dark selector, nested or
//!   flattened according to [`Nesting`].
//!
//! ## Quick Start
//!
//! ```rust
//! use duotone::{process, ColorTable, Options};
//!
//! let colors = ColorTable::new().group("--G01", "#eee", "#111");
//! let options = Options::new(colors).with_inject_flags(true);
//!
//! let output = process("a { color: oklch(from var(--G01) l c h / .1) }", &options).unwrap();
//!
//! assert!(output.css.starts_with("html {\n  --flag-light: initial;"));
//! assert!(output.css.contains(
//!     "--v1868641404: var(--flag-light, oklch(from #eee l c h / .1)) \
//!      var(--flag-dark, oklch(from #111 l c h / .1)); \
//!      color: var(--v1868641404);"
//! ));
//! assert!(output.warnings.is_empty());
//! ```
//!
//! The transform itself never fails. Unknown groups and missing nesting
//! support are reported as [`Warning`]s; only invalid CSS or an invalid
//! configuration produce an [`Error`].

mod error;
mod flags;
mod naming;
mod options;
mod pattern;
mod plugin;
mod render;
mod strategy;
mod table;
mod theme;

pub use duotone_sheet::{ProcessOutput, Warning};
pub use error::{Error, Result};
pub use naming::{custom_property_name, value_hash};
pub use options::{Nesting, Options, Strategy};
pub use pattern::{has_advanced_color, ReferencePattern};
pub use plugin::ThemeColors;
pub use render::Renderer;
pub use table::{ColorEntry, ColorTable};
pub use theme::Theme;

use duotone_sheet::Processor;

/// Runs a single [`ThemeColors`] pass over `css`.
///
/// # Errors
///
/// Returns [`Error::Pattern`] for an unusable lookup function or group name,
/// and [`Error::Sheet`] if `css` cannot be parsed.
pub fn process(css: &str, options: &Options) -> Result<ProcessOutput> {
    let plugin = ThemeColors::new(options.clone())?;
    let output = Processor::new().with(plugin).process(css)?;
    Ok(output)
}
