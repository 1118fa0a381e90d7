//! Finding color-group references inside declaration values.
//!
//! A reference is a single-argument call to the lookup function, for example
//! `var(--G01)` or `cc(G01)`. Two pattern shapes exist:
//!
//! - [`ReferencePattern::constrained`] only accepts arguments that are known
//!   group names, so values naming anything else never match.
//! - [`ReferencePattern::unconstrained`] accepts any argument up to the closing
//!   parenthesis; unknown names are discovered later when resolution falls back.
//!
//! Patterns are compiled once and reused for every declaration.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RELATIVE_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\(\s*?from").expect("relative color pattern is valid"));

static COLOR_MIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bcolor-mix\(").expect("color-mix pattern is valid"));

/// Whether `value` uses relative color syntax (`oklch(from ...)`) or
/// `color-mix(...)`.
///
/// ```rust
/// use duotone::has_advanced_color;
///
/// assert!(has_advanced_color("oklch(from var(--G01) l c h / .1)"));
/// assert!(has_advanced_color("COLOR-MIX(in srgb, red, blue)"));
/// assert!(!has_advanced_color("var(--G01)"));
/// ```
pub fn has_advanced_color(value: &str) -> bool {
    RELATIVE_COLOR.is_match(value) || COLOR_MIX.is_match(value)
}

/// A compiled group-reference matcher.
///
/// Capture group 1 holds the referenced group name.
#[derive(Debug, Clone)]
pub struct ReferencePattern {
    // None when there are no group names to accept.
    regex: Option<Regex>,
}

impl ReferencePattern {
    /// Matches `<function>(<name>)` where `<name>` is one of `names`.
    ///
    /// With no names the pattern matches nothing.
    pub fn constrained<'a, I>(function: &str, names: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let alternatives: Vec<String> = names.into_iter().map(regex::escape).collect();
        if alternatives.is_empty() {
            return Ok(Self { regex: None });
        }
        let source = format!(
            r"\b{}\(({})\)",
            regex::escape(function),
            alternatives.join("|")
        );
        Ok(Self {
            regex: Some(Regex::new(&source)?),
        })
    }

    /// Matches `<function>(<anything but a closing parenthesis>)`.
    pub fn unconstrained(function: &str) -> Result<Self, regex::Error> {
        let source = format!(r"\b{}\(([^)]+)\)", regex::escape(function));
        Ok(Self {
            regex: Some(Regex::new(&source)?),
        })
    }

    /// Whether `value` contains at least one reference.
    pub fn has_reference(&self, value: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(value))
    }

    /// Replaces every reference with `replace(group, matched_text)`.
    ///
    /// Borrows the input when nothing matched.
    pub fn replace_all<'v, F>(&self, value: &'v str, mut replace: F) -> Cow<'v, str>
    where
        F: FnMut(&str, &str) -> String,
    {
        let Some(regex) = &self.regex else {
            return Cow::Borrowed(value);
        };
        regex.replace_all(value, |caps: &Captures<'_>| {
            let matched = caps.get(0).map_or("", |m| m.as_str());
            let group = caps.get(1).map_or("", |m| m.as_str());
            replace(group, matched)
        })
    }
}
