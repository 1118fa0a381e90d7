//! Transform configuration.
//!
//! [`Options`] can be built in code or loaded from YAML or JSON. Every field
//! has a default, so a configuration file only needs the colors:
//!
//! ```yaml
//! colors:
//!   --G01: ["#eee", "#111"]
//!   --C02a: "#f00"
//!   --C02b: "#0f0"
//!   --G02: [--C02a, --C02b]
//! inject-flags: true
//! ```
//!
//! A dark-rule configuration for a pipeline that resolves nesting later:
//!
//! ```yaml
//! strategy: dark-rule
//! nesting: nested-rule
//! dark-selector: ".dark"
//! colors:
//!   G01: ["#eee", "#111"]
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::table::ColorTable;

/// How a themed declaration is exposed in the output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Generate a custom property holding both renderings behind two boolean
    /// flags. Only values using relative colors or `color-mix()` are touched.
    #[default]
    FlagGated,
    /// Keep the light rendering in place and duplicate the declaration with
    /// the dark rendering under the dark selector.
    DarkRule,
}

impl Strategy {
    /// Lookup function used when none is configured.
    pub fn default_function(self) -> &'static str {
        match self {
            Strategy::FlagGated => "var",
            Strategy::DarkRule => "cc",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::FlagGated => "flag-gated",
            Strategy::DarkRule => "dark-rule",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "flag-gated" => Ok(Strategy::FlagGated),
            "dark-rule" => Ok(Strategy::DarkRule),
            other => Err(format!(
                "unknown strategy `{other}` (expected flag-gated or dark-rule)"
            )),
        }
    }
}

/// Where the dark-rule strategy puts the duplicated declaration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Nesting {
    /// No nesting support downstream: warn and emit no dark rule.
    #[default]
    None,
    /// `<dark-selector> & { ... }` right after the declaration.
    NestedRule,
    /// `@nest <dark-selector> & { ... }` right after the declaration.
    AtRuleNest,
    /// A plain rule with the enclosing selectors resolved, appended to the
    /// nearest enclosing at-rule or the document root.
    Flatten,
}

impl Nesting {
    pub fn as_str(self) -> &'static str {
        match self {
            Nesting::None => "none",
            Nesting::NestedRule => "nested-rule",
            Nesting::AtRuleNest => "at-rule-nest",
            Nesting::Flatten => "flatten",
        }
    }
}

impl fmt::Display for Nesting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Nesting {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "none" => Ok(Nesting::None),
            "nested-rule" => Ok(Nesting::NestedRule),
            "at-rule-nest" => Ok(Nesting::AtRuleNest),
            "flatten" => Ok(Nesting::Flatten),
            other => Err(format!(
                "unknown nesting `{other}` (expected none, nested-rule, at-rule-nest or flatten)"
            )),
        }
    }
}

/// Configuration for [`ThemeColors`](crate::ThemeColors).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Options {
    /// Colors and color groups.
    pub colors: ColorTable,
    pub strategy: Strategy,
    /// Lookup function name. `None` picks the strategy's default.
    pub function: Option<String>,
    /// Boolean custom properties for the light and dark scopes.
    pub flags: [String; 2],
    /// Prepend the flag rules to documents that had a rewrite.
    pub inject_flags: bool,
    /// Selectors of the injected light and dark flag rules.
    pub flag_selectors: [String; 2],
    /// Selector that scopes duplicated dark declarations.
    pub dark_selector: String,
    pub nesting: Nesting,
    /// Emit `var(--name)` for group sides instead of expanding them.
    pub custom_properties: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            colors: ColorTable::default(),
            strategy: Strategy::default(),
            function: None,
            flags: ["--flag-light".to_string(), "--flag-dark".to_string()],
            inject_flags: false,
            flag_selectors: [
                "html".to_string(),
                r#"html[data-theme="dark"]"#.to_string(),
            ],
            dark_selector: r#"html[data-theme="dark"]"#.to_string(),
            nesting: Nesting::default(),
            custom_properties: false,
        }
    }
}

impl Options {
    /// Default options with the given colors.
    pub fn new(colors: ColorTable) -> Self {
        Self {
            colors,
            ..Self::default()
        }
    }

    /// Parses options from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] for malformed YAML or unknown fields.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| Error::Format {
            format: "YAML",
            message: e.to_string(),
        })
    }

    /// Parses options from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] for malformed JSON or unknown fields.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Format {
            format: "JSON",
            message: e.to_string(),
        })
    }

    /// Loads options from a `.yaml`, `.yml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`]
    /// if its extension is unknown or its content is invalid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self> = match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml,
            Some("json") => Self::from_json,
            _ => {
                return Err(Error::Config {
                    path: path.to_path_buf(),
                    message: "expected a .yaml, .yml or .json file".to_string(),
                })
            }
        };

        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading configuration");

        parse(&content).map_err(|e| match e {
            Error::Format { message, .. } => Error::Config {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// The effective lookup function name.
    pub fn function_name(&self) -> &str {
        self.function
            .as_deref()
            .unwrap_or_else(|| self.strategy.default_function())
    }

    pub fn with_colors(mut self, colors: ColorTable) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    pub fn with_flags(mut self, light: impl Into<String>, dark: impl Into<String>) -> Self {
        self.flags = [light.into(), dark.into()];
        self
    }

    pub fn with_inject_flags(mut self, inject: bool) -> Self {
        self.inject_flags = inject;
        self
    }

    pub fn with_flag_selectors(
        mut self,
        light: impl Into<String>,
        dark: impl Into<String>,
    ) -> Self {
        self.flag_selectors = [light.into(), dark.into()];
        self
    }

    pub fn with_dark_selector(mut self, selector: impl Into<String>) -> Self {
        self.dark_selector = selector.into();
        self
    }

    pub fn with_nesting(mut self, nesting: Nesting) -> Self {
        self.nesting = nesting;
        self
    }

    pub fn with_custom_properties(mut self, enabled: bool) -> Self {
        self.custom_properties = enabled;
        self
    }
}
