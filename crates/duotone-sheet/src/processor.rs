//! Plugin host: runs declaration-level rewriters over a style sheet.
//!
//! A [`Processor`] owns an ordered list of [`Plugin`]s. Processing a document
//! calls, for every plugin in order:
//!
//! 1. [`Plugin::once`] before any declaration is visited
//! 2. [`Plugin::declaration`] for each declaration, depth-first in source order
//! 3. [`Plugin::once_exit`] after the last declaration
//!
//! # Walk Contract
//!
//! The declarations to visit are snapshotted before step 2. A plugin may insert
//! siblings before or after the declaration it is handed, replace it, or
//! append rules anywhere in the tree: inserted nodes are never visited as if
//! they were input, and a declaration removed before its turn is skipped.
//!
//! # Example
//!
//! ```rust
//! use duotone_sheet::{Helpers, NodeId, Plugin, Processor};
//!
//! struct Uppercase;
//!
//! impl Plugin for Uppercase {
//!     fn name(&self) -> &str {
//!         "uppercase"
//!     }
//!
//!     fn declaration(&mut self, decl: NodeId, helpers: &mut Helpers<'_>) {
//!         if let Some(d) = helpers.sheet_mut().declaration_mut(decl) {
//!             d.value = d.value.to_uppercase();
//!         }
//!     }
//! }
//!
//! let output = Processor::new().with(Uppercase).process("a { color: red }").unwrap();
//! assert_eq!(output.css, "a { color: RED }");
//! ```

use indextree::NodeId;

use crate::error::SheetError;
use crate::node::Location;
use crate::stylesheet::Stylesheet;

/// A non-fatal diagnostic attached to a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// Name of the plugin that raised it.
    pub plugin: String,
    pub text: String,
    /// Source position of the node, when it came from the input.
    pub location: Option<Location>,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "{}: {}: {}", self.plugin, loc, self.text),
            None => write!(f, "{}: {}", self.plugin, self.text),
        }
    }
}

/// Result of [`Processor::process`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub css: String,
    pub warnings: Vec<Warning>,
}

/// Access to the tree and the diagnostics sink, handed to plugin hooks.
pub struct Helpers<'a> {
    sheet: &'a mut Stylesheet,
    warnings: &'a mut Vec<Warning>,
    plugin: &'a str,
}

impl<'a> Helpers<'a> {
    pub fn sheet(&self) -> &Stylesheet {
        &*self.sheet
    }

    pub fn sheet_mut(&mut self) -> &mut Stylesheet {
        &mut *self.sheet
    }

    /// Records a warning against `node`.
    pub fn warn(&mut self, node: NodeId, text: impl Into<String>) {
        let warning = Warning {
            plugin: self.plugin.to_string(),
            text: text.into(),
            location: self.sheet.get(node).and_then(|n| n.source),
        };
        tracing::warn!(plugin = self.plugin, "{}", warning.text);
        self.warnings.push(warning);
    }
}

/// A transform that the [`Processor`] drives over a document.
///
/// All hooks default to doing nothing.
pub trait Plugin {
    fn name(&self) -> &str;

    /// Called once per document before declarations are visited.
    fn once(&mut self, _helpers: &mut Helpers<'_>) {}

    /// Called for every declaration that was in the document when the walk began.
    fn declaration(&mut self, _decl: NodeId, _helpers: &mut Helpers<'_>) {}

    /// Called once per document after all declarations were visited.
    fn once_exit(&mut self, _helpers: &mut Helpers<'_>) {}
}

/// Runs a fixed chain of plugins over documents.
#[derive(Default)]
pub struct Processor {
    plugins: Vec<Box<dyn Plugin>>,
}

impl Processor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a plugin to the end of the chain.
    pub fn with(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Names of the plugins in chain order.
    /// Parses `css`, runs every plugin and serializes the result.
    ///
    /// # Errors
    ///
    /// Only parsing can fail; plugins report problems as warnings.
    pub fn process(&mut self, css: &str) -> Result<ProcessOutput, SheetError> {
        let mut sheet = Stylesheet::parse(css)?;
        let warnings = self.process_sheet(&mut sheet);
        Ok(ProcessOutput {
            css: sheet.to_css(),
            warnings,
        })
    }

    /// Runs every plugin over an already parsed sheet, returning the warnings.
    pub fn process_sheet(&mut self, sheet: &mut Stylesheet) -> Vec<Warning> {
        let names: Vec<String> = self.plugins.iter().map(|p| p.name().to_string()).collect();
        let mut warnings = Vec::new();

        for (plugin, name) in self.plugins.iter_mut().zip(&names) {
            let mut helpers = Helpers {
                sheet: &mut *sheet,
                warnings: &mut warnings,
                plugin: name,
            };
            plugin.once(&mut helpers);
        }

        let declarations = sheet.declarations();
        tracing::trace!(count = declarations.len(), "walking declarations");
        for decl in declarations {
            for (plugin, name) in self.plugins.iter_mut().zip(&names) {
                if sheet.is_removed(decl) {
                    break;
                }
                let mut helpers = Helpers {
                    sheet: &mut *sheet,
                    warnings: &mut warnings,
                    plugin: name,
                };
                plugin.declaration(decl, &mut helpers);
            }
        }

        for (plugin, name) in self.plugins.iter_mut().zip(&names) {
            let mut helpers = Helpers {
                sheet: &mut *sheet,
                warnings: &mut warnings,
                plugin: name,
            };
            plugin.once_exit(&mut helpers);
        }

        warnings
    }
}
