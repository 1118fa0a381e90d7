//! # Duotone Sheet - Lossless CSS Trees
//!
//! `duotone-sheet` parses CSS into a mutable tree that remembers every byte of
//! whitespace, lets plugins rewrite declarations in place, and serializes the
//! result. It is the host layer for the `duotone` theme-color transform, but
//! knows nothing about colors itself.
//!
//! ## Core Concepts
//!
//! - [`Stylesheet`]: the tree, backed by an arena and addressed by [`NodeId`]
//! - [`Node`]: rule, at-rule, declaration or comment, plus its source [`Raws`]
//! - [`Plugin`]: hooks called once per document and once per declaration
//! - [`Processor`]: runs a chain of plugins and collects [`Warning`]s
//!
//! ## Quick Start
//!
//! ```rust
//! use duotone_sheet::Stylesheet;
//!
//! let css = "a {\n  color: red;\n}\n";
//! let sheet = Stylesheet::parse(css).unwrap();
//!
//! // Untouched trees serialize byte for byte.
//! assert_eq!(sheet.to_css(), css);
//!
//! let decl = sheet.declarations()[0];
//! assert_eq!(sheet.declaration(decl).unwrap().value, "red");
//! ```
//!
//! ## Scope
//!
//! Selectors, at-rule preludes and declaration values are kept as raw text.
//! The parser only decides where items begin and end, which is all a
//! text-substituting transform needs.

mod error;
mod node;
mod parser;
mod processor;
mod stringify;
mod stylesheet;

pub use error::{Result, SheetError};
pub use indextree::NodeId;
pub use node::{Declaration, Location, Node, NodeKind, Raws};
pub use processor::{Helpers, Plugin, ProcessOutput, Processor, Warning};
pub use stylesheet::{RuleAncestors, Stylesheet};
