//! Node types stored in a [`Stylesheet`](crate::Stylesheet).
//!
//! Every node keeps the whitespace that surrounded it in the source as
//! [`Raws`], so an unmodified tree serializes back to the exact input. Nodes
//! built in code start with compact defaults (`": "` between a property and
//! its value, `" "` before a block) that callers can override with
//! [`Node::with_raws`].

/// A 1-based position in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source whitespace attached to a node.
///
/// Not every field applies to every node kind:
///
/// | Field | Root | Rule | At-rule | Declaration | Comment |
/// |-------|------|------|---------|-------------|---------|
/// | `before` | | yes | yes | yes | yes |
/// | `between` | | before `{` | before `{` or `;` | around `:` | |
/// | `after` | end of file | before `}` | before `}` | before `;` | |
/// | `after_name` | | | after `@name` | | |
/// | `important` | | | | source spelling of `!important` | |
/// | `semicolon` | last child has `;` | same | same | | |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Raws {
    pub before: String,
    pub between: String,
    pub after: String,
    pub after_name: String,
    /// Empty means `" !important"`.
    pub important: String,
    pub semicolon: bool,
}

/// A property/value pair inside a rule.
///
/// `value` never contains the `!important` flag; it is kept in `important`
/// and written back by the serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub prop: String,
    pub value: String,
    pub important: bool,
}

impl Declaration {
    pub fn new(prop: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            value: value.into(),
            important: false,
        }
    }

    /// Marks the declaration `!important`.
    pub fn important(mut self) -> Self {
        self.important = true;
        self
    }
}

/// What a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document itself.
    Root,
    /// A selector-scoped block: `a, b { ... }`.
    Rule { selector: String },
    /// `@name params { ... }` or `@name params;`.
    AtRule {
        name: String,
        params: String,
        has_body: bool,
    },
    Declaration(Declaration),
    /// A comment standing between other nodes. `text` excludes the delimiters.
    Comment { text: String },
}

/// A node of the style-sheet tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub raws: Raws,
    pub source: Option<Location>,
}

impl Node {
    pub(crate) fn root() -> Self {
        Self {
            kind: NodeKind::Root,
            raws: Raws::default(),
            source: None,
        }
    }

    /// Creates an empty rule for `selector`.
    pub fn rule(selector: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Rule {
                selector: selector.into(),
            },
            raws: Raws {
                between: " ".to_string(),
                ..Raws::default()
            },
            source: None,
        }
    }

    /// Creates an at-rule with an (initially empty) body.
    pub fn at_rule(name: impl Into<String>, params: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::AtRule {
                name: name.into(),
                params: params.into(),
                has_body: true,
            },
            raws: Raws {
                between: " ".to_string(),
                after_name: " ".to_string(),
                ..Raws::default()
            },
            source: None,
        }
    }

    pub fn declaration(prop: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Declaration(Declaration::new(prop, value)),
            raws: Raws {
                between: ": ".to_string(),
                ..Raws::default()
            },
            source: None,
        }
    }

    /// Replaces the raws, returning `self` for chaining.
    pub fn with_raws(mut self, raws: Raws) -> Self {
        self.raws = raws;
        self
    }

    /// Sets `raws.before`, returning `self` for chaining.
    pub fn with_before(mut self, before: impl Into<String>) -> Self {
        self.raws.before = before.into();
        self
    }

    pub fn as_declaration(&self) -> Option<&Declaration> {
        match &self.kind {
            NodeKind::Declaration(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_declaration_mut(&mut self) -> Option<&mut Declaration> {
        match &mut self.kind {
            NodeKind::Declaration(decl) => Some(decl),
            _ => None,
        }
    }

    /// The selector of a rule node.
    pub fn selector(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Rule { selector } => Some(selector),
            _ => None,
        }
    }

    /// Whether the serializer may terminate this node with `;`.
    pub(crate) fn takes_semicolon(&self) -> bool {
        match &self.kind {
            NodeKind::Declaration(_) => true,
            NodeKind::AtRule { has_body, .. } => !has_body,
            _ => false,
        }
    }
}
