//! The light/dark flag rules and the per-document state that decides whether
//! they stay.
//!
//! Flag-gated values read two boolean custom properties. In the light scope
//! the light flag is `initial` and the dark flag is a single space; the dark
//! scope is the inverse:
//!
//! ```css
//! html {
//!   --flag-light: initial;
//!   --flag-dark:  ;
//! }
//! html[data-theme="dark"] {
//!   --flag-light:  ;
//!   --flag-dark: initial;
//! }
//! ```
//!
//! Both rules are staged at the top of every document before the walk and
//! removed again at the end unless a declaration was rewritten, so a document
//! either carries the complete pair or neither rule.

use duotone_sheet::{Helpers, Node, NodeId, Raws};

/// Value of a flag that is switched on.
const ON: &str = "initial";
/// Value of a flag that is switched off. A space, not an empty value.
const OFF: &str = " ";

/// Transient state of one document pass.
#[derive(Debug, Default)]
pub(crate) struct DocumentState {
    /// Set once any declaration was rewritten.
    pub rewritten: bool,
    /// Flag rules staged by [`DocumentState::stage`], light first.
    pub staged: Vec<NodeId>,
    /// The previously first node, if staging gave it a leading newline.
    displaced: Option<NodeId>,
}

impl DocumentState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Prepends the light and dark flag rules to the document.
    pub fn stage(
        &mut self,
        helpers: &mut Helpers<'_>,
        flags: &[String; 2],
        selectors: &[String; 2],
    ) {
        let sheet = helpers.sheet_mut();
        let root = sheet.root();
        let first = sheet.children(root).next();

        let light = sheet.prepend(root, flag_rule(&selectors[0], ""));
        for decl in flag_declarations(flags, [ON, OFF]) {
            sheet.append(light, decl);
        }
        let dark = sheet.insert_after(light, flag_rule(&selectors[1], "\n"));
        for decl in flag_declarations(flags, [OFF, ON]) {
            sheet.append(dark, decl);
        }

        if let Some(node) = first.and_then(|id| sheet.get_mut(id)) {
            if node.raws.before.is_empty() {
                node.raws.before = "\n".to_string();
                self.displaced = first;
            }
        }

        tracing::debug!(light = %selectors[0], dark = %selectors[1], "staged flag rules");
        self.staged = vec![light, dark];
    }

    /// Drops the staged rules unless something was rewritten, then resets.
    pub fn finish(&mut self, helpers: &mut Helpers<'_>) {
        if !self.rewritten && !self.staged.is_empty() {
            let sheet = helpers.sheet_mut();
            for id in &self.staged {
                sheet.remove(*id);
            }
            if let Some(node) = self.displaced.and_then(|id| sheet.get_mut(id)) {
                node.raws.before.clear();
            }
            tracing::debug!("no rewrites, removed flag rules");
        }
        self.reset();
    }
}

fn flag_rule(selector: &str, before: &str) -> Node {
    Node::rule(selector).with_raws(Raws {
        before: before.to_string(),
        between: " ".to_string(),
        after: "\n".to_string(),
        semicolon: true,
        ..Raws::default()
    })
}

fn flag_declarations(flags: &[String; 2], values: [&str; 2]) -> [Node; 2] {
    [
        Node::declaration(flags[0].as_str(), values[0]).with_before("\n  "),
        Node::declaration(flags[1].as_str(), values[1]).with_before("\n  "),
    ]
}
