//! Output strategies: how one declaration's light and dark renderings end up
//! in the tree.
//!
//! # Flag-gated
//!
//! ```css
//! a { color: oklch(from var(--G01) l c h / .1) }
//! ```
//!
//! becomes
//!
//! ```css
//! a {
//!   --v1868641404: var(--flag-light, oklch(from #eee l c h / .1)) var(--flag-dark, oklch(from #111 l c h / .1));
//!   color: var(--v1868641404);
//!   color: oklch(from var(--G01) l c h / .1)
//! }
//! ```
//!
//! The original declaration stays last for whatever handles the advanced color
//! syntax downstream.
//!
//! # Dark rule
//!
//! ```css
//! a { color: cc(G01) }
//! ```
//!
//! becomes, with [`Nesting::NestedRule`],
//!
//! ```css
//! a { color: #eee; html[data-theme="dark"] & { color: #111 } }
//! ```
//!
//! The original declaration is replaced by its light rendering.

use duotone_sheet::{Helpers, Node, NodeId, NodeKind, Raws};

use crate::naming::custom_property_name;
use crate::options::Nesting;
use crate::pattern::has_advanced_color;
use crate::render::Renderer;

/// What a strategy did with a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Untouched,
    Rewritten,
}

fn declaration_value(decl: NodeId, helpers: &Helpers<'_>) -> Option<(String, String)> {
    helpers
        .sheet()
        .declaration(decl)
        .map(|d| (d.prop.clone(), d.value.clone()))
}

/// Inserts the flag-gated custom property and its consumer before `decl`.
pub(crate) fn flag_gated(
    renderer: &Renderer,
    flags: &[String; 2],
    decl: NodeId,
    helpers: &mut Helpers<'_>,
) -> Outcome {
    let Some((prop, value)) = declaration_value(decl, helpers) else {
        return Outcome::Untouched;
    };
    if !has_advanced_color(&value) || !renderer.has_reference(&value) {
        tracing::trace!(%prop, %value, "no themed advanced color");
        return Outcome::Untouched;
    }

    let (light, dark) = renderer.render_pair(&value);
    let name = custom_property_name(&value);
    let gated = format!("var({}, {light}) var({}, {dark})", flags[0], flags[1]);
    let consumer = format!("var({name})");

    let sheet = helpers.sheet_mut();
    sheet.clone_before(decl, |node| {
        if let Some(d) = node.as_declaration_mut() {
            d.prop = name.clone();
            d.value = gated;
        }
    });
    sheet.clone_before(decl, |node| {
        if let Some(d) = node.as_declaration_mut() {
            d.value = consumer;
        }
    });

    tracing::debug!(%prop, %name, "gated declaration behind theme flags");
    Outcome::Rewritten
}

/// Replaces `decl` with its light rendering and emits the dark rendering
/// according to `nesting`.
pub(crate) fn dark_rule(
    renderer: &Renderer,
    dark_selector: &str,
    nesting: Nesting,
    decl: NodeId,
    helpers: &mut Helpers<'_>,
) -> Outcome {
    let Some((prop, value)) = declaration_value(decl, helpers) else {
        return Outcome::Untouched;
    };
    if !renderer.has_reference(&value) {
        tracing::trace!(%prop, %value, "no group reference");
        return Outcome::Untouched;
    }

    let (light, dark) = renderer.render_pair(&value);
    if light.as_ref() == value.as_str() {
        helpers.warn(decl, format!("Group not found: `{value}`"));
        return Outcome::Untouched;
    }
    let (light, dark) = (light.into_owned(), dark.into_owned());

    match nesting {
        Nesting::None => helpers.warn(
            decl,
            format!("No nesting support configured, dark rule for `{prop}` skipped"),
        ),
        Nesting::NestedRule | Nesting::AtRuleNest => {
            insert_nested(decl, helpers, dark_selector, nesting, &dark)
        }
        Nesting::Flatten => append_flattened(decl, helpers, dark_selector, &dark),
    }

    let sheet = helpers.sheet_mut();
    if let Some(replacement) = sheet.clone_node(decl, |node| {
        if let Some(d) = node.as_declaration_mut() {
            d.value = light;
        }
    }) {
        sheet.replace_with(decl, replacement);
    }

    tracing::debug!(%prop, %nesting, "split declaration into light and dark");
    Outcome::Rewritten
}

/// `<dark-selector> & { prop: dark }` (or its `@nest` form) right after `decl`.
fn insert_nested(
    decl: NodeId,
    helpers: &mut Helpers<'_>,
    dark_selector: &str,
    nesting: Nesting,
    dark: &str,
) {
    let sheet = helpers.sheet_mut();
    let Some(node) = sheet.get(decl) else {
        return;
    };
    let before = node.raws.before.clone();
    let inner_before = if before.contains('\n') {
        format!("{before}  ")
    } else {
        before.clone()
    };
    let semicolon = sheet
        .parent(decl)
        .and_then(|parent| sheet.get(parent))
        .is_some_and(|parent| parent.raws.semicolon);

    let Some(dark_decl) = sheet.clone_node(decl, |node| {
        node.raws.before = inner_before;
        if let Some(d) = node.as_declaration_mut() {
            d.value = dark.to_string();
        }
    }) else {
        return;
    };

    let params = format!("{dark_selector} &");
    let wrapper = match nesting {
        Nesting::AtRuleNest => Node::at_rule("nest", params),
        _ => Node::rule(params),
    };
    let raws = Raws {
        before: before.clone(),
        after: before,
        semicolon,
        ..wrapper.raws.clone()
    };
    let wrapper = wrapper.with_raws(raws);

    let rule = sheet.insert_after(decl, wrapper);
    sheet.append(rule, dark_decl);
}

/// A dark rule with the enclosing selectors spelled out, appended to the
/// parent of the outermost enclosing rule. At-rules nested inside the
/// enclosing rules are rebuilt around it.
fn append_flattened(decl: NodeId, helpers: &mut Helpers<'_>, dark_selector: &str, dark: &str) {
    let ancestors = helpers.sheet().rule_ancestors(decl);
    if ancestors.selectors.is_empty() {
        helpers.warn(decl, "Declaration is not inside a rule, dark rule skipped");
        return;
    }

    let selector = resolve_nested_selectors(&ancestors.selectors)
        .iter()
        .map(|s| format!("{dark_selector} {s}"))
        .collect::<Vec<_>>()
        .join(", ");

    let sheet = helpers.sheet_mut();
    let Some(dark_decl) = sheet.clone_node(decl, |node| {
        node.raws.before = " ".to_string();
        if let Some(d) = node.as_declaration_mut() {
            d.value = dark.to_string();
        }
    }) else {
        return;
    };

    let wrappers: Vec<Node> = ancestors
        .at_rules
        .iter()
        .filter_map(|id| match &sheet.get(*id)?.kind {
            NodeKind::AtRule { name, params, .. } => Some(Node::at_rule(name, params)),
            _ => None,
        })
        .collect();

    let mut parent = ancestors.container;
    let mut before = "\n";
    for wrapper in wrappers {
        let raws = Raws {
            before: before.to_string(),
            after: " ".to_string(),
            ..wrapper.raws.clone()
        };
        parent = sheet.append(parent, wrapper.with_raws(raws));
        before = " ";
    }

    let rule = Node::rule(selector).with_raws(Raws {
        before: before.to_string(),
        between: " ".to_string(),
        after: " ".to_string(),
        ..Raws::default()
    });
    sheet.append_tree(parent, rule, vec![dark_decl]);
}

/// Expands nested selectors (outermost first) into complete selectors.
///
/// `&` stands for the parent selector; a part without `&` is a descendant of
/// it. Selector lists multiply out:
///
/// `["a, b", "& > c", ".d"]` gives `a > c .d, b > c .d`.
pub(crate) fn resolve_nested_selectors(selectors: &[String]) -> Vec<String> {
    let mut resolved: Vec<String> = Vec::new();
    for selector in selectors {
        let parts = split_selector_list(selector);
        if resolved.is_empty() {
            resolved = parts;
            continue;
        }
        resolved = resolved
            .iter()
            .flat_map(|parent| {
                parts.iter().map(move |part| {
                    if part.contains('&') {
                        part.replace('&', parent)
                    } else {
                        format!("{parent} {part}")
                    }
                })
            })
            .collect();
    }
    resolved
}

/// Splits a selector list on commas outside parentheses and brackets.
fn split_selector_list(selector: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in selector.char_indices() {
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(selector[start..i].trim().to_string());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(selector[start..].trim().to_string());
    parts.retain(|p| !p.is_empty());
    parts
}
