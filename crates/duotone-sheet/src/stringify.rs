//! Serialization of the tree back to CSS text.

use indextree::{Arena, NodeId};

use crate::node::{Node, NodeKind};

pub(crate) fn stringify(arena: &Arena<Node>, root: NodeId) -> String {
    let mut out = String::new();
    write_node(arena, root, &mut out, false);
    out
}

/// Writes `id`. `needs_semicolon` is decided by the parent: every
/// semicolon-taking child gets one, except a last child whose parent was
/// parsed without one.
fn write_node(arena: &Arena<Node>, id: NodeId, out: &mut String, needs_semicolon: bool) {
    let node = arena[id].get();
    let raws = &node.raws;

    match &node.kind {
        NodeKind::Root => {
            write_children(arena, id, out);
            out.push_str(&raws.after);
        }
        NodeKind::Rule { selector } => {
            out.push_str(&raws.before);
            out.push_str(selector);
            write_block(arena, id, node, out);
        }
        NodeKind::AtRule {
            name,
            params,
            has_body,
        } => {
            out.push_str(&raws.before);
            out.push('@');
            out.push_str(name);
            out.push_str(&raws.after_name);
            out.push_str(params);
            if *has_body {
                write_block(arena, id, node, out);
            } else {
                out.push_str(&raws.between);
                if needs_semicolon {
                    out.push(';');
                }
            }
        }
        NodeKind::Declaration(decl) => {
            out.push_str(&raws.before);
            out.push_str(&decl.prop);
            out.push_str(&raws.between);
            out.push_str(&decl.value);
            if decl.important {
                if raws.important.is_empty() {
                    out.push_str(" !important");
                } else {
                    out.push_str(&raws.important);
                }
            }
            out.push_str(&raws.after);
            if needs_semicolon {
                out.push(';');
            }
        }
        NodeKind::Comment { text } => {
            out.push_str(&raws.before);
            out.push_str("/*");
            out.push_str(text);
            out.push_str("*/");
        }
    }
}

fn write_block(arena: &Arena<Node>, id: NodeId, node: &Node, out: &mut String) {
    out.push_str(&node.raws.between);
    out.push('{');
    write_children(arena, id, out);
    out.push_str(&node.raws.after);
    out.push('}');
}

fn write_children(arena: &Arena<Node>, id: NodeId, out: &mut String) {
    let semicolon_after_last = arena[id].get().raws.semicolon;
    let mut children = id.children(arena).peekable();
    while let Some(child) = children.next() {
        let is_last = children.peek().is_none();
        let needs_semicolon =
            arena[child].get().takes_semicolon() && (!is_last || semicolon_after_last);
        write_node(arena, child, out, needs_semicolon);
    }
}
