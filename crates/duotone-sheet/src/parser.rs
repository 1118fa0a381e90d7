//! CSS parsing into a lossless tree.
//!
//! # Design
//!
//! The parser is built on top of `cssparser` (the same tokenizer used by
//! Firefox), which takes care of comments, escapes, strings and balanced
//! parenthesized blocks. Unlike a typed CSS parser it does not interpret
//! selectors or values: each item of a block is scanned token by token until
//! one of three terminators decides what it was:
//!
//! - `{` — a rule (or an at-rule with a body); the text before it is the prelude
//! - `;` — a declaration (or a body-less at-rule)
//! - end of block — a final declaration without a trailing semicolon
//!
//! A `}` with no open block is an error wherever it appears.
//!
//! The source text of each piece is then sliced out verbatim, and the
//! surrounding whitespace is stored in the node's [`Raws`]. That is what makes
//! `parse(css).to_css() == css` hold for every input the parser accepts.
//!
//! Comments that stand between items become [`NodeKind::Comment`] nodes;
//! comments inside a selector or value stay part of that text.

use cssparser::{ParseError, Parser, ParserInput, SourcePosition, Token};
use indextree::{Arena, NodeId};

use crate::error::SheetError;
use crate::node::{Declaration, Location, Node, NodeKind, Raws};

#[derive(Debug, Clone)]
enum SyntaxError {
    UnknownWord(String),
    UnexpectedCloseBracket,
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyntaxError::UnknownWord(word) => write!(f, "Unknown word `{}`", word),
            SyntaxError::UnexpectedCloseBracket => write!(f, "Unexpected `}}`"),
        }
    }
}

/// How the scan of one item ended.
enum Terminator {
    Block,
    Semicolon,
    End,
}

/// Parses `css` into `arena`, returning the root node.
pub(crate) fn parse_into(css: &str, arena: &mut Arena<Node>) -> Result<NodeId, SheetError> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let root = arena.new_node(Node::root());

    parse_children(&mut parser, arena, root).map_err(|e| {
        let message = match &e.kind {
            cssparser::ParseErrorKind::Custom(err) => err.to_string(),
            cssparser::ParseErrorKind::Basic(basic) => format!("{:?}", basic),
        };
        SheetError::Parse {
            line: e.location.line + 1,
            column: e.location.column,
            message,
        }
    })?;

    Ok(root)
}

fn parse_children<'i, 't>(
    input: &mut Parser<'i, 't>,
    arena: &mut Arena<Node>,
    parent: NodeId,
) -> Result<(), ParseError<'i, SyntaxError>> {
    // Whitespace (and stray semicolons) waiting to become the next node's `before`.
    let mut pending = String::new();
    let mut last_terminated = false;

    loop {
        let start = input.position();
        skip_whitespace(input);
        pending.push_str(input.slice_from(start));

        let location = location_of(input);
        let item_start = input.position();
        let state = input.state();
        let token = match input.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        match token {
            Token::Comment(text) => {
                let node = Node {
                    kind: NodeKind::Comment {
                        text: text.to_string(),
                    },
                    raws: Raws {
                        before: std::mem::take(&mut pending),
                        ..Raws::default()
                    },
                    source: Some(location),
                };
                parent.append(arena.new_node(node), arena);
                last_terminated = false;
            }
            Token::Semicolon => {
                pending.push(';');
            }
            Token::CloseCurlyBracket => {
                return Err(input.new_custom_error(SyntaxError::UnexpectedCloseBracket));
            }
            Token::AtKeyword(name) => {
                let before = std::mem::take(&mut pending);
                last_terminated =
                    parse_at_rule(input, arena, parent, name.as_ref().to_string(), before, location)?;
            }
            _ => {
                input.reset(&state);
                let before = std::mem::take(&mut pending);
                let (terminated, trailing) =
                    parse_rule_or_declaration(input, arena, parent, item_start, before, location)?;
                last_terminated = terminated;
                pending = trailing;
            }
        }
    }

    let last_takes_semicolon = parent
        .children(arena)
        .last()
        .map(|id| arena[id].get().takes_semicolon())
        .unwrap_or(false);
    let raws = &mut arena[parent].get_mut().raws;
    raws.after = pending;
    raws.semicolon = last_terminated && last_takes_semicolon;
    Ok(())
}

/// Parses an item that is either a qualified rule or a declaration.
///
/// Returns whether the item was terminated by `;`, plus any whitespace that
/// trailed an unterminated final declaration (it belongs to the parent).
fn parse_rule_or_declaration<'i, 't>(
    input: &mut Parser<'i, 't>,
    arena: &mut Arena<Node>,
    parent: NodeId,
    item_start: SourcePosition,
    before: String,
    location: Location,
) -> Result<(bool, String), ParseError<'i, SyntaxError>> {
    let (terminator, text) = scan_item(input, item_start)?;

    match terminator {
        Terminator::Block => {
            let (selector, between) = split_trailing_whitespace(text);
            let node = Node {
                kind: NodeKind::Rule {
                    selector: selector.to_string(),
                },
                raws: Raws {
                    before,
                    between: between.to_string(),
                    ..Raws::default()
                },
                source: Some(location),
            };
            let id = arena.new_node(node);
            parent.append(id, arena);
            input.parse_nested_block(|input| parse_children(input, arena, id))?;
            Ok((false, String::new()))
        }
        Terminator::Semicolon | Terminator::End => {
            let Some(parts) = split_declaration(text) else {
                let word = text.split_whitespace().next().unwrap_or(text).to_string();
                return Err(input.new_custom_error(SyntaxError::UnknownWord(word)));
            };
            let terminated = matches!(terminator, Terminator::Semicolon);
            // Whitespace before `}` belongs to the block, not the declaration.
            let (after, trailing) = if terminated {
                (parts.after.to_string(), String::new())
            } else {
                (String::new(), parts.after.to_string())
            };
            let mut declaration = Declaration::new(parts.prop, parts.value);
            declaration.important = !parts.important.is_empty();
            let node = Node {
                kind: NodeKind::Declaration(declaration),
                raws: Raws {
                    before,
                    between: parts.between.to_string(),
                    after,
                    important: parts.important.to_string(),
                    ..Raws::default()
                },
                source: Some(location),
            };
            parent.append(arena.new_node(node), arena);
            Ok((terminated, trailing))
        }
    }
}

/// Parses the remainder of an at-rule whose `@name` was just consumed.
fn parse_at_rule<'i, 't>(
    input: &mut Parser<'i, 't>,
    arena: &mut Arena<Node>,
    parent: NodeId,
    name: String,
    before: String,
    location: Location,
) -> Result<bool, ParseError<'i, SyntaxError>> {
    let params_start = input.position();
    let (terminator, text) = scan_item(input, params_start)?;

    let params_trimmed = text.trim_start();
    let after_name = &text[..text.len() - params_trimmed.len()];
    let (params, between) = split_trailing_whitespace(params_trimmed);
    let has_body = matches!(terminator, Terminator::Block);

    let node = Node {
        kind: NodeKind::AtRule {
            name,
            params: params.to_string(),
            has_body,
        },
        raws: Raws {
            before,
            between: between.to_string(),
            after_name: after_name.to_string(),
            ..Raws::default()
        },
        source: Some(location),
    };
    let id = arena.new_node(node);
    parent.append(id, arena);

    if has_body {
        input.parse_nested_block(|input| parse_children(input, arena, id))?;
    }
    Ok(matches!(terminator, Terminator::Semicolon))
}

/// Consumes tokens up to the item's terminator and returns the text in front of it.
///
/// Inside a block the closing `}` ends the nested parser and shows up as
/// [`Terminator::End`], so a `}` token seen here has no block to close.
fn scan_item<'i, 't>(
    input: &mut Parser<'i, 't>,
    start: SourcePosition,
) -> Result<(Terminator, &'i str), ParseError<'i, SyntaxError>> {
    loop {
        let before_token = input.position();
        let terminator = match input.next_including_whitespace_and_comments() {
            Ok(Token::CurlyBracketBlock) => Some(Terminator::Block),
            Ok(Token::Semicolon) => Some(Terminator::Semicolon),
            Ok(Token::CloseCurlyBracket) => {
                return Err(input.new_custom_error(SyntaxError::UnexpectedCloseBracket));
            }
            Ok(_) => None,
            Err(_) => Some(Terminator::End),
        };
        if let Some(terminator) = terminator {
            return Ok((terminator, input.slice(start..before_token)));
        }
    }
}

fn skip_whitespace(input: &mut Parser<'_, '_>) {
    loop {
        let state = input.state();
        let is_whitespace = matches!(
            input.next_including_whitespace_and_comments(),
            Ok(Token::WhiteSpace(_))
        );
        if !is_whitespace {
            input.reset(&state);
            return;
        }
    }
}

fn location_of(input: &Parser<'_, '_>) -> Location {
    let loc = input.current_source_location();
    Location {
        line: loc.line + 1,
        column: loc.column,
    }
}

fn split_trailing_whitespace(text: &str) -> (&str, &str) {
    let trimmed = text.trim_end();
    (trimmed, &text[trimmed.len()..])
}

struct DeclarationParts<'a> {
    prop: &'a str,
    between: &'a str,
    value: &'a str,
    /// `!important` as written, with the whitespace in front of it. Empty
    /// when the declaration is not important.
    important: &'a str,
    after: &'a str,
}

/// Splits `prop : value !important  ` into its pieces. `None` when there is no
/// colon or no property name in front of it.
fn split_declaration(text: &str) -> Option<DeclarationParts<'_>> {
    let colon = text.find(':')?;
    let prop = text[..colon].trim_end();
    if prop.is_empty() {
        return None;
    }
    let rest = &text[colon + 1..];
    let value_start = colon + 1 + (rest.len() - rest.trim_start().len());
    let (value, after) = split_trailing_whitespace(&text[value_start..]);
    let (value, important) = split_important(value);
    Some(DeclarationParts {
        prop,
        between: &text[prop.len()..value_start],
        value,
        important,
        after,
    })
}

/// Splits a trailing `!important` (any case, optional space after `!`) off
/// `value`.
fn split_important(value: &str) -> (&str, &str) {
    let Some(bang) = value.rfind('!') else {
        return (value, "");
    };
    if !value[bang + 1..].trim_start().eq_ignore_ascii_case("important") {
        return (value, "");
    }
    let head = value[..bang].trim_end();
    (head, &value[head.len()..])
}
