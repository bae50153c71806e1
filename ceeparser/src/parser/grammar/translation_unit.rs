//! The entry production: a sequence of external declarations and function
//! definitions, consuming every non-`Bof`/`Eof` token.

use crate::lexeme::LexemeKind;
use crate::node::{NodeId, NodeKind};
use crate::parser::Parser;

use super::declaration;

pub(in crate::parser) fn parse(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;
    let mut kids = Vec::new();

    while !p.at_eof() {
        match parse_external_item(p) {
            Some(item) => kids.push(item),
            None => break,
        }
    }

    Some(p.node(NodeKind::TranslationUnit, start, &kids))
}

/// One top-level item: a bare `;`, a preprocessor line the lexer kept as a
/// single lexeme, a `template <...> ...;`, or (falling through to the common
/// case) an external declaration/function definition.
fn parse_external_item(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;
    if p.at(";") {
        p.pos += 1;
        return Some(p.node(NodeKind::NullStatement, start, &[]));
    }
    if p.peek_kind() == LexemeKind::Preproc {
        return Some(p.bump(NodeKind::PreprocLine));
    }
    if p.peek_kind() == LexemeKind::Keyword && p.at("template") {
        return parse_template(p);
    }
    declaration::parse_external(p)
}

/// A simplified `template < specifier-list > declaration`: template
/// parameters aren't modeled individually, just skipped over as a balanced
/// `<...>` run, since nothing downstream needs to instantiate them.
fn parse_template(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;
    p.pos += 1; // 'template'
    if !p.at("<") {
        p.err_here("expected '<' after template");
        return None;
    }
    p.pos += 1;
    let mut depth = 1;
    while depth > 0 {
        if p.at_eof() {
            p.err_here("unterminated template parameter list");
            return None;
        }
        if p.at("<") {
            depth += 1;
        } else if p.at(">") {
            depth -= 1;
        }
        p.pos += 1;
    }

    let body = declaration::parse_external(p)?;
    Some(p.node(NodeKind::Template, start, &[body]))
}
