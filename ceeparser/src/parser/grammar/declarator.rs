//! Declarators: the pointer/array/function wrapping around a declared name.

use crate::lexeme::LexemeKind;
use crate::node::{NodeId, NodeKind};
use crate::parser::Parser;

pub(in crate::parser) struct Declarator {
    pub node: NodeId,
    pub name: String,
    pub is_function: bool,
}

/// `pointer? direct-declarator`. Pointers recurse so each `*` gets its own
/// node spanning from its own position to the end of the declarator, with
/// the outer `*` containing the inner one.
pub(in crate::parser) fn parse(p: &mut Parser) -> Option<Declarator> {
    if p.at("*") {
        let start = p.pos;
        p.pos += 1;
        while p.peek_kind() == LexemeKind::Keyword && crate::keywords::is_qualifier(p.peek_text()) {
            p.pos += 1;
        }
        let mut inner = parse(p)?;
        inner.node = p.node(NodeKind::PointerDeclarator, start, &[inner.node]);
        return Some(inner);
    }
    parse_direct(p)
}

fn parse_direct(p: &mut Parser) -> Option<Declarator> {
    let start = p.pos;
    let (mut node, name) = if p.at("(") {
        p.pos += 1;
        let inner = parse(p)?;
        if !p.at(")") {
            p.err_here("expected ')'");
            return None;
        }
        p.pos += 1;
        (inner.node, inner.name)
    } else if p.peek_kind() == LexemeKind::Identifier {
        let name = p.peek_text().to_string();
        (p.bump(NodeKind::Identifier), name)
    } else {
        // No identifier and no parenthesized inner declarator: an abstract
        // declarator, e.g. the unnamed `int *` in `void foo(int *)`. Consumes
        // nothing itself; the suffix loop below still picks up any trailing
        // `[`/`(` (`int[3]`, `int (*)(void)`).
        (p.node(NodeKind::AbstractDeclarator, start, &[]), String::new())
    };

    if p.peek_kind() == LexemeKind::Keyword && (p.at("asm") || p.at("__asm__")) {
        node = parse_asm_suffix(p, start, node)?;
    }

    let mut is_function = false;
    loop {
        if p.at("[") {
            p.pos += 1;
            let size = if !p.at("]") { Some(p.parse_assignment()?) } else { None };
            if !p.at("]") {
                p.err_here("expected ']'");
                return None;
            }
            p.pos += 1;
            let mut kids = vec![node];
            kids.extend(size);
            node = p.node(NodeKind::ArrayDeclarator, start, &kids);
        } else if p.at("(") {
            p.pos += 1;
            let params = parse_parameter_list(p)?;
            p.pos += 1; // ')', checked by parse_parameter_list
            is_function = true;
            node = p.node(NodeKind::FunctionDeclarator, start, &[node, params]);
        } else if p.at(":") {
            // Bitfield width, e.g. `unsigned x : 4;` inside a struct/union body.
            p.pos += 1;
            let width = p.parse_assignment()?;
            node = p.node(NodeKind::BitfieldDeclarator, start, &[node, width]);
        } else if p.peek_kind() == LexemeKind::Keyword && p.at("__attribute__") {
            let attr = super::specifier::parse_attribute(p)?;
            node = p.node(NodeKind::AttributedDeclarator, start, &[node, attr]);
        } else {
            break;
        }
    }

    Some(Declarator { node, name, is_function })
}

/// `asm`/`__asm__` `( "string"+ )`: a GCC declarator suffix that
/// pins a variable/function to a specific assembler name, e.g.
/// `int x asm("eax");`.
fn parse_asm_suffix(p: &mut Parser, start: usize, declarator: NodeId) -> Option<NodeId> {
    p.pos += 1; // 'asm' | '__asm__'
    if !p.at("(") {
        p.err_here("expected '(' after asm");
        return None;
    }
    p.pos += 1;
    let mut kids = vec![declarator];
    loop {
        if p.peek_kind() != LexemeKind::String {
            p.err_here("expected a string literal in asm suffix");
            return None;
        }
        kids.push(p.bump(NodeKind::StringLiteral));
        if p.peek_kind() == LexemeKind::String {
            continue;
        }
        break;
    }
    if !p.at(")") {
        p.err_here("expected ')'");
        return None;
    }
    p.pos += 1;
    Some(p.node(NodeKind::AsmSuffix, start, &kids))
}

fn parse_parameter_list(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;
    let mut kids = Vec::new();

    if p.at(")") {
        return Some(p.node(NodeKind::ParameterList, start, &kids));
    }
    if p.at("void") && p.nth_text(1) == ")" {
        p.pos += 1;
        return Some(p.node(NodeKind::ParameterList, start, &kids));
    }

    loop {
        let p_start = p.pos;
        if p.at("...") {
            p.pos += 1;
            break;
        }
        let specs = super::specifier::parse(p)?;
        let mut p_kids = vec![specs.node];
        if !p.at(",") && !p.at(")") {
            p_kids.push(parse(p)?.node);
        }
        kids.push(p.node(NodeKind::Parameter, p_start, &p_kids));

        if p.at(",") {
            p.pos += 1;
            continue;
        }
        break;
    }

    if !p.at(")") {
        p.err_here("expected ')'");
        return None;
    }
    Some(p.node(NodeKind::ParameterList, start, &kids))
}
