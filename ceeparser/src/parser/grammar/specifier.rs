//! `declaration-specifiers`: storage classes, qualifiers, builtin types,
//! tag specifiers (`struct`/`union`/`enum`), and typedef-name references.

use crate::keywords::{is_builtin_type, is_qualifier};
use crate::lexeme::LexemeKind;
use crate::node::{NodeId, NodeKind};
use crate::parser::Parser;

pub(in crate::parser) struct Specifiers {
    pub node: NodeId,
    pub is_typedef: bool,
}

pub(in crate::parser) fn parse(p: &mut Parser) -> Option<Specifiers> {
    let start = p.pos;
    let mut is_typedef = false;
    let mut kids = Vec::new();
    let mut saw_any = false;

    loop {
        match p.peek_kind() {
            LexemeKind::Keyword => {
                let text = p.peek_text().to_string();
                if text == "typedef" {
                    is_typedef = true;
                    p.pos += 1;
                    saw_any = true;
                } else if text == "struct" || text == "union" {
                    kids.push(parse_struct_or_union(p, text == "struct")?);
                    saw_any = true;
                } else if text == "class" {
                    kids.push(parse_class(p)?);
                    saw_any = true;
                } else if text == "enum" {
                    kids.push(parse_enum(p)?);
                    saw_any = true;
                } else if text == "_Atomic" && p.nth_text(1) == "(" {
                    kids.push(parse_atomic(p)?);
                    saw_any = true;
                } else if text == "typeof" || text == "__typeof__" {
                    kids.push(parse_typeof(p)?);
                    saw_any = true;
                } else if text == "__attribute__" {
                    kids.push(parse_attribute(p)?);
                    saw_any = true;
                } else if is_qualifier(&text) || is_builtin_type(&text) {
                    p.pos += 1;
                    saw_any = true;
                } else {
                    break;
                }
            }
            LexemeKind::Identifier if !saw_any && p.scope_is_type_name(p.peek_text()) => {
                kids.push(p.bump(NodeKind::TypedefName));
                saw_any = true;
                break;
            }
            _ => break,
        }
    }

    if !saw_any {
        p.err_here("expected a declaration specifier");
        return None;
    }

    Some(Specifiers {
        node: p.node(NodeKind::DeclarationSpecifiers, start, &kids),
        is_typedef,
    })
}

fn parse_struct_or_union(p: &mut Parser, is_struct: bool) -> Option<NodeId> {
    let start = p.pos;
    p.pos += 1; // 'struct' | 'union'
    let mut kids = Vec::new();
    let mut tag_name = None;

    if p.peek_kind() == LexemeKind::Identifier {
        tag_name = Some(p.peek_text().to_string());
        kids.push(p.bump(NodeKind::Identifier));
    }

    if p.at("{") {
        p.pos += 1;
        while !p.at("}") {
            if p.at_eof() {
                p.err_here("unterminated struct/union body");
                return None;
            }
            kids.push(super::declaration::parse_member(p)?);
        }
        p.pos += 1; // '}'

        if let Some(name) = tag_name {
            if is_struct {
                p.scope_add_struct(name);
            } else {
                p.scope_add_union(name);
            }
        }
    }

    Some(p.node(NodeKind::StructOrUnionSpecifier, start, &kids))
}

/// Like `parse_struct_or_union`, with one extra wrinkle: a class body may
/// open with `public`/`private`/`protected` access-specifier labels, which
/// are just skipped rather than attached to the tree (access control isn't
/// otherwise modeled here).
fn parse_class(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;
    p.pos += 1; // 'class'
    let mut kids = Vec::new();
    let mut tag_name = None;

    if p.peek_kind() == LexemeKind::Identifier {
        tag_name = Some(p.peek_text().to_string());
        kids.push(p.bump(NodeKind::Identifier));
    }

    if p.at("{") {
        p.pos += 1;
        while !p.at("}") {
            if p.at_eof() {
                p.err_here("unterminated class body");
                return None;
            }
            if p.peek_kind() == LexemeKind::Keyword
                && (p.at("public") || p.at("private") || p.at("protected"))
                && p.nth_text(1) == ":"
            {
                p.pos += 2;
                continue;
            }
            kids.push(super::declaration::parse_member(p)?);
        }
        p.pos += 1; // '}'

        if let Some(name) = tag_name {
            p.scope_add_class(name);
        }
    }

    Some(p.node(NodeKind::ClassSpecifier, start, &kids))
}

/// `_Atomic ( type-decl )` as a standalone specifier — bare `_Atomic` used as
/// a qualifier is handled by the qualifier branch above instead.
fn parse_atomic(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;
    p.pos += 1; // '_Atomic'
    p.pos += 1; // '('
    let specs = parse(p)?;
    let mut kids = vec![specs.node];
    if !p.at(")") {
        kids.push(super::declarator::parse(p)?.node);
    }
    if !p.at(")") {
        p.err_here("expected ')'");
        return None;
    }
    p.pos += 1;
    Some(p.node(NodeKind::AtomicTypeSpecifier, start, &kids))
}

/// `typeof`/`__typeof__` `( expression )`.
fn parse_typeof(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;
    p.pos += 1; // 'typeof' | '__typeof__'
    if !p.at("(") {
        p.err_here("expected '(' after typeof");
        return None;
    }
    p.pos += 1;
    let operand = p.parse_expression()?;
    if !p.at(")") {
        p.err_here("expected ')'");
        return None;
    }
    p.pos += 1;
    Some(p.node(NodeKind::TypeofSpecifier, start, &[operand]))
}

/// `__attribute__ ((...))`: a run of comma-separated attribute entries,
/// each either an expression or a bare keyword (e.g.
/// `__attribute__((unused))`, `__attribute__((aligned(8), packed))`). Also
/// used as a declarator suffix, so it's exposed to `declarator.rs`.
pub(in crate::parser) fn parse_attribute(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;
    p.pos += 1; // '__attribute__'
    if !(p.at("(") && p.nth_text(1) == "(") {
        p.err_here("expected '((' after __attribute__");
        return None;
    }
    p.pos += 2;

    let mut kids = Vec::new();
    if !p.at(")") {
        loop {
            if p.peek_kind() == LexemeKind::Keyword && p.nth_text(1) != "(" {
                kids.push(p.bump(NodeKind::Identifier));
            } else {
                kids.push(p.parse_assignment()?);
            }
            if p.at(",") {
                p.pos += 1;
                continue;
            }
            break;
        }
    }

    if !(p.at(")") && p.nth_text(1) == ")") {
        p.err_here("expected '))' to close __attribute__");
        return None;
    }
    p.pos += 2;
    Some(p.node(NodeKind::Attribute, start, &kids))
}

fn parse_enum(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;
    p.pos += 1; // 'enum'
    let mut kids = Vec::new();
    let mut tag_name = None;

    if p.peek_kind() == LexemeKind::Identifier {
        tag_name = Some(p.peek_text().to_string());
        kids.push(p.bump(NodeKind::Identifier));
    }

    if p.at("{") {
        p.pos += 1;
        loop {
            if p.at("}") {
                break;
            }
            let e_start = p.pos;
            if p.peek_kind() != LexemeKind::Identifier {
                p.err_here("expected an enumerator name");
                return None;
            }
            let mut e_kids = vec![p.bump(NodeKind::Identifier)];
            if p.at("=") {
                p.pos += 1;
                e_kids.push(p.parse_assignment()?);
            }
            kids.push(p.node(NodeKind::Enumerator, e_start, &e_kids));
            if p.at(",") {
                p.pos += 1;
                continue;
            }
            break;
        }
        if !p.at("}") {
            p.err_here("expected '}'");
            return None;
        }
        p.pos += 1;
        if let Some(name) = tag_name {
            p.scope_add_enum(name);
        }
    }

    Some(p.node(NodeKind::EnumSpecifier, start, &kids))
}
