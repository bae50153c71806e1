//! Top-level declarations and function definitions.

use crate::node::{NodeId, NodeKind};
use crate::parser::Parser;

use super::{declarator, specifier, statement};

/// A struct/union member: specifiers followed by a declarator list, no
/// initializers allowed.
pub(in crate::parser) fn parse_member(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;
    let specs = specifier::parse(p)?;
    let mut kids = vec![specs.node];

    if !p.at(";") {
        loop {
            kids.push(declarator::parse(p)?.node);
            if p.at(",") {
                p.pos += 1;
                continue;
            }
            break;
        }
    }

    if !p.at(";") {
        p.err_here("expected ';'");
        return None;
    }
    p.pos += 1;
    Some(p.node(NodeKind::Declaration, start, &kids))
}

/// One top-level item: either a declaration (optionally introducing a
/// typedef name) or a function definition.
pub(in crate::parser) fn parse_external(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;
    let specs = specifier::parse(p)?;

    if p.at(";") {
        p.pos += 1;
        return Some(p.node(NodeKind::Declaration, start, &[specs.node]));
    }

    let cur = declarator::parse(p)?;

    if cur.is_function && p.at("{") {
        let body = statement::parse_compound(p)?;
        return Some(p.node(NodeKind::FunctionDefinition, start, &[specs.node, cur.node, body]));
    }

    finish_init_declarator_list(p, start, specs, cur)
}

/// A declaration inside a block: same shape as [`parse_external`] minus the
/// function-definition branch, which isn't legal at block scope.
pub(in crate::parser) fn parse_local(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;
    let specs = specifier::parse(p)?;

    if p.at(";") {
        p.pos += 1;
        return Some(p.node(NodeKind::Declaration, start, &[specs.node]));
    }

    let cur = declarator::parse(p)?;
    finish_init_declarator_list(p, start, specs, cur)
}

fn finish_init_declarator_list(
    p: &mut Parser,
    start: usize,
    specs: specifier::Specifiers,
    mut cur: declarator::Declarator,
) -> Option<NodeId> {
    let mut decls = Vec::new();
    loop {
        let decl_tok_a = p.node_tok_a(cur.node);
        let mut kids = vec![cur.node];
        if p.at("=") {
            p.pos += 1;
            kids.push(parse_initializer(p)?);
        }
        if specs.is_typedef {
            p.scope_add_typedef(cur.name.clone());
        }
        decls.push(p.node(NodeKind::InitDeclarator, decl_tok_a, &kids));

        if p.at(",") {
            p.pos += 1;
            cur = declarator::parse(p)?;
            continue;
        }
        break;
    }

    if !p.at(";") {
        p.err_here("expected ';'");
        return None;
    }
    p.pos += 1;

    let mut kids = vec![specs.node];
    kids.extend(decls);
    Some(p.node(NodeKind::Declaration, start, &kids))
}

fn parse_initializer(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;
    if p.at("{") {
        p.pos += 1;
        let mut kids = Vec::new();
        if !p.at("}") {
            loop {
                kids.push(parse_initializer(p)?);
                if p.at(",") {
                    p.pos += 1;
                    if p.at("}") {
                        break;
                    }
                    continue;
                }
                break;
            }
        }
        if !p.at("}") {
            p.err_here("expected '}'");
            return None;
        }
        p.pos += 1;
        return Some(p.node(NodeKind::InitializerList, start, &kids));
    }

    let expr = p.parse_assignment()?;
    Some(p.node(NodeKind::Initializer, start, &[expr]))
}
