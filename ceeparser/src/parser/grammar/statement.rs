//! Statements, including the label-before-declaration quirk: a label can
//! prefix a declaration inside a compound statement, so a leading
//! `identifier ':'` has to be disambiguated from an expression statement
//! before falling through to the declaration parser.

use crate::keywords::{is_builtin_type, is_qualifier};
use crate::lexeme::LexemeKind;
use crate::node::{NodeId, NodeKind};
use crate::parser::Parser;

use super::declaration;

pub(in crate::parser) fn parse_compound(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;
    if !p.at("{") {
        p.err_here("expected '{'");
        return None;
    }
    p.pos += 1;

    let kids = p.with_scope(|p| {
        let mut kids = Vec::new();
        while !p.at("}") {
            if p.at_eof() {
                p.err_here("unterminated compound statement");
                return None;
            }
            kids.push(parse_block_item(p)?);
        }
        Some(kids)
    })?;

    p.pos += 1; // '}'
    Some(p.node(NodeKind::CompoundStatement, start, &kids))
}

fn parse_block_item(p: &mut Parser) -> Option<NodeId> {
    if starts_declaration(p) {
        declaration::parse_local(p)
    } else {
        parse_statement(p)
    }
}

fn starts_declaration(p: &Parser) -> bool {
    match p.peek_kind() {
        LexemeKind::Keyword => {
            let text = p.peek_text();
            text == "typedef"
                || text == "struct"
                || text == "union"
                || text == "enum"
                || is_builtin_type(text)
                || is_qualifier(text)
        }
        LexemeKind::Identifier => p.scope_is_type_name(p.peek_text()),
        _ => false,
    }
}

pub(in crate::parser) fn parse_statement(p: &mut Parser) -> Option<NodeId> {
    if !p.enter() {
        return None;
    }
    let result = parse_statement_inner(p);
    p.exit();
    result
}

fn parse_statement_inner(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;

    if p.at("{") {
        return parse_compound(p);
    }
    if p.at(";") {
        p.pos += 1;
        return Some(p.node(NodeKind::NullStatement, start, &[]));
    }

    if p.peek_kind() == LexemeKind::Identifier && p.nth_text(1) == ":" {
        let label = p.bump(NodeKind::Identifier);
        p.pos += 1; // ':'
        let body = parse_statement(p)?;
        return Some(p.node(NodeKind::LabeledStatement, start, &[label, body]));
    }

    if p.peek_kind() == LexemeKind::Keyword {
        let kw = p.peek_text().to_string();
        match kw.as_str() {
            "if" => return parse_if(p),
            "while" => return parse_while(p),
            "do" => return parse_do_while(p),
            "for" => return parse_for(p),
            "switch" => return parse_switch(p),
            "case" => return parse_case(p),
            "default" => return parse_default(p),
            "return" => return parse_return(p),
            "break" => {
                p.pos += 1;
                expect_semi(p)?;
                return Some(p.node(NodeKind::BreakStatement, start, &[]));
            }
            "continue" => {
                p.pos += 1;
                expect_semi(p)?;
                return Some(p.node(NodeKind::ContinueStatement, start, &[]));
            }
            "goto" => return parse_goto(p),
            "asm" | "__asm__" => return parse_asm(p),
            _ => {}
        }
    }

    let expr = p.parse_expression()?;
    expect_semi(p)?;
    Some(p.node(NodeKind::ExpressionStatement, start, &[expr]))
}

fn expect_semi(p: &mut Parser) -> Option<()> {
    if !p.at(";") {
        p.err_here("expected ';'");
        return None;
    }
    p.pos += 1;
    Some(())
}

fn parse_paren_expr(p: &mut Parser) -> Option<NodeId> {
    if !p.at("(") {
        p.err_here("expected '('");
        return None;
    }
    p.pos += 1;
    let e = p.parse_expression()?;
    if !p.at(")") {
        p.err_here("expected ')'");
        return None;
    }
    p.pos += 1;
    Some(e)
}

fn parse_if(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;
    p.pos += 1; // 'if'
    let cond = parse_paren_expr(p)?;
    let then_branch = parse_statement(p)?;
    let mut kids = vec![cond, then_branch];
    if p.peek_kind() == LexemeKind::Keyword && p.peek_text() == "else" {
        p.pos += 1;
        kids.push(parse_statement(p)?);
    }
    Some(p.node(NodeKind::IfStatement, start, &kids))
}

fn parse_while(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;
    p.pos += 1; // 'while'
    let cond = parse_paren_expr(p)?;
    let body = parse_statement(p)?;
    Some(p.node(NodeKind::WhileStatement, start, &[cond, body]))
}

fn parse_do_while(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;
    p.pos += 1; // 'do'
    let body = parse_statement(p)?;
    if !(p.peek_kind() == LexemeKind::Keyword && p.peek_text() == "while") {
        p.err_here("expected 'while'");
        return None;
    }
    p.pos += 1;
    let cond = parse_paren_expr(p)?;
    expect_semi(p)?;
    Some(p.node(NodeKind::DoWhileStatement, start, &[body, cond]))
}

fn parse_for(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;
    p.pos += 1; // 'for'
    if !p.at("(") {
        p.err_here("expected '('");
        return None;
    }
    p.pos += 1;

    p.with_scope(|p| {
        let mut kids = Vec::new();

        if p.at(";") {
            p.pos += 1;
        } else if starts_declaration(p) {
            kids.push(declaration::parse_local(p)?);
        } else {
            kids.push(p.parse_expression()?);
            expect_semi(p)?;
        }

        if !p.at(";") {
            kids.push(p.parse_expression()?);
        }
        expect_semi(p)?;

        if !p.at(")") {
            kids.push(p.parse_expression()?);
        }
        if !p.at(")") {
            p.err_here("expected ')'");
            return None;
        }
        p.pos += 1;

        kids.push(parse_statement(p)?);
        Some(p.node(NodeKind::ForStatement, start, &kids))
    })
}

fn parse_switch(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;
    p.pos += 1; // 'switch'
    let cond = parse_paren_expr(p)?;
    let body = parse_statement(p)?;
    Some(p.node(NodeKind::SwitchStatement, start, &[cond, body]))
}

/// A case/default body runs until the next `case`/`default`/`}`, not just
/// one statement — those introduce a sibling label or close the enclosing
/// switch, they don't continue this one.
fn parse_label_body(p: &mut Parser) -> Option<Vec<NodeId>> {
    let mut kids = Vec::new();
    loop {
        if p.at("}") || p.at_eof() || p.at("case") || p.at("default") {
            break;
        }
        kids.push(parse_block_item(p)?);
    }
    Some(kids)
}

fn parse_case(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;
    p.pos += 1; // 'case'
    let mut kids = vec![p.parse_assignment()?];
    if p.at("...") {
        p.pos += 1; // GCC ranged case: `case e1 ... e2:`
        kids.push(p.parse_assignment()?);
    }
    if !p.at(":") {
        p.err_here("expected ':'");
        return None;
    }
    p.pos += 1;
    kids.extend(parse_label_body(p)?);
    Some(p.node(NodeKind::CaseLabel, start, &kids))
}

fn parse_default(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;
    p.pos += 1; // 'default'
    if !p.at(":") {
        p.err_here("expected ':'");
        return None;
    }
    p.pos += 1;
    let kids = parse_label_body(p)?;
    Some(p.node(NodeKind::DefaultLabel, start, &kids))
}

fn parse_return(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;
    p.pos += 1; // 'return'
    let mut kids = Vec::new();
    if !p.at(";") {
        kids.push(p.parse_expression()?);
    }
    expect_semi(p)?;
    Some(p.node(NodeKind::ReturnStatement, start, &kids))
}

/// GNU extended asm, simplified: each `:`-separated section (outputs,
/// inputs, clobbers, goto-labels) is just a comma-separated list of
/// assignment-expressions — a `"=r"(result)` operand parses as a call-like
/// expression (string literal applied to a parenthesized operand) rather
/// than a dedicated constraint/operand node, which round-trips fine without
/// a new node kind per section.
fn parse_asm(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;
    p.pos += 1; // 'asm' | '__asm__'
    while p.peek_kind() == LexemeKind::Keyword && (p.at("volatile") || p.at("inline") || p.at("goto")) {
        p.pos += 1;
    }
    if !p.at("(") {
        p.err_here("expected '(' after asm");
        return None;
    }
    p.pos += 1;

    let code = p.parse_assignment()?;
    let mut kids = vec![code];

    while p.at(":") {
        p.pos += 1;
        if p.at(":") || p.at(")") {
            continue;
        }
        loop {
            kids.push(p.parse_assignment()?);
            if p.at(",") {
                p.pos += 1;
                continue;
            }
            break;
        }
    }

    if !p.at(")") {
        p.err_here("expected ')'");
        return None;
    }
    p.pos += 1;
    expect_semi(p)?;
    Some(p.node(NodeKind::AsmStatement, start, &kids))
}

fn parse_goto(p: &mut Parser) -> Option<NodeId> {
    let start = p.pos;
    p.pos += 1; // 'goto'
    if p.peek_kind() != LexemeKind::Identifier {
        p.err_here("expected a label name");
        return None;
    }
    let label = p.bump(NodeKind::Identifier);
    expect_semi(p)?;
    Some(p.node(NodeKind::GotoStatement, start, &[label]))
}
