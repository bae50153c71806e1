//! The expression engine: precedence-climbing over the unary "unit" stream,
//! folded by the tables in [`crate::precedence`].
//!
//! The source project builds expressions in two flat passes over a token
//! run — first splitting it into prefix*-core-suffix* units and bare binary
//! operators, then folding that list by precedence without recursion. A
//! direct port of that shape fights the borrow checker for no benefit here:
//! recursive precedence climbing is the idiomatic Rust rendering of the
//! same binding rules (same tables, same left/right folding order), so
//! that's what this module does — "phase 1" is [`parse_unary`] recognizing
//! one unit, "phase 2" is the `while` loop in [`parse_binary`] folding
//! units by precedence, mirroring the source's two passes without literally
//! materializing an intermediate operator/operand list.

use crate::arena::NodeArena;
use crate::error::SyntaxError;
use crate::keywords::is_builtin_type;
use crate::limit::LimitTracker;
use crate::lexeme::LexemeKind;
use crate::node::{append_child, NodeId, NodeKind, ParseNode};
use crate::precedence::{binary_precedence, prefix_precedence, suffix_precedence, Assoc};
use crate::scope::TypeScope;
use crate::token::Token;

pub struct ExprCx<'a> {
    pub tokens: &'a mut [Token],
    pub source: &'a str,
    pub arena: &'a mut NodeArena,
    pub scope: &'a TypeScope,
    pub errors: &'a mut Vec<SyntaxError>,
    pub limit: &'a mut LimitTracker,
}

impl ExprCx<'_> {
    fn text(&self, pos: usize) -> &str {
        let t = &self.tokens[pos];
        t.text(self.source)
    }

    fn kind(&self, pos: usize) -> LexemeKind {
        self.tokens[pos].kind
    }

    /// See `Parser::mark_span`: only the boundary tokens get `span` set,
    /// not every token the node covers.
    fn mark_span(&mut self, id: NodeId, tok_a: usize, tok_b: usize) {
        if tok_a < tok_b {
            self.tokens[tok_a].span = Some(id);
            self.tokens[tok_b - 1].span = Some(id);
        }
    }

    fn leaf(&mut self, kind: NodeKind, pos: usize) -> NodeId {
        debug_assert!(!self.tokens[pos].dirty, "token {pos} claimed as a leaf twice");
        self.tokens[pos].dirty = true;
        let id = self.arena.alloc(ParseNode::new(kind, pos, pos + 1));
        self.mark_span(id, pos, pos + 1);
        id
    }

    fn node(&mut self, kind: NodeKind, tok_a: usize, tok_b: usize, kids: &[NodeId]) -> NodeId {
        let id = self.arena.alloc(ParseNode::new(kind, tok_a, tok_b));
        for &kid in kids {
            append_child(self.arena, id, kid);
        }
        self.mark_span(id, tok_a, tok_b);
        id
    }

    fn fail(&mut self, pos: usize, message: impl Into<String>) -> Option<(NodeId, usize)> {
        let data = self.tokens.get(pos).map(|t| t.text(self.source).to_string()).unwrap_or_else(|| "EOF".to_string());
        self.errors.push(SyntaxError::with_loc(message, data, self.tokens.get(pos).map(|t| t.start).unwrap_or(0)));
        None
    }
}

/// Parses a full expression, comma operator included.
pub fn parse_expression(cx: &mut ExprCx, pos: usize) -> Option<(NodeId, usize)> {
    parse_binary(cx, pos, 17)
}

/// Parses an assignment-level expression: no top-level comma. This is what
/// function-call arguments and initializers use.
pub fn parse_assignment(cx: &mut ExprCx, pos: usize) -> Option<(NodeId, usize)> {
    parse_binary(cx, pos, 16)
}

/// Precedence-climb binary (and ternary, and assignment) operators. Lower
/// precedence numbers bind tighter, so `max_level` is the loosest level
/// still consumed at this recursion depth.
fn parse_binary(cx: &mut ExprCx, pos: usize, max_level: i32) -> Option<(NodeId, usize)> {
    let (mut lhs, mut pos) = parse_unary(cx, pos)?;

    loop {
        let Some(op) = cx.tokens.get(pos).map(|_| cx.text(pos).to_string()) else {
            break;
        };
        if cx.kind(pos) != LexemeKind::Punct {
            break;
        }
        let Some((level, assoc)) = binary_precedence(&op) else {
            break;
        };
        if level > max_level {
            break;
        }

        pos += 1;

        if op == "?" {
            let (then_branch, after_then) = parse_binary(cx, pos, 17)?;
            if cx.tokens.get(after_then).map(|t| t.text(cx.source)) != Some(":") {
                return cx.fail(after_then, "expected ':' in conditional expression");
            }
            let (else_branch, after_else) = parse_binary(cx, after_then + 1, 16)?;
            let tok_a = cx.arena.get(lhs).tok_a;
            lhs = cx.node(
                NodeKind::ConditionalExpression,
                tok_a,
                after_else,
                &[lhs, then_branch, else_branch],
            );
            pos = after_else;
            continue;
        }

        let next_max = match assoc {
            Assoc::Left => level - 1,
            Assoc::Right => level,
        };
        let (rhs, after_rhs) = parse_binary(cx, pos, next_max)?;

        let kind = match op.as_str() {
            "," => NodeKind::CommaExpression,
            "=" | "+=" | "-=" | "*=" | "/=" | "%=" | "<<=" | ">>=" | "&=" | "^=" | "|=" => {
                NodeKind::AssignmentExpression
            }
            _ => NodeKind::BinaryExpression,
        };
        let tok_a = cx.arena.get(lhs).tok_a;
        let mut n = ParseNode::new(kind, tok_a, after_rhs);
        n.precedence = level;
        n.assoc = match assoc {
            Assoc::Left => -1,
            Assoc::Right => 1,
        };
        let id = cx.arena.alloc(n);
        append_child(cx.arena, id, lhs);
        append_child(cx.arena, id, rhs);
        lhs = id;
        pos = after_rhs;
    }

    Some((lhs, pos))
}

/// Recognizes one `prefix* core suffix*` unit.
fn parse_unary(cx: &mut ExprCx, pos: usize) -> Option<(NodeId, usize)> {
    cx.limit.consume();
    if cx.limit.limited() {
        cx.limit.release();
        return cx.fail(pos, "expression nesting too deep");
    }
    let result = parse_unary_inner(cx, pos);
    cx.limit.release();
    result
}

fn parse_unary_inner(cx: &mut ExprCx, pos: usize) -> Option<(NodeId, usize)> {
    if cx.kind(pos) == LexemeKind::Keyword && cx.text(pos) == "sizeof" {
        let (operand, after) = parse_unary(cx, pos + 1)?;
        return Some((cx.node(NodeKind::SizeofExpression, pos, after, &[operand]), after));
    }

    if cx.kind(pos) == LexemeKind::Punct {
        let op = cx.text(pos).to_string();
        if prefix_precedence(&op).is_some() {
            let (operand, after) = parse_unary(cx, pos + 1)?;
            let mut n = ParseNode::new(NodeKind::UnaryExpression, pos, after);
            n.precedence = prefix_precedence(&op).unwrap();
            n.assoc = 1;
            let id = cx.arena.alloc(n);
            append_child(cx.arena, id, operand);
            return Some((id, after));
        }
    }

    let (mut core, mut pos) = parse_core(cx, pos)?;

    loop {
        if cx.kind(pos) != LexemeKind::Punct {
            break;
        }
        let op = cx.text(pos).to_string();

        match op.as_str() {
            "[" => {
                let (index, after_index) = parse_expression(cx, pos + 1)?;
                if cx.tokens.get(after_index).map(|t| t.text(cx.source)) != Some("]") {
                    return cx.fail(after_index, "expected ']'");
                }
                let tok_a = cx.arena.get(core).tok_a;
                core = cx.node(NodeKind::SubscriptExpression, tok_a, after_index + 1, &[core, index]);
                pos = after_index + 1;
            }
            "(" => {
                let (args, after_args) = parse_call_arguments(cx, pos + 1)?;
                let tok_a = cx.arena.get(core).tok_a;
                let mut kids = vec![core];
                kids.extend(args);
                core = cx.node(NodeKind::CallExpression, tok_a, after_args, &kids);
                pos = after_args;
            }
            "." | "->" => {
                if cx.kind(pos + 1) != LexemeKind::Identifier && cx.kind(pos + 1) != LexemeKind::Keyword {
                    return cx.fail(pos + 1, "expected member name");
                }
                let member = cx.leaf(NodeKind::Identifier, pos + 1);
                let tok_a = cx.arena.get(core).tok_a;
                core = cx.node(NodeKind::MemberExpression, tok_a, pos + 2, &[core, member]);
                pos += 2;
            }
            "++" | "--" if suffix_precedence(&op).is_some() => {
                let tok_a = cx.arena.get(core).tok_a;
                core = cx.node(NodeKind::PostfixExpression, tok_a, pos + 1, &[core]);
                pos += 1;
            }
            _ => break,
        }
    }

    Some((core, pos))
}

fn parse_call_arguments(cx: &mut ExprCx, mut pos: usize) -> Option<(Vec<NodeId>, usize)> {
    let mut args = Vec::new();
    if cx.tokens.get(pos).map(|t| t.text(cx.source)) == Some(")") {
        return Some((args, pos + 1));
    }
    loop {
        let (arg, after) = parse_assignment(cx, pos)?;
        args.push(arg);
        pos = after;
        match cx.tokens.get(pos).map(|t| t.text(cx.source)) {
            Some(",") => pos += 1,
            Some(")") => return Some((args, pos + 1)),
            _ => return cx.fail(pos, "expected ',' or ')' in argument list"),
        }
    }
}

/// A parenthesized group that opens with a type name is a cast, not a
/// grouped expression.
fn looks_like_cast_type(cx: &ExprCx, pos: usize) -> bool {
    match cx.kind(pos) {
        LexemeKind::Keyword => is_builtin_type(cx.text(pos)),
        LexemeKind::Identifier => cx.scope.is_type_name(cx.text(pos)),
        _ => false,
    }
}

fn parse_core(cx: &mut ExprCx, pos: usize) -> Option<(NodeId, usize)> {
    match cx.kind(pos) {
        LexemeKind::Identifier => Some((cx.leaf(NodeKind::Identifier, pos), pos + 1)),
        LexemeKind::Int => Some((cx.leaf(NodeKind::IntLiteral, pos), pos + 1)),
        LexemeKind::Float => Some((cx.leaf(NodeKind::FloatLiteral, pos), pos + 1)),
        LexemeKind::String => Some((cx.leaf(NodeKind::StringLiteral, pos), pos + 1)),
        LexemeKind::Char => Some((cx.leaf(NodeKind::CharLiteral, pos), pos + 1)),
        LexemeKind::Punct if cx.text(pos) == "(" => {
            if looks_like_cast_type(cx, pos + 1) {
                let type_name = cx.leaf(NodeKind::TypedefName, pos + 1);
                let mut after_type = pos + 2;
                // Bare `*` pointer suffixes on the cast's type, e.g. `(int *)`.
                while cx.kind(after_type) == LexemeKind::Punct && cx.text(after_type) == "*" {
                    after_type += 1;
                }
                if cx.tokens.get(after_type).map(|t| t.text(cx.source)) != Some(")") {
                    return cx.fail(after_type, "expected ')' to close cast");
                }
                let (operand, after) = parse_unary(cx, after_type + 1)?;
                return Some((cx.node(NodeKind::CastExpression, pos, after, &[type_name, operand]), after));
            }
            let (inner, after) = parse_expression(cx, pos + 1)?;
            if cx.tokens.get(after).map(|t| t.text(cx.source)) != Some(")") {
                return cx.fail(after, "expected ')'");
            }
            Some((cx.node(NodeKind::ParenExpression, pos, after + 1, &[inner]), after + 1))
        }
        _ => cx.fail(pos, "expected an expression"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::token::tokenize;

    fn parse(src: &str) -> (NodeId, NodeArena, Vec<SyntaxError>) {
        let lexemes = lex(src);
        let mut tokens = tokenize(&lexemes);
        let mut arena = NodeArena::new();
        let scope = TypeScope::new();
        let mut errors = Vec::new();
        let mut limit = LimitTracker::default();
        let mut cx = ExprCx {
            tokens: &mut tokens,
            source: src,
            arena: &mut arena,
            scope: &scope,
            errors: &mut errors,
            limit: &mut limit,
        };
        let (id, _) = parse_expression(&mut cx, 1).expect("expected a parse");
        (id, arena, errors)
    }

    #[test]
    fn left_associative_addition_nests_to_the_left() {
        let (id, arena, errors) = parse("a + b - c");
        assert!(errors.is_empty());
        let top = arena.get(id);
        assert_eq!(top.kind, NodeKind::BinaryExpression);
        assert_eq!(top.assoc, -1);
        let kids = crate::node::children(&arena, id);
        assert_eq!(arena.get(kids[0]).kind, NodeKind::BinaryExpression);
        assert_eq!(arena.get(kids[1]).kind, NodeKind::Identifier);
    }

    #[test]
    fn right_associative_assignment_nests_to_the_right() {
        let (id, arena, errors) = parse("a = b = c");
        assert!(errors.is_empty());
        let top = arena.get(id);
        assert_eq!(top.kind, NodeKind::AssignmentExpression);
        assert_eq!(top.assoc, 1);
        let kids = crate::node::children(&arena, id);
        assert_eq!(arena.get(kids[0]).kind, NodeKind::Identifier);
        assert_eq!(arena.get(kids[1]).kind, NodeKind::AssignmentExpression);
    }

    #[test]
    fn ternary_is_right_associative() {
        let (id, arena, errors) = parse("a ? b : c ? d : e");
        assert!(errors.is_empty());
        let top = arena.get(id);
        assert_eq!(top.kind, NodeKind::ConditionalExpression);
        let kids = crate::node::children(&arena, id);
        assert_eq!(arena.get(kids[2]).kind, NodeKind::ConditionalExpression);
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let (id, arena, _errors) = parse("a + b * c");
        let top = arena.get(id);
        assert_eq!(top.kind, NodeKind::BinaryExpression);
        let kids = crate::node::children(&arena, id);
        assert_eq!(arena.get(kids[0]).kind, NodeKind::Identifier);
        assert_eq!(arena.get(kids[1]).kind, NodeKind::BinaryExpression);
    }

    #[test]
    fn call_and_member_access_chain() {
        let (id, arena, errors) = parse("obj.method(a, b)[0]");
        assert!(errors.is_empty());
        assert_eq!(arena.get(id).kind, NodeKind::SubscriptExpression);
    }

    #[test]
    fn prefix_and_postfix_compose() {
        let (id, arena, errors) = parse("*p++");
        assert!(errors.is_empty());
        assert_eq!(arena.get(id).kind, NodeKind::UnaryExpression);
    }

    #[test]
    fn comma_operator_has_lowest_precedence() {
        let (id, arena, errors) = parse("a = 1, b = 2");
        assert!(errors.is_empty());
        assert_eq!(arena.get(id).kind, NodeKind::CommaExpression);
    }
}
