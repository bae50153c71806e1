//! The declaration/statement grammar, built on top of [`crate::expr`] for
//! expressions.
//!
//! Grounded on `apollo-parser`'s `parser/mod.rs`: a `Parser` that owns the
//! token cursor and hands out small helper methods (`peek`, `bump`, `err`)
//! rather than threading position by hand through every grammar function,
//! generalized here to also own the node arena and the typedef scope stack
//! the C grammar needs that GraphQL never did.

mod grammar;

use crate::arena::NodeArena;
use crate::error::SyntaxError;
use crate::expr::{self, ExprCx};
use crate::lexeme::LexemeKind;
use crate::lexer::lex;
use crate::limit::LimitTracker;
use crate::node::{append_child, NodeId, NodeKind, ParseNode};
use crate::scope::TypeScope;
use crate::token::{tokenize, Token};

/// Parses one translation unit. Construct with [`Parser::new`], tune limits
/// with the builder methods, then call [`Parser::parse`].
pub struct Parser<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    pos: usize,
    arena: NodeArena,
    scope: TypeScope,
    errors: Vec<SyntaxError>,
    limit: LimitTracker,
}

/// The result of a parse: the root node plus any errors collected along the
/// way. Errors don't stop the arena from containing a tree — they stop the
/// tree from being trusted.
pub struct SyntaxTree {
    arena: NodeArena,
    root: Option<NodeId>,
    errors: Vec<SyntaxError>,
    recursion_limit: LimitTracker,
    tokens: Vec<Token>,
}

impl SyntaxTree {
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// The non-gap token stream this tree was parsed from, span pointers
    /// included. Bracketed by `Bof`/`Eof`, same indices `ParseNode::tok_a`/
    /// `tok_b` refer into.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Recursion-limit utilization for this parse: how deep the grammar
    /// actually recursed against the limit it was configured with.
    pub fn recursion_limit(&self) -> LimitTracker {
        self.recursion_limit
    }
}

impl<'s> Parser<'s> {
    pub fn new(source: &'s str) -> Self {
        let lexemes = lex(source);
        let tokens = tokenize(&lexemes);
        Self {
            source,
            tokens,
            pos: 1, // index 0 is the Bof bracket token
            arena: NodeArena::new(),
            scope: TypeScope::new(),
            errors: Vec::new(),
            limit: LimitTracker::default(),
        }
    }

    /// Caps how deep the grammar will recurse before giving up with an
    /// error instead of overflowing the stack.
    pub fn recursion_limit(mut self, limit: usize) -> Self {
        self.limit = LimitTracker::new(limit);
        self
    }

    pub fn parse(mut self) -> SyntaxTree {
        let root = grammar::translation_unit::parse(&mut self);
        SyntaxTree {
            arena: self.arena,
            root,
            errors: self.errors,
            recursion_limit: self.limit,
            tokens: self.tokens,
        }
    }

    fn at_eof(&self) -> bool {
        self.tokens[self.pos].kind == LexemeKind::Eof
    }

    fn peek_kind(&self) -> LexemeKind {
        self.tokens[self.pos].kind
    }

    fn peek_text(&self) -> &str {
        self.tokens[self.pos].text(self.source)
    }

    fn nth_text(&self, n: usize) -> &str {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.text(self.source))
            .unwrap_or("")
    }

    fn at(&self, text: &str) -> bool {
        self.peek_text() == text
    }

    /// Marks `n`'s span on its boundary tokens, per the span-marking
    /// invariant: only `tok_a` and the last token actually in range get
    /// their `span` set to `n`, not every token in between — an ancestor
    /// built afterwards overwrites a descendant's boundary token exactly
    /// when their boundaries coincide, which is how an outer node ends up
    /// "winning" the shared edge while untouched interior tokens keep
    /// pointing at their own node.
    fn mark_span(&mut self, id: NodeId, tok_a: usize, tok_b: usize) {
        if tok_a < tok_b {
            self.tokens[tok_a].span = Some(id);
            self.tokens[tok_b - 1].span = Some(id);
        }
    }

    fn bump(&mut self, kind: NodeKind) -> NodeId {
        let pos = self.pos;
        debug_assert!(!self.tokens[pos].dirty, "token {pos} claimed as a leaf twice");
        self.tokens[pos].dirty = true;
        let id = self.arena.alloc(ParseNode::new(kind, pos, pos + 1));
        self.mark_span(id, pos, pos + 1);
        self.pos += 1;
        id
    }

    fn node(&mut self, kind: NodeKind, tok_a: usize, kids: &[NodeId]) -> NodeId {
        let tok_b = self.pos;
        let id = self.arena.alloc(ParseNode::new(kind, tok_a, tok_b));
        for &kid in kids {
            append_child(&mut self.arena, id, kid);
        }
        self.mark_span(id, tok_a, tok_b);
        id
    }

    fn err_here(&mut self, message: impl Into<String>) {
        let data = if self.at_eof() {
            "EOF".to_string()
        } else {
            self.peek_text().to_string()
        };
        let index = self.tokens[self.pos].start;
        self.errors.push(SyntaxError::with_loc(message, data, index));
    }

    fn node_tok_a(&self, id: NodeId) -> usize {
        self.arena.get(id).tok_a
    }

    fn scope_is_type_name(&self, name: &str) -> bool {
        self.scope.is_type_name(name)
    }

    fn scope_add_typedef(&mut self, name: impl Into<String>) {
        self.scope.add_typedef(name);
    }

    fn scope_add_class(&mut self, name: impl Into<String>) {
        self.scope.add_class(name);
    }

    fn scope_add_struct(&mut self, name: impl Into<String>) {
        self.scope.add_struct(name);
    }

    fn scope_add_union(&mut self, name: impl Into<String>) {
        self.scope.add_union(name);
    }

    fn scope_add_enum(&mut self, name: impl Into<String>) {
        self.scope.add_enum(name);
    }

    fn expr_cx(&mut self) -> ExprCx<'_> {
        ExprCx {
            tokens: &mut self.tokens,
            source: self.source,
            arena: &mut self.arena,
            scope: &self.scope,
            errors: &mut self.errors,
            limit: &mut self.limit,
        }
    }

    fn parse_expression(&mut self) -> Option<NodeId> {
        let start = self.pos;
        let mut cx = self.expr_cx();
        let (id, after) = expr::parse_expression(&mut cx, start)?;
        self.pos = after;
        Some(id)
    }

    fn parse_assignment(&mut self) -> Option<NodeId> {
        let start = self.pos;
        let mut cx = self.expr_cx();
        let (id, after) = expr::parse_assignment(&mut cx, start)?;
        self.pos = after;
        Some(id)
    }

    /// Runs `f` with a fresh type scope pushed, popping it again before
    /// returning — regardless of whether `f` succeeded. `f` takes `&mut
    /// Self` rather than the scope directly, because `Self` already owns
    /// the scope: a literal RAII guard borrowing `self.scope` would keep it
    /// borrowed for the call's whole duration and block every other method
    /// on `self` that `f` needs to make (bump, node, err_here...).
    fn with_scope<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.scope.push();
        let result = f(self);
        self.scope.pop();
        result
    }

    fn enter(&mut self) -> bool {
        self.limit.consume();
        if self.limit.limited() {
            self.limit.release();
            self.err_here("parser recursion limit exceeded");
            false
        } else {
            true
        }
    }

    fn exit(&mut self) {
        self.limit.release();
    }
}
