//! The non-gap view of the lexeme stream the grammar actually consumes.
//!
//! Grounded on `apollo-parser`'s `Token`/`TokenKind` (a `Lexeme` stripped of
//! trivia, paired with a kind the parser switches on) — generalized here to
//! additionally carry a back-pointer to the node that eventually consumes
//! it, per the span-marking invariant the parse tree relies on.

use crate::lexeme::{Lexeme, LexemeKind};
use crate::node::NodeId;

/// A lexeme that survived gap filtering, plus the bookkeeping the parser
/// needs while building the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: LexemeKind,
    pub start: usize,
    pub end: usize,
    /// The node whose span currently claims this token, if any has been
    /// assigned one yet.
    pub(crate) span: Option<NodeId>,
    /// Set once a grammar rule has consumed this token as a leaf; a second
    /// attempt to claim it is a bug in the grammar, not a parse failure.
    pub(crate) dirty: bool,
}

impl Token {
    fn new(lexeme: Lexeme) -> Self {
        Self {
            kind: lexeme.kind,
            start: lexeme.start,
            end: lexeme.end,
            span: None,
            dirty: false,
        }
    }

    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start..self.end]
    }

    /// The node whose boundary this token currently marks, if any. See
    /// `Parser::mark_span` for which tokens actually get one.
    pub fn span(&self) -> Option<NodeId> {
        self.span
    }
}

/// Drop gap lexemes (space, newline, comment, splice, formfeed) and wrap
/// what's left as [`Token`]s. The result is always bracketed by `Bof` and
/// `Eof`, so grammar code can dereference `tokens[i - 1]`/`tokens[i + 1]`
/// near the edges without special-casing them; actual parsing begins at
/// index 1 and ends at `len - 1`.
pub fn tokenize(lexemes: &[Lexeme]) -> Vec<Token> {
    lexemes
        .iter()
        .filter(|l| !l.kind.is_gap())
        .copied()
        .map(Token::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    #[test]
    fn gap_lexemes_are_filtered() {
        let lexemes = lex("int  x;");
        let tokens = tokenize(&lexemes);
        assert!(!tokens.iter().any(|t| t.kind.is_gap()));
    }

    #[test]
    fn brackets_are_preserved() {
        let lexemes = lex("int x;");
        let tokens = tokenize(&lexemes);
        assert_eq!(tokens.first().unwrap().kind, LexemeKind::Bof);
        assert_eq!(tokens.last().unwrap().kind, LexemeKind::Eof);
    }

    #[test]
    fn filtering_is_idempotent() {
        let lexemes = lex("int x = 1;");
        let once = tokenize(&lexemes);
        let reconstructed: Vec<Lexeme> = once
            .iter()
            .map(|t| Lexeme::new(t.kind, t.start, t.end))
            .collect();
        let twice = tokenize(&reconstructed);
        assert_eq!(once.len(), twice.len());
    }
}
