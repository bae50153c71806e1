/// The tag attached to every lexeme.
///
/// Lexemes form a contiguous, non-overlapping cover of the source buffer:
/// for a successfully lexed buffer, `lexemes[i].end == lexemes[i + 1].start`
/// for every adjacent pair, and the sequence begins with [`LexemeKind::Bof`]
/// and ends with [`LexemeKind::Eof`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexemeKind {
    Invalid,
    Space,
    Newline,
    String,
    Keyword,
    Identifier,
    Comment,
    Preproc,
    Float,
    Int,
    Punct,
    Char,
    /// A backslash-newline line splice.
    Splice,
    Formfeed,
    Bof,
    Eof,
}

impl LexemeKind {
    /// Gap lexemes are whitespace, newlines, comments, splices, and
    /// formfeeds — everything dropped before the token layer sees it.
    pub fn is_gap(self) -> bool {
        matches!(
            self,
            LexemeKind::Space
                | LexemeKind::Newline
                | LexemeKind::Comment
                | LexemeKind::Splice
                | LexemeKind::Formfeed
        )
    }
}

/// A tagged half-open span `[start, end)` into the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme {
    pub kind: LexemeKind,
    pub start: usize,
    pub end: usize,
}

impl Lexeme {
    pub fn new(kind: LexemeKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start..self.end]
    }
}
