//! Turns a source buffer into a flat [`Lexeme`] cover: every byte belongs to
//! exactly one lexeme, gaps (space, comments, splices...) included, bracketed
//! by a zero-width [`LexemeKind::Bof`] and [`LexemeKind::Eof`].
//!
//! Grounded on `apollo-parser`'s `lexer/mod.rs` dispatch loop, generalized
//! from its fixed GraphQL token set to a priority-ordered list of
//! [`combi`]-backed matchers over the C lexical grammar recovered from
//! `matcheroni/c_lexer.cpp`.

mod cursor;
mod location;
mod numbers;
mod strings;

pub use location::Location;

use crate::keywords::is_keyword;
use crate::lexeme::{Lexeme, LexemeKind};
use cursor::LexContext;

/// One dispatch entry: try `matcher` at the current position; on success tag
/// the consumed span with `kind` (`Identifier` is special-cased afterward to
/// become `Keyword` when the text is reserved).
type RawMatch = fn(&mut LexContext, &[u8], usize) -> combi::MatchResult;

fn identifier_start(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphabetic() || b >= 0x80
}

fn identifier_continue(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphanumeric() || b >= 0x80
}

fn match_identifier(_ctx: &mut LexContext, atoms: &[u8], pos: usize) -> combi::MatchResult {
    match atoms.get(pos) {
        Some(&b) if identifier_start(b) => {
            let mut end = pos + 1;
            while atoms.get(end).copied().is_some_and(identifier_continue) {
                end += 1;
            }
            Ok(end)
        }
        _ => Err(combi::Fail),
    }
}

fn match_space(_ctx: &mut LexContext, atoms: &[u8], pos: usize) -> combi::MatchResult {
    match atoms.get(pos) {
        Some(b' ') | Some(b'\t') => Ok(pos + 1),
        _ => Err(combi::Fail),
    }
}

fn match_formfeed(_ctx: &mut LexContext, atoms: &[u8], pos: usize) -> combi::MatchResult {
    match atoms.get(pos) {
        Some(0x0c) => Ok(pos + 1),
        _ => Err(combi::Fail),
    }
}

fn match_newline(_ctx: &mut LexContext, atoms: &[u8], pos: usize) -> combi::MatchResult {
    if atoms[pos..].starts_with(b"\r\n") {
        Ok(pos + 2)
    } else if atoms.get(pos) == Some(&b'\n') {
        Ok(pos + 1)
    } else {
        Err(combi::Fail)
    }
}

fn match_splice(_ctx: &mut LexContext, atoms: &[u8], pos: usize) -> combi::MatchResult {
    if atoms[pos..].starts_with(b"\\\r\n") {
        Ok(pos + 3)
    } else if atoms[pos..].starts_with(b"\\\n") {
        Ok(pos + 2)
    } else {
        Err(combi::Fail)
    }
}

fn match_line_comment(_ctx: &mut LexContext, atoms: &[u8], pos: usize) -> combi::MatchResult {
    if !atoms[pos..].starts_with(b"//") {
        return Err(combi::Fail);
    }
    let mut end = pos + 2;
    while end < atoms.len() && atoms[end] != b'\n' {
        end += 1;
    }
    Ok(end)
}

fn match_block_comment(_ctx: &mut LexContext, atoms: &[u8], pos: usize) -> combi::MatchResult {
    if !atoms[pos..].starts_with(b"/*") {
        return Err(combi::Fail);
    }
    let mut end = pos + 2;
    loop {
        if end + 1 >= atoms.len() {
            return Err(combi::Fail);
        }
        if atoms[end] == b'*' && atoms[end + 1] == b'/' {
            return Ok(end + 2);
        }
        end += 1;
    }
}

fn match_comment(ctx: &mut LexContext, atoms: &[u8], pos: usize) -> combi::MatchResult {
    match_line_comment(ctx, atoms, pos).or_else(|_| match_block_comment(ctx, atoms, pos))
}

fn match_preproc(_ctx: &mut LexContext, atoms: &[u8], pos: usize) -> combi::MatchResult {
    if atoms.get(pos) != Some(&b'#') {
        return Err(combi::Fail);
    }
    let mut end = pos + 1;
    loop {
        if end >= atoms.len() || atoms[end] == b'\n' {
            return Ok(end);
        }
        if atoms[end] == b'\\' && (atoms[end..].starts_with(b"\\\n") || atoms[end..].starts_with(b"\\\r\n")) {
            end += if atoms[end..].starts_with(b"\\\r\n") { 3 } else { 2 };
            continue;
        }
        end += 1;
    }
}

/// Longest punctuator first, so `<<=` isn't cut short at `<<` or `<`.
const PUNCTUATORS: &[&str] = &[
    "<<=", ">>=", "...", "->*", "<=>",
    "<<", ">>", "<=", ">=", "==", "!=", "&&", "||", "++", "--", "->",
    "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "::", ".*",
    "{", "}", "(", ")", "[", "]", ";", ":", ",", ".", "?",
    "+", "-", "*", "/", "%", "=", "<", ">", "!", "~", "&", "|", "^", "#",
];

fn match_punct(_ctx: &mut LexContext, atoms: &[u8], pos: usize) -> combi::MatchResult {
    for p in PUNCTUATORS {
        let bytes = p.as_bytes();
        if atoms[pos..].starts_with(bytes) {
            return Ok(pos + bytes.len());
        }
    }
    Err(combi::Fail)
}

/// Priority-ordered dispatch table. Order matters: raw strings must be tried
/// before plain identifiers (`R"(...)"` starts like an identifier), strings
/// and chars before punctuators, floats before ints (`1.0` vs `1`).
const DISPATCH: &[(LexemeKind, RawMatch)] = &[
    (LexemeKind::Space, match_space),
    (LexemeKind::Formfeed, match_formfeed),
    (LexemeKind::Newline, match_newline),
    (LexemeKind::Splice, match_splice),
    (LexemeKind::Comment, match_comment),
    (LexemeKind::Preproc, match_preproc),
    (LexemeKind::String, strings::match_raw_string),
    (LexemeKind::String, strings::match_string),
    (LexemeKind::Char, strings::match_char),
    (LexemeKind::Float, numbers::match_float),
    (LexemeKind::Int, numbers::match_int),
    (LexemeKind::Identifier, match_identifier),
    (LexemeKind::Punct, match_punct),
];

/// Lex `source` into a lexeme cover. On success the sequence starts with
/// `Bof` and ends with `Eof`; on the first unmatched byte, lexing stops and
/// the final lexeme is `Invalid`, spanning from the failure point to the end
/// of input.
pub fn lex(source: &str) -> Vec<Lexeme> {
    let atoms = source.as_bytes();
    let mut ctx = LexContext::default();
    let mut out = vec![Lexeme::new(LexemeKind::Bof, 0, 0)];
    let mut pos = 0usize;

    while pos < atoms.len() {
        let mut matched = None;
        for (kind, matcher) in DISPATCH {
            if let Ok(end) = matcher(&mut ctx, atoms, pos) {
                matched = Some((*kind, end));
                break;
            }
        }
        match matched {
            Some((LexemeKind::Identifier, end)) => {
                let kind = if is_keyword(&source[pos..end]) {
                    LexemeKind::Keyword
                } else {
                    LexemeKind::Identifier
                };
                out.push(Lexeme::new(kind, pos, end));
                pos = end;
            }
            Some((kind, end)) => {
                out.push(Lexeme::new(kind, pos, end));
                pos = end;
            }
            None => {
                out.push(Lexeme::new(LexemeKind::Invalid, pos, atoms.len()));
                return out;
            }
        }
    }

    out.push(Lexeme::new(LexemeKind::Eof, atoms.len(), atoms.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<LexemeKind> {
        lex(source).into_iter().map(|l| l.kind).collect()
    }

    #[test]
    fn brackets_every_buffer_with_bof_and_eof() {
        let lexemes = lex("int x;");
        assert_eq!(lexemes.first().unwrap().kind, LexemeKind::Bof);
        assert_eq!(lexemes.last().unwrap().kind, LexemeKind::Eof);
    }

    #[test]
    fn lexeme_cover_is_contiguous() {
        let lexemes = lex("int x = 1;\n");
        for pair in lexemes.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn classifies_keywords_vs_identifiers() {
        assert_eq!(
            kinds("int x"),
            vec![
                LexemeKind::Bof,
                LexemeKind::Keyword,
                LexemeKind::Space,
                LexemeKind::Identifier,
                LexemeKind::Eof,
            ]
        );
    }

    #[test]
    fn float_beats_int_on_a_dotted_literal() {
        assert_eq!(
            kinds("1.0"),
            vec![LexemeKind::Bof, LexemeKind::Float, LexemeKind::Eof]
        );
    }

    #[test]
    fn longest_punctuator_wins() {
        assert_eq!(
            kinds("<<="),
            vec![LexemeKind::Bof, LexemeKind::Punct, LexemeKind::Eof]
        );
        let lexemes = lex("<<=");
        assert_eq!(lexemes[1].len(), 3);
    }

    #[test]
    fn raw_string_tried_before_identifier() {
        assert_eq!(
            kinds("R\"(hi)\""),
            vec![LexemeKind::Bof, LexemeKind::String, LexemeKind::Eof]
        );
    }

    #[test]
    fn unmatched_byte_stops_lexing_with_invalid() {
        let lexemes = lex("int @");
        assert_eq!(lexemes.last().unwrap().kind, LexemeKind::Invalid);
        assert!(!lexemes.iter().any(|l| l.kind == LexemeKind::Eof));
    }

    #[test]
    fn line_and_block_comments_are_gaps() {
        let lexemes = lex("// hi\n/* also */");
        assert!(lexemes
            .iter()
            .filter(|l| l.kind == LexemeKind::Comment)
            .all(|l| l.kind.is_gap()));
        assert_eq!(
            lexemes.iter().filter(|l| l.kind == LexemeKind::Comment).count(),
            2
        );
    }
}
