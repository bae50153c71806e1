//! 6.4.5 String literals and 6.4.4.4 character constants, plus the C++11
//! raw string extension `R"delim(...)delim"`.
//!
//! Grounded on `matcheroni/c_lexer.cpp`'s `match_string`/`match_raw_string`:
//! the raw-string delimiter is captured with [`combi::store_backref`] on the
//! way in and replayed with [`combi::match_backref`] on the way out, rather
//! than the source's `static` pointer-and-length capture (see
//! `LexContext`'s doc comment for why that isn't sound here).

use combi::{any, atom, charset, lit, match_backref, not_atom, oneof, opt, seq, some, store_backref, Matcher};

use super::cursor::LexContext;

type M = Matcher<'static, u8, LexContext>;

fn encoding_prefix() -> M {
    oneof(vec![
        lit("u8"),
        atom(vec![b'u', b'U', b'L']),
    ])
}

fn escape_sequence() -> M {
    let simple = charset("'\"?\\abfnrtv");
    let octal = seq(vec![
        combi::range(b'0', b'7'),
        opt(combi::range(b'0', b'7')),
        opt(combi::range(b'0', b'7')),
    ]);
    let hex = seq(vec![atom(vec![b'x']), some(hex_digit())]);
    let universal = oneof(vec![
        seq(vec![atom(vec![b'u']), combi::rep(4, hex_digit())]),
        seq(vec![atom(vec![b'U']), combi::rep(8, hex_digit())]),
    ]);
    seq(vec![
        atom(vec![b'\\']),
        oneof(vec![simple, hex, universal, octal]),
    ])
}

fn hex_digit() -> M {
    oneof(vec![
        combi::range(b'0', b'9'),
        combi::range(b'a', b'f'),
        combi::range(b'A', b'F'),
    ])
}

/// A backslash-newline line splice, legal anywhere inside a literal.
fn splice() -> M {
    oneof(vec![lit("\\\n"), lit("\\\r\n")])
}

fn string_char() -> M {
    oneof(vec![
        escape_sequence(),
        splice(),
        not_atom(vec![b'"', b'\\', b'\n']),
    ])
}

fn char_char() -> M {
    oneof(vec![
        escape_sequence(),
        splice(),
        not_atom(vec![b'\'', b'\\', b'\n']),
    ])
}

/// Cooked (non-raw) string literal: `["u8"|u|U|L]? '"' char* '"'`.
pub(crate) fn match_string(ctx: &mut LexContext, atoms: &[u8], pos: usize) -> combi::MatchResult {
    let m = seq(vec![
        opt(encoding_prefix()),
        atom(vec![b'"']),
        any(string_char()),
        atom(vec![b'"']),
    ]);
    m.apply(ctx, atoms, pos)
}

/// Character constant: `['L|u|U]? '\'' char-sequence '\''`.
pub(crate) fn match_char(ctx: &mut LexContext, atoms: &[u8], pos: usize) -> combi::MatchResult {
    let m = seq(vec![
        opt(atom(vec![b'u', b'U', b'L'])),
        atom(vec![b'\'']),
        some(char_char()),
        atom(vec![b'\'']),
    ]);
    m.apply(ctx, atoms, pos)
}

/// A raw-string delimiter: up to 16 characters, none of which are
/// parens, backslash, or whitespace.
fn delimiter_char() -> M {
    not_atom(vec![
        b'(', b')', b'\\', b' ', b'\t', b'\n', b'\r', b'\x0b', b'\x0c',
    ])
}

/// `R"delim(...)delim"`: the opening delimiter is captured under `tag` and
/// the closing one must replay it exactly before the final `"`.
pub(crate) fn match_raw_string(
    ctx: &mut LexContext,
    atoms: &[u8],
    pos: usize,
) -> combi::MatchResult {
    let m = seq(vec![
        opt(encoding_prefix()),
        atom(vec![b'R']),
        atom(vec![b'"']),
        store_backref("raw_delim", any(delimiter_char())),
        atom(vec![b'(']),
        combi::until(seq(vec![
            atom(vec![b')']),
            match_backref("raw_delim"),
            atom(vec![b'"']),
        ])),
        atom(vec![b')']),
        match_backref("raw_delim"),
        atom(vec![b'"']),
    ]);
    m.apply(ctx, atoms, pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(f: fn(&mut LexContext, &[u8], usize) -> combi::MatchResult, s: &str) -> bool {
        let mut ctx = LexContext::default();
        f(&mut ctx, s.as_bytes(), 0) == Ok(s.len())
    }

    #[test]
    fn cooked_strings_and_escapes() {
        assert!(ok(match_string, "\"hello\""));
        assert!(ok(match_string, "\"a\\nb\""));
        assert!(ok(match_string, "u8\"x\""));
        assert!(ok(match_string, "L\"wide\""));
    }

    #[test]
    fn char_literals() {
        assert!(ok(match_char, "'a'"));
        assert!(ok(match_char, "'\\n'"));
        assert!(ok(match_char, "u'x'"));
    }

    #[test]
    fn raw_string_delimiter_must_match_on_both_sides() {
        assert!(ok(match_raw_string, "R\"xy(hello)xy\""));
        assert!(ok(match_raw_string, "R\"(plain)\""));
        let mut ctx = LexContext::default();
        assert_eq!(
            match_raw_string(&mut ctx, b"R\"xy(hello)yy\"", 0),
            Err(combi::Fail)
        );
    }

    #[test]
    fn raw_string_allows_unescaped_quotes_inside() {
        assert!(ok(match_raw_string, "R\"(a \"quoted\" b)\""));
    }
}
