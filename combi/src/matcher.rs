//! Primitive matchers and the combinators that compose them.
//!
//! Every primitive here has the same shape: given a context, the full atom
//! slice, and a starting position, it returns the position just past what it
//! consumed, or [`Fail`]. Composition is ordinary function composition —
//! there is no backtracking beyond what [`opt`]/[`any`] grant implicitly by
//! accepting zero matches, and [`oneof`] commits to the first alternative
//! that succeeds.

use crate::backref::BackrefStore;

/// A position into an atom slice.
pub type Pos = usize;

/// The uninformative failure marker every primitive returns on mismatch.
/// Matchers never leave partial side effects behind on failure: anything
/// that mutates `ctx` (scope adds, backref stores) does so only once the
/// enclosing [`seq`] has confirmed every part matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fail;

pub type MatchResult = Result<Pos, Fail>;

/// A boxed matcher: `(ctx, atoms, pos) -> Result<new_pos, Fail>`.
///
/// Matchers are values, not types, so they can be stored, passed around, and
/// composed at runtime — the idiomatic-Rust rendering of the source
/// project's template-parameterized matcher types.
pub struct Matcher<'g, A, C>(Box<dyn Fn(&mut C, &[A], Pos) -> MatchResult + 'g>);

impl<'g, A, C> Matcher<'g, A, C> {
    pub fn new(f: impl Fn(&mut C, &[A], Pos) -> MatchResult + 'g) -> Self {
        Matcher(Box::new(f))
    }

    pub fn apply(&self, ctx: &mut C, atoms: &[A], pos: Pos) -> MatchResult {
        (self.0)(ctx, atoms, pos)
    }
}

/// First atom equals one of the listed values.
pub fn atom<'g, A, C>(values: impl Into<Vec<A>> + 'g) -> Matcher<'g, A, C>
where
    A: Copy + PartialEq + 'g,
    C: 'g,
{
    let values = values.into();
    Matcher::new(move |_ctx, atoms, pos| match atoms.get(pos) {
        Some(a) if values.iter().any(|v| v == a) => Ok(pos + 1),
        _ => Err(Fail),
    })
}

/// First atom exists and equals none of the listed values.
pub fn not_atom<'g, A, C>(values: impl Into<Vec<A>> + 'g) -> Matcher<'g, A, C>
where
    A: Copy + PartialEq + 'g,
    C: 'g,
{
    let values = values.into();
    Matcher::new(move |_ctx, atoms, pos| match atoms.get(pos) {
        Some(a) if !values.iter().any(|v| v == a) => Ok(pos + 1),
        _ => Err(Fail),
    })
}

/// First atom exists, regardless of value.
pub fn any_atom<'g, A, C>() -> Matcher<'g, A, C>
where
    A: 'g,
    C: 'g,
{
    Matcher::new(|_ctx, atoms, pos| {
        if pos < atoms.len() {
            Ok(pos + 1)
        } else {
            Err(Fail)
        }
    })
}

/// First atom falls within the closed range `[lo, hi]`.
pub fn range<'g, A, C>(lo: A, hi: A) -> Matcher<'g, A, C>
where
    A: Copy + PartialOrd + 'g,
    C: 'g,
{
    Matcher::new(move |_ctx, atoms, pos| match atoms.get(pos) {
        Some(a) if *a >= lo && *a <= hi => Ok(pos + 1),
        _ => Err(Fail),
    })
}

/// All children match in order on the residual span.
pub fn seq<'g, A, C>(parts: Vec<Matcher<'g, A, C>>) -> Matcher<'g, A, C>
where
    A: 'g,
    C: 'g,
{
    Matcher::new(move |ctx, atoms, pos| {
        let mut cursor = pos;
        for part in &parts {
            cursor = part.apply(ctx, atoms, cursor)?;
        }
        Ok(cursor)
    })
}

/// Ordered choice: the first child that matches wins, no backtracking over
/// an earlier success.
pub fn oneof<'g, A, C>(parts: Vec<Matcher<'g, A, C>>) -> Matcher<'g, A, C>
where
    A: 'g,
    C: 'g,
{
    Matcher::new(move |ctx, atoms, pos| {
        for part in &parts {
            if let Ok(end) = part.apply(ctx, atoms, pos) {
                return Ok(end);
            }
        }
        Err(Fail)
    })
}

/// `P` or empty.
pub fn opt<'g, A, C>(m: Matcher<'g, A, C>) -> Matcher<'g, A, C>
where
    A: 'g,
    C: 'g,
{
    Matcher::new(move |ctx, atoms, pos| Ok(m.apply(ctx, atoms, pos).unwrap_or(pos)))
}

/// Zero or more `P`, greedy, no backtracking.
pub fn any<'g, A, C>(m: Matcher<'g, A, C>) -> Matcher<'g, A, C>
where
    A: 'g,
    C: 'g,
{
    Matcher::new(move |ctx, atoms, pos| {
        let mut cursor = pos;
        while let Ok(end) = m.apply(ctx, atoms, cursor) {
            if end == cursor {
                // A zero-width match would spin forever; one iteration is
                // already a fixed point.
                break;
            }
            cursor = end;
        }
        Ok(cursor)
    })
}

/// One or more `P`, greedy.
pub fn some<'g, A, C>(m: Matcher<'g, A, C>) -> Matcher<'g, A, C>
where
    A: 'g,
    C: 'g,
{
    Matcher::new(move |ctx, atoms, pos| {
        let mut cursor = m.apply(ctx, atoms, pos)?;
        while let Ok(end) = m.apply(ctx, atoms, cursor) {
            if end == cursor {
                break;
            }
            cursor = end;
        }
        Ok(cursor)
    })
}

/// Exactly `n` repetitions of `P`.
pub fn rep<'g, A, C>(n: usize, m: Matcher<'g, A, C>) -> Matcher<'g, A, C>
where
    A: 'g,
    C: 'g,
{
    Matcher::new(move |ctx, atoms, pos| {
        let mut cursor = pos;
        for _ in 0..n {
            cursor = m.apply(ctx, atoms, cursor)?;
        }
        Ok(cursor)
    })
}

/// Lookahead: match `P` then rewind the cursor.
pub fn and<'g, A, C>(m: Matcher<'g, A, C>) -> Matcher<'g, A, C>
where
    A: 'g,
    C: 'g,
{
    Matcher::new(move |ctx, atoms, pos| {
        m.apply(ctx, atoms, pos)?;
        Ok(pos)
    })
}

/// Negative lookahead.
pub fn not<'g, A, C>(m: Matcher<'g, A, C>) -> Matcher<'g, A, C>
where
    A: 'g,
    C: 'g,
{
    Matcher::new(move |ctx, atoms, pos| match m.apply(ctx, atoms, pos) {
        Ok(_) => Err(Fail),
        Err(_) => Ok(pos),
    })
}

/// Advance atom-by-atom until `P` matches, without consuming `P`.
pub fn until<'g, A, C>(m: Matcher<'g, A, C>) -> Matcher<'g, A, C>
where
    A: 'g,
    C: 'g,
{
    Matcher::new(move |ctx, atoms, pos| {
        let mut cursor = pos;
        loop {
            if m.apply(ctx, atoms, cursor).is_ok() {
                return Ok(cursor);
            }
            if cursor >= atoms.len() {
                return Err(Fail);
            }
            cursor += 1;
        }
    })
}

/// Exact byte-string prefix match. Only meaningful over `u8` atoms.
pub fn lit<'g, C>(literal: &'static str) -> Matcher<'g, u8, C>
where
    C: 'g,
{
    let bytes = literal.as_bytes();
    Matcher::new(move |_ctx, atoms, pos| {
        let end = pos + bytes.len();
        if end <= atoms.len() && &atoms[pos..end] == bytes {
            Ok(end)
        } else {
            Err(Fail)
        }
    })
}

/// First atom is a member of a named character set, given as a string of
/// the member bytes (e.g. `charset("0123456789")`).
pub fn charset<'g, C>(members: &'static str) -> Matcher<'g, u8, C>
where
    C: 'g,
{
    let members = members.as_bytes();
    Matcher::new(move |_ctx, atoms, pos| match atoms.get(pos) {
        Some(a) if members.contains(a) => Ok(pos + 1),
        _ => Err(Fail),
    })
}

/// Indirection through a named matcher function, for recursion and forward
/// references. Grammar productions are ordinary functions with this
/// signature; wrapping one in `reference` lets it sit alongside other
/// [`Matcher`] values inside a [`seq`]/[`oneof`] without requiring the
/// callee to already be defined at the point of composition.
pub fn reference<'g, A, C>(
    f: fn(&mut C, &[A], Pos) -> MatchResult,
) -> Matcher<'g, A, C>
where
    A: 'g,
    C: 'g,
{
    Matcher::new(move |ctx, atoms, pos| f(ctx, atoms, pos))
}

/// Capture the atoms matched by `m` under `tag`, for later comparison by
/// [`match_backref`]. The store only happens once `m` has actually matched.
pub fn store_backref<'g, A, C>(tag: &'static str, m: Matcher<'g, A, C>) -> Matcher<'g, A, C>
where
    A: Clone + 'g,
    C: BackrefStore<A> + 'g,
{
    Matcher::new(move |ctx, atoms, pos| {
        let end = m.apply(ctx, atoms, pos)?;
        ctx.store_backref(tag, &atoms[pos..end]);
        Ok(end)
    })
}

/// Match the atoms previously captured under `tag`, byte-for-byte.
pub fn match_backref<'g, A, C>(tag: &'static str) -> Matcher<'g, A, C>
where
    A: Clone + PartialEq + 'g,
    C: BackrefStore<A> + 'g,
{
    Matcher::new(move |ctx, atoms, pos| {
        let captured = ctx.backref(tag).ok_or(Fail)?.to_vec();
        let end = pos + captured.len();
        if end <= atoms.len() && atoms[pos..end] == captured[..] {
            Ok(end)
        } else {
            Err(Fail)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoCtx;
    impl BackrefStore<u8> for NoCtx {
        fn store_backref(&mut self, _tag: &'static str, _atoms: &[u8]) {}
        fn backref(&self, _tag: &'static str) -> Option<&[u8]> {
            None
        }
    }

    #[test]
    fn atom_matches_listed_values() {
        let m: Matcher<u8, NoCtx> = atom(vec![b'a', b'b']);
        assert_eq!(m.apply(&mut NoCtx, b"ax", 0), Ok(1));
        assert_eq!(m.apply(&mut NoCtx, b"bx", 0), Ok(1));
        assert_eq!(m.apply(&mut NoCtx, b"cx", 0), Err(Fail));
        assert_eq!(m.apply(&mut NoCtx, b"", 0), Err(Fail));
    }

    #[test]
    fn not_atom_excludes_listed_values() {
        let m: Matcher<u8, NoCtx> = not_atom(vec![b'a']);
        assert_eq!(m.apply(&mut NoCtx, b"bx", 0), Ok(1));
        assert_eq!(m.apply(&mut NoCtx, b"ax", 0), Err(Fail));
    }

    #[test]
    fn any_atom_requires_an_atom() {
        let m: Matcher<u8, NoCtx> = any_atom();
        assert_eq!(m.apply(&mut NoCtx, b"x", 0), Ok(1));
        assert_eq!(m.apply(&mut NoCtx, b"", 0), Err(Fail));
    }

    #[test]
    fn range_matches_closed_interval() {
        let m: Matcher<u8, NoCtx> = range(b'0', b'9');
        assert_eq!(m.apply(&mut NoCtx, b"5", 0), Ok(1));
        assert_eq!(m.apply(&mut NoCtx, b"a", 0), Err(Fail));
    }

    #[test]
    fn seq_requires_all_parts_in_order() {
        let m: Matcher<u8, NoCtx> = seq(vec![atom(vec![b'a']), atom(vec![b'b'])]);
        assert_eq!(m.apply(&mut NoCtx, b"ab", 0), Ok(2));
        assert_eq!(m.apply(&mut NoCtx, b"ac", 0), Err(Fail));
    }

    #[test]
    fn oneof_commits_to_first_success() {
        let m: Matcher<u8, NoCtx> = oneof(vec![lit("ab"), lit("a")]);
        // "ab" tried first and wins even though "a" also matches a prefix.
        assert_eq!(m.apply(&mut NoCtx, b"ab", 0), Ok(2));
        assert_eq!(m.apply(&mut NoCtx, b"ac", 0), Ok(1));
    }

    #[test]
    fn opt_never_fails() {
        let m: Matcher<u8, NoCtx> = opt(atom(vec![b'a']));
        assert_eq!(m.apply(&mut NoCtx, b"a", 0), Ok(1));
        assert_eq!(m.apply(&mut NoCtx, b"b", 0), Ok(0));
    }

    #[test]
    fn any_is_greedy_and_terminates_on_zero_width() {
        let m: Matcher<u8, NoCtx> = any(atom(vec![b'a']));
        assert_eq!(m.apply(&mut NoCtx, b"aaab", 0), Ok(3));
        assert_eq!(m.apply(&mut NoCtx, b"b", 0), Ok(0));
    }

    #[test]
    fn some_requires_at_least_one() {
        let m: Matcher<u8, NoCtx> = some(atom(vec![b'a']));
        assert_eq!(m.apply(&mut NoCtx, b"aaab", 0), Ok(3));
        assert_eq!(m.apply(&mut NoCtx, b"b", 0), Err(Fail));
    }

    #[test]
    fn rep_requires_exact_count() {
        let m: Matcher<u8, NoCtx> = rep(3, atom(vec![b'a']));
        assert_eq!(m.apply(&mut NoCtx, b"aaab", 0), Ok(3));
        assert_eq!(m.apply(&mut NoCtx, b"aab", 0), Err(Fail));
    }

    #[test]
    fn and_rewinds_on_success() {
        let m: Matcher<u8, NoCtx> = and(atom(vec![b'a']));
        assert_eq!(m.apply(&mut NoCtx, b"a", 0), Ok(0));
        assert_eq!(m.apply(&mut NoCtx, b"b", 0), Err(Fail));
    }

    #[test]
    fn not_inverts_without_consuming() {
        let m: Matcher<u8, NoCtx> = not(atom(vec![b'a']));
        assert_eq!(m.apply(&mut NoCtx, b"b", 0), Ok(0));
        assert_eq!(m.apply(&mut NoCtx, b"a", 0), Err(Fail));
    }

    #[test]
    fn until_stops_before_the_target() {
        let m: Matcher<u8, NoCtx> = until(atom(vec![b'*']));
        assert_eq!(m.apply(&mut NoCtx, b"abc*d", 0), Ok(3));
        assert_eq!(m.apply(&mut NoCtx, b"abc", 0), Err(Fail));
    }

    #[test]
    fn lit_matches_exact_prefix() {
        let m: Matcher<u8, NoCtx> = lit("0x");
        assert_eq!(m.apply(&mut NoCtx, b"0xFF", 0), Ok(2));
        assert_eq!(m.apply(&mut NoCtx, b"0b11", 0), Err(Fail));
    }

    #[test]
    fn charset_matches_named_members() {
        let m: Matcher<u8, NoCtx> = charset("abc");
        assert_eq!(m.apply(&mut NoCtx, b"b", 0), Ok(1));
        assert_eq!(m.apply(&mut NoCtx, b"d", 0), Err(Fail));
    }

    fn is_digit(_ctx: &mut NoCtx, atoms: &[u8], pos: Pos) -> MatchResult {
        range(b'0', b'9').apply(_ctx, atoms, pos)
    }

    #[test]
    fn reference_indirects_through_a_named_fn() {
        let m: Matcher<u8, NoCtx> = reference(is_digit);
        assert_eq!(m.apply(&mut NoCtx, b"5", 0), Ok(1));
        assert_eq!(m.apply(&mut NoCtx, b"x", 0), Err(Fail));
    }

    struct BackrefCtx {
        slot: Option<Vec<u8>>,
    }
    impl BackrefStore<u8> for BackrefCtx {
        fn store_backref(&mut self, _tag: &'static str, atoms: &[u8]) {
            self.slot = Some(atoms.to_vec());
        }
        fn backref(&self, _tag: &'static str) -> Option<&[u8]> {
            self.slot.as_deref()
        }
    }

    #[test]
    fn backref_round_trips_a_captured_delimiter() {
        let store: Matcher<u8, BackrefCtx> = store_backref("delim", some(charset("xy")));
        let mut ctx = BackrefCtx { slot: None };
        assert_eq!(store.apply(&mut ctx, b"xy(", 0), Ok(2));

        let replay: Matcher<u8, BackrefCtx> = match_backref("delim");
        assert_eq!(replay.apply(&mut ctx, b"xy)", 0), Ok(2));
        assert_eq!(replay.apply(&mut ctx, b"yy)", 0), Err(Fail));
    }
}
