//! A small engine for building recursive-descent parsers out of typed,
//! composable matchers over an arbitrary atom sequence.
//!
//! A matcher is a pure function `(ctx, atoms, pos) -> Result<new_pos, Fail>`.
//! Primitives compose without restriction; recursive or forward-referenced
//! productions go through [`reference`]. See [`matcher`] for the primitive
//! catalogue and [`sst`] for the sorted-string-table lookup used to classify
//! keywords and other closed vocabularies.

mod backref;
mod matcher;
pub mod sst;

pub use backref::BackrefStore;
pub use matcher::{
    and, any, any_atom, atom, charset, lit, match_backref, not, not_atom, oneof, opt, range, rep,
    reference, seq, some, store_backref, until, Fail, MatchResult, Matcher, Pos,
};
