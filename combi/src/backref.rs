//! Backref capture, used by [`crate::store_backref`]/[`crate::match_backref`]
//! to implement delimiter-matching constructs such as C++ raw-string
//! literals (`R"delim(...)delim"`), where the closing delimiter must equal
//! the opening one byte-for-byte.
//!
//! The source project kept the capture in a `static` pointer-and-length pair.
//! That is not sound across concurrent or re-entrant parses, so here the
//! capture lives on the context the caller already threads through every
//! matcher call.

/// A context that can remember a named span of atoms for later comparison.
///
/// Implementors back this with whatever storage fits their atom type; the
/// engine only ever stores one span per tag at a time, overwriting the
/// previous one, because the grammar using this project never nests two
/// stores under the same tag concurrently.
pub trait BackrefStore<A> {
    fn store_backref(&mut self, tag: &'static str, atoms: &[A]);
    fn backref(&self, tag: &'static str) -> Option<&[A]>;
}
