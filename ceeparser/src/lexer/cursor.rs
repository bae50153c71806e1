use combi::BackrefStore;

/// The context threaded through every byte-level matcher. Its only job is
/// to hold the single named capture raw-string delimiter matching needs;
/// everything else about lexing is stateless.
///
/// The source project kept this capture in a `static` pointer-and-length
/// pair. A `static` would not be sound here — nothing stops two parses
/// running on different threads, or a re-entrant call, from clobbering each
/// other's capture — so it lives on this per-lex context instead. The
/// grammar never needs two stores live under the same tag at once, so one
/// slot per tag is enough.
#[derive(Default)]
pub(crate) struct LexContext {
    slots: std::collections::HashMap<&'static str, Vec<u8>>,
}

impl BackrefStore<u8> for LexContext {
    fn store_backref(&mut self, tag: &'static str, atoms: &[u8]) {
        self.slots.insert(tag, atoms.to_vec());
    }

    fn backref(&self, tag: &'static str) -> Option<&[u8]> {
        self.slots.get(tag).map(|v| v.as_slice())
    }
}
