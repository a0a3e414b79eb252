// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Nodes and the index-linked arena they live in.
//!
//! Links are arena indices rather than references. Two reserved index
//! values stand in for the ends of a chain:
//!
//! - [`NULL`] terminates a forward chain (no successor).
//! - [`HEAD`] names the header sentinel. It is the backward link of the
//!   first node and the predecessor recorded for levels the locator never
//!   advanced on.

use smallvec::SmallVec;
use smallvec::smallvec;

use super::SkipMap;

/// Node index type. u32 keeps links small on 64-bit targets.
pub(crate) type Idx = u32;

/// End of a forward chain.
pub(crate) const NULL: Idx = Idx::MAX;

/// The header sentinel.
pub(crate) const HEAD: Idx = Idx::MAX - 1;

/// Forward links, one per level. Most nodes sit on one or two levels.
pub(crate) type Links = SmallVec<[Idx; 4]>;

/// A stored entry and its links.
#[derive(Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    /// `next[i]` is the successor at level `i`; `next.len()` is the node's level.
    pub(crate) next: Links,
    /// Predecessor at level 0, or `HEAD` for the first node.
    pub(crate) prev: Idx,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V, level: usize) -> Self {
        Node {
            key,
            value,
            next: smallvec![NULL; level],
            prev: HEAD,
        }
    }

    pub(crate) fn level(&self) -> usize {
        self.next.len()
    }
}

// --- Arena access ---

impl<K, V, R> SkipMap<K, V, R> {
    pub(crate) fn node(&self, idx: Idx) -> &Node<K, V> {
        &self.nodes[idx as usize]
    }

    pub(crate) fn node_mut(&mut self, idx: Idx) -> &mut Node<K, V> {
        &mut self.nodes[idx as usize]
    }

    /// Successor of `idx` at `level`, where `idx` may be the header.
    pub(crate) fn next(&self, idx: Idx, level: usize) -> Idx {
        if idx == HEAD {
            self.head[level]
        } else {
            self.node(idx).next[level]
        }
    }

    pub(crate) fn set_next(&mut self, idx: Idx, level: usize, to: Idx) {
        if idx == HEAD {
            self.head[level] = to;
        } else {
            self.node_mut(idx).next[level] = to;
        }
    }

    /// Place a node at the end of the arena, returning its index.
    pub(crate) fn alloc(&mut self, node: Node<K, V>) -> Idx {
        assert!(
            self.nodes.len() < HEAD as usize,
            "skip map arena exhausted at {} nodes",
            self.nodes.len()
        );
        let idx = self.nodes.len() as Idx;
        self.nodes.push(node);
        idx
    }
}
