// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Ordered map on a probabilistic skip list.
//!
//! # Structure
//!
//! Every node sits on level 0 and, with probability [`P`] per step, on the
//! levels above it. Upper levels are express lanes over the level below.
//! Level 0 is additionally linked backward, and the map keeps the last
//! node as `tail`, so both ends are reachable in O(1).
//!
//! ```text
//! Level 2: HEAD ------------------> 5 ----------------------> NULL
//! Level 1: HEAD ------> 1 --------> 5 ---------> 7 ---------> NULL
//! Level 0: HEAD -> 0 -> 1 -> 3 ---> 5 ---> 6 --> 7 ---> 8 --> NULL
//!                                                       ^
//!                                                      tail
//! ```
//!
//! # Storage
//!
//! Nodes live in a dense `Vec` and link to each other by index. Removing a
//! node moves the last node of the arena into its slot and re-points the
//! links aimed at the moved node, so no slot is ever left vacant.
//!
//! # Operations
//!
//! - `put(key, value)`: O(log n) expected - insert or overwrite
//! - `get(key)` / `get_mut(key)`: O(log n) expected
//! - `del(key)`: O(log n) expected
//! - `range_by_key(start, end)`: O(log n + k)
//! - `range_by_count(start, count)`: O(log n + |count|)
//! - `range_by_index(start, count)`: O(n) to resolve the index, then O(|count|)
//! - `len()`: O(1)

mod iter;
mod level;
mod node;
mod range;

pub use iter::Iter;
pub use iter::Keys;
pub use iter::Values;
pub use level::LevelGenerator;
pub use level::MAX_LEVEL;
pub use level::P;
pub use range::Direction;

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::mem;

use log::debug;
use log::trace;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_core::OsRng;
use rand_core::RngCore;

use crate::error::Error;
use crate::error::Result;
use node::HEAD;
use node::Idx;
use node::NULL;
use node::Node;

/// An ordered map from `K` to `V` with positional and ranged access.
///
/// `R` is the random stream used to pick node levels. It is created once
/// with the map and advanced on every insertion of a new key.
pub struct SkipMap<K, V, R = SmallRng> {
    /// Header forward links, one per level.
    head: [Idx; MAX_LEVEL],
    /// Arena of live nodes. Its length is the number of entries.
    nodes: Vec<Node<K, V>>,
    /// Node with the greatest key, or `HEAD` when empty.
    tail: Idx,
    /// Number of levels occupied by at least one node.
    height: usize,
    levels: LevelGenerator<R>,
}

/// Result of searching for a key.
struct Location {
    /// The node holding the key, if present.
    found: Option<Idx>,
    /// `update[i]` is the last node at level `i` whose key is less than the
    /// target, or `HEAD`.
    update: [Idx; MAX_LEVEL],
}

impl<K: Ord, V> SkipMap<K, V> {
    /// Create an empty map with a level stream seeded from the OS.
    pub fn new() -> Self {
        SkipMap::with_rng(SmallRng::seed_from_u64(OsRng.next_u64()))
    }
}

impl<K: Ord, V> Default for SkipMap<K, V> {
    fn default() -> Self {
        SkipMap::new()
    }
}

impl<K, V, R> SkipMap<K, V, R> {
    /// Create an empty map drawing node levels from `rng`.
    pub fn with_rng(rng: R) -> Self {
        SkipMap {
            head: [NULL; MAX_LEVEL],
            nodes: Vec::new(),
            tail: HEAD,
            height: 0,
            levels: LevelGenerator::new(rng),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Remove every entry. The level stream keeps its position.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = [NULL; MAX_LEVEL];
        self.tail = HEAD;
        self.height = 0;
    }

    /// Entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.entry(self.head[0])
    }

    /// Entry with the greatest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.entry(self.tail)
    }

    fn entry(&self, idx: Idx) -> Option<(&K, &V)> {
        if idx == NULL || idx == HEAD {
            return None;
        }
        let node = self.node(idx);
        Some((&node.key, &node.value))
    }

    /// Drop empty levels from the top after a removal.
    fn shrink_height(&mut self) {
        let before = self.height;
        while self.height > 0 && self.head[self.height - 1] == NULL {
            self.height -= 1;
        }
        if self.height != before {
            debug!("skip map height shrank from {} to {}", before, self.height);
        }
    }
}

impl<K: Ord, V, R> SkipMap<K, V, R> {
    /// Search for `key`, recording the predecessor at every level.
    ///
    /// Levels at or above `height` hold no nodes, so their predecessor is
    /// the header and they are not scanned.
    fn locate<Q>(&self, key: &Q) -> Location
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut update = [HEAD; MAX_LEVEL];
        let mut found = None;
        let mut idx = HEAD;

        for level in (0..self.height).rev() {
            loop {
                let next = self.next(idx, level);
                if next == NULL {
                    break;
                }
                let next_key: &Q = self.node(next).key.borrow();
                match next_key.cmp(key) {
                    Ordering::Less => idx = next,
                    Ordering::Equal => {
                        found = Some(next);
                        break;
                    }
                    Ordering::Greater => break,
                }
            }
            update[level] = idx;
        }

        Location { found, update }
    }

    /// Look up the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let idx = self.locate(key).found.ok_or(Error::KeyNotFound)?;
        Ok(&self.node(idx).value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let idx = self.locate(key).found.ok_or(Error::KeyNotFound)?;
        Ok(&mut self.node_mut(idx).value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(key).found.is_some()
    }

    /// Remove `key`, returning its value.
    pub fn del<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let location = self.locate(key);
        let idx = location.found.ok_or(Error::KeyNotFound)?;
        let level = self.node(idx).level();

        for i in 0..level {
            let next = self.node(idx).next[i];
            self.set_next(location.update[i], i, next);
        }

        let prev = self.node(idx).prev;
        let next = self.node(idx).next[0];
        if next == NULL {
            self.tail = prev;
        } else {
            self.node_mut(next).prev = prev;
        }

        let node = self.release(idx);
        self.shrink_height();
        trace!("removed node at slot {} (level {}), len {}", idx, level, self.len());
        self.check_invariants();

        Ok(node.value)
    }

    /// Take an unlinked node out of the arena.
    ///
    /// The last node in the arena moves into the freed slot, so every link
    /// that pointed at it is redirected to `idx` first.
    fn release(&mut self, idx: Idx) -> Node<K, V> {
        let last = (self.nodes.len() - 1) as Idx;
        if idx != last {
            let moved = self.node(last);
            let level = moved.level();
            let successor = moved.next[0];
            let location = self.locate(&moved.key);

            for i in 0..level {
                debug_assert_eq!(self.next(location.update[i], i), last);
                self.set_next(location.update[i], i, idx);
            }
            if successor == NULL {
                self.tail = idx;
            } else {
                self.node_mut(successor).prev = idx;
            }
        }
        self.nodes.swap_remove(idx as usize)
    }

    /// Verify structural invariants. Only active in debug builds.
    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        // Level 0 is strictly ascending, mirrored by the backward links,
        // and ends at the tail.
        let mut count = 0usize;
        let mut prev = HEAD;
        let mut idx = self.head[0];
        while idx != NULL {
            let node = self.node(idx);
            assert_eq!(node.prev, prev, "INVARIANT VIOLATED: backward link of slot {}", idx);
            assert!(
                (1..=MAX_LEVEL).contains(&node.level()),
                "INVARIANT VIOLATED: slot {} has level {}",
                idx,
                node.level()
            );
            if prev != HEAD {
                assert!(
                    self.node(prev).key < node.key,
                    "INVARIANT VIOLATED: level 0 not ascending at slot {}",
                    idx
                );
            }
            count += 1;
            prev = idx;
            idx = node.next[0];
        }
        assert_eq!(
            count,
            self.nodes.len(),
            "INVARIANT VIOLATED: chain length={} != len()={}",
            count,
            self.nodes.len()
        );
        assert_eq!(self.tail, prev, "INVARIANT VIOLATED: tail is not the last node");

        // Each upper level visits exactly the nodes tall enough for it, in order.
        for level in 1..MAX_LEVEL {
            let mut expected = self.head[0];
            while expected != NULL && self.node(expected).level() <= level {
                expected = self.node(expected).next[0];
            }
            let mut idx = self.head[level];
            while idx != NULL {
                assert_eq!(idx, expected, "INVARIANT VIOLATED: level {} skips a node", level);
                idx = self.node(idx).next[level];
                expected = self.node(expected).next[0];
                while expected != NULL && self.node(expected).level() <= level {
                    expected = self.node(expected).next[0];
                }
            }
            assert_eq!(expected, NULL, "INVARIANT VIOLATED: level {} ends early", level);
        }

        let tallest = self.nodes.iter().map(|node| node.level()).max().unwrap_or(0);
        assert_eq!(
            self.height, tallest,
            "INVARIANT VIOLATED: height={} != tallest node={}",
            self.height, tallest
        );
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    fn check_invariants(&self) {}
}

impl<K: Ord, V, R: RngCore> SkipMap<K, V, R> {
    /// Insert `value` under `key`, returning the value it replaced.
    ///
    /// An existing key is overwritten in place without touching any link.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let location = self.locate(&key);
        if let Some(idx) = location.found {
            return Some(mem::replace(&mut self.node_mut(idx).value, value));
        }

        let level = self.levels.next_level();
        let idx = self.alloc(Node::new(key, value, level));

        for i in 0..level {
            let pred = location.update[i];
            let next = self.next(pred, i);
            self.node_mut(idx).next[i] = next;
            self.set_next(pred, i, idx);
        }

        let pred = location.update[0];
        let next = self.node(idx).next[0];
        self.node_mut(idx).prev = pred;
        if next == NULL {
            self.tail = idx;
        } else {
            self.node_mut(next).prev = idx;
        }

        if level > self.height {
            debug!("skip map height grew from {} to {}", self.height, level);
            self.height = level;
        }
        trace!("inserted node at slot {} (level {}), len {}", idx, level, self.len());
        self.check_invariants();

        None
    }
}

impl<K: Ord, V, R: RngCore> Extend<(K, V)> for SkipMap<K, V, R> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SkipMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = SkipMap::new();
        map.extend(iter);
        map
    }
}

impl<K: fmt::Debug, V: fmt::Debug, R> fmt::Debug for SkipMap<K, V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
