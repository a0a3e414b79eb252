// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Range queries: by key interval, by start key and count, by position.
//!
//! All three locate a starting node and then walk level 0 in one
//! direction. A walk ends at the header going backward, at the end of the
//! chain going forward, or once enough entries are collected.
//!
//! Counts are signed. A positive count walks forward (ascending keys), a
//! negative count walks backward (descending keys), and its magnitude caps
//! the number of entries returned. Results keep walk order.

use std::borrow::Borrow;

use super::SkipMap;
use super::node::HEAD;
use super::node::Idx;
use super::node::NULL;
use super::node::Node;
use crate::error::Error;
use crate::error::Result;

/// Which way a range walk moves along level 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending key order.
    Forward,
    /// Descending key order.
    Backward,
}

impl Direction {
    /// Split a signed count into a direction and a limit.
    pub fn from_count(count: isize) -> Result<(Direction, usize)> {
        if count == 0 {
            return Err(Error::ZeroCount);
        }
        let direction = if count > 0 {
            Direction::Forward
        } else {
            Direction::Backward
        };
        Ok((direction, count.unsigned_abs()))
    }
}

/// Walks level 0 from a starting node, inclusive.
struct Walk<'a, K, V> {
    nodes: &'a [Node<K, V>],
    current: Idx,
    direction: Direction,
}

impl<'a, K, V> Iterator for Walk<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == NULL || self.current == HEAD {
            return None;
        }
        let nodes = self.nodes;
        let node = &nodes[self.current as usize];
        self.current = match self.direction {
            Direction::Forward => node.next[0],
            Direction::Backward => node.prev,
        };
        Some((&node.key, &node.value))
    }
}

impl<K, V, R> SkipMap<K, V, R> {
    fn walk(&self, start: Idx, direction: Direction) -> Walk<'_, K, V> {
        Walk {
            nodes: &self.nodes,
            current: start,
            direction,
        }
    }

    /// Resolve a signed position to a node. `-1` is the last entry.
    fn node_at(&self, index: isize) -> Result<Idx> {
        let len = self.len();
        let position = if index >= 0 {
            index as usize
        } else {
            len.wrapping_sub(index.unsigned_abs())
        };
        if position >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }

        // Walk in from whichever end is closer.
        if position <= len / 2 {
            let mut idx = self.head[0];
            for _ in 0..position {
                idx = self.node(idx).next[0];
            }
            Ok(idx)
        } else {
            let mut idx = self.tail;
            for _ in position + 1..len {
                idx = self.node(idx).prev;
            }
            Ok(idx)
        }
    }

    /// Entry at a signed position, `-1` being the last.
    pub fn get_index(&self, index: isize) -> Result<(&K, &V)> {
        let node = self.node(self.node_at(index)?);
        Ok((&node.key, &node.value))
    }

    /// Entries from position `start`, walking `|count|` steps in the
    /// direction given by the sign of `count`.
    ///
    /// `start` may be negative, counting back from the end: `-1` is the
    /// last entry and `-len()` the first. The sign of `start` has no
    /// bearing on direction.
    pub fn range_by_index(&self, start: isize, count: isize) -> Result<Vec<(&K, &V)>> {
        let (direction, limit) = Direction::from_count(count)?;
        let first = self.node_at(start)?;
        Ok(self.walk(first, direction).take(limit).collect())
    }
}

impl<K: Ord, V, R> SkipMap<K, V, R> {
    /// All entries with `start <= key <= end`, ascending.
    pub fn range_by_key<Q>(&self, start: &Q, end: &Q) -> Result<Vec<(&K, &V)>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if start > end {
            return Err(Error::InvalidRange);
        }
        let location = self.locate(start);
        let first = match location.found {
            Some(idx) => idx,
            None => self.next(location.update[0], 0),
        };
        Ok(self
            .walk(first, Direction::Forward)
            .take_while(|(key, _)| {
                let key: &Q = (*key).borrow();
                key <= end
            })
            .collect())
    }

    /// Up to `|count|` entries starting at `start`.
    ///
    /// If `start` is stored, its entry comes first. Otherwise a forward
    /// walk begins at the next greater key and a backward walk at the next
    /// smaller key.
    pub fn range_by_count<Q>(&self, start: &Q, count: isize) -> Result<Vec<(&K, &V)>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (direction, limit) = Direction::from_count(count)?;
        let location = self.locate(start);
        let pred = location.update[0];
        let first = match (location.found, direction) {
            (Some(idx), _) => idx,
            (None, Direction::Forward) => self.next(pred, 0),
            (None, Direction::Backward) => pred,
        };
        Ok(self.walk(first, direction).take(limit).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    /// Even keys 0, 2, ..., 18 with value key * 10.
    fn evens() -> SkipMap<i32, i32> {
        let mut map = SkipMap::with_rng(SmallRng::seed_from_u64(3));
        for key in (0..20).step_by(2) {
            map.put(key, key * 10);
        }
        map
    }

    fn keys(entries: Vec<(&i32, &i32)>) -> Vec<i32> {
        entries.into_iter().map(|(key, _)| *key).collect()
    }

    #[test]
    fn direction_from_count() {
        assert_eq!(Direction::from_count(3), Ok((Direction::Forward, 3)));
        assert_eq!(Direction::from_count(-4), Ok((Direction::Backward, 4)));
        assert_eq!(Direction::from_count(0), Err(Error::ZeroCount));
        assert_eq!(
            Direction::from_count(isize::MIN),
            Ok((Direction::Backward, isize::MIN.unsigned_abs()))
        );
    }

    #[test]
    fn by_key_inclusive_bounds() {
        let map = evens();
        assert_eq!(keys(map.range_by_key(&4, &10).unwrap()), vec![4, 6, 8, 10]);
        assert_eq!(keys(map.range_by_key(&3, &11).unwrap()), vec![4, 6, 8, 10]);
        assert_eq!(keys(map.range_by_key(&6, &6).unwrap()), vec![6]);
        assert_eq!(keys(map.range_by_key(&7, &7).unwrap()), Vec::<i32>::new());
    }

    #[test]
    fn by_key_past_ends() {
        let map = evens();
        assert_eq!(keys(map.range_by_key(&-5, &2).unwrap()), vec![0, 2]);
        assert_eq!(keys(map.range_by_key(&17, &100).unwrap()), vec![18]);
        assert!(map.range_by_key(&19, &100).unwrap().is_empty());
    }

    #[test]
    fn by_key_invalid_range() {
        let map = evens();
        assert_eq!(map.range_by_key(&5, &4), Err(Error::InvalidRange));
    }

    #[test]
    fn by_key_values() {
        let map = evens();
        assert_eq!(map.range_by_key(&2, &4).unwrap(), vec![(&2, &20), (&4, &40)]);
    }

    #[test]
    fn by_count_present_start() {
        let map = evens();
        assert_eq!(keys(map.range_by_count(&6, 3).unwrap()), vec![6, 8, 10]);
        assert_eq!(keys(map.range_by_count(&6, -3).unwrap()), vec![6, 4, 2]);
    }

    #[test]
    fn by_count_absent_start() {
        let map = evens();
        assert_eq!(keys(map.range_by_count(&7, 2).unwrap()), vec![8, 10]);
        assert_eq!(keys(map.range_by_count(&7, -2).unwrap()), vec![6, 4]);
    }

    #[test]
    fn by_count_stops_at_boundary() {
        let map = evens();
        assert_eq!(keys(map.range_by_count(&16, 5).unwrap()), vec![16, 18]);
        assert_eq!(keys(map.range_by_count(&2, -5).unwrap()), vec![2, 0]);
        assert!(map.range_by_count(&-1, -3).unwrap().is_empty());
        assert!(map.range_by_count(&19, 3).unwrap().is_empty());
    }

    #[test]
    fn by_count_zero() {
        let map = evens();
        assert_eq!(map.range_by_count(&4, 0), Err(Error::ZeroCount));
    }

    #[test]
    fn by_index_positive() {
        let map = evens();
        assert_eq!(keys(map.range_by_index(0, 2).unwrap()), vec![0, 2]);
        assert_eq!(keys(map.range_by_index(3, -2).unwrap()), vec![6, 4]);
        assert_eq!(keys(map.range_by_index(8, 5).unwrap()), vec![16, 18]);
    }

    #[test]
    fn by_index_negative() {
        let map = evens();
        assert_eq!(keys(map.range_by_index(-1, 3).unwrap()), vec![18]);
        assert_eq!(keys(map.range_by_index(-1, -3).unwrap()), vec![18, 16, 14]);
        assert_eq!(keys(map.range_by_index(-10, 2).unwrap()), vec![0, 2]);
        assert_eq!(keys(map.range_by_index(-10, -2).unwrap()), vec![0]);
    }

    #[test]
    fn by_index_bounds() {
        let map = evens();
        assert_eq!(
            map.range_by_index(10, 1),
            Err(Error::IndexOutOfRange { index: 10, len: 10 })
        );
        assert_eq!(
            map.range_by_index(-11, 1),
            Err(Error::IndexOutOfRange { index: -11, len: 10 })
        );
        assert_eq!(
            map.range_by_index(isize::MIN, 1),
            Err(Error::IndexOutOfRange { index: isize::MIN, len: 10 })
        );
        // A zero count is reported before the index is checked.
        assert_eq!(map.range_by_index(99, 0), Err(Error::ZeroCount));
    }

    #[test]
    fn by_index_empty_map() {
        let map: SkipMap<i32, i32> = SkipMap::with_rng(SmallRng::seed_from_u64(0));
        assert_eq!(
            map.range_by_index(0, 1),
            Err(Error::IndexOutOfRange { index: 0, len: 0 })
        );
        assert_eq!(
            map.range_by_index(-1, 1),
            Err(Error::IndexOutOfRange { index: -1, len: 0 })
        );
    }

    #[test]
    fn get_index_from_both_ends() {
        let map = evens();
        for position in 0..10 {
            let key = position as i32 * 2;
            assert_eq!(map.get_index(position), Ok((&key, &(key * 10))));
            assert_eq!(map.get_index(position - 10), Ok((&key, &(key * 10))));
        }
    }

    #[test]
    fn empty_map_ranges() {
        let map: SkipMap<i32, i32> = SkipMap::with_rng(SmallRng::seed_from_u64(0));
        assert!(map.range_by_key(&0, &10).unwrap().is_empty());
        assert!(map.range_by_count(&0, 4).unwrap().is_empty());
        assert!(map.range_by_count(&0, -4).unwrap().is_empty());
    }
}
