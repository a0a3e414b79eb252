// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Skiprange - an ordered map on a skip list with range queries.
//!
//! # Quick Start
//!
//! ```
//! use skiprange::SkipMap;
//!
//! let mut map = SkipMap::new();
//! for key in ["000", "001", "008", "003", "005"] {
//!     map.put(key, key.len());
//! }
//!
//! assert_eq!(map.len(), 5);
//! assert_eq!(map.range_by_key(&"001", &"004").unwrap().len(), 2);
//!
//! // Two entries at or after "002", ascending.
//! let keys: Vec<_> = map.range_by_count(&"002", 2).unwrap().into_iter().map(|(k, _)| *k).collect();
//! assert_eq!(keys, ["003", "005"]);
//!
//! // Last entry, then walk backward.
//! let keys: Vec<_> = map.range_by_index(-1, -2).unwrap().into_iter().map(|(k, _)| *k).collect();
//! assert_eq!(keys, ["008", "005"]);
//! ```
//!
//! Maps are not synchronized. Share one across threads behind a lock.

pub mod error;
pub mod skip_map;

pub use error::Error;
pub use error::Result;
pub use skip_map::Direction;
pub use skip_map::SkipMap;
