//! AFL Fuzz harness for SkipMap
//!
//! Every operation is applied to a SkipMap and to a BTreeMap model, and the
//! results must agree:
//! 1. Point operations return the same values and errors
//! 2. Range queries return the same entries in the same order
//! 3. Length and iteration order match after each step

use std::collections::BTreeMap;

use afl::fuzz;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use skiprange::Error;
use skiprange::SkipMap;

/// Operation types the fuzzer can generate
#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    Put { key: u8, value: u8 },
    Del { key: u8 },
    RangeByKey { start: u8, end: u8 },
    RangeByCount { start: u8, count: i8 },
    RangeByIndex { start: i8, count: i8 },
}

impl FuzzOp {
    fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        if bytes.len() < 3 {
            return None;
        }

        let op = match bytes[0] % 5 {
            0 => FuzzOp::Put { key: bytes[1], value: bytes[2] },
            1 => FuzzOp::Del { key: bytes[1] },
            2 => FuzzOp::RangeByKey { start: bytes[1], end: bytes[2] },
            3 => FuzzOp::RangeByCount { start: bytes[1], count: bytes[2] as i8 },
            _ => FuzzOp::RangeByIndex { start: bytes[1] as i8, count: bytes[2] as i8 },
        };
        Some((op, &bytes[3..]))
    }
}

fn owned(entries: Vec<(&u8, &u8)>) -> Vec<(u8, u8)> {
    entries.into_iter().map(|(k, v)| (*k, *v)).collect()
}

fn main() {
    fuzz!(|data: &[u8]| {
        // Fixed seed so crashes reproduce
        let mut map: SkipMap<u8, u8> = SkipMap::with_rng(SmallRng::seed_from_u64(0));
        let mut model: BTreeMap<u8, u8> = BTreeMap::new();
        let mut remaining = data;

        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            remaining = rest;

            match op {
                FuzzOp::Put { key, value } => {
                    assert_eq!(map.put(key, value), model.insert(key, value));
                }

                FuzzOp::Del { key } => {
                    assert_eq!(map.del(&key).ok(), model.remove(&key));
                }

                FuzzOp::RangeByKey { start, end } => {
                    let result = map.range_by_key(&start, &end);
                    if start > end {
                        assert_eq!(result, Err(Error::InvalidRange));
                    } else {
                        let expected: Vec<_> =
                            model.range(start..=end).map(|(k, v)| (*k, *v)).collect();
                        assert_eq!(owned(result.unwrap()), expected);
                    }
                }

                FuzzOp::RangeByCount { start, count } => {
                    let result = map.range_by_count(&start, count as isize);
                    if count == 0 {
                        assert_eq!(result, Err(Error::ZeroCount));
                    } else {
                        let limit = count.unsigned_abs() as usize;
                        let expected: Vec<_> = if count > 0 {
                            model.range(start..).take(limit).map(|(k, v)| (*k, *v)).collect()
                        } else {
                            model.range(..=start).rev().take(limit).map(|(k, v)| (*k, *v)).collect()
                        };
                        assert_eq!(owned(result.unwrap()), expected);
                    }
                }

                FuzzOp::RangeByIndex { start, count } => {
                    let result = map.range_by_index(start as isize, count as isize);
                    let sorted: Vec<_> = model.iter().map(|(k, v)| (*k, *v)).collect();
                    let len = sorted.len() as isize;
                    let start = start as isize;
                    if count == 0 {
                        assert_eq!(result, Err(Error::ZeroCount));
                    } else if start >= len || start < -len {
                        assert_eq!(
                            result,
                            Err(Error::IndexOutOfRange { index: start, len: sorted.len() })
                        );
                    } else {
                        let position = (if start >= 0 { start } else { len + start }) as usize;
                        let limit = count.unsigned_abs() as usize;
                        let expected: Vec<_> = if count > 0 {
                            sorted[position..].iter().take(limit).copied().collect()
                        } else {
                            sorted[..=position].iter().rev().take(limit).copied().collect()
                        };
                        assert_eq!(owned(result.unwrap()), expected);
                    }
                }
            }

            assert_eq!(map.len(), model.len());
        }

        assert!(map.iter().map(|(k, v)| (*k, *v)).eq(model.iter().map(|(k, v)| (*k, *v))));
    });
}
