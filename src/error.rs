// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Errors returned by skip map lookups and range queries.

use std::fmt;

/// Error returned when a lookup or range query cannot be answered.
///
/// No operation mutates the map before returning one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The key is not stored in the map.
    KeyNotFound,
    /// A key range whose start is greater than its end.
    InvalidRange,
    /// A count of zero was passed to a count or index query.
    ZeroCount,
    /// The index lies outside `-len..len`.
    IndexOutOfRange { index: isize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::KeyNotFound => write!(f, "key not found"),
            Error::InvalidRange => write!(f, "start key is greater than end key"),
            Error::ZeroCount => write!(f, "count must be non-zero"),
            Error::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for length {}", index, len)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(Error::KeyNotFound.to_string(), "key not found");
        assert_eq!(Error::ZeroCount.to_string(), "count must be non-zero");
        assert_eq!(
            Error::IndexOutOfRange { index: -9, len: 8 }.to_string(),
            "index -9 out of range for length 8"
        );
    }
}
