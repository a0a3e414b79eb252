// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Level assignment for newly inserted nodes.
//!
//! Levels follow a geometric distribution: starting at 1, each further
//! level is taken with probability [`P`], up to [`MAX_LEVEL`]. The random
//! stream is owned by the generator and advanced once per draw.

use rand_core::RngCore;

/// Maximum number of levels a node may participate in.
pub const MAX_LEVEL: usize = 12;

/// Probability of promoting a node one level further.
pub const P: f64 = 0.3;

/// Draws are taken from the low 16 bits of each random word.
const DRAW_MASK: u32 = 0xFFFF;

/// A draw at or below this value promotes the node.
const THRESHOLD: u32 = (P * DRAW_MASK as f64) as u32;

/// Produces node levels from a private random stream.
#[derive(Debug, Clone)]
pub struct LevelGenerator<R> {
    rng: R,
}

impl<R> LevelGenerator<R> {
    pub fn new(rng: R) -> Self {
        LevelGenerator { rng }
    }
}

impl<R: RngCore> LevelGenerator<R> {
    /// Draw a level in `1..=MAX_LEVEL`.
    pub fn next_level(&mut self) -> usize {
        let mut level = 1;
        while level < MAX_LEVEL && (self.rng.next_u32() & DRAW_MASK) <= THRESHOLD {
            level += 1;
        }
        level
    }
}

/// Always yields the same word, for pinning node levels in tests.
#[cfg(test)]
pub(crate) struct Constant(pub(crate) u32);

#[cfg(test)]
impl RngCore for Constant {
    fn next_u32(&mut self) -> u32 {
        self.0
    }

    fn next_u64(&mut self) -> u64 {
        self.0 as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
