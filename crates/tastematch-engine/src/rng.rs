//! Injectable randomness for the narrative generator.

use rand::Rng;

/// Source of random picks.
///
/// Production wiring supplies [`ThreadRngSource`]; tests supply a
/// fixed-sequence stub so narrative output is deterministic.
pub trait RandomSource {
    /// Pick an index in `0..len`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Thread-local RNG-backed source.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn pick(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Cycles through a fixed sequence of picks, clamped to range.
#[derive(Debug, Clone)]
pub struct FixedSource {
    picks: Vec<usize>,
    next: usize,
}

impl FixedSource {
    pub const fn new(picks: Vec<usize>) -> Self {
        Self { picks, next: 0 }
    }
}

impl RandomSource for FixedSource {
    fn pick(&mut self, len: usize) -> usize {
        let value = self.picks.get(self.next).copied().unwrap_or(0);
        self.next = (self.next + 1) % self.picks.len().max(1);
        value.min(len.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_rng_in_range() {
        let mut source = ThreadRngSource;
        for _ in 0..100 {
            assert!(source.pick(6) < 6);
        }
    }

    #[test]
    fn test_fixed_source_cycles_and_clamps() {
        let mut source = FixedSource::new(vec![0, 5, 2]);
        assert_eq!(source.pick(6), 0);
        assert_eq!(source.pick(3), 2); // clamped from 5
        assert_eq!(source.pick(6), 2);
        assert_eq!(source.pick(6), 0); // wrapped
    }
}
