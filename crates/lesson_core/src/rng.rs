//! crates/lesson_core/src/rng.rs
//!
//! Deterministic random number generator for presentation shuffles.
//!
//! Uses xorshift64 so the same seed produces the same order everywhere. The
//! state is savable: a restored session reuses the persisted order and never
//! re-runs the shuffle under the learner.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRng {
    state: u64,
}

impl SessionRng {
    /// Create a new RNG with the given seed.
    pub fn new(seed: u64) -> Self {
        // xorshift requires a non-zero state
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Restore an RNG from a saved state.
    pub fn from_state(state: u64) -> Self {
        Self::new(state)
    }

    /// The current state, for saving.
    pub fn state(&self) -> u64 {
        self.state
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Shuffle a slice in place (Fisher-Yates).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = (self.next_u64() as usize) % (i + 1);
            slice.swap(i, j);
        }
    }
}

impl Default for SessionRng {
    fn default() -> Self {
        Self::new(0x5eed_1e55_0a11_d0e5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SessionRng::new(42);
        let mut b = SessionRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = SessionRng::new(42);
        let original = vec!["a", "b", "c", "d", "e", "f", "g", "h"];
        let mut shuffled = original.clone();
        rng.shuffle(&mut shuffled);

        let mut sorted = shuffled.clone();
        sorted.sort();
        assert_eq!(sorted, original);
        assert_ne!(shuffled, original);
    }

    #[test]
    fn zero_seed_is_remapped() {
        let mut rng = SessionRng::new(0);
        assert_ne!(rng.next_u64(), 0);
    }
}
