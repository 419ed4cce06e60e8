//! Seeded randomness for battles.
//!
//! Relics that pick "a random enemy" must replay identically from a save, so
//! every draw comes from one ChaCha8 stream owned by the `BattleState`.
//! Nothing in the engine touches thread-local randomness.
//!
//! ```
//! use relic_engine::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.roll(6), b.roll(6));
//! assert_eq!(a.roll(0), None);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// The battle's random stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    stream: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            stream: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `0..sides`, or `None` when there is nothing to roll.
    pub fn roll(&mut self, sides: usize) -> Option<usize> {
        (sides > 0).then(|| self.stream.gen_range(0..sides))
    }

    /// Uniformly pick one of `items`. Consumes a draw only when `items` is
    /// non-empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.roll(items.len()).map(|i| &items[i])
    }

    /// Position in the stream, for snapshots.
    #[must_use]
    pub fn checkpoint(&self) -> RngCheckpoint {
        RngCheckpoint {
            seed: self.seed,
            word_pos: self.stream.get_word_pos(),
        }
    }

    /// Resume a stream at a saved position.
    #[must_use]
    pub fn resume(checkpoint: &RngCheckpoint) -> Self {
        let mut stream = ChaCha8Rng::seed_from_u64(checkpoint.seed);
        stream.set_word_pos(checkpoint.word_pos);
        Self {
            stream,
            seed: checkpoint.seed,
        }
    }
}

/// Saved stream position: the seed plus the ChaCha word offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngCheckpoint {
    pub seed: u64,
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_rolls() {
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(42);
        let left: Vec<_> = (0..64).map(|_| a.roll(10)).collect();
        let right: Vec<_> = (0..64).map(|_| b.roll(10)).collect();
        assert_eq!(left, right);
        assert!(left.iter().all(|r| r.is_some_and(|i| i < 10)));
    }

    #[test]
    fn test_pick_from_empty_does_not_draw() {
        let mut rng = GameRng::new(3);
        let before = rng.checkpoint();
        let none: [u8; 0] = [];
        assert!(rng.pick(&none).is_none());
        assert_eq!(rng.checkpoint(), before);

        let units = ['a', 'b', 'c'];
        assert!(rng.pick(&units).is_some_and(|c| units.contains(c)));
    }

    #[test]
    fn test_resume_continues_stream() {
        let mut rng = GameRng::new(9);
        for _ in 0..20 {
            rng.roll(100);
        }
        let saved = rng.checkpoint();
        let expected: Vec<_> = (0..8).map(|_| rng.roll(100)).collect();

        let mut resumed = GameRng::resume(&saved);
        let actual: Vec<_> = (0..8).map(|_| resumed.roll(100)).collect();
        assert_eq!(expected, actual);
        assert_eq!(resumed.seed(), 9);
    }
}
