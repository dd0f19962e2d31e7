//! No-repeat frame ordering
//!
//! Keeps a shuffled permutation of catalog indices and a cursor into it.
//! Walking the permutation hands out every index exactly once; when it is
//! exhausted a fresh shuffle starts the next cycle. Nothing prevents the
//! last frame of one cycle and the first of the next from coinciding -
//! that is accepted, the guarantee is only no-repeat within a cycle.

use crate::traits::{RandomError, RandomSource};

/// Errors from sequencer operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerError {
    /// The catalog has no frames to sequence
    EmptyCatalog,
    /// The random source failed; the previous order is left in place
    Entropy(RandomError),
}

impl From<RandomError> for SequencerError {
    fn from(err: RandomError) -> Self {
        SequencerError::Entropy(err)
    }
}

/// Fisher-Yates sequencer over a catalog of `N` frames
///
/// Frame indices are stored as `u8`, which caps the catalog at 256
/// entries; the bound is enforced at compile time, so growing the catalog
/// past it is a build error rather than a silent truncation.
pub struct Sequencer<const N: usize> {
    /// Current display order, a permutation of `0..N`
    order: [u8; N],
    /// Next position in `order` to hand out, in `[0, N]`
    cursor: usize,
}

impl<const N: usize> Default for Sequencer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Sequencer<N> {
    const INDEX_FITS_U8: () = assert!(N <= 256, "frame indices are stored as u8");

    /// Create a sequencer in the exhausted state
    ///
    /// The first `next` call (or an explicit `reshuffle`) establishes the
    /// first random order; no index is handed out before that.
    pub fn new() -> Self {
        // Evaluating the associated const rejects oversized catalogs at
        // compile time.
        let () = Self::INDEX_FITS_U8;

        let mut order = [0u8; N];
        for (i, slot) in order.iter_mut().enumerate() {
            *slot = i as u8;
        }
        Self { order, cursor: N }
    }

    /// Rebuild the display order as a fresh uniform permutation
    ///
    /// Identity order first, then a Fisher-Yates pass: each position from
    /// the top down is swapped with a uniformly drawn position at or below
    /// it, so all N! orderings are equally likely given a uniform source.
    /// The cursor resets to 0. On a failed draw the previous order and
    /// cursor are left untouched.
    pub fn reshuffle<R>(&mut self, rng: &mut R) -> Result<(), SequencerError>
    where
        R: RandomSource + ?Sized,
    {
        let mut order = [0u8; N];
        for (i, slot) in order.iter_mut().enumerate() {
            *slot = i as u8;
        }
        // Position 0 has nothing below it, so the loop stops at 1. For
        // N <= 1 there is nothing to do and no randomness is consumed.
        for i in (1..N).rev() {
            let j = rng.uniform(i as u8)? as usize;
            order.swap(i, j);
        }
        self.order = order;
        self.cursor = 0;
        Ok(())
    }

    /// Hand out the next frame index
    ///
    /// Reshuffles first when the current order is exhausted. Within one
    /// cycle every catalog index is returned exactly once; cycle
    /// boundaries are invisible to the caller beyond that guarantee.
    pub fn next<R>(&mut self, rng: &mut R) -> Result<u8, SequencerError>
    where
        R: RandomSource + ?Sized,
    {
        if N == 0 {
            return Err(SequencerError::EmptyCatalog);
        }
        if self.cursor >= N {
            self.reshuffle(rng)?;
        }
        let index = self.order[self.cursor];
        self.cursor += 1;
        Ok(index)
    }

    /// Position of the next hand-out within the current order
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True when every index of the current order has been handed out
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= N
    }

    /// Catalog size
    pub const fn len(&self) -> usize {
        N
    }

    /// True for the degenerate zero-frame catalog
    pub const fn is_empty(&self) -> bool {
        N == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic xorshift64 source for repeatable shuffles
    struct SeededRandom {
        state: u64,
    }

    impl SeededRandom {
        fn new(seed: u64) -> Self {
            // xorshift state must be nonzero
            Self {
                state: seed.max(1),
            }
        }
    }

    impl RandomSource for SeededRandom {
        fn next_u32(&mut self) -> Result<u32, RandomError> {
            self.state ^= self.state << 13;
            self.state ^= self.state >> 7;
            self.state ^= self.state << 17;
            Ok((self.state >> 32) as u32)
        }
    }

    /// Source that fails on every draw
    struct DeadRandom;

    impl RandomSource for DeadRandom {
        fn next_u32(&mut self) -> Result<u32, RandomError> {
            Err(RandomError::Unavailable)
        }
    }

    /// Source that counts draws on the way through
    struct CountingRandom {
        inner: SeededRandom,
        draws: usize,
    }

    impl CountingRandom {
        fn new(seed: u64) -> Self {
            Self {
                inner: SeededRandom::new(seed),
                draws: 0,
            }
        }
    }

    impl RandomSource for CountingRandom {
        fn next_u32(&mut self) -> Result<u32, RandomError> {
            self.draws += 1;
            self.inner.next_u32()
        }
    }

    fn is_permutation(values: &[u8], n: usize) -> bool {
        if values.len() != n {
            return false;
        }
        let mut seen = [false; 256];
        values.iter().all(|&v| {
            let v = v as usize;
            v < n && !core::mem::replace(&mut seen[v], true)
        })
    }

    fn collect_cycle<const N: usize>(
        seq: &mut Sequencer<N>,
        rng: &mut impl RandomSource,
    ) -> [u8; N] {
        let mut cycle = [0u8; N];
        for slot in cycle.iter_mut() {
            *slot = seq.next(rng).unwrap();
        }
        cycle
    }

    #[test]
    fn test_new_starts_exhausted() {
        let seq = Sequencer::<30>::new();
        assert!(seq.is_exhausted());
        assert_eq!(seq.cursor(), 30);
        assert_eq!(seq.len(), 30);
    }

    #[test]
    fn test_reshuffle_yields_permutation() {
        let mut seq = Sequencer::<30>::new();
        let mut rng = SeededRandom::new(1);

        seq.reshuffle(&mut rng).unwrap();
        assert_eq!(seq.cursor(), 0);
        assert!(is_permutation(&seq.order, 30));
    }

    #[test]
    fn test_full_cycle_returns_each_index_once() {
        let mut seq = Sequencer::<30>::new();
        let mut rng = SeededRandom::new(7);

        let cycle = collect_cycle(&mut seq, &mut rng);
        assert!(is_permutation(&cycle, 30));
        assert!(seq.is_exhausted());
    }

    #[test]
    fn test_exhaustion_triggers_exactly_one_reshuffle() {
        let mut seq = Sequencer::<30>::new();
        let mut rng = SeededRandom::new(99);

        let first_cycle = collect_cycle(&mut seq, &mut rng);
        assert!(is_permutation(&first_cycle, 30));

        // The N+1th call reshuffles internally and consumes position 0 of
        // the new order, leaving the cursor at 1.
        let next = seq.next(&mut rng).unwrap();
        assert!((next as usize) < 30);
        assert_eq!(seq.cursor(), 1);
    }

    #[test]
    fn test_small_catalogs_permute() {
        let mut rng = SeededRandom::new(3);

        let mut seq2 = Sequencer::<2>::new();
        assert!(is_permutation(&collect_cycle(&mut seq2, &mut rng), 2));

        let mut seq3 = Sequencer::<3>::new();
        assert!(is_permutation(&collect_cycle(&mut seq3, &mut rng), 3));

        let mut seq8 = Sequencer::<8>::new();
        assert!(is_permutation(&collect_cycle(&mut seq8, &mut rng), 8));
    }

    #[test]
    fn test_single_frame_needs_no_randomness() {
        let mut seq = Sequencer::<1>::new();
        let mut rng = CountingRandom::new(11);

        // Repeated exhaustion and reshuffle, always the sole index, and
        // never a draw from the source.
        for _ in 0..5 {
            assert_eq!(seq.next(&mut rng).unwrap(), 0);
        }
        assert_eq!(rng.draws, 0);
    }

    #[test]
    fn test_empty_catalog_errors_instead_of_looping() {
        let mut seq = Sequencer::<0>::new();
        let mut rng = SeededRandom::new(5);

        for _ in 0..3 {
            assert_eq!(seq.next(&mut rng), Err(SequencerError::EmptyCatalog));
        }
        assert!(seq.is_empty());
    }

    #[test]
    fn test_entropy_failure_leaves_state_untouched() {
        let mut seq = Sequencer::<4>::new();
        let mut good = SeededRandom::new(21);
        let cycle = collect_cycle(&mut seq, &mut good);
        assert!(is_permutation(&cycle, 4));

        // Exhausted, so the next call wants a reshuffle; the dead source
        // fails it and the sequencer stays exhausted.
        let mut dead = DeadRandom;
        assert_eq!(
            seq.next(&mut dead),
            Err(SequencerError::Entropy(RandomError::Unavailable))
        );
        assert!(seq.is_exhausted());

        // A working source afterwards recovers cleanly.
        let next_cycle = collect_cycle(&mut seq, &mut good);
        assert!(is_permutation(&next_cycle, 4));
    }

    #[test]
    fn test_consecutive_cycles_differ() {
        let mut seq = Sequencer::<30>::new();
        let mut rng = SeededRandom::new(1234);

        let first = collect_cycle(&mut seq, &mut rng);
        let second = collect_cycle(&mut seq, &mut rng);
        assert!(is_permutation(&second, 30));
        assert_ne!(first, second);
    }

    #[test]
    fn test_shuffle_positions_are_roughly_uniform() {
        // Chi-square goodness of fit on the occupant of position 0 over
        // many reshuffles. Expected count per frame is RESHUFFLES / 30;
        // the bound is far above the 99.9th percentile for 29 degrees of
        // freedom, so only a broken shuffle or source fails it.
        const RESHUFFLES: usize = 3000;
        let mut seq = Sequencer::<30>::new();
        let mut rng = SeededRandom::new(0xD1CE);
        let mut counts = [0u32; 30];

        for _ in 0..RESHUFFLES {
            seq.reshuffle(&mut rng).unwrap();
            counts[seq.order[0] as usize] += 1;
        }

        let expected = RESHUFFLES as f64 / 30.0;
        let chi2: f64 = counts
            .iter()
            .map(|&c| {
                let d = c as f64 - expected;
                d * d / expected
            })
            .sum();
        assert!(chi2 < 100.0, "chi-square {} too large", chi2);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_reshuffle_is_permutation(seed in any::<u64>()) {
                let mut seq = Sequencer::<30>::new();
                let mut rng = SeededRandom::new(seed);
                seq.reshuffle(&mut rng).unwrap();
                prop_assert!(is_permutation(&seq.order, 30));
            }

            #[test]
            fn prop_cycle_is_permutation(seed in any::<u64>()) {
                let mut seq = Sequencer::<12>::new();
                let mut rng = SeededRandom::new(seed);
                let cycle = collect_cycle(&mut seq, &mut rng);
                prop_assert!(is_permutation(&cycle, 12));
            }
        }
    }
}
