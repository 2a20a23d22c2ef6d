//! Randomized, exhaustive-before-repeat dispenser.
//!
//! A `ShufflePool` hands out every item of its original list exactly once per
//! round, in a fresh Fisher–Yates order each round. Nothing stops the last item
//! of one round from being the first of the next.

use rand::Rng;

use crate::error::ProposalError;

#[derive(Debug, Clone)]
pub struct ShufflePool<T> {
    original: Vec<T>,
    pool: Vec<usize>, // indices into `original`, drawn from the back
}

impl<T> ShufflePool<T> {
    /// Builds the pool and performs the initial shuffle. `what` names the pool
    /// in the error when `items` is empty.
    pub fn new<R: Rng + ?Sized>(
        what: &'static str,
        items: Vec<T>,
        rng: &mut R,
    ) -> Result<Self, ProposalError> {
        if items.is_empty() {
            return Err(ProposalError::EmptyPool { what });
        }
        let mut pool = Self {
            original: items,
            pool: Vec::new(),
        };
        pool.shuffle(rng);
        Ok(pool)
    }

    /// Refills the working pool with a uniformly random permutation.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pool.clear();
        self.pool.extend(0..self.original.len());
        for i in (1..self.pool.len()).rev() {
            let j = rng.gen_range(0..=i);
            self.pool.swap(i, j);
        }
    }

    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &T {
        if self.pool.is_empty() {
            self.shuffle(rng);
        }
        // Non-empty: construction rejects empty item lists and shuffle refills to full length.
        let idx = self.pool.pop().unwrap_or(0);
        &self.original[idx]
    }

    pub fn items(&self) -> &[T] {
        &self.original
    }

    /// Items left before the next reshuffle.
    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    pub fn len(&self) -> usize {
        self.original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn empty_items_are_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = ShufflePool::<u8>::new("nothing", Vec::new(), &mut rng).unwrap_err();
        assert!(matches!(err, ProposalError::EmptyPool { what: "nothing" }));
    }

    #[test]
    fn full_round_is_a_permutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let items: Vec<u32> = (0..9).collect();
        let mut pool = ShufflePool::new("digits", items.clone(), &mut rng).unwrap();
        let mut drawn: Vec<u32> = (0..items.len()).map(|_| *pool.next(&mut rng)).collect();
        drawn.sort_unstable();
        assert_eq!(drawn, items);
        assert_eq!(pool.remaining(), 0);
    }

    #[test]
    fn exhausted_pool_reshuffles_on_next_draw() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut pool = ShufflePool::new("pair", vec!['a', 'b'], &mut rng).unwrap();
        pool.next(&mut rng);
        pool.next(&mut rng);
        let third = *pool.next(&mut rng);
        assert!(third == 'a' || third == 'b');
        assert_eq!(pool.remaining(), 1);
    }

    #[test]
    fn single_item_pool_always_returns_it() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut pool = ShufflePool::new("solo", vec!["only"], &mut rng).unwrap();
        for _ in 0..5 {
            assert_eq!(*pool.next(&mut rng), "only");
        }
    }

    #[test]
    fn shuffle_order_varies_between_rounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let items: Vec<u32> = (0..12).collect();
        let mut pool = ShufflePool::new("twelve", items, &mut rng).unwrap();
        let rounds: Vec<Vec<u32>> = (0..4)
            .map(|_| (0..12).map(|_| *pool.next(&mut rng)).collect())
            .collect();
        assert!(rounds.windows(2).any(|w| w[0] != w[1]));
    }
}
