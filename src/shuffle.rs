//! Seedable random ordering of small candidate lists.

use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

/// Produces uniformly random permutations with a swap based Fisher-Yates shuffle.
///
/// Every draw comes from one explicit random stream, so two instances built from the same
/// seed hand out identical permutations for identical inputs.
#[derive(Debug, Clone)]
pub struct RandomOrdering<R: Rng = XorShiftRng> {
    rng: R,
}

impl RandomOrdering<XorShiftRng> {
    /// A seeded ordering is reproducible; without a seed the stream is seeded from OS entropy.
    pub fn new(seed: Option<u64>) -> RandomOrdering<XorShiftRng> {
        let rng = match seed {
            Some(s) => XorShiftRng::seed_from_u64(s),
            None => XorShiftRng::from_entropy(),
        };
        RandomOrdering { rng }
    }
}

impl<R: Rng> RandomOrdering<R> {
    pub fn from_rng(rng: R) -> RandomOrdering<R> {
        RandomOrdering { rng }
    }

    /// Walks from the last index down to the first, swapping each slot with a uniformly
    /// drawn index in `[0, i]`.
    pub fn shuffle_slice<T>(&mut self, items: &mut [T]) {
        for i in (0..items.len()).rev() {
            let j = self.rng.gen_range(0..=i);
            items.swap(i, j);
        }
    }

    pub fn shuffle<T, I>(&mut self, items: I) -> Vec<T>
        where I: IntoIterator<Item = T>
    {
        let mut items = items.into_iter().collect::<Vec<T>>();
        self.shuffle_slice(&mut items);
        items
    }

    /// Uniform index in `[0, upper)`. Panics if `upper` is zero.
    #[inline]
    pub fn random_index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }
}
