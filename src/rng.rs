use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{Bounds, Quantity};

/// Seedable stream of uniform integers owned by a single [Generator](crate::Generator).
///
/// Each generator holds its own source, hence two generators seeded with the same value and
/// driven with the same calls produce identical instances regardless of any other random
/// consumers in the process.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Source initialized from system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Source initialized from given `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Re-initialize the stream iff `seed` is set to a non-zero value.
    ///
    /// `None` and `Some(0)` leave the current stream untouched.
    ///
    /// ## Example
    /// ```
    /// # extern crate lotsizing;
    /// use lotsizing::{Bounds, RandomSource};
    ///
    /// let bounds = Bounds::new(0u64, 1_000_000).unwrap();
    ///
    /// let mut a = RandomSource::seeded(7);
    /// let mut b = RandomSource::seeded(7);
    /// b.seed(None);
    /// b.seed(Some(0));
    ///
    /// assert_eq!(a.sample_vec(&bounds, 8), b.sample_vec(&bounds, 8));
    /// ```
    pub fn seed(&mut self, seed: Option<u64>) {
        if let Some(seed) = seed.filter(|&s| s != 0) {
            self.rng = StdRng::seed_from_u64(seed);
        }
    }

    /// Draw a single value uniformly from `bounds`.
    #[inline]
    pub fn sample<T: Quantity>(&mut self, bounds: &Bounds<T>) -> T {
        bounds.distribution().sample(&mut self.rng)
    }

    /// Draw `n` independent values uniformly from `bounds`.
    pub fn sample_vec<T: Quantity>(&mut self, bounds: &Bounds<T>, n: usize) -> Vec<T> {
        bounds
            .distribution()
            .sample_iter(&mut self.rng)
            .take(n)
            .collect()
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    const NUM_TRIALS: usize = 100;

    #[rstest]
    #[case(1, 6)]
    #[case(0, 4)]
    #[case(3, 3)]
    fn samples_within_bounds(#[case] lower: u32, #[case] upper: u32) {
        let bounds = Bounds::new(lower, upper).unwrap();
        let mut source = RandomSource::from_entropy();

        for x in source.sample_vec(&bounds, NUM_TRIALS) {
            assert!(lower <= x && x <= upper);
        }
    }

    #[test]
    fn same_seed_same_stream() {
        let bounds = Bounds::new(0i64, 1_000).unwrap();
        let mut a = RandomSource::seeded(42);
        let mut b = RandomSource::from_entropy();
        b.seed(Some(42));
        assert_eq!(a.sample_vec(&bounds, NUM_TRIALS), b.sample_vec(&bounds, NUM_TRIALS));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(0))]
    fn falsy_seed_is_noop(#[case] seed: Option<u64>) {
        let bounds = Bounds::new(0u64, u64::MAX).unwrap();
        let mut a = RandomSource::seeded(3);
        let _ = a.sample(&bounds);

        let mut b = a.clone();
        b.seed(seed);

        assert_eq!(a.sample_vec(&bounds, NUM_TRIALS), b.sample_vec(&bounds, NUM_TRIALS));
    }

    #[test]
    fn reseeding_restarts_stream() {
        let bounds = Bounds::new(0u64, u64::MAX).unwrap();
        let mut source = RandomSource::seeded(11);
        let first = source.sample_vec(&bounds, 4);
        source.seed(Some(11));
        assert_eq!(source.sample_vec(&bounds, 4), first);
    }
}
