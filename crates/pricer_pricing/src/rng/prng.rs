//! Pseudo-random number generator wrapper for Monte Carlo simulations.
//!
//! This module provides [`PricerRng`], a seeded PRNG wrapper that offers
//! reproducible random number generation, per-path stream derivation and
//! efficient batch operations.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Golden-ratio increment of the SplitMix64 sequence.
const SPLITMIX_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64 finaliser: a bijective 64-bit mixer.
#[inline]
fn splitmix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Monte Carlo simulation random number generator.
///
/// Provides seeded, reproducible random number generation with efficient
/// batch operations for uniform and normal distributions.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::PricerRng;
///
/// let mut rng = PricerRng::from_seed(42);
///
/// // Single value generation
/// let u: f64 = rng.gen_uniform();
/// let n: f64 = rng.gen_normal();
///
/// // Batch generation (zero allocation)
/// let mut buffer = vec![0.0; 100];
/// rng.fill_normal(&mut buffer);
/// ```
#[derive(Debug, Clone)]
pub struct PricerRng {
    /// The underlying PRNG instance.
    inner: StdRng,
    /// The seed used for initialisation (stored for reproducibility tracking).
    seed: u64,
}

impl PricerRng {
    /// Creates a new RNG instance initialised with the given seed.
    ///
    /// The same seed will always produce the same sequence of random numbers,
    /// enabling reproducible Monte Carlo simulations.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_pricing::rng::PricerRng;
    ///
    /// let mut rng1 = PricerRng::from_seed(12345);
    /// let mut rng2 = PricerRng::from_seed(12345);
    ///
    /// // Same seed produces identical sequences
    /// assert_eq!(rng1.gen_uniform(), rng2.gen_uniform());
    /// ```
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates an RNG seeded from operating-system entropy.
    ///
    /// The drawn seed is still recorded and available via [`PricerRng::seed`].
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    /// Creates the generator of one simulated path.
    ///
    /// The stream seed is a SplitMix64 mix of the run seed and the path
    /// index, so neighbouring paths draw statistically unrelated sequences
    /// and a path's draws do not depend on which worker thread runs it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_pricing::rng::PricerRng;
    ///
    /// let mut a = PricerRng::for_path(42, 0);
    /// let mut b = PricerRng::for_path(42, 0);
    /// let mut c = PricerRng::for_path(42, 1);
    ///
    /// let first = a.gen_uniform();
    /// assert_eq!(first, b.gen_uniform());
    /// assert_ne!(first, c.gen_uniform());
    /// ```
    #[inline]
    pub fn for_path(base_seed: u64, path_index: u64) -> Self {
        let stream = splitmix64(base_seed ^ path_index.wrapping_add(1).wrapping_mul(SPLITMIX_GAMMA));
        Self::from_seed(stream)
    }

    /// Returns the seed used for initialisation.
    ///
    /// This is useful for logging and debugging reproducibility issues.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates a single uniform random value in [0, 1).
    #[inline]
    pub fn gen_uniform(&mut self) -> f64 {
        self.inner.gen()
    }

    /// Generates a single standard normal variate (mean=0, std=1).
    ///
    /// Uses the ZIGNOR Ziggurat algorithm via `rand_distr::StandardNormal`.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Generates a pair of independent standard normal variates.
    #[inline]
    pub fn gen_normal_pair(&mut self) -> (f64, f64) {
        (self.gen_normal(), self.gen_normal())
    }

    /// Fills the buffer with standard normal (mean=0, std=1) variates.
    ///
    /// This is a zero-allocation operation; the buffer must be pre-allocated
    /// by the caller. Empty buffers are handled gracefully (no operation).
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut self.inner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_recorded() {
        assert_eq!(PricerRng::from_seed(42).seed(), 42);
    }

    #[test]
    fn test_entropy_seed_replays() {
        let mut drawn = PricerRng::from_entropy();
        let mut replay = PricerRng::from_seed(drawn.seed());
        for _ in 0..8 {
            assert_eq!(drawn.gen_uniform(), replay.gen_uniform());
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PricerRng::from_seed(7);
        let mut b = PricerRng::from_seed(7);
        for _ in 0..100 {
            assert_eq!(a.gen_normal(), b.gen_normal());
        }
    }

    #[test]
    fn test_uniform_range() {
        let mut rng = PricerRng::from_seed(3);
        for _ in 0..10_000 {
            let u = rng.gen_uniform();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_normal_moments() {
        let mut rng = PricerRng::from_seed(11);
        let mut buffer = vec![0.0; 100_000];
        rng.fill_normal(&mut buffer);

        let n = buffer.len() as f64;
        let mean = buffer.iter().sum::<f64>() / n;
        let var = buffer.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
        assert!(mean.abs() < 0.02, "mean = {}", mean);
        assert!((var - 1.0).abs() < 0.02, "variance = {}", var);
    }

    #[test]
    fn test_fill_normal_empty_buffer() {
        let mut rng = PricerRng::from_seed(1);
        let mut buffer: Vec<f64> = Vec::new();
        rng.fill_normal(&mut buffer);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_path_streams_are_distinct_and_reproducible() {
        let seeds: Vec<u64> = (0..1000).map(|i| PricerRng::for_path(99, i).seed()).collect();
        let mut unique = seeds.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), seeds.len());

        assert_eq!(PricerRng::for_path(99, 5).seed(), seeds[5]);
        assert_ne!(PricerRng::for_path(100, 5).seed(), seeds[5]);
    }

    #[test]
    fn test_neighbouring_paths_are_uncorrelated() {
        let n = 20_000;
        let xs: Vec<f64> = (0..n).map(|i| PricerRng::for_path(1, i).gen_normal()).collect();
        let ys: Vec<f64> = (0..n).map(|i| PricerRng::for_path(1, i + 1).gen_normal()).collect();
        let corr = xs.iter().zip(&ys).map(|(x, y)| x * y).sum::<f64>() / n as f64;
        assert!(corr.abs() < 0.05, "correlation = {}", corr);
    }

    #[test]
    fn test_splitmix_is_not_identity() {
        assert_ne!(splitmix64(1), 1);
        assert_ne!(splitmix64(1), splitmix64(2));
    }
}
