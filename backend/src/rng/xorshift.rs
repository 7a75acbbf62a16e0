//! xorshift64* random number generator
//!
//! Fast, high-quality PRNG used for the bounded speed perturbation.
//! Deterministic: same seed, same noise sequence, which keeps simulation
//! trajectories reproducible for debugging and regression tests. No
//! particular noise sequence is part of the system contract.

use serde::{Deserialize, Serialize};

/// Deterministic noise source using xorshift64*
///
/// # Example
/// ```
/// use motor_sim_core_rs::NoiseRng;
///
/// let mut rng = NoiseRng::new(12345);
/// let noise = rng.uniform(0.5);
/// assert!(noise >= -0.5 && noise < 0.5);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseRng {
    /// Internal state (64-bit)
    state: u64,
}

impl NoiseRng {
    /// Create a new RNG with given seed
    pub fn new(seed: u64) -> Self {
        // Zero state is a fixed point of xorshift
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u64 value
    pub fn next_u64(&mut self) -> u64 {
        // xorshift64* algorithm
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate random f64 in range [0.0, 1.0)
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next_u64();
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Generate a bounded perturbation, uniform in [-max, +max)
    ///
    /// # Panics
    /// Panics if `max` is negative
    pub fn uniform(&mut self, max: f64) -> f64 {
        assert!(max >= 0.0, "noise bound must be non-negative");
        (self.next_f64() * 2.0 - 1.0) * max
    }

    /// Current RNG state (for snapshotting)
    pub fn state(&self) -> u64 {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_converted_to_nonzero() {
        let rng = NoiseRng::new(0);
        assert_ne!(rng.state(), 0, "Zero seed should be converted to 1");
    }

    #[test]
    fn test_deterministic_sequence() {
        let mut a = NoiseRng::new(99999);
        let mut b = NoiseRng::new(99999);
        for _ in 0..100 {
            assert_eq!(a.next_f64(), b.next_f64(), "sequence not deterministic");
        }
    }

    #[test]
    fn test_uniform_stays_in_bounds() {
        let mut rng = NoiseRng::new(12345);
        for _ in 0..1000 {
            let value = rng.uniform(0.5);
            assert!(
                (-0.5..0.5).contains(&value),
                "uniform(0.5) produced {} outside [-0.5, 0.5)",
                value
            );
        }
    }

    #[test]
    #[should_panic(expected = "noise bound must be non-negative")]
    fn test_negative_bound_panics() {
        let mut rng = NoiseRng::new(12345);
        rng.uniform(-1.0);
    }
}
