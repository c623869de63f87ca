//! RNG oracle for reproducible random choices.
//!
//! The policy draws random directions when it explores blindly or breaks out
//! of a stuck or oscillating pattern. Draws are keyed by a seed derived from
//! the episode seed and the tick number, so the same episode seed replays the
//! same decisions.

/// Deterministic random source: the same seed always yields the same value.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Pick one element of a non-empty slice.
    ///
    /// Returns `None` only for an empty slice.
    fn choose<T: Copy>(&self, seed: u64, options: &[T]) -> Option<T>
    where
        Self: Sized,
    {
        if options.is_empty() {
            return None;
        }
        let index = self.next_u32(seed) as usize % options.len();
        Some(options[index])
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 32-bit output from 64-bit state. A single LCG step
/// followed by the permutation gives well-mixed output for sequential seeds.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output: xorshift high bits, then a data-dependent rotation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Compute a draw seed from the episode seed, the tick and a draw context.
///
/// Use distinct `context` values when one tick needs more than one draw.
pub fn compute_seed(episode_seed: u64, tick: u64, context: u32) -> u64 {
    let mut seed = episode_seed;
    seed = seed.wrapping_mul(31).wrapping_add(tick);
    seed = seed.wrapping_mul(31).wrapping_add(context as u64);
    PcgRng::pcg_step(seed)
}
