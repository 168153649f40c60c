use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rand_xoshiro::Xoshiro256StarStar;

/// Seedable random source owned by one simulator.
///
/// Every stochastic decision of a sequence is drawn from here, so two simulators built from the
/// same seed, templates and configuration produce byte-identical output.
#[derive(Clone, Debug)]
pub struct SceneRng {
    rng: Xoshiro256StarStar,
}

impl SceneRng {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            rng: Xoshiro256StarStar::seed_from_u64(seed),
        }
    }

    /// Uniform in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform in `[lo, hi]`. Callers guarantee `lo <= hi`.
    pub fn uniform_range(&mut self, lo: f64, hi: f64) -> f64 {
        if lo >= hi {
            return lo;
        }
        self.rng.random_range(lo..=hi)
    }

    /// Uniform integer in `[0, len)`; `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    pub fn coin(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    pub fn gauss(&mut self, mean: f64, sigma: f64) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        mean + z * sigma
    }

    /// Single-precision standard normal, used by the per-pixel noise passes.
    pub fn standard_normal_f32(&mut self) -> f32 {
        self.rng.sample(StandardNormal)
    }

    /// Derive an independent seed for stream `stream` (e.g. one dataset split) from `base`.
    pub fn derive_seed(base: u64, stream: u64) -> u64 {
        mix64(base ^ mix64(stream.wrapping_add(0x9E37_79B9_7F4A_7C15)))
    }
}

fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
