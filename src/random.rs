//! Seeded random sources.
//!
//! Every randomised routine in this crate takes `&mut R where R: Rng`, so
//! runs are reproducible from a single seed.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic RNG from `seed`.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates an RNG from `seed`, or from OS entropy when `None`.
pub fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => create_rng(s),
        None => create_rng(rand::random()),
    }
}
