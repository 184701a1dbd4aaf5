use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const MIN_OPACITY_HINT: f64 = 0.05;
pub const OPACITY_HINT_SPREAD: f64 = 0.15;

/// Resting opacities for `n` career lines, each in `[0.05, 0.2)`.
///
/// With a seed the sequence is reproducible; without one it is drawn from OS entropy and varies
/// per render.
pub fn opacity_hints(n: usize, seed: Option<u64>) -> Vec<f64> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    (0..n)
        .map(|_| MIN_OPACITY_HINT + rng.gen_range(0.0..OPACITY_HINT_SPREAD))
        .collect()
}
