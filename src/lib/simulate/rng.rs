//! Seeded RNG creation for reproducible simulations.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Creates a random number generator, seeded for reproducibility when `seed` is given and
/// from OS entropy otherwise.
///
/// # Examples
///
/// ```
/// use fgpile_lib::simulate::create_rng;
///
/// let mut rng1 = create_rng(Some(42));
/// let mut rng2 = create_rng(Some(42));
/// // rng1 and rng2 produce identical sequences
/// ```
#[must_use]
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}
