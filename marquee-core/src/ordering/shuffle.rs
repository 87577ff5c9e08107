use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded Fisher-Yates shuffle, walking from the last index down.
///
/// Identical `(input order, seed)` always produces the identical
/// permutation; nothing is dropped, duplicated, or introduced.
pub fn seeded_shuffle<T>(items: &mut [T], seed: i64) {
    if items.len() < 2 {
        return;
    }

    let mut rng = StdRng::seed_from_u64(seed as u64);
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}
