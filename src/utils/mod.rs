use rand::Rng;
use std::ops::Range;

/// Generates a plausible fleet-size history for the randomized tests: a
/// random number of entries within `len_range`, each between 1 and `max_fleet`.
pub fn generate_random_epochs(len_range: Range<usize>, max_fleet: usize) -> Vec<usize> {
    let len = rand::thread_rng().gen_range(len_range);
    let mut epochs = Vec::with_capacity(len);
    for _ in 0..len {
        epochs.push(rand::thread_rng().gen_range(1..=max_fleet));
    }
    epochs
}
