//! Round-robin ordering of answer addresses.

/// Uniformly random permutation of `addresses`.
///
/// Fewer than two elements come back as-is. Randomness comes from the
/// thread-local `fastrand` generator, seeded once per thread.
pub fn shuffle<T: Clone>(addresses: &[T]) -> Vec<T> {
    let mut shuffled = addresses.to_vec();
    if shuffled.len() >= 2 {
        fastrand::shuffle(&mut shuffled);
    }
    shuffled
}

/// Same as [`shuffle`] with a caller-supplied generator.
pub fn shuffle_with<T: Clone>(rng: &mut fastrand::Rng, addresses: &[T]) -> Vec<T> {
    let mut shuffled = addresses.to_vec();
    if shuffled.len() >= 2 {
        rng.shuffle(&mut shuffled);
    }
    shuffled
}
