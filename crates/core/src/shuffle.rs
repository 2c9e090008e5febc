use rand::Rng;

/// Permutes `items` in place, every ordering equally likely (Fisher–Yates).
///
/// Walks from the last element down to the second, swapping each with an
/// element drawn uniformly from `0..=i`.
pub fn shuffle_in_place<T, R>(items: &mut [T], rng: &mut R)
where
    R: Rng + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Owned variant of [`shuffle_in_place`] that hands the permuted vector back.
#[must_use]
pub fn shuffle<T, R>(mut items: Vec<T>, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
{
    shuffle_in_place(&mut items, rng);
    items
}
