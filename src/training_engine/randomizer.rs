use rand::Rng;

/// Uniformly random permutation of `items` (Fisher-Yates).
pub fn shuffle<T, R: Rng + ?Sized>(rng: &mut R, mut items: Vec<T>) -> Vec<T> {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
    items
}

/// `min(n, items.len())` distinct elements, chosen uniformly.
pub fn sample_without_replacement<T: Clone, R: Rng + ?Sized>(
    rng: &mut R,
    items: &[T],
    n: usize,
) -> Vec<T> {
    let take = n.min(items.len());
    let mut pool: Vec<T> = items.to_vec();
    // Partial Fisher-Yates: only the first `take` slots need settling.
    for i in 0..take {
        let j = rng.gen_range(i..pool.len());
        pool.swap(i, j);
    }
    pool.truncate(take);
    pool
}
