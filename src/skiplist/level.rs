use rand::Rng;

/// Draw the level for a new node.
///
/// Start at 1 and flip a fair coin: each head adds a level, the first tail
/// stops. The draw never exceeds `max_level`, so P(level = k) is about 2^-k
/// and the expected height is constant. No rebalancing is ever needed, the
/// random heights alone keep search at O(log n) in expectation.
pub(crate) fn random_level<R: Rng + ?Sized>(rng: &mut R, max_level: usize) -> usize {
    let mut level = 1;
    while level < max_level && rng.gen_bool(0.5) {
        level += 1;
    }
    level.min(max_level)
}
