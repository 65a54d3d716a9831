//! Tournament selection.
//!
//! Fitness here is maximized: the tournament returns the contestant with
//! the highest fitness.

use rand::seq::index;
use rand::Rng;

use super::types::Chromosome;

/// Picks `k` distinct individuals at random and returns the index of the
/// fittest.
///
/// `k` is clamped to `1..=population.len()`. Among equally fit
/// contestants the one drawn first wins.
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<R: Rng>(population: &[Chromosome], k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );

    let n = population.len();
    let k = k.clamp(1, n);

    let mut contestants = index::sample(rng, n, k).into_iter();
    let mut best = contestants.next().unwrap_or(0);
    for idx in contestants {
        if population[idx].fitness() > population[best].fitness() {
            best = idx;
        }
    }
    best
}
