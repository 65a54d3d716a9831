//! Binary genetic operators.
//!
//! Operators on open/closed bitstrings. Every operator that can produce a
//! chromosome with no open terminal calls [`repair`] before returning, so
//! the population only ever holds configurations with at least one open
//! terminal.
//!
//! - [`random_genes`]: each gene open with probability 1/2
//! - [`uniform_crossover`]: per-gene swap with probability 1/2
//! - [`bit_flip_mutation`]: per-gene flip with probability `rate`

use rand::Rng;

/// Opens one random gene if none is open.
///
/// Returns `true` if the genes were changed. Empty gene vectors are left
/// alone.
pub fn repair<R: Rng>(genes: &mut [bool], rng: &mut R) -> bool {
    if genes.is_empty() || genes.iter().any(|&g| g) {
        return false;
    }
    let idx = rng.random_range(0..genes.len());
    genes[idx] = true;
    true
}

/// Random repaired bitstring of length `n`.
pub fn random_genes<R: Rng>(n: usize, rng: &mut R) -> Vec<bool> {
    let mut genes: Vec<bool> = (0..n).map(|_| rng.random_bool(0.5)).collect();
    repair(&mut genes, rng);
    genes
}

/// Uniform crossover: each position is swapped between the children with
/// probability 1/2. Both children are repaired.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn uniform_crossover<R: Rng>(
    parent1: &[bool],
    parent2: &[bool],
    rng: &mut R,
) -> (Vec<bool>, Vec<bool>) {
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "parents must have equal length"
    );

    let mut child1 = parent1.to_vec();
    let mut child2 = parent2.to_vec();
    for i in 0..child1.len() {
        if rng.random_range(0.0..1.0) < 0.5 {
            std::mem::swap(&mut child1[i], &mut child2[i]);
        }
    }
    repair(&mut child1, rng);
    repair(&mut child2, rng);
    (child1, child2)
}

/// Flips each gene with probability `rate`, then repairs.
pub fn bit_flip_mutation<R: Rng>(genes: &mut [bool], rate: f64, rng: &mut R) {
    for gene in genes.iter_mut() {
        if rng.random_range(0.0..1.0) < rate {
            *gene = !*gene;
        }
    }
    repair(genes, rng);
}
