//! Chromosome representation.

use std::fmt;

/// Fitness of a network cost: `1 / (1 + cost)`. Higher is better.
pub fn fitness_from_cost(cost: f64) -> f64 {
    1.0 / (1.0 + cost)
}

/// Inverse of [`fitness_from_cost`]. Infinite for zero fitness.
pub fn cost_from_fitness(fitness: f64) -> f64 {
    if fitness > 0.0 {
        1.0 / fitness - 1.0
    } else {
        f64::INFINITY
    }
}

/// One candidate open/closed configuration.
///
/// Gene `i` is `true` when terminal `i` (in network order) is open.
/// `fitness` is `0.0` until the chromosome has been evaluated.
///
/// # Examples
///
/// ```
/// use u_facility::genetic::Chromosome;
///
/// let c = Chromosome::new(vec![true, false, true]);
/// assert_eq!(c.to_string(), "101");
/// assert_eq!(c.open_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromosome {
    genes: Vec<bool>,
    fitness: f64,
}

impl Chromosome {
    /// Creates an unevaluated chromosome.
    pub fn new(genes: Vec<bool>) -> Self {
        Self {
            genes,
            fitness: 0.0,
        }
    }

    /// Open/closed flags in terminal order.
    pub fn genes(&self) -> &[bool] {
        &self.genes
    }

    /// Number of open terminals.
    pub fn open_count(&self) -> usize {
        self.genes.iter().filter(|&&g| g).count()
    }

    /// `true` if no terminal is open.
    pub fn is_all_closed(&self) -> bool {
        !self.genes.iter().any(|&g| g)
    }

    /// Evaluated fitness.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub(crate) fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &g in &self.genes {
            f.write_str(if g { "1" } else { "0" })?;
        }
        Ok(())
    }
}
