//! Contract shared by every search strategy.

use std::fmt;

use crate::error::Result;
use crate::models::Network;

/// Before/after cost comparison of an optimization run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Improvement {
    /// Network cost before the run.
    pub initial_cost: f64,
    /// Network cost after the run.
    pub final_cost: f64,
    /// `initial_cost - final_cost`.
    pub absolute_improvement: f64,
    /// Absolute improvement as a percentage of the initial cost.
    ///
    /// Zero when the initial cost is zero.
    pub percentage_improvement: f64,
}

impl Improvement {
    /// Derives the improvement figures from the two costs.
    pub fn new(initial_cost: f64, final_cost: f64) -> Self {
        let absolute_improvement = initial_cost - final_cost;
        let percentage_improvement = if initial_cost != 0.0 {
            absolute_improvement / initial_cost * 100.0
        } else {
            0.0
        };
        Self {
            initial_cost,
            final_cost,
            absolute_improvement,
            percentage_improvement,
        }
    }
}

impl fmt::Display for Improvement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Initial cost:   {:>14.2}", self.initial_cost)?;
        writeln!(f, "Final cost:     {:>14.2}", self.final_cost)?;
        writeln!(f, "Improvement:    {:>14.2}", self.absolute_improvement)?;
        write!(f, "Improvement %:  {:>13.2}%", self.percentage_improvement)
    }
}

/// Result record returned by [`Optimizer::optimize`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizationResult {
    /// Network cost before the run.
    pub initial_cost: f64,
    /// Network cost after the run.
    pub final_cost: f64,
    /// `initial_cost - final_cost`.
    pub absolute_improvement: f64,
    /// Absolute improvement as a percentage of the initial cost.
    pub percentage_improvement: f64,
    /// Search passes (coordinate search) or generations (genetic search).
    pub iterations: usize,
}

impl OptimizationResult {
    /// Builds a result from the two costs and the iteration count.
    pub fn new(initial_cost: f64, final_cost: f64, iterations: usize) -> Self {
        let improvement = Improvement::new(initial_cost, final_cost);
        Self {
            initial_cost,
            final_cost,
            absolute_improvement: improvement.absolute_improvement,
            percentage_improvement: improvement.percentage_improvement,
            iterations,
        }
    }

    /// The cost comparison without the iteration count.
    pub fn improvement(&self) -> Improvement {
        Improvement {
            initial_cost: self.initial_cost,
            final_cost: self.final_cost,
            absolute_improvement: self.absolute_improvement,
            percentage_improvement: self.percentage_improvement,
        }
    }
}

impl fmt::Display for OptimizationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.improvement())?;
        write!(f, "Iterations:     {:>14}", self.iterations)
    }
}

/// A search strategy that improves a [`Network`] in place.
///
/// Implementations hold exclusive mutable access to their network for
/// their whole lifetime, so two optimizers can never interleave trial
/// mutations on the same network.
pub trait Optimizer {
    /// Short human-readable name of the strategy.
    fn name(&self) -> &'static str;

    /// Runs the search and leaves the network in the best configuration found.
    fn optimize(&mut self) -> Result<OptimizationResult>;

    /// Cost comparison of the last run, `None` before [`optimize`](Self::optimize).
    fn improvement(&self) -> Option<Improvement>;

    /// The network being optimized.
    fn network(&self) -> &Network;

    /// Printable summary of the last run.
    fn report(&self) -> String {
        match self.improvement() {
            Some(improvement) => format!("{}\n{}", self.name(), improvement),
            None => format!("{}: optimization has not run yet", self.name()),
        }
    }
}
