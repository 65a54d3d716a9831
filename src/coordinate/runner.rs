//! Coordinate search execution.
//!
//! # Algorithm
//!
//! 1. Build the candidate location grid once.
//! 2. **Relocation passes**: for each open terminal in order, try every
//!    candidate location (reassigning consumers and re-pricing the network
//!    each time) and move it to the cheapest one if that beats the cost
//!    before the trials. Stop when a pass saves less than `tolerance` or
//!    after `max_passes`.
//! 3. **Shutdown rounds**: tentatively close each open terminal; keep it
//!    closed only when the network gets strictly cheaper. Stop after a
//!    round that closes nothing.
//!
//! Every accepted move strictly lowers the cost, so the final cost never
//! exceeds the initial one. The search is deterministic.

use tracing::{debug, info, trace};

use super::candidates::candidate_locations;
use super::config::CoordinateConfig;
use crate::cost::CostModel;
use crate::error::{FacilityError, Result};
use crate::models::{EntityId, Network, Point};
use crate::optimizer::{Improvement, OptimizationResult, Optimizer};

/// Details of a coordinate search run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordinateOutcome {
    /// Headline result; `iterations` is the number of relocation passes.
    pub result: OptimizationResult,

    /// Number of candidate locations tried per terminal.
    pub candidate_count: usize,

    /// Network cost after each relocation pass.
    pub pass_history: Vec<f64>,

    /// Shutdown rounds executed.
    pub deactivation_rounds: usize,

    /// Terminals closed by the shutdown rounds, in closing order.
    pub deactivated: Vec<EntityId>,
}

/// Two-phase coordinate search over terminal locations and open/closed state.
///
/// # Usage
///
/// ```
/// use u_facility::coordinate::{CoordinateConfig, CoordinateOptimizer};
/// use u_facility::cost::CostModel;
/// use u_facility::models::{Center, Consumer, Network, Terminal};
/// use u_facility::optimizer::Optimizer;
///
/// let mut network = Network::new(
///     Center::new(0, 50.0, 50.0),
///     vec![
///         Terminal::new(1, 10.0, 10.0, 8000.0, 15.0),
///         Terminal::new(2, 90.0, 90.0, 8000.0, 15.0),
///     ],
///     vec![Consumer::new(100, 20.0, 20.0, 10.0)],
/// )
/// .unwrap();
///
/// let mut optimizer =
///     CoordinateOptimizer::new(&mut network, CoordinateConfig::default(), CostModel::default());
/// let result = optimizer.optimize().unwrap();
/// assert!(result.final_cost < result.initial_cost);
/// ```
pub struct CoordinateOptimizer<'a> {
    network: &'a mut Network,
    config: CoordinateConfig,
    cost_model: CostModel,
    outcome: Option<CoordinateOutcome>,
}

impl<'a> CoordinateOptimizer<'a> {
    /// Creates an optimizer holding exclusive access to `network`.
    pub fn new(network: &'a mut Network, config: CoordinateConfig, cost_model: CostModel) -> Self {
        Self {
            network,
            config,
            cost_model,
            outcome: None,
        }
    }

    /// Details of the last run, `None` before [`optimize`](Optimizer::optimize).
    pub fn outcome(&self) -> Option<&CoordinateOutcome> {
        self.outcome.as_ref()
    }

    /// Runs the search and returns the detailed outcome.
    ///
    /// # Errors
    /// Invalid configuration or cost parameters, or a grid step too fine
    /// for the consumers' extent.
    pub fn run(&mut self) -> Result<CoordinateOutcome> {
        self.config.validate()?;
        self.cost_model.validate()?;

        let initial_cost = self.cost_model.total_cost(self.network);
        let candidates =
            candidate_locations(self.network, self.config.grid_step, self.config.clearance)?;
        info!(
            initial_cost,
            candidates = candidates.len(),
            active = self.network.active_count(),
            "coordinate search started"
        );

        let (passes, pass_history, relocated_cost) =
            self.relocation_phase(&candidates, initial_cost)?;
        let (deactivation_rounds, deactivated, final_cost) =
            self.deactivation_phase(relocated_cost)?;

        let result = OptimizationResult::new(initial_cost, final_cost, passes);
        info!(
            initial_cost,
            final_cost,
            passes,
            deactivation_rounds,
            improvement_pct = result.percentage_improvement,
            "coordinate search finished"
        );

        let outcome = CoordinateOutcome {
            result,
            candidate_count: candidates.len(),
            pass_history,
            deactivation_rounds,
            deactivated,
        };
        self.outcome = Some(outcome.clone());
        Ok(outcome)
    }

    /// Relocation passes. Returns passes executed, cost after each pass and
    /// the final cost.
    fn relocation_phase(
        &mut self,
        candidates: &[Point],
        initial_cost: f64,
    ) -> Result<(usize, Vec<f64>, f64)> {
        let mut current_cost = initial_cost;
        let mut history = Vec::new();
        let mut passes = 0;

        while passes < self.config.max_passes {
            passes += 1;
            let pass_start_cost = current_cost;

            for index in 0..self.network.terminals().len() {
                let terminal = &self.network.terminals()[index];
                if !terminal.is_active() {
                    continue;
                }
                let id = terminal.id();
                let original = terminal.location();

                let mut best_cost = current_cost;
                let mut best_location = original;
                for &candidate in candidates {
                    if candidate == original {
                        continue;
                    }
                    self.network.terminal_mut(index).set_location(candidate);
                    self.network.reassign()?;
                    let cost = self.cost_model.total_cost(self.network);
                    if cost < best_cost {
                        best_cost = cost;
                        best_location = candidate;
                    }
                }

                self.network.terminal_mut(index).set_location(best_location);
                self.network.reassign()?;

                if best_cost < current_cost {
                    debug!(
                        terminal = id,
                        from = %original,
                        to = %best_location,
                        saved = current_cost - best_cost,
                        "terminal relocated"
                    );
                    current_cost = best_cost;
                }
            }

            history.push(current_cost);
            let pass_improvement = pass_start_cost - current_cost;
            debug!(pass = passes, cost = current_cost, pass_improvement, "relocation pass done");

            if pass_improvement < self.config.tolerance {
                debug!(pass = passes, "relocation converged");
                break;
            }
        }

        Ok((passes, history, current_cost))
    }

    /// Shutdown rounds. Returns rounds executed, closed terminals and the
    /// final cost.
    fn deactivation_phase(&mut self, start_cost: f64) -> Result<(usize, Vec<EntityId>, f64)> {
        let mut current_cost = start_cost;
        let mut deactivated = Vec::new();
        let mut rounds = 0;

        while rounds < self.config.max_deactivation_rounds {
            rounds += 1;
            let closed = self.deactivation_round(current_cost)?;
            if closed.is_empty() {
                debug!(round = rounds, "every open terminal pays for itself");
                break;
            }
            deactivated.extend_from_slice(&closed);

            let new_cost = self.cost_model.total_cost(self.network);
            if new_cost < current_cost {
                debug!(round = rounds, ?closed, cost = new_cost, "terminals closed");
                current_cost = new_cost;
            } else {
                break;
            }
        }

        Ok((rounds, deactivated, current_cost))
    }

    /// Tries closing each open terminal once. Returns the ids kept closed.
    fn deactivation_round(&mut self, mut baseline: f64) -> Result<Vec<EntityId>> {
        let mut closed = Vec::new();

        for index in 0..self.network.terminals().len() {
            let terminal = &self.network.terminals()[index];
            if !terminal.is_active() {
                continue;
            }
            let id = terminal.id();

            self.network.terminal_mut(index).set_active(false);
            match self.network.reassign() {
                Ok(()) => {
                    let cost = self.cost_model.total_cost(self.network);
                    if cost < baseline {
                        baseline = cost;
                        closed.push(id);
                        continue;
                    }
                    trace!(terminal = id, cost, baseline, "closing rejected");
                }
                Err(FacilityError::NoEligibleTerminal) => {
                    trace!(terminal = id, "last open terminal kept");
                }
                Err(e) => return Err(e),
            }

            self.network.terminal_mut(index).set_active(true);
            self.network.reassign()?;
        }

        Ok(closed)
    }
}

impl Optimizer for CoordinateOptimizer<'_> {
    fn name(&self) -> &'static str {
        "coordinate search"
    }

    fn optimize(&mut self) -> Result<OptimizationResult> {
        self.run().map(|outcome| outcome.result)
    }

    fn improvement(&self) -> Option<Improvement> {
        self.outcome.as_ref().map(|o| o.result.improvement())
    }

    fn network(&self) -> &Network {
        &*self.network
    }
}

// ============================================================================
// Tests
// ============================================================================
