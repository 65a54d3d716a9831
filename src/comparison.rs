//! Side-by-side runs of both optimizers.
//!
//! [`compare`] runs coordinate search and the genetic search on separate
//! deep copies of one network. The input network is never modified. With
//! the `parallel` feature both runs execute concurrently via `rayon::join`.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::info;

use crate::coordinate::{CoordinateConfig, CoordinateOptimizer};
use crate::cost::{CostBreakdown, CostModel};
use crate::error::Result;
use crate::genetic::{GeneticConfig, GeneticOptimizer};
use crate::models::Network;
use crate::optimizer::{OptimizationResult, Optimizer};

/// One optimizer's run within a comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodRun {
    /// Optimizer name as reported by [`Optimizer::name`].
    pub method: &'static str,
    /// Result record of the run.
    pub result: OptimizationResult,
    /// The optimized copy of the network.
    pub network: Network,
    /// Cost components of the optimized copy.
    pub breakdown: CostBreakdown,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

/// Outcome of [`compare`].
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Cost of the untouched input network.
    pub initial_cost: f64,
    /// Coordinate search run.
    pub coordinate: MethodRun,
    /// Genetic search run.
    pub genetic: MethodRun,
}

impl Comparison {
    /// The run with the lower final cost; coordinate search on a tie.
    pub fn best(&self) -> &MethodRun {
        if self.genetic.result.final_cost < self.coordinate.result.final_cost {
            &self.genetic
        } else {
            &self.coordinate
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Initial cost: {:.2}", self.initial_cost)?;
        writeln!(
            f,
            "{:<20} {:>14} {:>14} {:>9} {:>8} {:>10}",
            "method", "final cost", "saved", "saved %", "active", "time"
        )?;
        for run in [&self.coordinate, &self.genetic] {
            writeln!(
                f,
                "{:<20} {:>14.2} {:>14.2} {:>8.2}% {:>8} {:>10.2?}",
                run.method,
                run.result.final_cost,
                run.result.absolute_improvement,
                run.result.percentage_improvement,
                run.network.active_count(),
                run.elapsed
            )?;
        }
        write!(f, "Best: {}", self.best().method)
    }
}

/// Runs both optimizers on independent copies of `network`.
///
/// # Errors
/// The first error of either run (invalid configuration or cost model).
///
/// # Examples
///
/// ```
/// use u_facility::comparison::compare;
/// use u_facility::coordinate::CoordinateConfig;
/// use u_facility::cost::CostModel;
/// use u_facility::generator::NetworkGenerator;
/// use u_facility::genetic::GeneticConfig;
///
/// let network = NetworkGenerator::new(3).generate(15).unwrap();
/// let comparison = compare(
///     &network,
///     CoordinateConfig::fast(),
///     GeneticConfig::fast().with_seed(1),
///     CostModel::default(),
/// )
/// .unwrap();
/// assert!(comparison.best().result.final_cost <= comparison.initial_cost);
/// ```
pub fn compare(
    network: &Network,
    coordinate_config: CoordinateConfig,
    genetic_config: GeneticConfig,
    cost_model: CostModel,
) -> Result<Comparison> {
    cost_model.validate()?;
    let initial_cost = cost_model.total_cost(network);

    let run_coordinate = || {
        let mut copy = network.clone();
        timed(&mut copy, cost_model, |n| {
            let mut optimizer = CoordinateOptimizer::new(n, coordinate_config, cost_model);
            let result = optimizer.optimize()?;
            Ok((optimizer.name(), result))
        })
    };
    let run_genetic = || {
        let mut copy = network.clone();
        timed(&mut copy, cost_model, |n| {
            let mut optimizer = GeneticOptimizer::new(n, genetic_config, cost_model);
            let result = optimizer.optimize()?;
            Ok((optimizer.name(), result))
        })
    };

    #[cfg(feature = "parallel")]
    let (coordinate, genetic) = rayon::join(run_coordinate, run_genetic);
    #[cfg(not(feature = "parallel"))]
    let (coordinate, genetic) = (run_coordinate(), run_genetic());

    let comparison = Comparison {
        initial_cost,
        coordinate: coordinate?,
        genetic: genetic?,
    };
    info!(
        initial_cost,
        coordinate_cost = comparison.coordinate.result.final_cost,
        genetic_cost = comparison.genetic.result.final_cost,
        best = comparison.best().method,
        "comparison finished"
    );
    Ok(comparison)
}

fn timed<F>(network: &mut Network, cost_model: CostModel, run: F) -> Result<MethodRun>
where
    F: FnOnce(&mut Network) -> Result<(&'static str, OptimizationResult)>,
{
    let start = Instant::now();
    let (method, result) = run(network)?;
    let elapsed = start.elapsed();
    Ok(MethodRun {
        method,
        result,
        network: network.clone(),
        breakdown: cost_model.evaluate(network),
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::NetworkGenerator;

    fn run(seed: u64) -> (Network, Comparison) {
        let network = NetworkGenerator::new(seed).generate(18).unwrap();
        let comparison = compare(
            &network,
            CoordinateConfig::fast(),
            GeneticConfig::fast().with_seed(seed),
            CostModel::default(),
        )
        .unwrap();
        (network, comparison)
    }

    #[test]
    fn test_input_untouched() {
        let network = NetworkGenerator::new(21).generate(18).unwrap();
        let before = network.clone();
        compare(
            &network,
            CoordinateConfig::fast(),
            GeneticConfig::fast().with_seed(1),
            CostModel::default(),
        )
        .unwrap();
        assert_eq!(network, before);
    }

    #[test]
    fn test_both_methods_reported() {
        let (network, comparison) = run(22);
        assert_eq!(comparison.coordinate.method, "coordinate search");
        assert_eq!(comparison.genetic.method, "genetic algorithm");
        let initial = CostModel::default().total_cost(&network);
        assert_eq!(comparison.initial_cost, initial);
        assert_eq!(comparison.coordinate.result.initial_cost, initial);
        assert_eq!(comparison.genetic.result.initial_cost, initial);
    }

    #[test]
    fn test_breakdowns_match_results() {
        let (_, comparison) = run(23);
        for entry in [&comparison.coordinate, &comparison.genetic] {
            assert!((entry.breakdown.total_cost - entry.result.final_cost).abs() < 1e-9);
            assert!(entry.result.final_cost <= comparison.initial_cost);
        }
    }

    #[test]
    fn test_genetic_keeps_locations() {
        let (network, comparison) = run(24);
        let original: Vec<_> = network.terminals().iter().map(|t| t.location()).collect();
        let genetic: Vec<_> = comparison
            .genetic
            .network
            .terminals()
            .iter()
            .map(|t| t.location())
            .collect();
        assert_eq!(original, genetic);
    }

    #[test]
    fn test_best_and_display() {
        let (_, comparison) = run(25);
        let best = comparison.best();
        assert!(best.result.final_cost <= comparison.coordinate.result.final_cost);
        assert!(best.result.final_cost <= comparison.genetic.result.final_cost);

        let table = comparison.to_string();
        assert!(table.contains("coordinate search"));
        assert!(table.contains("genetic algorithm"));
        assert!(table.ends_with(best.method));
    }

    #[test]
    fn test_invalid_config_propagates() {
        let network = NetworkGenerator::new(26).generate(9).unwrap();
        let result = compare(
            &network,
            CoordinateConfig::default(),
            GeneticConfig::default().with_population_size(0),
            CostModel::default(),
        );
        assert!(result.is_err());
    }
}
