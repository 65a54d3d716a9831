//! Genetic search execution.
//!
//! [`GeneticOptimizer`] evolves open/closed terminal configurations:
//! initialization → evaluation → tournament selection → uniform crossover →
//! bit-flip mutation → repeat. The best chromosome ever seen is carried into
//! every generation unchanged.
//!
//! Terminal locations are never changed; only the `active` flags are.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::config::GeneticConfig;
use super::operators::{bit_flip_mutation, random_genes, uniform_crossover};
use super::selection::tournament;
use super::types::{cost_from_fitness, fitness_from_cost, Chromosome};
use crate::cost::CostModel;
use crate::error::{FacilityError, Result};
use crate::models::Network;
use crate::optimizer::{Improvement, OptimizationResult, Optimizer};

/// Population statistics for one generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generation number; 0 is the initial population.
    pub generation: usize,

    /// Best fitness seen so far (including earlier generations).
    pub best_fitness: f64,

    /// Network cost of the best chromosome seen so far.
    pub best_cost: f64,

    /// Mean fitness of this generation's population.
    pub mean_fitness: f64,
}

/// Details of a genetic search run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneticOutcome {
    /// Headline result; `iterations` is the number of generations executed.
    pub result: OptimizationResult,

    /// Best chromosome found, now applied to the network.
    pub best: Chromosome,

    /// Per-generation statistics, starting with the initial population.
    pub history: Vec<GenerationStats>,

    /// Whether the run was stopped through the cancellation flag.
    pub cancelled: bool,
}

impl GeneticOutcome {
    /// Best fitness after each generation. Never decreases.
    pub fn fitness_history(&self) -> Vec<f64> {
        self.history.iter().map(|s| s.best_fitness).collect()
    }
}

/// Genetic search over which terminals are open.
///
/// # Usage
///
/// ```
/// use u_facility::cost::CostModel;
/// use u_facility::generator::NetworkGenerator;
/// use u_facility::genetic::{GeneticConfig, GeneticOptimizer};
/// use u_facility::optimizer::Optimizer;
///
/// let mut network = NetworkGenerator::new(7).generate(30).unwrap();
/// let config = GeneticConfig::fast().with_seed(42);
/// let mut optimizer = GeneticOptimizer::new(&mut network, config, CostModel::default());
/// let result = optimizer.optimize().unwrap();
/// assert!(result.final_cost <= result.initial_cost);
/// ```
pub struct GeneticOptimizer<'a> {
    network: &'a mut Network,
    config: GeneticConfig,
    cost_model: CostModel,
    outcome: Option<GeneticOutcome>,
}

impl<'a> GeneticOptimizer<'a> {
    /// Creates an optimizer holding exclusive access to `network`.
    pub fn new(network: &'a mut Network, config: GeneticConfig, cost_model: CostModel) -> Self {
        Self {
            network,
            config,
            cost_model,
            outcome: None,
        }
    }

    /// Details of the last run, `None` before [`optimize`](Optimizer::optimize).
    pub fn outcome(&self) -> Option<&GeneticOutcome> {
        self.outcome.as_ref()
    }

    /// Fitness of an open/closed configuration: `1 / (1 + cost)`.
    ///
    /// A configuration with no open terminal has fitness `0.0` and is not
    /// priced; the network is left untouched in that case. Otherwise the
    /// configuration is applied to the network (and stays applied).
    ///
    /// # Errors
    /// [`FacilityError::ConfigurationLength`] if `genes` does not match the
    /// number of terminals.
    pub fn fitness(&mut self, genes: &[bool]) -> Result<f64> {
        let expected = self.network.terminals().len();
        if genes.len() != expected {
            return Err(FacilityError::ConfigurationLength {
                expected,
                actual: genes.len(),
            });
        }
        if !genes.iter().any(|&g| g) {
            return Ok(0.0);
        }
        self.network.apply_configuration(genes)?;
        Ok(fitness_from_cost(self.cost_model.total_cost(self.network)))
    }

    /// Runs the search and returns the detailed outcome.
    ///
    /// # Errors
    /// Invalid configuration or cost parameters.
    pub fn run(&mut self) -> Result<GeneticOutcome> {
        self.run_with_cancel(None)
    }

    /// Runs the search with an optional cancellation flag.
    ///
    /// When the flag is set the search stops before the next generation,
    /// applies the best chromosome found so far and returns normally.
    pub fn run_with_cancel(&mut self, cancel: Option<Arc<AtomicBool>>) -> Result<GeneticOutcome> {
        self.config.validate()?;
        self.cost_model.validate()?;

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let incumbent = self.network.configuration();
        let initial_cost = self.cost_model.total_cost(self.network);
        let n_terminals = incumbent.len();
        info!(
            initial_cost,
            terminals = n_terminals,
            population = self.config.population_size,
            generations = self.config.generations,
            "genetic search started"
        );

        // 1. Initialize and evaluate
        let mut population: Vec<Chromosome> = Vec::with_capacity(self.config.population_size);
        if self.config.seed_incumbent {
            population.push(Chromosome::new(incumbent));
        }
        while population.len() < self.config.population_size {
            population.push(Chromosome::new(random_genes(n_terminals, &mut rng)));
        }
        self.evaluate(&mut population)?;

        let mut best = fittest(&population).clone();
        let mut history = Vec::with_capacity(self.config.generations + 1);
        history.push(stats(0, &best, &population));

        // 2. Evolve
        let mut generations = 0;
        let mut cancelled = false;
        for generation in 1..=self.config.generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let mut next = Vec::with_capacity(self.config.population_size);
            next.push(best.clone());

            while next.len() < self.config.population_size {
                let p1 = tournament(&population, self.config.tournament_size, &mut rng);
                let p2 = tournament(&population, self.config.tournament_size, &mut rng);
                let (mut c1, mut c2) =
                    if rng.random_range(0.0..1.0) < self.config.crossover_rate {
                        uniform_crossover(population[p1].genes(), population[p2].genes(), &mut rng)
                    } else {
                        (
                            population[p1].genes().to_vec(),
                            population[p2].genes().to_vec(),
                        )
                    };
                bit_flip_mutation(&mut c1, self.config.mutation_rate, &mut rng);
                bit_flip_mutation(&mut c2, self.config.mutation_rate, &mut rng);

                next.push(Chromosome::new(c1));
                if next.len() < self.config.population_size {
                    next.push(Chromosome::new(c2));
                }
            }

            // the elite keeps its fitness
            self.evaluate(&mut next[1..])?;
            population = next;
            generations = generation;

            let champion = fittest(&population);
            if champion.fitness() > best.fitness() {
                best = champion.clone();
            }
            let entry = stats(generation, &best, &population);
            if self.config.log_interval > 0 && generation % self.config.log_interval == 0 {
                debug!(
                    generation,
                    best_cost = entry.best_cost,
                    mean_fitness = entry.mean_fitness,
                    open = best.open_count(),
                    "generation progress"
                );
            }
            history.push(entry);
        }

        // 3. Apply the best configuration
        self.network.apply_configuration(best.genes())?;
        let final_cost = self.cost_model.total_cost(self.network);
        let result = OptimizationResult::new(initial_cost, final_cost, generations);
        info!(
            initial_cost,
            final_cost,
            generations,
            cancelled,
            best = %best,
            improvement_pct = result.percentage_improvement,
            "genetic search finished"
        );

        let outcome = GeneticOutcome {
            result,
            best,
            history,
            cancelled,
        };
        self.outcome = Some(outcome.clone());
        Ok(outcome)
    }

    fn evaluate(&mut self, population: &mut [Chromosome]) -> Result<()> {
        for chromosome in population.iter_mut() {
            let fitness = self.fitness(chromosome.genes())?;
            chromosome.set_fitness(fitness);
        }
        Ok(())
    }
}

impl Optimizer for GeneticOptimizer<'_> {
    fn name(&self) -> &'static str {
        "genetic algorithm"
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

/// First chromosome with the highest fitness.
fn fittest(population: &[Chromosome]) -> &Chromosome {
    let mut best = &population[0];
    for c in &population[1..] {
        if c.fitness() > best.fitness() {
            best = c;
        }
    }
    best
}

fn stats(generation: usize, best: &Chromosome, population: &[Chromosome]) -> GenerationStats {
    let mean_fitness =
        population.iter().map(|c| c.fitness()).sum::<f64>() / population.len() as f64;
    GenerationStats {
        generation,
        best_fitness: best.fitness(),
        best_cost: cost_from_fitness(best.fitness()),
        mean_fitness,
    }
}

// ============================================================================
// Tests
// ============================================================================
