//! Genetic search over open/closed terminal sets.
//!
//! Each chromosome is a bitstring with one gene per terminal (in network
//! order); `true` means the terminal is open. Fitness is `1 / (1 + cost)`,
//! and a chromosome with no open terminal scores `0`. Operators repair
//! their output so every chromosome keeps at least one open terminal.
//!
//! # Key Types
//!
//! - [`GeneticConfig`]: population, rates, tournament size, seed, presets
//! - [`GeneticOptimizer`]: runs the evolutionary loop on a borrowed network
//! - [`GeneticOutcome`]: result, best chromosome and per-generation stats
//!
//! # Submodules
//!
//! - [`operators`]: repair, uniform crossover and bit-flip mutation
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

mod config;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::GeneticConfig;
pub use runner::{GenerationStats, GeneticOptimizer, GeneticOutcome};
pub use selection::tournament;
pub use types::{cost_from_fitness, fitness_from_cost, Chromosome};
