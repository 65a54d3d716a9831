//! Coordinate search.
//!
//! A deterministic two-phase local search. The relocation phase moves one
//! open terminal at a time to the cheapest point of a candidate grid; the
//! shutdown phase greedily closes terminals whose removal lowers the total
//! cost. The result is a local optimum that depends on terminal order.
//!
//! # Key Types
//!
//! - [`CoordinateConfig`]: pass limits, convergence threshold, grid geometry
//! - [`CoordinateOptimizer`]: runs both phases on a borrowed network
//! - [`CoordinateOutcome`]: result plus pass history and closed terminals

mod candidates;
mod config;
mod runner;

pub use candidates::{candidate_locations, MAX_GRID_POINTS};
pub use config::CoordinateConfig;
pub use runner::{CoordinateOptimizer, CoordinateOutcome};
