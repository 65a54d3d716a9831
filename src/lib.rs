//! Facility location engine for a three-tier logistics network.
//!
//! A single distribution center ships goods to terminals, which serve
//! consumers. The engine decides where terminals stand and which of them are
//! open so that the total cost (fixed, handling and two transport legs) is
//! as low as possible.
//!
//! - **Models**: center, terminals and consumers, plus the [`Network`]
//!   aggregate with queries and in-place mutation.
//! - **Assignment**: every consumer is served by its nearest open terminal
//!   (Euclidean distance, first terminal wins ties).
//! - **Cost Model**: fixed and handling costs of open terminals, discounted
//!   bulk transport from the center, per-consumer last-mile transport.
//! - **Coordinate Search**: deterministic relocation of terminals on a
//!   candidate grid followed by greedy shutdown of unprofitable terminals.
//! - **Genetic Search**: evolves the open/closed terminal set with
//!   tournament selection, uniform crossover and bit-flip mutation.
//! - **Generator / Comparison**: seeded synthetic networks and side-by-side
//!   runs of both optimizers on independent copies.
//!
//! # Architecture
//!
//! Optimizers borrow a [`Network`] mutably for the duration of a run and
//! report through the [`Optimizer`](optimizer::Optimizer) trait. Logging
//! goes through `tracing`; the crate never installs a subscriber.

pub mod assignment;
pub mod comparison;
pub mod coordinate;
pub mod cost;
pub mod error;
pub mod generator;
pub mod genetic;
pub mod models;
pub mod optimizer;

pub use error::{FacilityError, Result};
pub use models::Network;
