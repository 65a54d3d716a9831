//! Synthetic network generation.
//!
//! Produces reproducible test networks: one center in the middle of a square
//! area, terminals grouped into clusters (or scattered uniformly) and
//! consumers placed round-robin around the terminals.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::{FacilityError, Result};
use crate::models::{Center, Consumer, EntityId, Network, Terminal};

const FIRST_TERMINAL_ID: EntityId = 10;
const FIRST_CONSUMER_ID: EntityId = 100;

/// Seeded generator of synthetic networks.
///
/// # Examples
///
/// ```
/// use u_facility::generator::NetworkGenerator;
///
/// let network = NetworkGenerator::new(42).generate(15).unwrap();
/// assert_eq!(network.consumers().len(), 15);
/// assert_eq!(network.terminals().len(), 5);
/// assert_eq!(network.center().location().x, 50.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkGenerator {
    /// Seed of the random stream; the same seed yields the same network.
    pub seed: u64,
    /// Side length of the square area.
    pub area_size: f64,
    /// Fixed cost of every generated terminal.
    pub terminal_cost: f64,
    /// Per-unit handling cost of every generated terminal.
    pub processing_cost: f64,
    /// Smallest consumer demand (inclusive).
    pub min_demand: u32,
    /// Largest consumer demand (inclusive).
    pub max_demand: u32,
    /// Group terminals into 3 to 5 clusters instead of scattering them.
    pub clustered: bool,
}

impl NetworkGenerator {
    /// Generator with default parameters and the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            area_size: 100.0,
            terminal_cost: 8000.0,
            processing_cost: 15.0,
            min_demand: 50,
            max_demand: 100,
            clustered: true,
        }
    }

    /// Sets the side length of the square area.
    pub fn with_area_size(mut self, size: f64) -> Self {
        self.area_size = size;
        self
    }

    /// Sets the fixed cost of every terminal.
    pub fn with_terminal_cost(mut self, cost: f64) -> Self {
        self.terminal_cost = cost.max(0.0);
        self
    }

    /// Sets the per-unit handling cost of every terminal.
    pub fn with_processing_cost(mut self, cost: f64) -> Self {
        self.processing_cost = cost.max(0.0);
        self
    }

    /// Sets the inclusive consumer demand range.
    pub fn with_demand_range(mut self, min: u32, max: u32) -> Self {
        self.min_demand = min;
        self.max_demand = max;
        self
    }

    /// Chooses clustered or scattered terminal placement.
    pub fn with_clustered(mut self, clustered: bool) -> Self {
        self.clustered = clustered;
        self
    }

    /// Validates the generator parameters.
    pub fn validate(&self) -> Result<()> {
        if !(self.area_size.is_finite() && self.area_size >= 20.0) {
            return Err(FacilityError::InvalidConfig(
                "area_size must be at least 20".into(),
            ));
        }
        if self.min_demand == 0 {
            return Err(FacilityError::InvalidConfig(
                "min_demand must be positive".into(),
            ));
        }
        if self.min_demand > self.max_demand {
            return Err(FacilityError::InvalidConfig(
                "min_demand must not exceed max_demand".into(),
            ));
        }
        Ok(())
    }

    /// First consumer id: 100, or right after the last terminal id when
    /// there are more than 90 terminals.
    pub fn first_consumer_id(terminals: usize) -> EntityId {
        FIRST_CONSUMER_ID.max(FIRST_TERMINAL_ID + terminals as EntityId)
    }

    /// Number of terminals generated for `consumers` consumers.
    pub fn terminal_count(consumers: usize) -> usize {
        (consumers / 3).max(3)
    }

    /// Generates a network with `consumers` consumers.
    ///
    /// # Errors
    /// Invalid parameters, or [`FacilityError::NoConsumers`] for zero
    /// consumers.
    pub fn generate(&self, consumers: usize) -> Result<Network> {
        self.validate()?;
        let mut rng = StdRng::seed_from_u64(self.seed);

        let mid = (self.area_size / 2.0).trunc();
        let center = Center::new(0, mid, mid);

        let n_terminals = Self::terminal_count(consumers);
        let terminals = if self.clustered {
            self.clustered_terminals(n_terminals, &mut rng)
        } else {
            self.scattered_terminals(n_terminals, &mut rng)
        };
        let consumers = self.consumers_around(&terminals, consumers, &mut rng);

        debug!(
            seed = self.seed,
            terminals = terminals.len(),
            consumers = consumers.len(),
            clustered = self.clustered,
            "network generated"
        );
        Network::new(center, terminals, consumers)
    }

    fn clustered_terminals(&self, count: usize, rng: &mut StdRng) -> Vec<Terminal> {
        let clusters = cluster_centers((count / 2).clamp(3, 5), self.area_size);
        let per_cluster = count / clusters.len();
        let remainder = count % clusters.len();
        let (lo, hi) = (5.0, self.area_size - 5.0);

        let mut terminals = Vec::with_capacity(count);
        let mut id = FIRST_TERMINAL_ID;
        for (i, &(cx, cy)) in clusters.iter().enumerate() {
            let n = per_cluster + usize::from(i < remainder);
            for _ in 0..n {
                let angle = rng.random_range(0.0..TAU);
                let radius = rng.random_range(2.0..8.0);
                let x = (cx + radius * angle.cos()).clamp(lo, hi);
                let y = (cy + radius * angle.sin()).clamp(lo, hi);
                terminals.push(self.terminal(id, x, y));
                id += 1;
            }
        }
        terminals
    }

    fn scattered_terminals(&self, count: usize, rng: &mut StdRng) -> Vec<Terminal> {
        let (lo, hi) = (10.0, self.area_size - 10.0);
        (0..count)
            .map(|i| {
                let x = rng.random_range(lo..hi);
                let y = rng.random_range(lo..hi);
                self.terminal(FIRST_TERMINAL_ID + i as EntityId, x, y)
            })
            .collect()
    }

    fn terminal(&self, id: EntityId, x: f64, y: f64) -> Terminal {
        Terminal::new(
            id,
            round1(x),
            round1(y),
            self.terminal_cost,
            self.processing_cost,
        )
    }

    fn consumers_around(
        &self,
        terminals: &[Terminal],
        count: usize,
        rng: &mut StdRng,
    ) -> Vec<Consumer> {
        let per_terminal = count / terminals.len();
        let remainder = count % terminals.len();

        let mut consumers = Vec::with_capacity(count);
        let mut id = Self::first_consumer_id(terminals.len());
        for (i, terminal) in terminals.iter().enumerate() {
            let n = per_terminal + usize::from(i < remainder);
            let origin = terminal.location();
            for _ in 0..n {
                let angle = rng.random_range(0.0..TAU);
                let radius = rng.random_range(1.0..10.0);
                let x = (origin.x + radius * angle.cos()).clamp(0.0, self.area_size);
                let y = (origin.y + radius * angle.sin()).clamp(0.0, self.area_size);
                let demand = rng.random_range(self.min_demand..=self.max_demand);
                consumers.push(Consumer::new(id, round1(x), round1(y), f64::from(demand)));
                id += 1;
            }
        }
        consumers
    }
}

/// Fixed cluster layouts: triangle, square, or square plus middle.
fn cluster_centers(clusters: usize, area: f64) -> Vec<(f64, f64)> {
    let fractions: &[(f64, f64)] = match clusters {
        3 => &[(0.25, 0.25), (0.75, 0.25), (0.5, 0.75)],
        4 => &[(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75)],
        _ => &[(0.2, 0.2), (0.8, 0.2), (0.2, 0.8), (0.8, 0.8), (0.5, 0.5)],
    };
    fractions.iter().map(|&(fx, fy)| (area * fx, area * fy)).collect()
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
