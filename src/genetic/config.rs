//! Genetic search configuration.
//!
//! [`GeneticConfig`] holds all parameters that control the evolutionary loop.

use crate::error::{FacilityError, Result};

/// Configuration for the genetic search over open/closed terminal sets.
///
/// # Defaults
///
/// ```
/// use u_facility::genetic::GeneticConfig;
///
/// let config = GeneticConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.generations, 100);
/// assert_eq!(config.tournament_size, 3);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_facility::genetic::GeneticConfig;
///
/// let config = GeneticConfig::default()
///     .with_population_size(80)
///     .with_generations(200)
///     .with_mutation_rate(0.05)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneticConfig {
    /// Number of chromosomes per generation.
    pub population_size: usize,

    /// Number of generations to evolve.
    pub generations: usize,

    /// Per-gene flip probability applied to every offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Probability of uniform crossover for a parent pair (0.0–1.0).
    ///
    /// Without crossover the children are copies of the parents.
    pub crossover_rate: f64,

    /// Number of distinct individuals drawn per tournament.
    pub tournament_size: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether the network's current open/closed configuration is placed in
    /// the initial population.
    ///
    /// With elitism this guarantees the result is never worse than the
    /// starting network.
    pub seed_incumbent: bool,

    /// Emit a progress event every this many generations (0 disables).
    pub log_interval: usize,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            mutation_rate: 0.1,
            crossover_rate: 0.8,
            tournament_size: 3,
            seed: None,
            seed_incumbent: true,
            log_interval: 10,
        }
    }
}

impl GeneticConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables seeding with the current configuration.
    pub fn with_seed_incumbent(mut self, enabled: bool) -> Self {
        self.seed_incumbent = enabled;
        self
    }

    /// Sets the progress logging interval.
    pub fn with_log_interval(mut self, generations: usize) -> Self {
        self.log_interval = generations;
        self
    }

    /// Preset for quick runs.
    ///
    /// - Population: 30, Generations: 50
    pub fn fast() -> Self {
        Self {
            population_size: 30,
            generations: 50,
            ..Self::default()
        }
    }

    /// Preset matching the defaults.
    ///
    /// - Population: 50, Generations: 100
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Preset for large terminal sets.
    ///
    /// - Population: 100, Generations: 300, Mutation: 0.05
    pub fn quality() -> Self {
        Self {
            population_size: 100,
            generations: 300,
            mutation_rate: 0.05,
            ..Self::default()
        }
    }

    /// Selects a preset from the number of terminals.
    ///
    /// - `terminals < 10` → [`fast()`](Self::fast)
    /// - `10 ≤ terminals < 30` → [`balanced()`](Self::balanced)
    /// - `terminals ≥ 30` → [`quality()`](Self::quality)
    pub fn auto_select(terminals: usize) -> Self {
        if terminals < 10 {
            Self::fast()
        } else if terminals < 30 {
            Self::balanced()
        } else {
            Self::quality()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(FacilityError::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(FacilityError::InvalidConfig(
                "tournament_size must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(FacilityError::InvalidConfig(
                "mutation_rate must be within [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(FacilityError::InvalidConfig(
                "crossover_rate must be within [0, 1]".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneticConfig::default();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.generations, 100);
        assert!((config.mutation_rate - 0.1).abs() < 1e-10);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert_eq!(config.tournament_size, 3);
        assert!(config.seed.is_none());
        assert!(config.seed_incumbent);
        assert_eq!(config.log_interval, 10);
    }

    #[test]
    fn test_builder_pattern() {
        let config = GeneticConfig::default()
            .with_population_size(20)
            .with_generations(40)
            .with_mutation_rate(0.2)
            .with_crossover_rate(0.6)
            .with_tournament_size(5)
            .with_seed(7)
            .with_seed_incumbent(false)
            .with_log_interval(0);

        assert_eq!(config.population_size, 20);
        assert_eq!(config.generations, 40);
        assert!((config.mutation_rate - 0.2).abs() < 1e-10);
        assert!((config.crossover_rate - 0.6).abs() < 1e-10);
        assert_eq!(config.tournament_size, 5);
        assert_eq!(config.seed, Some(7));
        assert!(!config.seed_incumbent);
        assert_eq!(config.log_interval, 0);
    }

    #[test]
    fn test_clamp_rates() {
        let config = GeneticConfig::default()
            .with_mutation_rate(1.5)
            .with_crossover_rate(-0.5);
        assert!((config.mutation_rate - 1.0).abs() < 1e-10);
        assert!((config.crossover_rate - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_validate_ok() {
        assert!(GeneticConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = GeneticConfig::default().with_population_size(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_tournament() {
        let config = GeneticConfig::default().with_tournament_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rates_set_directly() {
        let config = GeneticConfig {
            mutation_rate: 2.0,
            ..GeneticConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_presets() {
        assert_eq!(GeneticConfig::fast().population_size, 30);
        assert_eq!(GeneticConfig::balanced(), GeneticConfig::default());
        let quality = GeneticConfig::quality();
        assert_eq!(quality.generations, 300);
        assert!(quality.validate().is_ok());
    }

    #[test]
    fn test_auto_select_boundaries() {
        assert_eq!(GeneticConfig::auto_select(9).population_size, 30);
        assert_eq!(GeneticConfig::auto_select(10).population_size, 50);
        assert_eq!(GeneticConfig::auto_select(29).population_size, 50);
        assert_eq!(GeneticConfig::auto_select(30).population_size, 100);
    }
}
