//! Coordinate search configuration.

use crate::error::{FacilityError, Result};

/// Configuration for the coordinate search.
///
/// # Defaults
///
/// ```
/// use u_facility::coordinate::CoordinateConfig;
///
/// let config = CoordinateConfig::default();
/// assert_eq!(config.max_passes, 100);
/// assert_eq!(config.grid_step, 5.0);
/// assert_eq!(config.max_deactivation_rounds, 10);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_facility::coordinate::CoordinateConfig;
///
/// let config = CoordinateConfig::default()
///     .with_max_passes(20)
///     .with_tolerance(1.0)
///     .with_grid_step(2.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordinateConfig {
    /// Maximum number of relocation passes over all open terminals.
    pub max_passes: usize,

    /// Minimum cost reduction (absolute units) a pass must achieve for the
    /// relocation phase to continue.
    pub tolerance: f64,

    /// Spacing of the candidate location grid.
    pub grid_step: f64,

    /// Grid points closer than this to a consumer on both axes are dropped.
    pub clearance: f64,

    /// Maximum number of terminal shutdown rounds.
    pub max_deactivation_rounds: usize,
}

impl Default for CoordinateConfig {
    fn default() -> Self {
        Self {
            max_passes: 100,
            tolerance: 0.01,
            grid_step: 5.0,
            clearance: 0.1,
            max_deactivation_rounds: 10,
        }
    }
}

impl CoordinateConfig {
    /// Sets the maximum number of relocation passes.
    pub fn with_max_passes(mut self, n: usize) -> Self {
        self.max_passes = n;
        self
    }

    /// Sets the convergence threshold of the relocation phase.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }

    /// Sets the candidate grid spacing.
    pub fn with_grid_step(mut self, step: f64) -> Self {
        self.grid_step = step;
        self
    }

    /// Sets the consumer clearance of grid points.
    pub fn with_clearance(mut self, clearance: f64) -> Self {
        self.clearance = clearance.max(0.0);
        self
    }

    /// Sets the maximum number of shutdown rounds.
    pub fn with_max_deactivation_rounds(mut self, n: usize) -> Self {
        self.max_deactivation_rounds = n;
        self
    }

    /// Coarse grid and few passes, for quick estimates.
    ///
    /// - Grid step: 10, Passes: 10, Tolerance: 1.0
    pub fn fast() -> Self {
        Self {
            max_passes: 10,
            tolerance: 1.0,
            grid_step: 10.0,
            ..Self::default()
        }
    }

    /// Fine grid and tight convergence.
    ///
    /// - Grid step: 2.5, Passes: 200, Tolerance: 0.001
    pub fn thorough() -> Self {
        Self {
            max_passes: 200,
            tolerance: 0.001,
            grid_step: 2.5,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.grid_step > 0.0 && self.grid_step.is_finite()) {
            return Err(FacilityError::InvalidConfig(
                "grid_step must be a positive number".into(),
            ));
        }
        if !(self.tolerance >= 0.0) {
            return Err(FacilityError::InvalidConfig(
                "tolerance must be non-negative".into(),
            ));
        }
        if !(self.clearance >= 0.0) {
            return Err(FacilityError::InvalidConfig(
                "clearance must be non-negative".into(),
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
        let config = CoordinateConfig::default();
        assert_eq!(config.max_passes, 100);
        assert!((config.tolerance - 0.01).abs() < 1e-15);
        assert!((config.grid_step - 5.0).abs() < 1e-15);
        assert!((config.clearance - 0.1).abs() < 1e-15);
        assert_eq!(config.max_deactivation_rounds, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = CoordinateConfig::default()
            .with_max_passes(7)
            .with_tolerance(0.5)
            .with_grid_step(2.0)
            .with_clearance(0.2)
            .with_max_deactivation_rounds(3);
        assert_eq!(config.max_passes, 7);
        assert!((config.tolerance - 0.5).abs() < 1e-15);
        assert!((config.grid_step - 2.0).abs() < 1e-15);
        assert!((config.clearance - 0.2).abs() < 1e-15);
        assert_eq!(config.max_deactivation_rounds, 3);
    }

    #[test]
    fn test_clamp_negative() {
        let config = CoordinateConfig::default()
            .with_tolerance(-1.0)
            .with_clearance(-0.5);
        assert_eq!(config.tolerance, 0.0);
        assert_eq!(config.clearance, 0.0);
    }

    #[test]
    fn test_validate_grid_step() {
        assert!(CoordinateConfig::default()
            .with_grid_step(0.0)
            .validate()
            .is_err());
        assert!(CoordinateConfig::default()
            .with_grid_step(f64::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_presets() {
        let fast = CoordinateConfig::fast();
        assert_eq!(fast.max_passes, 10);
        assert!((fast.grid_step - 10.0).abs() < 1e-15);
        assert!(fast.validate().is_ok());

        let thorough = CoordinateConfig::thorough();
        assert_eq!(thorough.max_passes, 200);
        assert!((thorough.grid_step - 2.5).abs() < 1e-15);
        assert!(thorough.validate().is_ok());
    }
}
