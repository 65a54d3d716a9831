//! Crate-wide error type.

use thiserror::Error;

use crate::models::EntityId;

/// Errors raised by network construction, assignment and the optimizers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FacilityError {
    /// The network was built without a distribution center.
    #[error("network has no distribution center")]
    MissingCenter,

    /// The network was built without any terminal.
    #[error("network must contain at least one terminal")]
    NoTerminals,

    /// The network was built without any consumer.
    #[error("network must contain at least one consumer")]
    NoConsumers,

    /// Two entities share the same id.
    #[error("entity id {0} is used more than once")]
    DuplicateId(EntityId),

    /// A terminal carries a negative fixed or handling cost.
    #[error("terminal {id} has a negative cost")]
    NegativeCost {
        /// Offending terminal.
        id: EntityId,
    },

    /// A consumer has zero, negative or non-finite demand.
    #[error("consumer {id} has non-positive demand")]
    NonPositiveDemand {
        /// Offending consumer.
        id: EntityId,
    },

    /// No terminal is eligible to serve a consumer.
    #[error("no eligible terminal to serve consumers")]
    NoEligibleTerminal,

    /// Refused to close the only active terminal.
    #[error("terminal {0} is the last active terminal")]
    LastActiveTerminal(EntityId),

    /// Terminal lookup by id failed.
    #[error("terminal {0} not found")]
    TerminalNotFound(EntityId),

    /// An activity configuration does not match the terminal count.
    #[error("configuration has {actual} flags but the network has {expected} terminals")]
    ConfigurationLength {
        /// Number of terminals in the network.
        expected: usize,
        /// Number of flags supplied.
        actual: usize,
    },

    /// Optimizer or cost model parameters are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Shorthand for results carrying a [`FacilityError`].
pub type Result<T> = std::result::Result<T, FacilityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            FacilityError::TerminalNotFound(7).to_string(),
            "terminal 7 not found"
        );
        assert_eq!(
            FacilityError::ConfigurationLength {
                expected: 3,
                actual: 2
            }
            .to_string(),
            "configuration has 2 flags but the network has 3 terminals"
        );
        assert_eq!(
            FacilityError::InvalidConfig("grid_step must be positive".into()).to_string(),
            "invalid configuration: grid_step must be positive"
        );
    }
}
