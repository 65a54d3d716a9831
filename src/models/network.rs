//! The network aggregate.

use std::collections::HashSet;
use std::fmt;

use tracing::warn;

use super::entity::{Center, Consumer, EntityId, Terminal};
use super::point::Point;
use crate::assignment;
use crate::error::{FacilityError, Result};

/// Location and open/closed state of one terminal.
///
/// Used to snapshot and restore only the fields an optimizer mutates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerminalState {
    /// Terminal location.
    pub location: Point,
    /// Whether the terminal is open.
    pub active: bool,
}

/// A single-echelon distribution network.
///
/// Owns one center, the ordered terminals and the ordered consumers, and
/// keeps every consumer assigned to its nearest active terminal.
///
/// `Clone` produces an independent deep copy, which is how before/after
/// pairs and comparison runs are isolated from each other.
///
/// # Examples
///
/// ```
/// use u_facility::models::{Center, Consumer, Network, Terminal};
///
/// let network = Network::new(
///     Center::new(0, 50.0, 50.0),
///     vec![
///         Terminal::new(10, 20.0, 20.0, 8000.0, 15.0),
///         Terminal::new(11, 80.0, 80.0, 8000.0, 15.0),
///     ],
///     vec![Consumer::new(100, 25.0, 25.0, 10.0)],
/// )
/// .unwrap();
///
/// let serving = network.assigned_terminal(&network.consumers()[0]).unwrap();
/// assert_eq!(serving.id(), 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Network {
    center: Center,
    terminals: Vec<Terminal>,
    consumers: Vec<Consumer>,
}

impl Network {
    /// Builds a network and assigns every consumer to its nearest active terminal.
    ///
    /// Only structural requirements are checked here; the data invariants
    /// (unique ids, non-negative costs, positive demand) are the loader's
    /// responsibility, see [`validate`](Self::validate).
    ///
    /// # Errors
    /// [`FacilityError::NoTerminals`], [`FacilityError::NoConsumers`], or
    /// [`FacilityError::NoEligibleTerminal`] if every terminal is closed.
    pub fn new(center: Center, terminals: Vec<Terminal>, consumers: Vec<Consumer>) -> Result<Self> {
        if terminals.is_empty() {
            return Err(FacilityError::NoTerminals);
        }
        if consumers.is_empty() {
            return Err(FacilityError::NoConsumers);
        }
        let mut network = Self {
            center,
            terminals,
            consumers,
        };
        network.reassign()?;
        Ok(network)
    }

    /// Builds a network from loader output that carries a list of centers.
    ///
    /// The first center is used.
    ///
    /// # Errors
    /// [`FacilityError::MissingCenter`] if `centers` is empty, plus the
    /// errors of [`new`](Self::new).
    pub fn from_parts(
        centers: Vec<Center>,
        terminals: Vec<Terminal>,
        consumers: Vec<Consumer>,
    ) -> Result<Self> {
        if centers.len() > 1 {
            warn!(count = centers.len(), "multiple centers supplied, using the first");
        }
        let center = centers
            .into_iter()
            .next()
            .ok_or(FacilityError::MissingCenter)?;
        Self::new(center, terminals, consumers)
    }

    /// Checks the data invariants an input loader must guarantee:
    /// globally unique ids, non-negative terminal costs, positive demand.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(1 + self.terminals.len() + self.consumers.len());
        seen.insert(self.center.id());
        for id in self
            .terminals
            .iter()
            .map(Terminal::id)
            .chain(self.consumers.iter().map(Consumer::id))
        {
            if !seen.insert(id) {
                return Err(FacilityError::DuplicateId(id));
            }
        }
        if let Some(t) = self
            .terminals
            .iter()
            .find(|t| !(t.fixed_cost() >= 0.0 && t.handling_cost() >= 0.0))
        {
            return Err(FacilityError::NegativeCost { id: t.id() });
        }
        if let Some(c) = self
            .consumers
            .iter()
            .find(|c| !(c.demand() > 0.0 && c.demand().is_finite()))
        {
            return Err(FacilityError::NonPositiveDemand { id: c.id() });
        }
        Ok(())
    }

    /// The distribution center.
    pub fn center(&self) -> &Center {
        &self.center
    }

    /// All terminals in input order.
    pub fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    /// All consumers in input order.
    pub fn consumers(&self) -> &[Consumer] {
        &self.consumers
    }

    /// Open terminals in input order.
    pub fn active_terminals(&self) -> impl Iterator<Item = &Terminal> {
        self.terminals.iter().filter(|t| t.is_active())
    }

    /// Number of open terminals.
    pub fn active_count(&self) -> usize {
        self.active_terminals().count()
    }

    /// Total demand over all consumers.
    pub fn total_demand(&self) -> f64 {
        self.consumers.iter().map(Consumer::demand).sum()
    }

    /// Position of a terminal in [`terminals`](Self::terminals).
    pub fn terminal_index(&self, id: EntityId) -> Result<usize> {
        self.terminals
            .iter()
            .position(|t| t.id() == id)
            .ok_or(FacilityError::TerminalNotFound(id))
    }

    /// Looks a terminal up by id.
    pub fn terminal_by_id(&self, id: EntityId) -> Result<&Terminal> {
        self.terminal_index(id).map(|i| &self.terminals[i])
    }

    /// The terminal currently serving `consumer`.
    pub fn assigned_terminal(&self, consumer: &Consumer) -> Option<&Terminal> {
        consumer
            .assigned_index()
            .and_then(|i| self.terminals.get(i))
    }

    /// Consumers served by the given terminal.
    pub fn consumers_for_terminal(&self, id: EntityId) -> Result<Vec<&Consumer>> {
        let index = self.terminal_index(id)?;
        Ok(self
            .consumers
            .iter()
            .filter(|c| c.assigned_index() == Some(index))
            .collect())
    }

    /// Total demand served by the given terminal.
    pub fn terminal_load(&self, id: EntityId) -> Result<f64> {
        Ok(self
            .consumers_for_terminal(id)?
            .iter()
            .map(|c| c.demand())
            .sum())
    }

    /// Demand served per terminal, indexed like [`terminals`](Self::terminals).
    pub fn loads(&self) -> Vec<f64> {
        let mut loads = vec![0.0; self.terminals.len()];
        for consumer in &self.consumers {
            if let Some(i) = consumer.assigned_index() {
                loads[i] += consumer.demand();
            }
        }
        loads
    }

    /// Recomputes every consumer's serving terminal.
    ///
    /// # Errors
    /// [`FacilityError::NoEligibleTerminal`] if every terminal is closed;
    /// assignments are left unchanged in that case.
    pub fn reassign(&mut self) -> Result<()> {
        assignment::reassign(&mut self.consumers, &self.terminals)
    }

    /// Opens a terminal and reassigns consumers.
    pub fn activate_terminal(&mut self, id: EntityId) -> Result<()> {
        let index = self.terminal_index(id)?;
        self.terminals[index].set_active(true);
        self.reassign()
    }

    /// Closes a terminal and reassigns consumers.
    ///
    /// # Errors
    /// [`FacilityError::LastActiveTerminal`] if it is the only open terminal.
    pub fn deactivate_terminal(&mut self, id: EntityId) -> Result<()> {
        let index = self.terminal_index(id)?;
        let terminal = &self.terminals[index];
        if terminal.is_active() && self.active_count() == 1 {
            return Err(FacilityError::LastActiveTerminal(id));
        }
        self.terminals[index].set_active(false);
        self.reassign()
    }

    /// Moves a terminal and reassigns consumers.
    pub fn relocate_terminal(&mut self, id: EntityId, location: Point) -> Result<()> {
        let index = self.terminal_index(id)?;
        self.terminals[index].set_location(location);
        self.reassign()
    }

    /// Active flags of all terminals, in input order.
    pub fn configuration(&self) -> Vec<bool> {
        self.terminals.iter().map(Terminal::is_active).collect()
    }

    /// Sets every terminal's active flag and reassigns consumers.
    ///
    /// # Errors
    /// [`FacilityError::ConfigurationLength`] on a length mismatch and
    /// [`FacilityError::NoEligibleTerminal`] for an all-closed configuration.
    /// The network is unchanged on error.
    pub fn apply_configuration(&mut self, flags: &[bool]) -> Result<()> {
        if flags.len() != self.terminals.len() {
            return Err(FacilityError::ConfigurationLength {
                expected: self.terminals.len(),
                actual: flags.len(),
            });
        }
        if !flags.iter().any(|&open| open) {
            return Err(FacilityError::NoEligibleTerminal);
        }
        for (terminal, &open) in self.terminals.iter_mut().zip(flags) {
            terminal.set_active(open);
        }
        self.reassign()
    }

    /// Captures location and active flag of every terminal.
    pub fn terminal_states(&self) -> Vec<TerminalState> {
        self.terminals
            .iter()
            .map(|t| TerminalState {
                location: t.location(),
                active: t.is_active(),
            })
            .collect()
    }

    /// Restores a capture taken with [`terminal_states`](Self::terminal_states)
    /// and reassigns consumers.
    pub fn restore_terminal_states(&mut self, states: &[TerminalState]) -> Result<()> {
        if states.len() != self.terminals.len() {
            return Err(FacilityError::ConfigurationLength {
                expected: self.terminals.len(),
                actual: states.len(),
            });
        }
        if !states.iter().any(|s| s.active) {
            return Err(FacilityError::NoEligibleTerminal);
        }
        for (terminal, state) in self.terminals.iter_mut().zip(states) {
            terminal.set_location(state.location);
            terminal.set_active(state.active);
        }
        self.reassign()
    }

    /// Mutable access for optimizer trials. Callers must reassign before
    /// the network is observed again.
    pub(crate) fn terminal_mut(&mut self, index: usize) -> &mut Terminal {
        &mut self.terminals[index]
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SHOWN_CONSUMERS: usize = 5;

        let loads = self.loads();
        writeln!(f, "Center: {}", self.center)?;
        writeln!(
            f,
            "Active terminals ({}/{}):",
            self.active_count(),
            self.terminals.len()
        )?;
        for (i, terminal) in self.terminals.iter().enumerate() {
            if !terminal.is_active() {
                continue;
            }
            let served = self
                .consumers
                .iter()
                .filter(|c| c.assigned_index() == Some(i))
                .count();
            writeln!(f, "  {terminal}")?;
            writeln!(f, "    serves {served} consumers, load {:.2}", loads[i])?;
        }

        let inactive: Vec<&Terminal> = self.terminals.iter().filter(|t| !t.is_active()).collect();
        if !inactive.is_empty() {
            writeln!(f, "Inactive terminals ({}):", inactive.len())?;
            for terminal in inactive {
                writeln!(f, "  {terminal}")?;
            }
        }

        writeln!(f, "Consumers ({}):", self.consumers.len())?;
        for consumer in self.consumers.iter().take(SHOWN_CONSUMERS) {
            match self.assigned_terminal(consumer) {
                Some(t) => writeln!(
                    f,
                    "  {consumer} -> terminal {} (distance {:.2})",
                    t.id(),
                    consumer.location().distance_to(&t.location())
                )?,
                None => writeln!(f, "  {consumer} -> unassigned")?,
            }
        }
        if self.consumers.len() > SHOWN_CONSUMERS {
            writeln!(f, "  ... and {} more", self.consumers.len() - SHOWN_CONSUMERS)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Network {
        Network::new(
            Center::new(0, 50.0, 50.0),
            vec![
                Terminal::new(10, 20.0, 20.0, 8000.0, 15.0),
                Terminal::new(11, 80.0, 20.0, 8000.0, 15.0),
                Terminal::new(12, 50.0, 80.0, 8000.0, 15.0),
            ],
            vec![
                Consumer::new(100, 22.0, 18.0, 60.0),
                Consumer::new(101, 18.0, 25.0, 70.0),
                Consumer::new(102, 78.0, 22.0, 80.0),
                Consumer::new(103, 52.0, 85.0, 90.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_initial_assignment() {
        let network = sample();
        let ids: Vec<EntityId> = network
            .consumers()
            .iter()
            .map(|c| network.assigned_terminal(c).unwrap().id())
            .collect();
        assert_eq!(ids, vec![10, 10, 11, 12]);
        assert_eq!(network.active_count(), 3);
        assert!((network.terminal_load(10).unwrap() - 130.0).abs() < 1e-12);
        assert_eq!(network.loads(), vec![130.0, 80.0, 90.0]);
        assert_eq!(network.total_demand(), 300.0);
    }

    #[test]
    fn test_structural_errors() {
        let center = Center::new(0, 0.0, 0.0);
        let t = Terminal::new(1, 0.0, 0.0, 1.0, 1.0);
        let c = Consumer::new(2, 1.0, 1.0, 1.0);
        assert_eq!(
            Network::new(center.clone(), vec![], vec![c.clone()]),
            Err(FacilityError::NoTerminals)
        );
        assert_eq!(
            Network::new(center, vec![t.clone()], vec![]),
            Err(FacilityError::NoConsumers)
        );
        assert_eq!(
            Network::from_parts(vec![], vec![t], vec![c]),
            Err(FacilityError::MissingCenter)
        );
    }

    #[test]
    fn test_from_parts_uses_first_center() {
        let network = Network::from_parts(
            vec![Center::new(0, 1.0, 2.0), Center::new(1, 9.0, 9.0)],
            vec![Terminal::new(10, 0.0, 0.0, 1.0, 1.0)],
            vec![Consumer::new(100, 1.0, 1.0, 1.0)],
        )
        .unwrap();
        assert_eq!(network.center().id(), 0);
    }

    #[test]
    fn test_validate() {
        assert!(sample().validate().is_ok());

        let dup = Network::new(
            Center::new(0, 0.0, 0.0),
            vec![Terminal::new(1, 0.0, 0.0, 1.0, 1.0)],
            vec![Consumer::new(1, 1.0, 1.0, 1.0)],
        )
        .unwrap();
        assert_eq!(dup.validate(), Err(FacilityError::DuplicateId(1)));

        let negative = Network::new(
            Center::new(0, 0.0, 0.0),
            vec![Terminal::new(1, 0.0, 0.0, -1.0, 1.0)],
            vec![Consumer::new(2, 1.0, 1.0, 1.0)],
        )
        .unwrap();
        assert_eq!(
            negative.validate(),
            Err(FacilityError::NegativeCost { id: 1 })
        );

        let no_demand = Network::new(
            Center::new(0, 0.0, 0.0),
            vec![Terminal::new(1, 0.0, 0.0, 1.0, 1.0)],
            vec![Consumer::new(2, 1.0, 1.0, 0.0)],
        )
        .unwrap();
        assert_eq!(
            no_demand.validate(),
            Err(FacilityError::NonPositiveDemand { id: 2 })
        );
    }

    #[test]
    fn test_lookup_errors_propagate() {
        let network = sample();
        assert_eq!(
            network.terminal_by_id(999),
            Err(FacilityError::TerminalNotFound(999))
        );
        assert!(network.consumers_for_terminal(999).is_err());
        assert!(network.terminal_load(999).is_err());
    }

    #[test]
    fn test_deactivate_reassigns() {
        let mut network = sample();
        network.deactivate_terminal(10).unwrap();
        for c in network.consumers() {
            assert!(network.assigned_terminal(c).unwrap().is_active());
        }
        assert!(network.consumers_for_terminal(10).unwrap().is_empty());

        network.activate_terminal(10).unwrap();
        assert_eq!(network.consumers_for_terminal(10).unwrap().len(), 2);
    }

    #[test]
    fn test_last_active_terminal_rejected() {
        let mut network = sample();
        network.deactivate_terminal(10).unwrap();
        network.deactivate_terminal(11).unwrap();
        assert_eq!(
            network.deactivate_terminal(12),
            Err(FacilityError::LastActiveTerminal(12))
        );
        assert_eq!(network.active_count(), 1);
    }

    #[test]
    fn test_apply_configuration() {
        let mut network = sample();
        network.apply_configuration(&[false, true, false]).unwrap();
        assert_eq!(network.configuration(), vec![false, true, false]);
        assert_eq!(network.consumers_for_terminal(11).unwrap().len(), 4);

        let before = network.clone();
        assert_eq!(
            network.apply_configuration(&[false, false, false]),
            Err(FacilityError::NoEligibleTerminal)
        );
        assert_eq!(
            network.apply_configuration(&[true]),
            Err(FacilityError::ConfigurationLength {
                expected: 3,
                actual: 1
            })
        );
        assert_eq!(network, before);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut network = sample();
        let states = network.terminal_states();
        network
            .relocate_terminal(12, Point::new(0.0, 0.0))
            .unwrap();
        network.deactivate_terminal(11).unwrap();
        network.restore_terminal_states(&states).unwrap();
        assert_eq!(network, sample());
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let original = sample();
        let mut copy = original.clone();
        copy.relocate_terminal(10, Point::new(1.0, 1.0)).unwrap();
        copy.deactivate_terminal(12).unwrap();

        assert_eq!(original, sample());
        assert_eq!(original.terminals()[0].location(), Point::new(20.0, 20.0));
        assert!(original.terminals()[2].is_active());
        assert_eq!(original.consumers()[3].assigned_index(), Some(2));
        assert_ne!(copy, original);
    }

    #[test]
    fn test_display_summary() {
        let mut network = sample();
        network.deactivate_terminal(12).unwrap();
        let text = network.to_string();
        assert!(text.contains("Active terminals (2/3):"));
        assert!(text.contains("Inactive terminals (1):"));
        assert!(text.contains("Consumers (4):"));
        assert!(!text.contains("more"));
    }
}
