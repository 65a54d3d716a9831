//! Network cost model.
//!
//! Total cost is the sum of four components:
//!
//! 1. **Fixed**: `fixed_cost` of every open terminal
//! 2. **Handling**: `handling_cost × served demand` per open terminal
//! 3. **Center → terminal**: `distance × unit_transport_cost × served demand × bulk_discount`
//!    for every open terminal that serves at least one consumer
//! 4. **Terminal → consumer**: `distance × unit_transport_cost × demand` per served consumer
//!
//! The model is a pure function of the network. It trusts the current
//! assignment, so callers reassign consumers after changing terminals.

use std::fmt;

use crate::error::{FacilityError, Result};
use crate::models::Network;

/// Cost parameters shared by every optimizer.
///
/// # Examples
///
/// ```
/// use u_facility::cost::CostModel;
///
/// let model = CostModel::default().with_bulk_discount(0.2);
/// assert_eq!(model.unit_transport_cost, 1.0);
/// assert_eq!(model.bulk_discount, 0.2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostModel {
    /// Cost of moving one unit of demand over one unit of distance.
    pub unit_transport_cost: f64,

    /// Multiplier applied to center → terminal shipments (bulk transport).
    ///
    /// Values below 1.0 make trunk haulage cheaper than final delivery.
    pub bulk_discount: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            unit_transport_cost: 1.0,
            bulk_discount: 0.1,
        }
    }
}

impl CostModel {
    /// Sets the unit transport cost.
    pub fn with_unit_transport_cost(mut self, cost: f64) -> Self {
        self.unit_transport_cost = cost;
        self
    }

    /// Sets the bulk discount multiplier.
    pub fn with_bulk_discount(mut self, factor: f64) -> Self {
        self.bulk_discount = factor;
        self
    }

    /// Validates the parameters.
    pub fn validate(&self) -> Result<()> {
        if !(self.unit_transport_cost >= 0.0 && self.unit_transport_cost.is_finite()) {
            return Err(FacilityError::InvalidConfig(
                "unit_transport_cost must be a non-negative number".into(),
            ));
        }
        if !(self.bulk_discount >= 0.0 && self.bulk_discount.is_finite()) {
            return Err(FacilityError::InvalidConfig(
                "bulk_discount must be a non-negative number".into(),
            ));
        }
        Ok(())
    }

    /// Computes the full cost breakdown of the network.
    pub fn evaluate(&self, network: &Network) -> CostBreakdown {
        let terminals = network.terminals();
        let loads = network.loads();
        let center = network.center().location();

        let mut fixed_costs = 0.0;
        let mut handling_costs = 0.0;
        let mut center_to_terminal = 0.0;
        for (terminal, &load) in terminals.iter().zip(&loads) {
            if !terminal.is_active() {
                continue;
            }
            fixed_costs += terminal.fixed_cost();
            handling_costs += terminal.handling_cost() * load;
            if load > 0.0 {
                center_to_terminal += center.distance_to(&terminal.location())
                    * self.unit_transport_cost
                    * load
                    * self.bulk_discount;
            }
        }

        let mut terminal_to_consumer = 0.0;
        for consumer in network.consumers() {
            let Some(terminal) = network.assigned_terminal(consumer) else {
                continue;
            };
            if !terminal.is_active() {
                continue;
            }
            terminal_to_consumer += terminal.location().distance_to(&consumer.location())
                * self.unit_transport_cost
                * consumer.demand();
        }

        CostBreakdown::new(
            fixed_costs,
            handling_costs,
            center_to_terminal,
            terminal_to_consumer,
        )
    }

    /// Total network cost.
    pub fn total_cost(&self, network: &Network) -> f64 {
        self.evaluate(network).total_cost
    }
}

/// The four cost components of a network and their sum.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostBreakdown {
    /// Fixed costs of open terminals.
    pub fixed_costs: f64,
    /// Per-unit handling at terminals.
    pub handling_costs: f64,
    /// Bulk transport from the center to terminals.
    pub transport_center_to_terminal: f64,
    /// Delivery from terminals to consumers.
    pub transport_terminal_to_consumer: f64,
    /// Sum of the four components.
    pub total_cost: f64,
}

impl CostBreakdown {
    /// Builds a breakdown; the total is derived from the components.
    pub fn new(
        fixed_costs: f64,
        handling_costs: f64,
        transport_center_to_terminal: f64,
        transport_terminal_to_consumer: f64,
    ) -> Self {
        Self {
            fixed_costs,
            handling_costs,
            transport_center_to_terminal,
            transport_terminal_to_consumer,
            total_cost: fixed_costs
                + handling_costs
                + transport_center_to_terminal
                + transport_terminal_to_consumer,
        }
    }

    /// Both transport legs together.
    pub fn transport_total(&self) -> f64 {
        self.transport_center_to_terminal + self.transport_terminal_to_consumer
    }

    /// Named components followed by the total, for export.
    pub fn components(&self) -> [(&'static str, f64); 5] {
        [
            ("fixed_costs", self.fixed_costs),
            ("handling_costs", self.handling_costs),
            (
                "transport_center_to_terminal",
                self.transport_center_to_terminal,
            ),
            (
                "transport_terminal_to_consumer",
                self.transport_terminal_to_consumer,
            ),
            ("total_cost", self.total_cost),
        ]
    }
}

impl fmt::Display for CostBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fixed terminal costs:     {:>14.2}", self.fixed_costs)?;
        writeln!(f, "Handling costs:           {:>14.2}", self.handling_costs)?;
        writeln!(
            f,
            "Center -> terminals:      {:>14.2}",
            self.transport_center_to_terminal
        )?;
        writeln!(
            f,
            "Terminals -> consumers:   {:>14.2}",
            self.transport_terminal_to_consumer
        )?;
        writeln!(f, "Transport total:          {:>14.2}", self.transport_total())?;
        write!(f, "Total cost:               {:>14.2}", self.total_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Center, Consumer, Terminal};
    use proptest::prelude::*;

    fn two_terminal_network() -> Network {
        // center at origin, terminals at (3,4) and (30,40)
        Network::new(
            Center::new(0, 0.0, 0.0),
            vec![
                Terminal::new(1, 3.0, 4.0, 100.0, 2.0),
                Terminal::new(2, 30.0, 40.0, 50.0, 1.0),
            ],
            vec![
                Consumer::new(10, 3.0, 8.0, 10.0),
                Consumer::new(11, 6.0, 8.0, 5.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_components_by_hand() {
        let network = two_terminal_network();
        let costs = CostModel::default().evaluate(&network);

        // terminal 2 is open but serves nobody: fixed cost only
        assert!((costs.fixed_costs - 150.0).abs() < 1e-9);
        assert!((costs.handling_costs - 30.0).abs() < 1e-9);
        // 5 * 1 * 15 * 0.1
        assert!((costs.transport_center_to_terminal - 7.5).abs() < 1e-9);
        // 4 * 10 + 5 * 5
        assert!((costs.transport_terminal_to_consumer - 65.0).abs() < 1e-9);
        assert!((costs.total_cost - 252.5).abs() < 1e-9);
        assert!((costs.transport_total() - 72.5).abs() < 1e-9);
    }

    #[test]
    fn test_inactive_terminals_cost_nothing() {
        let mut network = two_terminal_network();
        network.deactivate_terminal(2).unwrap();
        let costs = CostModel::default().evaluate(&network);
        assert!((costs.fixed_costs - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_parameters_scale_transport() {
        let network = two_terminal_network();
        let model = CostModel::default()
            .with_unit_transport_cost(2.0)
            .with_bulk_discount(1.0);
        let costs = model.evaluate(&network);
        assert!((costs.transport_center_to_terminal - 150.0).abs() < 1e-9);
        assert!((costs.transport_terminal_to_consumer - 130.0).abs() < 1e-9);
        assert_eq!(model.total_cost(&network), costs.total_cost);
    }

    #[test]
    fn test_validate() {
        assert!(CostModel::default().validate().is_ok());
        assert!(CostModel::default()
            .with_bulk_discount(-0.1)
            .validate()
            .is_err());
        assert!(CostModel::default()
            .with_unit_transport_cost(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_components_listing() {
        let costs = CostBreakdown::new(1.0, 2.0, 3.0, 4.0);
        let names: Vec<&str> = costs.components().iter().map(|(n, _)| *n).collect();
        assert_eq!(names[0], "fixed_costs");
        assert_eq!(costs.components()[4], ("total_cost", 10.0));
        assert!(costs.to_string().contains("Total cost:"));
    }

    proptest! {
        #[test]
        fn prop_total_is_sum_of_components(
            sites in prop::collection::vec((0.0f64..100.0, 0.0f64..100.0, 0.0f64..10_000.0, 0.0f64..20.0), 1..8),
            points in prop::collection::vec((0.0f64..100.0, 0.0f64..100.0, 1.0f64..100.0), 1..30),
            discount in 0.0f64..1.0,
        ) {
            let terminals = sites
                .iter()
                .enumerate()
                .map(|(i, &(x, y, fixed, handling))| Terminal::new(1 + i as u32, x, y, fixed, handling))
                .collect();
            let consumers = points
                .iter()
                .enumerate()
                .map(|(i, &(x, y, d))| Consumer::new(1000 + i as u32, x, y, d))
                .collect();
            let network = Network::new(Center::new(0, 50.0, 50.0), terminals, consumers).unwrap();
            let c = CostModel::default().with_bulk_discount(discount).evaluate(&network);
            prop_assert_eq!(
                c.total_cost,
                c.fixed_costs
                    + c.handling_costs
                    + c.transport_center_to_terminal
                    + c.transport_terminal_to_consumer
            );
        }
    }
}
