//! Network entities: the distribution center, terminals and consumers.

use std::fmt;

use super::point::Point;

/// Identifier shared by all entity kinds. Unique across a network.
pub type EntityId = u32;

/// The distribution center that supplies every terminal.
///
/// # Examples
///
/// ```
/// use u_facility::models::{Center, Point};
///
/// let dc = Center::new(0, 50.0, 50.0);
/// assert_eq!(dc.location(), Point::new(50.0, 50.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Center {
    id: EntityId,
    location: Point,
}

impl Center {
    /// Creates a center at the given coordinates.
    pub fn new(id: EntityId, x: f64, y: f64) -> Self {
        Self {
            id,
            location: Point::new(x, y),
        }
    }

    /// Center id.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Center location.
    pub fn location(&self) -> Point {
        self.location
    }
}

impl fmt::Display for Center {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Center(id={}, at {})", self.id, self.location)
    }
}

/// A candidate intermediate facility.
///
/// A terminal is open (`active`) or closed, and may be relocated by the
/// coordinate search. Both optimizers only touch the location and the
/// active flag; costs and identity never change.
///
/// # Examples
///
/// ```
/// use u_facility::models::Terminal;
///
/// let t = Terminal::new(10, 25.0, 25.0, 8000.0, 15.0);
/// assert!(t.is_active());
/// assert_eq!(t.fixed_cost(), 8000.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Terminal {
    id: EntityId,
    location: Point,
    fixed_cost: f64,
    handling_cost: f64,
    active: bool,
}

impl Terminal {
    /// Creates an active terminal.
    ///
    /// `fixed_cost` is paid while the terminal is open, `handling_cost` per
    /// unit of demand it serves.
    pub fn new(id: EntityId, x: f64, y: f64, fixed_cost: f64, handling_cost: f64) -> Self {
        Self {
            id,
            location: Point::new(x, y),
            fixed_cost,
            handling_cost,
            active: true,
        }
    }

    /// Terminal id.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Current location.
    pub fn location(&self) -> Point {
        self.location
    }

    /// Fixed operating cost.
    pub fn fixed_cost(&self) -> f64 {
        self.fixed_cost
    }

    /// Handling cost per unit of demand.
    pub fn handling_cost(&self) -> f64 {
        self.handling_cost
    }

    /// Whether the terminal is open.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_location(&mut self, location: Point) {
        self.location = location;
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Terminal(id={}, at {}, cost={}, {})",
            self.id,
            self.location,
            self.fixed_cost,
            if self.active { "active" } else { "inactive" }
        )
    }
}

/// A demand point served by exactly one open terminal.
///
/// The serving terminal is stored as an index into the owning network's
/// terminal collection and is only ever written by the assignment pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Consumer {
    id: EntityId,
    location: Point,
    demand: f64,
    assigned: Option<usize>,
}

impl Consumer {
    /// Creates an unassigned consumer.
    pub fn new(id: EntityId, x: f64, y: f64, demand: f64) -> Self {
        Self {
            id,
            location: Point::new(x, y),
            demand,
            assigned: None,
        }
    }

    /// Consumer id.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Consumer location.
    pub fn location(&self) -> Point {
        self.location
    }

    /// Demand volume.
    pub fn demand(&self) -> f64 {
        self.demand
    }

    /// Index of the serving terminal in [`Network::terminals`](super::Network::terminals).
    pub fn assigned_index(&self) -> Option<usize> {
        self.assigned
    }

    pub(crate) fn assign(&mut self, terminal_index: usize) {
        self.assigned = Some(terminal_index);
    }
}

impl fmt::Display for Consumer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Consumer(id={}, at {}, demand={})",
            self.id, self.location, self.demand
        )
    }
}
