//! Nearest-terminal assignment policy.
//!
//! Every consumer is served by the closest open terminal (Euclidean
//! distance). Ties go to the terminal that appears first in the collection,
//! so the result only depends on the input order.

use crate::error::{FacilityError, Result};
use crate::models::{Consumer, Point, Terminal};

/// Which terminals may serve a consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Eligibility {
    /// Only open terminals.
    #[default]
    ActiveOnly,
    /// Every terminal regardless of its active flag.
    Any,
}

impl Eligibility {
    fn admits(self, terminal: &Terminal) -> bool {
        match self {
            Eligibility::ActiveOnly => terminal.is_active(),
            Eligibility::Any => true,
        }
    }
}

/// Result of a nearest-terminal query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    /// Index of the terminal in the queried slice.
    pub index: usize,
    /// Euclidean distance to it.
    pub distance: f64,
}

/// Euclidean distance between two points.
pub fn euclidean_distance(a: Point, b: Point) -> f64 {
    a.distance_to(&b)
}

/// Manhattan distance between two points.
pub fn manhattan_distance(a: Point, b: Point) -> f64 {
    a.manhattan_to(&b)
}

/// Finds the eligible terminal closest to `point`.
///
/// # Errors
/// [`FacilityError::NoEligibleTerminal`] when no terminal passes `eligibility`.
///
/// # Examples
///
/// ```
/// use u_facility::assignment::{nearest_terminal, Eligibility};
/// use u_facility::models::{Point, Terminal};
///
/// let terminals = vec![
///     Terminal::new(1, 0.0, 0.0, 10.0, 1.0),
///     Terminal::new(2, 10.0, 0.0, 10.0, 1.0),
/// ];
/// let nearest = nearest_terminal(Point::new(8.0, 0.0), &terminals, Eligibility::ActiveOnly).unwrap();
/// assert_eq!(nearest.index, 1);
/// assert_eq!(nearest.distance, 2.0);
/// ```
pub fn nearest_terminal(
    point: Point,
    terminals: &[Terminal],
    eligibility: Eligibility,
) -> Result<Nearest> {
    let mut best: Option<Nearest> = None;
    for (index, terminal) in terminals.iter().enumerate() {
        if !eligibility.admits(terminal) {
            continue;
        }
        let distance = point.distance_to(&terminal.location());
        // strict comparison keeps the first terminal on ties
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(Nearest { index, distance });
        }
    }
    best.ok_or(FacilityError::NoEligibleTerminal)
}

/// Points every consumer at its nearest active terminal.
///
/// Fails without touching any consumer when no terminal is active.
pub fn reassign(consumers: &mut [Consumer], terminals: &[Terminal]) -> Result<()> {
    if !terminals.iter().any(Terminal::is_active) {
        return Err(FacilityError::NoEligibleTerminal);
    }
    for consumer in consumers.iter_mut() {
        let nearest = nearest_terminal(consumer.location(), terminals, Eligibility::ActiveOnly)?;
        consumer.assign(nearest.index);
    }
    Ok(())
}
