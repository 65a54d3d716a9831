//! Planar coordinates.

use std::fmt;

/// A location in the plane.
///
/// # Examples
///
/// ```
/// use u_facility::models::Point;
///
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(3.0, 4.0);
/// assert_eq!(a.distance_to(&b), 5.0);
/// assert_eq!(a.manhattan_to(&b), 7.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// X-coordinate.
    pub x: f64,
    /// Y-coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Manhattan (L1) distance to another point.
    pub fn manhattan_to(&self, other: &Point) -> f64 {
        (other.x - self.x).abs() + (other.y - self.y).abs()
    }

    /// Returns `true` if both coordinates differ by less than `tolerance`.
    pub fn near(&self, other: &Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() < tolerance && (self.y - other.y).abs() < tolerance
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_symmetric() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(-3.0, 5.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-12);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_manhattan() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(-3.0, 5.0);
        assert!((a.manhattan_to(&b) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_near() {
        let a = Point::new(10.0, 10.0);
        assert!(a.near(&Point::new(10.05, 9.95), 0.1));
        assert!(!a.near(&Point::new(10.2, 10.0), 0.1));
    }

    #[test]
    fn test_display() {
        assert_eq!(Point::new(5.0, 12.26).to_string(), "(5.0, 12.3)");
    }
}
