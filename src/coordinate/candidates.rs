//! Candidate terminal locations for the relocation phase.

use crate::error::{FacilityError, Result};
use crate::models::{Network, Point};

/// Largest candidate grid (points before filtering) a run may build.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Builds the candidate location set for a network.
///
/// A regular grid with spacing `step` covers the consumers' bounding box,
/// starting at the truncated minimum coordinates and ending at the
/// truncated maximum (inclusive). Grid points within `clearance` of a
/// consumer are dropped so a terminal never sits on top of a demand
/// point. The center's location is always appended.
///
/// The order is deterministic: `x` ascending, then `y` ascending, center
/// last. The relocation phase keeps the first of equally good candidates,
/// so this order is also the tie-break.
///
/// # Errors
/// [`FacilityError::InvalidConfig`] if `step` is not positive or the grid
/// would exceed [`MAX_GRID_POINTS`].
pub fn candidate_locations(network: &Network, step: f64, clearance: f64) -> Result<Vec<Point>> {
    if !(step > 0.0 && step.is_finite()) {
        return Err(FacilityError::InvalidConfig(
            "grid_step must be a positive number".into(),
        ));
    }

    let consumers = network.consumers();
    let (min_x, max_x, min_y, max_y) = consumers.iter().map(|c| c.location()).fold(
        (
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        ),
        |(lx, hx, ly, hy), p| (lx.min(p.x), hx.max(p.x), ly.min(p.y), hy.max(p.y)),
    );

    let (nx, ny) = (axis_len(min_x, max_x, step), axis_len(min_y, max_y, step));
    if nx * ny > MAX_GRID_POINTS as f64 {
        return Err(FacilityError::InvalidConfig(format!(
            "grid_step {step} yields {} candidate points, limit is {MAX_GRID_POINTS}",
            nx * ny
        )));
    }
    let xs = axis(min_x, max_x, step);
    let ys = axis(min_y, max_y, step);

    let mut locations = Vec::with_capacity(xs.len() * ys.len() + 1);
    for &x in &xs {
        for &y in &ys {
            let point = Point::new(x, y);
            if consumers
                .iter()
                .any(|c| c.location().near(&point, clearance))
            {
                continue;
            }
            locations.push(point);
        }
    }

    let center = network.center().location();
    if !locations.contains(&center) {
        locations.push(center);
    }
    Ok(locations)
}

/// Number of grid coordinates from `trunc(lo)` to `trunc(hi)` inclusive.
fn axis_len(lo: f64, hi: f64, step: f64) -> f64 {
    if !(lo.is_finite() && hi.is_finite()) || hi.trunc() < lo.trunc() {
        return 0.0;
    }
    ((hi.trunc() - lo.trunc()) / step).floor() + 1.0
}

/// Grid coordinates from `trunc(lo)` to `trunc(hi)` inclusive.
fn axis(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    let start = lo.trunc();
    let count = axis_len(lo, hi, step) as usize;
    (0..count).map(|i| start + i as f64 * step).collect()
}
