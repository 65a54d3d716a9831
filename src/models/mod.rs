//! Network data model.
//!
//! - [`Center`]: the single distribution source
//! - [`Terminal`]: a candidate facility that can be opened, closed and moved
//! - [`Consumer`]: a fixed demand point
//! - [`Network`]: owns all of the above plus the consumer → terminal assignment

mod entity;
mod network;
mod point;

pub use entity::{Center, Consumer, EntityId, Terminal};
pub use network::{Network, TerminalState};
pub use point::Point;
