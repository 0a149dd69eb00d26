//! `ps-waypoint` — things agents walk toward.
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`waypoint`] | `Waypoint` (scenario area), `QueueingWaypoint` (synthetic) |
//! | [`queue`]    | `WaitingQueue` — ordered, serially served resource         |
//!
//! Agents and clusters refer to these through [`ps_core::WaypointRef`]; the
//! scene owns the objects themselves.

pub mod queue;
pub mod waypoint;

#[cfg(test)]
mod tests;

pub use queue::{DEFAULT_MEAN_WAIT_SECS, WaitingQueue};
pub use waypoint::{QueueingWaypoint, Waypoint};
