//! `ps-planner` — waypoint planning for agents that must queue.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`planner`] | `QueueingWaypointPlanner`, `QueueingStatus`                     |
//! | [`context`] | `QueueingContext` — the planner's view of agents, queues, bus  |
//! | [`config`]  | `QueueingConfig` — radii and distances                          |
//! | [`error`]   | `PlannerError`, `PlannerResult<T>`                              |
//!
//! # Design notes
//!
//! The planner is a waypoint *source*: the movement model asks it for a
//! position and radius and walks there.  It never moves the agent itself.
//! It owns its synthetic waypoint and refers to the agent, the queue, and
//! the followed agent by id only, so all world access goes through a
//! [`QueueingContext`] passed into each call.

pub mod config;
pub mod context;
pub mod error;
pub mod planner;


pub use config::QueueingConfig;
pub use context::QueueingContext;
pub use error::{PlannerError, PlannerResult};
pub use planner::{QUEUEING_DISABLED_FORCES, QueueingStatus, QueueingWaypointPlanner};
