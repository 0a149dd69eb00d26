//! `ps-core` — foundational types for the pedsim crowd core.
//!
//! Every other `ps-*` crate depends on this one.  It has no `ps-*`
//! dependencies and few external ones (`rand`, `nalgebra`, `thiserror`,
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`ids`]        | `AgentId`, `ClusterId`, `QueueId`, `WaypointId`, `WaypointRef`, `ClusterIdAllocator` |
//! | [`geo`]        | `Vec2`, `vec2`, `from_polar`, `distance`                   |
//! | [`agent_type`] | `AgentType` tag                                            |
//! | [`event`]      | `Event`, `Topic`, `Subscriber`                             |
//! | [`bus`]        | `SubscriptionBus`                                          |
//! | [`time`]       | `Tick`, `SimClock`, `SimConfig`                            |
//! | [`rng`]        | `SimRng`                                                   |
//! | [`error`]      | `PsError`, `PsResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, `AgentType`, configs. |

pub mod agent_type;
pub mod bus;
pub mod error;
pub mod event;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use agent_type::AgentType;
pub use bus::SubscriptionBus;
pub use error::{PsError, PsResult};
pub use event::{Event, Subscriber, Topic};
pub use geo::{Vec2, distance, from_polar, vec2};
pub use ids::{AgentId, ClusterId, ClusterIdAllocator, QueueId, WaypointId, WaypointRef};
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Tick};
