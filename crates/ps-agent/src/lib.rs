//! `ps-agent` — pedestrian agents and their registry.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`agent`]   | `Agent` — position, type, shared waypoints, force switches |
//! | [`force`]   | `Force` — names of the movement model's forces            |
//! | [`store`]   | `AgentStore` (dense storage + outbox), `AgentRegistry`    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                  |
//! |---------|---------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Force`.           |

pub mod agent;
pub mod force;
pub mod store;

#[cfg(test)]
mod tests;

pub use agent::Agent;
pub use force::Force;
pub use store::{AgentRegistry, AgentStore};
