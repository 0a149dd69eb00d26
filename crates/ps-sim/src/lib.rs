//! `ps-sim` — scene orchestrator for the pedsim crowd core.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.sim.total_ticks:
//!   ① Dispatch — drain agent, queue and cluster outboxes; deliver each
//!                notification to the subscribers of its topic.
//!   ② Service  — advance every waiting queue; release front agents whose
//!                service time elapsed (AgentMayPass).
//!   ③ Forward  — dispatch again, then hand the tick's notifications to the
//!                observer (the view layer's feed).
//! ```
//!
//! Between ticks the caller drives movement: it asks
//! [`Scene::current_target`] where each agent should go and reports new
//! positions through [`Scene::set_agent_position`].
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                 |
//! |-----------|--------------------------------------------------------|
//! | `fx-hash` | Uses FxHash for the per-agent planner map.             |
//! | `serde`   | `Serialize`/`Deserialize` on `SceneConfig` and parts.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ps_core::{WaypointRef, vec2};
//! use ps_sim::{NoopObserver, SceneBuilder};
//!
//! let mut scene = SceneBuilder::new().seed(42).build()?;
//! let till = scene.add_queue("till", vec2(10.0, 0.0), 0.0)?;
//! let shoppers = scene.add_cluster(vec2(0.0, 0.0), 20);
//! if let Some(cluster) = scene.cluster_mut(shoppers) {
//!     cluster.set_distribution(4.0, 4.0);
//!     cluster.add_waypoint(WaypointRef::Queue(till));
//! }
//! let agents = scene.dissolve_cluster(shoppers)?;
//! scene.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod scene;
pub mod world;

#[cfg(test)]
mod tests;

pub use builder::SceneBuilder;
pub use config::{QueueServiceConfig, SceneConfig};
pub use error::{SceneError, SceneResult};
pub use observer::{EventLog, NoopObserver, SceneObserver};
pub use scene::{Scene, Target};
pub use world::World;
