//! `ps-cluster` — turn declarative population descriptions into agents.
//!
//! # Usage
//!
//! ```rust
//! use ps_agent::AgentStore;
//! use ps_cluster::AgentCluster;
//! use ps_core::{ClusterIdAllocator, SimRng, vec2};
//!
//! let mut ids = ClusterIdAllocator::new();
//! let mut cluster = AgentCluster::new(&mut ids, vec2(0.0, 0.0), 25);
//! cluster.set_distribution(4.0, 2.0);
//!
//! let mut store = AgentStore::new();
//! let mut rng = SimRng::new(42);
//! let spawned = cluster.dissolve(&mut rng, &mut store);
//! assert_eq!(spawned.len(), 25);
//! assert_eq!(store.len(), 25);
//! ```

pub mod cluster;


pub use cluster::{AgentCluster, Spread};
