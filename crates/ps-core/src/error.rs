//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `PsError` as one variant
//! where they surface core lookups.

use thiserror::Error;

use crate::{AgentId, ClusterId};

#[derive(Debug, Error)]
pub enum PsError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("cluster {0} not found")]
    ClusterNotFound(ClusterId),

    /// A registry ran out of ids.
    #[error("too many {0}")]
    CapacityExceeded(&'static str),
}

/// Shorthand result type for all `ps-*` crates.
pub type PsResult<T> = Result<T, PsError>;
