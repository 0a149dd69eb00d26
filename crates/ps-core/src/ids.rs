//! Strongly typed identifiers and the tagged waypoint reference.
//!
//! Agents, queues and area waypoints live in dense `Vec`s owned by the scene,
//! so their ids double as indices (`id.index()`).  Clusters are numbered by a
//! [`ClusterIdAllocator`] handed to the constructor instead of a hidden
//! process-wide counter, which keeps construction deterministic in tests.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "not registered yet".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }

            /// Id for the `Vec` slot `index`; `None` once the id space is
            /// exhausted (the last value is reserved for `INVALID`).
            pub fn from_index(index: usize) -> Option<Self> {
                Self::try_from(index).ok().filter(|id| id.is_valid())
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of an agent in the scene's agent store.
    pub struct AgentId(u32);
}

typed_id! {
    /// Identifier of an agent cluster (spawn description).
    pub struct ClusterId(u32);
}

typed_id! {
    /// Index of a waiting queue in the scene.
    pub struct QueueId(u32);
}

typed_id! {
    /// Index of a plain area waypoint in the scene.
    pub struct WaypointId(u32);
}

// ── ClusterIdAllocator ────────────────────────────────────────────────────────

/// Hands out monotonically increasing [`ClusterId`]s, starting at 1.
#[derive(Debug, Clone)]
pub struct ClusterIdAllocator {
    last: u32,
}

impl ClusterIdAllocator {
    pub fn new() -> Self {
        Self { last: 0 }
    }

    /// Reserve the next id.
    pub fn next_id(&mut self) -> ClusterId {
        self.last += 1;
        ClusterId(self.last)
    }
}

impl Default for ClusterIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// ── WaypointRef ───────────────────────────────────────────────────────────────

/// A shared reference to something an agent can walk toward.
///
/// The scene owns the referenced objects; agents and clusters only hold these
/// handles, so many agents may share one waypoint.  Whether a destination is a
/// waiting queue is answered by [`WaypointRef::as_queue`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WaypointRef {
    /// A positioned area with a completion radius.
    Area(WaypointId),
    /// A waiting queue; reaching it means queueing until released.
    Queue(QueueId),
}

impl WaypointRef {
    /// The queue behind this reference, if it is one.
    #[inline]
    pub fn as_queue(self) -> Option<QueueId> {
        match self {
            WaypointRef::Queue(queue) => Some(queue),
            WaypointRef::Area(_) => None,
        }
    }

    #[inline]
    pub fn is_queue(self) -> bool {
        self.as_queue().is_some()
    }
}

impl From<WaypointId> for WaypointRef {
    fn from(id: WaypointId) -> Self {
        WaypointRef::Area(id)
    }
}

impl From<QueueId> for WaypointRef {
    fn from(id: QueueId) -> Self {
        WaypointRef::Queue(id)
    }
}

impl fmt::Display for WaypointRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaypointRef::Area(id) => write!(f, "{id}"),
            WaypointRef::Queue(id) => write!(f, "{id}"),
        }
    }
}
