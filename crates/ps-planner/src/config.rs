//! Tunables of the queueing planner.

/// Distances (metres) that shape how agents approach and stand in a queue.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueueingConfig {
    /// An approaching agent this close to the queue's tail joins the queue.
    pub end_position_radius: f64,

    /// Gap kept to the agent ahead, applied against the queue direction.
    pub private_space: f64,

    /// Followed-agent drift below this is ignored while queued.
    pub min_update_distance: f64,

    /// Completion radius of the synthetic waypoints handed to the movement
    /// model.
    pub waypoint_radius: f64,
}

impl Default for QueueingConfig {
    fn default() -> Self {
        Self {
            end_position_radius: 2.0,
            private_space:       0.7,
            min_update_distance: 0.4,
            waypoint_radius:     0.3,
        }
    }
}
