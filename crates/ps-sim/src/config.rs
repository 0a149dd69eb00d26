//! Scene-level configuration.

use ps_core::SimConfig;
use ps_planner::QueueingConfig;
use ps_waypoint::DEFAULT_MEAN_WAIT_SECS;

/// How waiting queues serve their front agent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueueServiceConfig {
    /// The front agent must stand this close to the service point before its
    /// service time starts.
    pub front_radius: f64,

    /// Mean service time given to queues created through the scene.
    pub mean_wait_secs: f64,
}

impl Default for QueueServiceConfig {
    fn default() -> Self {
        Self {
            front_radius:   1.0,
            mean_wait_secs: DEFAULT_MEAN_WAIT_SECS,
        }
    }
}

/// Everything a [`Scene`][crate::Scene] is configured with.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneConfig {
    pub sim:      SimConfig,
    pub queueing: QueueingConfig,
    pub service:  QueueServiceConfig,
}

impl SceneConfig {
    /// Reject values the scene cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        let dt = self.sim.tick_duration_secs;
        if !dt.is_finite() || dt <= 0.0 {
            return Err(format!("tick_duration_secs must be positive, got {dt}"));
        }

        let distances = [
            ("end_position_radius", self.queueing.end_position_radius),
            ("private_space",       self.queueing.private_space),
            ("min_update_distance", self.queueing.min_update_distance),
            ("waypoint_radius",     self.queueing.waypoint_radius),
            ("front_radius",        self.service.front_radius),
            ("mean_wait_secs",      self.service.mean_wait_secs),
        ];
        for (name, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a non-negative number, got {value}"));
            }
        }
        Ok(())
    }
}
