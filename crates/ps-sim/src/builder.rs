//! Fluent builder for constructing a [`Scene`].

use ps_core::SimConfig;
use ps_planner::QueueingConfig;

use crate::{QueueServiceConfig, Scene, SceneConfig, SceneError, SceneResult};

/// Fluent builder for [`Scene`].
///
/// Every input has a default:
///
/// | Method            | Default                          |
/// |-------------------|----------------------------------|
/// | `.sim(c)`         | `SimConfig::default()`           |
/// | `.seed(s)`        | `0`                              |
/// | `.queueing(c)`    | `QueueingConfig::default()`      |
/// | `.service(c)`     | `QueueServiceConfig::default()`  |
///
/// # Example
///
/// ```rust,ignore
/// let mut scene = SceneBuilder::new().seed(7).build()?;
/// let till = scene.add_queue("till", vec2(10.0, 0.0), 0.0)?;
/// ```
#[derive(Default)]
pub struct SceneBuilder {
    config: SceneConfig,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a complete configuration.
    pub fn config(mut self, config: SceneConfig) -> Self {
        self.config = config;
        self
    }

    pub fn sim(mut self, sim: SimConfig) -> Self {
        self.config.sim = sim;
        self
    }

    /// Override only the master RNG seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.sim.seed = seed;
        self
    }

    pub fn queueing(mut self, queueing: QueueingConfig) -> Self {
        self.config.queueing = queueing;
        self
    }

    pub fn service(mut self, service: QueueServiceConfig) -> Self {
        self.config.service = service;
        self
    }

    /// Validate the configuration and return an empty scene.
    pub fn build(self) -> SceneResult<Scene> {
        self.config.validate().map_err(SceneError::Config)?;
        log::debug!(
            "scene built: seed {}, {} s per tick, {} ticks",
            self.config.sim.seed,
            self.config.sim.tick_duration_secs,
            self.config.sim.total_ticks,
        );
        Ok(Scene::new(self.config))
    }
}
