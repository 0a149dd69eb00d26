//! Scene observer trait for progress reporting and rendering.

use ps_core::{Event, Tick};

/// Callbacks invoked by [`Scene::step`][crate::Scene::step] and the run
/// loops.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — release counter
///
/// ```rust,ignore
/// struct Released(usize);
///
/// impl SceneObserver for Released {
///     fn on_tick_end(&mut self, _tick: Tick, released: usize) {
///         self.0 += released;
///     }
/// }
/// ```
pub trait SceneObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per notification, after subscribers have handled it.
    ///
    /// This is the view layer's feed: agent and cluster placement and type
    /// changes arrive here alongside queue traffic.
    fn on_event(&mut self, _event: &Event) {}

    /// Called at the end of each tick.
    ///
    /// `released` is the number of agents the waiting queues let pass.
    fn on_tick_end(&mut self, _tick: Tick, _released: usize) {}

    /// Called once after the final tick of [`Scene::run`][crate::Scene::run].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SceneObserver`] that does nothing.
pub struct NoopObserver;

impl SceneObserver for NoopObserver {}

/// Records every forwarded event.  Handy for tests and headless tools.
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<Event>,
}

impl SceneObserver for EventLog {
    fn on_event(&mut self, event: &Event) {
        self.events.push(event.clone());
    }
}
