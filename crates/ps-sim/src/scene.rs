//! The `Scene` struct, notification dispatch and the tick loop.

use ps_agent::{Agent, AgentRegistry};
use ps_cluster::AgentCluster;
use ps_core::{
    AgentId, ClusterId, ClusterIdAllocator, Event, PsError, QueueId, SimClock, SimRng, Subscriber,
    Tick, Vec2, WaypointId, WaypointRef,
};
use ps_planner::QueueingWaypointPlanner;
use ps_waypoint::{WaitingQueue, Waypoint};

use crate::{SceneConfig, SceneObserver, SceneResult, World};

#[cfg(feature = "fx-hash")]
type PlannerMap = rustc_hash::FxHashMap<AgentId, QueueingWaypointPlanner>;
#[cfg(not(feature = "fx-hash"))]
type PlannerMap = std::collections::HashMap<AgentId, QueueingWaypointPlanner>;

/// Where an agent should be walking, as handed to the movement model.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Target {
    pub position: Vec2,
    pub radius:   f64,
}

// ── Scene ─────────────────────────────────────────────────────────────────────

/// The pedestrian scene.
///
/// A tick runs in three phases:
///
/// 1. **Dispatch**: drain every outbox (agents, queues, clusters) and hand
///    each notification to its topic's subscribers.
/// 2. **Service**: advance every waiting queue's service timer; released
///    agents are announced with `AgentMayPass`.
/// 3. **Dispatch + forward**: route the new notifications, then forward the
///    tick's notifications to the observer.
///
/// Movement is not simulated here.  The caller asks
/// [`current_target`](Scene::current_target) where an agent should go and
/// reports its new position with
/// [`set_agent_position`](Scene::set_agent_position).
///
/// Create via [`SceneBuilder`][crate::SceneBuilder].
pub struct Scene {
    pub config: SceneConfig,
    pub clock:  SimClock,

    world:       World,
    planners:    PlannerMap,
    clusters:    Vec<AgentCluster>,
    cluster_ids: ClusterIdAllocator,
    rng:         SimRng,

    /// Dispatched notifications waiting to be forwarded to the observer.
    forwarded: Vec<Event>,
}

impl Scene {
    pub(crate) fn new(config: SceneConfig) -> Self {
        Self {
            clock:       config.sim.make_clock(),
            rng:         SimRng::new(config.sim.seed),
            config,
            world:       World::new(),
            planners:    PlannerMap::default(),
            clusters:    Vec::new(),
            cluster_ids: ClusterIdAllocator::new(),
            forwarded:   Vec::new(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn agent(&self, agent: AgentId) -> Option<&Agent> {
        self.world.agents.get(agent)
    }

    pub fn waypoint(&self, id: WaypointId) -> Option<&Waypoint> {
        self.world.waypoint(id)
    }

    pub fn queue(&self, id: QueueId) -> Option<&WaitingQueue> {
        self.world.queue(id)
    }

    pub fn cluster(&self, id: ClusterId) -> Option<&AgentCluster> {
        self.clusters.iter().find(|c| c.id() == id)
    }

    /// Mutable access for configuring a cluster.  Changes are announced on
    /// the next dispatch.
    pub fn cluster_mut(&mut self, id: ClusterId) -> Option<&mut AgentCluster> {
        self.clusters.iter_mut().find(|c| c.id() == id)
    }

    /// The queueing planner currently serving `agent`, if it is engaged
    /// with a queue.
    pub fn planner(&self, agent: AgentId) -> Option<&QueueingWaypointPlanner> {
        self.planners.get(&agent)
    }

    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    // ── Scene construction ────────────────────────────────────────────────

    pub fn add_waypoint(&mut self, name: impl Into<String>, position: Vec2, radius: f64) -> SceneResult<WaypointId> {
        Ok(self.world.push_waypoint(name.into(), position, radius)?)
    }

    /// Add a waiting queue served at `position`, facing `direction`
    /// (radians).  It uses the scene's configured mean service time.
    pub fn add_queue(&mut self, name: impl Into<String>, position: Vec2, direction: f64) -> SceneResult<QueueId> {
        let name = name.into();
        let mean_wait = self.config.service.mean_wait_secs;
        let id = self
            .world
            .push_queue(|id| WaitingQueue::new(id, name, position, direction).with_mean_wait(mean_wait))?;
        Ok(id)
    }

    /// Add a cluster of `count` agents at `position`.  Configure it further
    /// through [`cluster_mut`](Scene::cluster_mut).
    pub fn add_cluster(&mut self, position: Vec2, count: usize) -> ClusterId {
        let cluster = AgentCluster::new(&mut self.cluster_ids, position, count);
        let id = cluster.id();
        self.clusters.push(cluster);
        id
    }

    /// Register a single hand-built agent.
    pub fn add_agent(&mut self, agent: Agent) -> AgentId {
        let id = self.world.add_agent(agent);
        self.dispatch();
        id
    }

    /// Spawn the population described by cluster `id`.
    pub fn dissolve_cluster(&mut self, id: ClusterId) -> SceneResult<Vec<AgentId>> {
        let cluster = self
            .clusters
            .iter()
            .find(|c| c.id() == id)
            .ok_or(PsError::ClusterNotFound(id))?;
        let agents = cluster.dissolve(&mut self.rng, &mut self.world);
        self.dispatch();
        Ok(agents)
    }

    /// Report that `agent` now stands at `position`.  Followers and queues
    /// react before this returns.
    pub fn set_agent_position(&mut self, agent: AgentId, position: Vec2) -> SceneResult<()> {
        self.world.agents.set_position(agent, position)?;
        self.dispatch();
        Ok(())
    }

    // ── Targets ───────────────────────────────────────────────────────────

    /// Where `agent` should walk now.
    ///
    /// The agent's waypoints are visited in order, wrapping around.  An area
    /// waypoint is done once the agent stands inside its radius.  A queue
    /// waypoint is handed to a queueing planner, created on first use and
    /// dropped once the queue lets the agent pass.
    ///
    /// Returns `None` when the agent does not exist, has no waypoints, or
    /// finished every waypoint during this call.
    pub fn current_target(&mut self, agent: AgentId) -> Option<Target> {
        let rounds = self.world.agents.get(agent)?.waypoints().len();

        for _ in 0..rounds {
            let destination = self.world.agents.get(agent)?.current_destination()?;
            match destination {
                WaypointRef::Area(id) => {
                    let position = self.world.agents.position(agent)?;
                    match self.world.waypoint(id) {
                        Some(waypoint) if !waypoint.is_reached_by(position) => {
                            return Some(Target { position: waypoint.position(), radius: waypoint.radius() });
                        }
                        Some(_) => {}
                        None => log::warn!("{agent}: waypoint {id} does not exist, skipping it"),
                    }
                }
                WaypointRef::Queue(queue) => {
                    if let Some(target) = self.queue_target(agent, queue) {
                        return Some(target);
                    }
                }
            }
            self.world.agents.get_mut(agent)?.advance_destination();
        }
        None
    }

    /// Drive `agent`'s planner for `queue`.  `None` means the queue is done
    /// with the agent (or cannot serve it) and the next waypoint is due.
    fn queue_target(&mut self, agent: AgentId, queue: QueueId) -> Option<Target> {
        let queueing = &self.config.queueing;
        let planner = self
            .planners
            .entry(agent)
            .or_insert_with(|| QueueingWaypointPlanner::new(queueing.clone()));

        if planner.waiting_queue() != Some(queue) {
            planner.set_agent(agent, &mut self.world);
            if let Err(e) = planner.set_destination(WaypointRef::Queue(queue), &mut self.world) {
                log::warn!("{agent} skips its queue waypoint: {e}");
                self.release_planner(agent);
                return None;
            }
        }

        if planner.has_completed_destination() {
            self.release_planner(agent);
            return None;
        }

        let target = planner
            .get_current_waypoint(&mut self.world)
            .map(|w| Target { position: w.position(), radius: w.radius() });
        self.dispatch();
        target
    }

    fn release_planner(&mut self, agent: AgentId) {
        if let Some(mut planner) = self.planners.remove(&agent) {
            planner.clear(&mut self.world);
        }
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Run one tick; returns the number of agents released by queues.
    pub fn step<O: SceneObserver>(&mut self, observer: &mut O) -> usize {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        self.dispatch();
        let released = self.world.update_queues(
            self.clock.elapsed_secs(),
            self.config.service.front_radius,
            &mut self.rng,
        );
        self.dispatch();
        self.flush_events(observer);

        observer.on_tick_end(now, released.len());
        self.clock.advance();
        released.len()
    }

    /// Run from the current tick to `config.sim.end_tick()`.
    pub fn run<O: SceneObserver>(&mut self, observer: &mut O) {
        while self.clock.current_tick < self.config.sim.end_tick() {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SceneObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
    }

    /// Forward every notification dispatched since the last flush.
    pub fn flush_events<O: SceneObserver>(&mut self, observer: &mut O) {
        for event in self.forwarded.drain(..) {
            observer.on_event(&event);
        }
    }

    // ── Dispatch ──────────────────────────────────────────────────────────

    /// Route pending notifications until every outbox is empty.
    ///
    /// Handlers may publish further notifications; those are picked up by
    /// the next round.  Within a round, events keep their publication order
    /// and subscribers are served in ascending order.
    fn dispatch(&mut self) {
        loop {
            let mut batch = self.world.take_notifications();
            for cluster in &mut self.clusters {
                batch.extend(cluster.take_notifications());
            }
            if batch.is_empty() {
                break;
            }

            for event in batch {
                if let Some(topic) = event.topic() {
                    for subscriber in self.world.bus.subscribers(topic) {
                        match subscriber {
                            Subscriber::Planner(agent) => {
                                if let Some(planner) = self.planners.get_mut(&agent) {
                                    planner.handle_event(&event, &mut self.world);
                                }
                            }
                            Subscriber::Queue(queue) => self.world.deliver_to_queue(queue, &event),
                        }
                    }
                }
                self.forwarded.push(event);
            }
        }
    }
}
