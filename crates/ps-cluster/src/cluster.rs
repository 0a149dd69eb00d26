//! `AgentCluster` — a reusable spawn description.
//!
//! A cluster describes a population (origin, head count, spread, type,
//! waypoints) without owning any agents.  [`AgentCluster::dissolve`] turns
//! the description into a fresh batch of agents every time it is called.

use std::fmt;

use rand::distributions::Uniform;

use ps_agent::{Agent, AgentRegistry};
use ps_core::{
    AgentId, AgentType, ClusterId, ClusterIdAllocator, Event, QueueId, SimRng, Vec2, WaypointRef,
    vec2,
};

/// Full extents of the rectangle agents are scattered over, centred on the
/// cluster origin.  An extent of exactly zero pins that axis to the origin.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Spread {
    pub width:  f64,
    pub height: f64,
}

#[derive(Debug, Clone)]
pub struct AgentCluster {
    id: ClusterId,
    position: Vec2,
    count: usize,
    distribution: Spread,
    agent_type: AgentType,
    /// Reserved for group formation; not acted upon yet.
    shall_create_groups: bool,
    waypoints: Vec<WaypointRef>,
    notifications: Vec<Event>,
}

impl AgentCluster {
    /// A cluster of `count` agents at `position` with no spread.
    pub fn new(ids: &mut ClusterIdAllocator, position: Vec2, count: usize) -> Self {
        Self {
            id: ids.next_id(),
            position,
            count,
            distribution: Spread::default(),
            agent_type: AgentType::default(),
            shall_create_groups: true,
            waypoints: Vec::new(),
            notifications: Vec::new(),
        }
    }

    /// Spawn `count` new agents and register each with `registry`.
    ///
    /// Each agent is offset from the origin by independent uniform draws in
    /// `[-width/2, width/2]` and `[-height/2, height/2]`; a zero extent
    /// contributes no offset.  Every agent receives the cluster's type and
    /// all of its waypoints.  The cluster itself is left untouched, so
    /// dissolving again spawns another, disjoint batch.
    pub fn dissolve<R: AgentRegistry>(&self, rng: &mut SimRng, registry: &mut R) -> Vec<AgentId> {
        let spread_x = axis_distribution(self.distribution.width);
        let spread_y = axis_distribution(self.distribution.height);

        let agents: Vec<AgentId> = (0..self.count)
            .map(|_| {
                let mut position = self.position;
                if let Some(dist) = &spread_x {
                    position.x += rng.sample(dist);
                }
                if let Some(dist) = &spread_y {
                    position.y += rng.sample(dist);
                }

                let mut agent = Agent::new(position, self.agent_type);
                for &waypoint in &self.waypoints {
                    agent.add_waypoint(waypoint);
                }
                registry.add_agent(agent)
            })
            .filter(|id| id.is_valid())
            .collect();

        log::debug!("{self} dissolved into {} agents", agents.len());
        agents
    }

    // ── Identity and population ───────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> ClusterId {
        self.id
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn set_count(&mut self, count: usize) {
        self.count = count;
    }

    // ── Waypoints ─────────────────────────────────────────────────────────

    pub fn waypoints(&self) -> &[WaypointRef] {
        &self.waypoints
    }

    pub fn add_waypoint(&mut self, waypoint: WaypointRef) {
        self.waypoints.push(waypoint);
    }

    /// Drop every occurrence of `waypoint`.  Returns `true` if any was found.
    pub fn remove_waypoint(&mut self, waypoint: WaypointRef) -> bool {
        let before = self.waypoints.len();
        self.waypoints.retain(|&w| w != waypoint);
        self.waypoints.len() != before
    }

    pub fn add_waiting_queue(&mut self, queue: QueueId) {
        self.add_waypoint(WaypointRef::Queue(queue));
    }

    /// Drop every occurrence of `queue`.  Returns `true` if any was found.
    pub fn remove_waiting_queue(&mut self, queue: QueueId) -> bool {
        self.remove_waypoint(WaypointRef::Queue(queue))
    }

    // ── Position ──────────────────────────────────────────────────────────

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.notifications.push(Event::ClusterPositionChanged { cluster: self.id, position });
    }

    pub fn set_x(&mut self, x: f64) {
        self.set_position(vec2(x, self.position.y));
    }

    pub fn set_y(&mut self, y: f64) {
        self.set_position(vec2(self.position.x, y));
    }

    // ── Type ──────────────────────────────────────────────────────────────

    #[inline]
    pub fn agent_type(&self) -> AgentType {
        self.agent_type
    }

    pub fn set_type(&mut self, agent_type: AgentType) {
        self.agent_type = agent_type;
        self.notifications.push(Event::ClusterTypeChanged { cluster: self.id, agent_type });
    }

    // ── Grouping flag ─────────────────────────────────────────────────────

    pub fn shall_create_groups(&self) -> bool {
        self.shall_create_groups
    }

    pub fn set_shall_create_groups(&mut self, shall_create_groups: bool) {
        self.shall_create_groups = shall_create_groups;
    }

    // ── Spread ────────────────────────────────────────────────────────────

    pub fn distribution(&self) -> Spread {
        self.distribution
    }

    pub fn set_distribution(&mut self, width: f64, height: f64) {
        self.set_distribution_width(width);
        self.set_distribution_height(height);
    }

    pub fn set_distribution_width(&mut self, width: f64) {
        self.distribution.width = sanitize_extent(self.id, width);
    }

    pub fn set_distribution_height(&mut self, height: f64) {
        self.distribution.height = sanitize_extent(self.id, height);
    }

    /// Drain everything published since the last call.
    pub fn take_notifications(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.notifications)
    }
}

impl fmt::Display for AgentCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentCluster (@{},{})", self.position.x, self.position.y)
    }
}

/// Uniform offset distribution for one axis, or `None` when the axis has no
/// spread.
fn axis_distribution(extent: f64) -> Option<Uniform<f64>> {
    if extent == 0.0 {
        return None;
    }
    let half = extent / 2.0;
    Some(Uniform::new_inclusive(-half, half))
}

fn sanitize_extent(cluster: ClusterId, extent: f64) -> f64 {
    if extent.is_finite() && extent >= 0.0 {
        extent
    } else {
        log::warn!("{cluster}: invalid distribution extent {extent}, using 0");
        0.0
    }
}
