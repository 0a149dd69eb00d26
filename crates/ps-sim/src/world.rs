//! `World` — scene storage shared by planners, queues and clusters.
//!
//! The world owns agents, waypoints, waiting queues and the subscription
//! bus.  Planners and clusters live next to it in [`Scene`][crate::Scene] so
//! they can borrow it mutably while being mutated themselves.

use ps_agent::{Agent, AgentRegistry, AgentStore, Force};
use ps_core::{
    AgentId, Event, PsError, PsResult, QueueId, SimRng, Subscriber, SubscriptionBus, Topic, Vec2, WaypointId,
};
use ps_planner::QueueingContext;
use ps_waypoint::{WaitingQueue, Waypoint};

#[derive(Debug, Default)]
pub struct World {
    pub(crate) agents:    AgentStore,
    pub(crate) waypoints: Vec<Waypoint>,
    pub(crate) queues:    Vec<WaitingQueue>,
    pub(crate) bus:       SubscriptionBus,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    pub fn waypoint(&self, id: WaypointId) -> Option<&Waypoint> {
        self.waypoints.get(id.index())
    }

    pub fn queue(&self, id: QueueId) -> Option<&WaitingQueue> {
        self.queues.get(id.index())
    }

    pub fn bus(&self) -> &SubscriptionBus {
        &self.bus
    }

    // ── Registration ──────────────────────────────────────────────────────

    pub(crate) fn push_waypoint(&mut self, name: String, position: Vec2, radius: f64) -> PsResult<WaypointId> {
        let id = WaypointId::from_index(self.waypoints.len()).ok_or(PsError::CapacityExceeded("waypoints"))?;
        self.waypoints.push(Waypoint::new(id, name, position, radius));
        Ok(id)
    }

    pub(crate) fn push_queue(&mut self, queue: impl FnOnce(QueueId) -> WaitingQueue) -> PsResult<QueueId> {
        let id = QueueId::from_index(self.queues.len()).ok_or(PsError::CapacityExceeded("waiting queues"))?;
        self.queues.push(queue(id));
        Ok(id)
    }

    // ── Queue service ─────────────────────────────────────────────────────

    /// Advance every queue's service timer; returns the agents released.
    pub(crate) fn update_queues(
        &mut self,
        now_secs:     f64,
        front_radius: f64,
        rng:          &mut SimRng,
    ) -> Vec<AgentId> {
        let mut released = Vec::new();
        for queue in &mut self.queues {
            let front_position = queue.front().and_then(|a| self.agents.position(a));
            if let Some(agent) = queue.update(now_secs, front_position, front_radius, rng) {
                // The last member left: nobody to track any more.
                if queue.is_empty() {
                    self.bus.unsubscribe(Topic::AgentPosition(agent), Subscriber::Queue(queue.id()));
                }
                released.push(agent);
            }
        }
        released
    }

    /// Drain the outboxes of agents and queues, in that order.
    pub(crate) fn take_notifications(&mut self) -> Vec<Event> {
        let mut events = self.agents.take_notifications();
        for queue in &mut self.queues {
            events.extend(queue.take_notifications());
        }
        events
    }

    /// Hand an agent-position event to the queue tracking that agent.
    pub(crate) fn deliver_to_queue(&mut self, queue: QueueId, event: &Event) {
        let Event::AgentPositionChanged { agent, position } = *event else {
            return;
        };
        if let Some(queue) = self.queues.get_mut(queue.index()) {
            queue.on_agent_moved(agent, position);
        }
    }
}

impl AgentRegistry for World {
    fn add_agent(&mut self, agent: Agent) -> AgentId {
        self.agents.add_agent(agent)
    }
}

impl QueueingContext for World {
    fn agent_position(&self, agent: AgentId) -> Option<Vec2> {
        self.agents.position(agent)
    }

    fn waiting_queue(&self, queue: QueueId) -> Option<&WaitingQueue> {
        self.queues.get(queue.index())
    }

    /// Enqueue and move the queue's position subscription to its new tail.
    fn enqueue_agent(&mut self, queue: QueueId, agent: AgentId) -> Option<AgentId> {
        let Some(position) = self.agents.position(agent) else {
            log::warn!("cannot enqueue {agent}: no such agent");
            return None;
        };
        let Some(waiting) = self.queues.get_mut(queue.index()) else {
            log::warn!("cannot enqueue {agent}: waiting queue {queue} does not exist");
            return None;
        };

        let previous_tail = waiting.last();
        let followed = waiting.enqueue_agent(agent, position);
        if waiting.last() == Some(agent) && previous_tail != Some(agent) {
            if let Some(previous) = previous_tail {
                self.bus.unsubscribe(Topic::AgentPosition(previous), Subscriber::Queue(queue));
            }
            self.bus.subscribe(Topic::AgentPosition(agent), Subscriber::Queue(queue));
        }
        followed
    }

    fn disable_force(&mut self, agent: AgentId, force: Force) {
        if let Err(e) = self.agents.disable_force(agent, force) {
            log::warn!("cannot disable {force}: {e}");
        }
    }

    fn subscribe(&mut self, topic: Topic, subscriber: Subscriber) {
        self.bus.subscribe(topic, subscriber);
    }

    fn unsubscribe(&mut self, topic: Topic, subscriber: Subscriber) {
        self.bus.unsubscribe(topic, subscriber);
    }
}
