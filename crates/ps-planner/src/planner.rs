//! `QueueingWaypointPlanner` — where should a queueing agent walk right now?
//!
//! # States
//!
//! ```text
//!   Unknown ──set_waiting_queue──▶ Approaching ──near tail──▶ Queued ──may pass──▶ MayPass
//!                                      ▲   │ tail moved
//!                                      └───┘ (waypoint follows the tail)
//! ```
//!
//! Transitions happen in two ways:
//!
//! - **Polling**: [`get_current_waypoint`](QueueingWaypointPlanner::get_current_waypoint)
//!   advances the machine whenever the current waypoint counts as complete.
//! - **Notifications**: [`handle_event`](QueueingWaypointPlanner::handle_event)
//!   reacts to the queue's tail moving, the followed agent moving, and
//!   "agent N may pass" announcements.
//!
//! Every subscription taken on entering a state is recorded locally and
//! released through the same context before the referenced object is
//! forgotten.

use std::collections::BTreeSet;
use std::fmt;

use ps_agent::Force;
use ps_core::{AgentId, Event, QueueId, Subscriber, Topic, Vec2, WaypointRef, distance, from_polar};
use ps_waypoint::QueueingWaypoint;

use crate::{PlannerError, PlannerResult, QueueingConfig, QueueingContext};

/// Forces switched off while an agent stands in line.
pub const QUEUEING_DISABLED_FORCES: [Force; 4] = [
    Force::Social,
    Force::Random,
    Force::GroupCoherence,
    Force::GroupGaze,
];

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum QueueingStatus {
    /// No queue assigned.
    #[default]
    Unknown,
    /// Walking toward the queue's tail.
    Approaching,
    /// Standing in line.
    Queued,
    /// Released by the queue; nothing left to plan for it.
    MayPass,
}

#[derive(Debug, Clone)]
pub struct QueueingWaypointPlanner {
    config: QueueingConfig,
    agent: Option<AgentId>,
    waiting_queue: Option<QueueId>,
    status: QueueingStatus,
    current_waypoint: Option<QueueingWaypoint>,
    followed_agent: Option<AgentId>,
    subscriptions: BTreeSet<Topic>,
}

impl QueueingWaypointPlanner {
    pub fn new(config: QueueingConfig) -> Self {
        Self {
            config,
            agent: None,
            waiting_queue: None,
            status: QueueingStatus::Unknown,
            current_waypoint: None,
            followed_agent: None,
            subscriptions: BTreeSet::new(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn agent(&self) -> Option<AgentId> {
        self.agent
    }

    pub fn waiting_queue(&self) -> Option<QueueId> {
        self.waiting_queue
    }

    pub fn status(&self) -> QueueingStatus {
        self.status
    }

    pub fn followed_agent(&self) -> Option<AgentId> {
        self.followed_agent
    }

    pub fn config(&self) -> &QueueingConfig {
        &self.config
    }

    /// The current synthetic waypoint, without advancing the state machine.
    pub fn peek_waypoint(&self) -> Option<&QueueingWaypoint> {
        self.current_waypoint.as_ref()
    }

    /// Topics this planner is currently registered on.
    pub fn subscriptions(&self) -> impl Iterator<Item = Topic> + '_ {
        self.subscriptions.iter().copied()
    }

    // ── Binding ───────────────────────────────────────────────────────────

    /// Bind the planner to `agent`.
    ///
    /// Rebinding moves every live subscription over to the new agent.
    pub fn set_agent<C: QueueingContext>(&mut self, agent: AgentId, ctx: &mut C) -> bool {
        if self.agent == Some(agent) {
            return true;
        }
        if let Some(previous) = self.agent {
            for &topic in &self.subscriptions {
                ctx.unsubscribe(topic, Subscriber::Planner(previous));
            }
        }
        for &topic in &self.subscriptions {
            ctx.subscribe(topic, Subscriber::Planner(agent));
        }
        self.agent = Some(agent);
        true
    }

    /// Accept `waypoint` as the destination if it is a waiting queue.
    ///
    /// Anything else is rejected and leaves the planner untouched.
    pub fn set_destination<C: QueueingContext>(
        &mut self,
        waypoint: WaypointRef,
        ctx:      &mut C,
    ) -> PlannerResult<()> {
        let Some(queue) = waypoint.as_queue() else {
            log::error!("waypoint provided to QueueingWaypointPlanner isn't a waiting queue! ({waypoint})");
            return Err(PlannerError::NotAQueue(waypoint));
        };
        self.set_waiting_queue(Some(queue), ctx)
    }

    /// Drop whatever queue was engaged and start approaching `queue`.
    ///
    /// `None` only releases the previous queue.
    pub fn set_waiting_queue<C: QueueingContext>(
        &mut self,
        queue: Option<QueueId>,
        ctx:   &mut C,
    ) -> PlannerResult<()> {
        if let Some(q) = queue {
            if ctx.waiting_queue(q).is_none() {
                log::error!("QueueingWaypointPlanner: waiting queue {q} does not exist");
                return Err(PlannerError::UnknownQueue(q));
            }
        }

        self.clear(ctx);

        if let Some(q) = queue {
            self.waiting_queue = Some(q);
            self.status = QueueingStatus::Approaching;
            self.subscribe_to(Topic::QueueMayPass(q), ctx);
            self.subscribe_to(Topic::QueueEnd(q), ctx);
        }
        Ok(())
    }

    /// Drop the engaged queue and every subscription.  The agent binding is
    /// kept.
    pub fn clear<C: QueueingContext>(&mut self, ctx: &mut C) {
        self.reset(ctx);
        self.waiting_queue = None;
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// The waypoint the agent should walk toward now.
    ///
    /// If the current waypoint is complete the state machine advances first.
    pub fn get_current_waypoint<C: QueueingContext>(
        &mut self,
        ctx: &mut C,
    ) -> Option<&QueueingWaypoint> {
        if self.has_completed_waypoint(ctx) {
            self.advance(ctx);
        }
        self.current_waypoint.as_ref()
    }

    /// `true` once the queue has let the agent pass.
    ///
    /// A planner without a queue also reports `true` so the agent is never
    /// stuck waiting on it.
    pub fn has_completed_destination(&self) -> bool {
        if self.waiting_queue.is_none() {
            log::warn!("QueueingWaypointPlanner: no waiting queue set!");
            return true;
        }
        self.status == QueueingStatus::MayPass
    }

    /// Whether the current waypoint has served its purpose.
    pub fn has_completed_waypoint<C: QueueingContext>(&self, ctx: &C) -> bool {
        if self.current_waypoint.is_none() {
            return true;
        }
        if self.status == QueueingStatus::Approaching && self.has_reached_queue_end(ctx) {
            return true;
        }
        self.status == QueueingStatus::MayPass
    }

    /// `true` when the agent stands within `end_position_radius` of the
    /// queue's tail.
    pub fn has_reached_queue_end<C: QueueingContext>(&self, ctx: &C) -> bool {
        let (Some(agent), Some(queue)) = (self.agent, self.waiting_queue) else {
            return false;
        };
        let (Some(queue), Some(position)) = (ctx.waiting_queue(queue), ctx.agent_position(agent)) else {
            return false;
        };
        distance(queue.queue_end_position(), position) <= self.config.end_position_radius
    }

    // ── Notifications ─────────────────────────────────────────────────────

    /// Route a notification to the matching handler.  Events this planner
    /// does not track are ignored.
    pub fn handle_event<C: QueueingContext>(&mut self, event: &Event, ctx: &mut C) {
        match *event {
            Event::AgentMayPass { queue, agent } if self.waiting_queue == Some(queue) => {
                self.on_agent_may_pass(agent, ctx);
            }
            Event::QueueEndPositionChanged { queue, position } if self.waiting_queue == Some(queue) => {
                self.on_queue_end_position_changed(position, ctx);
            }
            Event::AgentPositionChanged { agent, position } if self.followed_agent == Some(agent) => {
                self.on_followed_agent_position_changed(position, ctx);
            }
            _ => {}
        }
    }

    /// The queue released `agent`.
    pub fn on_agent_may_pass<C: QueueingContext>(&mut self, agent: AgentId, ctx: &mut C) {
        if self.agent == Some(agent) {
            self.status = QueueingStatus::MayPass;
            self.release_followed_agent(ctx);
            if let Some(q) = self.waiting_queue {
                self.unsubscribe_from(Topic::QueueMayPass(q), ctx);
                self.unsubscribe_from(Topic::QueueEnd(q), ctx);
            }
        } else if self.followed_agent == Some(agent) {
            self.on_followed_agent_left_queue(ctx);
        }
    }

    /// The queue's tail moved to `position`.  Only relevant while
    /// approaching.
    pub fn on_queue_end_position_changed<C: QueueingContext>(&mut self, position: Vec2, ctx: &mut C) {
        if self.status != QueueingStatus::Approaching {
            return;
        }

        if self.has_reached_queue_end(ctx) {
            self.enter_queueing_mode(ctx);
            return;
        }

        let Some(queue) = self.waiting_queue.and_then(|q| ctx.waiting_queue(q)) else {
            return;
        };
        let destination = if queue.is_empty() {
            position
        } else {
            self.with_private_space(position, queue.direction())
        };
        if let Some(waypoint) = self.current_waypoint.as_mut() {
            waypoint.set_position(destination);
        }
    }

    /// The agent ahead moved to `position`.
    pub fn on_followed_agent_position_changed<C: QueueingContext>(&mut self, position: Vec2, ctx: &C) {
        let Some(current) = self.current_waypoint.as_ref().map(QueueingWaypoint::position) else {
            log::error!("queued agent cannot update queueing position, there's no waypoint set!");
            return;
        };
        let Some(queue) = self.waiting_queue.and_then(|q| ctx.waiting_queue(q)) else {
            return;
        };

        let target = self.with_private_space(position, queue.direction());
        // Ignore small drift so the agent doesn't over-correct.
        if distance(target, current) < self.config.min_update_distance {
            return;
        }
        if let Some(waypoint) = self.current_waypoint.as_mut() {
            waypoint.set_position(target);
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Pick the next waypoint for the current state.
    fn advance<C: QueueingContext>(&mut self, ctx: &mut C) {
        let Some(agent) = self.agent else {
            log::error!("cannot determine queueing waypoint without agent!");
            self.current_waypoint = None;
            return;
        };
        if self.waiting_queue.is_none() {
            log::warn!("{agent}: cannot determine queueing waypoint without waiting queue!");
            self.current_waypoint = None;
            return;
        }
        if self.status == QueueingStatus::MayPass {
            self.current_waypoint = None;
            return;
        }

        if self.has_reached_queue_end(ctx) {
            self.enter_queueing_mode(ctx);
        } else {
            self.enter_approaching_mode(ctx);
        }
    }

    fn enter_approaching_mode<C: QueueingContext>(&mut self, ctx: &C) {
        let (Some(agent), Some(queue_id)) = (self.agent, self.waiting_queue) else {
            return;
        };
        log::debug!("{agent} enters approaching mode");
        self.status = QueueingStatus::Approaching;

        let Some(queue) = ctx.waiting_queue(queue_id) else {
            self.current_waypoint = None;
            return;
        };
        let mut destination = queue.queue_end_position();
        if !queue.is_empty() {
            destination = self.with_private_space(destination, queue.direction());
        }
        let name = waypoint_name(agent, queue.name());

        self.current_waypoint = Some(QueueingWaypoint::new(name, destination, self.config.waypoint_radius));
    }

    fn enter_queueing_mode<C: QueueingContext>(&mut self, ctx: &mut C) {
        let (Some(agent), Some(queue_id)) = (self.agent, self.waiting_queue) else {
            return;
        };
        log::debug!("{agent} enters queueing mode");
        self.status = QueueingStatus::Queued;
        self.release_followed_agent(ctx);

        let followed = ctx.enqueue_agent(queue_id, agent);
        let followed_position = followed.and_then(|f| ctx.agent_position(f));

        let Some(queue) = ctx.waiting_queue(queue_id) else {
            self.current_waypoint = None;
            return;
        };
        let name = waypoint_name(agent, queue.name());
        let queue_position = queue.position();
        let direction = queue.direction();

        let target = match (followed, followed_position) {
            (Some(followed), Some(position)) => {
                self.followed_agent = Some(followed);
                self.subscribe_to(Topic::AgentPosition(followed), ctx);
                self.with_private_space(position, direction)
            }
            _ => queue_position,
        };

        for force in QUEUEING_DISABLED_FORCES {
            ctx.disable_force(agent, force);
        }

        self.current_waypoint = Some(QueueingWaypoint::new(name, target, self.config.waypoint_radius));
    }

    /// The agent ahead left the line: head for the service point.
    fn on_followed_agent_left_queue<C: QueueingContext>(&mut self, ctx: &mut C) {
        self.release_followed_agent(ctx);

        // TODO: re-bind to whoever is now ahead instead of walking to the front.
        let Some(queue_position) = self
            .waiting_queue
            .and_then(|q| ctx.waiting_queue(q))
            .map(|q| q.position())
        else {
            return;
        };
        if let Some(waypoint) = self.current_waypoint.as_mut() {
            waypoint.set_position(queue_position);
        }
    }

    fn release_followed_agent<C: QueueingContext>(&mut self, ctx: &mut C) {
        if let Some(followed) = self.followed_agent.take() {
            self.unsubscribe_from(Topic::AgentPosition(followed), ctx);
        }
    }

    fn reset<C: QueueingContext>(&mut self, ctx: &mut C) {
        let topics: Vec<Topic> = self.subscriptions.iter().copied().collect();
        for topic in topics {
            self.unsubscribe_from(topic, ctx);
        }
        self.status = QueueingStatus::Unknown;
        self.current_waypoint = None;
        self.followed_agent = None;
    }

    fn subscribe_to<C: QueueingContext>(&mut self, topic: Topic, ctx: &mut C) {
        if self.subscriptions.insert(topic) {
            if let Some(agent) = self.agent {
                ctx.subscribe(topic, Subscriber::Planner(agent));
            }
        }
    }

    fn unsubscribe_from<C: QueueingContext>(&mut self, topic: Topic, ctx: &mut C) {
        if self.subscriptions.remove(&topic) {
            if let Some(agent) = self.agent {
                ctx.unsubscribe(topic, Subscriber::Planner(agent));
            }
        }
    }

    /// Step back from `point` against the queue direction.
    fn with_private_space(&self, point: Vec2, direction: f64) -> Vec2 {
        point - from_polar(direction, self.config.private_space)
    }
}

impl Default for QueueingWaypointPlanner {
    fn default() -> Self {
        Self::new(QueueingConfig::default())
    }
}

impl fmt::Display for QueueingWaypointPlanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.waiting_queue {
            Some(queue) => write!(f, "QueueingWaypointPlanner ({queue})"),
            None => f.write_str("QueueingWaypointPlanner (null)"),
        }
    }
}

fn waypoint_name(agent: AgentId, queue_name: &str) -> String {
    format!("QueueHelper_A{}_Q{}", agent.0, queue_name)
}
