//! `WaitingQueue` — a serially served bottleneck (checkout, gate, counter).
//!
//! Agents join at the tail and are released from the front one at a time.
//! The queue's tail ("end position") is wherever its last member stands, or
//! the service point itself while nobody is queued.
//!
//! # Service model
//!
//! Once the front agent has walked to within `front_radius` of the service
//! point, a service time is drawn from an exponential distribution with mean
//! `mean_wait_secs`.  When simulated time passes it the front agent is
//! dequeued and `AgentMayPass` is published.

use std::collections::VecDeque;

use rand_distr::Exp;

use ps_core::{AgentId, Event, QueueId, SimRng, Vec2, distance};

pub const DEFAULT_MEAN_WAIT_SECS: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct WaitingQueue {
    id: QueueId,
    name: String,
    /// Service point (front of the queue).
    position: Vec2,
    /// Direction the queue faces, radians.  The line grows opposite to it.
    direction: f64,
    mean_wait_secs: f64,

    queued: VecDeque<AgentId>,
    end_position: Vec2,
    /// Simulated time at which the current front agent is released.
    release_at: Option<f64>,

    notifications: Vec<Event>,
}

impl WaitingQueue {
    pub fn new(id: QueueId, name: impl Into<String>, position: Vec2, direction: f64) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            direction,
            mean_wait_secs: DEFAULT_MEAN_WAIT_SECS,
            queued: VecDeque::new(),
            end_position: position,
            release_at: None,
            notifications: Vec::new(),
        }
    }

    pub fn with_mean_wait(mut self, secs: f64) -> Self {
        self.mean_wait_secs = secs.max(0.0);
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> QueueId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn mean_wait_secs(&self) -> f64 {
        self.mean_wait_secs
    }

    /// Where a newcomer should line up.
    #[inline]
    pub fn queue_end_position(&self) -> Vec2 {
        self.end_position
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queued.len()
    }

    pub fn front(&self) -> Option<AgentId> {
        self.queued.front().copied()
    }

    pub fn last(&self) -> Option<AgentId> {
        self.queued.back().copied()
    }

    pub fn contains(&self, agent: AgentId) -> bool {
        self.queued.contains(&agent)
    }

    /// Members in line order, front first.
    pub fn queued_agents(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.queued.iter().copied()
    }

    // ── Mutators ──────────────────────────────────────────────────────────

    /// Append `agent`, standing at `position`, to the tail.
    ///
    /// Returns the agent it has to follow, or `None` if it is now at the
    /// front.  Enqueuing a member twice is ignored and reports its current
    /// predecessor.
    pub fn enqueue_agent(&mut self, agent: AgentId, position: Vec2) -> Option<AgentId> {
        if let Some(place) = self.queued.iter().position(|&a| a == agent) {
            log::warn!("{agent} is already queued at '{}'", self.name);
            return place.checked_sub(1).map(|p| self.queued[p]);
        }

        let followed = self.last();
        self.queued.push_back(agent);
        log::debug!("{agent} joins '{}' ({} queued)", self.name, self.queued.len());
        self.set_end_position(position);
        followed
    }

    /// Release the front agent.
    pub fn dequeue_front(&mut self) -> Option<AgentId> {
        let agent = self.queued.pop_front()?;
        self.release_at = None;
        log::debug!("{agent} may pass '{}'", self.name);
        self.notifications.push(Event::AgentMayPass { queue: self.id, agent });
        if self.queued.is_empty() {
            self.set_end_position(self.position);
        }
        Some(agent)
    }

    /// Keep the end position glued to the last member.
    ///
    /// Movements of anyone other than the last member are ignored.
    pub fn on_agent_moved(&mut self, agent: AgentId, position: Vec2) {
        if self.last() == Some(agent) {
            self.set_end_position(position);
        }
    }

    /// Advance the service timer.  Returns the agent released this call, if
    /// any.
    ///
    /// `front_position` is the current position of [`front`](Self::front).
    pub fn update(
        &mut self,
        now_secs:       f64,
        front_position: Option<Vec2>,
        front_radius:   f64,
        rng:            &mut SimRng,
    ) -> Option<AgentId> {
        self.front()?;

        match self.release_at {
            Some(release_at) if now_secs >= release_at => self.dequeue_front(),
            Some(_) => None,
            None => {
                let arrived = front_position
                    .is_some_and(|p| distance(p, self.position) <= front_radius);
                if arrived {
                    let wait = self.draw_service_time(rng);
                    self.release_at = Some(now_secs + wait);
                    if wait <= 0.0 {
                        return self.dequeue_front();
                    }
                }
                None
            }
        }
    }

    /// Drain everything published since the last call.
    pub fn take_notifications(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.notifications)
    }

    fn set_end_position(&mut self, position: Vec2) {
        self.end_position = position;
        self.notifications.push(Event::QueueEndPositionChanged { queue: self.id, position });
    }

    fn draw_service_time(&self, rng: &mut SimRng) -> f64 {
        if self.mean_wait_secs <= 0.0 {
            return 0.0;
        }
        match Exp::new(1.0 / self.mean_wait_secs) {
            Ok(exp) => rng.sample(&exp),
            Err(_) => self.mean_wait_secs,
        }
    }
}
