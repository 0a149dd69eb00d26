//! Change notifications published by scene entities.
//!
//! Entities never call each other directly.  They append [`Event`]s to their
//! own outbox; the scene drains those outboxes, hands each event to whoever
//! subscribed to its [`Topic`], and finally forwards it to the view layer.

use crate::{AgentId, AgentType, ClusterId, QueueId, Vec2};

/// Something observable happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// An agent was placed or moved.
    AgentPositionChanged { agent: AgentId, position: Vec2 },

    /// An agent's type tag changed.
    AgentTypeChanged { agent: AgentId, agent_type: AgentType },

    /// A cluster's origin moved (view layer only).
    ClusterPositionChanged { cluster: ClusterId, position: Vec2 },

    /// A cluster's spawn type changed (view layer only).
    ClusterTypeChanged { cluster: ClusterId, agent_type: AgentType },

    /// `agent` has been served and may leave `queue`.
    AgentMayPass { queue: QueueId, agent: AgentId },

    /// The tail of `queue` moved to `position`.
    QueueEndPositionChanged { queue: QueueId, position: Vec2 },
}

impl Event {
    /// The subscription channel this event is delivered on, if any.
    ///
    /// Type and cluster changes have no topic: only the view layer cares.
    pub fn topic(&self) -> Option<Topic> {
        match *self {
            Event::AgentPositionChanged { agent, .. } => Some(Topic::AgentPosition(agent)),
            Event::AgentMayPass { queue, .. } => Some(Topic::QueueMayPass(queue)),
            Event::QueueEndPositionChanged { queue, .. } => Some(Topic::QueueEnd(queue)),
            Event::AgentTypeChanged { .. }
            | Event::ClusterPositionChanged { .. }
            | Event::ClusterTypeChanged { .. } => None,
        }
    }
}

/// A channel that subscribers register on.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Topic {
    /// Position updates of one agent.
    AgentPosition(AgentId),
    /// "Agent N may pass" announcements of one queue.
    QueueMayPass(QueueId),
    /// Tail movements of one queue.
    QueueEnd(QueueId),
}

/// Who receives a topic's events.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Subscriber {
    /// The queueing planner bound to this agent.
    Planner(AgentId),
    /// A waiting queue tracking its last member.
    Queue(QueueId),
}
