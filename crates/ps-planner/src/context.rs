//! The world as seen by a queueing planner.

use ps_agent::Force;
use ps_core::{AgentId, QueueId, Subscriber, Topic, Vec2};
use ps_waypoint::WaitingQueue;

/// Everything a [`QueueingWaypointPlanner`][crate::QueueingWaypointPlanner]
/// reads or touches outside itself.
///
/// The scene implements this over its own storage; tests implement it over
/// a handful of fields.  Every call is synchronous.
pub trait QueueingContext {
    /// Current position of `agent`, or `None` if it does not exist.
    fn agent_position(&self, agent: AgentId) -> Option<Vec2>;

    fn waiting_queue(&self, queue: QueueId) -> Option<&WaitingQueue>;

    /// Put `agent` at the tail of `queue`; returns the agent it must follow.
    fn enqueue_agent(&mut self, queue: QueueId, agent: AgentId) -> Option<AgentId>;

    fn disable_force(&mut self, agent: AgentId, force: Force);

    fn subscribe(&mut self, topic: Topic, subscriber: Subscriber);

    fn unsubscribe(&mut self, topic: Topic, subscriber: Subscriber);
}
