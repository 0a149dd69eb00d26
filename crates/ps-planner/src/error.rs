use ps_core::{QueueId, WaypointRef};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlannerError {
    #[error("waypoint {0} provided to the queueing planner isn't a waiting queue")]
    NotAQueue(WaypointRef),

    #[error("waiting queue {0} does not exist")]
    UnknownQueue(QueueId),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
