//! Positioned targets an agent walks toward.

use ps_core::{Vec2, WaypointId, distance};

/// A scenario-authored area waypoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    id: WaypointId,
    name: String,
    position: Vec2,
    radius: f64,
}

impl Waypoint {
    pub fn new(id: WaypointId, name: impl Into<String>, position: Vec2, radius: f64) -> Self {
        Self { id, name: name.into(), position, radius: radius.max(0.0) }
    }

    #[inline]
    pub fn id(&self) -> WaypointId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// `true` once `point` lies inside the completion radius.
    pub fn is_reached_by(&self, point: Vec2) -> bool {
        distance(self.position, point) <= self.radius
    }
}

/// A waypoint computed on the fly by a queueing planner.
///
/// The planner owns exactly one of these at a time and moves it in place
/// as the queue or the followed agent moves.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueingWaypoint {
    name: String,
    position: Vec2,
    radius: f64,
}

impl QueueingWaypoint {
    pub fn new(name: impl Into<String>, position: Vec2, radius: f64) -> Self {
        Self { name: name.into(), position, radius }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}
