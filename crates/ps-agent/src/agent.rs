//! The pedestrian entity.

use std::collections::BTreeSet;

use ps_core::{AgentId, AgentType, Vec2, WaypointRef};

use crate::Force;

/// One pedestrian.
///
/// An `Agent` is built unregistered (`id == AgentId::INVALID`) and receives
/// its id from an [`AgentRegistry`][crate::AgentRegistry].  After
/// registration, position and type changes go through
/// [`AgentStore`][crate::AgentStore] so the matching notification is emitted.
///
/// Waypoints are shared handles; the agent walks them in order and wraps
/// around at the end.
#[derive(Debug, Clone)]
pub struct Agent {
    pub(crate) id: AgentId,
    pub(crate) position: Vec2,
    pub(crate) agent_type: AgentType,
    waypoints: Vec<WaypointRef>,
    destination: usize,
    disabled_forces: BTreeSet<Force>,
}

impl Agent {
    pub fn new(position: Vec2, agent_type: AgentType) -> Self {
        Self {
            id: AgentId::INVALID,
            position,
            agent_type,
            waypoints: Vec::new(),
            destination: 0,
            disabled_forces: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn agent_type(&self) -> AgentType {
        self.agent_type
    }

    // ── Waypoints ─────────────────────────────────────────────────────────

    pub fn add_waypoint(&mut self, waypoint: WaypointRef) {
        self.waypoints.push(waypoint);
    }

    pub fn waypoints(&self) -> &[WaypointRef] {
        &self.waypoints
    }

    /// The waypoint the agent is currently heading for.
    pub fn current_destination(&self) -> Option<WaypointRef> {
        self.waypoints.get(self.destination).copied()
    }

    /// Move on to the next waypoint, wrapping around after the last one.
    pub fn advance_destination(&mut self) -> Option<WaypointRef> {
        if self.waypoints.is_empty() {
            return None;
        }
        self.destination = (self.destination + 1) % self.waypoints.len();
        self.current_destination()
    }

    // ── Forces ────────────────────────────────────────────────────────────

    /// Switch `force` off.  Returns `false` if it already was.
    pub fn disable_force(&mut self, force: Force) -> bool {
        self.disabled_forces.insert(force)
    }

    /// Switch `force` back on.  Returns `false` if it was not disabled.
    pub fn enable_force(&mut self, force: Force) -> bool {
        self.disabled_forces.remove(&force)
    }

    pub fn is_force_enabled(&self, force: Force) -> bool {
        !self.disabled_forces.contains(&force)
    }

    pub fn disabled_forces(&self) -> impl Iterator<Item = Force> + '_ {
        self.disabled_forces.iter().copied()
    }
}
