//! `AgentStore` — the scene's agent registry.
//!
//! Agents are stored densely; an agent's `AgentId` is its index.  Every
//! mutation that the view layer or a follower could care about appends an
//! [`Event`] to the store's outbox, drained by the scene with
//! [`AgentStore::take_notifications`].

use ps_core::{AgentId, AgentType, Event, PsError, PsResult, Vec2};

use crate::{Agent, Force};

/// Anything that can take ownership of a freshly spawned agent.
pub trait AgentRegistry {
    /// Register `agent` for simulation and rendering, returning its new id,
    /// or [`AgentId::INVALID`] when the registry cannot take more agents.
    fn add_agent(&mut self, agent: Agent) -> AgentId;
}

#[derive(Debug, Default)]
pub struct AgentStore {
    agents: Vec<Agent>,
    notifications: Vec<Event>,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, agent: AgentId) -> Option<&Agent> {
        self.agents.get(agent.index())
    }

    pub fn get_mut(&mut self, agent: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(agent.index())
    }

    pub fn position(&self, agent: AgentId) -> Option<Vec2> {
        self.get(agent).map(Agent::position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    /// Iterator over all registered `AgentId`s in ascending order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.agents.len()).filter_map(AgentId::from_index)
    }

    // ── Notifying mutators ────────────────────────────────────────────────

    /// Move `agent` and publish `AgentPositionChanged`.
    pub fn set_position(&mut self, agent: AgentId, position: Vec2) -> PsResult<()> {
        let entry = self
            .agents
            .get_mut(agent.index())
            .ok_or(PsError::AgentNotFound(agent))?;
        entry.position = position;
        self.notifications.push(Event::AgentPositionChanged { agent, position });
        Ok(())
    }

    /// Change the type of `agent` and publish `AgentTypeChanged`.
    pub fn set_type(&mut self, agent: AgentId, agent_type: AgentType) -> PsResult<()> {
        let entry = self
            .agents
            .get_mut(agent.index())
            .ok_or(PsError::AgentNotFound(agent))?;
        entry.agent_type = agent_type;
        self.notifications.push(Event::AgentTypeChanged { agent, agent_type });
        Ok(())
    }

    pub fn disable_force(&mut self, agent: AgentId, force: Force) -> PsResult<()> {
        self.agents
            .get_mut(agent.index())
            .ok_or(PsError::AgentNotFound(agent))?
            .disable_force(force);
        Ok(())
    }

    /// Drain everything published since the last call.
    pub fn take_notifications(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.notifications)
    }
}

impl AgentRegistry for AgentStore {
    /// Assign the next dense id and announce the agent's initial placement
    /// and type.
    fn add_agent(&mut self, mut agent: Agent) -> AgentId {
        let Some(id) = AgentId::from_index(self.agents.len()) else {
            log::error!("agent store is full, dropping agent at {:?}", agent.position);
            return AgentId::INVALID;
        };
        agent.id = id;
        self.notifications.push(Event::AgentPositionChanged { agent: id, position: agent.position });
        self.notifications.push(Event::AgentTypeChanged { agent: id, agent_type: agent.agent_type });
        self.agents.push(agent);
        id
    }
}
