//! Unit tests for ps-agent.

#[cfg(test)]
mod agent {
    use ps_core::{AgentId, AgentType, QueueId, WaypointId, WaypointRef, vec2};

    use crate::{Agent, Force};

    #[test]
    fn unregistered_agent_has_invalid_id() {
        let a = Agent::new(vec2(1.0, 2.0), AgentType::Child);
        assert_eq!(a.id(), AgentId::INVALID);
        assert_eq!(a.position(), vec2(1.0, 2.0));
        assert_eq!(a.agent_type(), AgentType::Child);
    }

    #[test]
    fn destinations_wrap_around() {
        let mut a = Agent::new(vec2(0.0, 0.0), AgentType::Adult);
        assert_eq!(a.current_destination(), None);
        assert_eq!(a.advance_destination(), None);

        let area = WaypointRef::Area(WaypointId(0));
        let queue = WaypointRef::Queue(QueueId(0));
        a.add_waypoint(area);
        a.add_waypoint(queue);
        assert_eq!(a.current_destination(), Some(area));
        assert_eq!(a.advance_destination(), Some(queue));
        assert_eq!(a.advance_destination(), Some(area));
    }

    #[test]
    fn force_switches() {
        let mut a = Agent::new(vec2(0.0, 0.0), AgentType::Adult);
        assert!(a.is_force_enabled(Force::Social));
        assert!(a.disable_force(Force::Social));
        assert!(!a.disable_force(Force::Social));
        assert!(!a.is_force_enabled(Force::Social));
        assert_eq!(a.disabled_forces().collect::<Vec<_>>(), vec![Force::Social]);
        assert!(a.enable_force(Force::Social));
        assert!(a.is_force_enabled(Force::Social));
    }

    #[test]
    fn force_names_roundtrip() {
        for f in Force::ALL {
            assert_eq!(Force::from_name(f.as_str()), Some(f));
        }
        assert_eq!(Force::from_name("Gravity"), None);
        assert_eq!(Force::GroupGaze.to_string(), "GroupGaze");
    }
}

#[cfg(test)]
mod store {
    use ps_core::{AgentId, AgentType, Event, PsError, vec2};

    use crate::{Agent, AgentRegistry, AgentStore, Force};

    #[test]
    fn ids_are_dense() {
        let mut store = AgentStore::new();
        let a = store.add_agent(Agent::new(vec2(0.0, 0.0), AgentType::Adult));
        let b = store.add_agent(Agent::new(vec2(1.0, 0.0), AgentType::Adult));
        assert_eq!(a, AgentId(0));
        assert_eq!(b, AgentId(1));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(b).unwrap().id(), b);
        assert_eq!(store.agent_ids().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn registration_announces_position_and_type() {
        let mut store = AgentStore::new();
        let id = store.add_agent(Agent::new(vec2(3.0, 4.0), AgentType::Elder));
        assert_eq!(
            store.take_notifications(),
            vec![
                Event::AgentPositionChanged { agent: id, position: vec2(3.0, 4.0) },
                Event::AgentTypeChanged { agent: id, agent_type: AgentType::Elder },
            ]
        );
        assert!(store.take_notifications().is_empty());
    }

    #[test]
    fn set_position_notifies() {
        let mut store = AgentStore::new();
        let id = store.add_agent(Agent::new(vec2(0.0, 0.0), AgentType::Adult));
        store.take_notifications();
        store.set_position(id, vec2(5.0, 5.0)).unwrap();
        assert_eq!(store.position(id), Some(vec2(5.0, 5.0)));
        assert_eq!(
            store.take_notifications(),
            vec![Event::AgentPositionChanged { agent: id, position: vec2(5.0, 5.0) }]
        );
    }

    #[test]
    fn set_type_notifies() {
        let mut store = AgentStore::new();
        let id = store.add_agent(Agent::new(vec2(0.0, 0.0), AgentType::Adult));
        store.take_notifications();
        store.set_type(id, AgentType::Robot).unwrap();
        assert_eq!(store.get(id).unwrap().agent_type(), AgentType::Robot);
        assert_eq!(
            store.take_notifications(),
            vec![Event::AgentTypeChanged { agent: id, agent_type: AgentType::Robot }]
        );
    }

    #[test]
    fn unknown_agent_errors() {
        let mut store = AgentStore::new();
        assert!(matches!(
            store.set_position(AgentId(3), vec2(0.0, 0.0)),
            Err(PsError::AgentNotFound(AgentId(3)))
        ));
        assert!(store.disable_force(AgentId(0), Force::Random).is_err());
        assert!(store.take_notifications().is_empty());
    }
}
