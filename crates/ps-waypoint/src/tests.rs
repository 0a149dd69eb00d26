//! Unit tests for ps-waypoint.

#[cfg(test)]
mod waypoint {
    use ps_core::{WaypointId, vec2};

    use crate::{QueueingWaypoint, Waypoint};

    #[test]
    fn reached_within_radius() {
        let wp = Waypoint::new(WaypointId(0), "entrance", vec2(0.0, 0.0), 1.5);
        assert!(wp.is_reached_by(vec2(1.0, 1.0)));
        assert!(!wp.is_reached_by(vec2(2.0, 0.0)));
        assert_eq!(wp.name(), "entrance");
    }

    #[test]
    fn negative_radius_is_clamped() {
        let wp = Waypoint::new(WaypointId(0), "w", vec2(0.0, 0.0), -3.0);
        assert_eq!(wp.radius(), 0.0);
    }

    #[test]
    fn synthetic_waypoint_moves_in_place() {
        let mut wp = QueueingWaypoint::new("QueueHelper_A0_Qtill", vec2(1.0, 0.0), 0.5);
        wp.set_position(vec2(2.0, 0.0));
        assert_eq!(wp.position(), vec2(2.0, 0.0));
        assert_eq!(wp.name(), "QueueHelper_A0_Qtill");
    }
}

#[cfg(test)]
mod queue {
    use ps_core::{AgentId, Event, QueueId, SimRng, vec2};

    use crate::WaitingQueue;

    fn till() -> WaitingQueue {
        WaitingQueue::new(QueueId(0), "till", vec2(10.0, 0.0), 0.0)
    }

    #[test]
    fn empty_queue_end_is_service_point() {
        let q = till();
        assert!(q.is_empty());
        assert_eq!(q.queue_end_position(), vec2(10.0, 0.0));
        assert_eq!(q.front(), None);
    }

    #[test]
    fn enqueue_returns_predecessor() {
        let mut q = till();
        assert_eq!(q.enqueue_agent(AgentId(1), vec2(10.0, 0.0)), None);
        assert_eq!(q.enqueue_agent(AgentId(2), vec2(11.0, 0.0)), Some(AgentId(1)));
        assert_eq!(q.enqueue_agent(AgentId(3), vec2(12.0, 0.0)), Some(AgentId(2)));
        assert_eq!(q.queued_agents().collect::<Vec<_>>(), vec![AgentId(1), AgentId(2), AgentId(3)]);
        assert_eq!(q.queue_end_position(), vec2(12.0, 0.0));
    }

    #[test]
    fn double_enqueue_is_ignored() {
        let mut q = till();
        q.enqueue_agent(AgentId(1), vec2(10.0, 0.0));
        q.enqueue_agent(AgentId(2), vec2(11.0, 0.0));
        assert_eq!(q.enqueue_agent(AgentId(2), vec2(11.0, 0.0)), Some(AgentId(1)));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn enqueue_publishes_end_position() {
        let mut q = till();
        q.enqueue_agent(AgentId(1), vec2(10.5, 0.0));
        assert_eq!(
            q.take_notifications(),
            vec![Event::QueueEndPositionChanged { queue: QueueId(0), position: vec2(10.5, 0.0) }]
        );
    }

    #[test]
    fn end_follows_last_member_only() {
        let mut q = till();
        q.enqueue_agent(AgentId(1), vec2(10.0, 0.0));
        q.enqueue_agent(AgentId(2), vec2(11.0, 0.0));
        q.take_notifications();

        q.on_agent_moved(AgentId(1), vec2(9.0, 0.0));
        assert!(q.take_notifications().is_empty());
        assert_eq!(q.queue_end_position(), vec2(11.0, 0.0));

        q.on_agent_moved(AgentId(2), vec2(10.8, 0.0));
        assert_eq!(q.queue_end_position(), vec2(10.8, 0.0));
        assert_eq!(q.take_notifications().len(), 1);
    }

    #[test]
    fn dequeue_last_member_resets_end() {
        let mut q = till();
        q.enqueue_agent(AgentId(4), vec2(10.2, 0.0));
        q.take_notifications();
        assert_eq!(q.dequeue_front(), Some(AgentId(4)));
        assert_eq!(
            q.take_notifications(),
            vec![
                Event::AgentMayPass { queue: QueueId(0), agent: AgentId(4) },
                Event::QueueEndPositionChanged { queue: QueueId(0), position: vec2(10.0, 0.0) },
            ]
        );
        assert_eq!(q.dequeue_front(), None);
    }

    #[test]
    fn service_waits_for_front_to_arrive() {
        let mut q = till().with_mean_wait(1.0);
        let mut rng = SimRng::new(3);
        q.enqueue_agent(AgentId(0), vec2(20.0, 0.0));

        // Far from the service point: the timer never starts.
        for step in 0..100 {
            let now = step as f64;
            assert_eq!(q.update(now, Some(vec2(20.0, 0.0)), 0.5, &mut rng), None);
        }
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn service_releases_front_eventually() {
        let mut q = till().with_mean_wait(1.0);
        let mut rng = SimRng::new(3);
        q.enqueue_agent(AgentId(0), vec2(10.0, 0.0));
        q.enqueue_agent(AgentId(1), vec2(11.0, 0.0));

        let mut released = None;
        for step in 0..10_000 {
            let now = step as f64 * 0.1;
            if let Some(agent) = q.update(now, Some(vec2(10.1, 0.0)), 0.5, &mut rng) {
                released = Some(agent);
                break;
            }
        }
        assert_eq!(released, Some(AgentId(0)));
        assert_eq!(q.front(), Some(AgentId(1)));
    }

    #[test]
    fn zero_wait_releases_on_arrival() {
        let mut q = till().with_mean_wait(0.0);
        let mut rng = SimRng::new(0);
        q.enqueue_agent(AgentId(7), vec2(10.0, 0.0));
        assert_eq!(q.update(0.0, Some(vec2(10.0, 0.0)), 0.5, &mut rng), Some(AgentId(7)));
        assert!(q.is_empty());
    }
}
