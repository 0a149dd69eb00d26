//! Integration tests for ps-sim.

use approx::assert_relative_eq;

use ps_agent::Agent;
use ps_core::{
    AgentId, AgentType, ClusterId, Event, PsError, QueueId, SimConfig, Subscriber, Tick, Topic,
    Vec2, WaypointId, WaypointRef, vec2,
};
use ps_planner::{QueueingConfig, QueueingStatus};

use crate::{
    EventLog, NoopObserver, QueueServiceConfig, Scene, SceneBuilder, SceneError, SceneObserver,
    Target,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn scene_with(mean_wait_secs: f64, seed: u64) -> Scene {
    init_logging();
    SceneBuilder::new()
        .seed(seed)
        .service(QueueServiceConfig { front_radius: 1.0, mean_wait_secs })
        .build()
        .unwrap()
}

fn shopper(scene: &mut Scene, position: Vec2, waypoints: &[WaypointRef]) -> AgentId {
    let mut agent = Agent::new(position, AgentType::Adult);
    for &w in waypoints {
        agent.add_waypoint(w);
    }
    scene.add_agent(agent)
}

#[derive(Default)]
struct TickCounter {
    ticks:    u64,
    released: usize,
    ended_at: Option<Tick>,
}

impl SceneObserver for TickCounter {
    fn on_tick_end(&mut self, _tick: Tick, released: usize) {
        self.ticks += 1;
        self.released += released;
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended_at = Some(final_tick);
    }
}

// ── SceneBuilder validation ───────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let scene = SceneBuilder::new().build().unwrap();
        assert_eq!(scene.current_tick(), Tick::ZERO);
        assert_eq!(scene.config.queueing, QueueingConfig::default());
    }

    #[test]
    fn zero_tick_duration_errors() {
        let sim = SimConfig { tick_duration_secs: 0.0, ..SimConfig::default() };
        let result = SceneBuilder::new().sim(sim).build();
        assert!(matches!(result, Err(SceneError::Config(_))));
    }

    #[test]
    fn negative_private_space_errors() {
        let queueing = QueueingConfig { private_space: -0.1, ..QueueingConfig::default() };
        assert!(SceneBuilder::new().queueing(queueing).build().is_err());
    }

    #[test]
    fn nan_front_radius_errors() {
        let service = QueueServiceConfig { front_radius: f64::NAN, ..QueueServiceConfig::default() };
        assert!(SceneBuilder::new().service(service).build().is_err());
    }
}

// ── Clusters ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cluster_tests {
    use super::*;

    #[test]
    fn cluster_ids_start_at_one() {
        let mut scene = scene_with(5.0, 1);
        assert_eq!(scene.add_cluster(vec2(0.0, 0.0), 1), ClusterId(1));
        assert_eq!(scene.add_cluster(vec2(0.0, 0.0), 1), ClusterId(2));
    }

    #[test]
    fn dissolve_spawns_configured_agents() {
        let mut scene = scene_with(5.0, 3);
        let exit = scene.add_waypoint("exit", vec2(20.0, 0.0), 1.0).unwrap();
        let id = scene.add_cluster(vec2(3.0, 3.0), 5);
        let cluster = scene.cluster_mut(id).unwrap();
        cluster.set_distribution(2.0, 4.0);
        cluster.set_type(AgentType::Child);
        cluster.add_waypoint(WaypointRef::Area(exit));

        let agents = scene.dissolve_cluster(id).unwrap();
        assert_eq!(agents.len(), 5);
        for &a in &agents {
            let agent = scene.agent(a).unwrap();
            assert_eq!(agent.agent_type(), AgentType::Child);
            assert_eq!(agent.waypoints(), &[WaypointRef::Area(exit)]);
            let p = agent.position();
            assert!((2.0..=4.0).contains(&p.x), "x = {}", p.x);
            assert!((1.0..=5.0).contains(&p.y), "y = {}", p.y);
        }
        // The cluster itself is unchanged.
        assert_eq!(scene.cluster(id).unwrap().count(), 5);
    }

    #[test]
    fn dissolving_twice_spawns_disjoint_batches() {
        let mut scene = scene_with(5.0, 3);
        let id = scene.add_cluster(vec2(0.0, 0.0), 4);
        let first = scene.dissolve_cluster(id).unwrap();
        let second = scene.dissolve_cluster(id).unwrap();
        assert!(first.iter().all(|a| !second.contains(a)));
        assert_eq!(scene.world().agents().len(), 8);
    }

    #[test]
    fn empty_cluster_spawns_nothing() {
        let mut scene = scene_with(5.0, 3);
        let id = scene.add_cluster(vec2(0.0, 0.0), 0);
        assert!(scene.dissolve_cluster(id).unwrap().is_empty());
    }

    #[test]
    fn unknown_cluster_errors() {
        let mut scene = scene_with(5.0, 3);
        let result = scene.dissolve_cluster(ClusterId(99));
        assert!(matches!(result, Err(SceneError::Core(PsError::ClusterNotFound(ClusterId(99))))));
    }

    #[test]
    fn spawn_and_cluster_changes_reach_observer() {
        let mut scene = scene_with(5.0, 3);
        let id = scene.add_cluster(vec2(0.0, 0.0), 3);
        scene.dissolve_cluster(id).unwrap();
        scene.cluster_mut(id).unwrap().set_x(7.0);

        let mut log = EventLog::default();
        scene.step(&mut log);

        let placed = log.events.iter().filter(|e| matches!(e, Event::AgentPositionChanged { .. })).count();
        let typed = log.events.iter().filter(|e| matches!(e, Event::AgentTypeChanged { .. })).count();
        assert_eq!(placed, 3);
        assert_eq!(typed, 3);
        assert!(log.events.contains(&Event::ClusterPositionChanged {
            cluster:  id,
            position: vec2(7.0, 0.0),
        }));
    }
}

// ── Waypoint targets ──────────────────────────────────────────────────────────

#[cfg(test)]
mod target_tests {
    use super::*;

    #[test]
    fn area_waypoints_are_walked_cyclically() {
        let mut scene = scene_with(5.0, 0);
        let east = scene.add_waypoint("east", vec2(5.0, 0.0), 1.0).unwrap();
        let north = scene.add_waypoint("north", vec2(0.0, 5.0), 1.0).unwrap();
        let a = shopper(&mut scene, vec2(0.0, 0.0), &[WaypointRef::Area(east), WaypointRef::Area(north)]);

        assert_eq!(scene.current_target(a), Some(Target { position: vec2(5.0, 0.0), radius: 1.0 }));
        scene.set_agent_position(a, vec2(4.5, 0.0)).unwrap();
        assert_eq!(scene.current_target(a).unwrap().position, vec2(0.0, 5.0));
        scene.set_agent_position(a, vec2(0.0, 5.0)).unwrap();
        assert_eq!(scene.current_target(a).unwrap().position, vec2(5.0, 0.0));
    }

    #[test]
    fn agent_without_waypoints_has_no_target() {
        let mut scene = scene_with(5.0, 0);
        let a = shopper(&mut scene, vec2(0.0, 0.0), &[]);
        assert_eq!(scene.current_target(a), None);
        assert_eq!(scene.current_target(AgentId(42)), None);
    }

    #[test]
    fn unknown_queue_is_skipped() {
        let mut scene = scene_with(5.0, 0);
        let exit = scene.add_waypoint("exit", vec2(5.0, 0.0), 1.0).unwrap();
        let a = shopper(&mut scene, vec2(0.0, 0.0), &[WaypointRef::Queue(QueueId(9)), WaypointRef::Area(exit)]);
        assert_eq!(scene.current_target(a).unwrap().position, vec2(5.0, 0.0));
        assert!(scene.planner(a).is_none());
    }

    #[test]
    fn dangling_area_waypoint_is_skipped() {
        let mut scene = scene_with(5.0, 0);
        let exit = scene.add_waypoint("exit", vec2(5.0, 0.0), 1.0).unwrap();
        let a = shopper(&mut scene, vec2(0.0, 0.0), &[WaypointRef::Area(WaypointId(9)), WaypointRef::Area(exit)]);
        assert_eq!(scene.current_target(a), Some(Target { position: vec2(5.0, 0.0), radius: 1.0 }));
        assert_eq!(scene.agent(a).unwrap().current_destination(), Some(WaypointRef::Area(exit)));
    }

    #[test]
    fn ids_are_dense_per_kind() {
        let mut scene = scene_with(5.0, 0);
        assert_eq!(scene.add_waypoint("a", vec2(0.0, 0.0), 1.0).unwrap(), WaypointId(0));
        assert_eq!(scene.add_queue("q", vec2(0.0, 0.0), 0.0).unwrap(), QueueId(0));
        assert_eq!(scene.add_waypoint("b", vec2(1.0, 0.0), 1.0).unwrap(), WaypointId(1));
        assert_eq!(scene.add_queue("r", vec2(1.0, 0.0), 0.0).unwrap(), QueueId(1));
    }

    #[test]
    fn moving_unknown_agent_errors() {
        let mut scene = scene_with(5.0, 0);
        let result = scene.set_agent_position(AgentId(3), vec2(0.0, 0.0));
        assert!(matches!(result, Err(SceneError::Core(PsError::AgentNotFound(AgentId(3))))));
    }
}

// ── Queueing end to end ───────────────────────────────────────────────────────

#[cfg(test)]
mod queue_tests {
    use super::*;

    #[test]
    fn two_shoppers_pass_a_checkout() {
        let mut scene = scene_with(0.0, 0);
        let till = scene.add_queue("till", vec2(10.0, 0.0), 0.0).unwrap();
        let a = shopper(&mut scene, vec2(9.5, 0.0), &[WaypointRef::Queue(till)]);
        let b = shopper(&mut scene, vec2(5.0, 0.0), &[WaypointRef::Queue(till)]);

        // A is already at the empty queue's tail and heads for the service point.
        assert_eq!(scene.current_target(a).unwrap().position, vec2(10.0, 0.0));
        assert_eq!(scene.planner(a).unwrap().status(), QueueingStatus::Queued);
        assert_eq!(scene.queue(till).unwrap().queue_end_position(), vec2(9.5, 0.0));

        // B approaches, keeping its distance to A.
        let target = scene.current_target(b).unwrap();
        assert_relative_eq!(target.position.x, 8.8, epsilon = 1e-9);
        assert_eq!(scene.planner(b).unwrap().status(), QueueingStatus::Approaching);

        // The tail follows A, and B's waypoint follows the tail.
        scene.set_agent_position(a, vec2(9.8, 0.0)).unwrap();
        assert_eq!(scene.queue(till).unwrap().queue_end_position(), vec2(9.8, 0.0));
        assert_relative_eq!(scene.planner(b).unwrap().peek_waypoint().unwrap().position().x, 9.1, epsilon = 1e-9);

        // B reaches the tail and lines up behind A.
        scene.set_agent_position(b, vec2(8.0, 0.0)).unwrap();
        let target = scene.current_target(b).unwrap();
        assert_relative_eq!(target.position.x, 9.1, epsilon = 1e-9);
        let planner = scene.planner(b).unwrap();
        assert_eq!(planner.status(), QueueingStatus::Queued);
        assert_eq!(planner.followed_agent(), Some(a));
        let bus = scene.world().bus();
        assert!(bus.is_subscribed(Topic::AgentPosition(b), Subscriber::Queue(till)));
        assert!(!bus.is_subscribed(Topic::AgentPosition(a), Subscriber::Queue(till)));
        assert!(bus.is_subscribed(Topic::AgentPosition(a), Subscriber::Planner(b)));

        // A is at the service point and is released at once.
        let mut log = EventLog::default();
        assert_eq!(scene.step(&mut log), 1);
        assert!(log.events.contains(&Event::AgentMayPass { queue: till, agent: a }));
        assert_eq!(scene.planner(a).unwrap().status(), QueueingStatus::MayPass);

        // B moves up to the front.
        let planner = scene.planner(b).unwrap();
        assert_eq!(planner.status(), QueueingStatus::Queued);
        assert_eq!(planner.followed_agent(), None);
        assert_eq!(planner.peek_waypoint().unwrap().position(), vec2(10.0, 0.0));

        // A is done with the queue; its planner goes away.
        assert_eq!(scene.current_target(a), None);
        assert!(scene.planner(a).is_none());
        assert_eq!(scene.world().bus().count_for(Subscriber::Planner(a)), 0);

        // B walks up and is served too.
        scene.set_agent_position(b, vec2(9.7, 0.0)).unwrap();
        assert_eq!(scene.step(&mut log), 1);
        assert!(scene.queue(till).unwrap().is_empty());
        assert_eq!(scene.queue(till).unwrap().queue_end_position(), vec2(10.0, 0.0));
        assert_eq!(scene.world().bus().subscription_count(), 0);
    }

    #[test]
    fn front_agent_outside_radius_is_not_served() {
        let mut scene = scene_with(0.0, 0);
        let till = scene.add_queue("till", vec2(10.0, 0.0), 0.0).unwrap();
        let a = shopper(&mut scene, vec2(8.5, 0.0), &[WaypointRef::Queue(till)]);
        scene.current_target(a);
        assert_eq!(scene.queue(till).unwrap().front(), Some(a));

        let mut counter = TickCounter::default();
        scene.run_ticks(10, &mut counter);
        assert_eq!(counter.released, 0);
        assert_eq!(counter.ticks, 10);
    }

    #[test]
    fn service_time_is_reproducible() {
        fn release_tick(seed: u64) -> u64 {
            let mut scene = scene_with(5.0, seed);
            let till = scene.add_queue("till", vec2(10.0, 0.0), 0.0).unwrap();
            let a = shopper(&mut scene, vec2(10.0, 0.0), &[WaypointRef::Queue(till)]);
            scene.current_target(a);
            for _ in 0..1_000_000 {
                let tick = scene.current_tick();
                if scene.step(&mut NoopObserver) == 1 {
                    return tick.0;
                }
            }
            panic!("agent was never served");
        }

        assert_eq!(release_tick(11), release_tick(11));
    }

    #[test]
    fn dissolved_cluster_queues_up() {
        let mut scene = scene_with(5.0, 9);
        let till = scene.add_queue("till", vec2(0.0, 0.0), 0.0).unwrap();
        let id = scene.add_cluster(vec2(-1.0, 0.0), 3);
        scene.cluster_mut(id).unwrap().add_waiting_queue(till);
        let agents = scene.dissolve_cluster(id).unwrap();

        for &a in &agents {
            scene.current_target(a);
        }
        let queue = scene.queue(till).unwrap();
        assert_eq!(queue.queued_agents().collect::<Vec<_>>(), agents);
        assert_eq!(scene.planner(agents[1]).unwrap().followed_agent(), Some(agents[0]));
        assert_eq!(scene.planner(agents[2]).unwrap().followed_agent(), Some(agents[1]));
    }
}

// ── Run loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn run_stops_at_end_tick() {
        let sim = SimConfig { total_ticks: 5, ..SimConfig::default() };
        let mut scene = SceneBuilder::new().sim(sim).build().unwrap();
        let mut counter = TickCounter::default();
        scene.run(&mut counter);
        assert_eq!(counter.ticks, 5);
        assert_eq!(counter.ended_at, Some(Tick(5)));
    }

    #[test]
    fn run_ticks_ignores_end_tick() {
        let sim = SimConfig { total_ticks: 2, ..SimConfig::default() };
        let mut scene = SceneBuilder::new().sim(sim).build().unwrap();
        scene.run_ticks(4, &mut NoopObserver);
        assert_eq!(scene.current_tick(), Tick(4));
        assert_relative_eq!(scene.clock.elapsed_secs(), 0.4, epsilon = 1e-9);
    }
}
