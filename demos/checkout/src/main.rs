//! Checkout demo.
//!
//! Twelve shoppers spawn around the entrance, line up at a single till and
//! walk to the exit once served.  Movement is a straight walk at constant
//! speed toward whatever `Scene::current_target` says.
//!
//! ```text
//! RUST_LOG=debug cargo run -p checkout
//! ```

use anyhow::Result;

use ps_core::{AgentId, Event, Tick, Vec2, WaypointRef, distance, vec2};
use ps_sim::{QueueServiceConfig, Scene, SceneBuilder, SceneObserver};

/// Walking speed, metres per second.
const WALKING_SPEED: f64 = 1.3;

#[derive(Default)]
struct Report {
    served:   usize,
    admitted: usize,
}

impl SceneObserver for Report {
    fn on_event(&mut self, event: &Event) {
        match event {
            Event::AgentMayPass { agent, .. } => log::info!("{agent} paid and leaves the till"),
            Event::QueueEndPositionChanged { .. } => self.admitted += 1,
            _ => {}
        }
    }

    fn on_tick_end(&mut self, tick: Tick, released: usize) {
        self.served += released;
        if tick.0 % 100 == 0 {
            log::info!("{tick}: {} served so far", self.served);
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        log::info!("finished at {final_tick}: {} served, {} tail updates", self.served, self.admitted);
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut scene = SceneBuilder::new()
        .seed(2024)
        .service(QueueServiceConfig { front_radius: 0.8, mean_wait_secs: 4.0 })
        .build()?;

    let till = scene.add_queue("till", vec2(20.0, 0.0), 0.0)?;
    let exit = scene.add_waypoint("exit", vec2(30.0, 10.0), 1.5)?;

    let shoppers = scene.add_cluster(vec2(0.0, 0.0), 12);
    if let Some(cluster) = scene.cluster_mut(shoppers) {
        cluster.set_distribution(6.0, 6.0);
        cluster.add_waiting_queue(till);
        cluster.add_waypoint(WaypointRef::Area(exit));
    }
    let agents = scene.dissolve_cluster(shoppers)?;
    log::info!("{} shoppers entered the store", agents.len());

    let stride = WALKING_SPEED * scene.config.sim.tick_duration_secs;
    let mut report = Report::default();
    while scene.current_tick() < scene.config.sim.end_tick() {
        for &agent in &agents {
            walk(&mut scene, agent, stride)?;
        }
        scene.step(&mut report);
    }
    report.on_sim_end(scene.current_tick());

    Ok(())
}

/// Move `agent` one stride toward its current target.
fn walk(scene: &mut Scene, agent: AgentId, stride: f64) -> Result<()> {
    let Some(target) = scene.current_target(agent) else {
        return Ok(());
    };
    let Some(position) = scene.agent(agent).map(|a| a.position()) else {
        return Ok(());
    };

    let remaining = distance(position, target.position);
    if remaining <= target.radius.min(stride) {
        return Ok(());
    }
    let next: Vec2 = if remaining <= stride {
        target.position
    } else {
        position + (target.position - position) * (stride / remaining)
    };
    scene.set_agent_position(agent, next)?;
    Ok(())
}
