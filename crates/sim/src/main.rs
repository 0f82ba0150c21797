//! Headless survival-agent simulator.
//!
//! Generates a seeded world on the in-memory [`SandboxWorld`], then drives
//! the agent through it one tick at a time: the agent decides, the world
//! applies the frame command and moves its enemies.
//!
//! # Examples
//!
//! ```bash
//! # Default run
//! cargo run -p agent-sim
//!
//! # Longer run with branch switches logged
//! SIM_TICKS=10000 RUST_LOG=agent_sim=debug cargo run -p agent-sim
//! ```

mod config;
mod scenario;

use agent_core::{AgentConfig, Color, DebugDraw, SandboxWorld, Vec2};
use agent_runtime::{Agent, ConfigLoader, SettingsOverrides};
use anyhow::Result;

use crate::config::SimConfig;
use crate::scenario::ScenarioConfig;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let sim = SimConfig::from_env();
    let agent_config = load_agent_config(&sim)?;

    tracing::info!(seed = sim.seed, ticks = sim.ticks, dt = sim.dt, "Starting simulation");

    let world = scenario::generate(sim.seed, &ScenarioConfig::default());
    tracing::info!(
        items = world.items.len(),
        enemies = world.enemies.len(),
        hazards = world.hazards.len(),
        houses = world.houses.len(),
        "World generated"
    );

    let mut agent = Agent::new(world, agent_config)?;
    run(&mut agent, &sim);

    let mut overlay = OverlayStats::default();
    agent.render(&mut overlay);
    tracing::debug!(
        cells = overlay.cells,
        markers = overlay.markers,
        "Debug overlay"
    );

    report(&agent, "Simulation finished");
    Ok(())
}

fn load_agent_config(sim: &SimConfig) -> Result<AgentConfig> {
    let mut config = match &sim.agent_config {
        Some(path) => {
            tracing::info!("Loading agent config from {}", path.display());
            ConfigLoader::load(path)?
        }
        None => AgentConfig::default(),
    };
    SettingsOverrides::apply_env(&mut config);
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid agent config: {}", e))?;
    Ok(config)
}

fn run(agent: &mut Agent<SandboxWorld>, sim: &SimConfig) {
    let mut last_branch = None;

    for tick in 0..sim.ticks {
        let command = agent.update(sim.dt);
        agent.world_mut().step(&command, sim.dt);

        let branch = agent.last_branch();
        if branch != last_branch {
            tracing::debug!(tick, from = ?last_branch, to = ?branch, "branch switch");
            last_branch = branch;
        }

        if !agent.world().is_alive() {
            tracing::warn!(tick, "Agent died");
            return;
        }

        if sim.report_every > 0 && (tick + 1) % sim.report_every == 0 {
            report(agent, "Progress");
        }
    }
}

fn report(agent: &Agent<SandboxWorld>, message: &str) {
    let world = agent.world();
    let ctx = agent.context();
    tracing::info!(
        elapsed = world.elapsed(),
        health = world.agent.health,
        energy = world.agent.energy,
        kills = world.kills(),
        houses = ctx.houses.len(),
        cycle = ctx.houses.cycle(),
        remembered = ctx.items.len(),
        inventory = ?ctx.inventory.slots(),
        "{message}"
    );
}

/// Counts what the agent would draw; the simulator has no screen.
#[derive(Debug, Default)]
struct OverlayStats {
    cells: usize,
    markers: usize,
}

impl DebugDraw for OverlayStats {
    fn draw_polygon(&mut self, _points: &[Vec2], _color: Color) {
        self.cells += 1;
    }

    fn draw_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {
        self.markers += 1;
    }
}
