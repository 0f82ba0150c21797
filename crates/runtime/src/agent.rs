//! Per-frame driver of the decision core.
//!
//! [`Agent`] owns the blackboard and the priority tree. Each call to
//! [`Agent::update`] runs one tick:
//!
//! 1. refresh the snapshot and perception from the world, run down timers
//! 2. mark the agent's surroundings on the exploration grid
//! 3. use a medkit or food item if its value is below the deficit
//! 4. tick the priority tree once from the root
//! 5. fold the steering intents into the [`FrameCommand`]
//!
//! The host reads the result through [`Agent::frame_command`] and applies it.

use agent_core::{AgentConfig, Color, ConfigError, DebugDraw, FrameCommand, WorldInterface};

use crate::branch::PriorityBranch;
use crate::context::AgentContext;
use crate::nodes::degraded;
use crate::subtrees::{BehaviorTree, build_priority_tree};

/// Radius of the marker drawn for each remembered item.
const ITEM_MARKER_RADIUS: f32 = 0.5;

/// Autonomous survival agent over a host world `W`.
pub struct Agent<W: WorldInterface + 'static> {
    tree: BehaviorTree<W>,
    ctx: AgentContext<W>,
    command: FrameCommand,
}

impl<W: WorldInterface + 'static> Agent<W> {
    /// Builds the agent and its priority tree after validating `config`.
    pub fn new(world: W, config: AgentConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            tree: build_priority_tree(),
            ctx: AgentContext::new(world, config),
            command: FrameCommand::default(),
        })
    }

    /// Advances the decision core by `dt` seconds.
    pub fn update(&mut self, dt: f32) -> FrameCommand {
        self.ctx.refresh(dt);

        let agent = self.ctx.agent;
        self.ctx.explorer.observe(agent.position, agent.orientation);

        let ctx = &mut self.ctx;
        if let Err(err) = ctx.inventory.consume_when_useful(
            &mut ctx.world,
            agent.health,
            agent.energy,
            &ctx.config.vitals,
        ) {
            degraded("consume_when_useful", &err);
        }

        let status = self.tree.tick(&mut self.ctx);
        self.command = self.ctx.steering.resolve(&self.ctx.agent);

        tracing::trace!(
            ?status,
            branch = ?self.ctx.branch(),
            velocity = ?self.command.linear_velocity,
            angular = self.command.angular_velocity,
            "agent tick"
        );

        self.command
    }

    /// Command produced by the last [`Self::update`].
    pub fn frame_command(&self) -> FrameCommand {
        self.command
    }

    /// Priority branch that drove the last tick.
    pub fn last_branch(&self) -> Option<PriorityBranch> {
        self.ctx.branch()
    }

    /// Draws the exploration grid and remembered items.
    pub fn render(&self, draw: &mut dyn DebugDraw) {
        self.ctx.explorer.draw_debug(draw);
        for item in self.ctx.items.iter() {
            draw.draw_circle(item.location, ITEM_MARKER_RADIUS, Color::RED);
        }
    }

    pub fn context(&self) -> &AgentContext<W> {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut AgentContext<W> {
        &mut self.ctx
    }

    pub fn world(&self) -> &W {
        &self.ctx.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.ctx.world
    }
}

#[cfg(test)]
mod tests {
    use agent_core::{
        EntityKind, GridConfig, ItemInfo, ItemKind, PerceivedEntity, SandboxWorld, Vec2,
    };

    use super::*;

    #[test]
    fn rejects_invalid_config() {
        let config = AgentConfig {
            grid: GridConfig {
                size: 1,
                ..GridConfig::default()
            },
            ..AgentConfig::default()
        };
        assert!(Agent::new(SandboxWorld::default(), config).is_err());
    }

    #[test]
    fn update_stores_frame_command() {
        let mut agent = Agent::new(SandboxWorld::default(), AgentConfig::default()).unwrap();
        let command = agent.update(0.1);
        assert_eq!(agent.frame_command(), command);
        assert!(agent.last_branch().is_some());
    }

    #[test]
    fn consumes_medkit_when_hurt() {
        let mut world = SandboxWorld::default();
        world.agent.health = 4.0;
        let mut agent = Agent::new(world, AgentConfig::default()).unwrap();

        let handle = agent
            .world_mut()
            .add_item(Vec2::ZERO, ItemInfo::new(ItemKind::Medkit, 5));
        let medkit = PerceivedEntity::new(handle, Vec2::ZERO, EntityKind::Item);
        let ctx = agent.context_mut();
        ctx.inventory.pick_up(&mut ctx.world, &medkit).unwrap();

        agent.update(0.1);
        assert!(!agent.context().inventory.has(ItemKind::Medkit));
        assert_eq!(agent.world().agent.health, 9.0);
    }
}
