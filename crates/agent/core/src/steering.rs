//! Per-tick steering accumulator.
//!
//! Behaviors never write the frame command directly. They add intents here
//! (seek a point, flee a point, look at a point, force a rotation, run) and
//! [`Steering::resolve`] folds the lot into one [`FrameCommand`] once the tree
//! has been ticked. Resolution clears every accumulator, so nothing carries
//! over into the next tick.

use glam::Vec2;

use crate::types::{AgentSnapshot, FrameCommand};

/// Combined seek and flee sums shorter than this resolve to standing still.
const ZERO_EPSILON_SQ: f32 = 1e-6;

/// Forced rotations smaller than this are treated as "not set".
const ROTATION_EPSILON: f32 = f32::EPSILON;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Steering {
    seek: Vec2,
    flee: Vec2,
    look_target: Option<Vec2>,
    rotation: f32,
    running: bool,
}

impl Steering {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a unit vector from the agent toward `target`.
    pub fn seek(&mut self, target: Vec2, agent: &AgentSnapshot) {
        self.seek += (target - agent.position).normalize_or_zero();
    }

    /// Adds a unit vector from `target` toward the agent.
    pub fn flee(&mut self, target: Vec2, agent: &AgentSnapshot) {
        self.flee += (agent.position - target).normalize_or_zero();
    }

    /// Turns toward `target` at full angular speed. Overrides [`Self::rotate`].
    pub fn look_at(&mut self, target: Vec2) {
        self.look_target = Some(target);
    }

    /// Forces a literal angular velocity and disables auto-orientation.
    pub fn rotate(&mut self, angular_velocity: f32) {
        self.rotation = angular_velocity;
    }

    pub fn run(&mut self) {
        self.running = true;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when no intent has been recorded since the last reset.
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }

    /// Folds the accumulated intents into one command and resets.
    pub fn resolve(&mut self, agent: &AgentSnapshot) -> FrameCommand {
        let mut command = FrameCommand::default();

        let direction = self.seek + self.flee;
        if direction.length_squared() > ZERO_EPSILON_SQ {
            command.linear_velocity = direction.normalize() * agent.max_linear_speed;
        }

        if let Some(target) = self.look_target {
            let to_target = (target - agent.position).normalize_or_zero();
            command.angular_velocity = if agent.forward().perp_dot(to_target) < 0.0 {
                -agent.max_angular_speed
            } else {
                agent.max_angular_speed
            };
            command.auto_orient = false;
        } else if self.rotation.abs() > ROTATION_EPSILON {
            command.angular_velocity = self.rotation;
            command.auto_orient = false;
        }

        command.run_mode = self.running;

        self.reset();
        command
    }
}
