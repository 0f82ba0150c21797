//! Decision core of the autonomous survival agent.
//!
//! This crate turns the building blocks of `agent-core` into a running agent:
//! a typed blackboard, a library of condition and action leaves, subtree
//! builders and the fixed thirteen-branch priority tree that decides what the
//! agent does each tick. Hosts embed [`Agent`], call [`Agent::update`] once
//! per frame and apply the returned [`FrameCommand`](agent_core::FrameCommand).
//!
//! Modules are organized by responsibility:
//! - [`agent`] hosts the per-frame driver
//! - [`context`] holds the blackboard shared by every node
//! - [`nodes`] provides the condition and action leaves
//! - [`subtrees`] assembles leaves into branches and the priority tree
//! - [`branch`] names the top-level branches for telemetry
//! - [`config`] loads configuration from TOML and the environment
pub mod agent;
pub mod branch;
pub mod config;
pub mod context;
pub mod nodes;
pub mod subtrees;

pub use agent::Agent;
pub use branch::PriorityBranch;
pub use config::{ConfigLoader, LoadResult, SettingsOverrides};
pub use context::{AgentContext, LookAround};
pub use subtrees::{BehaviorTree, build_priority_tree};

#[cfg(feature = "sandbox")]
pub use agent_core::SandboxWorld;
