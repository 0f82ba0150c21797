//! Lightweight tick-driven behavior tree library for real-time agents.
//!
//! The whole tree is re-evaluated from the root every frame. Nodes that need
//! to remember progress across frames (such as [`PartialSequence`]) keep that
//! state themselves, and the blackboard type `C` carries everything else.
//!
//! - **Three-state results**: Success, Failure and Running
//! - **Resumable composites**: a partial sequence advances one child per tick
//! - **Function leaves**: conditions and actions are plain closures or `fn`s
//! - **Zero dependencies**: Pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`]: Success, Failure or Running
//! - Composite nodes: [`Sequence`], [`Selector`], [`PartialSequence`]
//! - Decorator nodes: [`Inverter`], [`AlwaysSucceed`]
//! - Leaf nodes: [`Conditional`], [`Action`]

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod leaf;
pub mod status;

// Re-export core types for ergonomic API
pub use behavior::Behavior;
pub use composite::{PartialSequence, Selector, Sequence};
pub use decorator::{AlwaysSucceed, Inverter};
pub use leaf::{Action, Conditional};
pub use status::Status;
