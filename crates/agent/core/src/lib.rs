//! Deterministic sub-systems and data types of the survival agent.
//!
//! `agent-core` holds everything the decision runtime manipulates but that
//! does not depend on the behavior tree itself: snapshot and perception types,
//! the [`WorldInterface`] boundary with the host simulation, the per-tick
//! [`Steering`] accumulator, the [`Inventory`] slot model with swap scoring,
//! the [`ExplorationGrid`] frontier search and the item/house memories.
//! All tunables live in [`AgentConfig`].
pub mod config;
pub mod error;
pub mod exploration;
pub mod interface;
pub mod inventory;
pub mod memory;
#[cfg(any(test, feature = "sandbox"))]
pub mod sandbox;
pub mod steering;
pub mod types;

pub use glam::Vec2;

pub use config::{AgentConfig, ConfigError, GridConfig, SenseConfig, SwapPolicy, VitalsConfig};
pub use error::{AgentError, ErrorClass, InventoryError, MissingState, WorldError};
pub use exploration::{Cell, CellFlags, ExplorationGrid};
pub use interface::{Color, DebugDraw, NullDraw, WorldInterface};
pub use inventory::{HeldItem, Inventory, InventoryResult};
pub use memory::{ActiveHouse, HouseMemory, ItemMemory, KnownHouse, RememberedItem};
#[cfg(any(test, feature = "sandbox"))]
pub use sandbox::SandboxWorld;
pub use steering::Steering;
pub use types::{
    AgentSnapshot, EntityHandle, EntityKind, FrameCommand, HazardZoneInfo, HouseInfo, ItemInfo,
    ItemKind, PerceivedEntity, WorldInfo,
};
