//! Boundary with the host simulation.
//!
//! The decision core never reaches into the host directly. Everything it
//! needs per tick (body snapshot, perception lists, item and zone details)
//! and every command it issues (grab, inventory add/use/remove) goes through
//! [`WorldInterface`]. Debug rendering is a separate one-way sink,
//! [`DebugDraw`], so that drawing can never feed back into decisions.

use glam::Vec2;

use crate::error::WorldError;
use crate::types::{
    AgentSnapshot, HazardZoneInfo, HouseInfo, ItemInfo, PerceivedEntity, WorldInfo,
};

/// Query and command surface of the host world.
pub trait WorldInterface: Send + Sync {
    fn agent_info(&self) -> AgentSnapshot;

    fn world_info(&self) -> WorldInfo;

    /// Entities currently in the field of view.
    fn visible_entities(&self) -> Vec<PerceivedEntity>;

    /// Houses currently in the field of view.
    fn visible_houses(&self) -> Vec<HouseInfo>;

    /// Nearest navigable point to `target`. Open worlds can return it as is.
    fn closest_path_point(&self, target: Vec2) -> Vec2 {
        target
    }

    /// Details of a hazard-zone entity, or `None` if it is not one.
    fn hazard_zone_info(&self, entity: &PerceivedEntity) -> Option<HazardZoneInfo>;

    /// Details of an item entity, or `None` if it is not one.
    fn item_info(&self, entity: &PerceivedEntity) -> Option<ItemInfo>;

    /// Takes the item out of the world into the agent's hands.
    fn grab_item(&mut self, entity: &PerceivedEntity) -> Result<ItemInfo, WorldError>;

    /// Stores the item currently in hand into an inventory slot.
    fn inventory_add(&mut self, slot: usize, item: ItemInfo) -> Result<(), WorldError>;

    /// Uses the item in a slot (fires a weapon, applies a consumable).
    fn inventory_use(&mut self, slot: usize) -> Result<(), WorldError>;

    fn inventory_remove(&mut self, slot: usize) -> Result<(), WorldError>;

    /// Live view of a slot, including current ammo or value.
    fn inventory_item(&self, slot: usize) -> Option<ItemInfo>;
}

/// RGB color in the 0..=1 range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const GRAY: Self = Self::rgb(0.5, 0.5, 0.5);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// One-way debug rendering sink. Every method defaults to a no-op.
pub trait DebugDraw {
    fn draw_polygon(&mut self, _points: &[Vec2], _color: Color) {}

    fn draw_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {}

    fn draw_solid_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {}
}

/// Sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullDraw;

impl DebugDraw for NullDraw {}
