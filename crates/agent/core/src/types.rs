//! Snapshot and perception types exchanged with the host world.
//!
//! Everything here is plain data. The host refreshes [`AgentSnapshot`] and the
//! perception lists once per tick; the decision core never holds on to a
//! [`PerceivedEntity`] past the tick it was produced in, except by copying its
//! location into memory.

use core::fmt;

use glam::Vec2;

/// Opaque identifier the host uses to address a perceived entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityHandle(pub u32);

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-tick view of the agent's own body, owned by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSnapshot {
    pub position: Vec2,
    /// Facing angle in radians, counter-clockwise from +X.
    pub orientation: f32,
    pub linear_velocity: Vec2,
    pub angular_velocity: f32,
    pub stamina: f32,
    pub energy: f32,
    pub health: f32,
    pub max_linear_speed: f32,
    pub max_angular_speed: f32,
    pub grab_range: f32,
    /// Whether the host applied run mode on the previous frame.
    pub run_mode: bool,
    /// Set by the host for the frame in which the agent took a hit.
    pub was_bitten: bool,
}

impl AgentSnapshot {
    /// Unit vector along the agent's facing.
    #[inline]
    pub fn forward(&self) -> Vec2 {
        Vec2::from_angle(self.orientation)
    }

    #[inline]
    pub fn distance_squared(&self, point: Vec2) -> f32 {
        self.position.distance_squared(point)
    }
}

impl Default for AgentSnapshot {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            orientation: 0.0,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            stamina: 10.0,
            energy: 10.0,
            health: 10.0,
            max_linear_speed: 5.0,
            max_angular_speed: core::f32::consts::PI,
            grab_range: 2.0,
            run_mode: false,
            was_bitten: false,
        }
    }
}

/// Broad category of anything the agent can see.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EntityKind {
    Item,
    Enemy,
    HazardZone,
}

/// One entry of the field-of-view entity list. Lives for a single tick.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerceivedEntity {
    pub handle: EntityHandle,
    pub location: Vec2,
    pub kind: EntityKind,
}

impl PerceivedEntity {
    pub const fn new(handle: EntityHandle, location: Vec2, kind: EntityKind) -> Self {
        Self {
            handle,
            location,
            kind,
        }
    }

    #[inline]
    pub fn is_item(&self) -> bool {
        self.kind == EntityKind::Item
    }

    #[inline]
    pub fn is_enemy(&self) -> bool {
        self.kind == EntityKind::Enemy
    }

    #[inline]
    pub fn is_hazard(&self) -> bool {
        self.kind == EntityKind::HazardZone
    }
}

/// Item classification reported by the host.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemKind {
    Pistol,
    Shotgun,
    Medkit,
    Food,
    /// No retained utility; discarded right after pickup.
    Junk,
}

impl ItemKind {
    #[inline]
    pub const fn is_weapon(self) -> bool {
        matches!(self, Self::Pistol | Self::Shotgun)
    }

    #[inline]
    pub const fn is_consumable(self) -> bool {
        matches!(self, Self::Medkit | Self::Food)
    }
}

/// Item details: the kind plus its single scalar value.
///
/// `value` is ammo for weapons, health for medkits, energy for food and zero
/// for junk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemInfo {
    pub kind: ItemKind,
    pub value: i32,
}

impl ItemInfo {
    pub const fn new(kind: ItemKind, value: i32) -> Self {
        Self { kind, value }
    }
}

/// A house as reported by the perception collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HouseInfo {
    pub center: Vec2,
    /// Full extents (width, height).
    pub size: Vec2,
}

impl HouseInfo {
    pub const fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Strict containment test against the house rectangle.
    pub fn contains(&self, point: Vec2) -> bool {
        let half = self.size / 2.0;
        point.x > self.center.x - half.x
            && point.x < self.center.x + half.x
            && point.y > self.center.y - half.y
            && point.y < self.center.y + half.y
    }
}

/// Circular area hazard.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HazardZoneInfo {
    pub center: Vec2,
    pub radius: f32,
}

/// Bounds of the playable world.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldInfo {
    pub center: Vec2,
    pub dimensions: Vec2,
}

impl WorldInfo {
    pub const fn new(center: Vec2, dimensions: Vec2) -> Self {
        Self { center, dimensions }
    }

    /// Lower-left corner of the world rectangle.
    pub fn origin(&self) -> Vec2 {
        self.center - self.dimensions / 2.0
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let min = self.origin();
        let max = min + self.dimensions;
        point.cmpge(min).all() && point.cmplt(max).all()
    }
}

/// The single per-frame command handed back to the host.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameCommand {
    pub linear_velocity: Vec2,
    pub angular_velocity: f32,
    pub run_mode: bool,
    /// When true the host turns the agent to face along its velocity and
    /// ignores `angular_velocity`.
    pub auto_orient: bool,
}

impl Default for FrameCommand {
    fn default() -> Self {
        Self {
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            run_mode: false,
            auto_orient: true,
        }
    }
}
