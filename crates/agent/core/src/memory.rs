//! Cross-tick memory: remembered items, known houses, the house being looted.
//!
//! Item memory is deduplicated by distance: two items closer than the memory
//! epsilon are the same item. House memory is permanent; revisiting opens a
//! new looting cycle instead of forgetting houses.

use glam::Vec2;

use crate::types::{HouseInfo, ItemKind};

/// An item seen but not picked up.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RememberedItem {
    pub location: Vec2,
    pub kind: ItemKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ItemMemory {
    items: Vec<RememberedItem>,
    epsilon_sq: f32,
}

impl ItemMemory {
    pub fn new(epsilon_sq: f32) -> Self {
        Self {
            items: Vec::new(),
            epsilon_sq,
        }
    }

    /// Stores a new item. Returns `false` if one is already remembered there.
    pub fn remember(&mut self, location: Vec2, kind: ItemKind) -> bool {
        if self.contains_near(location) {
            return false;
        }
        self.items.push(RememberedItem { location, kind });
        true
    }

    pub fn contains_near(&self, location: Vec2) -> bool {
        self.items
            .iter()
            .any(|item| item.location.distance_squared(location) < self.epsilon_sq)
    }

    /// Drops the entry at `location`, if any. Order is not preserved.
    pub fn forget_near(&mut self, location: Vec2) -> Option<RememberedItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.location.distance_squared(location) < self.epsilon_sq)?;
        Some(self.items.swap_remove(index))
    }

    pub fn count_of(&self, kind: ItemKind) -> usize {
        self.items.iter().filter(|item| item.kind == kind).count()
    }

    /// Closest remembered item of `kind`, optionally limited to `max_range`.
    pub fn nearest_of(
        &self,
        kind: ItemKind,
        from: Vec2,
        max_range: Option<f32>,
    ) -> Option<&RememberedItem> {
        let limit_sq = max_range.map(|range| range * range);
        self.items
            .iter()
            .filter(|item| item.kind == kind)
            .map(|item| (item, item.location.distance_squared(from)))
            .filter(|(_, dist_sq)| limit_sq.is_none_or(|limit| *dist_sq <= limit))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(item, _)| item)
    }

    /// Forgets every remembered junk item. Returns how many were dropped.
    pub fn purge_junk(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.kind != ItemKind::Junk);
        before - self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RememberedItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A house the agent has finished looting at least once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnownHouse {
    pub info: HouseInfo,
    /// Looting cycle in which the house was last finished.
    pub looted_cycle: u32,
}

/// Permanent list of known houses plus the current looting cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct HouseMemory {
    houses: Vec<KnownHouse>,
    cycle: u32,
    epsilon_sq: f32,
}

impl HouseMemory {
    pub fn new(epsilon_sq: f32) -> Self {
        Self {
            houses: Vec::new(),
            cycle: 0,
            epsilon_sq,
        }
    }

    /// Records `house` as looted in the current cycle.
    pub fn commit(&mut self, house: HouseInfo) {
        let cycle = self.cycle;
        match self.find_mut(house.center) {
            Some(known) => known.looted_cycle = cycle,
            None => self.houses.push(KnownHouse {
                info: house,
                looted_cycle: cycle,
            }),
        }
    }

    /// Whether the house at `center` has been looted during the current cycle.
    pub fn is_looted(&self, center: Vec2) -> bool {
        self.houses.iter().any(|known| {
            known.looted_cycle == self.cycle
                && known.info.center.distance_squared(center) < self.epsilon_sq
        })
    }

    /// Whether any known house lies within `epsilon_sq` of `target`.
    pub fn matches_known(&self, target: Vec2, epsilon_sq: f32) -> bool {
        self.houses
            .iter()
            .any(|known| known.info.center.distance_squared(target) < epsilon_sq)
    }

    /// Starts a new looting cycle; every known house becomes lootable again.
    pub fn begin_cycle(&mut self) {
        self.cycle += 1;
    }

    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    pub fn iter(&self) -> impl Iterator<Item = &KnownHouse> {
        self.houses.iter()
    }

    pub fn len(&self) -> usize {
        self.houses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.houses.is_empty()
    }

    fn find_mut(&mut self, center: Vec2) -> Option<&mut KnownHouse> {
        let epsilon_sq = self.epsilon_sq;
        self.houses
            .iter_mut()
            .find(|known| known.info.center.distance_squared(center) < epsilon_sq)
    }
}

/// The house currently being traversed corner by corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveHouse {
    pub info: HouseInfo,
    corner: u8,
}

impl ActiveHouse {
    /// Corner index meaning "every corner visited".
    pub const FINISHED: u8 = 4;

    pub fn new(info: HouseInfo) -> Self {
        Self { info, corner: 0 }
    }

    pub fn corner(&self) -> u8 {
        self.corner
    }

    pub fn is_finished(&self) -> bool {
        self.corner >= Self::FINISHED
    }

    /// Point a quarter of the extents away from the center, in the order
    /// top-left, bottom-right, top-right, bottom-left. `None` once finished.
    pub fn corner_target(&self) -> Option<Vec2> {
        let quarter = self.info.size / 4.0;
        let offset = match self.corner {
            0 => Vec2::new(-quarter.x, quarter.y),
            1 => Vec2::new(quarter.x, -quarter.y),
            2 => Vec2::new(quarter.x, quarter.y),
            3 => Vec2::new(-quarter.x, -quarter.y),
            _ => return None,
        };
        Some(self.info.center + offset)
    }

    /// Moves to the next corner. Returns `true` once the traversal is finished.
    pub fn advance(&mut self) -> bool {
        if !self.is_finished() {
            self.corner += 1;
        }
        self.is_finished()
    }
}
