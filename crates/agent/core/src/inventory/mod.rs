//! Slot model mirroring the host inventory.
//!
//! The host owns the actual items (and their live ammo or value); this model
//! only tracks which kind sits in which slot so that conditions can answer
//! "do I hold a gun" without a round-trip. Every mutation goes through the
//! [`WorldInterface`] first and only touches the local slots once the host has
//! accepted the command.

pub mod swap;

use arrayvec::ArrayVec;

use crate::config::{AgentConfig, SwapPolicy, VitalsConfig};
use crate::error::{InventoryError, WorldError};
use crate::interface::WorldInterface;
use crate::memory::ItemMemory;
use crate::types::{ItemInfo, ItemKind, PerceivedEntity};

pub use swap::HeldItem;

const SLOTS: usize = AgentConfig::INVENTORY_SLOTS;

pub type InventoryResult<T> = Result<T, InventoryError>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    slots: [Option<ItemKind>; SLOTS],
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self) -> &[Option<ItemKind>; SLOTS] {
        &self.slots
    }

    pub fn has(&self, kind: ItemKind) -> bool {
        self.slots.contains(&Some(kind))
    }

    pub fn has_weapon(&self) -> bool {
        self.has(ItemKind::Pistol) || self.has(ItemKind::Shotgun)
    }

    pub fn is_full(&self) -> bool {
        self.free_slot().is_none()
    }

    /// First empty slot, in index order.
    pub fn free_slot(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Grabs `entity` and stores it in the first free slot.
    ///
    /// Junk is dropped again right away and leaves the slot empty. A free slot
    /// is required either way, since the host needs somewhere to put it first.
    pub fn pick_up<W>(&mut self, world: &mut W, entity: &PerceivedEntity) -> InventoryResult<ItemKind>
    where
        W: WorldInterface + ?Sized,
    {
        let slot = self.free_slot().ok_or(InventoryError::NoFreeSlot)?;
        let item = world.grab_item(entity)?;
        world.inventory_add(slot, item)?;

        if item.kind == ItemKind::Junk {
            world.inventory_remove(slot)?;
            tracing::debug!(slot, "discarded junk");
            return Ok(ItemKind::Junk);
        }

        self.slots[slot] = Some(item.kind);
        tracing::debug!(slot, item = %item.kind, value = item.value, "picked up item");
        Ok(item.kind)
    }

    /// Empties `slot` (consuming it if it is a medkit or food) and picks up
    /// `entity` in its place.
    pub fn replace<W>(
        &mut self,
        world: &mut W,
        slot: usize,
        entity: &PerceivedEntity,
    ) -> InventoryResult<ItemKind>
    where
        W: WorldInterface + ?Sized,
    {
        if slot >= SLOTS {
            return Err(WorldError::SlotOutOfRange(slot).into());
        }
        let held = world
            .inventory_item(slot)
            .ok_or(InventoryError::EmptySlot(slot))?;

        if held.kind.is_consumable() {
            world.inventory_use(slot)?;
        }
        world.inventory_remove(slot)?;
        self.slots[slot] = None;
        tracing::debug!(slot, item = %held.kind, "dropped item for a better one");

        self.pick_up(world, entity)
    }

    /// Fires one shot from the first slot holding `kind` that the host accepts.
    ///
    /// A weapon whose ammo is gone afterwards is removed from the inventory.
    pub fn shoot<W>(&mut self, world: &mut W, kind: ItemKind) -> InventoryResult<()>
    where
        W: WorldInterface + ?Sized,
    {
        let mut last_err = None;
        for slot in 0..SLOTS {
            if self.slots[slot] != Some(kind) {
                continue;
            }
            match world.inventory_use(slot) {
                Ok(()) => {
                    let spent = world
                        .inventory_item(slot)
                        .is_none_or(|item| item.value <= 0);
                    if spent {
                        self.discard(world, slot)?;
                    }
                    tracing::debug!(slot, weapon = %kind, spent, "fired");
                    return Ok(());
                }
                Err(err) => last_err = Some(err),
            }
        }
        match last_err {
            Some(err) => Err(err.into()),
            None => Err(InventoryError::NotHeld(kind)),
        }
    }

    /// Fires the weapon that suits the number of enemies in view.
    ///
    /// Crowds get the shotgun first, single targets the pistol; either falls
    /// back to the other weapon.
    pub fn fire<W>(&mut self, world: &mut W, enemy_count: usize) -> InventoryResult<ItemKind>
    where
        W: WorldInterface + ?Sized,
    {
        let order = if enemy_count > 1 {
            [ItemKind::Shotgun, ItemKind::Pistol]
        } else {
            [ItemKind::Pistol, ItemKind::Shotgun]
        };

        let mut last_err = InventoryError::NotHeld(order[0]);
        for kind in order {
            match self.shoot(world, kind) {
                Ok(()) => return Ok(kind),
                Err(InventoryError::NotHeld(_)) => {}
                Err(err) => last_err = err,
            }
        }
        Err(last_err)
    }

    /// Uses at most one medkit or food item whose value is strictly below the
    /// current deficit, so an exact fit waits a little longer. Returns the
    /// kind that was consumed, if any.
    pub fn consume_when_useful<W>(
        &mut self,
        world: &mut W,
        health: f32,
        energy: f32,
        vitals: &VitalsConfig,
    ) -> InventoryResult<Option<ItemKind>>
    where
        W: WorldInterface + ?Sized,
    {
        let health_deficit = vitals.max_health - health;
        let energy_deficit = vitals.max_energy - energy;

        for slot in 0..SLOTS {
            let deficit = match self.slots[slot] {
                Some(ItemKind::Medkit) => health_deficit,
                Some(ItemKind::Food) => energy_deficit,
                _ => continue,
            };
            let Some(item) = world.inventory_item(slot) else {
                continue;
            };
            if (item.value as f32) < deficit {
                world.inventory_use(slot)?;
                self.discard(world, slot)?;
                tracing::debug!(slot, item = %item.kind, value = item.value, "consumed item");
                return Ok(Some(item.kind));
            }
        }
        Ok(None)
    }

    /// Live details of every occupied slot.
    pub fn held_items<W>(&self, world: &W) -> ArrayVec<HeldItem, SLOTS>
    where
        W: WorldInterface + ?Sized,
    {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, kind)| kind.is_some())
            .filter_map(|(slot, _)| world.inventory_item(slot).map(|info| HeldItem::new(slot, info)))
            .collect()
    }

    /// Slot worth giving up for `candidate`, if any.
    pub fn score_swap<W>(
        &self,
        world: &W,
        candidate: ItemInfo,
        memory: &ItemMemory,
        policy: &SwapPolicy,
    ) -> Option<usize>
    where
        W: WorldInterface + ?Sized,
    {
        let held = self.held_items(world);
        swap::score(&held, candidate, memory.count_of(candidate.kind), policy)
    }

    fn discard<W>(&mut self, world: &mut W, slot: usize) -> InventoryResult<()>
    where
        W: WorldInterface + ?Sized,
    {
        world.inventory_remove(slot)?;
        self.slots[slot] = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sandbox::SandboxWorld;
    use crate::types::EntityKind;

    fn world_with_items(items: &[(ItemKind, i32)]) -> (SandboxWorld, Vec<PerceivedEntity>) {
        let mut world = SandboxWorld::default();
        let entities = items
            .iter()
            .enumerate()
            .map(|(i, &(kind, value))| {
                let location = Vec2::new(i as f32, 0.0);
                let handle = world.add_item(location, ItemInfo::new(kind, value));
                PerceivedEntity::new(handle, location, EntityKind::Item)
            })
            .collect();
        (world, entities)
    }

    #[test]
    fn pick_up_fills_first_free_slot() {
        let (mut world, entities) =
            world_with_items(&[(ItemKind::Pistol, 6), (ItemKind::Food, 3)]);
        let mut inventory = Inventory::new();

        assert_eq!(inventory.pick_up(&mut world, &entities[0]), Ok(ItemKind::Pistol));
        assert_eq!(inventory.pick_up(&mut world, &entities[1]), Ok(ItemKind::Food));
        assert_eq!(inventory.slots()[0], Some(ItemKind::Pistol));
        assert_eq!(inventory.slots()[1], Some(ItemKind::Food));
        assert_eq!(world.inventory_item(1), Some(ItemInfo::new(ItemKind::Food, 3)));
        assert!(inventory.has_weapon());
    }

    #[test]
    fn junk_is_discarded_on_pickup() {
        let (mut world, entities) = world_with_items(&[(ItemKind::Junk, 0)]);
        let mut inventory = Inventory::new();

        assert_eq!(inventory.pick_up(&mut world, &entities[0]), Ok(ItemKind::Junk));
        assert_eq!(inventory.free_slot(), Some(0));
        assert_eq!(world.inventory_item(0), None);
    }

    #[test]
    fn full_inventory_rejects_pickup() {
        let (mut world, entities) = world_with_items(&[
            (ItemKind::Food, 1),
            (ItemKind::Food, 1),
            (ItemKind::Food, 1),
            (ItemKind::Food, 1),
            (ItemKind::Food, 1),
            (ItemKind::Medkit, 5),
        ]);
        let mut inventory = Inventory::new();
        for entity in &entities[..5] {
            inventory.pick_up(&mut world, entity).unwrap();
        }

        assert!(inventory.is_full());
        assert_eq!(
            inventory.pick_up(&mut world, &entities[5]),
            Err(InventoryError::NoFreeSlot)
        );
    }

    #[test]
    fn replace_consumes_old_consumable() {
        let (mut world, entities) =
            world_with_items(&[(ItemKind::Food, 2), (ItemKind::Shotgun, 4)]);
        let mut inventory = Inventory::new();
        inventory.pick_up(&mut world, &entities[0]).unwrap();
        world.agent.energy = 5.0;

        assert_eq!(inventory.replace(&mut world, 0, &entities[1]), Ok(ItemKind::Shotgun));
        assert_eq!(inventory.slots()[0], Some(ItemKind::Shotgun));
        assert_eq!(world.agent.energy, 7.0);
    }

    #[test]
    fn replace_of_empty_slot_fails() {
        let (mut world, entities) = world_with_items(&[(ItemKind::Food, 2)]);
        let mut inventory = Inventory::new();
        assert_eq!(
            inventory.replace(&mut world, 2, &entities[0]),
            Err(InventoryError::EmptySlot(2))
        );
        assert_eq!(
            inventory.replace(&mut world, 9, &entities[0]),
            Err(InventoryError::World(WorldError::SlotOutOfRange(9)))
        );
    }

    #[test]
    fn firing_prefers_weapon_by_crowd_size() {
        let (mut world, entities) =
            world_with_items(&[(ItemKind::Pistol, 3), (ItemKind::Shotgun, 3)]);
        let mut inventory = Inventory::new();
        for entity in &entities {
            inventory.pick_up(&mut world, entity).unwrap();
        }

        assert_eq!(inventory.fire(&mut world, 1), Ok(ItemKind::Pistol));
        assert_eq!(inventory.fire(&mut world, 3), Ok(ItemKind::Shotgun));
        assert_eq!(world.inventory_item(0).map(|i| i.value), Some(2));
        assert_eq!(world.inventory_item(1).map(|i| i.value), Some(2));
    }

    #[test]
    fn empty_weapon_is_dropped_after_last_shot() {
        let (mut world, entities) = world_with_items(&[(ItemKind::Shotgun, 1)]);
        let mut inventory = Inventory::new();
        inventory.pick_up(&mut world, &entities[0]).unwrap();

        // Single enemy prefers the pistol but falls back to the shotgun.
        assert_eq!(inventory.fire(&mut world, 1), Ok(ItemKind::Shotgun));
        assert!(!inventory.has_weapon());
        assert_eq!(world.inventory_item(0), None);
        assert_eq!(inventory.fire(&mut world, 1), Err(InventoryError::NotHeld(ItemKind::Pistol)));
    }

    #[test]
    fn consumes_only_when_value_fits_deficit() {
        let (mut world, entities) =
            world_with_items(&[(ItemKind::Medkit, 4), (ItemKind::Food, 3)]);
        let mut inventory = Inventory::new();
        for entity in &entities {
            inventory.pick_up(&mut world, entity).unwrap();
        }
        let vitals = VitalsConfig::default();

        assert_eq!(inventory.consume_when_useful(&mut world, 7.0, 8.0, &vitals), Ok(None));
        assert_eq!(
            inventory.consume_when_useful(&mut world, 5.0, 5.0, &vitals),
            Ok(Some(ItemKind::Medkit))
        );
        assert!(!inventory.has(ItemKind::Medkit));
        assert!(inventory.has(ItemKind::Food));
    }

    #[test]
    fn exact_fit_is_not_consumed_yet() {
        let (mut world, entities) = world_with_items(&[(ItemKind::Medkit, 4)]);
        let mut inventory = Inventory::new();
        inventory.pick_up(&mut world, &entities[0]).unwrap();
        let vitals = VitalsConfig::default();

        assert_eq!(inventory.consume_when_useful(&mut world, 6.0, 10.0, &vitals), Ok(None));
        assert!(inventory.has(ItemKind::Medkit));
        assert_eq!(
            inventory.consume_when_useful(&mut world, 5.5, 10.0, &vitals),
            Ok(Some(ItemKind::Medkit))
        );
    }

    #[test]
    fn hoarding_needs_a_held_pistol_to_give_up() {
        let (world, _) = world_with_items(&[]);
        let inventory = Inventory::new();
        let mut memory = ItemMemory::new(0.2);
        for x in [10.0, 20.0, 30.0, 40.0] {
            memory.remember(Vec2::new(x, 5.0), ItemKind::Pistol);
        }

        // Nothing held means nothing to swap out; the free slot takes it instead.
        let candidate = ItemInfo::new(ItemKind::Pistol, 2);
        let policy = SwapPolicy::default();
        assert_eq!(inventory.score_swap(&world, candidate, &memory, &policy), None);
        assert_eq!(inventory.free_slot(), Some(0));
    }

    #[test]
    fn score_swap_reads_live_values() {
        let (mut world, entities) =
            world_with_items(&[(ItemKind::Pistol, 5), (ItemKind::Pistol, 2)]);
        let mut inventory = Inventory::new();
        inventory.pick_up(&mut world, &entities[0]).unwrap();

        let mut memory = ItemMemory::new(0.2);
        for x in [10.0, 20.0, 30.0, 40.0] {
            memory.remember(Vec2::new(x, 5.0), ItemKind::Pistol);
        }
        let policy = SwapPolicy::default();

        // Free slots remain, but four spare pistols are remembered.
        let candidate = ItemInfo::new(ItemKind::Pistol, 2);
        assert_eq!(inventory.score_swap(&world, candidate, &memory, &policy), Some(0));

        let forgetful = ItemMemory::new(0.2);
        assert_eq!(inventory.score_swap(&world, candidate, &forgetful, &policy), None);
    }
}
