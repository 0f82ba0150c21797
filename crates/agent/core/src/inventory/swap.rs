//! Swap scoring: is a candidate item worth trading a held one for?
//!
//! The heuristic looks at what is held per kind (count and the weakest slot)
//! and answers with the slot to give up, or `None` when the candidate is not
//! worth taking. Weapons compare ammo, consumables compare their value, and
//! any kind with a surplus can be sacrificed for a kind that is missing.

use crate::config::SwapPolicy;
use crate::types::{ItemInfo, ItemKind};

/// A held item together with the slot it sits in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeldItem {
    pub slot: usize,
    pub info: ItemInfo,
}

impl HeldItem {
    pub const fn new(slot: usize, info: ItemInfo) -> Self {
        Self { slot, info }
    }
}

/// Count and weakest slot of one item kind.
#[derive(Clone, Copy, Debug, Default)]
struct Tally {
    count: u32,
    weakest: Option<(usize, i32)>,
}

impl Tally {
    fn add(&mut self, slot: usize, value: i32) {
        self.count += 1;
        if self.weakest.is_none_or(|(_, lowest)| value < lowest) {
            self.weakest = Some((slot, value));
        }
    }

    fn is_held(&self) -> bool {
        self.count > 0
    }

    fn slot(&self) -> Option<usize> {
        self.weakest.map(|(slot, _)| slot)
    }

    fn lowest(&self) -> Option<i32> {
        self.weakest.map(|(_, value)| value)
    }

    /// Weakest slot if more than `surplus` are held.
    fn surplus_slot(&self, surplus: u32) -> Option<usize> {
        if self.count > surplus { self.slot() } else { None }
    }

    /// Weakest slot if a held one is weaker than `value`.
    fn weaker_than(&self, value: i32) -> Option<usize> {
        match self.weakest {
            Some((slot, lowest)) if lowest < value => Some(slot),
            _ => None,
        }
    }

    fn lowest_at_most(&self, value: i32) -> bool {
        self.lowest().is_some_and(|lowest| lowest <= value)
    }
}

#[derive(Debug, Default)]
struct Holdings {
    pistol: Tally,
    shotgun: Tally,
    medkit: Tally,
    food: Tally,
    junk: Option<usize>,
}

impl Holdings {
    fn from_held(held: &[HeldItem]) -> Self {
        let mut holdings = Self::default();
        for item in held {
            match item.info.kind {
                ItemKind::Pistol => holdings.pistol.add(item.slot, item.info.value),
                ItemKind::Shotgun => holdings.shotgun.add(item.slot, item.info.value),
                ItemKind::Medkit => holdings.medkit.add(item.slot, item.info.value),
                ItemKind::Food => holdings.food.add(item.slot, item.info.value),
                ItemKind::Junk => {
                    holdings.junk.get_or_insert(item.slot);
                }
            }
        }
        holdings
    }
}

/// Picks the held slot to replace with `candidate`, if any.
///
/// `remembered_same_kind` is how many items of the candidate's kind are in
/// item memory; it only matters for weapons, where remembering enough spares
/// makes the held weakest one expendable.
pub fn score(
    held: &[HeldItem],
    candidate: ItemInfo,
    remembered_same_kind: usize,
    policy: &SwapPolicy,
) -> Option<usize> {
    let h = Holdings::from_held(held);

    // Junk that somehow ended up in a slot always goes first.
    if let Some(slot) = h.junk {
        return Some(slot);
    }

    let hoarding = remembered_same_kind >= policy.max_remembered_weapons;
    let items = policy.item_surplus;
    let pistols = policy.pistol_surplus;

    match candidate.kind {
        ItemKind::Pistol => {
            let same = &h.pistol;
            if same.is_held() && hoarding {
                return same.slot();
            }
            if let Some(slot) = same.weaker_than(candidate.value) {
                return Some(slot);
            }
            if same.is_held() {
                return None;
            }
            h.shotgun
                .surplus_slot(items)
                .or_else(|| h.medkit.surplus_slot(items))
                .or_else(|| h.food.surplus_slot(items))
        }
        ItemKind::Shotgun => {
            let same = &h.shotgun;
            if same.is_held() && hoarding {
                return same.slot();
            }
            if let Some(slot) = same.weaker_than(candidate.value) {
                return Some(slot);
            }
            if same.is_held() {
                return None;
            }
            h.pistol
                .surplus_slot(pistols)
                .or_else(|| h.medkit.surplus_slot(items))
                .or_else(|| h.food.surplus_slot(items))
        }
        ItemKind::Medkit => {
            if let Some(slot) = h.medkit.weaker_than(candidate.value) {
                return Some(slot);
            }
            if h.medkit.is_held() {
                return None;
            }
            h.pistol
                .surplus_slot(pistols)
                .or_else(|| h.shotgun.surplus_slot(items))
                .or_else(|| h.food.surplus_slot(items))
        }
        ItemKind::Food => {
            if let Some(slot) = h.food.weaker_than(candidate.value) {
                return Some(slot);
            }
            if h.food.is_held() {
                return None;
            }
            h.pistol
                .surplus_slot(pistols)
                .or_else(|| h.shotgun.surplus_slot(items))
                .or_else(|| h.medkit.surplus_slot(items))
        }
        ItemKind::Junk => {
            let low = policy.low_value;
            if h.pistol.count > pistols + 1 || (h.pistol.count > 1 && h.pistol.lowest_at_most(low))
            {
                return h.pistol.slot();
            }
            if h.shotgun.count > items + 1 || h.shotgun.lowest_at_most(low) {
                return h.shotgun.slot();
            }
            if h.medkit.count > items + 1 || (h.medkit.count > 1 && h.medkit.lowest_at_most(low)) {
                return h.medkit.slot();
            }
            if h.food.count > items + 1 || h.food.lowest_at_most(low) {
                return h.food.slot();
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(items: &[(ItemKind, i32)]) -> Vec<HeldItem> {
        items
            .iter()
            .enumerate()
            .map(|(slot, &(kind, value))| HeldItem::new(slot, ItemInfo::new(kind, value)))
            .collect()
    }

    fn policy() -> SwapPolicy {
        SwapPolicy::default()
    }

    #[test]
    fn empty_inventory_never_swaps() {
        for kind in [
            ItemKind::Pistol,
            ItemKind::Shotgun,
            ItemKind::Medkit,
            ItemKind::Food,
            ItemKind::Junk,
        ] {
            assert_eq!(score(&[], ItemInfo::new(kind, 5), 0, &policy()), None);
        }
    }

    #[test]
    fn no_swap_without_surplus_or_better_value() {
        let held = held(&[(ItemKind::Pistol, 5), (ItemKind::Medkit, 3)]);
        assert_eq!(score(&held, ItemInfo::new(ItemKind::Food, 4), 0, &policy()), None);
        assert_eq!(score(&held, ItemInfo::new(ItemKind::Shotgun, 9), 0, &policy()), None);
        assert_eq!(score(&held, ItemInfo::new(ItemKind::Pistol, 5), 0, &policy()), None);
    }

    #[test]
    fn better_weapon_replaces_weakest_of_kind() {
        let held = held(&[
            (ItemKind::Pistol, 8),
            (ItemKind::Pistol, 2),
            (ItemKind::Food, 3),
        ]);
        assert_eq!(score(&held, ItemInfo::new(ItemKind::Pistol, 6), 0, &policy()), Some(1));
    }

    #[test]
    fn hoarded_weapon_kind_is_expendable() {
        let held = held(&[(ItemKind::Pistol, 9), (ItemKind::Food, 2)]);
        let candidate = ItemInfo::new(ItemKind::Pistol, 2);

        assert_eq!(score(&held, candidate, 2, &policy()), None);
        assert_eq!(score(&held, candidate, 3, &policy()), Some(0));
        assert_eq!(score(&held, candidate, 4, &policy()), Some(0));
    }

    #[test]
    fn hoarding_with_nothing_held_has_no_slot() {
        let candidate = ItemInfo::new(ItemKind::Pistol, 2);
        assert_eq!(score(&[], candidate, 4, &policy()), None);

        let food_only = held(&[(ItemKind::Food, 3)]);
        assert_eq!(score(&food_only, candidate, 4, &policy()), None);
    }

    #[test]
    fn missing_weapon_takes_surplus_slot() {
        let held = held(&[
            (ItemKind::Medkit, 5),
            (ItemKind::Medkit, 3),
            (ItemKind::Food, 4),
            (ItemKind::Food, 1),
            (ItemKind::Pistol, 7),
        ]);
        // No shotgun held: first overrepresented category in order pistol, medkit, food.
        assert_eq!(score(&held, ItemInfo::new(ItemKind::Shotgun, 1), 0, &policy()), Some(1));
    }

    #[test]
    fn pistols_need_a_larger_surplus() {
        let two = held(&[(ItemKind::Pistol, 4), (ItemKind::Pistol, 3)]);
        assert_eq!(score(&two, ItemInfo::new(ItemKind::Medkit, 2), 0, &policy()), None);

        let three = held(&[
            (ItemKind::Pistol, 4),
            (ItemKind::Pistol, 3),
            (ItemKind::Pistol, 6),
        ]);
        assert_eq!(score(&three, ItemInfo::new(ItemKind::Medkit, 2), 0, &policy()), Some(1));
    }

    #[test]
    fn consumables_compare_value() {
        let held = held(&[(ItemKind::Food, 2), (ItemKind::Food, 5), (ItemKind::Medkit, 4)]);
        assert_eq!(score(&held, ItemInfo::new(ItemKind::Food, 3), 0, &policy()), Some(0));
        assert_eq!(score(&held, ItemInfo::new(ItemKind::Medkit, 4), 0, &policy()), None);
        assert_eq!(score(&held, ItemInfo::new(ItemKind::Medkit, 5), 0, &policy()), Some(2));
    }

    #[test]
    fn junk_frees_nearly_spent_items() {
        let spent_shotgun = held(&[(ItemKind::Shotgun, 1), (ItemKind::Food, 6)]);
        assert_eq!(score(&spent_shotgun, ItemInfo::new(ItemKind::Junk, 0), 0, &policy()), Some(0));

        let one_weak_pistol = held(&[(ItemKind::Pistol, 1), (ItemKind::Medkit, 9)]);
        assert_eq!(score(&one_weak_pistol, ItemInfo::new(ItemKind::Junk, 0), 0, &policy()), None);

        let two_pistols = held(&[(ItemKind::Pistol, 1), (ItemKind::Pistol, 9)]);
        assert_eq!(score(&two_pistols, ItemInfo::new(ItemKind::Junk, 0), 0, &policy()), Some(0));
    }

    #[test]
    fn held_junk_goes_first() {
        let held = held(&[(ItemKind::Pistol, 1), (ItemKind::Junk, 0)]);
        assert_eq!(score(&held, ItemInfo::new(ItemKind::Food, 1), 0, &policy()), Some(1));
    }
}
