//! Item and house looting.

use agent_core::WorldInterface;
use behavior_tree::builder::{action, condition, selector, sequence};

use super::BehaviorTree;
use crate::nodes::*;

/// Loot within grab range → take it, swap for it, or remember it.
pub fn handle_loot_in_range<W: WorldInterface + 'static>() -> BehaviorTree<W> {
    sequence(vec![
        condition(is_loot_in_range::<W>),
        selector(vec![
            sequence(vec![
                condition(has_free_slot::<W>),
                action(pick_up_loot::<W>),
            ]),
            sequence(vec![
                condition(is_better_inventory_possible::<W>),
                action(replace_and_pick_up::<W>),
            ]),
            action(remember_loot::<W>),
        ]),
    ])
}

/// Loot in view that memory does not know yet → walk up to it.
pub fn seek_unremembered_loot<W: WorldInterface + 'static>() -> BehaviorTree<W> {
    sequence(vec![
        condition(has_unremembered_loot_in_view::<W>),
        action(seek_entity::<W>),
    ])
}

/// Inside the active house → visit its corners one by one.
pub fn traverse_house<W: WorldInterface + 'static>() -> BehaviorTree<W> {
    sequence(vec![
        condition(is_inside_house::<W>),
        action(set_target_to_corner::<W>),
        action(seek_house::<W>),
    ])
}

/// A house target is set → keep walking to it.
pub fn approach_house<W: WorldInterface + 'static>() -> BehaviorTree<W> {
    sequence(vec![
        condition(is_moving_towards_house::<W>),
        action(seek_house::<W>),
    ])
}

/// An unlooted house came into view → head for it and claim it.
pub fn claim_new_house<W: WorldInterface + 'static>() -> BehaviorTree<W> {
    sequence(vec![
        condition(is_new_house_in_fov::<W>),
        action(seek_house::<W>),
        action(claim_house::<W>),
    ])
}

/// A missing kind of item is remembered somewhere → go get it.
pub fn fetch_needed_item<W: WorldInterface + 'static>() -> BehaviorTree<W> {
    sequence(vec![
        condition(remembers_needed_item::<W>),
        action(seek_entity::<W>),
    ])
}
