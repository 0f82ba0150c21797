//! Fallback movement when nothing more urgent is going on.

use agent_core::WorldInterface;
use behavior_tree::builder::action;

use super::BehaviorTree;
use crate::nodes::*;

pub fn explore_frontier<W: WorldInterface + 'static>() -> BehaviorTree<W> {
    action(explore::<W>)
}

pub fn revisit_known_houses<W: WorldInterface + 'static>() -> BehaviorTree<W> {
    action(revisit_houses::<W>)
}

/// Always succeeds, so every tick ends with a command.
pub fn stand_still_fallback<W: WorldInterface + 'static>() -> BehaviorTree<W> {
    action(stand_still::<W>)
}
