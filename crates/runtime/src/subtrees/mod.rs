//! Subtrees of the decision tree and the fixed priority tree built from them.
//!
//! Subtrees are grouped by concern:
//!
//! - **combat**: shoot, engage, look around after a hit, keep clear of hazards
//! - **looting**: loot in reach, loot in view, houses, remembered needed items
//! - **navigation**: frontier exploration, house revisits, standing still
//!
//! # Architecture
//!
//! ```text
//! selector
//!     ├─ ShootThreat      ← combat::shoot_threat_in_front
//!     ├─ EngageThreat     ← combat::engage_threat_in_view
//!     ├─ LookAround       ← combat::look_around_after_hit
//!     ├─ AvoidHazard      ← combat::avoid_hazard
//!     ├─ HandleLoot       ← looting::handle_loot_in_range
//!     ├─ SeekLoot         ← looting::seek_unremembered_loot
//!     ├─ TraverseHouse    ← looting::traverse_house
//!     ├─ ApproachHouse    ← looting::approach_house
//!     ├─ ClaimHouse       ← looting::claim_new_house
//!     ├─ FetchNeededItem  ← looting::fetch_needed_item
//!     ├─ Explore          ← navigation::explore_frontier
//!     ├─ RevisitHouses    ← navigation::revisit_known_houses
//!     └─ StandStill       ← navigation::stand_still_fallback
//! ```
//!
//! The root selector stops at the first branch that does not fail, so exactly
//! one branch drives the agent each tick and higher-priority survival
//! behavior always preempts looting and exploration.

pub mod combat;
pub mod looting;
pub mod navigation;

use agent_core::WorldInterface;
use behavior_tree::Behavior;
use behavior_tree::builder::selector;

use crate::branch::{PriorityBranch, branch};
use crate::context::AgentContext;

/// Type alias for behavior trees over the agent blackboard.
pub type BehaviorTree<W> = Box<dyn Behavior<AgentContext<W>>>;

/// Builds the full priority tree, highest priority first.
pub fn build_priority_tree<W: WorldInterface + 'static>() -> BehaviorTree<W> {
    use PriorityBranch::*;

    selector(vec![
        branch(ShootThreat, combat::shoot_threat_in_front()),
        branch(EngageThreat, combat::engage_threat_in_view()),
        branch(LookAround, combat::look_around_after_hit()),
        branch(AvoidHazard, combat::avoid_hazard()),
        branch(HandleLoot, looting::handle_loot_in_range()),
        branch(SeekLoot, looting::seek_unremembered_loot()),
        branch(TraverseHouse, looting::traverse_house()),
        branch(ApproachHouse, looting::approach_house()),
        branch(ClaimHouse, looting::claim_new_house()),
        branch(FetchNeededItem, looting::fetch_needed_item()),
        branch(Explore, navigation::explore_frontier()),
        branch(RevisitHouses, navigation::revisit_known_houses()),
        branch(StandStill, navigation::stand_still_fallback()),
    ])
}
