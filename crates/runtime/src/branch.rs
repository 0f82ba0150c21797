//! Top-level priority branches and the node that labels them.

use agent_core::WorldInterface;
use behavior_tree::{Behavior, Status};

use crate::context::AgentContext;
use crate::subtrees::BehaviorTree;

/// The mutually exclusive top-level behaviors, highest priority first.
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
    strum::EnumCount,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PriorityBranch {
    ShootThreat,
    EngageThreat,
    LookAround,
    AvoidHazard,
    HandleLoot,
    SeekLoot,
    TraverseHouse,
    ApproachHouse,
    ClaimHouse,
    FetchNeededItem,
    Explore,
    RevisitHouses,
    StandStill,
}

/// Wraps a branch subtree and records it as the winner when it does not fail.
pub struct Branch<W> {
    kind: PriorityBranch,
    child: BehaviorTree<W>,
}

impl<W> Branch<W> {
    pub fn new(kind: PriorityBranch, child: BehaviorTree<W>) -> Self {
        Self { kind, child }
    }

    pub fn kind(&self) -> PriorityBranch {
        self.kind
    }
}

impl<W: WorldInterface> Behavior<AgentContext<W>> for Branch<W> {
    fn tick(&mut self, ctx: &mut AgentContext<W>) -> Status {
        let status = self.child.tick(ctx);
        if !status.is_failure() {
            ctx.branch = Some(self.kind);
            tracing::trace!(branch = %self.kind, ?status, "branch selected");
        }
        status
    }
}

/// Shorthand for `Box::new(Branch::new(kind, child))`.
pub fn branch<W: WorldInterface + 'static>(
    kind: PriorityBranch,
    child: BehaviorTree<W>,
) -> BehaviorTree<W> {
    Box::new(Branch::new(kind, child))
}
