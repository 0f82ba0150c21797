//! The node trait shared by composites, decorators and leaves.

use crate::Status;

/// One node of a behavior tree, evaluated against a blackboard `C`.
///
/// The root is ticked once per frame and every node it reaches runs to
/// completion within that call. Nodes are `Send + Sync` so a whole tree can
/// live inside an agent that moves between threads.
pub trait Behavior<C>: Send + Sync {
    /// Runs the node once.
    ///
    /// `&mut self` lets resumable nodes (see [`crate::PartialSequence`]) keep
    /// their cursor between frames; stateless nodes simply ignore it.
    fn tick(&mut self, ctx: &mut C) -> Status;
}

/// Boxed trees are trees too, so subtrees can be stored and composed as
/// `Box<dyn Behavior<C>>` without extra wrapping.
impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn tick(&mut self, ctx: &mut C) -> Status {
        self.as_mut().tick(ctx)
    }
}
