//! Multi-child nodes: ordered AND, ordered OR, and a resumable AND.
//!
//! All three walk their children left to right. They differ in which child
//! result ends the walk and in whether the walk picks up where it left off on
//! the next frame.

use crate::{Behavior, Status};

type Children<C> = Vec<Box<dyn Behavior<C>>>;

fn non_empty<C>(children: Children<C>, node: &str) -> Children<C> {
    assert!(!children.is_empty(), "{node} needs at least one child");
    children
}

/// Short-circuit AND.
///
/// Ticks children in order while they succeed. The first `Failure` or
/// `Running` is returned as is and later children are not ticked this frame.
/// Succeeds when every child succeeded.
///
/// Panics at construction when given no children.
pub struct Sequence<C> {
    children: Children<C>,
}

impl<C> Sequence<C> {
    pub fn new(children: Children<C>) -> Self {
        Self {
            children: non_empty(children, "Sequence"),
        }
    }
}

impl<C> Behavior<C> for Sequence<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        self.children
            .iter_mut()
            .map(|child| child.tick(ctx))
            .find(|status| !status.is_success())
            .unwrap_or(Status::Success)
    }
}

/// Short-circuit OR, the priority list of a tree.
///
/// Ticks children in order while they fail. The first `Success` or `Running`
/// is returned as is, so at most one branch commits per frame. Fails when
/// every child failed.
///
/// Panics at construction when given no children.
pub struct Selector<C> {
    children: Children<C>,
}

impl<C> Selector<C> {
    pub fn new(children: Children<C>) -> Self {
        Self {
            children: non_empty(children, "Selector"),
        }
    }
}

impl<C> Behavior<C> for Selector<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        self.children
            .iter_mut()
            .map(|child| child.tick(ctx))
            .find(|status| !status.is_failure())
            .unwrap_or(Status::Failure)
    }
}

/// Sequence spread over several frames.
///
/// The node keeps a cursor into its children and resumes from it:
/// - If the current child returns `Success`, the cursor advances and the node
///   reports `Running` without ticking the next child in the same frame
/// - If the current child returns `Running`, the node reports `Running`
/// - If the current child returns `Failure`, the cursor resets to 0 and the
///   node reports `Failure`
/// - Once the cursor moves past the last child, it resets to 0 and the node
///   reports `Success`
pub struct PartialSequence<C> {
    children: Children<C>,
    cursor: usize,
}

impl<C> PartialSequence<C> {
    /// Panics when given no children.
    pub fn new(children: Children<C>) -> Self {
        Self {
            children: non_empty(children, "PartialSequence"),
            cursor: 0,
        }
    }

    /// Index of the child that will be ticked next.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl<C> Behavior<C> for PartialSequence<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        let Some(child) = self.children.get_mut(self.cursor) else {
            self.cursor = 0;
            return Status::Success;
        };

        match child.tick(ctx) {
            Status::Failure => {
                self.cursor = 0;
                Status::Failure
            }
            Status::Success => {
                self.cursor += 1;
                Status::Running
            }
            Status::Running => Status::Running,
        }
    }
}
