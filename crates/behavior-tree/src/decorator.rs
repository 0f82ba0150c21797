//! Single-child nodes that reinterpret their child's result.

use crate::{Behavior, Status};

/// Logical NOT over a child: Success and Failure swap, Running stays Running.
pub struct Inverter<C> {
    child: Box<dyn Behavior<C>>,
}

impl<C> Inverter<C> {
    pub fn new(child: Box<dyn Behavior<C>>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for Inverter<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        self.child.tick(ctx).invert()
    }
}

/// Turns a finished child into `Success` whatever its outcome.
///
/// The child still runs and its side effects stay. A `Running` child is
/// reported as `Running` so that resumable subtrees keep their cursor.
/// Typical use is an optional tail inside a sequence: "also do this if you
/// can".
pub struct AlwaysSucceed<C> {
    child: Box<dyn Behavior<C>>,
}

impl<C> AlwaysSucceed<C> {
    pub fn new(child: Box<dyn Behavior<C>>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for AlwaysSucceed<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        match self.child.tick(ctx) {
            Status::Running => Status::Running,
            _ => Status::Success,
        }
    }
}
