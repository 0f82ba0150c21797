//! Leaf behavior nodes built from plain functions.
//!
//! [`Conditional`] turns a predicate into Success/Failure, [`Action`] wraps a
//! function that reports its own [`Status`]. Both accept closures or `fn`
//! items, so a library of domain nodes can be written as free functions over
//! the blackboard type.

use crate::{Behavior, Status};

type Predicate<C> = Box<dyn Fn(&mut C) -> bool + Send + Sync>;
type Effect<C> = Box<dyn Fn(&mut C) -> Status + Send + Sync>;

/// Maps a predicate over the context to `Success` (true) or `Failure` (false).
///
/// The predicate receives the context mutably so it can stash what it matched
/// (e.g. the location of the threat it spotted) for the actions that follow.
pub struct Conditional<C> {
    predicate: Predicate<C>,
}

impl<C> Conditional<C> {
    pub fn new(predicate: impl Fn(&mut C) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
        }
    }
}

impl<C> Behavior<C> for Conditional<C> {
    #[inline]
    fn tick(&mut self, ctx: &mut C) -> Status {
        Status::from((self.predicate)(ctx))
    }
}

/// Runs a state-mutating function and returns its status unchanged.
pub struct Action<C> {
    effect: Effect<C>,
}

impl<C> Action<C> {
    pub fn new(effect: impl Fn(&mut C) -> Status + Send + Sync + 'static) -> Self {
        Self {
            effect: Box::new(effect),
        }
    }
}

impl<C> Behavior<C> for Action<C> {
    #[inline]
    fn tick(&mut self, ctx: &mut C) -> Status {
        (self.effect)(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        value: i32,
    }

    fn is_even(ctx: &mut Counter) -> bool {
        ctx.value % 2 == 0
    }

    #[test]
    fn conditional_maps_bool() {
        let mut node = Conditional::new(is_even);

        assert_eq!(node.tick(&mut Counter { value: 2 }), Status::Success);
        assert_eq!(node.tick(&mut Counter { value: 3 }), Status::Failure);
    }

    #[test]
    fn action_returns_effect_status() {
        let mut node = Action::new(|ctx: &mut Counter| {
            ctx.value += 5;
            if ctx.value > 7 {
                Status::Success
            } else {
                Status::Running
            }
        });

        let mut ctx = Counter { value: 0 };
        assert_eq!(node.tick(&mut ctx), Status::Running);
        assert_eq!(node.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 10);
    }
}
