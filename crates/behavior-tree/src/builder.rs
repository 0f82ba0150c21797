//! Free-function constructors that return boxed nodes.
//!
//! Trees read top-down when written with these:
//!
//! ```
//! use behavior_tree::{Behavior, Status};
//! use behavior_tree::builder::{action, condition, selector, sequence};
//!
//! let mut tree = selector(vec![
//!     sequence(vec![condition(|n: &mut i32| *n > 0), action(|n: &mut i32| {
//!         *n -= 1;
//!         Status::Success
//!     })]),
//!     action(|_: &mut i32| Status::Failure),
//! ]);
//! assert_eq!(tree.tick(&mut 1), Status::Success);
//! assert_eq!(tree.tick(&mut 0), Status::Failure);
//! ```

use crate::{
    Action, AlwaysSucceed, Behavior, Conditional, Inverter, PartialSequence, Selector, Sequence,
    Status,
};

type Node<C> = Box<dyn Behavior<C>>;

#[inline]
pub fn sequence<C: 'static>(children: Vec<Node<C>>) -> Node<C> {
    Box::new(Sequence::new(children))
}

#[inline]
pub fn selector<C: 'static>(children: Vec<Node<C>>) -> Node<C> {
    Box::new(Selector::new(children))
}

/// Multi-frame sequence for steps that must not all run in one tick, such as
/// "walk there, then turn, then act". The agent's priority tree re-plans every
/// frame and does not use it.
#[inline]
pub fn partial_sequence<C: 'static>(children: Vec<Node<C>>) -> Node<C> {
    Box::new(PartialSequence::new(children))
}

#[inline]
pub fn inverter<C: 'static>(child: Node<C>) -> Node<C> {
    Box::new(Inverter::new(child))
}

#[inline]
pub fn always_succeed<C: 'static>(child: Node<C>) -> Node<C> {
    Box::new(AlwaysSucceed::new(child))
}

/// Condition leaf: `true` is Success, `false` is Failure.
#[inline]
pub fn condition<C: 'static>(
    predicate: impl Fn(&mut C) -> bool + Send + Sync + 'static,
) -> Node<C> {
    Box::new(Conditional::new(predicate))
}

/// Action leaf: the function's status is the node's status.
#[inline]
pub fn action<C: 'static>(effect: impl Fn(&mut C) -> Status + Send + Sync + 'static) -> Node<C> {
    Box::new(Action::new(effect))
}
