//! Leaf library of the decision tree.
//!
//! Leaves are free functions over [`AgentContext`](crate::AgentContext),
//! wrapped into nodes with `behavior_tree::builder::{condition, action}`:
//!
//! - `conditions`: predicates that may record what they matched
//! - `actions`: effects on steering, inventory, grid and memory

pub mod actions;
pub mod conditions;

pub use actions::*;
pub use conditions::*;

use agent_core::AgentError;

/// Logs why a node degraded to `Failure`.
pub(crate) fn degraded(node: &'static str, err: &impl AgentError) {
    tracing::debug!(
        node,
        code = err.error_code(),
        class = err.class().as_str(),
        "{err}"
    );
}
