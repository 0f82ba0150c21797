//! Tri-state outcome of a single tick.

/// What a node reports back to its parent after one tick.
///
/// # Tick Semantics
///
/// Every tick runs to completion. `Running` is not a suspended computation:
/// it is a continuation marker telling the caller that a resumable node
/// (see [`crate::PartialSequence`]) made progress and expects to be ticked
/// again on the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Done, and it worked: a condition held or an action went through.
    Success,

    /// Done, and it did not work. Selectors move on to their next child.
    Failure,

    /// The behavior made progress and wants to resume next tick.
    Running,
}

impl Status {
    #[inline]
    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    #[inline]
    pub fn is_failure(self) -> bool {
        self == Self::Failure
    }

    #[inline]
    pub fn is_running(self) -> bool {
        self == Self::Running
    }

    /// Swaps Success and Failure. `Running` passes through unchanged.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Self::Success => Self::Failure,
            Self::Failure => Self::Success,
            other => other,
        }
    }
}

impl From<bool> for Status {
    #[inline]
    fn from(value: bool) -> Self {
        if value { Status::Success } else { Status::Failure }
    }
}
