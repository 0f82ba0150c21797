//! Error taxonomy for the decision core.
//!
//! Nothing in here is fatal. Every error ends up degrading one behavior tree
//! node to `Failure`, after which the tree falls through to the next priority
//! branch within the same tick. The [`ErrorClass`] tells callers (and the
//! debug log) which of the three degradation paths applies.
//!
//! "Nothing qualifies" results (no swap worth making, no undiscovered cell)
//! are not errors at all and travel as `Option::None`.

use crate::types::{EntityHandle, ItemKind};

/// Classification of a degraded decision step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// A blackboard field or collaborator answer the node depends on is absent.
    MissingState,
    /// The host world refused a command (grab, use, remove, add).
    CollaboratorRejected,
    /// A search or scoring step found nothing to act on.
    NoCandidate,
}

impl ErrorClass {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingState => "missing_state",
            Self::CollaboratorRejected => "collaborator_rejected",
            Self::NoCandidate => "no_candidate",
        }
    }
}

/// Shared by every error enum in this crate.
///
/// Variants are classified by how the tree degrades, not by severity.
pub trait AgentError: core::fmt::Display + core::fmt::Debug {
    fn class(&self) -> ErrorClass;

    /// Static identifier for this error variant, used in debug logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Rejections reported by the host world.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("grab of entity {0} denied")]
    GrabDenied(EntityHandle),

    #[error("inventory slot {0} is already occupied")]
    SlotOccupied(usize),

    #[error("inventory slot {0} is empty")]
    SlotEmpty(usize),

    #[error("use of inventory slot {0} denied")]
    UseDenied(usize),

    #[error("removal from inventory slot {0} denied")]
    RemoveDenied(usize),

    #[error("entity {0} is not known to the world")]
    UnknownEntity(EntityHandle),

    #[error("inventory slot {0} is out of range")]
    SlotOutOfRange(usize),
}

impl AgentError for WorldError {
    fn class(&self) -> ErrorClass {
        ErrorClass::CollaboratorRejected
    }

    fn error_code(&self) -> &'static str {
        use WorldError::*;
        match self {
            GrabDenied(_) => "WORLD_GRAB_DENIED",
            SlotOccupied(_) => "WORLD_SLOT_OCCUPIED",
            SlotEmpty(_) => "WORLD_SLOT_EMPTY",
            UseDenied(_) => "WORLD_USE_DENIED",
            RemoveDenied(_) => "WORLD_REMOVE_DENIED",
            UnknownEntity(_) => "WORLD_UNKNOWN_ENTITY",
            SlotOutOfRange(_) => "WORLD_SLOT_OUT_OF_RANGE",
        }
    }
}

/// Failures of inventory operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("no free inventory slot")]
    NoFreeSlot,

    #[error("inventory slot {0} holds nothing")]
    EmptySlot(usize),

    #[error("no usable {0} held")]
    NotHeld(ItemKind),

    #[error(transparent)]
    World(#[from] WorldError),
}

impl AgentError for InventoryError {
    fn class(&self) -> ErrorClass {
        use InventoryError::*;
        match self {
            NoFreeSlot | NotHeld(_) => ErrorClass::NoCandidate,
            EmptySlot(_) => ErrorClass::MissingState,
            World(err) => err.class(),
        }
    }

    fn error_code(&self) -> &'static str {
        use InventoryError::*;
        match self {
            NoFreeSlot => "INVENTORY_NO_FREE_SLOT",
            EmptySlot(_) => "INVENTORY_EMPTY_SLOT",
            NotHeld(_) => "INVENTORY_NOT_HELD",
            World(err) => err.error_code(),
        }
    }
}

/// A blackboard field a node needs has not been set this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("blackboard field `{0}` is not set")]
pub struct MissingState(pub &'static str);

impl AgentError for MissingState {
    fn class(&self) -> ErrorClass {
        ErrorClass::MissingState
    }

    fn error_code(&self) -> &'static str {
        "BLACKBOARD_MISSING_STATE"
    }
}
