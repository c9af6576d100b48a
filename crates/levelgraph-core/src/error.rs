//! Core error types for levelgraph-core.
//!
//! Uses `thiserror` for structured, matchable variants covering every way an
//! insertion can be refused. Participants are rendered with `Debug` so the
//! error type stays independent of the participant type.

use thiserror::Error;

/// Reasons a link between two participants was refused.
///
/// A refused insertion never modifies the graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A participant was offered as its own parent.
    #[error("participant cannot be its own parent: {participant}")]
    SelfParent { participant: String },

    /// The requested parent has never been inserted.
    #[error("parent participant not found: {parent}")]
    ParentNotFound { parent: String },

    /// The target is already an ancestor of the parent.
    #[error("linking {parent} -> {target} would create a cycle")]
    WouldCycle { parent: String, target: String },
}

impl GraphError {
    pub(crate) fn self_parent(participant: &impl std::fmt::Debug) -> Self {
        GraphError::SelfParent {
            participant: format!("{participant:?}"),
        }
    }

    pub(crate) fn parent_not_found(parent: &impl std::fmt::Debug) -> Self {
        GraphError::ParentNotFound {
            parent: format!("{parent:?}"),
        }
    }

    pub(crate) fn would_cycle(parent: &impl std::fmt::Debug, target: &impl std::fmt::Debug) -> Self {
        GraphError::WouldCycle {
            parent: format!("{parent:?}"),
            target: format!("{target:?}"),
        }
    }
}
