//! Graph-specific error types.

use rtc_core::{ObjectId, RtcError};

/// Graph assembly and validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An object links to a handle outside the arena.
    DanglingHandle { from: ObjectId, to: ObjectId },

    /// An object is not a member of any control group.
    NotGrouped { object: ObjectId },

    /// An object is a member of more than one control group.
    GroupedTwice { object: ObjectId },

    /// An object sits in a group other than the one its id names.
    WrongGroup { object: ObjectId, group: String },

    /// Two arena slots share the same component id.
    DuplicateId { id: String },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::DanglingHandle { from, to } => {
                write!(f, "Object {} links to non-existent object {}", from, to)
            }
            GraphError::NotGrouped { object } => {
                write!(f, "Object {} is not in any control group", object)
            }
            GraphError::GroupedTwice { object } => {
                write!(f, "Object {} is in more than one control group", object)
            }
            GraphError::WrongGroup { object, group } => {
                write!(f, "Object {} was placed in control group '{}'", object, group)
            }
            GraphError::DuplicateId { id } => {
                write!(f, "Component id '{}' was assembled twice", id)
            }
        }
    }
}

impl std::error::Error for GraphError {}

impl From<GraphError> for RtcError {
    fn from(err: GraphError) -> Self {
        RtcError::Invariant {
            what: err.to_string(),
        }
    }
}
