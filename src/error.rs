//! Error types for joint derivation.

use crate::joint::JointType;
use thiserror::Error;

/// Result type alias for joint derivation.
pub type JointResult<T> = Result<T, JointError>;

/// Which kind of constraint block a [`ConstraintSpec`](crate::ConstraintSpec) carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    /// Translation limits.
    Location,
    /// Rotation limits.
    Rotation,
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Location => f.write_str("location"),
            Self::Rotation => f.write_str("rotation"),
        }
    }
}

/// Errors that can occur while deriving a single joint.
///
/// Every variant is fatal to the joint being processed, never to a batch.
/// Whether a batch aborts or skips the joint is decided by the caller.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum JointError {
    /// Constraint data is missing or inconsistent with the joint type.
    #[error("under-defined constraints for {joint} joint: {reason}")]
    JointType {
        /// The joint type whose axis/limits were requested.
        joint: JointType,
        /// What was missing or inconsistent.
        reason: String,
    },

    /// The constraints match none of the joint patterns.
    #[error("ambiguous constraints: {reason}")]
    AmbiguousConstraints {
        /// Which pattern was almost matched.
        reason: String,
    },

    /// More than one block of the same kind was supplied.
    #[error("duplicate {kind} limit block")]
    DuplicateBlock {
        /// The duplicated block kind.
        kind: BlockKind,
    },

    /// The bone orientation vector has zero length.
    #[error("bone axis has zero length")]
    DegenerateAxis,

    /// A state that classification rules out was reached.
    #[error("internal error: {0}")]
    Internal(String),
}

impl JointError {
    /// Creates an under-defined constraints error.
    #[must_use]
    pub fn joint_type(joint: JointType, reason: impl Into<String>) -> Self {
        Self::JointType {
            joint,
            reason: reason.into(),
        }
    }

    /// Creates an ambiguous constraints error.
    #[must_use]
    pub fn ambiguous(reason: impl Into<String>) -> Self {
        Self::AmbiguousConstraints {
            reason: reason.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(details: impl Into<String>) -> Self {
        Self::Internal(details.into())
    }
}
