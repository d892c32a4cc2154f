//! Shared error kind for the stowage core.
//!
//! Mirrors the teacher crate's per-subsystem `thiserror` enums
//! (`ScheduleError`, `SchedulingError`, `ConstraintError`) collapsed into the
//! five kinds spec.md §7 names, so every subsystem propagates through the
//! same type instead of inventing its own.

use thiserror::Error;

/// The five error kinds of spec.md §7.
///
/// `Unplaced` items and "item not found" for search are *not* represented
/// here — spec.md is explicit that those are normal results in their
/// response schemas, not errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InventoryError {
    /// Malformed row, missing required field, or a `Simulate` call with
    /// neither `num_of_days` nor `to_timestamp` set.
    #[error("invalid input: {detail}")]
    InvalidInput { detail: String },

    /// A referenced container or item id does not exist.
    #[error("{kind} not found: {id}")]
    EntityNotFound { kind: &'static str, id: String },

    /// A pose fell outside its container, overlapped another item, or
    /// `uses_remaining` exceeded `usage_limit`.
    #[error("invariant violation: {detail}")]
    InvariantViolation { detail: String },

    /// An operation conflicted with the current state of an entity (e.g.
    /// placing a waste item, completing undocking on a non-undocking
    /// container).
    #[error("conflicting state: {detail}")]
    ConflictingState { detail: String },

    /// An unexpected condition that is not one of the above.
    #[error("internal error: {detail}")]
    Internal { detail: String },
}

/// Discriminant of [`InventoryError`], used by callers (e.g. an HTTP layer)
/// that need to branch on kind without matching the full error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    EntityNotFound,
    InvariantViolation,
    ConflictingState,
    Internal,
}

impl InventoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InventoryError::InvalidInput { .. } => ErrorKind::InvalidInput,
            InventoryError::EntityNotFound { .. } => ErrorKind::EntityNotFound,
            InventoryError::InvariantViolation { .. } => ErrorKind::InvariantViolation,
            InventoryError::ConflictingState { .. } => ErrorKind::ConflictingState,
            InventoryError::Internal { .. } => ErrorKind::Internal,
        }
    }

    pub fn invalid_input(detail: impl Into<String>) -> Self {
        InventoryError::InvalidInput {
            detail: detail.into(),
        }
    }

    pub fn entity_not_found(kind: &'static str, id: impl Into<String>) -> Self {
        InventoryError::EntityNotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn invariant_violation(detail: impl Into<String>) -> Self {
        InventoryError::InvariantViolation {
            detail: detail.into(),
        }
    }

    pub fn conflicting_state(detail: impl Into<String>) -> Self {
        InventoryError::ConflictingState {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        InventoryError::Internal {
            detail: detail.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, InventoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        let e = InventoryError::invalid_input("missing itemId");
        assert_eq!(e.kind(), ErrorKind::InvalidInput);
        let e = InventoryError::entity_not_found("item", "i1");
        assert_eq!(e.kind(), ErrorKind::EntityNotFound);
    }

    #[test]
    fn display_includes_detail() {
        let e = InventoryError::invariant_violation("pose overlaps item i2");
        assert!(e.to_string().contains("pose overlaps item i2"));
    }
}
