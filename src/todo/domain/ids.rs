//! Identifier type for persisted todos.

use super::TodoValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned identifier of a persisted todo.
///
/// Identifiers only exist once the persistence layer has created the todo,
/// so the wrapped value is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TodoId(i64);

impl TodoId {
    /// Creates a validated todo identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TodoValidationError::InvalidTodoId`] when the value is zero
    /// or negative.
    pub const fn new(value: i64) -> Result<Self, TodoValidationError> {
        if value <= 0 {
            return Err(TodoValidationError::InvalidTodoId(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for TodoId {
    type Error = TodoValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TodoId> for i64 {
    fn from(id: TodoId) -> Self {
        id.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
