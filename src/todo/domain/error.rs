//! Error types for todo domain validation, transitions and time tracking.

use super::{TodoEvent, TodoId, TodoStatus};
use thiserror::Error;

/// Errors returned while constructing validated todo values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoValidationError {
    /// The todo identifier is not a positive integer.
    #[error("invalid todo id {0}, expected a positive integer")]
    InvalidTodoId(i64),

    /// The todo name is empty after trimming.
    #[error("todo name must not be empty")]
    EmptyName,

    /// The todo name exceeds the storage limit.
    #[error("todo name is {length} characters long, limit is {limit}")]
    NameTooLong {
        /// Character count of the rejected value.
        length: usize,
        /// Maximum accepted character count.
        limit: usize,
    },

    /// The description exceeds the storage limit.
    #[error("todo description is {length} characters long, limit is {limit}")]
    DescriptionTooLong {
        /// Character count of the rejected value.
        length: usize,
        /// Maximum accepted character count.
        limit: usize,
    },

    /// The estimated time is below one second.
    #[error("estimated time must be at least 1 second, got {0}")]
    InvalidEstimatedTime(i64),

    /// The actual time is negative.
    #[error("actual time must not be negative, got {0}")]
    InvalidActualTime(i64),

    /// The due date is not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid due date '{0}', expected YYYY-MM-DD")]
    InvalidDueDate(String),

    /// The priority string is not one of `low`, `medium`, `high`.
    #[error("unknown todo priority: {0}")]
    InvalidPriority(String),

    /// The status string is not one of `todo`, `doing`, `pending`, `done`.
    #[error("unknown todo status: {0}")]
    InvalidStatus(String),

    /// The reflection memo is empty after trimming.
    #[error("reflection memo must not be empty")]
    EmptyReflectionMemo,

    /// The reflection memo exceeds the storage limit.
    #[error("reflection memo is {length} characters long, limit is {limit}")]
    ReflectionMemoTooLong {
        /// Character count of the rejected value.
        length: usize,
        /// Maximum accepted character count.
        limit: usize,
    },

    /// A reflection memo was supplied without the status being `done`.
    #[error("reflection memo can only be set together with status done")]
    MemoRequiresDone,

    /// An update request carried no fields.
    #[error("update request must change at least one field")]
    EmptyUpdate,
}

/// Errors returned by the time accumulator.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AccumulatorError {
    /// `start` was called while an interval is already running.
    #[error("time accumulator is already running")]
    AlreadyRunning,

    /// `stop` was called while no interval is running.
    #[error("time accumulator is not running")]
    NotRunning,
}

/// Errors returned by todo aggregate operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDomainError {
    /// The event is not permitted from the current status.
    #[error("todo {todo_id} cannot {event} while {status}")]
    InvalidTransition {
        /// Todo the event was applied to.
        todo_id: TodoId,
        /// Status at the time of the rejected event.
        status: TodoStatus,
        /// Rejected lifecycle event.
        event: TodoEvent,
    },

    /// The todo is done and its content can no longer change.
    #[error("todo {0} is done and can no longer be edited")]
    Finalized(TodoId),

    /// Time accumulator misuse.
    #[error(transparent)]
    Accumulator(#[from] AccumulatorError),

    /// A value failed validation.
    #[error(transparent)]
    Validation(#[from] TodoValidationError),
}
