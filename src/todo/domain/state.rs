//! Todo status, priority and lifecycle event enumerations.

use super::TodoValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Todo lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    /// Created, work not started.
    Todo,
    /// Work in progress; time is being accumulated.
    Doing,
    /// Work paused.
    Pending,
    /// Completed with a reflection memo. Terminal.
    Done,
}

impl TodoStatus {
    /// Every status in lifecycle order.
    pub const ALL: [Self; 4] = [Self::Todo, Self::Doing, Self::Pending, Self::Done];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Pending => "pending",
            Self::Done => "done",
        }
    }

    /// Returns whether no event may leave this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns whether a status change to `target` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Todo | Self::Pending, Self::Doing)
                | (Self::Doing, Self::Pending)
                | (Self::Todo | Self::Doing | Self::Pending, Self::Done)
        )
    }

    /// Returns whether `event` is accepted in this status.
    #[must_use]
    pub const fn accepts(self, event: TodoEvent) -> bool {
        match event {
            TodoEvent::Delete => !self.is_terminal(),
            TodoEvent::Start | TodoEvent::Pause | TodoEvent::Complete => {
                self.after(event).is_some()
            }
        }
    }

    /// Returns the status reached by applying `event`, or `None` when the
    /// event is rejected or removes the todo instead of changing its status.
    #[must_use]
    pub const fn after(self, event: TodoEvent) -> Option<Self> {
        match (self, event) {
            (Self::Todo | Self::Pending, TodoEvent::Start) => Some(Self::Doing),
            (Self::Doing, TodoEvent::Pause) => Some(Self::Pending),
            (Self::Todo | Self::Doing | Self::Pending, TodoEvent::Complete) => Some(Self::Done),
            _ => None,
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TodoStatus {
    type Error = TodoValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "doing" => Ok(Self::Doing),
            "pending" => Ok(Self::Pending),
            "done" => Ok(Self::Done),
            _ => Err(TodoValidationError::InvalidStatus(value.to_owned())),
        }
    }
}

/// Todo priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoPriority {
    /// Low priority.
    Low,
    /// Medium priority; the default for new todos.
    #[default]
    Medium,
    /// High priority.
    High,
}

impl TodoPriority {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for TodoPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TodoPriority {
    type Error = TodoValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(TodoValidationError::InvalidPriority(value.to_owned())),
        }
    }
}

/// Lifecycle event applied to a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TodoEvent {
    /// Begin or resume work.
    Start,
    /// Pause running work.
    Pause,
    /// Finish the todo with a reflection memo.
    Complete,
    /// Remove the todo.
    Delete,
}

impl TodoEvent {
    /// Returns the event name used in logs and errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Pause => "pause",
            Self::Complete => "complete",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for TodoEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
