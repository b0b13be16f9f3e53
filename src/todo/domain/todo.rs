//! Todo aggregate root.

use super::{
    DueDate, EstimatedTime, ReflectionMemo, TodoDescription, TodoDomainError, TodoEdit, TodoEvent,
    TodoId, TodoName, TodoPriority, TodoStatus, TodoUpdateRequest, TodoValidationError,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Persisted todo as reported by the persistence gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    id: TodoId,
    name: TodoName,
    description: Option<TodoDescription>,
    estimated_time_sec: EstimatedTime,
    actual_time_sec: u64,
    due_date: Option<DueDate>,
    priority: TodoPriority,
    status: TodoStatus,
    reflection_memo: Option<ReflectionMemo>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTodoData {
    /// Server-assigned identifier.
    pub id: TodoId,
    /// Todo name.
    pub name: TodoName,
    /// Optional description.
    pub description: Option<TodoDescription>,
    /// Planned duration.
    pub estimated_time_sec: EstimatedTime,
    /// Time spent while doing.
    pub actual_time_sec: u64,
    /// Optional due date.
    pub due_date: Option<DueDate>,
    /// Priority.
    pub priority: TodoPriority,
    /// Lifecycle status.
    pub status: TodoStatus,
    /// Reflection memo, only present when done.
    pub reflection_memo: Option<ReflectionMemo>,
    /// Creation timestamp maintained by the persistence layer.
    pub created_at: Option<DateTime<Utc>>,
    /// Update timestamp maintained by the persistence layer.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Reconstructs a todo from persisted data.
    ///
    /// # Errors
    ///
    /// Returns [`TodoValidationError::MemoRequiresDone`] when a reflection
    /// memo accompanies a status other than `done`.
    pub fn from_persisted(data: PersistedTodoData) -> Result<Self, TodoValidationError> {
        if data.reflection_memo.is_some() && data.status != TodoStatus::Done {
            return Err(TodoValidationError::MemoRequiresDone);
        }
        Ok(Self {
            id: data.id,
            name: data.name,
            description: data.description,
            estimated_time_sec: data.estimated_time_sec,
            actual_time_sec: data.actual_time_sec,
            due_date: data.due_date,
            priority: data.priority,
            status: data.status,
            reflection_memo: data.reflection_memo,
            created_at: data.created_at,
            updated_at: data.updated_at,
        })
    }

    /// Returns the todo identifier.
    #[must_use]
    pub const fn id(&self) -> TodoId {
        self.id
    }

    /// Returns the todo name.
    #[must_use]
    pub const fn name(&self) -> &TodoName {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&TodoDescription> {
        self.description.as_ref()
    }

    /// Returns the planned duration.
    #[must_use]
    pub const fn estimated_time(&self) -> EstimatedTime {
        self.estimated_time_sec
    }

    /// Returns the persisted time spent while doing, in seconds.
    #[must_use]
    pub const fn actual_time_sec(&self) -> u64 {
        self.actual_time_sec
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DueDate> {
        self.due_date
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TodoPriority {
        self.priority
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TodoStatus {
        self.status
    }

    /// Returns the reflection memo, present only once done.
    #[must_use]
    pub const fn reflection_memo(&self) -> Option<&ReflectionMemo> {
        self.reflection_memo.as_ref()
    }

    /// Returns the creation timestamp, when reported.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Returns the latest update timestamp, when reported.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Checks that `event` is allowed in the current status.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidTransition`] when it is not.
    pub fn ensure_accepts(&self, event: TodoEvent) -> Result<(), TodoDomainError> {
        if self.status.accepts(event) {
            return Ok(());
        }
        Err(TodoDomainError::InvalidTransition {
            todo_id: self.id,
            status: self.status,
            event,
        })
    }

    /// Moves the todo into `doing` and returns the patch to persist.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidTransition`] unless the todo is in
    /// `todo` or `pending`; the todo is left unchanged.
    pub fn start(&mut self) -> Result<TodoUpdateRequest, TodoDomainError> {
        let target = self.target_status(TodoEvent::Start)?;
        self.status = target;
        Ok(TodoUpdateRequest::status_change(target))
    }

    /// Moves the todo into `pending`, recording the accumulated time, and
    /// returns the patch to persist.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidTransition`] unless the todo is in
    /// `doing`; the todo is left unchanged.
    pub fn pause(&mut self, actual_time_sec: u64) -> Result<TodoUpdateRequest, TodoDomainError> {
        let target = self.target_status(TodoEvent::Pause)?;
        self.status = target;
        self.record_actual_time(actual_time_sec);
        Ok(TodoUpdateRequest::status_change(target).with_actual_time(self.actual_time_sec))
    }

    /// Moves the todo into `done` with a reflection memo and returns the
    /// patch to persist. `actual_time_sec` is supplied only when a running
    /// interval was stopped by the completion.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidTransition`] when the todo is
    /// already done; the todo is left unchanged.
    pub fn complete(
        &mut self,
        memo: ReflectionMemo,
        actual_time_sec: Option<u64>,
    ) -> Result<TodoUpdateRequest, TodoDomainError> {
        let target = self.target_status(TodoEvent::Complete)?;
        self.status = target;
        self.reflection_memo = Some(memo.clone());
        let mut patch = TodoUpdateRequest::status_change(target).with_reflection_memo(memo);
        if let Some(seconds) = actual_time_sec {
            self.record_actual_time(seconds);
            patch = patch.with_actual_time(self.actual_time_sec);
        }
        Ok(patch)
    }

    /// Applies a content edit and returns a patch carrying only the fields
    /// that actually changed.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::Finalized`] for a done todo and
    /// [`TodoValidationError::EmptyUpdate`] when nothing would change; the
    /// todo is left unchanged in both cases.
    pub fn apply_edit(&mut self, edit: &TodoEdit) -> Result<TodoUpdateRequest, TodoDomainError> {
        if self.status.is_terminal() {
            return Err(TodoDomainError::Finalized(self.id));
        }

        let mut next = self.clone();
        let mut builder = TodoUpdateRequest::builder();
        if let Some(name) = edit.name().filter(|name| *name != &self.name) {
            next.name = name.clone();
            builder = builder.name(name.clone());
        }
        if let Some(description) = edit.description().filter(|d| *d != self.description.as_ref()) {
            next.description = description.cloned();
            builder = builder.description(description.cloned());
        }
        if let Some(estimate) = edit
            .estimated_time()
            .filter(|estimate| *estimate != self.estimated_time_sec)
        {
            next.estimated_time_sec = estimate;
            builder = builder.estimated_time(estimate);
        }
        if let Some(due_date) = edit.due_date().filter(|due| *due != self.due_date) {
            next.due_date = due_date;
            builder = builder.due_date(due_date);
        }
        if let Some(priority) = edit.priority().filter(|priority| *priority != self.priority) {
            next.priority = priority;
            builder = builder.priority(priority);
        }

        let patch = builder.build()?;
        *self = next;
        Ok(patch)
    }

    /// Returns a copy with `patch` applied the way the persistence layer
    /// applies an update request.
    ///
    /// # Errors
    ///
    /// Returns [`TodoValidationError::MemoRequiresDone`] when the result would
    /// carry a memo without being done.
    pub fn patched(
        &self,
        patch: &TodoUpdateRequest,
        updated_at: Option<DateTime<Utc>>,
    ) -> Result<Self, TodoValidationError> {
        let mut next = self.clone();
        if let Some(name) = patch.name() {
            next.name = name.clone();
        }
        if let Some(description) = patch.description() {
            next.description = description.cloned();
        }
        if let Some(estimate) = patch.estimated_time() {
            next.estimated_time_sec = estimate;
        }
        if let Some(actual) = patch.actual_time_sec() {
            next.actual_time_sec = actual;
        }
        if let Some(due_date) = patch.due_date() {
            next.due_date = due_date;
        }
        if let Some(priority) = patch.priority() {
            next.priority = priority;
        }
        if let Some(status) = patch.status() {
            next.status = status;
        }
        if let Some(memo) = patch.reflection_memo() {
            next.reflection_memo = Some(memo.clone());
        }
        if next.reflection_memo.is_some() && next.status != TodoStatus::Done {
            return Err(TodoValidationError::MemoRequiresDone);
        }
        next.updated_at = updated_at.or(next.updated_at);
        Ok(next)
    }

    fn target_status(&self, event: TodoEvent) -> Result<TodoStatus, TodoDomainError> {
        self.status
            .after(event)
            .ok_or(TodoDomainError::InvalidTransition {
                todo_id: self.id,
                status: self.status,
                event,
            })
    }

    /// Actual time never decreases.
    fn record_actual_time(&mut self, seconds: u64) {
        self.actual_time_sec = self.actual_time_sec.max(seconds);
    }
}
