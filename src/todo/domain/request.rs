//! Creation, update, edit and list-filter request types.

use super::{
    DueDate, EstimatedTime, ReflectionMemo, TodoDescription, TodoName, TodoPriority, TodoStatus,
    TodoValidationError,
};
use serde::Serialize;

/// Validated payload for creating a todo.
///
/// The persistence layer assigns the identifier, `status = todo`,
/// `actualTimeSec = 0`, and `priority = medium` when none is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoCreationRequest {
    name: TodoName,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<TodoDescription>,
    estimated_time_sec: EstimatedTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<DueDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<TodoPriority>,
}

impl TodoCreationRequest {
    /// Creates a request with the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`TodoValidationError`] when the name is blank or too long, or
    /// the estimate is below one second.
    pub fn new(
        name: impl Into<String>,
        estimated_time_sec: i64,
    ) -> Result<Self, TodoValidationError> {
        Ok(Self {
            name: TodoName::new(name)?,
            description: None,
            estimated_time_sec: EstimatedTime::from_secs(estimated_time_sec)?,
            due_date: None,
            priority: None,
        })
    }

    /// Sets the description.
    ///
    /// # Errors
    ///
    /// Returns [`TodoValidationError::DescriptionTooLong`] for oversized text.
    pub fn with_description(
        mut self,
        description: impl Into<String>,
    ) -> Result<Self, TodoValidationError> {
        self.description = Some(TodoDescription::new(description)?);
        Ok(self)
    }

    /// Sets the due date from `YYYY-MM-DD` text.
    ///
    /// # Errors
    ///
    /// Returns [`TodoValidationError::InvalidDueDate`] for malformed dates.
    pub fn with_due_date(mut self, due_date: &str) -> Result<Self, TodoValidationError> {
        self.due_date = Some(DueDate::parse(due_date)?);
        Ok(self)
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TodoPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Returns the name.
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

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DueDate> {
        self.due_date
    }

    /// Returns the requested priority, if any.
    #[must_use]
    pub const fn priority(&self) -> Option<TodoPriority> {
        self.priority
    }
}

/// Partial update of a persisted todo carrying at least one field.
///
/// `description` and `dueDate` distinguish "unchanged" (absent) from
/// "cleared" (`null`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<TodoName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<Option<TodoDescription>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    estimated_time_sec: Option<EstimatedTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    actual_time_sec: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<Option<DueDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<TodoPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<TodoStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reflection_memo: Option<ReflectionMemo>,
}

impl TodoUpdateRequest {
    /// Starts building an update request.
    #[must_use]
    pub fn builder() -> TodoUpdateBuilder {
        TodoUpdateBuilder::default()
    }

    /// Patch changing only the status.
    pub(crate) const fn status_change(status: TodoStatus) -> Self {
        Self {
            name: None,
            description: None,
            estimated_time_sec: None,
            actual_time_sec: None,
            due_date: None,
            priority: None,
            status: Some(status),
            reflection_memo: None,
        }
    }

    pub(crate) const fn with_actual_time(mut self, seconds: u64) -> Self {
        self.actual_time_sec = Some(seconds);
        self
    }

    pub(crate) fn with_reflection_memo(mut self, memo: ReflectionMemo) -> Self {
        self.reflection_memo = Some(memo);
        self
    }

    /// Returns the new name, if changed.
    #[must_use]
    pub const fn name(&self) -> Option<&TodoName> {
        self.name.as_ref()
    }

    /// Returns the description change: `Some(None)` clears it.
    #[must_use]
    pub fn description(&self) -> Option<Option<&TodoDescription>> {
        self.description.as_ref().map(Option::as_ref)
    }

    /// Returns the new estimate, if changed.
    #[must_use]
    pub const fn estimated_time(&self) -> Option<EstimatedTime> {
        self.estimated_time_sec
    }

    /// Returns the new actual time, if changed.
    #[must_use]
    pub const fn actual_time_sec(&self) -> Option<u64> {
        self.actual_time_sec
    }

    /// Returns the due date change: `Some(None)` clears it.
    #[must_use]
    pub const fn due_date(&self) -> Option<Option<DueDate>> {
        self.due_date
    }

    /// Returns the new priority, if changed.
    #[must_use]
    pub const fn priority(&self) -> Option<TodoPriority> {
        self.priority
    }

    /// Returns the new status, if changed.
    #[must_use]
    pub const fn status(&self) -> Option<TodoStatus> {
        self.status
    }

    /// Returns the reflection memo, if set.
    #[must_use]
    pub const fn reflection_memo(&self) -> Option<&ReflectionMemo> {
        self.reflection_memo.as_ref()
    }
}

/// Builder for [`TodoUpdateRequest`].
#[derive(Debug, Clone, Default)]
pub struct TodoUpdateBuilder {
    name: Option<TodoName>,
    description: Option<Option<TodoDescription>>,
    estimated_time_sec: Option<EstimatedTime>,
    actual_time_sec: Option<u64>,
    due_date: Option<Option<DueDate>>,
    priority: Option<TodoPriority>,
    status: Option<TodoStatus>,
    reflection_memo: Option<ReflectionMemo>,
}

impl TodoUpdateBuilder {
    /// Sets the name.
    #[must_use]
    pub fn name(mut self, name: TodoName) -> Self {
        self.name = Some(name);
        self
    }

    /// Sets or clears (`None`) the description.
    #[must_use]
    pub fn description(mut self, description: Option<TodoDescription>) -> Self {
        self.description = Some(description);
        self
    }

    /// Sets the planned duration.
    #[must_use]
    pub const fn estimated_time(mut self, estimate: EstimatedTime) -> Self {
        self.estimated_time_sec = Some(estimate);
        self
    }

    /// Sets the accumulated actual time.
    #[must_use]
    pub const fn actual_time_sec(mut self, seconds: u64) -> Self {
        self.actual_time_sec = Some(seconds);
        self
    }

    /// Sets or clears (`None`) the due date.
    #[must_use]
    pub const fn due_date(mut self, due_date: Option<DueDate>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn priority(mut self, priority: TodoPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn status(mut self, status: TodoStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the reflection memo. Requires the status to be set to `done`.
    #[must_use]
    pub fn reflection_memo(mut self, memo: ReflectionMemo) -> Self {
        self.reflection_memo = Some(memo);
        self
    }

    /// Validates and builds the update request.
    ///
    /// # Errors
    ///
    /// Returns [`TodoValidationError::EmptyUpdate`] when no field is set and
    /// [`TodoValidationError::MemoRequiresDone`] when a memo is set without
    /// also setting the status to `done`.
    pub fn build(self) -> Result<TodoUpdateRequest, TodoValidationError> {
        if self.reflection_memo.is_some() && self.status != Some(TodoStatus::Done) {
            return Err(TodoValidationError::MemoRequiresDone);
        }

        let request = TodoUpdateRequest {
            name: self.name,
            description: self.description,
            estimated_time_sec: self.estimated_time_sec,
            actual_time_sec: self.actual_time_sec,
            due_date: self.due_date,
            priority: self.priority,
            status: self.status,
            reflection_memo: self.reflection_memo,
        };
        if request == TodoUpdateRequest::EMPTY {
            return Err(TodoValidationError::EmptyUpdate);
        }
        Ok(request)
    }
}

impl TodoUpdateRequest {
    const EMPTY: Self = Self {
        name: None,
        description: None,
        estimated_time_sec: None,
        actual_time_sec: None,
        due_date: None,
        priority: None,
        status: None,
        reflection_memo: None,
    };
}

/// Content edit of a todo's descriptive fields.
///
/// Unset fields are left unchanged; the controller sends only the fields
/// that differ from the current todo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoEdit {
    name: Option<TodoName>,
    description: Option<Option<TodoDescription>>,
    estimated_time_sec: Option<EstimatedTime>,
    due_date: Option<Option<DueDate>>,
    priority: Option<TodoPriority>,
}

impl TodoEdit {
    /// Creates an edit that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the todo.
    ///
    /// # Errors
    ///
    /// Returns [`TodoValidationError`] for a blank or oversized name.
    pub fn with_name(mut self, name: impl Into<String>) -> Result<Self, TodoValidationError> {
        self.name = Some(TodoName::new(name)?);
        Ok(self)
    }

    /// Replaces the description.
    ///
    /// # Errors
    ///
    /// Returns [`TodoValidationError::DescriptionTooLong`] for oversized text.
    pub fn with_description(
        mut self,
        description: impl Into<String>,
    ) -> Result<Self, TodoValidationError> {
        self.description = Some(Some(TodoDescription::new(description)?));
        Ok(self)
    }

    /// Removes the description.
    #[must_use]
    pub fn without_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Replaces the estimate, given in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`TodoValidationError::InvalidEstimatedTime`] below one second.
    pub fn with_estimated_time_sec(mut self, seconds: i64) -> Result<Self, TodoValidationError> {
        self.estimated_time_sec = Some(EstimatedTime::from_secs(seconds)?);
        Ok(self)
    }

    /// Replaces the due date from `YYYY-MM-DD` text.
    ///
    /// # Errors
    ///
    /// Returns [`TodoValidationError::InvalidDueDate`] for malformed dates.
    pub fn with_due_date(mut self, due_date: &str) -> Result<Self, TodoValidationError> {
        self.due_date = Some(Some(DueDate::parse(due_date)?));
        Ok(self)
    }

    /// Removes the due date.
    #[must_use]
    pub const fn without_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TodoPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub(crate) const fn name(&self) -> Option<&TodoName> {
        self.name.as_ref()
    }

    pub(crate) fn description(&self) -> Option<Option<&TodoDescription>> {
        self.description.as_ref().map(Option::as_ref)
    }

    pub(crate) const fn estimated_time(&self) -> Option<EstimatedTime> {
        self.estimated_time_sec
    }

    pub(crate) const fn due_date(&self) -> Option<Option<DueDate>> {
        self.due_date
    }

    pub(crate) const fn priority(&self) -> Option<TodoPriority> {
        self.priority
    }
}

/// Optional list filters mirroring the gateway's query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    status: Option<TodoStatus>,
    priority: Option<TodoPriority>,
    due_date: Option<DueDate>,
    name: Option<String>,
}

impl TodoFilter {
    /// Creates a filter that matches every todo.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to a status.
    #[must_use]
    pub const fn with_status(mut self, status: TodoStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to a priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TodoPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restricts to a due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DueDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Restricts to names containing `name`, ignoring case.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let needle = name.into();
        self.name = Some(needle.trim().to_owned()).filter(|trimmed| !trimmed.is_empty());
        self
    }

    /// Returns whether `todo` satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, todo: &super::Todo) -> bool {
        self.status.is_none_or(|status| todo.status() == status)
            && self.priority.is_none_or(|priority| todo.priority() == priority)
            && self.due_date.is_none_or(|due| todo.due_date() == Some(due))
            && self.name.as_deref().is_none_or(|needle| {
                todo.name()
                    .as_str()
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
            })
    }

    /// Returns the filter as `(key, value)` query parameters.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_owned()));
        }
        if let Some(priority) = self.priority {
            pairs.push(("priority", priority.as_str().to_owned()));
        }
        if let Some(due_date) = self.due_date {
            pairs.push(("dueDate", due_date.to_string()));
        }
        if let Some(name) = &self.name {
            pairs.push(("name", name.clone()));
        }
        pairs
    }
}
