//! Wire models for the todo REST API.

use crate::todo::domain::{
    DueDate, EstimatedTime, PersistedTodoData, ReflectionMemo, Todo, TodoDescription, TodoId,
    TodoName, TodoPriority, TodoStatus, TodoValidationError,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Todo as returned by the REST API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TodoRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub estimated_time_sec: i64,
    #[serde(default)]
    pub actual_time_sec: i64,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    pub status: String,
    #[serde(default)]
    pub reflection_memo: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<TodoRecord> for Todo {
    type Error = TodoValidationError;

    fn try_from(record: TodoRecord) -> Result<Self, Self::Error> {
        let actual_time_sec = u64::try_from(record.actual_time_sec)
            .map_err(|_| TodoValidationError::InvalidActualTime(record.actual_time_sec))?;
        let priority = record
            .priority
            .as_deref()
            .map(TodoPriority::try_from)
            .transpose()?
            .unwrap_or_default();
        // The backend stores an unset memo as an empty string.
        let reflection_memo = record
            .reflection_memo
            .filter(|memo| !memo.trim().is_empty())
            .map(ReflectionMemo::new)
            .transpose()?;

        Self::from_persisted(PersistedTodoData {
            id: TodoId::new(record.id)?,
            name: TodoName::new(record.name)?,
            description: record.description.map(TodoDescription::new).transpose()?,
            estimated_time_sec: EstimatedTime::from_secs(record.estimated_time_sec)?,
            actual_time_sec,
            due_date: record
                .due_date
                .as_deref()
                .map(DueDate::parse)
                .transpose()?,
            priority,
            status: TodoStatus::try_from(record.status.as_str())?,
            reflection_memo,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

/// Error body `{code, message}` returned for failed requests. The HTTP
/// status is authoritative, so only the message is kept.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ErrorBody {
    pub message: String,
}
