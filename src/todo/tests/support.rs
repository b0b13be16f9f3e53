//! Shared fixtures for todo unit tests.

use crate::todo::domain::{
    EstimatedTime, PersistedTodoData, ReflectionMemo, Todo, TodoId, TodoName, TodoPriority,
    TodoStatus,
};
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use std::sync::{Mutex, PoisonError};

/// Clock that only moves when told to.
#[derive(Debug)]
pub(super) struct SteppingClock {
    now: Mutex<DateTime<Utc>>,
}

impl SteppingClock {
    pub(super) fn new() -> Self {
        Self {
            now: Mutex::new(DateTime::<Utc>::UNIX_EPOCH + TimeDelta::days(20_000)),
        }
    }

    pub(super) fn advance_secs(&self, seconds: i64) {
        self.advance(TimeDelta::seconds(seconds));
    }

    pub(super) fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += delta;
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A persisted "Draft report" todo with the given id, status and actual time.
pub(super) fn persisted_todo(
    id: i64,
    status: TodoStatus,
    actual_time_sec: u64,
) -> eyre::Result<Todo> {
    let reflection_memo = if status == TodoStatus::Done {
        Some(ReflectionMemo::new("wrapped up")?)
    } else {
        None
    };
    Ok(Todo::from_persisted(PersistedTodoData {
        id: TodoId::new(id)?,
        name: TodoName::new("Draft report")?,
        description: None,
        estimated_time_sec: EstimatedTime::from_secs(1800)?,
        actual_time_sec,
        due_date: None,
        priority: TodoPriority::High,
        status,
        reflection_memo,
        created_at: None,
        updated_at: None,
    })?)
}
