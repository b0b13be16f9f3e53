//! In-memory todo gateway behaving like the REST backend.

use crate::todo::{
    domain::{
        PersistedTodoData, Todo, TodoCreationRequest, TodoFilter, TodoId, TodoStatus,
        TodoUpdateRequest,
    },
    ports::{TodoGateway, TodoGatewayError, TodoGatewayResult},
};
use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe in-memory todo gateway.
///
/// Assigns sequential identifiers and timestamps the way the backend does,
/// and can be told to fail upcoming calls so callers can exercise rollback
/// paths.
#[derive(Debug, Clone)]
pub struct InMemoryTodoGateway<C = DefaultClock> {
    state: Arc<RwLock<InMemoryTodoState>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct InMemoryTodoState {
    todos: BTreeMap<TodoId, Todo>,
    last_id: i64,
    injected_failures: VecDeque<TodoGatewayError>,
    recorded_updates: Vec<(TodoId, TodoUpdateRequest)>,
}

impl InMemoryTodoGateway<DefaultClock> {
    /// Creates an empty gateway using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryTodoGateway<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryTodoGateway<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty gateway stamping records with `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTodoState::default())),
            clock,
        }
    }

    /// Makes the next gateway call fail with `error`. Calls queue up in
    /// order.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn fail_next(&self, error: TodoGatewayError) -> TodoGatewayResult<()> {
        self.write()?.injected_failures.push_back(error);
        Ok(())
    }

    /// Stores an existing todo as-is, replacing any todo with the same id.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn seed(&self, todo: Todo) -> TodoGatewayResult<()> {
        let mut state = self.write()?;
        state.last_id = state.last_id.max(todo.id().value());
        state.todos.insert(todo.id(), todo);
        Ok(())
    }

    /// Returns the stored todo, if any.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn stored(&self, id: TodoId) -> TodoGatewayResult<Option<Todo>> {
        Ok(self.read()?.todos.get(&id).cloned())
    }

    /// Returns every update request received, in arrival order.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn recorded_updates(&self) -> TodoGatewayResult<Vec<(TodoId, TodoUpdateRequest)>> {
        Ok(self.read()?.recorded_updates.clone())
    }

    fn read(&self) -> TodoGatewayResult<RwLockReadGuard<'_, InMemoryTodoState>> {
        self.state
            .read()
            .map_err(|err| TodoGatewayError::transport(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TodoGatewayResult<RwLockWriteGuard<'_, InMemoryTodoState>> {
        self.state
            .write()
            .map_err(|err| TodoGatewayError::transport(std::io::Error::other(err.to_string())))
    }
}

impl InMemoryTodoState {
    fn take_failure(&mut self) -> TodoGatewayResult<()> {
        self.injected_failures.pop_front().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl<C> TodoGateway for InMemoryTodoGateway<C>
where
    C: Clock + Send + Sync,
{
    async fn list(&self, filter: &TodoFilter) -> TodoGatewayResult<Vec<Todo>> {
        let mut state = self.write()?;
        state.take_failure()?;
        Ok(state
            .todos
            .values()
            .filter(|todo| filter.matches(todo))
            .cloned()
            .collect())
    }

    async fn create(&self, request: &TodoCreationRequest) -> TodoGatewayResult<Todo> {
        let mut state = self.write()?;
        state.take_failure()?;

        let next_id = state.last_id.saturating_add(1);
        let id = TodoId::new(next_id).map_err(|err| TodoGatewayError::Server {
            code: 500,
            message: err.to_string(),
        })?;
        let timestamp = self.clock.utc();
        let todo = Todo::from_persisted(PersistedTodoData {
            id,
            name: request.name().clone(),
            description: request.description().cloned(),
            estimated_time_sec: request.estimated_time(),
            actual_time_sec: 0,
            due_date: request.due_date(),
            priority: request.priority().unwrap_or_default(),
            status: TodoStatus::Todo,
            reflection_memo: None,
            created_at: Some(timestamp),
            updated_at: Some(timestamp),
        })
        .map_err(|err| TodoGatewayError::Rejected {
            code: 400,
            message: err.to_string(),
        })?;

        state.last_id = next_id;
        state.todos.insert(id, todo.clone());
        Ok(todo)
    }

    async fn update(&self, id: TodoId, request: &TodoUpdateRequest) -> TodoGatewayResult<Todo> {
        let mut state = self.write()?;
        state.recorded_updates.push((id, request.clone()));
        state.take_failure()?;

        let current = state.todos.get(&id).ok_or(TodoGatewayError::NotFound(id))?;
        let updated = current
            .patched(request, Some(self.clock.utc()))
            .map_err(|err| TodoGatewayError::Rejected {
                code: 400,
                message: err.to_string(),
            })?;
        state.todos.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: TodoId) -> TodoGatewayResult<()> {
        let mut state = self.write()?;
        state.take_failure()?;
        state
            .todos
            .remove(&id)
            .map(|_| ())
            .ok_or(TodoGatewayError::NotFound(id))
    }
}
