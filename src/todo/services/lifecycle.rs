//! Todo lifecycle controller.
//!
//! Transitions are applied to the local view first, persisted through the
//! gateway, then reconciled with the gateway's copy or rolled back.

use super::{LiveTotal, TrackedTodo};
use crate::todo::{
    domain::{
        AccumulatorError, ReflectionMemo, Todo, TodoCreationRequest, TodoDomainError, TodoEdit,
        TodoEvent, TodoFilter, TodoId, TodoUpdateRequest, TodoValidationError,
    },
    ports::{TodoGateway, TodoGatewayError},
};
use mockable::Clock;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Service-level errors for todo lifecycle operations.
#[derive(Debug, Error)]
pub enum TodoLifecycleError {
    /// The transition is not allowed or the timer is in the wrong state.
    #[error(transparent)]
    Domain(#[from] TodoDomainError),
    /// Local input validation failed; nothing was sent to the gateway.
    #[error(transparent)]
    Validation(#[from] TodoValidationError),
    /// The gateway call failed. Local state was rolled back, except after an
    /// unreadable response to an accepted write, where the change is kept.
    #[error(transparent)]
    Gateway(#[from] TodoGatewayError),
    /// The gateway no longer knows the todo; it was dropped locally.
    #[error("todo {0} no longer exists")]
    NotFound(TodoId),
    /// The todo is not in the local view.
    #[error("todo {0} is not tracked, list or create it first")]
    NotTracked(TodoId),
    /// Another mutation of the same todo is outstanding.
    #[error("todo {0} already has a mutation in flight")]
    MutationInFlight(TodoId),
    /// `confirm_completion` was called without `request_completion`.
    #[error("completion of todo {0} was not requested")]
    CompletionNotRequested(TodoId),
    /// A live total was requested outside a tokio runtime.
    #[error("live totals require a running tokio runtime")]
    RuntimeUnavailable,
}

impl From<AccumulatorError> for TodoLifecycleError {
    fn from(err: AccumulatorError) -> Self {
        Self::Domain(err.into())
    }
}

/// Result type for todo lifecycle operations.
pub type TodoLifecycleResult<T> = Result<T, TodoLifecycleError>;

type TodoTable = HashMap<TodoId, TrackedTodo>;

const DEFAULT_DISPLAY_TICK: Duration = Duration::from_secs(1);

/// Drives todos through their lifecycle and keeps their timers.
///
/// The controller is `Send + Sync`; share it behind an [`Arc`]. At most one
/// gateway mutation per todo is outstanding at any time.
pub struct TodoLifecycleController<G, C>
where
    G: TodoGateway,
    C: Clock + Send + Sync,
{
    gateway: Arc<G>,
    clock: Arc<C>,
    todos: Arc<Mutex<TodoTable>>,
    display_tick: Duration,
}

impl<G, C> TodoLifecycleController<G, C>
where
    G: TodoGateway,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a controller with an empty local view.
    #[must_use]
    pub fn new(gateway: Arc<G>, clock: Arc<C>) -> Self {
        Self {
            gateway,
            clock,
            todos: Arc::new(Mutex::new(TodoTable::new())),
            display_tick: DEFAULT_DISPLAY_TICK,
        }
    }

    /// Sets the period used by [`Self::watch_total`].
    #[must_use]
    pub const fn with_display_tick(mut self, display_tick: Duration) -> Self {
        self.display_tick = display_tick;
        self
    }

    /// Fetches todos from the gateway and merges them into the local view.
    ///
    /// Listed todos are refreshed or adopted. A local todo that matches
    /// `filter` but was not listed is dropped, unless its timer is running or
    /// a mutation is in flight. Todos outside `filter` are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`TodoLifecycleError::Gateway`] when listing fails; the local
    /// view is unchanged.
    pub async fn list_todos(&self, filter: &TodoFilter) -> TodoLifecycleResult<Vec<Todo>> {
        let listed = self.gateway.list(filter).await?;
        let listed_ids: HashSet<TodoId> = listed.iter().map(Todo::id).collect();

        let mut table = self.table();
        for todo in &listed {
            table
                .entry(todo.id())
                .and_modify(|existing| {
                    if !existing.is_in_flight() {
                        existing.refresh(todo.clone(), &*self.clock);
                    }
                })
                .or_insert_with(|| TrackedTodo::adopt(todo.clone(), &*self.clock));
        }
        table.retain(|id, tracked| {
            listed_ids.contains(id)
                || tracked.is_in_flight()
                || tracked.accumulator().is_running()
                || !filter.matches(tracked.todo())
        });

        debug!(count = listed.len(), "todo list refreshed");
        Ok(listed)
    }

    /// Creates a todo and adds it to the local view.
    ///
    /// # Errors
    ///
    /// Returns [`TodoLifecycleError::Gateway`] when the gateway rejects it.
    pub async fn create_todo(&self, request: &TodoCreationRequest) -> TodoLifecycleResult<Todo> {
        let created = self.gateway.create(request).await?;
        self.table().insert(
            created.id(),
            TrackedTodo::adopt(created.clone(), &*self.clock),
        );
        info!(todo_id = %created.id(), name = %created.name(), "todo created");
        Ok(created)
    }

    /// Starts (or resumes) work on a todo and its timer.
    ///
    /// # Errors
    ///
    /// Returns [`TodoLifecycleError::Domain`] unless the todo is `todo` or
    /// `pending`, and [`TodoLifecycleError::Gateway`] after rolling back a
    /// failed write.
    pub async fn start(&self, id: TodoId) -> TodoLifecycleResult<Todo> {
        self.commit(id, TodoEvent::Start.as_str(), |tracked, clock| {
            let patch = tracked.todo_mut().start()?;
            tracked.accumulator_mut().start(clock)?;
            Ok(patch)
        })
        .await
    }

    /// Pauses a `doing` todo and persists the accumulated time.
    ///
    /// # Errors
    ///
    /// Returns [`TodoLifecycleError::Domain`] unless the todo is `doing`, and
    /// [`TodoLifecycleError::Gateway`] after rolling back a failed write; the
    /// timer then keeps running.
    pub async fn pause(&self, id: TodoId) -> TodoLifecycleResult<Todo> {
        self.commit(id, TodoEvent::Pause.as_str(), |tracked, clock| {
            tracked.todo().ensure_accepts(TodoEvent::Pause)?;
            tracked.accumulator_mut().stop(clock)?;
            let total = tracked.accumulator().accumulated_sec();
            Ok(tracked.todo_mut().pause(total)?)
        })
        .await
    }

    /// Marks a todo as awaiting its reflection memo. Status and timer are
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TodoLifecycleError::Domain`] for a done todo.
    pub fn request_completion(&self, id: TodoId) -> TodoLifecycleResult<()> {
        let mut table = self.table();
        let tracked = Self::idle_entry(&mut table, id)?;
        tracked.todo().ensure_accepts(TodoEvent::Complete)?;
        tracked.set_completion_requested(true);
        info!(todo_id = %id, "completion requested");
        Ok(())
    }

    /// Finishes a requested completion with `memo`, stopping a running timer.
    ///
    /// # Errors
    ///
    /// Returns [`TodoLifecycleError::CompletionNotRequested`] without a prior
    /// request, [`TodoLifecycleError::Validation`] for a blank or oversized
    /// memo, and [`TodoLifecycleError::Gateway`] after rolling back a failed
    /// write; the request then stays pending.
    pub async fn confirm_completion(&self, id: TodoId, memo: &str) -> TodoLifecycleResult<Todo> {
        self.commit(id, TodoEvent::Complete.as_str(), |tracked, clock| {
            if !tracked.completion_requested() {
                return Err(TodoLifecycleError::CompletionNotRequested(id));
            }
            let reflection = ReflectionMemo::new(memo)?;
            tracked.todo().ensure_accepts(TodoEvent::Complete)?;
            let stopped_total = if tracked.accumulator().is_running() {
                tracked.accumulator_mut().stop(clock)?;
                Some(tracked.accumulator().accumulated_sec())
            } else {
                None
            };
            let patch = tracked.todo_mut().complete(reflection, stopped_total)?;
            tracked.set_completion_requested(false);
            Ok(patch)
        })
        .await
    }

    /// Discards a pending completion request.
    ///
    /// Returns whether a request was pending.
    ///
    /// # Errors
    ///
    /// Returns [`TodoLifecycleError::NotTracked`] for an unknown todo and
    /// [`TodoLifecycleError::MutationInFlight`] while a write is outstanding.
    pub fn cancel_completion(&self, id: TodoId) -> TodoLifecycleResult<bool> {
        let mut table = self.table();
        let tracked = Self::idle_entry(&mut table, id)?;
        let was_requested = tracked.completion_requested();
        tracked.set_completion_requested(false);
        if was_requested {
            info!(todo_id = %id, "completion cancelled");
        }
        Ok(was_requested)
    }

    /// Edits the descriptive fields of a non-done todo, sending only the
    /// fields that change.
    ///
    /// # Errors
    ///
    /// Returns [`TodoLifecycleError::Domain`] for a done todo,
    /// [`TodoLifecycleError::Validation`] when nothing changes, and
    /// [`TodoLifecycleError::Gateway`] after rolling back a failed write.
    pub async fn edit_todo(&self, id: TodoId, edit: &TodoEdit) -> TodoLifecycleResult<Todo> {
        self.commit(id, "edit", |tracked, _| Ok(tracked.todo_mut().apply_edit(edit)?))
            .await
    }

    /// Deletes a non-done todo.
    ///
    /// # Errors
    ///
    /// Returns [`TodoLifecycleError::Domain`] for a done todo,
    /// [`TodoLifecycleError::NotFound`] when the gateway no longer has it
    /// (it is dropped locally), and [`TodoLifecycleError::Gateway`] on other
    /// failures, leaving it in place.
    pub async fn delete_todo(&self, id: TodoId) -> TodoLifecycleResult<()> {
        {
            let mut table = self.table();
            let tracked = Self::idle_entry(&mut table, id)?;
            tracked.todo().ensure_accepts(TodoEvent::Delete)?;
            tracked.set_in_flight(true);
        }

        let outcome = self.gateway.delete(id).await;
        let mut table = self.table();
        match outcome {
            Ok(()) => {
                table.remove(&id);
                info!(todo_id = %id, "todo deleted");
                Ok(())
            }
            Err(TodoGatewayError::NotFound(_)) => {
                table.remove(&id);
                warn!(todo_id = %id, "todo vanished from gateway, dropped locally");
                Err(TodoLifecycleError::NotFound(id))
            }
            Err(err) => {
                if let Some(tracked) = table.get_mut(&id) {
                    tracked.set_in_flight(false);
                }
                warn!(todo_id = %id, error = %err, "delete failed");
                Err(err.into())
            }
        }
    }

    /// Returns the local view of a todo.
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<TrackedTodo> {
        self.table().get(&id).cloned()
    }

    /// Returns the whole local view ordered by id.
    #[must_use]
    pub fn snapshot(&self) -> Vec<TrackedTodo> {
        let mut tracked: Vec<TrackedTodo> = self.table().values().cloned().collect();
        tracked.sort_by_key(|entry| entry.todo().id());
        tracked
    }

    /// Returns the todo's settled time plus any running interval.
    ///
    /// # Errors
    ///
    /// Returns [`TodoLifecycleError::NotTracked`] for an unknown todo.
    pub fn current_total(&self, id: TodoId) -> TodoLifecycleResult<u64> {
        self.table()
            .get(&id)
            .map(|tracked| tracked.accumulator().current_total(&*self.clock))
            .ok_or(TodoLifecycleError::NotTracked(id))
    }

    /// Publishes the todo's current total every `period` until the handle is
    /// dropped or the todo leaves the local view.
    ///
    /// # Errors
    ///
    /// Returns [`TodoLifecycleError::NotTracked`] for an unknown todo and
    /// [`TodoLifecycleError::RuntimeUnavailable`] outside a tokio runtime.
    pub fn subscribe_total(&self, id: TodoId, period: Duration) -> TodoLifecycleResult<LiveTotal> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| TodoLifecycleError::RuntimeUnavailable)?;
        let (sender, receiver) = watch::channel(self.current_total(id)?);
        let todos = Arc::clone(&self.todos);
        let clock = Arc::clone(&self.clock);
        let tick = period.max(Duration::from_millis(1));

        let ticker = runtime.spawn(async move {
            let mut interval = tokio::time::interval(tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let latest = lock_table(&todos)
                    .get(&id)
                    .map(|tracked| tracked.accumulator().current_total(&*clock));
                let Some(total) = latest else {
                    break;
                };
                if sender.send(total).is_err() {
                    break;
                }
            }
        });
        debug!(todo_id = %id, ?tick, "live total subscribed");
        Ok(LiveTotal::new(id, receiver, ticker))
    }

    /// [`Self::subscribe_total`] with the configured display tick.
    ///
    /// # Errors
    ///
    /// As for [`Self::subscribe_total`].
    pub fn watch_total(&self, id: TodoId) -> TodoLifecycleResult<LiveTotal> {
        self.subscribe_total(id, self.display_tick)
    }

    /// Applies a transition locally, persists it, then reconciles or rolls
    /// back. `prepare` must leave the entry untouched when it fails.
    async fn commit<F>(
        &self,
        id: TodoId,
        action: &'static str,
        prepare: F,
    ) -> TodoLifecycleResult<Todo>
    where
        F: FnOnce(&mut TrackedTodo, &C) -> TodoLifecycleResult<TodoUpdateRequest>,
    {
        let (patch, snapshot) = {
            let mut table = self.table();
            let tracked = Self::idle_entry(&mut table, id)?;
            let snapshot = tracked.clone();
            match prepare(&mut *tracked, &*self.clock) {
                Ok(patch) => {
                    tracked.set_in_flight(true);
                    (patch, snapshot)
                }
                Err(err) => {
                    *tracked = snapshot;
                    return Err(err);
                }
            }
        };

        let outcome = self.gateway.update(id, &patch).await;
        let mut table = self.table();
        match outcome {
            Ok(persisted) => {
                if let Some(tracked) = table.get_mut(&id) {
                    tracked.reconcile(persisted.clone(), &*self.clock);
                }
                info!(
                    todo_id = %id,
                    event = action,
                    status = %persisted.status(),
                    actual_time_sec = persisted.actual_time_sec(),
                    "todo change committed"
                );
                Ok(persisted)
            }
            Err(TodoGatewayError::NotFound(_)) => {
                table.remove(&id);
                warn!(todo_id = %id, event = action, "todo vanished from gateway, dropped locally");
                Err(TodoLifecycleError::NotFound(id))
            }
            Err(err @ TodoGatewayError::InvalidResponse(_)) => {
                // The write was accepted; only its echo is unreadable.
                if let Some(tracked) = table.get_mut(&id) {
                    tracked.set_in_flight(false);
                }
                warn!(
                    todo_id = %id,
                    event = action,
                    error = %err,
                    "todo change kept unconfirmed, list again to reconcile"
                );
                Err(err.into())
            }
            Err(err) => {
                table.insert(id, snapshot);
                warn!(todo_id = %id, event = action, error = %err, "todo change rolled back");
                Err(err.into())
            }
        }
    }

    fn idle_entry(table: &mut TodoTable, id: TodoId) -> TodoLifecycleResult<&mut TrackedTodo> {
        let tracked = table
            .get_mut(&id)
            .ok_or(TodoLifecycleError::NotTracked(id))?;
        if tracked.is_in_flight() {
            return Err(TodoLifecycleError::MutationInFlight(id));
        }
        Ok(tracked)
    }

    fn table(&self) -> MutexGuard<'_, TodoTable> {
        lock_table(&self.todos)
    }
}

fn lock_table(todos: &Mutex<TodoTable>) -> MutexGuard<'_, TodoTable> {
    todos.lock().unwrap_or_else(PoisonError::into_inner)
}
