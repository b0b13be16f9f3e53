//! Shared world state for todo lifecycle BDD scenarios.

use std::sync::Arc;

use crate::test_helpers::SteppingClock;
use rstest::fixture;
use yojitsu_tracker::todo::{
    adapters::memory::InMemoryTodoGateway,
    domain::{Todo, TodoId},
    services::{TodoLifecycleController, TodoLifecycleError},
};

/// Controller type used by the BDD world.
pub type TestController =
    TodoLifecycleController<InMemoryTodoGateway<SteppingClock>, SteppingClock>;

/// Scenario world for todo lifecycle behaviour tests.
pub struct TodoLifecycleWorld {
    pub clock: Arc<SteppingClock>,
    pub controller: TestController,
    pub current_id: Option<TodoId>,
    pub last_todo: Option<Todo>,
    pub last_result: Option<Result<Todo, TodoLifecycleError>>,
}

impl TodoLifecycleWorld {
    /// Creates a world with an empty backend.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(SteppingClock::new());
        let controller = TodoLifecycleController::new(
            Arc::new(InMemoryTodoGateway::with_clock(Arc::clone(&clock))),
            Arc::clone(&clock),
        );

        Self {
            clock,
            controller,
            current_id: None,
            last_todo: None,
            last_result: None,
        }
    }

    /// Returns the todo under test.
    pub fn todo_id(&self) -> Result<TodoId, eyre::Report> {
        self.current_id
            .ok_or_else(|| eyre::eyre!("missing todo in scenario world"))
    }

    /// Stores an operation outcome, keeping the latest persisted todo.
    pub fn record(&mut self, result: Result<Todo, TodoLifecycleError>) {
        if let Ok(ref todo) = result {
            self.last_todo = Some(todo.clone());
        }
        self.last_result = Some(result);
    }
}

impl Default for TodoLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TodoLifecycleWorld {
    TodoLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
