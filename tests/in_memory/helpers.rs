//! Shared fixtures for in-memory integration tests.

use crate::test_helpers::SteppingClock;
use rstest::fixture;
use std::sync::Arc;
use yojitsu_tracker::todo::{
    adapters::memory::InMemoryTodoGateway, services::TodoLifecycleController,
};

/// Gateway type used by the in-memory suites.
pub type Gateway = InMemoryTodoGateway<SteppingClock>;

/// Controller type used by the in-memory suites.
pub type Controller = TodoLifecycleController<Gateway, SteppingClock>;

/// Controller wired to the in-memory gateway and a stepping clock.
pub struct TrackerFixture {
    pub clock: Arc<SteppingClock>,
    pub gateway: Arc<Gateway>,
    pub controller: Arc<Controller>,
}

impl TrackerFixture {
    /// Builds a second controller over the same gateway and clock, as a new
    /// application session would.
    pub fn reopen(&self) -> Controller {
        TodoLifecycleController::new(Arc::clone(&self.gateway), Arc::clone(&self.clock))
    }
}

/// Provides a fresh controller for each test.
#[fixture]
pub fn tracker() -> TrackerFixture {
    let clock = Arc::new(SteppingClock::new());
    let gateway = Arc::new(InMemoryTodoGateway::with_clock(Arc::clone(&clock)));
    let controller = Arc::new(TodoLifecycleController::new(
        Arc::clone(&gateway),
        Arc::clone(&clock),
    ));
    TrackerFixture {
        clock,
        gateway,
        controller,
    }
}
