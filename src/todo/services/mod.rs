//! Service layer for todo lifecycle orchestration.

mod lifecycle;
mod live_total;
mod tracked;

pub use lifecycle::{TodoLifecycleController, TodoLifecycleError, TodoLifecycleResult};
pub use live_total::LiveTotal;
pub use tracked::TrackedTodo;
