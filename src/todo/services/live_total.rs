//! Periodic display of a todo's running total.

use crate::todo::domain::TodoId;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Subscription to a todo's current total, refreshed on a fixed period.
///
/// The ticker only reads local state. Dropping the handle stops the ticker
/// without persisting anything.
#[derive(Debug)]
pub struct LiveTotal {
    todo_id: TodoId,
    receiver: watch::Receiver<u64>,
    ticker: JoinHandle<()>,
}

impl LiveTotal {
    pub(crate) const fn new(
        todo_id: TodoId,
        receiver: watch::Receiver<u64>,
        ticker: JoinHandle<()>,
    ) -> Self {
        Self {
            todo_id,
            receiver,
            ticker,
        }
    }

    /// Returns the observed todo.
    #[must_use]
    pub const fn todo_id(&self) -> TodoId {
        self.todo_id
    }

    /// Returns the most recently published total in seconds.
    #[must_use]
    pub fn current(&self) -> u64 {
        *self.receiver.borrow()
    }

    /// Waits for the next published total.
    ///
    /// Returns `None` once the ticker has stopped, which happens when the
    /// todo leaves the local view.
    pub async fn changed(&mut self) -> Option<u64> {
        self.receiver.changed().await.ok()?;
        Some(*self.receiver.borrow_and_update())
    }
}

impl Drop for LiveTotal {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}
