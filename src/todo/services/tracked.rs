//! Local view of a todo held by the lifecycle controller.

use crate::todo::domain::{TimeAccumulator, Todo, TodoEvent, TodoStatus};
use mockable::Clock;

/// A todo together with its local timer and pending interaction state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedTodo {
    todo: Todo,
    accumulator: TimeAccumulator,
    completion_requested: bool,
    in_flight: bool,
}

impl TrackedTodo {
    /// Starts tracking a todo received from the gateway. A `doing` todo
    /// resumes counting from now on top of its persisted actual time.
    pub(crate) fn adopt(todo: Todo, clock: &impl Clock) -> Self {
        let accumulator = timer_for(&todo, clock);
        Self {
            todo,
            accumulator,
            completion_requested: false,
            in_flight: false,
        }
    }

    /// Returns the todo as last reconciled or tentatively changed.
    #[must_use]
    pub const fn todo(&self) -> &Todo {
        &self.todo
    }

    /// Returns the local time accumulator.
    #[must_use]
    pub const fn accumulator(&self) -> &TimeAccumulator {
        &self.accumulator
    }

    /// Returns whether a completion awaits its reflection memo.
    #[must_use]
    pub const fn completion_requested(&self) -> bool {
        self.completion_requested
    }

    /// Returns whether a gateway mutation is outstanding.
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub(crate) const fn todo_mut(&mut self) -> &mut Todo {
        &mut self.todo
    }

    pub(crate) const fn accumulator_mut(&mut self) -> &mut TimeAccumulator {
        &mut self.accumulator
    }

    pub(crate) const fn set_completion_requested(&mut self, requested: bool) {
        self.completion_requested = requested;
    }

    pub(crate) const fn set_in_flight(&mut self, in_flight: bool) {
        self.in_flight = in_flight;
    }

    /// Replaces the todo with the gateway's copy after a successful write.
    ///
    /// The running interval survives; the settled total moves up to the
    /// persisted actual time.
    pub(crate) fn reconcile(&mut self, persisted: Todo, clock: &impl Clock) {
        let running = persisted.status() == TodoStatus::Doing;
        self.accumulator.rebase(persisted.actual_time_sec());
        if running && !self.accumulator.is_running() {
            self.accumulator =
                TimeAccumulator::resume_from(self.accumulator.accumulated_sec(), clock.utc());
        } else if !running && self.accumulator.is_running() {
            self.accumulator = TimeAccumulator::new(self.accumulator.accumulated_sec());
        }
        self.todo = persisted;
        self.in_flight = false;
        self.drop_stale_completion();
    }

    /// Applies a list refresh. The gateway copy wins, except that a timer
    /// already running for a todo still reported as `doing` keeps running.
    pub(crate) fn refresh(&mut self, persisted: Todo, clock: &impl Clock) {
        if persisted.status() == TodoStatus::Doing && self.accumulator.is_running() {
            self.accumulator.rebase(persisted.actual_time_sec());
        } else {
            self.accumulator = timer_for(&persisted, clock);
        }
        self.todo = persisted;
        self.drop_stale_completion();
    }

    fn drop_stale_completion(&mut self) {
        if !self.todo.status().accepts(TodoEvent::Complete) {
            self.completion_requested = false;
        }
    }
}

fn timer_for(todo: &Todo, clock: &impl Clock) -> TimeAccumulator {
    if todo.status() == TodoStatus::Doing {
        TimeAccumulator::resume_from(todo.actual_time_sec(), clock.utc())
    } else {
        TimeAccumulator::new(todo.actual_time_sec())
    }
}
