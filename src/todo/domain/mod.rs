//! Domain model for todo lifecycle and time tracking.
//!
//! The todo domain validates every value it accepts, encodes the status
//! state machine, and accumulates working time, while keeping persistence and
//! transport concerns outside of the domain boundary.

mod accumulator;
mod error;
mod fields;
mod ids;
mod request;
mod state;
mod todo;

pub use accumulator::TimeAccumulator;
pub use error::{AccumulatorError, TodoDomainError, TodoValidationError};
pub use fields::{
    DESCRIPTION_MAX_CHARS, DueDate, EstimatedTime, NAME_MAX_CHARS, REFLECTION_MEMO_MAX_CHARS,
    ReflectionMemo, SECONDS_PER_MINUTE, TodoDescription, TodoName,
};
pub use ids::TodoId;
pub use request::{TodoCreationRequest, TodoEdit, TodoFilter, TodoUpdateBuilder, TodoUpdateRequest};
pub use state::{TodoEvent, TodoPriority, TodoStatus};
pub use todo::{PersistedTodoData, Todo};
