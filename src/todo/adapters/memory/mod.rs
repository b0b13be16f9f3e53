//! In-memory adapters for todo persistence.

mod todo;

pub use todo::InMemoryTodoGateway;
