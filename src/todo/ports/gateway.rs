//! Persistence gateway port for listing, creating, updating and deleting todos.

use crate::todo::domain::{Todo, TodoCreationRequest, TodoFilter, TodoId, TodoUpdateRequest};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for todo gateway operations.
pub type TodoGatewayResult<T> = Result<T, TodoGatewayError>;

/// Durable todo storage contract. The gateway's copy is the source of truth.
#[async_trait]
pub trait TodoGateway: Send + Sync {
    /// Lists todos matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`TodoGatewayError`] on transport or server failure.
    async fn list(&self, filter: &TodoFilter) -> TodoGatewayResult<Vec<Todo>>;

    /// Creates a todo; the gateway assigns its id, status and actual time.
    ///
    /// # Errors
    ///
    /// Returns [`TodoGatewayError::Rejected`] for invalid input.
    async fn create(&self, request: &TodoCreationRequest) -> TodoGatewayResult<Todo>;

    /// Applies a partial update and returns the stored todo.
    ///
    /// # Errors
    ///
    /// Returns [`TodoGatewayError::NotFound`] when the todo does not exist and
    /// [`TodoGatewayError::Rejected`] for invalid input.
    async fn update(&self, id: TodoId, request: &TodoUpdateRequest) -> TodoGatewayResult<Todo>;

    /// Deletes a todo.
    ///
    /// # Errors
    ///
    /// Returns [`TodoGatewayError::NotFound`] when the todo does not exist.
    async fn delete(&self, id: TodoId) -> TodoGatewayResult<()>;
}

/// Errors returned by todo gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum TodoGatewayError {
    /// The todo does not exist (HTTP 404).
    #[error("todo not found: {0}")]
    NotFound(TodoId),

    /// The request was rejected as invalid (HTTP 400).
    #[error("request rejected ({code}): {message}")]
    Rejected {
        /// HTTP-like status code.
        code: u16,
        /// Server-provided message.
        message: String,
    },

    /// The caller is not authenticated or not allowed (HTTP 401/403).
    #[error("not authorized ({code}): {message}")]
    Unauthorized {
        /// HTTP-like status code.
        code: u16,
        /// Server-provided message.
        message: String,
    },

    /// Any other server failure.
    #[error("server error ({code}): {message}")]
    Server {
        /// HTTP-like status code.
        code: u16,
        /// Server-provided message.
        message: String,
    },

    /// The response could not be decoded or violates todo invariants.
    #[error("invalid gateway response: {0}")]
    InvalidResponse(String),

    /// Network or transport failure.
    #[error("gateway transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl TodoGatewayError {
    /// Wraps a transport error.
    #[must_use]
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Returns the HTTP-like status code, when the server produced one.
    #[must_use]
    pub const fn code(&self) -> Option<u16> {
        match self {
            Self::NotFound(_) => Some(404),
            Self::Rejected { code, .. }
            | Self::Unauthorized { code, .. }
            | Self::Server { code, .. } => Some(*code),
            Self::InvalidResponse(_) | Self::Transport(_) => None,
        }
    }
}
