//! REST client implementing the todo gateway.

use super::models::{ErrorBody, TodoRecord};
use crate::config::TrackerConfig;
use crate::session::AccessToken;
use crate::todo::{
    domain::{Todo, TodoCreationRequest, TodoFilter, TodoId, TodoUpdateRequest},
    ports::{TodoGateway, TodoGatewayError, TodoGatewayResult},
};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Todo gateway talking to the REST backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTodoGateway {
    client: reqwest::Client,
    base_url: String,
    access_token: Option<AccessToken>,
}

impl HttpTodoGateway {
    /// Creates a gateway for `base_url` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`TodoGatewayError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> TodoGatewayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TodoGatewayError::transport)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            access_token: None,
        })
    }

    /// Creates a gateway from the tracker configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TodoGatewayError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn from_config(config: &TrackerConfig) -> TodoGatewayResult<Self> {
        Self::new(config.api_base_url.clone(), config.request_timeout())
    }

    /// Sends `Authorization: Bearer <token>` with every request.
    #[must_use]
    pub fn with_access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{path}", self.base_url));
        if let Some(token) = &self.access_token {
            builder = builder.bearer_auth(token.secret());
        }
        builder
    }

    async fn send(
        &self,
        builder: RequestBuilder,
        todo_id: Option<TodoId>,
    ) -> TodoGatewayResult<Response> {
        let response = builder.send().await.map_err(TodoGatewayError::transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(error_from_response(status, response, todo_id).await)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> TodoGatewayResult<T> {
        let bytes = response.bytes().await.map_err(TodoGatewayError::transport)?;
        serde_json::from_slice(&bytes)
            .map_err(|err| TodoGatewayError::InvalidResponse(err.to_string()))
    }

    async fn decode_todo(response: Response) -> TodoGatewayResult<Todo> {
        let record: TodoRecord = Self::decode(response).await?;
        into_todo(record)
    }
}

fn into_todo(record: TodoRecord) -> TodoGatewayResult<Todo> {
    let id = record.id;
    Todo::try_from(record)
        .map_err(|err| TodoGatewayError::InvalidResponse(format!("todo {id}: {err}")))
}

async fn error_from_response(
    status: StatusCode,
    response: Response,
    todo_id: Option<TodoId>,
) -> TodoGatewayError {
    let code = status.as_u16();
    let body = response.text().await.unwrap_or_else(|err| {
        debug!(status = code, error = %err, "failed to read error body");
        String::new()
    });
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(error) => error.message,
        Err(_) if body.trim().is_empty() => {
            status.canonical_reason().unwrap_or("unknown error").to_owned()
        }
        Err(_) => body,
    };

    match (status, todo_id) {
        (StatusCode::NOT_FOUND, Some(id)) => TodoGatewayError::NotFound(id),
        (StatusCode::BAD_REQUEST, _) => TodoGatewayError::Rejected { code, message },
        (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => {
            TodoGatewayError::Unauthorized { code, message }
        }
        _ => TodoGatewayError::Server { code, message },
    }
}

#[async_trait]
impl TodoGateway for HttpTodoGateway {
    async fn list(&self, filter: &TodoFilter) -> TodoGatewayResult<Vec<Todo>> {
        let query = filter.query_pairs();
        debug!(filters = query.len(), "listing todos");
        let builder = self.request(Method::GET, "/todos").query(&query);
        let response = self.send(builder, None).await?;
        let records: Vec<TodoRecord> = Self::decode(response).await?;
        records.into_iter().map(into_todo).collect()
    }

    async fn create(&self, request: &TodoCreationRequest) -> TodoGatewayResult<Todo> {
        debug!(name = %request.name(), "creating todo");
        let builder = self.request(Method::POST, "/todos").json(request);
        let response = self.send(builder, None).await?;
        Self::decode_todo(response).await
    }

    async fn update(&self, id: TodoId, request: &TodoUpdateRequest) -> TodoGatewayResult<Todo> {
        debug!(todo_id = %id, status = ?request.status(), "updating todo");
        let builder = self
            .request(Method::PUT, &format!("/todos/{id}"))
            .json(request);
        let response = self.send(builder, Some(id)).await?;
        Self::decode_todo(response).await
    }

    async fn delete(&self, id: TodoId) -> TodoGatewayResult<()> {
        debug!(todo_id = %id, "deleting todo");
        let builder = self.request(Method::DELETE, &format!("/todos/{id}"));
        self.send(builder, Some(id)).await.map(|_| ())
    }
}
