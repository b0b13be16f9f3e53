//! HTTP adapter for the todo REST backend.

mod client;
mod models;

pub use client::HttpTodoGateway;
