//! Unit tests for the session context.
