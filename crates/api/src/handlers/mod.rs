//! Request handlers.
//!
//! Handlers decode the request, delegate to [`todo_core::service::TodoService`]
//! and map errors via [`crate::error::AppError`].

pub mod todo;
