//! Domain core for the to-do service.
//!
//! Holds the item model, the upsert/merge and completion policy, the
//! [`store::TodoStore`] capability the policy runs against, and the
//! [`service::TodoService`] that ties them together. Nothing here knows
//! about HTTP or SQL.

pub mod error;
pub mod memory;
pub mod seed;
pub mod service;
pub mod store;
pub mod todo;
pub mod types;
