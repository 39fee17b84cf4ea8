//! The record store capability the service runs against.
//!
//! Implementations must give read-after-write consistency within a single
//! call sequence. They do not need to guard concurrent read-modify-write on
//! the same id; the service does not rely on that.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::todo::TodoItem;
use crate::types::DbId;

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Point lookup. `Ok(None)` when no item has this id.
    async fn find_by_id(&self, id: DbId) -> Result<Option<TodoItem>, CoreError>;

    /// Persist `item` and return the stored state.
    ///
    /// Assigns a fresh id when `item.id` is `None`; otherwise writes the item
    /// under its own id, inserting it if the id is unknown.
    async fn save(&self, item: TodoItem) -> Result<TodoItem, CoreError>;

    /// Every stored item, ordered by id.
    async fn find_all(&self) -> Result<Vec<TodoItem>, CoreError>;

    /// Liveness check backing the `/health` endpoint.
    async fn health_check(&self) -> Result<(), CoreError> {
        Ok(())
    }
}
