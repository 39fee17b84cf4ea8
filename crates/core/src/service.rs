//! To-do resolution service.
//!
//! Decides, per request, whether to insert, merge, or transition an item and
//! delegates the actual reads and writes to a [`TodoStore`].

use std::sync::Arc;

use chrono::Utc;

use crate::error::CoreError;
use crate::store::TodoStore;
use crate::todo::{self, Completion, TodoItem, UpsertTodo, ENTITY};
use crate::types::DbId;

/// Cheaply cloneable handle over a shared store.
#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// All items in store order.
    pub async fn list_all(&self) -> Result<Vec<TodoItem>, CoreError> {
        let items = self.store.find_all().await?;
        tracing::debug!(count = items.len(), "Listed to-do items");
        Ok(items)
    }

    /// Fetch one item or fail with `NotFound`.
    pub async fn get(&self, id: DbId) -> Result<TodoItem, CoreError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })
    }

    /// Create a new item or merge into an existing one.
    ///
    /// - No `id`: creation; `text` is required.
    /// - Known `id`: the stored item is merged with the supplied fields.
    /// - Unknown `id`: `NotFound`, nothing is written.
    pub async fn upsert(&self, request: UpsertTodo) -> Result<TodoItem, CoreError> {
        let Some(id) = request.id else {
            let item = todo::new_item(&request)?;
            let saved = self.store.save(item).await?;
            tracing::info!(id = ?saved.id, "Created to-do item");
            return Ok(saved);
        };

        let stored = self.get(id).await?;
        let merged = todo::merge(stored, &request);
        let saved = self.store.save(merged).await?;
        tracing::info!(id, text_changed = request.text.is_some(), "Merged to-do item");
        Ok(saved)
    }

    /// Mark an item completed.
    ///
    /// Completing an already-completed item returns it unchanged without a
    /// write, so the first completion timestamp sticks.
    pub async fn complete(&self, id: DbId) -> Result<TodoItem, CoreError> {
        let stored = self.get(id).await?;
        match todo::mark_completed(stored, Utc::now()) {
            Completion::Transitioned(item) => {
                let saved = self.store.save(item).await?;
                tracing::info!(id, completed_at = ?saved.completed_at, "Completed to-do item");
                Ok(saved)
            }
            Completion::AlreadyCompleted(item) => {
                tracing::debug!(id, "To-do item already completed");
                Ok(item)
            }
        }
    }

    /// Save `items` in order if the store is empty. Returns how many were saved.
    pub async fn seed_if_empty(&self, items: Vec<TodoItem>) -> Result<usize, CoreError> {
        if !self.store.find_all().await?.is_empty() {
            return Ok(0);
        }
        let count = items.len();
        for item in items {
            self.store.save(item).await?;
        }
        tracing::info!(count, "Seeded to-do store");
        Ok(count)
    }

    /// Delegates to [`TodoStore::health_check`].
    pub async fn health_check(&self) -> Result<(), CoreError> {
        self.store.health_check().await
    }
}
