//! In-process [`TodoStore`] backed by a `BTreeMap`.
//!
//! Used by tests and by the API binary when `STORE=memory`. Contents are
//! lost on restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::store::TodoStore;
use crate::todo::TodoItem;
use crate::types::DbId;

#[derive(Debug, Default)]
struct Inner {
    items: BTreeMap<DbId, TodoItem>,
    last_id: DbId,
}

/// Map-backed store. Ids start at 1 and increase monotonically, mirroring a
/// BIGSERIAL sequence.
#[derive(Debug, Default)]
pub struct InMemoryTodoStore {
    inner: RwLock<Inner>,
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items.
    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<TodoItem>, CoreError> {
        Ok(self.inner.read().await.items.get(&id).cloned())
    }

    async fn save(&self, mut item: TodoItem) -> Result<TodoItem, CoreError> {
        let mut inner = self.inner.write().await;
        let id = match item.id {
            Some(id) => {
                // Keep the sequence ahead of client-chosen ids.
                inner.last_id = inner.last_id.max(id);
                id
            }
            None => {
                inner.last_id = inner.last_id.checked_add(1).ok_or_else(|| {
                    CoreError::Storage("to-do id sequence exhausted".to_string())
                })?;
                inner.last_id
            }
        };
        item.id = Some(id);
        inner.items.insert(id, item.clone());
        Ok(item)
    }

    async fn find_all(&self) -> Result<Vec<TodoItem>, CoreError> {
        Ok(self.inner.read().await.items.values().cloned().collect())
    }
}
