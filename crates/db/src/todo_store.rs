//! Repository for the `todos` table.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use todo_core::error::CoreError;
use todo_core::store::TodoStore;
use todo_core::todo::TodoItem;
use todo_core::types::{DbId, Timestamp};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, text, completed_at";

/// A row from the `todos` table. Bookkeeping columns are not selected.
#[derive(Debug, Clone, FromRow)]
struct TodoRow {
    id: DbId,
    text: String,
    completed_at: Option<Timestamp>,
}

impl From<TodoRow> for TodoItem {
    fn from(row: TodoRow) -> Self {
        TodoItem {
            id: Some(row.id),
            text: row.text,
            completed_at: row.completed_at,
        }
    }
}

fn storage_error(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "To-do store query failed");
    CoreError::Storage(err.to_string())
}

/// [`TodoStore`] over a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn insert(&self, item: &TodoItem) -> Result<TodoRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO todos (text, completed_at)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TodoRow>(&query)
            .bind(&item.text)
            .bind(item.completed_at)
            .fetch_one(&self.pool)
            .await
    }

    /// Write under an explicit id, inserting the row if it does not exist.
    ///
    /// Existing rows take a plain `UPDATE` and leave the sequence alone. A new
    /// explicit id is inserted in the same transaction that advances the
    /// sequence, which only ever moves forward.
    async fn write_with_id(&self, id: DbId, item: &TodoItem) -> Result<TodoRow, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let update = format!(
            "UPDATE todos SET
                text = $2,
                completed_at = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, TodoRow>(&update)
            .bind(id)
            .bind(&item.text)
            .bind(item.completed_at)
            .fetch_optional(&mut *tx)
            .await?;

        let row = match updated {
            Some(row) => row,
            None => {
                let insert = format!(
                    "INSERT INTO todos (id, text, completed_at)
                     VALUES ($1, $2, $3)
                     RETURNING {COLUMNS}"
                );
                let row = sqlx::query_as::<_, TodoRow>(&insert)
                    .bind(id)
                    .bind(&item.text)
                    .bind(item.completed_at)
                    .fetch_one(&mut *tx)
                    .await?;

                sqlx::query(
                    "SELECT setval(pg_get_serial_sequence('todos', 'id'), $1)
                     FROM todos_id_seq
                     WHERE last_value < $1 OR (last_value = $1 AND NOT is_called)",
                )
                .bind(id)
                .execute(&mut *tx)
                .await?;

                row
            }
        };

        tx.commit().await?;
        Ok(row)
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<TodoItem>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM todos WHERE id = $1");
        let row = sqlx::query_as::<_, TodoRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(row.map(TodoItem::from))
    }

    async fn save(&self, item: TodoItem) -> Result<TodoItem, CoreError> {
        let row = match item.id {
            Some(id) => self.write_with_id(id, &item).await,
            None => self.insert(&item).await,
        }
        .map_err(storage_error)?;
        Ok(row.into())
    }

    async fn find_all(&self) -> Result<Vec<TodoItem>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM todos ORDER BY id ASC");
        let rows = sqlx::query_as::<_, TodoRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(rows.into_iter().map(TodoItem::from).collect())
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool).await.map_err(storage_error)
    }
}
