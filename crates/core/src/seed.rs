//! Sample data for a fresh store (`SEED_SAMPLE_DATA=true`).

use crate::todo::TodoItem;
use crate::types::Timestamp;

/// Two items: one open, one completed at `now`.
pub fn sample_items(now: Timestamp) -> Vec<TodoItem> {
    vec![
        TodoItem::new("Wash the dishes"),
        TodoItem {
            completed_at: Some(now),
            ..TodoItem::new("Take out the trash")
        },
    ]
}
