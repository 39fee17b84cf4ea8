//! To-do item model and the reconciliation rules applied on write.
//!
//! The functions here are pure: they take the stored state and the incoming
//! request and decide what should be persisted. The service layer does the
//! I/O around them.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Entity name used in `NotFound` errors.
pub const ENTITY: &str = "ToDoItem";

/// A single to-do item.
///
/// `id` is `None` until the store has persisted the item. `completed_at` is
/// `None` while the item is open and is omitted from the JSON form in that
/// case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: Option<DbId>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
}

impl TodoItem {
    /// A new, unsaved, open item.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            completed_at: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Create-or-update request. Both fields are optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpsertTodo {
    pub id: Option<DbId>,
    pub text: Option<String>,
}

/// Outcome of [`mark_completed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The item was open and now carries a completion timestamp.
    Transitioned(TodoItem),
    /// The item was already completed; returned untouched.
    AlreadyCompleted(TodoItem),
}

impl Completion {
    pub fn into_item(self) -> TodoItem {
        match self {
            Completion::Transitioned(item) | Completion::AlreadyCompleted(item) => item,
        }
    }
}

/// Build the item for the creation path (request without an `id`).
///
/// `text` is mandatory here. Its content is not inspected.
pub fn new_item(request: &UpsertTodo) -> Result<TodoItem, CoreError> {
    match &request.text {
        Some(text) => Ok(TodoItem::new(text.clone())),
        None => Err(CoreError::Validation(
            "text is required when creating a to-do item".to_string(),
        )),
    }
}

/// Reconcile a stored item with an incoming update.
///
/// Only fields present in `incoming` overwrite the stored values. The stored
/// `id` and `completed_at` are always kept.
pub fn merge(stored: TodoItem, incoming: &UpsertTodo) -> TodoItem {
    TodoItem {
        id: stored.id,
        text: incoming.text.clone().unwrap_or(stored.text),
        completed_at: stored.completed_at,
    }
}

/// Apply the `Open -> Completed` transition at instant `now`.
///
/// Completed items are terminal: a second completion keeps the original
/// timestamp.
pub fn mark_completed(item: TodoItem, now: Timestamp) -> Completion {
    if item.is_completed() {
        return Completion::AlreadyCompleted(item);
    }
    Completion::Transitioned(TodoItem {
        completed_at: Some(now),
        ..item
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn stored(id: DbId, text: &str) -> TodoItem {
        TodoItem {
            id: Some(id),
            text: text.to_string(),
            completed_at: None,
        }
    }

    fn instant(hour: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_new_item_requires_text() {
        let result = new_item(&UpsertTodo::default());
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("text"));
    }

    #[test]
    fn test_new_item_has_no_id_and_is_open() {
        let item = new_item(&UpsertTodo {
            id: None,
            text: Some("Wash the dishes".to_string()),
        })
        .unwrap();
        assert_eq!(item.id, None);
        assert_eq!(item.text, "Wash the dishes");
        assert!(!item.is_completed());
    }

    #[test]
    fn test_new_item_accepts_empty_text() {
        let item = new_item(&UpsertTodo {
            id: None,
            text: Some(String::new()),
        })
        .unwrap();
        assert_eq!(item.text, "");
    }

    #[test]
    fn test_merge_overwrites_supplied_text() {
        let merged = merge(
            stored(1, "Wash the dishes"),
            &UpsertTodo {
                id: Some(1),
                text: Some("Wash the dishes 1".to_string()),
            },
        );
        assert_eq!(merged, stored(1, "Wash the dishes 1"));
    }

    #[test]
    fn test_merge_keeps_stored_text_when_absent() {
        let merged = merge(
            stored(7, "Keep me"),
            &UpsertTodo {
                id: Some(7),
                text: None,
            },
        );
        assert_eq!(merged.text, "Keep me");
    }

    #[test]
    fn test_merge_preserves_completed_at() {
        let mut item = stored(2, "Done already");
        item.completed_at = Some(instant(9));

        let merged = merge(
            item,
            &UpsertTodo {
                id: Some(2),
                text: Some("Renamed".to_string()),
            },
        );
        assert_eq!(merged.completed_at, Some(instant(9)));
        assert_eq!(merged.text, "Renamed");
    }

    #[test]
    fn test_merge_keeps_stored_id() {
        // The request id is only used for lookup; the stored id wins.
        let merged = merge(
            stored(3, "x"),
            &UpsertTodo {
                id: Some(42),
                text: None,
            },
        );
        assert_eq!(merged.id, Some(3));
    }

    #[test]
    fn test_mark_completed_sets_timestamp() {
        let completion = mark_completed(stored(1, "Wash the dishes"), instant(10));
        let Completion::Transitioned(item) = completion else {
            panic!("expected an open item to transition");
        };
        assert_eq!(item.completed_at, Some(instant(10)));
        assert_eq!(item.id, Some(1));
        assert_eq!(item.text, "Wash the dishes");
    }

    #[test]
    fn test_mark_completed_is_terminal() {
        let mut item = stored(1, "Wash the dishes");
        item.completed_at = Some(instant(8));

        let completion = mark_completed(item, instant(12));
        assert_matches!(completion, Completion::AlreadyCompleted(_));
        let item = completion.into_item();
        assert_eq!(item.completed_at, Some(instant(8)));
    }

    #[test]
    fn test_open_item_omits_completed_at_in_json() {
        let json = serde_json::to_value(stored(1, "Wash the dishes")).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["text"], "Wash the dishes");
        assert!(json.get("completedAt").is_none());
    }

    #[test]
    fn test_completed_item_serializes_camel_case() {
        let mut item = stored(2, "Done");
        item.completed_at = Some(instant(9));
        let json = serde_json::to_value(item).unwrap();
        assert!(json["completedAt"].is_string());
        assert!(json.get("completed_at").is_none());
    }

    #[test]
    fn test_upsert_request_fields_are_optional() {
        let request: UpsertTodo = serde_json::from_str(r#"{"text": "Wash the dishes 2"}"#).unwrap();
        assert_eq!(request.id, None);
        assert_eq!(request.text.as_deref(), Some("Wash the dishes 2"));

        let request: UpsertTodo = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(request.id, Some(1));
        assert_eq!(request.text, None);
    }
}
