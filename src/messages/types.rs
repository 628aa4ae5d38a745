use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single upstream chat message.
///
/// Only `user_name` and `message` are interpreted. Every other field the
/// upstream sends (ids, timestamps, ...) is kept in `extra` and written back
/// out unchanged when the corpus is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    pub fn new(user_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            message: message.into(),
            extra: Map::new(),
        }
    }
}

/// Envelope of one upstream page. A missing or `null` `items` field is an
/// empty page.
#[derive(Debug, Default, Deserialize)]
pub struct MessagePage {
    #[serde(default)]
    pub items: Option<Vec<Message>>,
}

impl MessagePage {
    pub fn into_items(self) -> Vec<Message> {
        self.items.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_keeps_unknown_fields() {
        let raw = json!({
            "id": "b1e9",
            "user_id": "u-42",
            "user_name": "Layla",
            "timestamp": "2025-05-05T07:47:20Z",
            "message": "Book a table for two at Nobu."
        });

        let msg: Message = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(msg.user_name, "Layla");
        assert_eq!(msg.message, "Book a table for two at Nobu.");
        assert_eq!(msg.extra.get("user_id"), Some(&json!("u-42")));

        assert_eq!(serde_json::to_value(&msg).unwrap(), raw);
    }

    #[test]
    fn message_missing_fields_default_to_empty() {
        let msg: Message = serde_json::from_value(json!({ "id": 1 })).unwrap();
        assert_eq!(msg.user_name, "");
        assert_eq!(msg.message, "");
        assert_eq!(msg.extra.len(), 1);
    }

    #[test]
    fn message_rejects_non_string_text() {
        let result = serde_json::from_value::<Message>(json!({
            "user_name": "Bob",
            "message": 12
        }));
        assert!(result.is_err());
    }

    #[test]
    fn page_without_items_is_empty() {
        let page: MessagePage = serde_json::from_value(json!({ "total": 0 })).unwrap();
        assert!(page.into_items().is_empty());

        let page: MessagePage = serde_json::from_value(json!({ "items": null })).unwrap();
        assert!(page.into_items().is_empty());
    }

    #[test]
    fn page_preserves_item_order() {
        let page: MessagePage = serde_json::from_value(json!({
            "total": 2,
            "items": [
                { "user_name": "Alice", "message": "hi" },
                { "user_name": "Bob", "message": "bye" }
            ]
        }))
        .unwrap();

        let items = page.into_items();
        assert_eq!(items[0].user_name, "Alice");
        assert_eq!(items[1].user_name, "Bob");
    }
}
