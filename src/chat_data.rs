/// Data structures for Chat Pinner
use serde::{Deserialize, Serialize};

/// A chat the user has pinned for quick access
///
/// `id` is the host page's chat identifier (the trailing path segment of the
/// chat link); `name` is the display text captured at pin time and is not
/// kept in sync with later renames in the host application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PinnedChat {
    pub id: String,
    pub name: String,
}

impl PinnedChat {
    pub fn new(id: String, name: String) -> PinnedChat {
        PinnedChat { id, name }
    }
}

/// A user-defined label that chats can be associated with, many-to-many
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub is_default: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinned_chat_creation() {
        let chat = PinnedChat::new("abc123".to_string(), "Trip Planning".to_string());

        assert_eq!(chat.id, "abc123");
        assert_eq!(chat.name, "Trip Planning");
    }

    #[test]
    fn test_pinned_chat_serialization() {
        let chat = PinnedChat::new("abc123".to_string(), "Trip Planning".to_string());

        let json = serde_json::to_string(&chat).unwrap();
        let deserialized: PinnedChat = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, chat);
    }

    #[test]
    fn test_category_serialization_uses_camel_case() {
        let category = Category {
            id: "important".to_string(),
            name: "Important".to_string(),
            is_default: true,
        };

        // Stored values were written as `isDefault`; the wire shape must not drift.
        let json = serde_json::to_string(&category).unwrap();
        assert!(json.contains("\"isDefault\":true"));

        let deserialized: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, category);
    }

    #[test]
    fn test_category_roundtrip_from_stored_shape() {
        let json = r#"{"id":"category_1698508200000","name":"Work","isDefault":false}"#;
        let category: Category = serde_json::from_str(json).unwrap();

        assert_eq!(category.id, "category_1698508200000");
        assert_eq!(category.name, "Work");
        assert!(!category.is_default);
    }
}
