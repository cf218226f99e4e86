/// Chat link parsing for Chat Pinner
///
/// The host page addresses every conversation as `…/c/<chat-id>`; the id is
/// whatever follows the last `/c/` marker, with any query string or fragment
/// stripped.

/// Extract the chat id from a chat link href
///
/// Examples:
/// - https://chat.example.com/c/abc123 → abc123
/// - /c/abc123?model=default → abc123
/// - /settings → None
pub fn chat_id_from_href(href: &str) -> Option<String> {
    let (_, rest) = href.trim().rsplit_once("/c/")?;

    let id = rest
        .split(['?', '#'])
        .next()
        .unwrap_or("")
        .trim_end_matches('/');

    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Normalize a display name captured from the page: trimmed, empty rejected
pub fn display_name(raw: &str) -> Option<String> {
    let name = raw.trim();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_id_from_absolute_href() {
        assert_eq!(
            chat_id_from_href("https://chat.example.com/c/abc123"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_chat_id_from_relative_href() {
        assert_eq!(chat_id_from_href("/c/abc123"), Some("abc123".to_string()));
    }

    #[test]
    fn test_chat_id_strips_query_and_fragment() {
        assert_eq!(
            chat_id_from_href("/c/abc123?model=default"),
            Some("abc123".to_string())
        );
        assert_eq!(
            chat_id_from_href("/c/abc123#section"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_chat_id_strips_trailing_slash() {
        assert_eq!(chat_id_from_href("/c/abc123/"), Some("abc123".to_string()));
    }

    #[test]
    fn test_chat_id_uses_last_marker() {
        assert_eq!(
            chat_id_from_href("/c/ignored/c/abc123"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_chat_id_missing_marker() {
        assert_eq!(chat_id_from_href("/settings"), None);
        assert_eq!(chat_id_from_href(""), None);
    }

    #[test]
    fn test_chat_id_empty_segment() {
        assert_eq!(chat_id_from_href("/c/"), None);
        assert_eq!(chat_id_from_href("/c/?model=default"), None);
    }

    #[test]
    fn test_display_name_trims() {
        assert_eq!(
            display_name("  Trip Planning \n"),
            Some("Trip Planning".to_string())
        );
    }

    #[test]
    fn test_display_name_rejects_blank() {
        assert_eq!(display_name(""), None);
        assert_eq!(display_name("   "), None);
    }
}
