/// Localized UI labels
///
/// Strings come from the extension's message catalog when available and fall
/// back to English, so injected controls never render empty.

use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    fn i18nMessage(key: &str) -> Option<String>;
}

#[derive(Debug, Clone)]
pub struct Labels {
    pub pinned: String,
    pub no_pinned_chats: String,
    pub pin: String,
    pub unpin: String,
}

impl Labels {
    pub fn load() -> Labels {
        Labels {
            pinned: message_or("pinned", "Pinned"),
            no_pinned_chats: message_or("noPinnedChats", "No pinned chats"),
            pin: message_or("pin", "Pin"),
            unpin: message_or("unpin", "Unpin"),
        }
    }
}

fn message_or(key: &str, fallback: &str) -> String {
    i18nMessage(key)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
