/// Persistence over the extension's synchronized key-value store
///
/// The three collections live under fixed keys and are read and written as
/// whole values through the JS bridge; the mutation logic itself is in `ops`.
/// Concurrent writers race at whole-value granularity and the store's
/// last-write-wins semantics apply; nothing here retries.

use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

use crate::chat_data::{Category, PinnedChat};
use crate::ops::{self, ChatCategoryMap};

// Import JS bridge functions
#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    fn onStorageChanged(callback: &js_sys::Function);
}

const PINNED_CHATS_KEY: &str = "chat-pinner-pinned-chats";
const CATEGORIES_KEY: &str = "chat-pinner-categories";
const CHAT_CATEGORIES_KEY: &str = "chat-pinner-chat-categories";

/// What happens to a chat's category associations when it is unpinned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnpinPolicy {
    /// Associations survive the unpin and apply again if the chat is re-pinned
    #[default]
    KeepAssociations,
    /// Unpinning also deletes the chat's entry from the association map
    PruneAssociations,
}

/// Async CRUD over the pinned-chat list, the category list, and the
/// chat→category association map
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatStore {
    unpin_policy: UnpinPolicy,
}

impl ChatStore {
    pub fn new() -> ChatStore {
        ChatStore::default()
    }

    pub fn with_unpin_policy(unpin_policy: UnpinPolicy) -> ChatStore {
        ChatStore { unpin_policy }
    }

    async fn read<T: DeserializeOwned>(key: &str) -> Result<Option<T>, String> {
        let value = getStorage(key)
            .await
            .map_err(|e| format!("Failed to read {key}: {e:?}"))?;

        if value.is_null() || value.is_undefined() {
            return Ok(None);
        }

        serde_wasm_bindgen::from_value(value)
            .map(Some)
            .map_err(|e| format!("Failed to parse {key}: {e:?}"))
    }

    async fn write<T: Serialize>(key: &str, value: &T) -> Result<(), String> {
        let value = serde_wasm_bindgen::to_value(value)
            .map_err(|e| format!("Failed to serialize {key}: {e:?}"))?;

        setStorage(key, value)
            .await
            .map_err(|e| format!("Failed to write {key}: {e:?}"))
    }

    /// Absent key reads as the empty list
    pub async fn get_pinned_chats(&self) -> Result<Vec<PinnedChat>, String> {
        Ok(Self::read(PINNED_CHATS_KEY).await?.unwrap_or_default())
    }

    pub async fn set_pinned_chats(&self, chats: &[PinnedChat]) -> Result<(), String> {
        Self::write(PINNED_CHATS_KEY, &chats).await
    }

    pub async fn is_pinned(&self, id: &str) -> Result<bool, String> {
        let chats = self.get_pinned_chats().await?;
        Ok(ops::is_pinned(&chats, id))
    }

    pub async fn pin_chat(&self, id: &str, name: &str) -> Result<(), String> {
        let mut chats = self.get_pinned_chats().await?;
        ops::pin_chat(&mut chats, id, name);
        self.set_pinned_chats(&chats).await
    }

    pub async fn unpin_chat(&self, id: &str) -> Result<(), String> {
        let mut chats = self.get_pinned_chats().await?;
        ops::unpin_chat(&mut chats, id);
        self.set_pinned_chats(&chats).await?;

        if self.unpin_policy == UnpinPolicy::PruneAssociations {
            let mut map = self.get_chat_categories().await?;
            if ops::prune_chat_associations(&mut map, id) {
                self.set_chat_categories(&map).await?;
            }
        }

        Ok(())
    }

    /// Read-then-write with no atomicity guarantee: a concurrent toggler can
    /// win the race and the final state follows the last writer.
    pub async fn toggle_chat_pin(&self, id: &str, name: &str) -> Result<(), String> {
        if self.is_pinned(id).await? {
            log::debug!("unpinning chat {id}");
            self.unpin_chat(id).await
        } else {
            log::debug!("pinning chat {id}");
            self.pin_chat(id, name).await
        }
    }

    /// Self-heals the built-in "Important" category on every read,
    /// persisting the heal when it fires
    pub async fn get_categories(&self) -> Result<Vec<Category>, String> {
        let mut categories: Vec<Category> =
            Self::read(CATEGORIES_KEY).await?.unwrap_or_default();

        if ops::ensure_default_category(&mut categories) {
            log::debug!("restored default category");
            self.set_categories(&categories).await?;
        }

        Ok(categories)
    }

    pub async fn set_categories(&self, categories: &[Category]) -> Result<(), String> {
        Self::write(CATEGORIES_KEY, &categories).await
    }

    pub async fn create_category(&self, name: &str) -> Result<Category, String> {
        let mut categories = self.get_categories().await?;
        let category = ops::new_category(name, js_sys::Date::now());
        categories.push(category.clone());
        self.set_categories(&categories).await?;
        Ok(category)
    }

    /// Removes the category and cascades into every chat's association list
    pub async fn delete_category(&self, category_id: &str) -> Result<(), String> {
        let mut categories = self.get_categories().await?;
        let mut map = self.get_chat_categories().await?;

        ops::delete_category(&mut categories, &mut map, category_id);

        self.set_categories(&categories).await?;
        self.set_chat_categories(&map).await
    }

    pub async fn get_chat_categories(&self) -> Result<ChatCategoryMap, String> {
        Ok(Self::read(CHAT_CATEGORIES_KEY).await?.unwrap_or_default())
    }

    pub async fn set_chat_categories(&self, map: &ChatCategoryMap) -> Result<(), String> {
        Self::write(CHAT_CATEGORIES_KEY, map).await
    }

    pub async fn add_chat_to_category(
        &self,
        chat_id: &str,
        category_id: &str,
    ) -> Result<(), String> {
        let mut map = self.get_chat_categories().await?;
        ops::add_chat_to_category(&mut map, chat_id, category_id);
        self.set_chat_categories(&map).await
    }

    pub async fn remove_chat_from_category(
        &self,
        chat_id: &str,
        category_id: &str,
    ) -> Result<(), String> {
        let mut map = self.get_chat_categories().await?;
        ops::remove_chat_from_category(&mut map, chat_id, category_id);
        self.set_chat_categories(&map).await
    }

    pub async fn get_chats_by_category(
        &self,
        category_id: &str,
    ) -> Result<Vec<PinnedChat>, String> {
        let chats = self.get_pinned_chats().await?;
        let map = self.get_chat_categories().await?;
        Ok(ops::chats_in_category(&chats, &map, category_id))
    }

    /// Register a callback fired on any change to any tracked key, with no
    /// per-key granularity; consumers re-fetch whatever they care about.
    /// The registration lasts for the process lifetime.
    pub fn on_changed<F: FnMut() + 'static>(callback: F) {
        let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
        onStorageChanged(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
