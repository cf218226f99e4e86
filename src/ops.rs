/// Pure collection operations over the persisted records
///
/// Every storage write is a whole-value read-modify-write; the functions here
/// are the "modify" step, shared by the content script and the standalone
/// views so the semantics stay in one place.

use std::collections::HashMap;

use crate::chat_data::{Category, PinnedChat};

/// Chat id → category ids the chat belongs to. A key is never kept with an
/// empty list; the entry is deleted when the last category is removed.
pub type ChatCategoryMap = HashMap<String, Vec<String>>;

pub const DEFAULT_CATEGORY_ID: &str = "important";
pub const DEFAULT_CATEGORY_NAME: &str = "Important";

pub fn is_pinned(chats: &[PinnedChat], id: &str) -> bool {
    chats.iter().any(|chat| chat.id == id)
}

/// Prepend a new pin, most-recently-pinned first.
///
/// Does not check for an existing entry with the same id; callers wanting
/// toggle semantics go through `ChatStore::toggle_chat_pin`.
pub fn pin_chat(chats: &mut Vec<PinnedChat>, id: &str, name: &str) {
    chats.insert(0, PinnedChat::new(id.to_string(), name.to_string()));
}

/// Remove every entry matching `id`
pub fn unpin_chat(chats: &mut Vec<PinnedChat>, id: &str) {
    chats.retain(|chat| chat.id != id);
}

/// Ensure the built-in "Important" category exists, by name.
///
/// Returns true if it had to be added, in which case the caller persists the
/// healed list. Safe to run on every read.
pub fn ensure_default_category(categories: &mut Vec<Category>) -> bool {
    if categories.iter().any(|c| c.name == DEFAULT_CATEGORY_NAME) {
        return false;
    }

    categories.insert(
        0,
        Category {
            id: DEFAULT_CATEGORY_ID.to_string(),
            name: DEFAULT_CATEGORY_NAME.to_string(),
            is_default: true,
        },
    );
    true
}

/// Build a new user category with a creation-time-derived id
pub fn new_category(name: &str, now_ms: f64) -> Category {
    Category {
        id: format!("category_{}", now_ms as u64),
        name: name.to_string(),
        is_default: false,
    }
}

/// Remove a category and strip it from every chat's association list,
/// deleting chat entries whose list becomes empty
pub fn delete_category(
    categories: &mut Vec<Category>,
    map: &mut ChatCategoryMap,
    category_id: &str,
) {
    categories.retain(|c| c.id != category_id);

    map.retain(|_, category_ids| {
        category_ids.retain(|id| id != category_id);
        !category_ids.is_empty()
    });
}

/// Associate a chat with a category; a no-op if already associated
pub fn add_chat_to_category(map: &mut ChatCategoryMap, chat_id: &str, category_id: &str) {
    let category_ids = map.entry(chat_id.to_string()).or_default();

    if !category_ids.iter().any(|id| id == category_id) {
        category_ids.push(category_id.to_string());
    }
}

/// Remove one association; deletes the chat's entry if it was the last one
pub fn remove_chat_from_category(map: &mut ChatCategoryMap, chat_id: &str, category_id: &str) {
    if let Some(category_ids) = map.get_mut(chat_id) {
        category_ids.retain(|id| id != category_id);

        if category_ids.is_empty() {
            map.remove(chat_id);
        }
    }
}

/// Drop every association for a chat. Returns true if an entry was removed.
pub fn prune_chat_associations(map: &mut ChatCategoryMap, chat_id: &str) -> bool {
    map.remove(chat_id).is_some()
}

/// Pinned chats that belong to `category_id`, in pinned order
pub fn chats_in_category(
    chats: &[PinnedChat],
    map: &ChatCategoryMap,
    category_id: &str,
) -> Vec<PinnedChat> {
    chats
        .iter()
        .filter(|chat| {
            map.get(&chat.id)
                .is_some_and(|ids| ids.iter().any(|id| id == category_id))
        })
        .cloned()
        .collect()
}

/// Case-insensitive substring search over chat names; a blank query keeps all
pub fn filter_chats_by_name(chats: &[PinnedChat], query: &str) -> Vec<PinnedChat> {
    let query = query.trim().to_lowercase();

    if query.is_empty() {
        return chats.to_vec();
    }

    chats
        .iter()
        .filter(|chat| chat.name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pinned(entries: &[(&str, &str)]) -> Vec<PinnedChat> {
        entries
            .iter()
            .map(|(id, name)| PinnedChat::new(id.to_string(), name.to_string()))
            .collect()
    }

    #[test]
    fn test_pin_on_empty_store() {
        let mut chats = Vec::new();

        pin_chat(&mut chats, "abc", "Trip Planning");

        assert_eq!(chats, pinned(&[("abc", "Trip Planning")]));
    }

    #[test]
    fn test_pin_prepends_most_recent_first() {
        let mut chats = Vec::new();

        pin_chat(&mut chats, "a", "First");
        pin_chat(&mut chats, "b", "Second");
        pin_chat(&mut chats, "c", "Third");

        let ids: Vec<&str> = chats.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c", "b", "a"]);
    }

    #[test]
    fn test_pin_unpin_pin_parity() {
        let mut chats = Vec::new();

        pin_chat(&mut chats, "a", "Chat");
        unpin_chat(&mut chats, "a");
        assert!(!is_pinned(&chats, "a"));

        pin_chat(&mut chats, "a", "Chat");
        assert!(is_pinned(&chats, "a"));
    }

    #[test]
    fn test_pin_twice_keeps_duplicate() {
        // pin_chat does not de-duplicate; pinning a pinned id again grows the
        // list. Asserted so an accidental "fix" fails loudly.
        let mut chats = Vec::new();

        pin_chat(&mut chats, "a", "Chat");
        pin_chat(&mut chats, "a", "Chat");

        assert!(is_pinned(&chats, "a"));
        assert_eq!(chats.len(), 2);
        assert_eq!(chats[0].id, "a");
        assert_eq!(chats[1].id, "a");
    }

    #[test]
    fn test_unpin_removes_all_duplicates() {
        let mut chats = pinned(&[("a", "Chat"), ("b", "Other"), ("a", "Chat")]);

        unpin_chat(&mut chats, "a");

        assert_eq!(chats, pinned(&[("b", "Other")]));
    }

    #[test]
    fn test_unpin_missing_id_is_noop() {
        let mut chats = pinned(&[("a", "Chat")]);

        unpin_chat(&mut chats, "missing");

        assert_eq!(chats.len(), 1);
    }

    #[test]
    fn test_default_category_created_on_empty() {
        let mut categories = Vec::new();

        let healed = ensure_default_category(&mut categories);

        assert!(healed);
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id, DEFAULT_CATEGORY_ID);
        assert_eq!(categories[0].name, DEFAULT_CATEGORY_NAME);
        assert!(categories[0].is_default);
    }

    #[test]
    fn test_default_category_not_duplicated() {
        let mut categories = Vec::new();

        ensure_default_category(&mut categories);
        let healed_again = ensure_default_category(&mut categories);

        assert!(!healed_again);
        assert_eq!(
            categories
                .iter()
                .filter(|c| c.name == DEFAULT_CATEGORY_NAME)
                .count(),
            1
        );
    }

    #[test]
    fn test_default_category_matched_by_name() {
        // A user-created category named "Important" satisfies the invariant
        // even without the default flag; the heal keys on the name.
        let mut categories = vec![new_category("Important", 1_000.0)];

        let healed = ensure_default_category(&mut categories);

        assert!(!healed);
        assert_eq!(categories.len(), 1);
    }

    #[test]
    fn test_new_category_id_derived_from_time() {
        let category = new_category("Work", 1_698_508_200_000.0);

        assert_eq!(category.id, "category_1698508200000");
        assert_eq!(category.name, "Work");
        assert!(!category.is_default);
    }

    #[test]
    fn test_add_chat_to_category_is_idempotent() {
        let mut map = ChatCategoryMap::new();

        add_chat_to_category(&mut map, "a", "work_id");
        add_chat_to_category(&mut map, "a", "work_id");

        assert_eq!(map.get("a").unwrap().len(), 1);
    }

    #[test]
    fn test_add_chat_keeps_insertion_order() {
        let mut map = ChatCategoryMap::new();

        add_chat_to_category(&mut map, "a", "work_id");
        add_chat_to_category(&mut map, "a", "important");

        assert_eq!(map.get("a").unwrap(), &["work_id", "important"]);
    }

    #[test]
    fn test_remove_last_category_deletes_chat_key() {
        let mut map = ChatCategoryMap::new();
        add_chat_to_category(&mut map, "a", "work_id");

        remove_chat_from_category(&mut map, "a", "work_id");

        assert!(!map.contains_key("a"));
    }

    #[test]
    fn test_remove_category_keeps_remaining_associations() {
        let mut map = ChatCategoryMap::new();
        add_chat_to_category(&mut map, "a", "work_id");
        add_chat_to_category(&mut map, "a", "important");

        remove_chat_from_category(&mut map, "a", "work_id");

        assert_eq!(map.get("a").unwrap(), &["important"]);
    }

    #[test]
    fn test_chats_in_category_intersects_with_pins() {
        let chats = pinned(&[("a", "Alpha"), ("b", "Beta")]);
        let mut map = ChatCategoryMap::new();
        add_chat_to_category(&mut map, "a", "work_id");
        // "c" is associated but not pinned; it must not appear.
        add_chat_to_category(&mut map, "c", "work_id");

        let result = chats_in_category(&chats, &map, "work_id");

        assert_eq!(result, pinned(&[("a", "Alpha")]));
    }

    #[test]
    fn test_association_survives_unpin() {
        // Accepted inconsistency: unpinning does not cascade into the
        // association map under the default policy.
        let mut chats = pinned(&[("a", "Alpha")]);
        let mut map = ChatCategoryMap::new();
        add_chat_to_category(&mut map, "a", "work_id");

        unpin_chat(&mut chats, "a");

        assert!(map.contains_key("a"));
        assert!(chats_in_category(&chats, &map, "work_id").is_empty());
    }

    #[test]
    fn test_prune_chat_associations() {
        let mut map = ChatCategoryMap::new();
        add_chat_to_category(&mut map, "a", "work_id");
        add_chat_to_category(&mut map, "a", "important");

        assert!(prune_chat_associations(&mut map, "a"));
        assert!(!map.contains_key("a"));
        assert!(!prune_chat_associations(&mut map, "a"));
    }

    #[test]
    fn test_delete_category_cascades() {
        let mut categories = vec![new_category("Work", 1_000.0)];
        let work_id = categories[0].id.clone();
        ensure_default_category(&mut categories);

        let mut map = ChatCategoryMap::new();
        add_chat_to_category(&mut map, "a", &work_id);
        add_chat_to_category(&mut map, "b", &work_id);
        add_chat_to_category(&mut map, "b", DEFAULT_CATEGORY_ID);

        delete_category(&mut categories, &mut map, &work_id);

        assert!(categories.iter().all(|c| c.id != work_id));
        // "a" only had the deleted category; its key is gone entirely.
        assert!(!map.contains_key("a"));
        assert_eq!(map.get("b").unwrap(), &[DEFAULT_CATEGORY_ID]);
    }

    #[test]
    fn test_filter_chats_by_name_case_insensitive() {
        let chats = pinned(&[("a", "Trip Planning"), ("b", "Groceries")]);

        let result = filter_chats_by_name(&chats, "tRiP");

        assert_eq!(result, pinned(&[("a", "Trip Planning")]));
    }

    #[test]
    fn test_filter_chats_by_name_substring() {
        let chats = pinned(&[("a", "Trip Planning"), ("b", "Planting")]);

        let result = filter_chats_by_name(&chats, "plan");

        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_filter_chats_blank_query_keeps_all() {
        let chats = pinned(&[("a", "Trip Planning"), ("b", "Groceries")]);

        assert_eq!(filter_chats_by_name(&chats, "").len(), 2);
        assert_eq!(filter_chats_by_name(&chats, "   ").len(), 2);
    }
}
