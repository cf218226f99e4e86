/// Full page view for pinned chats
///
/// Search, category filtering, and category management over the same
/// persisted collections the content script writes. State is read once on
/// load and refreshed after this page's own writes; there is no live change
/// subscription, so edits from other surfaces appear on reload.

use patternfly_yew::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{HtmlInputElement, KeyboardEvent};
use yew::prelude::*;

use super::CHAT_URL_BASE;
use crate::chat_data::{Category, PinnedChat};
use crate::ops::{self, ChatCategoryMap};
use crate::store::ChatStore;

#[derive(Clone, PartialEq)]
enum ViewState {
    Loading,
    Idle,
    Error(String),
}

#[function_component(FullPage)]
pub fn full_page() -> Html {
    let state = use_state(|| ViewState::Loading);
    let chats = use_state(Vec::<PinnedChat>::new);
    let categories = use_state(Vec::<Category>::new);
    let chat_map = use_state(ChatCategoryMap::new);

    let search_query = use_state(String::new);
    let category_filter = use_state(|| None::<String>);

    let assign_chat = use_state(|| None::<PinnedChat>); // chat the assign modal is open for
    let assign_category_name = use_state(String::new);

    let manage_open = use_state(|| false);
    let manage_category_name = use_state(String::new);
    let manage_search = use_state(String::new);

    let notification = use_state(|| None::<String>);

    // Load all three collections on mount
    {
        let state = state.clone();
        let chats = chats.clone();
        let categories = categories.clone();
        let chat_map = chat_map.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                let store = ChatStore::new();

                let loaded = async {
                    let pinned = store.get_pinned_chats().await?;
                    let cats = store.get_categories().await?;
                    let map = store.get_chat_categories().await?;
                    Ok::<_, String>((pinned, cats, map))
                }
                .await;

                match loaded {
                    Ok((pinned, cats, map)) => {
                        chats.set(pinned);
                        categories.set(cats);
                        chat_map.set(map);
                        state.set(ViewState::Idle);
                    }
                    Err(e) => {
                        state.set(ViewState::Error(format!("Failed to load: {e}")));
                    }
                }
            });
            || ()
        });
    }

    // Search handler
    let on_search_input = {
        let search_query = search_query.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                search_query.set(input.value());
            }
        })
    };

    // Category filter: None shows everything
    let on_filter_all = {
        let category_filter = category_filter.clone();
        let search_query = search_query.clone();
        Callback::from(move |_| {
            category_filter.set(None);
            search_query.set(String::new());
        })
    };

    let on_filter = {
        let category_filter = category_filter.clone();
        Callback::from(move |category_id: String| {
            category_filter.set(Some(category_id));
        })
    };

    // Copy a chat link to the clipboard
    let on_copy = {
        let notification = notification.clone();
        Callback::from(move |chat: PinnedChat| {
            copy_chat_link(&chat.id);
            show_notification(&notification, "Link copied".to_string());
        })
    };

    // Open/close the assign-to-category modal
    let on_assign_open = {
        let assign_chat = assign_chat.clone();
        Callback::from(move |chat: PinnedChat| {
            assign_chat.set(Some(chat));
        })
    };

    let on_assign_close = {
        let assign_chat = assign_chat.clone();
        Callback::from(move |_| {
            assign_chat.set(None);
        })
    };

    // Assign the modal's chat to an existing category
    let on_assign_to = {
        let assign_chat = assign_chat.clone();
        let chat_map = chat_map.clone();
        let notification = notification.clone();

        Callback::from(move |(category_id, category_name): (String, String)| {
            let Some(chat) = (*assign_chat).clone() else {
                return;
            };
            let assign_chat = assign_chat.clone();
            let chat_map = chat_map.clone();
            let notification = notification.clone();

            spawn_local(async move {
                let store = ChatStore::new();
                match store.add_chat_to_category(&chat.id, &category_id).await {
                    Ok(()) => {
                        if let Ok(map) = store.get_chat_categories().await {
                            chat_map.set(map);
                        }
                        assign_chat.set(None);
                        show_notification(
                            &notification,
                            format!("Added \"{}\" to \"{}\"", chat.name, category_name),
                        );
                    }
                    Err(e) => {
                        log::warn!("failed to add chat to category: {e}");
                        show_notification(&notification, "Failed to add to category".to_string());
                    }
                }
            });
        })
    };

    let on_assign_name_input = {
        let assign_category_name = assign_category_name.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                assign_category_name.set(input.value());
            }
        })
    };

    // Create a category from the assign modal and put the chat in it
    let on_create_and_assign = {
        let assign_chat = assign_chat.clone();
        let assign_category_name = assign_category_name.clone();
        let categories = categories.clone();
        let chat_map = chat_map.clone();
        let notification = notification.clone();

        Callback::from(move |_| {
            let name = assign_category_name.trim().to_string();
            let Some(chat) = (*assign_chat).clone() else {
                return;
            };
            if name.is_empty() {
                return;
            }

            let assign_chat = assign_chat.clone();
            let assign_category_name = assign_category_name.clone();
            let categories = categories.clone();
            let chat_map = chat_map.clone();
            let notification = notification.clone();

            spawn_local(async move {
                let store = ChatStore::new();
                let created = async {
                    let category = store.create_category(&name).await?;
                    store.add_chat_to_category(&chat.id, &category.id).await?;
                    Ok::<_, String>(category)
                }
                .await;

                match created {
                    Ok(category) => {
                        if let Ok(cats) = store.get_categories().await {
                            categories.set(cats);
                        }
                        if let Ok(map) = store.get_chat_categories().await {
                            chat_map.set(map);
                        }
                        assign_chat.set(None);
                        assign_category_name.set(String::new());
                        show_notification(
                            &notification,
                            format!("Created \"{}\" and added \"{}\"", category.name, chat.name),
                        );
                    }
                    Err(e) => {
                        log::warn!("failed to create category: {e}");
                        show_notification(&notification, "Failed to create category".to_string());
                    }
                }
            });
        })
    };

    // Manage-categories modal
    let on_manage_open = {
        let manage_open = manage_open.clone();
        let manage_search = manage_search.clone();
        let manage_category_name = manage_category_name.clone();
        Callback::from(move |_| {
            manage_search.set(String::new());
            manage_category_name.set(String::new());
            manage_open.set(true);
        })
    };

    let on_manage_close = {
        let manage_open = manage_open.clone();
        Callback::from(move |_| {
            manage_open.set(false);
        })
    };

    let on_manage_name_input = {
        let manage_category_name = manage_category_name.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                manage_category_name.set(input.value());
            }
        })
    };

    let on_manage_search_input = {
        let manage_search = manage_search.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                manage_search.set(input.value());
            }
        })
    };

    let on_create_category: Callback<()> = {
        let manage_category_name = manage_category_name.clone();
        let categories = categories.clone();
        let notification = notification.clone();

        Callback::from(move |_| {
            let name = manage_category_name.trim().to_string();
            if name.is_empty() {
                return;
            }

            let manage_category_name = manage_category_name.clone();
            let categories = categories.clone();
            let notification = notification.clone();

            spawn_local(async move {
                let store = ChatStore::new();
                match store.create_category(&name).await {
                    Ok(category) => {
                        if let Ok(cats) = store.get_categories().await {
                            categories.set(cats);
                        }
                        manage_category_name.set(String::new());
                        show_notification(
                            &notification,
                            format!("Created new category: \"{}\"", category.name),
                        );
                    }
                    Err(e) => {
                        log::warn!("failed to create category: {e}");
                        show_notification(&notification, "Failed to create category".to_string());
                    }
                }
            });
        })
    };

    let on_manage_keydown = {
        let manage_open = manage_open.clone();
        let on_create_category = on_create_category.clone();
        Callback::from(move |e: KeyboardEvent| match e.key().as_str() {
            "Enter" => {
                e.prevent_default();
                on_create_category.emit(());
            }
            "Escape" => manage_open.set(false),
            _ => {}
        })
    };

    // Delete cascades into every chat's association list
    let on_delete_category = {
        let categories = categories.clone();
        let chat_map = chat_map.clone();
        let category_filter = category_filter.clone();
        let notification = notification.clone();

        Callback::from(move |category: Category| {
            if !confirm_delete(&category.name) {
                return;
            }

            let categories = categories.clone();
            let chat_map = chat_map.clone();
            let category_filter = category_filter.clone();
            let notification = notification.clone();

            spawn_local(async move {
                let store = ChatStore::new();
                match store.delete_category(&category.id).await {
                    Ok(()) => {
                        if let Ok(cats) = store.get_categories().await {
                            categories.set(cats);
                        }
                        if let Ok(map) = store.get_chat_categories().await {
                            chat_map.set(map);
                        }
                        if category_filter.as_deref() == Some(category.id.as_str()) {
                            category_filter.set(None);
                        }
                        show_notification(
                            &notification,
                            format!("Deleted category: \"{}\"", category.name),
                        );
                    }
                    Err(e) => {
                        log::warn!("failed to delete category {}: {e}", category.id);
                        show_notification(&notification, "Failed to delete category".to_string());
                    }
                }
            });
        })
    };

    // Category filter first, then the search term within it
    let visible: Vec<PinnedChat> = {
        let by_category = match &*category_filter {
            Some(category_id) => ops::chats_in_category(&chats, &chat_map, category_id),
            None => (*chats).clone(),
        };
        ops::filter_chats_by_name(&by_category, &search_query)
    };

    let manage_visible: Vec<Category> = {
        let query = manage_search.trim().to_lowercase();
        categories
            .iter()
            .filter(|c| query.is_empty() || c.name.to_lowercase().contains(&query))
            .cloned()
            .collect()
    };

    html! {
        <div class="container">
            <div class="header">
                <h1 class="main-title">{"Pinned Chats"}</h1>
                <Button onclick={on_manage_open} variant={ButtonVariant::Secondary}>
                    {"Manage categories"}
                </Button>
            </div>

            if let Some(message) = (*notification).clone() {
                <div class="notification">{message}</div>
            }

            {match &*state {
                ViewState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Loading pinned chats..."}</p>
                    </div>
                },
                ViewState::Error(err) => html! {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {err.clone()}
                    </Alert>
                },
                ViewState::Idle => html! {
                    <>
                        // Search bar
                        <div class="search-container">
                            <input
                                type="text"
                                placeholder="Search pinned chats..."
                                value={(*search_query).clone()}
                                oninput={on_search_input}
                                class="search-input"
                            />
                        </div>

                        // Category filter bar
                        <div class="category-filter">
                            <button
                                class={if category_filter.is_none() { "category-filter-btn active" } else { "category-filter-btn" }}
                                onclick={on_filter_all}
                            >
                                {"All chats"}
                            </button>
                            {for categories.iter().map(|category| {
                                let is_active = category_filter.as_deref() == Some(category.id.as_str());
                                html! {
                                    <button
                                        key={category.id.clone()}
                                        class={if is_active { "category-filter-btn active" } else { "category-filter-btn" }}
                                        onclick={on_filter.reform({
                                            let category_id = category.id.clone();
                                            move |_| category_id.clone()
                                        })}
                                    >
                                        {&category.name}
                                    </button>
                                }
                            })}
                        </div>

                        // Chat list
                        if chats.is_empty() {
                            <div class="empty-state">
                                <p>{"No pinned chats yet."}</p>
                                <p class="empty-state-hint">{"Pin a chat from its menu in the sidebar."}</p>
                            </div>
                        } else {
                            if visible.is_empty() {
                                <div class="empty-state">
                                    if search_query.trim().is_empty() {
                                        <p>{"No chats in this category."}</p>
                                    } else {
                                        <p>{format!("No chats match \"{}\"", search_query.trim())}</p>
                                    }
                                </div>
                            } else {
                                <div class="chat-list">
                                    {for visible.iter().map(|chat| html! {
                                        <ChatRow
                                            key={chat.id.clone()}
                                            chat={chat.clone()}
                                            on_copy={on_copy.clone()}
                                            on_assign={on_assign_open.clone()}
                                        />
                                    })}
                                </div>
                            }
                        }

                        // Footer stats
                        <div class="footer">
                            {format!("{} pinned chats • {} categories", chats.len(), categories.len())}
                        </div>
                    </>
                },
            }}

            // Assign-to-category modal
            if let Some(chat) = (*assign_chat).clone() {
                <div class="modal">
                    <div class="modal-content">
                        <div class="modal-header">
                            <h2>{format!("Add \"{}\" to category", chat.name)}</h2>
                            <button class="modal-close" onclick={on_assign_close.reform(|_| ())}>{"×"}</button>
                        </div>
                        <div class="category-list">
                            {for categories.iter().map(|category| html! {
                                <div key={category.id.clone()} class="category-item">
                                    <span>{&category.name}</span>
                                    <Button
                                        onclick={on_assign_to.reform({
                                            let id = category.id.clone();
                                            let name = category.name.clone();
                                            move |_| (id.clone(), name.clone())
                                        })}
                                        size={ButtonSize::Small}
                                    >
                                        {"Add"}
                                    </Button>
                                </div>
                            })}
                        </div>
                        <div class="modal-create-row">
                            <input
                                type="text"
                                placeholder="New category name..."
                                value={(*assign_category_name).clone()}
                                oninput={on_assign_name_input}
                                class="category-input"
                            />
                            <Button onclick={on_create_and_assign} variant={ButtonVariant::Secondary}>
                                {"Create and add"}
                            </Button>
                        </div>
                    </div>
                </div>
            }

            // Manage-categories modal
            if *manage_open {
                <div class="modal">
                    <div class="modal-content">
                        <div class="modal-header">
                            <h2>{"Manage categories"}</h2>
                            <button class="modal-close" onclick={on_manage_close.reform(|_| ())}>{"×"}</button>
                        </div>
                        <div class="modal-create-row">
                            <input
                                type="text"
                                placeholder="New category name..."
                                value={(*manage_category_name).clone()}
                                oninput={on_manage_name_input}
                                onkeydown={on_manage_keydown}
                                class="category-input"
                            />
                            <Button onclick={on_create_category.reform(|_| ())}>
                                {"Create"}
                            </Button>
                        </div>
                        <div class="search-container">
                            <input
                                type="text"
                                placeholder="Search categories..."
                                value={(*manage_search).clone()}
                                oninput={on_manage_search_input}
                                class="search-input"
                            />
                        </div>
                        <div class="category-list">
                            if manage_visible.is_empty() {
                                <div class="empty-state">
                                    <p>{"No categories found."}</p>
                                </div>
                            } else {
                                {for manage_visible.iter().map(|category| html! {
                                    <div key={category.id.clone()} class="category-item">
                                        <span>{&category.name}</span>
                                        <Button
                                            onclick={on_delete_category.reform({
                                                let category = category.clone();
                                                move |_| category.clone()
                                            })}
                                            variant={ButtonVariant::Danger}
                                            size={ButtonSize::Small}
                                        >
                                            {"Delete"}
                                        </Button>
                                    </div>
                                })}
                            }
                        </div>
                    </div>
                </div>
            }
        </div>
    }
}

// Chat row component

#[derive(Properties, PartialEq)]
struct ChatRowProps {
    chat: PinnedChat,
    on_copy: Callback<PinnedChat>,
    on_assign: Callback<PinnedChat>,
}

#[function_component(ChatRow)]
fn chat_row(props: &ChatRowProps) -> Html {
    let chat = &props.chat;
    let url = format!("{CHAT_URL_BASE}{}", chat.id);

    html! {
        <div class="chat-card">
            <div class="chat-info">
                <a class="chat-title" href={url.clone()} target="_blank">
                    {&chat.name}
                </a>
            </div>
            <div class="chat-actions">
                <a class="btn btn-primary" href={url} target="_blank">{"Open"}</a>
                <Button
                    onclick={props.on_copy.reform({
                        let chat = chat.clone();
                        move |_| chat.clone()
                    })}
                    variant={ButtonVariant::Secondary}
                    size={ButtonSize::Small}
                >
                    {"Copy"}
                </Button>
                <Button
                    onclick={props.on_assign.reform({
                        let chat = chat.clone();
                        move |_| chat.clone()
                    })}
                    variant={ButtonVariant::Secondary}
                    size={ButtonSize::Small}
                >
                    {"+ Add"}
                </Button>
            </div>
        </div>
    }
}

// Helper functions

fn copy_chat_link(chat_id: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let promise = window
        .navigator()
        .clipboard()
        .write_text(&format!("{CHAT_URL_BASE}{chat_id}"));

    spawn_local(async move {
        if JsFuture::from(promise).await.is_err() {
            log::warn!("failed to copy chat link to clipboard");
        }
    });
}

fn confirm_delete(category_name: &str) -> bool {
    web_sys::window()
        .and_then(|window| {
            window
                .confirm_with_message(&format!(
                    "Are you sure you want to delete the \"{category_name}\" category?"
                ))
                .ok()
        })
        .unwrap_or(false)
}

/// Transient toast, dismissed after a few seconds
fn show_notification(notification: &UseStateHandle<Option<String>>, message: String) {
    notification.set(Some(message));

    let notification = notification.clone();
    let timeout = Closure::wrap(Box::new(move || notification.set(None)) as Box<dyn FnMut()>);

    if let Some(window) = web_sys::window() {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            timeout.as_ref().unchecked_ref(),
            3000,
        );
    }
    timeout.forget();
}
