/// Popup UI for the Chat Pinner extension
///
/// Reads the pinned list once on open; no live change subscription, so a
/// popup left in the background shows stale data until reopened.

use patternfly_yew::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::CHAT_URL_BASE;
use crate::chat_data::PinnedChat;
use crate::store::ChatStore;

// Import JS bridge functions
#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn openFullPage() -> Result<(), JsValue>;
}

#[derive(Clone, PartialEq)]
enum PopupState {
    Loading,
    Idle,
    Error(String),
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| PopupState::Loading);
    let chats = use_state(Vec::<PinnedChat>::new);

    // Load pinned chats on mount
    {
        let state = state.clone();
        let chats = chats.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match ChatStore::new().get_pinned_chats().await {
                    Ok(list) => {
                        chats.set(list);
                        state.set(PopupState::Idle);
                    }
                    Err(e) => {
                        state.set(PopupState::Error(format!("Failed to load: {e}")));
                    }
                }
            });
            || ()
        });
    }

    let on_full_page = Callback::from(move |_| {
        spawn_local(async move {
            match openFullPage().await {
                Ok(()) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.close();
                    }
                }
                Err(e) => log::warn!("failed to open full page view: {e:?}"),
            }
        });
    });

    html! {
        <div class="popup">
            <h1 class="popup-title">{"Chat Pinner"}</h1>

            {match &*state {
                PopupState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Loading pinned chats..."}</p>
                    </div>
                },
                PopupState::Error(err) => html! {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {err.clone()}
                    </Alert>
                },
                PopupState::Idle if chats.is_empty() => html! {
                    <div class="empty-state">
                        <p>{"No pinned chats yet."}</p>
                        <p class="empty-state-hint">{"Pin a chat from its menu in the sidebar."}</p>
                    </div>
                },
                PopupState::Idle => html! {
                    <div class="pinned-list">
                        {for chats.iter().map(|chat| html! {
                            <a
                                key={chat.id.clone()}
                                class="pinned-link"
                                href={format!("{CHAT_URL_BASE}{}", chat.id)}
                                target="_blank"
                                title={format!("Open chat: {}", chat.name)}
                            >
                                {&chat.name}
                            </a>
                        })}
                    </div>
                },
            }}

            <Button onclick={on_full_page} variant={ButtonVariant::Secondary} block={true}>
                {"Open full page view"}
            </Button>
        </div>
    }
}
