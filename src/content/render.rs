/// Rebuilds the synthetic "Pinned" section in the host sidebar
///
/// Every invocation renders from scratch: the previous section is removed
/// and a fresh clone of the captured template is populated from the stored
/// pin list. No incremental diffing.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, MouseEvent};

use super::{CHAT_LINK_SELECTOR, CHAT_NAME_SELECTOR, SidebarBinding, icons, query};
use crate::chat_data::PinnedChat;
use crate::labels::Labels;
use crate::store::ChatStore;

const PINNED_SECTION_ID: &str = "chat-pinner-pinned-section";
const TRAILING_SELECTOR: &str = ".trailing";

pub(crate) fn refresh(sidebar: &Rc<RefCell<SidebarBinding>>) {
    let sidebar = sidebar.clone();

    spawn_local(async move {
        // On storage failure the section keeps its last-good state.
        let chats = match ChatStore::new().get_pinned_chats().await {
            Ok(chats) => chats,
            Err(e) => {
                log::warn!("failed to load pinned chats: {e}");
                return;
            }
        };

        rebuild(&sidebar.borrow(), &chats);
    });
}

fn rebuild(binding: &SidebarBinding, chats: &[PinnedChat]) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    if let Some(previous) = document.get_element_by_id(PINNED_SECTION_ID) {
        previous.remove();
    }

    let (Some(container), Some(template)) = (&binding.container, &binding.template) else {
        log::debug!("sidebar template not captured yet; render deferred");
        return;
    };

    let Some(section) = clone_element(template) else {
        return;
    };
    section.set_id(PINNED_SECTION_ID);

    if let Some(header) = query(&section, "h2") {
        header.set_text_content(Some(&binding.labels.pinned));
    }

    let entry_template = query(&section, CHAT_LINK_SELECTOR);
    strip_template_entries(&section);

    // Pinned-first placement, above the chronological history.
    let _ = container.insert_before(&section, container.first_child().as_ref());

    let Some(entry_template) = entry_template.filter(|_| !chats.is_empty()) else {
        insert_placeholder(&section, &binding.labels);
        return;
    };

    for chat in chats {
        if let Some(entry) = build_entry(&document, &entry_template, chat, &binding.labels) {
            let _ = section.append_child(&entry);
        }
    }
}

fn strip_template_entries(section: &Element) {
    let Ok(entries) = section.query_selector_all(CHAT_LINK_SELECTOR) else {
        return;
    };

    for index in 0..entries.length() {
        if let Some(entry) = entries.get(index) {
            if let Ok(element) = entry.dyn_into::<Element>() {
                element.remove();
            }
        }
    }
}

fn insert_placeholder(section: &Element, labels: &Labels) {
    let html = format!(
        "<div class=\"group relative rounded-lg\">\
         <span class=\"flex items-center gap-2 p-2 text-sm\">{}</span></div>",
        labels.no_pinned_chats
    );
    let _ = section.insert_adjacent_html("beforeend", &html);
}

fn build_entry(
    document: &Document,
    template: &Element,
    chat: &PinnedChat,
    labels: &Labels,
) -> Option<Element> {
    let entry = clone_element(template)?;

    entry.set_attribute("href", &format!("/c/{}", chat.id)).ok()?;
    // The template may have been cloned from the currently open chat.
    let _ = entry.remove_attribute("data-active");

    if let Some(text) = query(&entry, CHAT_NAME_SELECTOR) {
        text.set_text_content(Some(&chat.name));
    }

    if let Some(trailing) = query(&entry, TRAILING_SELECTOR) {
        trailing.set_inner_html("");

        let unpin = document.create_element("button").ok()?;
        unpin.set_class_name("__menu-item-trailing-btn");
        unpin.set_attribute("title", &labels.unpin).ok()?;
        unpin.set_inner_html(icons::UNPIN);
        attach_unpin(&unpin, &chat.id);

        trailing.append_child(&unpin).ok()?;
    }

    Some(entry)
}

/// The unpin write triggers the change notification, which re-renders the
/// whole section; no direct DOM update here
fn attach_unpin(button: &Element, chat_id: &str) {
    let chat_id = chat_id.to_string();

    let onclick = Closure::wrap(Box::new(move |event: MouseEvent| {
        event.prevent_default();
        event.stop_propagation();

        let chat_id = chat_id.clone();
        spawn_local(async move {
            if let Err(e) = ChatStore::new().unpin_chat(&chat_id).await {
                log::warn!("failed to unpin {chat_id}: {e}");
            }
        });
    }) as Box<dyn FnMut(MouseEvent)>);

    let _ = button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref());
    onclick.forget();
}

fn clone_element(element: &Element) -> Option<Element> {
    element
        .clone_node_with_deep(true)
        .ok()?
        .dyn_into::<Element>()
        .ok()
}
