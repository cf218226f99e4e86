/// Injects the Pin/Unpin control into the host page's chat context menus
///
/// Most popup-watch firings are for popups that have nothing to do with a
/// chat menu, so every failed precondition is a silent early return; only
/// diagnostic logging, never user-visible errors.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use super::{CHAT_LINK_SELECTOR, CHAT_NAME_SELECTOR, icons, query};
use crate::labels::Labels;
use crate::link;
use crate::store::ChatStore;

/// Marker class on the injected control; doubles as the idempotence guard
/// against double injection into the same menu instance
const INJECTED_MARKER_CLASS: &str = "chat-pinner-control";

pub(crate) fn insert_pin_control(popper: &Element, labels: &Labels) {
    let _ = try_insert(popper, labels);
}

fn try_insert(popper: &Element, labels: &Labels) -> Option<()> {
    let menu = query(popper, "[role='menu']")?;

    if query(&menu, &format!(".{INJECTED_MARKER_CLASS}")).is_some() {
        return None;
    }

    let menu_id = menu.id();
    if menu_id.is_empty() {
        return None;
    }

    let document = web_sys::window()?.document()?;

    // The menu references its owning trigger button via aria-controls; the
    // trigger sits inside the chat link we need the id and name from.
    let trigger: HtmlElement = document
        .query_selector(&format!("button[aria-controls=\"{menu_id}\"]"))
        .ok()
        .flatten()?
        .dyn_into()
        .ok()?;
    let chat_link = trigger.closest(CHAT_LINK_SELECTOR).ok().flatten()?;

    let chat_id = chat_link
        .get_attribute("href")
        .and_then(|href| link::chat_id_from_href(&href))?;
    let chat_name = query(&chat_link, CHAT_NAME_SELECTOR)
        .and_then(|el| el.text_content())
        .and_then(|text| link::display_name(&text))?;

    log::debug!("injecting pin control for chat {chat_id} ({chat_name})");

    let control = build_control(&document, &menu)?;
    append_separator(&document, &menu);
    menu.append_child(&control).ok()?;

    let icon = query(&control, "div")?;
    let label = query(&control, "span")?;

    // Reflect the current pinned state once it is known.
    {
        let store = ChatStore::new();
        let icon = icon.clone();
        let label = label.clone();
        let labels = labels.clone();
        let chat_id = chat_id.clone();
        spawn_local(async move {
            match store.is_pinned(&chat_id).await {
                Ok(pinned) => set_control_state(&icon, &label, &labels, pinned),
                Err(e) => log::warn!("failed to query pinned state for {chat_id}: {e}"),
            }
        });
    }

    attach_toggle(&control, icon, label, labels.clone(), chat_id, chat_name, trigger);

    Some(())
}

/// Clone an existing menu item as the structural template, then rebuild its
/// content as an icon region plus a label region
fn build_control(document: &Document, menu: &Element) -> Option<Element> {
    let template = query(menu, "[role='menuitem']")?;

    let control: Element = template.clone_node_with_deep(true).ok()?.dyn_into().ok()?;
    control.class_list().add_1(INJECTED_MARKER_CLASS).ok()?;
    control.set_inner_html("");

    let icon = document.create_element("div").ok()?;
    icon.set_class_name("flex items-center justify-center h-5 w-5");
    let label = document.create_element("span").ok()?;

    control.append_child(&icon).ok()?;
    control.append_child(&label).ok()?;

    Some(control)
}

fn append_separator(document: &Document, menu: &Element) {
    let Ok(separator) = document.create_element("div") else {
        return;
    };
    let _ = separator.set_attribute("role", "separator");

    if let Some(existing) = query(menu, "[role='separator']") {
        separator.set_class_name(&existing.class_name());
    }

    let _ = menu.append_child(&separator);
}

fn set_control_state(icon: &Element, label: &Element, labels: &Labels, pinned: bool) {
    label.set_text_content(Some(if pinned { &labels.unpin } else { &labels.pin }));
    icon.set_inner_html(if pinned { icons::UNPIN } else { icons::PIN });
}

/// Toggle the persisted state on activation, refresh this control's own
/// icon/label, then close the menu by re-clicking its trigger. The sidebar
/// section refresh rides the storage change notification instead.
fn attach_toggle(
    control: &Element,
    icon: Element,
    label: Element,
    labels: Labels,
    chat_id: String,
    chat_name: String,
    trigger: HtmlElement,
) {
    let onclick = Closure::wrap(Box::new(move |event: MouseEvent| {
        event.stop_propagation();

        let store = ChatStore::new();
        let icon = icon.clone();
        let label = label.clone();
        let labels = labels.clone();
        let chat_id = chat_id.clone();
        let chat_name = chat_name.clone();
        let trigger = trigger.clone();

        spawn_local(async move {
            if let Err(e) = store.toggle_chat_pin(&chat_id, &chat_name).await {
                log::warn!("failed to toggle pin for {chat_id}: {e}");
                return;
            }

            match store.is_pinned(&chat_id).await {
                Ok(pinned) => set_control_state(&icon, &label, &labels, pinned),
                Err(e) => log::warn!("failed to re-query pinned state for {chat_id}: {e}"),
            }

            trigger.click();
        });
    }) as Box<dyn FnMut(MouseEvent)>);

    let _ = control.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref());
    onclick.forget();
}
