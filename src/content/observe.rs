/// DOM observation engine
///
/// Two subtree observers rooted at the document body, running for the
/// process lifetime (the host page offers no event API, so structural
/// observation with cheap idempotent checks is the integration point):
///
/// 1. Sidebar watch: waits for the chat-history container, then captures a
///    section clone as the structural template and triggers the first
///    render. Later firings are existence checks that return immediately.
/// 2. Popup watch: filters added nodes for the floating-menu marker and
///    hands each qualifying node to the injection path.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, MutationObserver, MutationObserverInit, MutationRecord, Node};

use super::{
    HISTORY_CONTAINER_ID, POPPER_MARKER_ATTR, SECTION_TEMPLATE_SELECTOR, SidebarBinding, inject,
    render,
};
use crate::labels::Labels;
use crate::store::ChatStore;

/// Entry point for the content script
pub fn start() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("content script started without a document");
        return;
    };
    let Some(body) = document.body() else {
        log::error!("content script started before document.body exists");
        return;
    };

    let labels = Labels::load();
    let sidebar = Rc::new(RefCell::new(SidebarBinding::new(labels.clone())));

    watch_sidebar(&document, &body, sidebar.clone());
    watch_popups(&body, labels);

    // Any write to any tracked key refreshes the injected section, including
    // this page's own writes. Rendering waits until the sidebar is bound.
    {
        let sidebar = sidebar.clone();
        ChatStore::on_changed(move || {
            if sidebar.borrow().is_bound() {
                render::refresh(&sidebar);
            }
        });
    }

    // Prime the default category so every surface sees it from the start.
    spawn_local(async {
        if let Err(e) = ChatStore::new().get_categories().await {
            log::warn!("failed to initialize categories: {e}");
        }
    });

    log::info!("chat pinner content script active");
}

fn watch_sidebar(document: &Document, body: &Node, sidebar: Rc<RefCell<SidebarBinding>>) {
    let document = document.clone();

    let callback = Closure::wrap(Box::new(move |_: js_sys::Array, _: JsValue| {
        if sidebar.borrow().is_bound() {
            return;
        }

        let Some(container) = document.get_element_by_id(HISTORY_CONTAINER_ID) else {
            return;
        };

        bind_sidebar(&sidebar, container);
        render::refresh(&sidebar);
    }) as Box<dyn FnMut(js_sys::Array, JsValue)>);

    observe_subtree(body, &callback);
    callback.forget();
}

/// Capture the container and clone an existing history section as the
/// structural template for the synthetic "Pinned" section
fn bind_sidebar(sidebar: &Rc<RefCell<SidebarBinding>>, container: Element) {
    let template = super::query(&container, SECTION_TEMPLATE_SELECTOR)
        .and_then(|section| section.clone_node_with_deep(true).ok())
        .and_then(|node| node.dyn_into::<Element>().ok());

    if template.is_none() {
        log::debug!("sidebar bound before any chat section rendered; no template yet");
    }

    let mut binding = sidebar.borrow_mut();
    binding.container = Some(container);
    binding.template = template;
}

fn watch_popups(body: &Node, labels: Labels) {
    let callback = Closure::wrap(Box::new(move |mutations: js_sys::Array, _: JsValue| {
        for mutation in mutations.iter() {
            let Ok(record) = mutation.dyn_into::<MutationRecord>() else {
                continue;
            };

            let added = record.added_nodes();
            for index in 0..added.length() {
                let Some(node) = added.get(index) else {
                    continue;
                };
                let Ok(element) = node.dyn_into::<Element>() else {
                    continue;
                };

                if element.has_attribute(POPPER_MARKER_ATTR) {
                    inject::insert_pin_control(&element, &labels);
                }
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, JsValue)>);

    observe_subtree(body, &callback);
    callback.forget();
}

fn observe_subtree(target: &Node, callback: &Closure<dyn FnMut(js_sys::Array, JsValue)>) {
    let observer = match MutationObserver::new(callback.as_ref().unchecked_ref()) {
        Ok(observer) => observer,
        Err(e) => {
            log::error!("failed to create mutation observer: {e:?}");
            return;
        }
    };

    let init = MutationObserverInit::new();
    init.set_child_list(true);
    init.set_subtree(true);

    if let Err(e) = observer.observe_with_options(target, &init) {
        log::error!("failed to observe document body: {e:?}");
    }
}
