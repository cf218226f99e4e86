/// Chat Pinner - Chrome Extension for pinning chats in a web chat interface
/// Built with Rust + WASM + Yew

mod chat_data;
mod labels;
mod link;
mod ops;
mod store;
pub mod content;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export link parsing for JavaScript access
#[wasm_bindgen]
pub fn extract_chat_id(href: &str) -> Option<String> {
    link::chat_id_from_href(href)
}

// Content script: watch the host page and inject the pin feature
#[wasm_bindgen]
pub fn start_content() {
    content::start();
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Start the Yew app for the full page view
#[wasm_bindgen]
pub fn start_fullpage() {
    yew::Renderer::<ui::fullpage::FullPage>::new().render();
}
