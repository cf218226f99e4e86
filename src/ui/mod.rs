/// UI module exports

pub mod fullpage;
pub mod popup;

/// Base URL for opening a pinned chat outside the host page
pub(crate) const CHAT_URL_BASE: &str = "https://chat.openai.com/c/";
